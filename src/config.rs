// src/config.rs
use std::env;

/// Runtime configuration, read once from the environment at startup.
///
/// The provider and CRM keys are optional: a missing key disables that
/// integration (listings pages render an inline error, leads stay unsynced)
/// without taking the process down.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_path: String,

    pub listings_api_url: String,
    pub listings_api_key: Option<String>,

    pub crm_api_url: String,
    pub crm_api_key: Option<String>,

    /// Bearer token for the admin back office. Absent = admin disabled.
    pub admin_token: Option<String>,
}

const DEFAULT_LISTINGS_API_URL: &str = "https://api.listhub-data.com/v2/listings/search";
const DEFAULT_CRM_API_URL: &str = "https://api.brevo.com/v3/contacts";

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into()),
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "homeport.sqlite3".into()),

            listings_api_url: env::var("LISTINGS_API_URL")
                .unwrap_or_else(|_| DEFAULT_LISTINGS_API_URL.into()),
            listings_api_key: env::var("LISTINGS_API_KEY").ok().filter(|k| !k.is_empty()),

            crm_api_url: env::var("CRM_API_URL").unwrap_or_else(|_| DEFAULT_CRM_API_URL.into()),
            crm_api_key: env::var("CRM_API_KEY").ok().filter(|k| !k.is_empty()),

            admin_token: env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }
}
