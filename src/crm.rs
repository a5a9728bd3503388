// src/crm.rs
use crate::config::Config;
use crate::db::leads::NewLead;
use crate::errors::ServerError;
use serde_json::json;

/// Thin client for the CRM contact API. Lead sync is best-effort: the lead
/// row is already stored before this runs, and a failed push leaves it
/// flagged unsynced rather than surfacing an error to the visitor.
pub struct CrmClient {
    api_url: String,
    api_key: String,
}

impl CrmClient {
    /// None when no CRM key is configured (sync disabled).
    pub fn from_config(cfg: &Config) -> Option<Self> {
        cfg.crm_api_key.as_ref().map(|key| Self {
            api_url: cfg.crm_api_url.clone(),
            api_key: key.clone(),
        })
    }

    /// Upsert the lead as a CRM contact.
    pub fn sync_lead(&self, lead: &NewLead) -> Result<(), ServerError> {
        let client = reqwest::blocking::Client::new();

        let body = json!({
            "email": lead.email,
            "updateEnabled": true,
            "attributes": {
                "FIRSTNAME": lead.name,
                "SMS": lead.phone,
                "SOURCE_PAGE": lead.source_page,
                "LISTING_ID": lead.listing_id,
                "MESSAGE": lead.message,
            }
        });

        let response = client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .map_err(|e| ServerError::BadRequest(format!("Failed to send CRM request: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let text = response.text().unwrap_or_else(|_| "(no body)".to_string());
            Err(ServerError::BadRequest(format!(
                "CRM API error: {} - {}",
                status, text
            )))
        }
    }
}
