// src/db/settings.rs
use crate::errors::ServerError;
use rusqlite::{params, Connection};

/// Site identity and SEO defaults, stored as key/value rows so the admin can
/// edit them without a schema change. Missing keys fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSettings {
    pub site_name: String,
    pub tagline: String,
    pub meta_description: String,
    pub analytics_id: Option<String>,
    pub office_city: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "Homeport Realty".to_string(),
            tagline: "Find your place on the map".to_string(),
            meta_description: "Search homes for sale, explore neighborhoods, and connect with local agents.".to_string(),
            analytics_id: None,
            office_city: "Austin".to_string(),
        }
    }
}

pub fn load_settings(conn: &Connection) -> Result<SiteSettings, ServerError> {
    let mut settings = SiteSettings::default();

    for (key, value) in all_settings(conn)? {
        if value.trim().is_empty() {
            continue;
        }
        match key.as_str() {
            "site_name" => settings.site_name = value,
            "tagline" => settings.tagline = value,
            "meta_description" => settings.meta_description = value,
            "analytics_id" => settings.analytics_id = Some(value),
            "office_city" => settings.office_city = value,
            // Unknown keys are tolerated so old rows never break a deploy.
            _ => {}
        }
    }

    Ok(settings)
}

pub fn all_settings(conn: &Connection) -> Result<Vec<(String, String)>, ServerError> {
    let mut stmt = conn
        .prepare("SELECT key, value FROM settings ORDER BY key")
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn upsert_setting(conn: &Connection, key: &str, value: &str) -> Result<(), ServerError> {
    conn.execute(
        r#"
        INSERT INTO settings (key, value) VALUES (?1, ?2)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value
        "#,
        params![key, value],
    )
    .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(())
}

/// Editable keys, in the order the admin form renders them.
pub const SETTING_KEYS: [&str; 5] = [
    "site_name",
    "tagline",
    "meta_description",
    "analytics_id",
    "office_city",
];
