// src/db/leads.rs
use crate::errors::ServerError;
use rusqlite::{params, Connection};
use time::OffsetDateTime;

/// A captured inquiry. Leads are stored before any CRM push is attempted, so
/// a CRM outage never loses a contact.
#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub source_page: Option<String>,
    pub listing_id: Option<String>,
    pub crm_synced: bool,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub source_page: Option<String>,
    pub listing_id: Option<String>,
}

pub fn insert_lead(conn: &Connection, lead: &NewLead, now: i64) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        INSERT INTO leads (name, email, phone, message, source_page, listing_id, crm_synced, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)
        "#,
        params![
            lead.name,
            lead.email,
            lead.phone,
            lead.message,
            lead.source_page,
            lead.listing_id,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

pub fn mark_crm_synced(conn: &Connection, lead_id: i64) -> Result<(), ServerError> {
    conn.execute(
        "UPDATE leads SET crm_synced = 1 WHERE id = ?",
        params![lead_id],
    )
    .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(())
}

pub fn recent_leads(conn: &Connection, limit: i64) -> Result<Vec<Lead>, ServerError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, email, phone, message, source_page, listing_id, crm_synced, created_at
             FROM leads ORDER BY created_at DESC LIMIT ?",
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit], |row| {
            Ok(Lead {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                phone: row.get(3)?,
                message: row.get(4)?,
                source_page: row.get(5)?,
                listing_id: row.get(6)?,
                crm_synced: row.get(7)?,
                created_at: row.get(8)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut leads = Vec::new();
    for r in rows {
        leads.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(leads)
}

pub fn count_leads(conn: &Connection) -> Result<i64, ServerError> {
    conn.query_row("SELECT COUNT(*) FROM leads", [], |r| r.get(0))
        .map_err(|e| ServerError::DbError(format!("count leads failed: {e}")))
}

/// Counts leads captured in the current calendar month (UTC).
pub fn count_leads_this_month(conn: &Connection, now: i64) -> Result<i64, ServerError> {
    // Determine start of the current month based on 'now'
    let dt = OffsetDateTime::from_unix_timestamp(now).unwrap_or_else(|_| OffsetDateTime::now_utc());

    let start_of_month = dt
        .replace_day(1)
        .unwrap_or(dt) // Day 1 is valid for every month, so this is just type safety
        .replace_time(time::Time::MIDNIGHT)
        .unix_timestamp();

    conn.query_row(
        "SELECT COUNT(*) FROM leads WHERE created_at >= ?",
        params![start_of_month],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("count monthly leads failed: {e}")))
}
