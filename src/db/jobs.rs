// src/db/jobs.rs
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_RUNNING: &str = "running";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_FAILED: &str = "failed";

/// One run of the admin data-extraction tool. The worker thread owns the
/// status lifecycle (pending -> running -> completed | failed); the admin
/// page only ever polls this record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionJob {
    pub id: i64,
    pub kind: String,
    pub area: String,
    pub status: String,
    pub started_at: i64,
    pub finished_at: Option<i64>,
    pub listings_seen: Option<i64>,
    pub result_json: Option<String>,
    pub error_message: Option<String>,
}

impl ExtractionJob {
    pub fn is_terminal(&self) -> bool {
        self.status == STATUS_COMPLETED || self.status == STATUS_FAILED
    }
}

const JOB_COLUMNS: &str =
    "id, kind, area, status, started_at, finished_at, listings_seen, result_json, error_message";

fn row_to_job(row: &rusqlite::Row) -> rusqlite::Result<ExtractionJob> {
    Ok(ExtractionJob {
        id: row.get(0)?,
        kind: row.get(1)?,
        area: row.get(2)?,
        status: row.get(3)?,
        started_at: row.get(4)?,
        finished_at: row.get(5)?,
        listings_seen: row.get(6)?,
        result_json: row.get(7)?,
        error_message: row.get(8)?,
    })
}

pub fn create_job(conn: &Connection, kind: &str, area: &str, now: i64) -> Result<i64, ServerError> {
    conn.execute(
        "INSERT INTO extraction_jobs (kind, area, status, started_at) VALUES (?, ?, ?, ?)",
        params![kind, area, STATUS_PENDING, now],
    )
    .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

pub fn mark_job_running(conn: &Connection, job_id: i64) -> Result<(), ServerError> {
    conn.execute(
        "UPDATE extraction_jobs SET status = ? WHERE id = ?",
        params![STATUS_RUNNING, job_id],
    )
    .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(())
}

pub fn complete_job(
    conn: &Connection,
    job_id: i64,
    now: i64,
    listings_seen: usize,
    result_json: &str,
) -> Result<(), ServerError> {
    conn.execute(
        "UPDATE extraction_jobs
         SET status = ?, finished_at = ?, listings_seen = ?, result_json = ?
         WHERE id = ?",
        params![STATUS_COMPLETED, now, listings_seen as i64, result_json, job_id],
    )
    .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(())
}

pub fn fail_job(
    conn: &Connection,
    job_id: i64,
    now: i64,
    error: &str,
) -> Result<(), ServerError> {
    conn.execute(
        "UPDATE extraction_jobs SET status = ?, finished_at = ?, error_message = ? WHERE id = ?",
        params![STATUS_FAILED, now, error, job_id],
    )
    .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(())
}

pub fn get_job(conn: &Connection, job_id: i64) -> Result<Option<ExtractionJob>, ServerError> {
    conn.query_row(
        &format!("SELECT {JOB_COLUMNS} FROM extraction_jobs WHERE id = ?"),
        params![job_id],
        row_to_job,
    )
    .optional()
    .map_err(|e| ServerError::DbError(e.to_string()))
}

pub fn recent_jobs(conn: &Connection, limit: i64) -> Result<Vec<ExtractionJob>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {JOB_COLUMNS} FROM extraction_jobs ORDER BY started_at DESC, id DESC LIMIT ?"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit], row_to_job)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut jobs = Vec::new();
    for r in rows {
        jobs.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(jobs)
}

pub fn latest_completed_job(conn: &Connection) -> Result<Option<ExtractionJob>, ServerError> {
    conn.query_row(
        &format!(
            "SELECT {JOB_COLUMNS} FROM extraction_jobs
             WHERE status = ? ORDER BY finished_at DESC, id DESC LIMIT 1"
        ),
        params![STATUS_COMPLETED],
        row_to_job,
    )
    .optional()
    .map_err(|e| ServerError::DbError(e.to_string()))
}
