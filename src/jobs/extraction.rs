// src/jobs/extraction.rs
use crate::config::Config;
use crate::db::connection::Database;
use crate::db::jobs;
use crate::errors::ServerError;
use crate::pipeline::{self, aggregate};
use crate::provider::{ListingsClient, SearchQuery, EXTRACT_LIMIT};

/// Which grouping the extraction produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractKind {
    Zip,
    Neighborhood,
}

impl ExtractKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractKind::Zip => "zip",
            ExtractKind::Neighborhood => "neighborhood",
        }
    }

    pub fn parse(value: &str) -> Option<ExtractKind> {
        match value {
            "zip" => Some(ExtractKind::Zip),
            "neighborhood" => Some(ExtractKind::Neighborhood),
            _ => None,
        }
    }
}

fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Create the job record and hand the work to a detached thread. Returns the
/// job id immediately; the admin page polls the record until it reaches a
/// terminal status.
pub fn start_extraction(
    db: &Database,
    cfg: &Config,
    kind: ExtractKind,
    area: String,
) -> Result<i64, ServerError> {
    let job_id = db.with_conn(|conn| jobs::create_job(conn, kind.as_str(), &area, now_unix()))?;

    let db = db.clone(); // cheap clone (path only)
    let cfg = cfg.clone();

    std::thread::spawn(move || {
        eprintln!("🧵 Extraction thread started for {} by {}", area, kind.as_str());

        if let Err(e) = db.with_conn(|conn| jobs::mark_job_running(conn, job_id)) {
            eprintln!("Failed to mark job {job_id} running: {e}");
            return;
        }

        match run_extraction(&cfg, kind, &area) {
            Ok((listings_seen, result_json)) => {
                eprintln!("✅ Extraction complete ({listings_seen} listings)");
                let _ = db.with_conn(|conn| {
                    jobs::complete_job(conn, job_id, now_unix(), listings_seen, &result_json)
                });
            }
            Err(e) => {
                eprintln!("Extraction failed: {e}");
                let _ =
                    db.with_conn(|conn| jobs::fail_job(conn, job_id, now_unix(), &e.to_string()));
            }
        }
    });

    Ok(job_id)
}

/// Pull one large bounded page for the area and aggregate it by the selected
/// key. Groups come back ordered by count descending, then key.
fn run_extraction(
    cfg: &Config,
    kind: ExtractKind,
    area: &str,
) -> Result<(usize, String), ServerError> {
    let client = ListingsClient::from_config(cfg)
        .map_err(|e| ServerError::BadRequest(e.to_string()))?;

    let query = SearchQuery {
        city: Some(area.to_string()),
        ..SearchQuery::with_limit(EXTRACT_LIMIT)
    };

    let raw = client
        .search(&query)
        .map_err(|e| ServerError::BadRequest(e.to_string()))?;

    let mut groups = match kind {
        ExtractKind::Zip => pipeline::recompute_aggregate(&raw, aggregate::by_zip),
        ExtractKind::Neighborhood => {
            pipeline::recompute_aggregate(&raw, aggregate::by_neighborhood)
        }
    };
    pipeline::sort_groups_by_count(&mut groups);

    let result_json = serde_json::to_string(&groups)
        .map_err(|e| ServerError::BadRequest(format!("serialize extraction result: {e}")))?;

    Ok((raw.len(), result_json))
}
