use crate::auth::admin_authorized;
use crate::config::Config;
use crate::crm::CrmClient;
use crate::db::connection::Database;
use crate::db::featured::{self, LocationKind};
use crate::db::jobs;
use crate::db::leads::{self, NewLead};
use crate::db::pages;
use crate::db::settings::{self, SETTING_KEYS};
use crate::errors::ServerError;
use crate::jobs::{start_extraction, ExtractKind};
use crate::pipeline::{
    self, aggregate, AggregateGroup, FilterState, RawListing, SortKey,
};
use crate::provider::{ListingsClient, SearchQuery};
use crate::responses::{html_response, json_response, redirect_response, ResultResp};
use crate::spreadsheets::export_groups_xlsx;
use crate::templates::pages::{
    admin_dashboard, admin_locations_page, admin_pages_page, admin_settings_page, agents_page,
    blog_index_page, blog_post_page, extraction_page, home_page, listings_page, location_page,
    thanks_page, AdminVm, AgentsVm, ExtractionVm, HomeVm, ListingsVm, LocationVm,
};
use crate::templates::Seo;
use astra::Request;
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;

/// Bounded page pulled for the public search and directory views; filtering
/// and sorting happen locally in the pipeline.
const SEARCH_FETCH_LIMIT: usize = 500;

pub fn handle(req: Request, db: &Database, cfg: &Config) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => home_handler(db),
        ("GET", "/listings") => listings_handler(&req, db, cfg),
        ("GET", "/agents") => agents_handler(db, cfg),
        ("GET", "/blog") => blog_index_handler(db),
        ("POST", "/leads") => lead_handler(req, db, cfg),
        ("GET", p) if p.starts_with("/locations/") => {
            location_handler(p.trim_start_matches("/locations/"), db, cfg)
        }
        ("GET", p) if p.starts_with("/blog/") => {
            blog_post_handler(p.trim_start_matches("/blog/"), db)
        }
        (_, p) if p == "/admin" || p.starts_with("/admin/") => admin_routes(req, db, cfg),
        _ => Err(ServerError::NotFound),
    }
}

// ----- Public pages -----

fn home_handler(db: &Database) -> ResultResp {
    let (site, featured) = db.with_conn(|conn| {
        Ok((settings::load_settings(conn)?, featured::list_featured(conn)?))
    })?;

    let vm = HomeVm {
        seo: Seo::from_settings(&site, "Home"),
        settings: site,
        featured,
    };
    html_response(home_page(&vm))
}

fn listings_handler(req: &Request, db: &Database, cfg: &Config) -> ResultResp {
    let params = parse_query(req);
    let state = FilterState::from_params(&params);
    let sort = SortKey::parse(params.get("sort").map(String::as_str).unwrap_or(""));

    let site = db.with_conn(|conn| settings::load_settings(conn))?;

    let query = SearchQuery {
        status: Some("for_sale".to_string()),
        ..SearchQuery::with_limit(SEARCH_FETCH_LIMIT)
    };
    let (raw, fetch_error) = fetch_listings(cfg, &query);

    // Full recompute on every request: normalize -> filter -> sort, plus the
    // unfiltered city rollup that feeds the dropdown.
    let listings = pipeline::recompute(&raw, &state, sort);
    let mut cities = pipeline::recompute_aggregate(&raw, aggregate::by_city);
    pipeline::sort_groups_by_count(&mut cities);

    let vm = ListingsVm {
        seo: Seo::from_settings(&site, "Listings"),
        state,
        sort,
        listings,
        cities,
        fetch_error,
    };
    html_response(listings_page(&vm))
}

fn location_handler(slug: &str, db: &Database, cfg: &Config) -> ResultResp {
    let (site, loc) = db.with_conn(|conn| {
        Ok((
            settings::load_settings(conn)?,
            featured::get_featured(conn, slug)?,
        ))
    })?;
    let loc = loc.ok_or(ServerError::NotFound)?;

    // Counties have no dedicated provider parameter; the provider resolves
    // area names passed as `city` loosely enough to cover them.
    let query = match loc.kind {
        LocationKind::City | LocationKind::County => SearchQuery {
            city: Some(loc.name.clone()),
            ..SearchQuery::with_limit(SEARCH_FETCH_LIMIT)
        },
        LocationKind::Zip => SearchQuery {
            zip: Some(loc.name.clone()),
            ..SearchQuery::with_limit(SEARCH_FETCH_LIMIT)
        },
        LocationKind::Neighborhood => SearchQuery {
            neighborhood: Some(loc.name.clone()),
            ..SearchQuery::with_limit(SEARCH_FETCH_LIMIT)
        },
    };
    let (raw, fetch_error) = fetch_listings(cfg, &query);

    let listings = pipeline::recompute(&raw, &FilterState::default(), SortKey::Newest);

    // Market stats come from the aggregator with a constant key: one group
    // covering the whole area.
    let area_name = loc.name.clone();
    let stats = pipeline::recompute_aggregate(&raw, move |_| Some(area_name.clone()));
    let (count, avg_price) = stats
        .first()
        .map(|g| (g.count, g.avg_price))
        .unwrap_or((0, 0.0));

    let vm = LocationVm {
        seo: Seo::from_settings(&site, &loc.name).with_description(&loc.blurb),
        location: loc,
        listings,
        count,
        avg_price,
        fetch_error,
    };
    html_response(location_page(&vm))
}

fn agents_handler(db: &Database, cfg: &Config) -> ResultResp {
    let site = db.with_conn(|conn| settings::load_settings(conn))?;

    let query = SearchQuery {
        city: Some(site.office_city.clone()),
        ..SearchQuery::with_limit(SEARCH_FETCH_LIMIT)
    };
    let (raw, fetch_error) = fetch_listings(cfg, &query);

    let mut agents = pipeline::recompute_aggregate(&raw, aggregate::by_agent);
    pipeline::sort_groups_by_count(&mut agents);

    let vm = AgentsVm {
        seo: Seo::from_settings(&site, "Agents"),
        agents,
        fetch_error,
    };
    html_response(agents_page(&vm))
}

fn blog_index_handler(db: &Database) -> ResultResp {
    let (site, posts) = db.with_conn(|conn| {
        Ok((settings::load_settings(conn)?, pages::list_published(conn)?))
    })?;

    let seo = Seo::from_settings(&site, "Blog");
    html_response(blog_index_page(&seo, &posts))
}

fn blog_post_handler(slug: &str, db: &Database) -> ResultResp {
    let (site, post) = db.with_conn(|conn| {
        Ok((
            settings::load_settings(conn)?,
            pages::get_published(conn, slug)?,
        ))
    })?;
    let post = post.ok_or(ServerError::NotFound)?;

    let seo = Seo::from_settings(&site, &post.title).with_description(&post.meta_description);
    html_response(blog_post_page(&seo, &post))
}

fn lead_handler(req: Request, db: &Database, cfg: &Config) -> ResultResp {
    let form = parse_form(read_body(req)?.as_str());

    let name = form.get("name").map(|s| s.trim()).unwrap_or_default();
    let email = form.get("email").map(|s| s.trim()).unwrap_or_default();
    if name.is_empty() {
        return Err(ServerError::BadRequest("name is required".into()));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(ServerError::BadRequest("a valid email is required".into()));
    }

    let optional = |key: &str| {
        form.get(key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let new_lead = NewLead {
        name: name.to_string(),
        email: email.to_string(),
        phone: optional("phone"),
        message: optional("message"),
        source_page: optional("source_page"),
        listing_id: optional("listing_id"),
    };

    // Store first; the CRM push is best-effort and never loses the lead.
    let lead_id = db.with_conn(|conn| leads::insert_lead(conn, &new_lead, now_unix()))?;

    if let Some(crm) = CrmClient::from_config(cfg) {
        match crm.sync_lead(&new_lead) {
            Ok(()) => {
                db.with_conn(|conn| leads::mark_crm_synced(conn, lead_id))?;
            }
            Err(e) => eprintln!("CRM sync failed for lead {lead_id}: {e}"),
        }
    }

    let site = db.with_conn(|conn| settings::load_settings(conn))?;
    html_response(thanks_page(&Seo::from_settings(&site, "Thanks")))
}

// ----- Admin -----

fn admin_routes(req: Request, db: &Database, cfg: &Config) -> ResultResp {
    // Unauthorized requests see the same 404 as a disabled admin surface.
    if !admin_authorized(&req, cfg) {
        return Err(ServerError::NotFound);
    }

    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query_token = parse_query(&req).get("token").cloned();

    let mut resp = match (method.as_str(), path.as_str()) {
        ("GET", "/admin") => admin_dashboard_handler(db),
        ("GET", "/admin/settings") => admin_settings_handler(db),
        ("POST", "/admin/settings") => admin_settings_save_handler(req, db),
        ("GET", "/admin/locations") => admin_locations_handler(&req, db),
        ("POST", "/admin/locations") => admin_locations_save_handler(req, db),
        ("POST", "/admin/locations/delete") => admin_locations_delete_handler(req, db),
        ("GET", "/admin/pages") => admin_pages_handler(&req, db),
        ("POST", "/admin/pages") => admin_pages_save_handler(req, db),
        ("POST", "/admin/pages/delete") => admin_pages_delete_handler(req, db),
        ("GET", "/admin/extract") => admin_extract_handler(&req, db),
        ("POST", "/admin/extract") => admin_extract_start_handler(req, db, cfg),
        ("GET", "/admin/extract/status") => admin_extract_status_handler(&req, db),
        ("GET", "/admin/extract/export") => admin_extract_export_handler(&req, db),
        _ => Err(ServerError::NotFound),
    }?;

    // First visit arrives with ?token=; pin it as a cookie so admin links
    // stay clean afterwards.
    if let Some(token) = query_token {
        if let Ok(value) = format!("admin_token={token}; HttpOnly; Path=/admin").parse() {
            resp.headers_mut().insert("Set-Cookie", value);
        }
    }

    Ok(resp)
}

fn admin_dashboard_handler(db: &Database) -> ResultResp {
    let now = now_unix();
    let (site, lead_total, leads_this_month, recent_leads, recent_jobs) =
        db.with_conn(|conn| {
            Ok((
                settings::load_settings(conn)?,
                leads::count_leads(conn)?,
                leads::count_leads_this_month(conn, now)?,
                leads::recent_leads(conn, 20)?,
                jobs::recent_jobs(conn, 10)?,
            ))
        })?;

    let vm = AdminVm {
        seo: Seo::from_settings(&site, "Admin"),
        lead_total,
        leads_this_month,
        recent_leads,
        recent_jobs,
    };
    html_response(admin_dashboard(&vm))
}

fn admin_settings_handler(db: &Database) -> ResultResp {
    let (site, stored) = db.with_conn(|conn| {
        Ok((settings::load_settings(conn)?, settings::all_settings(conn)?))
    })?;

    let stored: HashMap<String, String> = stored.into_iter().collect();
    let values: Vec<(String, String)> = SETTING_KEYS
        .iter()
        .map(|k| (k.to_string(), stored.get(*k).cloned().unwrap_or_default()))
        .collect();

    let seo = Seo::from_settings(&site, "Site settings");
    html_response(admin_settings_page(&seo, &values))
}

fn admin_settings_save_handler(req: Request, db: &Database) -> ResultResp {
    let form = parse_form(read_body(req)?.as_str());

    db.with_conn(|conn| {
        for key in SETTING_KEYS {
            if let Some(value) = form.get(key) {
                settings::upsert_setting(conn, key, value.trim())?;
            }
        }
        Ok(())
    })?;

    redirect_response("/admin/settings")
}

fn admin_locations_handler(req: &Request, db: &Database) -> ResultResp {
    let params = parse_query(req);

    let (site, all, editing) = db.with_conn(|conn| {
        let editing = match params.get("edit") {
            Some(slug) => featured::get_featured(conn, slug)?,
            None => None,
        };
        Ok((
            settings::load_settings(conn)?,
            featured::list_featured(conn)?,
            editing,
        ))
    })?;

    let seo = Seo::from_settings(&site, "Featured locations");
    html_response(admin_locations_page(&seo, &all, editing.as_ref()))
}

fn admin_locations_save_handler(req: Request, db: &Database) -> ResultResp {
    let form = parse_form(read_body(req)?.as_str());

    let slug = form
        .get("slug")
        .map(|s| slugify(s))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::BadRequest("slug is required".into()))?;
    let name = form
        .get("name")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::BadRequest("name is required".into()))?;
    let kind = form
        .get("kind")
        .and_then(|k| LocationKind::parse(k))
        .ok_or_else(|| ServerError::BadRequest("unknown location kind".into()))?;

    let loc = featured::FeaturedLocation {
        slug,
        kind,
        name,
        headline: form.get("headline").map(|s| s.trim().to_string()).unwrap_or_default(),
        blurb: form.get("blurb").map(|s| s.trim().to_string()).unwrap_or_default(),
        position: form
            .get("position")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(0),
    };

    db.with_conn(|conn| featured::upsert_featured(conn, &loc))?;
    redirect_response("/admin/locations")
}

fn admin_locations_delete_handler(req: Request, db: &Database) -> ResultResp {
    let form = parse_form(read_body(req)?.as_str());
    let slug = form
        .get("slug")
        .ok_or_else(|| ServerError::BadRequest("slug is required".into()))?;

    db.with_conn(|conn| featured::delete_featured(conn, slug))?;
    redirect_response("/admin/locations")
}

fn admin_pages_handler(req: &Request, db: &Database) -> ResultResp {
    let params = parse_query(req);

    let (site, all, editing) = db.with_conn(|conn| {
        let editing = match params.get("edit") {
            Some(slug) => pages::get_page(conn, slug)?,
            None => None,
        };
        Ok((settings::load_settings(conn)?, pages::list_all(conn)?, editing))
    })?;

    let seo = Seo::from_settings(&site, "Content pages");
    html_response(admin_pages_page(&seo, &all, editing.as_ref()))
}

fn admin_pages_save_handler(req: Request, db: &Database) -> ResultResp {
    let form = parse_form(read_body(req)?.as_str());

    let slug = form
        .get("slug")
        .map(|s| slugify(s))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::BadRequest("slug is required".into()))?;
    let title = form
        .get("title")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::BadRequest("title is required".into()))?;
    let meta = form.get("meta_description").map(|s| s.trim()).unwrap_or_default();
    let body = form.get("body_html").map(String::as_str).unwrap_or_default();
    let published = matches!(form.get("published").map(String::as_str), Some("1"));

    db.with_conn(|conn| {
        pages::upsert_page(conn, &slug, title, meta, body, published, now_unix())
    })?;

    redirect_response("/admin/pages")
}

fn admin_pages_delete_handler(req: Request, db: &Database) -> ResultResp {
    let form = parse_form(read_body(req)?.as_str());
    let slug = form
        .get("slug")
        .ok_or_else(|| ServerError::BadRequest("slug is required".into()))?;

    db.with_conn(|conn| pages::delete_page(conn, slug))?;
    redirect_response("/admin/pages")
}

fn admin_extract_handler(req: &Request, db: &Database) -> ResultResp {
    let params = parse_query(req);
    let active_job = params.get("job").and_then(|v| v.parse::<i64>().ok());

    let (site, recent) = db.with_conn(|conn| {
        Ok((settings::load_settings(conn)?, jobs::recent_jobs(conn, 20)?))
    })?;

    let vm = ExtractionVm {
        seo: Seo::from_settings(&site, "Data extraction"),
        jobs: recent,
        active_job,
    };
    html_response(extraction_page(&vm))
}

fn admin_extract_start_handler(req: Request, db: &Database, cfg: &Config) -> ResultResp {
    let form = parse_form(read_body(req)?.as_str());

    let kind = form
        .get("kind")
        .and_then(|k| ExtractKind::parse(k))
        .ok_or_else(|| ServerError::BadRequest("unknown extraction kind".into()))?;
    let area = form
        .get("area")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::BadRequest("area is required".into()))?;

    let job_id = start_extraction(db, cfg, kind, area)?;
    redirect_response(&format!("/admin/extract?job={job_id}"))
}

fn admin_extract_status_handler(req: &Request, db: &Database) -> ResultResp {
    let params = parse_query(req);
    let job_id = params
        .get("id")
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or_else(|| ServerError::BadRequest("id is required".into()))?;

    let job = db
        .with_conn(|conn| jobs::get_job(conn, job_id))?
        .ok_or(ServerError::NotFound)?;

    json_response(json!({
        "id": job.id,
        "status": job.status,
        "listings_seen": job.listings_seen,
        "error": job.error_message,
    }))
}

fn admin_extract_export_handler(req: &Request, db: &Database) -> ResultResp {
    let params = parse_query(req);

    let job = db.with_conn(|conn| match params.get("id").and_then(|v| v.parse::<i64>().ok()) {
        Some(id) => jobs::get_job(conn, id),
        None => jobs::latest_completed_job(conn),
    })?;
    let job = job.ok_or(ServerError::NotFound)?;

    let result_json = job.result_json.as_deref().ok_or(ServerError::NotFound)?;
    let groups: Vec<AggregateGroup> = serde_json::from_str(result_json)
        .map_err(|e| ServerError::BadRequest(format!("stored result unreadable: {e}")))?;

    export_groups_xlsx(&groups, &format!("{}_{}", job.kind, job.area))
}

// ----- Helpers -----

fn fetch_listings(cfg: &Config, query: &SearchQuery) -> (Vec<RawListing>, Option<String>) {
    match ListingsClient::from_config(cfg).and_then(|client| client.search(query)) {
        Ok(raw) => (raw, None),
        Err(e) => {
            eprintln!("Listings fetch failed: {e}");
            // The pipeline proceeds over an empty slice; the page shows the
            // error inline.
            (Vec::new(), Some(e.to_string()))
        }
    }
}

/// Parse the request's query string. Repeated keys (checkbox groups) are
/// folded into one comma-separated value, which is what
/// `FilterState::from_params` expects for the type set.
fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| parse_form(q))
        .unwrap_or_default()
}

fn parse_form(body: &str) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = HashMap::new();

    for (k, v) in url::form_urlencoded::parse(body.as_bytes()) {
        match map.get_mut(k.as_ref()) {
            Some(existing) => {
                existing.push(',');
                existing.push_str(&v);
            }
            None => {
                map.insert(k.into_owned(), v.into_owned());
            }
        }
    }

    map
}

fn read_body(req: Request) -> Result<String, ServerError> {
    let mut buf = Vec::new();
    req.into_body()
        .reader()
        .read_to_end(&mut buf)
        .map_err(|_| ServerError::BadRequest("unreadable request body".into()))?;

    String::from_utf8(buf).map_err(|_| ServerError::BadRequest("body is not UTF-8".into()))
}

/// Lower-case, alphanumeric-and-dashes page slug.
fn slugify(s: &str) -> String {
    let mut out = String::new();
    let mut last_dash = true; // suppress leading dashes

    for c in s.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }

    out.trim_end_matches('-').to_string()
}

fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
