use crate::config::Config;
use crate::db::connection::{init_db, Database};
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns a fresh test database using the production schema
pub fn make_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "homeport_test_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db, "sql/schema.sql").expect("Failed to initialize DB");
    db
}

pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";

/// Config with both external integrations disabled, so no test ever touches
/// the network: the provider client fails fast with a config error and CRM
/// sync is skipped entirely.
pub fn test_config() -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        database_path: ":memory:".to_string(),
        listings_api_url: "http://127.0.0.1:9/unreachable".to_string(),
        listings_api_key: None,
        crm_api_url: "http://127.0.0.1:9/unreachable".to_string(),
        crm_api_key: None,
        admin_token: Some(TEST_ADMIN_TOKEN.to_string()),
    }
}

pub fn get(path: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(path: &str, body: &str) -> Request {
    let mut req = http::Request::builder()
        .method(Method::POST)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    *req.body_mut() = Body::from(body.to_string());
    req.headers_mut().insert(
        "Content-Type",
        "application/x-www-form-urlencoded".parse().unwrap(),
    );
    req
}

pub fn body_string(resp: &mut Response) -> String {
    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    String::from_utf8(bytes).unwrap()
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}
