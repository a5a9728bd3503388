use crate::config::Config;
use crate::db::connection::{init_db, Database};
use crate::responses::error_to_response;
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;

mod auth;
mod config;
mod crm;
mod db;
mod errors;
mod jobs;
mod pipeline;
mod provider;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    // 1️⃣ Read configuration from the environment
    let cfg = Config::from_env();

    // 2️⃣ Create the database handle and apply the schema
    let db = Database::new(cfg.database_path.clone());
    if let Err(e) = init_db(&db, "sql/schema.sql") {
        eprintln!("❌ Database initialization failed: {e}");
        std::process::exit(1);
    }

    if cfg.listings_api_key.is_none() {
        eprintln!("⚠️ LISTINGS_API_KEY not set; listing pages will show an inline error");
    }

    // 3️⃣ Start the server
    let addr: SocketAddr = match cfg.bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("❌ Invalid BIND_ADDR '{}': {e}", cfg.bind_addr);
            std::process::exit(1);
        }
    };
    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    // 4️⃣ Serve requests, passing db and config into the closure
    let result = server.serve(move |req, _info| match handle(req, &db, &cfg) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
