pub mod connection;
pub mod featured;
pub mod jobs;
pub mod leads;
pub mod pages;
pub mod settings;

pub use connection::{init_db, Database};
