pub mod client;
pub mod models;
pub mod provider_error;

pub use client::ListingsClient;
pub use models::{SearchQuery, EXTRACT_LIMIT, PAGE_LIMIT};
pub use provider_error::ProviderError;
