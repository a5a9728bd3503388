// client.rs
use crate::config::Config;
use crate::pipeline::RawListing;
use crate::provider::models::{SearchQuery, SearchResponse};
use crate::provider::ProviderError;
use rand::Rng;
use reqwest::blocking::Client;
use std::time::Duration;

const USER_AGENT: &str = "homeport/0.1 (+https://homeport.example)";

/// Blocking client for the third-party listings API. The provider is a black
/// box returning up to `limit` records per request; failures here surface as
/// an inline banner on the calling page, never a crash.
pub struct ListingsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ListingsClient {
    pub fn from_config(cfg: &Config) -> Result<Self, ProviderError> {
        let api_key = cfg
            .listings_api_key
            .clone()
            .ok_or_else(|| ProviderError::Config("LISTINGS_API_KEY not set".into()))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: cfg.listings_api_url.clone(),
            api_key,
        })
    }

    /// Fetch one bounded page of raw listing records, retrying transient
    /// failures with linear backoff plus jitter.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<RawListing>, ProviderError> {
        const MAX_ATTEMPTS: u64 = 5;
        const MAX_BACKOFF_SECS: u64 = 10;
        const JITTER_MAX_SECS: u64 = 2;

        let mut last_err = None;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_search(query) {
                Ok(listings) => return Ok(listings),
                Err(e) => {
                    // Configuration problems won't fix themselves mid-loop.
                    if let ProviderError::Config(_) = e {
                        return Err(e);
                    }
                    eprintln!("⚠️ Listings fetch attempt {attempt} failed: {e}");
                    last_err = Some(e);

                    let base = std::cmp::min(2 * attempt, MAX_BACKOFF_SECS);
                    let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_SECS);
                    std::thread::sleep(Duration::from_secs(base + jitter));
                }
            }
        }

        Err(last_err.unwrap_or_else(|| ProviderError::Network("retry loop failed".into())))
    }

    fn try_search(&self, query: &SearchQuery) -> Result<Vec<RawListing>, ProviderError> {
        let resp = self
            .client
            .get(&self.base_url)
            .header("api-key", &self.api_key)
            .query(&query.to_params())
            .send()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Network(format!(
                "provider HTTP {status}: {text}"
            )));
        }

        let parsed: SearchResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::JsonParse(e.to_string()))?;

        Ok(parsed.listings)
    }
}
