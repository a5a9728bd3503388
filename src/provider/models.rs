use crate::pipeline::RawListing;
use serde::Deserialize;

/// Default page size for the public listings search.
pub const PAGE_LIMIT: usize = 24;
/// Bounded "everything in the area" pull used by the extraction tool.
pub const EXTRACT_LIMIT: usize = 10_000;

/// Query sent to the listings provider. Every field maps straight onto a
/// query parameter; unset fields are simply omitted. One bounded page per
/// request; no pagination cursor.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub city: Option<String>,
    pub state: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub beds: Option<i64>,
    pub baths: Option<i64>,
    pub property_type: Option<String>,
    pub zip: Option<String>,
    pub neighborhood: Option<String>,
    pub status: Option<String>,
    pub limit: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            city: None,
            state: None,
            min_price: None,
            max_price: None,
            beds: None,
            baths: None,
            property_type: None,
            zip: None,
            neighborhood: None,
            status: None,
            limit: PAGE_LIMIT,
        }
    }
}

impl SearchQuery {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(city) = &self.city {
            params.push(("city", city.clone()));
        }
        if let Some(state) = &self.state {
            params.push(("state", state.clone()));
        }
        if let Some(min) = self.min_price {
            params.push(("minPrice", format!("{}", min as i64)));
        }
        if let Some(max) = self.max_price {
            params.push(("maxPrice", format!("{}", max as i64)));
        }
        if let Some(beds) = self.beds {
            params.push(("bedrooms", beds.to_string()));
        }
        if let Some(baths) = self.baths {
            params.push(("bathrooms", baths.to_string()));
        }
        if let Some(t) = &self.property_type {
            params.push(("propertyType", t.clone()));
        }
        if let Some(zip) = &self.zip {
            params.push(("zip", zip.clone()));
        }
        if let Some(n) = &self.neighborhood {
            params.push(("neighborhood", n.clone()));
        }
        if let Some(s) = &self.status {
            params.push(("status", s.clone()));
        }
        params.push(("limit", self.limit.to_string()));

        params
    }
}

/// Provider response envelope. Records stay as raw JSON; the pipeline's
/// normalizer owns interpretation of the two field-naming conventions.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub listings: Vec<RawListing>,
}
