// src/pipeline/sort.rs

use crate::pipeline::normalize::Listing;

/// User-selectable result ordering. `Newest` is the default and sorts by
/// year built, the closest thing to listing recency in the provider feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
    Beds,
    Sqft,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Newest,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Beds,
        SortKey::Sqft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Beds => "beds",
            SortKey::Sqft => "sqft",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Newest => "Newest",
            SortKey::PriceLow => "Price (low to high)",
            SortKey::PriceHigh => "Price (high to low)",
            SortKey::Beds => "Most bedrooms",
            SortKey::Sqft => "Largest",
        }
    }

    /// Parse the query-parameter value; anything unrecognized falls back to
    /// the default ordering rather than failing the request.
    pub fn parse(value: &str) -> SortKey {
        match value {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "beds" => SortKey::Beds,
            "sqft" => SortKey::Sqft,
            _ => SortKey::Newest,
        }
    }
}

/// Order the filtered set by the selected key. The sort is stable: listings
/// equal on the active key keep their post-filter relative order.
pub fn sort(mut listings: Vec<Listing>, key: SortKey) -> Vec<Listing> {
    match key {
        SortKey::Newest => listings.sort_by(|a, b| b.year_built.cmp(&a.year_built)),
        SortKey::PriceLow => listings.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => listings.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Beds => listings.sort_by(|a, b| b.beds.cmp(&a.beds)),
        SortKey::Sqft => listings.sort_by(|a, b| b.sqft.total_cmp(&a.sqft)),
    }
    listings
}
