// src/pipeline/filter.rs

use crate::pipeline::normalize::Listing;
use std::collections::HashMap;

/// Sentinel for the city dropdown meaning "all cities".
pub const CITY_ALL: &str = "all";

/// One value object holding every filter dimension for the listings search.
/// Every field defaults to "no constraint": empty strings, empty sets, and
/// zero for numeric bounds (zero doubles as the unbounded sentinel for the
/// max fields). Built from page query parameters and round-tripped back into
/// the search form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Free-text location search (substring, case-insensitive).
    pub location: String,
    /// Exact city from the dropdown; empty or "all" disables.
    pub city: String,
    pub min_price: f64,
    pub max_price: f64,
    pub min_beds: i64,
    pub min_baths: i64,
    /// Lower-cased property type labels; empty set disables.
    pub property_types: Vec<String>,
    pub min_sqft: f64,
    pub max_sqft: f64,
    pub min_year: i64,
    pub max_year: i64,
    pub pool: bool,
    pub waterfront: bool,
    pub open_house: bool,
}

impl FilterState {
    /// Build a filter state from parsed query parameters. Numeric fields use
    /// a safe parse: anything that does not parse is treated as "no
    /// constraint" rather than rejecting the whole request.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let text = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        let num = |key: &str| {
            params
                .get(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|n| n.is_finite() && *n > 0.0)
                .unwrap_or(0.0)
        };
        let int = |key: &str| {
            params
                .get(key)
                .and_then(|v| v.trim().parse::<i64>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(0)
        };
        let flag = |key: &str| {
            matches!(
                params.get(key).map(String::as_str),
                Some("1") | Some("on") | Some("true")
            )
        };

        FilterState {
            location: text("location"),
            city: text("city"),
            min_price: num("min_price"),
            max_price: num("max_price"),
            min_beds: int("beds"),
            min_baths: int("baths"),
            property_types: text("types")
                .split(',')
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            min_sqft: num("min_sqft"),
            max_sqft: num("max_sqft"),
            min_year: int("min_year"),
            max_year: int("max_year"),
            pool: flag("pool"),
            waterfront: flag("waterfront"),
            open_house: flag("open_house"),
        }
    }

    /// Active fields as query pairs, suitable for rebuilding the page URL.
    /// `from_params(to_query(..))` is lossless for every active dimension.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if !self.location.is_empty() {
            pairs.push(("location", self.location.clone()));
        }
        if !self.city.is_empty() && !self.city.eq_ignore_ascii_case(CITY_ALL) {
            pairs.push(("city", self.city.clone()));
        }
        if self.min_price > 0.0 {
            pairs.push(("min_price", trim_float(self.min_price)));
        }
        if self.max_price > 0.0 {
            pairs.push(("max_price", trim_float(self.max_price)));
        }
        if self.min_beds > 0 {
            pairs.push(("beds", self.min_beds.to_string()));
        }
        if self.min_baths > 0 {
            pairs.push(("baths", self.min_baths.to_string()));
        }
        if !self.property_types.is_empty() {
            pairs.push(("types", self.property_types.join(",")));
        }
        if self.min_sqft > 0.0 {
            pairs.push(("min_sqft", trim_float(self.min_sqft)));
        }
        if self.max_sqft > 0.0 {
            pairs.push(("max_sqft", trim_float(self.max_sqft)));
        }
        if self.min_year > 0 {
            pairs.push(("min_year", self.min_year.to_string()));
        }
        if self.max_year > 0 {
            pairs.push(("max_year", self.max_year.to_string()));
        }
        if self.pool {
            pairs.push(("pool", "1".to_string()));
        }
        if self.waterfront {
            pairs.push(("waterfront", "1".to_string()));
        }
        if self.open_house {
            pairs.push(("open_house", "1".to_string()));
        }

        pairs
    }

    /// True when no dimension is active (the identity filter).
    pub fn is_empty(&self) -> bool {
        *self == FilterState::default()
    }
}

fn trim_float(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Apply every active predicate conjunctively. A listing survives only if it
/// satisfies all of them. Contradictory bounds (min > max) are passed through
/// literally and simply match nothing; that is intended behavior, not
/// something to auto-correct.
pub fn filter(listings: &[Listing], state: &FilterState) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| matches(l, state))
        .cloned()
        .collect()
}

fn matches(l: &Listing, s: &FilterState) -> bool {
    // Cheap numeric and flag tests run before the string scans.
    matches_price(l, s)
        && matches_beds_baths(l, s)
        && matches_sqft(l, s)
        && matches_year(l, s)
        && matches_features(l, s)
        && matches_types(l, s)
        && matches_city(l, s)
        && matches_location(l, s)
}

fn matches_price(l: &Listing, s: &FilterState) -> bool {
    if s.min_price > 0.0 && l.price < s.min_price {
        return false;
    }
    if s.max_price > 0.0 && l.price > s.max_price {
        return false;
    }
    true
}

fn matches_beds_baths(l: &Listing, s: &FilterState) -> bool {
    l.beds >= s.min_beds && l.baths >= s.min_baths
}

fn matches_sqft(l: &Listing, s: &FilterState) -> bool {
    if s.min_sqft > 0.0 && l.sqft < s.min_sqft {
        return false;
    }
    if s.max_sqft > 0.0 && l.sqft > s.max_sqft {
        return false;
    }
    true
}

fn matches_year(l: &Listing, s: &FilterState) -> bool {
    if s.min_year > 0 && l.year_built < s.min_year {
        return false;
    }
    if s.max_year > 0 && l.year_built > s.max_year {
        return false;
    }
    true
}

fn matches_features(l: &Listing, s: &FilterState) -> bool {
    if s.pool && !l.has_pool {
        return false;
    }
    if s.waterfront && !l.is_waterfront {
        return false;
    }
    if s.open_house && !l.has_open_house {
        return false;
    }
    true
}

fn matches_types(l: &Listing, s: &FilterState) -> bool {
    s.property_types.is_empty() || s.property_types.iter().any(|t| *t == l.property_type)
}

fn matches_city(l: &Listing, s: &FilterState) -> bool {
    if s.city.is_empty() || s.city.eq_ignore_ascii_case(CITY_ALL) {
        return true;
    }
    l.address.city.eq_ignore_ascii_case(&s.city)
}

fn matches_location(l: &Listing, s: &FilterState) -> bool {
    if s.location.is_empty() {
        return true;
    }
    let needle = s.location.to_lowercase();
    l.address.city.to_lowercase().contains(&needle)
        || l.address.street.to_lowercase().contains(&needle)
        || l.address.state.to_lowercase().contains(&needle)
}
