// src/pipeline/normalize.rs

use base64::Engine;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// A property listing as normalized from the provider feed, ready for
/// filtering, sorting and aggregation. This acts as an anti-corruption layer
/// between the raw provider records and the rest of the site: every field is
/// coerced to a documented default, so downstream code never sees a missing
/// or malformed value.
#[derive(Debug, PartialEq, Clone)]
pub struct Listing {
    /// Provider id, or a deterministic generated id when the record has none.
    /// Never empty.
    pub id: String,
    pub price: f64,
    pub beds: i64,
    pub baths: i64,
    pub sqft: f64,
    pub year_built: i64,
    pub address: Address,
    pub neighborhood: Option<String>,
    /// Lower-cased property type label.
    pub property_type: String,
    pub has_pool: bool,
    pub is_waterfront: bool,
    pub has_open_house: bool,
    pub image: String,
    pub coordinates: Option<Coordinate>,
    pub agent: Option<AgentContact>,
    pub office: Option<String>,
    pub status: String,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, PartialEq, Clone)]
pub struct AgentContact {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

pub const YEAR_BUILT_DEFAULT: i64 = 2024;
pub const PROPERTY_TYPE_DEFAULT: &str = "residential";
pub const IMAGE_PLACEHOLDER: &str = "/static/images/placeholder-home.jpg";

// ---------------------------------------------------------------------------
// Field lookup chains.
//
// The provider feed mixes two record shapes for the same concepts: a flat
// camelCase convention and a nested snake_case convention. Each canonical
// field has an ordered chain of JSON paths; the first path that resolves to a
// non-null value wins. Supporting a third shape later means adding a path
// here, not touching the extraction code. Path segments are dot-separated;
// a numeric segment indexes into an array.
// ---------------------------------------------------------------------------

const ID: &[&str] = &["zpid", "property_id"];
const PRICE: &[&str] = &["price", "list_price"];
const BEDS: &[&str] = &["bedrooms", "description.beds"];
const BATHS: &[&str] = &["bathrooms", "description.baths"];
const SQFT: &[&str] = &["livingArea", "description.sqft"];
const YEAR_BUILT: &[&str] = &["yearBuilt", "description.year_built"];
const STREET: &[&str] = &["streetAddress", "location.address.line"];
const CITY: &[&str] = &["city", "location.address.city"];
const STATE: &[&str] = &["state", "location.address.state_code"];
const ZIP: &[&str] = &["zipcode", "location.address.postal_code"];
const NEIGHBORHOOD: &[&str] = &["neighborhood", "location.neighborhoods.0.name"];
const PROPERTY_TYPE: &[&str] = &["homeType", "description.type"];
const POOL: &[&str] = &["poolFeatures", "description.pool"];
const WATERFRONT: &[&str] = &["waterfrontFeatures", "description.waterfront"];
const OPEN_HOUSES: &[&str] = &["openHouses", "open_houses"];
const IMAGE: &[&str] = &["imgSrc", "primary_photo.href"];
const LAT: &[&str] = &["latitude", "location.address.coordinate.lat"];
const LNG: &[&str] = &["longitude", "location.address.coordinate.lon"];
const AGENT_NAME: &[&str] = &["listingAgent.name", "advertisers.0.name"];
const AGENT_PHONE: &[&str] = &["listingAgent.phone", "advertisers.0.phone"];
const AGENT_EMAIL: &[&str] = &["listingAgent.email", "advertisers.0.email"];
const OFFICE: &[&str] = &["brokerageName", "advertisers.0.office.name"];
const STATUS: &[&str] = &["homeStatus", "status"];

/// Map one raw provider record into the canonical listing shape.
/// Pure and total: malformed or missing fields fall back to their defaults,
/// this never fails on an individual record.
pub fn normalize(raw: &Value) -> Listing {
    let address = Address {
        street: text(raw, STREET).unwrap_or_default(),
        city: text(raw, CITY).unwrap_or_default(),
        state: text(raw, STATE).unwrap_or_default(),
        zip: text(raw, ZIP).unwrap_or_default(),
    };

    let price = number(raw, PRICE).unwrap_or(0.0).max(0.0);

    let id = text(raw, ID).unwrap_or_else(|| generated_id(&address, price));

    let coordinates = match (number(raw, LAT), number(raw, LNG)) {
        (Some(lat), Some(lng)) => Some(Coordinate { lat, lng }),
        _ => None,
    };

    let agent = text(raw, AGENT_NAME).map(|name| AgentContact {
        name,
        phone: text(raw, AGENT_PHONE),
        email: text(raw, AGENT_EMAIL),
    });

    Listing {
        id,
        price,
        beds: integer(raw, BEDS).unwrap_or(0).max(0),
        baths: integer(raw, BATHS).unwrap_or(0).max(0),
        sqft: number(raw, SQFT).unwrap_or(0.0).max(0.0),
        year_built: integer(raw, YEAR_BUILT).unwrap_or(YEAR_BUILT_DEFAULT),
        address,
        neighborhood: text(raw, NEIGHBORHOOD),
        property_type: text(raw, PROPERTY_TYPE)
            .map(|t| t.to_lowercase())
            .unwrap_or_else(|| PROPERTY_TYPE_DEFAULT.to_string()),
        has_pool: flag(raw, POOL),
        is_waterfront: flag(raw, WATERFRONT),
        has_open_house: first(raw, OPEN_HOUSES)
            .and_then(Value::as_array)
            .map(|a| !a.is_empty())
            .unwrap_or(false),
        image: text(raw, IMAGE).unwrap_or_else(|| IMAGE_PLACEHOLDER.to_string()),
        coordinates,
        agent,
        office: text(raw, OFFICE),
        status: text(raw, STATUS)
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| "active".to_string()),
    }
}

/// Deterministic fallback id for records the provider ships without one,
/// derived from stable fields so the same record hashes to the same id on
/// every fetch. (The alternative, a random per-render placeholder, breaks
/// list keying and test reproducibility.)
fn generated_id(address: &Address, price: f64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(address.street.as_bytes());
    hasher.update(b"|");
    hasher.update(address.city.as_bytes());
    hasher.update(b"|");
    hasher.update(address.zip.as_bytes());
    hasher.update(b"|");
    hasher.update(format!("{price}").as_bytes());
    let digest = hasher.finalize();

    let short = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&digest[..9]);
    format!("gen:{short}")
}

/// Resolve a dot-separated path against a record. Numeric segments index
/// into arrays.
fn lookup<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = raw;
    for segment in path.split('.') {
        current = match segment.parse::<usize>() {
            Ok(idx) => current.get(idx)?,
            Err(_) => current.get(segment)?,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// First path in the chain that resolves to a non-null value.
fn first<'a>(raw: &'a Value, chain: &[&str]) -> Option<&'a Value> {
    chain.iter().find_map(|path| lookup(raw, path))
}

/// String field: trimmed, empty treated as absent. Bare numbers (a ZIP code
/// shipped as 78704) are rendered to text rather than dropped.
fn text(raw: &Value, chain: &[&str]) -> Option<String> {
    match first(raw, chain)? {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric field with a safe parse: accepts JSON numbers and numeric
/// strings, yields None (caller defaults) on anything else. Never NaN.
fn number(raw: &Value, chain: &[&str]) -> Option<f64> {
    let parsed = match first(raw, chain)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn integer(raw: &Value, chain: &[&str]) -> Option<i64> {
    number(raw, chain).map(|n| n as i64)
}

/// Derive a boolean from the provider's mixed enumerations: the literal
/// "none" sentinel, empty values and zero are false, any other non-empty
/// value is true.
fn flag(raw: &Value, chain: &[&str]) -> bool {
    match first(raw, chain) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            let s = s.trim();
            !s.is_empty() && !s.eq_ignore_ascii_case("none")
        }
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(_)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_flat_camel_case_record() {
        let raw = json!({
            "zpid": "88211002",
            "price": 685000,
            "bedrooms": 4,
            "bathrooms": 3,
            "livingArea": 2450,
            "yearBuilt": 2019,
            "streetAddress": "1247 Oak Valley Dr",
            "city": "Austin",
            "state": "TX",
            "zipcode": "78704",
            "homeType": "Single Family",
            "poolFeatures": "In Ground",
            "waterfrontFeatures": "None",
            "openHouses": [{"start": "2024-06-01T13:00:00Z"}],
            "imgSrc": "https://photos.example.com/88211002-1.jpg",
            "latitude": 30.25,
            "longitude": -97.77,
            "listingAgent": {"name": "Sarah Chen", "phone": "(512) 555-0101"},
            "brokerageName": "Oak Valley Realty",
            "homeStatus": "FOR_SALE"
        });

        let l = normalize(&raw);
        assert_eq!(l.id, "88211002");
        assert_eq!(l.price, 685000.0);
        assert_eq!(l.beds, 4);
        assert_eq!(l.baths, 3);
        assert_eq!(l.sqft, 2450.0);
        assert_eq!(l.year_built, 2019);
        assert_eq!(l.address.street, "1247 Oak Valley Dr");
        assert_eq!(l.address.city, "Austin");
        assert_eq!(l.address.zip, "78704");
        assert_eq!(l.property_type, "single family");
        assert!(l.has_pool);
        assert!(!l.is_waterfront); // "None" sentinel
        assert!(l.has_open_house);
        assert_eq!(l.image, "https://photos.example.com/88211002-1.jpg");
        assert_eq!(l.coordinates, Some(Coordinate { lat: 30.25, lng: -97.77 }));
        assert_eq!(l.agent.as_ref().unwrap().name, "Sarah Chen");
        assert_eq!(l.office.as_deref(), Some("Oak Valley Realty"));
        assert_eq!(l.status, "for_sale");
    }

    #[test]
    fn normalizes_nested_snake_case_record() {
        let raw = json!({
            "property_id": "M9921-48302",
            "list_price": 495000,
            "description": {
                "beds": 2,
                "baths": 1,
                "sqft": 1100,
                "year_built": 1945,
                "type": "single_family",
                "pool": false,
                "waterfront": null
            },
            "location": {
                "address": {
                    "line": "2105 E Cesar Chavez St",
                    "city": "Austin",
                    "state_code": "TX",
                    "postal_code": "78702",
                    "coordinate": {"lat": 30.255, "lon": -97.72}
                },
                "neighborhoods": [{"name": "Holly"}]
            },
            "open_houses": [],
            "primary_photo": {"href": "https://photos.example.com/m9921.jpg"},
            "advertisers": [{
                "name": "Elena Rodriguez",
                "email": "elena@example.com",
                "office": {"name": "East Side Brokerage"}
            }],
            "status": "for_sale"
        });

        let l = normalize(&raw);
        assert_eq!(l.id, "M9921-48302");
        assert_eq!(l.price, 495000.0);
        assert_eq!(l.beds, 2);
        assert_eq!(l.baths, 1);
        assert_eq!(l.sqft, 1100.0);
        assert_eq!(l.year_built, 1945);
        assert_eq!(l.address.street, "2105 E Cesar Chavez St");
        assert_eq!(l.address.zip, "78702");
        assert_eq!(l.neighborhood.as_deref(), Some("Holly"));
        assert_eq!(l.property_type, "single_family");
        assert!(!l.has_pool);
        assert!(!l.is_waterfront);
        assert!(!l.has_open_house); // empty sub-array
        assert_eq!(l.agent.as_ref().unwrap().email.as_deref(), Some("elena@example.com"));
        assert_eq!(l.office.as_deref(), Some("East Side Brokerage"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let l = normalize(&json!({}));

        assert!(!l.id.is_empty());
        assert_eq!(l.price, 0.0);
        assert_eq!(l.beds, 0);
        assert_eq!(l.baths, 0);
        assert_eq!(l.sqft, 0.0);
        assert_eq!(l.year_built, YEAR_BUILT_DEFAULT);
        assert_eq!(l.address, Address::default());
        assert_eq!(l.neighborhood, None);
        assert_eq!(l.property_type, PROPERTY_TYPE_DEFAULT);
        assert!(!l.has_pool && !l.is_waterfront && !l.has_open_house);
        assert_eq!(l.image, IMAGE_PLACEHOLDER);
        assert_eq!(l.coordinates, None);
        assert_eq!(l.agent, None);
        assert_eq!(l.office, None);
    }

    #[test]
    fn numeric_strings_parse_safely() {
        let raw = json!({
            "price": "450000",
            "livingArea": "1850",
            "yearBuilt": "2008",
            "bedrooms": "3"
        });
        let l = normalize(&raw);
        assert_eq!(l.price, 450000.0);
        assert_eq!(l.sqft, 1850.0);
        assert_eq!(l.year_built, 2008);
        assert_eq!(l.beds, 3);
    }

    #[test]
    fn garbage_numerics_default_instead_of_nan() {
        let raw = json!({
            "price": "call for price",
            "livingArea": {"weird": true},
            "yearBuilt": "unknown"
        });
        let l = normalize(&raw);
        assert_eq!(l.price, 0.0);
        assert_eq!(l.sqft, 0.0);
        assert_eq!(l.year_built, YEAR_BUILT_DEFAULT);
    }

    #[test]
    fn negative_numbers_clamp_to_zero() {
        let l = normalize(&json!({"price": -5000, "bedrooms": -2}));
        assert_eq!(l.price, 0.0);
        assert_eq!(l.beds, 0);
    }

    #[test]
    fn pool_flag_none_sentinel_is_case_insensitive() {
        assert!(!normalize(&json!({"poolFeatures": "NONE"})).has_pool);
        assert!(!normalize(&json!({"poolFeatures": "  "})).has_pool);
        assert!(normalize(&json!({"poolFeatures": "Heated"})).has_pool);
        assert!(normalize(&json!({"description": {"pool": true}})).has_pool);
    }

    #[test]
    fn open_house_reflects_sub_array_length() {
        assert!(!normalize(&json!({"openHouses": []})).has_open_house);
        assert!(normalize(&json!({"openHouses": [{"start": "x"}]})).has_open_house);
        // Non-array shapes count as no open house.
        assert!(!normalize(&json!({"openHouses": "yes"})).has_open_house);
    }

    #[test]
    fn zip_shipped_as_number_becomes_text() {
        let l = normalize(&json!({"zipcode": 78704}));
        assert_eq!(l.address.zip, "78704");
    }

    #[test]
    fn generated_id_is_deterministic_and_distinct() {
        let raw = json!({
            "streetAddress": "900 E 51st St",
            "city": "Austin",
            "zipcode": "78751",
            "price": 620000
        });
        let a = normalize(&raw);
        let b = normalize(&raw);
        assert_eq!(a.id, b.id);
        assert!(a.id.starts_with("gen:"));

        let other = normalize(&json!({
            "streetAddress": "901 E 51st St",
            "city": "Austin",
            "zipcode": "78751",
            "price": 620000
        }));
        assert_ne!(a.id, other.id);
    }

    #[test]
    fn flat_convention_wins_when_both_shapes_present() {
        let raw = json!({
            "price": 100,
            "list_price": 200
        });
        assert_eq!(normalize(&raw).price, 100.0);
    }
}
