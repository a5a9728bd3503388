// src/pipeline/mod.rs
//
// The listing pipeline: raw provider records -> normalize -> filter -> sort,
// with an aggregation entry point for the directory-style pages. Stateless
// and synchronous; every input change recomputes the chain end-to-end. Data
// volumes here are tens to low thousands of records per page, so there is no
// caching or incremental update layer.

pub mod aggregate;
pub mod filter;
pub mod normalize;
pub mod sort;

pub use aggregate::{aggregate, sort_groups_by_count, AggregateGroup, GroupSample};
pub use filter::{filter, FilterState, CITY_ALL};
pub use normalize::{normalize, AgentContact, Listing};
pub use sort::{sort, SortKey};

use serde_json::Value;

/// Raw provider records stay untyped; the normalizer owns interpretation.
pub type RawListing = Value;

/// Recompute the derived listing view for a search page: normalize every raw
/// record, apply the active filters, order by the sort key. Malformed
/// records never fail the pipeline; they normalize to defaults.
pub fn recompute(raw: &[RawListing], state: &FilterState, key: SortKey) -> Vec<Listing> {
    let canonical: Vec<Listing> = raw.iter().map(normalize).collect();
    sort(filter(&canonical, state), key)
}

/// Recompute a grouped summary for directory pages and the extraction tool.
pub fn recompute_aggregate<F>(raw: &[RawListing], key_fn: F) -> Vec<AggregateGroup>
where
    F: Fn(&Listing) -> Option<String>,
{
    let canonical: Vec<Listing> = raw.iter().map(normalize).collect();
    aggregate(&canonical, key_fn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn min_beds_filter_with_price_low_sort() {
        let raw = vec![
            json!({"price": 300000, "bedrooms": 3}),
            json!({"price": 450000, "bedrooms": 4}),
            json!({"price": 200000, "bedrooms": 2}),
        ];
        let state = FilterState {
            min_beds: 3,
            ..Default::default()
        };

        let out = recompute(&raw, &state, SortKey::PriceLow);
        let prices: Vec<f64> = out.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![300_000.0, 450_000.0]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let out = recompute(&[], &FilterState::default(), SortKey::Newest);
        assert!(out.is_empty());
    }

    #[test]
    fn malformed_records_pass_through_as_defaults() {
        let raw = vec![json!({"price": "not a number"}), json!(null), json!({})];
        let out = recompute(&raw, &FilterState::default(), SortKey::Newest);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|l| l.price == 0.0));
    }

    #[test]
    fn aggregate_entry_point_groups_mixed_conventions() {
        let raw = vec![
            json!({"city": "Austin", "price": 400000}),
            json!({"location": {"address": {"city": "Austin"}}, "list_price": 600000}),
            json!({"city": "Dallas", "price": 300000}),
        ];

        let mut groups = recompute_aggregate(&raw, aggregate::by_city);
        groups.sort_by(|a, b| a.key.cmp(&b.key));

        assert_eq!(groups[0].key, "Austin");
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].avg_price, 500_000.0);
        assert_eq!(groups[1].key, "Dallas");
        assert_eq!(groups[1].count, 1);
    }
}
