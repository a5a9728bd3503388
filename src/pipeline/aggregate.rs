// src/pipeline/aggregate.rs

use crate::pipeline::normalize::Listing;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summary of all listings sharing one derived key (a city, a ZIP, an agent
/// name). Serialized as-is into extraction job results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateGroup {
    pub key: String,
    pub count: usize,
    pub total_price: f64,
    pub avg_price: f64,
    pub sample: GroupSample,
}

/// Representative fields carried through a grouping: first-seen contact
/// details plus the set of distinct property types in the group. Used by the
/// agent directory; harmless extra context for the area groupings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSample {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub office: Option<String>,
    pub property_types: Vec<String>,
}

/// Group listings by `key_fn` in a single pass, accumulating count and total
/// price per group. The average is derived once from the final totals rather
/// than incrementally per item, so floating-point drift does not compound.
/// Listings whose key is `None` are excluded; an emitted group always has
/// `count >= 1`.
///
/// Output order is unspecified. Callers that need an ordering apply their own
/// sort afterwards (e.g. `sort_groups_by_count`); keeping the two stages
/// separate keeps the sort policy swappable.
pub fn aggregate<F>(listings: &[Listing], key_fn: F) -> Vec<AggregateGroup>
where
    F: Fn(&Listing) -> Option<String>,
{
    struct Acc {
        count: usize,
        total_price: f64,
        sample: GroupSample,
    }

    let mut groups: HashMap<String, Acc> = HashMap::new();

    for listing in listings {
        let key = match key_fn(listing) {
            Some(k) if !k.trim().is_empty() => k,
            _ => continue,
        };

        let acc = groups.entry(key).or_insert_with(|| Acc {
            count: 0,
            total_price: 0.0,
            sample: GroupSample::default(),
        });

        acc.count += 1;
        acc.total_price += listing.price;

        if let Some(agent) = &listing.agent {
            if acc.sample.phone.is_none() {
                acc.sample.phone = agent.phone.clone();
            }
            if acc.sample.email.is_none() {
                acc.sample.email = agent.email.clone();
            }
        }
        if acc.sample.office.is_none() {
            acc.sample.office = listing.office.clone();
        }
        if !acc.sample.property_types.contains(&listing.property_type) {
            acc.sample.property_types.push(listing.property_type.clone());
        }
    }

    groups
        .into_iter()
        .map(|(key, acc)| AggregateGroup {
            key,
            count: acc.count,
            total_price: acc.total_price,
            avg_price: acc.total_price / acc.count as f64,
            sample: acc.sample,
        })
        .collect()
}

/// Directory-style ordering: listing count descending, then key ascending.
pub fn sort_groups_by_count(groups: &mut [AggregateGroup]) {
    groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
}

// ----- Grouping keys used by the site -----

pub fn by_city(l: &Listing) -> Option<String> {
    non_empty(&l.address.city)
}

pub fn by_zip(l: &Listing) -> Option<String> {
    non_empty(&l.address.zip)
}

pub fn by_neighborhood(l: &Listing) -> Option<String> {
    l.neighborhood.as_deref().and_then(non_empty)
}

pub fn by_agent(l: &Listing) -> Option<String> {
    l.agent.as_ref().and_then(|a| non_empty(&a.name))
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
