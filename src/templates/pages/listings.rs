// templates/pages/listings.rs

use crate::pipeline::{AggregateGroup, FilterState, Listing, SortKey, CITY_ALL};
use crate::templates::{desktop_layout, listing_card, Seo};
use maud::{html, Markup};

pub struct ListingsVm {
    pub seo: Seo,
    pub state: FilterState,
    pub sort: SortKey,
    pub listings: Vec<Listing>,
    /// City groups over the unfiltered fetch, for the dropdown options.
    pub cities: Vec<AggregateGroup>,
    pub fetch_error: Option<String>,
}

const PROPERTY_TYPE_OPTIONS: [&str; 4] = ["single family", "condo", "townhome", "multi-family"];

pub fn listings_page(vm: &ListingsVm) -> Markup {
    desktop_layout(
        &vm.seo,
        html! {
            main class="container" {
                h1 { "Search listings" }

                (filter_form(vm))

                @if let Some(err) = &vm.fetch_error {
                    div class="banner banner-error" {
                        p { "Listings are temporarily unavailable: " (err) }
                    }
                }

                p class="result-count" { (vm.listings.len()) " homes" }

                @if vm.listings.is_empty() && vm.fetch_error.is_none() {
                    p class="empty" { "No listings match the current filters." }
                }

                div class="grid" {
                    @for listing in &vm.listings {
                        (listing_card(listing))
                    }
                }
            }
        },
    )
}

fn filter_form(vm: &ListingsVm) -> Markup {
    let s = &vm.state;
    html! {
        form action="/listings" method="get" class="filters" {
            div class="filter-row" {
                label for="location" { "Location" }
                input id="location" type="text" name="location" value=(s.location)
                    placeholder="City, street, or state";

                label for="city" { "City" }
                select id="city" name="city" {
                    option value=(CITY_ALL) { "All cities" }
                    @for group in &vm.cities {
                        option value=(group.key)
                            selected[s.city.eq_ignore_ascii_case(&group.key)] {
                            (group.key) " (" (group.count) ")"
                        }
                    }
                }

                label for="sort" { "Sort" }
                select id="sort" name="sort" {
                    @for key in SortKey::ALL {
                        option value=(key.as_str()) selected[vm.sort == key] { (key.label()) }
                    }
                }
            }

            div class="filter-row" {
                label for="min_price" { "Price" }
                input id="min_price" type="number" name="min_price" min="0"
                    value=[active_num(s.min_price)] placeholder="Min";
                input type="number" name="max_price" min="0"
                    value=[active_num(s.max_price)] placeholder="Max";

                label for="beds" { "Beds" }
                input id="beds" type="number" name="beds" min="0"
                    value=[active_int(s.min_beds)] placeholder="Any";

                label for="baths" { "Baths" }
                input id="baths" type="number" name="baths" min="0"
                    value=[active_int(s.min_baths)] placeholder="Any";
            }

            div class="filter-row" {
                label for="min_sqft" { "Sqft" }
                input id="min_sqft" type="number" name="min_sqft" min="0"
                    value=[active_num(s.min_sqft)] placeholder="Min";
                input type="number" name="max_sqft" min="0"
                    value=[active_num(s.max_sqft)] placeholder="Max";

                label for="min_year" { "Year built" }
                input id="min_year" type="number" name="min_year" min="0"
                    value=[active_int(s.min_year)] placeholder="From";
                input type="number" name="max_year" min="0"
                    value=[active_int(s.max_year)] placeholder="To";
            }

            div class="filter-row" {
                @for t in PROPERTY_TYPE_OPTIONS {
                    label class="checkbox" {
                        input type="checkbox" name="types" value=(t)
                            checked[s.property_types.iter().any(|p| p == t)];
                        (t)
                    }
                }

                label class="checkbox" {
                    input type="checkbox" name="pool" value="1" checked[s.pool];
                    "Pool"
                }
                label class="checkbox" {
                    input type="checkbox" name="waterfront" value="1" checked[s.waterfront];
                    "Waterfront"
                }
                label class="checkbox" {
                    input type="checkbox" name="open_house" value="1" checked[s.open_house];
                    "Open house"
                }

                button type="submit" { "Apply" }
                @if !vm.state.is_empty() {
                    a href="/listings" { "Reset" }
                }
            }
        }
    }
}

// Leave inactive numeric inputs blank instead of rendering a literal 0.
fn active_num(n: f64) -> Option<String> {
    if n > 0.0 {
        Some(format!("{}", n as i64))
    } else {
        None
    }
}

fn active_int(n: i64) -> Option<String> {
    if n > 0 {
        Some(n.to_string())
    } else {
        None
    }
}
