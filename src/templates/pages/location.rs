// templates/pages/location.rs

use crate::db::featured::FeaturedLocation;
use crate::pipeline::Listing;
use crate::templates::{desktop_layout, fmt_price, lead_form, listing_card, Seo};
use maud::{html, Markup};

pub struct LocationVm {
    pub seo: Seo,
    pub location: FeaturedLocation,
    pub listings: Vec<Listing>,
    pub count: usize,
    pub avg_price: f64,
    pub fetch_error: Option<String>,
}

pub fn location_page(vm: &LocationVm) -> Markup {
    desktop_layout(
        &vm.seo,
        html! {
            main class="container" {
                section class="hero" {
                    h1 { (vm.location.headline) }
                    p { (vm.location.blurb) }
                }

                @if let Some(err) = &vm.fetch_error {
                    div class="banner banner-error" {
                        p { "Market data is temporarily unavailable: " (err) }
                    }
                } @else {
                    section class="stats" {
                        div class="stat" {
                            strong { (vm.count) }
                            span { " active listings" }
                        }
                        @if vm.count > 0 {
                            div class="stat" {
                                strong { (fmt_price(vm.avg_price)) }
                                span { " average price" }
                            }
                        }
                    }
                }

                section {
                    h2 { "Homes in " (vm.location.name) }
                    @if vm.listings.is_empty() && vm.fetch_error.is_none() {
                        p class="empty" { "No active listings right now. Check back soon." }
                    }
                    div class="grid" {
                        @for listing in &vm.listings {
                            (listing_card(listing))
                        }
                    }
                }

                section class="card" {
                    h2 { "Ask about " (vm.location.name) }
                    (lead_form(&format!("location:{}", vm.location.slug), None))
                }
            }
        },
    )
}
