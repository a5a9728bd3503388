use crate::pipeline::Listing;
use crate::templates::components::fmt_price;
use maud::{html, Markup};

pub fn listing_card(l: &Listing) -> Markup {
    html! {
        // Stable element ids keep anchors and client-side keying consistent
        // across refreshes.
        div class="card listing-card" id=(format!("listing-{}", l.id)) {
            img src=(l.image) alt=(l.address.street) loading="lazy";
            div class="card-body" {
                p class="price" {
                    (fmt_price(l.price))
                    span class=(format!("status status-{}", l.status)) { (l.status) }
                }
                p class="address" {
                    (l.address.street) ", " (l.address.city) ", " (l.address.state) " " (l.address.zip)
                }
                @if let Some(neighborhood) = &l.neighborhood {
                    p class="neighborhood" { (neighborhood) }
                }
                p class="specs" {
                    span { (l.beds) " bd" }
                    span { (l.baths) " ba" }
                    span { (l.sqft as i64) " sqft" }
                    span { "built " (l.year_built) }
                }
                div class="tags" {
                    span class="tag" { (l.property_type) }
                    @if l.has_pool { span class="tag" { "Pool" } }
                    @if l.is_waterfront { span class="tag" { "Waterfront" } }
                    @if l.has_open_house { span class="tag tag-open" { "Open house" } }
                }
                @if let Some(agent) = &l.agent {
                    p class="agent" {
                        (agent.name)
                        @if let Some(office) = &l.office { " · " (office) }
                    }
                }
                @if let Some(c) = &l.coordinates {
                    a class="map-link" target="_blank"
                        href=(format!("https://www.google.com/maps?q={},{}", c.lat, c.lng)) {
                        "View on map"
                    }
                }
            }
        }
    }
}
