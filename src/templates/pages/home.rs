// templates/pages/home.rs

use crate::db::featured::FeaturedLocation;
use crate::db::settings::SiteSettings;
use crate::templates::{card, desktop_layout, lead_form, Seo};
use maud::{html, Markup};

pub struct HomeVm {
    pub seo: Seo,
    pub settings: SiteSettings,
    pub featured: Vec<FeaturedLocation>,
}

pub fn home_page(vm: &HomeVm) -> Markup {
    desktop_layout(
        &vm.seo,
        html! {
            main class="container" {
                section class="hero" {
                    h1 { (vm.settings.site_name) }
                    p class="tagline" { (vm.settings.tagline) }
                    a class="cta" href="/listings" { "Browse listings" }
                }

                @if !vm.featured.is_empty() {
                    section {
                        h2 { "Featured areas" }
                        div class="grid" {
                            @for loc in &vm.featured {
                                a href=(format!("/locations/{}", loc.slug)) class="tile" {
                                    h3 { (loc.name) }
                                    p { (loc.headline) }
                                    small { (loc.kind.as_str()) }
                                }
                            }
                        }
                    }
                }

                (card("Get in touch", html! {
                    p { "Looking to buy or sell in " (vm.settings.office_city) "? We can help." }
                    (lead_form("home", None))
                }))
            }
        },
    )
}
