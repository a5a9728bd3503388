// templates/pages/admin.rs

use crate::db::featured::FeaturedLocation;
use crate::db::jobs::ExtractionJob;
use crate::db::leads::Lead;
use crate::db::pages::ContentPage;
use crate::templates::{card, desktop_layout, Seo};
use chrono::{DateTime, Utc};
use maud::{html, Markup};

const LOCATION_KINDS: [&str; 4] = ["city", "county", "zip", "neighborhood"];

pub struct AdminVm {
    pub seo: Seo,
    pub lead_total: i64,
    pub leads_this_month: i64,
    pub recent_leads: Vec<Lead>,
    pub recent_jobs: Vec<ExtractionJob>,
}

pub fn fmt_ts(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

pub fn admin_dashboard(vm: &AdminVm) -> Markup {
    desktop_layout(
        &vm.seo,
        html! {
            main class="container" {
                h1 { "Admin" }

                nav class="admin-nav" {
                    ul {
                        li { a href="/admin/settings" { "Site settings" } }
                        li { a href="/admin/locations" { "Featured locations" } }
                        li { a href="/admin/pages" { "Content pages" } }
                        li { a href="/admin/extract" { "Data extraction" } }
                    }
                }

                section class="stats" {
                    div class="stat" {
                        strong { (vm.lead_total) }
                        span { " leads total" }
                    }
                    div class="stat" {
                        strong { (vm.leads_this_month) }
                        span { " this month" }
                    }
                }

                (card("Recent leads", html! {
                    @if vm.recent_leads.is_empty() {
                        p { "No leads yet." }
                    } @else {
                        table {
                            tr { th { "When" } th { "Name" } th { "Email" } th { "Source" } th { "CRM" } }
                            @for lead in &vm.recent_leads {
                                tr {
                                    td { (fmt_ts(lead.created_at)) }
                                    td { (lead.name) }
                                    td { (lead.email) }
                                    td { (lead.source_page.as_deref().unwrap_or("-")) }
                                    td { @if lead.crm_synced { "synced" } @else { "pending" } }
                                }
                            }
                        }
                    }
                }))

                (card("Recent extraction jobs", html! {
                    @if vm.recent_jobs.is_empty() {
                        p { "No jobs run yet." }
                    } @else {
                        table {
                            tr { th { "Started" } th { "Kind" } th { "Area" } th { "Status" } th { "Listings" } }
                            @for job in &vm.recent_jobs {
                                tr {
                                    td { (fmt_ts(job.started_at)) }
                                    td { (job.kind) }
                                    td { (job.area) }
                                    td { (job.status) }
                                    td { (job.listings_seen.unwrap_or(0)) }
                                }
                            }
                        }
                    }
                }))
            }
        },
    )
}

pub fn admin_settings_page(seo: &Seo, values: &[(String, String)]) -> Markup {
    desktop_layout(
        seo,
        html! {
            main class="container" {
                h1 { "Site settings" }
                p { a href="/admin" { "Back to admin" } }

                form action="/admin/settings" method="post" {
                    @for (key, value) in values {
                        label for=(key) { (key) }
                        input id=(key) type="text" name=(key) value=(value);
                    }
                    button type="submit" { "Save" }
                }
            }
        },
    )
}

pub fn admin_locations_page(
    seo: &Seo,
    locations: &[FeaturedLocation],
    editing: Option<&FeaturedLocation>,
) -> Markup {
    desktop_layout(
        seo,
        html! {
            main class="container" {
                h1 { "Featured locations" }
                p { a href="/admin" { "Back to admin" } }

                table {
                    tr { th { "Slug" } th { "Kind" } th { "Name" } th { "Position" } th {} th {} }
                    @for loc in locations {
                        tr {
                            td { a href=(format!("/locations/{}", loc.slug)) { (loc.slug) } }
                            td { (loc.kind.as_str()) }
                            td { (loc.name) }
                            td { (loc.position) }
                            td { a href=(format!("/admin/locations?edit={}", loc.slug)) { "Edit" } }
                            td {
                                form action="/admin/locations/delete" method="post" {
                                    input type="hidden" name="slug" value=(loc.slug);
                                    button type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }

                h2 { @if editing.is_some() { "Edit location" } @else { "New location" } }
                form action="/admin/locations" method="post" {
                    label for="loc-slug" { "Slug" }
                    input id="loc-slug" type="text" name="slug" required
                        value=(editing.map(|l| l.slug.as_str()).unwrap_or(""));

                    label for="loc-kind" { "Kind" }
                    select id="loc-kind" name="kind" {
                        @for kind in LOCATION_KINDS {
                            option value=(kind)
                                selected[editing.map(|l| l.kind.as_str() == kind).unwrap_or(false)] {
                                (kind)
                            }
                        }
                    }

                    label for="loc-name" { "Name" }
                    input id="loc-name" type="text" name="name" required
                        value=(editing.map(|l| l.name.as_str()).unwrap_or(""));

                    label for="loc-headline" { "Headline" }
                    input id="loc-headline" type="text" name="headline"
                        value=(editing.map(|l| l.headline.as_str()).unwrap_or(""));

                    label for="loc-blurb" { "Blurb" }
                    textarea id="loc-blurb" name="blurb" rows="4" {
                        (editing.map(|l| l.blurb.as_str()).unwrap_or(""))
                    }

                    label for="loc-position" { "Position" }
                    input id="loc-position" type="number" name="position" min="0"
                        value=(editing.map(|l| l.position).unwrap_or(0));

                    button type="submit" { "Save location" }
                }
            }
        },
    )
}

pub fn admin_pages_page(seo: &Seo, pages: &[ContentPage], editing: Option<&ContentPage>) -> Markup {
    desktop_layout(
        seo,
        html! {
            main class="container" {
                h1 { "Content pages" }
                p { a href="/admin" { "Back to admin" } }

                table {
                    tr { th { "Slug" } th { "Title" } th { "Published" } th { "Updated" } th {} th {} }
                    @for page in pages {
                        tr {
                            td { (page.slug) }
                            td { (page.title) }
                            td { @if page.published { "yes" } @else { "draft" } }
                            td { (fmt_ts(page.updated_at)) }
                            td { a href=(format!("/admin/pages?edit={}", page.slug)) { "Edit" } }
                            td {
                                form action="/admin/pages/delete" method="post" {
                                    input type="hidden" name="slug" value=(page.slug);
                                    button type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }

                h2 { @if editing.is_some() { "Edit page" } @else { "New page" } }
                form action="/admin/pages" method="post" {
                    label for="page-slug" { "Slug" }
                    input id="page-slug" type="text" name="slug" required
                        value=(editing.map(|p| p.slug.as_str()).unwrap_or(""));

                    label for="page-title" { "Title" }
                    input id="page-title" type="text" name="title" required
                        value=(editing.map(|p| p.title.as_str()).unwrap_or(""));

                    label for="page-meta" { "Meta description" }
                    input id="page-meta" type="text" name="meta_description"
                        value=(editing.map(|p| p.meta_description.as_str()).unwrap_or(""));

                    label for="page-body" { "Body (HTML)" }
                    textarea id="page-body" name="body_html" rows="12" {
                        (editing.map(|p| p.body_html.as_str()).unwrap_or(""))
                    }

                    label class="checkbox" {
                        input type="checkbox" name="published" value="1"
                            checked[editing.map(|p| p.published).unwrap_or(false)];
                        "Published"
                    }

                    button type="submit" { "Save page" }
                }
            }
        },
    )
}
