// templates/pages/extraction.rs

use crate::db::jobs::{ExtractionJob, STATUS_COMPLETED};
use crate::templates::pages::admin::fmt_ts;
use crate::templates::{desktop_layout, Seo};
use maud::{html, Markup, PreEscaped};

pub struct ExtractionVm {
    pub seo: Seo,
    pub jobs: Vec<ExtractionJob>,
    /// Job just started from this page; drives the status poll script.
    pub active_job: Option<i64>,
}

pub fn extraction_page(vm: &ExtractionVm) -> Markup {
    desktop_layout(
        &vm.seo,
        html! {
            main class="container" {
                h1 { "Data extraction" }
                p { a href="/admin" { "Back to admin" } }
                p {
                    "Pulls every active listing for an area and rolls it up by ZIP or "
                    "neighborhood. Runs in the background; this page polls until the "
                    "job finishes."
                }

                form action="/admin/extract" method="post" {
                    label for="extract-area" { "Area (city)" }
                    input id="extract-area" type="text" name="area" required placeholder="Austin";

                    label for="extract-kind" { "Group by" }
                    select id="extract-kind" name="kind" {
                        option value="zip" { "ZIP code" }
                        option value="neighborhood" { "Neighborhood" }
                    }

                    button type="submit" { "Start extraction" }
                }

                @if let Some(job_id) = vm.active_job {
                    div id="job-status" class="banner" {
                        p { "Job " (job_id) " running…" }
                    }
                    script {
                        (PreEscaped(format!(r#"
                            (function poll() {{
                                fetch('/admin/extract/status?id={job_id}')
                                    .then(function (r) {{ return r.json(); }})
                                    .then(function (job) {{
                                        if (job.status === 'completed' || job.status === 'failed') {{
                                            window.location = '/admin/extract';
                                        }} else {{
                                            setTimeout(poll, 3000);
                                        }}
                                    }})
                                    .catch(function () {{ setTimeout(poll, 3000); }});
                            }})();
                        "#)))
                    }
                }

                h2 { "Previous runs" }
                table {
                    tr {
                        th { "Started" } th { "Kind" } th { "Area" } th { "Status" }
                        th { "Listings" } th { "Result" }
                    }
                    @for job in &vm.jobs {
                        tr {
                            td { (fmt_ts(job.started_at)) }
                            td { (job.kind) }
                            td { (job.area) }
                            td {
                                (job.status)
                                @if let Some(err) = &job.error_message {
                                    " — " (err)
                                }
                            }
                            td { (job.listings_seen.unwrap_or(0)) }
                            td {
                                @if job.status == STATUS_COMPLETED {
                                    a href=(format!("/admin/extract/export?id={}", job.id)) {
                                        "Download xlsx"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
