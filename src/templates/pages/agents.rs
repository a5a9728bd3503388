// templates/pages/agents.rs

use crate::pipeline::AggregateGroup;
use crate::templates::{desktop_layout, fmt_price, Seo};
use maud::{html, Markup};

pub struct AgentsVm {
    pub seo: Seo,
    /// One group per agent, ordered by listing count descending.
    pub agents: Vec<AggregateGroup>,
    pub fetch_error: Option<String>,
}

pub fn agents_page(vm: &AgentsVm) -> Markup {
    desktop_layout(
        &vm.seo,
        html! {
            main class="container" {
                h1 { "Our agents" }

                @if let Some(err) = &vm.fetch_error {
                    div class="banner banner-error" {
                        p { "The agent directory is temporarily unavailable: " (err) }
                    }
                }

                div class="grid" {
                    @for agent in &vm.agents {
                        div class="card agent-card" {
                            div class="card-body" {
                                h3 { (agent.key) }
                                @if let Some(office) = &agent.sample.office {
                                    p class="office" { (office) }
                                }
                                p class="specs" {
                                    span { (agent.count) " active listings" }
                                    span { "avg " (fmt_price(agent.avg_price)) }
                                }
                                div class="tags" {
                                    @for t in &agent.sample.property_types {
                                        span class="tag" { (t) }
                                    }
                                }
                                @if let Some(phone) = &agent.sample.phone {
                                    p { a href=(format!("tel:{phone}")) { (phone) } }
                                }
                                @if let Some(email) = &agent.sample.email {
                                    p { a href=(format!("mailto:{email}")) { (email) } }
                                }
                            }
                        }
                    }
                }

                @if vm.agents.is_empty() && vm.fetch_error.is_none() {
                    p class="empty" { "No agents with active listings right now." }
                }
            }
        },
    )
}
