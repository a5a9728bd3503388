use crate::templates::{desktop_layout, Seo};
use maud::{html, Markup};

pub fn thanks_page(seo: &Seo) -> Markup {
    desktop_layout(
        seo,
        html! {
            main class="container" {
                h1 { "Thanks for reaching out" }
                p { "We received your message and an agent will be in touch shortly." }
                p { a href="/listings" { "Keep browsing listings" } }
            }
        },
    )
}
