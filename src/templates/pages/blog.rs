// templates/pages/blog.rs

use crate::db::pages::ContentPage;
use crate::templates::{desktop_layout, Seo};
use maud::{html, Markup, PreEscaped};

pub fn blog_index_page(seo: &Seo, posts: &[ContentPage]) -> Markup {
    desktop_layout(
        seo,
        html! {
            main class="container" {
                h1 { "Blog" }
                @if posts.is_empty() {
                    p class="empty" { "Nothing published yet." }
                }
                ul class="post-list" {
                    @for post in posts {
                        li {
                            a href=(format!("/blog/{}", post.slug)) { (post.title) }
                            @if !post.meta_description.is_empty() {
                                p { (post.meta_description) }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn blog_post_page(seo: &Seo, post: &ContentPage) -> Markup {
    desktop_layout(
        seo,
        html! {
            main class="container article" {
                h1 { (post.title) }
                // Body is authored in the admin and stored as HTML.
                (PreEscaped(post.body_html.clone()))
            }
        },
    )
}
