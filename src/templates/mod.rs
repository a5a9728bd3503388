pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{card, fmt_price, lead_form, listing_card};
pub use layouts::desktop::desktop_layout;

use crate::db::settings::SiteSettings;

/// Head metadata for one rendered page. Page-specific values override the
/// site-wide defaults from settings; the analytics pixel is injected only
/// when configured.
#[derive(Debug, Clone)]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub analytics_id: Option<String>,
}

impl Seo {
    pub fn from_settings(settings: &SiteSettings, page_title: &str) -> Self {
        Self {
            title: format!("{} | {}", page_title, settings.site_name),
            description: settings.meta_description.clone(),
            analytics_id: settings.analytics_id.clone(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        if !description.trim().is_empty() {
            self.description = description.to_string();
        }
        self
    }
}
