pub mod admin;
pub mod agents;
pub mod blog;
pub mod extraction;
pub mod home;
pub mod listings;
pub mod location;
pub mod thanks;

pub use admin::{
    admin_dashboard, admin_locations_page, admin_pages_page, admin_settings_page, AdminVm,
};
pub use agents::{agents_page, AgentsVm};
pub use blog::{blog_index_page, blog_post_page};
pub use extraction::{extraction_page, ExtractionVm};
pub use home::{home_page, HomeVm};
pub use listings::{listings_page, ListingsVm};
pub use location::{location_page, LocationVm};
pub use thanks::thanks_page;
