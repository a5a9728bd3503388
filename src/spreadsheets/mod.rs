pub mod extraction_xlsx;

pub use extraction_xlsx::export_groups_xlsx;
