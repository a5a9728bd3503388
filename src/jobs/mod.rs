pub mod extraction;

pub use extraction::{start_extraction, ExtractKind};
