pub mod prompt;
pub mod providers;

pub use prompt::{build_request, REVIEW_PROMPT};
pub use providers::build_provider;
