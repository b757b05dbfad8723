//! Document review: section extraction over already-extracted PDF text
//! and consultant-style feedback built from the eligibility matrix.

pub mod extractor;
pub mod recommendations;

#[cfg(test)]
mod tests;

pub use extractor::{
    extract_fields, looks_like_grant_application, profile_hints, strip_page_markers,
    DocumentField, ProfileHints,
};
pub use recommendations::{build_feedback, Recommendation, ReviewFeedback, Severity};
