//! Grant Advisor: eligibility checks, match scoring, and document review
//! for Singapore SME grant programmes.
//!
//! The core evaluators are pure, synchronous functions over an explicit
//! [`workflows::advisory::BusinessProfile`]; the HTTP and CLI layers are
//! thin callers that serialize their inputs and render their outputs.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
