//! Grant advisory workflow: profile intake, programme eligibility rules,
//! catalog match scoring, and the service facade the HTTP/CLI layers call.

pub mod eligibility;
pub mod matching;
pub mod profile;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use eligibility::{
    EligibilityEngine, EligibilityError, EligibilityStatus, EligibilityVerdict, GrantProgram,
    RuleBook,
};
pub use matching::{score_match, GrantCatalog, GrantRecord, MatchScore, RankedMatch};
pub use profile::{BusinessProfile, DigitalAdoptionLevel, NumericInput, SfecDetails};
pub use router::advisory_router;
pub use service::{AdvisoryService, ReviewReport};
