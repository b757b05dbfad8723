use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::eligibility::{EligibilityEngine, EligibilityError, EligibilityVerdict, GrantProgram};
use super::matching::{rank_catalog, GrantCatalog, RankedMatch};
use super::profile::BusinessProfile;
use crate::workflows::review::{
    build_feedback, extract_fields, looks_like_grant_application, strip_page_markers,
    DocumentField, ReviewFeedback,
};

/// Facade over the rule evaluator, match scorer, and document review.
/// Stateless: every operation takes the profile by reference and returns
/// fresh output, so concurrent callers never interfere.
pub struct AdvisoryService {
    engine: EligibilityEngine,
    catalog: GrantCatalog,
}

impl AdvisoryService {
    pub fn new(engine: EligibilityEngine, catalog: GrantCatalog) -> Self {
        Self { engine, catalog }
    }

    pub fn standard() -> Self {
        Self::new(EligibilityEngine::default(), GrantCatalog::builtin())
    }

    pub fn catalog(&self) -> &GrantCatalog {
        &self.catalog
    }

    /// Verdict for a single named programme. Unknown names are a caller
    /// contract violation surfaced as an error.
    pub fn check_eligibility(
        &self,
        profile: &BusinessProfile,
        program: &str,
    ) -> Result<EligibilityVerdict, EligibilityError> {
        let verdict = self.engine.evaluate_named(profile, program)?;
        debug!(
            program = %verdict.program,
            status = verdict.status.label(),
            unmet = verdict.unmet_requirements.len(),
            "evaluated eligibility"
        );
        Ok(verdict)
    }

    /// Verdicts for all canonical programmes in fixed order.
    pub fn eligibility_matrix(&self, profile: &BusinessProfile) -> Vec<EligibilityVerdict> {
        self.engine.matrix(profile)
    }

    pub fn verdict(&self, profile: &BusinessProfile, program: GrantProgram) -> EligibilityVerdict {
        self.engine.evaluate(profile, program)
    }

    /// Catalog-wide match scores for one profile, best first.
    pub fn match_scores(&self, profile: &BusinessProfile) -> Vec<RankedMatch> {
        rank_catalog(profile, &self.catalog)
    }

    /// Run the document review pipeline: strip extraction artifacts, pull
    /// labeled sections, evaluate the matrix, and derive feedback.
    pub fn review_document(&self, raw_text: &str, profile: &BusinessProfile) -> ReviewReport {
        let text = strip_page_markers(raw_text);
        let recognized = looks_like_grant_application(&text);
        let fields = extract_fields(&text);
        let matrix = self.eligibility_matrix(profile);
        let feedback = build_feedback(&fields, &matrix);

        debug!(
            recognized,
            sections = fields.len(),
            "reviewed uploaded document"
        );

        ReviewReport {
            recognized_as_grant_application: recognized,
            fields: fields
                .into_iter()
                .map(|(field, value)| (field.label().to_string(), value))
                .collect(),
            matrix,
            feedback,
        }
    }
}

impl Default for AdvisoryService {
    fn default() -> Self {
        Self::standard()
    }
}

/// Everything the review endpoint returns for one uploaded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewReport {
    pub recognized_as_grant_application: bool,
    /// Extracted sections keyed by display label; absent sections omitted.
    pub fields: BTreeMap<String, String>,
    pub matrix: Vec<EligibilityVerdict>,
    pub feedback: ReviewFeedback,
}

impl ReviewReport {
    /// Display value for a section, substituting the reviewer's
    /// "not provided" placeholder.
    pub fn section_or_placeholder(&self, field: DocumentField) -> String {
        self.fields
            .get(field.label())
            .cloned()
            .unwrap_or_else(|| format!("No {} provided.", field.label().to_lowercase()))
    }
}
