use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::extractor::DocumentField;
use crate::workflows::advisory::eligibility::{
    EligibilityStatus, EligibilityVerdict, GrantProgram,
};

/// How urgently an applicant should act on a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Important,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Important => "Important",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub message: String,
}

/// Consultant-style feedback derived from the extracted sections and the
/// programme eligibility matrix.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewFeedback {
    pub recommendations: Vec<Recommendation>,
    pub strengths: Vec<String>,
}

/// Short budget sections read as placeholders rather than breakdowns.
const MIN_BUDGET_WORDS: usize = 10;

pub fn build_feedback(
    fields: &BTreeMap<DocumentField, String>,
    matrix: &[EligibilityVerdict],
) -> ReviewFeedback {
    let mut recommendations = Vec::new();
    let mut strengths = Vec::new();

    match fields.get(&DocumentField::Objectives) {
        None => recommendations.push(Recommendation {
            severity: Severity::Critical,
            message: "Provide clear, measurable objectives with at least 2-3 KPIs.".to_string(),
        }),
        Some(objectives) if objectives.lines().count() < 3 => {
            recommendations.push(Recommendation {
                severity: Severity::Important,
                message: "Expand objectives to cover more specific goals and timelines."
                    .to_string(),
            })
        }
        Some(_) => strengths
            .push("Your objectives are detailed and measurable - this is a strong section.".to_string()),
    }

    match fields.get(&DocumentField::Budget) {
        None => recommendations.push(Recommendation {
            severity: Severity::Critical,
            message: "Include a detailed budget breakdown with justifications for each item."
                .to_string(),
        }),
        Some(budget) if budget.split_whitespace().count() < MIN_BUDGET_WORDS => {
            recommendations.push(Recommendation {
                severity: Severity::Important,
                message: "Expand the budget with cost justifications for each component."
                    .to_string(),
            })
        }
        Some(_) => strengths.push("Your budget section is detailed and well-justified.".to_string()),
    }

    if fields.contains_key(&DocumentField::Vendor) {
        strengths.push("Vendor details are present.".to_string());
    } else {
        recommendations.push(Recommendation {
            severity: Severity::Important,
            message: "Add vendor details and selection rationale, especially for PSG.".to_string(),
        });
    }

    if fields.contains_key(&DocumentField::Timeline) {
        strengths.push("Your timeline is clearly stated.".to_string());
    } else {
        recommendations.push(Recommendation {
            severity: Severity::Important,
            message: "Specify a clear timeline with defined milestones and delivery dates."
                .to_string(),
        });
    }

    if !verdict_is_eligible(matrix, GrantProgram::Sfec) {
        recommendations.push(Recommendation {
            severity: Severity::Critical,
            message:
                "Provide proof of CPF contributions and local employee count for SFEC eligibility."
                    .to_string(),
        });
    }
    if !verdict_is_eligible(matrix, GrantProgram::Psg) {
        recommendations.push(Recommendation {
            severity: Severity::Important,
            message: "For PSG, confirm pre-approved vendor status and include a formal quotation."
                .to_string(),
        });
    }

    ReviewFeedback {
        recommendations,
        strengths,
    }
}

fn verdict_is_eligible(matrix: &[EligibilityVerdict], program: GrantProgram) -> bool {
    matrix
        .iter()
        .find(|verdict| verdict.program == program)
        .map(|verdict| verdict.status == EligibilityStatus::Eligible)
        .unwrap_or(false)
}
