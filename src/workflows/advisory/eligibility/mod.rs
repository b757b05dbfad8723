mod catalog;
mod rules;

pub use catalog::{EligibilityError, GrantProgram, GrantRule, RuleBook};
pub use rules::{Condition, CriteriaGroup, ProfileField};

use serde::{Deserialize, Serialize};

use super::profile::BusinessProfile;

/// Discrete verdict for one programme. `Possible` means some but not all
/// requirement groups were satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityStatus {
    Eligible,
    Possible,
    No,
}

impl EligibilityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "Eligible",
            EligibilityStatus::Possible => "Possible",
            EligibilityStatus::No => "No",
        }
    }
}

/// Evaluation output for one (profile, programme) pair. Unmet labels keep
/// the rule's original group order so reports are reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub program: GrantProgram,
    pub status: EligibilityStatus,
    pub unmet_requirements: Vec<String>,
}

/// Stateless evaluator applying a rule book to business profiles.
pub struct EligibilityEngine {
    rules: RuleBook,
}

impl EligibilityEngine {
    pub fn new(rules: RuleBook) -> Self {
        Self { rules }
    }

    pub fn rule_book(&self) -> &RuleBook {
        &self.rules
    }

    pub fn evaluate(&self, profile: &BusinessProfile, program: GrantProgram) -> EligibilityVerdict {
        evaluate_rule(profile, self.rules.rule(program))
    }

    /// Lookup by caller-supplied programme name; unknown names error.
    pub fn evaluate_named(
        &self,
        profile: &BusinessProfile,
        name: &str,
    ) -> Result<EligibilityVerdict, EligibilityError> {
        let rule = self.rules.rule_for(name)?;
        Ok(evaluate_rule(profile, rule))
    }

    /// Verdicts for every programme in the rule book, in fixed order.
    pub fn matrix(&self, profile: &BusinessProfile) -> Vec<EligibilityVerdict> {
        GrantProgram::ALL
            .iter()
            .map(|program| self.evaluate(profile, *program))
            .collect()
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new(RuleBook::standard())
    }
}

fn evaluate_rule(profile: &BusinessProfile, rule: &GrantRule) -> EligibilityVerdict {
    let unmet_requirements: Vec<String> = rule
        .groups
        .iter()
        .filter_map(|group| group.unmet_label(profile))
        .collect();

    let status = if unmet_requirements.is_empty() {
        EligibilityStatus::Eligible
    } else if unmet_requirements.len() == rule.groups.len() {
        EligibilityStatus::No
    } else {
        EligibilityStatus::Possible
    };

    EligibilityVerdict {
        program: rule.program,
        status,
        unmet_requirements,
    }
}
