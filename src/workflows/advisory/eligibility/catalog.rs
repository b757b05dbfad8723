use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rules::{Condition, CriteriaGroup, ProfileField};

/// Goal keywords counted as a digitalisation objective for PSG.
pub(crate) const DIGITALISATION_KEYWORDS: &[&str] = &[
    "digital",
    "digitalisation",
    "digitalization",
    "automation",
    "software",
    "e-commerce",
    "productivity",
    "it solution",
];

/// Goal keywords counted as a growth or innovation objective for EDG.
pub(crate) const GROWTH_KEYWORDS: &[&str] = &[
    "expansion",
    "growth",
    "innovation",
    "transform",
    "capability",
    "overseas",
    "market",
    "new product",
];

/// The grant programmes with hand-maintained eligibility rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GrantProgram {
    Psg,
    Edg,
    Sfec,
}

impl GrantProgram {
    pub const ALL: [GrantProgram; 3] = [GrantProgram::Psg, GrantProgram::Edg, GrantProgram::Sfec];

    pub const fn code(self) -> &'static str {
        match self {
            GrantProgram::Psg => "PSG",
            GrantProgram::Edg => "EDG",
            GrantProgram::Sfec => "SFEC",
        }
    }

    pub const fn full_name(self) -> &'static str {
        match self {
            GrantProgram::Psg => "Productivity Solutions Grant",
            GrantProgram::Edg => "Enterprise Development Grant",
            GrantProgram::Sfec => "SkillsFuture Enterprise Credit",
        }
    }
}

impl fmt::Display for GrantProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for GrantProgram {
    type Err = EligibilityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PSG" => Ok(GrantProgram::Psg),
            "EDG" => Ok(GrantProgram::Edg),
            "SFEC" => Ok(GrantProgram::Sfec),
            _ => Err(EligibilityError::UnknownGrant {
                name: value.trim().to_string(),
            }),
        }
    }
}

/// A caller named a programme the rule book does not define. This is a
/// caller contract violation, never a silent pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EligibilityError {
    #[error("no eligibility rules defined for grant '{name}'")]
    UnknownGrant { name: String },
}

/// Fixed criteria for one programme. Built once at startup and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GrantRule {
    pub program: GrantProgram,
    pub groups: Vec<CriteriaGroup>,
}

impl GrantRule {
    fn psg() -> Self {
        Self {
            program: GrantProgram::Psg,
            groups: vec![
                CriteriaGroup::new(
                    "local ownership of at least 30%",
                    vec![Condition::LocalOwnershipAtLeast30],
                ),
                CriteriaGroup::new(
                    "annual revenue below S$100M or at most 200 employees",
                    vec![Condition::SizeWithinRevenueOrHeadcount {
                        max_revenue: 100_000_000.0,
                        max_employees: 200.0,
                    }],
                ),
                CriteriaGroup::new(
                    "digitalisation-related project goal",
                    vec![Condition::GoalContainsAny(DIGITALISATION_KEYWORDS)],
                ),
                CriteriaGroup::new(
                    "registered and operating in Singapore",
                    vec![Condition::FieldPositive(ProfileField::YearsInOperation)],
                ),
            ],
        }
    }

    fn edg() -> Self {
        Self {
            program: GrantProgram::Edg,
            groups: vec![
                CriteriaGroup::new(
                    "local ownership of at least 30%",
                    vec![Condition::LocalOwnershipAtLeast30],
                ),
                CriteriaGroup::new(
                    "at least 2 years in operation",
                    vec![Condition::FieldAtLeast {
                        field: ProfileField::YearsInOperation,
                        minimum: 2.0,
                    }],
                ),
                CriteriaGroup::new(
                    "positive annual revenue",
                    vec![Condition::FieldPositive(ProfileField::AnnualRevenue)],
                ),
                CriteriaGroup::new(
                    "growth or innovation project goal",
                    vec![Condition::GoalContainsAny(GROWTH_KEYWORDS)],
                ),
            ],
        }
    }

    fn sfec() -> Self {
        Self {
            program: GrantProgram::Sfec,
            groups: vec![
                CriteriaGroup::new(
                    "S$750 or more Skills Development Levy paid last year",
                    vec![Condition::FieldAtLeast {
                        field: ProfileField::SkillsLevyPaid,
                        minimum: 750.0,
                    }],
                ),
                CriteriaGroup::new(
                    "at least 3 local employees",
                    vec![Condition::FieldAtLeast {
                        field: ProfileField::LocalEmployeeCount,
                        minimum: 3.0,
                    }],
                ),
                CriteriaGroup::new(
                    "no outstanding MOM or IRAS violations",
                    vec![Condition::NoOutstandingViolations],
                ),
            ],
        }
    }
}

/// Immutable lookup table of programme rules.
#[derive(Debug, Clone)]
pub struct RuleBook {
    psg: GrantRule,
    edg: GrantRule,
    sfec: GrantRule,
}

impl RuleBook {
    pub fn standard() -> Self {
        Self {
            psg: GrantRule::psg(),
            edg: GrantRule::edg(),
            sfec: GrantRule::sfec(),
        }
    }

    pub fn rule(&self, program: GrantProgram) -> &GrantRule {
        match program {
            GrantProgram::Psg => &self.psg,
            GrantProgram::Edg => &self.edg,
            GrantProgram::Sfec => &self.sfec,
        }
    }

    /// Lookup by caller-supplied name. Unknown names are a configuration
    /// error rather than a trivially eligible empty rule.
    pub fn rule_for(&self, name: &str) -> Result<&GrantRule, EligibilityError> {
        let program = GrantProgram::from_str(name)?;
        Ok(self.rule(program))
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::standard()
    }
}
