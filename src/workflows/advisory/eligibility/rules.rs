use super::super::profile::{BusinessProfile, NumericInput};

/// Fields a numeric condition can read, with the display names used when
/// reporting malformed input back to the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    AnnualRevenue,
    EmployeeCount,
    YearsInOperation,
    SkillsLevyPaid,
    LocalEmployeeCount,
}

impl ProfileField {
    pub const fn label(self) -> &'static str {
        match self {
            ProfileField::AnnualRevenue => "annual revenue",
            ProfileField::EmployeeCount => "number of employees",
            ProfileField::YearsInOperation => "years in operation",
            ProfileField::SkillsLevyPaid => "Skills Development Levy paid",
            ProfileField::LocalEmployeeCount => "number of local employees",
        }
    }

    fn read<'a>(self, profile: &'a BusinessProfile) -> &'a NumericInput {
        match self {
            ProfileField::AnnualRevenue => &profile.annual_revenue,
            ProfileField::EmployeeCount => &profile.employee_count,
            ProfileField::YearsInOperation => &profile.years_in_operation,
            ProfileField::SkillsLevyPaid => &profile.sfec.skills_levy_paid_last_year,
            ProfileField::LocalEmployeeCount => &profile.sfec.local_employee_count,
        }
    }
}

/// Result of checking a single condition against a profile.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ConditionStatus {
    Met,
    Unmet,
    /// The condition could not be checked because the input was malformed;
    /// carries the applicant-facing reason.
    Invalid(String),
}

/// One eligibility condition. Conditions inside a group are alternatives:
/// any `Met` condition satisfies the group.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    LocalOwnershipAtLeast30,
    FieldAtLeast { field: ProfileField, minimum: f64 },
    FieldPositive(ProfileField),
    GoalContainsAny(&'static [&'static str]),
    NoOutstandingViolations,
    /// PSG sizes the SME with a revenue ceiling OR a headcount ceiling and
    /// only fails when both are exceeded. This programme-specific
    /// disjunction is one condition on purpose; folding it into the usual
    /// any-match group would change which profiles pass.
    SizeWithinRevenueOrHeadcount {
        max_revenue: f64,
        max_employees: f64,
    },
}

impl Condition {
    pub(crate) fn check(&self, profile: &BusinessProfile) -> ConditionStatus {
        match self {
            Condition::LocalOwnershipAtLeast30 => {
                if profile.local_ownership_at_least_30 {
                    ConditionStatus::Met
                } else {
                    ConditionStatus::Unmet
                }
            }
            Condition::FieldAtLeast { field, minimum } => {
                match field.read(profile) {
                    NumericInput::Value(value) if value >= minimum => ConditionStatus::Met,
                    NumericInput::Value(_) => ConditionStatus::Unmet,
                    NumericInput::Missing => ConditionStatus::Unmet,
                    NumericInput::Invalid { .. } => ConditionStatus::Invalid(invalid_reason(*field)),
                }
            }
            Condition::FieldPositive(field) => match field.read(profile) {
                NumericInput::Value(value) if *value > 0.0 => ConditionStatus::Met,
                NumericInput::Value(_) => ConditionStatus::Unmet,
                NumericInput::Missing => ConditionStatus::Unmet,
                NumericInput::Invalid { .. } => ConditionStatus::Invalid(invalid_reason(*field)),
            },
            Condition::GoalContainsAny(keywords) => {
                let goal = profile.primary_goal.to_lowercase();
                if keywords.iter().any(|keyword| goal.contains(keyword)) {
                    ConditionStatus::Met
                } else {
                    ConditionStatus::Unmet
                }
            }
            Condition::NoOutstandingViolations => {
                if profile.sfec.has_outstanding_violations {
                    ConditionStatus::Unmet
                } else {
                    ConditionStatus::Met
                }
            }
            Condition::SizeWithinRevenueOrHeadcount {
                max_revenue,
                max_employees,
            } => check_size(profile, *max_revenue, *max_employees),
        }
    }
}

/// Revenue below the ceiling or headcount at or below the cap. A usable
/// value on either side that passes is enough; the check fails only when
/// neither side passes, and reports malformed input only when no usable
/// side remains.
fn check_size(profile: &BusinessProfile, max_revenue: f64, max_employees: f64) -> ConditionStatus {
    let revenue_ok = matches!(profile.annual_revenue, NumericInput::Value(v) if v < max_revenue);
    let employees_ok = matches!(profile.employee_count, NumericInput::Value(v) if v <= max_employees);

    if revenue_ok || employees_ok {
        return ConditionStatus::Met;
    }

    if profile.annual_revenue.is_invalid() && profile.employee_count.value().is_none() {
        return ConditionStatus::Invalid(invalid_reason(ProfileField::AnnualRevenue));
    }
    if profile.employee_count.is_invalid() && profile.annual_revenue.value().is_none() {
        return ConditionStatus::Invalid(invalid_reason(ProfileField::EmployeeCount));
    }

    ConditionStatus::Unmet
}

fn invalid_reason(field: ProfileField) -> String {
    format!("invalid input for {}", field.label())
}

/// A requirement expressed as interchangeable conditions. The label is the
/// primary wording reported when the whole group is unsatisfied.
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaGroup {
    pub label: &'static str,
    pub conditions: Vec<Condition>,
}

impl CriteriaGroup {
    pub fn new(label: &'static str, conditions: Vec<Condition>) -> Self {
        Self { label, conditions }
    }

    /// `None` when satisfied, otherwise the applicant-facing unmet label.
    pub(crate) fn unmet_label(&self, profile: &BusinessProfile) -> Option<String> {
        let mut primary: Option<ConditionStatus> = None;

        for condition in &self.conditions {
            let status = condition.check(profile);
            if status == ConditionStatus::Met {
                return None;
            }
            if primary.is_none() {
                primary = Some(status);
            }
        }

        match primary {
            Some(ConditionStatus::Invalid(reason)) => Some(reason),
            _ => Some(self.label.to_string()),
        }
    }
}
