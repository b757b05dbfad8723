use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A numeric form field as the applicant supplied it.
///
/// Free-text inputs like "1,500,000" or "abc" must never abort an
/// evaluation; a condition that depends on an `Invalid` field simply fails
/// with an "invalid input" reason instead of a threshold reason.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericInput {
    Missing,
    Invalid { raw: String },
    Value(f64),
}

impl NumericInput {
    /// Parse a raw user string: empty means not provided, thousands
    /// separators are accepted, negative amounts are rejected as invalid.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }

        let normalized = trimmed.replace(',', "");
        match normalized.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Self::Value(value),
            _ => Self::Invalid {
                raw: trimmed.to_string(),
            },
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl Default for NumericInput {
    fn default() -> Self {
        Self::Missing
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 {
            Self::Value(value)
        } else {
            Self::Invalid {
                raw: value.to_string(),
            }
        }
    }
}

impl Serialize for NumericInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Missing => serializer.serialize_none(),
            Self::Invalid { raw } => serializer.serialize_str(raw),
            Self::Value(value) => serializer.serialize_f64(*value),
        }
    }
}

impl<'de> Deserialize<'de> for NumericInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
            Null(Option<()>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(NumericInput::from(value)),
            Raw::Text(text) => Ok(NumericInput::parse(&text)),
            Raw::Null(_) => Ok(NumericInput::Missing),
        }
    }
}

/// Self-reported maturity of the business's tooling, captured for the
/// advisory narrative; no eligibility rule keys off it today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitalAdoptionLevel {
    None,
    Basic,
    Moderate,
    Advanced,
}

impl DigitalAdoptionLevel {
    pub const fn label(self) -> &'static str {
        match self {
            DigitalAdoptionLevel::None => "none",
            DigitalAdoptionLevel::Basic => "basic digital tools",
            DigitalAdoptionLevel::Moderate => "moderate digital tools",
            DigitalAdoptionLevel::Advanced => "advanced automation or AI",
        }
    }
}

/// Workforce and compliance details only the SFEC rules read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SfecDetails {
    #[serde(default)]
    pub skills_levy_paid_last_year: NumericInput,
    #[serde(default)]
    pub local_employee_count: NumericInput,
    #[serde(default)]
    pub has_outstanding_violations: bool,
}

/// The subject of every evaluation. Built fresh per request from form
/// input or extracted document text and passed by reference; the engine
/// never mutates or stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub sector: String,
    #[serde(default)]
    pub annual_revenue: NumericInput,
    #[serde(default)]
    pub employee_count: NumericInput,
    #[serde(default)]
    pub years_in_operation: NumericInput,
    #[serde(default)]
    pub local_ownership_at_least_30: bool,
    #[serde(default)]
    pub primary_goal: String,
    #[serde(default)]
    pub digital_adoption: Option<DigitalAdoptionLevel>,
    #[serde(default)]
    pub sfec: SfecDetails,
}

impl BusinessProfile {
    /// Convenience constructor for callers holding raw form strings.
    pub fn from_form(
        sector: &str,
        annual_revenue: &str,
        employee_count: &str,
        years_in_operation: &str,
        local_ownership_at_least_30: bool,
        primary_goal: &str,
    ) -> Self {
        Self {
            sector: sector.trim().to_string(),
            annual_revenue: NumericInput::parse(annual_revenue),
            employee_count: NumericInput::parse(employee_count),
            years_in_operation: NumericInput::parse(years_in_operation),
            local_ownership_at_least_30,
            primary_goal: primary_goal.trim().to_string(),
            digital_adoption: None,
            sfec: SfecDetails::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_thousands_separators() {
        assert_eq!(NumericInput::parse("1,500,000"), NumericInput::Value(1_500_000.0));
        assert_eq!(NumericInput::parse(" 42 "), NumericInput::Value(42.0));
    }

    #[test]
    fn parse_treats_empty_as_missing() {
        assert!(NumericInput::parse("").is_missing());
        assert!(NumericInput::parse("   ").is_missing());
    }

    #[test]
    fn parse_flags_garbage_and_negatives_as_invalid() {
        assert!(NumericInput::parse("abc").is_invalid());
        assert!(NumericInput::parse("-5").is_invalid());
        assert!(NumericInput::parse("NaN").is_invalid());
    }

    #[test]
    fn deserializes_number_string_and_null() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default)]
            field: NumericInput,
        }

        let number: Wrapper = serde_json::from_str(r#"{"field": 2000000}"#).expect("number");
        assert_eq!(number.field, NumericInput::Value(2_000_000.0));

        let text: Wrapper = serde_json::from_str(r#"{"field": "1,000"}"#).expect("string");
        assert_eq!(text.field, NumericInput::Value(1_000.0));

        let null: Wrapper = serde_json::from_str(r#"{"field": null}"#).expect("null");
        assert!(null.field.is_missing());

        let absent: Wrapper = serde_json::from_str(r#"{}"#).expect("absent");
        assert!(absent.field.is_missing());

        let garbage: Wrapper = serde_json::from_str(r#"{"field": "abc"}"#).expect("garbage");
        assert!(garbage.field.is_invalid());
    }
}
