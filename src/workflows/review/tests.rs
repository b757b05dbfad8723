use std::collections::BTreeMap;

use super::extractor::{
    extract_fields, looks_like_grant_application, profile_hints, strip_page_markers, DocumentField,
};
use super::recommendations::{build_feedback, Severity};
use crate::workflows::advisory::eligibility::{EligibilityEngine, GrantProgram};
use crate::workflows::advisory::profile::{BusinessProfile, NumericInput, SfecDetails};

#[test]
fn extracts_text_between_two_recognized_headings() {
    let text = "Objectives:\nGrow revenue\nBudget:\nS$10,000";
    let fields = extract_fields(text);

    assert_eq!(
        fields.get(&DocumentField::Objectives).map(String::as_str),
        Some("Grow revenue")
    );
    assert_eq!(
        fields.get(&DocumentField::Budget).map(String::as_str),
        Some("S$10,000")
    );
}

#[test]
fn section_values_are_trimmed() {
    let text = "Timeline:\n\n  Q1 to Q3  \n\nSchedule notes follow elsewhere";
    let fields = extract_fields(text);
    let timeline = fields
        .get(&DocumentField::Timeline)
        .expect("timeline extracted");
    assert!(timeline.starts_with("Q1 to Q3"));
    assert!(!timeline.starts_with(' '));
    assert!(!timeline.ends_with(' '));
}

#[test]
fn first_matching_synonym_wins() {
    let text = "Overview:\nFirst summary\nProject Description:\nSecond summary\nBudget:\nS$1";
    let fields = extract_fields(text);

    // "Project Description" outranks "Overview" even though it appears later.
    assert_eq!(
        fields
            .get(&DocumentField::ProjectDescription)
            .map(String::as_str),
        Some("Second summary")
    );
}

#[test]
fn inline_heading_bodies_are_captured() {
    let text = "Budget: S$25,000 across two phases\nTimeline: March to August";
    let fields = extract_fields(text);

    assert_eq!(
        fields.get(&DocumentField::Budget).map(String::as_str),
        Some("S$25,000 across two phases")
    );
    assert_eq!(
        fields.get(&DocumentField::Timeline).map(String::as_str),
        Some("March to August")
    );
}

#[test]
fn absent_fields_are_omitted_and_empty_text_yields_empty_map() {
    assert!(extract_fields("").is_empty());
    assert!(extract_fields("   \n  ").is_empty());

    let fields = extract_fields("Budget:\nS$500");
    assert!(!fields.contains_key(&DocumentField::Objectives));
    assert!(fields.contains_key(&DocumentField::Budget));
}

#[test]
fn prose_starting_with_a_heading_word_suffix_is_not_a_heading() {
    let fields = extract_fields("Objectively speaking this is prose\nBudget:\nS$500");
    assert!(!fields.contains_key(&DocumentField::Objectives));
}

#[test]
fn strips_page_markers_left_by_pdf_extraction() {
    let cleaned = strip_page_markers("Intro Page 1 more text Page  12 end");
    assert!(!cleaned.contains("Page"));
    assert!(cleaned.contains("Intro"));
    assert!(cleaned.contains("end"));
}

#[test]
fn finds_uen_and_sector_hints() {
    let hints = profile_hints("ACRA BizFile for 12345678K, a retail business in Singapore");
    assert_eq!(hints.uen.as_deref(), Some("12345678K"));
    assert_eq!(hints.sector.as_deref(), Some("Retail"));

    let none = profile_hints("an unrelated memo");
    assert!(none.uen.is_none());
    assert!(none.sector.is_none());
}

#[test]
fn grant_application_heuristic_needs_three_keywords() {
    assert!(looks_like_grant_application(
        "Grant application with budget and timeline"
    ));
    assert!(!looks_like_grant_application("quarterly sales memo"));
}

#[test]
fn missing_sections_produce_critical_recommendations() {
    let profile = BusinessProfile {
        sector: "Retail".to_string(),
        annual_revenue: NumericInput::Value(1_000_000.0),
        employee_count: NumericInput::Value(10.0),
        years_in_operation: NumericInput::Value(2.0),
        local_ownership_at_least_30: true,
        primary_goal: "adopt digital tools".to_string(),
        digital_adoption: None,
        sfec: SfecDetails::default(),
    };
    let matrix = EligibilityEngine::default().matrix(&profile);

    let feedback = build_feedback(&BTreeMap::new(), &matrix);

    assert!(feedback
        .recommendations
        .iter()
        .any(|rec| rec.severity == Severity::Critical && rec.message.contains("objectives")));
    assert!(feedback
        .recommendations
        .iter()
        .any(|rec| rec.severity == Severity::Critical && rec.message.contains("budget")));
    assert!(feedback.strengths.is_empty());
}

#[test]
fn healthy_sections_become_strengths() {
    let mut fields = BTreeMap::new();
    fields.insert(
        DocumentField::Objectives,
        "Raise revenue 20%\nCut manual work\nLaunch e-commerce channel".to_string(),
    );
    fields.insert(
        DocumentField::Budget,
        "S$40,000 split across licences, onboarding, training, and hardware items over six months"
            .to_string(),
    );
    fields.insert(DocumentField::Vendor, "Acme Pte Ltd".to_string());
    fields.insert(DocumentField::Timeline, "January to June".to_string());

    let profile = BusinessProfile {
        sector: "Retail".to_string(),
        annual_revenue: NumericInput::Value(1_000_000.0),
        employee_count: NumericInput::Value(10.0),
        years_in_operation: NumericInput::Value(2.0),
        local_ownership_at_least_30: true,
        primary_goal: "adopt digital tools".to_string(),
        digital_adoption: None,
        sfec: SfecDetails {
            skills_levy_paid_last_year: NumericInput::Value(900.0),
            local_employee_count: NumericInput::Value(8.0),
            has_outstanding_violations: false,
        },
    };
    let matrix = EligibilityEngine::default().matrix(&profile);
    let feedback = build_feedback(&fields, &matrix);

    assert_eq!(feedback.strengths.len(), 4);
    assert!(feedback
        .recommendations
        .iter()
        .all(|rec| !rec.message.contains("SFEC")),);
}

#[test]
fn ineligible_programmes_drive_followup_recommendations() {
    let profile = BusinessProfile {
        sector: "Retail".to_string(),
        annual_revenue: NumericInput::Value(1_000_000.0),
        employee_count: NumericInput::Value(10.0),
        years_in_operation: NumericInput::Value(2.0),
        local_ownership_at_least_30: false,
        primary_goal: "keep operations steady".to_string(),
        digital_adoption: None,
        sfec: SfecDetails::default(),
    };
    let matrix = EligibilityEngine::default().matrix(&profile);
    let feedback = build_feedback(&BTreeMap::new(), &matrix);

    assert!(feedback
        .recommendations
        .iter()
        .any(|rec| rec.message.contains("SFEC")));
    assert!(feedback
        .recommendations
        .iter()
        .any(|rec| rec.message.contains("PSG")));
}

// Matrix order is part of the report contract consumed by exporters.
#[test]
fn matrix_order_is_stable_for_reports() {
    let profile = BusinessProfile {
        sector: "Retail".to_string(),
        annual_revenue: NumericInput::Missing,
        employee_count: NumericInput::Missing,
        years_in_operation: NumericInput::Missing,
        local_ownership_at_least_30: false,
        primary_goal: String::new(),
        digital_adoption: None,
        sfec: SfecDetails::default(),
    };
    let matrix = EligibilityEngine::default().matrix(&profile);
    assert_eq!(matrix[0].program, GrantProgram::Psg);
    assert_eq!(matrix[1].program, GrantProgram::Edg);
    assert_eq!(matrix[2].program, GrantProgram::Sfec);
}
