use super::common::*;
use crate::workflows::advisory::eligibility::{
    EligibilityEngine, EligibilityStatus, GrantProgram,
};
use crate::workflows::advisory::profile::NumericInput;

#[test]
fn psg_digitalising_retailer_is_eligible() {
    let engine = EligibilityEngine::default();
    let verdict = engine.evaluate(&digitalising_retailer(), GrantProgram::Psg);

    assert_eq!(verdict.status, EligibilityStatus::Eligible);
    assert!(verdict.unmet_requirements.is_empty());
}

#[test]
fn psg_low_ownership_and_off_topic_goal_is_possible_with_ordered_labels() {
    let engine = EligibilityEngine::default();
    let mut profile = digitalising_retailer();
    profile.local_ownership_at_least_30 = false;
    profile.primary_goal = "expand retail outlets".to_string();

    let verdict = engine.evaluate(&profile, GrantProgram::Psg);

    assert_eq!(verdict.status, EligibilityStatus::Possible);
    assert_eq!(
        verdict.unmet_requirements,
        vec![
            "local ownership of at least 30%".to_string(),
            "digitalisation-related project goal".to_string(),
        ],
        "unmet labels must keep the rule's original group order"
    );
}

#[test]
fn psg_size_rule_fails_only_when_revenue_and_headcount_both_exceed() {
    let engine = EligibilityEngine::default();
    let mut profile = digitalising_retailer();
    profile.annual_revenue = NumericInput::Value(150_000_000.0);
    profile.employee_count = NumericInput::Value(180.0);

    let verdict = engine.evaluate(&profile, GrantProgram::Psg);
    assert_eq!(verdict.status, EligibilityStatus::Eligible);

    profile.employee_count = NumericInput::Value(250.0);
    let verdict = engine.evaluate(&profile, GrantProgram::Psg);
    assert_eq!(verdict.status, EligibilityStatus::Possible);
    assert!(verdict
        .unmet_requirements
        .contains(&"annual revenue below S$100M or at most 200 employees".to_string()));
}

#[test]
fn sfec_failing_all_groups_is_no_with_three_ordered_labels() {
    let engine = EligibilityEngine::default();
    let mut profile = digitalising_retailer();
    profile.sfec = sfec_details("500", "2", true);

    let verdict = engine.evaluate(&profile, GrantProgram::Sfec);

    assert_eq!(verdict.status, EligibilityStatus::No);
    assert_eq!(
        verdict.unmet_requirements,
        vec![
            "S$750 or more Skills Development Levy paid last year".to_string(),
            "at least 3 local employees".to_string(),
            "no outstanding MOM or IRAS violations".to_string(),
        ]
    );
}

#[test]
fn sfec_malformed_levy_reports_invalid_input_without_panicking() {
    let engine = EligibilityEngine::default();
    let mut profile = digitalising_retailer();
    profile.sfec = sfec_details("abc", "5", false);

    let verdict = engine.evaluate(&profile, GrantProgram::Sfec);

    assert_ne!(verdict.status, EligibilityStatus::Eligible);
    assert!(verdict
        .unmet_requirements
        .contains(&"invalid input for Skills Development Levy paid".to_string()));
}

#[test]
fn edg_requires_two_years_and_positive_revenue() {
    let engine = EligibilityEngine::default();
    let mut profile = digitalising_retailer();
    profile.primary_goal = "overseas market expansion".to_string();

    let verdict = engine.evaluate(&profile, GrantProgram::Edg);
    assert_eq!(verdict.status, EligibilityStatus::Eligible);

    profile.years_in_operation = NumericInput::Value(1.0);
    profile.annual_revenue = NumericInput::Missing;
    let verdict = engine.evaluate(&profile, GrantProgram::Edg);
    assert_eq!(verdict.status, EligibilityStatus::Possible);
    assert_eq!(
        verdict.unmet_requirements,
        vec![
            "at least 2 years in operation".to_string(),
            "positive annual revenue".to_string(),
        ]
    );
}

#[test]
fn eligible_iff_no_unmet_requirements() {
    let engine = EligibilityEngine::default();
    let profiles = [
        digitalising_retailer(),
        {
            let mut p = digitalising_retailer();
            p.local_ownership_at_least_30 = false;
            p
        },
        {
            let mut p = digitalising_retailer();
            p.annual_revenue = NumericInput::parse("not-a-number");
            p.employee_count = NumericInput::Missing;
            p.years_in_operation = NumericInput::Missing;
            p.primary_goal = String::new();
            p.local_ownership_at_least_30 = false;
            p
        },
    ];

    for profile in &profiles {
        for program in GrantProgram::ALL {
            let verdict = engine.evaluate(profile, program);
            assert_eq!(
                verdict.status == EligibilityStatus::Eligible,
                verdict.unmet_requirements.is_empty(),
                "status and unmet list must agree for {program}"
            );
        }
    }
}

#[test]
fn no_status_means_every_group_failed() {
    let engine = EligibilityEngine::default();
    let mut profile = digitalising_retailer();
    profile.local_ownership_at_least_30 = false;
    profile.annual_revenue = NumericInput::Value(200_000_000.0);
    profile.employee_count = NumericInput::Value(500.0);
    profile.years_in_operation = NumericInput::Missing;
    profile.primary_goal = "keep things as they are".to_string();

    let verdict = engine.evaluate(&profile, GrantProgram::Psg);
    assert_eq!(verdict.status, EligibilityStatus::No);
    assert_eq!(verdict.unmet_requirements.len(), 4);
}

#[test]
fn evaluation_is_idempotent() {
    let engine = EligibilityEngine::default();
    let profile = digitalising_retailer();

    let first = engine.evaluate(&profile, GrantProgram::Psg);
    let second = engine.evaluate(&profile, GrantProgram::Psg);
    assert_eq!(first, second);
}

#[test]
fn matrix_preserves_programme_order() {
    let service = advisory_service();
    let matrix = service.eligibility_matrix(&digitalising_retailer());

    let programs: Vec<GrantProgram> = matrix.iter().map(|verdict| verdict.program).collect();
    assert_eq!(
        programs,
        vec![GrantProgram::Psg, GrantProgram::Edg, GrantProgram::Sfec]
    );
}

#[test]
fn unknown_programme_name_errors_instead_of_passing() {
    let service = advisory_service();
    let result = service.check_eligibility(&digitalising_retailer(), "MRA");
    assert!(result.is_err(), "MRA has no hand-maintained rule");
}
