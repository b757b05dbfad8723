use crate::workflows::advisory::profile::{BusinessProfile, NumericInput, SfecDetails};
use crate::workflows::advisory::service::AdvisoryService;

/// PSG-friendly digitalising retailer used across the suites.
pub(super) fn digitalising_retailer() -> BusinessProfile {
    BusinessProfile {
        sector: "Retail".to_string(),
        annual_revenue: NumericInput::Value(2_000_000.0),
        employee_count: NumericInput::Value(50.0),
        years_in_operation: NumericInput::Value(3.0),
        local_ownership_at_least_30: true,
        primary_goal: "adopt digital tools".to_string(),
        digital_adoption: None,
        sfec: SfecDetails::default(),
    }
}

pub(super) fn sfec_details(levy: &str, local_employees: &str, violations: bool) -> SfecDetails {
    SfecDetails {
        skills_levy_paid_last_year: NumericInput::parse(levy),
        local_employee_count: NumericInput::parse(local_employees),
        has_outstanding_violations: violations,
    }
}

pub(super) fn advisory_service() -> AdvisoryService {
    AdvisoryService::standard()
}
