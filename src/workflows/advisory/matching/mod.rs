mod catalog;

pub use catalog::{CatalogError, GrantCatalog, GrantRecord};

use serde::{Deserialize, Serialize};

use super::profile::{BusinessProfile, NumericInput};

const FULL_POINTS: u8 = 25;
const PARTIAL_POINTS: u8 = 10;
const MET: &str = "[+]";
const GAP: &str = "[-]";

/// Continuous 0-100 fit estimate for one grant record, with one reason per
/// scoring category in fixed order (sector, revenue, headcount, goal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Score a profile against one grant record. Four categories worth up to
/// 25 points each; unrestricted criteria earn partial credit so no record
/// is trivially excluded.
pub fn score_match(profile: &BusinessProfile, record: &GrantRecord) -> MatchScore {
    let mut reasons = Vec::with_capacity(4);
    let mut total: u16 = 0;

    let (points, reason) = score_sector(profile, record);
    total += u16::from(points);
    reasons.push(reason);

    let (points, reason) = score_ceiling(
        &profile.annual_revenue,
        record.max_revenue,
        "annual revenue",
        "revenue ceiling",
    );
    total += u16::from(points);
    reasons.push(reason);

    let (points, reason) = score_ceiling(
        &profile.employee_count,
        record.max_staff,
        "headcount",
        "headcount ceiling",
    );
    total += u16::from(points);
    reasons.push(reason);

    let (points, reason) = score_goal(profile, record);
    total += u16::from(points);
    reasons.push(reason);

    MatchScore {
        score: total.min(100) as u8,
        reasons,
    }
}

fn score_sector(profile: &BusinessProfile, record: &GrantRecord) -> (u8, String) {
    if record.sectors.is_empty() {
        return (PARTIAL_POINTS, format!("{MET} no sector restriction"));
    }

    let matched = record
        .sectors
        .iter()
        .any(|sector| sector.eq_ignore_ascii_case(profile.sector.trim()));
    if matched {
        (
            FULL_POINTS,
            format!("{MET} sector {} is supported", profile.sector.trim()),
        )
    } else {
        (0, format!("{GAP} sector mismatch"))
    }
}

fn score_ceiling(
    input: &NumericInput,
    ceiling: Option<f64>,
    field: &str,
    criterion: &str,
) -> (u8, String) {
    let Some(limit) = ceiling else {
        return (PARTIAL_POINTS, format!("{MET} no {criterion}"));
    };

    match input {
        NumericInput::Value(value) if *value <= limit => {
            (FULL_POINTS, format!("{MET} {field} within {criterion}"))
        }
        NumericInput::Value(_) => (0, format!("{GAP} {field} exceeds {criterion}")),
        NumericInput::Missing => (0, format!("{GAP} {field} not provided")),
        NumericInput::Invalid { .. } => (0, format!("{GAP} invalid input for {field}")),
    }
}

fn score_goal(profile: &BusinessProfile, record: &GrantRecord) -> (u8, String) {
    let goal = profile.primary_goal.trim().to_lowercase();
    if goal.is_empty() {
        return (0, format!("{GAP} no goal specified"));
    }

    let matched = record
        .supported_goals
        .iter()
        .any(|supported| goal.contains(&supported.to_lowercase()));
    if matched {
        (
            FULL_POINTS,
            format!("{MET} goal aligns with supported objectives"),
        )
    } else {
        (0, format!("{GAP} goal not among supported objectives"))
    }
}

/// A scored catalog entry as returned to callers, ordered best-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub name: String,
    pub summary: String,
    pub link: String,
    #[serde(flatten)]
    pub score: MatchScore,
}

/// Score the whole catalog for one profile, sorted descending by score.
/// Ties keep catalog order so output is deterministic.
pub fn rank_catalog(profile: &BusinessProfile, catalog: &GrantCatalog) -> Vec<RankedMatch> {
    let mut ranked: Vec<RankedMatch> = catalog
        .records()
        .iter()
        .map(|record| RankedMatch {
            name: record.name.clone(),
            summary: record.summary.clone(),
            link: record.link.clone(),
            score: score_match(profile, record),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.score.cmp(&a.score.score));
    ranked
}
