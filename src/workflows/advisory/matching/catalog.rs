use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

/// One entry in the data-driven grant catalog used by the match scorer.
/// An empty `sectors` list means the grant has no sector restriction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantRecord {
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub max_revenue: Option<f64>,
    #[serde(default)]
    pub max_staff: Option<f64>,
    #[serde(default)]
    pub supported_goals: Vec<String>,
}

/// Catalog load failure. Only raised while reading external data; the
/// built-in catalog cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to read grant catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed grant catalog row: {0}")]
    Csv(#[from] csv::Error),
}

/// The set of grant records scored by the match scorer.
#[derive(Debug, Clone)]
pub struct GrantCatalog {
    records: Vec<GrantRecord>,
}

impl GrantCatalog {
    /// Seed catalog mirroring the public GoBusiness listings.
    pub fn builtin() -> Self {
        let records = vec![
            GrantRecord {
                name: "Productivity Solutions Grant (PSG)".to_string(),
                summary: "Support for pre-approved digital tools and equipment.".to_string(),
                link: "https://www.gobusiness.gov.sg/grants/psg".to_string(),
                sectors: Vec::new(),
                max_revenue: Some(100_000_000.0),
                max_staff: Some(200.0),
                supported_goals: vec![
                    "digitalisation".to_string(),
                    "automation".to_string(),
                    "productivity".to_string(),
                ],
            },
            GrantRecord {
                name: "Enterprise Development Grant (EDG)".to_string(),
                summary: "Helps companies grow, transform, and build capabilities.".to_string(),
                link: "https://www.gobusiness.gov.sg/grants/edg".to_string(),
                sectors: Vec::new(),
                max_revenue: None,
                max_staff: None,
                supported_goals: vec![
                    "expansion".to_string(),
                    "innovation".to_string(),
                    "capability building".to_string(),
                ],
            },
            GrantRecord {
                name: "Market Readiness Assistance (MRA)".to_string(),
                summary: "Support for first-time overseas market expansion.".to_string(),
                link: "https://www.gobusiness.gov.sg/grants/mra".to_string(),
                sectors: Vec::new(),
                max_revenue: Some(100_000_000.0),
                max_staff: None,
                supported_goals: vec![
                    "overseas expansion".to_string(),
                    "export".to_string(),
                ],
            },
            GrantRecord {
                name: "SkillsFuture Enterprise Credit (SFEC)".to_string(),
                summary: "Credit offsetting workforce and enterprise transformation costs."
                    .to_string(),
                link: "https://www.gobusiness.gov.sg/grants/sfec".to_string(),
                sectors: Vec::new(),
                max_revenue: None,
                max_staff: None,
                supported_goals: vec![
                    "training".to_string(),
                    "workforce".to_string(),
                    "skills development".to_string(),
                ],
            },
            GrantRecord {
                name: "Energy Efficiency Fund (E2F)".to_string(),
                summary: "Equipment upgrade support for energy-intensive sectors.".to_string(),
                link: "https://www.gobusiness.gov.sg".to_string(),
                sectors: vec![
                    "Food & Beverage".to_string(),
                    "Manufacturing".to_string(),
                    "Retail".to_string(),
                ],
                max_revenue: None,
                max_staff: None,
                supported_goals: vec!["sustainability".to_string(), "cost reduction".to_string()],
            },
        ];

        Self { records }
    }

    /// Load records from a CSV export. Columns: `name`, `summary`, `link`,
    /// `sectors` and `supported_goals` (semicolon separated), `max_revenue`,
    /// `max_staff`. Empty cells mean unrestricted.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<CatalogRow>() {
            records.push(row?.into_record());
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[GrantRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for GrantCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    name: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sectors: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    max_revenue: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    max_staff: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    supported_goals: Option<String>,
}

impl CatalogRow {
    fn into_record(self) -> GrantRecord {
        GrantRecord {
            name: self.name,
            summary: self.summary.unwrap_or_default(),
            link: self.link.unwrap_or_default(),
            sectors: split_list(self.sectors.as_deref()),
            max_revenue: parse_limit(self.max_revenue.as_deref()),
            max_staff: parse_limit(self.max_staff.as_deref()),
            supported_goals: split_list(self.supported_goals.as_deref()),
        }
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Unparsable limits degrade to "unrestricted" rather than dropping the
/// whole row; a bad ceiling should not hide a grant from matching.
fn parse_limit(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.replace(',', "").parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
