use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Canonical sections looked for in an uploaded grant application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentField {
    ProjectDescription,
    Objectives,
    Budget,
    Vendor,
    Timeline,
    Outcomes,
}

impl DocumentField {
    pub const ALL: [DocumentField; 6] = [
        DocumentField::ProjectDescription,
        DocumentField::Objectives,
        DocumentField::Budget,
        DocumentField::Vendor,
        DocumentField::Timeline,
        DocumentField::Outcomes,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DocumentField::ProjectDescription => "Project Description",
            DocumentField::Objectives => "Objectives",
            DocumentField::Budget => "Budget",
            DocumentField::Vendor => "Vendor",
            DocumentField::Timeline => "Timeline",
            DocumentField::Outcomes => "Outcomes",
        }
    }

    /// Heading synonyms in priority order; the first one present in the
    /// document wins and the search stops for this field.
    const fn synonyms(self) -> &'static [&'static str] {
        match self {
            DocumentField::ProjectDescription => &["Project Description", "Overview"],
            DocumentField::Objectives => &["Objectives", "Objective"],
            DocumentField::Budget => &["Budget", "Cost Breakdown"],
            DocumentField::Vendor => &["Vendors", "Vendor"],
            DocumentField::Timeline => &["Timeline", "Schedule"],
            DocumentField::Outcomes => &["Outcomes", "Deliverables"],
        }
    }
}

/// A recognized heading line located in the raw text.
#[derive(Debug, Clone, Copy)]
struct HeadingHit {
    field: DocumentField,
    /// Index into the field's synonym list that matched.
    synonym_rank: usize,
    /// Byte offset of the heading line.
    line_start: usize,
    /// Byte offset where the section body begins (the remainder of the
    /// heading line after its separator, or the next line).
    body_start: usize,
}

/// Pattern-match labeled sections in already-extracted document text.
///
/// For each canonical field the heading synonyms are tried in order; the
/// value is the trimmed text between the matched heading and the next
/// recognized heading (of any field) or end of input. Absent fields are
/// omitted. Never fails: empty or unlabeled input yields an empty map.
pub fn extract_fields(text: &str) -> BTreeMap<DocumentField, String> {
    let mut fields = BTreeMap::new();
    if text.trim().is_empty() {
        return fields;
    }

    let hits = scan_headings(text);

    for field in DocumentField::ALL {
        let best = hits
            .iter()
            .filter(|hit| hit.field == field)
            .min_by_key(|hit| (hit.synonym_rank, hit.line_start));
        let Some(hit) = best else { continue };

        let end = hits
            .iter()
            .map(|other| other.line_start)
            .filter(|&offset| offset >= hit.body_start)
            .min()
            .unwrap_or(text.len());

        let value = text[hit.body_start..end].trim();
        if !value.is_empty() {
            fields.insert(field, value.to_string());
        }
    }

    fields
}

/// Walk the text line by line collecting every recognized heading.
fn scan_headings(text: &str) -> Vec<HeadingHit> {
    let mut hits = Vec::new();
    let mut line_start = 0;

    for line in text.split_inclusive('\n') {
        let line_end = line_start + line.len();
        let trimmed_line = line.trim_end_matches(['\n', '\r']);

        'fields: for field in DocumentField::ALL {
            for (rank, synonym) in field.synonyms().iter().enumerate() {
                if let Some(body_offset) = heading_body_offset(trimmed_line, synonym) {
                    let body_start = if body_offset < trimmed_line.len() {
                        line_start + body_offset
                    } else {
                        line_end
                    };
                    hits.push(HeadingHit {
                        field,
                        synonym_rank: rank,
                        line_start,
                        body_start,
                    });
                    break 'fields;
                }
            }
        }

        line_start = line_end;
    }

    hits
}

/// If `line` starts with `synonym` as a heading (ASCII case-insensitive,
/// followed by an optional `:` or `-` separator), return the byte offset
/// within the line where the inline body begins.
fn heading_body_offset(line: &str, synonym: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let pattern = synonym.as_bytes();
    if bytes.len() < pattern.len() || !bytes[..pattern.len()].eq_ignore_ascii_case(pattern) {
        return None;
    }

    let mut offset = pattern.len();
    // The synonym must end at a word boundary ("Objectively" is prose, not
    // a heading).
    if let Some(&next) = bytes.get(offset) {
        if next.is_ascii_alphanumeric() {
            return None;
        }
    }

    while bytes.get(offset) == Some(&b' ') || bytes.get(offset) == Some(&b'\t') {
        offset += 1;
    }
    if bytes.get(offset) == Some(&b':') || bytes.get(offset) == Some(&b'-') {
        offset += 1;
    }
    while bytes.get(offset) == Some(&b' ') || bytes.get(offset) == Some(&b'\t') {
        offset += 1;
    }

    Some(offset)
}

/// Remove `Page N` artifacts that PDF text extraction leaves behind.
pub fn strip_page_markers(text: &str) -> String {
    static PAGE_MARKER: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PAGE_MARKER.get_or_init(|| Regex::new(r"Page\s*\d+").expect("page marker pattern is valid"));
    pattern.replace_all(text, "").into_owned()
}

/// Prefill hints recovered from free document text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileHints {
    pub uen: Option<String>,
    pub sector: Option<String>,
}

/// Pull a UEN and a coarse sector guess out of document text, e.g. an
/// ACRA BizFile extract.
pub fn profile_hints(text: &str) -> ProfileHints {
    static UEN: OnceLock<Regex> = OnceLock::new();
    let uen_pattern =
        UEN.get_or_init(|| Regex::new(r"\b\d{8}[A-Z]\b").expect("UEN pattern is valid"));

    let uen = uen_pattern
        .find(text)
        .map(|found| found.as_str().to_string());

    let lower = text.to_lowercase();
    let sector = if lower.contains("retail") {
        Some("Retail".to_string())
    } else if lower.contains("education") {
        Some("Education".to_string())
    } else if lower.contains("food and beverage") || lower.contains("f&b") {
        Some("F&B".to_string())
    } else {
        None
    };

    ProfileHints { uen, sector }
}

const GRANT_DOCUMENT_KEYWORDS: &[&str] = &[
    "grant",
    "funding",
    "application",
    "proposal",
    "budget",
    "timeline",
    "objectives",
    "vendor",
    "kpi",
];

/// Heuristic filter: a document that mentions fewer than three of the
/// usual grant-application terms is probably something else entirely.
pub fn looks_like_grant_application(text: &str) -> bool {
    let lower = text.to_lowercase();
    GRANT_DOCUMENT_KEYWORDS
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .count()
        >= 3
}
