use std::sync::LazyLock;

use regex::Regex;

// "7- [VIIa]" style: the member's suggestion first, the listed grade in brackets
static COMPOSITE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\[(.+?)\]$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub origin: String,
    pub suggested: Option<String>,
}

/// Split a composite grade cell into the listed grade and the suggested one.
///
/// Cells without the bracketed suffix carry the whole text as the origin
/// grade, verbatim. Every input is accepted.
pub fn parse_grade(raw: &str) -> Grade {
    match COMPOSITE_RE.captures(raw) {
        Some(caps) => Grade {
            origin: caps[2].trim().to_string(),
            suggested: Some(caps[1].trim().to_string()),
        },
        None => Grade {
            origin: raw.to_string(),
            suggested: None,
        },
    }
}
