use serde::Serialize;

/// One ascent log entry from the diary listing.
///
/// Built in full by the row parser; `sector`/`location` stay empty until
/// the optional enrichment pass fills them from the route detail page.
/// Optional fields are omitted from the JSON output when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Climb {
    pub date: String,
    pub route: String,
    pub area: String,
    pub origin_grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_grade: Option<String>,
    pub points: String,
    pub style: String,
    /// `key` query parameter of the route link; empty when the row has none.
    pub route_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partners: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,
    pub public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}
