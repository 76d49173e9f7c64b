#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleParts {
    pub partners: Option<String>,
    pub note: Option<String>,
}

/// Split the route link's `title` annotation into partners and note.
///
/// The separator is the literal `" - "`. Only the first two segments are
/// kept; anything after a second separator is dropped, matching how the
/// site's own pages have always been read.
pub fn parse_title(raw: &str) -> TitleParts {
    if raw.is_empty() {
        return TitleParts::default();
    }
    let mut segments = raw.split(" - ");
    TitleParts {
        partners: segments.next().map(|s| s.trim().to_string()),
        note: segments.next().map(|s| s.trim().to_string()),
    }
}
