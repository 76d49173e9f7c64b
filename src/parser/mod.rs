pub mod grade;
pub mod title;

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::model::Climb;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").unwrap());
static ROUTE_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"key=(\d+)").unwrap());

/// Visibility column content for a publicly listed ascent.
const PUBLIC_MARKER: &str = "x";

/// Parse one diary table row into a [`Climb`].
///
/// `cells` holds the inner HTML of the row's `<td>` elements, indexed
/// 0..7 as date, route link, area, grade, points, style, attempts,
/// visibility. Rows with fewer than six cells or a first cell that is
/// not a `DD.MM.YYYY` date are not diary entries and yield `None`.
pub fn parse_row(cells: &[String]) -> Option<Climb> {
    if cells.len() < 6 {
        return None;
    }

    let date = cell_text(&cells[0]);
    if !DATE_RE.is_match(&date) {
        return None;
    }

    let route_cell = RouteCell::parse(&cells[1]);
    let route_key = route_cell
        .href
        .as_deref()
        .and_then(|href| ROUTE_KEY_RE.captures(href))
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();
    let annotation = title::parse_title(route_cell.title.as_deref().unwrap_or_default());
    let grade = grade::parse_grade(&cell_text(&cells[3]));

    let attempts = cells
        .get(6)
        .map(|c| cell_text(c))
        .and_then(|t| t.parse::<u32>().ok());
    let public = cells
        .get(7)
        .map(|c| cell_text(c).eq_ignore_ascii_case(PUBLIC_MARKER))
        .unwrap_or(false);

    Some(Climb {
        date,
        route: route_cell.text,
        area: cell_text(&cells[2]),
        origin_grade: grade.origin,
        suggested_grade: grade.suggested,
        points: cell_text(&cells[4]),
        style: cell_text(&cells[5]),
        route_key,
        partners: annotation.partners,
        note: annotation.note,
        attempts,
        public,
        sector: None,
        location: None,
    })
}

/// Text content plus the first anchor's href/title from the route cell.
struct RouteCell {
    text: String,
    href: Option<String>,
    title: Option<String>,
}

impl RouteCell {
    fn parse(cell: &str) -> Self {
        let fragment = Html::parse_fragment(cell);
        let anchor_sel = Selector::parse("a").unwrap();
        let anchor = fragment.select(&anchor_sel).next();
        Self {
            text: collect_text(&fragment),
            href: anchor.and_then(|a| a.value().attr("href")).map(str::to_string),
            title: anchor.and_then(|a| a.value().attr("title")).map(str::to_string),
        }
    }
}

/// Trimmed text content of one cell's inner HTML.
fn cell_text(cell: &str) -> String {
    collect_text(&Html::parse_fragment(cell))
}

fn collect_text(fragment: &Html) -> String {
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|c| c.to_string()).collect()
    }

    fn full_row() -> Vec<String> {
        cells(&[
            "01.01.2024",
            "<a href='cesta.php?key=42' title='Alice - nice climb'>My Route</a>",
            "MyArea",
            "6a [6a+]",
            "10",
            "lead",
            "2",
            "x",
        ])
    }

    #[test]
    fn full_row_extracts_every_field() {
        let climb = parse_row(&full_row()).unwrap();
        assert_eq!(climb.date, "01.01.2024");
        assert_eq!(climb.route, "My Route");
        assert_eq!(climb.area, "MyArea");
        assert_eq!(climb.origin_grade, "6a+");
        assert_eq!(climb.suggested_grade.as_deref(), Some("6a"));
        assert_eq!(climb.points, "10");
        assert_eq!(climb.style, "lead");
        assert_eq!(climb.route_key, "42");
        assert_eq!(climb.partners.as_deref(), Some("Alice"));
        assert_eq!(climb.note.as_deref(), Some("nice climb"));
        assert_eq!(climb.attempts, Some(2));
        assert!(climb.public);
        assert!(climb.sector.is_none());
        assert!(climb.location.is_none());
    }

    #[test]
    fn too_few_cells() {
        assert!(parse_row(&cells(&["01.01.2024", "a", "b", "c", "d"])).is_none());
    }

    #[test]
    fn header_row_is_not_a_date() {
        let row = cells(&["Datum", "Cesta", "Oblast", "Klas.", "Body", "Styl"]);
        assert!(parse_row(&row).is_none());
    }

    #[test]
    fn six_cells_leave_attempts_and_public_unset() {
        let row = cells(&["02.03.2023", "Hrana", "Ostaš", "VIIa", "5", "TR"]);
        let climb = parse_row(&row).unwrap();
        assert_eq!(climb.route, "Hrana");
        assert_eq!(climb.origin_grade, "VIIa");
        assert!(climb.attempts.is_none());
        assert!(!climb.public);
        assert_eq!(climb.route_key, "");
        assert!(climb.partners.is_none());
    }

    #[test]
    fn non_numeric_attempts_cell_is_ignored() {
        let mut row = full_row();
        row[6] = "-".to_string();
        let climb = parse_row(&row).unwrap();
        assert!(climb.attempts.is_none());
    }

    #[test]
    fn public_marker_is_case_insensitive() {
        let mut row = full_row();
        row[7] = " X ".to_string();
        assert!(parse_row(&row).unwrap().public);
        row[7] = "ne".to_string();
        assert!(!parse_row(&row).unwrap().public);
    }

    #[test]
    fn anchor_without_key_yields_empty_route_key() {
        let mut row = full_row();
        row[1] = "<a href='cesta.php?id=7'>Bez klíče</a>".to_string();
        let climb = parse_row(&row).unwrap();
        assert_eq!(climb.route_key, "");
        assert_eq!(climb.route, "Bez klíče");
    }

    #[test]
    fn untitled_anchor_leaves_annotation_absent() {
        let mut row = full_row();
        row[1] = "<a href='cesta.php?key=9'>Tichá</a>".to_string();
        let climb = parse_row(&row).unwrap();
        assert!(climb.partners.is_none());
        assert!(climb.note.is_none());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let row = cells(&[
            "  05.06.2022  ",
            "  Kout  ",
            "  Drábské světničky ",
            " VI ",
            " 3 ",
            " RP ",
        ]);
        let climb = parse_row(&row).unwrap();
        assert_eq!(climb.date, "05.06.2022");
        assert_eq!(climb.route, "Kout");
        assert_eq!(climb.area, "Drábské světničky");
        assert_eq!(climb.style, "RP");
    }

    #[test]
    fn idempotent_over_same_cells() {
        let row = full_row();
        assert_eq!(parse_row(&row), parse_row(&row));
    }
}
