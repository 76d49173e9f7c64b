use anyhow::{Context, Result};
use scraper::{Html, Selector};
use tracing::info;

use crate::client::{Session, SessionClient};
use crate::decode;
use crate::model::Climb;
use crate::parser;

// Year 9997 with all categories selects the whole diary in one page;
// the endpoint has no pagination.
const DIARY_PATH: &str = "/denik.php?crok=9997&par=1&ckat=1";

/// Fetch the diary listing and parse every table row into a [`Climb`].
pub async fn fetch_diary(client: &SessionClient, session: &Session) -> Result<Vec<Climb>> {
    let bytes = client
        .get_bytes(session, DIARY_PATH)
        .await
        .context("Failed to fetch the diary listing")?;
    let html = decode::decode_page(&bytes);
    let climbs = parse_listing(&html);
    info!(count = climbs.len(), "Parsed diary entries");
    Ok(climbs)
}

/// Run every `table tr` of the decoded listing through the row parser,
/// keeping matches in document order.
pub fn parse_listing(html: &str) -> Vec<Climb> {
    let document = Html::parse_document(html);
    let row_sel = Selector::parse("table tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    document
        .select(&row_sel)
        .filter_map(|row| {
            let cells: Vec<String> = row.select(&cell_sel).map(|td| td.inner_html()).collect();
            parser::parse_row(&cells)
        })
        .collect()
}
