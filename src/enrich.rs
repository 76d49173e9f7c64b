use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use scraper::{Html, Selector};
use tracing::warn;

use crate::client::USER_AGENT;
use crate::decode;
use crate::model::Climb;

const ROUTE_PATH: &str = "/cesta.php";

// Row labels on the route detail page
const SECTOR_LABEL: &str = "Sektor";
const LOCATION_LABEL: &str = "Oblast";

/// Crag metadata lifted from a route detail page. Either field may be
/// missing when the page does not carry the matching row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteInfo {
    pub sector: Option<String>,
    pub location: Option<String>,
}

/// Attempt and delay schedule for the enrichment pass.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Fetch attempts per route before giving up.
    pub max_attempts: u32,
    /// Wait between attempts for the same route.
    pub retry_delay: Duration,
    /// Wait between successive routes, whatever their outcome.
    pub pace_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
            pace_delay: Duration::from_millis(1500),
        }
    }
}

/// Fetches route detail pages and fills in sector/location.
///
/// Holds its own client: the detail pages are public, so no session is
/// attached, and enrichment traffic stays separate from the diary fetch.
pub struct Enricher {
    http: reqwest::Client,
    base_url: String,
    policy: RetryPolicy,
}

impl Enricher {
    pub fn new(base_url: impl Into<String>, policy: RetryPolicy) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            policy,
        })
    }

    /// Fill sector/location on every climb that carries a route key,
    /// strictly in sequence and paced by the policy's delay. Climbs
    /// without a key are left untouched.
    pub async fn enrich_all(&self, climbs: &mut [Climb]) {
        let keyed = climbs.iter().filter(|c| !c.route_key.is_empty()).count();
        if keyed == 0 {
            return;
        }

        let pb = ProgressBar::new(keyed as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({eta})")
                .unwrap()
                .progress_chars("=> "),
        );

        let mut first = true;
        for climb in climbs.iter_mut().filter(|c| !c.route_key.is_empty()) {
            if !first {
                tokio::time::sleep(self.policy.pace_delay).await;
            }
            first = false;

            let info = self.fetch_route_info(&climb.route_key).await;
            climb.sector = info.sector;
            climb.location = info.location;
            pb.inc(1);
        }

        pb.finish_and_clear();
    }

    /// Fetch crag metadata for one route, retrying failed requests on a
    /// fixed delay. Exhausting every attempt degrades to an empty
    /// result; a missing label on a fetched page is not a failure.
    pub async fn fetch_route_info(&self, key: &str) -> RouteInfo {
        for attempt in 1..=self.policy.max_attempts {
            match self.fetch_once(key).await {
                Ok(info) => return info,
                Err(e) => {
                    warn!(
                        key,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        error = %e,
                        "Route detail fetch failed"
                    );
                    if attempt < self.policy.max_attempts {
                        tokio::time::sleep(self.policy.retry_delay).await;
                    }
                }
            }
        }
        warn!(key, "Leaving sector/location empty for this route");
        RouteInfo::default()
    }

    async fn fetch_once(&self, key: &str) -> Result<RouteInfo> {
        let url = format!("{}{}?key={}", self.base_url, ROUTE_PATH, key);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request failed: {url}"))?
            .error_for_status()
            .with_context(|| format!("Request rejected: {url}"))?;
        let bytes = response.bytes().await?;
        Ok(parse_route_info(&decode::decode_page(&bytes)))
    }
}

/// Scan the detail page for two-cell rows labeled with the sector and
/// location markers. First match per label wins.
fn parse_route_info(html: &str) -> RouteInfo {
    let document = Html::parse_document(html);
    let row_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    let mut info = RouteInfo::default();
    for row in document.select(&row_sel) {
        let cells: Vec<String> = row
            .select(&cell_sel)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();
        let [label, value] = cells.as_slice() else {
            continue;
        };
        if info.sector.is_none() && label.starts_with(SECTOR_LABEL) {
            info.sector = Some(value.clone());
        } else if info.location.is_none() && label.starts_with(LOCATION_LABEL) {
            info.location = Some(value.clone());
        }
    }
    info
}
