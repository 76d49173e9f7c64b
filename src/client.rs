use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{COOKIE, SET_COOKIE};
use tracing::debug;

const LOGIN_PATH: &str = "/login.php";

// The site rejects unknown clients, so present a current browser.
pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139 Safari/537.36";

/// HTTP client for the session-guarded part of the site.
pub struct SessionClient {
    http: reqwest::Client,
    base_url: String,
}

/// Proof of authentication, carried as a `Cookie` header on every
/// request made after login.
#[derive(Debug)]
pub struct Session {
    cookie: String,
}

impl SessionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        // Redirects are never followed: the login response itself carries
        // the session cookies, whatever its status code.
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Log in with the fixed form the login endpoint expects.
    ///
    /// The endpoint does not signal failure through the status code; the
    /// only success indicator is that it sets session cookies. Their
    /// name=value pairs, joined with `"; "`, become the session token.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, LOGIN_PATH))
            .form(&[
                ("login", "2"),
                ("uid", username),
                ("hes", password),
                ("x", "10"),
                ("y", "10"),
            ])
            .send()
            .await
            .context("Login request failed")?;

        let cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .map(|pair| pair.trim().to_string())
            .collect();

        if cookies.is_empty() {
            anyhow::bail!("Login failed: no session cookies received");
        }

        debug!(count = cookies.len(), "Session cookies received");
        Ok(Session {
            cookie: cookies.join("; "),
        })
    }

    /// GET a path under the base URL with the session attached, returning
    /// the raw body bytes. Non-2xx responses are errors.
    pub async fn get_bytes(&self, session: &Session, path_and_query: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let response = self
            .http
            .get(&url)
            .header(COOKIE, &session.cookie)
            .send()
            .await
            .with_context(|| format!("Request failed: {url}"))?
            .error_for_status()
            .with_context(|| format!("Request rejected: {url}"))?;
        Ok(response.bytes().await?.to_vec())
    }
}
