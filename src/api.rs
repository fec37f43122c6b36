//! Synchronous client for the **disease.sh COVID-19 API (v3)**.
//!
//! Three endpoints are used: the worldwide aggregate (`/all`), the full country list
//! (`/countries`) and a single country's detail (`/countries/{code}`). Responses are
//! decoded into [`models`](crate::models) types.
//!
//! ### Notes
//! - Every call is a single attempt. Failures are returned to the caller, never retried.
//! - Some countries (cruise ships) come back with `null` ISO codes; they still decode.
//!
//! Typical usage:
//! ```no_run
//! # use covid_viz::Client;
//! let client = Client::default();
//! let world = client.fetch_all()?;
//! let countries = client.fetch_countries()?;
//! let sorted = covid_viz::sort::sort_data(&countries);
//! println!("{}", covid_viz::format::pretty_print_stat(world.cases));
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::models::{CountryInfo, CountryStat, Selection, Snapshot};
use anyhow::{Context, Result, bail};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://disease.sh/v3/covid-19";

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

// Allow -, _, . unescaped in codes
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(part: &str) -> String {
    percent_encoding::utf8_percent_encode(part.trim(), SAFE).to_string()
}

/// What a selection resolves to: the snapshot for the cards and, for a country,
/// its identity block for recentring the map.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedStats {
    pub snapshot: Snapshot,
    pub country_info: Option<CountryInfo>,
}

impl From<CountryStat> for SelectedStats {
    fn from(c: CountryStat) -> Self {
        Self {
            snapshot: c.stats,
            country_info: Some(c.country_info),
        }
    }
}

impl From<Snapshot> for SelectedStats {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            country_info: None,
        }
    }
}

impl Client {
    /// Build a client against another deployment of the API (e.g., a mirror or test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("covid_viz/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {}", url);
        let resp = self.http.get(url).send().context("send request")?;
        let status = resp.status();
        if !status.is_success() {
            // The API answers unknown countries with {"message": "..."}.
            let detail = resp
                .json::<serde_json::Value>()
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned));
            match detail {
                Some(msg) => bail!("request failed with HTTP {}: {}", status, msg),
                None => bail!("request failed with HTTP {}", status),
            }
        }
        resp.json().context("decode json")
    }

    /// Worldwide aggregate snapshot.
    pub fn fetch_all(&self) -> Result<Snapshot> {
        let url = format!("{}/all", self.base_url);
        self.get_json(&url).with_context(|| format!("GET {}", url))
    }

    /// Every country the provider reports on, in the provider's order.
    pub fn fetch_countries(&self) -> Result<Vec<CountryStat>> {
        let url = format!("{}/countries", self.base_url);
        let out: Vec<CountryStat> = self.get_json(&url).with_context(|| format!("GET {}", url))?;
        log::info!("fetched {} countries", out.len());
        Ok(out)
    }

    /// One country's detail by ISO2/ISO3 code (names work too, the API is lenient).
    ///
    /// ### Example
    /// ```no_run
    /// # use covid_viz::Client;
    /// let de = Client::default().fetch_country("DE")?;
    /// println!("{}: {:?}", de.country, de.stats.cases);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn fetch_country(&self, code: &str) -> Result<CountryStat> {
        if code.trim().is_empty() {
            bail!("country code required");
        }
        let url = format!("{}/countries/{}", self.base_url, enc(code));
        self.get_json(&url).with_context(|| format!("GET {}", url))
    }

    /// Resolve a picker selection to the snapshot shown on the cards.
    pub fn fetch_selection(&self, selection: &Selection) -> Result<SelectedStats> {
        match selection {
            Selection::Worldwide => self.fetch_all().map(SelectedStats::from),
            Selection::Country(code) => self.fetch_country(code).map(SelectedStats::from),
        }
    }
}
