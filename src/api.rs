/// Synchronous client for the **REST Countries API (v3.1)**, plus batch enrichment.
///
/// Only the `alpha/{code}` endpoint is used. From the returned record set the first
/// record is taken and its capital list and flag URLs are read; see
/// [`models::CountryRecord`](crate::models::CountryRecord).
///
/// ### Notes
/// - No retries. A failed request fails the whole batch it belongs to.
/// - Network timeouts use a sane default (30s) and can be adjusted by editing the client builder.
///
/// Typical usage:
/// ```no_run
/// # use continent_explorer::{Client, Dataset};
/// # use continent_explorer::selection::select_continent;
/// let data = Dataset::bundled()?;
/// let picked = select_continent(&data, "OC");
/// let enriched = continent_explorer::api::enrich_batch(&Client::default(), &picked.countries)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
use crate::models::{Country, CountryRecord, EnrichedCountry};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::Deserialize;
use std::thread;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Why a single lookup, and therefore its batch, failed.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("GET {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("lookup for {code} returned HTTP {status}")]
    Status { code: String, status: StatusCode },

    #[error("could not decode record for {code}: {source}")]
    Decode {
        code: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("no record returned for {code}")]
    NoRecord { code: String },

    #[error("lookup worker for {code} panicked")]
    WorkerPanicked { code: String },

    #[error("could not build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Source of per-country capital and flag records.
pub trait CountryLookup {
    fn lookup(&self, code: &str) -> Result<CountryRecord, EnrichError>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL).expect("reqwest client build")
    }
}

// Allow -, _, . unescaped in codes
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// The service answers with an array, but a bare object is accepted as well.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<CountryRecord>),
    One(CountryRecord),
}

impl Client {
    /// Client against another deployment of the API (mirrors, local test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, EnrichError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("continent-explorer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(EnrichError::Build)?;
        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn lookup_url(&self, code: &str) -> String {
        format!(
            "{}/alpha/{}",
            self.base_url,
            percent_encoding::utf8_percent_encode(code.trim(), SAFE)
        )
    }
}

impl CountryLookup for Client {
    fn lookup(&self, code: &str) -> Result<CountryRecord, EnrichError> {
        let url = self.lookup_url(code);
        log::debug!("GET {}", url);
        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|source| EnrichError::Http {
                url: url.clone(),
                source,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(EnrichError::Status {
                code: code.to_string(),
                status,
            });
        }
        let body: OneOrMany = resp.json().map_err(|source| EnrichError::Decode {
            code: code.to_string(),
            source,
        })?;
        first_record(code, body)
    }
}

fn first_record(code: &str, body: OneOrMany) -> Result<CountryRecord, EnrichError> {
    match body {
        OneOrMany::One(rec) => Ok(rec),
        OneOrMany::Many(recs) => recs.into_iter().next().ok_or_else(|| EnrichError::NoRecord {
            code: code.to_string(),
        }),
    }
}

/// Parse a raw `/alpha/{code}` response body and take its first record.
pub fn parse_lookup_body(code: &str, body: &str) -> Result<CountryRecord, serde_json::Error> {
    let parsed: OneOrMany = serde_json::from_str(body)?;
    first_record(code, parsed).map_err(<serde_json::Error as serde::de::Error>::custom)
}

/// Enrich every country of one selection.
///
/// One lookup per country, all started at once on scoped threads, with no cap.
/// Every lookup runs to completion. If any of them failed the batch fails as a
/// whole and the error of the first failing country (in input order) is returned;
/// lookups that succeeded are dropped. On success the output keeps input order.
pub fn enrich_batch<L>(
    lookup: &L,
    countries: &[Country],
) -> Result<Vec<EnrichedCountry>, EnrichError>
where
    L: CountryLookup + Sync + ?Sized,
{
    thread::scope(|s| {
        let handles: Vec<_> = countries
            .iter()
            .map(|country| {
                let handle = s.spawn(move || {
                    lookup
                        .lookup(&country.code)
                        .map(|rec| EnrichedCountry::from_record(country.clone(), &rec))
                });
                (country, handle)
            })
            .collect();

        let mut out = Vec::with_capacity(handles.len());
        let mut first_err = None;
        for (country, handle) in handles {
            let res = handle.join().unwrap_or_else(|_| {
                Err(EnrichError::WorkerPanicked {
                    code: country.code.clone(),
                })
            });
            match res {
                Ok(enriched) => out.push(enriched),
                Err(e) => {
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(out),
        }
    })
}
