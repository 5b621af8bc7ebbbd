//! Airtable REST client for the nutrition dashboard.
//!
//! Fetches food log records from the Airtable API:
//! - Paginated record listing for a base/table pair
//! - Bearer-token auth with key validation and redacted debug output

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";
const PAGE_SIZE: u32 = 100;

/// Airtable client errors.
#[derive(Debug, Error)]
pub enum AirtableError {
    /// The provided API key was invalid.
    #[error("invalid API key: {reason}")]
    InvalidApiKey { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// API returned an error response.
    #[error("API error: {message}")]
    Api { message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Airtable API client.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
pub struct Client {
    http: reqwest::Client,
    api_key: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client with the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or whitespace-only, or if
    /// the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AirtableError> {
        let api_key = api_key.into();

        // Validate API key
        if api_key.is_empty() {
            return Err(AirtableError::InvalidApiKey {
                reason: "API key cannot be empty",
            });
        }
        if api_key.trim().is_empty() {
            return Err(AirtableError::InvalidApiKey {
                reason: "API key cannot be whitespace-only",
            });
        }

        // Build HTTP client with timeout
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(AirtableError::ClientBuild)?;

        Ok(Self { http, api_key })
    }

    /// Lists every record in the given base and table, following pagination
    /// until the API stops returning an offset token.
    ///
    /// # Errors
    ///
    /// Returns an error if a request fails, the API rejects the call, or a
    /// page cannot be decoded.
    pub async fn list_records(
        &self,
        base_id: &str,
        table: &str,
    ) -> Result<Vec<Record>, AirtableError> {
        // Table names may contain spaces; the URL parser percent-encodes them.
        let url = format!("{AIRTABLE_API_URL}/{base_id}/{table}");
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(&url)
                .bearer_auth(&self.api_key)
                .query(&[("pageSize", PAGE_SIZE)]);
            if let Some(token) = &offset {
                request = request.query(&[("offset", token.as_str())]);
            }

            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(parse_api_error(&body).unwrap_or_else(|| AirtableError::Api {
                    message: format!("status {status}: {body}"),
                }));
            }

            let page: RecordPage = serde_json::from_str(&body)
                .map_err(|err| AirtableError::InvalidResponse(err.to_string()))?;
            records.extend(page.records);
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(records)
    }
}

/// A single Airtable record with its raw field map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(rename = "createdTime")]
    pub created_time: String,
    #[serde(default)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RecordPage {
    records: Vec<Record>,
    offset: Option<String>,
}

fn parse_api_error(body: &str) -> Option<AirtableError> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        error: ErrorDetails,
    }

    // The API reports errors either as {"error":{"message":"..."}} or as a
    // bare code such as {"error":"NOT_FOUND"}.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ErrorDetails {
        Structured { message: String },
        Code(String),
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| AirtableError::Api {
            message: match payload.error {
                ErrorDetails::Structured { message } => message,
                ErrorDetails::Code(code) => code,
            },
        })
}
