//! HTTP client for the `DataForSEO` Labs REST API.
//!
//! Wraps `reqwest` with Basic-token auth and typed response validation. Every
//! endpoint checks the envelope and task `status_code` and surfaces API-level
//! errors as [`DataForSeoError::Api`]; a missing task or result becomes
//! [`DataForSeoError::EmptyResult`].

use std::time::Duration;

use devseo_core::{KeywordPage, KeywordRecord, LocationLanguage};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DataForSeoError;
use crate::normalize::{normalize_keyword, normalize_location, normalize_related};
use crate::types::{
    Envelope, KeywordIdeasBody, KeywordListResult, KeywordSuggestionsBody, RelatedKeywordsBody,
    RelatedKeywordsResult, WireLocation, STATUS_OK,
};

const DEFAULT_BASE_URL: &str = "https://api.dataforseo.com/";
const DEFAULT_USER_AGENT: &str = "devseo/0.1 (keyword-research)";

const LOCATIONS_PATH: &str = "v3/dataforseo_labs/locations_and_languages";
const RELATED_KEYWORDS_PATH: &str = "v3/dataforseo_labs/google/related_keywords/live";
const KEYWORD_SUGGESTIONS_PATH: &str = "v3/dataforseo_labs/google/keyword_suggestions/live";
const KEYWORD_IDEAS_PATH: &str = "v3/dataforseo_labs/google/keyword_ideas/live";

/// Parameters for `related_keywords/live`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedKeywordsQuery {
    pub keyword: String,
    pub location_name: String,
    pub language_name: String,
    pub depth: u8,
    pub limit: u32,
}

/// Parameters for `keyword_suggestions/live`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSuggestionsQuery {
    pub keyword: String,
    pub location_name: String,
    pub language_name: String,
    pub include_serp_info: bool,
    pub include_seed_keyword: bool,
    pub limit: u32,
}

/// Parameters for `keyword_ideas/live`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordIdeasQuery {
    pub keywords: Vec<String>,
    pub location_name: String,
    pub language_name: String,
    pub include_serp_info: bool,
    pub limit: u32,
}

/// Client for the `DataForSEO` Labs API.
///
/// Use [`DataForSeoClient::new`] for production or
/// [`DataForSeoClient::with_base_url`] to point at a mock server in tests.
pub struct DataForSeoClient {
    client: Client,
    auth_token: String,
    base_url: Url,
}

impl DataForSeoClient {
    /// Creates a new client pointed at the production API.
    ///
    /// `auth_token` is the already base64-encoded `login:password` pair.
    ///
    /// # Errors
    ///
    /// Returns [`DataForSeoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(auth_token: &str, timeout_secs: u64) -> Result<Self, DataForSeoError> {
        Self::with_base_url(auth_token, timeout_secs, DEFAULT_USER_AGENT, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`DataForSeoError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`DataForSeoError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        auth_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, DataForSeoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| DataForSeoError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            auth_token: auth_token.to_owned(),
            base_url,
        })
    }

    /// Fetches the full location/language catalog.
    ///
    /// # Errors
    ///
    /// - [`DataForSeoError::Status`] on a non-2xx HTTP status.
    /// - [`DataForSeoError::Api`] if the API reports a failure status code.
    /// - [`DataForSeoError::EmptyResult`] if no task or result came back.
    /// - [`DataForSeoError::Http`] / [`DataForSeoError::Deserialize`] on
    ///   transport or shape errors.
    pub async fn fetch_locations(&self) -> Result<Vec<LocationLanguage>, DataForSeoError> {
        let operation = "locations";
        let url = self.endpoint(LOCATIONS_PATH)?;
        tracing::debug!(operation, "calling DataForSEO");

        let request = self.authorized(self.client.get(url));
        let results: Vec<WireLocation> = Self::send(operation, request).await?;
        Ok(results.into_iter().map(normalize_location).collect())
    }

    /// Looks up keywords related to a seed keyword.
    ///
    /// # Errors
    ///
    /// Same as [`DataForSeoClient::fetch_locations`].
    pub async fn related_keywords(
        &self,
        query: &RelatedKeywordsQuery,
    ) -> Result<KeywordPage, DataForSeoError> {
        let body = RelatedKeywordsBody {
            keyword: &query.keyword,
            location_name: &query.location_name,
            language_name: &query.language_name,
            depth: query.depth,
            limit: query.limit,
        };
        tracing::debug!(
            operation = "related keywords",
            keyword = %query.keyword,
            location = %query.location_name,
            language = %query.language_name,
            depth = query.depth,
            limit = query.limit,
            "calling DataForSEO"
        );

        let results: Vec<RelatedKeywordsResult> = self
            .post("related keywords", RELATED_KEYWORDS_PATH, &body)
            .await?;
        let first = results.into_iter().next().ok_or(DataForSeoError::EmptyResult)?;
        let records = first
            .items
            .unwrap_or_default()
            .into_iter()
            .map(normalize_related)
            .collect();
        Ok(page(first.total_count, records))
    }

    /// Fetches long-tail suggestions containing the seed keyword.
    ///
    /// # Errors
    ///
    /// Same as [`DataForSeoClient::fetch_locations`].
    pub async fn keyword_suggestions(
        &self,
        query: &KeywordSuggestionsQuery,
    ) -> Result<KeywordPage, DataForSeoError> {
        let body = KeywordSuggestionsBody {
            keyword: &query.keyword,
            location_name: &query.location_name,
            language_name: &query.language_name,
            include_serp_info: query.include_serp_info,
            include_seed_keyword: query.include_seed_keyword,
            limit: query.limit,
        };
        tracing::debug!(
            operation = "keyword suggestions",
            keyword = %query.keyword,
            location = %query.location_name,
            language = %query.language_name,
            limit = query.limit,
            "calling DataForSEO"
        );

        let results: Vec<KeywordListResult> = self
            .post("keyword suggestions", KEYWORD_SUGGESTIONS_PATH, &body)
            .await?;
        keyword_list_page(results)
    }

    /// Fetches keyword ideas for a set of seed keywords.
    ///
    /// # Errors
    ///
    /// Same as [`DataForSeoClient::fetch_locations`].
    pub async fn keyword_ideas(
        &self,
        query: &KeywordIdeasQuery,
    ) -> Result<KeywordPage, DataForSeoError> {
        let body = KeywordIdeasBody {
            keywords: &query.keywords,
            location_name: &query.location_name,
            language_name: &query.language_name,
            include_serp_info: query.include_serp_info,
            limit: query.limit,
        };
        tracing::debug!(
            operation = "keyword ideas",
            keywords = %query.keywords.join(","),
            location = %query.location_name,
            language = %query.language_name,
            limit = query.limit,
            "calling DataForSEO"
        );

        let results: Vec<KeywordListResult> = self
            .post("keyword ideas", KEYWORD_IDEAS_PATH, &body)
            .await?;
        keyword_list_page(results)
    }

    fn endpoint(&self, path: &str) -> Result<Url, DataForSeoError> {
        self.base_url
            .join(path)
            .map_err(|e| DataForSeoError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Basic {}", self.auth_token))
            .header(CONTENT_TYPE, "application/json")
    }

    /// POSTs a single-task array body, the shape every Labs endpoint expects.
    async fn post<B, T>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> Result<Vec<T>, DataForSeoError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.authorized(self.client.post(url)).json(&[body]);
        Self::send(operation, request).await
    }

    /// Sends the request and unwraps `tasks[0].result`.
    async fn send<T: DeserializeOwned>(
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Vec<T>, DataForSeoError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(operation, status = status.as_u16(), "DataForSEO HTTP error");
            return Err(DataForSeoError::Status {
                operation,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| DataForSeoError::Deserialize {
                context: operation.to_string(),
                source: e,
            })?;
        if let Err(err) = Self::check_api_error(&value) {
            tracing::warn!(operation, error = %err, "DataForSEO API error");
            return Err(err);
        }

        let envelope: Envelope<T> =
            serde_json::from_value(value).map_err(|e| DataForSeoError::Deserialize {
                context: operation.to_string(),
                source: e,
            })?;

        let task = envelope
            .tasks
            .and_then(|tasks| tasks.into_iter().next())
            .ok_or(DataForSeoError::EmptyResult)?;
        if task.status_code != STATUS_OK {
            return Err(DataForSeoError::Api {
                code: task.status_code,
                message: task.status_message,
            });
        }
        tracing::debug!(operation, task_id = ?task.id, cost = ?task.cost, "DataForSEO task done");

        match task.result {
            Some(results) if !results.is_empty() => Ok(results),
            _ => Err(DataForSeoError::EmptyResult),
        }
    }

    /// Checks the envelope `status_code` before committing to a typed parse.
    fn check_api_error(body: &serde_json::Value) -> Result<(), DataForSeoError> {
        let code = body
            .get("status_code")
            .and_then(serde_json::Value::as_u64)
            .and_then(|c| u32::try_from(c).ok());
        match code {
            Some(STATUS_OK) => Ok(()),
            code => {
                let message = body
                    .get("status_message")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string();
                Err(DataForSeoError::Api {
                    code: code.unwrap_or_default(),
                    message,
                })
            }
        }
    }
}

fn keyword_list_page(results: Vec<KeywordListResult>) -> Result<KeywordPage, DataForSeoError> {
    let first = results.into_iter().next().ok_or(DataForSeoError::EmptyResult)?;
    let records = first
        .items
        .unwrap_or_default()
        .into_iter()
        .map(normalize_keyword)
        .collect();
    Ok(page(first.total_count, records))
}

/// `total_count` falls back to the number of records received.
fn page(total_count: Option<u64>, records: Vec<KeywordRecord>) -> KeywordPage {
    let total_count = total_count.unwrap_or(records.len() as u64);
    KeywordPage {
        records,
        total_count,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
