//! Runs a search request against the upstream API and tracks its outcome.

use std::sync::atomic::{AtomicU64, Ordering};

use devseo_core::{KeywordPage, KeywordRecord};
use devseo_dataforseo::{
    DataForSeoError, KeywordIdeasQuery, KeywordSuggestionsQuery, RelatedKeywordsQuery,
};
use serde::Serialize;
use tokio::sync::watch;

use crate::catalog::CatalogState;
use crate::form::{QueryParams, QueryRequest};
use crate::source::KeywordSource;
use crate::store::Store;

/// Lifecycle of one search. Exactly one variant is active; entering
/// `Loading` drops any previous payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum QueryOutcome {
    #[default]
    Idle,
    Loading,
    Success {
        records: Vec<KeywordRecord>,
        total_count: u64,
    },
    Failure {
        message: String,
    },
}

impl QueryOutcome {
    fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    fn from_result(result: Result<KeywordPage, DataForSeoError>) -> Self {
        match result {
            Ok(page) => Self::Success {
                records: page.records,
                total_count: page.total_count,
            },
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

/// Owns the outcome of one search form.
///
/// Overlapping submits are resolved by generation: every submit takes a
/// ticket and only the most recent ticket may publish its outcome.
#[derive(Debug, Default)]
pub struct QueryExecutor {
    outcome: Store<QueryOutcome>,
    generation: AtomicU64,
}

impl QueryExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn outcome(&self) -> QueryOutcome {
        self.outcome.get()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryOutcome> {
        self.outcome.subscribe()
    }

    /// Back to `Idle`; any in-flight response is discarded.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.outcome.set(QueryOutcome::Idle);
    }

    /// Validates `request` against `catalog`, performs one upstream call and
    /// returns the outcome of this request.
    ///
    /// Validation failures never reach the network. Upstream errors become
    /// [`QueryOutcome::Failure`]. The shared outcome is only updated if no
    /// newer submit started meanwhile.
    pub async fn submit(
        &self,
        catalog: &CatalogState,
        source: &dyn KeywordSource,
        request: QueryRequest,
    ) -> QueryOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Err(message) = validate(catalog, &request) {
            tracing::debug!(kind = %request.kind(), %message, "search rejected");
            let outcome = QueryOutcome::failure(message);
            self.publish(ticket, &outcome);
            return outcome;
        }

        self.publish(ticket, &QueryOutcome::Loading);
        tracing::info!(
            kind = %request.kind(),
            location = %request.location,
            language = %request.language,
            "running keyword search"
        );

        let outcome = QueryOutcome::from_result(call(source, &request).await);
        if let QueryOutcome::Failure { message } = &outcome {
            tracing::warn!(kind = %request.kind(), %message, "keyword search failed");
        }
        self.publish(ticket, &outcome);
        outcome
    }

    fn publish(&self, ticket: u64, outcome: &QueryOutcome) {
        let current = self.generation.load(Ordering::SeqCst);
        if current == ticket {
            self.outcome.set(outcome.clone());
        } else {
            tracing::debug!(ticket, current, "dropping stale search outcome");
        }
    }
}

/// Required fields first, then the location/language pair against the catalog.
fn validate(catalog: &CatalogState, request: &QueryRequest) -> Result<(), String> {
    let has_keywords = match &request.params {
        QueryParams::Related { keyword, .. } | QueryParams::Suggestions { keyword, .. } => {
            !keyword.trim().is_empty()
        }
        QueryParams::Ideas { keywords, .. } => keywords.iter().any(|k| !k.trim().is_empty()),
    };
    if !has_keywords || request.location.is_empty() || request.language.is_empty() {
        return Err(QueryRequest::missing_fields_message(request.kind()).to_string());
    }

    let location = catalog
        .find_location(&request.location)
        .ok_or_else(|| format!("Invalid location selection: {}", request.location))?;
    if !location.offers_language(&request.language) {
        return Err(format!(
            "Invalid language selection for location {}: {}",
            request.location, request.language
        ));
    }
    Ok(())
}

async fn call(
    source: &dyn KeywordSource,
    request: &QueryRequest,
) -> Result<KeywordPage, DataForSeoError> {
    let location_name = request.location.clone();
    let language_name = request.language.clone();

    match &request.params {
        QueryParams::Related {
            keyword,
            depth,
            limit,
        } => {
            source
                .related_keywords(&RelatedKeywordsQuery {
                    keyword: keyword.trim().to_string(),
                    location_name,
                    language_name,
                    depth: depth.get(),
                    limit: limit.get(),
                })
                .await
        }
        QueryParams::Suggestions {
            keyword,
            include_serp_info,
            include_seed_keyword,
            limit,
        } => {
            source
                .keyword_suggestions(&KeywordSuggestionsQuery {
                    keyword: keyword.trim().to_string(),
                    location_name,
                    language_name,
                    include_serp_info: *include_serp_info,
                    include_seed_keyword: *include_seed_keyword,
                    limit: limit.get(),
                })
                .await
        }
        QueryParams::Ideas {
            keywords,
            include_serp_info,
            limit,
        } => {
            source
                .keyword_ideas(&KeywordIdeasQuery {
                    keywords: keywords
                        .iter()
                        .map(|k| k.trim())
                        .filter(|k| !k.is_empty())
                        .map(str::to_string)
                        .collect(),
                    location_name,
                    language_name,
                    include_serp_info: *include_serp_info,
                    limit: limit.get(),
                })
                .await
        }
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
