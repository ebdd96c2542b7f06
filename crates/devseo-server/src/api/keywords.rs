//! Keyword search handlers: JSON result view and CSV export.

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use devseo_core::{KeywordRecord, QueryKind};
use devseo_research::{
    export_csv, export_file_name, FormError, QueryExecutor, QueryForm, QueryOutcome,
    QueryRequest, ResultView, SearchInput, CSV_CONTENT_TYPE,
};
use serde::Serialize;

use crate::middleware::{RequestId, RequestLocale};

use super::{ApiError, ApiResponse, AppState};

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(super) struct SearchResponse {
    pub kind: QueryKind,
    pub request: QueryRequest,
    pub view: ResultView,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(RequestLocale(locale)): Extension<RequestLocale>,
    Path(kind): Path<String>,
    Json(body): Json<SearchInput>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let (kind, request, records, total_count) =
        run_search(&state, &req_id.0, &kind, body).await?;

    let outcome = QueryOutcome::Success {
        records,
        total_count,
    };
    let data = SearchResponse {
        kind,
        view: ResultView::from_outcome(kind, &outcome, locale),
        request,
    };
    Ok(ApiResponse::new(data, req_id.0))
}

pub(super) async fn export(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(kind): Path<String>,
    Json(body): Json<SearchInput>,
) -> Result<Response, ApiError> {
    let (kind, _, records, _) = run_search(&state, &req_id.0, &kind, body).await?;
    if records.is_empty() {
        return Err(ApiError::new(req_id.0, "not_found", "no results to export"));
    }

    let file_name = export_file_name(kind, Utc::now().date_naive());
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .map_err(|e| ApiError::new(req_id.0.clone(), "internal_error", e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(CSV_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export_csv(kind, &records),
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Form, then executor. Only a successful outcome returns `Ok`.
async fn run_search(
    state: &AppState,
    req_id: &str,
    kind: &str,
    body: SearchInput,
) -> Result<(QueryKind, QueryRequest, Vec<KeywordRecord>, u64), ApiError> {
    let kind: QueryKind = kind
        .parse()
        .map_err(|e: String| ApiError::new(req_id, "not_found", e))?;

    let catalog = state.catalog.snapshot();
    if !catalog.is_ready() {
        return Err(form_error(req_id, &FormError::CatalogNotReady));
    }
    let request = QueryForm::from_input(kind, &catalog, &body)
        .and_then(|form| form.submit(&catalog))
        .map_err(|e| form_error(req_id, &e))?;

    let executor = QueryExecutor::new();
    let outcome = executor
        .submit(&catalog, state.source.as_ref(), request.clone())
        .await;

    match outcome {
        QueryOutcome::Success {
            records,
            total_count,
        } => Ok((kind, request, records, total_count)),
        QueryOutcome::Failure { message } => Err(ApiError::new(req_id, "upstream_error", message)),
        QueryOutcome::Idle | QueryOutcome::Loading => Err(ApiError::new(
            req_id,
            "internal_error",
            "search did not complete",
        )),
    }
}

fn form_error(req_id: &str, error: &FormError) -> ApiError {
    match error {
        FormError::CatalogNotReady => {
            ApiError::new(req_id, "catalog_unavailable", error.to_string())
        }
        _ => ApiError::new(req_id, "validation_error", error.to_string()),
    }
}
