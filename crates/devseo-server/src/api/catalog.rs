use axum::{
    extract::{Query, State},
    Extension, Json,
};
use devseo_core::{LanguageOption, LocationLanguage};
use devseo_research::default_language;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct CatalogResponse {
    pub locations: Vec<LocationLanguage>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub default_location: Option<String>,
    pub default_language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LanguagesQuery {
    pub location: String,
}

/// Selectable locations plus the form defaults.
pub(super) async fn get_catalog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<CatalogResponse>> {
    let catalog = state.catalog.snapshot();
    let default = catalog.default_location();

    let data = CatalogResponse {
        default_location: default.map(|loc| loc.location_name.clone()),
        default_language: default
            .and_then(default_language)
            .map(|lang| lang.language_name.clone()),
        locations: catalog.selectable_locations().cloned().collect(),
        is_loading: catalog.is_loading,
        error: catalog.error.clone(),
    };

    ApiResponse::new(data, req_id.0)
}

pub(super) async fn list_languages(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<LanguagesQuery>,
) -> Result<Json<ApiResponse<Vec<LanguageOption>>>, ApiError> {
    let catalog = state.catalog.snapshot();
    let Some(location) = catalog.find_location(&query.location) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("unknown location \"{}\"", query.location),
        ));
    };

    let languages = location.available_languages.clone();
    Ok(ApiResponse::new(languages, req_id.0))
}
