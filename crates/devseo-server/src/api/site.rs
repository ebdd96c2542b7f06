use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use devseo_core::{sitemap_xml, Locale, SiteConfig, Theme};
use serde::{Deserialize, Serialize};

use crate::middleware::{cookie_value, RequestId, RequestLocale, LOCALE_COOKIE, THEME_COOKIE};

use super::{ApiError, ApiResponse, AppState};

const PREFERENCE_COOKIE_ATTRS: &str = "Path=/; Max-Age=31536000; SameSite=Lax";

#[derive(Debug, Serialize)]
pub(super) struct SiteResponse {
    #[serde(flatten)]
    pub site: SiteConfig,
    pub locale: Locale,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct Preferences {
    pub locale: Locale,
    pub theme: Theme,
}

#[derive(Debug, Deserialize)]
pub(super) struct PreferencesBody {
    pub locale: Option<String>,
    pub theme: Option<String>,
}

pub(super) async fn get_site(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(RequestLocale(locale)): Extension<RequestLocale>,
) -> Json<ApiResponse<SiteResponse>> {
    let data = SiteResponse {
        site: (*state.site).clone(),
        locale,
    };
    ApiResponse::new(data, req_id.0)
}

pub(super) async fn sitemap(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Response, ApiError> {
    let xml = sitemap_xml(&state.site, Utc::now().date_naive()).map_err(|e| {
        tracing::error!(error = %e, "failed to render sitemap");
        ApiError::new(req_id.0, "internal_error", "failed to render sitemap")
    })?;

    Ok((
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/xml; charset=utf-8"),
        )],
        xml,
    )
        .into_response())
}

pub(super) async fn get_preferences(
    Extension(req_id): Extension<RequestId>,
    Extension(RequestLocale(locale)): Extension<RequestLocale>,
    headers: HeaderMap,
) -> Json<ApiResponse<Preferences>> {
    let theme = cookie_value(&headers, THEME_COOKIE)
        .and_then(|raw| raw.parse::<Theme>().ok())
        .unwrap_or_default();
    ApiResponse::new(Preferences { locale, theme }, req_id.0)
}

/// Validates the submitted preferences and persists them as cookies.
/// Omitted fields keep their current value.
pub(super) async fn put_preferences(
    Extension(req_id): Extension<RequestId>,
    Extension(RequestLocale(current_locale)): Extension<RequestLocale>,
    headers: HeaderMap,
    Json(body): Json<PreferencesBody>,
) -> Result<Response, ApiError> {
    let locale = match body.locale.as_deref() {
        Some(raw) => raw
            .parse::<Locale>()
            .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?,
        None => current_locale,
    };
    let theme = match body.theme.as_deref() {
        Some(raw) => raw
            .parse::<Theme>()
            .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?,
        None => cookie_value(&headers, THEME_COOKIE)
            .and_then(|raw| raw.parse::<Theme>().ok())
            .unwrap_or_default(),
    };

    let mut response = (
        StatusCode::OK,
        ApiResponse::new(Preferences { locale, theme }, req_id.0.clone()),
    )
        .into_response();

    for cookie in [
        format!("{LOCALE_COOKIE}={locale}; {PREFERENCE_COOKIE_ATTRS}"),
        format!("{THEME_COOKIE}={theme}; {PREFERENCE_COOKIE_ATTRS}"),
    ] {
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| ApiError::new(req_id.0.clone(), "internal_error", e.to_string()))?;
        response.headers_mut().append(header::SET_COOKIE, value);
    }

    tracing::debug!(%locale, %theme, "preferences updated");
    Ok(response)
}
