//! Reference data: the location/language catalog, fetched once per session.

use std::sync::atomic::{AtomicBool, Ordering};

use devseo_core::{LanguageOption, LocationLanguage};
use serde::Serialize;
use tokio::sync::watch;

use crate::source::CatalogSource;
use crate::store::Store;

const DEFAULT_LOCATION: &str = "united states";
const DEFAULT_LANGUAGE: &str = "english";

/// Snapshot of the catalog as seen by subscribers.
///
/// A failed fetch leaves `data` empty and sets `error`; consumers treat an
/// empty catalog the same way whatever the cause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogState {
    pub data: Vec<LocationLanguage>,
    pub is_loading: bool,
    pub is_initialized: bool,
    pub error: Option<String>,
}

impl CatalogState {
    /// Loaded with at least one entry and not currently loading.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.is_loading && !self.data.is_empty()
    }

    /// Exact-name lookup.
    #[must_use]
    pub fn find_location(&self, location_name: &str) -> Option<&LocationLanguage> {
        self.data
            .iter()
            .find(|loc| loc.location_name == location_name)
    }

    /// Languages offered for `location_name`; empty when the location is unknown.
    #[must_use]
    pub fn languages_for(&self, location_name: &str) -> &[LanguageOption] {
        self.find_location(location_name)
            .map(|loc| loc.available_languages.as_slice())
            .unwrap_or_default()
    }

    /// Locations a user can actually pick (those offering a language).
    pub fn selectable_locations(&self) -> impl Iterator<Item = &LocationLanguage> {
        self.data.iter().filter(|loc| loc.is_selectable())
    }

    /// The "United States" entry, matched case-insensitively.
    #[must_use]
    pub fn default_location(&self) -> Option<&LocationLanguage> {
        self.selectable_locations()
            .find(|loc| loc.location_name.eq_ignore_ascii_case(DEFAULT_LOCATION))
    }
}

/// "English" within `location`, matched case-insensitively.
#[must_use]
pub fn default_language(location: &LocationLanguage) -> Option<&LanguageOption> {
    location
        .available_languages
        .iter()
        .find(|lang| lang.language_name.eq_ignore_ascii_case(DEFAULT_LANGUAGE))
}

/// Owns the catalog for the lifetime of the process.
#[derive(Debug, Default)]
pub struct ReferenceDataStore {
    state: Store<CatalogState>,
    started: AtomicBool,
}

impl ReferenceDataStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the catalog once. Later calls, including after a failure, are
    /// no-ops; a failure is recorded in [`CatalogState::error`].
    pub async fn initialize(&self, source: &dyn CatalogSource) {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::debug!("catalog already initialized, skipping fetch");
            return;
        }

        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match source.fetch_catalog().await {
            Ok(data) => {
                tracing::info!(locations = data.len(), "catalog loaded");
                self.state.set(CatalogState {
                    data,
                    is_loading: false,
                    is_initialized: true,
                    error: None,
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "catalog fetch failed");
                self.state.set(CatalogState {
                    data: Vec::new(),
                    is_loading: false,
                    is_initialized: true,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    /// Seeds the catalog with data obtained elsewhere. Ignored once the store
    /// has been initialized or hydrated.
    pub fn hydrate(&self, data: Vec<LocationLanguage>) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        self.state.set(CatalogState {
            data,
            is_loading: false,
            is_initialized: true,
            error: None,
        });
    }

    /// Back to the empty, uninitialized state; the next `initialize` fetches again.
    pub fn reset(&self) {
        self.state.set(CatalogState::default());
        self.started.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn snapshot(&self) -> CatalogState {
        self.state.get()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
