//! Fixtures and fake sources shared by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use devseo_core::{KeywordPage, KeywordRecord, LanguageOption, LocationLanguage};
use devseo_dataforseo::{
    DataForSeoError, KeywordIdeasQuery, KeywordSuggestionsQuery, RelatedKeywordsQuery,
};

use crate::catalog::CatalogState;
use crate::source::{CatalogSource, KeywordSource};

pub fn location(name: &str, languages: &[&str]) -> LocationLanguage {
    LocationLanguage {
        location_name: name.to_string(),
        country_code: name[..2].to_uppercase(),
        location_type: "Country".to_string(),
        available_languages: languages
            .iter()
            .map(|lang| LanguageOption {
                language_name: (*lang).to_string(),
                language_code: lang[..2].to_lowercase(),
            })
            .collect(),
    }
}

pub fn catalog() -> Vec<LocationLanguage> {
    vec![
        location("Germany", &["German"]),
        location("United States", &["English", "Spanish"]),
        location("Antarctica", &[]),
    ]
}

pub fn ready_catalog() -> CatalogState {
    CatalogState {
        data: catalog(),
        is_loading: false,
        is_initialized: true,
        error: None,
    }
}

pub fn page(keywords: &[&str]) -> KeywordPage {
    KeywordPage {
        records: keywords.iter().map(|k| KeywordRecord::bare(*k)).collect(),
        total_count: keywords.len() as u64,
    }
}

/// What a fake source answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Page(KeywordPage),
    Api(u32, String),
    Empty,
}

impl Reply {
    fn into_result(self) -> Result<KeywordPage, DataForSeoError> {
        match self {
            Self::Page(page) => Ok(page),
            Self::Api(code, message) => Err(DataForSeoError::Api { code, message }),
            Self::Empty => Err(DataForSeoError::EmptyResult),
        }
    }
}

/// Call recorded by [`FakeKeywords`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Related(RelatedKeywordsQuery),
    Suggestions(KeywordSuggestionsQuery),
    Ideas(KeywordIdeasQuery),
}

/// Answers every call with the same reply and records what was asked.
pub struct FakeKeywords {
    reply: Reply,
    calls: Mutex<Vec<Call>>,
}

impl FakeKeywords {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: Call) -> Result<KeywordPage, DataForSeoError> {
        self.calls.lock().expect("calls lock").push(call);
        self.reply.clone().into_result()
    }
}

#[async_trait]
impl KeywordSource for FakeKeywords {
    async fn related_keywords(
        &self,
        query: &RelatedKeywordsQuery,
    ) -> Result<KeywordPage, DataForSeoError> {
        self.record(Call::Related(query.clone()))
    }

    async fn keyword_suggestions(
        &self,
        query: &KeywordSuggestionsQuery,
    ) -> Result<KeywordPage, DataForSeoError> {
        self.record(Call::Suggestions(query.clone()))
    }

    async fn keyword_ideas(
        &self,
        query: &KeywordIdeasQuery,
    ) -> Result<KeywordPage, DataForSeoError> {
        self.record(Call::Ideas(query.clone()))
    }
}

/// Catalog source returning a fixed answer and counting fetches.
pub struct FakeCatalog {
    data: Option<Vec<LocationLanguage>>,
    fetches: Mutex<u32>,
}

impl FakeCatalog {
    pub fn ok(data: Vec<LocationLanguage>) -> Self {
        Self {
            data: Some(data),
            fetches: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            data: None,
            fetches: Mutex::new(0),
        }
    }

    pub fn fetches(&self) -> u32 {
        *self.fetches.lock().expect("fetches lock")
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_catalog(&self) -> Result<Vec<LocationLanguage>, DataForSeoError> {
        *self.fetches.lock().expect("fetches lock") += 1;
        self.data.clone().ok_or(DataForSeoError::Status {
            operation: "locations",
            status: 503,
        })
    }
}
