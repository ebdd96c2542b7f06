//! Seams between the pipeline and the upstream SEO API.

use async_trait::async_trait;
use devseo_core::{KeywordPage, LocationLanguage};
use devseo_dataforseo::{
    DataForSeoClient, DataForSeoError, KeywordIdeasQuery, KeywordSuggestionsQuery,
    RelatedKeywordsQuery,
};

/// Provides the location/language catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<LocationLanguage>, DataForSeoError>;
}

/// The three keyword-research operations.
#[async_trait]
pub trait KeywordSource: Send + Sync {
    async fn related_keywords(
        &self,
        query: &RelatedKeywordsQuery,
    ) -> Result<KeywordPage, DataForSeoError>;

    async fn keyword_suggestions(
        &self,
        query: &KeywordSuggestionsQuery,
    ) -> Result<KeywordPage, DataForSeoError>;

    async fn keyword_ideas(&self, query: &KeywordIdeasQuery)
        -> Result<KeywordPage, DataForSeoError>;
}

#[async_trait]
impl CatalogSource for DataForSeoClient {
    async fn fetch_catalog(&self) -> Result<Vec<LocationLanguage>, DataForSeoError> {
        self.fetch_locations().await
    }
}

#[async_trait]
impl KeywordSource for DataForSeoClient {
    async fn related_keywords(
        &self,
        query: &RelatedKeywordsQuery,
    ) -> Result<KeywordPage, DataForSeoError> {
        DataForSeoClient::related_keywords(self, query).await
    }

    async fn keyword_suggestions(
        &self,
        query: &KeywordSuggestionsQuery,
    ) -> Result<KeywordPage, DataForSeoError> {
        DataForSeoClient::keyword_suggestions(self, query).await
    }

    async fn keyword_ideas(
        &self,
        query: &KeywordIdeasQuery,
    ) -> Result<KeywordPage, DataForSeoError> {
        DataForSeoClient::keyword_ideas(self, query).await
    }
}
