//! `DataForSEO` Labs wire types.
//!
//! Every response is wrapped in an envelope carrying a `status_code`
//! (`20000` on success) and a `tasks` array; the interesting payload lives in
//! `tasks[0].result`. Only the fields the pipeline reads are modelled, and
//! anything upstream may omit or null out is an `Option`.

use serde::{Deserialize, Serialize};

/// Status code the API uses for success, both on the envelope and per task.
pub const STATUS_OK: u32 = 20000;

/// Top-level envelope for all `DataForSEO` responses.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status_code: u32,
    #[serde(default)]
    pub status_message: String,
    pub tasks: Option<Vec<Task<T>>>,
}

/// One task inside the envelope.
#[derive(Debug, Deserialize)]
pub struct Task<T> {
    #[serde(default)]
    pub id: Option<String>,
    pub status_code: u32,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub cost: Option<f64>,
    pub result: Option<Vec<T>>,
}

// ---------------------------------------------------------------------------
// locations_and_languages
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct WireLocation {
    pub location_name: String,
    #[serde(default)]
    pub country_iso_code: Option<String>,
    #[serde(default)]
    pub location_type: Option<String>,
    #[serde(default)]
    pub available_languages: Option<Vec<WireLanguage>>,
}

#[derive(Debug, Deserialize)]
pub struct WireLanguage {
    pub language_name: String,
    pub language_code: String,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct RelatedKeywordsBody<'a> {
    pub keyword: &'a str,
    pub location_name: &'a str,
    pub language_name: &'a str,
    pub depth: u8,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct KeywordSuggestionsBody<'a> {
    pub keyword: &'a str,
    pub location_name: &'a str,
    pub language_name: &'a str,
    pub include_serp_info: bool,
    pub include_seed_keyword: bool,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct KeywordIdeasBody<'a> {
    pub keywords: &'a [String],
    pub location_name: &'a str,
    pub language_name: &'a str,
    pub include_serp_info: bool,
    pub limit: u32,
}

// ---------------------------------------------------------------------------
// Keyword results
// ---------------------------------------------------------------------------

/// `result[]` element of `related_keywords/live`.
#[derive(Debug, Deserialize)]
pub struct RelatedKeywordsResult {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub items: Option<Vec<RelatedKeywordItem>>,
}

/// Related-keywords items nest the keyword metrics under `keyword_data`.
#[derive(Debug, Deserialize)]
pub struct RelatedKeywordItem {
    pub keyword_data: KeywordItem,
    #[serde(default)]
    pub depth: Option<u8>,
    #[serde(default)]
    pub related_keywords: Option<Vec<String>>,
}

/// `result[]` element of `keyword_suggestions/live` and `keyword_ideas/live`.
#[derive(Debug, Deserialize)]
pub struct KeywordListResult {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub items: Option<Vec<KeywordItem>>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordItem {
    pub keyword: String,
    #[serde(default)]
    pub keyword_info: Option<KeywordInfo>,
    #[serde(default)]
    pub keyword_properties: Option<KeywordProperties>,
    #[serde(default)]
    pub serp_info: Option<SerpInfo>,
    #[serde(default)]
    pub avg_backlinks_info: Option<AvgBacklinksInfo>,
    #[serde(default)]
    pub search_intent_info: Option<SearchIntentInfo>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordInfo {
    #[serde(default)]
    pub search_volume: Option<u64>,
    #[serde(default)]
    pub cpc: Option<f64>,
    #[serde(default)]
    pub competition: Option<f64>,
    #[serde(default)]
    pub competition_level: Option<String>,
    #[serde(default)]
    pub monthly_searches: Option<Vec<WireMonthlySearch>>,
}

#[derive(Debug, Deserialize)]
pub struct WireMonthlySearch {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub search_volume: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordProperties {
    #[serde(default)]
    pub keyword_difficulty: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SerpInfo {
    #[serde(default)]
    pub se_results_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct AvgBacklinksInfo {
    #[serde(default)]
    pub backlinks: Option<f64>,
    #[serde(default)]
    pub referring_domains: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchIntentInfo {
    #[serde(default)]
    pub main_intent: Option<String>,
}
