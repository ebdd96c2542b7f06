//! Keyword research domain types.
//!
//! These are the internal, already-validated shapes the rest of the workspace
//! works with. Wire formats of the upstream SEO API live in
//! `devseo-dataforseo` and are converted into these types at the boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A language supported for a given location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    pub language_name: String,
    pub language_code: String,
}

/// One entry of the location/language catalog.
///
/// `location_name` is the unique key. A location is only selectable when it
/// offers at least one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationLanguage {
    pub location_name: String,
    pub country_code: String,
    pub location_type: String,
    pub available_languages: Vec<LanguageOption>,
}

impl LocationLanguage {
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.available_languages.is_empty()
    }

    /// Exact-name lookup of a language offered by this location.
    #[must_use]
    pub fn language(&self, language_name: &str) -> Option<&LanguageOption> {
        self.available_languages
            .iter()
            .find(|lang| lang.language_name == language_name)
    }

    #[must_use]
    pub fn offers_language(&self, language_name: &str) -> bool {
        self.language(language_name).is_some()
    }
}

/// Search volume for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySearch {
    pub year: i32,
    pub month: u32,
    pub volume: u64,
}

/// Advertiser competition bucket as reported upstream.
///
/// Unknown labels are kept verbatim so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
    Other(String),
}

impl CompetitionLevel {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for CompetitionLevel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "LOW" => Self::Low,
            "MEDIUM" => Self::Medium,
            "HIGH" => Self::High,
            _ => Self::Other(raw),
        }
    }
}

impl From<CompetitionLevel> for String {
    fn from(level: CompetitionLevel) -> Self {
        level.as_str().to_string()
    }
}

impl std::fmt::Display for CompetitionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main search intent of a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SearchIntent {
    Informational,
    Commercial,
    Transactional,
    Navigational,
    Other(String),
}

impl SearchIntent {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Informational => "informational",
            Self::Commercial => "commercial",
            Self::Transactional => "transactional",
            Self::Navigational => "navigational",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for SearchIntent {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "informational" => Self::Informational,
            "commercial" => Self::Commercial,
            "transactional" => Self::Transactional,
            "navigational" => Self::Navigational,
            _ => Self::Other(raw),
        }
    }
}

impl From<SearchIntent> for String {
    fn from(intent: SearchIntent) -> Self {
        intent.as_str().to_string()
    }
}

impl std::fmt::Display for SearchIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Average backlink profile of the pages ranking for a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklinkStats {
    pub backlinks: u64,
    pub referring_domains: u64,
}

/// Metrics for a single keyword, uniform across the three query kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub search_volume: Option<u64>,
    #[serde(default)]
    pub monthly_series: Vec<MonthlySearch>,
    /// Keyword difficulty, 0-100.
    pub difficulty: Option<u8>,
    pub cost_per_click: Option<Decimal>,
    pub competition_level: Option<CompetitionLevel>,
    pub search_intent: Option<SearchIntent>,
    pub backlinks: Option<BacklinkStats>,
    /// Number of organic results on the SERP.
    pub serp_results_count: Option<u64>,
    /// Depth in the related-keywords tree; only set for related searches.
    pub depth: Option<u8>,
}

impl KeywordRecord {
    /// A record with only the keyword set.
    #[must_use]
    pub fn bare(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            search_volume: None,
            monthly_series: Vec::new(),
            difficulty: None,
            cost_per_click: None,
            competition_level: None,
            search_intent: None,
            backlinks: None,
            serp_results_count: None,
            depth: None,
        }
    }
}

/// One page of keyword results plus the upstream total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordPage {
    pub records: Vec<KeywordRecord>,
    pub total_count: u64,
}

/// Which upstream keyword-research operation a search maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Related,
    Suggestions,
    Ideas,
}

impl QueryKind {
    pub const ALL: [QueryKind; 3] = [QueryKind::Related, QueryKind::Suggestions, QueryKind::Ideas];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Related => "related",
            Self::Suggestions => "suggestions",
            Self::Ideas => "ideas",
        }
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QueryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "related" => Ok(Self::Related),
            "suggestions" => Ok(Self::Suggestions),
            "ideas" => Ok(Self::Ideas),
            other => Err(format!("unknown query kind \"{other}\"")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(languages: &[&str]) -> LocationLanguage {
        LocationLanguage {
            location_name: "United States".to_string(),
            country_code: "US".to_string(),
            location_type: "Country".to_string(),
            available_languages: languages
                .iter()
                .map(|name| LanguageOption {
                    language_name: (*name).to_string(),
                    language_code: name[..2].to_lowercase(),
                })
                .collect(),
        }
    }

    #[test]
    fn location_without_languages_is_not_selectable() {
        assert!(!location(&[]).is_selectable());
        assert!(location(&["English"]).is_selectable());
    }

    #[test]
    fn offers_language_is_exact_match() {
        let loc = location(&["English", "Spanish"]);
        assert!(loc.offers_language("Spanish"));
        assert!(!loc.offers_language("spanish"));
        assert!(!loc.offers_language("French"));
    }

    #[test]
    fn competition_level_keeps_unknown_labels() {
        assert_eq!(
            CompetitionLevel::from("HIGH".to_string()),
            CompetitionLevel::High
        );
        let odd = CompetitionLevel::from("EXTREME".to_string());
        assert_eq!(odd.as_str(), "EXTREME");
    }

    #[test]
    fn search_intent_serializes_as_plain_string() {
        let json = serde_json::to_string(&SearchIntent::Commercial).expect("serialize");
        assert_eq!(json, "\"commercial\"");
        let parsed: SearchIntent = serde_json::from_str("\"local\"").expect("deserialize");
        assert_eq!(parsed, SearchIntent::Other("local".to_string()));
    }

    #[test]
    fn query_kind_parses_lowercase_names() {
        for kind in QueryKind::ALL {
            assert_eq!(kind.as_str().parse::<QueryKind>(), Ok(kind));
        }
        assert!("keywords".parse::<QueryKind>().is_err());
    }
}
