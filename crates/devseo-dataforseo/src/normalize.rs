//! Conversion of `DataForSEO` wire types into the workspace's domain types.

use devseo_core::{
    BacklinkStats, CompetitionLevel, KeywordRecord, LanguageOption, LocationLanguage,
    MonthlySearch, SearchIntent,
};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::types::{
    AvgBacklinksInfo, KeywordItem, RelatedKeywordItem, WireLocation, WireMonthlySearch,
};

/// Converts a catalog entry. Missing language lists become empty, which makes
/// the location unselectable rather than invalid.
#[must_use]
pub fn normalize_location(wire: WireLocation) -> LocationLanguage {
    LocationLanguage {
        location_name: wire.location_name,
        country_code: wire.country_iso_code.unwrap_or_default(),
        location_type: wire.location_type.unwrap_or_default(),
        available_languages: wire
            .available_languages
            .unwrap_or_default()
            .into_iter()
            .map(|lang| LanguageOption {
                language_name: lang.language_name,
                language_code: lang.language_code,
            })
            .collect(),
    }
}

/// Converts a suggestions/ideas item, or the `keyword_data` of a related item.
#[must_use]
pub fn normalize_keyword(item: KeywordItem) -> KeywordRecord {
    let info = item.keyword_info;

    let search_volume = info.as_ref().and_then(|i| i.search_volume);
    let cost_per_click = info.as_ref().and_then(|i| i.cpc).and_then(Decimal::from_f64);
    let competition_level = info
        .as_ref()
        .and_then(|i| i.competition_level.clone())
        .filter(|level| !level.is_empty())
        .map(CompetitionLevel::from);
    let monthly_series = info
        .and_then(|i| i.monthly_searches)
        .map(normalize_monthly)
        .unwrap_or_default();

    KeywordRecord {
        keyword: item.keyword,
        search_volume,
        monthly_series,
        difficulty: item
            .keyword_properties
            .and_then(|p| p.keyword_difficulty)
            .and_then(normalize_difficulty),
        cost_per_click,
        competition_level,
        search_intent: item
            .search_intent_info
            .and_then(|s| s.main_intent)
            .filter(|intent| !intent.is_empty())
            .map(SearchIntent::from),
        backlinks: item.avg_backlinks_info.and_then(normalize_backlinks),
        serp_results_count: item.serp_info.and_then(|s| s.se_results_count),
        depth: None,
    }
}

#[must_use]
pub fn normalize_related(item: RelatedKeywordItem) -> KeywordRecord {
    let mut record = normalize_keyword(item.keyword_data);
    record.depth = item.depth;
    record
}

/// Months without a reported volume are dropped.
fn normalize_monthly(series: Vec<WireMonthlySearch>) -> Vec<MonthlySearch> {
    series
        .into_iter()
        .filter_map(|m| {
            m.search_volume.map(|volume| MonthlySearch {
                year: m.year,
                month: m.month,
                volume,
            })
        })
        .collect()
}

/// Floored so the integer score lands in the same band as the raw one.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn normalize_difficulty(raw: f64) -> Option<u8> {
    raw.is_finite().then(|| raw.floor().clamp(0.0, 100.0) as u8)
}

fn normalize_backlinks(info: AvgBacklinksInfo) -> Option<BacklinkStats> {
    Some(BacklinkStats {
        backlinks: normalize_count(info.backlinks?)?,
        referring_domains: normalize_count(info.referring_domains.unwrap_or(0.0))?,
    })
}

/// Upstream reports averages as floats; counts are displayed as integers.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn normalize_count(raw: f64) -> Option<u64> {
    (raw.is_finite() && raw >= 0.0).then(|| raw.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{KeywordInfo, KeywordProperties, SearchIntentInfo, WireLanguage};

    fn item(keyword: &str) -> KeywordItem {
        KeywordItem {
            keyword: keyword.to_string(),
            keyword_info: None,
            keyword_properties: None,
            serp_info: None,
            avg_backlinks_info: None,
            search_intent_info: None,
        }
    }

    #[test]
    fn bare_item_normalizes_to_all_absent() {
        let record = normalize_keyword(item("seo"));
        assert_eq!(record, KeywordRecord::bare("seo"));
    }

    #[test]
    fn difficulty_is_floored_and_clamped() {
        assert_eq!(normalize_difficulty(71.6), Some(71));
        assert_eq!(normalize_difficulty(84.6), Some(84));
        assert_eq!(normalize_difficulty(29.5), Some(29));
        assert_eq!(normalize_difficulty(140.0), Some(100));
        assert_eq!(normalize_difficulty(-3.0), Some(0));
        assert_eq!(normalize_difficulty(f64::NAN), None);
    }

    #[test]
    fn keyword_info_fields_are_mapped() {
        let mut wire = item("seo tools");
        wire.keyword_info = Some(KeywordInfo {
            search_volume: Some(14_800),
            cpc: Some(12.5),
            competition: Some(0.4),
            competition_level: Some("MEDIUM".to_string()),
            monthly_searches: Some(vec![
                WireMonthlySearch {
                    year: 2025,
                    month: 1,
                    search_volume: Some(12_100),
                },
                WireMonthlySearch {
                    year: 2025,
                    month: 2,
                    search_volume: None,
                },
            ]),
        });
        wire.keyword_properties = Some(KeywordProperties {
            keyword_difficulty: Some(64.0),
        });
        wire.search_intent_info = Some(SearchIntentInfo {
            main_intent: Some("commercial".to_string()),
        });

        let record = normalize_keyword(wire);
        assert_eq!(record.search_volume, Some(14_800));
        assert_eq!(record.cost_per_click, Decimal::from_f64(12.5));
        assert_eq!(record.competition_level, Some(CompetitionLevel::Medium));
        assert_eq!(record.difficulty, Some(64));
        assert_eq!(record.search_intent, Some(SearchIntent::Commercial));
        assert_eq!(record.monthly_series.len(), 1, "null volumes are dropped");
    }

    #[test]
    fn backlinks_require_a_backlink_count() {
        assert_eq!(
            normalize_backlinks(AvgBacklinksInfo {
                backlinks: None,
                referring_domains: Some(3.0),
            }),
            None
        );
        assert_eq!(
            normalize_backlinks(AvgBacklinksInfo {
                backlinks: Some(1520.4),
                referring_domains: Some(86.7),
            }),
            Some(BacklinkStats {
                backlinks: 1520,
                referring_domains: 87,
            })
        );
    }

    #[test]
    fn location_without_languages_becomes_empty_list() {
        let loc = normalize_location(WireLocation {
            location_name: "Antarctica".to_string(),
            country_iso_code: Some("AQ".to_string()),
            location_type: Some("Country".to_string()),
            available_languages: None,
        });
        assert!(loc.available_languages.is_empty());

        let loc = normalize_location(WireLocation {
            location_name: "Germany".to_string(),
            country_iso_code: None,
            location_type: None,
            available_languages: Some(vec![WireLanguage {
                language_name: "German".to_string(),
                language_code: "de".to_string(),
            }]),
        });
        assert_eq!(loc.country_code, "");
        assert_eq!(loc.available_languages[0].language_code, "de");
    }
}
