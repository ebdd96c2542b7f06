//! Maps a [`QueryOutcome`] to display-ready table cells.

use devseo_core::{CompetitionLevel, KeywordRecord, Locale, QueryKind, SearchIntent};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::executor::QueryOutcome;
use crate::trend::{sparkline, Sparkline, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Shown for absent values.
pub const PLACEHOLDER: &str = "\u{2014}";
/// Shown for absent difficulty and competition.
pub const NOT_AVAILABLE: &str = "N/A";

const BASE_COLUMNS: [&str; 6] = [
    "Keyword",
    "Search Volume",
    "KD",
    "CPC",
    "Competition",
    "Search Intent",
];

/// Header of the last column, which differs per query kind.
#[must_use]
pub fn extra_column(kind: QueryKind) -> &'static str {
    match kind {
        QueryKind::Related => "Results Count",
        QueryKind::Suggestions | QueryKind::Ideas => "Backlinks",
    }
}

#[must_use]
pub fn columns(kind: QueryKind) -> Vec<&'static str> {
    let mut columns = BASE_COLUMNS.to_vec();
    columns.push(extra_column(kind));
    columns
}

#[must_use]
pub fn empty_message(kind: QueryKind) -> &'static str {
    match kind {
        QueryKind::Related => "No keywords found. Try a different search.",
        QueryKind::Suggestions => "No keyword suggestions found. Try a different search.",
        QueryKind::Ideas => "No keyword ideas found. Try different keywords.",
    }
}

/// Groups digits with the locale's thousands separator.
#[must_use]
pub fn format_count(value: u64, locale: Locale) -> String {
    let digits = value.to_string();
    let separator = locale.group_separator();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

fn format_optional_count(value: Option<u64>, locale: Locale) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format_count(v, locale))
}

/// US-dollar amount with two decimals.
#[must_use]
pub fn format_cpc(cpc: Option<Decimal>) -> String {
    cpc.map_or_else(
        || PLACEHOLDER.to_string(),
        |c| {
            let rounded = c.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("${rounded:.2}")
        },
    )
}

/// Qualitative label for a difficulty score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DifficultyBand {
    VeryEasy,
    Easy,
    Moderate,
    Hard,
    VeryHard,
}

impl DifficultyBand {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29 => Self::VeryEasy,
            30..=49 => Self::Easy,
            50..=69 => Self::Moderate,
            70..=84 => Self::Hard,
            _ => Self::VeryHard,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryEasy => "Very Easy",
            Self::Easy => "Easy",
            Self::Moderate => "Moderate",
            Self::Hard => "Hard",
            Self::VeryHard => "Very Hard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifficultyCell {
    pub score: Option<u8>,
    /// Band label, or `N/A`.
    pub band: &'static str,
    /// Bar width in percent.
    pub bar_width: u8,
    pub text: String,
}

impl DifficultyCell {
    #[must_use]
    pub fn new(score: Option<u8>) -> Self {
        match score {
            Some(score) => {
                let band = DifficultyBand::from_score(score).label();
                Self {
                    score: Some(score),
                    band,
                    bar_width: score.min(100),
                    text: format!("{score} ({band})"),
                }
            }
            None => Self {
                score: None,
                band: NOT_AVAILABLE,
                bar_width: 0,
                text: NOT_AVAILABLE.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompetitionCell {
    pub label: String,
    pub bar_width: u8,
}

impl CompetitionCell {
    #[must_use]
    pub fn new(level: Option<&CompetitionLevel>) -> Self {
        let bar_width = match level {
            Some(CompetitionLevel::High) => 100,
            Some(CompetitionLevel::Medium) => 66,
            Some(CompetitionLevel::Low) => 33,
            Some(CompetitionLevel::Other(_)) | None => 0,
        };
        Self {
            label: level.map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string),
            bar_width,
        }
    }
}

/// Label colour per search intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentColor {
    Blue,
    Green,
    Purple,
    Orange,
    Gray,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentCell {
    pub label: String,
    pub color: IntentColor,
}

impl IntentCell {
    #[must_use]
    pub fn new(intent: Option<&SearchIntent>) -> Self {
        let color = match intent {
            Some(SearchIntent::Informational) => IntentColor::Blue,
            Some(SearchIntent::Commercial) => IntentColor::Green,
            Some(SearchIntent::Transactional) => IntentColor::Purple,
            Some(SearchIntent::Navigational) => IntentColor::Orange,
            Some(SearchIntent::Other(_)) | None => IntentColor::Gray,
        };
        Self {
            label: intent.map_or_else(|| PLACEHOLDER.to_string(), ToString::to_string),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeCell {
    pub text: String,
    pub trend: Sparkline,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordRow {
    pub keyword: String,
    pub search_volume: VolumeCell,
    pub difficulty: DifficultyCell,
    pub cpc: String,
    pub competition: CompetitionCell,
    pub intent: IntentCell,
    /// Results count (related) or backlinks (suggestions, ideas).
    pub extra: String,
}

#[must_use]
pub fn render_row(kind: QueryKind, record: &KeywordRecord, locale: Locale) -> KeywordRow {
    let extra = match kind {
        QueryKind::Related => format_optional_count(record.serp_results_count, locale),
        QueryKind::Suggestions | QueryKind::Ideas => record.backlinks.map_or_else(
            || PLACEHOLDER.to_string(),
            |b| {
                format!(
                    "{} / {}",
                    format_count(b.backlinks, locale),
                    format_count(b.referring_domains, locale)
                )
            },
        ),
    };

    KeywordRow {
        keyword: record.keyword.clone(),
        search_volume: VolumeCell {
            text: format_optional_count(record.search_volume, locale),
            trend: sparkline(&record.monthly_series, DEFAULT_WIDTH, DEFAULT_HEIGHT, locale),
        },
        difficulty: DifficultyCell::new(record.difficulty),
        cpc: format_cpc(record.cost_per_click),
        competition: CompetitionCell::new(record.competition_level.as_ref()),
        intent: IntentCell::new(record.search_intent.as_ref()),
        extra,
    }
}

/// What the results area shows for an outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ResultView {
    Idle,
    Loading,
    Failure {
        message: String,
    },
    Empty {
        message: &'static str,
    },
    Table {
        columns: Vec<&'static str>,
        rows: Vec<KeywordRow>,
        total_count: u64,
    },
}

impl ResultView {
    #[must_use]
    pub fn from_outcome(kind: QueryKind, outcome: &QueryOutcome, locale: Locale) -> Self {
        match outcome {
            QueryOutcome::Idle => Self::Idle,
            QueryOutcome::Loading => Self::Loading,
            QueryOutcome::Failure { message } => Self::Failure {
                message: message.clone(),
            },
            QueryOutcome::Success { records, .. } if records.is_empty() => Self::Empty {
                message: empty_message(kind),
            },
            QueryOutcome::Success {
                records,
                total_count,
            } => Self::Table {
                columns: columns(kind),
                rows: records
                    .iter()
                    .map(|record| render_row(kind, record, locale))
                    .collect(),
                total_count: *total_count,
            },
        }
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
