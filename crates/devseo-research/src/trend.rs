//! Monthly search volume sparkline.

use devseo_core::{Locale, MonthlySearch};
use serde::Serialize;

use crate::render::format_count;

pub const DEFAULT_WIDTH: f64 = 200.0;
pub const DEFAULT_HEIGHT: f64 = 60.0;

/// Drawing instructions for a trend line in a `width` x `height` box,
/// with y growing downwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sparkline {
    /// No monthly data at all.
    NoData { label: &'static str },
    /// A single month, shown as text.
    Single { label: String },
    Line {
        width: f64,
        height: f64,
        points: Vec<Point>,
        /// y of the mean volume.
        baseline_y: f64,
        /// SVG path, `M x,y L x,y ...`.
        path: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Builds the sparkline for `series`, sorted chronologically first.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sparkline(series: &[MonthlySearch], width: f64, height: f64, locale: Locale) -> Sparkline {
    let mut sorted = series.to_vec();
    sorted.sort_by_key(|m| (m.year, m.month));

    match sorted.as_slice() {
        [] => Sparkline::NoData {
            label: "No trend data",
        },
        [only] => Sparkline::Single {
            label: format!(
                "{}-{:02}: {}",
                only.year,
                only.month,
                format_count(only.volume, locale)
            ),
        },
        months => {
            let padding = (width.min(height) * 0.1).max(5.0);
            let chart_width = width - 2.0 * padding;
            let chart_height = height - 2.0 * padding;

            let volumes: Vec<f64> = months.iter().map(|m| m.volume as f64).collect();
            let min = volumes.iter().copied().fold(f64::INFINITY, f64::min);
            let max = volumes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mean = volumes.iter().sum::<f64>() / volumes.len() as f64;

            let scale_y = |value: f64| {
                if max > min {
                    height - padding - (value - min) / (max - min) * chart_height
                } else {
                    height - padding - chart_height / 2.0
                }
            };

            let last = (months.len() - 1) as f64;
            let points: Vec<Point> = volumes
                .iter()
                .enumerate()
                .map(|(i, &v)| Point {
                    x: padding + (i as f64 / last) * chart_width,
                    y: scale_y(v),
                })
                .collect();

            let path = points
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    format!("{cmd} {},{}", p.x, p.y)
                })
                .collect::<Vec<_>>()
                .join(" ");

            Sparkline::Line {
                width,
                height,
                baseline_y: scale_y(mean),
                points,
                path,
            }
        }
    }
}
