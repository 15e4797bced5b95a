//! Point-in-time lookups for crosshair and tooltip display.

use serde::{Deserialize, Serialize};

use crate::api::ChartPresentation;
use crate::core::{ChartType, Color, LineKind};

/// Linear interpolation at fractional index `x`, clamped to the series.
///
/// Returns `None` for an empty series or non-finite `x`.
#[must_use]
pub fn interpolate(values: &[f64], x: f64) -> Option<f64> {
    interpolate_with(values.len(), x, |index| values[index])
}

fn interpolate_with(len: usize, x: f64, value_at: impl Fn(usize) -> f64) -> Option<f64> {
    if len == 0 || !x.is_finite() {
        return None;
    }
    let x = x.clamp(0.0, (len - 1) as f64);
    let left = x.floor() as usize;
    let right = x.ceil() as usize;
    let fraction = x - left as f64;
    let (a, b) = (value_at(left), value_at(right));
    Some(a + (b - a) * fraction)
}

/// Value of one visible line under the crosshair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosshairValue {
    pub line_index: usize,
    pub name: String,
    pub color: Color,
    pub kind: LineKind,
    /// Raw series value.
    pub value: f64,
    /// Aggregated value, i.e. the plotted height.
    pub plotted: f64,
    /// Highlighted `[left, right)` index bucket for bar-like lines.
    pub bucket: Option<(f64, f64)>,
}

/// Everything a tooltip needs at one horizontal position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crosshair {
    /// Fractional index after clamping to the series.
    pub x: f64,
    /// Point index the label belongs to.
    pub index: usize,
    pub label: String,
    pub values: Vec<CrosshairValue>,
}

impl Crosshair {
    /// Samples every visible line at fractional index `x`.
    ///
    /// Line-like series are interpolated between neighbouring points. Bars,
    /// and every line of a stacked chart, report the exact bucket under
    /// `floor(x)` instead.
    #[must_use]
    pub fn at(presentation: &ChartPresentation, x: f64) -> Self {
        let last = presentation.points_count().saturating_sub(1);
        let x = if x.is_finite() {
            x.clamp(0.0, last as f64)
        } else {
            0.0
        };
        let stacked = presentation.chart_type() == ChartType::Stacked;

        let mut bucketed = false;
        let values = presentation
            .visible_lines()
            .map(|(line_index, line)| {
                let aggregated = line.aggregated_values();
                let raw = line.values();
                let (value, plotted, bucket) = if stacked || line.kind().is_bar() {
                    bucketed = true;
                    let bucket = x.floor() as usize;
                    (
                        raw[bucket] as f64,
                        aggregated[bucket],
                        Some((bucket as f64, bucket as f64 + 1.0)),
                    )
                } else {
                    (
                        interpolate_with(raw.len(), x, |index| raw[index] as f64).unwrap_or(0.0),
                        interpolate(aggregated, x).unwrap_or(0.0),
                        None,
                    )
                };
                CrosshairValue {
                    line_index,
                    name: line.name().to_owned(),
                    color: line.color(),
                    kind: line.kind(),
                    value,
                    plotted,
                    bucket,
                }
            })
            .collect();

        let index = if bucketed {
            x.floor() as usize
        } else {
            x.round() as usize
        }
        .min(last);

        Self {
            x,
            index,
            label: presentation.label_at(index).to_owned(),
            values,
        }
    }
}
