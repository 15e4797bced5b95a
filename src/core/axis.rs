use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ChartType, Viewport};

/// Closed y-range `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub lower: f64,
    pub upper: f64,
}

impl Extent {
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.upper - self.lower
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(self.lower.min(other.lower), self.upper.max(other.upper))
    }
}

/// Evenly spaced y-axis ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTicks {
    pub lower: f64,
    pub upper: f64,
    pub step: f64,
    pub values: SmallVec<[f64; 8]>,
}

/// X-axis label picked from the chart's labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub index: usize,
    pub text: String,
}

/// Y-extent of a set of aggregated series restricted to the viewport.
///
/// Each item is `(values, anchored)`; anchored series are drawn from a zero
/// baseline, so they pull the lower bound down to zero. Returns `None` when
/// the iterator is empty.
pub fn windowed_extent<'a, I>(series: I, viewport: Viewport) -> Option<Extent>
where
    I: IntoIterator<Item = (&'a [f64], bool)>,
{
    let (min_index, max_index) = viewport.range();
    series
        .into_iter()
        .filter_map(|(values, anchored)| {
            let end = max_index.min(values.len().checked_sub(1)?);
            let window = values.get(min_index..=end)?;
            let (lower, upper) = window
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &value| {
                    (lo.min(value), hi.max(value))
                });
            let lower = if anchored { 0.0 } else { lower };
            Some(Extent::new(lower, upper))
        })
        .reduce(Extent::union)
}

/// Adds `round(span / divisor)` above and below the extent.
///
/// Percentage charts keep their fixed range. Anchored extents never go
/// below zero.
#[must_use]
pub fn pad_extent(extent: Extent, chart_type: ChartType, anchored: bool, divisor: f64) -> Extent {
    if chart_type == ChartType::Percentage || !divisor.is_finite() || divisor <= 0.0 {
        return extent;
    }

    let padding = (extent.span() / divisor).round();
    let lower = extent.lower - padding;
    Extent::new(
        if anchored { lower.max(0.0) } else { lower },
        extent.upper + padding,
    )
}

/// Splits `[lower, upper]` into `tick_count` integer steps.
///
/// `lower` is floored, `step = ceil(span / tick_count)` (at least 1) and
/// `upper` is moved to `lower + step * tick_count` so the top of the data
/// never touches the top of the axis.
#[must_use]
pub fn axis_ticks(lower: f64, upper: f64, tick_count: usize) -> AxisTicks {
    let tick_count = tick_count.max(1);
    let lower = lower.floor();
    let span = (upper - lower).max(0.0);
    let step = (span / tick_count as f64).ceil().max(1.0);
    let values = (0..tick_count)
        .map(|tick| lower + step * tick as f64)
        .collect();

    AxisTicks {
        lower,
        upper: lower + step * tick_count as f64,
        step,
        values,
    }
}

/// `count` evenly spaced labels across the viewport followed by the label at
/// its right edge. Windows narrower than `count` repeat no index.
#[must_use]
pub fn x_axis_labels(labels: &[String], viewport: Viewport, count: usize) -> Vec<AxisLabel> {
    let (min_index, max_index) = viewport.range();
    let count = count.max(1);
    let step = (max_index - min_index) as f64 / count as f64;

    let mut picked: Vec<AxisLabel> = (0..count)
        .map(|position| min_index + (step * position as f64).round() as usize)
        .chain(std::iter::once(max_index))
        .filter_map(|index| {
            labels.get(index).map(|text| AxisLabel {
                index,
                text: text.clone(),
            })
        })
        .collect();
    picked.dedup_by_key(|label| label.index);
    picked
}
