//! Per-chart-type aggregation strategies.
//!
//! A strategy turns the raw values of every line into the values that are
//! actually plotted, together with each line's `(min_y, max_y)` extent. Hidden
//! lines are aggregated too so renderers can animate them in and out against a
//! consistent baseline.

use serde::{Deserialize, Serialize};

use crate::core::{ChartType, Line};

/// Plotted values and extent of one line after aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub values: Vec<f64>,
    pub min_y: f64,
    pub max_y: f64,
}

impl Aggregation {
    fn with_extent(values: Vec<f64>, min_y: f64, max_y: f64) -> Self {
        Self {
            values,
            min_y,
            max_y,
        }
    }
}

/// Computes aggregated values for a whole line set.
///
/// `lines` and `visibility` have the same length and every line has the same
/// number of values. The output holds one entry per input line, in order.
pub trait AggregationStrategy: Sync {
    fn chart_type(&self) -> ChartType;
    fn aggregate(&self, lines: &[Line], visibility: &[bool]) -> Vec<Aggregation>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RegularAggregation;

#[derive(Debug, Clone, Copy, Default)]
pub struct YScaledAggregation;

#[derive(Debug, Clone, Copy, Default)]
pub struct StackedAggregation;

#[derive(Debug, Clone, Copy, Default)]
pub struct PercentageAggregation;

static REGULAR: RegularAggregation = RegularAggregation;
static Y_SCALED: YScaledAggregation = YScaledAggregation;
static STACKED: StackedAggregation = StackedAggregation;
static PERCENTAGE: PercentageAggregation = PercentageAggregation;

/// Returns the shared strategy instance for a chart type.
#[must_use]
pub fn strategy_for(chart_type: ChartType) -> &'static dyn AggregationStrategy {
    match chart_type {
        ChartType::Regular => &REGULAR,
        ChartType::YScaled => &Y_SCALED,
        ChartType::Stacked => &STACKED,
        ChartType::Percentage => &PERCENTAGE,
    }
}

/// For every line, the index of the nearest preceding visible line.
#[must_use]
pub fn previous_visible_indices(visibility: &[bool]) -> Vec<Option<usize>> {
    let mut previous = None;
    visibility
        .iter()
        .enumerate()
        .map(|(index, &visible)| {
            let current = previous;
            if visible {
                previous = Some(index);
            }
            current
        })
        .collect()
}

impl AggregationStrategy for RegularAggregation {
    fn chart_type(&self) -> ChartType {
        ChartType::Regular
    }

    fn aggregate(&self, lines: &[Line], visibility: &[bool]) -> Vec<Aggregation> {
        debug_assert_eq!(lines.len(), visibility.len());
        lines.iter().map(identity_aggregation).collect()
    }
}

impl AggregationStrategy for YScaledAggregation {
    fn chart_type(&self) -> ChartType {
        ChartType::YScaled
    }

    fn aggregate(&self, lines: &[Line], visibility: &[bool]) -> Vec<Aggregation> {
        debug_assert_eq!(lines.len(), visibility.len());
        lines.iter().map(identity_aggregation).collect()
    }
}

impl AggregationStrategy for StackedAggregation {
    fn chart_type(&self) -> ChartType {
        ChartType::Stacked
    }

    fn aggregate(&self, lines: &[Line], visibility: &[bool]) -> Vec<Aggregation> {
        debug_assert_eq!(lines.len(), visibility.len());
        let points = points_count(lines);

        // Running baseline: the stacked curve of the last visible line so far.
        let mut baseline = vec![0.0; points];
        let mut output = Vec::with_capacity(lines.len());
        for (line, &visible) in lines.iter().zip(visibility) {
            let values: Vec<f64> = line
                .values
                .iter()
                .zip(&baseline)
                .map(|(&value, &base)| value as f64 + base)
                .collect();
            let (_, max_y) = value_extent(&values);
            if visible {
                baseline.clone_from(&values);
            }
            output.push(Aggregation::with_extent(values, 0.0, max_y));
        }
        output
    }
}

impl AggregationStrategy for PercentageAggregation {
    fn chart_type(&self) -> ChartType {
        ChartType::Percentage
    }

    fn aggregate(&self, lines: &[Line], visibility: &[bool]) -> Vec<Aggregation> {
        debug_assert_eq!(lines.len(), visibility.len());
        let points = points_count(lines);

        let sums: Vec<f64> = (0..points)
            .map(|x| {
                lines
                    .iter()
                    .zip(visibility)
                    .filter(|(_, visible)| **visible)
                    .map(|(line, _)| line.values[x] as f64)
                    .sum()
            })
            .collect();
        let has_non_zero_sum = sums.iter().any(|sum| *sum != 0.0);
        let top_visible = visibility.iter().rposition(|visible| *visible);

        // Cumulative share of all visible lines up to and including the current one.
        let mut cumulative = vec![0.0; points];
        let mut output = Vec::with_capacity(lines.len());
        for (index, (line, &visible)) in lines.iter().zip(visibility).enumerate() {
            if visible {
                for ((slot, &value), &sum) in cumulative.iter_mut().zip(&line.values).zip(&sums) {
                    if sum != 0.0 {
                        *slot += value as f64 / sum * 100.0;
                    }
                }
            }

            let values = cumulative.clone();
            let (_, running_max) = value_extent(&values);
            let max_y = if visible && top_visible == Some(index) && has_non_zero_sum {
                100.0
            } else {
                running_max.round().min(100.0)
            };
            output.push(Aggregation::with_extent(values, 0.0, max_y));
        }
        output
    }
}

/// Raw values as-is; bars are anchored at zero, other kinds span their own range.
fn identity_aggregation(line: &Line) -> Aggregation {
    let values: Vec<f64> = line.values.iter().map(|&value| value as f64).collect();
    let (min_y, max_y) = value_extent(&values);
    let min_y = if line.kind.is_bar() { 0.0 } else { min_y };
    Aggregation::with_extent(values, min_y, max_y)
}

fn points_count(lines: &[Line]) -> usize {
    let points = lines.first().map_or(0, Line::len);
    debug_assert!(lines.iter().all(|line| line.len() == points));
    points
}

/// `(min, max)` of a non-empty slice; `(0, 0)` when empty.
#[must_use]
pub fn value_extent(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &value| {
            (min.min(value), max.max(value))
        })
}

#[cfg(test)]
mod tests {
    use super::{previous_visible_indices, value_extent};

    #[test]
    fn previous_visible_skips_hidden_lines() {
        let previous = previous_visible_indices(&[true, false, true, false]);
        assert_eq!(previous, vec![None, Some(0), Some(0), Some(2)]);
    }

    #[test]
    fn previous_visible_is_none_before_first_visible() {
        let previous = previous_visible_indices(&[false, false, true]);
        assert_eq!(previous, vec![None, None, None]);
    }

    #[test]
    fn value_extent_of_empty_slice_is_zero() {
        assert_eq!(value_extent(&[]), (0.0, 0.0));
        assert_eq!(value_extent(&[3.0, -1.0, 2.0]), (-1.0, 3.0));
    }
}
