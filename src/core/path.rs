//! Data-space path geometry.
//!
//! Paths use `x` = point index and `y` = aggregated value minus the line's
//! `min_y`. Scaling into pixels is left to the renderer.

use serde::{Deserialize, Serialize};

use crate::core::aggregation::{Aggregation, previous_visible_indices};
use crate::core::{ChartType, Line};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(PathPoint),
    LineTo(PathPoint),
    Close,
}

/// Ordered drawing commands.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo(PathPoint::new(x, y)));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo(PathPoint::new(x, y)));
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Vertices in command order, skipping `Close`.
    pub fn points(&self) -> impl Iterator<Item = PathPoint> + '_ {
        self.commands.iter().filter_map(|command| match command {
            PathCommand::MoveTo(point) | PathCommand::LineTo(point) => Some(*point),
            PathCommand::Close => None,
        })
    }

    /// Same commands with every `y` collapsed to zero.
    #[must_use]
    pub fn flattened(&self) -> Self {
        let flatten = |point: PathPoint| PathPoint::new(point.x, 0.0);
        Self {
            commands: self
                .commands
                .iter()
                .map(|command| match *command {
                    PathCommand::MoveTo(point) => PathCommand::MoveTo(flatten(point)),
                    PathCommand::LineTo(point) => PathCommand::LineTo(flatten(point)),
                    PathCommand::Close => PathCommand::Close,
                })
                .collect(),
        }
    }

    /// Largest `y` over all vertices; `0` for an empty path.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.points().map(|point| point.y).fold(0.0, f64::max)
    }
}

/// Full-resolution path and the down-sampled variant for the preview strip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathSet {
    pub path: Path,
    pub preview_path: Path,
}

impl PathSet {
    fn flattened(&self) -> Self {
        Self {
            path: self.path.flattened(),
            preview_path: self.preview_path.flattened(),
        }
    }
}

/// Open polyline through `(index, value - min_y)`.
#[must_use]
pub fn make_line_path(values: &[f64], min_y: f64) -> Path {
    let mut path = Path::with_capacity(values.len());
    for (index, &value) in values.iter().enumerate() {
        let (x, y) = (index as f64, value - min_y);
        if index == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path
}

/// Closed silhouette of unit-width steps between `baseline` and `values`.
///
/// Without a baseline the silhouette is anchored at zero.
#[must_use]
pub fn make_bar_path(values: &[f64], min_y: f64, baseline: Option<&[f64]>) -> Path {
    step_silhouette(values, min_y, baseline, 1)
}

/// Same silhouette as `make_bar_path`, sampled every `stride` points with
/// `stride`-wide steps.
#[must_use]
pub fn make_bar_preview_path(
    values: &[f64],
    min_y: f64,
    baseline: Option<&[f64]>,
    stride: usize,
) -> Path {
    step_silhouette(values, min_y, baseline, stride.max(1))
}

/// Closed band between the cumulative-percent curve and zero.
#[must_use]
pub fn make_percent_line_path(values: &[f64], min_y: f64) -> Path {
    let mut path = Path::with_capacity(values.len() + 3);
    path.move_to(0.0, 0.0);
    for (index, &value) in values.iter().enumerate() {
        path.line_to(index as f64, value - min_y);
    }
    path.line_to(values.len().saturating_sub(1) as f64, 0.0);
    path.close();
    path
}

fn step_silhouette(values: &[f64], min_y: f64, baseline: Option<&[f64]>, stride: usize) -> Path {
    let samples: Vec<usize> = (0..values.len()).step_by(stride).collect();
    let width = stride as f64;
    let end_x = samples.len() as f64 * width;
    let base_at = |index: usize| baseline.map_or(0.0, |base| base[index] - min_y);

    let mut path = Path::with_capacity(samples.len() * 4 + 4);
    path.move_to(0.0, samples.first().map_or(0.0, |&index| base_at(index)));
    for (step, &index) in samples.iter().enumerate() {
        let x = step as f64 * width;
        let y = values[index] - min_y;
        path.line_to(x, y);
        path.line_to(x + width, y);
    }

    match baseline {
        Some(_) => {
            for (step, &index) in samples.iter().enumerate().rev() {
                let x = step as f64 * width;
                let y = base_at(index);
                path.line_to(x + width, y);
                path.line_to(x, y);
            }
        }
        None => path.line_to(end_x, 0.0),
    }
    path.close();
    path
}

/// Builds the path pair of every line for the given chart type.
///
/// Hidden stacked/percentage lines and hidden bars take the path of the
/// nearest preceding visible line, or their own path flattened to zero height.
#[must_use]
pub fn build_paths(
    chart_type: ChartType,
    lines: &[Line],
    aggregations: &[Aggregation],
    visibility: &[bool],
    preview_stride: usize,
) -> Vec<PathSet> {
    debug_assert_eq!(lines.len(), aggregations.len());
    debug_assert_eq!(lines.len(), visibility.len());

    let previous = previous_visible_indices(visibility);
    let mut output: Vec<PathSet> = Vec::with_capacity(lines.len());
    for (index, (line, aggregation)) in lines.iter().zip(aggregations).enumerate() {
        let values = aggregation.values.as_slice();
        let min_y = aggregation.min_y;
        let baseline_index = match chart_type {
            ChartType::Stacked | ChartType::Percentage => previous[index],
            ChartType::Regular | ChartType::YScaled => None,
        };

        let set = match chart_type {
            ChartType::Regular | ChartType::YScaled if !line.kind.is_bar() => {
                let path = make_line_path(values, min_y);
                PathSet {
                    preview_path: path.clone(),
                    path,
                }
            }
            ChartType::Regular | ChartType::YScaled | ChartType::Stacked => {
                let baseline = baseline_index.map(|prev| aggregations[prev].values.as_slice());
                PathSet {
                    path: make_bar_path(values, min_y, baseline),
                    preview_path: make_bar_preview_path(values, min_y, baseline, preview_stride),
                }
            }
            ChartType::Percentage => {
                let path = make_percent_line_path(values, min_y);
                PathSet {
                    preview_path: path.clone(),
                    path,
                }
            }
        };

        let collapses = !visibility[index] && (line.kind.is_bar() || is_stacking(chart_type));
        let set = if collapses {
            match baseline_index {
                Some(prev) => output[prev].clone(),
                None => set.flattened(),
            }
        } else {
            set
        };
        output.push(set);
    }
    output
}

fn is_stacking(chart_type: ChartType) -> bool {
    matches!(chart_type, ChartType::Stacked | ChartType::Percentage)
}
