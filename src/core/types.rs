use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::error::{ChartError, ChartResult};

/// How a single series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Line,
    Bar,
    Area,
    /// Polyline with the area under it filled by the renderer.
    LineArea,
}

impl LineKind {
    /// Bars are anchored to a zero baseline instead of their own minimum.
    #[must_use]
    pub fn is_bar(self) -> bool {
        matches!(self, Self::Bar)
    }
}

/// Aggregation semantics shared by every line of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[default]
    Regular,
    /// Two lines, each on its own y-axis.
    YScaled,
    Stacked,
    Percentage,
}

/// Immutable raw series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub values: Vec<i64>,
    pub name: String,
    pub color: Color,
    pub kind: LineKind,
}

impl Line {
    #[must_use]
    pub fn new(values: Vec<i64>, name: impl Into<String>, color: Color, kind: LineKind) -> Self {
        Self {
            values,
            name: name.into(),
            color,
            kind,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Immutable chart input: x-axis labels plus equally sized series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    labels: Vec<String>,
    lines: Vec<Line>,
    chart_type: ChartType,
}

impl ChartData {
    /// Validates series shape and builds the bundle.
    ///
    /// Every line must be non-empty and as long as `labels`.
    pub fn new(labels: Vec<String>, lines: Vec<Line>, chart_type: ChartType) -> ChartResult<Self> {
        if lines.is_empty() {
            return Err(ChartError::InvalidData(
                "chart must contain at least one line".to_owned(),
            ));
        }
        if labels.is_empty() {
            return Err(ChartError::InvalidData(
                "chart must contain at least one point".to_owned(),
            ));
        }
        for line in &lines {
            if line.len() != labels.len() {
                return Err(ChartError::InvalidData(format!(
                    "line `{}` has {} values, expected {}",
                    line.name,
                    line.len(),
                    labels.len()
                )));
            }
            line.color.validate()?;
        }
        if chart_type == ChartType::YScaled && lines.len() != 2 {
            return Err(ChartError::InvalidData(format!(
                "y-scaled chart needs exactly 2 lines, got {}",
                lines.len()
            )));
        }

        Ok(Self {
            labels,
            lines,
            chart_type,
        })
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    #[must_use]
    pub fn lines_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn points_count(&self) -> usize {
        self.labels.len()
    }
}
