//! Columnar JSON ingestion.
//!
//! Input charts look like:
//!
//! ```json
//! {
//!   "columns": [["x", 1542412800000, 1542499200000], ["y0", 37, 20]],
//!   "types": {"x": "x", "y0": "line"},
//!   "names": {"y0": "Joined"},
//!   "colors": {"y0": "#3DC23F"},
//!   "stacked": false
//! }
//! ```
//!
//! The `x` column holds epoch milliseconds and becomes the label row. The
//! optional `y_scaled`, `stacked` and `percentage` flags select the chart type;
//! when several are set the later one in that order wins.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::api::PresentationConfig;
use crate::core::{ChartData, ChartType, Color, Line, LineKind};
use crate::error::{ChartError, ChartResult};

/// Turns x-axis timestamps (seconds since the Unix epoch) into labels.
pub trait LabelFormatter {
    fn format(&self, unix_seconds: i64) -> ChartResult<String>;
}

/// `chrono` strftime formatter, UTC. Defaults to `"%b %d"` (e.g. `Nov 17`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLabelFormatter {
    pattern: String,
}

impl DateLabelFormatter {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Default for DateLabelFormatter {
    fn default() -> Self {
        Self::new("%b %d")
    }
}

impl LabelFormatter for DateLabelFormatter {
    fn format(&self, unix_seconds: i64) -> ChartResult<String> {
        let time = chrono::DateTime::from_timestamp(unix_seconds, 0).ok_or_else(|| {
            ChartError::MalformedInput(format!("timestamp {unix_seconds}s is out of range"))
        })?;
        Ok(time.format(&self.pattern).to_string())
    }
}

#[derive(Debug, Deserialize)]
struct RawChart {
    columns: Vec<Vec<Value>>,
    types: IndexMap<String, String>,
    names: IndexMap<String, String>,
    colors: IndexMap<String, String>,
    #[serde(default)]
    y_scaled: bool,
    #[serde(default)]
    stacked: bool,
    #[serde(default)]
    percentage: bool,
}

impl RawChart {
    fn chart_type(&self) -> ChartType {
        if self.percentage {
            ChartType::Percentage
        } else if self.stacked {
            ChartType::Stacked
        } else if self.y_scaled {
            ChartType::YScaled
        } else {
            ChartType::Regular
        }
    }
}

/// Column-format chart parser.
pub struct ChartParser<F = DateLabelFormatter> {
    formatter: F,
    pair_area_lines: bool,
    area_alpha: f64,
}

impl Default for ChartParser<DateLabelFormatter> {
    fn default() -> Self {
        Self::new(DateLabelFormatter::default())
    }
}

impl<F: LabelFormatter> ChartParser<F> {
    #[must_use]
    pub fn new(formatter: F) -> Self {
        Self {
            formatter,
            pair_area_lines: true,
            area_alpha: PresentationConfig::default().area_alpha,
        }
    }

    /// Takes the paired area alpha from a presentation config.
    #[must_use]
    pub fn with_config(mut self, config: &PresentationConfig) -> Self {
        self.area_alpha = config.area_alpha;
        self
    }

    /// Whether plain `line` columns of regular charts get a filled `Area`
    /// twin right after them.
    #[must_use]
    pub fn with_area_pairing(mut self, enabled: bool) -> Self {
        self.pair_area_lines = enabled;
        self
    }

    /// Parses a single chart object.
    pub fn parse_chart(&self, input: &str) -> ChartResult<ChartData> {
        let raw: RawChart = serde_json::from_str(input)
            .map_err(|e| ChartError::MalformedInput(format!("failed to parse chart json: {e}")))?;
        self.build(raw)
    }

    /// Parses either a single chart object or an array of them.
    pub fn parse_charts(&self, input: &str) -> ChartResult<Vec<ChartData>> {
        let payload: Value = serde_json::from_str(input)
            .map_err(|e| ChartError::MalformedInput(format!("failed to parse charts json: {e}")))?;
        let raws = match payload {
            Value::Array(items) => items,
            object @ Value::Object(_) => vec![object],
            _ => {
                return Err(ChartError::MalformedInput(
                    "charts payload must be an object or an array".to_owned(),
                ));
            }
        };

        let charts = raws
            .into_iter()
            .enumerate()
            .map(|(position, value)| {
                let raw: RawChart = serde_json::from_value(value).map_err(|e| {
                    ChartError::MalformedInput(format!("chart #{position}: {e}"))
                })?;
                self.build(raw)
            })
            .collect::<ChartResult<Vec<_>>>()?;
        debug!(count = charts.len(), "parsed charts");
        Ok(charts)
    }

    fn build(&self, raw: RawChart) -> ChartResult<ChartData> {
        let chart_type = raw.chart_type();
        let mut labels: Option<Vec<String>> = None;
        let mut lines = Vec::new();

        for column in &raw.columns {
            let (key, values) = split_column(column)?;
            let column_type = raw.types.get(key).ok_or_else(|| {
                ChartError::MalformedInput(format!("column `{key}` has no type"))
            })?;

            if column_type == "x" {
                let formatted = values
                    .iter()
                    .map(|millis| self.formatter.format(millis.div_euclid(1000)))
                    .collect::<ChartResult<Vec<_>>>()?;
                labels = Some(formatted);
                continue;
            }

            let kind = parse_line_kind(column_type)?;
            let name = raw.names.get(key).ok_or_else(|| {
                ChartError::MalformedInput(format!("column `{key}` has no name"))
            })?;
            let color_hex = raw.colors.get(key).ok_or_else(|| {
                ChartError::MalformedInput(format!("column `{key}` has no color"))
            })?;
            let color = Color::from_hex(color_hex)?;

            let pair_area =
                self.pair_area_lines && kind == LineKind::Line && chart_type == ChartType::Regular;
            if pair_area {
                lines.push(Line::new(values.clone(), name.clone(), color, kind));
                lines.push(Line::new(
                    values,
                    name.clone(),
                    color.with_alpha(self.area_alpha),
                    LineKind::Area,
                ));
            } else {
                lines.push(Line::new(values, name.clone(), color, kind));
            }
        }

        let labels = labels
            .ok_or_else(|| ChartError::MalformedInput("chart has no `x` column".to_owned()))?;
        debug!(
            lines = lines.len(),
            points = labels.len(),
            chart_type = ?chart_type,
            "parsed chart"
        );
        ChartData::new(labels, lines, chart_type)
    }
}

/// Parses one chart object with the default parser.
pub fn parse_chart(input: &str) -> ChartResult<ChartData> {
    ChartParser::<DateLabelFormatter>::default().parse_chart(input)
}

/// Parses a chart object or an array of them with the default parser.
pub fn parse_charts(input: &str) -> ChartResult<Vec<ChartData>> {
    ChartParser::<DateLabelFormatter>::default().parse_charts(input)
}

fn parse_line_kind(input: &str) -> ChartResult<LineKind> {
    match input {
        "line" => Ok(LineKind::Line),
        "bar" => Ok(LineKind::Bar),
        "area" => Ok(LineKind::Area),
        other => Err(ChartError::MalformedInput(format!(
            "unknown column type `{other}`"
        ))),
    }
}

fn split_column(column: &[Value]) -> ChartResult<(&str, Vec<i64>)> {
    let (head, tail) = column
        .split_first()
        .ok_or_else(|| ChartError::MalformedInput("column is empty".to_owned()))?;
    let key = head
        .as_str()
        .ok_or_else(|| ChartError::MalformedInput("column key must be a string".to_owned()))?;
    let values = tail
        .iter()
        .map(|value| {
            value.as_i64().ok_or_else(|| {
                ChartError::MalformedInput(format!("column `{key}` has non-integer value {value}"))
            })
        })
        .collect::<ChartResult<Vec<_>>>()?;
    Ok((key, values))
}
