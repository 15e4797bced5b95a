use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Layout tuning shared by a presentation and its viewport controller.
///
/// This type is serializable so host applications can keep chart tuning next
/// to their other settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Number of y-axis ticks.
    #[serde(default = "default_y_tick_count")]
    pub y_tick_count: usize,
    /// Evenly spaced x-axis labels, not counting the right-edge label.
    #[serde(default = "default_x_label_count")]
    pub x_label_count: usize,
    /// Sampling stride of preview bar paths.
    #[serde(default = "default_preview_stride")]
    pub preview_stride: usize,
    /// Y padding is `round(span / padding_divisor)` on each side.
    #[serde(default = "default_padding_divisor")]
    pub padding_divisor: f64,
    /// The initial viewport shows the last `1 / initial_window_divisor` of the series.
    #[serde(default = "default_initial_window_divisor")]
    pub initial_window_divisor: usize,
    /// The viewport never narrows below `1 / min_window_divisor` of the series.
    #[serde(default = "default_min_window_divisor")]
    pub min_window_divisor: usize,
    /// Alpha of the filled area paired with a plain line.
    #[serde(default = "default_area_alpha")]
    pub area_alpha: f64,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            y_tick_count: default_y_tick_count(),
            x_label_count: default_x_label_count(),
            preview_stride: default_preview_stride(),
            padding_divisor: default_padding_divisor(),
            initial_window_divisor: default_initial_window_divisor(),
            min_window_divisor: default_min_window_divisor(),
            area_alpha: default_area_alpha(),
        }
    }
}

impl PresentationConfig {
    #[must_use]
    pub fn with_y_tick_count(mut self, count: usize) -> Self {
        self.y_tick_count = count;
        self
    }

    #[must_use]
    pub fn with_x_label_count(mut self, count: usize) -> Self {
        self.x_label_count = count;
        self
    }

    #[must_use]
    pub fn with_preview_stride(mut self, stride: usize) -> Self {
        self.preview_stride = stride;
        self
    }

    #[must_use]
    pub fn with_padding_divisor(mut self, divisor: f64) -> Self {
        self.padding_divisor = divisor;
        self
    }

    /// Sets initial and minimum window divisors.
    #[must_use]
    pub fn with_window_divisors(mut self, initial: usize, min: usize) -> Self {
        self.initial_window_divisor = initial;
        self.min_window_divisor = min;
        self
    }

    #[must_use]
    pub fn with_area_alpha(mut self, alpha: f64) -> Self {
        self.area_alpha = alpha;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.y_tick_count == 0 || self.x_label_count == 0 {
            return Err(ChartError::InvalidData(
                "tick and label counts must be > 0".to_owned(),
            ));
        }
        if self.preview_stride == 0 {
            return Err(ChartError::InvalidData(
                "preview stride must be > 0".to_owned(),
            ));
        }
        if !self.padding_divisor.is_finite() || self.padding_divisor <= 0.0 {
            return Err(ChartError::InvalidData(
                "padding divisor must be finite and > 0".to_owned(),
            ));
        }
        if self.initial_window_divisor == 0 || self.min_window_divisor == 0 {
            return Err(ChartError::InvalidData(
                "window divisors must be > 0".to_owned(),
            ));
        }
        if !self.area_alpha.is_finite() || !(0.0..=1.0).contains(&self.area_alpha) {
            return Err(ChartError::InvalidData(
                "area alpha must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse presentation config: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize presentation config: {e}"))
        })
    }
}

fn default_y_tick_count() -> usize {
    5
}

fn default_x_label_count() -> usize {
    5
}

fn default_preview_stride() -> usize {
    5
}

fn default_padding_divisor() -> f64 {
    10.0
}

fn default_initial_window_divisor() -> usize {
    5
}

fn default_min_window_divisor() -> usize {
    10
}

fn default_area_alpha() -> f64 {
    0.5
}
