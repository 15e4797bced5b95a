use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Visible index window `[min_index, max_index]` over a series of
/// `points_count` points.
///
/// Invariant: `min_index < max_index <= last_index`, and the window is never
/// narrower than `min_span`. A single-point series gets the degenerate window
/// `0..=0` with `min_span == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ViewportParts")]
pub struct Viewport {
    min_index: usize,
    max_index: usize,
    last_index: usize,
    min_span: usize,
}

#[derive(Deserialize)]
struct ViewportParts {
    min_index: usize,
    max_index: usize,
    last_index: usize,
    min_span: usize,
}

impl TryFrom<ViewportParts> for Viewport {
    type Error = ChartError;

    fn try_from(parts: ViewportParts) -> ChartResult<Self> {
        let degenerate = parts.last_index == 0;
        let ordered = if degenerate {
            parts.min_index == 0 && parts.max_index == 0 && parts.min_span == 0
        } else {
            parts.min_index < parts.max_index
                && parts.max_index <= parts.last_index
                && parts.min_span <= parts.max_index - parts.min_index
        };
        if !ordered {
            return Err(ChartError::InvalidData(format!(
                "viewport {}..={} with min span {} does not fit 0..={}",
                parts.min_index, parts.max_index, parts.min_span, parts.last_index
            )));
        }
        Ok(Self {
            min_index: parts.min_index,
            max_index: parts.max_index,
            last_index: parts.last_index,
            min_span: parts.min_span,
        })
    }
}

impl Viewport {
    /// Opens on the trailing `1 / initial_divisor` of the series.
    ///
    /// `min_divisor` bounds how narrow the window may get relative to the
    /// whole series.
    pub fn initial(
        points_count: usize,
        initial_divisor: usize,
        min_divisor: usize,
    ) -> ChartResult<Self> {
        if points_count == 0 {
            return Err(ChartError::InvalidData(
                "viewport needs at least one point".to_owned(),
            ));
        }
        if initial_divisor == 0 || min_divisor == 0 {
            return Err(ChartError::InvalidData(
                "viewport divisors must be > 0".to_owned(),
            ));
        }

        let last_index = points_count - 1;
        let min_span = (last_index / min_divisor).max(1).min(last_index);
        let span = (last_index / initial_divisor).max(min_span).min(last_index);
        Ok(Self {
            min_index: last_index - span,
            max_index: last_index,
            last_index,
            min_span,
        })
    }

    /// Window covering the whole series.
    pub fn full(points_count: usize, min_divisor: usize) -> ChartResult<Self> {
        Self::initial(points_count, 1, min_divisor)
    }

    #[must_use]
    pub fn min_index(self) -> usize {
        self.min_index
    }

    #[must_use]
    pub fn max_index(self) -> usize {
        self.max_index
    }

    #[must_use]
    pub fn last_index(self) -> usize {
        self.last_index
    }

    #[must_use]
    pub fn min_span(self) -> usize {
        self.min_span
    }

    #[must_use]
    pub fn span(self) -> usize {
        self.max_index - self.min_index
    }

    #[must_use]
    pub fn range(self) -> (usize, usize) {
        (self.min_index, self.max_index)
    }

    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        (self.min_index..=self.max_index).contains(&index)
    }

    /// Replaces the window. Both edges must lie inside the series and keep at
    /// least `min_span` apart.
    pub fn set_range(&mut self, min_index: usize, max_index: usize) -> ChartResult<()> {
        if self.is_degenerate() && min_index == 0 && max_index == 0 {
            return Ok(());
        }
        if min_index >= max_index || max_index > self.last_index {
            return Err(ChartError::InvalidData(format!(
                "viewport range {min_index}..={max_index} must be increasing and within 0..={}",
                self.last_index
            )));
        }
        if max_index - min_index < self.min_span {
            return Err(ChartError::InvalidData(format!(
                "viewport span {} is below the minimum of {}",
                max_index - min_index,
                self.min_span
            )));
        }
        self.min_index = min_index;
        self.max_index = max_index;
        Ok(())
    }

    /// Moves the window so it starts at `min_index`, keeping its width and
    /// clamping at both ends. Returns `true` when the window moved.
    pub fn pan_to(&mut self, min_index: isize) -> bool {
        let span = self.span();
        let max_start = self.last_index - span;
        let start = min_index.clamp(0, max_start as isize) as usize;
        if start == self.min_index {
            return false;
        }
        self.min_index = start;
        self.max_index = start + span;
        true
    }

    /// Shifts the window by `delta` points.
    pub fn pan_by(&mut self, delta: isize) -> bool {
        self.pan_to(self.min_index as isize + delta)
    }

    /// Drags the left edge. Values before the series start clamp to 0; moves
    /// that would make the window narrower than `min_span` are ignored.
    pub fn set_min_index(&mut self, min_index: isize) -> bool {
        let candidate = min_index.max(0) as usize;
        if candidate >= self.max_index || self.max_index - candidate < self.min_span {
            return false;
        }
        if candidate == self.min_index {
            return false;
        }
        self.min_index = candidate;
        true
    }

    /// Drags the right edge. Values past the series end clamp to the last
    /// index; moves that would make the window narrower than `min_span` are
    /// ignored.
    pub fn set_max_index(&mut self, max_index: isize) -> bool {
        let candidate = (max_index.max(0) as usize).min(self.last_index);
        if candidate <= self.min_index || candidate - self.min_index < self.min_span {
            return false;
        }
        if candidate == self.max_index {
            return false;
        }
        self.max_index = candidate;
        true
    }

    /// Fractional index at `fraction` (0..=1) of the window.
    #[must_use]
    pub fn index_at_fraction(self, fraction: f64) -> f64 {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.min_index as f64 + fraction * self.span() as f64
    }

    /// Fractional index under pixel `px` of a plot `width_px` wide.
    #[must_use]
    pub fn index_at_pixel(self, px: f64, width_px: f64) -> f64 {
        if !width_px.is_finite() || width_px <= 0.0 {
            return self.min_index as f64;
        }
        self.index_at_fraction(px / width_px)
    }

    /// Pixel position of a fractional index inside a plot `width_px` wide.
    ///
    /// A zero-width window maps everything to pixel 0.
    #[must_use]
    pub fn pixel_at_index(self, index: f64, width_px: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (index - self.min_index as f64) / self.span() as f64 * width_px
    }

    /// Whether the window has zero width, which only happens for a
    /// single-point series.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.min_index == self.max_index
    }
}
