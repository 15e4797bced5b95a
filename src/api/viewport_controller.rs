use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{
    AxisLabel, AxisTicks, ChartType, Extent, Viewport, axis_ticks, pad_extent, windowed_extent,
    x_axis_labels,
};
use crate::error::ChartResult;
use crate::interaction::Crosshair;

use super::{ChartPresentation, PresentationConfig};

/// Y-axis fitted to the current viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisLayout {
    /// Line owning this axis on y-scaled charts; `None` for a shared axis.
    pub line_index: Option<usize>,
    /// Data extent inside the viewport, before padding.
    pub extent: Extent,
    pub ticks: AxisTicks,
}

/// Owns the visible window of one chart and derives axes from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportController {
    viewport: Viewport,
    config: PresentationConfig,
}

impl ViewportController {
    /// Opens on the trailing part of the presentation's series.
    pub fn new(presentation: &ChartPresentation) -> ChartResult<Self> {
        let config = presentation.config();
        let viewport = Viewport::initial(
            presentation.points_count(),
            config.initial_window_divisor,
            config.min_window_divisor,
        )?;
        Ok(Self { viewport, config })
    }

    /// Opens on the whole series.
    pub fn full(presentation: &ChartPresentation) -> ChartResult<Self> {
        let config = presentation.config();
        let viewport = Viewport::full(presentation.points_count(), config.min_window_divisor)?;
        Ok(Self { viewport, config })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_range(&mut self, min_index: usize, max_index: usize) -> ChartResult<()> {
        self.viewport.set_range(min_index, max_index)?;
        debug!(min_index, max_index, "viewport range set");
        Ok(())
    }

    /// Drags the whole window. Returns `true` when it moved.
    pub fn pan_to(&mut self, min_index: isize) -> bool {
        let moved = self.viewport.pan_to(min_index);
        self.trace_change(moved, "viewport panned");
        moved
    }

    pub fn pan_by(&mut self, delta: isize) -> bool {
        let moved = self.viewport.pan_by(delta);
        self.trace_change(moved, "viewport panned");
        moved
    }

    /// Drags the left handle. Returns `true` when the window changed.
    pub fn set_min_index(&mut self, min_index: isize) -> bool {
        let moved = self.viewport.set_min_index(min_index);
        self.trace_change(moved, "viewport left edge moved");
        moved
    }

    /// Drags the right handle. Returns `true` when the window changed.
    pub fn set_max_index(&mut self, max_index: isize) -> bool {
        let moved = self.viewport.set_max_index(max_index);
        self.trace_change(moved, "viewport right edge moved");
        moved
    }

    /// Drags the whole window to start under pixel `px` of a preview strip
    /// `width_px` wide.
    pub fn pan_to_preview_pixel(&mut self, px: f64, width_px: f64) -> bool {
        if !px.is_finite() || !width_px.is_finite() || width_px <= 0.0 {
            return false;
        }
        let index = (px / width_px * self.viewport.last_index() as f64).floor() as isize;
        self.pan_to(index)
    }

    /// Y-axes for the visible lines inside the current window.
    ///
    /// Y-scaled charts get one axis per visible line; every other chart type
    /// shares a single axis. Percentage charts keep their full 0..100 range.
    #[must_use]
    pub fn y_axes(&self, presentation: &ChartPresentation) -> SmallVec<[YAxisLayout; 2]> {
        let chart_type = presentation.chart_type();
        if chart_type == ChartType::YScaled {
            return presentation
                .visible_lines()
                .map(|(index, line)| {
                    let anchored = presentation.is_anchored(index);
                    let extent = windowed_extent(
                        [(line.aggregated_values(), anchored)],
                        self.viewport,
                    )
                    .unwrap_or_else(|| line.extent());
                    self.layout(Some(index), extent, chart_type, anchored)
                })
                .collect();
        }

        let anchored = presentation
            .visible_lines()
            .all(|(index, _)| presentation.is_anchored(index));
        let extent = if chart_type == ChartType::Percentage {
            presentation.extent()
        } else {
            windowed_extent(
                presentation
                    .visible_lines()
                    .map(|(index, line)| (line.aggregated_values(), presentation.is_anchored(index))),
                self.viewport,
            )
            .unwrap_or_else(|| presentation.extent())
        };

        let mut axes = SmallVec::new();
        axes.push(self.layout(None, extent, chart_type, anchored));
        axes
    }

    /// Labels for the x-axis under the current window.
    #[must_use]
    pub fn x_axis_labels(&self, presentation: &ChartPresentation) -> Vec<AxisLabel> {
        x_axis_labels(presentation.labels(), self.viewport, self.config.x_label_count)
    }

    /// Crosshair under pixel `px` of a plot `width_px` wide.
    #[must_use]
    pub fn crosshair_at_pixel(
        &self,
        presentation: &ChartPresentation,
        px: f64,
        width_px: f64,
    ) -> Crosshair {
        Crosshair::at(presentation, self.viewport.index_at_pixel(px, width_px))
    }

    fn layout(
        &self,
        line_index: Option<usize>,
        extent: Extent,
        chart_type: ChartType,
        anchored: bool,
    ) -> YAxisLayout {
        let padded = pad_extent(extent, chart_type, anchored, self.config.padding_divisor);
        YAxisLayout {
            line_index,
            extent,
            ticks: axis_ticks(padded.lower, padded.upper, self.config.y_tick_count),
        }
    }

    fn trace_change(&self, moved: bool, message: &'static str) {
        if moved {
            let (min_index, max_index) = self.viewport.range();
            trace!(min_index, max_index, "{message}");
        }
    }
}
