use tracing::{debug, trace};

use crate::core::aggregation::{Aggregation, strategy_for};
use crate::core::{ChartData, ChartType, Color, Extent, Line, LineKind, Path, PathSet, build_paths};
use crate::error::{ChartError, ChartResult};

use super::{PresentationConfig, VisibilityChange, VisibilityObserver, VisibilityOutcome};

/// A line together with its current visibility, aggregation and paths.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationLine {
    line: Line,
    is_visible: bool,
    aggregated_values: Vec<f64>,
    min_y: f64,
    max_y: f64,
    paths: PathSet,
}

impl PresentationLine {
    fn new(line: Line) -> Self {
        Self {
            line,
            is_visible: true,
            aggregated_values: Vec::new(),
            min_y: 0.0,
            max_y: 0.0,
            paths: PathSet::default(),
        }
    }

    fn apply(&mut self, aggregation: Aggregation, paths: PathSet) {
        self.aggregated_values = aggregation.values;
        self.min_y = aggregation.min_y;
        self.max_y = aggregation.max_y;
        self.paths = paths;
    }

    #[must_use]
    pub fn line(&self) -> &Line {
        &self.line
    }

    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.line.values
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.line.name
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.line.color
    }

    #[must_use]
    pub fn kind(&self) -> LineKind {
        self.line.kind
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    #[must_use]
    pub fn aggregated_values(&self) -> &[f64] {
        &self.aggregated_values
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    #[must_use]
    pub fn extent(&self) -> Extent {
        Extent::new(self.min_y, self.max_y)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.paths.path
    }

    #[must_use]
    pub fn preview_path(&self) -> &Path {
        &self.paths.preview_path
    }
}

/// Mutable per-chart presentation state.
///
/// Owns line visibility and keeps every line's aggregation, extent and paths
/// in sync with it. Each applied visibility change rebuilds the whole line set
/// before returning, because stacked and percentage layouts depend on the
/// visibility of every preceding line.
pub struct ChartPresentation {
    data: ChartData,
    config: PresentationConfig,
    lines: Vec<PresentationLine>,
    lower: f64,
    upper: f64,
    observers: Vec<Box<dyn VisibilityObserver>>,
}

impl ChartPresentation {
    /// Wraps chart data with the default configuration.
    #[must_use]
    pub fn new(data: ChartData) -> Self {
        Self::build(data, PresentationConfig::default())
    }

    pub fn with_config(data: ChartData, config: PresentationConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        Ok(Self::build(data, config))
    }

    fn build(data: ChartData, config: PresentationConfig) -> Self {
        let lines = data
            .lines()
            .iter()
            .cloned()
            .map(PresentationLine::new)
            .collect();
        let mut presentation = Self {
            data,
            config,
            lines,
            lower: 0.0,
            upper: 0.0,
            observers: Vec::new(),
        };
        presentation.relayout();
        debug!(
            lines = presentation.lines_count(),
            points = presentation.points_count(),
            chart_type = ?presentation.chart_type(),
            "chart presentation created"
        );
        presentation
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    #[must_use]
    pub fn config(&self) -> PresentationConfig {
        self.config
    }

    #[must_use]
    pub fn lines_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn points_count(&self) -> usize {
        self.data.points_count()
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.data.chart_type()
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        self.data.labels()
    }

    /// Lower bound of the visible lines' combined extent.
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound of the visible lines' combined extent.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[must_use]
    pub fn extent(&self) -> Extent {
        Extent::new(self.lower, self.upper)
    }

    #[must_use]
    pub fn lines(&self) -> &[PresentationLine] {
        &self.lines
    }

    /// # Panics
    ///
    /// Panics when `point >= points_count()`.
    #[must_use]
    pub fn label_at(&self, point: usize) -> &str {
        let labels = self.data.labels();
        assert!(
            point < labels.len(),
            "point index {point} out of range 0..{}",
            labels.len()
        );
        &labels[point]
    }

    /// # Panics
    ///
    /// Panics when `index >= lines_count()`.
    #[must_use]
    pub fn line_at(&self, index: usize) -> &PresentationLine {
        self.check_line_index(index);
        &self.lines[index]
    }

    #[must_use]
    pub fn get_line(&self, index: usize) -> Option<&PresentationLine> {
        self.lines.get(index)
    }

    /// # Panics
    ///
    /// Panics when `index >= lines_count()`.
    #[must_use]
    pub fn is_line_visible_at(&self, index: usize) -> bool {
        self.line_at(index).is_visible
    }

    pub fn visible_lines(&self) -> impl Iterator<Item = (usize, &PresentationLine)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_visible)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.lines.iter().filter(|line| line.is_visible).count()
    }

    /// Whether the line at `index` is drawn from a zero baseline.
    #[must_use]
    pub fn is_anchored(&self, index: usize) -> bool {
        match self.chart_type() {
            ChartType::Stacked | ChartType::Percentage => true,
            ChartType::Regular | ChartType::YScaled => self.line_at(index).kind().is_bar(),
        }
    }

    /// Shows or hides a line and rebuilds the layout.
    ///
    /// Hiding the only visible line is rejected without side effects.
    ///
    /// # Panics
    ///
    /// Panics when `index >= lines_count()`.
    pub fn set_line_visible(&mut self, visible: bool, index: usize) -> VisibilityOutcome {
        self.check_line_index(index);
        if self.lines[index].is_visible == visible {
            return VisibilityOutcome::Unchanged;
        }
        if !visible && self.visible_count() == 1 {
            debug!(index, "rejecting request to hide the last visible line");
            return VisibilityOutcome::Rejected;
        }

        self.lines[index].is_visible = visible;
        self.relayout();
        debug!(
            index,
            visible,
            lower = self.lower,
            upper = self.upper,
            "line visibility changed"
        );

        let change = VisibilityChange {
            index,
            visible,
            lower: self.lower,
            upper: self.upper,
        };
        for observer in &mut self.observers {
            observer.on_visibility_changed(change);
        }
        VisibilityOutcome::Applied
    }

    /// Flips the visibility of a line.
    ///
    /// # Panics
    ///
    /// Panics when `index >= lines_count()`.
    pub fn toggle_line(&mut self, index: usize) -> VisibilityOutcome {
        let visible = self.is_line_visible_at(index);
        self.set_line_visible(!visible, index)
    }

    /// Registers an observer with unique identifier.
    pub fn register_observer(&mut self, observer: Box<dyn VisibilityObserver>) -> ChartResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(ChartError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&observer_id) {
            return Err(ChartError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }

    fn check_line_index(&self, index: usize) {
        assert!(
            index < self.lines.len(),
            "line index {index} out of range 0..{}",
            self.lines.len()
        );
    }

    fn relayout(&mut self) {
        let chart_type = self.data.chart_type();
        let visibility: Vec<bool> = self.lines.iter().map(|line| line.is_visible).collect();
        let aggregations = strategy_for(chart_type).aggregate(self.data.lines(), &visibility);
        let paths = build_paths(
            chart_type,
            self.data.lines(),
            &aggregations,
            &visibility,
            self.config.preview_stride,
        );

        for ((line, aggregation), paths) in self.lines.iter_mut().zip(aggregations).zip(paths) {
            line.apply(aggregation, paths);
        }

        let (lower, upper) = self
            .lines
            .iter()
            .filter(|line| line.is_visible)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lower, upper), line| {
                (lower.min(line.min_y), upper.max(line.max_y))
            });
        self.lower = lower;
        self.upper = upper;
        trace!(
            chart_type = ?chart_type,
            visible = visibility.iter().filter(|visible| **visible).count(),
            lower,
            upper,
            "layout rebuilt"
        );
    }
}
