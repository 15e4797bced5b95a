//! chart-layout: data transformation and layout engine for time-series charts.
//!
//! Raw series go through a per-chart-type aggregation strategy (identity,
//! stacked, percentage), then through a path builder that emits data-space
//! geometry. `ChartPresentation` owns line visibility and keeps aggregations,
//! extents and paths current; `ViewportController` fits axes to the visible
//! window; `interaction` answers crosshair lookups. Rendering is left to the
//! host.

pub mod api;
pub mod core;
pub mod error;
pub mod ingest;
pub mod interaction;
pub mod telemetry;

pub use api::{ChartPresentation, PresentationConfig, ViewportController};
pub use error::{ChartError, ChartResult};
