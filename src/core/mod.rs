pub mod aggregation;
pub mod axis;
pub mod color;
pub mod path;
pub mod types;
pub mod viewport;

pub use aggregation::{
    Aggregation, AggregationStrategy, PercentageAggregation, RegularAggregation,
    StackedAggregation, YScaledAggregation, strategy_for,
};
pub use axis::{AxisLabel, AxisTicks, Extent, axis_ticks, pad_extent, windowed_extent, x_axis_labels};
pub use color::Color;
pub use path::{
    Path, PathCommand, PathPoint, PathSet, build_paths, make_bar_path, make_bar_preview_path,
    make_line_path, make_percent_line_path,
};
pub use types::{ChartData, ChartType, Line, LineKind};
pub use viewport::Viewport;
