mod observer;
mod presentation;
mod presentation_config;
mod viewport_controller;

pub use observer::{VisibilityChange, VisibilityObserver, VisibilityOutcome};
pub use presentation::{ChartPresentation, PresentationLine};
pub use presentation_config::PresentationConfig;
pub use viewport_controller::{ViewportController, YAxisLayout};
