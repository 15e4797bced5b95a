use serde::{Deserialize, Serialize};

/// Emitted after a visibility toggle has been applied and the layout rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityChange {
    pub index: usize,
    pub visible: bool,
    /// Combined extent of the visible lines after the change.
    pub lower: f64,
    pub upper: f64,
}

/// Result of a `set_line_visible` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibilityOutcome {
    /// Flag changed, layout rebuilt, observers notified.
    Applied,
    /// Flag already had the requested value.
    Unchanged,
    /// Hiding would leave no visible line.
    Rejected,
}

impl VisibilityOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Hook for the rendering layer to follow visibility changes.
///
/// Observers are called synchronously, in registration order, after the
/// presentation has finished rebuilding every line.
pub trait VisibilityObserver {
    fn id(&self) -> &str;
    fn on_visibility_changed(&mut self, change: VisibilityChange);
}
