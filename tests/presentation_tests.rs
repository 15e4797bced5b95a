use std::cell::RefCell;
use std::rc::Rc;

use chart_layout::api::{VisibilityChange, VisibilityObserver, VisibilityOutcome};
use chart_layout::core::{ChartData, ChartType, Color, Line, LineKind};
use chart_layout::{ChartError, ChartPresentation, PresentationConfig};

fn chart(chart_type: ChartType, kind: LineKind, series: &[&[i64]]) -> ChartData {
    let labels = (0..series[0].len()).map(|i| format!("p{i}")).collect();
    let lines = series
        .iter()
        .enumerate()
        .map(|(i, values)| Line::new(values.to_vec(), format!("y{i}"), Color::rgb(0.5, 0.5, 0.5), kind))
        .collect();
    ChartData::new(labels, lines, chart_type).expect("valid chart")
}

#[derive(Clone)]
struct RecordingObserver {
    id: String,
    changes: Rc<RefCell<Vec<VisibilityChange>>>,
}

impl RecordingObserver {
    fn new(id: impl Into<String>, changes: Rc<RefCell<Vec<VisibilityChange>>>) -> Self {
        Self {
            id: id.into(),
            changes,
        }
    }
}

impl VisibilityObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_visibility_changed(&mut self, change: VisibilityChange) {
        self.changes.borrow_mut().push(change);
    }
}

#[test]
fn new_presentation_shows_every_line() {
    let data = chart(ChartType::Regular, LineKind::Line, &[&[1, 2], &[3, 4]]);
    let presentation = ChartPresentation::new(data);

    assert_eq!(presentation.lines_count(), 2);
    assert_eq!(presentation.points_count(), 2);
    assert_eq!(presentation.visible_count(), 2);
    assert!(presentation.is_line_visible_at(0));
    assert!(presentation.is_line_visible_at(1));
    assert_eq!(presentation.label_at(1), "p1");
    assert_eq!(presentation.line_at(1).name(), "y1");
    assert!(presentation.get_line(2).is_none());
}

#[test]
fn hiding_the_last_visible_line_is_rejected() {
    let data = chart(ChartType::Stacked, LineKind::Bar, &[&[1, 2], &[3, 4]]);
    let mut presentation = ChartPresentation::new(data);

    assert_eq!(
        presentation.set_line_visible(false, 0),
        VisibilityOutcome::Applied
    );
    let before = presentation.line_at(1).clone();
    assert_eq!(
        presentation.set_line_visible(false, 1),
        VisibilityOutcome::Rejected
    );
    assert!(presentation.is_line_visible_at(1));
    assert_eq!(presentation.line_at(1), &before);
    assert_eq!(presentation.visible_count(), 1);
}

#[test]
fn setting_the_current_flag_is_a_no_op() {
    let data = chart(ChartType::Regular, LineKind::Line, &[&[1, 2], &[3, 4]]);
    let mut presentation = ChartPresentation::new(data);

    assert_eq!(
        presentation.set_line_visible(true, 0),
        VisibilityOutcome::Unchanged
    );
}

#[test]
fn toggle_flips_and_restores_layout() {
    let data = chart(ChartType::Stacked, LineKind::Bar, &[&[1, 2], &[3, 4]]);
    let mut presentation = ChartPresentation::new(data);
    let initial = presentation.lines().to_vec();

    assert!(presentation.toggle_line(0).is_applied());
    assert!(!presentation.is_line_visible_at(0));
    assert!(presentation.toggle_line(0).is_applied());
    assert_eq!(presentation.lines(), initial.as_slice());
    assert_eq!(presentation.upper(), 6.0);
}

#[test]
fn observers_receive_applied_changes_only() {
    let data = chart(ChartType::Stacked, LineKind::Bar, &[&[10, 20], &[5, 15]]);
    let mut presentation = ChartPresentation::new(data);

    let changes = Rc::new(RefCell::new(Vec::new()));
    presentation
        .register_observer(Box::new(RecordingObserver::new("recorder", changes.clone())))
        .expect("register observer");

    presentation.set_line_visible(false, 0);
    presentation.set_line_visible(false, 0);
    presentation.set_line_visible(false, 1);
    presentation.set_line_visible(true, 0);

    let changes = changes.borrow();
    assert_eq!(
        changes.as_slice(),
        &[
            VisibilityChange {
                index: 0,
                visible: false,
                lower: 0.0,
                upper: 15.0,
            },
            VisibilityChange {
                index: 0,
                visible: true,
                lower: 0.0,
                upper: 35.0,
            },
        ]
    );
}

#[test]
fn observer_registry_rejects_empty_and_duplicate_ids() {
    let data = chart(ChartType::Regular, LineKind::Line, &[&[1, 2]]);
    let mut presentation = ChartPresentation::new(data);
    let changes = Rc::new(RefCell::new(Vec::new()));

    presentation
        .register_observer(Box::new(RecordingObserver::new("a", changes.clone())))
        .expect("register a");
    let duplicate =
        presentation.register_observer(Box::new(RecordingObserver::new("a", changes.clone())));
    assert!(matches!(duplicate, Err(ChartError::InvalidData(_))));
    let empty = presentation.register_observer(Box::new(RecordingObserver::new("", changes)));
    assert!(matches!(empty, Err(ChartError::InvalidData(_))));

    assert_eq!(presentation.observer_count(), 1);
    assert!(presentation.has_observer("a"));
    assert!(presentation.unregister_observer("a"));
    assert!(!presentation.unregister_observer("a"));
    assert_eq!(presentation.observer_count(), 0);
}

#[test]
fn anchoring_depends_on_chart_type_and_kind() {
    let regular = ChartPresentation::new(chart(ChartType::Regular, LineKind::Line, &[&[1, 2]]));
    assert!(!regular.is_anchored(0));

    let bars = ChartPresentation::new(chart(ChartType::Regular, LineKind::Bar, &[&[1, 2]]));
    assert!(bars.is_anchored(0));

    let stacked = ChartPresentation::new(chart(ChartType::Stacked, LineKind::Line, &[&[1, 2]]));
    assert!(stacked.is_anchored(0));
}

#[test]
fn invalid_config_is_rejected() {
    let data = chart(ChartType::Regular, LineKind::Line, &[&[1, 2]]);
    let config = PresentationConfig::default().with_preview_stride(0);
    assert!(ChartPresentation::with_config(data, config).is_err());
}

#[test]
fn chart_data_rejects_bad_shapes() {
    let color = Color::rgb(0.0, 0.0, 0.0);
    let mismatch = ChartData::new(
        vec!["a".to_owned(), "b".to_owned()],
        vec![Line::new(vec![1], "y0", color, LineKind::Line)],
        ChartType::Regular,
    );
    assert!(matches!(mismatch, Err(ChartError::InvalidData(_))));

    let no_lines = ChartData::new(vec!["a".to_owned()], Vec::new(), ChartType::Regular);
    assert!(no_lines.is_err());

    let single_scaled = ChartData::new(
        vec!["a".to_owned()],
        vec![Line::new(vec![1], "y0", color, LineKind::Line)],
        ChartType::YScaled,
    );
    assert!(single_scaled.is_err());

    let bad_color = ChartData::new(
        vec!["a".to_owned()],
        vec![Line::new(vec![1], "y0", color.with_alpha(2.0), LineKind::Line)],
        ChartType::Regular,
    );
    assert!(bad_color.is_err());
}

#[test]
#[should_panic(expected = "line index 3 out of range")]
fn line_at_panics_out_of_range() {
    let presentation = ChartPresentation::new(chart(ChartType::Regular, LineKind::Line, &[&[1, 2]]));
    let _ = presentation.line_at(3);
}

#[test]
#[should_panic(expected = "point index 2 out of range")]
fn label_at_panics_out_of_range() {
    let presentation = ChartPresentation::new(chart(ChartType::Regular, LineKind::Line, &[&[1, 2]]));
    let _ = presentation.label_at(2);
}

#[test]
#[should_panic(expected = "line index 1 out of range")]
fn set_line_visible_panics_out_of_range() {
    let mut presentation =
        ChartPresentation::new(chart(ChartType::Regular, LineKind::Line, &[&[1, 2]]));
    presentation.set_line_visible(false, 1);
}
