use approx::assert_abs_diff_eq;
use chart_layout::{ChartPresentation, ViewportController};
use chart_layout::core::{ChartData, ChartType, Color, Line, LineKind, strategy_for};

fn chart(chart_type: ChartType, kind: LineKind, series: &[&[i64]]) -> ChartData {
    let labels = (0..series[0].len()).map(|i| format!("p{i}")).collect();
    let lines = series
        .iter()
        .enumerate()
        .map(|(i, values)| Line::new(values.to_vec(), format!("y{i}"), Color::rgb(0.2, 0.4, 0.6), kind))
        .collect();
    ChartData::new(labels, lines, chart_type).expect("valid chart")
}

#[test]
fn strategy_lookup_matches_chart_type() {
    for chart_type in [
        ChartType::Regular,
        ChartType::YScaled,
        ChartType::Stacked,
        ChartType::Percentage,
    ] {
        assert_eq!(strategy_for(chart_type).chart_type(), chart_type);
    }
}

#[test]
fn regular_lines_use_identity_and_combined_extent() {
    let data = chart(ChartType::Regular, LineKind::Line, &[&[10, 20, 30], &[5, 15, 25]]);
    let presentation = ChartPresentation::new(data);

    assert_eq!(presentation.line_at(0).aggregated_values(), &[10.0, 20.0, 30.0]);
    assert_eq!(presentation.line_at(1).aggregated_values(), &[5.0, 15.0, 25.0]);
    assert_eq!(presentation.line_at(1).min_y(), 5.0);
    assert_eq!(presentation.lower(), 5.0);
    assert_eq!(presentation.upper(), 30.0);
}

#[test]
fn regular_bars_are_anchored_at_zero() {
    let data = chart(ChartType::Regular, LineKind::Bar, &[&[10, 20, 30]]);
    let presentation = ChartPresentation::new(data);

    let line = presentation.line_at(0);
    assert_eq!(line.min_y(), 0.0);
    assert_eq!(line.max_y(), 30.0);
    assert_eq!(presentation.lower(), 0.0);
}

#[test]
fn y_scaled_keeps_extents_per_line() {
    let data = chart(ChartType::YScaled, LineKind::Line, &[&[1, 2, 3], &[100, 300, 200]]);
    let presentation = ChartPresentation::new(data);

    assert_eq!(presentation.line_at(0).extent().lower, 1.0);
    assert_eq!(presentation.line_at(0).extent().upper, 3.0);
    assert_eq!(presentation.line_at(1).extent().lower, 100.0);
    assert_eq!(presentation.line_at(1).extent().upper, 300.0);
}

#[test]
fn y_scaled_bars_are_anchored_at_zero_like_regular_bars() {
    let data = chart(ChartType::YScaled, LineKind::Bar, &[&[10, 20, 30], &[1, 2, 3]]);
    let presentation = ChartPresentation::new(data);
    let controller = ViewportController::full(&presentation).expect("controller");

    let line = presentation.line_at(0);
    assert_eq!(line.min_y(), 0.0);
    assert_eq!(line.max_y(), 30.0);
    assert_eq!(line.path().max_y(), 30.0);

    let axes = controller.y_axes(&presentation);
    assert_eq!((axes[0].extent.lower, axes[0].extent.upper), (0.0, 30.0));
    assert_eq!(presentation.line_at(1).min_y(), 0.0);
}

#[test]
fn stacked_lines_accumulate_over_previous_visible_line() {
    let data = chart(ChartType::Stacked, LineKind::Bar, &[&[10, 20, 30], &[5, 15, 25]]);
    let mut presentation = ChartPresentation::new(data);

    assert_eq!(presentation.line_at(0).aggregated_values(), &[10.0, 20.0, 30.0]);
    assert_eq!(presentation.line_at(1).aggregated_values(), &[15.0, 35.0, 55.0]);
    assert_eq!(presentation.line_at(1).min_y(), 0.0);
    assert_eq!(presentation.line_at(1).max_y(), 55.0);

    assert!(presentation.set_line_visible(false, 0).is_applied());
    assert_eq!(presentation.line_at(1).aggregated_values(), &[5.0, 15.0, 25.0]);
    // Hidden lines still stack on the current baseline.
    assert_eq!(presentation.line_at(0).aggregated_values(), &[10.0, 20.0, 30.0]);
    assert_eq!(presentation.lower(), 0.0);
    assert_eq!(presentation.upper(), 25.0);
}

#[test]
fn stacked_hidden_middle_line_does_not_advance_baseline() {
    let data = chart(
        ChartType::Stacked,
        LineKind::Bar,
        &[&[1, 1], &[10, 10], &[100, 100]],
    );
    let mut presentation = ChartPresentation::new(data);
    presentation.set_line_visible(false, 1);

    assert_eq!(presentation.line_at(1).aggregated_values(), &[11.0, 11.0]);
    assert_eq!(presentation.line_at(2).aggregated_values(), &[101.0, 101.0]);
}

#[test]
fn percentage_lines_hold_cumulative_share() {
    let data = chart(
        ChartType::Percentage,
        LineKind::Area,
        &[&[30, 10, 60], &[70, 90, 40]],
    );
    let presentation = ChartPresentation::new(data);

    let bottom = presentation.line_at(0).aggregated_values();
    let top = presentation.line_at(1).aggregated_values();
    assert_abs_diff_eq!(bottom[0], 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bottom[1], 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bottom[2], 60.0, epsilon = 1e-9);
    for value in top {
        assert_abs_diff_eq!(*value, 100.0, epsilon = 1e-9);
    }

    assert_eq!(presentation.line_at(0).max_y(), 60.0);
    assert_eq!(presentation.line_at(1).max_y(), 100.0);
    assert_eq!(presentation.lower(), 0.0);
    assert_eq!(presentation.upper(), 100.0);
}

#[test]
fn percentage_zero_sum_index_is_zero_for_every_line() {
    let data = chart(ChartType::Percentage, LineKind::Area, &[&[0, 50], &[0, 50]]);
    let presentation = ChartPresentation::new(data);

    assert_eq!(presentation.line_at(0).aggregated_values()[0], 0.0);
    assert_eq!(presentation.line_at(1).aggregated_values()[0], 0.0);
    assert_abs_diff_eq!(presentation.line_at(0).aggregated_values()[1], 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(presentation.line_at(1).aggregated_values()[1], 100.0, epsilon = 1e-9);
}

#[test]
fn percentage_all_zero_series_stays_flat() {
    let data = chart(ChartType::Percentage, LineKind::Area, &[&[0, 0], &[0, 0]]);
    let presentation = ChartPresentation::new(data);

    for line in presentation.lines() {
        assert!(line.aggregated_values().iter().all(|value| *value == 0.0));
        assert_eq!(line.max_y(), 0.0);
    }
}

#[test]
fn percentage_hidden_line_collapses_onto_previous_visible_curve() {
    let data = chart(
        ChartType::Percentage,
        LineKind::Area,
        &[&[30, 10, 60], &[70, 90, 40], &[10, 10, 10]],
    );
    let mut presentation = ChartPresentation::new(data);
    assert!(presentation.set_line_visible(false, 1).is_applied());

    let bottom = presentation.line_at(0).aggregated_values().to_vec();
    assert_eq!(presentation.line_at(1).aggregated_values(), bottom.as_slice());
    assert_abs_diff_eq!(bottom[0], 75.0, epsilon = 1e-9);
    for value in presentation.line_at(2).aggregated_values() {
        assert_abs_diff_eq!(*value, 100.0, epsilon = 1e-9);
    }
}

#[test]
fn percentage_hidden_first_line_is_flat_at_zero() {
    let data = chart(ChartType::Percentage, LineKind::Area, &[&[30, 10], &[70, 90]]);
    let mut presentation = ChartPresentation::new(data);
    presentation.set_line_visible(false, 0);

    assert_eq!(presentation.line_at(0).aggregated_values(), &[0.0, 0.0]);
    assert_eq!(presentation.line_at(0).max_y(), 0.0);
    assert_abs_diff_eq!(presentation.line_at(1).aggregated_values()[0], 100.0, epsilon = 1e-9);
}
