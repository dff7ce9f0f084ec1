use ratatui::{
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType},
};

/// X (seconds) and Y (WPM) upper bounds for the results chart
pub fn compute_chart_params(coords: &[(f64, f64)]) -> (f64, f64) {
    let duration = coords.last().map_or(1.0, |&(t, _)| t).max(1.0);
    let highest = coords.iter().map(|&(_, wpm)| wpm).fold(0.0, f64::max);
    // keep a flat line off the top border
    (duration, (highest * 11.0 / 10.0).ceil().max(1.0))
}

/// Integers print bare, anything else with one decimal
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.1}")
    }
}

/// WPM over time. `data` must outlive the chart, so the caller owns it.
pub fn wpm_chart<'a>(data: &'a [(f64, f64)], line_style: Style, label_style: Style) -> Chart<'a> {
    let (duration, highest) = compute_chart_params(data);
    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .style(line_style)
        .graph_type(GraphType::Line)
        .data(data);

    Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([0.0, duration])
                .labels(vec![
                    Span::styled("0", label_style),
                    Span::styled(format_label(duration), label_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest])
                .labels(vec![
                    Span::styled("0", label_style),
                    Span::styled(format_label(highest), label_style),
                ]),
        )
}
