use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::{bold, charting, cyan, green};
use crate::app::MetricsSnapshot;
use crate::metrics::TimeSeriesPoint;
use crate::util;

const HEADLINE: &str = "TEST COMPLETE!";
const CONTINUE: &str = "Press any key to continue...";
const BOX_WIDTH: u16 = 40;

pub fn render_results(
    metrics: MetricsSnapshot,
    timeline: &[TimeSeriesPoint],
    area: Rect,
    buf: &mut Buffer,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(8), // summary box
            Constraint::Min(1),    // chart
            Constraint::Length(1), // spread
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let box_area = centered(chunks[0], BOX_WIDTH);
    Paragraph::new(summary_lines(metrics))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(cyan()))
        .render(box_area, buf);

    let coords: Vec<(f64, f64)> = timeline.iter().copied().map(Into::into).collect();
    if !coords.is_empty() {
        charting::wpm_chart(&coords, Style::default().fg(Color::Magenta), bold())
            .render(chunks[1], buf);
    }

    let wpms: Vec<f64> = timeline.iter().map(|p| p.wpm).collect();
    if let Some(sd) = util::std_dev(&wpms) {
        Paragraph::new(format!("{} samples   {sd:.2} sd", wpms.len()))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }

    Paragraph::new(Span::styled(CONTINUE, cyan()))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
}

pub fn summary_lines(metrics: MetricsSnapshot) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(HEADLINE, green().patch(bold()))),
        Line::default(),
        Line::from(format!("Final WPM: {:.1}", metrics.instant_wpm)),
        Line::from(format!("Avg WPM:   {:.1}", metrics.average_wpm)),
        Line::from(format!("Accuracy:  {:.1}%", metrics.accuracy)),
        Line::from(format!("Time:      {:.1}s", metrics.elapsed_secs)),
    ]
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
