use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{bold, cyan, dim, green, put, red};
use crate::app::MetricsSnapshot;
use crate::clock::Clock;
use crate::session::{CharStatus, Session};

const INSTRUCTIONS: &str = "Enter: Submit line | Backspace: Delete | ESC: Menu";
const MAX_BAR_WIDTH: u16 = 50;
const CURSOR: &str = "█";

pub fn render_typing<C: Clock>(
    session: &Session<C>,
    metrics: MetricsSnapshot,
    notice: Option<&str>,
    area: Rect,
    buf: &mut Buffer,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // top padding
            Constraint::Min(1),    // template
            Constraint::Length(2), // progress bar
            Constraint::Length(1), // notice
            Constraint::Length(1), // instructions
            Constraint::Length(1), // padding
            Constraint::Length(1), // status bar
        ])
        .split(area);

    render_content(session, chunks[1], buf);
    render_progress_bar(session, chunks[2], buf);
    if let Some(notice) = notice {
        put(buf, chunks[3], chunks[3].x + 2, chunks[3].y, notice, red());
    }
    put(buf, chunks[4], chunks[4].x + 2, chunks[4].y, INSTRUCTIONS, cyan());
    Paragraph::new(status_bar(session, metrics))
        .style(cyan())
        .render(chunks[6], buf);
}

/// Bottom status line with live metrics and position
pub fn status_bar<C: Clock>(session: &Session<C>, metrics: MetricsSnapshot) -> String {
    let p = session.progress();
    format!(
        " WPM: {:>5.1} (avg: {:>5.1}) | Accuracy: {:>5.1}% | Template: {}/{} | Line: {}/{} | Chars: {}/{} | {} ",
        metrics.instant_wpm,
        metrics.average_wpm,
        metrics.accuracy,
        p.template,
        p.total_templates,
        p.line,
        p.total_lines,
        p.completed_chars,
        p.total_chars,
        session.category().display_name(),
    )
}

/// Template lines with per-character feedback. Returns the lines and the
/// row of the current line, used to keep it on screen.
pub fn content_lines<C: Clock>(session: &Session<C>) -> (Vec<Line<'static>>, usize) {
    let p = session.progress();
    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "Template {} of {} (Line {}/{})",
                p.template, p.total_templates, p.line, p.total_lines
            ),
            cyan().patch(bold()),
        )),
        Line::default(),
    ];

    let current = if session.is_complete() {
        usize::MAX
    } else {
        session.line_index()
    };
    let mut current_row = 0;

    for (i, line) in session.current_template().lines().iter().enumerate() {
        let text = line.to_string();
        if i < current {
            lines.push(Line::from(vec![
                Span::raw("✓ "),
                Span::styled(text, green()),
            ]));
        } else if i == current {
            current_row = lines.len();
            let mut spans = vec![Span::raw("▶ ")];
            spans.extend(line.chars().iter().enumerate().map(|(pos, c)| {
                let style = match session.check_character(pos) {
                    CharStatus::Correct => green().patch(bold()),
                    CharStatus::Incorrect => red().patch(bold()),
                    CharStatus::Pending => Default::default(),
                };
                Span::styled(c.to_string(), style)
            }));
            lines.push(Line::from(spans));

            if !session.input().is_empty() {
                lines.push(input_line(session, line.chars()));
            }
        } else {
            lines.push(Line::from(vec![Span::raw("  "), Span::styled(text, dim())]));
        }
        lines.push(Line::default());
    }

    (lines, current_row)
}

/// What the user typed so far, coloured against the target
fn input_line<C: Clock>(session: &Session<C>, target: &[char]) -> Line<'static> {
    let mut spans = vec![Span::raw("You: ")];
    spans.extend(session.input().iter().enumerate().map(|(pos, c)| {
        let style = if target.get(pos) == Some(c) {
            green()
        } else {
            red()
        };
        Span::styled(c.to_string(), style)
    }));
    spans.push(Span::raw(CURSOR));

    if session.is_line_complete() {
        spans.push(Span::styled(" ✓ Press Enter", green()));
    } else {
        let remaining = target.len().saturating_sub(session.input().len());
        spans.push(Span::styled(format!(" ({remaining} left)"), cyan()));
    }
    Line::from(spans)
}

fn render_content<C: Clock>(session: &Session<C>, area: Rect, buf: &mut Buffer) {
    let inner = Rect {
        x: area.x + 2,
        width: area.width.saturating_sub(4),
        ..area
    };
    let (lines, current_row) = content_lines(session);
    let height = inner.height as usize;
    let offset = current_row.saturating_sub(height / 3);
    let overflow = lines.len() > offset + height;

    Paragraph::new(lines)
        .scroll((offset as u16, 0))
        .render(inner, buf);

    if overflow && inner.height > 0 {
        let last = inner.bottom() - 1;
        for x in inner.left()..inner.right() {
            buf[(x, last)].reset();
        }
        put(buf, inner, inner.x, last, "...", dim());
    }
}

fn render_progress_bar<C: Clock>(session: &Session<C>, area: Rect, buf: &mut Buffer) {
    let ratio = session.progress().ratio();
    let bar_width = MAX_BAR_WIDTH.min(area.width.saturating_sub(25));
    let filled = (bar_width as f64 * ratio) as u16;

    let line = Line::from(vec![
        Span::raw("Progress: ["),
        Span::styled(CURSOR.repeat(filled as usize), green()),
        Span::raw("░".repeat((bar_width - filled) as usize)),
        Span::raw(format!("] {:.1}%", ratio * 100.0)),
    ]);
    let row = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    if area.height > 1 {
        line.render(row, buf);
    }
}
