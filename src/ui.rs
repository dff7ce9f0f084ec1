pub mod charting;
pub mod menu;
pub mod results;
pub mod screen;
pub mod typing;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::{app::App, templates::TemplateProvider};
use screen::Screen;

pub(crate) fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn green() -> Style {
    Style::default().fg(Color::Green)
}

pub(crate) fn red() -> Style {
    Style::default().fg(Color::Red)
}

pub(crate) fn cyan() -> Style {
    Style::default().fg(Color::Cyan)
}

pub(crate) fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

/// x at which `text` is horizontally centred in `area`
pub(crate) fn centered_x(area: Rect, text: &str) -> u16 {
    let half_text = (text.width() / 2) as u16;
    area.x + (area.width / 2).saturating_sub(half_text)
}

/// Write `text` at (x, y) clipped to `area`; rows outside the area are skipped
pub(crate) fn put(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, style: Style) {
    if y < area.top() || y >= area.bottom() || x >= area.right() {
        return;
    }
    let max_width = (area.right() - x) as usize;
    buf.set_stringn(x, y, text, max_width, style);
}

impl<P: TemplateProvider> Widget for &App<P> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (min_w, min_h) = (self.config().min_width, self.config().min_height);
        if area.width < min_w || area.height < min_h {
            screen::TooSmallScreen.render(self, area, buf);
            return;
        }
        screen::current_screen(self.state()).render(self, area, buf);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

    use crate::{app::App, templates::TemplateProvider};

    /// Render the app into a fresh buffer and return it row by row
    pub fn render_rows<P: TemplateProvider>(app: &App<P>, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);

        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    pub fn contains(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|r| r.contains(needle))
    }
}
