use ratatui::{buffer::Buffer, layout::Rect};

use super::{bold, centered_x, cyan, green, put, red};
use crate::templates::CategoryInfo;

pub const TITLE: &str = "⚡ TERMTYPE - WPM TEST ⚡";
const SUBTITLE: &str = "Select Template Category:";
const INSTRUCTIONS: &str = "Press number key to select category, 'q' to quit";

/// Category picker. Rows start at 7 and are two apart.
pub fn render_menu(categories: &[CategoryInfo], area: Rect, buf: &mut Buffer) {
    put(buf, area, centered_x(area, TITLE), area.y + 2, TITLE, cyan().patch(bold()));
    put(buf, area, centered_x(area, SUBTITLE), area.y + 4, SUBTITLE, Default::default());

    let x = area.x + area.width / 4;
    let mut y = area.y + 7;
    for (idx, info) in categories.iter().enumerate() {
        let name_style = if info.count > 0 { green() } else { red() };
        put(buf, area, x, y, &format!("[{}]", idx + 1), Default::default());
        put(buf, area, x + 4, y, info.name, name_style.patch(bold()));
        put(buf, area, x + 30, y, &format!("({} templates)", info.count), Default::default());
        y += 2;
    }
    put(buf, area, x, y, "[q]", Default::default());
    put(buf, area, x + 4, y, "Quit", red());

    put(buf, area, area.x + 2, area.bottom().saturating_sub(3), INSTRUCTIONS, cyan());
}
