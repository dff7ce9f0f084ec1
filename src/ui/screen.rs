use ratatui::{buffer::Buffer, layout::Rect};

use super::{menu, put, red, results, typing};
use crate::{
    app::{App, AppState},
    templates::TemplateProvider,
};

/// A UI Screen boundary: draws one app state
pub trait Screen<P: TemplateProvider> {
    fn render(&self, app: &App<P>, area: Rect, buf: &mut Buffer);
}

pub struct MenuScreen;

impl<P: TemplateProvider> Screen<P> for MenuScreen {
    fn render(&self, app: &App<P>, area: Rect, buf: &mut Buffer) {
        menu::render_menu(app.menu(), area, buf);
    }
}

pub struct TypingScreen;

impl<P: TemplateProvider> Screen<P> for TypingScreen {
    fn render(&self, app: &App<P>, area: Rect, buf: &mut Buffer) {
        if let Some(session) = app.session() {
            typing::render_typing(session, app.metrics(), app.notice(), area, buf);
        }
    }
}

pub struct ResultsScreen;

impl<P: TemplateProvider> Screen<P> for ResultsScreen {
    fn render(&self, app: &App<P>, area: Rect, buf: &mut Buffer) {
        let timeline = app.session().map(|s| s.wpm_timeline()).unwrap_or_default();
        results::render_results(app.metrics(), timeline, area, buf);
    }
}

/// Shown instead of any other screen when the terminal is below the minimum size
pub struct TooSmallScreen;

impl<P: TemplateProvider> Screen<P> for TooSmallScreen {
    fn render(&self, app: &App<P>, area: Rect, buf: &mut Buffer) {
        let config = app.config();
        let lines = [
            format!(
                "Terminal too small! Please resize to at least {}x{}.",
                config.min_width, config.min_height
            ),
            format!("Current: {}x{}", area.width, area.height),
            "Press q to quit...".to_string(),
        ];
        for (i, line) in lines.iter().enumerate() {
            let style = if i == 0 { red() } else { Default::default() };
            put(buf, area, area.x, area.y + i as u16, line, style);
        }
    }
}

/// Helper to construct the screen for the current state
pub fn current_screen<P: TemplateProvider>(state: AppState) -> Box<dyn Screen<P>> {
    match state {
        AppState::Menu => Box::new(MenuScreen),
        AppState::Typing => Box::new(TypingScreen),
        AppState::Results => Box::new(ResultsScreen),
    }
}
