use crossterm::event::KeyEvent;

use crate::category::Category;
use crate::config::Config;
use crate::input::Command;
use crate::session::Session;
use crate::templates::{CategoryInfo, TemplateProvider, TemplateStore};

pub const INCOMPLETE_LINE_NOTICE: &str = "Complete the line first!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Typing,
    Results,
}

/// Whether the event loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Metrics captured once per frame so rendering can stay read-only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub instant_wpm: f64,
    pub average_wpm: f64,
    pub accuracy: f64,
    pub elapsed_secs: f64,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            instant_wpm: 0.0,
            average_wpm: 0.0,
            accuracy: 100.0,
            elapsed_secs: 0.0,
        }
    }
}

#[derive(Debug)]
pub struct App<P: TemplateProvider = TemplateStore> {
    state: AppState,
    config: Config,
    provider: P,
    menu: Vec<CategoryInfo>,
    session: Option<Session>,
    notice: Option<&'static str>,
    metrics: MetricsSnapshot,
    viewport: (u16, u16),
}

impl<P: TemplateProvider> App<P> {
    pub fn new(config: Config, mut provider: P) -> Self {
        let menu = provider.category_info();
        let viewport = (config.min_width, config.min_height);
        Self {
            state: AppState::Menu,
            config,
            provider,
            menu,
            session: None,
            notice: None,
            metrics: MetricsSnapshot::default(),
            viewport,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn menu(&self) -> &[CategoryInfo] {
        &self.menu
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics
    }

    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    pub fn is_too_small(&self) -> bool {
        self.viewport.0 < self.config.min_width || self.viewport.1 < self.config.min_height
    }

    /// Start a session with random templates from `category`
    pub fn start_session(&mut self, category: Category) {
        let bodies = self
            .provider
            .random_templates(category, self.config.template_count);
        self.begin(Session::new(category, bodies));
    }

    /// Start a session on a single custom template
    pub fn start_custom(&mut self, prompt: &str) {
        self.begin(Session::new(Category::Custom, [prompt]));
    }

    fn begin(&mut self, session: Session) {
        tracing::info!(
            category = %session.category(),
            templates = session.templates().len(),
            chars = session.total_chars_all_lines(),
            "session started"
        );
        let has_lines = session.has_lines();
        self.session = Some(session);
        self.notice = None;
        self.metrics = MetricsSnapshot::default();
        self.state = AppState::Typing;
        if !has_lines {
            tracing::warn!("session has nothing to type");
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.state = AppState::Results;
        self.refresh_metrics();
        tracing::info!(
            wpm = self.metrics.instant_wpm,
            avg_wpm = self.metrics.average_wpm,
            accuracy = self.metrics.accuracy,
            elapsed_secs = self.metrics.elapsed_secs,
            "session finished"
        );
    }

    fn back_to_menu(&mut self) {
        if let (AppState::Typing, Some(session)) = (self.state, &self.session) {
            tracing::info!(progress = ?session.progress().as_tuple(), "session abandoned");
        }
        self.session = None;
        self.notice = None;
        self.state = AppState::Menu;
    }

    /// Re-read live metrics from the session. Call once per frame.
    pub fn refresh_metrics(&mut self) {
        if let Some(session) = self.session.as_mut() {
            self.metrics = MetricsSnapshot {
                instant_wpm: session.instant_wpm(),
                average_wpm: session.average_wpm(),
                accuracy: session.accuracy(),
                elapsed_secs: session.elapsed_seconds(),
            };
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Flow {
        self.handle_command(Command::from(key))
    }

    pub fn handle_command(&mut self, command: Command) -> Flow {
        if command == Command::Ignored {
            return Flow::Continue;
        }
        if command == Command::Interrupt {
            return Flow::Quit;
        }
        if self.is_too_small() {
            return self.on_too_small(command);
        }
        match self.state {
            AppState::Menu => self.on_menu(command),
            AppState::Typing => {
                self.on_typing(command);
                Flow::Continue
            }
            AppState::Results => {
                self.back_to_menu();
                Flow::Continue
            }
        }
    }

    fn on_too_small(&mut self, command: Command) -> Flow {
        match (self.state, command) {
            (AppState::Menu, Command::Escape | Command::Insert('q' | 'Q')) => Flow::Quit,
            (_, Command::Escape) => {
                self.back_to_menu();
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn on_menu(&mut self, command: Command) -> Flow {
        match command {
            Command::Escape | Command::Insert('q' | 'Q') => Flow::Quit,
            Command::Insert(key) => {
                if let Some(category) = Category::from_menu_key(key) {
                    self.start_session(category);
                }
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn on_typing(&mut self, command: Command) {
        self.notice = None;
        if command == Command::Escape {
            self.back_to_menu();
            return;
        }
        let Some(session) = self.session.as_mut() else {
            self.state = AppState::Menu;
            return;
        };

        match command {
            Command::Insert(c) => session.append_char(c),
            Command::Backspace => session.backspace(),
            Command::Submit => {
                if session.is_line_complete() {
                    if session.submit_line() {
                        self.finish();
                    }
                } else if !session.input().is_empty() {
                    self.notice = Some(INCOMPLETE_LINE_NOTICE);
                }
            }
            _ => {}
        }
    }
}
