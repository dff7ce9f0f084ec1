use std::io::{self, stdin};
use std::path::PathBuf;

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use termtype::{
    app::{App, Flow},
    app_dirs::AppDirs,
    category::Category,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    templates::{self, TemplateStore},
};

/// terminal typing trainer with multi-line templates, live wpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// start straight into a session for this category
    #[clap(short = 'c', long, value_enum)]
    category: Option<Category>,

    /// number of templates per session
    #[clap(short = 'n', long)]
    count: Option<usize>,

    /// custom prompt to type; a literal \n separates lines
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// directory holding one sub-directory of .txt templates per category
    #[clap(long)]
    templates_dir: Option<PathBuf>,

    /// log filter, overridden by the TERMTYPE_LOG environment variable
    #[clap(long, default_value = "info")]
    log_level: String,

    /// do not install the bundled sample templates
    #[clap(long)]
    no_samples: bool,
}

impl Cli {
    /// Command line flags win over the config file
    fn apply(&self, config: &mut Config) {
        if let Some(count) = self.count {
            config.template_count = count;
        }
        if let Some(dir) = &self.templates_dir {
            config.templates_dir = Some(dir.clone());
        }
        if self.no_samples {
            config.install_samples = false;
        }
        if self.category.is_some() {
            config.default_category = self.category;
        }
    }

    fn prompt_text(&self) -> Option<String> {
        self.prompt.as_ref().map(|p| p.replace("\\n", "\n"))
    }
}

fn load_config(cli: &Cli) -> Config {
    let store = FileConfigStore::new();
    let mut config = store.load();
    if !store.exists() {
        match store.save(&config) {
            Ok(()) => tracing::info!(path = %store.path().display(), "wrote default config"),
            Err(err) => tracing::warn!(%err, "could not write default config"),
        }
    }
    cli.apply(&mut config);
    config
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    // keep going without a log file; the TUI owns stdout
    let _ = logging::init_logging(&AppDirs::log_path(), &cli.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let config = load_config(&cli);
    let root = config.templates_root();
    if config.install_samples {
        match templates::install_samples(&root) {
            Ok(written) if !written.is_empty() => tracing::info!(
                count = written.len(),
                root = %root.display(),
                "installed sample templates"
            ),
            Ok(_) => {}
            Err(err) => tracing::warn!(%err, "could not install sample templates"),
        }
    }

    let mut app = App::new(config, TemplateStore::new(&root));
    if let Some(prompt) = cli.prompt_text() {
        app.start_custom(&prompt);
    } else if let Some(category) = app.config().default_category {
        app.start_session(category);
    }

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err).context("entering alternate screen");
    }

    let result = Terminal::new(CrosstermBackend::new(stdout))
        .context("creating terminal")
        .and_then(|mut terminal| {
            let run = start_tui(&mut terminal, &mut app);
            let _ = terminal.show_cursor();
            run
        });

    disable_raw_mode().context("disabling raw mode")?;
    execute!(io::stdout(), LeaveAlternateScreen).context("leaving alternate screen")?;

    if let Err(err) = &result {
        tracing::error!(err = %format!("{err:#}"), "exiting on error");
    }
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let size = terminal.size().context("reading terminal size")?;
    app.resize(size.width, size.height);

    loop {
        app.refresh_metrics();
        terminal
            .draw(|f| f.render_widget(&*app, f.area()))
            .context("drawing frame")?;

        match runner.step() {
            AppEvent::Key(key) => {
                if app.handle_key(&key) == Flow::Quit {
                    break;
                }
            }
            AppEvent::Resize(width, height) => app.resize(width, height),
            AppEvent::Tick => {}
        }
    }

    tracing::info!("quit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["termtype"]).unwrap();
        assert_eq!(cli.category, None);
        assert_eq!(cli.count, None);
        assert_eq!(cli.log_level, "info");
        assert!(!cli.no_samples);
    }

    #[test]
    fn cli_parses_category_names() {
        let cli = Cli::try_parse_from(["termtype", "-c", "c_style", "-n", "3"]).unwrap();
        assert_eq!(cli.category, Some(Category::CStyle));
        assert_eq!(cli.count, Some(3));

        assert!(Cli::try_parse_from(["termtype", "--category", "cobol"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "termtype",
            "--count",
            "5",
            "--templates-dir",
            "/tmp/tt",
            "--no-samples",
            "-c",
            "python",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(config.template_count, 5);
        assert_eq!(config.templates_dir, Some(PathBuf::from("/tmp/tt")));
        assert!(!config.install_samples);
        assert_eq!(config.default_category, Some(Category::Python));
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = Cli::try_parse_from(["termtype"]).unwrap();
        let mut config = Config {
            template_count: 7,
            ..Config::default()
        };
        cli.apply(&mut config);
        assert_eq!(config.template_count, 7);
        assert!(config.install_samples);
    }

    #[test]
    fn prompt_escapes_become_newlines() {
        let cli = Cli::try_parse_from(["termtype", "-p", "one\\ntwo"]).unwrap();
        assert_eq!(cli.prompt_text().as_deref(), Some("one\ntwo"));
    }
}
