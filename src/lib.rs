// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod category;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod templates;
pub mod ui;
pub mod util;

pub use error::{Error, Result};
