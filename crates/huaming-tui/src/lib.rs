//! huaming TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, Prefs};

use huaming_core::{config::Config, Dataset};

/// Start the TUI over an already-attempted load. A load failure is shown in
/// the status row rather than aborting.
pub fn run(loaded: huaming_core::Result<Dataset>, config: Config, prefs: Prefs) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.ui.theme, "unknown theme, using default");
        theme::Theme::load_default()
    });
    App::new(loaded, config, theme, prefs).run()
}
