//! TUI command - launches the terminal user interface

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use formwork_tui::{App, AppOptions, View, install_panic_hook};
use tracing::info;

use crate::config::FormworkConfig;

#[derive(Args, Debug, Default)]
#[command(after_long_help = "\
Examples:
  formwork                          Launch the TUI at the home screen
  formwork tui --panel team         Open the team panel directly
  formwork tui --panel workflow     Open the role permissions workflow
")]
pub struct TuiArgs {
    /// Panel to open (home, profile, team, workflow); overrides [ui] start_panel
    #[arg(long)]
    pub panel: Option<View>,
}

/// Builds the app the TUI command runs.
pub fn build_app(args: &TuiArgs, config: &FormworkConfig) -> Result<App> {
    let start = match args.panel {
        Some(panel) => panel,
        None => config
            .ui
            .start_panel
            .parse()
            .map_err(anyhow::Error::msg)?,
    };

    Ok(App::with_options(AppOptions {
        rules: config.rules(),
        submitter: Arc::new(config.submitter()),
        start,
    }))
}

pub async fn run(args: TuiArgs, config: &FormworkConfig) -> Result<()> {
    let mut app = build_app(&args, config)?;

    info!(panel = app.views.current.slug(), "starting TUI");
    install_panic_hook();
    app.run().await?;
    info!("TUI exited");

    Ok(())
}
