mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::{AnalysisActions, App};
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use mena_energy_tracker::analysis::{AnalysisClient, GeminiBackend};
use mena_energy_tracker::config::init_app_config;
use mena_energy_tracker::logging::init_logging;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    let mut config = init_app_config();
    args.apply_to(&mut config);

    let log_path = init_logging(&config.log_dir, config.log_level())?;
    info!(log = %log_path.display(), "starting mena-energy-tracker");

    if config.api_key.is_none() {
        warn!("No GEMINI_API_KEY or API_KEY set; analysis requests will fail");
    }

    let backend = GeminiBackend::new(config.gemini())?;
    info!(model = backend.model(), "Gemini backend ready");
    let client = AnalysisClient::new(backend);

    // Check if we're running in a terminal
    if args.headless || !is_terminal() {
        return event::run_headless(&client, args.json).await;
    }

    let (actions, outcomes) = AnalysisActions::new(client);
    let mut app = App::new(actions, config.model.clone());

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app, outcomes).await;

    // Restore terminal
    terminal::cleanup_terminal_state(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
