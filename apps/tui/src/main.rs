mod app;
mod cli;
mod config;
mod data;
mod domain;
mod event;
mod geo;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = cli::CliArgs::parse();
    args.apply_env_overrides();

    let dataset_source = config::init_app_config();
    if config::debug_enabled() {
        eprintln!("Dataset source: {dataset_source}");
    }

    // Initialize application state
    let mut app = App::new(dataset_source.clone());

    // Start the dataset load; the loading screen polls for completion.
    app.load_task = Some(tokio::spawn(async move {
        data::load_dataset(&dataset_source).await
    }));

    if config::geocode_enabled() {
        match geo::GeocodeClient::new() {
            Ok(client) => app.geocode = Some(client),
            Err(e) => eprintln!("Geocoding unavailable: {e}"),
        }
    }

    // Headless mode when asked for, or when stdout is not a terminal
    if args.headless || !is_terminal() {
        return event::run_headless(&mut app, args.json).await;
    }

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup_terminal_state(true, true);

    // Return the result
    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
