// src/main.rs
mod app;
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, has_config_update, has_settings_update};
use odds_teletext::config::Config;
use odds_teletext::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    commands::validate_args(&args)?;

    // The guard must outlive every log call so buffered lines are flushed
    let (log_file_path, _guard) = logging::setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    // Config file changes don't need the odds client
    if has_config_update(&args) {
        return commands::handle_config_update_command(&args).await;
    }

    let config = Config::load().await?;
    let queries = app::build_queries(&config)?;
    let api = queries.api();

    if args.list_config {
        return commands::handle_list_config_command(api).await;
    }

    if has_settings_update(&args) {
        return commands::handle_settings_command(api, &args).await;
    }

    if args.test_connection {
        return commands::handle_test_connection_command(api).await;
    }

    if args.list_sports {
        return commands::handle_list_sports_command(&queries).await;
    }

    let options = commands::screen_options(&args);

    if args.once {
        return commands::handle_once_command(&queries, &options).await;
    }

    app::run_interactive(queries, options, args.debug).await
}
