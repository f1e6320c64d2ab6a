use crate::cli::Args;
use crossterm::{execute, terminal::SetTitle};
use odds_teletext::config::Config;
use odds_teletext::config::user_prompts::prompt_for_api_key;
use odds_teletext::constants::ui::DEFAULT_PAGE_WIDTH;
use odds_teletext::data_fetcher::{OddsApi, OddsQueries};
use odds_teletext::error::{AppError, OddsApiError};
use odds_teletext::ui::{ScreenOptions, build_odds_page, build_sports_page};
use std::io::stdout;
use tracing::{info, warn};

pub const TERMINAL_TITLE: &str = "COTES 470";

/// Validates command line argument combinations.
///
/// Returns an error if incompatible arguments are used together.
pub fn validate_args(args: &Args) -> Result<(), AppError> {
    if args.enable_sport.is_some() && args.disable_sport.is_some() {
        return Err(AppError::config_error(
            "Cannot use --enable-sport and --disable-sport together",
        ));
    }
    if args.refresh_interval.is_some()
        && args.enable_sport.is_none()
        && args.disable_sport.is_none()
    {
        return Err(AppError::config_error(
            "--refresh-interval requires --enable-sport or --disable-sport",
        ));
    }
    if args.refresh_interval == Some(0) {
        return Err(AppError::config_error(
            "Refresh interval must be at least 1 second",
        ));
    }
    if args.set_remote_store.is_some() && args.clear_remote_store {
        return Err(AppError::config_error(
            "Cannot use --set-remote-store and --clear-remote-store together",
        ));
    }
    if args.new_log_file_path.is_some() && args.clear_log_file_path {
        return Err(AppError::config_error(
            "Cannot use --set-log-file and --clear-log-file together",
        ));
    }
    let empty_sport = [&args.sport, &args.live_sport, &args.enable_sport, &args.disable_sport]
        .into_iter()
        .flatten()
        .any(|sport| sport.trim().is_empty());
    if empty_sport {
        return Err(AppError::config_error("Sport keys cannot be empty"));
    }
    Ok(())
}

/// Which sports the odds screen shows, from the command line.
pub fn screen_options(args: &Args) -> ScreenOptions {
    let defaults = ScreenOptions::default();
    let top_events_sport = args.sport.clone().unwrap_or(defaults.top_events_sport);
    let live_sport = args.live_sport.clone().unwrap_or(defaults.live_sport);
    let scores_sport = args.scores.as_ref().map(|sport| {
        if sport.is_empty() {
            live_sport.clone()
        } else {
            sport.clone()
        }
    });

    ScreenOptions {
        top_events_sport,
        live_sport,
        scores_sport,
    }
}

/// Handles the --list-config command.
///
/// Prints the application config followed by the odds settings, with the API key masked.
pub async fn handle_list_config_command(api: &OddsApi) -> Result<(), AppError> {
    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;

    Config::display().await?;

    let odds_config = api.config_snapshot().await?;
    println!("────────────────────────────────────");
    println!("API Key:");
    if odds_config.has_api_key() {
        println!("{}", odds_config.masked_api_key());
    } else {
        println!("(Not set, use --set-api-key)");
    }
    println!("────────────────────────────────────");
    println!("Sports:");
    for (key, sport) in &odds_config.sports {
        let state = if sport.enabled { "enabled" } else { "disabled" };
        println!("{key:<32} {state:<9} {}s", sport.refresh_interval);
    }
    println!("────────────────────────────────────");
    println!("Last Updated:");
    match odds_config.last_updated {
        Some(updated) => println!("{}", updated.to_rfc3339()),
        None => println!("(Never saved)"),
    }

    Ok(())
}

/// Handles application config updates (--set-remote-store, --clear-remote-store,
/// --set-log-file, --clear-log-file).
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await.unwrap_or_default();

    if let Some(url) = &args.set_remote_store {
        config.remote_store_url = Some(url.trim_end_matches('/').to_string());
    } else if args.clear_remote_store {
        config.remote_store_url = None;
        println!("Remote settings store cleared. Odds settings are kept locally.");
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Handles --set-api-key, --enable-sport and --disable-sport.
///
/// A new key is checked against the provider first and refused only when the
/// provider rejects it; any other outcome saves it with a warning.
pub async fn handle_settings_command(api: &OddsApi, args: &Args) -> Result<(), AppError> {
    if let Some(api_key) = &args.set_api_key {
        let api_key = if api_key.is_empty() {
            prompt_for_api_key().await?
        } else {
            api_key.trim().to_string()
        };
        if api_key.is_empty() {
            return Err(AppError::config_error("API key cannot be empty"));
        }

        match api.test_connection(&api_key).await {
            Ok(true) => println!("Connection OK, the API key was accepted."),
            Ok(false) => println!("Warning: the odds provider gave an unexpected answer."),
            Err(OddsApiError::ApiKeyInvalid) => {
                return Err(OddsApiError::ApiKeyInvalid.into());
            }
            Err(e) => {
                warn!("Could not verify API key: {e}");
                println!("Warning: could not verify the API key ({e}).");
            }
        }

        api.set_api_key(api_key).await?;
        println!("API key saved.");
    }

    let sport_change = match (&args.enable_sport, &args.disable_sport) {
        (Some(sport), _) => Some((sport, true)),
        (None, Some(sport)) => Some((sport, false)),
        (None, None) => None,
    };
    if let Some((sport, enabled)) = sport_change {
        let refresh_interval = match args.refresh_interval {
            Some(seconds) => seconds,
            None => api.get_sport_config(sport).await?.refresh_interval,
        };
        api.set_sport_config(sport, enabled, refresh_interval).await?;
        let state = if enabled { "enabled" } else { "disabled" };
        println!("{sport} {state} (refresh every {refresh_interval}s).");
    }

    Ok(())
}

/// Handles the --test-connection command using the saved API key.
pub async fn handle_test_connection_command(api: &OddsApi) -> Result<(), AppError> {
    let api_key = api.api_key().await?;
    if api_key.is_empty() {
        return Err(OddsApiError::ApiKeyRequired.into());
    }

    if api.test_connection(&api_key).await? {
        info!("Connection test succeeded");
        println!("Connection OK, the API key was accepted.");
    } else {
        println!("The odds provider answered, but not with 200 OK.");
    }

    if let Some(remaining) = api.quota().await.and_then(|quota| quota.remaining) {
        println!("Requests remaining: {remaining}");
    }
    Ok(())
}

/// Handles the --list-sports command.
pub async fn handle_list_sports_command(queries: &OddsQueries) -> Result<(), AppError> {
    let page = build_sports_page(queries).await;

    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;
    page.render_buffered(&mut stdout(), DEFAULT_PAGE_WIDTH, false)?;
    println!();
    Ok(())
}

/// Handles the --once command (quick view mode).
///
/// Builds the odds page once, prints it and exits. Failed sections show their
/// error banner instead of aborting the page.
pub async fn handle_once_command(
    queries: &OddsQueries,
    options: &ScreenOptions,
) -> Result<(), AppError> {
    let page = build_odds_page(queries, options).await;

    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;
    page.render_buffered(&mut stdout(), DEFAULT_PAGE_WIDTH, false)?;
    println!();
    Ok(())
}
