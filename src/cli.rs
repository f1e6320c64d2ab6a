use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Determines if the application should run in non-interactive mode
/// Non-interactive mode is used when any of these conditions are met:
/// - --once flag is set (show the odds page once and exit)
/// - a listing, connection test or configuration command is requested
/// - --debug mode is enabled (the screen is printed line by line)
pub fn is_noninteractive_mode(args: &Args) -> bool {
    args.once
        || args.list_sports
        || args.test_connection
        || args.list_config
        || has_settings_update(args)
        || has_config_update(args)
        || args.debug
}

/// True when the odds settings (API key, sports) are being changed
pub fn has_settings_update(args: &Args) -> bool {
    args.set_api_key.is_some() || args.enable_sport.is_some() || args.disable_sport.is_some()
}

/// True when the application config file is being changed
pub fn has_config_update(args: &Args) -> bool {
    args.set_remote_store.is_some()
        || args.clear_remote_store
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
}

/// Football odds in your terminal, teletext style
///
/// Shows the top upcoming matches with their 1 X 2 prices and the matches
/// being played right now.
///
/// In interactive mode (default):
/// - Press 'r' to drop cached odds and reload everything
/// - Press 'q' to quit
///
/// Live odds are reloaded every 30 seconds while the screen is open.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Show the odds page once and exit immediately. Useful for scripts or a quick look.
    /// The output stays visible in terminal history.
    #[arg(short, long)]
    pub once: bool,

    /// Sport key for the popular events section (e.g. soccer_epl).
    #[arg(long = "sport", short = 's', help_heading = "Display Options")]
    pub sport: Option<String>,

    /// Sport key for the live section.
    #[arg(long = "live-sport", help_heading = "Display Options")]
    pub live_sport: Option<String>,

    /// Add a results section. Uses the live sport when no sport key is given.
    #[arg(
        long = "scores",
        help_heading = "Display Options",
        value_name = "SPORT",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub scores: Option<String>,

    /// List every sport offered by the odds provider and exit.
    #[arg(long = "list-sports", help_heading = "Display Options")]
    pub list_sports: bool,

    /// Save the odds provider API key. Will prompt for the key if not provided.
    #[arg(
        long = "set-api-key",
        help_heading = "Odds Settings",
        value_name = "API_KEY",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub set_api_key: Option<String>,

    /// Enable odds for a sport key.
    #[arg(long = "enable-sport", help_heading = "Odds Settings", value_name = "SPORT")]
    pub enable_sport: Option<String>,

    /// Disable odds for a sport key. Requests for it are refused without contacting the provider.
    #[arg(long = "disable-sport", help_heading = "Odds Settings", value_name = "SPORT")]
    pub disable_sport: Option<String>,

    /// Refresh interval in seconds stored with --enable-sport or --disable-sport.
    #[arg(long = "refresh-interval", help_heading = "Odds Settings", value_name = "SECS")]
    pub refresh_interval: Option<u64>,

    /// Check the saved API key against the odds provider.
    #[arg(long = "test-connection", help_heading = "Odds Settings")]
    pub test_connection: bool,

    /// Set the URL of the remote settings store used to share odds settings.
    #[arg(long = "set-remote-store", help_heading = "Configuration", value_name = "URL")]
    pub set_remote_store: Option<String>,

    /// Stop mirroring odds settings to the remote store.
    #[arg(long = "clear-remote-store", help_heading = "Configuration")]
    pub clear_remote_store: bool,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration and odds settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Enable debug mode which doesn't clear the terminal before drawing the UI.
    /// In this mode, logs are also written to the terminal.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
