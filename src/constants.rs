//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and configuration constants
//! to improve maintainability and make the codebase more configurable.

#![allow(dead_code)]

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Base URL of The Odds API v4 sports endpoints
pub const DEFAULT_API_BASE_URL: &str = "https://api.the-odds-api.com/v4/sports";

/// Directory name used under the platform config directory
pub const APP_DIR_NAME: &str = "odds_teletext";

/// Persistence locations for the odds configuration
pub mod storage {
    /// Key of the single local key-value entry
    pub const STORAGE_KEY: &str = "odds_config";

    /// Remote document collection
    pub const REMOTE_COLLECTION: &str = "odds_config";

    /// Remote document id inside the collection
    pub const REMOTE_DOCUMENT_ID: &str = "settings";
}

/// Sport keys and provider query parameters
pub mod sports {
    /// Refresh interval used for defaults and for unknown sports
    pub const DEFAULT_REFRESH_INTERVAL_SECONDS: u64 = 30;

    /// Sports that are always present in a loaded configuration
    pub const DEFAULT_SPORT_KEYS: &[&str] = &[
        "soccer_uefa_champs_league",
        "soccer_france_ligue_one",
        "soccer_epl",
        "soccer_spain_la_liga",
        "soccer_italy_serie_a",
        "soccer_germany_bundesliga",
    ];

    /// Sport shown in the "top events" section
    pub const TOP_EVENTS_SPORT: &str = "soccer_uefa_champs_league";

    /// Sport shown in the live section
    pub const LIVE_SPORT: &str = "soccer_france_ligue_one";

    /// Outcome name the provider uses for a draw in h2h markets
    pub const DRAW_OUTCOME: &str = "Draw";

    /// Bookmaker region requested for pre-match odds
    pub const DEFAULT_REGIONS: &str = "eu";

    /// Market requested for odds and live odds
    pub const DEFAULT_MARKETS: &str = "h2h";

    /// How many days back the scores endpoint should look
    pub const DEFAULT_SCORES_DAYS_FROM: u32 = 1;
}

/// Staleness windows for query results, in seconds
pub mod cache_ttl {
    /// Sports list rarely changes (5 minutes)
    pub const SPORTS_SECONDS: u64 = 300;

    /// Pre-match odds (1 minute)
    pub const ODDS_SECONDS: u64 = 60;

    /// Scores (1 minute)
    pub const SCORES_SECONDS: u64 = 60;

    /// Live odds move fast (10 seconds)
    pub const LIVE_EVENTS_SECONDS: u64 = 10;

    /// Live events are re-issued on this interval while the screen is open
    pub const LIVE_EVENTS_REFETCH_SECONDS: u64 = 30;
}

/// Capacity of each per-instance query cache
pub const QUERY_CACHE_CAPACITY: usize = 64;

/// Retry configuration for the query layer
pub mod retry {
    /// Retries after the first failed attempt
    pub const MAX_RETRIES: u32 = 2;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 1000;

    /// Maximum delay between retries (seconds)
    pub const MAX_DELAY_SECONDS: u64 = 30;
}

/// UI polling intervals in milliseconds
pub mod polling {
    /// How long to wait for a key press before checking timers again
    pub const INPUT_POLL_MS: u64 = 100;
}

/// UI layout constants
pub mod ui {
    /// Number of cards in the "top events" section
    pub const TOP_EVENTS_LIMIT: usize = 3;

    /// Content margin from terminal border
    pub const CONTENT_MARGIN: usize = 2;

    /// Page width used when not attached to a terminal
    pub const DEFAULT_PAGE_WIDTH: usize = 80;

    /// Teletext page number shown in the header
    pub const PAGE_NUMBER: u16 = 470;
}

/// Environment variable names
pub mod env_vars {
    /// Override for the odds provider base URL
    pub const API_BASE_URL: &str = "ODDS_API_BASE_URL";

    /// Override for the remote settings document store URL
    pub const REMOTE_STORE_URL: &str = "ODDS_REMOTE_STORE_URL";

    /// Override for the log file path
    pub const LOG_FILE: &str = "ODDS_LOG_FILE";

    /// Override for the HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "ODDS_HTTP_TIMEOUT";
}
