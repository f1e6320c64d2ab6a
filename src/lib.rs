//! Football odds in a teletext-style terminal page
//!
//! This library fetches sports, odds, live odds and scores from The Odds API
//! and renders them as a teletext page. The odds settings (API key and
//! enabled sports) are kept in a local store and optionally mirrored to a
//! remote document store.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use odds_teletext::config::Config;
//! use odds_teletext::data_fetcher::{OddsApi, OddsQueries};
//! use odds_teletext::error::AppError;
//! use odds_teletext::settings::{DisabledRemoteStore, FileLocalStore, OddsStorage};
//! use odds_teletext::ui::{ScreenOptions, build_odds_page};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let storage = OddsStorage::new(
//!         Arc::new(FileLocalStore::default_location()),
//!         Arc::new(DisabledRemoteStore),
//!     );
//!     let api = Arc::new(OddsApi::from_config(&config, storage)?);
//!     let queries = OddsQueries::new(api);
//!
//!     let page = build_odds_page(&queries, &ScreenOptions::default()).await;
//!     page.render_buffered(&mut std::io::stdout(), 80, false)?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod settings;
pub mod teletext_ui;
pub mod testing_utils;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::models::{Event, OddsConfig, Sport, SportConfig};
pub use data_fetcher::{OddsApi, OddsQueries, QueryState};
pub use error::{AppError, ErrorCode, OddsApiError};
pub use settings::OddsStorage;
pub use teletext_ui::OddsPage;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
