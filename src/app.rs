use crate::commands::TERMINAL_TITLE;
use crossterm::{execute, terminal::SetTitle};
use odds_teletext::config::Config;
use odds_teletext::data_fetcher::api::create_http_client_with_timeout;
use odds_teletext::data_fetcher::{OddsApi, OddsQueries};
use odds_teletext::error::AppError;
use odds_teletext::settings::{
    DisabledRemoteStore, FileLocalStore, HttpDocumentStore, OddsStorage, RemoteStore,
};
use odds_teletext::ui::{self, ScreenOptions};
use std::io::stdout;
use std::sync::Arc;
use tracing::info;

/// Wires the settings stores, the odds client and the query layer.
///
/// Must be called from within a Tokio runtime; the odds client starts
/// loading its settings immediately.
pub fn build_queries(config: &Config) -> Result<Arc<OddsQueries>, AppError> {
    let client = create_http_client_with_timeout(config.http_timeout_seconds)?;

    let local = Arc::new(FileLocalStore::default_location());
    let remote: Arc<dyn RemoteStore> = match &config.remote_store_url {
        Some(url) => {
            info!("Mirroring odds settings to {url}");
            Arc::new(HttpDocumentStore::new(client.clone(), url))
        }
        None => Arc::new(DisabledRemoteStore),
    };
    let storage = OddsStorage::new(local, remote);

    let api = Arc::new(OddsApi::new(client, &config.api_base_url, storage));
    Ok(Arc::new(OddsQueries::new(api)))
}

/// Run the interactive application flow.
///
/// Sets the terminal title and runs the odds screen until the user quits.
/// Raw mode and the alternate screen are handled by the UI itself.
pub async fn run_interactive(
    queries: Arc<OddsQueries>,
    options: ScreenOptions,
    debug_mode: bool,
) -> Result<(), AppError> {
    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;
    ui::run_interactive_ui(queries, options, debug_mode).await
}
