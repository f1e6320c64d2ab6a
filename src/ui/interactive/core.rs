//! Main interactive UI loop.
//!
//! Pages are built on a background task so the loop keeps reading keys and
//! animating the loading indicator while requests are in flight.

use crossterm::event::{self, Event};
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::constants::polling::INPUT_POLL_MS;
use crate::constants::ui::DEFAULT_PAGE_WIDTH;
use crate::data_fetcher::OddsQueries;
use crate::data_fetcher::cache::{QueryKey, QueryOperation};
use crate::error::AppError;
use crate::teletext_ui::OddsPage;
use crate::ui::screen::{ScreenOptions, build_loading_page, build_odds_page};

use super::input_handler::{KeyAction, key_action};
use super::terminal_manager::TerminalManager;

/// Runs the interactive odds screen until the user quits.
///
/// `q` quits, `r` drops every cached result and reloads. Live events are
/// re-requested on the live refetch interval while the screen is open.
pub async fn run_interactive_ui(
    queries: Arc<OddsQueries>,
    options: ScreenOptions,
    debug_mode: bool,
) -> Result<(), AppError> {
    let terminal = TerminalManager::new(debug_mode);
    let mut stdout = terminal.setup_terminal()?;

    let result = run_event_loop(&queries, &options, &mut stdout, !debug_mode).await;

    terminal.cleanup_terminal(stdout)?;
    result
}

fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(width, _)| width as usize)
        .unwrap_or(DEFAULT_PAGE_WIDTH)
}

fn spawn_page_build(queries: &Arc<OddsQueries>, options: &ScreenOptions) -> JoinHandle<OddsPage> {
    let queries = Arc::clone(queries);
    let options = options.clone();
    tokio::spawn(async move { build_odds_page(&queries, &options).await })
}

fn loading_page(options: &ScreenOptions) -> OddsPage {
    let mut page = build_loading_page(options);
    page.set_show_footer(true);
    page
}

async fn run_event_loop(
    queries: &Arc<OddsQueries>,
    options: &ScreenOptions,
    stdout: &mut Stdout,
    interactive: bool,
) -> Result<(), AppError> {
    let live_interval = queries.live_refetch_interval();
    let live_key = QueryKey::for_sport(QueryOperation::LiveEvents, &options.live_sport);

    let mut page = loading_page(options);
    let mut pending = Some(spawn_page_build(queries, options));
    let mut last_live_refresh = Instant::now();
    let mut needs_render = true;

    loop {
        if needs_render {
            page.render_buffered(stdout, terminal_width(), interactive)?;
            needs_render = false;
        }

        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            match event::read()? {
                Event::Key(key_event) => match key_action(&key_event) {
                    KeyAction::Quit => {
                        info!("Quit requested");
                        break;
                    }
                    KeyAction::Refresh if pending.is_none() => {
                        info!("Manual refresh requested");
                        queries.invalidate_all().await;
                        page = loading_page(options);
                        pending = Some(spawn_page_build(queries, options));
                        last_live_refresh = Instant::now();
                        needs_render = true;
                    }
                    KeyAction::Refresh => debug!("Refresh already in progress"),
                    KeyAction::Ignore => {}
                },
                Event::Resize(width, height) => {
                    debug!("Terminal resized to {width}x{height}");
                    needs_render = true;
                }
                _ => {}
            }
        }

        if pending.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = pending.take() {
                match handle.await {
                    Ok(mut new_page) => {
                        new_page.set_show_footer(true);
                        page = new_page;
                    }
                    Err(e) => error!("Page update task failed: {e}"),
                }
                needs_render = true;
            }
        } else if page.is_loading() {
            page.update_loading_animation();
            needs_render = true;
        }

        if pending.is_none() && last_live_refresh.elapsed() >= live_interval {
            debug!("Refreshing live events");
            queries.invalidate(&live_key).await;
            pending = Some(spawn_page_build(queries, options));
            last_live_refresh = Instant::now();
        }
    }

    if let Some(handle) = pending {
        handle.abort();
    }
    Ok(())
}
