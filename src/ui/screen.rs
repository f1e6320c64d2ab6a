//! Assembles odds pages from the data queries.

use crate::constants::sports::{LIVE_SPORT, TOP_EVENTS_SPORT};
use crate::constants::ui::PAGE_NUMBER;
use crate::data_fetcher::{OddsQueries, QuotaInfo};
use crate::teletext_ui::{
    LIVE_TITLE, OddsPage, PageSection, SCORES_TITLE, SPORTS_TITLE, TOP_EVENTS_TITLE,
};

const PAGE_TITLE: &str = "COTES";

/// Which sports the odds screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenOptions {
    pub top_events_sport: String,
    pub live_sport: String,
    /// Adds a results section for this sport
    pub scores_sport: Option<String>,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            top_events_sport: TOP_EVENTS_SPORT.to_string(),
            live_sport: LIVE_SPORT.to_string(),
            scores_sport: None,
        }
    }
}

fn new_page(subheader: &str) -> OddsPage {
    OddsPage::new(PAGE_NUMBER, PAGE_TITLE, subheader)
}

fn quota_note(quota: Option<QuotaInfo>) -> Option<String> {
    quota
        .and_then(|quota| quota.remaining)
        .map(|remaining| format!("Requêtes restantes: {remaining}"))
}

/// The odds page with every section still loading.
pub fn build_loading_page(options: &ScreenOptions) -> OddsPage {
    let mut page = new_page("FOOTBALL");
    page.add_section(PageSection::loading(TOP_EVENTS_TITLE, false));
    page.add_section(PageSection::loading(LIVE_TITLE, true));
    if options.scores_sport.is_some() {
        page.add_section(PageSection::loading(SCORES_TITLE, false));
    }
    page
}

/// Runs the section queries concurrently and lays out the results.
pub async fn build_odds_page(queries: &OddsQueries, options: &ScreenOptions) -> OddsPage {
    let scores = async {
        match &options.scores_sport {
            Some(sport) => Some(queries.scores(sport).await),
            None => None,
        }
    };
    let (top_events, live, scores) = futures::join!(
        queries.odds(&options.top_events_sport),
        queries.live_events(&options.live_sport),
        scores
    );

    let mut page = new_page("FOOTBALL");
    page.add_section(PageSection::top_events(&top_events));
    page.add_section(PageSection::live(&live));
    if let Some(scores) = scores {
        page.add_section(PageSection::scores(&scores));
    }
    page.set_footer_note(quota_note(queries.api().quota().await));
    page
}

/// Page listing every sport the provider offers.
pub async fn build_sports_page(queries: &OddsQueries) -> OddsPage {
    let sports = queries.sports().await;
    let mut page = new_page(&SPORTS_TITLE.to_uppercase());
    page.add_section(PageSection::sports(&sports));
    page.set_footer_note(quota_note(queries.api().quota().await));
    page
}
