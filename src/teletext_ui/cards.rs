//! Match cards: one event reduced to what a teletext row shows.

use chrono::{DateTime, Utc};

use crate::constants::sports::DRAW_OUTCOME;
use crate::data_fetcher::models::{Event, Sport};

use super::formatting::{format_kickoff, format_price, format_score};

/// A price button: outcome label (`1`, `X`, `2`) and formatted price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceButton {
    pub label: &'static str,
    pub price: String,
}

/// One match with the head-to-head prices of its first bookmaker.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCard {
    /// League name shown above the teams
    pub sport_title: String,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: DateTime<Utc>,
    pub home_price: Option<f64>,
    pub draw_price: Option<f64>,
    pub away_price: Option<f64>,
    pub live: bool,
}

impl MatchCard {
    /// Reads the first bookmaker's first market; outcomes are matched by team name and `"Draw"`.
    pub fn from_event(event: &Event, live: bool) -> Self {
        Self {
            sport_title: event.sport_title.clone(),
            home_team: event.home_team.clone(),
            away_team: event.away_team.clone(),
            commence_time: event.commence_time,
            home_price: event.main_price(&event.home_team),
            draw_price: event.main_price(DRAW_OUTCOME),
            away_price: event.main_price(&event.away_team),
            live,
        }
    }

    /// Buttons for the prices that are present, in `1 X 2` order.
    pub fn price_buttons(&self) -> Vec<PriceButton> {
        [
            ("1", self.home_price),
            ("X", self.draw_price),
            ("2", self.away_price),
        ]
        .into_iter()
        .filter_map(|(label, price)| {
            price.map(|price| PriceButton {
                label,
                price: format_price(price),
            })
        })
        .collect()
    }

    pub fn kickoff_text(&self) -> String {
        format_kickoff(&self.commence_time)
    }
}

/// A result row from the scores endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLine {
    pub home_team: String,
    pub away_team: String,
    pub score: Option<String>,
    pub completed: bool,
}

impl ScoreLine {
    pub fn from_event(event: &Event) -> Self {
        Self {
            home_team: event.home_team.clone(),
            away_team: event.away_team.clone(),
            score: format_score(
                event.score_for(&event.home_team),
                event.score_for(&event.away_team),
            ),
            completed: event.completed.unwrap_or(false),
        }
    }

    /// `"Terminé"`, `"En cours"` or `"À venir"`
    pub fn status_text(&self) -> &'static str {
        match (self.completed, &self.score) {
            (true, _) => "Terminé",
            (false, Some(_)) => "En cours",
            (false, None) => "À venir",
        }
    }
}

/// A sport from the provider's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SportLine {
    pub key: String,
    pub title: String,
    pub group: String,
    pub active: bool,
}

impl From<&Sport> for SportLine {
    fn from(sport: &Sport) -> Self {
        Self {
            key: sport.key.clone(),
            title: sport.title.clone(),
            group: sport.group.clone(),
            active: sport.active,
        }
    }
}
