use chrono::{DateTime, TimeZone, Utc};

use crate::constants::sports::{DEFAULT_MARKETS, DRAW_OUTCOME};
use crate::data_fetcher::models::{Bookmaker, Event, Market, Outcome, Score, Sport};

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Starts an event between two teams, kicking off 2024-03-12 20:00 UTC, with no bookmakers
    pub fn event(home_team: &str, away_team: &str) -> EventBuilder {
        EventBuilder {
            event: Event {
                id: format!("{home_team}-{away_team}").to_lowercase().replace(' ', "_"),
                sport_key: "soccer_uefa_champs_league".to_string(),
                sport_title: "UEFA Champions League".to_string(),
                commence_time: Self::kickoff(),
                home_team: home_team.to_string(),
                away_team: away_team.to_string(),
                bookmakers: vec![],
                completed: None,
                scores: None,
                last_update: None,
            },
        }
    }

    /// Creates a sport list entry
    pub fn sport(key: &str, title: &str) -> Sport {
        Sport {
            key: key.to_string(),
            group: "Soccer".to_string(),
            title: title.to_string(),
            description: String::new(),
            active: true,
            has_outrights: false,
        }
    }

    /// Creates a list of priced events for testing screens
    pub fn create_events(count: usize) -> Vec<Event> {
        (0..count)
            .map(|i| {
                Self::event(&format!("Home {i}"), &format!("Away {i}"))
                    .with_prices(2.0 + i as f64 / 10.0, Some(3.1), 3.5)
                    .build()
            })
            .collect()
    }

    pub fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 12, 20, 0, 0)
            .single()
            .unwrap_or_default()
    }
}

/// Fluent builder returned by [`TestDataBuilder::event`]
#[derive(Debug, Clone)]
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn with_sport(mut self, sport_key: &str) -> Self {
        self.event.sport_key = sport_key.to_string();
        self
    }

    pub fn with_league(mut self, sport_title: &str) -> Self {
        self.event.sport_title = sport_title.to_string();
        self
    }

    /// Adds a bookmaker with an h2h market: home, optional draw, away
    pub fn with_prices(self, home: f64, draw: Option<f64>, away: f64) -> Self {
        let home_team = self.event.home_team.clone();
        let away_team = self.event.away_team.clone();
        let mut outcomes = vec![(home_team.as_str(), home), (away_team.as_str(), away)];
        if let Some(draw) = draw {
            outcomes.push((DRAW_OUTCOME, draw));
        }
        self.with_bookmaker("unibet_eu", &outcomes)
    }

    /// Appends a bookmaker whose single h2h market has the given outcomes
    pub fn with_bookmaker(mut self, key: &str, outcomes: &[(&str, f64)]) -> Self {
        self.event.bookmakers.push(Bookmaker {
            key: key.to_string(),
            title: key.to_string(),
            last_update: None,
            markets: vec![Market {
                key: DEFAULT_MARKETS.to_string(),
                last_update: None,
                outcomes: outcomes
                    .iter()
                    .map(|(name, price)| Outcome {
                        name: name.to_string(),
                        price: *price,
                        point: None,
                    })
                    .collect(),
            }],
        });
        self
    }

    pub fn with_scores(mut self, home: &str, away: &str, completed: bool) -> Self {
        self.event.scores = Some(vec![
            Score {
                name: self.event.home_team.clone(),
                score: home.to_string(),
            },
            Score {
                name: self.event.away_team.clone(),
                score: away.to_string(),
            },
        ]);
        self.event.completed = Some(completed);
        self
    }

    pub fn build(self) -> Event {
        self.event
    }
}
