//! Data model for the odds provider and the persisted odds configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::sports::{DEFAULT_REFRESH_INTERVAL_SECONDS, DEFAULT_SPORT_KEYS};

/// Per-sport settings. Serialized as `{ "enabled": bool, "refreshInterval": seconds }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportConfig {
    pub enabled: bool,
    pub refresh_interval: u64,
}

impl SportConfig {
    pub const fn new(enabled: bool, refresh_interval: u64) -> Self {
        Self {
            enabled,
            refresh_interval,
        }
    }

    /// Fallback for sport keys that are neither configured nor part of the defaults
    pub const fn disabled() -> Self {
        Self::new(false, DEFAULT_REFRESH_INTERVAL_SECONDS)
    }
}

/// The hardcoded default sport map. Every loaded configuration contains at least these keys.
pub fn default_sports() -> BTreeMap<String, SportConfig> {
    DEFAULT_SPORT_KEYS
        .iter()
        .map(|key| {
            (
                key.to_string(),
                SportConfig::new(true, DEFAULT_REFRESH_INTERVAL_SECONDS),
            )
        })
        .collect()
}

/// Odds configuration shared between the local store and the remote document.
///
/// `last_updated` is `None` only for a configuration that has never been
/// persisted, so it orders before any stored timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub sports: BTreeMap<String, SportConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            sports: default_sports(),
            last_updated: None,
        }
    }
}

impl OddsConfig {
    /// Returns the configuration with `sports` laid over the default map (stored entries win).
    pub fn with_default_sports(mut self) -> Self {
        let mut merged = default_sports();
        merged.append(&mut self.sports);
        self.sports = merged;
        self
    }

    /// Resolves a sport: configured entry, then the defaults, then disabled.
    pub fn sport_config(&self, sport_key: &str) -> SportConfig {
        self.sports
            .get(sport_key)
            .copied()
            .or_else(|| default_sports().get(sport_key).copied())
            .unwrap_or_else(SportConfig::disabled)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Last-write-wins comparison: strictly newer only.
    pub fn is_newer_than(&self, other: &OddsConfig) -> bool {
        self.last_updated > other.last_updated
    }

    /// API key with everything but the last four characters hidden
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{visible}", "*".repeat(chars.len() - 4))
    }
}

/// A sport/league as listed by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sport {
    pub key: String,
    #[serde(default)]
    pub group: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub has_outrights: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmaker {
    pub key: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub markets: Vec<Market>,
}

/// Team score as returned by the scores endpoint. The provider sends scores as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub name: String,
    pub score: String,
}

/// A match with its bookmaker odds. The same shape is returned by the odds,
/// live odds and scores endpoints; fields a given endpoint omits are defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub sport_key: String,
    #[serde(default)]
    pub sport_title: String,
    pub commence_time: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<Score>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
}

impl Event {
    /// The first bookmaker's first market, which is what the cards display
    pub fn main_market(&self) -> Option<&Market> {
        self.bookmakers.first()?.markets.first()
    }

    /// Price of the named outcome in the main market
    pub fn main_price(&self, outcome_name: &str) -> Option<f64> {
        self.main_market()?
            .outcomes
            .iter()
            .find(|outcome| outcome.name == outcome_name)
            .map(|outcome| outcome.price)
    }

    /// Score for the named team, if the scores endpoint reported one
    pub fn score_for(&self, team: &str) -> Option<&str> {
        self.scores
            .as_ref()?
            .iter()
            .find(|score| score.name == team)
            .map(|score| score.score.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_sports_contains_all_default_keys() {
        let defaults = default_sports();
        assert_eq!(defaults.len(), DEFAULT_SPORT_KEYS.len());
        for key in DEFAULT_SPORT_KEYS {
            assert_eq!(
                defaults.get(*key),
                Some(&SportConfig::new(true, DEFAULT_REFRESH_INTERVAL_SECONDS))
            );
        }
    }

    #[test]
    fn test_sport_config_unknown_key_is_disabled() {
        let config = OddsConfig::default();
        assert_eq!(
            config.sport_config("soccer_x"),
            SportConfig::new(false, 30)
        );
    }

    #[test]
    fn test_sport_config_falls_back_to_defaults_when_map_is_empty() {
        let config = OddsConfig {
            api_key: String::new(),
            sports: BTreeMap::new(),
            last_updated: None,
        };
        assert!(config.sport_config("soccer_epl").enabled);
        assert!(!config.sport_config("basketball_nba").enabled);
    }

    #[test]
    fn test_with_default_sports_overrides_win() {
        let mut sports = BTreeMap::new();
        sports.insert("soccer_epl".to_string(), SportConfig::new(false, 90));
        sports.insert("tennis_atp".to_string(), SportConfig::new(true, 15));
        let config = OddsConfig {
            api_key: "k".to_string(),
            sports,
            last_updated: None,
        }
        .with_default_sports();

        assert_eq!(config.sports.len(), DEFAULT_SPORT_KEYS.len() + 1);
        assert_eq!(config.sports["soccer_epl"], SportConfig::new(false, 90));
        assert_eq!(config.sports["tennis_atp"], SportConfig::new(true, 15));
        assert!(config.sports["soccer_spain_la_liga"].enabled);
    }

    #[test]
    fn test_is_newer_than_is_strict() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 15, 11, 0, 0).unwrap();

        let mut local = OddsConfig::default();
        let mut remote = OddsConfig::default();

        // Never-persisted configs are not newer than each other
        assert!(!remote.is_newer_than(&local));

        remote.last_updated = Some(earlier);
        assert!(remote.is_newer_than(&local));

        local.last_updated = Some(earlier);
        assert!(!remote.is_newer_than(&local));

        remote.last_updated = Some(later);
        assert!(remote.is_newer_than(&local));
        assert!(!local.is_newer_than(&remote));
    }

    #[test]
    fn test_config_json_field_names() {
        let json = r#"{
            "apiKey": "abc",
            "sports": { "soccer_epl": { "enabled": false, "refreshInterval": 45 } },
            "lastUpdated": "2024-01-15T10:00:00.000Z"
        }"#;
        let config: OddsConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.sports["soccer_epl"], SportConfig::new(false, 45));
        assert_eq!(
            config.last_updated,
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap())
        );

        let serialized = serde_json::to_string(&config).unwrap();
        assert!(serialized.contains("\"apiKey\""));
        assert!(serialized.contains("\"refreshInterval\""));
        assert!(serialized.contains("\"lastUpdated\""));
    }

    #[test]
    fn test_masked_api_key() {
        let mut config = OddsConfig::default();
        assert_eq!(config.masked_api_key(), "");
        config.api_key = "abc".to_string();
        assert_eq!(config.masked_api_key(), "***");
        config.api_key = "0123456789".to_string();
        assert_eq!(config.masked_api_key(), "******6789");
    }

    #[test]
    fn test_event_deserializes_provider_payload() {
        let json = r#"{
            "id": "e912304de2b2ce35b473ce2ecd3d1502",
            "sport_key": "soccer_uefa_champs_league",
            "sport_title": "UEFA Champions League",
            "commence_time": "2024-03-12T20:00:00Z",
            "home_team": "Paris Saint Germain",
            "away_team": "Manchester City",
            "bookmakers": [{
                "key": "unibet_eu",
                "title": "Unibet",
                "last_update": "2024-03-12T18:00:00Z",
                "markets": [{
                    "key": "h2h",
                    "outcomes": [
                        { "name": "Paris Saint Germain", "price": 2.4 },
                        { "name": "Manchester City", "price": 2.9 },
                        { "name": "Draw", "price": 3.4 }
                    ]
                }]
            }]
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.main_price("Paris Saint Germain"), Some(2.4));
        assert_eq!(event.main_price("Draw"), Some(3.4));
        assert_eq!(event.main_price("Nobody"), None);
        assert_eq!(event.completed, None);
    }

    #[test]
    fn test_event_scores_payload() {
        let json = r#"{
            "id": "abc",
            "sport_key": "soccer_epl",
            "sport_title": "EPL",
            "commence_time": "2024-03-10T15:00:00Z",
            "completed": true,
            "home_team": "Arsenal",
            "away_team": "Chelsea",
            "scores": [
                { "name": "Arsenal", "score": "2" },
                { "name": "Chelsea", "score": "1" }
            ],
            "last_update": "2024-03-10T17:00:00Z"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.bookmakers.is_empty());
        assert_eq!(event.main_market(), None);
        assert_eq!(event.completed, Some(true));
        assert_eq!(event.score_for("Arsenal"), Some("2"));
        assert_eq!(event.score_for("Chelsea"), Some("1"));
    }
}
