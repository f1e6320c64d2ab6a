//! URL building utilities for the odds provider endpoints
//!
//! Query parameters (including the API key) are not part of these URLs; they
//! are attached by the request so they never end up in logged URLs.

fn trimmed(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Builds the URL listing all sports.
///
/// # Example
/// ```
/// use odds_teletext::data_fetcher::api::build_sports_url;
///
/// let url = build_sports_url("https://api.the-odds-api.com/v4/sports");
/// assert_eq!(url, "https://api.the-odds-api.com/v4/sports/");
/// ```
pub fn build_sports_url(base_url: &str) -> String {
    format!("{}/", trimmed(base_url))
}

/// Builds the pre-match odds URL for a sport.
///
/// # Example
/// ```
/// use odds_teletext::data_fetcher::api::build_odds_url;
///
/// let url = build_odds_url("https://api.example.com/v4/sports/", "soccer_epl");
/// assert_eq!(url, "https://api.example.com/v4/sports/soccer_epl/odds");
/// ```
pub fn build_odds_url(base_url: &str, sport: &str) -> String {
    format!("{}/{sport}/odds", trimmed(base_url))
}

/// Builds the live odds URL for a sport.
pub fn build_live_odds_url(base_url: &str, sport: &str) -> String {
    format!("{}/{sport}/odds-live", trimmed(base_url))
}

/// Builds the scores URL for a sport.
pub fn build_scores_url(base_url: &str, sport: &str) -> String {
    format!("{}/{sport}/scores", trimmed(base_url))
}
