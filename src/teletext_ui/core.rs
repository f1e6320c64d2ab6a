// src/teletext_ui/core.rs - Teletext page with odds sections

use crossterm::{execute, style::Print};
use std::fmt::Write as _;
use std::io::{Stdout, Write};

use crate::constants::ui::{CONTENT_MARGIN, TOP_EVENTS_LIMIT};
use crate::data_fetcher::QueryState;
use crate::data_fetcher::models::{Event, Sport};
use crate::error::AppError;
use crate::ui::teletext::LoadingIndicator;
use crate::ui::teletext::colors::*;

use super::cards::{MatchCard, ScoreLine, SportLine};
use super::utils::{count_visible_chars, get_ansi_code, truncate_name};

pub const TOP_EVENTS_TITLE: &str = "Événements Populaires";
pub const LIVE_TITLE: &str = "En Direct";
pub const SCORES_TITLE: &str = "Résultats";
pub const SPORTS_TITLE: &str = "Sports";

pub const TOP_EVENTS_ERROR: &str = "Erreur de chargement des événements";
pub const LIVE_ERROR: &str = "Erreur de chargement des matchs en direct";
pub const SCORES_ERROR: &str = "Erreur de chargement des résultats";
pub const SPORTS_ERROR: &str = "Erreur de chargement des sports";

const LIVE_TAG: &str = "En direct";
const LOADING_MESSAGE: &str = "Chargement...";
const NOT_CONFIGURED_MESSAGE: &str = "Clé API non configurée (odds_teletext --set-api-key)";
const EMPTY_MESSAGE: &str = "Aucun événement";

/// What a section currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    Loading(LoadingIndicator),
    /// The query did not run because no API key is configured
    NotConfigured,
    /// Generic localized message; the specific error code is not shown
    Error(&'static str),
    Cards(Vec<MatchCard>),
    Scores(Vec<ScoreLine>),
    Sports(Vec<SportLine>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageSection {
    pub title: &'static str,
    pub live: bool,
    pub content: SectionContent,
}

impl PageSection {
    pub fn loading(title: &'static str, live: bool) -> Self {
        Self {
            title,
            live,
            content: SectionContent::Loading(LoadingIndicator::new(LOADING_MESSAGE)),
        }
    }

    fn from_state<T>(
        title: &'static str,
        live: bool,
        error_message: &'static str,
        state: &QueryState<T>,
        content: impl FnOnce(&T) -> SectionContent,
    ) -> Self {
        let content = match state {
            QueryState::Disabled => SectionContent::NotConfigured,
            QueryState::Error(_) => SectionContent::Error(error_message),
            QueryState::Success(data) => content(&**data),
        };
        Self {
            title,
            live,
            content,
        }
    }

    /// "Événements Populaires": the first three events of the odds query
    pub fn top_events(state: &QueryState<Vec<Event>>) -> Self {
        Self::from_state(TOP_EVENTS_TITLE, false, TOP_EVENTS_ERROR, state, |events| {
            SectionContent::Cards(
                events
                    .iter()
                    .take(TOP_EVENTS_LIMIT)
                    .map(|event| MatchCard::from_event(event, false))
                    .collect(),
            )
        })
    }

    /// "En Direct": every live event, tagged
    pub fn live(state: &QueryState<Vec<Event>>) -> Self {
        Self::from_state(LIVE_TITLE, true, LIVE_ERROR, state, |events| {
            SectionContent::Cards(
                events
                    .iter()
                    .map(|event| MatchCard::from_event(event, true))
                    .collect(),
            )
        })
    }

    pub fn scores(state: &QueryState<Vec<Event>>) -> Self {
        Self::from_state(SCORES_TITLE, false, SCORES_ERROR, state, |events| {
            SectionContent::Scores(events.iter().map(ScoreLine::from_event).collect())
        })
    }

    pub fn sports(state: &QueryState<Vec<Sport>>) -> Self {
        Self::from_state(SPORTS_TITLE, false, SPORTS_ERROR, state, |sports| {
            SectionContent::Sports(sports.iter().map(SportLine::from).collect())
        })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.content, SectionContent::Loading(_))
    }
}

/// A teletext page made of titled sections, rendered into one ANSI buffer.
#[derive(Debug, Clone)]
pub struct OddsPage {
    page_number: u16,
    title: String,
    subheader: String,
    sections: Vec<PageSection>,
    footer_note: Option<String>,
    show_footer: bool,
}

impl OddsPage {
    pub fn new(page_number: u16, title: impl Into<String>, subheader: impl Into<String>) -> Self {
        Self {
            page_number,
            title: title.into(),
            subheader: subheader.into(),
            sections: Vec::new(),
            footer_note: None,
            show_footer: false,
        }
    }

    pub fn add_section(&mut self, section: PageSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[PageSection] {
        &self.sections
    }

    /// Key hints at the bottom; only useful in interactive mode
    pub fn set_show_footer(&mut self, show: bool) {
        self.show_footer = show;
    }

    /// Extra text shown in the footer, e.g. the remaining request quota
    pub fn set_footer_note(&mut self, note: Option<String>) {
        self.footer_note = note;
    }

    pub fn is_loading(&self) -> bool {
        self.sections.iter().any(PageSection::is_loading)
    }

    /// Advances every loading indicator on the page
    pub fn update_loading_animation(&mut self) {
        for section in &mut self.sections {
            if let SectionContent::Loading(indicator) = &mut section.content {
                indicator.next_frame();
            }
        }
    }

    /// Renders the page as ANSI-coloured lines without cursor positioning.
    pub fn render_lines(&self, width: usize) -> Vec<String> {
        let title_bg_code = get_ansi_code(title_bg(), 46);
        let header_fg_code = get_ansi_code(header_fg(), 21);
        let header_bg_code = get_ansi_code(header_bg(), 21);
        let subheader_fg_code = get_ansi_code(subheader_fg(), 46);
        let text_fg_code = get_ansi_code(text_fg(), 231);
        let hint_fg_code = get_ansi_code(hint_fg(), 250);

        let mut lines = Vec::new();
        let header_text = format!("P{}", self.page_number);
        let header_width = width.saturating_sub(20);

        lines.push(format!(
            "\x1b[48;5;{title_bg_code}m\x1b[38;5;{header_fg_code}m{:<20}\x1b[48;5;{header_bg_code}m\x1b[38;5;231m{:>header_width$}\x1b[0m",
            self.title, header_text
        ));
        lines.push(format!(
            "\x1b[38;5;{subheader_fg_code}m{}\x1b[0m",
            self.subheader
        ));

        let margin = " ".repeat(CONTENT_MARGIN);
        let inner_width = width.saturating_sub(CONTENT_MARGIN * 2);

        for section in &self.sections {
            lines.push(String::new());
            lines.push(self.section_header(section, &margin, subheader_fg_code));

            match &section.content {
                SectionContent::Loading(indicator) => {
                    lines.push(format!(
                        "{margin}\x1b[38;5;{text_fg_code}m{}\x1b[0m",
                        indicator.display_text()
                    ));
                }
                SectionContent::NotConfigured => {
                    lines.push(format!(
                        "{margin}\x1b[38;5;{hint_fg_code}m{NOT_CONFIGURED_MESSAGE}\x1b[0m"
                    ));
                }
                SectionContent::Error(message) => {
                    let error_fg_code = get_ansi_code(error_fg(), 196);
                    lines.push(format!("{margin}\x1b[38;5;{error_fg_code}m{message}\x1b[0m"));
                }
                SectionContent::Cards(cards) if cards.is_empty() => {
                    lines.push(format!(
                        "{margin}\x1b[38;5;{hint_fg_code}m{EMPTY_MESSAGE}\x1b[0m"
                    ));
                }
                SectionContent::Cards(cards) => {
                    for card in cards {
                        lines.extend(render_card(card, &margin, inner_width));
                    }
                }
                SectionContent::Scores(scores) if scores.is_empty() => {
                    lines.push(format!(
                        "{margin}\x1b[38;5;{hint_fg_code}m{EMPTY_MESSAGE}\x1b[0m"
                    ));
                }
                SectionContent::Scores(scores) => {
                    for score in scores {
                        lines.push(render_score_line(score, &margin, inner_width));
                    }
                }
                SectionContent::Sports(sports) => {
                    for sport in sports {
                        lines.push(render_sport_line(sport, &margin, inner_width));
                    }
                }
            }
        }

        if self.show_footer || self.footer_note.is_some() {
            lines.push(String::new());
            let mut footer = String::new();
            if self.show_footer {
                footer.push_str("q=Quitter r=Actualiser");
            }
            if let Some(note) = &self.footer_note {
                if !footer.is_empty() {
                    footer.push_str("  ");
                }
                footer.push_str(note);
            }
            lines.push(format!("{margin}\x1b[38;5;{hint_fg_code}m{footer}\x1b[0m"));
        }

        lines
    }

    fn section_header(&self, section: &PageSection, margin: &str, color_code: u8) -> String {
        let mut header = format!("{margin}\x1b[38;5;{color_code}m{}\x1b[0m", section.title);
        if section.live {
            let live_fg_code = get_ansi_code(live_fg(), 196);
            let _ = write!(header, " \x1b[38;5;{live_fg_code}m●\x1b[0m");
        }
        header
    }

    /// Renders the page for non-interactive output: one line per row, ANSI colours kept.
    pub fn render_to_string(&self, width: usize) -> String {
        let mut buffer = self.render_lines(width).join("\n");
        buffer.push('\n');
        buffer
    }

    /// Renders the whole page in a single write.
    ///
    /// In interactive mode the screen is cleared and every row is positioned
    /// explicitly; otherwise rows are printed as plain lines.
    pub fn render_buffered(
        &self,
        stdout: &mut Stdout,
        width: usize,
        interactive: bool,
    ) -> Result<(), AppError> {
        let buffer = if interactive {
            execute!(stdout, crossterm::cursor::Hide)?;
            let lines = self.render_lines(width);
            let mut buffer = String::with_capacity(lines.iter().map(|l| l.len() + 10).sum());
            buffer.push_str("\x1b[H"); // Move to home position
            buffer.push_str("\x1b[0J"); // Clear from cursor down
            for (index, line) in lines.iter().enumerate() {
                let _ = write!(buffer, "\x1b[{};1H{line}", index + 1);
            }
            buffer
        } else {
            self.render_to_string(width)
        };

        // Write entire buffer in one operation (minimizes flicker)
        execute!(stdout, Print(buffer))?;

        if interactive {
            execute!(stdout, crossterm::cursor::Show)?;
        }

        stdout.flush()?;
        Ok(())
    }
}

fn render_card(card: &MatchCard, margin: &str, width: usize) -> Vec<String> {
    let text_fg_code = get_ansi_code(text_fg(), 231);
    let price_fg_code = get_ansi_code(price_fg(), 51);
    let label_fg_code = get_ansi_code(price_label_fg(), 226);

    let right = if card.live {
        let live_fg_code = get_ansi_code(live_fg(), 196);
        format!("\x1b[38;5;{live_fg_code}m{LIVE_TAG}\x1b[0m")
    } else {
        format!("\x1b[38;5;{text_fg_code}m{}\x1b[0m", card.kickoff_text())
    };
    let right_width = count_visible_chars(&right);
    let team_width = width.saturating_sub(right_width + 4) / 2;

    let matchup = format!(
        "{} - {}",
        truncate_name(&card.home_team, team_width),
        truncate_name(&card.away_team, team_width)
    );
    let padding = width
        .saturating_sub(count_visible_chars(&matchup) + right_width)
        .max(1);

    let hint_fg_code = get_ansi_code(hint_fg(), 250);
    let mut lines = Vec::with_capacity(3);
    if !card.sport_title.is_empty() {
        lines.push(format!(
            "{margin}\x1b[38;5;{hint_fg_code}m{}\x1b[0m",
            truncate_name(&card.sport_title, width)
        ));
    }
    lines.push(format!(
        "{margin}\x1b[38;5;{text_fg_code}m{matchup}\x1b[0m{}{right}",
        " ".repeat(padding)
    ));

    let buttons = card.price_buttons();
    if !buttons.is_empty() {
        let mut row = String::from(margin);
        for button in buttons {
            let _ = write!(
                row,
                "  \x1b[38;5;{label_fg_code}m{}\x1b[0m \x1b[38;5;{price_fg_code}m{:>6}\x1b[0m",
                button.label, button.price
            );
        }
        lines.push(row);
    }

    lines
}

fn render_score_line(score: &ScoreLine, margin: &str, width: usize) -> String {
    let text_fg_code = get_ansi_code(text_fg(), 231);
    let result_fg_code = get_ansi_code(subheader_fg(), 46);
    let hint_fg_code = get_ansi_code(hint_fg(), 250);

    let status = score.status_text();
    let result = score.score.as_deref().unwrap_or("-");
    let team_width = width.saturating_sub(status.chars().count() + 12) / 2;

    format!(
        "{margin}\x1b[38;5;{text_fg_code}m{:<team_width$} - {:<team_width$}\x1b[0m \x1b[38;5;{result_fg_code}m{result:>5}\x1b[0m \x1b[38;5;{hint_fg_code}m{status}\x1b[0m",
        truncate_name(&score.home_team, team_width),
        truncate_name(&score.away_team, team_width),
    )
}

fn render_sport_line(sport: &SportLine, margin: &str, width: usize) -> String {
    let text_fg_code = get_ansi_code(text_fg(), 231);
    let hint_fg_code = get_ansi_code(hint_fg(), 250);
    let key_width = width.saturating_sub(2) / 2;
    let marker = if sport.active { "" } else { " (inactif)" };

    format!(
        "{margin}\x1b[38;5;{text_fg_code}m{:<key_width$}\x1b[0m \x1b[38;5;{hint_fg_code}m{}{marker}\x1b[0m",
        truncate_name(&sport.key, key_width),
        truncate_name(&sport.title, width.saturating_sub(key_width + 1)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OddsApiError;
    use crate::testing_utils::TestDataBuilder;
    use std::sync::Arc;

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut in_ansi = false;
        for c in text.chars() {
            if c == '\x1b' {
                in_ansi = true;
            } else if in_ansi && c == 'm' {
                in_ansi = false;
            } else if !in_ansi {
                out.push(c);
            }
        }
        out
    }

    fn page_with(section: PageSection) -> String {
        let mut page = OddsPage::new(470, "COTES", "FOOTBALL");
        page.add_section(section);
        strip_ansi(&page.render_to_string(80))
    }

    #[test]
    fn test_top_events_shows_first_three_with_prices() {
        let events = TestDataBuilder::create_events(5);
        let section = PageSection::top_events(&QueryState::Success(Arc::new(events)));

        match &section.content {
            SectionContent::Cards(cards) => assert_eq!(cards.len(), 3),
            other => panic!("unexpected content {other:?}"),
        }

        let output = page_with(section);
        assert!(output.contains(TOP_EVENTS_TITLE));
        assert!(output.contains("Home 0 - Away 0"));
        assert!(output.contains("Home 2 - Away 2"));
        assert!(!output.contains("Home 3"));
        assert!(output.contains("2.00"));
        assert!(output.contains("3.10"));
        assert!(output.contains("3.50"));
    }

    #[test]
    fn test_error_shows_generic_message_only() {
        let state: QueryState<Vec<Event>> = QueryState::Error(OddsApiError::ApiKeyInvalid);
        let output = page_with(PageSection::live(&state));

        assert!(output.contains(LIVE_ERROR));
        assert!(!output.contains("401"));
        assert!(!output.contains("API_KEY_INVALID"));

        let state: QueryState<Vec<Event>> =
            QueryState::Error(OddsApiError::connection("timeout"));
        assert!(page_with(PageSection::top_events(&state)).contains(TOP_EVENTS_ERROR));
    }

    #[test]
    fn test_live_cards_are_tagged() {
        let events = vec![
            TestDataBuilder::event("Paris SG", "Lyon")
                .with_prices(1.8, Some(3.6), 4.2)
                .build(),
        ];
        let output = page_with(PageSection::live(&QueryState::Success(Arc::new(events))));

        assert!(output.contains(LIVE_TITLE));
        assert!(output.contains(LIVE_TAG));
        assert!(output.contains("1   1.80"));
        assert!(output.contains("X   3.60"));
        assert!(output.contains("2   4.20"));
    }

    #[test]
    fn test_cards_show_league_above_teams() {
        let events = vec![
            TestDataBuilder::event("Spurs", "Leeds")
                .with_sport("soccer_epl")
                .with_league("EPL")
                .with_prices(1.9, Some(3.5), 4.0)
                .build(),
        ];
        let output = page_with(PageSection::top_events(&QueryState::Success(Arc::new(events))));
        let lines: Vec<&str> = output.lines().collect();

        let league_row = lines
            .iter()
            .position(|line| line.trim() == "EPL")
            .expect("league row");
        assert!(lines[league_row + 1].contains("Spurs - Leeds"));
    }

    #[test]
    fn test_disabled_query_shows_configuration_hint() {
        let state: QueryState<Vec<Event>> = QueryState::Disabled;
        let output = page_with(PageSection::top_events(&state));
        assert!(output.contains("--set-api-key"));
    }

    #[test]
    fn test_empty_list_message() {
        let output = page_with(PageSection::live(&QueryState::Success(Arc::new(vec![]))));
        assert!(output.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_scores_section() {
        let events = vec![
            TestDataBuilder::event("Arsenal", "Chelsea")
                .with_scores("2", "1", true)
                .build(),
        ];
        let output = page_with(PageSection::scores(&QueryState::Success(Arc::new(events))));
        assert!(output.contains(SCORES_TITLE));
        assert!(output.contains("2-1"));
        assert!(output.contains("Terminé"));
    }

    #[test]
    fn test_sports_section() {
        let sports = vec![TestDataBuilder::sport("soccer_epl", "EPL")];
        let output = page_with(PageSection::sports(&QueryState::Success(Arc::new(sports))));
        assert!(output.contains("soccer_epl"));
        assert!(output.contains("EPL"));
    }

    #[test]
    fn test_loading_page_animates() {
        let mut page = OddsPage::new(470, "COTES", "FOOTBALL");
        page.add_section(PageSection::loading(TOP_EVENTS_TITLE, false));
        assert!(page.is_loading());

        let before = strip_ansi(&page.render_to_string(80));
        page.update_loading_animation();
        let after = strip_ansi(&page.render_to_string(80));

        assert!(before.contains("| Chargement..."));
        assert!(after.contains("/ Chargement..."));
    }

    #[test]
    fn test_footer_hints_and_note() {
        let mut page = OddsPage::new(470, "COTES", "FOOTBALL");
        page.set_show_footer(true);
        page.set_footer_note(Some("Requêtes restantes: 42".to_string()));

        let output = strip_ansi(&page.render_to_string(80));
        assert!(output.contains("q=Quitter r=Actualiser"));
        assert!(output.contains("Requêtes restantes: 42"));
    }

    #[test]
    fn test_header_contains_title_and_page_number() {
        let page = OddsPage::new(470, "COTES", "FOOTBALL");
        let lines = page.render_lines(80);
        let header = strip_ansi(&lines[0]);
        assert!(header.starts_with("COTES"));
        assert!(header.ends_with("P470"));
        assert_eq!(count_visible_chars(&lines[0]), 80);
    }
}
