use chrono::{Local, NaiveDate};
use ratatui::widgets::ListState;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use devocional_core::devotion::{self, Devotion};
use devocional_core::research::{ResearchEngine, ResearchResult, SUGGESTED_TOPICS};
use devocional_core::{Config, Session, Topic, Verse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Devotion,
    Finder,
    Research,
}

impl Tab {
    pub fn all() -> [Tab; 3] {
        [Tab::Devotion, Tab::Finder, Tab::Research]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Devotion => "Daily Devotion",
            Tab::Finder => "Scripture Finder",
            Tab::Research => "Bible Research",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Devotion => 0,
            Tab::Finder => 1,
            Tab::Research => 2,
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Devotion => Tab::Finder,
            Tab::Finder => Tab::Research,
            Tab::Research => Tab::Devotion,
        }
    }

    pub fn prev(&self) -> Tab {
        match self {
            Tab::Devotion => Tab::Research,
            Tab::Finder => Tab::Devotion,
            Tab::Research => Tab::Finder,
        }
    }

    pub fn from_config(name: &str) -> Option<Tab> {
        match name.to_lowercase().as_str() {
            "devotion" => Some(Tab::Devotion),
            "finder" | "quotes" => Some(Tab::Finder),
            "research" => Some(Tab::Research),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinderPane {
    #[default]
    Topics,
    Results,
    Saved,
}

impl FinderPane {
    pub fn right(&self) -> FinderPane {
        match self {
            FinderPane::Topics => FinderPane::Results,
            FinderPane::Results => FinderPane::Saved,
            FinderPane::Saved => FinderPane::Saved,
        }
    }

    pub fn left(&self) -> FinderPane {
        match self {
            FinderPane::Topics => FinderPane::Topics,
            FinderPane::Results => FinderPane::Topics,
            FinderPane::Saved => FinderPane::Results,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResearchPane {
    #[default]
    Suggested,
    History,
}

/// Move a list selection one step, clamped to `len`.
fn step_selection(state: &mut ListState, len: usize, forward: bool) {
    if len == 0 {
        state.select(None);
        return;
    }
    let i = state.selected().unwrap_or(0);
    let next = if forward { (i + 1).min(len - 1) } else { i.saturating_sub(1) };
    state.select(Some(next));
}

/// Keep a selection valid after the list shrank or grew.
fn clamp_selection(state: &mut ListState, len: usize) {
    match state.selected() {
        _ if len == 0 => state.select(None),
        Some(i) if i >= len => state.select(Some(len - 1)),
        None => state.select(Some(0)),
        _ => {}
    }
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub tab: Tab,
    pub input_mode: InputMode,
    pub status: Option<String>,

    // Devotion state
    pub today: NaiveDate,
    pub devotion: &'static Devotion,
    pub devotion_scroll: u16,

    // Finder state
    pub finder_focus: FinderPane,
    pub search_input: String,
    pub topic_state: ListState,
    pub results_state: ListState,
    pub saved_state: ListState,

    // Research state
    pub research_focus: ResearchPane,
    pub research_input: String,
    pub suggested_state: ListState,
    pub history_state: ListState,
    pub research_scroll: u16,
    pub research_task: Option<JoinHandle<ResearchResult>>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Data
    pub session: Session,
    pub engine: ResearchEngine,
}

impl App {
    pub fn new(config: &Config, engine: ResearchEngine) -> Self {
        let today = Local::now().date_naive();
        let tab = config
            .start_tab
            .as_deref()
            .and_then(Tab::from_config)
            .unwrap_or(Tab::Devotion);

        let mut topic_state = ListState::default();
        topic_state.select(Some(0));
        let mut suggested_state = ListState::default();
        suggested_state.select(Some(0));

        Self {
            should_quit: false,
            tab,
            input_mode: InputMode::Normal,
            status: None,

            today,
            devotion: devotion::devotion_for(today),
            devotion_scroll: 0,

            finder_focus: FinderPane::default(),
            search_input: String::new(),
            topic_state,
            results_state: ListState::default(),
            saved_state: ListState::default(),

            research_focus: ResearchPane::default(),
            research_input: String::new(),
            suggested_state,
            history_state: ListState::default(),
            research_scroll: 0,
            research_task: None,

            animation_frame: 0,

            session: Session::new(),
            engine,
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    /// Roll the devotion over when the local day changes.
    pub fn refresh_day(&mut self, today: NaiveDate) {
        if today != self.today {
            debug!(%today, "day changed, selecting new devotion");
            self.today = today;
            self.devotion = devotion::devotion_for(today);
            self.devotion_scroll = 0;
        }
    }

    pub fn tick(&mut self) {
        if self.session.is_researching() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        self.refresh_day(Local::now().date_naive());
    }

    // Finder

    pub fn selected_topic(&self) -> Option<Topic> {
        self.topic_state
            .selected()
            .and_then(|i| Topic::all().get(i).copied())
    }

    pub fn selected_result(&self) -> Option<&Verse> {
        self.results_state
            .selected()
            .and_then(|i| self.session.results().get(i))
    }

    pub fn selected_saved(&self) -> Option<&Verse> {
        self.saved_state
            .selected()
            .and_then(|i| self.session.saved().get(i))
    }

    pub fn finder_down(&mut self) {
        self.finder_step(true);
    }

    pub fn finder_up(&mut self) {
        self.finder_step(false);
    }

    fn finder_step(&mut self, forward: bool) {
        match self.finder_focus {
            FinderPane::Topics => step_selection(&mut self.topic_state, Topic::all().len(), forward),
            FinderPane::Results => {
                step_selection(&mut self.results_state, self.session.results().len(), forward)
            }
            FinderPane::Saved => {
                step_selection(&mut self.saved_state, self.session.saved().len(), forward)
            }
        }
    }

    fn reset_results_selection(&mut self) {
        let len = self.session.results().len();
        self.results_state.select(if len > 0 { Some(0) } else { None });
    }

    pub fn load_selected_topic(&mut self) {
        if let Some(topic) = self.selected_topic() {
            self.session.show_topic(topic.as_str());
            self.reset_results_selection();
            self.finder_focus = FinderPane::Results;
            self.status = None;
        }
    }

    pub fn perform_search(&mut self) {
        if !self.session.search(&self.search_input) {
            return;
        }
        self.reset_results_selection();
        self.finder_focus = FinderPane::Results;
        self.status = if self.session.results().is_empty() {
            Some(format!("No verses found for \"{}\"", self.search_input.trim()))
        } else {
            None
        };
    }

    pub fn random_verse(&mut self) {
        let verse = self.session.random_verse();
        self.reset_results_selection();
        self.finder_focus = FinderPane::Results;
        self.status = Some(format!("Random verse: {}", verse.reference));
    }

    pub fn save_selected_result(&mut self) {
        if let Some(verse) = self.selected_result().copied() {
            if self.session.save_verse(verse) {
                self.status = Some(format!("Saved {}", verse.reference));
                clamp_selection(&mut self.saved_state, self.session.saved().len());
            } else {
                self.status = Some(format!("{} is already saved", verse.reference));
            }
        }
    }

    pub fn remove_selected_saved(&mut self) {
        let Some(reference) = self.selected_saved().map(|v| v.reference) else {
            return;
        };
        if self.session.remove_verse(reference) {
            self.status = Some(format!("Removed {}", reference));
        }
        clamp_selection(&mut self.saved_state, self.session.saved().len());
        if self.session.saved().is_empty() && self.finder_focus == FinderPane::Saved {
            self.finder_focus = FinderPane::Results;
        }
    }

    pub fn clear_results(&mut self) {
        self.session.clear_results();
        self.results_state.select(None);
    }

    // Research

    pub fn research_down(&mut self) {
        self.research_step(true);
    }

    pub fn research_up(&mut self) {
        self.research_step(false);
    }

    fn research_step(&mut self, forward: bool) {
        match self.research_focus {
            ResearchPane::Suggested => {
                step_selection(&mut self.suggested_state, SUGGESTED_TOPICS.len(), forward)
            }
            ResearchPane::History => {
                step_selection(&mut self.history_state, self.session.history().len(), forward)
            }
        }
    }

    pub fn toggle_research_focus(&mut self) {
        self.research_focus = match self.research_focus {
            ResearchPane::Suggested if !self.session.history().is_empty() => {
                clamp_selection(&mut self.history_state, self.session.history().len());
                ResearchPane::History
            }
            _ => ResearchPane::Suggested,
        };
    }

    /// Term under the cursor in the suggested or history list.
    pub fn highlighted_research_term(&self) -> Option<String> {
        match self.research_focus {
            ResearchPane::Suggested => self
                .suggested_state
                .selected()
                .and_then(|i| SUGGESTED_TOPICS.get(i))
                .map(|t| t.to_string()),
            ResearchPane::History => self
                .history_state
                .selected()
                .and_then(|i| self.session.history().get(i))
                .cloned(),
        }
    }

    /// Kick off a research query on a background task. Ignored for blank
    /// input or while another query is pending.
    pub fn start_research(&mut self, raw_term: &str) {
        let Some(term) = self.session.begin_research(raw_term) else {
            return;
        };
        let engine = self.engine;
        self.research_task = Some(tokio::spawn(async move { engine.query(&term).await }));
        self.research_input.clear();
        self.research_scroll = 0;
        self.animation_frame = 0;
    }

    /// Collect a finished research task, if any.
    pub async fn poll_research(&mut self) {
        let finished = self
            .research_task
            .as_ref()
            .is_some_and(|task| task.is_finished());
        if !finished {
            return;
        }

        if let Some(task) = self.research_task.take() {
            match task.await {
                Ok(result) => {
                    self.session.finish_research(result);
                    clamp_selection(&mut self.history_state, self.session.history().len());
                }
                Err(e) => {
                    warn!(error = %e, "research task failed");
                    self.session.cancel_research();
                    self.status = Some("Research failed, please try again".to_string());
                }
            }
        }
    }

    pub fn shutdown(&mut self) {
        if let Some(task) = self.research_task.take() {
            task.abort();
            self.session.cancel_research();
        }
    }

    pub fn scroll_down(&mut self) {
        match self.tab {
            Tab::Devotion => self.devotion_scroll = self.devotion_scroll.saturating_add(1),
            Tab::Research => self.research_scroll = self.research_scroll.saturating_add(1),
            Tab::Finder => self.finder_down(),
        }
    }

    pub fn scroll_up(&mut self) {
        match self.tab {
            Tab::Devotion => self.devotion_scroll = self.devotion_scroll.saturating_sub(1),
            Tab::Research => self.research_scroll = self.research_scroll.saturating_sub(1),
            Tab::Finder => self.finder_up(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devocional_core::ResearchState;
    use std::time::Duration;

    fn test_app() -> App {
        App::new(&Config::default(), ResearchEngine::instant())
    }

    async fn wait_for_research(app: &mut App) {
        for _ in 0..100 {
            app.poll_research().await;
            if app.research_task.is_none() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("research task never finished");
    }

    #[test]
    fn test_start_tab_from_config() {
        let config = Config {
            start_tab: Some("Research".to_string()),
            ..Config::default()
        };
        let app = App::new(&config, ResearchEngine::instant());
        assert_eq!(app.tab, Tab::Research);

        let config = Config {
            start_tab: Some("nowhere".to_string()),
            ..Config::default()
        };
        assert_eq!(App::new(&config, ResearchEngine::instant()).tab, Tab::Devotion);
    }

    #[test]
    fn test_tab_cycle() {
        for tab in Tab::all() {
            assert_eq!(tab.next().prev(), tab);
        }
        assert_eq!(Tab::Research.next(), Tab::Devotion);
    }

    #[test]
    fn test_refresh_day_changes_devotion() {
        let mut app = test_app();
        let day = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        app.refresh_day(day);
        assert_eq!(app.devotion.reference, "Psalm 46:10");
        app.refresh_day(day.succ_opt().unwrap());
        assert_eq!(app.devotion.reference, "Proverbs 3:5-6");
    }

    #[test]
    fn test_load_topic_and_save() {
        let mut app = test_app();
        app.load_selected_topic();
        assert_eq!(app.session.selected_topic(), Some(Topic::Love));
        assert_eq!(app.finder_focus, FinderPane::Results);
        assert_eq!(app.selected_result().unwrap().reference, "John 3:16");

        app.save_selected_result();
        app.save_selected_result();
        assert_eq!(app.session.saved().len(), 1);
        assert_eq!(app.status.as_deref(), Some("John 3:16 is already saved"));
    }

    #[test]
    fn test_remove_saved_clamps_selection() {
        let mut app = test_app();
        app.load_selected_topic();
        app.save_selected_result();
        app.finder_down();
        app.save_selected_result();

        app.finder_focus = FinderPane::Saved;
        app.saved_state.select(Some(1));
        app.remove_selected_saved();
        assert_eq!(app.saved_state.selected(), Some(0));

        app.remove_selected_saved();
        assert!(app.session.saved().is_empty());
        assert_eq!(app.saved_state.selected(), None);
        assert_eq!(app.finder_focus, FinderPane::Results);
    }

    #[test]
    fn test_search_without_match_sets_status() {
        let mut app = test_app();
        app.search_input = "zebulun".to_string();
        app.perform_search();
        assert!(app.session.results().is_empty());
        assert_eq!(app.results_state.selected(), None);
        assert!(app.status.is_some());
    }

    #[tokio::test]
    async fn test_research_round_trip() {
        let mut app = test_app();
        app.start_research("Sermon on the Mount");
        assert!(app.session.is_researching());
        app.start_research("creation");

        wait_for_research(&mut app).await;
        match app.session.research_state() {
            ResearchState::Ready(result) => assert_eq!(result.record.source, "Matthew 5-7"),
            other => panic!("unexpected state {:?}", other),
        }
        assert_eq!(app.session.history(), ["Sermon on the Mount"]);
    }

    #[tokio::test]
    async fn test_highlighted_history_term() {
        let mut app = test_app();
        app.start_research("creation");
        wait_for_research(&mut app).await;

        app.toggle_research_focus();
        assert_eq!(app.research_focus, ResearchPane::History);
        assert_eq!(app.highlighted_research_term().as_deref(), Some("creation"));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_pending_research() {
        let mut app = App::new(&Config::default(), ResearchEngine::new(Duration::from_secs(5)));
        app.start_research("creation");
        app.shutdown();
        assert!(app.research_task.is_none());
        assert_eq!(app.session.research_state(), &ResearchState::Idle);
    }
}
