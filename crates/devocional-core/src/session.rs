//! UI-agnostic per-session state.
//!
//! One [`Session`] lives for one user's interaction and is never shared or
//! persisted. Every front-end (TUI, one-shot CLI) drives the engines through
//! it so the saved-verse and history rules stay in one place.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::research::{ResearchEngine, ResearchResult};
use crate::scripture::{self, Verse};
use crate::topic::Topic;

/// Maximum number of remembered research terms.
pub const HISTORY_LIMIT: usize = 5;

/// Verses the user starred, keyed by reference, kept in insertion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SavedVerses {
    verses: Vec<Verse>,
}

impl SavedVerses {
    /// Returns false if a verse with the same reference is already saved.
    pub fn insert(&mut self, verse: Verse) -> bool {
        if self.contains(verse.reference) {
            return false;
        }
        self.verses.push(verse);
        true
    }

    pub fn remove(&mut self, reference: &str) -> bool {
        let before = self.verses.len();
        self.verses.retain(|v| v.reference != reference);
        self.verses.len() != before
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.verses.iter().any(|v| v.reference == reference)
    }

    pub fn as_slice(&self) -> &[Verse] {
        &self.verses
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

/// Recent research terms, most recent first.
///
/// A term already present is neither duplicated nor moved to the front.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchHistory {
    terms: Vec<String>,
}

impl SearchHistory {
    pub fn record(&mut self, term: &str) -> bool {
        if self.terms.iter().any(|t| t == term) {
            return false;
        }
        self.terms.insert(0, term.to_string());
        self.terms.truncate(HISTORY_LIMIT);
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// idle -> searching -> ready
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResearchState {
    #[default]
    Idle,
    Searching { term: String },
    Ready(ResearchResult),
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    saved: SavedVerses,
    history: SearchHistory,
    results: Vec<Verse>,
    selected_topic: Option<Topic>,
    research: ResearchState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // Saved verses

    pub fn save_verse(&mut self, verse: Verse) -> bool {
        let inserted = self.saved.insert(verse);
        debug!(reference = verse.reference, inserted, "save verse");
        inserted
    }

    pub fn remove_verse(&mut self, reference: &str) -> bool {
        let removed = self.saved.remove(reference);
        debug!(reference, removed, "remove verse");
        removed
    }

    pub fn is_saved(&self, reference: &str) -> bool {
        self.saved.contains(reference)
    }

    pub fn saved(&self) -> &[Verse] {
        self.saved.as_slice()
    }

    // Search history

    pub fn record_search(&mut self, term: &str) -> bool {
        self.history.record(term)
    }

    pub fn history(&self) -> &[String] {
        self.history.as_slice()
    }

    // Verse results

    pub fn results(&self) -> &[Verse] {
        &self.results
    }

    /// Topic whose verses are currently shown, if the results came from a
    /// topic lookup.
    pub fn selected_topic(&self) -> Option<Topic> {
        self.selected_topic
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
        self.selected_topic = None;
    }

    pub fn show_topic(&mut self, topic: &str) -> &[Verse] {
        self.results = scripture::by_topic(topic).to_vec();
        self.selected_topic = Topic::from_key(topic);
        &self.results
    }

    /// Replaces the results with a free-text search. A blank query leaves
    /// results and topic marker untouched and returns false.
    pub fn search(&mut self, query: &str) -> bool {
        if query.trim().is_empty() {
            return false;
        }
        self.results = scripture::search(query).into_iter().copied().collect();
        self.selected_topic = None;
        true
    }

    pub fn random_verse(&mut self) -> Verse {
        self.random_verse_with(&mut rand::thread_rng())
    }

    pub fn random_verse_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Verse {
        let verse = *scripture::random_verse_with(rng);
        self.results = vec![verse];
        self.selected_topic = None;
        verse
    }

    // Research

    pub fn research_state(&self) -> &ResearchState {
        &self.research
    }

    pub fn is_researching(&self) -> bool {
        matches!(self.research, ResearchState::Searching { .. })
    }

    /// Moves to `Searching` and hands back the term to resolve.
    ///
    /// Returns `None` without changing state for a blank term, or while an
    /// earlier query is still in flight.
    pub fn begin_research(&mut self, raw_term: &str) -> Option<String> {
        if raw_term.trim().is_empty() {
            return None;
        }
        if let ResearchState::Searching { term } = &self.research {
            warn!(pending = %term, ignored = raw_term, "research already in progress");
            return None;
        }
        self.research = ResearchState::Searching {
            term: raw_term.to_string(),
        };
        Some(raw_term.to_string())
    }

    /// Completes the pending query: records its term in history (found or
    /// fallback alike) and moves to `Ready`. Ignored when nothing is pending.
    pub fn finish_research(&mut self, result: ResearchResult) -> bool {
        let term = match std::mem::take(&mut self.research) {
            ResearchState::Searching { term } => term,
            other => {
                self.research = other;
                warn!("research result arrived with no query pending");
                return false;
            }
        };
        self.history.record(&term);
        self.research = ResearchState::Ready(result);
        true
    }

    /// Drop a pending query, e.g. when its task was cancelled.
    pub fn cancel_research(&mut self) {
        if self.is_researching() {
            self.research = ResearchState::Idle;
        }
    }

    pub async fn research(
        &mut self,
        engine: &ResearchEngine,
        raw_term: &str,
    ) -> Option<&ResearchResult> {
        let term = self.begin_research(raw_term)?;
        let result = engine.query(&term).await;
        self.finish_research(result);
        match &self.research {
            ResearchState::Ready(result) => Some(result),
            _ => None,
        }
    }
}
