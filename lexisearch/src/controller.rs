use std::future::Future;

use dictionary::{Dictionary, DictionaryError, Word};
use log::{debug, info, warn};

use crate::recent::{RecentSearches, RecentStore};

pub const EMPTY_TERM_MESSAGE: &str = "Please enter a word to search.";

/// Anything that can look up a word's entries.
pub trait DefinitionSource {
    fn fetch_definitions(
        &self,
        word: &str,
    ) -> impl Future<Output = Result<Vec<Word>, DictionaryError>> + Send;
}

impl DefinitionSource for Dictionary {
    async fn fetch_definitions(&self, word: &str) -> Result<Vec<Word>, DictionaryError> {
        self.get_definitions(word).await
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Found(Vec<Word>),
}

/// A search that passed validation and is waiting for its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    term: String,
}

impl SearchTicket {
    pub fn term(&self) -> &str {
        &self.term
    }
}

pub struct SearchController<S> {
    query: String,
    state: SearchState,
    recent: RecentSearches,
    store: S,
    generation: u64,
}

impl<S: RecentStore> SearchController<S> {
    /// Starts with whatever recent list the store can produce.
    pub async fn load(store: S) -> Self {
        let recent = match store.load().await {
            Ok(terms) => RecentSearches::from_terms(terms),
            Err(error) => {
                debug!("recent searches unavailable: {error:#}");
                RecentSearches::default()
            }
        };
        Self {
            query: String::new(),
            state: SearchState::Idle,
            recent,
            store,
            generation: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn recent(&self) -> &RecentSearches {
        &self.recent
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Loading)
    }

    /// Looks up `term` and waits for the outcome.
    pub async fn search<D: DefinitionSource>(&mut self, source: &D, term: &str) {
        if let Some(ticket) = self.begin(term) {
            let outcome = source.fetch_definitions(ticket.term()).await;
            self.settle(ticket, outcome).await;
        }
    }

    /// Validates `term` and moves to `Loading`. Returns `None` when the term
    /// is blank, in which case the state already holds the error.
    pub fn begin(&mut self, term: &str) -> Option<SearchTicket> {
        let term = term.trim();
        self.query = term.to_owned();
        self.generation += 1;
        if term.is_empty() {
            self.state = SearchState::Failed(EMPTY_TERM_MESSAGE.to_owned());
            return None;
        }
        self.state = SearchState::Loading;
        Some(SearchTicket {
            generation: self.generation,
            term: term.to_owned(),
        })
    }

    /// Applies the outcome of `ticket`. Outcomes of superseded searches are
    /// dropped; returns whether this one was applied.
    pub async fn settle(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<Word>, DictionaryError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!("dropping stale result for {:?}", ticket.term);
            return false;
        }
        match outcome {
            Ok(words) => {
                info!("{} entries for {:?}", words.len(), ticket.term);
                self.state = SearchState::Found(words);
                self.recent.record(&ticket.term);
                self.persist().await;
            }
            Err(error) => {
                warn!("search for {:?} failed: {error:?}", ticket.term);
                self.state = SearchState::Failed(error.to_string());
            }
        }
        true
    }

    pub async fn clear_recent(&mut self) {
        self.recent.clear();
        self.persist().await;
    }

    async fn persist(&self) {
        if let Err(error) = self.store.save(self.recent.terms()).await {
            debug!("could not save recent searches: {error:#}");
        }
    }
}



#[cfg(test)]
mod tests {
    use super::testing::{entry, FakeSource};
    use super::*;
    use crate::recent::testing::MemoryStore;

    #[tokio::test]
    async fn successful_search_records_term() {
        let store = MemoryStore::default();
        let source = FakeSource::knowing(&["ocean"]);
        let mut controller = SearchController::load(store.clone()).await;

        controller.search(&source, "  ocean ").await;

        assert_eq!(controller.query(), "ocean");
        assert_eq!(controller.state(), &SearchState::Found(vec![entry("ocean")]));
        assert_eq!(controller.recent().terms(), ["ocean"]);
        assert_eq!(store.terms(), ["ocean"]);
        assert_eq!(source.requests(), ["ocean"]);
    }

    #[tokio::test]
    async fn blank_term_fails_without_request() {
        let store = MemoryStore::with_terms(&["sea"]);
        let source = FakeSource::knowing(&["ocean"]);
        let mut controller = SearchController::load(store.clone()).await;

        for blank in ["", "   ", "\t\n"] {
            controller.search(&source, blank).await;
            assert_eq!(
                controller.state(),
                &SearchState::Failed(EMPTY_TERM_MESSAGE.to_owned())
            );
        }
        assert!(source.requests().is_empty());
        assert_eq!(controller.recent().terms(), ["sea"]);
        assert_eq!(store.saves(), 0);
    }

    #[tokio::test]
    async fn failure_keeps_recent_list() {
        let store = MemoryStore::with_terms(&["sea"]);
        let source = FakeSource::knowing(&[]);
        let mut controller = SearchController::load(store.clone()).await;

        controller.search(&source, "qwxz").await;

        assert_eq!(
            controller.state(),
            &SearchState::Failed("Sorry pal...".to_owned())
        );
        assert!(!controller.is_loading());
        assert_eq!(controller.recent().terms(), ["sea"]);
        assert_eq!(store.saves(), 0);
    }

    #[tokio::test]
    async fn repeated_term_keeps_latest_casing() {
        let source = FakeSource::knowing(&["ocean"]);
        let mut controller = SearchController::load(MemoryStore::default()).await;

        controller.search(&source, "Ocean").await;
        controller.search(&source, "ocean").await;

        assert_eq!(controller.recent().terms(), ["ocean"]);
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn eleven_searches_keep_ten() {
        let words: Vec<String> = (0..11).map(|index| format!("word{index}")).collect();
        let known: Vec<&str> = words.iter().map(String::as_str).collect();
        let source = FakeSource::knowing(&known);
        let mut controller = SearchController::load(MemoryStore::default()).await;

        for word in &words {
            controller.search(&source, word).await;
        }

        let expected: Vec<String> = words.iter().skip(1).rev().cloned().collect();
        assert_eq!(controller.recent().terms(), expected.as_slice());
    }

    #[tokio::test]
    async fn begin_moves_to_loading() {
        let mut controller = SearchController::load(MemoryStore::default()).await;
        assert_eq!(controller.state(), &SearchState::Idle);

        let ticket = controller.begin(" sea ").unwrap();
        assert_eq!(ticket.term(), "sea");
        assert!(controller.is_loading());
    }

    #[tokio::test]
    async fn stale_outcome_is_dropped() {
        let store = MemoryStore::default();
        let mut controller = SearchController::load(store.clone()).await;

        let slow = controller.begin("ocean").unwrap();
        let fast = controller.begin("sea").unwrap();
        assert!(controller.settle(fast, Ok(vec![entry("sea")])).await);
        assert!(!controller.settle(slow, Ok(vec![entry("ocean")])).await);

        assert_eq!(controller.state(), &SearchState::Found(vec![entry("sea")]));
        assert_eq!(controller.recent().terms(), ["sea"]);
        assert_eq!(store.terms(), ["sea"]);
    }

    #[tokio::test]
    async fn blank_search_supersedes_pending_one() {
        let mut controller = SearchController::load(MemoryStore::default()).await;

        let pending = controller.begin("ocean").unwrap();
        assert!(controller.begin(" ").is_none());
        assert!(!controller.settle(pending, Ok(vec![entry("ocean")])).await);

        assert_eq!(
            controller.state(),
            &SearchState::Failed(EMPTY_TERM_MESSAGE.to_owned())
        );
        assert!(controller.recent().is_empty());
    }

    #[tokio::test]
    async fn broken_store_is_silent() {
        let source = FakeSource::knowing(&["ocean"]);
        let mut controller = SearchController::load(MemoryStore::broken()).await;
        assert!(controller.recent().is_empty());

        controller.search(&source, "ocean").await;

        assert_eq!(controller.state(), &SearchState::Found(vec![entry("ocean")]));
        assert_eq!(controller.recent().terms(), ["ocean"]);
    }

    #[tokio::test]
    async fn clear_recent_persists_empty_list() {
        let store = MemoryStore::with_terms(&["ocean", "sea"]);
        let mut controller = SearchController::load(store.clone()).await;

        controller.clear_recent().await;

        assert!(controller.recent().is_empty());
        assert!(store.terms().is_empty());
    }
}
