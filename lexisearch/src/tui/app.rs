use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dictionary::{DictionaryError, Word};
use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::controller::{DefinitionSource, SearchController, SearchState, SearchTicket};
use crate::recent::RecentStore;
use crate::render::SUGGESTIONS;
use crate::search_input::{DebounceFired, SearchInput};

const SCROLL_PAGE: u16 = 5;

/// Outcome of a background lookup.
pub struct Completed {
    ticket: SearchTicket,
    outcome: Result<Vec<Word>, DictionaryError>,
}

/// Receivers the event loop selects on next to terminal input.
pub struct AppEvents {
    pub debounce: UnboundedReceiver<DebounceFired>,
    pub completed: UnboundedReceiver<Completed>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Recent,
    Suggestions,
}

pub struct App<S, D> {
    pub controller: SearchController<S>,
    pub input: SearchInput,
    pub focus: Focus,
    pub recent_selected: usize,
    pub suggestion_selected: usize,
    pub scroll: u16,
    pub spinner_frame: usize,
    source: Arc<D>,
    completed: UnboundedSender<Completed>,
    should_quit: bool,
}

impl<S, D> App<S, D>
where
    S: RecentStore,
    D: DefinitionSource + Send + Sync + 'static,
{
    pub fn new(controller: SearchController<S>, source: Arc<D>) -> (Self, AppEvents) {
        let (debounce_tx, debounce) = mpsc::unbounded_channel();
        let (completed_tx, completed) = mpsc::unbounded_channel();
        let app = Self {
            controller,
            input: SearchInput::new(debounce_tx),
            focus: Focus::Search,
            recent_selected: 0,
            suggestion_selected: 0,
            scroll: 0,
            spinner_frame: 0,
            source,
            completed: completed_tx,
            should_quit: false,
        };
        (app, AppEvents { debounce, completed })
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Starts a lookup in the background. The controller validates the term
    /// and the input mirrors the resulting query.
    pub fn search(&mut self, term: &str) {
        if let Some(ticket) = self.controller.begin(term) {
            let source = Arc::clone(&self.source);
            let completed = self.completed.clone();
            tokio::spawn(async move {
                let outcome = source.fetch_definitions(ticket.term()).await;
                if completed.send(Completed { ticket, outcome }).is_err() {
                    debug!("search finished after the UI closed");
                }
            });
        }
        self.input.sync_initial(self.controller.query());
        self.scroll = 0;
        if self.focus == Focus::Suggestions {
            self.focus = Focus::Search;
        }
    }

    /// Suggestions are only on screen before the first search.
    fn suggestions_shown(&self) -> bool {
        matches!(self.controller.state(), SearchState::Idle)
    }

    pub fn on_debounce(&mut self, fired: DebounceFired) {
        if let Some(term) = self.input.on_fired(fired) {
            self.search(&term);
        }
    }

    pub async fn on_completed(&mut self, completed: Completed) {
        self.controller
            .settle(completed.ticket, completed.outcome)
            .await;
        let last = self.controller.recent().len().saturating_sub(1);
        self.recent_selected = self.recent_selected.min(last);
    }

    pub fn on_tick(&mut self) {
        if self.controller.is_loading() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            (KeyCode::Tab, _) => {
                self.focus = match self.focus {
                    Focus::Search => Focus::Recent,
                    Focus::Recent if self.suggestions_shown() => Focus::Suggestions,
                    Focus::Recent | Focus::Suggestions => Focus::Search,
                };
            }
            (KeyCode::BackTab, _) => {
                self.focus = match self.focus {
                    Focus::Search if self.suggestions_shown() => Focus::Suggestions,
                    Focus::Search | Focus::Suggestions => Focus::Recent,
                    Focus::Recent => Focus::Search,
                };
            }
            (KeyCode::PageDown, _) => self.scroll = self.scroll.saturating_add(SCROLL_PAGE),
            (KeyCode::PageUp, _) => self.scroll = self.scroll.saturating_sub(SCROLL_PAGE),
            _ => match self.focus {
                Focus::Search => self.handle_search_key(key),
                Focus::Recent => self.handle_recent_key(key),
                Focus::Suggestions => self.handle_suggestion_key(key),
            },
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => {
                let term = self.input.submit();
                self.search(&term);
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.input.clear(),
            (KeyCode::Char(c), modifiers)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input.insert_char(c)
            }
            (KeyCode::Backspace, _) => self.input.backspace(),
            (KeyCode::Delete, _) => self.input.delete(),
            (KeyCode::Left, _) => self.input.move_left(),
            (KeyCode::Right, _) => self.input.move_right(),
            (KeyCode::Home, _) => self.input.move_home(),
            (KeyCode::End, _) => self.input.move_end(),
            (KeyCode::Down, _) if !self.controller.recent().is_empty() => {
                self.focus = Focus::Recent;
            }
            (KeyCode::Down, _) if self.suggestions_shown() => {
                self.focus = Focus::Suggestions;
            }
            _ => {}
        }
    }

    fn handle_recent_key(&mut self, key: KeyEvent) {
        let count = self.controller.recent().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.recent_selected = self.recent_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.recent_selected + 1 < count {
                    self.recent_selected += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(term) = self.controller.recent().get(self.recent_selected) {
                    let term = term.to_owned();
                    self.search(&term);
                }
            }
            _ => {}
        }
    }

    fn handle_suggestion_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.suggestion_selected = self.suggestion_selected.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.suggestion_selected + 1 < SUGGESTIONS.len() {
                    self.suggestion_selected += 1;
                }
            }
            KeyCode::Up => self.focus = Focus::Search,
            KeyCode::Enter => {
                if let Some(word) = SUGGESTIONS.get(self.suggestion_selected) {
                    self.search(word);
                }
            }
            _ => {}
        }
    }
}
