use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(600);

/// Posted when a debounce timer runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceFired {
    id: u64,
}

/// A scheduled search that has not fired yet.
#[derive(Debug)]
struct Debounce {
    id: u64,
    handle: JoinHandle<()>,
}

impl Debounce {
    fn cancel(&self) {
        // aborting a finished task is a no-op
        self.handle.abort();
    }
}

/// Text input that searches once typing pauses.
#[derive(Debug)]
pub struct SearchInput {
    value: String,
    /// Cursor position in chars.
    cursor: usize,
    initial: String,
    typing: bool,
    pending: Option<Debounce>,
    next_id: u64,
    events: UnboundedSender<DebounceFired>,
}

impl SearchInput {
    pub fn new(events: UnboundedSender<DebounceFired>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            initial: String::new(),
            typing: false,
            pending: None,
            next_id: 0,
            events,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True while a debounced search is waiting to fire.
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Takes over `initial` whenever it differs from the last one seen.
    /// Does not schedule a search.
    pub fn sync_initial(&mut self, initial: &str) {
        if self.initial != initial {
            self.initial = initial.to_owned();
            self.value = initial.to_owned();
            self.cursor = self.value.chars().count();
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_owned();
        self.cursor = self.value.chars().count();
        self.changed();
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        self.changed();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        self.changed();
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.value.chars().count() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        self.changed();
    }

    pub fn clear(&mut self) {
        self.set_value("");
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Explicit submit: drops any pending debounce and hands back the value
    /// as typed, blank or not.
    pub fn submit(&mut self) -> String {
        self.cancel_pending();
        self.typing = false;
        self.value.clone()
    }

    /// Accepts a timer event. Returns the term to search when `fired` is the
    /// current timer and the value is still worth searching.
    pub fn on_fired(&mut self, fired: DebounceFired) -> Option<String> {
        if self.pending.as_ref().map(|pending| pending.id) != Some(fired.id) {
            return None;
        }
        self.pending = None;
        self.typing = false;
        if self.value.trim().is_empty() {
            None
        } else {
            Some(self.value.clone())
        }
    }

    pub fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    fn changed(&mut self) {
        if self.value.trim().is_empty() {
            self.cancel_pending();
            self.typing = false;
        } else {
            self.schedule();
        }
    }

    fn schedule(&mut self) {
        self.cancel_pending();
        self.next_id += 1;
        let id = self.next_id;
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE_DELAY).await;
            let _ = events.send(DebounceFired { id });
        });
        self.pending = Some(Debounce { id, handle });
        self.typing = true;
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }
}

impl Drop for SearchInput {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
