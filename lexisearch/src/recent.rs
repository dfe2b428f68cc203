use std::future::Future;

pub const RECENT_LIMIT: usize = 10;
pub const RECENT_KEY: &str = "recent-searches";

/// Most-recent-first search history, unique ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    terms: Vec<String>,
}

impl RecentSearches {
    /// Normalizes whatever the store handed back.
    pub fn from_terms(terms: Vec<String>) -> Self {
        let mut recent = Self::default();
        for term in terms {
            let term = term.trim();
            if !term.is_empty() && recent.position(term).is_none() {
                recent.terms.push(term.to_owned());
            }
        }
        recent.terms.truncate(RECENT_LIMIT);
        recent
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Moves `term` to the front, replacing any entry that differs only in case.
    pub fn record(&mut self, term: &str) {
        if let Some(index) = self.position(term) {
            self.terms.remove(index);
        }
        self.terms.insert(0, term.to_owned());
        self.terms.truncate(RECENT_LIMIT);
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    fn position(&self, term: &str) -> Option<usize> {
        let term = term.to_lowercase();
        self.terms
            .iter()
            .position(|existing| existing.to_lowercase() == term)
    }
}

/// Where the recent list lives between runs.
pub trait RecentStore {
    fn load(&self) -> impl Future<Output = anyhow::Result<Vec<String>>>;
    fn save(&self, terms: &[String]) -> impl Future<Output = anyhow::Result<()>>;
}

/// `None` keeps nothing, for when the real store could not be opened.
impl<S: RecentStore> RecentStore for Option<S> {
    async fn load(&self) -> anyhow::Result<Vec<String>> {
        match self {
            Some(store) => store.load().await,
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, terms: &[String]) -> anyhow::Result<()> {
        match self {
            Some(store) => store.save(terms).await,
            None => Ok(()),
        }
    }
}
