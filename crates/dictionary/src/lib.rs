use reqwest::Url;
use thiserror::Error;

mod dictionary;
mod dictionary_api;

pub use dictionary::{PartOfSpeech, Phonetic, Word, WordDefinition, WordMeaning};
pub use dictionary_api::{classify_response, resolve_api_base, DEFAULT_API_BASE};
pub use reqwest::StatusCode;

/// Every failure displays as the message shown to the user; the variants
/// only matter for logging.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Failed to fetch definitions.")]
    Fetch(#[source] reqwest::Error),
    #[error("Unable to load definitions.")]
    Malformed(#[source] serde_json::Error),
    #[error("Unable to load definitions.")]
    Unexpected,
    #[error("{0}")]
    NotFound(NotFoundError),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Invalid dictionary API base URL '{0}'")]
    InvalidBase(String),
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct NotFoundError {
    message: String,
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    client: reqwest::Client,
    base: Url,
}

impl Dictionary {
    /// Client for the public API.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
        }
    }

    /// Client for `base`, or the public API when `base` is blank.
    pub fn with_base(base: &str) -> Result<Self, DictionaryError> {
        Ok(Self {
            client: reqwest::Client::new(),
            base: dictionary_api::parse_base(resolve_api_base(Some(base)))?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub async fn get_definitions(&self, word: &str) -> Result<Vec<Word>, DictionaryError> {
        dictionary_api::get_definitions(&self.client, &self.base, word).await
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
