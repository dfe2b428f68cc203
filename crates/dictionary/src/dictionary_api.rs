use log::debug;
use reqwest::{header, StatusCode, Url};
use serde_json::Value;

use crate::{DictionaryError, NotFoundError, Word};

pub const DEFAULT_API_BASE: &str = "https://api.dictionaryapi.dev/api/v2";

const LANGUAGE: &str = "en";

pub(crate) const NO_DEFINITIONS: &str = "No definitions found.";
pub(crate) const FETCH_FAILED: &str = "Failed to fetch definitions.";

/// Picks the API base: a non-blank override without trailing slashes, or
/// the public default.
pub fn resolve_api_base(base_override: Option<&str>) -> &str {
    base_override
        .map(|base| base.trim().trim_end_matches('/'))
        .filter(|base| !base.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
}

pub(crate) fn parse_base(base: &str) -> Result<Url, DictionaryError> {
    let url = Url::parse(base).map_err(|_| DictionaryError::InvalidBase(base.to_owned()))?;
    if url.cannot_be_a_base() {
        return Err(DictionaryError::InvalidBase(base.to_owned()));
    }
    Ok(url)
}

/// `{base}/entries/en/{word}` with the word escaped as one path segment.
pub(crate) fn entries_url(base: &Url, word: &str) -> Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(["entries", LANGUAGE, word]);
    }
    url
}

pub(crate) async fn get_definitions(
    client: &reqwest::Client,
    base: &Url,
    word: &str,
) -> Result<Vec<Word>, DictionaryError> {
    let url = entries_url(base, word);
    debug!("GET {url}");
    let res: reqwest::Response = client
        .get(url)
        .header(header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(DictionaryError::Fetch)?;
    let status = res.status();
    let body = res.bytes().await.map_err(DictionaryError::Fetch)?;
    debug!("{status} with {} bytes for {word:?}", body.len());
    classify_response(status, &body)
}

/// Maps a status and raw body to entries or to the message the user sees.
pub fn classify_response(status: StatusCode, body: &[u8]) -> Result<Vec<Word>, DictionaryError> {
    if !status.is_success() {
        let message = error_message(body);
        return Err(if status == StatusCode::NOT_FOUND {
            DictionaryError::NotFound(NotFoundError { message })
        } else {
            DictionaryError::Api {
                status: status.as_u16(),
                message,
            }
        });
    }

    let data: Value = serde_json::from_slice(body).map_err(DictionaryError::Malformed)?;
    match data {
        Value::Array(entries) if entries.is_empty() => Err(not_found()),
        Value::Array(entries) => Ok(entries.into_iter().map(lenient_word).collect()),
        other if is_falsy(&other) => Err(not_found()),
        other => {
            debug!("expected an array of entries, got {other}");
            Err(DictionaryError::Unexpected)
        }
    }
}

fn error_message(body: &[u8]) -> String {
    let Ok(data) = serde_json::from_slice::<Value>(body) else {
        return FETCH_FAILED.to_owned();
    };
    if data.as_array().is_some_and(|entries| entries.is_empty()) {
        return NO_DEFINITIONS.to_owned();
    }
    ["message", "title"]
        .iter()
        .filter_map(|field| data.get(field).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or(FETCH_FAILED)
        .to_owned()
}

fn lenient_word(entry: Value) -> Word {
    serde_json::from_value(entry).unwrap_or_else(|error| {
        debug!("skipping malformed entry: {error}");
        Word::default()
    })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn not_found() -> DictionaryError {
    DictionaryError::NotFound(NotFoundError {
        message: NO_DEFINITIONS.to_owned(),
    })
}
