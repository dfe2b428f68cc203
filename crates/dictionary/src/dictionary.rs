use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One entry returned by the dictionary API. Every field is optional on the
/// wire; a missing, `null` or wrongly typed value reads as empty without
/// touching its siblings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    #[serde(default, deserialize_with = "lenient")]
    pub word: String,
    #[serde(default, deserialize_with = "lenient")]
    pub phonetic: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub phonetics: Vec<Phonetic>,
    #[serde(default, deserialize_with = "lenient")]
    pub origin: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub meanings: Vec<WordMeaning>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Phonetic {
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub audio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordMeaning {
    #[serde(default, deserialize_with = "lenient")]
    pub part_of_speech: Option<PartOfSpeech>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub definitions: Vec<WordDefinition>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub synonyms: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub antonyms: Vec<String>,
}

/// Part of speech exactly as the API labels it ("noun", "exclamation", ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PartOfSpeech(String);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WordDefinition {
    #[serde(default, deserialize_with = "lenient")]
    pub definition: String,
    #[serde(default, deserialize_with = "lenient")]
    pub example: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub synonyms: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub antonyms: Vec<String>,
}

impl Word {
    /// The transcription to display: the first phonetic variant carrying
    /// text, otherwise the top-level `phonetic`.
    pub fn display_phonetic(&self) -> Option<&str> {
        self.phonetics
            .iter()
            .filter_map(|phonetic| non_empty(phonetic.text.as_deref()))
            .next()
            .or_else(|| non_empty(self.phonetic.as_deref()))
    }

    pub fn audio_url(&self) -> Option<&str> {
        self.phonetics
            .iter()
            .filter_map(|phonetic| non_empty(phonetic.audio.as_deref()))
            .next()
    }
}

impl WordMeaning {
    /// Group-level synonyms followed by every definition's own, without
    /// duplicates and in first-seen order.
    pub fn all_synonyms(&self) -> Vec<&str> {
        unique(
            self.synonyms.iter().chain(
                self.definitions
                    .iter()
                    .flat_map(|definition| definition.synonyms.iter()),
            ),
        )
    }

    pub fn all_antonyms(&self) -> Vec<&str> {
        unique(
            self.antonyms.iter().chain(
                self.definitions
                    .iter()
                    .flat_map(|definition| definition.antonyms.iter()),
            ),
        )
    }
}

impl PartOfSpeech {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn unique<'a>(items: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for item in items {
        if !item.is_empty() && !seen.contains(&item.as_str()) {
            seen.push(item);
        }
    }
    seen
}

/// Reads any JSON value and keeps it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Like `lenient`, per item: a list that isn't an array is empty and an
/// item of the wrong shape is its type's default.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}
