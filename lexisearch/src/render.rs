use dictionary::{Word, WordMeaning};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::recent::RecentSearches;

pub const PRIMARY: Color = Color::Rgb(37, 99, 235);
pub const SECONDARY: Color = Color::Rgb(245, 158, 11);
pub const ERROR: Color = Color::Rgb(239, 68, 68);
pub const MUTED: Color = Color::Rgb(107, 114, 128);

pub const NO_RECENT: &str = "No recent searches yet.";
pub const SUGGESTIONS: [&str; 3] = ["ocean", "professional", "serendipity"];

/// Results for `query`: a heading for the first entry, then every meaning
/// of every entry.
pub fn definitions(query: &str, words: &[Word]) -> Text<'static> {
    let Some(first) = words.first() else {
        return Text::from(Line::from(format!("No definitions found for “{query}”.")));
    };

    let title = if first.word.is_empty() { query } else { first.word.as_str() };
    let mut heading = vec![Span::styled(
        title.to_owned(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(phonetic) = first.display_phonetic() {
        heading.push(Span::raw("  "));
        heading.push(Span::styled(phonetic.to_owned(), Style::default().fg(MUTED)));
    }
    let mut lines = vec![Line::from(heading)];
    if let Some(audio) = first.audio_url() {
        lines.push(labelled("audio: ", audio));
    }

    for word in words {
        lines.push(Line::default());
        for meaning in &word.meanings {
            meaning_lines(meaning, &mut lines);
        }
        if let Some(origin) = word.origin.as_deref().filter(|origin| !origin.is_empty()) {
            lines.push(labelled("origin: ", origin));
        }
    }
    Text::from(lines)
}

fn meaning_lines(meaning: &WordMeaning, lines: &mut Vec<Line<'static>>) {
    if let Some(part_of_speech) = &meaning.part_of_speech {
        lines.push(Line::from(Span::styled(
            format!("[{part_of_speech}]"),
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        )));
    }
    for (index, definition) in meaning.definitions.iter().enumerate() {
        lines.push(Line::from(format!(
            "  {}. {}",
            index + 1,
            definition.definition
        )));
        if let Some(example) = definition.example.as_deref().filter(|example| !example.is_empty()) {
            lines.push(Line::from(Span::styled(
                format!("     “{example}”"),
                Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
            )));
        }
    }
    let synonyms = meaning.all_synonyms();
    if !synonyms.is_empty() {
        lines.push(labelled("  Synonyms: ", &synonyms.join(", ")));
    }
    let antonyms = meaning.all_antonyms();
    if !antonyms.is_empty() {
        lines.push(labelled("  Antonyms: ", &antonyms.join(", ")));
    }
}

fn labelled(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(label.to_owned(), Style::default().fg(MUTED)),
        Span::styled(value.to_owned(), Style::default().fg(SECONDARY)),
    ])
}

pub fn error(message: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            "Oops: ",
            Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
        ),
        Span::raw(message.to_owned()),
    ])
}

pub fn idle_hint() -> Line<'static> {
    Line::from(format!(
        "Try searching for a word like {}, {}, or {}.",
        SUGGESTIONS[0], SUGGESTIONS[1], SUGGESTIONS[2]
    ))
}

/// The suggested words as chips, `selected` highlighted.
pub fn suggestions(selected: Option<usize>) -> Line<'static> {
    let mut spans = Vec::new();
    for (index, word) in SUGGESTIONS.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if selected == Some(index) {
            Style::default()
                .fg(Color::Black)
                .bg(PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(PRIMARY)
        };
        spans.push(Span::styled(format!("[ {word} ]"), style));
    }
    Line::from(spans)
}

/// Numbered recent searches, or the placeholder when there are none.
pub fn recent(recent: &RecentSearches) -> Vec<Line<'static>> {
    if recent.is_empty() {
        return vec![Line::from(Span::styled(NO_RECENT, Style::default().fg(MUTED)))];
    }
    recent
        .terms()
        .iter()
        .enumerate()
        .map(|(index, term)| {
            Line::from(vec![
                Span::styled(format!("{:>2}. ", index + 1), Style::default().fg(MUTED)),
                Span::raw(term.clone()),
            ])
        })
        .collect()
}

/// Drops styling, for printing to a plain terminal.
pub fn plain(text: &Text) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dictionary::{PartOfSpeech, Phonetic, WordDefinition};

    fn hello() -> Word {
        Word {
            word: "hello".into(),
            phonetic: Some("/həˈləʊ/".into()),
            phonetics: vec![
                Phonetic {
                    text: None,
                    audio: Some("https://example.com/hello.mp3".into()),
                },
                Phonetic {
                    text: Some("/həˈloʊ/".into()),
                    audio: None,
                },
            ],
            origin: None,
            meanings: vec![WordMeaning {
                part_of_speech: Some(PartOfSpeech::new("exclamation")),
                definitions: vec![
                    WordDefinition {
                        definition: "Used as a greeting.".into(),
                        example: Some("hello there, Katie!".into()),
                        synonyms: vec!["hi".into()],
                        antonyms: vec![],
                    },
                    WordDefinition {
                        definition: "Used to express surprise.".into(),
                        example: None,
                        synonyms: vec!["greetings".into(), "hi".into()],
                        antonyms: vec!["bye".into()],
                    },
                ],
                synonyms: vec!["greetings".into()],
                antonyms: vec![],
            }],
        }
    }

    #[test]
    fn empty_results_name_the_query() {
        assert_eq!(
            plain(&definitions("qwxz", &[])),
            "No definitions found for “qwxz”."
        );
    }

    #[test]
    fn results_show_heading_definitions_and_merged_words() {
        let text = plain(&definitions("hello", &[hello()]));
        let expected = "\
hello  /həˈloʊ/
audio: https://example.com/hello.mp3

[exclamation]
  1. Used as a greeting.
     “hello there, Katie!”
  2. Used to express surprise.
  Synonyms: greetings, hi
  Antonyms: bye";
        assert_eq!(text, expected);
    }

    #[test]
    fn heading_falls_back_to_query_and_every_entry_is_listed() {
        let nameless = Word {
            phonetic: Some("/ˈəʊʃ(ə)n/".into()),
            ..Word::default()
        };
        let second = Word {
            word: "ocean".into(),
            origin: Some("Middle English".into()),
            meanings: vec![WordMeaning {
                part_of_speech: Some(PartOfSpeech::new("noun")),
                definitions: vec![WordDefinition {
                    definition: "A sea.".into(),
                    ..WordDefinition::default()
                }],
                ..WordMeaning::default()
            }],
            ..Word::default()
        };
        let text = plain(&definitions("ocean", &[nameless, second]));
        assert_eq!(
            text,
            "ocean  /ˈəʊʃ(ə)n/\n\n\n[noun]\n  1. A sea.\norigin: Middle English"
        );
    }

    #[test]
    fn recent_lists_terms_or_placeholder() {
        let empty = Text::from(recent(&RecentSearches::default()));
        assert_eq!(plain(&empty), NO_RECENT);

        let terms = RecentSearches::from_terms(vec!["ocean".into(), "sea".into()]);
        assert_eq!(plain(&Text::from(recent(&terms))), " 1. ocean\n 2. sea");
    }

    #[test]
    fn error_and_hint_lines() {
        assert_eq!(
            plain(&Text::from(error("No definitions found."))),
            "Oops: No definitions found."
        );
        assert_eq!(
            plain(&Text::from(idle_hint())),
            "Try searching for a word like ocean, professional, or serendipity."
        );
    }

    #[test]
    fn suggestion_chips_highlight_the_selection() {
        let line = suggestions(Some(1));
        assert_eq!(
            plain(&Text::from(line.clone())),
            "[ ocean ]  [ professional ]  [ serendipity ]"
        );
        let highlighted: Vec<_> = line
            .spans
            .iter()
            .filter(|span| span.style.bg == Some(PRIMARY))
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(highlighted, ["[ professional ]"]);
        assert!(suggestions(None).spans.iter().all(|span| span.style.bg.is_none()));
    }
}
