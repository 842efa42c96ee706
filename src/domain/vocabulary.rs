//! Vocabulary - Button labels, commands and their internal codes.
//!
//! The label tables are process-wide and immutable. [`validate`] checks the
//! label/code bijection and must pass before the bot starts taking messages.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::dialogue::Flow;
use super::strength::Category;

/// Command that starts (or restarts) the conversation.
pub const START_COMMAND: &str = "/start";

/// Command that shows the informational text.
pub const HELP_COMMAND: &str = "/help";

const OPTIONS: &[(&str, Flow)] = &[
    ("Calculate one-rep max", Flow::OneRepMax),
    ("Calculate rep weight", Flow::TargetWeight),
];

const EXERCISES: &[(&str, Category)] = &[
    ("Bench press", Category::Upper),
    ("Squat or deadlift", Category::Lower),
];

const RESTART_PHRASES: &[&str] = &["Calculate again"];

static OPTION_BY_LABEL: Lazy<HashMap<&'static str, Flow>> =
    Lazy::new(|| OPTIONS.iter().copied().collect());

static EXERCISE_BY_LABEL: Lazy<HashMap<&'static str, Category>> =
    Lazy::new(|| EXERCISES.iter().copied().collect());

/// Configuration errors in the vocabulary tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabularyError {
    #[error("Label '{0}' is listed more than once")]
    DuplicateLabel(&'static str),

    #[error("Code '{0}' is mapped by more than one label")]
    DuplicateCode(String),

    #[error("Code '{0}' has no label")]
    UnlabeledCode(String),

    #[error("Label '{0}' is blank")]
    BlankLabel(&'static str),

    #[error("Restart phrase '{0}' collides with a menu label or command")]
    AmbiguousRestartPhrase(&'static str),
}

/// Checks every table for a label/code bijection and unambiguous phrases.
pub fn validate() -> Result<(), VocabularyError> {
    check_table(OPTIONS, Flow::all(), |flow| flow.code().to_string())?;
    check_table(EXERCISES, Category::all(), |category| category.code().to_string())?;

    let mut seen = HashSet::new();
    for &phrase in RESTART_PHRASES {
        if phrase.trim().is_empty() {
            return Err(VocabularyError::BlankLabel(phrase));
        }
        if !seen.insert(phrase) {
            return Err(VocabularyError::DuplicateLabel(phrase));
        }
        if is_option_label(phrase)
            || is_exercise_label(phrase)
            || phrase == HELP_COMMAND
            || phrase == START_COMMAND
        {
            return Err(VocabularyError::AmbiguousRestartPhrase(phrase));
        }
    }
    Ok(())
}

fn check_table<T, F>(
    table: &[(&'static str, T)],
    codes: &[T],
    code_name: F,
) -> Result<(), VocabularyError>
where
    T: Copy + Eq + std::hash::Hash,
    F: Fn(&T) -> String,
{
    let mut labels = HashSet::new();
    let mut mapped = HashSet::new();

    for &(label, code) in table {
        if label.trim().is_empty() {
            return Err(VocabularyError::BlankLabel(label));
        }
        if !labels.insert(label) {
            return Err(VocabularyError::DuplicateLabel(label));
        }
        if !mapped.insert(code) {
            return Err(VocabularyError::DuplicateCode(code_name(&code)));
        }
    }

    if let Some(orphan) = codes.iter().find(|code| !mapped.contains(*code)) {
        return Err(VocabularyError::UnlabeledCode(code_name(orphan)));
    }
    Ok(())
}

/// Menu labels in display order.
pub fn option_labels() -> Vec<&'static str> {
    OPTIONS.iter().map(|(label, _)| *label).collect()
}

/// Exercise labels in display order.
pub fn exercise_labels() -> Vec<&'static str> {
    EXERCISES.iter().map(|(label, _)| *label).collect()
}

/// Phrases that force a fresh session.
pub fn restart_phrases() -> &'static [&'static str] {
    RESTART_PHRASES
}

pub fn flow_for_label(label: &str) -> Option<Flow> {
    OPTION_BY_LABEL.get(label).copied()
}

pub fn label_for_flow(flow: Flow) -> &'static str {
    OPTIONS
        .iter()
        .find(|(_, f)| *f == flow)
        .map(|(label, _)| *label)
        .unwrap_or_else(|| flow.code())
}

pub fn category_for_label(label: &str) -> Option<Category> {
    EXERCISE_BY_LABEL.get(label).copied()
}

pub fn label_for_category(category: Category) -> &'static str {
    EXERCISES
        .iter()
        .find(|(_, c)| *c == category)
        .map(|(label, _)| *label)
        .unwrap_or_else(|| category.code())
}

pub fn is_option_label(text: &str) -> bool {
    OPTION_BY_LABEL.contains_key(text)
}

pub fn is_exercise_label(text: &str) -> bool {
    EXERCISE_BY_LABEL.contains_key(text)
}

pub fn is_restart_phrase(text: &str) -> bool {
    RESTART_PHRASES.contains(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_tables_are_valid() {
        assert_eq!(validate(), Ok(()));
    }

    #[test]
    fn option_labels_resolve_both_ways() {
        for label in option_labels() {
            let flow = flow_for_label(label).unwrap();
            assert_eq!(label_for_flow(flow), label);
        }
        assert_eq!(flow_for_label("Calculate one-rep max"), Some(Flow::OneRepMax));
        assert_eq!(flow_for_label("Calculate rep weight"), Some(Flow::TargetWeight));
    }

    #[test]
    fn exercise_labels_resolve_both_ways() {
        for label in exercise_labels() {
            let category = category_for_label(label).unwrap();
            assert_eq!(label_for_category(category), label);
        }
        assert_eq!(category_for_label("Bench press"), Some(Category::Upper));
        assert_eq!(category_for_label("Squat or deadlift"), Some(Category::Lower));
    }

    #[test]
    fn unknown_text_is_not_recognized() {
        assert_eq!(flow_for_label("calculate one-rep max"), None);
        assert_eq!(category_for_label("Curl"), None);
        assert!(!is_option_label("60"));
        assert!(!is_exercise_label(""));
        assert!(!is_restart_phrase("/start"));
    }

    #[test]
    fn restart_phrase_is_recognized() {
        assert!(is_restart_phrase("Calculate again"));
        assert_eq!(restart_phrases(), &["Calculate again"]);
    }

    #[test]
    fn check_table_rejects_duplicate_label() {
        let table = [("A", Category::Upper), ("A", Category::Lower)];
        assert_eq!(
            check_table(&table, Category::all(), |c| c.code().to_string()),
            Err(VocabularyError::DuplicateLabel("A"))
        );
    }

    #[test]
    fn check_table_rejects_duplicate_code() {
        let table = [("A", Category::Upper), ("B", Category::Upper)];
        assert_eq!(
            check_table(&table, Category::all(), |c| c.code().to_string()),
            Err(VocabularyError::DuplicateCode("upper".to_string()))
        );
    }

    #[test]
    fn check_table_rejects_orphan_code() {
        let table = [("A", Category::Upper)];
        assert_eq!(
            check_table(&table, Category::all(), |c| c.code().to_string()),
            Err(VocabularyError::UnlabeledCode("lower".to_string()))
        );
    }

    #[test]
    fn check_table_rejects_blank_label() {
        let table = [(" ", Category::Upper), ("B", Category::Lower)];
        assert_eq!(
            check_table(&table, Category::all(), |c| c.code().to_string()),
            Err(VocabularyError::BlankLabel(" "))
        );
    }
}
