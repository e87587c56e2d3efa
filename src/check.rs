//! Diagnostics over the document text. The grammar engine is pluggable
//! through [`Checker`]; [`HarperChecker`] is the built-in one.

use crate::error::CheckError;
use harper_core::linting::{Lint, LintGroup, LintKind, Linter, Suggestion};
use harper_core::spell::FstDictionary;
use harper_core::{Dialect, Document};
use log::debug;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hint,
    UnknownWord,
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Hint => "hint",
            Category::UnknownWord => "unknown word",
            Category::Other => "other",
        }
    }
}

/// A flagged region, as byte offsets into the checked text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub start: usize,
    pub end: usize,
    pub message: String,
    pub category: Category,
}

impl Diagnostic {
    /// Message with suggestion markup turned into plain quotes.
    pub fn display_message(&self) -> String {
        self.message
            .replace("<suggestion>", "'")
            .replace("</suggestion>", "'")
    }

    pub fn region<'t>(&self, text: &'t str) -> &'t str {
        text.get(self.start..self.end).unwrap_or("")
    }

    pub fn list_label(&self, text: &str) -> String {
        format!("{}: {}", self.region(text).trim(), self.display_message())
    }
}

pub trait Checker {
    fn name(&self) -> &str;

    fn check(&self, text: &str) -> Result<Vec<Diagnostic>, CheckError>;
}

/// First diagnostic whose region contains `offset`, ends included.
pub fn diagnostic_at(diagnostics: &[Diagnostic], offset: usize) -> Option<&Diagnostic> {
    diagnostics
        .iter()
        .find(|d| d.start <= offset && offset <= d.end)
}

/// Spelling, grammar and style lints from harper's curated rule set.
#[derive(Clone)]
pub struct HarperChecker {
    dictionary: Arc<FstDictionary>,
    dialect: Dialect,
}

impl HarperChecker {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dictionary: FstDictionary::curated(),
            dialect,
        }
    }
}

impl Default for HarperChecker {
    fn default() -> Self {
        Self::new(Dialect::American)
    }
}

impl Checker for HarperChecker {
    fn name(&self) -> &str {
        "harper"
    }

    fn check(&self, text: &str) -> Result<Vec<Diagnostic>, CheckError> {
        let document = Document::new_plain_english(text, &self.dictionary);
        let mut linter = LintGroup::new_curated(self.dictionary.clone(), self.dialect);
        let mut lints = linter.lint(&document);
        harper_core::remove_overlaps(&mut lints);

        let offsets = CharOffsets::new(text);
        let mut diagnostics: Vec<Diagnostic> = lints
            .iter()
            .map(|lint| to_diagnostic(lint, &offsets))
            .collect();
        diagnostics.sort_by_key(|d| (d.start, d.end));
        debug!("harper: {} diagnostics", diagnostics.len());
        Ok(diagnostics)
    }
}

/// Spelling is an unknown word; style and wording lints are hints.
pub fn category_of(kind: LintKind) -> Category {
    match kind {
        LintKind::Spelling => Category::UnknownWord,
        LintKind::Style
        | LintKind::Readability
        | LintKind::WordChoice
        | LintKind::Enhancement => Category::Hint,
        _ => Category::Other,
    }
}

fn to_diagnostic(lint: &Lint, offsets: &CharOffsets) -> Diagnostic {
    let mut message = lint.message.clone();
    // the first replacement becomes the marked-up suggestion
    let replacement = lint.suggestions.iter().find_map(|s| match s {
        Suggestion::ReplaceWith(chars) => Some(chars.iter().collect::<String>()),
        _ => None,
    });
    if let Some(replacement) = replacement {
        message.push_str(&format!(" Suggestion: <suggestion>{}</suggestion>", replacement));
    }
    Diagnostic {
        start: offsets.byte(lint.span.start),
        end: offsets.byte(lint.span.end),
        message,
        category: category_of(lint.lint_kind),
    }
}

/// Maps character indices, which harper spans count in, to byte offsets.
struct CharOffsets {
    bytes: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        let mut bytes: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bytes.push(text.len());
        Self { bytes }
    }

    fn byte(&self, char_index: usize) -> usize {
        self.bytes
            .get(char_index)
            .or(self.bytes.last())
            .copied()
            .unwrap_or(0)
    }
}
