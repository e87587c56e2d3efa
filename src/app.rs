use crate::error::{LookupError, StoreError};
use crate::lexicon::LexicalStore;
use crate::lookup::{full_definition, lookup, root_words};
use crate::metrics::{self, Limits};
use crate::models::LexicalEntry;
use crate::phrases::{reduce_all, PhraseReduction};
use crate::tree::LookupTree;
use crate::utils::strings;
use log::warn;
use std::ops::Range;

/// What the lookup panel shows for the current word of interest.
#[derive(Debug)]
pub enum Panel<'s> {
    Empty,
    Ready {
        selection: String,
        entries: Vec<&'s LexicalEntry>,
        tree: LookupTree,
    },
    Failed {
        selection: String,
        message: String,
    },
}

pub struct App<'s, S: LexicalStore + Sync + ?Sized> {
    store: &'s S,
    pub limits: Limits,
    pub hide_subsumed_synonyms: bool,
    reduction: Option<PhraseReduction>,
    panel: Panel<'s>,
}

impl<'s, S: LexicalStore + Sync + ?Sized> App<'s, S> {
    pub fn new(store: &'s S, limits: Limits) -> Self {
        Self {
            store,
            limits,
            hide_subsumed_synonyms: false,
            reduction: None,
            panel: Panel::Empty,
        }
    }

    pub fn store(&self) -> &'s S {
        self.store
    }

    pub fn panel(&self) -> &Panel<'s> {
        &self.panel
    }

    /// Runs the reducer on first use and keeps the result.
    pub fn phrase_reduction(&mut self) -> Result<&PhraseReduction, StoreError> {
        let reduction = match self.reduction.take() {
            Some(r) => r,
            None => reduce_all(self.store)?,
        };
        Ok(self.reduction.insert(reduction))
    }

    /// Rebuilds the panel for `word`. A store failure lands in
    /// [`Panel::Failed`] so the session keeps going.
    pub fn set_word_of_interest(&mut self, word: &str) -> &Panel<'s> {
        let selection = strings::clean_typography_symbols(word).trim().to_string();
        self.panel = if selection.is_empty() {
            Panel::Empty
        } else {
            match self.build_panel(&selection) {
                Ok(panel) => panel,
                Err(e) => {
                    warn!("lookup of '{}' failed: {}", selection, e);
                    Panel::Failed {
                        selection,
                        message: e.to_string(),
                    }
                }
            }
        };
        &self.panel
    }

    fn build_panel(&mut self, selection: &str) -> Result<Panel<'s>, LookupError> {
        let entries = lookup(self.store, selection)?;
        let tree = if self.hide_subsumed_synonyms {
            let store = self.store;
            let reduction = self.phrase_reduction()?;
            LookupTree::build_with(store, &entries, |w| !reduction.subsumes(w))?
        } else {
            LookupTree::build(self.store, &entries)?
        };
        Ok(Panel::Ready {
            selection: selection.to_string(),
            entries,
            tree,
        })
    }

    /// The word table: the selection and its root words.
    pub fn word_rows(&self) -> Vec<(&'static str, String)> {
        match &self.panel {
            Panel::Empty => Vec::new(),
            Panel::Ready {
                selection, entries, ..
            } => vec![("selection", selection.clone()), ("root(s)", root_words(entries))],
            Panel::Failed { selection, .. } => {
                vec![("selection", selection.clone()), ("root(s)", String::new())]
            }
        }
    }

    pub fn info_rows(&self, text: &str) -> Vec<(&'static str, String)> {
        metrics::info_rows(text, &self.limits)
    }

    /// Definition pane text, when the panel has entries.
    pub fn definition(&self) -> Result<Option<String>, StoreError> {
        match &self.panel {
            Panel::Ready { entries, .. } if !entries.is_empty() => {
                Ok(Some(full_definition(self.store, entries)?))
            }
            _ => Ok(None),
        }
    }

    /// The first word leaf of the tree and the gloss of its sense.
    pub fn first_gloss(&self) -> Result<Option<(&str, &'s str)>, StoreError> {
        match &self.panel {
            Panel::Ready { tree, .. } => match tree.first_word() {
                Some(word) => Ok(Some((
                    word.lemma.as_str(),
                    LookupTree::gloss_of(self.store, word)?,
                ))),
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }
}

/// The selected text cut to `max_chars`, or the word at `caret` when nothing
/// is selected. Offsets count characters; a selection may run backwards.
pub fn word_of_interest(
    text: &str,
    caret: usize,
    selection: Option<Range<usize>>,
    max_chars: usize,
) -> String {
    let selection = selection.map(|r| r.start.min(r.end)..r.start.max(r.end));
    match selection {
        Some(range) if range.start < range.end => {
            let selected: String = text
                .chars()
                .skip(range.start)
                .take(range.end - range.start)
                .collect();
            strings::truncate_chars(&selected, max_chars).to_string()
        }
        _ => strings::word_at(text, caret),
    }
}
