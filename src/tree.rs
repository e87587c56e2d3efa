//! The lookup panel's tree: entries, their relation groups, and the words in
//! each group. Rebuilt from scratch whenever the word of interest changes.

use crate::error::Result;
use crate::lexicon::LexicalStore;
use crate::models::{EntryId, LexicalEntry, PartOfSpeech, RelationGroup, Word};
use crate::relations;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LookupTree {
    pub entries: Vec<EntryNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryNode {
    pub entry: EntryId,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub groups: Vec<RelationGroup>,
}

impl LookupTree {
    pub fn build<S>(store: &S, entries: &[&LexicalEntry]) -> Result<Self>
    where
        S: LexicalStore + ?Sized,
    {
        Self::build_with(store, entries, |_| true)
    }

    pub fn build_with<S, F>(store: &S, entries: &[&LexicalEntry], keep_synonym: F) -> Result<Self>
    where
        S: LexicalStore + ?Sized,
        F: Fn(&Word) -> bool,
    {
        let mut sorted: Vec<&LexicalEntry> = entries.to_vec();
        sorted.sort_by(|a, b| {
            a.lemma
                .to_lowercase()
                .cmp(&b.lemma.to_lowercase())
                .then_with(|| a.lemma.cmp(&b.lemma))
                .then(a.pos.cmp(&b.pos))
        });

        let mut nodes = Vec::with_capacity(sorted.len());
        for entry in sorted {
            nodes.push(EntryNode {
                entry: entry.id,
                lemma: entry.lemma.clone(),
                pos: entry.pos,
                groups: relations::expand_with(store, entry, &keep_synonym)?,
            });
        }
        Ok(Self { entries: nodes })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every word leaf in display order.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.entries
            .iter()
            .flat_map(|e| e.groups.iter())
            .flat_map(|g| g.targets.iter())
    }

    /// The leaf a panel selects when the tree is shown.
    pub fn first_word(&self) -> Option<&Word> {
        self.words().next()
    }

    /// Definition of the sense a word leaf belongs to.
    pub fn gloss_of<'s, S>(store: &'s S, word: &Word) -> Result<&'s str>
    where
        S: LexicalStore + ?Sized,
    {
        Ok(store.sense(word.sense())?.gloss.as_str())
    }
}
