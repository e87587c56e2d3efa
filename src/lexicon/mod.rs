//! The lexical store: the trait the lookup core queries, and the in-memory
//! [`Lexicon`] every loader produces.

pub mod json;
pub mod wndb;

use crate::error::{Result, StoreError};
use crate::models::{EntryId, LexicalEntry, PartOfSpeech, PointerKind, Sense, SenseId, Word, WordId};
use log::info;
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(RustEmbed)]
#[folder = "resources/"]
struct Asset;

pub const SAMPLE_LEXICON: &str = "lexicon/sample.json";

/// Read-only view of a lexical database.
///
/// Every query may fail; callers propagate the error instead of treating it
/// as "no match".
pub trait LexicalStore {
    /// Index entry for `lemma` under `pos`, matched with the store's own
    /// normalization (case, spaces and underscores).
    fn lookup_entry(&self, pos: PartOfSpeech, lemma: &str) -> Result<Option<&LexicalEntry>>;

    fn entries(&self, pos: PartOfSpeech) -> Result<Box<dyn Iterator<Item = &LexicalEntry> + '_>>;

    fn sense(&self, id: SenseId) -> Result<&Sense>;

    fn relation_targets(&self, sense: SenseId, kind: PointerKind) -> Result<Vec<SenseId>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LexiconFormat {
    #[default]
    Json,
    Wndb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconSource {
    Embedded,
    Json(PathBuf),
    Wndb(PathBuf),
}

impl LexiconSource {
    pub fn new(path: Option<PathBuf>, format: LexiconFormat) -> Self {
        match (path, format) {
            (None, _) => LexiconSource::Embedded,
            (Some(p), LexiconFormat::Json) => LexiconSource::Json(p),
            (Some(p), LexiconFormat::Wndb) => LexiconSource::Wndb(p),
        }
    }

    pub fn load(&self) -> Result<Lexicon> {
        let lexicon = match self {
            LexiconSource::Embedded => {
                let file = Asset::get(SAMPLE_LEXICON)
                    .ok_or_else(|| StoreError::MissingAsset(SAMPLE_LEXICON.to_string()))?;
                json::from_slice(file.data.as_ref())?
            }
            LexiconSource::Json(path) => json::load(path)?,
            LexiconSource::Wndb(dir) => wndb::load(dir)?,
        };
        info!(
            "loaded lexicon '{}': {} entries, {} senses",
            lexicon.name(),
            lexicon.entry_count(),
            lexicon.sense_count()
        );
        Ok(lexicon)
    }
}

/// Store matching rule: lowercase, underscores read as spaces, outer
/// whitespace ignored.
pub fn index_key(lemma: &str) -> String {
    lemma.trim().replace('_', " ").to_lowercase()
}

#[derive(Debug)]
pub struct Lexicon {
    name: String,
    senses: Vec<Sense>,
    entries: Vec<LexicalEntry>,
    index: HashMap<(PartOfSpeech, String), EntryId>,
    by_pos: HashMap<PartOfSpeech, Vec<EntryId>>,
}

impl Lexicon {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sense_count(&self) -> usize {
        self.senses.len()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, id: EntryId) -> Result<&LexicalEntry> {
        self.entries
            .get(id.0 as usize)
            .ok_or(StoreError::UnknownEntry(id))
    }
}

impl LexicalStore for Lexicon {
    fn lookup_entry(&self, pos: PartOfSpeech, lemma: &str) -> Result<Option<&LexicalEntry>> {
        match self.index.get(&(pos, index_key(lemma))) {
            Some(&id) => self.entry(id).map(Some),
            None => Ok(None),
        }
    }

    fn entries(&self, pos: PartOfSpeech) -> Result<Box<dyn Iterator<Item = &LexicalEntry> + '_>> {
        let ids = self.by_pos.get(&pos).map(Vec::as_slice).unwrap_or_default();
        Ok(Box::new(
            ids.iter().filter_map(move |id| self.entries.get(id.0 as usize)),
        ))
    }

    fn sense(&self, id: SenseId) -> Result<&Sense> {
        self.senses
            .get(id.0 as usize)
            .ok_or(StoreError::DanglingSense(id))
    }

    fn relation_targets(&self, sense: SenseId, kind: PointerKind) -> Result<Vec<SenseId>> {
        let sense = self.sense(sense)?;
        let mut targets = Vec::new();
        for target in sense.targets(kind) {
            // every target has to resolve, a dangling pointer means a corrupt lexicon
            self.sense(target)?;
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
        Ok(targets)
    }
}

/// Accumulates senses and index entries, then freezes them into a [`Lexicon`].
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    name: String,
    senses: Vec<Sense>,
    entries: Vec<LexicalEntry>,
    index: HashMap<(PartOfSpeech, String), EntryId>,
}

impl LexiconBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn sense_count(&self) -> usize {
        self.senses.len()
    }

    pub fn add_sense<I, S>(&mut self, pos: PartOfSpeech, gloss: &str, lemmas: I) -> SenseId
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let id = SenseId(self.senses.len() as u32);
        let words = lemmas
            .into_iter()
            .enumerate()
            .map(|(index, lemma)| Word {
                id: WordId {
                    sense: id,
                    index: index as u16,
                },
                lemma: lemma.as_ref().trim().replace('_', " "),
                pos,
            })
            .collect();
        self.senses.push(Sense {
            id,
            pos,
            gloss: gloss.trim().to_string(),
            words,
            pointers: Vec::new(),
        });
        id
    }

    pub fn add_pointer(&mut self, from: SenseId, kind: PointerKind, to: SenseId) -> Result<()> {
        if to.0 as usize >= self.senses.len() {
            return Err(StoreError::DanglingSense(to));
        }
        let sense = self
            .senses
            .get_mut(from.0 as usize)
            .ok_or(StoreError::DanglingSense(from))?;
        if !sense.pointers.contains(&(kind, to)) {
            sense.pointers.push((kind, to));
        }
        Ok(())
    }

    /// Appends `sense` to the entry for (`pos`, `lemma`), creating the entry
    /// on first use. A sense is listed once per entry.
    pub fn add_entry_sense(&mut self, pos: PartOfSpeech, lemma: &str, sense: SenseId) -> EntryId {
        let key = index_key(lemma);
        let id = match self.index.get(&(pos, key.clone())) {
            Some(&id) => id,
            None => {
                let id = EntryId(self.entries.len() as u32);
                self.entries.push(LexicalEntry {
                    id,
                    lemma: key.clone(),
                    pos,
                    senses: Vec::new(),
                });
                self.index.insert((pos, key), id);
                id
            }
        };
        let entry = &mut self.entries[id.0 as usize];
        if !entry.senses.contains(&sense) {
            entry.senses.push(sense);
        }
        id
    }

    /// Registers every word of `sense` as a headword pointing back at it.
    pub fn index_sense_words(&mut self, sense: SenseId) -> Result<()> {
        let (pos, lemmas) = {
            let s = self
                .senses
                .get(sense.0 as usize)
                .ok_or(StoreError::DanglingSense(sense))?;
            let lemmas: Vec<String> = s.words.iter().map(|w| w.lemma.clone()).collect();
            (s.pos, lemmas)
        };
        for lemma in lemmas {
            self.add_entry_sense(pos, &lemma, sense);
        }
        Ok(())
    }

    pub fn build(self) -> Lexicon {
        let mut by_pos: HashMap<PartOfSpeech, Vec<EntryId>> = HashMap::new();
        for entry in &self.entries {
            by_pos.entry(entry.pos).or_default().push(entry.id);
        }
        for ids in by_pos.values_mut() {
            ids.sort_by(|a, b| {
                let (a, b) = (&self.entries[a.0 as usize], &self.entries[b.0 as usize]);
                a.lemma.cmp(&b.lemma)
            });
        }

        Lexicon {
            name: self.name,
            senses: self.senses,
            entries: self.entries,
            index: self.index,
            by_pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sense_lexicon() -> (Lexicon, SenseId, SenseId) {
        let mut b = LexiconBuilder::new("test");
        let money = b.add_sense(PartOfSpeech::Noun, "a financial institution", ["bank", "depository_financial_institution"]);
        let river = b.add_sense(PartOfSpeech::Noun, "sloping land", ["bank", "riverbank"]);
        b.add_pointer(river, PointerKind::Hypernym, money).unwrap();
        b.index_sense_words(money).unwrap();
        b.index_sense_words(river).unwrap();
        (b.build(), money, river)
    }

    #[test]
    fn builder_merges_senses_under_one_entry() {
        let (lexicon, money, river) = two_sense_lexicon();
        let entry = lexicon.lookup_entry(PartOfSpeech::Noun, "bank").unwrap().unwrap();
        assert_eq!(entry.senses, vec![money, river]);
        assert_eq!(lexicon.entry_count(), 3);
    }

    #[test]
    fn lookup_applies_store_normalization() {
        let (lexicon, _, _) = two_sense_lexicon();
        let hit = lexicon
            .lookup_entry(PartOfSpeech::Noun, "Depository_Financial_Institution")
            .unwrap();
        assert_eq!(hit.map(|e| e.lemma.as_str()), Some("depository financial institution"));
        assert!(lexicon.lookup_entry(PartOfSpeech::Verb, "bank").unwrap().is_none());
    }

    #[test]
    fn words_keep_case_and_lose_underscores() {
        let (lexicon, money, _) = two_sense_lexicon();
        let sense = lexicon.sense(money).unwrap();
        assert_eq!(sense.words[1].lemma, "depository financial institution");
    }

    #[test]
    fn unknown_sense_is_a_store_error() {
        let (lexicon, _, _) = two_sense_lexicon();
        let err = lexicon.sense(SenseId(99)).unwrap_err();
        assert!(matches!(err, StoreError::DanglingSense(SenseId(99))));
    }

    #[test]
    fn relation_targets_follow_pointers() {
        let (lexicon, money, river) = two_sense_lexicon();
        assert_eq!(lexicon.relation_targets(river, PointerKind::Hypernym).unwrap(), vec![money]);
        assert!(lexicon.relation_targets(money, PointerKind::Hypernym).unwrap().is_empty());
    }

    #[test]
    fn pointer_to_missing_sense_is_rejected() {
        let mut b = LexiconBuilder::new("test");
        let s = b.add_sense(PartOfSpeech::Verb, "run", ["run"]);
        assert!(b.add_pointer(s, PointerKind::Antonym, SenseId(5)).is_err());
    }

    #[test]
    fn entries_iterate_sorted_per_pos() {
        let (lexicon, _, _) = two_sense_lexicon();
        let lemmas: Vec<&str> = lexicon
            .entries(PartOfSpeech::Noun)
            .unwrap()
            .map(|e| e.lemma.as_str())
            .collect();
        assert_eq!(lemmas, vec!["bank", "depository financial institution", "riverbank"]);
        assert_eq!(lexicon.entries(PartOfSpeech::Adverb).unwrap().count(), 0);
    }

    #[test]
    fn embedded_sample_loads() {
        let lexicon = LexiconSource::Embedded.load().unwrap();
        assert!(lexicon.lookup_entry(PartOfSpeech::Noun, "bank").unwrap().is_some());
    }
}
