use crate::error::{LookupError, Result};
use crate::lexicon::LexicalStore;
use crate::models::{LexicalEntry, PartOfSpeech};
use log::debug;

/// All entries matching `surface` exactly, one per part of speech at most,
/// sorted by lemma.
///
/// A blank `surface` is a caller bug and fails with
/// [`LookupError::EmptySurface`]; a surface nobody knows is an empty vector.
pub fn lookup<'s, S>(store: &'s S, surface: &str) -> Result<Vec<&'s LexicalEntry>, LookupError>
where
    S: LexicalStore + ?Sized,
{
    if surface.trim().is_empty() {
        return Err(LookupError::EmptySurface);
    }

    let mut entries: Vec<&LexicalEntry> = Vec::new();
    for pos in PartOfSpeech::ALL {
        if let Some(entry) = store.lookup_entry(pos, surface)? {
            // the same entry can come back for several parts of speech
            if !entries.iter().any(|e| e.id == entry.id) {
                entries.push(entry);
            }
        }
    }
    entries.sort_by(|a, b| a.lemma.cmp(&b.lemma).then(a.pos.cmp(&b.pos)));

    debug!("lookup '{}': {} entries", surface, entries.len());
    Ok(entries)
}

/// Distinct lemmas of `entries`, comma separated, in the order given.
pub fn root_words(entries: &[&LexicalEntry]) -> String {
    let mut lemmas: Vec<&str> = Vec::new();
    for entry in entries {
        if !lemmas.contains(&entry.lemma.as_str()) {
            lemmas.push(&entry.lemma);
        }
    }
    lemmas.join(", ")
}

/// Definition pane text: part of speech, then numbered glosses, per entry.
pub fn full_definition<S>(store: &S, entries: &[&LexicalEntry]) -> Result<String>
where
    S: LexicalStore + ?Sized,
{
    let mut out = String::new();
    for entry in entries {
        out.push_str(entry.pos.label());
        out.push('\n');
        for (i, id) in entry.senses.iter().enumerate() {
            let sense = store.sense(*id)?;
            out.push_str(&format!("{} {}\n", i + 1, sense.gloss));
        }
        out.push('\n');
    }
    Ok(out.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::lexicon::{LexiconBuilder, Lexicon};
    use crate::models::{PointerKind, Sense, SenseId};

    fn lexicon() -> Lexicon {
        let mut b = LexiconBuilder::new("test");
        let money = b.add_sense(PartOfSpeech::Noun, "a financial institution", ["bank", "depository_financial_institution"]);
        let river = b.add_sense(PartOfSpeech::Noun, "sloping land", ["bank", "riverbank", "sloping_land"]);
        let verb = b.add_sense(PartOfSpeech::Verb, "keep an account at a bank", ["bank"]);
        let fast = b.add_sense(PartOfSpeech::Adverb, "quickly", ["fast"]);
        let fast_adj = b.add_sense(PartOfSpeech::Adjective, "moving quickly", ["fast"]);
        for s in [money, river, verb, fast, fast_adj] {
            b.index_sense_words(s).unwrap();
        }
        b.build()
    }

    #[test]
    fn one_entry_per_part_of_speech() {
        let lexicon = lexicon();
        let entries = lookup(&lexicon, "bank").unwrap();
        let pos: Vec<PartOfSpeech> = entries.iter().map(|e| e.pos).collect();
        assert_eq!(pos, vec![PartOfSpeech::Noun, PartOfSpeech::Verb]);
        assert_eq!(entries[0].senses.len(), 2);
    }

    #[test]
    fn unknown_surface_is_empty_not_an_error() {
        let lexicon = lexicon();
        assert!(lookup(&lexicon, "zyzzyva").unwrap().is_empty());
    }

    #[test]
    fn blank_surface_fails_fast() {
        let lexicon = lexicon();
        assert!(matches!(lookup(&lexicon, ""), Err(LookupError::EmptySurface)));
        assert!(matches!(lookup(&lexicon, "  \n"), Err(LookupError::EmptySurface)));
    }

    #[test]
    fn root_words_are_distinct() {
        let lexicon = lexicon();
        let entries = lookup(&lexicon, "fast").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(root_words(&entries), "fast");
    }

    #[test]
    fn full_definition_numbers_glosses() {
        let lexicon = lexicon();
        let entries = lookup(&lexicon, "bank").unwrap();
        assert_eq!(
            full_definition(&lexicon, &entries).unwrap(),
            "noun\n1 a financial institution\n2 sloping land\n\nverb\n1 keep an account at a bank"
        );
    }

    /// Returns the same entry for every part of speech, like stores that index
    /// non-inflecting words once.
    struct SharedEntryStore(Lexicon);

    impl LexicalStore for SharedEntryStore {
        fn lookup_entry(&self, _pos: PartOfSpeech, lemma: &str) -> Result<Option<&LexicalEntry>> {
            self.0.lookup_entry(PartOfSpeech::Noun, lemma)
        }
        fn entries(&self, pos: PartOfSpeech) -> Result<Box<dyn Iterator<Item = &LexicalEntry> + '_>> {
            self.0.entries(pos)
        }
        fn sense(&self, id: SenseId) -> Result<&Sense> {
            self.0.sense(id)
        }
        fn relation_targets(&self, sense: SenseId, kind: PointerKind) -> Result<Vec<SenseId>> {
            self.0.relation_targets(sense, kind)
        }
    }

    #[test]
    fn identical_entries_are_deduplicated() {
        let store = SharedEntryStore(lexicon());
        assert_eq!(lookup(&store, "bank").unwrap().len(), 1);
    }

    struct BrokenStore;

    impl LexicalStore for BrokenStore {
        fn lookup_entry(&self, _pos: PartOfSpeech, _lemma: &str) -> Result<Option<&LexicalEntry>> {
            Err(StoreError::DanglingSense(SenseId(0)))
        }
        fn entries(&self, _pos: PartOfSpeech) -> Result<Box<dyn Iterator<Item = &LexicalEntry> + '_>> {
            Ok(Box::new(std::iter::empty()))
        }
        fn sense(&self, id: SenseId) -> Result<&Sense> {
            Err(StoreError::DanglingSense(id))
        }
        fn relation_targets(&self, sense: SenseId, _kind: PointerKind) -> Result<Vec<SenseId>> {
            Err(StoreError::DanglingSense(sense))
        }
    }

    #[test]
    fn store_failure_propagates() {
        assert!(matches!(lookup(&BrokenStore, "bank"), Err(LookupError::Store(_))));
    }
}
