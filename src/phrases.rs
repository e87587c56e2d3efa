//! Whole-vocabulary pass that finds multiword synonyms making a single-word
//! synonym of the same sense redundant ("kick the bucket" vs "bucket").

use crate::error::Result;
use crate::lexicon::LexicalStore;
use crate::models::{PartOfSpeech, Sense, SenseId, Word, WordId};
use crate::utils::strings::{has_uppercase, normalize_letters};
use log::info;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhraseReduction {
    phrases: BTreeMap<String, SenseId>,
    #[serde(skip)]
    subsumed: HashSet<WordId>,
}

impl PhraseReduction {
    pub fn get(&self, phrase: &str) -> Option<SenseId> {
        self.phrases.get(phrase).copied()
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.contains_key(phrase)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Phrases in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SenseId)> {
        self.phrases.iter().map(|(p, s)| (p.as_str(), *s))
    }

    /// True when `word` is a single word that one of its own sense's phrases
    /// already contains, so a panel can drop it from the synonym list.
    pub fn subsumes(&self, word: &Word) -> bool {
        self.subsumed.contains(&word.id)
    }
}

#[derive(Debug)]
struct SenseReduction {
    sense: SenseId,
    // phrase and how many single words it subsumed in this sense
    phrases: Vec<(String, usize)>,
    subsumed: Vec<WordId>,
}

/// Scans every sense reachable from the store's entries.
///
/// When two senses produce the same phrase, the one where the phrase subsumes
/// more single words wins, then the lower sense id, so the result does not
/// depend on iteration or thread order.
pub fn reduce_all<S>(store: &S) -> Result<PhraseReduction>
where
    S: LexicalStore + Sync + ?Sized,
{
    let mut seen_entries = HashSet::new();
    let mut seen_senses = HashSet::new();
    let mut senses = Vec::new();
    for pos in PartOfSpeech::ALL {
        for entry in store.entries(pos)? {
            if !seen_entries.insert(entry.id) {
                continue;
            }
            // a sense shared by several entries reduces the same way each time
            for &sense in &entry.senses {
                if seen_senses.insert(sense) {
                    senses.push(sense);
                }
            }
        }
    }

    let reductions: Vec<SenseReduction> = senses
        .par_iter()
        .map(|&id| store.sense(id).map(reduce_sense))
        .collect::<Result<Vec<_>>>()?;

    let mut best: BTreeMap<String, (SenseId, usize)> = BTreeMap::new();
    let mut subsumed = HashSet::new();
    for reduction in reductions {
        subsumed.extend(reduction.subsumed);
        for (phrase, overlap) in reduction.phrases {
            let candidate = (reduction.sense, overlap);
            best.entry(phrase)
                .and_modify(|current| {
                    if overlap > current.1 || (overlap == current.1 && candidate.0 < current.0) {
                        *current = candidate;
                    }
                })
                .or_insert(candidate);
        }
    }

    info!(
        "phrase reduction: {} senses scanned, {} phrases, {} subsumed words",
        senses.len(),
        best.len(),
        subsumed.len()
    );

    Ok(PhraseReduction {
        phrases: best.into_iter().map(|(p, (s, _))| (p, s)).collect(),
        subsumed,
    })
}

fn reduce_sense(sense: &Sense) -> SenseReduction {
    let mut multiword: Vec<&Word> = Vec::new();
    let mut single: Vec<(&Word, String)> = Vec::new();
    for word in &sense.words {
        // capitalized lemmas are proper nouns and never take part
        if has_uppercase(&word.lemma) {
            continue;
        }
        if word.is_multiword() {
            multiword.push(word);
        } else {
            single.push((word, normalize_letters(&word.lemma)));
        }
    }

    let mut subsumed: HashSet<WordId> = HashSet::new();
    let mut overlaps = Vec::with_capacity(multiword.len());
    for phrase in &multiword {
        let parts: HashSet<String> = phrase.lemma.split(' ').map(normalize_letters).collect();
        let mut overlap = 0;
        for (word, normalized) in &single {
            if !normalized.is_empty() && parts.contains(normalized) {
                subsumed.insert(word.id);
                overlap += 1;
            }
        }
        overlaps.push(overlap);
    }

    let remaining = single.iter().filter(|(w, _)| !subsumed.contains(&w.id)).count();
    if multiword.is_empty() || remaining == 0 {
        return SenseReduction {
            sense: sense.id,
            phrases: Vec::new(),
            subsumed: Vec::new(),
        };
    }

    SenseReduction {
        sense: sense.id,
        phrases: multiword
            .iter()
            .zip(overlaps)
            .map(|(w, overlap)| (w.lemma.clone(), overlap))
            .collect(),
        subsumed: subsumed.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{Lexicon, LexiconBuilder};

    fn lexicon_of(senses: &[&[&str]]) -> (Lexicon, Vec<SenseId>) {
        let mut b = LexiconBuilder::new("test");
        let ids: Vec<SenseId> = senses
            .iter()
            .map(|words| b.add_sense(PartOfSpeech::Verb, "gloss", words.iter()))
            .collect();
        for &id in &ids {
            b.index_sense_words(id).unwrap();
        }
        (b.build(), ids)
    }

    #[test]
    fn phrase_is_kept_when_a_single_word_survives() {
        let (lexicon, ids) = lexicon_of(&[&["kick the bucket", "bucket", "die"]]);
        let reduction = reduce_all(&lexicon).unwrap();
        assert_eq!(reduction.get("kick the bucket"), Some(ids[0]));
        assert_eq!(reduction.len(), 1);

        let sense = lexicon.sense(ids[0]).unwrap();
        assert!(reduction.subsumes(&sense.words[1]));
        assert!(!reduction.subsumes(&sense.words[2]));
    }

    #[test]
    fn phrase_is_dropped_when_every_single_word_is_subsumed() {
        let (lexicon, ids) = lexicon_of(&[&["kick the bucket", "bucket"]]);
        let reduction = reduce_all(&lexicon).unwrap();
        assert!(reduction.is_empty());
        let sense = lexicon.sense(ids[0]).unwrap();
        assert!(!reduction.subsumes(&sense.words[1]));
    }

    #[test]
    fn capitalized_words_take_no_part() {
        // were "Washington" counted as a single word, the phrase would be kept
        let (lexicon, _) = lexicon_of(&[&["Washington", "the capital city", "capital"]]);
        assert!(reduce_all(&lexicon).unwrap().is_empty());

        let (lexicon, _) = lexicon_of(&[&["Washington D.C.", "capital"]]);
        assert!(reduce_all(&lexicon).unwrap().is_empty());
    }

    #[test]
    fn constituents_are_normalized_to_letters() {
        let (lexicon, ids) = lexicon_of(&[&["cash in one's chips", "ones", "die"]]);
        let reduction = reduce_all(&lexicon).unwrap();
        let sense = lexicon.sense(ids[0]).unwrap();
        assert!(reduction.subsumes(&sense.words[1]));
        assert!(reduction.contains("cash in one's chips"));
    }

    #[test]
    fn sense_without_phrases_maps_nothing() {
        let (lexicon, _) = lexicon_of(&[&["die", "decease", "perish"]]);
        assert!(reduce_all(&lexicon).unwrap().is_empty());
    }

    #[test]
    fn duplicate_phrase_prefers_larger_overlap() {
        let (lexicon, ids) = lexicon_of(&[
            &["pass away", "go"],
            &["pass away", "pass", "away", "die"],
        ]);
        let reduction = reduce_all(&lexicon).unwrap();
        assert_eq!(reduction.get("pass away"), Some(ids[1]));
    }

    #[test]
    fn duplicate_phrase_ties_go_to_lower_sense() {
        let (lexicon, ids) = lexicon_of(&[&["give out", "fail"], &["give out", "emit"]]);
        assert_eq!(reduce_all(&lexicon).unwrap().get("give out"), Some(ids[0]));
    }

    #[test]
    fn repeated_runs_agree() {
        let lexicon = crate::lexicon::LexiconSource::Embedded.load().unwrap();
        let first = reduce_all(&lexicon).unwrap();
        let second = reduce_all(&lexicon).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("kick the bucket"));
    }
}
