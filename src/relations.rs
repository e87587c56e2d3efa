use crate::error::Result;
use crate::lexicon::LexicalStore;
use crate::models::{LexicalEntry, PointerKind, RelationGroup, RelationKind, Word};
use std::collections::HashSet;

/// Relation groups for `entry`: synonyms first, then the pointer kinds in
/// [`RelationKind::ORDER`]. Empty groups are left out.
pub fn expand<S>(store: &S, entry: &LexicalEntry) -> Result<Vec<RelationGroup>>
where
    S: LexicalStore + ?Sized,
{
    expand_with(store, entry, |_| true)
}

/// Like [`expand`], keeping only synonyms for which `keep_synonym` holds.
pub fn expand_with<S, F>(store: &S, entry: &LexicalEntry, keep_synonym: F) -> Result<Vec<RelationGroup>>
where
    S: LexicalStore + ?Sized,
    F: Fn(&Word) -> bool,
{
    let mut groups = Vec::new();

    let synonyms: Vec<Word> = synonyms(store, entry)?
        .into_iter()
        .filter(|w| keep_synonym(w))
        .collect();
    push_group(&mut groups, RelationKind::Synonym, synonyms);

    for kind in PointerKind::ALL {
        push_group(&mut groups, kind.into(), pointer_targets(store, entry, kind)?);
    }
    Ok(groups)
}

/// Words sharing a sense with `entry`, without the headword itself.
///
/// WordNet lists the headword in each of its synsets, so it is removed by
/// case-insensitive lemma comparison.
pub fn synonyms<S>(store: &S, entry: &LexicalEntry) -> Result<Vec<Word>>
where
    S: LexicalStore + ?Sized,
{
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for id in &entry.senses {
        let sense = store.sense(*id)?;
        for word in &sense.words {
            if word.lemma.to_lowercase() == entry.lemma {
                continue;
            }
            if seen.insert(word.id) {
                words.push(word.clone());
            }
        }
    }
    sort_words(&mut words);
    Ok(words)
}

/// Words of every sense reached from `entry` through `kind`.
pub fn pointer_targets<S>(store: &S, entry: &LexicalEntry, kind: PointerKind) -> Result<Vec<Word>>
where
    S: LexicalStore + ?Sized,
{
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for id in &entry.senses {
        for target in store.relation_targets(*id, kind)? {
            for word in &store.sense(target)?.words {
                if seen.insert(word.id) {
                    words.push(word.clone());
                }
            }
        }
    }
    sort_words(&mut words);
    Ok(words)
}

fn push_group(groups: &mut Vec<RelationGroup>, kind: RelationKind, targets: Vec<Word>) {
    if !targets.is_empty() {
        groups.push(RelationGroup { kind, targets });
    }
}

// homographs from different senses keep a stable order
fn sort_words(words: &mut [Word]) {
    words.sort_by(|a, b| a.lemma.cmp(&b.lemma).then(a.id.cmp(&b.id)));
}
