use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Query order used by lookups and whole-vocabulary scans.
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
        }
    }

    /// Suffix of the WordNet database files (`data.adj`, `index.noun`, ...).
    pub fn file_suffix(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adj",
            PartOfSpeech::Adverb => "adv",
        }
    }

    /// WordNet synset type letter. Satellite adjectives (`s`) fold into adjectives.
    pub fn from_synset_type(c: &str) -> Option<Self> {
        match c {
            "n" => Some(PartOfSpeech::Noun),
            "v" => Some(PartOfSpeech::Verb),
            "a" | "s" => Some(PartOfSpeech::Adjective),
            "r" => Some(PartOfSpeech::Adverb),
            _ => None,
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Relations backed by a store pointer between senses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Antonym,
    Hypernym,
    Category,
    CategoryMember,
}

impl PointerKind {
    pub const ALL: [PointerKind; 4] = [
        PointerKind::Antonym,
        PointerKind::Hypernym,
        PointerKind::Category,
        PointerKind::CategoryMember,
    ];

    /// Maps a WordNet pointer symbol. Symbols for relations this crate does not
    /// present (meronyms, similar-to, ...) yield `None`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "!" => Some(PointerKind::Antonym),
            "@" => Some(PointerKind::Hypernym),
            ";c" => Some(PointerKind::Category),
            "-c" => Some(PointerKind::CategoryMember),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Synonym,
    Antonym,
    Hypernym,
    Category,
    CategoryMember,
}

impl RelationKind {
    /// Presentation order of relation groups.
    pub const ORDER: [RelationKind; 5] = [
        RelationKind::Synonym,
        RelationKind::Antonym,
        RelationKind::Hypernym,
        RelationKind::Category,
        RelationKind::CategoryMember,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RelationKind::Synonym => "synonyms",
            RelationKind::Antonym => "antonyms",
            RelationKind::Hypernym => "hypernyms",
            RelationKind::Category => "category",
            RelationKind::CategoryMember => "category members",
        }
    }

    pub fn pointer(&self) -> Option<PointerKind> {
        match self {
            RelationKind::Synonym => None,
            RelationKind::Antonym => Some(PointerKind::Antonym),
            RelationKind::Hypernym => Some(PointerKind::Hypernym),
            RelationKind::Category => Some(PointerKind::Category),
            RelationKind::CategoryMember => Some(PointerKind::CategoryMember),
        }
    }
}

impl From<PointerKind> for RelationKind {
    fn from(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Antonym => RelationKind::Antonym,
            PointerKind::Hypernym => RelationKind::Hypernym,
            PointerKind::Category => RelationKind::Category,
            PointerKind::CategoryMember => RelationKind::CategoryMember,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SenseId(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntryId(pub(crate) u32);

/// Identity of one lexicalization: the sense it belongs to and its slot in
/// that sense's word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WordId {
    pub sense: SenseId,
    pub index: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct Word {
    pub id: WordId,
    pub lemma: String,
    pub pos: PartOfSpeech,
}

impl Word {
    pub fn sense(&self) -> SenseId {
        self.id.sense
    }

    pub fn is_multiword(&self) -> bool {
        self.lemma.contains(' ')
    }
}

// two words with the same lemma in different senses are different words
impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Word {}

impl Hash for Word {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Sense {
    pub id: SenseId,
    pub pos: PartOfSpeech,
    pub gloss: String,
    pub words: Vec<Word>,
    #[serde(skip)]
    pub(crate) pointers: Vec<(PointerKind, SenseId)>,
}

impl Sense {
    pub fn targets(&self, kind: PointerKind) -> impl Iterator<Item = SenseId> + '_ {
        self.pointers
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, target)| *target)
    }
}

impl PartialEq for Sense {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Sense {}

/// One headword for one part of speech.
#[derive(Debug, Clone, Serialize)]
pub struct LexicalEntry {
    pub id: EntryId,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub senses: Vec<SenseId>,
}

impl PartialEq for LexicalEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LexicalEntry {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationGroup {
    pub kind: RelationKind,
    pub targets: Vec<Word>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(sense: u32, index: u16, lemma: &str) -> Word {
        Word {
            id: WordId { sense: SenseId(sense), index },
            lemma: lemma.to_string(),
            pos: PartOfSpeech::Noun,
        }
    }

    #[test]
    fn words_compare_by_identity_not_lemma() {
        assert_ne!(word(1, 0, "bank"), word(2, 0, "bank"));
        assert_eq!(word(1, 0, "bank"), word(1, 0, "Bank"));
    }

    #[test]
    fn pointer_symbols_map_to_presented_kinds() {
        assert_eq!(PointerKind::from_symbol("!"), Some(PointerKind::Antonym));
        assert_eq!(PointerKind::from_symbol(";c"), Some(PointerKind::Category));
        assert_eq!(PointerKind::from_symbol("%p"), None);
    }

    #[test]
    fn satellite_adjectives_fold_into_adjective() {
        assert_eq!(PartOfSpeech::from_synset_type("s"), Some(PartOfSpeech::Adjective));
        assert_eq!(PartOfSpeech::from_synset_type("x"), None);
    }

    #[test]
    fn relation_order_starts_with_synonyms() {
        assert_eq!(RelationKind::ORDER[0], RelationKind::Synonym);
        assert!(RelationKind::ORDER[1..].iter().all(|k| k.pointer().is_some()));
    }
}
