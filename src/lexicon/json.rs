//! JSON interchange form of a lexicon, used for the embedded sample and for
//! small hand-written word lists.

use super::{Lexicon, LexiconBuilder};
use crate::error::{Result, StoreError};
use crate::models::{PartOfSpeech, PointerKind, SenseId};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct LexiconData {
    pub name: String,
    pub senses: Vec<SenseData>,
}

#[derive(Debug, Deserialize)]
pub struct SenseData {
    pub key: String,
    pub pos: PartOfSpeech,
    #[serde(default)]
    pub gloss: String,
    pub words: Vec<String>,
    #[serde(default)]
    pub relations: BTreeMap<PointerKind, Vec<String>>,
}

pub fn load(path: &Path) -> Result<Lexicon> {
    let raw = fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_slice(&raw)
}

pub fn from_slice(raw: &[u8]) -> Result<Lexicon> {
    let data: LexiconData = serde_json::from_slice(raw)?;
    build(data)
}

pub fn build(data: LexiconData) -> Result<Lexicon> {
    let mut builder = LexiconBuilder::new(data.name);
    let mut keys: HashMap<&str, SenseId> = HashMap::new();

    // senses first so relations can point forward
    for sense in &data.senses {
        if sense.words.is_empty() {
            return Err(StoreError::EmptySense(sense.key.clone()));
        }
        let id = builder.add_sense(sense.pos, &sense.gloss, &sense.words);
        if keys.insert(sense.key.as_str(), id).is_some() {
            return Err(StoreError::DuplicateKey(sense.key.clone()));
        }
        builder.index_sense_words(id)?;
    }

    for sense in &data.senses {
        let from = keys[sense.key.as_str()];
        for (&kind, targets) in &sense.relations {
            for target in targets {
                let to = keys
                    .get(target.as_str())
                    .copied()
                    .ok_or_else(|| StoreError::UnresolvedTarget {
                        source_key: sense.key.clone(),
                        target: target.clone(),
                    })?;
                builder.add_pointer(from, kind, to)?;
            }
        }
    }

    Ok(builder.build())
}
