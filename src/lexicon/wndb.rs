//! Reader for the Princeton WordNet database files (`data.*` and `index.*`).
//!
//! Only the parts the lookup panel needs are kept: synset words, glosses, and
//! the pointers listed in [`PointerKind`]. Verb frames and lexicographer ids
//! are skipped.

use super::{Lexicon, LexiconBuilder};
use crate::error::{Result, StoreError};
use crate::models::{PartOfSpeech, PointerKind, SenseId};
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq)]
struct DataRecord {
    offset: u64,
    words: Vec<String>,
    pointers: Vec<PointerRecord>,
    gloss: String,
}

#[derive(Debug, PartialEq)]
struct PointerRecord {
    kind: PointerKind,
    offset: u64,
    pos: PartOfSpeech,
}

#[derive(Debug, PartialEq)]
struct IndexRecord {
    lemma: String,
    offsets: Vec<u64>,
}

struct PendingPointer {
    from: SenseId,
    pointer: PointerRecord,
    line: usize,
    path: PathBuf,
}

pub fn load(dir: &Path) -> Result<Lexicon> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wordnet".to_string());
    let mut builder = LexiconBuilder::new(name);
    let mut offsets: HashMap<(PartOfSpeech, u64), SenseId> = HashMap::new();
    let mut pending = Vec::new();
    let mut ignored_pointers = 0usize;

    for pos in PartOfSpeech::ALL {
        let path = dir.join(format!("data.{}", pos.file_suffix()));
        let text = read(&path)?;
        for (n, line) in text.lines().enumerate() {
            if is_header(line) {
                continue;
            }
            let (record, ignored) =
                parse_data_line(line).map_err(|message| malformed(&path, n + 1, message))?;
            ignored_pointers += ignored;
            let id = builder.add_sense(pos, &record.gloss, &record.words);
            offsets.insert((pos, record.offset), id);
            pending.extend(record.pointers.into_iter().map(|pointer| PendingPointer {
                from: id,
                pointer,
                line: n + 1,
                path: path.clone(),
            }));
        }
    }
    debug!("ignored {} pointers of unpresented kinds", ignored_pointers);

    for p in pending {
        let to = offsets
            .get(&(p.pointer.pos, p.pointer.offset))
            .copied()
            .ok_or_else(|| {
                malformed(
                    &p.path,
                    p.line,
                    format!("pointer to unknown {} synset {:08}", p.pointer.pos, p.pointer.offset),
                )
            })?;
        builder.add_pointer(p.from, p.pointer.kind, to)?;
    }

    for pos in PartOfSpeech::ALL {
        let path = dir.join(format!("index.{}", pos.file_suffix()));
        let text = read(&path)?;
        for (n, line) in text.lines().enumerate() {
            if is_header(line) {
                continue;
            }
            let record = parse_index_line(line).map_err(|message| malformed(&path, n + 1, message))?;
            for offset in record.offsets {
                let sense = offsets.get(&(pos, offset)).copied().ok_or_else(|| {
                    malformed(&path, n + 1, format!("index names unknown synset {:08}", offset))
                })?;
                builder.add_entry_sense(pos, &record.lemma, sense);
            }
        }
    }

    info!("read {} synsets from {}", builder.sense_count(), dir.display());
    Ok(builder.build())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn malformed(path: &Path, line: usize, message: impl Into<String>) -> StoreError {
    StoreError::Malformed {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

// the license preamble is indented with spaces
fn is_header(line: &str) -> bool {
    line.is_empty() || line.starts_with(' ')
}

// adjective words may carry a syntactic marker: "galore(ip)", "elect(p)"
fn strip_marker(word: &str) -> &str {
    match word.strip_suffix(')').and_then(|w| w.rfind('(').map(|i| &word[..i])) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => word,
    }
}

fn parse_data_line(line: &str) -> std::result::Result<(DataRecord, usize), String> {
    let (fields, gloss) = line.split_once('|').unwrap_or((line, ""));
    let mut tokens = fields.split_whitespace();
    let mut next = |what: &str| tokens.next().ok_or_else(|| format!("missing {}", what));

    let offset = next("synset offset")?
        .parse::<u64>()
        .map_err(|e| format!("bad synset offset: {}", e))?;
    next("lexicographer file")?;
    next("synset type")?;
    let word_count = usize::from_str_radix(next("word count")?, 16)
        .map_err(|e| format!("bad word count: {}", e))?;

    let mut words = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        words.push(strip_marker(next("word")?).to_string());
        next("lexical id")?;
    }

    let pointer_count = next("pointer count")?
        .parse::<usize>()
        .map_err(|e| format!("bad pointer count: {}", e))?;
    let mut pointers = Vec::new();
    let mut ignored = 0;
    for _ in 0..pointer_count {
        let symbol = next("pointer symbol")?;
        let target = next("pointer offset")?
            .parse::<u64>()
            .map_err(|e| format!("bad pointer offset: {}", e))?;
        let pos_letter = next("pointer part of speech")?;
        next("pointer source/target")?;

        let pos = PartOfSpeech::from_synset_type(pos_letter)
            .ok_or_else(|| format!("unknown part of speech '{}'", pos_letter))?;
        match PointerKind::from_symbol(symbol) {
            Some(kind) => pointers.push(PointerRecord {
                kind,
                offset: target,
                pos,
            }),
            None => ignored += 1,
        }
    }

    if words.is_empty() {
        return Err("synset has no words".to_string());
    }

    Ok((
        DataRecord {
            offset,
            words,
            pointers,
            gloss: gloss.trim().to_string(),
        },
        ignored,
    ))
}

fn parse_index_line(line: &str) -> std::result::Result<IndexRecord, String> {
    let mut tokens = line.split_whitespace();
    let mut next = |what: &str| tokens.next().ok_or_else(|| format!("missing {}", what));

    let lemma = next("lemma")?.to_string();
    next("part of speech")?;
    let synset_count = next("synset count")?
        .parse::<usize>()
        .map_err(|e| format!("bad synset count: {}", e))?;
    let pointer_count = next("pointer count")?
        .parse::<usize>()
        .map_err(|e| format!("bad pointer count: {}", e))?;
    for _ in 0..pointer_count {
        next("pointer symbol")?;
    }
    next("sense count")?;
    next("tagged sense count")?;

    let mut offsets = Vec::with_capacity(synset_count);
    for _ in 0..synset_count {
        offsets.push(
            next("synset offset")?
                .parse::<u64>()
                .map_err(|e| format!("bad synset offset: {}", e))?,
        );
    }

    Ok(IndexRecord { lemma, offsets })
}
