//! Writing-assistant core over a WordNet-style lexicon: exact lookup,
//! relation trees, multiword phrase reduction, text counters and a
//! pluggable checker seam.

pub mod app;
pub mod check;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod lookup;
pub mod metrics;
pub mod models;
pub mod phrases;
pub mod relations;
pub mod tree;
pub mod utils;

pub use error::{CheckError, LookupError, StoreError};
pub use lexicon::{LexicalStore, Lexicon, LexiconSource};
pub use lookup::lookup;
pub use phrases::{reduce_all, PhraseReduction};
pub use relations::expand;
pub use tree::LookupTree;
