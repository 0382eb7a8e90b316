// file: src/tokenizer/mod.rs
// description: sentence and word tokenization module exports
// reference: internal module structure

pub mod sentence;
pub mod word;

pub use sentence::{DEFAULT_TERMINATORS, Sentence, SentenceTokenizer};
pub use word::{DEFAULT_WORD_PATTERN, Token, WordTokenizer};
