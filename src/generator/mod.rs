// file: src/generator/mod.rs
// description: question generation module exports
// reference: internal module structure

pub mod engine;
pub mod question_set;

pub use engine::{Generator, Location};
pub use question_set::QuestionSet;
