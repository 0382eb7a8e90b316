// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod phrase;
pub mod question;

pub use phrase::Phrase;
pub use question::Question;
