// file: src/parser/mod.rs
// description: phrase catalog parsing module exports
// reference: internal module structure

pub mod catalog;

pub use catalog::PhraseCatalog;
