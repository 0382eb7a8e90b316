// file: src/source/mod.rs
// description: source text discovery, variant cache and sidecar handling
// reference: internal module structure

pub mod scanner;
pub mod sidecar;
pub mod text;

pub use scanner::{FileScanner, ScannedFile, split_path_list};
pub use sidecar::{clean_sidecars, find_sidecars};
pub use text::{SourceText, Variant};
