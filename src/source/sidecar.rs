// file: src/source/sidecar.rs
// description: removal of cached preprocessed/lemmatized sidecar files
// reference: https://docs.rs/walkdir

use super::scanner::split_path_list;
use super::text::Variant;
use crate::error::{QuizError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub fn is_sidecar(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            Variant::cached_variants()
                .iter()
                .any(|v| v.sidecar_extension() == Some(ext))
        })
}

pub fn find_sidecars(paths: &str) -> Vec<PathBuf> {
    split_path_list(paths)
        .iter()
        .flat_map(|root| {
            WalkDir::new(root)
                .follow_links(false)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_sidecar(e.path()))
                .map(|e| e.into_path())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Deletes every sidecar under the given comma-separated paths and returns
/// how many were removed.
pub fn clean_sidecars(paths: &str) -> Result<usize> {
    let sidecars = find_sidecars(paths);

    for path in &sidecars {
        fs::remove_file(path).map_err(|source| QuizError::FileOperation {
            path: path.clone(),
            source,
        })?;
        debug!("Removed sidecar: {}", path.display());
    }

    info!("Removed {} cached sidecar files", sidecars.len());
    Ok(sidecars.len())
}
