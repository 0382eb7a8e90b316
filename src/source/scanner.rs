// file: src/source/scanner.rs
// description: Directory walking and source file discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::SourcesConfig;
use crate::error::Result;
use crate::utils::Validator;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub struct FileScanner {
    config: SourcesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
}

/// Splits a comma-separated path list, dropping empty entries.
pub fn split_path_list(paths: &str) -> Vec<PathBuf> {
    paths
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}

impl FileScanner {
    pub fn new(config: SourcesConfig) -> Self {
        Self { config }
    }

    /// Scans every entry of a comma-separated path list. Results are sorted
    /// by path so downstream source order is stable.
    pub fn scan_paths(&self, paths: &str) -> Result<Vec<ScannedFile>> {
        let mut files = Vec::new();

        for root in split_path_list(paths) {
            Validator::validate_exists(&root)?;
            files.extend(self.scan_directory(&root)?);
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        files.dedup_by(|a, b| a.path == b.path);

        info!("Found {} source files", files.len());
        Ok(files)
    }

    pub fn scan_directory(&self, root: &Path) -> Result<Vec<ScannedFile>> {
        debug!("Scanning: {}", root.display());
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if self.should_skip(path) {
                debug!("Skipping file: {}", path.display());
                continue;
            }

            if let Some(extension) = path.extension()
                && extension == self.config.extension.as_str()
                && let Ok(metadata) = entry.metadata()
            {
                let size = metadata.len();
                let max_size = (self.config.max_file_size_mb * 1024 * 1024) as u64;

                if size > max_size {
                    debug!(
                        "Skipping large file ({} MB): {}",
                        size / 1024 / 1024,
                        path.display()
                    );
                    continue;
                }

                files.push(ScannedFile {
                    path: path.to_path_buf(),
                    relative_path: relative_path(root, path),
                    size,
                });
            }
        }

        Ok(files)
    }

    fn should_skip(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.config.skip_patterns {
            if let Some(suffix) = pattern.strip_prefix('*') {
                if path_str.ends_with(suffix) {
                    return true;
                }
            } else if let Some(dir) = pattern.strip_suffix("/*") {
                if path
                    .components()
                    .any(|c| c.as_os_str().to_string_lossy() == dir)
                {
                    return true;
                }
            } else if path_str.contains(pattern.as_str()) {
                return true;
            }
        }

        false
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().to_string(),
        _ => path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizError;
    use std::fs;
    use tempfile::TempDir;

    fn config(skip_patterns: Vec<String>) -> SourcesConfig {
        SourcesConfig {
            extension: "txt".to_string(),
            skip_patterns,
            max_file_size_mb: 10,
        }
    }

    #[test]
    fn test_scan_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "A.").unwrap();
        fs::write(temp.path().join("a.txt.lemmatized"), "a .").unwrap();
        fs::write(temp.path().join("notes.md"), "# no").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested/b.txt"), "B.").unwrap();

        let scanner = FileScanner::new(config(vec![]));
        let files = scanner.scan_paths(&temp.path().display().to_string()).unwrap();

        let names: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "nested/b.txt"]);
    }

    #[test]
    fn test_comma_separated_paths_and_single_files() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let file = second.path().join("only.txt");
        fs::write(first.path().join("x.txt"), "X.").unwrap();
        fs::write(&file, "Only.").unwrap();

        let scanner = FileScanner::new(config(vec![]));
        let list = format!("{}, {}", first.path().display(), file.display());
        let files = scanner.scan_paths(&list).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.relative_path == "only.txt"));
    }

    #[test]
    fn test_missing_path_is_validation_error() {
        let scanner = FileScanner::new(config(vec![]));
        assert!(matches!(
            scanner.scan_paths("/nonexistent/sources"),
            Err(QuizError::Validation(_))
        ));
    }

    #[test]
    fn test_skip_patterns() {
        let scanner = FileScanner::new(config(vec![
            "*.bak.txt".to_string(),
            ".git/*".to_string(),
            "drafts".to_string(),
        ]));

        assert!(scanner.should_skip(Path::new("old.bak.txt")));
        assert!(scanner.should_skip(Path::new("repo/.git/config.txt")));
        assert!(scanner.should_skip(Path::new("drafts/chapter.txt")));
        assert!(!scanner.should_skip(Path::new("chapter.txt")));
    }

    #[test]
    fn test_split_path_list() {
        assert_eq!(
            split_path_list("a, b,,c "),
            vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")]
        );
    }
}
