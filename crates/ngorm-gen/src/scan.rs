//! Declaration discovery.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use log::debug;

use crate::config::{ConfigError, DECLARATION_EXTENSION, GENERATED_MARKER};
use crate::error::{GenError, Result};
use crate::extract::SourceFile;

/// Where declarations come from and where output goes by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanInput {
    /// Directory the artifact is written to unless an output path is set.
    pub dir: PathBuf,
    /// Declaration files, in scan order.
    pub files: Vec<PathBuf>,
}

impl ScanInput {
    /// One directory is scanned non-recursively; anything else is taken as
    /// a file list whose first entry's directory receives the output.
    pub fn resolve(paths: &[PathBuf]) -> Result<Self> {
        let paths: Vec<PathBuf> = if paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            paths.to_vec()
        };

        if let [single] = paths.as_slice() {
            let meta = fs::metadata(single).map_err(|e| GenError::io(single, e))?;
            if meta.is_dir() {
                return Ok(Self {
                    dir: single.clone(),
                    files: scan_dir(single),
                });
            }
        }

        for path in &paths {
            let meta = fs::metadata(path).map_err(|e| GenError::io(path, e))?;
            if !meta.is_file() {
                return Err(ConfigError::Invalid(format!(
                    "{} is not a file; pass a single directory or a list of files",
                    path.display()
                ))
                .into());
            }
        }

        let dir = match paths[0].parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self { dir, files: paths })
    }

    /// Read every declaration file, skipping generated ones.
    pub fn load(&self) -> Result<Vec<SourceFile>> {
        let mut sources = Vec::with_capacity(self.files.len());
        for path in &self.files {
            let content = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
            if is_generated(&content) {
                debug!("skipping generated file {}", path.display());
                continue;
            }
            sources.push(SourceFile::new(path.clone(), content));
        }
        Ok(sources)
    }
}

/// `*.rs` files directly inside `dir`, hidden and ignored files excluded,
/// sorted by path.
pub fn scan_dir(dir: &Path) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .hidden(true)
        .git_ignore(true)
        .build();

    let mut files: Vec<PathBuf> = walker
        .flatten()
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .map(|ext| ext == DECLARATION_EXTENSION)
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// Whether `content` was written by the generator.
pub fn is_generated(content: &str) -> bool {
    content
        .lines()
        .next()
        .map(|line| line.starts_with(GENERATED_MARKER))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_generated() {
        assert!(is_generated("// Code generated by \"ngormgen\"; DO NOT EDIT.\n"));
        assert!(!is_generated("struct A;\n// Code generated by x"));
        assert!(!is_generated(""));
    }

    #[test]
    fn test_scan_dir_is_sorted_and_flat() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.rs"), "").unwrap();
        fs::write(dir.path().join("a.rs"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join(".hidden.rs"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.rs"), "").unwrap();

        let files = scan_dir(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.rs", "b.rs"]);
    }

    #[test]
    fn test_resolve_file_list_uses_parent_dir() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("model.rs");
        fs::write(&file, "struct A;").unwrap();

        let input = ScanInput::resolve(&[file.clone()]).unwrap();
        assert_eq!(input.dir, dir.path());
        assert_eq!(input.files, vec![file]);
    }

    #[test]
    fn test_resolve_rejects_directory_in_list() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("model.rs");
        fs::write(&file, "").unwrap();

        let err = ScanInput::resolve(&[file, dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, GenError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_resolve_missing_path() {
        let dir = TempDir::new().unwrap();
        let err = ScanInput::resolve(&[dir.path().join("nope")]).unwrap_err();
        assert!(matches!(err, GenError::Io { .. }));
    }

    #[test]
    fn test_load_skips_generated_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("model.rs"), "struct A;").unwrap();
        fs::write(
            dir.path().join("ngorm_generate.rs"),
            "// Code generated by \"ngormgen\"; DO NOT EDIT.\n",
        )
        .unwrap();

        let input = ScanInput::resolve(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(input.files.len(), 2);
        let sources = input.load().unwrap();
        assert_eq!(sources.len(), 1);
        assert!(sources[0].path.ends_with("model.rs"));
    }
}
