//! Input files grouped per `multi-file-mode`.
//!
//! `single` puts every file in its own group, `all` puts every file in one
//! group and `dir` groups files by parent directory. Directories given as
//! inputs contribute their files, sorted, and their subdirectories too when
//! `recursive-dir-add` is set.

use std::{
    fs,
    path::{self, Path, PathBuf},
};

use tracing::error;

use crate::AppOptions;

/// Ordered file groups keyed by mode-specific text.
#[derive(Debug, Default)]
pub struct FileGroups {
    /// Group key and files, in insertion order.
    groups: Vec<(String, Vec<PathBuf>)>,
    /// Grouping mode.
    mode: String,
    /// Descend into subdirectories.
    recursive: bool,
}

impl FileGroups {
    /// Empty groups following the `multi-file-mode` and `recursive-dir-add` options.
    pub fn new(app: &AppOptions) -> Self {
        Self {
            groups: Vec::new(),
            mode: app.multi_file_mode.clone(),
            recursive: app.recursive_dir_add,
        }
    }

    /// Add a file or directory; returns the index of the last group touched.
    pub fn add(&mut self, input: &Path) -> Option<usize> {
        let path = match path::absolute(input) {
            Ok(p) => p,
            Err(e) => {
                error!("Error adding file: {e}");
                return None;
            }
        };

        if path.is_dir() {
            let mut entries: Vec<PathBuf> = match fs::read_dir(&path) {
                Ok(read) => read
                    .filter_map(Result::ok)
                    .map(|e| e.path())
                    .filter(|p| p.is_file() || (self.recursive && p.is_dir()))
                    .collect(),
                Err(e) => {
                    error!("Error adding file: {e}");
                    return None;
                }
            };
            entries.sort();
            let mut last = None;
            for entry in entries {
                last = self.add(&entry).or(last);
            }
            return last;
        }

        let key = match self.mode.as_str() {
            "all" => String::new(),
            "dir" => path
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            _ => path.to_string_lossy().into_owned(),
        };
        if let Some(index) = self.groups.iter().position(|(k, _)| *k == key) {
            let files = &mut self.groups[index].1;
            if !files.contains(&path) {
                files.push(path);
            }
            return Some(index);
        }
        self.groups.push((key, vec![path]));
        Some(self.groups.len() - 1)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no file was added.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Files of group `index`.
    pub fn get(&self, index: usize) -> Option<&[PathBuf]> {
        self.groups.get(index).map(|(_, files)| files.as_slice())
    }

    /// Drop group `index`.
    pub fn remove(&mut self, index: usize) {
        if index < self.groups.len() {
            self.groups.remove(index);
        }
    }
}
