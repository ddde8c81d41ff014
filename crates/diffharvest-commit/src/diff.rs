//! File-level diff between a commit and its first parent.

use std::path::Path;

/// One file-level change between a commit and its first parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffEntry {
    /// Path before the change (absent for added files).
    pub old_path: Option<String>,

    /// Path after the change (absent for deleted files).
    pub new_path: Option<String>,

    /// Blob id of the file before the change.
    pub old_blob: Option<String>,

    /// Blob id of the file after the change (absent for deletions and submodules).
    pub new_blob: Option<String>,

    /// File content before the change, once loaded.
    pub old_content: Option<String>,

    /// File content after the change, once loaded.
    pub new_content: Option<String>,

    /// Unified diff body (hunk headers and lines).
    pub patch: String,
}

impl DiffEntry {
    /// Returns the resolved file name: the new path, else the old path.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.new_path
            .as_deref()
            .or(self.old_path.as_deref())
            .unwrap_or("")
    }

    /// Returns the lowercased extension of the file name, without the dot.
    ///
    /// Dotfiles such as `.bashrc` have no extension.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        Path::new(self.file_name())
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(str::to_ascii_lowercase)
    }

    /// Returns the number of newline characters in the diff body.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.patch.matches('\n').count()
    }

    /// Returns the content before the change, or an empty string.
    #[must_use]
    pub fn old_text(&self) -> &str {
        self.old_content.as_deref().unwrap_or("")
    }

    /// Returns the content after the change, or an empty string.
    #[must_use]
    pub fn new_text(&self) -> &str {
        self.new_content.as_deref().unwrap_or("")
    }

    /// Returns true if the post-change content is present and not blank.
    #[must_use]
    pub fn has_new_content(&self) -> bool {
        !self.new_text().trim().is_empty()
    }
}
