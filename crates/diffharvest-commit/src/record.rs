//! Output record type.

use serde::{Deserialize, Serialize};

/// A cleaned change example, one per surviving file-level diff.
///
/// Field names are the serialized keys of the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Name of the repository directory the commit came from.
    pub repo_name: String,

    /// Cleaned path of the changed file.
    pub file_name: String,

    /// Cleaned unified diff body.
    pub diff: String,

    /// Cleaned commit message.
    pub commit_message: String,

    /// Cleaned file content before the change.
    pub before_code: String,

    /// Cleaned file content after the change.
    pub after_code: String,

    /// Full commit hash.
    pub commit_id: String,
}

impl Record {
    /// Creates a new record builder.
    #[must_use]
    pub fn builder(repo_name: impl Into<String>, commit_id: impl Into<String>) -> RecordBuilder {
        RecordBuilder::new(repo_name, commit_id)
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder {
    repo_name: String,
    commit_id: String,
    file_name: String,
    diff: String,
    commit_message: String,
    before_code: String,
    after_code: String,
}

impl RecordBuilder {
    /// Creates a new builder with required fields.
    fn new(repo_name: impl Into<String>, commit_id: impl Into<String>) -> Self {
        Self {
            repo_name: repo_name.into(),
            commit_id: commit_id.into(),
            file_name: String::new(),
            diff: String::new(),
            commit_message: String::new(),
            before_code: String::new(),
            after_code: String::new(),
        }
    }

    /// Sets the file name.
    #[must_use]
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Sets the diff body.
    #[must_use]
    pub fn diff(mut self, diff: impl Into<String>) -> Self {
        self.diff = diff.into();
        self
    }

    /// Sets the commit message.
    #[must_use]
    pub fn commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = message.into();
        self
    }

    /// Sets the content before the change.
    #[must_use]
    pub fn before_code(mut self, code: impl Into<String>) -> Self {
        self.before_code = code.into();
        self
    }

    /// Sets the content after the change.
    #[must_use]
    pub fn after_code(mut self, code: impl Into<String>) -> Self {
        self.after_code = code.into();
        self
    }

    /// Builds the [`Record`].
    #[must_use]
    pub fn build(self) -> Record {
        Record {
            repo_name: self.repo_name,
            file_name: self.file_name,
            diff: self.diff,
            commit_message: self.commit_message,
            before_code: self.before_code,
            after_code: self.after_code,
            commit_id: self.commit_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let record = Record::builder("flask", "abc123")
            .file_name("src/app.py")
            .diff("@@ -1 +1 @@\\n-a\\n+b")
            .commit_message("Fix a subtle bug in parser edge cases")
            .before_code("a")
            .after_code("b")
            .build();

        assert_eq!(record.repo_name, "flask");
        assert_eq!(record.commit_id, "abc123");
        assert_eq!(record.file_name, "src/app.py");
        assert_eq!(record.before_code, "a");
        assert_eq!(record.after_code, "b");
    }

    #[test]
    fn test_builder_defaults_empty() {
        let record = Record::builder("repo", "id").build();
        assert!(record.file_name.is_empty());
        assert!(record.diff.is_empty());
        assert!(record.before_code.is_empty());
    }

    #[test]
    fn test_serialized_keys() {
        let record = Record::builder("repo", "id").after_code("x").build();
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "repo_name",
            "file_name",
            "diff",
            "commit_message",
            "before_code",
            "after_code",
            "commit_id",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(object.len(), 7);
    }
}
