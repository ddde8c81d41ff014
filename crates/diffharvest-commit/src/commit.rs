//! Commit type as retrieved from Git.

/// A commit as retrieved from Git.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The full commit hash (SHA).
    pub hash: String,

    /// The full commit message (subject + body).
    pub message: String,

    /// Hashes of the parent commits, first parent first.
    pub parents: Vec<String>,
}

impl Commit {
    /// Creates a new commit.
    #[must_use]
    pub fn new(hash: impl Into<String>, message: impl Into<String>, parents: Vec<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
            parents,
        }
    }

    /// Returns the message with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_message(&self) -> &str {
        self.message.trim()
    }

    /// Returns the number of whitespace-separated words in the message.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.message.split_whitespace().count()
    }

    /// Returns true if the commit has no parent.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns true if the commit has more than one parent.
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Returns the short hash (first 7 characters).
    #[must_use]
    pub fn short_hash(&self) -> &str {
        &self.hash[..7.min(self.hash.len())]
    }
}
