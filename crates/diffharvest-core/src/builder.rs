//! Record building.

use diffharvest_commit::{Commit, DiffEntry, Record};

use crate::text::clean_text;

/// Builds the output record for a diff that passed the filter.
///
/// Every text field goes through [`clean_text`]; the commit id is kept as is.
/// Returns `None` when nothing of the post-change content survives cleaning.
#[must_use]
pub fn build_record(repo_name: &str, commit: &Commit, diff: &DiffEntry) -> Option<Record> {
    let after_code = clean_text(diff.new_text());
    if after_code.is_empty() {
        return None;
    }

    Some(
        Record::builder(repo_name, commit.hash.as_str())
            .file_name(clean_text(diff.file_name()))
            .diff(clean_text(&diff.patch))
            .commit_message(clean_text(commit.trimmed_message()))
            .before_code(clean_text(diff.old_text()))
            .after_code(after_code)
            .build(),
    )
}
