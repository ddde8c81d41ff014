//! Git repository wrapper.

use std::path::Path;

use diffharvest_commit::{Commit, DiffEntry};
use git2::{
    Delta, Diff, DiffFile, DiffFindOptions, DiffOptions, FileMode, Oid, Patch,
    Repository as Git2Repo,
};
use tracing::debug;

use crate::{GitError, GitResult};

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Opens a repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid Git repository.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner = Git2Repo::open(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Clones the repository at `url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the clone fails.
    pub fn clone_from(url: &str, dest: impl AsRef<Path>) -> GitResult<Self> {
        let dest = dest.as_ref();
        debug!(url, ?dest, "cloning repository");
        let inner = Git2Repo::clone(url, dest).map_err(|source| GitError::Clone {
            url: url.to_string(),
            source,
        })?;
        Ok(Self { inner })
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Returns the name of the repository directory.
    #[must_use]
    pub fn name(&self) -> String {
        self.path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Returns every commit reachable from HEAD, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD cannot be resolved or history cannot be walked.
    pub fn commits(&self) -> GitResult<Vec<Commit>> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.push_head()?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.inner.find_commit(oid)?;

            let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
            let parents = commit.parent_ids().map(|id| id.to_string()).collect();

            commits.push(Commit::new(oid.to_string(), message, parents));
        }

        Ok(commits)
    }

    /// Computes the file-level diffs of `commit` against its first parent.
    ///
    /// A root commit is diffed against the empty tree. Each entry is
    /// resolved on its own so that one unreadable file does not hide the
    /// others. File contents are not read here; see
    /// [`Repository::load_contents`].
    ///
    /// # Errors
    ///
    /// Returns an error if the commit or its trees cannot be loaded, or the
    /// tree diff cannot be computed.
    pub fn diffs(&self, commit: &Commit) -> GitResult<Vec<GitResult<DiffEntry>>> {
        let oid =
            Oid::from_str(&commit.hash).map_err(|_| GitError::CommitNotFound(commit.hash.clone()))?;
        let git_commit = self
            .inner
            .find_commit(oid)
            .map_err(|_| GitError::CommitNotFound(commit.hash.clone()))?;

        let tree = git_commit.tree()?;
        let parent_tree = if git_commit.parent_count() > 0 {
            Some(git_commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut diff_opts = DiffOptions::new();
        let mut diff =
            self.inner
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut diff_opts))?;

        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        Ok((0..diff.deltas().len())
            .map(|idx| self.diff_entry(&diff, idx))
            .collect())
    }

    fn diff_entry(&self, diff: &Diff<'_>, idx: usize) -> GitResult<DiffEntry> {
        let delta = diff
            .get_delta(idx)
            .ok_or_else(|| git2::Error::from_str("diff delta out of range"))?;

        let old_path = match delta.status() {
            Delta::Added | Delta::Untracked => None,
            _ => path_string(delta.old_file().path()),
        };
        let new_path = match delta.status() {
            Delta::Deleted => None,
            _ => path_string(delta.new_file().path()),
        };

        let patch = match Patch::from_diff(diff, idx)? {
            Some(mut patch) => patch_text(&mut patch)?,
            None => String::new(),
        };

        Ok(DiffEntry {
            old_path,
            new_path,
            old_blob: blob_id(&delta.old_file()),
            new_blob: blob_id(&delta.new_file()),
            patch,
            ..DiffEntry::default()
        })
    }

    /// Reads the before and after contents of `entry` from its blobs.
    ///
    /// # Errors
    ///
    /// Returns an error if a blob cannot be found.
    pub fn load_contents(&self, entry: &mut DiffEntry) -> GitResult<()> {
        entry.old_content = self.blob_text(entry.old_blob.as_deref())?;
        entry.new_content = self.blob_text(entry.new_blob.as_deref())?;
        Ok(())
    }

    fn blob_text(&self, id: Option<&str>) -> GitResult<Option<String>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let blob = self.inner.find_blob(Oid::from_str(id)?)?;
        Ok(Some(decode_utf8_lossy(blob.content())))
    }
}

/// Returns the blob id of one side of a delta.
///
/// Absent sides and submodule entries have no blob.
fn blob_id(file: &DiffFile<'_>) -> Option<String> {
    let id = file.id();
    if id.is_zero() || matches!(file.mode(), FileMode::Commit) {
        return None;
    }
    Some(id.to_string())
}

/// Decodes UTF-8, dropping invalid byte sequences instead of replacing them.
#[must_use]
pub fn decode_utf8_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn path_string(path: Option<&Path>) -> Option<String> {
    path.map(|p| p.to_string_lossy().into_owned())
}

/// Renders the hunks of a patch, without the file header.
fn patch_text(patch: &mut Patch<'_>) -> GitResult<String> {
    let mut buf = Vec::new();
    patch.print(&mut |_delta, _hunk, line| {
        match line.origin() {
            'F' | 'B' => return true,
            '+' => buf.push(b'+'),
            '-' => buf.push(b'-'),
            ' ' => buf.push(b' '),
            _ => {}
        }
        buf.extend_from_slice(line.content());
        true
    })?;
    Ok(decode_utf8_lossy(&buf))
}
