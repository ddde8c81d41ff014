//! Repository mining pipeline.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use diffharvest_commit::{Commit, DiffEntry, Record};
use diffharvest_config::Config;
use diffharvest_git::Repository;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, warn};

use crate::builder::build_record;
use crate::filter::DiffFilter;
use crate::language::{LanguageDetector, WhatlangDetector};
use crate::selector::CommitSelector;
use crate::{CoreError, CoreResult};

/// Skip reason for diffs whose post-change content is empty once cleaned.
const EMPTY_AFTER_CLEANING: &str = "empty-after-cleaning";

/// Per-repository counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoSummary {
    /// Commits reachable from HEAD.
    pub commits_total: usize,
    /// Commits kept by sampling.
    pub commits_sampled: usize,
    /// Sampled commits that passed every commit gate.
    pub commits_accepted: usize,
    /// File-level diffs examined.
    pub diffs_seen: usize,
    /// Diffs that could not be read.
    pub diffs_failed: usize,
    /// Records emitted.
    pub records: usize,
    /// Rejected commits and diffs, keyed by reason.
    pub skipped: BTreeMap<&'static str, usize>,
}

impl RepoSummary {
    fn skip(&mut self, reason: &'static str) {
        *self.skipped.entry(reason).or_default() += 1;
    }
}

/// Records mined from one repository.
#[derive(Debug, Clone)]
pub struct MinedRepository {
    /// Repository directory name.
    pub name: String,
    /// Records in emission order.
    pub records: Vec<Record>,
    /// Counters collected while mining.
    pub summary: RepoSummary,
}

/// Runs selection, filtering and record building over repositories.
pub struct Miner {
    selector: CommitSelector,
    filter: DiffFilter,
    detector: Box<dyn LanguageDetector>,
    rng: StdRng,
}

impl Miner {
    /// Creates a miner from configuration.
    ///
    /// Sampling is reproducible when `selector.seed` is set.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let rng = match config.selector.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Self {
            selector: CommitSelector::new(&config.selector),
            filter: DiffFilter::new(&config.filter),
            detector: Box::new(WhatlangDetector),
            rng,
        }
    }

    /// Replaces the language detector.
    #[must_use]
    pub fn with_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Mines a single repository checkout.
    ///
    /// Unreadable commits and diffs are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or its history
    /// cannot be walked.
    pub fn mine_repository(&mut self, path: impl AsRef<Path>) -> CoreResult<MinedRepository> {
        let repo = Repository::open(path.as_ref())?;
        let name = repo.name();
        let mut summary = RepoSummary::default();

        let commits = repo.commits()?;
        summary.commits_total = commits.len();
        let sampled = self.selector.sample(commits, &mut self.rng);
        summary.commits_sampled = sampled.len();

        let mut records = Vec::new();
        for commit in &sampled {
            if let Err(rejection) = self.selector.check(commit, self.detector.as_ref()) {
                debug!(
                    repo = %name,
                    hash = %commit.short_hash(),
                    reason = rejection.reason(),
                    "skipping commit"
                );
                summary.skip(rejection.reason());
                continue;
            }
            summary.commits_accepted += 1;

            let diffs = match repo.diffs(commit) {
                Ok(diffs) => diffs,
                Err(e) => {
                    warn!(repo = %name, hash = %commit.short_hash(), error = %e, "failed to diff commit");
                    continue;
                }
            };

            for diff in diffs {
                summary.diffs_seen += 1;
                let mut diff = match diff {
                    Ok(diff) => diff,
                    Err(e) => {
                        warn!(repo = %name, hash = %commit.short_hash(), error = %e, "failed to read diff");
                        summary.diffs_failed += 1;
                        continue;
                    }
                };

                if let Err(rejection) = self.filter.check_change(&diff, self.detector.as_ref()) {
                    skip_diff(&mut summary, &name, commit, &diff, rejection.reason());
                    continue;
                }

                if let Err(e) = repo.load_contents(&mut diff) {
                    warn!(
                        repo = %name,
                        hash = %commit.short_hash(),
                        file = diff.file_name(),
                        error = %e,
                        "failed to read file contents"
                    );
                    summary.diffs_failed += 1;
                    continue;
                }

                if let Err(rejection) = self.filter.check_content(&diff) {
                    skip_diff(&mut summary, &name, commit, &diff, rejection.reason());
                    continue;
                }

                match build_record(&name, commit, &diff) {
                    Some(record) => records.push(record),
                    None => skip_diff(&mut summary, &name, commit, &diff, EMPTY_AFTER_CLEANING),
                }
            }
        }
        summary.records = records.len();

        info!(
            repo = %name,
            commits = summary.commits_total,
            sampled = summary.commits_sampled,
            accepted = summary.commits_accepted,
            diffs = summary.diffs_seen,
            failed = summary.diffs_failed,
            records = summary.records,
            "mined repository"
        );
        if !summary.skipped.is_empty() {
            debug!(repo = %name, skipped = ?summary.skipped, "skip reasons");
        }

        Ok(MinedRepository {
            name,
            records,
            summary,
        })
    }

    /// Mines every repository checkout under `dir`, in name order.
    ///
    /// A repository that fails is logged and does not stop the run.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be listed.
    pub fn mine_directory(&mut self, dir: impl AsRef<Path>) -> CoreResult<Vec<Record>> {
        let repositories = discover_repositories(dir.as_ref())?;
        info!(count = repositories.len(), "found repositories");

        let mut records = Vec::new();
        for path in repositories {
            match self.mine_repository(&path) {
                Ok(mined) => records.extend(mined.records),
                Err(e) => error!(?path, error = %e, "failed to mine repository"),
            }
        }

        Ok(records)
    }
}

fn skip_diff(
    summary: &mut RepoSummary,
    repo: &str,
    commit: &Commit,
    diff: &DiffEntry,
    reason: &'static str,
) {
    debug!(
        repo,
        hash = %commit.short_hash(),
        file = diff.file_name(),
        reason,
        "skipping diff"
    );
    summary.skip(reason);
}

/// Lists the subdirectories of `dir` that contain a `.git` entry, sorted.
///
/// # Errors
///
/// Returns [`CoreError::ReadInput`] if `dir` cannot be listed.
pub fn discover_repositories(dir: impl AsRef<Path>) -> CoreResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let read_error = |source| CoreError::ReadInput {
        path: dir.to_path_buf(),
        source,
    };

    let mut repositories = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_dir() && path.join(".git").exists() {
            repositories.push(path);
        }
    }
    repositories.sort();

    Ok(repositories)
}
