//! Commit selection.

use diffharvest_commit::Commit;
use diffharvest_config::SelectorConfig;
use rand::Rng;
use rand::seq::index;

use crate::language::{LanguageDetector, detect_english};

/// Why a commit was not selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitRejection {
    /// The message mentions a merge.
    MergeMessage,
    /// The commit has no parent.
    Root,
    /// The commit has more than one parent.
    MultipleParents,
    /// The message has fewer words than allowed.
    TooFewWords(usize),
    /// The message has more words than allowed.
    TooManyWords(usize),
    /// The message was detected as non-English.
    NonEnglish,
}

impl CommitRejection {
    /// Short label used in logs and summaries.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::MergeMessage => "merge-message",
            Self::Root => "root",
            Self::MultipleParents => "multiple-parents",
            Self::TooFewWords(_) => "too-few-words",
            Self::TooManyWords(_) => "too-many-words",
            Self::NonEnglish => "non-english",
        }
    }
}

/// Samples commits from a history and decides which ones to mine.
#[derive(Debug, Clone)]
pub struct CommitSelector {
    max_commits: usize,
    min_words: usize,
    max_words: usize,
}

impl CommitSelector {
    /// Creates a selector from configuration.
    #[must_use]
    pub fn new(config: &SelectorConfig) -> Self {
        Self {
            max_commits: config.max_commits,
            min_words: config.min_words,
            max_words: config.max_words,
        }
    }

    /// Picks at most `max_commits` commits uniformly at random.
    ///
    /// Histories at or under the cap are returned whole. The sample keeps
    /// the relative order of the input.
    pub fn sample<R: Rng + ?Sized>(&self, commits: Vec<Commit>, rng: &mut R) -> Vec<Commit> {
        if commits.len() <= self.max_commits {
            return commits;
        }

        let mut picked = index::sample(rng, commits.len(), self.max_commits).into_vec();
        picked.sort_unstable();
        let mut picked = picked.into_iter().peekable();

        commits
            .into_iter()
            .enumerate()
            .filter_map(|(idx, commit)| picked.next_if_eq(&idx).map(|_| commit))
            .collect()
    }

    /// Runs the acceptance gates in order; the first failing gate wins.
    ///
    /// # Errors
    ///
    /// Returns the [`CommitRejection`] of the first gate that fails.
    pub fn check(
        &self,
        commit: &Commit,
        detector: &dyn LanguageDetector,
    ) -> Result<(), CommitRejection> {
        let message = commit.trimmed_message();

        if message.to_lowercase().contains("merge") {
            return Err(CommitRejection::MergeMessage);
        }
        if commit.is_root() {
            return Err(CommitRejection::Root);
        }
        if commit.is_merge() {
            return Err(CommitRejection::MultipleParents);
        }

        let words = commit.word_count();
        if words < self.min_words {
            return Err(CommitRejection::TooFewWords(words));
        }
        if words > self.max_words {
            return Err(CommitRejection::TooManyWords(words));
        }

        if !detect_english(detector, message).is_accepted() {
            return Err(CommitRejection::NonEnglish);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Fixed(Language);

    impl LanguageDetector for Fixed {
        fn detect(&self, _text: &str) -> Language {
            self.0
        }
    }

    fn selector() -> CommitSelector {
        CommitSelector::new(&SelectorConfig::default())
    }

    fn commit(message: &str, parents: usize) -> Commit {
        Commit::new(
            "abc1234567890",
            message,
            (0..parents).map(|i| format!("parent{i}")).collect(),
        )
    }

    fn history(len: usize) -> Vec<Commit> {
        (0..len)
            .map(|i| Commit::new(format!("{i:040}"), "msg", vec![]))
            .collect()
    }

    #[test]
    fn test_sample_small_history_kept_whole() {
        let mut rng = StdRng::seed_from_u64(7);
        let commits = history(50);
        let sampled = selector().sample(commits.clone(), &mut rng);
        assert_eq!(sampled, commits);
    }

    #[test]
    fn test_sample_large_history_capped() {
        let mut rng = StdRng::seed_from_u64(7);
        let sampled = selector().sample(history(200), &mut rng);
        assert_eq!(sampled.len(), 50);

        let mut hashes: Vec<_> = sampled.iter().map(|c| c.hash.clone()).collect();
        let mut sorted = hashes.clone();
        sorted.sort();
        hashes.dedup();
        assert_eq!(hashes.len(), 50, "sample must not repeat commits");
        assert_eq!(hashes, sorted, "sample keeps history order");
    }

    #[test]
    fn test_sample_is_reproducible_with_seed() {
        let first = selector().sample(history(120), &mut StdRng::seed_from_u64(42));
        let second = selector().sample(history(120), &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_check_accepts_regular_commit() {
        let result = selector().check(
            &commit("Fix a subtle bug in parser edge cases", 1),
            &Fixed(Language::English),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_check_rejects_merge_message() {
        let result = selector().check(
            &commit("Merge pull request 12 from fork/feature branch", 1),
            &Fixed(Language::English),
        );
        assert_eq!(result, Err(CommitRejection::MergeMessage));
    }

    #[test]
    fn test_check_rejects_merge_substring_case_insensitive() {
        let result = selector().check(
            &commit("Avoid eMERGEncy shutdown when the cache is cold", 1),
            &Fixed(Language::English),
        );
        assert_eq!(result, Err(CommitRejection::MergeMessage));
    }

    #[test]
    fn test_check_rejects_root() {
        let result = selector().check(
            &commit("Initial import of the project sources", 0),
            &Fixed(Language::English),
        );
        assert_eq!(result, Err(CommitRejection::Root));
    }

    #[test]
    fn test_check_rejects_multiple_parents() {
        let result = selector().check(
            &commit("Bring the feature branch into the mainline", 2),
            &Fixed(Language::English),
        );
        assert_eq!(result, Err(CommitRejection::MultipleParents));
    }

    #[test]
    fn test_check_word_bounds() {
        let english = Fixed(Language::English);

        let four = commit("one two three four", 1);
        assert_eq!(
            selector().check(&four, &english),
            Err(CommitRejection::TooFewWords(4))
        );

        let five = commit("one two three four five", 1);
        assert_eq!(selector().check(&five, &english), Ok(()));

        let at_max = commit(&vec!["word"; 150].join(" "), 1);
        assert_eq!(selector().check(&at_max, &english), Ok(()));

        let over_max = commit(&vec!["word"; 151].join(" "), 1);
        assert_eq!(
            selector().check(&over_max, &english),
            Err(CommitRejection::TooManyWords(151))
        );
    }

    #[test]
    fn test_check_rejects_non_english() {
        let result = selector().check(
            &commit("Corrige un error sutil en el analizador", 1),
            &Fixed(Language::NonEnglish),
        );
        assert_eq!(result, Err(CommitRejection::NonEnglish));
    }

    #[test]
    fn test_check_undetermined_passes() {
        let result = selector().check(
            &commit("Fix a subtle bug in parser edge cases", 1),
            &Fixed(Language::Undetermined),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(CommitRejection::Root.reason(), "root");
        assert_eq!(CommitRejection::TooFewWords(1).reason(), "too-few-words");
    }
}
