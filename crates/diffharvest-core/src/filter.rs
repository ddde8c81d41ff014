//! File-level diff filtering.

use std::collections::HashSet;

use diffharvest_commit::DiffEntry;
use diffharvest_config::FilterConfig;

use crate::language::{LanguageDetector, detect_english};
use crate::text::is_binary;

/// Why a diff was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRejection {
    /// The diff body has more lines than allowed.
    TooManyLines(usize),
    /// The file extension is missing or not whitelisted.
    Extension(Option<String>),
    /// The file name was detected as non-English.
    NonEnglishName,
    /// The post-change content is missing or blank.
    MissingContent,
    /// The sampled text looks binary.
    Binary,
}

impl DiffRejection {
    /// Short label used in logs and summaries.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::TooManyLines(_) => "too-many-lines",
            Self::Extension(_) => "extension",
            Self::NonEnglishName => "non-english-name",
            Self::MissingContent => "missing-content",
            Self::Binary => "binary",
        }
    }
}

/// Decides which file-level diffs become records.
#[derive(Debug, Clone)]
pub struct DiffFilter {
    max_lines: usize,
    extensions: HashSet<String>,
    min_printable_ratio: f64,
    sample_chars: usize,
}

impl DiffFilter {
    /// Creates a filter from configuration.
    ///
    /// Extensions are matched case-insensitively, with or without a leading dot.
    #[must_use]
    pub fn new(config: &FilterConfig) -> Self {
        let extensions = config
            .extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        Self {
            max_lines: config.max_diff_lines,
            extensions,
            min_printable_ratio: config.min_printable_ratio,
            sample_chars: config.sample_chars,
        }
    }

    /// Runs the gates that need only the paths and the diff body.
    ///
    /// # Errors
    ///
    /// Returns the [`DiffRejection`] of the first gate that fails.
    pub fn check_change(
        &self,
        diff: &DiffEntry,
        detector: &dyn LanguageDetector,
    ) -> Result<(), DiffRejection> {
        let lines = diff.line_count();
        if lines > self.max_lines {
            return Err(DiffRejection::TooManyLines(lines));
        }

        let extension = diff.extension();
        if !extension
            .as_ref()
            .is_some_and(|ext| self.extensions.contains(ext))
        {
            return Err(DiffRejection::Extension(extension));
        }

        let file_name = diff.file_name();
        if !file_name.is_empty() && !detect_english(detector, file_name).is_accepted() {
            return Err(DiffRejection::NonEnglishName);
        }

        Ok(())
    }

    /// Runs the gates on the loaded file contents.
    ///
    /// # Errors
    ///
    /// Returns the [`DiffRejection`] of the first gate that fails.
    pub fn check_content(&self, diff: &DiffEntry) -> Result<(), DiffRejection> {
        if !diff.has_new_content() {
            return Err(DiffRejection::MissingContent);
        }

        if is_binary(&self.binary_sample(diff), self.min_printable_ratio) {
            return Err(DiffRejection::Binary);
        }

        Ok(())
    }

    /// Concatenates the leading characters of the old content, new content
    /// and diff body.
    #[must_use]
    pub fn binary_sample(&self, diff: &DiffEntry) -> String {
        [diff.old_text(), diff.new_text(), diff.patch.as_str()]
            .iter()
            .flat_map(|text| text.chars().take(self.sample_chars))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    struct Fixed(Language);

    impl LanguageDetector for Fixed {
        fn detect(&self, _text: &str) -> Language {
            self.0
        }
    }

    const ENGLISH: Fixed = Fixed(Language::English);

    fn filter() -> DiffFilter {
        DiffFilter::new(&FilterConfig::default())
    }

    fn patch_with_lines(lines: usize) -> String {
        let mut patch = String::from("@@ -1,1 +1,1 @@\n");
        for i in 1..lines {
            patch.push_str(&format!("+line {i}\n"));
        }
        patch
    }

    fn entry(path: &str, after: Option<&str>, lines: usize) -> DiffEntry {
        DiffEntry {
            old_path: Some(path.to_string()),
            new_path: Some(path.to_string()),
            old_content: Some("x = 1\n".to_string()),
            new_content: after.map(String::from),
            patch: patch_with_lines(lines),
            ..DiffEntry::default()
        }
    }

    fn check(
        filter: &DiffFilter,
        diff: &DiffEntry,
        detector: &dyn LanguageDetector,
    ) -> Result<(), DiffRejection> {
        filter.check_change(diff, detector)?;
        filter.check_content(diff)
    }

    #[test]
    fn test_accepts_small_python_diff() {
        let diff = entry("parser.py", Some("x = 2\n"), 10);
        assert_eq!(check(&filter(), &diff, &ENGLISH), Ok(()));
    }

    #[test]
    fn test_line_limit_is_inclusive() {
        let at_limit = entry("parser.py", Some("x = 2\n"), 20);
        assert_eq!(at_limit.line_count(), 20);
        assert_eq!(check(&filter(), &at_limit, &ENGLISH), Ok(()));

        let over = entry("parser.py", Some("x = 2\n"), 21);
        assert_eq!(
            check(&filter(), &over, &ENGLISH),
            Err(DiffRejection::TooManyLines(21))
        );
    }

    #[test]
    fn test_rejects_unlisted_extension() {
        let diff = entry("main.rs", Some("fn main() {}\n"), 3);
        assert_eq!(
            check(&filter(), &diff, &ENGLISH),
            Err(DiffRejection::Extension(Some("rs".to_string())))
        );
    }

    #[test]
    fn test_rejects_missing_extension() {
        let diff = entry("Makefile", Some("all:\n"), 3);
        assert_eq!(
            check(&filter(), &diff, &ENGLISH),
            Err(DiffRejection::Extension(None))
        );
    }

    #[test]
    fn test_extension_case_insensitive() {
        let diff = entry("CONFIG.YML", Some("a: 1\n"), 3);
        assert_eq!(check(&filter(), &diff, &ENGLISH), Ok(()));
    }

    #[test]
    fn test_configured_extensions_normalized() {
        let config = FilterConfig {
            extensions: vec![".RS".to_string()],
            ..FilterConfig::default()
        };
        let diff = entry("lib.rs", Some("pub fn f() {}\n"), 3);
        assert_eq!(check(&DiffFilter::new(&config), &diff, &ENGLISH), Ok(()));
    }

    #[test]
    fn test_rejects_non_english_name() {
        let diff = entry("analizador.py", Some("x = 2\n"), 3);
        assert_eq!(
            check(&filter(), &diff, &Fixed(Language::NonEnglish)),
            Err(DiffRejection::NonEnglishName)
        );
    }

    #[test]
    fn test_undetermined_name_passes() {
        let diff = entry("parser.py", Some("x = 2\n"), 3);
        assert_eq!(check(&filter(), &diff, &Fixed(Language::Undetermined)), Ok(()));
    }

    #[test]
    fn test_rejects_missing_after_content() {
        let diff = entry("parser.py", None, 3);
        assert_eq!(
            check(&filter(), &diff, &ENGLISH),
            Err(DiffRejection::MissingContent)
        );
    }

    #[test]
    fn test_rejects_blank_after_content() {
        let diff = entry("notes.txt", Some(" \n\t\n"), 3);
        assert_eq!(
            check(&filter(), &diff, &ENGLISH),
            Err(DiffRejection::MissingContent)
        );
    }

    #[test]
    fn test_rejects_binary_looking_content() {
        let garbage: String = std::iter::repeat_n('\u{0}', 200).collect();
        let diff = entry("data.txt", Some(&format!("ok{garbage}")), 3);
        assert_eq!(check(&filter(), &diff, &ENGLISH), Err(DiffRejection::Binary));
    }

    #[test]
    fn test_change_gates_ignore_contents() {
        let diff = DiffEntry {
            new_path: Some("notes.txt".to_string()),
            patch: patch_with_lines(2),
            ..DiffEntry::default()
        };
        assert_eq!(filter().check_change(&diff, &ENGLISH), Ok(()));
        assert_eq!(
            filter().check_content(&diff),
            Err(DiffRejection::MissingContent)
        );
    }

    #[test]
    fn test_binary_sample_takes_prefixes() {
        let config = FilterConfig {
            sample_chars: 3,
            ..FilterConfig::default()
        };
        let diff = DiffEntry {
            old_content: Some("abcdef".to_string()),
            new_content: Some("ghijkl".to_string()),
            patch: "mnopqr".to_string(),
            ..DiffEntry::default()
        };
        assert_eq!(DiffFilter::new(&config).binary_sample(&diff), "abcghimno");
    }

    #[test]
    fn test_binary_sample_ignores_tail_garbage() {
        let mut after = "y = 2\n".repeat(100);
        after.push_str(&"\u{0}".repeat(400));
        let diff = entry("parser.py", Some(&after), 3);
        assert_eq!(check(&filter(), &diff, &ENGLISH), Ok(()));
    }
}
