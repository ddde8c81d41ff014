//! English-language heuristic.

use whatlang::Lang;

/// Texts shorter than this many characters (after trimming) count as English.
const MIN_DETECTABLE_CHARS: usize = 3;

/// Outcome of language detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Detected as English.
    English,
    /// Detected as some other language.
    NonEnglish,
    /// No reliable detection; treated as English.
    Undetermined,
}

impl Language {
    /// Returns true unless the text was detected as non-English.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        !matches!(self, Self::NonEnglish)
    }
}

/// Detects the language of a piece of text.
pub trait LanguageDetector: Send + Sync {
    /// Classifies `text`.
    fn detect(&self, text: &str) -> Language;
}

/// Detector backed by the `whatlang` trigram model.
///
/// Unreliable detections are reported as [`Language::Undetermined`].
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Language {
        match whatlang::detect(text) {
            Some(info) if info.is_reliable() => {
                if info.lang() == Lang::Eng {
                    Language::English
                } else {
                    Language::NonEnglish
                }
            }
            _ => Language::Undetermined,
        }
    }
}

/// Classifies `text`, short-circuiting very short texts to English.
pub fn detect_english(detector: &dyn LanguageDetector, text: &str) -> Language {
    if text.trim().chars().count() < MIN_DETECTABLE_CHARS {
        return Language::English;
    }
    detector.detect(text)
}
