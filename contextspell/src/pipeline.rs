//! One correction pass over a piece of text.
//!
//! The pipeline splits the text at word boundaries, leaves valid words and
//! separators alone, replaces invalid words with the best ranked synonym or,
//! failing that, the fallback correction, and reports every word it could
//! not resolve as a [`MisspelledRange`] over the corrected output.
use std::time::Instant;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use unic_ucd_category::GeneralCategory;

use crate::config::CorrectorConfig;
use crate::fallback::FallbackCorrector;
use crate::ranker::SuggestionRanker;
use crate::thesaurus::{SharedThesaurus, Thesaurus};
use crate::tokenizer::case_handling::{lower_case, match_case};
use crate::tokenizer::Tokenize;

/// A span of the corrected text, in chars, that is still misspelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MisspelledRange {
    /// first char of the range
    pub start: usize,
    /// length in chars
    pub len: usize,
}

impl MisspelledRange {
    /// One past the last char.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Output of a pipeline run. Ranges are ascending and never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// the corrected text
    pub text: String,
    /// words left unresolved, over `text`
    pub misspelled: Vec<MisspelledRange>,
}

impl Correction {
    /// Whether every word was valid or replaced.
    pub fn is_clean(&self) -> bool {
        self.misspelled.is_empty()
    }

    /// The text under each misspelled range.
    pub fn misspelled_words(&self) -> Vec<String> {
        self.misspelled
            .iter()
            .map(|r| self.text.chars().skip(r.start).take(r.len).collect())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Valid,
    Replaced(SmolStr),
    Unresolved,
}

#[inline(always)]
fn has_letter(word: &str) -> bool {
    word.chars().any(|c| GeneralCategory::of(c).is_letter())
}

/// Checks each word of a text, replaces what it can and reports the rest.
///
/// Cheap to clone: clones share the thesaurus.
#[derive(Debug, Clone)]
pub struct CorrectionPipeline {
    thesaurus: SharedThesaurus,
    ranker: SuggestionRanker,
    fallback: FallbackCorrector,
    use_fallback: bool,
    preserve_case: bool,
}

impl CorrectionPipeline {
    /// Default ranker, fallback enabled, replacements lowercased.
    pub fn new(thesaurus: SharedThesaurus, fallback: FallbackCorrector) -> CorrectionPipeline {
        CorrectionPipeline {
            thesaurus,
            ranker: SuggestionRanker::new(),
            fallback,
            use_fallback: true,
            preserve_case: false,
        }
    }

    /// Ranker, fallback threshold and case handling as configured.
    pub fn from_config(
        thesaurus: SharedThesaurus,
        fallback: FallbackCorrector,
        config: &CorrectorConfig,
    ) -> CorrectionPipeline {
        CorrectionPipeline {
            thesaurus,
            ranker: SuggestionRanker::from_config(config),
            fallback: fallback.with_threshold(config.fallback_threshold),
            use_fallback: config.use_fallback,
            preserve_case: config.preserve_case,
        }
    }

    /// The shared thesaurus this pipeline consults.
    pub fn thesaurus(&self) -> &SharedThesaurus {
        &self.thesaurus
    }

    /// The ranker ordering synonym candidates.
    pub fn ranker(&self) -> &SuggestionRanker {
        &self.ranker
    }

    /// The corrector asked when ranking yields nothing.
    pub fn fallback(&self) -> &FallbackCorrector {
        &self.fallback
    }

    /// Corrects `text`. Holds the thesaurus lock for the whole pass.
    pub fn run(&self, text: &str) -> Correction {
        let started = Instant::now();

        let tokens = text.tokens();
        let words: Vec<&str> = tokens
            .iter()
            .filter(|t| t.is_word)
            .map(|t| t.text)
            .collect();

        let mut thesaurus = self.thesaurus.lock();
        let mut out = String::with_capacity(text.len());
        let mut out_chars = 0usize;
        let mut misspelled = vec![];
        let mut word_index = 0usize;

        for token in tokens.iter() {
            if !token.is_word {
                out.push_str(token.text);
                out_chars += token.text.chars().count();
                continue;
            }

            let index = word_index;
            word_index += 1;

            let emitted: &str = match self.check(&mut thesaurus, &words, index) {
                Outcome::Valid => token.text,
                Outcome::Replaced(replacement) => {
                    out.push_str(&replacement);
                    out_chars += replacement.chars().count();
                    continue;
                }
                Outcome::Unresolved => {
                    let len = token.text.chars().count();
                    misspelled.push(MisspelledRange {
                        start: out_chars,
                        len,
                    });
                    token.text
                }
            };

            out.push_str(emitted);
            out_chars += emitted.chars().count();
        }

        drop(thesaurus);

        log::debug!(
            "Correction pass over {} words took {:?}, {} left misspelled",
            words.len(),
            started.elapsed(),
            misspelled.len()
        );

        Correction {
            text: out,
            misspelled,
        }
    }

    fn check(&self, thesaurus: &mut Thesaurus, words: &[&str], index: usize) -> Outcome {
        let word = words[index];

        if !has_letter(word) || thesaurus.is_valid(word) {
            return Outcome::Valid;
        }

        let replacement = match self.ranker.rank(thesaurus, words, index).into_iter().next() {
            Some(v) => Some(v),
            None if self.use_fallback => {
                let corrected = self.fallback.correct(word);
                if lower_case(&corrected) != lower_case(word) {
                    Some(corrected)
                } else {
                    None
                }
            }
            None => None,
        };

        match replacement {
            Some(v) => {
                log::trace!("Replacing '{}' with '{}'", word, v);
                if self.preserve_case {
                    Outcome::Replaced(match_case(word, &v))
                } else {
                    Outcome::Replaced(v)
                }
            }
            None => Outcome::Unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::CorrectionMap;
    use crate::thesaurus::PartOfSpeech;

    fn pipeline(words: &[&str]) -> CorrectionPipeline {
        let mut t = Thesaurus::new();
        for w in words.iter() {
            t.add_valid_word(w).unwrap();
        }
        CorrectionPipeline::new(
            t.into_shared(),
            FallbackCorrector::new(CorrectionMap::new(vec![("teh", "the")])),
        )
    }

    #[test]
    fn valid_text_is_untouched() {
        let p = pipeline(&["the", "quick", "brown", "fox"]);
        let input = "The quick, brown fox!";

        let first = p.run(input);
        assert_eq!(first.text, input);
        assert!(first.is_clean());

        let second = p.run(&first.text);
        assert_eq!(second, first);
    }

    #[test]
    fn numbers_are_valid() {
        let p = pipeline(&["fox"]);
        let out = p.run("42 fox");
        assert_eq!(out.text, "42 fox");
        assert!(out.is_clean());
    }

    #[test]
    fn ranked_replacement() {
        let p = pipeline(&["the", "fast", "car"]);
        p.thesaurus()
            .lock()
            .add_synonym("quik", "fast", PartOfSpeech::Adjective)
            .unwrap();

        let out = p.run("the quik car");
        assert_eq!(out.text, "the fast car");
        assert!(out.is_clean());
    }

    #[test]
    fn ranges_follow_corrected_text() {
        let p = pipeline(&["fox", "speedy"]);
        p.thesaurus()
            .lock()
            .add_synonym("qk", "speedy", PartOfSpeech::Adjective)
            .unwrap();

        // "qk" grows to "speedy", shifting "zzyzx" right by four chars
        let out = p.run("qk fox zzyzx");
        assert_eq!(out.text, "speedy fox zzyzx");
        assert_eq!(out.misspelled, vec![MisspelledRange { start: 11, len: 5 }]);
        assert_eq!(out.misspelled_words(), vec!["zzyzx"]);
    }

    #[test]
    fn ranges_count_chars() {
        let p = pipeline(&["café"]);
        let out = p.run("café zzyzx");
        assert_eq!(out.misspelled, vec![MisspelledRange { start: 5, len: 5 }]);
    }

    #[test]
    fn fallback_can_be_disabled() {
        let config = CorrectorConfig {
            use_fallback: false,
            ..CorrectorConfig::default()
        };
        let mut t = Thesaurus::new();
        t.add_valid_word("fox").unwrap();
        let p = CorrectionPipeline::from_config(
            t.into_shared(),
            FallbackCorrector::new(CorrectionMap::new(vec![("teh", "the")])),
            &config,
        );

        let out = p.run("teh fox");
        assert_eq!(out.text, "teh fox");
        assert_eq!(out.misspelled, vec![MisspelledRange { start: 0, len: 3 }]);
    }

    #[test]
    fn case_preserved_when_asked() {
        let config = CorrectorConfig {
            preserve_case: true,
            ..CorrectorConfig::default()
        };
        let mut t = Thesaurus::new();
        t.add_valid_word("fox").unwrap();
        let p = CorrectionPipeline::from_config(
            t.into_shared(),
            FallbackCorrector::new(CorrectionMap::new(vec![("teh", "the")])),
            &config,
        );

        assert_eq!(p.run("Teh fox").text, "The fox");
    }

    #[test]
    fn empty_input() {
        let p = pipeline(&[]);
        assert_eq!(p.run(""), Correction::default());
    }
}
