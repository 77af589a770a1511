//! Context-aware ordering of synonym candidates.
use hashbrown::HashSet;
use itertools::Itertools;
use smol_str::SmolStr;

use crate::config::CorrectorConfig;
use crate::distance::levenshtein;
use crate::thesaurus::Thesaurus;

/// Orders a misspelled word's synonyms by how well they fit the words
/// around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionRanker {
    max_suggestions: usize,
    context_radius: usize,
}

impl Default for SuggestionRanker {
    fn default() -> Self {
        SuggestionRanker::new()
    }
}

impl SuggestionRanker {
    /// Five suggestions, two context words either side.
    pub const fn new() -> SuggestionRanker {
        SuggestionRanker {
            max_suggestions: 5,
            context_radius: 2,
        }
    }

    /// Limits taken from the configuration.
    pub fn from_config(config: &CorrectorConfig) -> SuggestionRanker {
        SuggestionRanker {
            max_suggestions: config.max_suggestions,
            context_radius: config.context_radius,
        }
    }

    /// Sets the maximum number of results.
    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> SuggestionRanker {
        self.max_suggestions = max_suggestions;
        self
    }

    /// Sets the number of context words taken on each side.
    pub fn with_context_radius(mut self, context_radius: usize) -> SuggestionRanker {
        self.context_radius = context_radius;
        self
    }

    /// Up to `context_radius` words either side of `index`, clamped to the
    /// slice, never including the word at `index` itself.
    pub fn context<'a, S: AsRef<str>>(&self, words: &'a [S], index: usize) -> Vec<&'a str> {
        let start = index.saturating_sub(self.context_radius);
        let end = words.len().min(index + self.context_radius + 1);

        (start..end)
            .filter(|&i| i != index)
            .map(|i| words[i].as_ref())
            .collect()
    }

    /// Ranks replacements for `words[index]` using its neighbours as context.
    pub fn rank<S: AsRef<str>>(
        &self,
        thesaurus: &mut Thesaurus,
        words: &[S],
        index: usize,
    ) -> Vec<SmolStr> {
        let target = match words.get(index) {
            Some(v) => v.as_ref(),
            None => return vec![],
        };

        let context = self.context(words, index);
        self.rank_with_context(thesaurus, target, &context)
    }

    /// Synonyms of `target`, ordered by how many context words list the same
    /// word among their own synonyms, under any part of speech, then by
    /// spelling distance to `target`.
    pub fn rank_with_context<S: AsRef<str>>(
        &self,
        thesaurus: &mut Thesaurus,
        target: &str,
        context: &[S],
    ) -> Vec<SmolStr> {
        let candidates = thesaurus.synonyms(target, None);

        if candidates.is_empty() {
            return vec![];
        }

        // overlap is by spelling: each headword tags its edges with its own
        // part of speech, so "fast" under `car|n` and `quick|adj` differ
        let context_sets: Vec<HashSet<SmolStr>> = context
            .iter()
            .map(|word| {
                thesaurus
                    .synonyms(word.as_ref(), None)
                    .into_iter()
                    .map(|entry| entry.text)
                    .collect()
            })
            .collect();

        let mut scored: Vec<(usize, usize, SmolStr)> = candidates
            .into_iter()
            .map(|candidate| {
                let score = context_sets
                    .iter()
                    .filter(|set| set.contains(&candidate.text))
                    .count();
                let distance = levenshtein(target, &candidate.text);
                (score, distance, candidate.text)
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        log::trace!("Ranked candidates for '{}': {:?}", target, scored);

        scored
            .into_iter()
            .map(|(_, _, text)| text)
            .unique()
            .take(self.max_suggestions)
            .collect()
    }
}
