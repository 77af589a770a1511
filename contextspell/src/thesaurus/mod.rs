//! Synonym and word-validity knowledge base.
//!
//! The [`Thesaurus`] owns a symmetric synonym index keyed by lowercase word
//! or phrase, the set of correctly spelled words, a session-local custom
//! dictionary and a bounded cache of filtered synonym lists. Every entry
//! returned from a lookup has its usage counter bumped; the cache uses those
//! counters to decide what to evict.
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::config::CorrectorConfig;
use crate::error::ThesaurusError;
use crate::tokenizer::case_handling::lower_case;

/// Bounded suggestion cache.
pub mod cache;
/// Session-local custom dictionary.
pub mod custom;
/// JSON snapshots of the index.
pub mod export;
/// Inflected forms for dictionary flags.
pub mod inflect;
mod loader;

use self::cache::{SuggestionCache, DEFAULT_CACHE_CAPACITY};
use self::custom::CustomDictionary;
pub use self::loader::LoadStats;

/// A thesaurus shared between the pipeline, the debounce worker and the
/// caller. All cache updates and index mutations happen under the lock.
pub type SharedThesaurus = Arc<Mutex<Thesaurus>>;

/// Grammatical category a synonym relation is recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartOfSpeech {
    /// `n`
    Noun,
    /// `v`
    Verb,
    /// `adj`
    Adjective,
    /// `adv`
    Adverb,
    /// any other tag
    Other,
}

impl PartOfSpeech {
    /// Parses the tag of a thesaurus headword line (`n`, `v`, `adj`, `adv`)
    /// or its spelled-out name. Anything else is `Other`.
    pub fn from_abbrev(tag: &str) -> PartOfSpeech {
        match tag.trim().to_lowercase().as_str() {
            "n" | "noun" => PartOfSpeech::Noun,
            "v" | "verb" => PartOfSpeech::Verb,
            "adj" | "adjective" => PartOfSpeech::Adjective,
            "adv" | "adverb" => PartOfSpeech::Adverb,
            _ => PartOfSpeech::Other,
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Other => "other",
        };
        f.write_str(s)
    }
}

/// A synonym candidate.
///
/// Two entries are the same entry when text and part of speech match; the
/// usage counter is bookkeeping and takes no part in equality or hashing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WordEntry {
    /// the word or phrase
    pub text: SmolStr,
    /// part of speech the synonym relation was recorded under
    pub part_of_speech: PartOfSpeech,
    /// number of times this entry has been returned from a lookup
    pub usage_frequency: u64,
}

impl WordEntry {
    /// An entry that has not been used yet.
    pub fn new(text: SmolStr, part_of_speech: PartOfSpeech) -> WordEntry {
        WordEntry {
            text,
            part_of_speech,
            usage_frequency: 0,
        }
    }

    /// The word or phrase.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl PartialEq for WordEntry {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.part_of_speech == other.part_of_speech
    }
}

impl Eq for WordEntry {}

impl Hash for WordEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.part_of_speech.hash(state);
    }
}

/// Trims and lowercases a word, rejecting empty input.
pub(crate) fn normalize(word: &str) -> Result<SmolStr, ThesaurusError> {
    let word = word.trim();

    if word.is_empty() {
        return Err(ThesaurusError::EmptyWord);
    }

    Ok(lower_case(word))
}

fn aggregate_usage(
    index: &HashMap<SmolStr, Vec<WordEntry>>,
    key: &SmolStr,
    positions: &[usize],
) -> u64 {
    index
        .get(key)
        .map(|set| {
            positions
                .iter()
                .filter_map(|&i| set.get(i))
                .map(|entry| entry.usage_frequency)
                .sum()
        })
        .unwrap_or(0)
}

fn insert_entry(index: &mut HashMap<SmolStr, Vec<WordEntry>>, key: &SmolStr, entry: WordEntry) {
    let set = index.entry(key.clone()).or_insert_with(Vec::new);

    if !set.contains(&entry) {
        set.push(entry);
    }
}

/// Symmetric synonym index with the word lists used to validate text.
///
/// Synonym lists are filtered against the valid words on lookup and the
/// result is cached per word.
#[derive(Debug)]
pub struct Thesaurus {
    index: HashMap<SmolStr, Vec<WordEntry>>,
    valid_words: HashSet<SmolStr>,
    custom: CustomDictionary,
    // positions into the headword's entry list; stable until the list is
    // mutated, which always invalidates the cached value
    cache: SuggestionCache<Vec<usize>>,
}

impl Default for Thesaurus {
    fn default() -> Self {
        Thesaurus::new()
    }
}

impl Thesaurus {
    /// An empty thesaurus with the default cache capacity.
    pub fn new() -> Thesaurus {
        Thesaurus::with_cache_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// An empty thesaurus caching at most `capacity` words.
    pub fn with_cache_capacity(capacity: usize) -> Thesaurus {
        Thesaurus {
            index: HashMap::new(),
            valid_words: HashSet::new(),
            custom: CustomDictionary::new(),
            cache: SuggestionCache::new(capacity),
        }
    }

    /// An empty thesaurus sized by the configuration.
    pub fn from_config(config: &CorrectorConfig) -> Thesaurus {
        Thesaurus::with_cache_capacity(config.cache_capacity)
    }

    /// Wraps the thesaurus for use by a pipeline.
    pub fn into_shared(self) -> SharedThesaurus {
        Arc::new(Mutex::new(self))
    }

    /// Whether the word is spelled correctly, either per the loaded
    /// dictionary or the custom dictionary. Case-insensitive.
    pub fn is_valid(&self, word: &str) -> bool {
        let word = match normalize(word) {
            Ok(v) => v,
            Err(_) => return false,
        };

        self.valid_words.contains(&word) || self.custom.contains(&word)
    }

    /// Accepts `word` as correctly spelled. Cached synonym lists were
    /// filtered against the old word set and are dropped.
    pub fn add_valid_word(&mut self, word: &str) -> Result<(), ThesaurusError> {
        let word = normalize(word)?;
        if self.valid_words.insert(word) {
            self.cache.clear();
        }
        Ok(())
    }

    /// Number of dictionary words and generated forms.
    pub fn valid_word_count(&self) -> usize {
        self.valid_words.len()
    }

    /// Number of words with at least one synonym.
    pub fn headword_count(&self) -> usize {
        self.index.len()
    }

    /// Words with at least one synonym, in no particular order.
    pub fn headwords(&self) -> impl Iterator<Item = &SmolStr> {
        self.index.keys()
    }

    /// Whether `word` has any synonyms, valid or not.
    pub fn contains_headword(&self, word: &str) -> bool {
        match normalize(word) {
            Ok(word) => self.index.contains_key(&word),
            Err(_) => false,
        }
    }

    /// The suggestion cache, for inspection.
    pub fn cache(&self) -> &SuggestionCache<Vec<usize>> {
        &self.cache
    }

    /// Synonyms of `word` whose own spelling is valid, optionally restricted
    /// to one part of speech.
    ///
    /// Filtered lists are cached per word; the part-of-speech filter is
    /// applied to the cached list, so one cache entry serves every filter.
    /// Each returned entry has its usage counter incremented, and the
    /// returned values carry the updated counts. Unknown words yield an empty
    /// list.
    pub fn synonyms(&mut self, word: &str, pos: Option<PartOfSpeech>) -> Vec<WordEntry> {
        let key = match normalize(word) {
            Ok(v) => v,
            Err(_) => return vec![],
        };

        if let Some(positions) = self.cache.get(&key).cloned() {
            log::trace!("Suggestion cache hit for '{}'", key);
            return self.take_entries(&key, &positions, pos);
        }

        let positions: Vec<usize> = match self.index.get(&key) {
            Some(set) => set
                .iter()
                .enumerate()
                .filter(|(_, entry)| self.valid_words.contains(&entry.text))
                .map(|(i, _)| i)
                .collect(),
            None => {
                log::warn!("No synonyms found for '{}'", key);
                return vec![];
            }
        };

        self.cache.insert(key.clone(), positions.clone(), |k, p| {
            aggregate_usage(&self.index, k, p)
        });

        self.take_entries(&key, &positions, pos)
    }

    /// Like [`synonyms`](Self::synonyms), most used first. Entries with equal
    /// counts keep index order.
    pub fn synonyms_by_usage(&mut self, word: &str, pos: Option<PartOfSpeech>) -> Vec<WordEntry> {
        let mut out = self.synonyms(word, pos);
        out.sort_by(|a, b| b.usage_frequency.cmp(&a.usage_frequency));
        out
    }

    fn take_entries(
        &mut self,
        key: &SmolStr,
        positions: &[usize],
        pos: Option<PartOfSpeech>,
    ) -> Vec<WordEntry> {
        let set = match self.index.get_mut(key) {
            Some(v) => v,
            None => return vec![],
        };

        positions
            .iter()
            .filter_map(|&i| {
                let entry = set.get_mut(i)?;

                if pos.map_or(false, |p| p != entry.part_of_speech) {
                    return None;
                }

                entry.usage_frequency = entry.usage_frequency.saturating_add(1);
                Some(entry.clone())
            })
            .collect()
    }

    /// Records `word` and `synonym` as synonyms of each other.
    pub fn add_synonym(
        &mut self,
        word: &str,
        synonym: &str,
        pos: PartOfSpeech,
    ) -> Result<(), ThesaurusError> {
        let word = normalize(word)?;
        let synonym = normalize(synonym)?;

        self.link(&word, &synonym, pos);
        log::debug!("Added synonym: '{}' - '{}' ({})", word, synonym, pos);
        Ok(())
    }

    /// Removes the relation between `word` and `synonym` in both directions,
    /// under every part of speech. Returns whether anything was removed.
    pub fn remove_synonym(&mut self, word: &str, synonym: &str) -> Result<bool, ThesaurusError> {
        let word = normalize(word)?;
        let synonym = normalize(synonym)?;

        let mut removed = false;

        if let Some(set) = self.index.get_mut(&word) {
            let before = set.len();
            set.retain(|entry| entry.text != synonym);
            removed |= set.len() != before;
        }

        if let Some(set) = self.index.get_mut(&synonym) {
            let before = set.len();
            set.retain(|entry| entry.text != word);
            removed |= set.len() != before;
        }

        self.cache.invalidate(&word);
        self.cache.invalidate(&synonym);

        log::debug!("Removed synonym: '{}' - '{}'", word, synonym);
        Ok(removed)
    }

    /// Registers a multi-word phrase and links each of `synonyms` to it.
    /// All inputs are checked before anything is changed.
    pub fn add_phrase<S: AsRef<str>>(
        &mut self,
        phrase: &str,
        synonyms: &[S],
        pos: PartOfSpeech,
    ) -> Result<(), ThesaurusError> {
        let phrase = normalize(phrase)?;
        let synonyms = synonyms
            .iter()
            .map(|s| normalize(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        self.index.entry(phrase.clone()).or_insert_with(Vec::new);

        for synonym in synonyms.iter() {
            self.link(&phrase, synonym, pos);
        }

        log::info!("Added phrase: '{}' with {} synonyms", phrase, synonyms.len());
        Ok(())
    }

    pub(crate) fn link(&mut self, word: &SmolStr, synonym: &SmolStr, pos: PartOfSpeech) {
        insert_entry(&mut self.index, word, WordEntry::new(synonym.clone(), pos));
        insert_entry(&mut self.index, synonym, WordEntry::new(word.clone(), pos));

        self.cache.invalidate(word);
        self.cache.invalidate(synonym);
    }

    /// Words accepted by the user.
    pub fn custom_dictionary(&self) -> &CustomDictionary {
        &self.custom
    }

    /// Returns whether the word was newly added.
    pub fn add_custom_word(&mut self, word: &str) -> Result<bool, ThesaurusError> {
        let added = self.custom.insert(word)?;
        log::info!("Added '{}' to custom dictionary", word.trim());
        Ok(added)
    }

    /// Returns whether the word was present.
    pub fn remove_custom_word(&mut self, word: &str) -> Result<bool, ThesaurusError> {
        let removed = self.custom.remove(word)?;
        log::info!("Removed '{}' from custom dictionary", word.trim());
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thesaurus(words: &[&str]) -> Thesaurus {
        let mut t = Thesaurus::new();
        for w in words {
            t.add_valid_word(w).unwrap();
        }
        t
    }

    fn texts(entries: &[WordEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.text()).collect()
    }

    #[test]
    fn entry_identity_ignores_usage() {
        let mut a = WordEntry::new("fast".into(), PartOfSpeech::Adjective);
        let b = WordEntry::new("fast".into(), PartOfSpeech::Adjective);
        let c = WordEntry::new("fast".into(), PartOfSpeech::Verb);
        a.usage_frequency = 12;

        assert_eq!(a, b);
        assert_ne!(b, c);

        let set: HashSet<WordEntry> = vec![a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn part_of_speech_tags() {
        assert_eq!(PartOfSpeech::from_abbrev("n"), PartOfSpeech::Noun);
        assert_eq!(PartOfSpeech::from_abbrev(" V "), PartOfSpeech::Verb);
        assert_eq!(PartOfSpeech::from_abbrev("adj"), PartOfSpeech::Adjective);
        assert_eq!(PartOfSpeech::from_abbrev("adv"), PartOfSpeech::Adverb);
        assert_eq!(PartOfSpeech::from_abbrev("prep"), PartOfSpeech::Other);
        assert_eq!(PartOfSpeech::from_abbrev(""), PartOfSpeech::Other);
    }

    #[test]
    fn validity_is_case_insensitive() {
        let mut t = thesaurus(&["teh"]);
        assert_eq!(t.is_valid("Teh"), t.is_valid("teh"));
        assert!(t.is_valid("TEH"));
        assert!(!t.is_valid("the"));
        assert!(!t.is_valid(""));

        t.add_custom_word("Rustacean").unwrap();
        assert!(t.is_valid("rustacean"));
        t.remove_custom_word("RUSTACEAN").unwrap();
        assert!(!t.is_valid("rustacean"));
    }

    #[test]
    fn synonym_edges_are_symmetric() {
        let mut t = thesaurus(&["quick", "fast"]);
        t.add_synonym("Quick", "FAST", PartOfSpeech::Adjective).unwrap();

        assert_eq!(texts(&t.synonyms("quick", None)), vec!["fast"]);
        assert_eq!(texts(&t.synonyms("fast", None)), vec!["quick"]);

        assert!(t.remove_synonym("fast", "quick").unwrap());
        assert!(t.synonyms("quick", None).is_empty());
        assert!(t.synonyms("fast", None).is_empty());
        assert!(!t.remove_synonym("fast", "quick").unwrap());
    }

    #[test]
    fn duplicate_edges_are_ignored() {
        let mut t = thesaurus(&["quick", "fast"]);
        t.add_synonym("quick", "fast", PartOfSpeech::Adjective).unwrap();
        t.add_synonym("fast", "quick", PartOfSpeech::Adjective).unwrap();
        t.add_synonym("quick", "fast", PartOfSpeech::Adverb).unwrap();

        let entries = t.synonyms("quick", None);
        assert_eq!(entries.len(), 2);
        assert_eq!(t.synonyms("quick", Some(PartOfSpeech::Adverb)).len(), 1);
    }

    #[test]
    fn invalid_synonyms_are_filtered() {
        let mut t = thesaurus(&["quick", "fast"]);
        t.add_synonym("quick", "fast", PartOfSpeech::Adjective).unwrap();
        t.add_synonym("quick", "speedyy", PartOfSpeech::Adjective).unwrap();

        assert_eq!(texts(&t.synonyms("quick", None)), vec!["fast"]);
    }

    #[test]
    fn unknown_word_is_empty() {
        let mut t = thesaurus(&[]);
        assert!(t.synonyms("nothing", None).is_empty());
        assert!(t.synonyms("  ", None).is_empty());
        assert!(t.cache().is_empty());
    }

    #[test]
    fn usage_frequency_counts_every_return() {
        let mut t = thesaurus(&["quick", "fast", "rapid"]);
        t.add_synonym("quick", "fast", PartOfSpeech::Adjective).unwrap();
        t.add_synonym("quick", "rapid", PartOfSpeech::Verb).unwrap();

        let first = t.synonyms("quick", None);
        assert!(first.iter().all(|e| e.usage_frequency == 1));

        // cache hit
        let second = t.synonyms("quick", None);
        assert!(second.iter().all(|e| e.usage_frequency == 2));

        let adj = t.synonyms("quick", Some(PartOfSpeech::Adjective));
        assert_eq!(texts(&adj), vec!["fast"]);
        assert_eq!(adj[0].usage_frequency, 3);

        let by_usage = t.synonyms_by_usage("quick", None);
        assert_eq!(texts(&by_usage), vec!["fast", "rapid"]);
        assert_eq!(by_usage[0].usage_frequency, 4);
        assert_eq!(by_usage[1].usage_frequency, 3);
    }

    #[test]
    fn mutation_invalidates_cache() {
        let mut t = thesaurus(&["quick", "fast", "rapid"]);
        t.add_synonym("quick", "fast", PartOfSpeech::Adjective).unwrap();
        t.synonyms("quick", None);
        t.synonyms("fast", None);
        assert!(t.cache().contains("quick"));
        assert!(t.cache().contains("fast"));

        t.add_synonym("rapid", "quick", PartOfSpeech::Adjective).unwrap();
        assert!(!t.cache().contains("quick"));
        assert!(t.cache().contains("fast"));
        assert_eq!(texts(&t.synonyms("quick", None)), vec!["fast", "rapid"]);

        t.remove_synonym("fast", "quick").unwrap();
        assert!(!t.cache().contains("quick"));
        assert!(!t.cache().contains("fast"));
        assert_eq!(texts(&t.synonyms("quick", None)), vec!["rapid"]);
    }

    #[test]
    fn new_valid_word_refreshes_cached_lists() {
        let mut t = thesaurus(&["quick"]);
        t.add_synonym("quick", "fast", PartOfSpeech::Adjective).unwrap();
        assert!(t.synonyms("quick", None).is_empty());
        assert!(t.cache().contains("quick"));

        t.add_valid_word("quick").unwrap();
        assert!(t.cache().contains("quick"));

        t.add_valid_word("fast").unwrap();
        assert!(t.cache().is_empty());
        assert_eq!(texts(&t.synonyms("quick", None)), vec!["fast"]);
    }

    #[test]
    fn cache_respects_capacity() {
        let mut t = Thesaurus::with_cache_capacity(2);
        for w in ["a", "b", "c", "d", "x"].iter() {
            t.add_valid_word(w).unwrap();
        }
        for w in ["a", "b", "c", "d"].iter() {
            t.add_synonym(w, "x", PartOfSpeech::Other).unwrap();
        }

        t.synonyms("a", None);
        t.synonyms("a", None);
        t.synonyms("b", None);
        assert_eq!(t.cache().len(), 2);

        // "b" has the lowest aggregate usage and goes
        t.synonyms("c", None);
        assert_eq!(t.cache().len(), 2);
        assert!(t.cache().contains("a"));
        assert!(t.cache().contains("c"));
        assert!(!t.cache().contains("b"));

        t.synonyms("d", None);
        assert_eq!(t.cache().len(), 2);
    }

    #[test]
    fn phrases() {
        let mut t = thesaurus(&["briefly", "concisely"]);
        t.add_phrase(
            "In a Nutshell",
            &["briefly", "concisely", "in summary"],
            PartOfSpeech::Adverb,
        )
        .unwrap();

        assert!(t.contains_headword("in a nutshell"));
        assert_eq!(
            texts(&t.synonyms("in a nutshell", None)),
            vec!["briefly", "concisely"]
        );
        assert!(t.contains_headword("in summary"));
        assert_eq!(t.synonyms("in summary", None).len(), 0);
    }

    #[test]
    fn blank_input_is_rejected_before_mutation() {
        let mut t = thesaurus(&["quick"]);

        assert!(matches!(
            t.add_synonym("quick", " ", PartOfSpeech::Noun),
            Err(ThesaurusError::EmptyWord)
        ));
        assert!(matches!(
            t.remove_synonym("", "quick"),
            Err(ThesaurusError::EmptyWord)
        ));
        assert!(matches!(
            t.add_phrase("all in all", &["overall", ""], PartOfSpeech::Adverb),
            Err(ThesaurusError::EmptyWord)
        ));
        assert!(matches!(t.add_custom_word("\t"), Err(ThesaurusError::EmptyWord)));

        assert_eq!(t.headword_count(), 0);
        assert!(t.custom_dictionary().is_empty());
    }
}
