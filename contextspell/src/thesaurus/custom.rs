//! Words the user has accepted during a session.
use hashbrown::HashSet;
use smol_str::SmolStr;

use super::normalize;
use crate::error::ThesaurusError;

/// Session-local set of user-approved words. Case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct CustomDictionary {
    words: HashSet<SmolStr>,
}

impl CustomDictionary {
    /// An empty dictionary.
    pub fn new() -> CustomDictionary {
        CustomDictionary::default()
    }

    /// Returns whether the word was newly added.
    pub fn insert(&mut self, word: &str) -> Result<bool, ThesaurusError> {
        let word = normalize(word)?;
        Ok(self.words.insert(word))
    }

    /// Returns whether the word was present.
    pub fn remove(&mut self, word: &str) -> Result<bool, ThesaurusError> {
        let word = normalize(word)?;
        Ok(self.words.remove(&word))
    }

    /// Case-insensitive membership. Blank words are never contained.
    pub fn contains(&self, word: &str) -> bool {
        match normalize(word) {
            Ok(word) => self.words.contains(&word),
            Err(_) => false,
        }
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no words were added.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in normalized form, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &SmolStr> {
        self.words.iter()
    }
}
