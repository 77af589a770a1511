//! Word-boundary tokenization of user text.
use unic_segment::{WordBoundIndices, Words};

/// Case detection and transfer between words.
pub mod case_handling;

/// A contiguous slice of the input as produced by the word-boundary split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// the slice of the original text
    pub text: &'a str,
    /// byte offset of the slice in the original text
    pub start: usize,
    /// whether the slice is a word (holds at least one alphanumeric char)
    pub is_word: bool,
}

impl<'a> Token<'a> {
    /// byte length of the token
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// whether the token is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// byte offset one past the end of the token
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

#[inline(always)]
fn is_word(s: &str) -> bool {
    s.chars().any(|ch| ch.is_alphanumeric())
}

/// Word-boundary splitting for string types.
pub trait Tokenize {
    /// Boundary fragments with their byte offsets.
    fn word_bound_indices(&self) -> WordBoundIndices;
    /// Word fragments only.
    fn words(&self) -> Words;

    /// Every boundary fragment, words and separators alike, in order.
    /// Concatenating the `text` of all tokens yields the input again.
    fn tokens(&self) -> Vec<Token>;
}

impl Tokenize for str {
    fn word_bound_indices(&self) -> WordBoundIndices {
        WordBoundIndices::new(self)
    }

    fn words(&self) -> Words {
        Words::new(self, |s| is_word(s))
    }

    fn tokens(&self) -> Vec<Token> {
        self.word_bound_indices()
            .map(|(start, text)| Token {
                text,
                start,
                is_word: is_word(text),
            })
            .collect()
    }
}
