//! Parsers for thesaurus and dictionary sources.
//!
//! Loading never fails from the caller's point of view: unreadable input is
//! logged and whatever was parsed before the failure stays loaded.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use smol_str::SmolStr;

use super::{inflect, PartOfSpeech, Thesaurus};
use crate::tokenizer::case_handling::lower_case;

/// Counters describing one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// lines read from the source
    pub lines: usize,
    /// headwords (thesaurus) or base words (dictionary) registered
    pub entries: usize,
    /// blank, comment or malformed lines passed over
    pub skipped: usize,
}

#[inline(always)]
fn is_indented(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}

impl Thesaurus {
    /// Reads a thesaurus source.
    ///
    /// ```text
    /// quick|adj
    ///     fast, rapid, speedy
    /// (comment lines start with a parenthesis)
    /// happy|adj
    ///     glad, cheerful
    /// ```
    ///
    /// Each synonym is linked to the headword in both directions under the
    /// headword's part of speech.
    pub fn load_thesaurus<R: BufRead>(&mut self, reader: R) -> LoadStats {
        let mut stats = LoadStats::default();
        let mut current: Option<(SmolStr, PartOfSpeech)> = None;

        for line in reader.lines() {
            let line = match line {
                Ok(v) => v,
                Err(e) => {
                    log::error!(
                        "Exception while loading thesaurus after {} lines: {}",
                        stats.lines,
                        e
                    );
                    break;
                }
            };
            stats.lines += 1;

            if line.trim().is_empty() || line.trim_start().starts_with('(') {
                stats.skipped += 1;
                continue;
            }

            if !is_indented(&line) {
                let mut parts = line.splitn(2, '|');
                let word = lower_case(parts.next().unwrap_or("").trim());

                if word.is_empty() {
                    stats.skipped += 1;
                    current = None;
                    continue;
                }

                let pos = PartOfSpeech::from_abbrev(parts.next().unwrap_or(""));
                self.index.entry(word.clone()).or_insert_with(Vec::new);
                stats.entries += 1;
                current = Some((word, pos));
                continue;
            }

            let (headword, pos) = match current.as_ref() {
                Some((w, p)) => (w.clone(), *p),
                None => {
                    log::trace!("Synonym line {} has no headword", stats.lines);
                    stats.skipped += 1;
                    continue;
                }
            };

            for synonym in line.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                self.link(&headword, &lower_case(synonym), pos);
            }
        }

        log::info!(
            "Thesaurus loaded: {} headwords from {} lines ({} skipped)",
            stats.entries,
            stats.lines,
            stats.skipped
        );
        stats
    }

    /// Reads a dictionary source: one `word` or `word/FLAGS` per line. Flags
    /// add inflected forms, see [`inflect::word_forms`].
    pub fn load_dictionary<R: BufRead>(&mut self, reader: R) -> LoadStats {
        let mut stats = LoadStats::default();
        let before = self.valid_words.len();

        for line in reader.lines() {
            let line = match line {
                Ok(v) => v,
                Err(e) => {
                    log::error!(
                        "Exception while loading dictionary after {} lines: {}",
                        stats.lines,
                        e
                    );
                    break;
                }
            };
            stats.lines += 1;

            let mut parts = line.splitn(2, '/');
            let word = lower_case(parts.next().unwrap_or("").trim());

            if word.is_empty() {
                stats.skipped += 1;
                continue;
            }

            let flags = parts.next().unwrap_or("").trim();

            for form in inflect::word_forms(&word, flags) {
                self.valid_words.insert(SmolStr::from(form));
            }
            self.valid_words.insert(word);
            stats.entries += 1;
        }

        if self.valid_words.len() != before {
            self.cache.clear();
        }

        log::info!(
            "Dictionary loaded: {} words, {} valid forms",
            stats.entries,
            self.valid_words.len()
        );
        stats
    }

    /// Opens and reads a thesaurus file. A file that cannot be opened is
    /// logged and loads nothing.
    pub fn load_thesaurus_path<P: AsRef<Path>>(&mut self, path: P) -> LoadStats {
        let path = path.as_ref();

        match File::open(path) {
            Ok(file) => self.load_thesaurus(BufReader::new(file)),
            Err(e) => {
                log::error!("Failed to open thesaurus '{}': {}", path.display(), e);
                LoadStats::default()
            }
        }
    }

    /// Opens and reads a dictionary file, see [`load_thesaurus_path`](Self::load_thesaurus_path).
    pub fn load_dictionary_path<P: AsRef<Path>>(&mut self, path: P) -> LoadStats {
        let path = path.as_ref();

        match File::open(path) {
            Ok(file) => self.load_dictionary(BufReader::new(file)),
            Err(e) => {
                log::error!("Failed to open dictionary '{}': {}", path.display(), e);
                LoadStats::default()
            }
        }
    }
}
