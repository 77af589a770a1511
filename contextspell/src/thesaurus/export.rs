//! Serializable snapshot of the synonym index.
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Thesaurus, WordEntry};
use crate::error::ThesaurusError;

/// Every headword with its full synonym set, usage counters included.
/// Keys are sorted so the output is stable between runs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ThesaurusSnapshot {
    /// headword to synonym entries
    pub synonyms: BTreeMap<String, Vec<WordEntry>>,
}

impl ThesaurusSnapshot {
    /// Number of headwords.
    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    /// Whether there are no headwords.
    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }
}

impl Thesaurus {
    /// Copies the synonym index.
    pub fn snapshot(&self) -> ThesaurusSnapshot {
        ThesaurusSnapshot {
            synonyms: self
                .index
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    /// Writes the snapshot as pretty-printed JSON.
    pub fn export_json<W: Write>(&self, writer: W) -> Result<(), ThesaurusError> {
        serde_json::to_writer_pretty(writer, &self.snapshot())?;
        Ok(())
    }

    /// Writes the snapshot as pretty-printed JSON to a new file at `path`.
    pub fn export_json_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ThesaurusError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .map_err(|e| ThesaurusError::Io(path.display().to_string(), e))?;
        let mut writer = std::io::BufWriter::new(file);
        self.export_json(&mut writer)?;
        writer
            .flush()
            .map_err(|e| ThesaurusError::Io(path.display().to_string(), e))?;
        log::info!("Thesaurus exported to JSON: {}", path.display());
        Ok(())
    }
}
