//! The editable text a correction pass reads from and writes back to.
use crate::error::SurfaceError;
use crate::pipeline::{Correction, MisspelledRange};

/// An editor-like target: holds the text, a caret, and can show misspelled
/// ranges with some marker (underline, brackets, ...).
pub trait TextSurface {
    /// Current content.
    fn text(&self) -> String;

    /// Caret position in chars.
    fn caret(&self) -> usize;
    /// Moves the caret, in chars.
    fn set_caret(&mut self, position: usize);

    /// Replaces the content with `text`, marking each range.
    fn apply_marked(&mut self, text: &str, misspelled: &[MisspelledRange])
        -> Result<(), SurfaceError>;

    /// Replaces the content with `text`, no marks.
    fn set_plain_text(&mut self, text: &str);
}

/// Writes a correction to the surface. If marking fails, the corrected text
/// is set without marks. The caret is put back where it was, clamped to the
/// new text.
pub fn render<S: TextSurface + ?Sized>(surface: &mut S, correction: &Correction) {
    let caret = surface.caret();

    if let Err(e) = surface.apply_marked(&correction.text, &correction.misspelled) {
        log::error!("Error updating text with underlines: {}", e);
        surface.set_plain_text(&correction.text);
    }

    surface.set_caret(caret.min(correction.text.chars().count()));
}

/// A run of text, either clean or misspelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// the slice of the text
    pub text: &'a str,
    /// whether the slice lies in a misspelled range
    pub misspelled: bool,
}

/// Splits `text` into alternating clean and misspelled segments. Ranges are
/// in chars and expected in ascending order; anything past the end of the
/// text is clamped and overlapping ranges are skipped.
pub fn segments<'a>(text: &'a str, misspelled: &[MisspelledRange]) -> Vec<Segment<'a>> {
    let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    offsets.push(text.len());
    let char_count = offsets.len() - 1;

    let mut out = vec![];
    let mut cursor = 0usize;

    for range in misspelled.iter() {
        let start = range.start.min(char_count);
        let end = range.end().min(char_count);

        if start < cursor || start == end {
            continue;
        }

        if start > cursor {
            out.push(Segment {
                text: &text[offsets[cursor]..offsets[start]],
                misspelled: false,
            });
        }

        out.push(Segment {
            text: &text[offsets[start]..offsets[end]],
            misspelled: true,
        });
        cursor = end;
    }

    if cursor < char_count {
        out.push(Segment {
            text: &text[offsets[cursor]..],
            misspelled: false,
        });
    }

    out
}

/// In-memory surface for headless use. Marks are kept as the misspelled
/// words they cover.
#[derive(Debug, Clone, Default)]
pub struct BufferSurface {
    text: String,
    caret: usize,
    marked: Vec<String>,
    rich: bool,
}

impl BufferSurface {
    /// A rich surface holding `text`, caret at the end.
    pub fn new(text: &str) -> BufferSurface {
        BufferSurface {
            text: text.to_string(),
            caret: text.chars().count(),
            marked: vec![],
            rich: true,
        }
    }

    /// A surface that rejects marked text, as a plain-text control would.
    pub fn plain(text: &str) -> BufferSurface {
        BufferSurface {
            rich: false,
            ..BufferSurface::new(text)
        }
    }

    /// Replaces the content as if typed by the user. Marks are cleared.
    pub fn edit(&mut self, text: &str) {
        self.text = text.to_string();
        self.caret = text.chars().count();
        self.marked.clear();
    }

    /// Words currently marked as misspelled.
    pub fn marked(&self) -> &[String] {
        &self.marked
    }
}

impl TextSurface for BufferSurface {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn set_caret(&mut self, position: usize) {
        self.caret = position.min(self.text.chars().count());
    }

    fn apply_marked(
        &mut self,
        text: &str,
        misspelled: &[MisspelledRange],
    ) -> Result<(), SurfaceError> {
        if !self.rich {
            return Err(SurfaceError::Formatting("surface holds plain text only".into()));
        }

        self.text = text.to_string();
        self.marked = segments(text, misspelled)
            .into_iter()
            .filter(|s| s.misspelled)
            .map(|s| s.text.to_string())
            .collect();
        Ok(())
    }

    fn set_plain_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.marked.clear();
    }
}
