//! Progressive disclosure of a final reply.

use gemi_core::{Markup, translate};

/// Walks a text one code point at a time. For a text of `L` code points,
/// [`advance`](Self::advance) yields the prefixes of length `0..=L` and then
/// `None`. [`settle`](Self::settle) consumes the cursor, so translation runs once.
#[derive(Debug, Clone)]
pub struct RevealCursor {
    full_text: String,
    /// Code points currently visible
    revealed: usize,
    /// Byte offset matching `revealed`
    byte_end: usize,
    started: bool,
    complete: bool,
}

impl RevealCursor {
    pub fn new(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
            revealed: 0,
            byte_end: 0,
            started: false,
            complete: false,
        }
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Length of the full text in code points.
    pub fn len(&self) -> usize {
        self.full_text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.full_text.is_empty()
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    /// True once the full text has been yielded.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Next visible prefix, growing by one code point per call.
    pub fn advance(&mut self) -> Option<&str> {
        if self.complete {
            return None;
        }
        if self.started {
            let next = self.full_text[self.byte_end..].chars().next()?;
            self.byte_end += next.len_utf8();
            self.revealed += 1;
        } else {
            self.started = true;
        }
        if self.byte_end == self.full_text.len() {
            self.complete = true;
        }
        Some(&self.full_text[..self.byte_end])
    }

    /// Formatted final content.
    pub fn settle(self) -> Markup {
        translate(&self.full_text)
    }
}
