use crate::runtime::error::{CompileError, Result};

/// A buffer for processing source code.  Acts as a forward-only cursor over
/// the raw bytes of a source file.  Unlike a `Chars` based cursor, this
/// operates on bytes directly because the loader must reject embedded null
/// bytes before a single token is read, and word/string classification is
/// defined over ASCII classes only.
///
/// The buffer owns a copy of the source text rather than borrowing a `&str`,
/// since the whole file must be read and null-checked before tokenizing
/// begins.
pub struct SourceBuffer {
    bytes: Vec<u8>,

    /// The read cursor.  Only ever advances.
    cursor: usize,

    /// The mark left by the start of the token currently being read.
    mark: usize,
}

impl SourceBuffer {
    /// Load a source buffer from raw bytes.  Fails if the buffer contains an
    /// embedded null byte.
    pub fn new(bytes: Vec<u8>) -> Result<SourceBuffer> {
        if bytes.contains(&0) {
            return Err(CompileError::lex("source code contains null byte"));
        }

        Ok(SourceBuffer {
            bytes,
            cursor: 0,
            mark: 0,
        })
    }

    /// Load a source buffer from a file on disk.
    pub fn from_path(path: &str) -> Result<SourceBuffer> {
        let bytes = std::fs::read(path)
            .map_err(|error| CompileError::lex(format!("cannot open {}: {}", path, error)))?;

        SourceBuffer::new(bytes)
    }

    /// Total length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Is the buffer empty?
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Have we reached the end of the buffer?
    pub fn at_end(&self) -> bool {
        self.cursor >= self.bytes.len()
    }

    /// Peek at the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    /// Consume and return the next byte, advancing the cursor.
    pub fn advance(&mut self) -> Option<u8> {
        let next = self.peek()?;
        self.cursor += 1;
        Some(next)
    }

    /// Consume the next byte only if the predicate accepts it.  Mirrors
    /// `read_char_if`.
    pub fn advance_if(&mut self, predicate: impl Fn(u8) -> bool) -> Option<u8> {
        match self.peek() {
            Some(next) if predicate(next) => {
                self.cursor += 1;
                Some(next)
            }
            _ => None,
        }
    }

    /// Consume the next byte only if it equals `byte`.  Mirrors
    /// `read_the_char`.
    pub fn advance_if_eq(&mut self, byte: u8) -> bool {
        self.advance_if(|next| next == byte).is_some()
    }

    /// Mark the cursor's current position as the start of the token being
    /// read.
    pub fn mark(&mut self) {
        self.mark = self.cursor;
    }

    /// Slice of the buffer from the mark to the current cursor.
    pub fn marked_slice(&self) -> &[u8] {
        &self.bytes[self.mark..self.cursor]
    }
}
