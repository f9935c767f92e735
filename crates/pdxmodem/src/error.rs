use thiserror::Error;

/// A terminal parse failure and the absolute byte offset where it was
/// detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
pub struct ParserError {
    pub(crate) kind: ErrorKind,
    pub(crate) offset: usize,
}

impl ParserError {
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub(crate) fn malformed(detail: Malformed, offset: usize) -> Self {
        Self::new(ErrorKind::MalformedStructure(detail), offset)
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Byte offset from the start of the stream, counted across all chunks.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("malformed structure: {0}")]
    MalformedStructure(Malformed),
    #[error("unterminated quoted string")]
    TruncatedToken,
    #[error("identifier exceeds the token capacity of {capacity} bytes")]
    CapacityExceeded { capacity: usize },
    /// Backtracking was requested past the retained tail of earlier input.
    /// This is an internal invariant violation, not an input error.
    #[error("lookahead exhausted the retained input")]
    LookaheadExhausted,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    #[error("'}}' closes a block that was never opened")]
    UnmatchedClose,
    #[error("{0} block(s) still open at end of input")]
    UnclosedBlocks(usize),
    #[error("key has no value")]
    MissingValue,
    #[error("block inside a mapping has no key")]
    MissingKey,
    #[error("unexpected '='")]
    UnexpectedOperator,
    #[error("content after the root block was closed")]
    TrailingContent,
}
