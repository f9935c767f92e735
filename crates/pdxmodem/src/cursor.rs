//! Byte cursor: one logical byte stream over the carry and the current chunk.
//!
//! What it does
//! - Reads from the carry (the uncommitted tail of earlier input) followed by
//!   the current chunk (`&'src [u8]`) via `advance()`/`peek()`/`step_back()`.
//! - Tracks a checkpoint: the position after the last committed parse
//!   decision. A decision that runs out of bytes calls `rollback()` and
//!   reports that it needs more input.
//! - On `finish()`, keeps only the bytes from the checkpoint onwards. Those
//!   become the carry that the next chunk is read behind.
//!
//! Invariants
//! - The carry always starts at the checkpoint of the previous feed, so the
//!   carry is the only history there is. Stepping back before its first byte
//!   is [`ErrorKind::LookaheadExhausted`].
//! - Marks and checkpoints never point before the start of the carry.
//! - `finish(self)` is single-shot: it consumes the cursor and hands the
//!   carry back to the parser.
use bstr::BStr;

use crate::error::{ErrorKind, ParserError};

/// State persisted across feeds.
///
/// The parser moves this into a [`ByteCursor`] at the start of each feed
/// and receives it back from [`ByteCursor::finish`] at the end.
#[derive(Clone, Default)]
pub(crate) struct CursorState {
    carry: Vec<u8>,
    /// Absolute stream offset of `carry[0]`.
    offset: usize,
}

impl CursorState {
    pub(crate) fn carry_len(&self) -> usize {
        self.carry.len()
    }

    /// Total number of bytes received so far.
    pub(crate) fn stream_len(&self) -> usize {
        self.offset + self.carry.len()
    }
}

impl core::fmt::Debug for CursorState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CursorState")
            .field("carry", &BStr::new(&self.carry))
            .field("offset", &self.offset)
            .finish()
    }
}

/// A position inside the current feed, used to undo a trial scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Mark(usize);

pub(crate) struct ByteCursor<'src> {
    carry: Vec<u8>,
    chunk: &'src [u8],
    /// Index into `carry ++ chunk`.
    pos: usize,
    checkpoint: usize,
    offset: usize,
    exhausted: bool,
    is_final: bool,
}

impl<'src> ByteCursor<'src> {
    /// Constructs a cursor from the carry of the previous feed and the new
    /// chunk. `is_final` marks the chunk as the end of the whole input.
    pub(crate) fn from_state(state: CursorState, chunk: &'src [u8], is_final: bool) -> Self {
        Self {
            carry: state.carry,
            chunk,
            pos: 0,
            checkpoint: 0,
            offset: state.offset,
            exhausted: false,
            is_final,
        }
    }

    #[inline]
    fn byte_at(&self, index: usize) -> Option<u8> {
        match self.carry.get(index) {
            Some(&b) => Some(b),
            None => self.chunk.get(index - self.carry.len()).copied(),
        }
    }

    /// Returns the next byte and moves past it, or `None` once the available
    /// bytes are used up. `None` is not an error: check [`Self::is_final`] to
    /// tell end-of-chunk from end-of-input.
    #[inline]
    pub(crate) fn advance(&mut self) -> Option<u8> {
        if let Some(b) = self.byte_at(self.pos) {
            self.pos += 1;
            Some(b)
        } else {
            self.exhausted = true;
            None
        }
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.byte_at(self.pos)
    }

    /// Moves back by one byte, into the carry if needed.
    pub(crate) fn step_back(&mut self) -> Result<(), ParserError> {
        if self.pos == 0 {
            return Err(ParserError::new(
                ErrorKind::LookaheadExhausted,
                self.offset(),
            ));
        }
        self.exhausted = false;
        self.pos -= 1;
        Ok(())
    }

    /// Records the current position as the last committed decision.
    #[inline]
    pub(crate) fn commit(&mut self) {
        self.checkpoint = self.pos;
    }

    /// Returns to the last committed decision.
    #[inline]
    pub(crate) fn rollback(&mut self) {
        self.pos = self.checkpoint;
        self.exhausted = false;
    }

    #[inline]
    pub(crate) fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    #[inline]
    pub(crate) fn reset(&mut self, mark: Mark) {
        debug_assert!(mark.0 >= self.checkpoint, "mark precedes the checkpoint");
        self.pos = mark.0;
        self.exhausted = false;
    }

    /// Whether the cursor is replaying bytes retained from earlier input.
    #[inline]
    pub(crate) fn is_replaying(&self) -> bool {
        self.pos < self.carry.len()
    }

    #[inline]
    pub(crate) fn is_final(&self) -> bool {
        self.is_final
    }

    /// The last `advance` ran out of bytes and no more will ever arrive.
    #[inline]
    pub(crate) fn at_end_of_input(&self) -> bool {
        self.exhausted && self.is_final
    }

    /// Absolute byte offset of the cursor in the whole stream.
    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.offset + self.pos
    }

    /// Bytes read since the last commit.
    pub(crate) fn uncommitted(&self) -> usize {
        self.pos - self.checkpoint
    }

    /// Finalizes the feed and returns the carry for the next one.
    ///
    /// Everything before the checkpoint has been fully decoded and is dropped.
    /// The remainder of the carry and of the chunk is retained.
    pub(crate) fn finish(self) -> CursorState {
        let Self {
            mut carry,
            chunk,
            checkpoint,
            offset,
            ..
        } = self;

        if checkpoint >= carry.len() {
            let start = checkpoint - carry.len();
            carry.clear();
            carry.extend_from_slice(&chunk[start..]);
        } else {
            carry.drain(..checkpoint);
            carry.extend_from_slice(chunk);
        }

        CursorState {
            carry,
            offset: offset + checkpoint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carry(bytes: &[u8], offset: usize) -> CursorState {
        CursorState {
            carry: bytes.to_vec(),
            offset,
        }
    }

    #[test]
    fn reads_carry_before_chunk() {
        let mut c = ByteCursor::from_state(carry(b"ab", 10), b"cd", false);
        assert!(c.is_replaying());
        assert_eq!(c.advance(), Some(b'a'));
        assert_eq!(c.advance(), Some(b'b'));
        assert!(!c.is_replaying());
        assert_eq!(c.advance(), Some(b'c'));
        assert_eq!(c.offset(), 13);
        assert_eq!(c.advance(), Some(b'd'));
        assert_eq!(c.advance(), None);
        assert!(!c.at_end_of_input());
    }

    #[test]
    fn step_back_crosses_into_carry() {
        let mut c = ByteCursor::from_state(carry(b"x", 0), b"y", false);
        c.advance();
        c.advance();
        c.step_back().unwrap();
        c.step_back().unwrap();
        assert!(c.is_replaying());
        assert_eq!(c.peek(), Some(b'x'));
    }

    #[test]
    fn step_back_past_carry_is_an_invariant_error() {
        let mut c = ByteCursor::from_state(carry(b"", 7), b"abc", false);
        let err = c.step_back().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::LookaheadExhausted);
        assert_eq!(err.offset(), 7);
    }

    #[test]
    fn rollback_restores_checkpoint() {
        let mut c = ByteCursor::from_state(CursorState::default(), b"abcdef", false);
        c.advance();
        c.commit();
        c.advance();
        c.advance();
        assert_eq!(c.uncommitted(), 2);
        c.rollback();
        assert_eq!(c.peek(), Some(b'b'));
    }

    #[test]
    fn end_of_input_only_on_final_chunk() {
        let mut c = ByteCursor::from_state(CursorState::default(), b"", true);
        assert_eq!(c.advance(), None);
        assert!(c.at_end_of_input());
        c.rollback();
        assert!(!c.at_end_of_input());
    }

    #[test]
    fn finish_keeps_uncommitted_tail_of_chunk() {
        let mut c = ByteCursor::from_state(carry(b"ab", 0), b"cdef", false);
        for _ in 0..3 {
            c.advance();
        }
        c.commit();
        c.advance();
        let state = c.finish();
        assert_eq!(state.carry, b"def");
        assert_eq!(state.offset, 3);
    }

    #[test]
    fn finish_keeps_carry_when_nothing_committed() {
        let mut c = ByteCursor::from_state(carry(b"ab", 4), b"cd", false);
        c.advance();
        c.commit();
        c.advance();
        c.advance();
        let state = c.finish();
        assert_eq!(state.carry, b"bcd");
        assert_eq!(state.offset, 5);
    }
}
