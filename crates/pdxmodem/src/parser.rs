//! Structural decoder.
//!
//! The decoder runs as a sequence of atomic steps. Each step starts at the
//! cursor checkpoint, reads as far as it needs (skipping trivia, slicing one
//! identifier, classifying a block), and then either commits a
//! [`Transition`] or, when the chunk ran out first, rolls the cursor back to
//! the checkpoint without touching the frames. The next feed replays the
//! retained carry and retries the same step, so the result does not depend
//! on where chunk boundaries fall.
use core::mem;

use log::{debug, trace};

use crate::{
    cursor::{ByteCursor, CursorState},
    error::{ErrorKind, Malformed, ParserError},
    frame::{BlockKind, Frame, Slot},
    lexer::{drain_trivia, next_identifier, skip_separator, skip_trivia},
    options::ParserOptions,
    scalar,
    step::{Step, ready},
    token_buffer::TokenBuffer,
    value::Value,
};

/// Progress reported by [`StreamingParser::feed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The root container is still open. Feed more input or call
    /// [`StreamingParser::finish`].
    NeedMore,
    /// The explicit root block has been closed. Only trivia may follow.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    AwaitingKeyOrClose,
    AwaitingListItemOrClose,
    Done,
}

/// The committed outcome of one step.
#[derive(Debug)]
enum Transition {
    Continue,
    Open(Frame),
    /// A `}` was consumed at this offset.
    Close(usize),
    EndOfInput,
}

/// An incremental parser for Paradox-style save and configuration text.
///
/// Input is pushed in chunks of any size with [`feed`](Self::feed); chunk
/// boundaries may fall anywhere, including inside identifiers, quoted
/// strings and comments. [`finish`](Self::finish) signals the end of input
/// and returns the root container.
///
/// The parser keeps the current chunk and the uncommitted tail of earlier
/// input, never the whole document.
///
/// # Examples
///
/// ```
/// use pdxmodem::{Status, StreamingParser};
///
/// let mut parser = StreamingParser::default();
/// assert_eq!(parser.feed("date=1444.11").unwrap(), Status::NeedMore);
/// assert_eq!(parser.feed(".11\nscore=1").unwrap(), Status::NeedMore);
/// let root = parser.finish().unwrap();
/// assert_eq!(
///     root.to_string(),
///     r#"{"date":"1444-11-11T00:00:00.000Z","score":1}"#
/// );
/// ```
#[derive(Debug)]
pub struct StreamingParser {
    carry: CursorState,
    token: TokenBuffer,
    /// The innermost open container. Not part of `stack`.
    current: Option<Frame>,
    /// Parents of `current`, outermost first.
    stack: Vec<Frame>,
    output: Option<Value>,
    failure: Option<ParserError>,
    /// A `#` comment was still open at the end of the last chunk.
    in_comment: bool,

    /// Panic on errors instead of returning them
    #[cfg(any(test, feature = "fuzzing"))]
    panic_on_error: bool,
}

impl Default for StreamingParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl StreamingParser {
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            carry: CursorState::default(),
            token: TokenBuffer::new(options.token_capacity),
            current: None,
            stack: Vec::new(),
            output: None,
            failure: None,
            in_comment: false,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: options.panic_on_error,
        }
    }

    /// Feeds the next chunk of input.
    ///
    /// Decodes as far as the chunk allows and returns. Empty chunks are
    /// accepted and change nothing.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParserError`] encountered. Once a parse has
    /// failed, every later call returns the same error.
    pub fn feed(&mut self, chunk: impl AsRef<[u8]>) -> Result<Status, ParserError> {
        self.drive(chunk.as_ref(), false)
    }

    /// Signals the end of input and returns the root container.
    ///
    /// End of input terminates a trailing bare identifier and closes an
    /// implicit root.
    ///
    /// # Errors
    ///
    /// Fails if any block opened with `{` is still open, if a quoted string
    /// is unterminated, or with the error of an earlier failed
    /// [`feed`](Self::feed).
    pub fn finish(mut self) -> Result<Value, ParserError> {
        self.drive(&[], true)?;
        let offset = self.carry.stream_len();
        match self.output.take() {
            Some(root) => Ok(root),
            None => Err(self.fail(ParserError::new(ErrorKind::LookaheadExhausted, offset))),
        }
    }

    fn state(&self) -> State {
        match (&self.current, &self.output) {
            (Some(frame), _) => match frame.kind() {
                BlockKind::Map => State::AwaitingKeyOrClose,
                BlockKind::List => State::AwaitingListItemOrClose,
            },
            (None, None) => State::Start,
            (None, Some(_)) => State::Done,
        }
    }

    fn drive(&mut self, chunk: &[u8], is_final: bool) -> Result<Status, ParserError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        trace!(
            "feed: {} new bytes behind {} carried, final: {is_final}",
            chunk.len(),
            self.carry.carry_len()
        );
        let mut cursor = ByteCursor::from_state(mem::take(&mut self.carry), chunk, is_final);
        let result = self.run(&mut cursor);
        self.carry = cursor.finish();

        match result {
            Ok(()) if self.state() == State::Done => Ok(Status::Complete),
            Ok(()) => Ok(Status::NeedMore),
            Err(err) => Err(self.fail(err)),
        }
    }

    fn run(&mut self, cursor: &mut ByteCursor<'_>) -> Result<(), ParserError> {
        loop {
            // Trivia between steps holds no decoder state and is committed
            // right away, so a long comment or padding run is never carried.
            drain_trivia(cursor, &mut self.in_comment);
            cursor.commit();
            if self.in_comment && !cursor.is_final() {
                trace!("suspended inside a comment in {:?}", self.state());
                return Ok(());
            }

            let step = match &mut self.current {
                Some(frame) => match frame.kind() {
                    BlockKind::Map => mapping_entry(cursor, &mut self.token, frame)?,
                    BlockKind::List => list_item(cursor, &mut self.token, frame)?,
                },
                None if self.output.is_none() => start(cursor, &mut self.token)?,
                None => trailing(cursor)?,
            };

            let Step::Ready(transition) = step else {
                debug_assert!(!cursor.is_final(), "the final chunk always decides");
                trace!(
                    "suspended in {:?}: {} uncommitted bytes, replaying: {}",
                    self.state(),
                    cursor.uncommitted(),
                    cursor.is_replaying()
                );
                cursor.rollback();
                return Ok(());
            };

            match transition {
                Transition::Continue => {}
                Transition::Open(frame) => self.enter(frame),
                Transition::Close(at) => self.close_current(at)?,
                Transition::EndOfInput => {
                    debug_assert!(cursor.at_end_of_input());
                    self.end_of_input(cursor.offset())?;
                    cursor.commit();
                    return Ok(());
                }
            }
            cursor.commit();
        }
    }

    fn enter(&mut self, frame: Frame) {
        trace!(
            "open {} at depth {} (byte {:?})",
            frame.kind(),
            self.stack.len() + usize::from(self.current.is_some()),
            frame.opened_at()
        );
        if let Some(parent) = self.current.replace(frame) {
            self.stack.push(parent);
        }
    }

    /// Closes the innermost container on a `}` found at `at`.
    fn close_current(&mut self, at: usize) -> Result<(), ParserError> {
        let Some(frame) = self.current.take_if(|frame| frame.is_explicit()) else {
            return Err(ParserError::malformed(Malformed::UnmatchedClose, at));
        };
        trace!("close {} opened at byte {:?}", frame.kind(), frame.opened_at());

        let (slot, value) = frame.close();
        match self.stack.pop() {
            Some(mut parent) => {
                parent.attach(slot, value);
                self.current = Some(parent);
            }
            None => {
                debug!("root block closed at byte {at}");
                self.output = Some(value);
            }
        }
        Ok(())
    }

    fn end_of_input(&mut self, offset: usize) -> Result<(), ParserError> {
        let unclosed = self
            .stack
            .iter()
            .chain(self.current.as_ref())
            .filter(|frame| frame.is_explicit())
            .count();
        if unclosed > 0 {
            return Err(ParserError::malformed(
                Malformed::UnclosedBlocks(unclosed),
                offset,
            ));
        }

        if let Some(root) = self.current.take() {
            let (_, value) = root.close();
            self.output = Some(value);
        }
        debug!("end of input after {offset} bytes");
        Ok(())
    }

    fn fail(&mut self, err: ParserError) -> ParserError {
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.panic_on_error, "{err}");
        debug!("parse failed: {err}");
        self.failure = Some(err.clone());
        err
    }
}

/// Opens the root container, explicit or implicit.
fn start(
    cursor: &mut ByteCursor<'_>,
    token: &mut TokenBuffer,
) -> Result<Step<Transition>, ParserError> {
    let frame = match ready!(skip_trivia(cursor)) {
        None => Frame::new(BlockKind::Map, Slot::Root, None),
        Some(b'{') => {
            let at = cursor.offset();
            cursor.advance();
            Frame::new(ready!(classify_block(cursor, token)), Slot::Root, Some(at))
        }
        Some(b'}') => {
            return Err(ParserError::malformed(
                Malformed::UnmatchedClose,
                cursor.offset(),
            ));
        }
        Some(_) => Frame::new(ready!(classify_block(cursor, token)), Slot::Root, None),
    };
    Ok(Step::Ready(Transition::Open(frame)))
}

/// Decides whether the block body at the cursor is a mapping or a list.
///
/// The trial scan is undone before returning, so the cursor is left at the
/// start of the body.
fn classify_block(
    cursor: &mut ByteCursor<'_>,
    token: &mut TokenBuffer,
) -> Result<Step<BlockKind>, ParserError> {
    let body = cursor.mark();
    let kind = match ready!(skip_trivia(cursor)) {
        None | Some(b'}' | b'{') => BlockKind::List,
        // Let the mapping report the stray operator.
        Some(b'=') => BlockKind::Map,
        Some(_) => {
            ready!(next_identifier(cursor, token));
            match ready!(skip_trivia(cursor)) {
                Some(b'=' | b'{') => BlockKind::Map,
                _ => BlockKind::List,
            }
        }
    };
    cursor.reset(body);
    Ok(Step::Ready(kind))
}

/// One `key = value` entry, or the `}` that closes the mapping.
fn mapping_entry(
    cursor: &mut ByteCursor<'_>,
    token: &mut TokenBuffer,
    frame: &mut Frame,
) -> Result<Step<Transition>, ParserError> {
    let Some(b) = ready!(skip_trivia(cursor)) else {
        return Ok(Step::Ready(Transition::EndOfInput));
    };
    let at = cursor.offset();
    match b {
        b'}' => {
            cursor.advance();
            Ok(Step::Ready(Transition::Close(at)))
        }
        b'=' => Err(ParserError::malformed(Malformed::UnexpectedOperator, at)),
        b'{' => Err(ParserError::malformed(Malformed::MissingKey, at)),
        _ => {
            let key = ready!(next_identifier(cursor, token));
            match ready!(skip_separator(cursor)) {
                Some(b'{') => {
                    let opened_at = cursor.offset();
                    cursor.advance();
                    let kind = ready!(classify_block(cursor, token));
                    Ok(Step::Ready(Transition::Open(Frame::new(
                        kind,
                        Slot::Key(key),
                        Some(opened_at),
                    ))))
                }
                None | Some(b'}') => Err(ParserError::malformed(Malformed::MissingValue, at)),
                Some(_) => {
                    let raw = ready!(next_identifier(cursor, token));
                    frame.insert(key, scalar::identify(raw));
                    Ok(Step::Ready(Transition::Continue))
                }
            }
        }
    }
}

/// One list item, or the `}` that closes the list.
fn list_item(
    cursor: &mut ByteCursor<'_>,
    token: &mut TokenBuffer,
    frame: &mut Frame,
) -> Result<Step<Transition>, ParserError> {
    let Some(b) = ready!(skip_trivia(cursor)) else {
        return Ok(Step::Ready(Transition::EndOfInput));
    };
    let at = cursor.offset();
    match b {
        b'}' => {
            cursor.advance();
            Ok(Step::Ready(Transition::Close(at)))
        }
        b'=' => Err(ParserError::malformed(Malformed::UnexpectedOperator, at)),
        b'{' => {
            cursor.advance();
            let kind = ready!(classify_block(cursor, token));
            Ok(Step::Ready(Transition::Open(Frame::new(
                kind,
                Slot::Item,
                Some(at),
            ))))
        }
        _ => {
            let raw = ready!(next_identifier(cursor, token));
            frame.push_raw(raw);
            Ok(Step::Ready(Transition::Continue))
        }
    }
}

/// After the explicit root closed, only trivia may follow.
fn trailing(cursor: &mut ByteCursor<'_>) -> Result<Step<Transition>, ParserError> {
    match ready!(skip_trivia(cursor)) {
        None => Ok(Step::Ready(Transition::EndOfInput)),
        Some(b'}') => Err(ParserError::malformed(
            Malformed::UnmatchedClose,
            cursor.offset(),
        )),
        Some(_) => Err(ParserError::malformed(
            Malformed::TrailingContent,
            cursor.offset(),
        )),
    }
}
