//! Lexer: trivia skipping, identifier slicing and delimiter classification.
//!
//! Every function leaves the cursor on the first byte it did not consume.
//! When the chunk ends before a function can decide, it returns
//! [`Step::NeedMore`] and leaves the cursor wherever it stopped. The decoder
//! rolls back to its checkpoint in that case, so partial progress is never
//! observed.
use crate::{
    cursor::ByteCursor,
    error::{ErrorKind, ParserError},
    step::{Step, ready},
    token_buffer::TokenBuffer,
};

/// Whether `b` carries no structural meaning.
///
/// Everything except `= { } # , ;` is untyped, whitespace and quotes
/// included.
#[inline]
pub(crate) const fn is_untyped(b: u8) -> bool {
    !matches!(b, b'=' | b'{' | b'}' | b'#' | b',' | b';')
}

#[inline]
pub(crate) const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// `,` and `;` are reserved: they end a bare token and are skipped like
/// whitespace.
#[inline]
const fn is_separator(b: u8) -> bool {
    is_space(b) || matches!(b, b',' | b';')
}

#[inline]
const fn is_bare(b: u8) -> bool {
    is_untyped(b) && !is_space(b)
}

/// The chunk ran out: end of input on the final chunk, otherwise undecided.
#[inline]
fn ran_out<T>(cursor: &ByteCursor<'_>, at_end: T) -> Step<T> {
    if cursor.is_final() {
        Step::Ready(at_end)
    } else {
        Step::NeedMore
    }
}

/// Skips whitespace, separators and `#` comments.
///
/// Returns the first significant byte without consuming it, or `None` at end
/// of input.
pub(crate) fn skip_trivia(cursor: &mut ByteCursor<'_>) -> Result<Step<Option<u8>>, ParserError> {
    loop {
        match cursor.advance() {
            Some(b) if is_separator(b) => {}
            Some(b'#') => loop {
                match cursor.advance() {
                    Some(b'\n') => break,
                    Some(_) => {}
                    None => return Ok(ran_out(cursor, None)),
                }
            },
            Some(b) => {
                cursor.step_back()?;
                return Ok(Step::Ready(Some(b)));
            }
            None => return Ok(ran_out(cursor, None)),
        }
    }
}

/// Consumes trivia up to the next significant byte or the end of the chunk.
///
/// Unlike [`skip_trivia`] this never suspends, so the decoder can commit
/// what it consumed. `in_comment` carries a comment cut by a chunk boundary
/// into the next feed.
pub(crate) fn drain_trivia(cursor: &mut ByteCursor<'_>, in_comment: &mut bool) {
    loop {
        if *in_comment {
            match cursor.advance() {
                Some(b'\n') => *in_comment = false,
                Some(_) => {}
                None => return,
            }
            continue;
        }
        match cursor.peek() {
            Some(b) if is_separator(b) => {}
            Some(b'#') => *in_comment = true,
            _ => return,
        }
        cursor.advance();
    }
}

/// Like [`skip_trivia`], also skipping any run of `=` between a key and its
/// value.
pub(crate) fn skip_separator(
    cursor: &mut ByteCursor<'_>,
) -> Result<Step<Option<u8>>, ParserError> {
    loop {
        match ready!(skip_trivia(cursor)) {
            Some(b'=') => {
                cursor.advance();
            }
            next => return Ok(Step::Ready(next)),
        }
    }
}

/// Reads the identifier starting at the cursor.
///
/// Callers position the cursor on a significant byte first. A quoted
/// identifier runs verbatim up to the next `"`, which is consumed. A bare
/// identifier runs up to the next delimiter or whitespace, which is not.
pub(crate) fn next_identifier(
    cursor: &mut ByteCursor<'_>,
    token: &mut TokenBuffer,
) -> Result<Step<String>, ParserError> {
    token.clear();
    let start = cursor.offset();
    let overflow = |kind| ParserError::new(kind, start);

    if cursor.peek() == Some(b'"') {
        cursor.advance();
        loop {
            match cursor.advance() {
                Some(b'"') => break,
                Some(b) => token.push(b).map_err(overflow)?,
                None if cursor.is_final() => {
                    return Err(ParserError::new(ErrorKind::TruncatedToken, start));
                }
                None => return Ok(Step::NeedMore),
            }
        }
    } else {
        loop {
            match cursor.advance() {
                Some(b) if is_bare(b) => token.push(b).map_err(overflow)?,
                Some(_) => {
                    // The delimiter belongs to the next token.
                    cursor.step_back()?;
                    break;
                }
                None if cursor.is_final() => break,
                None => return Ok(Step::NeedMore),
            }
        }
    }

    Ok(Step::Ready(token.take()))
}
