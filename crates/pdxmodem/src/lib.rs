//! An incremental parser for the text format of Paradox-style save and
//! configuration files.
//!
//! The format is a tree of `key=value` pairs and `{}` blocks:
//!
//! ```text
//! # comments run to the end of the line
//! name="John Doe"
//! start=1444.11.11
//! provinces={ 1 2 3 }
//! army={ location=151 morale=0.85 }
//! ```
//!
//! Each block is either a mapping or a list, decided by its first entry.
//! Scalars are typed as dates, numbers or strings, and lists of scalars are
//! typed as a whole. A key that appears more than once collects all of its
//! values into a list.
//!
//! Input is pushed in chunks with [`StreamingParser::feed`], split at any
//! byte. [`parse`] handles a document that is already in memory.

#![allow(missing_docs)]

mod step;

mod chunk_utils;
mod cursor;
mod error;
mod frame;
mod lexer;
mod options;
mod parser;
mod scalar;
mod token_buffer;
mod value;

#[cfg(test)]
mod tests;

pub use chunk_utils::produce_chunks;
pub use error::{ErrorKind, Malformed, ParserError};
pub use options::{DEFAULT_TOKEN_CAPACITY, ParserOptions};
pub use parser::{Status, StreamingParser};
pub use value::{List, Map, Value};

/// Parses a complete document with the default options.
///
/// ```
/// let root = pdxmodem::parse("a=1 a=2 # repeated\nb={x y}").unwrap();
/// assert_eq!(root.to_string(), r#"{"a":[1,2],"b":["x","y"]}"#);
/// ```
///
/// # Errors
///
/// Returns a [`ParserError`] if the document is malformed.
pub fn parse(input: impl AsRef<[u8]>) -> Result<Value, ParserError> {
    parse_with(ParserOptions::default(), input)
}

/// Parses a complete document with the given options.
///
/// # Errors
///
/// Returns a [`ParserError`] if the document is malformed or an identifier
/// exceeds [`ParserOptions::token_capacity`].
pub fn parse_with(options: ParserOptions, input: impl AsRef<[u8]>) -> Result<Value, ParserError> {
    let mut parser = StreamingParser::new(options);
    parser.feed(input)?;
    parser.finish()
}
