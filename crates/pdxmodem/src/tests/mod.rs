mod chunk_helpers;
mod property_partition;
mod writer;

use crate::{ParserError, ParserOptions, StreamingParser, Value};

/// Feeds `chunks` in order, then finishes.
pub(crate) fn parse_chunks<'a>(
    chunks: impl IntoIterator<Item = &'a [u8]>,
) -> Result<Value, ParserError> {
    let mut parser = StreamingParser::default();
    for chunk in chunks {
        parser.feed(chunk)?;
    }
    parser.finish()
}

/// Parses well-formed `input` in one chunk and renders it as JSON.
pub(crate) fn json(input: &str) -> String {
    let options = ParserOptions {
        panic_on_error: true,
        ..Default::default()
    };
    crate::parse_with(options, input).unwrap().to_string()
}
