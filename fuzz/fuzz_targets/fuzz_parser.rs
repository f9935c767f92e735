#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pdxmodem::{ParserOptions, StreamingParser};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    /// Sizes of the leading chunks; the rest of `text` is fed last.
    splits: Vec<u8>,
    /// Small capacities make overflow reachable.
    token_capacity: u8,
    text: &'a [u8],
}

fn options(capacity: u8) -> ParserOptions {
    ParserOptions {
        token_capacity: usize::from(capacity).max(1),
        panic_on_error: false,
    }
}

/// Split `text` into chunks whose sizes come from `splits`. Zero-sized chunks
/// are kept; the parser must accept them.
fn split<'a>(text: &'a [u8], splits: &[u8]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = text;
    for &size in splits {
        let (head, tail) = rest.split_at(usize::from(size).min(rest.len()));
        chunks.push(head);
        rest = tail;
    }
    chunks.push(rest);
    chunks
}

fuzz_target!(|input: Input<'_>| {
    let options = options(input.token_capacity);

    let whole = pdxmodem::parse_with(options, input.text);

    let mut parser = StreamingParser::new(options);
    let mut chunked = Ok(());
    for chunk in split(input.text, &input.splits) {
        if let Err(err) = parser.feed(chunk) {
            chunked = Err(err);
            break;
        }
    }
    let chunked = chunked.and_then(|()| parser.finish());

    assert_eq!(whole, chunked, "{:?}", lossy(input.text));
});

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
