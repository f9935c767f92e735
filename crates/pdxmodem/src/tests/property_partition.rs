use quickcheck::QuickCheck;

use super::{arbitrary::Document, parse_chunks, writer::write_document};
use crate::Value;

/// Property: a written document parses back to the tree it was written from,
/// whatever chunk sizes it is fed in.
#[test]
fn partition_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document, splits: Vec<usize>) -> bool {
        let src = write_document(&doc);
        let bytes = src.as_bytes();

        let mut chunks = Vec::new();
        let mut idx = 0;
        for s in splits {
            let remaining = bytes.len() - idx;
            if remaining == 0 {
                break;
            }
            let size = 1 + (s % remaining);
            chunks.push(&bytes[idx..idx + size]);
            idx += size;
        }
        chunks.push(&bytes[idx..]);

        parse_chunks(chunks) == Ok(Value::Map(doc.0))
    }

    let tests = if cfg!(feature = "test-fast") {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    };

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Document, Vec<usize>) -> bool);
}

/// Property: writing what was parsed reproduces the input text.
#[test]
fn write_parse_write_is_idempotent() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document) -> bool {
        let first = write_document(&doc);
        let Ok(Value::Map(parsed)) = crate::parse(&first) else {
            return false;
        };
        write_document(&Document(parsed)) == first
    }

    let tests = if cfg!(feature = "test-fast") {
        5
    } else if is_ci::cached() {
        2_000
    } else {
        200
    };

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Document) -> bool);
}
