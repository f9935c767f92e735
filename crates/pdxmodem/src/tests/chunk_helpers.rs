use crate::produce_chunks;

#[test]
fn produce_chunks_example() {
    let chunks = produce_chunks(b"a={1 2}", 3);
    assert_eq!(chunks, vec![&b"a={"[..], &b"1 2"[..], &b"}"[..]]);
}

#[test]
fn produce_chunks_splits_multibyte_sequences() {
    let payload = "a=\"ö\"".as_bytes();
    let chunks = produce_chunks(payload, payload.len());
    assert_eq!(chunks.len(), payload.len());
    assert_eq!(chunks.concat(), payload);
}

#[test]
fn produce_chunks_more_parts_than_bytes() {
    assert_eq!(produce_chunks(b"ab", 5).len(), 2);
    assert!(produce_chunks(b"", 3).is_empty());
}

#[quickcheck_macros::quickcheck]
fn produce_chunks_preserves_payload(payload: Vec<u8>, parts: u8) -> bool {
    let parts = usize::from(parts).max(1);
    let chunks = produce_chunks(&payload, parts);
    chunks.len() <= parts && chunks.iter().all(|c| !c.is_empty()) && chunks.concat() == payload
}
