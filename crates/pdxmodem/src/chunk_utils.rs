/// Split `payload` into `parts` chunks of approximately equal size.
///
/// Chunk boundaries fall on arbitrary bytes, including inside multi-byte
/// UTF-8 sequences; the parser accepts that. An empty payload yields no
/// chunks.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}
