/// Identifier capacity used by [`ParserOptions::default`], in bytes.
pub const DEFAULT_TOKEN_CAPACITY: usize = 256;

/// Configuration options for the streaming parser.
///
/// # Examples
///
/// ```rust
/// use pdxmodem::{ParserOptions, StreamingParser};
///
/// let options = ParserOptions {
///     token_capacity: 4096,
///     ..Default::default()
/// };
/// let mut parser = StreamingParser::new(options);
/// parser.feed("description=\"a long quoted description\"").unwrap();
/// let root = parser.finish().unwrap();
/// assert!(root.is_map());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Maximum length of a single key, value or list item, in bytes.
    ///
    /// Identifiers are accumulated in a fixed-capacity token buffer. An
    /// identifier longer than this is reported as
    /// [`ErrorKind::CapacityExceeded`](crate::ErrorKind::CapacityExceeded);
    /// it is never truncated.
    ///
    /// # Default
    ///
    /// [`DEFAULT_TOKEN_CAPACITY`] (256 bytes)
    pub token_capacity: usize,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on parse errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            token_capacity: DEFAULT_TOKEN_CAPACITY,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}
