use bstr::ByteSlice;

use crate::error::ErrorKind;

/// Accumulates the bytes of the identifier currently being sliced.
///
/// The capacity is fixed when the parser is built. Pushing past it fails
/// instead of growing, so one runaway token cannot consume unbounded memory.
#[derive(Debug)]
pub(crate) struct TokenBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl TokenBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
    }

    #[inline]
    pub(crate) fn push(&mut self, b: u8) -> Result<(), ErrorKind> {
        if self.bytes.len() == self.capacity {
            return Err(ErrorKind::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.bytes.push(b);
        Ok(())
    }

    /// Decodes the accumulated bytes (invalid UTF-8 is replaced with U+FFFD)
    /// and empties the buffer.
    pub(crate) fn take(&mut self) -> String {
        let text = self.bytes.to_str_lossy().into_owned();
        self.bytes.clear();
        text
    }
}
