/// Outcome of a lexer or decoder step that may run out of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step<T> {
    /// The step completed with a value.
    Ready(T),
    /// The chunk ended before the step could decide. The caller rolls back to
    /// its checkpoint and waits for the next chunk.
    NeedMore,
}

/// Unwraps `Ok(Step::Ready(v))` to `v`, returning early on errors and on
/// `Step::NeedMore`.
macro_rules! ready {
    ($e:expr) => {
        match $e? {
            $crate::step::Step::Ready(v) => v,
            $crate::step::Step::NeedMore => return Ok($crate::step::Step::NeedMore),
        }
    };
}

pub(crate) use ready;
