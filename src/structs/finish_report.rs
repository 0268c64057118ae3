/// Outcome of closing a decoder at end of stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinishReport {
    /// Delta recovered from the unterminated tail, only under `FlushPolicy::Flush`.
    pub flushed: Option<String>,
    pub discarded_bytes: usize,
}
