/// How a single SSE line advances the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Comment, blank, non-`data: ` line, or a control frame without text.
    Skip,
    /// The `[DONE]` sentinel.
    Done,
    Delta(String),
    /// The payload is not (yet) valid JSON; the line goes back onto the buffer.
    NeedMoreData,
}
