/// What a handler did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Not handled; keep going.
    Continue,
    /// Dropped without a reply (e.g. out of scope).
    Stop,
    /// Not for this handler; keep going.
    Ignore,
    /// Answered; carries the text that was sent.
    Reply(String),
}
