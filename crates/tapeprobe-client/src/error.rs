/// Errors that can occur in one probe transaction.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// No reply frame was observed within the timeout.
    #[error("no response within {0:?}")]
    TimedOut(std::time::Duration),

    /// A frame came back but does not carry the tape protocol header.
    #[error("reply does not carry a tape record header")]
    NoMatchingHeader,

    /// Link-level failure sending or receiving.
    #[error("link error: {0}")]
    Link(#[from] tapeprobe_link::LinkError),

    /// The reply carried the right header but the payload did not decode.
    #[error("decode error: {0}")]
    Wire(#[from] tapeprobe_wire::WireError),
}

pub type Result<T> = std::result::Result<T, ExchangeError>;
