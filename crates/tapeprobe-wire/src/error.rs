/// Errors that can occur decoding tape protocol payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The payload has fewer bytes than the configured record layout.
    #[error("frame payload too short ({len} bytes, record needs {need})")]
    FrameTooShort { len: usize, need: usize },
}

pub type Result<T> = std::result::Result<T, WireError>;
