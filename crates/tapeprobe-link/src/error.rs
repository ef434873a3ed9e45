/// Errors that can occur on the raw link.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// The named interface does not exist on this host.
    #[error("interface {iface:?} not found")]
    InterfaceNotFound { iface: String },

    /// Failed to open or bind the packet socket.
    #[error("failed to open packet socket on {iface:?}: {source}")]
    Open {
        iface: String,
        source: std::io::Error,
    },

    /// Failed to transmit a frame.
    #[error("send failed: {0}")]
    Send(std::io::Error),

    /// Failed while waiting for or reading a frame.
    #[error("receive failed: {0}")]
    Recv(std::io::Error),
}

pub type Result<T> = std::result::Result<T, LinkError>;
