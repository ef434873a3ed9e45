use std::fmt;
use std::io;

use tapeprobe_client::ExchangeError;
use tapeprobe_expr::ExprError;
use tapeprobe_link::LinkError;

// Exit codes shared with the operator-facing docs.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const HEALTH_CHECK_FAILED: i32 = 30;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn link_error(context: &str, err: LinkError) -> CliError {
    let code = match &err {
        LinkError::InterfaceNotFound { .. } => TRANSPORT_ERROR,
        LinkError::Open { source, .. }
            if source.kind() == io::ErrorKind::PermissionDenied =>
        {
            PERMISSION_DENIED
        }
        LinkError::Open { .. } | LinkError::Send(_) | LinkError::Recv(_) => TRANSPORT_ERROR,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn exchange_error(context: &str, err: ExchangeError) -> CliError {
    match err {
        ExchangeError::TimedOut(_) => CliError::new(TIMEOUT, format!("{context}: {err}")),
        ExchangeError::NoMatchingHeader => CliError::new(FAILURE, format!("{context}: {err}")),
        ExchangeError::Link(err) => link_error(context, err),
        ExchangeError::Wire(err) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
    }
}

pub fn expr_error(err: ExprError) -> CliError {
    CliError::new(DATA_INVALID, err.to_string())
}
