//! Probe exchange and rendering for the tape protocol.
//!
//! An [`Exchange`] owns a raw link and performs single-shot transactions
//! against the device: build the probe frame, send it, wait for one reply,
//! decode the record. Transactions are stateless with respect to each
//! other; only the link handle persists.
//!
//! [`render`] turns a decoded record into the two operator views: the
//! numeric cell dump and the symbolic tape with head caret.

pub mod error;
pub mod exchange;
pub mod render;

pub use error::{ExchangeError, Result};
pub use exchange::{Exchange, ProbeConfig, PROBE_TRAILER};
pub use render::{render_numeric, render_symbolic, RenderPolicy, SymbolTable, TapeRenderer};
