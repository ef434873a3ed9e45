//! Raw Ethernet link transport.
//!
//! Provides the one capability the probe exchange needs from the network:
//! transmit a single frame on a named interface and wait for at most one
//! frame to come back. The [`RawLink`] trait is that seam; [`PacketSocket`]
//! is the Linux `AF_PACKET` implementation of it.
//!
//! This is the lowest layer of tapeprobe. Everything else builds on top of
//! the [`RawLink`] trait provided here.

pub mod addr;
pub mod error;
pub mod traits;

#[cfg(target_os = "linux")]
pub mod packet;

pub use addr::{MacAddr, ParseMacError};
pub use error::{LinkError, Result};
pub use traits::RawLink;

#[cfg(target_os = "linux")]
pub use packet::{interface_index, PacketSocket};
