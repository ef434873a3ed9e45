use std::time::Duration;

use crate::addr::MacAddr;
use crate::error::Result;

/// A raw link bound to one network interface.
///
/// This is the seam the exchange layer is written against: transmit exactly
/// one frame, then block until one inbound frame is observed or the timeout
/// elapses. `Ok(None)` means silence, not failure.
///
/// Implementations deliver whole frames, Ethernet header included, and do
/// not filter by protocol. Deciding whether an inbound frame actually
/// belongs to the protocol is the caller's job.
pub trait RawLink {
    /// Send `frame` and wait for at most one inbound frame.
    fn send_and_wait_one(&mut self, frame: &[u8], timeout: Duration) -> Result<Option<Vec<u8>>>;

    /// Hardware address of the bound interface, used as the source
    /// address of outbound frames.
    fn hardware_addr(&self) -> MacAddr;
}
