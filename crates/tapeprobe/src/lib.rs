//! Query a tape-machine device over raw Ethernet.
//!
//! The device answers a single probe frame on Ethertype `0x1234` with a
//! fixed-size state record: tape cells, head location, state code. This
//! umbrella crate re-exports the workspace layers; the `tapeprobe` binary
//! (feature `cli`, on by default) is the operator tool built on them.
//!
//! - [`link`]: raw `AF_PACKET` transport bound to one interface
//! - [`wire`]: Ethernet header and tape record codec
//! - [`client`]: single-shot probe exchange and tape rendering
//! - [`expr`]: standalone tokenizer for the prompt expression syntax

/// Raw link transport types.
pub mod link {
    pub use tapeprobe_link::*;
}

/// Wire codec types.
pub mod wire {
    pub use tapeprobe_wire::*;
}

/// Probe exchange and rendering types.
pub mod client {
    pub use tapeprobe_client::*;
}

/// Expression tokenizer types.
pub mod expr {
    pub use tapeprobe_expr::*;
}
