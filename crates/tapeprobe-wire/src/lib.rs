//! Wire codec for the tape protocol.
//!
//! The device reports its state as a fixed-size record carried directly in
//! an Ethernet II frame under Ethertype `0x1234`. The record is purely
//! positional: one state byte, one head location byte, a run of tape cell
//! bytes, one filler byte. No length field, no checksum, no negotiation;
//! the tape width is configuration both ends must already agree on.
//!
//! [`ethernet`] handles the outer header, [`record`] the payload.

pub mod error;
pub mod ethernet;
pub mod record;

pub use error::{Result, WireError};
pub use ethernet::{tape_payload, EtherHeader, ETHER_HEADER_LEN, TM_ETHERTYPE};
pub use record::{
    decode_record, encode_record, StateRecord, TapeLayout, PROBE_PADDING, RECORD_OVERHEAD,
};
