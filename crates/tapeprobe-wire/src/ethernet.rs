use bytes::{BufMut, BytesMut};
use tapeprobe_link::MacAddr;

/// Ethertype the tape protocol is registered under.
pub const TM_ETHERTYPE: u16 = 0x1234;

/// Ethernet II header length: two addresses plus the Ethertype.
pub const ETHER_HEADER_LEN: usize = 14;

/// An Ethernet II header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtherHeader {
    pub dest: MacAddr,
    pub source: MacAddr,
    pub ethertype: u16,
}

impl EtherHeader {
    /// Parse the leading 14 bytes of a frame.
    ///
    /// Returns `None` for frames shorter than the header.
    pub fn parse(frame: &[u8]) -> Option<Self> {
        if frame.len() < ETHER_HEADER_LEN {
            return None;
        }

        let mut dest = [0u8; 6];
        let mut source = [0u8; 6];
        dest.copy_from_slice(&frame[0..6]);
        source.copy_from_slice(&frame[6..12]);
        let ethertype = u16::from_be_bytes([frame[12], frame[13]]);

        Some(Self {
            dest: MacAddr(dest),
            source: MacAddr(source),
            ethertype,
        })
    }

    /// Append this header to an outbound frame buffer.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(ETHER_HEADER_LEN);
        dst.put_slice(&self.dest.octets());
        dst.put_slice(&self.source.octets());
        dst.put_u16(self.ethertype);
    }
}

/// Locate the tape record payload inside a raw frame.
///
/// `None` when the frame is shorter than an Ethernet header or carries a
/// different Ethertype. Such frames are not this protocol and must never
/// reach [`decode_record`](crate::record::decode_record).
pub fn tape_payload(frame: &[u8]) -> Option<&[u8]> {
    let header = EtherHeader::parse(frame)?;
    if header.ethertype != TM_ETHERTYPE {
        return None;
    }
    Some(&frame[ETHER_HEADER_LEN..])
}
