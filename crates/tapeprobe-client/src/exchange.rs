use std::fmt;
use std::time::Duration;

use bytes::BytesMut;
use tracing::debug;

use tapeprobe_link::{MacAddr, RawLink};
use tapeprobe_wire::{
    decode_record, encode_record, tape_payload, EtherHeader, StateRecord, TapeLayout, TM_ETHERTYPE,
};

use crate::error::{ExchangeError, Result};

/// Byte appended after the probe record. The device wants at least one
/// byte of trailer here; the value is never interpreted.
pub const PROBE_TRAILER: &[u8] = b" ";

/// Link address the reference device answers on.
const DEFAULT_DEVICE_ADDR: MacAddr = MacAddr([0x00, 0x04, 0x00, 0x00, 0x00, 0x00]);

/// Configuration for probe transactions.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Destination hardware address of the device.
    pub dest: MacAddr,
    /// How long to wait for the reply frame.
    pub timeout: Duration,
    /// Record layout the device variant speaks.
    pub layout: TapeLayout,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            dest: DEFAULT_DEVICE_ADDR,
            timeout: Duration::from_secs(2),
            layout: TapeLayout::basic(),
        }
    }
}

/// Single-shot request/reply controller over a raw link.
///
/// Every [`transact`](Self::transact) builds the same probe frame from the
/// same configuration and stands alone; a failed transaction leaves the
/// controller ready for the next one.
pub struct Exchange<L> {
    link: L,
    config: ProbeConfig,
}

impl<L: RawLink> Exchange<L> {
    pub fn new(link: L, config: ProbeConfig) -> Self {
        Self { link, config }
    }

    /// The active probe configuration.
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Consume the controller and hand the link back.
    pub fn into_link(self) -> L {
        self.link
    }

    /// Run one probe transaction: send, wait for one reply, decode.
    ///
    /// Silence for the full timeout is [`ExchangeError::TimedOut`]. A reply
    /// under a different Ethertype is [`ExchangeError::NoMatchingHeader`];
    /// only frames carrying the protocol header reach the record decoder.
    pub fn transact(&mut self) -> Result<StateRecord> {
        let frame = self.probe_frame();
        debug!(dest = %self.config.dest, frame = %Hex(&frame), "sending probe");

        let reply = match self.link.send_and_wait_one(&frame, self.config.timeout)? {
            Some(reply) => reply,
            None => {
                debug!(timeout = ?self.config.timeout, "probe timed out");
                return Err(ExchangeError::TimedOut(self.config.timeout));
            }
        };

        let payload = tape_payload(&reply).ok_or(ExchangeError::NoMatchingHeader)?;
        let record = decode_record(&self.config.layout, payload)?;
        debug!(
            state = record.state,
            head = record.head_location,
            "record decoded"
        );
        Ok(record)
    }

    /// The exact bytes of the outbound probe frame.
    fn probe_frame(&self) -> Vec<u8> {
        let header = EtherHeader {
            dest: self.config.dest,
            source: self.link.hardware_addr(),
            ethertype: TM_ETHERTYPE,
        };

        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        encode_record(&self.config.layout.probe(), &mut buf);
        buf.extend_from_slice(PROBE_TRAILER);
        buf.to_vec()
    }
}

/// Lowercase hex rendering for frame dumps in debug logs.
struct Hex<'a>(&'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use bytes::BytesMut;
    use tapeprobe_wire::WireError;

    const LOCAL_ADDR: MacAddr = MacAddr([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0x0F]);

    struct MockLink {
        replies: VecDeque<Option<Vec<u8>>>,
        sent: Vec<Vec<u8>>,
    }

    impl MockLink {
        fn new(replies: impl IntoIterator<Item = Option<Vec<u8>>>) -> Self {
            Self {
                replies: replies.into_iter().collect(),
                sent: Vec::new(),
            }
        }
    }

    impl RawLink for MockLink {
        fn send_and_wait_one(
            &mut self,
            frame: &[u8],
            _timeout: Duration,
        ) -> tapeprobe_link::Result<Option<Vec<u8>>> {
            self.sent.push(frame.to_vec());
            Ok(self.replies.pop_front().unwrap_or(None))
        }

        fn hardware_addr(&self) -> MacAddr {
            LOCAL_ADDR
        }
    }

    fn reply_frame(ethertype: u16, payload: &[u8]) -> Vec<u8> {
        let header = EtherHeader {
            dest: LOCAL_ADDR,
            source: MacAddr([0x00, 0x04, 0x00, 0x00, 0x00, 0x00]),
            ethertype,
        };
        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        buf.extend_from_slice(payload);
        buf.to_vec()
    }

    fn device_payload(state: u8, head: u8, cells: &[u8]) -> Vec<u8> {
        let mut payload = vec![state, head];
        payload.extend_from_slice(cells);
        payload.push(0);
        payload
    }

    #[test]
    fn probe_frame_has_expected_layout() {
        let mut exchange = Exchange::new(MockLink::new([None]), ProbeConfig::default());
        let _ = exchange.transact();

        let link = exchange.into_link();
        assert_eq!(link.sent.len(), 1);

        let frame = &link.sent[0];
        assert_eq!(frame.len(), 14 + 13 + 1);
        assert_eq!(&frame[0..6], &[0x00, 0x04, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(&frame[6..12], &LOCAL_ADDR.octets());
        assert_eq!(&frame[12..14], &[0x12, 0x34]);
        // state, head, ten cells of 3, padding, trailer
        assert_eq!(&frame[14..16], &[0, 0]);
        assert_eq!(&frame[16..26], &[3; 10]);
        assert_eq!(frame[26], 3);
        assert_eq!(frame[27], b' ');
    }

    #[test]
    fn repeated_transactions_send_identical_frames() {
        let mut exchange = Exchange::new(MockLink::new([None, None, None]), ProbeConfig::default());
        for _ in 0..3 {
            let _ = exchange.transact();
        }

        let sent = exchange.into_link().sent;
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0], sent[1]);
        assert_eq!(sent[1], sent[2]);
    }

    #[test]
    fn silence_is_a_timeout() {
        let mut exchange = Exchange::new(MockLink::new([None]), ProbeConfig::default());
        let err = exchange.transact().unwrap_err();
        assert!(matches!(err, ExchangeError::TimedOut(t) if t == Duration::from_secs(2)));
    }

    #[test]
    fn reply_with_other_ethertype_is_no_matching_header() {
        let reply = reply_frame(0x0800, &device_payload(1, 0, &[0; 10]));
        let mut exchange = Exchange::new(MockLink::new([Some(reply)]), ProbeConfig::default());
        let err = exchange.transact().unwrap_err();
        assert!(matches!(err, ExchangeError::NoMatchingHeader));
    }

    #[test]
    fn runt_reply_is_no_matching_header() {
        let mut exchange = Exchange::new(
            MockLink::new([Some(vec![0x12, 0x34, 0x00])]),
            ProbeConfig::default(),
        );
        let err = exchange.transact().unwrap_err();
        assert!(matches!(err, ExchangeError::NoMatchingHeader));
    }

    #[test]
    fn good_reply_decodes_to_record() {
        let cells = [0u8, 1, 2, 3, 255, 9, 0, 1, 2, 3];
        let reply = reply_frame(TM_ETHERTYPE, &device_payload(4, 6, &cells));
        let mut exchange = Exchange::new(MockLink::new([Some(reply)]), ProbeConfig::default());

        let record = exchange.transact().unwrap();
        assert_eq!(record.state, 4);
        assert_eq!(record.head_location, 6);
        assert_eq!(record.cells, cells);
    }

    #[test]
    fn reply_trailing_padding_is_ignored() {
        let mut payload = device_payload(2, 1, &[7; 10]);
        payload.extend_from_slice(&[0xEE; 40]);
        let reply = reply_frame(TM_ETHERTYPE, &payload);

        let mut exchange = Exchange::new(MockLink::new([Some(reply)]), ProbeConfig::default());
        let record = exchange.transact().unwrap();
        assert_eq!(record.state, 2);
        assert_eq!(record.cells, [7; 10]);
    }

    #[test]
    fn short_payload_is_a_wire_error() {
        let reply = reply_frame(TM_ETHERTYPE, &[1, 2, 3]);
        let mut exchange = Exchange::new(MockLink::new([Some(reply)]), ProbeConfig::default());

        let err = exchange.transact().unwrap_err();
        assert!(matches!(
            err,
            ExchangeError::Wire(WireError::FrameTooShort { len: 3, need: 13 })
        ));
    }

    #[test]
    fn wide_layout_changes_probe_and_decode() {
        let config = ProbeConfig {
            layout: TapeLayout::wide(),
            ..ProbeConfig::default()
        };
        let cells = [1u8; 21];
        let reply = reply_frame(TM_ETHERTYPE, &device_payload(3, 20, &cells));
        let mut exchange = Exchange::new(MockLink::new([Some(reply)]), config);

        let record = exchange.transact().unwrap();
        assert_eq!(record.cells.len(), 21);

        let frame = &exchange.into_link().sent[0];
        assert_eq!(frame.len(), 14 + 24 + 1);
        assert_eq!(&frame[16..37], &[255; 21]);
    }

    #[test]
    fn failed_transaction_leaves_exchange_usable() {
        let good = reply_frame(TM_ETHERTYPE, &device_payload(1, 0, &[0; 10]));
        let mut exchange = Exchange::new(MockLink::new([None, Some(good)]), ProbeConfig::default());

        assert!(exchange.transact().is_err());
        assert!(exchange.transact().is_ok());
    }

    #[test]
    fn hex_formats_lowercase_pairs() {
        assert_eq!(Hex(&[0x00, 0x12, 0xAB]).to_string(), "0012ab");
    }
}
