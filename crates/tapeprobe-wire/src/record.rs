use bytes::{BufMut, BytesMut};

use crate::error::{Result, WireError};

/// Fixed bytes around the cells: state (1) + head location (1) + filler (1).
pub const RECORD_OVERHEAD: usize = 3;

/// Filler value the probe record carries. Transported, never interpreted.
pub const PROBE_PADDING: u8 = 3;

/// Per-variant layout of the tape record.
///
/// The two known device builds differ only in tape width and the value
/// cells take in a fresh probe; the codec itself is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapeLayout {
    /// Number of tape cells in the record.
    pub cell_count: usize,
    /// Value every cell holds in a freshly built probe record.
    pub default_cell_value: u8,
}

impl TapeLayout {
    /// The 10-cell device build; probe cells hold 3.
    pub fn basic() -> Self {
        Self {
            cell_count: 10,
            default_cell_value: 3,
        }
    }

    /// The 21-cell device build; probe cells hold 255.
    pub fn wide() -> Self {
        Self {
            cell_count: 21,
            default_cell_value: 255,
        }
    }

    /// Exact payload size of a record in this layout.
    pub fn payload_len(&self) -> usize {
        self.cell_count + RECORD_OVERHEAD
    }

    /// Build the outbound probe record: every field at its default.
    pub fn probe(&self) -> StateRecord {
        StateRecord {
            state: 0,
            head_location: 0,
            cells: vec![self.default_cell_value; self.cell_count],
            padding: PROBE_PADDING,
        }
    }
}

impl Default for TapeLayout {
    fn default() -> Self {
        Self::basic()
    }
}

/// A decoded tape protocol record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRecord {
    /// Device-defined state code; opaque to this tool.
    pub state: u8,
    /// Head index into `cells`. Not range-checked on the wire.
    pub head_location: u8,
    /// Tape cells in order.
    pub cells: Vec<u8>,
    /// Trailing filler byte, carried for layout only.
    pub padding: u8,
}

/// Encode a record into the positional wire layout.
///
/// Wire format (`N` cells, every field one byte wide):
/// ```text
/// ┌───────┬───────────────┬────────────────┬─────────┐
/// │ state │ head_location │ cells (N × 1B) │ padding │
/// └───────┴───────────────┴────────────────┴─────────┘
/// ```
pub fn encode_record(record: &StateRecord, dst: &mut BytesMut) {
    dst.reserve(record.cells.len() + RECORD_OVERHEAD);
    dst.put_u8(record.state);
    dst.put_u8(record.head_location);
    dst.put_slice(&record.cells);
    dst.put_u8(record.padding);
}

/// Decode a record from a payload slice.
///
/// Reads exactly `layout.payload_len()` bytes; anything beyond that is
/// link-layer padding and ignored. Fewer bytes than the layout requires is
/// [`WireError::FrameTooShort`].
pub fn decode_record(layout: &TapeLayout, src: &[u8]) -> Result<StateRecord> {
    let need = layout.payload_len();
    if src.len() < need {
        return Err(WireError::FrameTooShort {
            len: src.len(),
            need,
        });
    }

    Ok(StateRecord {
        state: src[0],
        head_location: src[1],
        cells: src[2..2 + layout.cell_count].to_vec(),
        padding: src[need - 1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let layout = TapeLayout::basic();
        let record = StateRecord {
            state: 4,
            head_location: 7,
            cells: vec![0, 1, 2, 3, 255, 9, 1, 0, 3, 3],
            padding: PROBE_PADDING,
        };

        let mut buf = BytesMut::new();
        encode_record(&record, &mut buf);
        assert_eq!(buf.len(), layout.payload_len());

        let decoded = decode_record(&layout, &buf).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_probe_record_basic_defaults() {
        let probe = TapeLayout::basic().probe();
        assert_eq!(probe.state, 0);
        assert_eq!(probe.head_location, 0);
        assert_eq!(probe.cells, vec![3; 10]);
        assert_eq!(probe.padding, PROBE_PADDING);
    }

    #[test]
    fn test_probe_record_wide_defaults() {
        let probe = TapeLayout::wide().probe();
        assert_eq!(probe.cells, vec![255; 21]);
        assert_eq!(probe.head_location, 0);
    }

    #[test]
    fn test_probe_encodes_to_payload_len() {
        for layout in [TapeLayout::basic(), TapeLayout::wide()] {
            let mut buf = BytesMut::new();
            encode_record(&layout.probe(), &mut buf);
            assert_eq!(buf.len(), layout.payload_len());
        }
    }

    #[test]
    fn test_decode_rejects_every_short_length() {
        let layout = TapeLayout::basic();
        let need = layout.payload_len();
        for len in 0..need {
            let src = vec![0u8; len];
            let err = decode_record(&layout, &src).unwrap_err();
            assert_eq!(err, WireError::FrameTooShort { len, need });
        }
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let layout = TapeLayout::basic();
        let record = layout.probe();

        let mut buf = BytesMut::new();
        encode_record(&record, &mut buf);
        buf.extend_from_slice(&[0xEE; 33]); // minimum-frame padding from the link

        let decoded = decode_record(&layout, &buf).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_decode_is_positional() {
        let layout = TapeLayout { cell_count: 3, default_cell_value: 0 };
        let src = [9u8, 2, 10, 20, 30, 7];

        let decoded = decode_record(&layout, &src).unwrap();
        assert_eq!(decoded.state, 9);
        assert_eq!(decoded.head_location, 2);
        assert_eq!(decoded.cells, vec![10, 20, 30]);
        assert_eq!(decoded.padding, 7);
    }

    #[test]
    fn test_payload_len() {
        assert_eq!(TapeLayout::basic().payload_len(), 13);
        assert_eq!(TapeLayout::wide().payload_len(), 24);
    }
}
