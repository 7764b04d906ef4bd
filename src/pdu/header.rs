//! PDU header: the 12-byte prefix shared by every PDU.

use crate::codec::Reader;
use crate::error::CodecError;
use crate::record::{FieldVisitor, Fields, Record};
use super::time::DisTimestamp;

/// DIS protocol version written by default-constructed headers (IEEE 1278.1a-1998).
pub const PROTOCOL_VERSION: u8 = 6;

/// Encoded size of [`PduHeader`].
pub const HEADER_SIZE: usize = 12;

/// Byte offset of the PDU type inside the header.
pub const PDU_TYPE_OFFSET: usize = 2;

/// Byte offset of the 16-bit length field inside the header.
pub const LENGTH_OFFSET: usize = 8;

/// Raw PDU type codes for the PDUs this crate decodes.
pub mod pdu_type {
    pub const ENTITY_STATE: u8 = 1;
    pub const FIRE: u8 = 2;
    pub const DETONATION: u8 = 3;
    pub const COLLISION: u8 = 4;
    pub const CREATE_ENTITY: u8 = 11;
    pub const REMOVE_ENTITY: u8 = 12;
    pub const START_RESUME: u8 = 13;
    pub const STOP_FREEZE: u8 = 14;
    pub const ACKNOWLEDGE: u8 = 15;
    pub const ACTION_REQUEST: u8 = 16;
    pub const DATA: u8 = 20;
    pub const COMMENT: u8 = 22;
}

/// Raw protocol family codes.
pub mod protocol_family {
    pub const ENTITY_INFORMATION: u8 = 1;
    pub const WARFARE: u8 = 2;
    pub const SIMULATION_MANAGEMENT: u8 = 5;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PduHeader {
    pub protocol_version: u8,
    pub exercise_id: u8,
    pub pdu_type: u8,
    pub protocol_family: u8,
    pub timestamp: u32,
    /// Total PDU length in bytes, header included.
    pub length: u16,
    pub padding: i16,
}

impl Default for PduHeader {
    fn default() -> Self {
        PduHeader {
            protocol_version: PROTOCOL_VERSION,
            exercise_id: 0,
            pdu_type: 0,
            protocol_family: 0,
            timestamp: 0,
            length: 0,
            padding: 0,
        }
    }
}

impl PduHeader {
    pub fn new(pdu_type: u8, protocol_family: u8) -> Self {
        PduHeader {
            pdu_type,
            protocol_family,
            ..Default::default()
        }
    }

    /// The `timestamp` field read as a DIS timestamp.
    pub fn dis_timestamp(&self) -> DisTimestamp {
        DisTimestamp::from_raw(self.timestamp)
    }

    pub fn set_dis_timestamp(&mut self, timestamp: DisTimestamp) {
        self.timestamp = timestamp.to_raw();
    }
}

impl Fields for PduHeader {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.scalar("protocol_version", self.protocol_version);
        v.scalar("exercise_id", self.exercise_id);
        v.scalar("pdu_type", self.pdu_type);
        v.scalar("protocol_family", self.protocol_family);
        v.scalar("timestamp", self.timestamp);
        v.scalar("length", self.length);
        v.scalar("padding", self.padding);
    }
}

impl Record for PduHeader {
    const NAME: &'static str = "PduHeader";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(PduHeader {
            protocol_version: r.scalar("protocol_version")?,
            exercise_id: r.scalar("exercise_id")?,
            pdu_type: r.scalar("pdu_type")?,
            protocol_family: r.scalar("protocol_family")?,
            timestamp: r.scalar("timestamp")?,
            length: r.scalar("length")?,
            padding: r.scalar("padding")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout_offsets() {
        let mut h = PduHeader::new(pdu_type::FIRE, protocol_family::WARFARE);
        h.timestamp = 0x01020304;
        h.length = 0xABCD;
        let bytes = h.to_bytes();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(h.encoded_size(), HEADER_SIZE);
        assert_eq!(bytes[0], PROTOCOL_VERSION);
        assert_eq!(bytes[PDU_TYPE_OFFSET], pdu_type::FIRE);
        assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);
        assert_eq!(&bytes[LENGTH_OFFSET..LENGTH_OFFSET + 2], &[0xAB, 0xCD]);
        assert_eq!(PduHeader::from_bytes(&bytes).unwrap(), h);
    }

    #[test]
    fn timestamp_field_carries_reference_bit() {
        let mut h = PduHeader::default();
        h.set_dis_timestamp(DisTimestamp::absolute(std::time::Duration::from_secs(15 * 60)));
        assert_eq!(h.timestamp, (536_870_912 << 1) | 1);
        let bytes = h.to_bytes();
        assert_eq!(bytes[7] & 1, 1);
        let decoded = PduHeader::from_bytes(&bytes).unwrap();
        assert!(decoded.dis_timestamp().is_absolute());
        assert_eq!(decoded.dis_timestamp().units, 536_870_912);
    }

    #[test]
    fn truncated_header_names_field() {
        let bytes = PduHeader::default().to_bytes();
        let err = PduHeader::from_bytes(&bytes[..9]).unwrap_err();
        assert_eq!(err.record(), Some("PduHeader"));
        assert_eq!(err.path(), Some("length"));
    }
}
