//! Codec configuration.

use crate::codec::Endianness;

/// Largest PDU DIS allows on the wire, in bytes.
pub const DIS_MAX_PDU_LENGTH: usize = 8192;

/// Settings for [`PduCodec`](crate::frame::PduCodec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    pub endianness: Endianness,
    /// PDUs longer than this are rejected on decode and refused on encode.
    pub max_pdu_length: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            endianness: Endianness::Big,
            max_pdu_length: DIS_MAX_PDU_LENGTH,
        }
    }
}

impl CodecConfig {
    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    pub fn with_max_pdu_length(mut self, max_pdu_length: usize) -> Self {
        self.max_pdu_length = max_pdu_length;
        self
    }
}
