//! Datagram handling: decode and encode buffers holding one or more concatenated PDUs.
//!
//! A PDU that fails to decode is reported as rejected and skipped; its length field still
//! locates the next PDU, so one bad PDU does not cost the rest of the datagram.

use crate::codec::Writer;
use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::pdu::Pdu;
use crate::walk::{self, BadExtent};
use std::ops::Range;
use tracing::{debug, warn};

/// Result of decoding a datagram: the PDUs that decoded and the byte ranges that did not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatagramDecodeResult {
    pub pdus: Vec<DecodedPdu>,
    pub rejected: Vec<RejectedPdu>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPdu {
    pub pdu: Pdu,
    pub byte_range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedPdu {
    pub byte_range: Range<usize>,
    pub reason: CodecError,
}

impl From<BadExtent> for RejectedPdu {
    fn from(bad: BadExtent) -> Self {
        RejectedPdu {
            byte_range: bad.byte_range,
            reason: bad.error,
        }
    }
}

/// PDU codec bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct PduCodec {
    config: CodecConfig,
}

impl PduCodec {
    pub fn new(config: CodecConfig) -> Self {
        PduCodec { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode a single PDU from the start of `bytes`.
    pub fn decode_pdu(&self, bytes: &[u8]) -> Result<Pdu, CodecError> {
        Pdu::decode(bytes, self.config.endianness)
    }

    /// Encode one PDU with its header length computed and installed.
    pub fn encode_pdu(&self, pdu: &mut Pdu) -> Result<Vec<u8>, CodecError> {
        let mut w = Writer::with_capacity(self.config.endianness, pdu.encoded_size());
        self.encode_into(pdu, &mut w)?;
        Ok(w.into_bytes())
    }

    fn encode_into(&self, pdu: &mut Pdu, w: &mut Writer) -> Result<(), CodecError> {
        let size = pdu.encoded_size();
        if size > self.config.max_pdu_length {
            return Err(CodecError::LengthOverflow {
                record: pdu.record_name(),
                size,
                max: self.config.max_pdu_length,
            });
        }
        pdu.encode_with_computed_length(w)
    }

    /// Decode every PDU in a datagram. Never fails: problems land in `rejected`.
    pub fn decode_datagram(&self, bytes: &[u8]) -> DatagramDecodeResult {
        let mut result = DatagramDecodeResult::default();
        for extent in walk::pdu_extents(bytes, self.config) {
            match extent {
                Ok(range) => match self.decode_extent(&bytes[range.clone()]) {
                    Ok(pdu) => {
                        debug!("decoded {} at {:?}", pdu.record_name(), range);
                        result.pdus.push(DecodedPdu { pdu, byte_range: range });
                    }
                    Err(reason) => {
                        warn!("rejected PDU at {:?}: {}", range, reason);
                        result.rejected.push(RejectedPdu {
                            byte_range: range,
                            reason,
                        });
                    }
                },
                Err(bad) => {
                    warn!("untrusted PDU length at {:?}: {}", bad.byte_range, bad.error);
                    result.rejected.push(bad.into());
                }
            }
        }
        result
    }

    /// Decode one PDU slice whose bounds came from its header length. The decoded body
    /// must fill the slice exactly; a length that overstates the body is rejected.
    fn decode_extent(&self, extent: &[u8]) -> Result<Pdu, CodecError> {
        let pdu = self.decode_pdu(extent)?;
        let size = pdu.encoded_size();
        if size != extent.len() {
            return Err(CodecError::InvalidLength {
                record: pdu.record_name(),
                path: "length".to_string(),
                count: extent.len(),
                needed: size,
                remaining: extent.len(),
            });
        }
        Ok(pdu)
    }

    /// Encode PDUs back to back, each with its computed length. The first PDU that cannot
    /// be encoded fails the whole datagram.
    pub fn encode_datagram(&self, pdus: &mut [Pdu]) -> Result<Vec<u8>, CodecError> {
        let capacity = pdus.iter().map(Pdu::encoded_size).sum();
        let mut w = Writer::with_capacity(self.config.endianness, capacity);
        for pdu in pdus.iter_mut() {
            self.encode_into(pdu, &mut w)?;
        }
        debug!("encoded {} PDUs into {} bytes", pdus.len(), w.position());
        Ok(w.into_bytes())
    }

    /// Drop every PDU that does not decode from `datagram`, in place. Returns what was
    /// dropped, with byte ranges relative to the original buffer.
    pub fn retain_decodable(&self, datagram: &mut Vec<u8>) -> Vec<RejectedPdu> {
        let rejected = self.decode_datagram(datagram).rejected;
        for r in rejected.iter().rev() {
            walk::remove_range_in_place(datagram, r.byte_range.clone());
        }
        rejected
    }
}
