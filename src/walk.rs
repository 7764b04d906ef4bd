//! Structure-only walk over a datagram of concatenated PDUs.
//!
//! The walker reads nothing but the 16-bit length field of each header, so it finds PDU
//! boundaries without decoding any record. Use it to count, slice or drop PDUs; use
//! [`PduCodec`](crate::frame::PduCodec) when the contents are needed.
//!
//! A length field is trusted only when it covers at least a full header, fits in the
//! bytes that remain and does not exceed the configured maximum. The first untrusted
//! length ends the walk: nothing after it can be located.

use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::pdu::{self, PduHeader, HEADER_SIZE};
use crate::record::Record;
use std::ops::Range;

/// Bytes from an untrusted length field to the end of the datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadExtent {
    pub byte_range: Range<usize>,
    pub error: CodecError,
}

/// Iterator over PDU byte ranges. Yields at most one [`BadExtent`], as its last item.
#[derive(Debug, Clone)]
pub struct PduWalker<'a> {
    data: &'a [u8],
    pos: usize,
    config: CodecConfig,
    done: bool,
}

impl<'a> PduWalker<'a> {
    pub fn new(data: &'a [u8], config: CodecConfig) -> Self {
        PduWalker {
            data,
            pos: 0,
            config,
            done: false,
        }
    }

    /// Offset of the next PDU.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn extent_at(&self, start: usize) -> Result<usize, CodecError> {
        let rest = &self.data[start..];
        if rest.len() < HEADER_SIZE {
            return Err(CodecError::TruncatedInput {
                record: PduHeader::NAME,
                path: String::new(),
                needed: HEADER_SIZE,
                remaining: rest.len(),
            });
        }
        let length = pdu::peek_length(rest, self.config.endianness)? as usize;
        if length < HEADER_SIZE {
            return Err(CodecError::InvalidLength {
                record: PduHeader::NAME,
                path: "length".to_string(),
                count: length,
                needed: HEADER_SIZE,
                remaining: rest.len(),
            });
        }
        if length > self.config.max_pdu_length {
            return Err(CodecError::LengthOverflow {
                record: PduHeader::NAME,
                size: length,
                max: self.config.max_pdu_length,
            });
        }
        if length > rest.len() {
            return Err(CodecError::InvalidLength {
                record: PduHeader::NAME,
                path: "length".to_string(),
                count: length,
                needed: length,
                remaining: rest.len(),
            });
        }
        Ok(length)
    }
}

impl Iterator for PduWalker<'_> {
    type Item = Result<Range<usize>, BadExtent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.data.len() {
            return None;
        }
        let start = self.pos;
        match self.extent_at(start) {
            Ok(len) => {
                self.pos += len;
                Some(Ok(start..start + len))
            }
            Err(error) => {
                self.done = true;
                self.pos = self.data.len();
                Some(Err(BadExtent {
                    byte_range: start..self.data.len(),
                    error,
                }))
            }
        }
    }
}

/// Byte ranges of the PDUs in `datagram`, without decoding them.
pub fn pdu_extents(datagram: &[u8], config: CodecConfig) -> PduWalker<'_> {
    PduWalker::new(datagram, config)
}

/// Remove `buffer[range]` by shifting the bytes after it left, then shrink the buffer.
/// PDUs carry their own lengths, so nothing else in the datagram needs patching.
pub fn remove_range_in_place(buffer: &mut Vec<u8>, range: Range<usize>) {
    if range.end > buffer.len() || range.start >= range.end {
        return;
    }
    let len = range.len();
    buffer.copy_within(range.end.., range.start);
    buffer.truncate(buffer.len() - len);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Endianness;

    fn header_with_length(length: u16) -> Vec<u8> {
        let mut h = PduHeader::new(pdu::pdu_type::CREATE_ENTITY, pdu::protocol_family::SIMULATION_MANAGEMENT);
        h.length = length;
        h.to_bytes()
    }

    #[test]
    fn walks_by_length_field() {
        let mut data = header_with_length(16);
        data.extend_from_slice(&[0; 4]);
        data.extend(header_with_length(12));
        let extents: Vec<_> = pdu_extents(&data, CodecConfig::default()).collect();
        assert_eq!(extents, vec![Ok(0..16), Ok(16..28)]);
    }

    #[test]
    fn short_length_ends_walk() {
        let mut data = header_with_length(12);
        data.extend(header_with_length(4));
        data.extend(header_with_length(12));
        let extents: Vec<_> = pdu_extents(&data, CodecConfig::default()).collect();
        assert_eq!(extents.len(), 2);
        assert_eq!(extents[0], Ok(0..12));
        let bad = extents[1].clone().unwrap_err();
        assert_eq!(bad.byte_range, 12..36);
        assert!(matches!(bad.error, CodecError::InvalidLength { count: 4, .. }));
    }

    #[test]
    fn length_past_end_is_invalid_length() {
        let data = header_with_length(40);
        let extents: Vec<_> = pdu_extents(&data, CodecConfig::default()).collect();
        let bad = extents[0].clone().unwrap_err();
        assert_eq!(
            bad.error,
            CodecError::InvalidLength {
                record: "PduHeader",
                path: "length".to_string(),
                count: 40,
                needed: 40,
                remaining: 12,
            }
        );
        assert_eq!(bad.byte_range, 0..12);
    }

    #[test]
    fn partial_header_is_truncated() {
        let data = header_with_length(12);
        let extents: Vec<_> = pdu_extents(&data[..7], CodecConfig::default()).collect();
        let bad = extents[0].clone().unwrap_err();
        assert!(bad.error.is_truncated());
        assert_eq!(bad.byte_range, 0..7);
    }

    #[test]
    fn length_over_configured_max() {
        let mut data = header_with_length(100);
        data.resize(100, 0);
        let config = CodecConfig::default().with_max_pdu_length(64);
        let extents: Vec<_> = pdu_extents(&data, config).collect();
        assert!(matches!(
            extents[0].clone().unwrap_err().error,
            CodecError::LengthOverflow { size: 100, max: 64, .. }
        ));
    }

    #[test]
    fn little_endian_length() {
        let mut h = PduHeader::default();
        h.length = 12;
        let data = h.to_bytes_with(Endianness::Little);
        let config = CodecConfig::default().with_endianness(Endianness::Little);
        assert_eq!(pdu_extents(&data, config).collect::<Vec<_>>(), vec![Ok(0..12)]);
    }

    #[test]
    fn remove_range_shifts_tail() {
        let mut buf = vec![1, 2, 3, 4, 5, 6];
        remove_range_in_place(&mut buf, 1..3);
        assert_eq!(buf, vec![1, 4, 5, 6]);
        remove_range_in_place(&mut buf, 3..10);
        assert_eq!(buf, vec![1, 4, 5, 6]);
    }
}
