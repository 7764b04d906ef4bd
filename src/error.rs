//! Error type shared by every encode/decode path.
//!
//! Decode is fail-fast: the first field that cannot be read ends the decode and the
//! error names the record type and the field path that failed. No partially decoded
//! record is ever returned.

use crate::list::CountWidth;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Fewer bytes remain than a field, list element or nested record requires.
    #[error("truncated input in {record} at `{path}`: need {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        record: &'static str,
        path: String,
        needed: usize,
        remaining: usize,
    },

    /// A decoded count (or PDU length) cannot be satisfied by the bytes that remain.
    /// Raised before any element is read.
    #[error("invalid length in {record} at `{path}`: count {count} needs at least {needed} bytes, {remaining} remaining")]
    InvalidLength {
        record: &'static str,
        path: String,
        count: usize,
        needed: usize,
        remaining: usize,
    },

    /// No record type is registered for the discriminator code.
    #[error("unsupported PDU type {pdu_type}")]
    UnsupportedVariant { pdu_type: u8 },

    /// The computed size does not fit the record's length field.
    #[error("{record}: encoded size {size} does not fit the length field (max {max})")]
    LengthOverflow {
        record: &'static str,
        size: usize,
        max: usize,
    },

    /// A list would hold more elements than its on-wire count can express.
    #[error("list of {len} elements exceeds {width:?} count (max {})", .width.max_count())]
    CountOverflow { width: CountWidth, len: usize },
}

impl CodecError {
    /// Record type the error was raised in, when it is tied to one.
    pub fn record(&self) -> Option<&'static str> {
        match self {
            CodecError::TruncatedInput { record, .. }
            | CodecError::InvalidLength { record, .. }
            | CodecError::LengthOverflow { record, .. } => Some(*record),
            CodecError::UnsupportedVariant { .. } | CodecError::CountOverflow { .. } => None,
        }
    }

    /// Field path of a decode failure (`entity_id.site`, `articulation_parameters[1]`).
    pub fn path(&self) -> Option<&str> {
        match self {
            CodecError::TruncatedInput { path, .. } | CodecError::InvalidLength { path, .. } => {
                Some(path.as_str())
            }
            _ => None,
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, CodecError::TruncatedInput { .. })
    }
}
