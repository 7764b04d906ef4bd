//! Auto-length: install a record's own encoded size into its length field, then encode.
//!
//! Kept separate from [`Record::encode`] so that callers who assemble messages into a
//! larger aggregate can set the length themselves and use the plain encoder.

use crate::codec::Writer;
use crate::error::CodecError;
use crate::record::Record;

/// A top-level record with a self-referential total-length field.
pub trait LengthField: Record {
    /// Largest value the length field can carry.
    const MAX_LENGTH: usize;

    fn length(&self) -> usize;

    /// Store `len`, which is at most [`MAX_LENGTH`](Self::MAX_LENGTH).
    fn set_length(&mut self, len: usize);
}

/// Compute the encoded size and store it in the length field. The length field itself
/// contributes its declared width whatever it held before.
pub fn install_length<R: LengthField>(record: &mut R) -> Result<usize, CodecError> {
    let size = record.encoded_size();
    if size > R::MAX_LENGTH {
        return Err(CodecError::LengthOverflow {
            record: R::NAME,
            size,
            max: R::MAX_LENGTH,
        });
    }
    record.set_length(size);
    Ok(size)
}

/// Two-phase encode: install the computed length, then encode in a single pass.
/// Nothing is written when the size does not fit the length field.
pub fn encode_with_computed_length<R: LengthField>(
    record: &mut R,
    w: &mut Writer,
) -> Result<(), CodecError> {
    install_length(record)?;
    record.encode(w);
    Ok(())
}
