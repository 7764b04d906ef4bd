//! DIS PDU catalogue and type dispatch.
//!
//! Every concrete PDU is a three-level record: [`PduHeader`], then a family record, then
//! its own fields. [`Pdu`] wraps the concrete types and picks one from the PDU type byte
//! of the header.

pub mod entity_information;
pub mod header;
pub mod records;
pub mod simulation_management;
pub mod time;
pub mod warfare;

pub use entity_information::{CollisionPdu, EntityInformationFamilyPdu, EntityStatePdu};
pub use header::{pdu_type, protocol_family, PduHeader, HEADER_SIZE, LENGTH_OFFSET, PDU_TYPE_OFFSET, PROTOCOL_VERSION};
pub use records::{
    ArticulationParameter, BurstDescriptor, ClockTime, DeadReckoningParameter, EightByteChunk, EntityId,
    EntityType, EventId, FixedDatum, Marking, Orientation, VariableDatum, Vector3Double, Vector3Float,
};
pub use simulation_management::{
    AcknowledgePdu, ActionRequestPdu, CommentPdu, CreateEntityPdu, DataPdu, RemoveEntityPdu,
    SimulationManagementFamilyPdu, StartResumePdu, StopFreezePdu,
};
pub use time::{unix_timestamp, DisTimestamp, TimeReference, UNITS_PER_HOUR};
pub use warfare::{DetonationPdu, FirePdu, WarfareFamilyPdu};

use crate::codec::{Endianness, Reader, Writer};
use crate::error::CodecError;
use crate::length::{self, LengthField};
use crate::record::{Extends, Fields, Record};

/// A concrete PDU: a record whose base chain ends in [`PduHeader`].
pub trait PduRecord: Record {
    const PDU_TYPE: u8;

    fn header(&self) -> &PduHeader;

    fn header_mut(&mut self) -> &mut PduHeader;
}

impl<T: PduRecord> LengthField for T {
    const MAX_LENGTH: usize = u16::MAX as usize;

    fn length(&self) -> usize {
        self.header().length as usize
    }

    fn set_length(&mut self, len: usize) {
        self.header_mut().length = len as u16;
    }
}

macro_rules! pdu_records {
    ($($ty:ident => $code:path;)*) => {
        $(
            impl PduRecord for $ty {
                const PDU_TYPE: u8 = $code;

                fn header(&self) -> &PduHeader {
                    self.base().base()
                }

                fn header_mut(&mut self) -> &mut PduHeader {
                    self.base_mut().base_mut()
                }
            }
        )*

        /// Any PDU this crate can decode.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Pdu {
            $($ty($ty),)*
        }

        impl Pdu {
            /// Decode the record selected by `pdu_type`.
            fn decode_as(code: u8, r: &mut Reader<'_>) -> Result<Pdu, CodecError> {
                match code {
                    $($code => Ok(Pdu::$ty($ty::decode(r)?)),)*
                    other => Err(CodecError::UnsupportedVariant { pdu_type: other }),
                }
            }

            /// The wrapped record, for the visitor-based engine functions.
            pub fn as_fields(&self) -> &dyn Fields {
                match self {
                    $(Pdu::$ty(p) => p as &dyn Fields,)*
                }
            }

            pub fn header(&self) -> &PduHeader {
                match self {
                    $(Pdu::$ty(p) => p.header(),)*
                }
            }

            pub fn header_mut(&mut self) -> &mut PduHeader {
                match self {
                    $(Pdu::$ty(p) => p.header_mut(),)*
                }
            }

            /// Install the computed length in the header, then encode.
            pub fn encode_with_computed_length(&mut self, w: &mut Writer) -> Result<(), CodecError> {
                match self {
                    $(Pdu::$ty(p) => length::encode_with_computed_length(p, w),)*
                }
            }
        }

        $(
            impl From<$ty> for Pdu {
                fn from(p: $ty) -> Self {
                    Pdu::$ty(p)
                }
            }
        )*
    };
}

pdu_records! {
    EntityStatePdu => pdu_type::ENTITY_STATE;
    FirePdu => pdu_type::FIRE;
    DetonationPdu => pdu_type::DETONATION;
    CollisionPdu => pdu_type::COLLISION;
    CreateEntityPdu => pdu_type::CREATE_ENTITY;
    RemoveEntityPdu => pdu_type::REMOVE_ENTITY;
    StartResumePdu => pdu_type::START_RESUME;
    StopFreezePdu => pdu_type::STOP_FREEZE;
    AcknowledgePdu => pdu_type::ACKNOWLEDGE;
    ActionRequestPdu => pdu_type::ACTION_REQUEST;
    DataPdu => pdu_type::DATA;
    CommentPdu => pdu_type::COMMENT;
}

/// PDU type byte of an encoded PDU, without decoding it.
pub fn peek_pdu_type(bytes: &[u8]) -> Result<u8, CodecError> {
    bytes.get(PDU_TYPE_OFFSET).copied().ok_or_else(|| CodecError::TruncatedInput {
        record: PduHeader::NAME,
        path: "pdu_type".to_string(),
        needed: PDU_TYPE_OFFSET + 1,
        remaining: bytes.len(),
    })
}

/// Length field of an encoded PDU header, without decoding it.
pub fn peek_length(bytes: &[u8], endianness: Endianness) -> Result<u16, CodecError> {
    let mut r = Reader::new(bytes.get(LENGTH_OFFSET..).unwrap_or_default(), endianness);
    r.read_u16().map_err(|_| CodecError::TruncatedInput {
        record: PduHeader::NAME,
        path: "length".to_string(),
        needed: LENGTH_OFFSET + 2,
        remaining: bytes.len(),
    })
}

impl Pdu {
    /// Decode one PDU from the start of `bytes`, choosing the record type from the header.
    pub fn decode(bytes: &[u8], endianness: Endianness) -> Result<Pdu, CodecError> {
        let pdu_type = peek_pdu_type(bytes)?;
        Self::decode_as(pdu_type, &mut Reader::new(bytes, endianness))
    }

    pub fn pdu_type(&self) -> u8 {
        self.header().pdu_type
    }

    pub fn record_name(&self) -> &'static str {
        self.as_fields().record_name()
    }

    pub fn encode(&self, w: &mut Writer) {
        w.write_record(self.as_fields());
    }

    pub fn encoded_size(&self) -> usize {
        crate::size::size_of(self.as_fields())
    }

    pub fn to_bytes_with(&self, endianness: Endianness) -> Vec<u8> {
        let mut w = Writer::with_capacity(endianness, self.encoded_size());
        self.encode(&mut w);
        w.into_bytes()
    }

    pub fn structural_hash(&self) -> u64 {
        crate::hash::structural_hash(self.as_fields())
    }

    pub fn describe(&self) -> Vec<crate::describe::FieldEntry> {
        crate::describe::describe(self.as_fields())
    }
}
