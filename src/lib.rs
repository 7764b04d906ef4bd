//! # dispdu: DIS PDU record codec
//!
//! Encode and decode Distributed Interactive Simulation (IEEE 1278.1) Protocol Data Units:
//! binary messages built from fixed-width scalars, fixed byte arrays, nested records and
//! count-prefixed lists, with a three-level header / family / PDU inheritance chain.
//!
//! ## Layers
//!
//! - **Engine** ([`codec`], [`record`], [`list`]): the [`Reader`]/[`Writer`] cursors, the
//!   [`Record`] and [`Fields`] traits, and [`CountedList`], whose on-wire count is always
//!   its length.
//! - **Field visitors**: exact encoded size ([`size_of`]), [`structural_hash`],
//!   [`describe`] and cross-type [`equals`] are all driven by a record's field list.
//! - **Auto-length** ([`length`]): install a PDU's encoded size in its header, then encode.
//! - **PDU catalogue** ([`pdu`]): the DIS records, and [`Pdu`] dispatch on the type byte.
//! - **Datagrams** ([`frame`], [`walk`]): several PDUs back to back, split by their
//!   length fields; bad PDUs are rejected individually.
//!
//! ## Wire format
//!
//! - Multi-byte scalars are big-endian by default; [`Endianness::Little`] is available.
//! - A record extending another encodes the base record's full layout first.
//! - A list count is 1, 2 or 4 bytes, fixed per field. It may sit directly before the list
//!   or earlier in the record; encode always writes the live list length.
//! - No padding or alignment is inserted. Pad bytes are ordinary fields.
//!
//! ## Example
//!
//! ```
//! use dispdu::{ArticulationParameter, EntityStatePdu, Marking, Pdu, PduCodec};
//!
//! let mut espdu = EntityStatePdu::default();
//! espdu.entity_id.entity = 42;
//! espdu.marking = Marking::ascii("TANK01");
//! espdu.articulation_parameters.push(ArticulationParameter::default()).unwrap();
//!
//! let codec = PduCodec::default();
//! let mut pdus = vec![Pdu::from(espdu)];
//! let bytes = codec.encode_datagram(&mut pdus).unwrap();
//! assert_eq!(bytes.len(), 160);
//!
//! let decoded = codec.decode_datagram(&bytes);
//! assert!(decoded.rejected.is_empty());
//! assert_eq!(decoded.pdus[0].pdu, pdus[0]);
//! ```

pub mod codec;
pub mod config;
pub mod describe;
pub mod error;
pub mod frame;
pub mod hash;
pub mod length;
pub mod list;
pub mod pdu;
pub mod record;
pub mod size;
pub mod value;
pub mod walk;

pub use codec::{Endianness, Primitive, Reader, Writer};
pub use config::{CodecConfig, DIS_MAX_PDU_LENGTH};
pub use describe::{describe, DeclaredType, FieldEntry};
pub use error::CodecError;
pub use frame::{DatagramDecodeResult, DecodedPdu, PduCodec, RejectedPdu};
pub use hash::structural_hash;
pub use length::{encode_with_computed_length, install_length, LengthField};
pub use list::{CountPrefix, CountWidth, CountedList, List16, List32, List8};
pub use pdu::{
    AcknowledgePdu, ActionRequestPdu, ArticulationParameter, BurstDescriptor, ClockTime, CollisionPdu,
    CommentPdu, CreateEntityPdu, DataPdu, DisTimestamp, DeadReckoningParameter, DetonationPdu, EightByteChunk,
    EntityId, EntityInformationFamilyPdu, EntityStatePdu, EntityType, EventId, FirePdu, FixedDatum,
    Marking, Orientation, Pdu, PduHeader, PduRecord, RemoveEntityPdu, SimulationManagementFamilyPdu,
    StartResumePdu, StopFreezePdu, TimeReference, VariableDatum, Vector3Double, Vector3Float, WarfareFamilyPdu,
};
pub use record::{equals, Extends, FieldVisitor, Fields, Record};
pub use size::size_of;
pub use value::{FieldValue, Scalar, ScalarKind};
pub use walk::{pdu_extents, remove_range_in_place, BadExtent, PduWalker};
