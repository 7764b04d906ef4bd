//! Supporting records shared by several PDUs.

use crate::codec::Reader;
use crate::error::CodecError;
use crate::list::List32;
use crate::record::{FieldVisitor, Fields, Record};

/// Site, application and entity number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityId {
    pub site: u16,
    pub application: u16,
    pub entity: u16,
}

impl EntityId {
    pub fn new(site: u16, application: u16, entity: u16) -> Self {
        EntityId {
            site,
            application,
            entity,
        }
    }
}

impl Fields for EntityId {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.scalar("site", self.site);
        v.scalar("application", self.application);
        v.scalar("entity", self.entity);
    }
}

impl Record for EntityId {
    const NAME: &'static str = "EntityId";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(EntityId {
            site: r.scalar("site")?,
            application: r.scalar("application")?,
            entity: r.scalar("entity")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventId {
    pub site: u16,
    pub application: u16,
    pub event_number: u16,
}

impl Fields for EventId {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.scalar("site", self.site);
        v.scalar("application", self.application);
        v.scalar("event_number", self.event_number);
    }
}

impl Record for EventId {
    const NAME: &'static str = "EventId";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(EventId {
            site: r.scalar("site")?,
            application: r.scalar("application")?,
            event_number: r.scalar("event_number")?,
        })
    }
}

/// Seven-level entity kind hierarchy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityType {
    pub entity_kind: u8,
    pub domain: u8,
    pub country: u16,
    pub category: u8,
    pub subcategory: u8,
    pub specific: u8,
    pub extra: u8,
}

impl Fields for EntityType {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.scalar("entity_kind", self.entity_kind);
        v.scalar("domain", self.domain);
        v.scalar("country", self.country);
        v.scalar("category", self.category);
        v.scalar("subcategory", self.subcategory);
        v.scalar("specific", self.specific);
        v.scalar("extra", self.extra);
    }
}

impl Record for EntityType {
    const NAME: &'static str = "EntityType";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(EntityType {
            entity_kind: r.scalar("entity_kind")?,
            domain: r.scalar("domain")?,
            country: r.scalar("country")?,
            category: r.scalar("category")?,
            subcategory: r.scalar("subcategory")?,
            specific: r.scalar("specific")?,
            extra: r.scalar("extra")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vector3Float {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3Float {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Vector3Float { x, y, z }
    }
}

impl Fields for Vector3Float {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.scalar("x", self.x);
        v.scalar("y", self.y);
        v.scalar("z", self.z);
    }
}

impl Record for Vector3Float {
    const NAME: &'static str = "Vector3Float";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Vector3Float {
            x: r.scalar("x")?,
            y: r.scalar("y")?,
            z: r.scalar("z")?,
        })
    }
}

/// World coordinates, metres.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vector3Double {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3Double {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3Double { x, y, z }
    }
}

impl Fields for Vector3Double {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.scalar("x", self.x);
        v.scalar("y", self.y);
        v.scalar("z", self.z);
    }
}

impl Record for Vector3Double {
    const NAME: &'static str = "Vector3Double";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Vector3Double {
            x: r.scalar("x")?,
            y: r.scalar("y")?,
            z: r.scalar("z")?,
        })
    }
}

/// Euler angles, radians.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Orientation {
    pub psi: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Fields for Orientation {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.scalar("psi", self.psi);
        v.scalar("theta", self.theta);
        v.scalar("phi", self.phi);
    }
}

impl Record for Orientation {
    const NAME: &'static str = "Orientation";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Orientation {
            psi: r.scalar("psi")?,
            theta: r.scalar("theta")?,
            phi: r.scalar("phi")?,
        })
    }
}

/// Entity marking: a character set code and 11 characters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Marking {
    pub character_set: u8,
    pub characters: [u8; 11],
}

impl Marking {
    /// ASCII marking, truncated or zero-padded to 11 characters.
    pub fn ascii(text: &str) -> Self {
        let mut characters = [0u8; 11];
        for (slot, b) in characters.iter_mut().zip(text.bytes()) {
            *slot = b;
        }
        Marking {
            character_set: 1,
            characters,
        }
    }

    /// Characters up to the first NUL.
    pub fn text(&self) -> String {
        let end = self.characters.iter().position(|&b| b == 0).unwrap_or(11);
        String::from_utf8_lossy(&self.characters[..end]).into_owned()
    }
}

impl Fields for Marking {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.scalar("character_set", self.character_set);
        v.bytes("characters", &self.characters);
    }
}

impl Record for Marking {
    const NAME: &'static str = "Marking";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Marking {
            character_set: r.scalar("character_set")?,
            characters: r.bytes("characters")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeadReckoningParameter {
    pub algorithm: u8,
    pub other_parameters: [u8; 15],
    pub linear_acceleration: Vector3Float,
    pub angular_velocity: Vector3Float,
}

impl Fields for DeadReckoningParameter {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.scalar("algorithm", self.algorithm);
        v.bytes("other_parameters", &self.other_parameters);
        v.record("linear_acceleration", &self.linear_acceleration);
        v.record("angular_velocity", &self.angular_velocity);
    }
}

impl Record for DeadReckoningParameter {
    const NAME: &'static str = "DeadReckoningParameter";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(DeadReckoningParameter {
            algorithm: r.scalar("algorithm")?,
            other_parameters: r.bytes("other_parameters")?,
            linear_acceleration: r.record("linear_acceleration")?,
            angular_velocity: r.record("angular_velocity")?,
        })
    }
}

/// One articulated or attached part. 16 bytes on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticulationParameter {
    pub parameter_type_designator: u8,
    pub change_indicator: u8,
    pub part_attached_to: u16,
    pub parameter_type: u32,
    pub parameter_value: f64,
}

impl Fields for ArticulationParameter {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.scalar("parameter_type_designator", self.parameter_type_designator);
        v.scalar("change_indicator", self.change_indicator);
        v.scalar("part_attached_to", self.part_attached_to);
        v.scalar("parameter_type", self.parameter_type);
        v.scalar("parameter_value", self.parameter_value);
    }
}

impl Record for ArticulationParameter {
    const NAME: &'static str = "ArticulationParameter";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(ArticulationParameter {
            parameter_type_designator: r.scalar("parameter_type_designator")?,
            change_indicator: r.scalar("change_indicator")?,
            part_attached_to: r.scalar("part_attached_to")?,
            parameter_type: r.scalar("parameter_type")?,
            parameter_value: r.scalar("parameter_value")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BurstDescriptor {
    pub munition: EntityType,
    pub warhead: u16,
    pub fuse: u16,
    pub quantity: u16,
    pub rate: u16,
}

impl Fields for BurstDescriptor {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.record("munition", &self.munition);
        v.scalar("warhead", self.warhead);
        v.scalar("fuse", self.fuse);
        v.scalar("quantity", self.quantity);
        v.scalar("rate", self.rate);
    }
}

impl Record for BurstDescriptor {
    const NAME: &'static str = "BurstDescriptor";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(BurstDescriptor {
            munition: r.record("munition")?,
            warhead: r.scalar("warhead")?,
            fuse: r.scalar("fuse")?,
            quantity: r.scalar("quantity")?,
            rate: r.scalar("rate")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClockTime {
    pub hour: i32,
    pub time_past_hour: u32,
}

impl Fields for ClockTime {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.scalar("hour", self.hour);
        v.scalar("time_past_hour", self.time_past_hour);
    }
}

impl Record for ClockTime {
    const NAME: &'static str = "ClockTime";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(ClockTime {
            hour: r.scalar("hour")?,
            time_past_hour: r.scalar("time_past_hour")?,
        })
    }
}

/// Fixed-size datum: an identifier and a 32-bit value. 8 bytes on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedDatum {
    pub fixed_datum_id: u32,
    pub fixed_datum_value: u32,
}

impl FixedDatum {
    pub fn new(fixed_datum_id: u32, fixed_datum_value: u32) -> Self {
        FixedDatum {
            fixed_datum_id,
            fixed_datum_value,
        }
    }
}

impl Fields for FixedDatum {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.scalar("fixed_datum_id", self.fixed_datum_id);
        v.scalar("fixed_datum_value", self.fixed_datum_value);
    }
}

impl Record for FixedDatum {
    const NAME: &'static str = "FixedDatum";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(FixedDatum {
            fixed_datum_id: r.scalar("fixed_datum_id")?,
            fixed_datum_value: r.scalar("fixed_datum_value")?,
        })
    }
}

/// Eight bytes of variable datum payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EightByteChunk {
    pub other_parameters: [u8; 8],
}

impl Fields for EightByteChunk {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.bytes("other_parameters", &self.other_parameters);
    }
}

impl Record for EightByteChunk {
    const NAME: &'static str = "EightByteChunk";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(EightByteChunk {
            other_parameters: r.bytes("other_parameters")?,
        })
    }
}

/// Variable-size datum: an identifier and a count-prefixed run of 8-byte chunks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableDatum {
    pub variable_datum_id: u32,
    pub variable_datums: List32<EightByteChunk>,
}

impl VariableDatum {
    /// Datum carrying `payload`, zero-padded to a multiple of 8 bytes.
    pub fn from_payload(variable_datum_id: u32, payload: &[u8]) -> Result<Self, CodecError> {
        let chunks: Vec<EightByteChunk> = payload
            .chunks(8)
            .map(|c| {
                let mut other_parameters = [0u8; 8];
                other_parameters[..c.len()].copy_from_slice(c);
                EightByteChunk { other_parameters }
            })
            .collect();
        Ok(VariableDatum {
            variable_datum_id,
            variable_datums: chunks.try_into()?,
        })
    }

    /// Concatenated chunk bytes, padding included.
    pub fn payload(&self) -> Vec<u8> {
        self.variable_datums
            .iter()
            .flat_map(|c| c.other_parameters)
            .collect()
    }
}

impl Fields for VariableDatum {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.scalar("variable_datum_id", self.variable_datum_id);
        v.list("variable_datums", &self.variable_datums);
    }
}

impl Record for VariableDatum {
    const NAME: &'static str = "VariableDatum";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(VariableDatum {
            variable_datum_id: r.scalar("variable_datum_id")?,
            variable_datums: r.list("variable_datums")?,
        })
    }
}
