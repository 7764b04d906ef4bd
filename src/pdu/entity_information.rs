//! Entity information / interaction family (protocol family 1).

use super::header::{pdu_type, protocol_family, PduHeader};
use super::records::{
    ArticulationParameter, DeadReckoningParameter, EntityId, EntityType, EventId, Marking, Orientation,
    Vector3Double, Vector3Float,
};
use crate::codec::Reader;
use crate::error::CodecError;
use crate::list::List8;
use crate::record::{Extends, FieldVisitor, Fields, Record};

/// Family base record. Adds no fields of its own to the header.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityInformationFamilyPdu {
    pub header: PduHeader,
}

impl EntityInformationFamilyPdu {
    pub fn new(pdu_type: u8) -> Self {
        EntityInformationFamilyPdu {
            header: PduHeader::new(pdu_type, protocol_family::ENTITY_INFORMATION),
        }
    }
}

impl Default for EntityInformationFamilyPdu {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Fields for EntityInformationFamilyPdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.header);
    }
}

impl Record for EntityInformationFamilyPdu {
    const NAME: &'static str = "EntityInformationFamilyPdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(EntityInformationFamilyPdu { header: r.base()? })
    }
}

impl Extends for EntityInformationFamilyPdu {
    type Base = PduHeader;

    fn base(&self) -> &PduHeader {
        &self.header
    }

    fn base_mut(&mut self) -> &mut PduHeader {
        &mut self.header
    }
}

/// Position, orientation, appearance and articulation of one entity.
///
/// The articulation parameter count sits between `force_id` and `entity_type`, ahead of
/// the list itself; it is always written from the list length.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStatePdu {
    pub family: EntityInformationFamilyPdu,
    pub entity_id: EntityId,
    pub force_id: u8,
    pub entity_type: EntityType,
    pub alternative_entity_type: EntityType,
    pub entity_linear_velocity: Vector3Float,
    pub entity_location: Vector3Double,
    pub entity_orientation: Orientation,
    pub entity_appearance: i32,
    pub dead_reckoning_parameters: DeadReckoningParameter,
    pub marking: Marking,
    pub capabilities: i32,
    pub articulation_parameters: List8<ArticulationParameter>,
}

impl EntityStatePdu {
    pub fn articulation_parameter_count(&self) -> usize {
        self.articulation_parameters.count()
    }
}

impl Default for EntityStatePdu {
    fn default() -> Self {
        EntityStatePdu {
            family: EntityInformationFamilyPdu::new(pdu_type::ENTITY_STATE),
            entity_id: EntityId::default(),
            force_id: 0,
            entity_type: EntityType::default(),
            alternative_entity_type: EntityType::default(),
            entity_linear_velocity: Vector3Float::default(),
            entity_location: Vector3Double::default(),
            entity_orientation: Orientation::default(),
            entity_appearance: 0,
            dead_reckoning_parameters: DeadReckoningParameter::default(),
            marking: Marking::default(),
            capabilities: 0,
            articulation_parameters: List8::new(),
        }
    }
}

impl Fields for EntityStatePdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.family);
        v.record("entity_id", &self.entity_id);
        v.scalar("force_id", self.force_id);
        v.count_of("number_of_articulation_parameters", &self.articulation_parameters);
        v.record("entity_type", &self.entity_type);
        v.record("alternative_entity_type", &self.alternative_entity_type);
        v.record("entity_linear_velocity", &self.entity_linear_velocity);
        v.record("entity_location", &self.entity_location);
        v.record("entity_orientation", &self.entity_orientation);
        v.scalar("entity_appearance", self.entity_appearance);
        v.record("dead_reckoning_parameters", &self.dead_reckoning_parameters);
        v.record("marking", &self.marking);
        v.scalar("capabilities", self.capabilities);
        v.elements("articulation_parameters", &self.articulation_parameters);
    }
}

impl Record for EntityStatePdu {
    const NAME: &'static str = "EntityStatePdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let family = r.base()?;
        let entity_id = r.record("entity_id")?;
        let force_id = r.scalar("force_id")?;
        let articulation_count = r.count::<u8>("number_of_articulation_parameters")?;
        Ok(EntityStatePdu {
            family,
            entity_id,
            force_id,
            entity_type: r.record("entity_type")?,
            alternative_entity_type: r.record("alternative_entity_type")?,
            entity_linear_velocity: r.record("entity_linear_velocity")?,
            entity_location: r.record("entity_location")?,
            entity_orientation: r.record("entity_orientation")?,
            entity_appearance: r.scalar("entity_appearance")?,
            dead_reckoning_parameters: r.record("dead_reckoning_parameters")?,
            marking: r.record("marking")?,
            capabilities: r.scalar("capabilities")?,
            articulation_parameters: r.elements("articulation_parameters", articulation_count)?,
        })
    }
}

impl Extends for EntityStatePdu {
    type Base = EntityInformationFamilyPdu;

    fn base(&self) -> &EntityInformationFamilyPdu {
        &self.family
    }

    fn base_mut(&mut self) -> &mut EntityInformationFamilyPdu {
        &mut self.family
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollisionPdu {
    pub family: EntityInformationFamilyPdu,
    pub issuing_entity_id: EntityId,
    pub colliding_entity_id: EntityId,
    pub event_id: EventId,
    pub collision_type: u8,
    pub pad: i8,
    pub velocity: Vector3Float,
    /// Kilograms.
    pub mass: f32,
    /// Collision point in the issuing entity's coordinates.
    pub location: Vector3Float,
}

impl Default for CollisionPdu {
    fn default() -> Self {
        CollisionPdu {
            family: EntityInformationFamilyPdu::new(pdu_type::COLLISION),
            issuing_entity_id: EntityId::default(),
            colliding_entity_id: EntityId::default(),
            event_id: EventId::default(),
            collision_type: 0,
            pad: 0,
            velocity: Vector3Float::default(),
            mass: 0.0,
            location: Vector3Float::default(),
        }
    }
}

impl Fields for CollisionPdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.family);
        v.record("issuing_entity_id", &self.issuing_entity_id);
        v.record("colliding_entity_id", &self.colliding_entity_id);
        v.record("event_id", &self.event_id);
        v.scalar("collision_type", self.collision_type);
        v.scalar("pad", self.pad);
        v.record("velocity", &self.velocity);
        v.scalar("mass", self.mass);
        v.record("location", &self.location);
    }
}

impl Record for CollisionPdu {
    const NAME: &'static str = "CollisionPdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(CollisionPdu {
            family: r.base()?,
            issuing_entity_id: r.record("issuing_entity_id")?,
            colliding_entity_id: r.record("colliding_entity_id")?,
            event_id: r.record("event_id")?,
            collision_type: r.scalar("collision_type")?,
            pad: r.scalar("pad")?,
            velocity: r.record("velocity")?,
            mass: r.scalar("mass")?,
            location: r.record("location")?,
        })
    }
}

impl Extends for CollisionPdu {
    type Base = EntityInformationFamilyPdu;

    fn base(&self) -> &EntityInformationFamilyPdu {
        &self.family
    }

    fn base_mut(&mut self) -> &mut EntityInformationFamilyPdu {
        &mut self.family
    }
}
