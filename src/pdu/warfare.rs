//! Warfare family (protocol family 2): fire and detonation.

use super::header::{pdu_type, protocol_family, PduHeader};
use super::records::{ArticulationParameter, BurstDescriptor, EntityId, EventId, Vector3Double, Vector3Float};
use crate::codec::Reader;
use crate::error::CodecError;
use crate::list::List8;
use crate::record::{Extends, FieldVisitor, Fields, Record};

#[derive(Debug, Clone, PartialEq)]
pub struct WarfareFamilyPdu {
    pub header: PduHeader,
    pub firing_entity_id: EntityId,
    pub target_entity_id: EntityId,
}

impl WarfareFamilyPdu {
    pub fn new(pdu_type: u8) -> Self {
        WarfareFamilyPdu {
            header: PduHeader::new(pdu_type, protocol_family::WARFARE),
            firing_entity_id: EntityId::default(),
            target_entity_id: EntityId::default(),
        }
    }
}

impl Default for WarfareFamilyPdu {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Fields for WarfareFamilyPdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.header);
        v.record("firing_entity_id", &self.firing_entity_id);
        v.record("target_entity_id", &self.target_entity_id);
    }
}

impl Record for WarfareFamilyPdu {
    const NAME: &'static str = "WarfareFamilyPdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(WarfareFamilyPdu {
            header: r.base()?,
            firing_entity_id: r.record("firing_entity_id")?,
            target_entity_id: r.record("target_entity_id")?,
        })
    }
}

impl Extends for WarfareFamilyPdu {
    type Base = PduHeader;

    fn base(&self) -> &PduHeader {
        &self.header
    }

    fn base_mut(&mut self) -> &mut PduHeader {
        &mut self.header
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FirePdu {
    pub family: WarfareFamilyPdu,
    pub munition_id: EntityId,
    pub event_id: EventId,
    pub fire_mission_index: u32,
    pub location_in_world: Vector3Double,
    pub burst_descriptor: BurstDescriptor,
    pub velocity: Vector3Float,
    /// Metres.
    pub range: f32,
}

impl Default for FirePdu {
    fn default() -> Self {
        FirePdu {
            family: WarfareFamilyPdu::new(pdu_type::FIRE),
            munition_id: EntityId::default(),
            event_id: EventId::default(),
            fire_mission_index: 0,
            location_in_world: Vector3Double::default(),
            burst_descriptor: BurstDescriptor::default(),
            velocity: Vector3Float::default(),
            range: 0.0,
        }
    }
}

impl Fields for FirePdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.family);
        v.record("munition_id", &self.munition_id);
        v.record("event_id", &self.event_id);
        v.scalar("fire_mission_index", self.fire_mission_index);
        v.record("location_in_world", &self.location_in_world);
        v.record("burst_descriptor", &self.burst_descriptor);
        v.record("velocity", &self.velocity);
        v.scalar("range", self.range);
    }
}

impl Record for FirePdu {
    const NAME: &'static str = "FirePdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(FirePdu {
            family: r.base()?,
            munition_id: r.record("munition_id")?,
            event_id: r.record("event_id")?,
            fire_mission_index: r.scalar("fire_mission_index")?,
            location_in_world: r.record("location_in_world")?,
            burst_descriptor: r.record("burst_descriptor")?,
            velocity: r.record("velocity")?,
            range: r.scalar("range")?,
        })
    }
}

impl Extends for FirePdu {
    type Base = WarfareFamilyPdu;

    fn base(&self) -> &WarfareFamilyPdu {
        &self.family
    }

    fn base_mut(&mut self) -> &mut WarfareFamilyPdu {
        &mut self.family
    }
}

/// Detonation or impact of a munition. The articulation parameter count is followed by
/// two pad bytes before the list.
#[derive(Debug, Clone, PartialEq)]
pub struct DetonationPdu {
    pub family: WarfareFamilyPdu,
    pub munition_id: EntityId,
    pub event_id: EventId,
    pub velocity: Vector3Float,
    pub location_in_world: Vector3Double,
    pub burst_descriptor: BurstDescriptor,
    pub location_in_entity_coordinates: Vector3Float,
    pub detonation_result: u8,
    pub pad: i16,
    pub articulation_parameters: List8<ArticulationParameter>,
}

impl DetonationPdu {
    pub fn articulation_parameter_count(&self) -> usize {
        self.articulation_parameters.count()
    }
}

impl Default for DetonationPdu {
    fn default() -> Self {
        DetonationPdu {
            family: WarfareFamilyPdu::new(pdu_type::DETONATION),
            munition_id: EntityId::default(),
            event_id: EventId::default(),
            velocity: Vector3Float::default(),
            location_in_world: Vector3Double::default(),
            burst_descriptor: BurstDescriptor::default(),
            location_in_entity_coordinates: Vector3Float::default(),
            detonation_result: 0,
            pad: 0,
            articulation_parameters: List8::new(),
        }
    }
}

impl Fields for DetonationPdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.family);
        v.record("munition_id", &self.munition_id);
        v.record("event_id", &self.event_id);
        v.record("velocity", &self.velocity);
        v.record("location_in_world", &self.location_in_world);
        v.record("burst_descriptor", &self.burst_descriptor);
        v.record("location_in_entity_coordinates", &self.location_in_entity_coordinates);
        v.scalar("detonation_result", self.detonation_result);
        v.count_of("number_of_articulation_parameters", &self.articulation_parameters);
        v.scalar("pad", self.pad);
        v.elements("articulation_parameters", &self.articulation_parameters);
    }
}

impl Record for DetonationPdu {
    const NAME: &'static str = "DetonationPdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let family = r.base()?;
        let munition_id = r.record("munition_id")?;
        let event_id = r.record("event_id")?;
        let velocity = r.record("velocity")?;
        let location_in_world = r.record("location_in_world")?;
        let burst_descriptor = r.record("burst_descriptor")?;
        let location_in_entity_coordinates = r.record("location_in_entity_coordinates")?;
        let detonation_result = r.scalar("detonation_result")?;
        let articulation_count = r.count::<u8>("number_of_articulation_parameters")?;
        let pad = r.scalar("pad")?;
        Ok(DetonationPdu {
            family,
            munition_id,
            event_id,
            velocity,
            location_in_world,
            burst_descriptor,
            location_in_entity_coordinates,
            detonation_result,
            pad,
            articulation_parameters: r.elements("articulation_parameters", articulation_count)?,
        })
    }
}

impl Extends for DetonationPdu {
    type Base = WarfareFamilyPdu;

    fn base(&self) -> &WarfareFamilyPdu {
        &self.family
    }

    fn base_mut(&mut self) -> &mut WarfareFamilyPdu {
        &mut self.family
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_pdu_sizes() {
        assert_eq!(WarfareFamilyPdu::default().encoded_size(), 24);
        assert_eq!(FirePdu::default().encoded_size(), 96);
        assert_eq!(DetonationPdu::default().encoded_size(), 104);
    }

    #[test]
    fn three_level_layout_is_header_family_own() {
        let mut pdu = FirePdu::default();
        pdu.family.header.exercise_id = 9;
        pdu.family.firing_entity_id = EntityId::new(1, 2, 3);
        pdu.munition_id = EntityId::new(4, 5, 6);
        let bytes = pdu.to_bytes();
        assert_eq!(bytes[1], 9);
        assert_eq!(&bytes[12..18], &[0, 1, 0, 2, 0, 3]);
        assert_eq!(&bytes[24..30], &[0, 4, 0, 5, 0, 6]);
    }

    #[test]
    fn detonation_count_then_pad_then_list() {
        let mut pdu = DetonationPdu::default();
        pdu.detonation_result = 5;
        pdu.articulation_parameters
            .push(ArticulationParameter {
                parameter_value: 1.5,
                ..Default::default()
            })
            .unwrap();
        let bytes = pdu.to_bytes();
        assert_eq!(bytes.len(), 120);
        assert_eq!(bytes[100], 5);
        assert_eq!(bytes[101], 1);
        assert_eq!(&bytes[102..104], &[0, 0]);
        assert_eq!(DetonationPdu::from_bytes(&bytes).unwrap(), pdu);
    }
}
