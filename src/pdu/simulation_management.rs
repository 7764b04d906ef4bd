//! Simulation management family (protocol family 5).
//!
//! Every PDU here is addressed from an originating to a receiving entity, both carried by
//! the family record.

use super::header::{pdu_type, protocol_family, PduHeader};
use super::records::{ClockTime, EntityId, FixedDatum, VariableDatum};
use crate::codec::Reader;
use crate::error::CodecError;
use crate::list::List32;
use crate::record::{Extends, FieldVisitor, Fields, Record};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationManagementFamilyPdu {
    pub header: PduHeader,
    pub originating_entity_id: EntityId,
    pub receiving_entity_id: EntityId,
}

impl SimulationManagementFamilyPdu {
    pub fn new(pdu_type: u8) -> Self {
        SimulationManagementFamilyPdu {
            header: PduHeader::new(pdu_type, protocol_family::SIMULATION_MANAGEMENT),
            originating_entity_id: EntityId::default(),
            receiving_entity_id: EntityId::default(),
        }
    }
}

impl Default for SimulationManagementFamilyPdu {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Fields for SimulationManagementFamilyPdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.header);
        v.record("originating_entity_id", &self.originating_entity_id);
        v.record("receiving_entity_id", &self.receiving_entity_id);
    }
}

impl Record for SimulationManagementFamilyPdu {
    const NAME: &'static str = "SimulationManagementFamilyPdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(SimulationManagementFamilyPdu {
            header: r.base()?,
            originating_entity_id: r.record("originating_entity_id")?,
            receiving_entity_id: r.record("receiving_entity_id")?,
        })
    }
}

impl Extends for SimulationManagementFamilyPdu {
    type Base = PduHeader;

    fn base(&self) -> &PduHeader {
        &self.header
    }

    fn base_mut(&mut self) -> &mut PduHeader {
        &mut self.header
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateEntityPdu {
    pub family: SimulationManagementFamilyPdu,
    pub request_id: u32,
}

impl Default for CreateEntityPdu {
    fn default() -> Self {
        CreateEntityPdu {
            family: SimulationManagementFamilyPdu::new(pdu_type::CREATE_ENTITY),
            request_id: 0,
        }
    }
}

impl Fields for CreateEntityPdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.family);
        v.scalar("request_id", self.request_id);
    }
}

impl Record for CreateEntityPdu {
    const NAME: &'static str = "CreateEntityPdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(CreateEntityPdu {
            family: r.base()?,
            request_id: r.scalar("request_id")?,
        })
    }
}

impl Extends for CreateEntityPdu {
    type Base = SimulationManagementFamilyPdu;

    fn base(&self) -> &SimulationManagementFamilyPdu {
        &self.family
    }

    fn base_mut(&mut self) -> &mut SimulationManagementFamilyPdu {
        &mut self.family
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveEntityPdu {
    pub family: SimulationManagementFamilyPdu,
    pub request_id: u32,
}

impl Default for RemoveEntityPdu {
    fn default() -> Self {
        RemoveEntityPdu {
            family: SimulationManagementFamilyPdu::new(pdu_type::REMOVE_ENTITY),
            request_id: 0,
        }
    }
}

impl Fields for RemoveEntityPdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.family);
        v.scalar("request_id", self.request_id);
    }
}

impl Record for RemoveEntityPdu {
    const NAME: &'static str = "RemoveEntityPdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(RemoveEntityPdu {
            family: r.base()?,
            request_id: r.scalar("request_id")?,
        })
    }
}

impl Extends for RemoveEntityPdu {
    type Base = SimulationManagementFamilyPdu;

    fn base(&self) -> &SimulationManagementFamilyPdu {
        &self.family
    }

    fn base_mut(&mut self) -> &mut SimulationManagementFamilyPdu {
        &mut self.family
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartResumePdu {
    pub family: SimulationManagementFamilyPdu,
    pub real_world_time: ClockTime,
    pub simulation_time: ClockTime,
    pub request_id: u32,
}

impl Default for StartResumePdu {
    fn default() -> Self {
        StartResumePdu {
            family: SimulationManagementFamilyPdu::new(pdu_type::START_RESUME),
            real_world_time: ClockTime::default(),
            simulation_time: ClockTime::default(),
            request_id: 0,
        }
    }
}

impl Fields for StartResumePdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.family);
        v.record("real_world_time", &self.real_world_time);
        v.record("simulation_time", &self.simulation_time);
        v.scalar("request_id", self.request_id);
    }
}

impl Record for StartResumePdu {
    const NAME: &'static str = "StartResumePdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(StartResumePdu {
            family: r.base()?,
            real_world_time: r.record("real_world_time")?,
            simulation_time: r.record("simulation_time")?,
            request_id: r.scalar("request_id")?,
        })
    }
}

impl Extends for StartResumePdu {
    type Base = SimulationManagementFamilyPdu;

    fn base(&self) -> &SimulationManagementFamilyPdu {
        &self.family
    }

    fn base_mut(&mut self) -> &mut SimulationManagementFamilyPdu {
        &mut self.family
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StopFreezePdu {
    pub family: SimulationManagementFamilyPdu,
    pub real_world_time: ClockTime,
    pub reason: u8,
    pub frozen_behavior: u8,
    pub padding1: i16,
    pub request_id: u32,
}

impl Default for StopFreezePdu {
    fn default() -> Self {
        StopFreezePdu {
            family: SimulationManagementFamilyPdu::new(pdu_type::STOP_FREEZE),
            real_world_time: ClockTime::default(),
            reason: 0,
            frozen_behavior: 0,
            padding1: 0,
            request_id: 0,
        }
    }
}

impl Fields for StopFreezePdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.family);
        v.record("real_world_time", &self.real_world_time);
        v.scalar("reason", self.reason);
        v.scalar("frozen_behavior", self.frozen_behavior);
        v.scalar("padding1", self.padding1);
        v.scalar("request_id", self.request_id);
    }
}

impl Record for StopFreezePdu {
    const NAME: &'static str = "StopFreezePdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(StopFreezePdu {
            family: r.base()?,
            real_world_time: r.record("real_world_time")?,
            reason: r.scalar("reason")?,
            frozen_behavior: r.scalar("frozen_behavior")?,
            padding1: r.scalar("padding1")?,
            request_id: r.scalar("request_id")?,
        })
    }
}

impl Extends for StopFreezePdu {
    type Base = SimulationManagementFamilyPdu;

    fn base(&self) -> &SimulationManagementFamilyPdu {
        &self.family
    }

    fn base_mut(&mut self) -> &mut SimulationManagementFamilyPdu {
        &mut self.family
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcknowledgePdu {
    pub family: SimulationManagementFamilyPdu,
    pub acknowledge_flag: u16,
    pub response_flag: u16,
    pub request_id: u32,
}

impl Default for AcknowledgePdu {
    fn default() -> Self {
        AcknowledgePdu {
            family: SimulationManagementFamilyPdu::new(pdu_type::ACKNOWLEDGE),
            acknowledge_flag: 0,
            response_flag: 0,
            request_id: 0,
        }
    }
}

impl Fields for AcknowledgePdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.family);
        v.scalar("acknowledge_flag", self.acknowledge_flag);
        v.scalar("response_flag", self.response_flag);
        v.scalar("request_id", self.request_id);
    }
}

impl Record for AcknowledgePdu {
    const NAME: &'static str = "AcknowledgePdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(AcknowledgePdu {
            family: r.base()?,
            acknowledge_flag: r.scalar("acknowledge_flag")?,
            response_flag: r.scalar("response_flag")?,
            request_id: r.scalar("request_id")?,
        })
    }
}

impl Extends for AcknowledgePdu {
    type Base = SimulationManagementFamilyPdu;

    fn base(&self) -> &SimulationManagementFamilyPdu {
        &self.family
    }

    fn base_mut(&mut self) -> &mut SimulationManagementFamilyPdu {
        &mut self.family
    }
}

/// Both datum counts are written ahead of both lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequestPdu {
    pub family: SimulationManagementFamilyPdu,
    pub request_id: u32,
    pub action_id: u32,
    pub fixed_datums: List32<FixedDatum>,
    pub variable_datums: List32<VariableDatum>,
}

impl ActionRequestPdu {
    pub fn fixed_datum_count(&self) -> usize {
        self.fixed_datums.count()
    }

    pub fn variable_datum_count(&self) -> usize {
        self.variable_datums.count()
    }
}

impl Default for ActionRequestPdu {
    fn default() -> Self {
        ActionRequestPdu {
            family: SimulationManagementFamilyPdu::new(pdu_type::ACTION_REQUEST),
            request_id: 0,
            action_id: 0,
            fixed_datums: List32::new(),
            variable_datums: List32::new(),
        }
    }
}

impl Fields for ActionRequestPdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.family);
        v.scalar("request_id", self.request_id);
        v.scalar("action_id", self.action_id);
        v.count_of("number_of_fixed_datum_records", &self.fixed_datums);
        v.count_of("number_of_variable_datum_records", &self.variable_datums);
        v.elements("fixed_datums", &self.fixed_datums);
        v.elements("variable_datums", &self.variable_datums);
    }
}

impl Record for ActionRequestPdu {
    const NAME: &'static str = "ActionRequestPdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let family = r.base()?;
        let request_id = r.scalar("request_id")?;
        let action_id = r.scalar("action_id")?;
        let fixed_count = r.count::<u32>("number_of_fixed_datum_records")?;
        let variable_count = r.count::<u32>("number_of_variable_datum_records")?;
        Ok(ActionRequestPdu {
            family,
            request_id,
            action_id,
            fixed_datums: r.elements("fixed_datums", fixed_count)?,
            variable_datums: r.elements("variable_datums", variable_count)?,
        })
    }
}

impl Extends for ActionRequestPdu {
    type Base = SimulationManagementFamilyPdu;

    fn base(&self) -> &SimulationManagementFamilyPdu {
        &self.family
    }

    fn base_mut(&mut self) -> &mut SimulationManagementFamilyPdu {
        &mut self.family
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataPdu {
    pub family: SimulationManagementFamilyPdu,
    pub request_id: u32,
    pub padding1: u32,
    pub fixed_datums: List32<FixedDatum>,
    pub variable_datums: List32<VariableDatum>,
}

impl DataPdu {
    pub fn fixed_datum_count(&self) -> usize {
        self.fixed_datums.count()
    }

    pub fn variable_datum_count(&self) -> usize {
        self.variable_datums.count()
    }
}

impl Default for DataPdu {
    fn default() -> Self {
        DataPdu {
            family: SimulationManagementFamilyPdu::new(pdu_type::DATA),
            request_id: 0,
            padding1: 0,
            fixed_datums: List32::new(),
            variable_datums: List32::new(),
        }
    }
}

impl Fields for DataPdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.family);
        v.scalar("request_id", self.request_id);
        v.scalar("padding1", self.padding1);
        v.count_of("number_of_fixed_datum_records", &self.fixed_datums);
        v.count_of("number_of_variable_datum_records", &self.variable_datums);
        v.elements("fixed_datums", &self.fixed_datums);
        v.elements("variable_datums", &self.variable_datums);
    }
}

impl Record for DataPdu {
    const NAME: &'static str = "DataPdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let family = r.base()?;
        let request_id = r.scalar("request_id")?;
        let padding1 = r.scalar("padding1")?;
        let fixed_count = r.count::<u32>("number_of_fixed_datum_records")?;
        let variable_count = r.count::<u32>("number_of_variable_datum_records")?;
        Ok(DataPdu {
            family,
            request_id,
            padding1,
            fixed_datums: r.elements("fixed_datums", fixed_count)?,
            variable_datums: r.elements("variable_datums", variable_count)?,
        })
    }
}

impl Extends for DataPdu {
    type Base = SimulationManagementFamilyPdu;

    fn base(&self) -> &SimulationManagementFamilyPdu {
        &self.family
    }

    fn base_mut(&mut self) -> &mut SimulationManagementFamilyPdu {
        &mut self.family
    }
}

/// Free-form datums, typically text carried in variable datums.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentPdu {
    pub family: SimulationManagementFamilyPdu,
    pub fixed_datums: List32<FixedDatum>,
    pub variable_datums: List32<VariableDatum>,
}

impl CommentPdu {
    pub fn fixed_datum_count(&self) -> usize {
        self.fixed_datums.count()
    }

    pub fn variable_datum_count(&self) -> usize {
        self.variable_datums.count()
    }
}

impl Default for CommentPdu {
    fn default() -> Self {
        CommentPdu {
            family: SimulationManagementFamilyPdu::new(pdu_type::COMMENT),
            fixed_datums: List32::new(),
            variable_datums: List32::new(),
        }
    }
}

impl Fields for CommentPdu {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.base(&self.family);
        v.count_of("number_of_fixed_datum_records", &self.fixed_datums);
        v.count_of("number_of_variable_datum_records", &self.variable_datums);
        v.elements("fixed_datums", &self.fixed_datums);
        v.elements("variable_datums", &self.variable_datums);
    }
}

impl Record for CommentPdu {
    const NAME: &'static str = "CommentPdu";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let family = r.base()?;
        let fixed_count = r.count::<u32>("number_of_fixed_datum_records")?;
        let variable_count = r.count::<u32>("number_of_variable_datum_records")?;
        Ok(CommentPdu {
            family,
            fixed_datums: r.elements("fixed_datums", fixed_count)?,
            variable_datums: r.elements("variable_datums", variable_count)?,
        })
    }
}

impl Extends for CommentPdu {
    type Base = SimulationManagementFamilyPdu;

    fn base(&self) -> &SimulationManagementFamilyPdu {
        &self.family
    }

    fn base_mut(&mut self) -> &mut SimulationManagementFamilyPdu {
        &mut self.family
    }
}
