//! Record-level tests: wire layout, size, hashing, equality, inheritance, counts,
//! auto-length and truncation across the PDU catalogue.

use dispdu::pdu::pdu_type;
use dispdu::{
    equals, install_length, size_of, AcknowledgePdu, ActionRequestPdu, ArticulationParameter, ClockTime,
    CodecError, CollisionPdu, CommentPdu, CreateEntityPdu, DataPdu, DeclaredType, DetonationPdu,
    Endianness, EntityId, EntityStatePdu, EventId, Extends, FieldValue, FieldVisitor, Fields, FirePdu,
    FixedDatum, List8, Marking, Pdu, PduRecord, Reader, Record, RemoveEntityPdu, Scalar, ScalarKind,
    StartResumePdu, StopFreezePdu, VariableDatum, Vector3Double, Vector3Float, Writer,
};

/// A record holding one list of 8-byte elements behind a 1-byte count.
#[derive(Debug, Clone, Default, PartialEq)]
struct FixedDatumSet {
    datums: List8<FixedDatum>,
}

impl Fields for FixedDatumSet {
    fn record_name(&self) -> &'static str {
        Self::NAME
    }

    fn visit_fields(&self, v: &mut dyn FieldVisitor) {
        v.list("datums", &self.datums);
    }
}

impl Record for FixedDatumSet {
    const NAME: &'static str = "FixedDatumSet";

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(FixedDatumSet {
            datums: r.list("datums")?,
        })
    }
}

fn sample_entity_state() -> EntityStatePdu {
    let mut pdu = EntityStatePdu::default();
    pdu.family.header.exercise_id = 3;
    pdu.family.header.timestamp = 123_456;
    pdu.entity_id = EntityId::new(1, 2, 3);
    pdu.force_id = 1;
    pdu.entity_type.entity_kind = 1;
    pdu.entity_type.country = 225;
    pdu.entity_linear_velocity = Vector3Float::new(1.5, -2.0, 0.25);
    pdu.entity_location = Vector3Double::new(4_000_000.0, -1_200_000.5, 3_900_000.0);
    pdu.entity_orientation.psi = 0.5;
    pdu.entity_appearance = -7;
    pdu.dead_reckoning_parameters.algorithm = 2;
    pdu.marking = Marking::ascii("EAGLE1");
    pdu.capabilities = 9;
    for i in 0..2u16 {
        pdu.articulation_parameters
            .push(ArticulationParameter {
                parameter_type_designator: 0,
                change_indicator: i as u8,
                part_attached_to: i,
                parameter_type: 4096 + u32::from(i),
                parameter_value: f64::from(i) * 0.5,
            })
            .expect("push");
    }
    pdu
}

fn sample_data_pdu() -> DataPdu {
    let mut pdu = DataPdu::default();
    pdu.family.originating_entity_id = EntityId::new(1, 1, 1);
    pdu.request_id = 55;
    pdu.fixed_datums.push(FixedDatum::new(100, 1)).expect("push");
    pdu.fixed_datums.push(FixedDatum::new(101, 2)).expect("push");
    pdu.variable_datums
        .push(VariableDatum::from_payload(200, b"variable payload").expect("datum"))
        .expect("push");
    pdu
}

fn sample_pdus() -> Vec<Pdu> {
    let mut fire = FirePdu::default();
    fire.range = 1500.0;
    fire.burst_descriptor.quantity = 3;

    let mut detonation = DetonationPdu::default();
    detonation.detonation_result = 1;
    detonation
        .articulation_parameters
        .push(ArticulationParameter::default())
        .expect("push");

    let mut collision = CollisionPdu::default();
    collision.mass = 12_000.0;

    let mut start = StartResumePdu::default();
    start.real_world_time = ClockTime {
        hour: 12,
        time_past_hour: 99,
    };

    let mut action = ActionRequestPdu::default();
    action.action_id = 4;
    action.fixed_datums.push(FixedDatum::new(1, 1)).expect("push");

    let mut comment = CommentPdu::default();
    comment
        .variable_datums
        .push(VariableDatum::from_payload(1, b"hello").expect("datum"))
        .expect("push");

    vec![
        sample_entity_state().into(),
        fire.into(),
        detonation.into(),
        collision.into(),
        CreateEntityPdu::default().into(),
        RemoveEntityPdu::default().into(),
        start.into(),
        StopFreezePdu::default().into(),
        AcknowledgePdu::default().into(),
        action.into(),
        sample_data_pdu().into(),
        comment.into(),
    ]
}

#[test]
fn test_entity_id_wire_layout() {
    let id = EntityId::new(7, 12, 300);
    let bytes = id.to_bytes();
    assert_eq!(bytes, vec![0x00, 0x07, 0x00, 0x0C, 0x01, 0x2C]);

    let decoded = EntityId::from_bytes(&bytes).expect("decode");
    assert_eq!(decoded, id);
    assert_eq!(decoded.structural_hash(), id.structural_hash());
    assert_eq!(id.structural_hash(), id.structural_hash());

    let mut changed = id.clone();
    changed.entity = 301;
    assert_ne!(changed, id);
    assert!(!equals(&changed, &id));
    assert_ne!(changed.structural_hash(), id.structural_hash());
}

#[test]
fn test_entity_id_little_endian() {
    let id = EntityId::new(7, 12, 300);
    let bytes = id.to_bytes_with(Endianness::Little);
    assert_eq!(bytes, vec![0x07, 0x00, 0x0C, 0x00, 0x2C, 0x01]);
    assert_eq!(EntityId::from_bytes_with(&bytes, Endianness::Little).expect("decode"), id);
}

#[test]
fn test_one_byte_count_list_sizes() {
    let mut set = FixedDatumSet::default();
    assert_eq!(set.to_bytes(), vec![0]);
    assert_eq!(set.encoded_size(), 1);

    for i in 0..3 {
        set.datums.push(FixedDatum::new(i, i * 10)).expect("push");
    }
    let bytes = set.to_bytes();
    assert_eq!(bytes.len(), 25);
    assert_eq!(size_of(&set), 25);
    assert_eq!(bytes[0], 3);
    assert_eq!(FixedDatumSet::from_bytes(&bytes).expect("decode"), set);
}

#[test]
fn test_list_count_follows_list_length() {
    let mut pdu = sample_entity_state();
    let bytes = pdu.to_bytes();
    // header (12) + entity_id (6) + force_id (1)
    assert_eq!(bytes[19], 2);

    pdu.articulation_parameters.truncate(1);
    assert_eq!(pdu.articulation_parameter_count(), 1);
    let bytes = pdu.to_bytes();
    assert_eq!(bytes[19], 1);
    assert_eq!(bytes.len(), 144 + 16);

    let decoded = EntityStatePdu::from_bytes(&bytes).expect("decode");
    assert_eq!(decoded.articulation_parameters.len(), 1);
    assert_eq!(decoded, pdu);
}

#[test]
fn test_decoded_list_length_comes_from_wire_count() {
    let mut set = FixedDatumSet::default();
    set.datums.push(FixedDatum::new(1, 2)).expect("push");
    set.datums.push(FixedDatum::new(3, 4)).expect("push");
    let mut bytes = set.to_bytes();
    bytes[0] = 1;
    let decoded = FixedDatumSet::from_bytes(&bytes).expect("decode");
    assert_eq!(decoded.datums.count(), 1);
    assert_eq!(decoded.datums[0], FixedDatum::new(1, 2));
}

#[test]
fn test_size_matches_encoding_for_every_pdu() {
    for pdu in sample_pdus() {
        let bytes = pdu.to_bytes_with(Endianness::Big);
        assert_eq!(pdu.encoded_size(), bytes.len(), "{}", pdu.record_name());
        assert_eq!(size_of(pdu.as_fields()), bytes.len(), "{}", pdu.record_name());
    }
}

#[test]
fn test_round_trip_every_pdu() {
    for endianness in [Endianness::Big, Endianness::Little] {
        for pdu in sample_pdus() {
            let bytes = pdu.to_bytes_with(endianness);
            let decoded = Pdu::decode(&bytes, endianness).expect("decode");
            assert_eq!(decoded, pdu);
            assert_eq!(decoded.structural_hash(), pdu.structural_hash());
            assert!(equals(decoded.as_fields(), pdu.as_fields()));
        }
    }
}

#[test]
fn test_truncated_input_never_yields_partial_record() {
    for pdu in sample_pdus() {
        let bytes = pdu.to_bytes_with(Endianness::Big);
        for n in 0..bytes.len() {
            let err = Pdu::decode(&bytes[..n], Endianness::Big).expect_err("prefix must fail");
            assert!(
                matches!(err, CodecError::TruncatedInput { .. } | CodecError::InvalidLength { .. }),
                "{} prefix {}: {:?}",
                pdu.record_name(),
                n,
                err
            );
        }
    }
}

#[test]
fn test_fixed_size_truncation_is_truncated_input() {
    let pdu = FirePdu::default();
    let bytes = pdu.to_bytes();
    for n in 0..bytes.len() {
        let err = FirePdu::from_bytes(&bytes[..n]).expect_err("prefix must fail");
        assert!(err.is_truncated(), "prefix {}: {:?}", n, err);
        assert_eq!(err.record(), Some("FirePdu"));
    }
}

#[test]
fn test_truncation_reports_field_path() {
    let pdu = sample_entity_state();
    let bytes = pdu.to_bytes();
    // header (12) .. capabilities ends at 144; marking occupies 128..140.
    let err = EntityStatePdu::from_bytes(&bytes[..135]).expect_err("must fail");
    assert!(err.is_truncated());
    assert_eq!(err.record(), Some("EntityStatePdu"));
    assert_eq!(err.path(), Some("marking.characters"));

    let err = EntityStatePdu::from_bytes(&bytes[..bytes.len() - 4]).expect_err("must fail");
    match err {
        CodecError::InvalidLength { path, count, needed, .. } => {
            assert_eq!(path, "articulation_parameters");
            assert_eq!(count, 2);
            assert_eq!(needed, 32);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_count_beyond_input_is_invalid_length() {
    let datum = VariableDatum::from_payload(9, &[1; 24]).expect("datum");
    let bytes = datum.to_bytes();
    let err = VariableDatum::from_bytes(&bytes[..bytes.len() - 3]).expect_err("must fail");
    assert!(matches!(err, CodecError::InvalidLength { count: 3, .. }));

    let mut set = FixedDatumSet::default();
    set.datums.push(FixedDatum::new(1, 1)).expect("push");
    let mut bytes = set.to_bytes();
    bytes.truncate(6);
    let err = FixedDatumSet::from_bytes(&bytes).expect_err("must fail");
    assert!(matches!(err, CodecError::InvalidLength { .. }));

    let pdu = sample_data_pdu();
    let bytes = pdu.to_bytes();
    assert_eq!(bytes.len(), 80);
    let err = DataPdu::from_bytes(&bytes[..76]).expect_err("must fail");
    assert_eq!(err.record(), Some("DataPdu"));
    assert_eq!(err.path(), Some("variable_datums[0].variable_datums"));
}

#[test]
fn test_element_past_end_is_truncated_at_index() {
    let mut comment = CommentPdu::default();
    comment
        .variable_datums
        .push(VariableDatum::from_payload(1, b"abc").expect("datum"))
        .expect("push");
    comment
        .variable_datums
        .push(VariableDatum::from_payload(2, &[7; 8]).expect("datum"))
        .expect("push");
    let bytes = comment.to_bytes();
    assert_eq!(bytes.len(), 32 + 16 + 16);

    // Both datums pass the minimum-size check; the second runs out inside its chunk count.
    let err = CommentPdu::from_bytes(&bytes[..54]).expect_err("must fail");
    assert!(err.is_truncated(), "{err}");
    assert_eq!(err.record(), Some("CommentPdu"));
    assert_eq!(err.path(), Some("variable_datums[1].variable_datums"));
    assert!(matches!(err, CodecError::TruncatedInput { needed: 4, remaining: 2, .. }));
}

#[test]
fn test_inheritance_prefix_layout() {
    fn check<R: Extends>(record: &R) {
        let mut expected = record.base().to_bytes();
        expected.extend(record.own_fields_to_bytes(Endianness::Big));
        assert_eq!(record.to_bytes(), expected, "{}", R::NAME);
    }

    let espdu = sample_entity_state();
    check(&espdu);
    check(&espdu.family);
    check(&sample_data_pdu());
    check(&sample_data_pdu().family);

    let mut fire = FirePdu::default();
    fire.family.firing_entity_id = EntityId::new(5, 6, 7);
    fire.velocity = Vector3Float::new(1.0, 2.0, 3.0);
    check(&fire);
    check(&fire.family);

    let own = fire.own_fields_to_bytes(Endianness::Big);
    assert_eq!(own.len(), 96 - 24);
}

#[test]
fn test_auto_length_ignores_previous_value() {
    for stale in [0u16, 1, 9999, u16::MAX] {
        let mut pdu = sample_data_pdu();
        pdu.header_mut().length = stale;
        let size = install_length(&mut pdu).expect("fits");
        assert_eq!(size, pdu.encoded_size());
        assert_eq!(usize::from(pdu.header().length), size);
    }
}

#[test]
fn test_auto_length_written_at_header_offset() {
    let mut pdu = sample_entity_state();
    let mut w = Writer::new(Endianness::Big);
    dispdu::encode_with_computed_length(&mut pdu, &mut w).expect("encode");
    let bytes = w.into_bytes();
    let length = u16::from_be_bytes([bytes[8], bytes[9]]);
    assert_eq!(usize::from(length), bytes.len());
    assert_eq!(length, 144 + 32);
}

#[test]
fn test_auto_length_overflow() {
    let mut pdu = CommentPdu::default();
    // 32 + 8 + n * 8 > 65535
    let payload = vec![0u8; 65_536];
    pdu.variable_datums
        .push(VariableDatum::from_payload(1, &payload).expect("datum"))
        .expect("push");
    let err = install_length(&mut pdu).expect_err("too long");
    assert!(matches!(
        err,
        CodecError::LengthOverflow {
            record: "CommentPdu",
            max: 65535,
            ..
        }
    ));
    assert_eq!(pdu.header().length, 0);
}

#[test]
fn test_equals_requires_same_concrete_type() {
    let id = EntityId::new(1, 2, 3);
    let event = EventId {
        site: 1,
        application: 2,
        event_number: 3,
    };
    assert_eq!(id.to_bytes(), event.to_bytes());
    assert!(!equals(&id, &event));
    assert!(equals(&id, &id.clone()));

    let create: Pdu = CreateEntityPdu::default().into();
    let mut remove: Pdu = RemoveEntityPdu::default().into();
    remove.header_mut().pdu_type = pdu_type::CREATE_ENTITY;
    assert!(!equals(create.as_fields(), remove.as_fields()));
}

#[test]
fn test_hash_is_field_order_sensitive() {
    let a = EntityId::new(1, 2, 3);
    let b = EntityId::new(3, 2, 1);
    assert_ne!(a.structural_hash(), b.structural_hash());

    let mut x = sample_data_pdu();
    let y = x.clone();
    x.fixed_datums.swap(0, 1);
    assert_ne!(x.structural_hash(), y.structural_hash());
}

#[test]
fn test_describe_paths_and_types() {
    let pdu = sample_entity_state();
    let entries = pdu.describe();

    assert_eq!(entries[0].path, "protocol_version");
    assert_eq!(entries[0].declared, DeclaredType::Scalar(ScalarKind::U8));
    assert_eq!(entries[0].value, FieldValue::Scalar(Scalar::U8(6)));

    let count = entries
        .iter()
        .find(|e| e.path == "number_of_articulation_parameters")
        .expect("count entry");
    assert_eq!(count.value, FieldValue::Count(2));

    let marking = entries
        .iter()
        .find(|e| e.path == "marking.characters")
        .expect("marking entry");
    assert_eq!(marking.declared, DeclaredType::Bytes(11));

    let last = entries.last().expect("entries");
    assert_eq!(last.path, "articulation_parameters[1].parameter_value");
    assert_eq!(last.value, FieldValue::Scalar(Scalar::F64(0.5)));

    let header_fields = entries.iter().take_while(|e| !e.path.starts_with("entity_id")).count();
    assert_eq!(header_fields, 7);
}

#[test]
fn test_deep_copy_is_independent() {
    let original = sample_entity_state();
    let mut copy = original.clone();
    copy.articulation_parameters[0].parameter_value = 99.0;
    copy.articulation_parameters.pop();
    assert_eq!(original.articulation_parameter_count(), 2);
    assert_eq!(original.articulation_parameters[0].parameter_value, 0.0);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn finite_f32() -> impl Strategy<Value = f32> {
        -1.0e6f32..1.0e6f32
    }

    fn finite_f64() -> impl Strategy<Value = f64> {
        -1.0e9f64..1.0e9f64
    }

    fn arb_articulation() -> impl Strategy<Value = ArticulationParameter> {
        (any::<u8>(), any::<u8>(), any::<u16>(), any::<u32>(), finite_f64()).prop_map(
            |(designator, change, part, parameter_type, value)| ArticulationParameter {
                parameter_type_designator: designator,
                change_indicator: change,
                part_attached_to: part,
                parameter_type,
                parameter_value: value,
            },
        )
    }

    fn arb_entity_state() -> impl Strategy<Value = EntityStatePdu> {
        (
            any::<(u16, u16, u16)>(),
            any::<u8>(),
            (finite_f32(), finite_f32(), finite_f32()),
            (finite_f64(), finite_f64(), finite_f64()),
            any::<i32>(),
            any::<[u8; 11]>(),
            proptest::collection::vec(arb_articulation(), 0..8),
        )
            .prop_map(|(id, force, vel, loc, appearance, chars, parts)| {
                let mut pdu = EntityStatePdu::default();
                pdu.entity_id = EntityId::new(id.0, id.1, id.2);
                pdu.force_id = force;
                pdu.entity_linear_velocity = Vector3Float::new(vel.0, vel.1, vel.2);
                pdu.entity_location = Vector3Double::new(loc.0, loc.1, loc.2);
                pdu.entity_appearance = appearance;
                pdu.marking.characters = chars;
                pdu.articulation_parameters = parts.try_into().expect("fits u8 count");
                pdu
            })
    }

    fn arb_data_pdu() -> impl Strategy<Value = DataPdu> {
        (
            any::<u32>(),
            proptest::collection::vec(any::<(u32, u32)>(), 0..6),
            proptest::collection::vec((any::<u32>(), proptest::collection::vec(any::<u8>(), 0..40)), 0..4),
        )
            .prop_map(|(request_id, fixed, variable)| {
                let mut pdu = DataPdu::default();
                pdu.request_id = request_id;
                for (id, value) in fixed {
                    pdu.fixed_datums.push(FixedDatum::new(id, value)).expect("push");
                }
                for (id, payload) in variable {
                    pdu.variable_datums
                        .push(VariableDatum::from_payload(id, &payload).expect("datum"))
                        .expect("push");
                }
                pdu
            })
    }

    proptest! {
        #[test]
        fn entity_state_round_trip(pdu in arb_entity_state()) {
            let bytes = pdu.to_bytes();
            prop_assert_eq!(bytes.len(), pdu.encoded_size());
            let decoded = EntityStatePdu::from_bytes(&bytes).unwrap();
            prop_assert_eq!(decoded.structural_hash(), pdu.structural_hash());
            prop_assert_eq!(decoded, pdu);
        }

        #[test]
        fn data_pdu_round_trip(pdu in arb_data_pdu()) {
            let bytes = pdu.to_bytes_with(Endianness::Little);
            prop_assert_eq!(bytes.len(), pdu.encoded_size());
            let decoded = DataPdu::from_bytes_with(&bytes, Endianness::Little).unwrap();
            prop_assert_eq!(decoded, pdu);
        }

        #[test]
        fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = Pdu::decode(&bytes, Endianness::Big);
            let _ = EntityStatePdu::from_bytes(&bytes);
        }
    }
}
