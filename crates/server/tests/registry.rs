//! State enumeration, registration order and the persisted identity round
//! trip.

use rung_engine::world::block::BlockId;
use rung_engine::world::face::Face;
use rung_server::block::{self, Block, Ladder};
use rung_server::registry::{EncodedBlock, Properties, PropertyValue, Registry};

#[test]
fn ladder_states_follow_canonical_face_order() {
    let states = Ladder::all_states();
    assert_eq!(states.len(), 6);
    for (i, ladder) in states.iter().enumerate() {
        assert_eq!(ladder.facing.index(), i as i32);
        assert_eq!(ladder.facing, Face::ALL[i]);
    }
}

#[test]
fn bootstrap_registers_every_state_once() {
    let registry = Registry::bootstrap().unwrap();
    assert_eq!(registry.len(), Block::all_states().len());
    assert_eq!(registry.id(&block::AIR), Some(BlockId::AIR));

    for (i, state) in registry.states().iter().enumerate() {
        assert_eq!(registry.id(state), Some(BlockId::new(i as u16)));
        assert_eq!(registry.block(BlockId::new(i as u16)), Some(*state));
    }

    // Ladders are registered contiguously, in face order.
    let first = registry.id(&Block::from(Ladder::new(Face::Down))).unwrap();
    for face in Face::ALL {
        let id = registry.id(&Block::from(Ladder::new(face))).unwrap();
        assert_eq!(id.0, first.0 + face.index() as u16);
    }
    assert_eq!(registry.block(BlockId::new(registry.len() as u16)), None);
}

#[test]
fn every_state_survives_a_json_round_trip() {
    let registry = Registry::bootstrap().unwrap();
    for state in registry.states() {
        let json = EncodedBlock::of(state).to_json().unwrap();
        let decoded = EncodedBlock::from_json(&json).unwrap();
        assert_eq!(registry.decode(&decoded), Some(*state), "{json}");
    }
}

#[test]
fn ladder_wire_shape() {
    let json = EncodedBlock::of(&Block::from(Ladder::new(Face::West))).to_json().unwrap();
    assert_eq!(json, r#"{"name":"minecraft:ladder","properties":{"facing_direction":4}}"#);

    let registry = Registry::bootstrap().unwrap();
    for face in [Face::Up, Face::Down] {
        let encoded = EncodedBlock::from_json(&format!(
            r#"{{"name":"minecraft:ladder","properties":{{"facing_direction":{}}}}}"#,
            face.index()
        ))
        .unwrap();
        // Stored vertical ladders come back exactly as they were.
        assert_eq!(registry.decode(&encoded), Some(Block::from(Ladder::new(face))));
    }
}

#[test]
fn decode_ignores_property_order_and_rejects_unknowns() {
    let registry = Registry::bootstrap().unwrap();

    let mut props = Properties::new();
    props.insert("update_bit".into(), PropertyValue::Bool(false));
    props.insert("persistent_bit".into(), PropertyValue::Bool(false));
    assert_eq!(registry.decode_block("minecraft:oak_leaves", &props), Some(block::LEAVES));

    let mut bad = Properties::new();
    bad.insert("facing_direction".into(), PropertyValue::Int(6));
    assert_eq!(registry.decode_block("minecraft:ladder", &bad), None);
    assert_eq!(registry.decode_block("minecraft:ladder", &Properties::new()), None);
    assert_eq!(registry.decode_block("minecraft:cobweb", &Properties::new()), None);
}

#[test]
fn item_form_round_trip() {
    let registry = Registry::bootstrap().unwrap();
    for state in registry.states() {
        let Some(encoder) = state.item_encoder() else {
            continue;
        };
        let (name, meta) = encoder.encode_item();
        let decoded = registry.decode_item(name, meta).unwrap();
        assert_eq!(decoded.item_encoder().unwrap().encode_item(), (name, meta));
    }
    assert_eq!(
        registry.decode_item("minecraft:ladder", 0),
        Some(Block::from(Ladder::new(Face::Down)))
    );
    assert_eq!(registry.decode_item("minecraft:ladder", 1), None);
    assert_eq!(registry.decode_item("minecraft:air", 0), None);
}

#[test]
fn bad_registration_tables_are_rejected() {
    assert!(Registry::from_states([block::AIR, block::STONE, block::STONE]).is_err());
    assert!(Registry::from_states([block::STONE, block::AIR]).is_err());
    assert!(Registry::from_states(Vec::<Block>::new()).is_err());
    assert!(Registry::from_states([block::AIR]).is_ok());
}

#[test]
fn decode_is_strict_about_value_types() {
    let registry = Registry::bootstrap().unwrap();

    let mut as_string = Properties::new();
    as_string.insert("facing_direction".into(), PropertyValue::Str("2".into()));
    assert_eq!(registry.decode_block("minecraft:ladder", &as_string), None);

    let mut leaves = Properties::new();
    leaves.insert("persistent_bit".into(), PropertyValue::Str("false".into()));
    leaves.insert("update_bit".into(), PropertyValue::Bool(false));
    assert_eq!(registry.decode_block("minecraft:oak_leaves", &leaves), None);

    let json = r#"{"name":"minecraft:ladder","properties":{"facing_direction":"2"}}"#;
    assert_eq!(registry.decode(&EncodedBlock::from_json(json).unwrap()), None);

    let mut as_int = Properties::new();
    as_int.insert("facing_direction".into(), PropertyValue::Int(2));
    assert_eq!(
        registry.decode_block("minecraft:ladder", &as_int),
        Some(Block::from(Ladder::new(Face::North)))
    );
}
