use rung_engine::causal::event::{Effect, EventPayload};
use rung_engine::world::World;
use rung_engine::world::block::BlockId;
use rung_engine::world::face::Face;
use rung_engine::world::position::{BlockPos, Vec3};

const STONE: BlockId = BlockId(1);
const LADDER: BlockId = BlockId(7);

#[test]
fn reads_see_pending_writes() {
    let world = World::new();
    let pos = BlockPos::new(3, 4, 5);
    world.set_block(pos, STONE);

    let mut tx = world.transaction();
    assert_eq!(tx.block(pos), STONE);
    tx.set_block(pos, BlockId::AIR);
    assert!(tx.block(pos).is_air());
    // The world itself is untouched until the events are applied.
    assert_eq!(world.get_block(pos), STONE);
}

#[test]
fn writes_are_recorded_with_their_old_value() {
    let world = World::new();
    let pos = BlockPos::new(0, 0, 0);
    world.set_block(pos, STONE);

    let mut tx = world.transaction();
    tx.set_block(pos, LADDER);
    tx.set_block(pos, LADDER);
    let events = tx.events();

    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].payload,
        EventPayload::BlockSet { pos, old: STONE, new: LADDER }
    );
}

#[test]
fn commit_applies_writes_in_order() {
    let world = World::new();
    let pos = BlockPos::new(0, 1, 0);

    let mut tx = world.transaction();
    tx.set_block(pos, STONE);
    tx.emit(pos.centre(), Effect::ItemDrop { item: STONE, count: 1 });
    tx.set_block(pos, LADDER);
    let events = tx.commit();

    assert_eq!(events.len(), 3);
    assert_eq!(world.get_block(pos), LADDER);
}

#[test]
fn air_is_not_stored() {
    let world = World::new();
    let pos = BlockPos::new(9, 9, 9);
    world.set_block(pos, STONE);
    assert_eq!(world.len(), 1);
    assert_eq!(world.set_block(pos, BlockId::AIR), STONE);
    assert!(world.is_empty());
}

#[test]
fn faces_are_canonical() {
    assert_eq!(Face::ALL.map(Face::index), [0, 1, 2, 3, 4, 5]);
    for face in Face::ALL {
        assert_eq!(face.opposite().opposite(), face);
        assert_ne!(face.opposite(), face);
        assert_eq!(Face::from_index(face.index()), Some(face));
        let pos = BlockPos::new(10, -3, 7);
        assert_eq!(pos.side(face).side(face.opposite()), pos);
        assert_eq!(Face::between(pos, pos.side(face)), Some(face));
    }
    assert_eq!(Face::from_index(6), None);
    assert_eq!(Face::from_index(-1), None);
    assert_eq!(BlockPos::new(0, 0, 0).side(Face::North), BlockPos::new(0, 0, -1));
    assert_eq!(BlockPos::new(0, 0, 0).side(Face::East), BlockPos::new(1, 0, 0));
}

#[test]
fn points_floor_to_cells() {
    assert_eq!(Vec3::new(-0.5, 2.0, 3.99).block_pos(), BlockPos::new(-1, 2, 3));
    assert_eq!(BlockPos::new(-1, 2, 3).centre().block_pos(), BlockPos::new(-1, 2, 3));
}

#[test]
fn effects_at_a_written_cell_follow_the_write() {
    let world = World::new();
    let pos = BlockPos::new(2, 2, 2);
    world.set_block(pos, LADDER);

    let mut tx = world.transaction();
    tx.emit(BlockPos::new(5, 5, 5).centre(), Effect::BlockBreak { block: STONE });
    tx.set_block(pos, BlockId::AIR);
    tx.emit(pos.centre(), Effect::BlockBreak { block: LADDER });
    tx.emit(pos.centre(), Effect::ItemDrop { item: LADDER, count: 1 });
    tx.notify(pos, pos);
    assert_eq!(tx.events().len(), 5);

    let batch = tx.into_batch();
    assert_eq!(batch.len(), 3);
    assert!(matches!(batch[0].event.payload, EventPayload::Effect { .. }));
    assert!(batch[0].follow_ups.is_empty());
    assert_eq!(
        batch[1].event.payload,
        EventPayload::BlockSet { pos, old: LADDER, new: BlockId::AIR }
    );
    assert_eq!(batch[1].follow_ups.len(), 2);
    assert!(matches!(batch[2].event.payload, EventPayload::BlockNotify { .. }));
}

#[test]
fn compare_and_set_refuses_stale_expectations() {
    let world = World::new();
    let pos = BlockPos::new(0, 0, 0);

    assert!(!world.compare_and_set(pos, STONE, LADDER));
    assert!(world.compare_and_set(pos, BlockId::AIR, LADDER));
    assert!(!world.compare_and_set(pos, BlockId::AIR, STONE));
    assert_eq!(world.get_block(pos), LADDER);
    assert!(world.compare_and_set(pos, LADDER, BlockId::AIR));
    assert!(world.is_empty());
}

#[test]
fn liquid_layer_is_separate_from_blocks() {
    const WATER: BlockId = BlockId(8);
    let world = World::new();
    let pos = BlockPos::new(1, 1, 1);
    world.set_block(pos, LADDER);

    let mut tx = world.transaction();
    assert!(tx.liquid(pos).is_air());
    tx.set_liquid(pos, WATER);
    tx.set_liquid(pos, WATER);
    assert_eq!(tx.liquid(pos), WATER);
    assert_eq!(tx.block(pos), LADDER);
    let events = tx.commit();

    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].payload,
        EventPayload::LiquidSet { pos, old: BlockId::AIR, new: WATER }
    );
    assert_eq!(world.get_liquid(pos), WATER);
    assert_eq!(world.get_block(pos), LADDER);
    // Only blocks count towards the world size.
    assert_eq!(world.len(), 1);
}
