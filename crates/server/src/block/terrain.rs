//! Ordinary world blocks. Each one opts into the handful of capabilities it
//! needs, which is what makes them useful neighbours for climbable blocks.

use std::time::Duration;

use indexmap::IndexMap;
use rung_engine::world::face::Face;
use rung_engine::world::position::BlockPos;

use super::capability::{
    BlockEncoder, Breakable, Fuel, ItemEncoder, LightDiffuser, Modelable, NeighbourUpdateTicker,
    Replaceable, SideCloser,
};
use super::info::{BreakInfo, Effective, FuelInfo, Harvestable, ToolKind};
use super::{Block, SAND};
use crate::item::ItemStack;
use crate::model::BlockModel;
use crate::registry::{Properties, PropertyValue};
use crate::tx::Tx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Air;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Stone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dirt;

/// Unbreakable floor of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bedrock;

/// Falls while the cell below it can be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Planks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Glass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Leaves;

/// Still source water. Flow is not simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Water;

/// Oak slab resting on the bottom half of its cell. A double slab fills the
/// whole cell and blocks light completely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Slab {
    pub double: bool,
}

fn no_properties() -> Properties {
    IndexMap::new()
}

// ── Air ──────────────────────────────────────────────────────────────────

impl LightDiffuser for Air {
    fn light_diffusion_level(&self) -> u8 {
        0
    }
}

impl Replaceable for Air {
    fn replaceable_by(&self, _with: &Block) -> bool {
        true
    }
}

impl BlockEncoder for Air {
    fn encode_block(&self) -> (&'static str, Properties) {
        ("minecraft:air", no_properties())
    }
}

impl Modelable for Air {
    fn model(&self) -> BlockModel {
        BlockModel::Empty
    }
}

// ── Stone ────────────────────────────────────────────────────────────────

impl Breakable for Stone {
    fn break_info(&self) -> BreakInfo {
        BreakInfo::new(
            1.5,
            Harvestable::Requires(ToolKind::Pickaxe),
            Effective::Tool(ToolKind::Pickaxe),
            vec![ItemStack::new(Block::Stone(*self), 1)],
        )
    }
}

impl ItemEncoder for Stone {
    fn encode_item(&self) -> (&'static str, i16) {
        ("minecraft:stone", 0)
    }
}

impl BlockEncoder for Stone {
    fn encode_block(&self) -> (&'static str, Properties) {
        ("minecraft:stone", no_properties())
    }
}

impl Modelable for Stone {
    fn model(&self) -> BlockModel {
        BlockModel::Solid
    }
}

// ── Dirt ─────────────────────────────────────────────────────────────────

impl Breakable for Dirt {
    fn break_info(&self) -> BreakInfo {
        BreakInfo::new(
            0.5,
            Harvestable::Always,
            Effective::Tool(ToolKind::Shovel),
            vec![ItemStack::new(Block::Dirt(*self), 1)],
        )
    }
}

impl ItemEncoder for Dirt {
    fn encode_item(&self) -> (&'static str, i16) {
        ("minecraft:dirt", 0)
    }
}

impl BlockEncoder for Dirt {
    fn encode_block(&self) -> (&'static str, Properties) {
        (
            "minecraft:dirt",
            IndexMap::from([("dirt_type".to_string(), PropertyValue::Str("normal".into()))]),
        )
    }
}

impl Modelable for Dirt {
    fn model(&self) -> BlockModel {
        BlockModel::Solid
    }
}

// ── Bedrock ──────────────────────────────────────────────────────────────

impl ItemEncoder for Bedrock {
    fn encode_item(&self) -> (&'static str, i16) {
        ("minecraft:bedrock", 0)
    }
}

impl BlockEncoder for Bedrock {
    fn encode_block(&self) -> (&'static str, Properties) {
        (
            "minecraft:bedrock",
            IndexMap::from([("infiniburn_bit".to_string(), PropertyValue::Bool(false))]),
        )
    }
}

impl Modelable for Bedrock {
    fn model(&self) -> BlockModel {
        BlockModel::Solid
    }
}

// ── Sand ─────────────────────────────────────────────────────────────────

impl NeighbourUpdateTicker for Sand {
    /// Swap with the cell below while it is replaceable; the write to that
    /// cell notifies it, so the fall continues one cell per tick.
    fn neighbour_update_tick(&self, pos: BlockPos, _changed: BlockPos, tx: &mut Tx<'_, '_>) {
        let below = pos.side(Face::Down);
        let below_block = tx.block(below);
        if below_block.replaceable_by(&SAND) {
            tx.set_block(pos, below_block);
            tx.set_block(below, Block::Sand(*self));
        }
    }
}

impl Breakable for Sand {
    fn break_info(&self) -> BreakInfo {
        BreakInfo::new(
            0.5,
            Harvestable::Always,
            Effective::Tool(ToolKind::Shovel),
            vec![ItemStack::new(Block::Sand(*self), 1)],
        )
    }
}

impl ItemEncoder for Sand {
    fn encode_item(&self) -> (&'static str, i16) {
        ("minecraft:sand", 0)
    }
}

impl BlockEncoder for Sand {
    fn encode_block(&self) -> (&'static str, Properties) {
        ("minecraft:sand", no_properties())
    }
}

impl Modelable for Sand {
    fn model(&self) -> BlockModel {
        BlockModel::Solid
    }
}

// ── Planks ───────────────────────────────────────────────────────────────

impl Breakable for Planks {
    fn break_info(&self) -> BreakInfo {
        BreakInfo::new(
            2.0,
            Harvestable::Always,
            Effective::Tool(ToolKind::Axe),
            vec![ItemStack::new(Block::Planks(*self), 1)],
        )
    }
}

impl Fuel for Planks {
    fn fuel_info(&self) -> FuelInfo {
        FuelInfo::new(Duration::from_secs(15))
    }
}

impl ItemEncoder for Planks {
    fn encode_item(&self) -> (&'static str, i16) {
        ("minecraft:oak_planks", 0)
    }
}

impl BlockEncoder for Planks {
    fn encode_block(&self) -> (&'static str, Properties) {
        ("minecraft:oak_planks", no_properties())
    }
}

impl Modelable for Planks {
    fn model(&self) -> BlockModel {
        BlockModel::Solid
    }
}

// ── Glass ────────────────────────────────────────────────────────────────

impl LightDiffuser for Glass {
    fn light_diffusion_level(&self) -> u8 {
        0
    }
}

impl Breakable for Glass {
    fn break_info(&self) -> BreakInfo {
        BreakInfo::new(0.3, Harvestable::Always, Effective::Nothing, Vec::new())
    }
}

impl ItemEncoder for Glass {
    fn encode_item(&self) -> (&'static str, i16) {
        ("minecraft:glass", 0)
    }
}

impl BlockEncoder for Glass {
    fn encode_block(&self) -> (&'static str, Properties) {
        ("minecraft:glass", no_properties())
    }
}

impl Modelable for Glass {
    fn model(&self) -> BlockModel {
        BlockModel::Solid
    }
}

// ── Leaves ───────────────────────────────────────────────────────────────

impl LightDiffuser for Leaves {
    fn light_diffusion_level(&self) -> u8 {
        1
    }
}

impl SideCloser for Leaves {
    fn side_closed(&self, _pos: BlockPos, _side: BlockPos, _tx: &Tx<'_, '_>) -> bool {
        false
    }
}

impl Breakable for Leaves {
    fn break_info(&self) -> BreakInfo {
        BreakInfo::new(
            0.2,
            Harvestable::Always,
            Effective::Tool(ToolKind::Shears),
            Vec::new(),
        )
    }
}

impl ItemEncoder for Leaves {
    fn encode_item(&self) -> (&'static str, i16) {
        ("minecraft:oak_leaves", 0)
    }
}

impl BlockEncoder for Leaves {
    fn encode_block(&self) -> (&'static str, Properties) {
        (
            "minecraft:oak_leaves",
            IndexMap::from([
                ("persistent_bit".to_string(), PropertyValue::Bool(false)),
                ("update_bit".to_string(), PropertyValue::Bool(false)),
            ]),
        )
    }
}

impl Modelable for Leaves {
    fn model(&self) -> BlockModel {
        BlockModel::Solid
    }
}

// ── Water ────────────────────────────────────────────────────────────────

impl LightDiffuser for Water {
    fn light_diffusion_level(&self) -> u8 {
        2
    }
}

impl Replaceable for Water {
    fn replaceable_by(&self, _with: &Block) -> bool {
        true
    }
}

impl BlockEncoder for Water {
    fn encode_block(&self) -> (&'static str, Properties) {
        (
            "minecraft:water",
            IndexMap::from([("liquid_depth".to_string(), PropertyValue::Int(0))]),
        )
    }
}

impl Modelable for Water {
    fn model(&self) -> BlockModel {
        BlockModel::Empty
    }
}

// ── Slab ─────────────────────────────────────────────────────────────────

impl LightDiffuser for Slab {
    fn light_diffusion_level(&self) -> u8 {
        if self.double { 15 } else { 0 }
    }
}

impl Breakable for Slab {
    fn break_info(&self) -> BreakInfo {
        let count = if self.double { 2 } else { 1 };
        BreakInfo::new(
            2.0,
            Harvestable::Always,
            Effective::Tool(ToolKind::Axe),
            vec![ItemStack::new(Block::Slab(Slab { double: false }), count)],
        )
    }
}

impl ItemEncoder for Slab {
    fn encode_item(&self) -> (&'static str, i16) {
        ("minecraft:oak_slab", 0)
    }
}

impl BlockEncoder for Slab {
    fn encode_block(&self) -> (&'static str, Properties) {
        let name = if self.double {
            "minecraft:oak_double_slab"
        } else {
            "minecraft:oak_slab"
        };
        (
            name,
            IndexMap::from([(
                "minecraft:vertical_half".to_string(),
                PropertyValue::Str("bottom".into()),
            )]),
        )
    }
}

impl Modelable for Slab {
    fn model(&self) -> BlockModel {
        if self.double {
            BlockModel::Solid
        } else {
            BlockModel::Slab
        }
    }
}
