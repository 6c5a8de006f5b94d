//! Block values and per-event capability queries.
//!
//! A [`Block`] is an immutable value: a type tag plus whatever state that
//! type carries. Changing a block means writing a new value into its cell.
//! Behaviour is opt-in per capability (see [`capability`]); the engine asks
//! for the one it needs and skips blocks that answer `None`.

pub mod capability;
pub mod info;
pub mod ladder;
pub mod terrain;

use capability::{
    BlockEncoder, Breakable, EntityInsider, Fuel, ItemEncoder, LightDiffuser, LiquidDisplacer,
    Modelable, NeighbourUpdateTicker, Replaceable, SideCloser, UseOnBlock,
};
pub use ladder::Ladder;
pub use terrain::{Air, Bedrock, Dirt, Glass, Leaves, Planks, Sand, Slab, Stone, Water};

use crate::model::BlockModel;
use crate::registry::Properties;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    Air(Air),
    Stone(Stone),
    Dirt(Dirt),
    Bedrock(Bedrock),
    Sand(Sand),
    Planks(Planks),
    Glass(Glass),
    Leaves(Leaves),
    Water(Water),
    Slab(Slab),
    Ladder(Ladder),
}

pub const AIR: Block = Block::Air(Air);
pub const STONE: Block = Block::Stone(Stone);
pub const DIRT: Block = Block::Dirt(Dirt);
pub const BEDROCK: Block = Block::Bedrock(Bedrock);
pub const SAND: Block = Block::Sand(Sand);
pub const PLANKS: Block = Block::Planks(Planks);
pub const GLASS: Block = Block::Glass(Glass);
pub const LEAVES: Block = Block::Leaves(Leaves);
pub const WATER: Block = Block::Water(Water);
pub const SLAB: Block = Block::Slab(Slab { double: false });
pub const DOUBLE_SLAB: Block = Block::Slab(Slab { double: true });

impl Block {
    /// Every block state, in registration order. Air comes first so that it
    /// receives state id 0.
    pub fn all_states() -> Vec<Block> {
        let mut states = vec![
            AIR, STONE, DIRT, BEDROCK, SAND, PLANKS, GLASS, LEAVES, WATER, SLAB, DOUBLE_SLAB,
        ];
        states.extend(Ladder::all_states().into_iter().map(Block::Ladder));
        states
    }

    pub fn is_air(&self) -> bool {
        matches!(self, Block::Air(_))
    }

    /// Persisted identifier, e.g. `minecraft:ladder`.
    pub fn name(&self) -> &'static str {
        self.block_encoder().encode_block().0
    }

    pub fn encode_block(&self) -> (&'static str, Properties) {
        self.block_encoder().encode_block()
    }

    pub fn model(&self) -> BlockModel {
        self.modelable().model()
    }

    /// Liquids live in a cell's liquid layer when a block displaces them.
    pub fn is_liquid(&self) -> bool {
        matches!(self, Block::Water(_))
    }

    /// Whether `self` keeps `liquid` in its cell instead of replacing it.
    pub fn displaces(&self, liquid: &Block) -> bool {
        self.liquid_displacer().is_some_and(|d| d.can_displace(liquid))
    }

    /// Whether `with` may be placed into a cell currently holding `self`.
    pub fn replaceable_by(&self, with: &Block) -> bool {
        self.replaceable().is_some_and(|r| r.replaceable_by(with))
    }

    // ── Capability queries ──────────────────────────────────────────────

    pub fn neighbour_update_ticker(&self) -> Option<&dyn NeighbourUpdateTicker> {
        match self {
            Block::Sand(b) => Some(b),
            Block::Ladder(b) => Some(b),
            _ => None,
        }
    }

    pub fn entity_insider(&self) -> Option<&dyn EntityInsider> {
        match self {
            Block::Ladder(b) => Some(b),
            _ => None,
        }
    }

    pub fn side_closer(&self) -> Option<&dyn SideCloser> {
        match self {
            Block::Leaves(b) => Some(b),
            Block::Ladder(b) => Some(b),
            _ => None,
        }
    }

    pub fn breakable(&self) -> Option<&dyn Breakable> {
        match self {
            Block::Stone(b) => Some(b),
            Block::Dirt(b) => Some(b),
            Block::Sand(b) => Some(b),
            Block::Planks(b) => Some(b),
            Block::Glass(b) => Some(b),
            Block::Leaves(b) => Some(b),
            Block::Slab(b) => Some(b),
            Block::Ladder(b) => Some(b),
            Block::Air(_) | Block::Bedrock(_) | Block::Water(_) => None,
        }
    }

    pub fn fuel(&self) -> Option<&dyn Fuel> {
        match self {
            Block::Planks(b) => Some(b),
            Block::Ladder(b) => Some(b),
            _ => None,
        }
    }

    pub fn item_encoder(&self) -> Option<&dyn ItemEncoder> {
        match self {
            Block::Stone(b) => Some(b),
            Block::Dirt(b) => Some(b),
            Block::Bedrock(b) => Some(b),
            Block::Sand(b) => Some(b),
            Block::Planks(b) => Some(b),
            Block::Glass(b) => Some(b),
            Block::Leaves(b) => Some(b),
            Block::Slab(b) => Some(b),
            Block::Ladder(b) => Some(b),
            Block::Air(_) | Block::Water(_) => None,
        }
    }

    /// Every block has a persisted block form.
    pub fn block_encoder(&self) -> &dyn BlockEncoder {
        match self {
            Block::Air(b) => b,
            Block::Stone(b) => b,
            Block::Dirt(b) => b,
            Block::Bedrock(b) => b,
            Block::Sand(b) => b,
            Block::Planks(b) => b,
            Block::Glass(b) => b,
            Block::Leaves(b) => b,
            Block::Water(b) => b,
            Block::Slab(b) => b,
            Block::Ladder(b) => b,
        }
    }

    /// Every block has a model, even if it is empty.
    pub fn modelable(&self) -> &dyn Modelable {
        match self {
            Block::Air(b) => b,
            Block::Stone(b) => b,
            Block::Dirt(b) => b,
            Block::Bedrock(b) => b,
            Block::Sand(b) => b,
            Block::Planks(b) => b,
            Block::Glass(b) => b,
            Block::Leaves(b) => b,
            Block::Water(b) => b,
            Block::Slab(b) => b,
            Block::Ladder(b) => b,
        }
    }

    pub fn light_diffuser(&self) -> Option<&dyn LightDiffuser> {
        match self {
            Block::Air(b) => Some(b),
            Block::Glass(b) => Some(b),
            Block::Leaves(b) => Some(b),
            Block::Water(b) => Some(b),
            Block::Slab(b) => Some(b),
            Block::Ladder(b) => Some(b),
            _ => None,
        }
    }

    pub fn liquid_displacer(&self) -> Option<&dyn LiquidDisplacer> {
        match self {
            Block::Ladder(b) => Some(b),
            _ => None,
        }
    }

    pub fn replaceable(&self) -> Option<&dyn Replaceable> {
        match self {
            Block::Air(b) => Some(b),
            Block::Water(b) => Some(b),
            _ => None,
        }
    }

    pub fn use_on_block(&self) -> Option<&dyn UseOnBlock> {
        match self {
            Block::Ladder(b) => Some(b),
            _ => None,
        }
    }
}

impl From<Ladder> for Block {
    fn from(ladder: Ladder) -> Self {
        Block::Ladder(ladder)
    }
}
