//! Optional behaviours a block type can opt into.
//!
//! The world engine asks a [`Block`](super::Block) for one capability at a
//! time (`block.neighbour_update_ticker()`, `block.entity_insider()`, ...).
//! A `None` answer means the event produces no reaction for that block type;
//! it is never an error.

use rung_engine::world::face::Face;
use rung_engine::world::position::{BlockPos, Vec3};

use super::info::{BreakInfo, FuelInfo};
use super::Block;
use crate::entity::{Entity, User};
use crate::interaction::UseContext;
use crate::model::BlockModel;
use crate::registry::Properties;
use crate::tx::Tx;

/// Reacts after a block next to it (or the block itself) changed.
pub trait NeighbourUpdateTicker {
    /// `changed` is the cell whose change triggered the tick. Implementations
    /// must read the current state through `tx`, never a cached copy.
    fn neighbour_update_tick(&self, pos: BlockPos, changed: BlockPos, tx: &mut Tx<'_, '_>);
}

/// Reacts to an entity whose bounding box overlaps the block's cell.
pub trait EntityInsider {
    fn entity_inside(&self, pos: BlockPos, tx: &mut Tx<'_, '_>, entity: &mut dyn Entity);
}

/// Reports whether the side of the block facing `side` is closed off, for
/// light and flow logic in neighbouring cells.
pub trait SideCloser {
    fn side_closed(&self, pos: BlockPos, side: BlockPos, tx: &Tx<'_, '_>) -> bool;
}

pub trait Breakable {
    fn break_info(&self) -> BreakInfo;
}

/// Can be burned as fuel by a combustion collaborator.
pub trait Fuel {
    fn fuel_info(&self) -> FuelInfo;
}

/// Persisted item form: identifier and legacy numeric meta.
pub trait ItemEncoder {
    fn encode_item(&self) -> (&'static str, i16);
}

/// Persisted block form: identifier and state properties.
pub trait BlockEncoder {
    fn encode_block(&self) -> (&'static str, Properties);
}

pub trait Modelable {
    fn model(&self) -> BlockModel;
}

/// Lets light through. A diffusion level of 15 blocks light entirely.
pub trait LightDiffuser {
    fn light_diffusion_level(&self) -> u8;
}

/// May be overwritten by placing another block into its cell.
pub trait Replaceable {
    fn replaceable_by(&self, with: &Block) -> bool;
}

/// Shares its cell with a liquid instead of replacing it. The liquid is kept
/// in the cell's liquid layer and takes the cell back once the block goes.
pub trait LiquidDisplacer {
    fn can_displace(&self, liquid: &Block) -> bool;
}

/// Custom behaviour when the block, held as an item, is used on the world.
pub trait UseOnBlock {
    /// Returns whether the interaction placed something. A `false` return
    /// guarantees nothing was written.
    fn use_on_block(
        &self,
        pos: BlockPos,
        face: Face,
        click: Vec3,
        tx: &mut Tx<'_, '_>,
        user: &mut dyn User,
        ctx: &mut UseContext,
    ) -> bool;
}
