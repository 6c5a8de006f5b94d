//! Typed view of an engine transaction.

use rung_engine::causal::event::Effect;
use rung_engine::world::block::BlockId;
use rung_engine::world::position::{BlockPos, Vec3};
use rung_engine::world::tx::Transaction;

use crate::block::{AIR, Block};
use crate::item::ItemStack;
use crate::particle::Particle;
use crate::registry::Registry;

/// A [`Transaction`] that speaks in [`Block`] values instead of raw ids.
///
/// Block logic receives a `&mut Tx` for the duration of one call and must not
/// keep anything borrowed from it.
pub struct Tx<'a, 'w> {
    raw: &'a mut Transaction<'w>,
    registry: &'a Registry,
}

impl<'a, 'w> Tx<'a, 'w> {
    pub fn new(raw: &'a mut Transaction<'w>, registry: &'a Registry) -> Self {
        Self { raw, registry }
    }

    /// Current block at `pos`. Ids the registry does not know read as air.
    pub fn block(&self, pos: BlockPos) -> Block {
        let id = self.raw.block(pos);
        match self.registry.block(id) {
            Some(block) => block,
            None => {
                tracing::warn!(?pos, id = id.0, "unknown block state, treating as air");
                AIR
            }
        }
    }

    /// The liquid sharing the cell at `pos` with its block, if any.
    pub fn liquid(&self, pos: BlockPos) -> Option<Block> {
        let id = self.raw.liquid(pos);
        if id.is_air() {
            return None;
        }
        let liquid = self.registry.block(id);
        if liquid.is_none() {
            tracing::warn!(?pos, id = id.0, "unknown liquid state, ignoring");
        }
        liquid
    }

    /// Write `block` at `pos`. Returns false, recording nothing, when the
    /// block is not registered.
    ///
    /// A liquid in the cell survives when `block` displaces it, moving into
    /// the liquid layer. Clearing a cell with a filled liquid layer hands the
    /// cell back to the liquid.
    pub fn set_block(&mut self, pos: BlockPos, block: Block) -> bool {
        let Some(id) = self.id_of(&block) else {
            return false;
        };
        let current = self.block(pos);
        let layered = self.liquid(pos);
        let liquid = layered.or_else(|| current.is_liquid().then_some(current));

        match liquid {
            Some(liquid) if block.displaces(&liquid) => {
                self.set_liquid(pos, liquid);
                self.raw.set_block(pos, id);
            }
            Some(liquid) if block.is_air() && layered.is_some() => {
                let Some(liquid_id) = self.id_of(&liquid) else {
                    return false;
                };
                self.set_liquid(pos, AIR);
                self.raw.set_block(pos, liquid_id);
            }
            _ => {
                if layered.is_some() {
                    self.set_liquid(pos, AIR);
                }
                self.raw.set_block(pos, id);
            }
        }
        true
    }

    fn set_liquid(&mut self, pos: BlockPos, liquid: Block) {
        if let Some(id) = self.id_of(&liquid) {
            self.raw.set_liquid(pos, id);
        }
    }

    pub fn add_particle(&mut self, at: Vec3, particle: Particle) {
        match particle {
            Particle::BlockBreak(block) => {
                if let Some(id) = self.id_of(&block) {
                    self.raw.emit(at, Effect::BlockBreak { block: id });
                }
            }
        }
    }

    /// Spawn a dropped item entity holding `stack` at `at`.
    pub fn drop_item(&mut self, stack: ItemStack, at: Vec3) {
        if stack.count == 0 {
            return;
        }
        if let Some(item) = self.id_of(&stack.item) {
            self.raw.emit(
                at,
                Effect::ItemDrop {
                    item,
                    count: stack.count,
                },
            );
        }
    }

    fn id_of(&self, block: &Block) -> Option<BlockId> {
        let id = self.registry.id(block);
        if id.is_none() {
            tracing::warn!(?block, "block is not registered");
        }
        id
    }
}
