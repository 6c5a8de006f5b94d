use crate::world::block::BlockId;
use crate::world::position::{BlockPos, ChunkPos, Vec3};
use slotmap::new_key_type;

new_key_type! {
    /// Unique handle for a node in the causal graph.
    pub struct EventId;
}

/// A single, atomic change to the world -- the fundamental unit of causality.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub payload: EventPayload,
}

/// What happened.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// A block was set (by a placement, a break, a block reacting to its
    /// neighbours, ...).
    BlockSet {
        pos: BlockPos,
        old: BlockId,
        new: BlockId,
    },

    /// The liquid layer of `pos` changed. A liquid lives there when the
    /// cell's block displaces it instead of replacing it.
    LiquidSet {
        pos: BlockPos,
        old: BlockId,
        new: BlockId,
    },

    /// The block at `pos` should re-evaluate itself because `source` changed.
    BlockNotify { pos: BlockPos, source: BlockPos },

    /// Something observable happened that leaves the lattice untouched.
    Effect { at: Vec3, effect: Effect },
}

/// Observable side effects. Like `BlockId`, the ids inside are opaque here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Break particles showing `block`.
    BlockBreak { block: BlockId },
    /// A dropped-item entity holding `count` of the item form of `item`.
    ItemDrop { item: BlockId, count: u8 },
}

impl Event {
    /// The cell this event is anchored to.
    pub fn pos(&self) -> BlockPos {
        match &self.payload {
            EventPayload::BlockSet { pos, .. } => *pos,
            EventPayload::LiquidSet { pos, .. } => *pos,
            EventPayload::BlockNotify { pos, .. } => *pos,
            EventPayload::Effect { at, .. } => at.block_pos(),
        }
    }

    /// The chunk this event primarily affects (used for parallel grouping).
    pub fn chunk(&self) -> ChunkPos {
        self.pos().chunk()
    }
}

/// An event waiting to be inserted, with the events that only happen if it
/// takes effect. Breaking a block carries its particles and drops this way,
/// so a write that turns out stale takes them down with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Pending {
    pub event: Event,
    pub follow_ups: Vec<Event>,
}

impl From<Event> for Pending {
    fn from(event: Event) -> Self {
        Self {
            event,
            follow_ups: Vec::new(),
        }
    }
}
