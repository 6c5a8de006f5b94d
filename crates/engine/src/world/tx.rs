use std::collections::HashMap;

use super::block::BlockId;
use super::position::{BlockPos, Vec3};
use super::World;
use crate::causal::event::{Effect, Event, EventPayload, Pending};

/// A consistent, buffered view of the world for one unit of block logic.
///
/// Reads see the transaction's own pending writes before the world. Writes,
/// notifications and effects are not applied here: they are recorded, in
/// order, as causal events and returned by [`Transaction::into_batch`] so
/// the scheduler can insert them as consequences of the triggering event.
///
/// Each write remembers the value it replaced. When the scheduler applies it
/// and the cell no longer holds that value, the write is stale and is
/// dropped together with the effects recorded at its cell.
///
/// The `'w` borrow keeps the view from outliving the world it reads, and
/// nothing in the view can be kept once it is consumed.
pub struct Transaction<'w> {
    world: &'w World,
    pending: HashMap<BlockPos, BlockId>,
    pending_liquids: HashMap<BlockPos, BlockId>,
    events: Vec<Event>,
    /// For each recorded event, the write it depends on.
    guards: Vec<Option<usize>>,
    /// Latest block write recorded for each cell.
    writes: HashMap<BlockPos, usize>,
}

impl<'w> Transaction<'w> {
    pub fn new(world: &'w World) -> Self {
        Self {
            world,
            pending: HashMap::new(),
            pending_liquids: HashMap::new(),
            events: Vec::new(),
            guards: Vec::new(),
            writes: HashMap::new(),
        }
    }

    /// Current block at `pos` as seen by this transaction.
    pub fn block(&self, pos: BlockPos) -> BlockId {
        match self.pending.get(&pos) {
            Some(block) => *block,
            None => self.world.get_block(pos),
        }
    }

    /// Current liquid layer of `pos`, AIR if empty.
    pub fn liquid(&self, pos: BlockPos) -> BlockId {
        match self.pending_liquids.get(&pos) {
            Some(liquid) => *liquid,
            None => self.world.get_liquid(pos),
        }
    }

    /// Record a write. Writing what the cell already holds records nothing.
    pub fn set_block(&mut self, pos: BlockPos, new: BlockId) {
        let old = self.block(pos);
        if old == new {
            return;
        }
        self.pending.insert(pos, new);
        self.writes.insert(pos, self.events.len());
        self.record(EventPayload::BlockSet { pos, old, new }, None);
    }

    /// Record a write to the liquid layer of `pos`.
    pub fn set_liquid(&mut self, pos: BlockPos, new: BlockId) {
        let old = self.liquid(pos);
        if old == new {
            return;
        }
        self.pending_liquids.insert(pos, new);
        self.record(EventPayload::LiquidSet { pos, old, new }, None);
    }

    /// Ask for the block at `pos` to re-evaluate itself because `source`
    /// changed.
    pub fn notify(&mut self, pos: BlockPos, source: BlockPos) {
        self.record(EventPayload::BlockNotify { pos, source }, None);
    }

    /// Record an effect at a world point (particles, dropped items).
    ///
    /// An effect inside a cell this transaction wrote happens only if that
    /// write does.
    pub fn emit(&mut self, at: Vec3, effect: Effect) {
        let guard = self.writes.get(&at.block_pos()).copied();
        self.record(EventPayload::Effect { at, effect }, guard);
    }

    fn record(&mut self, payload: EventPayload, guard: Option<usize>) {
        self.events.push(Event { payload });
        self.guards.push(guard);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events recorded so far, in recording order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Recorded events ready for the causal graph, with every guarded effect
    /// moved under the write it depends on.
    pub fn into_batch(self) -> Vec<Pending> {
        let mut batch: Vec<Pending> = Vec::new();
        let mut slots: HashMap<usize, usize> = HashMap::new();
        for (i, (event, guard)) in self.events.into_iter().zip(self.guards).enumerate() {
            match guard.and_then(|g| slots.get(&g).copied()) {
                Some(slot) => batch[slot].follow_ups.push(event),
                None => {
                    slots.insert(i, batch.len());
                    batch.push(Pending::from(event));
                }
            }
        }
        batch
    }

    /// Apply the recorded writes straight to the world, bypassing the
    /// causal graph. Returns the recorded events.
    pub fn commit(self) -> Vec<Event> {
        for event in &self.events {
            match event.payload {
                EventPayload::BlockSet { pos, new, .. } => {
                    self.world.set_block(pos, new);
                }
                EventPayload::LiquidSet { pos, new, .. } => {
                    self.world.set_liquid(pos, new);
                }
                _ => {}
            }
        }
        self.events
    }
}
