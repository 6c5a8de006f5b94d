//! Small helpers shared by rule implementations.

use rung_engine::causal::event::{Event, EventPayload};
use rung_engine::world::block::BlockId;
use rung_engine::world::position::BlockPos;
use rung_engine::world::tx::Transaction;

/// Create a `BlockSet` event.
pub fn block_set(pos: BlockPos, old: BlockId, new: BlockId) -> Event {
    Event {
        payload: EventPayload::BlockSet { pos, old, new },
    }
}

/// Create a `BlockNotify` event.
pub fn notify(pos: BlockPos, source: BlockPos) -> Event {
    Event {
        payload: EventPayload::BlockNotify { pos, source },
    }
}

/// Notify the changed cell itself and its six neighbours that `pos` changed.
pub fn notify_around(tx: &mut Transaction<'_>, pos: BlockPos) {
    tx.notify(pos, pos);
    for neighbour in pos.neighbors() {
        tx.notify(neighbour, pos);
    }
}
