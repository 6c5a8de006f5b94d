//! Block-update rules: change propagation and neighbour-update dispatch.

use rung_engine::causal::event::EventPayload;
use rung_engine::world::tx::Transaction;

use super::helpers::notify_around;
use crate::registry::Registry;
use crate::tx::Tx;

/// Every executed block or liquid change asks the changed cell and its
/// neighbours to re-evaluate themselves.
pub fn propagate_changes(tx: &mut Transaction<'_>, payload: &EventPayload) {
    match payload {
        EventPayload::BlockSet { pos, old, new } | EventPayload::LiquidSet { pos, old, new }
            if old != new =>
        {
            notify_around(tx, *pos);
        }
        _ => {}
    }
}

/// Deliver a notification to the block at its position, if that block reacts
/// to neighbour updates.
pub fn neighbour_update(registry: &Registry, raw: &mut Transaction<'_>, payload: &EventPayload) {
    let EventPayload::BlockNotify { pos, source } = payload else {
        return;
    };
    let mut tx = Tx::new(raw, registry);
    let block = tx.block(*pos);
    if let Some(ticker) = block.neighbour_update_ticker() {
        ticker.neighbour_update_tick(*pos, *source, &mut tx);
    }
}
