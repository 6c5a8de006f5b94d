//! Summaries of what a finished cascade did, for logging and for clients.

use rung_engine::causal::event::{Effect, EventPayload};
use rung_engine::causal::graph::CausalGraph;
use rung_engine::world::block::BlockId;
use rung_engine::world::position::{BlockPos, Vec3};

/// All executed `BlockSet` events as `(position, new_block)` pairs, in
/// insertion order.
pub fn collect_block_changes(graph: &CausalGraph) -> Vec<(BlockPos, BlockId)> {
    graph
        .executed()
        .filter_map(|(_, event)| match event.payload {
            EventPayload::BlockSet { pos, new, .. } => Some((pos, new)),
            _ => None,
        })
        .collect()
}

/// All executed liquid-layer changes as `(position, new_liquid)` pairs.
pub fn collect_liquid_changes(graph: &CausalGraph) -> Vec<(BlockPos, BlockId)> {
    graph
        .executed()
        .filter_map(|(_, event)| match event.payload {
            EventPayload::LiquidSet { pos, new, .. } => Some((pos, new)),
            _ => None,
        })
        .collect()
}

/// All executed effects (particles, dropped items).
pub fn collect_effects(graph: &CausalGraph) -> Vec<(Vec3, Effect)> {
    graph
        .executed()
        .filter_map(|(_, event)| match event.payload {
            EventPayload::Effect { at, effect } => Some((at, effect)),
            _ => None,
        })
        .collect()
}
