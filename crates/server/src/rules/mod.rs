pub mod block_updates;
pub mod helpers;

use std::sync::Arc;

use rung_engine::rules::RuleSet;

use crate::registry::Registry;

/// The standard rule set: change propagation plus block reactions.
pub fn standard(registry: Arc<Registry>) -> RuleSet {
    let mut rules = RuleSet::new();
    rules.add(block_updates::propagate_changes);
    rules.add(move |tx, payload| block_updates::neighbour_update(&registry, tx, payload));
    rules
}
