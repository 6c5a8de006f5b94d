use super::event::{EventId, EventPayload, Pending};
use super::graph::CausalGraph;
use crate::rules::RuleSet;
use crate::world::World;
use crate::world::tx::Transaction;
use rayon::prelude::*;
use std::collections::HashMap;

/// Drains the causal frontier: applies each event to the world, then lets the
/// rule set react inside a fresh transaction whose recorded events become the
/// children of the one that triggered them.
pub struct Scheduler {
    pub max_events_per_step: usize,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            max_events_per_step: 10_000,
        }
    }

    // ── Sequential execution ────────────────────────────────────────────

    pub fn step(&self, world: &World, graph: &mut CausalGraph, rules: &RuleSet) -> usize {
        let mut executed = 0;

        for id in graph.frontier() {
            if executed >= self.max_events_per_step {
                break;
            }
            let Some(pending) = pending_of(graph, id) else {
                continue;
            };

            let outcome = execute(world, rules, &pending);
            settle(graph, id, outcome);
            executed += 1;
        }

        executed
    }

    pub fn run_until_quiet(
        &self,
        world: &World,
        graph: &mut CausalGraph,
        rules: &RuleSet,
        max_steps: usize,
    ) -> usize {
        let mut total = 0;
        for _ in 0..max_steps {
            let n = self.step(world, graph, rules);
            if n == 0 {
                break;
            }
            total += n;
        }
        tracing::trace!(total, graph = graph.len(), depth = graph.max_depth(), "cascade quiet");
        total
    }

    // ── Parallel execution (grouped by chunk) ───────────────────────────

    /// Like [`Scheduler::step`], but frontier events in different chunks run
    /// on the rayon pool. Events within one chunk keep their frontier order.
    pub fn step_parallel(&self, world: &World, graph: &mut CausalGraph, rules: &RuleSet) -> usize {
        let frontier = graph.frontier();
        if frontier.is_empty() {
            return 0;
        }

        let mut groups: HashMap<_, Vec<(EventId, Pending)>> = HashMap::new();
        for (id, pending) in frontier
            .iter()
            .filter_map(|&id| pending_of(graph, id).map(|p| (id, p)))
            .take(self.max_events_per_step)
        {
            groups.entry(pending.event.chunk()).or_default().push((id, pending));
        }

        let results: Vec<Vec<(EventId, Option<Vec<Pending>>)>> = groups
            .into_values()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|group| {
                group
                    .into_iter()
                    .map(|(id, pending)| (id, execute(world, rules, &pending)))
                    .collect()
            })
            .collect();

        let mut executed = 0;
        for (id, outcome) in results.into_iter().flatten() {
            settle(graph, id, outcome);
            executed += 1;
        }

        executed
    }

    pub fn run_until_quiet_parallel(
        &self,
        world: &World,
        graph: &mut CausalGraph,
        rules: &RuleSet,
        max_steps: usize,
    ) -> usize {
        let mut total = 0;
        for _ in 0..max_steps {
            let n = self.step_parallel(world, graph, rules);
            if n == 0 {
                break;
            }
            total += n;
        }
        total
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn pending_of(graph: &CausalGraph, id: EventId) -> Option<Pending> {
    graph.get(id).map(|node| Pending {
        event: node.event.clone(),
        follow_ups: node.follow_ups.clone(),
    })
}

/// Record the outcome of executing `id`: its consequences become children,
/// or it is marked skipped.
fn settle(graph: &mut CausalGraph, id: EventId, outcome: Option<Vec<Pending>>) {
    match outcome {
        Some(consequents) => {
            graph.mark_executed(id);
            for pending in consequents {
                graph.insert_pending(pending, vec![id]);
            }
        }
        None => graph.mark_skipped(id),
    }
}

/// Apply one event and collect what follows from it: its own follow-ups
/// first, then whatever the rules make of it.
///
/// Returns `None` when the event changed nothing: a write whose cell no
/// longer holds the value it replaced, because another branch of the graph
/// got there first.
fn execute(world: &World, rules: &RuleSet, pending: &Pending) -> Option<Vec<Pending>> {
    let payload = &pending.event.payload;
    if !apply_event(world, payload) {
        return None;
    }
    let mut tx = Transaction::new(world);
    rules.evaluate(&mut tx, payload);

    let mut consequents: Vec<Pending> = pending.follow_ups.iter().cloned().map(Pending::from).collect();
    consequents.extend(tx.into_batch());
    Some(consequents)
}

/// Returns whether the event changed anything worth reacting to.
fn apply_event(world: &World, payload: &EventPayload) -> bool {
    match payload {
        EventPayload::BlockSet { pos, old, new } => {
            old != new && world.compare_and_set(*pos, *old, *new)
        }
        EventPayload::LiquidSet { pos, old, new } => {
            old != new && world.compare_and_set_liquid(*pos, *old, *new)
        }
        EventPayload::BlockNotify { .. } | EventPayload::Effect { .. } => true,
    }
}
