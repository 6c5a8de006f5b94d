use super::event::{Event, EventId, Pending};
use slotmap::SlotMap;

/// A node in the causal DAG.
#[derive(Debug)]
pub struct EventNode {
    pub event: Event,
    pub parents: Vec<EventId>,
    pub children: Vec<EventId>,
    /// Longest parent chain back to a root; roots are at depth 0.
    pub depth: u32,
    /// Events released only once this one takes effect.
    pub follow_ups: Vec<Event>,
    pub executed: bool,
    /// Executed, but the world had moved on and it changed nothing.
    pub skipped: bool,
    /// Parents that have not executed yet.
    waiting: usize,
}

/// Append-only DAG of events.
///
/// If A is a parent of B, A's world write is visible before B executes.
/// Events with no ancestor/descendant relationship may execute in any order,
/// or in parallel.
///
/// The frontier is kept incrementally: a node joins it when its last parent
/// executes, so draining a long cascade never rescans finished history.
pub struct CausalGraph {
    nodes: SlotMap<EventId, EventNode>,
    ready: Vec<EventId>,
}

impl CausalGraph {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            ready: Vec::new(),
        }
    }

    pub fn insert(&mut self, event: Event, parents: Vec<EventId>) -> EventId {
        self.insert_pending(Pending::from(event), parents)
    }

    pub fn insert_pending(&mut self, pending: Pending, parents: Vec<EventId>) -> EventId {
        let mut depth = 0;
        let mut waiting = 0;
        for node in parents.iter().filter_map(|p| self.nodes.get(*p)) {
            depth = depth.max(node.depth + 1);
            if !node.executed {
                waiting += 1;
            }
        }

        let id = self.nodes.insert(EventNode {
            event: pending.event,
            parents: parents.clone(),
            children: Vec::new(),
            depth,
            follow_ups: pending.follow_ups,
            executed: false,
            skipped: false,
            waiting,
        });
        for parent in parents {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.push(id);
            }
        }
        if waiting == 0 {
            self.ready.push(id);
        }
        id
    }

    pub fn insert_root(&mut self, event: Event) -> EventId {
        self.insert(event, Vec::new())
    }

    /// Insert what one transaction recorded as independent roots, e.g.
    /// everything one interaction did.
    pub fn insert_batch(&mut self, batch: impl IntoIterator<Item = Pending>) -> Vec<EventId> {
        batch
            .into_iter()
            .map(|p| self.insert_pending(p, Vec::new()))
            .collect()
    }

    /// Events whose parents have all executed but which have not executed
    /// themselves, in the order they became ready.
    pub fn frontier(&mut self) -> Vec<EventId> {
        let nodes = &self.nodes;
        self.ready
            .retain(|id| nodes.get(*id).is_some_and(|n| !n.executed));
        self.ready.clone()
    }

    pub fn mark_executed(&mut self, id: EventId) {
        let children = match self.nodes.get_mut(id) {
            Some(node) if !node.executed => {
                node.executed = true;
                node.children.clone()
            }
            _ => return,
        };
        for child in children {
            if let Some(node) = self.nodes.get_mut(child) {
                node.waiting = node.waiting.saturating_sub(1);
                if node.waiting == 0 && !node.executed {
                    self.ready.push(child);
                }
            }
        }
    }

    /// Mark `id` executed without effect. Its follow-ups are discarded.
    pub fn mark_skipped(&mut self, id: EventId) {
        self.mark_executed(id);
        if let Some(node) = self.nodes.get_mut(id) {
            node.skipped = true;
            node.follow_ups.clear();
        }
    }

    pub fn get(&self, id: EventId) -> Option<&EventNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn executed_count(&self) -> usize {
        self.nodes.values().filter(|n| n.executed).count()
    }

    /// Deepest causal chain in the graph.
    pub fn max_depth(&self) -> u32 {
        self.nodes.values().map(|n| n.depth).max().unwrap_or(0)
    }

    /// The roots `id` descends from, deduplicated, in insertion order.
    pub fn roots_of(&self, id: EventId) -> Vec<EventId> {
        let mut roots = Vec::new();
        let mut stack = vec![id];
        let mut seen = std::collections::HashSet::new();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if node.parents.is_empty() {
                roots.push(current);
            } else {
                stack.extend(node.parents.iter().copied());
            }
        }
        roots.sort();
        roots
    }

    /// Executed events that took effect, in insertion order.
    pub fn executed(&self) -> impl Iterator<Item = (EventId, &Event)> + '_ {
        self.nodes
            .iter()
            .filter(|(_, n)| n.executed && !n.skipped)
            .map(|(id, n)| (id, &n.event))
    }
}

impl Default for CausalGraph {
    fn default() -> Self {
        Self::new()
    }
}
