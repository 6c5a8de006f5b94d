use crate::causal::event::EventPayload;
use crate::world::tx::Transaction;

/// A rule: given an event that just executed, record its consequences in the
/// transaction (writes, notifications, effects).
///
/// Rules must be **local**: they only read blocks in a bounded neighbourhood
/// of the event's position. That locality is what makes causal independence,
/// and therefore parallelism, possible. Rules may capture shared read-only
/// state (a block registry, say) but never the transaction itself.
pub type Rule = Box<dyn Fn(&mut Transaction<'_>, &EventPayload) + Send + Sync>;

/// An ordered collection of rules. Every rule sees the same transaction, so
/// later rules observe the writes of earlier ones.
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add<F>(&mut self, rule: F)
    where
        F: Fn(&mut Transaction<'_>, &EventPayload) + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn evaluate(&self, tx: &mut Transaction<'_>, payload: &EventPayload) {
        for rule in &self.rules {
            rule(tx, payload);
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}
