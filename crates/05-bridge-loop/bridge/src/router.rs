//! Routing of decoded actions to their handlers.

use host_abi::{zones, HostHandle};
use mutation::MutationEngine;
use projector::StateProjector;
use protocol::{rules, Action, ActionDispatcher, ActionOutcome};

/// Routes each action to the engine that owns it.
///
/// Ordering actions are handled here because they run through the validated
/// mutation engine; everything else is host-specific UI driving and goes to
/// the injected adapter. Every action is first checked against a fresh
/// projection so the adapter never sees a request the current state
/// forbids.
pub struct ActionRouter {
    projector: StateProjector,
    engine: MutationEngine,
    adapter: Box<dyn ActionDispatcher>,
}

impl ActionRouter {
    /// Builds a router over `host`, delegating non-ordering actions to
    /// `adapter`.
    pub fn new(
        host: HostHandle,
        session_id: impl Into<String>,
        adapter: Box<dyn ActionDispatcher>,
    ) -> Self {
        Self {
            projector: StateProjector::new(host.clone(), session_id),
            engine: MutationEngine::new(host),
            adapter,
        }
    }

    fn apply_order(&self, zone: &'static str, order: &[usize]) -> ActionOutcome {
        match self.engine.reorder(zone, order) {
            Ok(()) => ActionOutcome::ok(),
            Err(err) => ActionOutcome::fail(err.to_string()),
        }
    }
}

impl ActionDispatcher for ActionRouter {
    fn execute(&mut self, action: &Action) -> ActionOutcome {
        let snapshot = self.projector.extract();
        if let Err(violation) = rules::permitted(action, &snapshot) {
            log::debug!("refused `{}`: {violation}", action.kind());
            return ActionOutcome::fail(violation.to_string());
        }

        match action {
            Action::ReorderJokers { new_order } => self.apply_order(zones::JOKERS, new_order),
            Action::SortHandByRank => {
                let order = self.engine.rank_sort_order(zones::HAND);
                self.apply_order(zones::HAND, &order)
            }
            Action::SortHandBySuit => {
                let order = self.engine.suit_sort_order(zones::HAND);
                self.apply_order(zones::HAND, &order)
            }
            other => self.adapter.execute(other),
        }
    }
}
