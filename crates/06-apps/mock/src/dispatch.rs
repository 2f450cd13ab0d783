//! Recording action dispatcher.

use protocol::{Action, ActionDispatcher, ActionOutcome};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Default)]
struct Inner {
    executed: RefCell<Vec<Action>>,
    script: RefCell<VecDeque<ActionOutcome>>,
}

/// Dispatcher that records every executed action and replays scripted
/// outcomes, defaulting to success once the script is exhausted.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the bridge owns another.
#[derive(Clone, Default)]
pub struct ScriptedDispatcher {
    inner: Rc<Inner>,
}

impl ScriptedDispatcher {
    /// A dispatcher that succeeds at everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an outcome for the next execution.
    pub fn enqueue(&self, outcome: ActionOutcome) {
        self.inner.script.borrow_mut().push_back(outcome);
    }

    /// Actions executed so far, in order.
    pub fn executed(&self) -> Vec<Action> {
        self.inner.executed.borrow().clone()
    }
}

impl ActionDispatcher for ScriptedDispatcher {
    fn execute(&mut self, action: &Action) -> ActionOutcome {
        self.inner.executed.borrow_mut().push(action.clone());
        self.inner
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(ActionOutcome::ok)
    }
}
