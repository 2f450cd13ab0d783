//! Settle timers for host-driven mode transitions.
//!
//! Some modes populate their contents asynchronously after the transition
//! is observable (the shop fills its slots over several host ticks). A
//! settle rule delays capture after entering such a mode so snapshots see
//! the populated state, not the transitional one.

/// One (mode, settle-duration) pair.
#[derive(Clone, Debug, PartialEq)]
pub struct SettleRule {
    /// Mode whose entry starts the timer.
    pub mode: String,
    /// How long to withhold captures after entry, in seconds.
    pub delay_seconds: f64,
}

impl SettleRule {
    /// Builds a rule.
    pub fn new(mode: impl Into<String>, delay_seconds: f64) -> Self {
        Self {
            mode: mode.into(),
            delay_seconds,
        }
    }
}

#[derive(Clone, Debug)]
struct ActiveSettle {
    mode: String,
    remaining: f64,
}

/// Tracks the configured rules and the single active timer.
///
/// Entering another tracked mode while a timer runs replaces it; the last
/// transition wins.
#[derive(Debug, Default)]
pub(crate) struct SettleTimers {
    rules: Vec<SettleRule>,
    active: Option<ActiveSettle>,
}

impl SettleTimers {
    pub(crate) fn new(rules: Vec<SettleRule>) -> Self {
        Self {
            rules,
            active: None,
        }
    }

    /// Starts a timer if `mode` is tracked. Returns whether one started.
    pub(crate) fn on_mode_entered(&mut self, mode: &str) -> bool {
        match self.rules.iter().find(|rule| rule.mode == mode) {
            Some(rule) => {
                self.active = Some(ActiveSettle {
                    mode: rule.mode.clone(),
                    remaining: rule.delay_seconds,
                });
                true
            }
            None => false,
        }
    }

    /// Elapses `dt` seconds. Returns whether the active timer just expired.
    pub(crate) fn advance(&mut self, dt: f64) -> bool {
        let Some(active) = &mut self.active else {
            return false;
        };
        active.remaining -= dt;
        if active.remaining > 0.0 {
            return false;
        }
        log::debug!("mode `{}` settled", active.mode);
        self.active = None;
        true
    }

    /// Whether captures are currently withheld.
    pub(crate) fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
