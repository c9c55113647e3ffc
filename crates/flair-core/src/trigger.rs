//! Edge-triggered fire counter.
//!
//! Turns a stream of observed values into a monotonically increasing fire
//! count. A change fires only when the binding is enabled and the previous
//! firing is at least `cooldown` old.

use web_time::{Duration, Instant};

/// Why an observation did not fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suppressed {
    Unchanged,
    Disabled,
    Cooldown,
}

/// Outcome of [`TriggerState::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observed {
    Fired(i64),
    Suppressed(Suppressed),
}

impl Observed {
    pub fn fired(&self) -> bool {
        matches!(self, Observed::Fired(_))
    }
}

/// Per-binding trigger state. Owned by exactly one attached effect.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerState<V> {
    last_observed: V,
    fire_count: i64,
    /// `None` is the distant past, so the first change is never cooldown-blocked.
    last_fired_at: Option<Instant>,
}

impl<V: PartialEq> TriggerState<V> {
    pub fn new(initial: V) -> Self {
        Self {
            last_observed: initial,
            fire_count: 0,
            last_fired_at: None,
        }
    }

    pub fn fire_count(&self) -> i64 {
        self.fire_count
    }

    pub fn last_observed(&self) -> &V {
        &self.last_observed
    }

    pub fn last_fired_at(&self) -> Option<Instant> {
        self.last_fired_at
    }

    /// Feeds one observed value.
    ///
    /// Any changed value becomes the new comparison baseline, even when the
    /// change is suppressed by `enabled == false` or by the cooldown. A value
    /// that flips back after a suppressed change therefore counts as changed
    /// again. This matches long-standing behavior and is kept on purpose.
    pub fn observe(
        &mut self,
        value: V,
        enabled: bool,
        cooldown: Duration,
        now: Instant,
    ) -> Observed {
        if value == self.last_observed {
            return Observed::Suppressed(Suppressed::Unchanged);
        }
        self.last_observed = value;

        if !enabled {
            return Observed::Suppressed(Suppressed::Disabled);
        }
        if let Some(last) = self.last_fired_at
            && now.saturating_duration_since(last) < cooldown
        {
            return Observed::Suppressed(Suppressed::Cooldown);
        }

        self.last_fired_at = Some(now);
        self.fire_count = self.fire_count.wrapping_add(1);
        Observed::Fired(self.fire_count)
    }

    /// Pure form of [`observe`](Self::observe): `(old state, event) -> new state`.
    pub fn reduce(mut self, value: V, enabled: bool, cooldown: Duration, now: Instant) -> Self {
        self.observe(value, enabled, cooldown, now);
        self
    }
}
