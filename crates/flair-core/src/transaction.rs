//! Transaction scheduling: which curve animates a state change, when it
//! starts, and how in-flight transitions are superseded.
//!
//! Per attached effect the scheduler runs a small state machine:
//!
//! ```text
//! Idle(v) --change--> Transitioning(from, to, curve) --curve done--> Idle(to)
//! ```
//!
//! A change to the target already in flight is ignored. A change to a new
//! target restarts from the current interpolated value, never from the old
//! target, so nothing snaps.

use web_time::{Duration, Instant};

use crate::animation::{AnimationCurve, Interpolate};
use crate::conditional::ConditionalEffect;
use crate::effect::{AnimatableValue, Effect, EffectKind, EffectOutput, ResolveContext};
use crate::geometry::{Size, Transform};
use crate::haptics::{self, Haptics};
use crate::trigger::{Observed, TriggerState};

/// Picks the curve for one transaction: explicit override, else the effect's
/// default, else none (instant). The effect delay is applied to the result.
pub fn resolve_curve(
    override_curve: Option<AnimationCurve>,
    default_curve: Option<AnimationCurve>,
    delay: Duration,
) -> Option<AnimationCurve> {
    override_curve.or(default_curve).map(|c| c.delayed(delay))
}

#[derive(Clone, Debug, PartialEq)]
pub enum TransitionState<T> {
    Idle(T),
    Transitioning {
        from: T,
        to: T,
        curve: AnimationCurve,
        started_at: Instant,
    },
}

/// Value animated between targets under explicit time.
#[derive(Clone, Debug)]
pub struct Transition<T: Interpolate + Clone + PartialEq> {
    state: TransitionState<T>,
}

impl<T: Interpolate + Clone + PartialEq> Transition<T> {
    pub fn new(initial: T) -> Self {
        Self {
            state: TransitionState::Idle(initial),
        }
    }

    pub fn state(&self) -> &TransitionState<T> {
        &self.state
    }

    pub fn target(&self) -> &T {
        match &self.state {
            TransitionState::Idle(v) => v,
            TransitionState::Transitioning { to, .. } => to,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, TransitionState::Transitioning { .. })
    }

    /// Starts moving towards `to`. Returns false when `to` is already the
    /// target. With no curve the value jumps straight to `to`.
    pub fn begin(&mut self, to: T, curve: Option<AnimationCurve>, now: Instant) -> bool {
        if *self.target() == to {
            return false;
        }
        let from = self.value(now);
        self.state = match curve {
            Some(curve) => TransitionState::Transitioning {
                from,
                to,
                curve,
                started_at: now,
            },
            None => TransitionState::Idle(to),
        };
        true
    }

    /// Current value. Holds `from` while the curve delay is pending.
    pub fn value(&self, now: Instant) -> T {
        match &self.state {
            TransitionState::Idle(v) => v.clone(),
            TransitionState::Transitioning {
                from,
                to,
                curve,
                started_at,
            } => {
                let elapsed = now.saturating_duration_since(*started_at);
                from.interpolate(to, curve.progress(elapsed))
            }
        }
    }

    pub fn delay_remaining(&self, now: Instant) -> Duration {
        match &self.state {
            TransitionState::Idle(_) => Duration::ZERO,
            TransitionState::Transitioning {
                curve, started_at, ..
            } => curve
                .delay
                .saturating_sub(now.saturating_duration_since(*started_at)),
        }
    }

    /// Settles a finished transition to `Idle`. Returns true while animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        let TransitionState::Transitioning {
            to,
            curve,
            started_at,
            ..
        } = &self.state
        else {
            return false;
        };
        if !curve.is_complete(now.saturating_duration_since(*started_at)) {
            return true;
        }
        let to = to.clone();
        self.state = TransitionState::Idle(to);
        false
    }
}

/// Trigger, phase transition and effect for one change-effect binding.
#[derive(Clone, Debug)]
pub struct ChangeEffectDriver<V> {
    effect: Effect,
    trigger: TriggerState<V>,
    phase: Transition<f64>,
}

impl<V: PartialEq> ChangeEffectDriver<V> {
    pub fn new(effect: Effect, initial: V) -> Self {
        Self {
            effect,
            trigger: TriggerState::new(initial),
            phase: Transition::new(0.0),
        }
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    /// Swaps in the effect passed on the latest render. Trigger and phase survive.
    pub fn set_effect(&mut self, effect: Effect) {
        self.effect = effect;
    }

    pub fn trigger(&self) -> &TriggerState<V> {
        &self.trigger
    }

    pub fn fire_count(&self) -> i64 {
        self.trigger.fire_count()
    }

    pub fn observe(
        &mut self,
        value: V,
        enabled: bool,
        animation: Option<AnimationCurve>,
        now: Instant,
        haptics: &dyn Haptics,
    ) -> Observed {
        let outcome = self
            .trigger
            .observe(value, enabled, self.effect.params.cooldown, now);
        match outcome {
            Observed::Fired(count) => {
                let params = &self.effect.params;
                let curve = resolve_curve(animation, params.default_curve, params.delay);
                if self.phase.is_animating() {
                    log::trace!("{}: restarting in-flight transition", self.effect.kind.name());
                }
                self.phase.begin(count as f64, curve, now);
                log::debug!("{} fired (count {count})", self.effect.kind.name());
                self.on_fire(haptics);
            }
            Observed::Suppressed(reason) => {
                log::trace!("{} suppressed: {reason:?}", self.effect.kind.name());
            }
        }
        outcome
    }

    fn on_fire(&self, haptics: &dyn Haptics) {
        if let EffectKind::Haptic(pulse) = self.effect.kind {
            haptics::play(haptics, pulse);
        }
    }

    pub fn phase(&self, now: Instant) -> f64 {
        self.phase.value(now)
    }

    pub fn is_animating(&self) -> bool {
        self.phase.is_animating()
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.phase.tick(now)
    }

    pub fn output(&self, now: Instant, ctx: &ResolveContext) -> EffectOutput {
        self.effect.kind.resolve(
            AnimatableValue {
                phase: self.phase(now),
            },
            ctx,
        )
    }
}

/// Activation transition for one conditional-effect binding.
#[derive(Clone, Debug)]
pub struct ConditionalEffectDriver {
    effect: ConditionalEffect,
    activation: Transition<f64>,
}

impl ConditionalEffectDriver {
    pub fn new(effect: ConditionalEffect, initially_active: bool) -> Self {
        Self {
            effect,
            activation: Transition::new(if initially_active { 1.0 } else { 0.0 }),
        }
    }

    pub fn effect(&self) -> &ConditionalEffect {
        &self.effect
    }

    pub fn set_effect(&mut self, effect: ConditionalEffect) {
        self.effect = effect;
    }

    /// Whether the in-flight (or settled) target is the active state.
    pub fn is_active(&self) -> bool {
        *self.activation.target() == 1.0
    }

    /// Requests `condition && enabled`. Returns false when that state is
    /// already the target, so rapid toggles do not restart the animation.
    pub fn set_active(
        &mut self,
        condition: bool,
        enabled: bool,
        animation: Option<AnimationCurve>,
        now: Instant,
    ) -> bool {
        let active = condition && enabled;
        if active == self.is_active() {
            return false;
        }
        let curve = resolve_curve(animation, self.effect.default_curve, self.effect.delay);
        log::debug!(
            "{} -> {}",
            self.effect.kind.name(),
            if active { "active" } else { "inactive" }
        );
        self.activation
            .begin(if active { 1.0 } else { 0.0 }, curve, now)
    }

    pub fn activation(&self, now: Instant) -> f64 {
        self.activation.value(now)
    }

    pub fn is_animating(&self) -> bool {
        self.activation.is_animating()
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.activation.tick(now)
    }

    pub fn output(&self, now: Instant, size: Size) -> Transform {
        self.effect.resolve(self.activation(now), size)
    }
}
