//! Attaching effects to a layer during a render pass.
//!
//! Each attachment is identified by a key that must be stable across renders
//! of the same node. Its trigger and transition state live in a keyed slot
//! and are dropped once the key stops being rendered.

use std::cell::RefCell;

use flair_core::{
    AnimationCurve, ChangeEffectDriver, ConditionalEffect, ConditionalEffectDriver, Effect,
    EffectOutput, ResolveContext,
};

use crate::env::EffectEnv;
use crate::layer::Layer;
use crate::runtime::remember_with_key;

/// Applies a change effect fired by changes of `value`.
///
/// The first call for a key records `value` as the baseline without firing.
/// Calling again with identical inputs at the same instant yields the same
/// layer.
pub fn change_effect<V: PartialEq + Clone + 'static>(
    key: impl Into<String>,
    layer: Layer,
    effect: Effect,
    value: V,
    enabled: bool,
    animation: Option<AnimationCurve>,
    env: &EffectEnv<'_>,
) -> Layer {
    let key = key.into();
    let driver = remember_with_key(format!("change:{key}"), || {
        RefCell::new(ChangeEffectDriver::new(effect, value.clone()))
    });
    let now = env.clock.now();

    let mut d = driver.borrow_mut();
    d.set_effect(effect);
    d.observe(value, enabled, animation, now, env.haptics);
    let animating = d.tick(now);
    let ctx = ResolveContext {
        size: layer.size,
        layout_direction: env.layout_direction,
    };
    let mut layer = layer.apply(d.output(now, &ctx));
    layer.animating |= animating;
    layer
}

/// Applies a conditional effect that is active while `condition && enabled`.
pub fn conditional_effect(
    key: impl Into<String>,
    layer: Layer,
    effect: ConditionalEffect,
    condition: bool,
    enabled: bool,
    animation: Option<AnimationCurve>,
    env: &EffectEnv<'_>,
) -> Layer {
    let key = key.into();
    let driver = remember_with_key(format!("conditional:{key}"), || {
        RefCell::new(ConditionalEffectDriver::new(effect, condition && enabled))
    });
    let now = env.clock.now();

    let mut d = driver.borrow_mut();
    d.set_effect(effect);
    d.set_active(condition, enabled, animation, now);
    let animating = d.tick(now);
    let transform = d.output(now, layer.size);
    let mut layer = layer.apply(EffectOutput::Geometry(transform));
    layer.animating |= animating;
    layer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{COMPOSER, ComposeGuard, Composer};
    use flair_core::{HapticError, HapticPulse, Haptics, LayoutDirection, ManualClock, Size};
    use std::cell::Cell;
    use web_time::Duration;

    fn reset() {
        COMPOSER.with(|c| *c.borrow_mut() = Composer::default());
    }

    fn layer() -> Layer {
        Layer::new(Size::new(80.0, 32.0))
    }

    #[test]
    fn first_render_records_baseline() {
        reset();
        let clock = ManualClock::default();
        let env = EffectEnv::new(&clock);
        let out = change_effect("btn", layer(), Effect::scale(), 5, true, None, &env);
        assert_eq!(out, layer());
    }

    #[test]
    fn change_animates_and_settles() {
        reset();
        let clock = ManualClock::default();
        let env = EffectEnv::new(&clock);
        let curve = AnimationCurve::LINEAR.with_duration(Duration::from_millis(300));

        change_effect("btn", layer(), Effect::scale(), 0, true, Some(curve), &env);
        change_effect("btn", layer(), Effect::scale(), 1, true, Some(curve), &env);

        clock.advance(Duration::from_millis(150));
        let mid = change_effect("btn", layer(), Effect::scale(), 1, true, Some(curve), &env);
        assert!(mid.animating);
        assert!((mid.transform.scale_x - 1.15).abs() < 1e-3);

        // Idempotent for identical inputs.
        let again = change_effect("btn", layer(), Effect::scale(), 1, true, Some(curve), &env);
        assert_eq!(mid, again);

        clock.advance(Duration::from_millis(150));
        let done = change_effect("btn", layer(), Effect::scale(), 1, true, Some(curve), &env);
        assert!(!done.animating);
        assert!(done.transform.is_identity());
    }

    #[test]
    fn shimmer_mirrors_under_rtl() {
        reset();
        let clock = ManualClock::default();
        let env = EffectEnv::new(&clock).with_layout_direction(LayoutDirection::RightToLeft);
        change_effect("s", layer(), Effect::shimmer(), false, true, None, &env);
        change_effect("s", layer(), Effect::shimmer(), true, true, None, &env);
        clock.advance(Duration::from_millis(1250));
        let out = change_effect("s", layer(), Effect::shimmer(), true, true, None, &env);
        assert_eq!(out.masks.len(), 1);
        assert_eq!(out.masks[0].axis_start.x, 1.0);
    }

    struct Counter(Cell<u32>);
    impl Haptics for Counter {
        fn pulse(&self, _: HapticPulse) -> Result<(), HapticError> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn haptics_fire_through_env() {
        reset();
        let clock = ManualClock::default();
        let counter = Counter(Cell::new(0));
        let env = EffectEnv::new(&clock).with_haptics(&counter);
        for v in [false, true, true, false] {
            let out = change_effect("h", layer(), Effect::haptic_selection(), v, true, None, &env);
            assert_eq!(out, layer());
        }
        assert_eq!(counter.0.get(), 2);
    }

    #[test]
    fn unmount_resets_trigger_state() {
        reset();
        let clock = ManualClock::default();
        let env = EffectEnv::new(&clock);
        let e = Effect::shake().without_curve();
        {
            let _g = ComposeGuard::begin();
            change_effect("a", layer(), e, 0, true, None, &env);
            change_effect("a", layer(), e, 1, true, None, &env);
        }
        // A pass without "a" unmounts it.
        drop(ComposeGuard::begin());
        {
            let _g = ComposeGuard::begin();
            // Fresh attachment: 1 is the new baseline, nothing fires.
            let out = change_effect("a", layer(), e, 1, true, None, &env);
            assert_eq!(out, layer());
        }
        let fired = remember_with_key("change:a", || {
            RefCell::new(ChangeEffectDriver::new(e, 0))
        });
        assert_eq!(fired.borrow().fire_count(), 0);
    }

    #[test]
    fn push_down_tracks_condition() {
        reset();
        let clock = ManualClock::default();
        let env = EffectEnv::new(&clock);
        let e = ConditionalEffect::push_down();

        let rest = conditional_effect("p", layer(), e, false, true, None, &env);
        assert!(rest.transform.is_identity());

        conditional_effect("p", layer(), e, true, true, None, &env);
        clock.advance(Duration::from_millis(50));
        let pressed = conditional_effect("p", layer(), e, true, true, None, &env);
        assert!(pressed.animating);
        assert!(pressed.transform.translate_y > 0.0);

        // Disabled releases regardless of the condition.
        clock.advance(Duration::from_secs(3));
        conditional_effect("p", layer(), e, true, false, None, &env);
        clock.advance(Duration::from_secs(3));
        let released = conditional_effect("p", layer(), e, true, false, None, &env);
        assert!(released.transform.is_identity());
        assert!(!released.animating);
    }
}
