//! Change effects and their resolvers.
//!
//! An [`Effect`] pairs an [`EffectKind`] with timing [`EffectParams`]. The
//! kind resolves a phase (the fire count, fractional while a transition is in
//! flight) into an [`EffectOutput`]. Resolvers are total: degenerate
//! parameters such as a scale amount of 1 simply produce the identity.

use std::f64::consts::PI;

use web_time::Duration;

use crate::animation::AnimationCurve;
use crate::error::{Error, Result, duration_from_secs, finite};
use crate::geometry::{LayoutDirection, Size, Transform};
use crate::haptics::{HapticPulse, ImpactStyle, NotificationKind};
use crate::math::fractional;
use crate::shimmer::{ShimmerMask, ShimmerParams};

/// Timing shared by every effect instance. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectParams {
    pub delay: Duration,
    pub cooldown: Duration,
    pub default_curve: Option<AnimationCurve>,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            delay: Duration::ZERO,
            cooldown: Duration::ZERO,
            default_curve: None,
        }
    }
}

impl EffectParams {
    pub fn new(delay: Duration, cooldown: Duration, default_curve: Option<AnimationCurve>) -> Self {
        Self {
            delay,
            cooldown,
            default_curve,
        }
    }

    /// Builds params from float seconds; negative or non-finite input is rejected.
    pub fn from_secs(
        delay: f64,
        cooldown: f64,
        default_curve: Option<AnimationCurve>,
    ) -> Result<Self> {
        Ok(Self {
            delay: duration_from_secs("delay", delay)?,
            cooldown: duration_from_secs("cooldown", cooldown)?,
            default_curve,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleParams {
    /// Peak scale multiplier.
    pub amount: f32,
}

impl Default for ScaleParams {
    fn default() -> Self {
        Self { amount: 1.15 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShakeParams {
    /// Horizontal amplitude in points.
    pub amount: f32,
    /// Full oscillations per pulse.
    pub oscillations: u32,
}

impl Default for ShakeParams {
    fn default() -> Self {
        Self {
            amount: 5.0,
            oscillations: 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpParams {
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    Scale(ScaleParams),
    Shake(ShakeParams),
    Jump(JumpParams),
    Shimmer(ShimmerParams),
    Haptic(HapticPulse),
}

/// What an effect contributes to the rendered content at one phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectOutput {
    Identity,
    Geometry(Transform),
    Mask(ShimmerMask),
}

impl EffectOutput {
    pub fn transform(&self) -> Transform {
        match self {
            EffectOutput::Geometry(t) => *t,
            _ => Transform::identity(),
        }
    }
}

/// Host facts a resolver may depend on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolveContext {
    pub size: Size,
    pub layout_direction: LayoutDirection,
}

/// A transform description parameterized by a scalar phase.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimatableValue {
    pub phase: f64,
}

impl AnimatableValue {
    pub fn from_fire_count(count: i64) -> Self {
        Self {
            phase: count as f64,
        }
    }

    pub fn fractional(&self) -> f64 {
        fractional(self.phase)
    }
}

impl EffectKind {
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Scale(_) => "scale",
            EffectKind::Shake(_) => "shake",
            EffectKind::Jump(_) => "jump",
            EffectKind::Shimmer(_) => "shimmer",
            EffectKind::Haptic(_) => "haptic",
        }
    }

    pub fn resolve(&self, value: AnimatableValue, ctx: &ResolveContext) -> EffectOutput {
        let f = value.fractional();
        match *self {
            EffectKind::Scale(ScaleParams { amount }) => {
                let factor = 1.0 + ((f * PI).sin() as f32) * (amount - 1.0);
                EffectOutput::Geometry(Transform::scale_about(factor, ctx.size.center()))
            }
            EffectKind::Shake(ShakeParams {
                amount,
                oscillations,
            }) => {
                let x = amount * (f * 2.0 * PI * oscillations as f64).sin() as f32;
                EffectOutput::Geometry(Transform::translate(x, 0.0))
            }
            EffectKind::Jump(JumpParams { height }) => {
                let y = -height * (f * PI).sin().abs() as f32;
                EffectOutput::Geometry(Transform::translate(0.0, y))
            }
            EffectKind::Shimmer(ref params) => {
                EffectOutput::Mask(ShimmerMask::new(f as f32, params, ctx.layout_direction))
            }
            EffectKind::Haptic(_) => EffectOutput::Identity,
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            EffectKind::Scale(ScaleParams { amount }) => {
                finite("amount", amount as f64)?;
            }
            EffectKind::Shake(ShakeParams {
                amount,
                oscillations,
            }) => {
                finite("amount", amount as f64)?;
                if oscillations == 0 {
                    return Err(Error::invalid("oscillations", "must be at least 1"));
                }
            }
            EffectKind::Jump(JumpParams { height }) => {
                if finite("height", height as f64)? < 0.0 {
                    return Err(Error::invalid("height", "must not be negative"));
                }
            }
            EffectKind::Shimmer(ShimmerParams {
                core_half_width,
                falloff_half_width,
                opacity,
            }) => {
                finite("core_half_width", core_half_width as f64)?;
                finite("falloff_half_width", falloff_half_width as f64)?;
                finite("opacity", opacity as f64)?;
                if !(core_half_width > 0.0
                    && core_half_width <= falloff_half_width
                    && falloff_half_width <= 0.5)
                {
                    return Err(Error::invalid(
                        "falloff_half_width",
                        "widths must satisfy 0 < core <= falloff <= 0.5",
                    ));
                }
                if !(0.0..=1.0).contains(&opacity) {
                    return Err(Error::invalid("opacity", "must be within [0, 1]"));
                }
            }
            EffectKind::Haptic(HapticPulse::Impact {
                intensity: Some(i),
                ..
            }) => {
                if !(0.0..=1.0).contains(&i) {
                    return Err(Error::invalid("intensity", "must be within [0, 1]"));
                }
            }
            EffectKind::Haptic(_) => {}
        }
        Ok(())
    }
}

/// A change effect: what to draw on each firing, and when.
///
/// Deserializing runs the same checks as [`Effect::new`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "EffectRepr")
)]
pub struct Effect {
    pub kind: EffectKind,
    pub params: EffectParams,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct EffectRepr {
    kind: EffectKind,
    params: EffectParams,
}

#[cfg(feature = "serde")]
impl TryFrom<EffectRepr> for Effect {
    type Error = Error;

    fn try_from(repr: EffectRepr) -> Result<Self> {
        Effect::new(repr.kind, repr.params)
    }
}

impl Effect {
    /// Wraps a kind with explicit params, checking the kind's numeric parameters.
    pub fn new(kind: EffectKind, params: EffectParams) -> Result<Self> {
        kind.validate()?;
        Ok(Self { kind, params })
    }

    /// Grow-then-shrink pulse to 1.15x.
    pub fn scale() -> Self {
        Self {
            kind: EffectKind::Scale(ScaleParams::default()),
            params: EffectParams::new(
                Duration::ZERO,
                Duration::ZERO,
                Some(AnimationCurve::EASE_IN_OUT),
            ),
        }
    }

    pub fn scale_by(amount: f32) -> Result<Self> {
        let mut e = Self::scale();
        e.kind = EffectKind::Scale(ScaleParams { amount });
        e.kind.validate()?;
        Ok(e)
    }

    pub fn shake() -> Self {
        Self {
            kind: EffectKind::Shake(ShakeParams::default()),
            params: EffectParams::new(
                Duration::ZERO,
                Duration::ZERO,
                Some(AnimationCurve::EASE_IN_OUT_EXPONENTIAL),
            ),
        }
    }

    pub fn shake_with(amount: f32, oscillations: u32) -> Result<Self> {
        let mut e = Self::shake();
        e.kind = EffectKind::Shake(ShakeParams {
            amount,
            oscillations,
        });
        e.kind.validate()?;
        Ok(e)
    }

    pub fn jump(height: f32) -> Result<Self> {
        let e = Self {
            kind: EffectKind::Jump(JumpParams { height }),
            params: EffectParams::new(
                Duration::ZERO,
                Duration::from_secs(3),
                Some(AnimationCurve::EASE_IN_BACK),
            ),
        };
        e.kind.validate()?;
        Ok(e)
    }

    pub fn shimmer() -> Self {
        Self {
            kind: EffectKind::Shimmer(ShimmerParams::default()),
            params: EffectParams::new(
                Duration::ZERO,
                Duration::from_secs(3),
                Some(AnimationCurve::EASE_IN_OUT.with_duration(Duration::from_millis(2500))),
            ),
        }
    }

    pub fn shimmer_with(params: ShimmerParams) -> Result<Self> {
        let mut e = Self::shimmer();
        e.kind = EffectKind::Shimmer(params);
        e.kind.validate()?;
        Ok(e)
    }

    /// Haptic pulse on every firing. No visual component, so no default curve.
    pub fn haptic(pulse: HapticPulse) -> Result<Self> {
        Self::new(EffectKind::Haptic(pulse), EffectParams::default())
    }

    pub fn haptic_selection() -> Self {
        Self {
            kind: EffectKind::Haptic(HapticPulse::Selection),
            params: EffectParams::default(),
        }
    }

    pub fn haptic_impact() -> Self {
        Self::haptic_impact_style(ImpactStyle::default())
    }

    pub fn haptic_impact_style(style: ImpactStyle) -> Self {
        Self {
            kind: EffectKind::Haptic(HapticPulse::Impact {
                style,
                intensity: None,
            }),
            params: EffectParams::default(),
        }
    }

    /// Impact at a fixed `intensity` in `[0, 1]`.
    pub fn haptic_impact_intensity(intensity: f32) -> Result<Self> {
        Self::haptic(HapticPulse::Impact {
            style: ImpactStyle::default(),
            intensity: Some(intensity),
        })
    }

    pub fn haptic_notification(kind: NotificationKind) -> Self {
        Self {
            kind: EffectKind::Haptic(HapticPulse::Notification(kind)),
            params: EffectParams::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.params.delay = delay;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.params.cooldown = cooldown;
        self
    }

    pub fn try_with_delay_secs(self, seconds: f64) -> Result<Self> {
        Ok(self.with_delay(duration_from_secs("delay", seconds)?))
    }

    pub fn try_with_cooldown_secs(self, seconds: f64) -> Result<Self> {
        Ok(self.with_cooldown(duration_from_secs("cooldown", seconds)?))
    }

    pub fn with_curve(mut self, curve: AnimationCurve) -> Self {
        self.params.default_curve = Some(curve);
        self
    }

    pub fn without_curve(mut self) -> Self {
        self.params.default_curve = None;
        self
    }

    /// Re-checks parameters after public fields were edited in place.
    pub fn validate(&self) -> Result<()> {
        self.kind.validate()
    }

    pub fn resolve(&self, phase: f64, ctx: &ResolveContext) -> EffectOutput {
        self.kind.resolve(AnimatableValue { phase }, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;

    const EPS: f32 = 1e-4;

    fn ctx() -> ResolveContext {
        ResolveContext {
            size: Size::new(100.0, 40.0),
            layout_direction: LayoutDirection::LeftToRight,
        }
    }

    #[test]
    fn rest_state_at_integer_phases() {
        let effects = [
            Effect::scale(),
            Effect::shake(),
            Effect::jump(15.0).unwrap(),
        ];
        for e in effects {
            for k in [0.0, 1.0, 7.0] {
                let a = e.resolve(k, &ctx()).transform();
                let b = e.resolve(k + 1.0, &ctx()).transform();
                assert!((a.translate_x - b.translate_x).abs() < EPS);
                assert!((a.translate_y - b.translate_y).abs() < EPS);
                assert!((a.scale_x - 1.0).abs() < EPS, "{}", e.kind.name());
                assert!(a.translate_x.abs() < EPS && a.translate_y.abs() < EPS);
            }
        }
    }

    #[test]
    fn scale_peaks_at_half_phase_about_center() {
        let t = Effect::scale().resolve(3.5, &ctx()).transform();
        assert!((t.scale_x - 1.15).abs() < EPS);
        let c = ctx().size.center();
        let p = t.apply_to_point(c);
        assert!((p.x - c.x).abs() < EPS && (p.y - c.y).abs() < EPS);
    }

    #[test]
    fn shake_oscillates_horizontally() {
        let e = Effect::shake();
        // Two oscillations: first crest at 1/8 of the pulse.
        let t = e.resolve(0.125, &ctx()).transform();
        assert!((t.translate_x - 5.0).abs() < EPS);
        assert_eq!(t.translate_y, 0.0);
        let t = e.resolve(0.375, &ctx()).transform();
        assert!((t.translate_x + 5.0).abs() < EPS);
    }

    #[test]
    fn jump_only_goes_up() {
        let e = Effect::jump(15.0).unwrap();
        let t = e.resolve(2.5, &ctx()).transform();
        assert!((t.translate_y + 15.0).abs() < EPS);
        for i in 0..=20 {
            let t = e.resolve(i as f64 / 20.0 - 1.0, &ctx()).transform();
            assert!(t.translate_y <= 0.0);
        }
    }

    #[test]
    fn amount_one_is_a_no_op() {
        let e = Effect::scale_by(1.0).unwrap();
        let t = e.resolve(0.5, &ctx()).transform();
        assert!(t.apply_to_point(Vec2 { x: 3.0, y: 9.0 }) == Vec2 { x: 3.0, y: 9.0 });
    }

    #[test]
    fn shimmer_center_follows_fractional_phase() {
        let EffectOutput::Mask(m) = Effect::shimmer().resolve(4.97, &ctx()) else {
            panic!("shimmer resolves to a mask");
        };
        assert!((m.center - 0.97).abs() < EPS);
    }

    #[test]
    fn presets_carry_their_timing() {
        assert_eq!(Effect::jump(1.0).unwrap().params.cooldown, Duration::from_secs(3));
        assert_eq!(
            Effect::shimmer().params.default_curve.and_then(|c| c.duration),
            Some(Duration::from_millis(2500))
        );
        assert_eq!(Effect::haptic_selection().params.default_curve, None);
        assert_eq!(
            Effect::haptic_selection().resolve(0.5, &ctx()),
            EffectOutput::Identity
        );
    }

    #[test]
    fn constructors_fail_fast() {
        assert!(Effect::shake_with(5.0, 0).is_err());
        assert!(Effect::jump(-1.0).is_err());
        assert!(Effect::scale_by(f32::NAN).is_err());
        assert!(Effect::scale().try_with_cooldown_secs(-0.5).is_err());
        assert!(
            Effect::shimmer_with(ShimmerParams {
                core_half_width: 0.2,
                falloff_half_width: 0.1,
                opacity: 0.4,
            })
            .is_err()
        );
        assert!(Effect::haptic_impact_intensity(2.0).is_err());
        assert!(EffectParams::from_secs(0.0, -3.0, None).is_err());
    }
}
