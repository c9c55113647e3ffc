//! Conditional effects: driven by a boolean activation rather than a counter.

use web_time::Duration;

use crate::animation::AnimationCurve;
use crate::error::{Error, Result, duration_from_secs, finite};
use crate::geometry::{Size, Transform};
use crate::math::{clamp, lerp};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PushDownParams {
    /// Scale reached when fully pressed.
    pub scale_floor: f32,
}

impl Default for PushDownParams {
    fn default() -> Self {
        Self { scale_floor: 0.95 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionalKind {
    PushDown(PushDownParams),
}

impl ConditionalKind {
    pub fn name(&self) -> &'static str {
        match self {
            ConditionalKind::PushDown(_) => "push_down",
        }
    }

    /// Transform for an activation level; 0 is at rest, 1 fully active.
    /// Springs overshoot, so values outside `[0, 1]` are clamped.
    pub fn resolve(&self, activation: f64, size: Size) -> Transform {
        match *self {
            ConditionalKind::PushDown(PushDownParams { scale_floor }) => {
                let t = clamp(activation as f32, 0.0, 1.0);
                let y = lerp(t, 0.0, size.height);
                let scale = lerp(1.0 - t, scale_floor, 1.0);
                // Shift down, then shrink towards the bottom edge.
                Transform::scale_about(scale, size.bottom_center())
                    .then(&Transform::translate(0.0, y))
            }
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            ConditionalKind::PushDown(PushDownParams { scale_floor }) => {
                let s = finite("scale_floor", scale_floor as f64)?;
                if !(s > 0.0 && s <= 1.0) {
                    return Err(Error::invalid("scale_floor", "must be within (0, 1]"));
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ConditionalEffectRepr")
)]
pub struct ConditionalEffect {
    pub kind: ConditionalKind,
    pub delay: Duration,
    pub default_curve: Option<AnimationCurve>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ConditionalEffectRepr {
    kind: ConditionalKind,
    delay: Duration,
    default_curve: Option<AnimationCurve>,
}

#[cfg(feature = "serde")]
impl TryFrom<ConditionalEffectRepr> for ConditionalEffect {
    type Error = Error;

    fn try_from(repr: ConditionalEffectRepr) -> Result<Self> {
        ConditionalEffect::new(repr.kind, repr.delay, repr.default_curve)
    }
}

impl ConditionalEffect {
    pub fn new(
        kind: ConditionalKind,
        delay: Duration,
        default_curve: Option<AnimationCurve>,
    ) -> Result<Self> {
        kind.validate()?;
        Ok(Self {
            kind,
            delay,
            default_curve,
        })
    }

    /// "Pressed into the surface" while the condition holds.
    pub fn push_down() -> Self {
        Self {
            kind: ConditionalKind::PushDown(PushDownParams::default()),
            delay: Duration::ZERO,
            default_curve: Some(AnimationCurve::INTERACTIVE_BOUNCY),
        }
    }

    pub fn push_down_to(scale_floor: f32) -> Result<Self> {
        Self::new(
            ConditionalKind::PushDown(PushDownParams { scale_floor }),
            Duration::ZERO,
            Some(AnimationCurve::INTERACTIVE_BOUNCY),
        )
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn try_with_delay_secs(self, seconds: f64) -> Result<Self> {
        Ok(self.with_delay(duration_from_secs("delay", seconds)?))
    }

    pub fn with_curve(mut self, curve: AnimationCurve) -> Self {
        self.default_curve = Some(curve);
        self
    }

    pub fn without_curve(mut self) -> Self {
        self.default_curve = None;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.kind.validate()
    }

    pub fn resolve(&self, activation: f64, size: Size) -> Transform {
        self.kind.resolve(activation, size)
    }
}
