pub use crate::animation::{AnimationCurve, Clock, Easing, ManualClock, SystemClock};
pub use crate::conditional::{ConditionalEffect, ConditionalKind, PushDownParams};
pub use crate::effect::{
    AnimatableValue, Effect, EffectKind, EffectOutput, EffectParams, JumpParams, ResolveContext,
    ScaleParams, ShakeParams,
};
pub use crate::error::{Error, Result};
pub use crate::geometry::{LayoutDirection, Size, Transform, Vec2};
pub use crate::haptics::{HapticPulse, Haptics, ImpactStyle, NoHaptics, NotificationKind};
pub use crate::shimmer::{ShimmerMask, ShimmerParams};
pub use crate::transaction::{ChangeEffectDriver, ConditionalEffectDriver, Transition};
pub use crate::trigger::{Observed, Suppressed, TriggerState};
