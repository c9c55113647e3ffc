//! Animation curves, interpolation and clocks.
//!
//! Curves are plain values: a catalog of named presets lives as associated
//! constants on [`AnimationCurve`] and is never mutated.

use std::sync::Arc;

use parking_lot::Mutex;
use web_time::{Duration, Instant};

const DEFAULT_BEZIER_DURATION: Duration = Duration::from_millis(350);
const MAX_SPRING_SETTLE: Duration = Duration::from_secs(10);
// ln(1000): the spring envelope has decayed below 0.1%.
const SETTLE_LOG: f64 = 6.907_755_278_982_137;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    /// CSS-style timing curve through (0,0), (x1,y1), (x2,y2), (1,1).
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// Damped spring. `response` is the undamped period in seconds,
    /// `damping_fraction` is 1.0 for critical damping.
    Spring { response: f32, damping_fraction: f32 },
}

impl Easing {
    /// Eased value for normalized progress `t` in `[0, 1]`.
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::CubicBezier { x1, y1, x2, y2 } => bezier_ease(t, x1, y1, x2, y2),
            Easing::Spring {
                response,
                damping_fraction,
            } => {
                let settle = self.natural_duration().as_secs_f64();
                spring_value(response, damping_fraction, t as f64 * settle)
            }
        }
    }

    /// Time the curve needs when no duration override is given.
    pub fn natural_duration(&self) -> Duration {
        match *self {
            Easing::Linear | Easing::CubicBezier { .. } => DEFAULT_BEZIER_DURATION,
            Easing::Spring {
                response,
                damping_fraction,
            } => spring_settle_time(response as f64, damping_fraction as f64),
        }
    }
}

/// Spring displacement from 0 towards 1 after `secs`, starting at rest.
fn spring_value(response: f32, damping_fraction: f32, secs: f64) -> f32 {
    let response = (response as f64).max(1e-3);
    let zeta = (damping_fraction as f64).max(0.0);
    let w0 = std::f64::consts::TAU / response;
    let t = secs.max(0.0);

    let x = if (zeta - 1.0).abs() < 1e-6 {
        1.0 - (-w0 * t).exp() * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * w0 * t).exp();
        1.0 - decay * ((wd * t).cos() + (zeta * w0 / wd) * (wd * t).sin())
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - root);
        let r2 = -w0 * (zeta + root);
        1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
    };
    x as f32
}

fn spring_settle_time(response: f64, zeta: f64) -> Duration {
    let response = response.max(1e-3);
    let w0 = std::f64::consts::TAU / response;
    let rate = if zeta > 1.0 {
        w0 * (zeta - (zeta * zeta - 1.0).sqrt())
    } else {
        zeta * w0
    };
    if rate <= 0.0 || !rate.is_finite() {
        return MAX_SPRING_SETTLE;
    }
    Duration::from_secs_f64((SETTLE_LOG / rate).min(MAX_SPRING_SETTLE.as_secs_f64()))
}

#[inline]
fn cubic_bezier(p1: f32, p2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

/// Inverts x(s) by bisection, then evaluates y(s).
fn bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..32 {
        let x = cubic_bezier(x1, x2, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(y1, y2, mid)
}

/// A timing function plus optional duration override and start delay.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationCurve {
    pub easing: Easing,
    pub duration: Option<Duration>,
    pub delay: Duration,
}

impl Default for AnimationCurve {
    fn default() -> Self {
        Self::EASE_IN_OUT
    }
}

macro_rules! bezier {
    ($x1:expr, $y1:expr, $x2:expr, $y2:expr) => {
        AnimationCurve::new(Easing::CubicBezier {
            x1: $x1,
            y1: $y1,
            x2: $x2,
            y2: $y2,
        })
    };
}

macro_rules! spring {
    ($response:expr, $damping:expr) => {
        AnimationCurve::new(Easing::Spring {
            response: $response,
            damping_fraction: $damping,
        })
    };
}

impl AnimationCurve {
    pub const LINEAR: Self = Self::new(Easing::Linear);
    pub const EASE_IN: Self = bezier!(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Self = bezier!(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Self = bezier!(0.42, 0.0, 0.58, 1.0);

    // Mostly derived from the values at https://easings.net
    pub const EASE_IN_CIRCULAR: Self = bezier!(0.55, 0.0, 1.0, 0.45);
    pub const EASE_OUT_CIRCULAR: Self = bezier!(0.0, 0.55, 0.45, 1.0);
    pub const EASE_IN_OUT_CIRCULAR: Self = bezier!(0.85, 0.0, 0.15, 1.0);

    pub const EASE_IN_QUINT: Self = bezier!(0.64, 0.0, 0.78, 0.0);
    pub const EASE_OUT_QUINT: Self = bezier!(0.22, 1.0, 0.36, 1.0);
    pub const EASE_IN_OUT_QUINT: Self = bezier!(0.83, 0.0, 0.17, 1.0);

    pub const EASE_IN_EXPONENTIAL: Self = bezier!(0.7, 0.0, 0.84, 0.0);
    pub const EASE_OUT_EXPONENTIAL: Self = bezier!(0.16, 1.0, 0.3, 1.0);
    pub const EASE_IN_OUT_EXPONENTIAL: Self = bezier!(0.87, 0.0, 0.13, 1.0);

    pub const EASE_IN_BACK: Self = bezier!(0.36, 0.0, 0.66, -0.56);
    pub const EASE_OUT_BACK: Self = bezier!(0.34, 1.56, 0.64, 1.0);
    pub const EASE_IN_OUT_BACK: Self = bezier!(0.68, -0.6, 0.32, 1.6);

    pub const BOUNCY: Self = spring!(0.5, 0.7);
    pub const SNAPPY: Self = spring!(0.5, 0.85);
    pub const SMOOTH: Self = spring!(0.5, 1.0);
    /// Much less damping than [`Self::BOUNCY`]; used by push-down.
    pub const INTERACTIVE_BOUNCY: Self = spring!(0.25, 0.3);

    const CATALOG: &'static [(&'static str, AnimationCurve)] = &[
        ("linear", Self::LINEAR),
        ("easeIn", Self::EASE_IN),
        ("easeOut", Self::EASE_OUT),
        ("easeInOut", Self::EASE_IN_OUT),
        ("easeInCircular", Self::EASE_IN_CIRCULAR),
        ("easeOutCircular", Self::EASE_OUT_CIRCULAR),
        ("easeInOutCircular", Self::EASE_IN_OUT_CIRCULAR),
        ("easeInQuint", Self::EASE_IN_QUINT),
        ("easeOutQuint", Self::EASE_OUT_QUINT),
        ("easeInOutQuint", Self::EASE_IN_OUT_QUINT),
        ("easeInExponential", Self::EASE_IN_EXPONENTIAL),
        ("easeOutExponential", Self::EASE_OUT_EXPONENTIAL),
        ("easeInOutExponential", Self::EASE_IN_OUT_EXPONENTIAL),
        ("easeInBack", Self::EASE_IN_BACK),
        ("easeOutBack", Self::EASE_OUT_BACK),
        ("easeInOutBack", Self::EASE_IN_OUT_BACK),
        ("bouncy", Self::BOUNCY),
        ("snappy", Self::SNAPPY),
        ("smooth", Self::SMOOTH),
        ("interactiveBouncy", Self::INTERACTIVE_BOUNCY),
    ];

    pub const fn new(easing: Easing) -> Self {
        Self {
            easing,
            duration: None,
            delay: Duration::ZERO,
        }
    }

    /// Looks up a preset by its camelCase name, e.g. `"easeInBack"`.
    pub fn named(name: &str) -> Option<Self> {
        Self::CATALOG
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
    }

    pub fn catalog() -> impl Iterator<Item = (&'static str, AnimationCurve)> {
        Self::CATALOG.iter().copied()
    }

    /// Bouncy spring whose response is `duration`.
    pub fn bouncy(duration: Duration) -> Self {
        spring!(duration.as_secs_f32(), 0.7)
    }

    pub fn snappy(duration: Duration) -> Self {
        spring!(duration.as_secs_f32(), 0.85)
    }

    pub fn smooth(duration: Duration) -> Self {
        spring!(duration.as_secs_f32(), 1.0)
    }

    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Defers the start of the curve. Replaces any earlier delay.
    pub const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Active time of the curve, excluding the delay.
    pub fn duration(&self) -> Duration {
        self.duration
            .unwrap_or_else(|| self.easing.natural_duration())
    }

    /// Delay plus active time. Saturates at `Duration::MAX`.
    pub fn total_duration(&self) -> Duration {
        self.delay.saturating_add(self.duration())
    }

    /// Eased progress `elapsed` after the transaction began. Holds 0 during
    /// the delay and reaches exactly 1 once the curve completes.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if elapsed < self.delay {
            return 0.0;
        }
        let active = elapsed - self.delay;
        let duration = self.duration();
        if active >= duration {
            return 1.0;
        }
        let t = (active.as_secs_f64() / duration.as_secs_f64()) as f32;
        self.easing.interpolate(t)
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.total_duration()
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for f64 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t as f64
    }
}

// Animation clock
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock you can drive deterministically. Clones share the same time.
#[derive(Clone)]
pub struct ManualClock {
    t: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        Self {
            t: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.t.lock() += by;
    }

    pub fn set(&self, t: Instant) {
        *self.t.lock() = t;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.t.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn bezier_endpoints_and_symmetry() {
        let c = AnimationCurve::EASE_IN_OUT;
        assert_eq!(c.easing.interpolate(0.0), 0.0);
        assert_eq!(c.easing.interpolate(1.0), 1.0);
        assert!((c.easing.interpolate(0.5) - 0.5).abs() < EPS);
        assert!(c.easing.interpolate(0.25) < 0.25);
    }

    #[test]
    fn ease_in_back_dips_below_zero() {
        let min = (1..100)
            .map(|i| AnimationCurve::EASE_IN_BACK.easing.interpolate(i as f32 / 100.0))
            .fold(f32::MAX, f32::min);
        assert!(min < -0.05, "expected anticipation dip, got {min}");
    }

    #[test]
    fn springs_settle_at_target() {
        for curve in [
            AnimationCurve::BOUNCY,
            AnimationCurve::SMOOTH,
            AnimationCurve::INTERACTIVE_BOUNCY,
            AnimationCurve::new(Easing::Spring {
                response: 0.4,
                damping_fraction: 1.6,
            }),
        ] {
            assert!(curve.easing.interpolate(0.0).abs() < EPS);
            assert!((curve.easing.interpolate(0.999) - 1.0).abs() < 0.01);
            assert!(curve.duration() < MAX_SPRING_SETTLE);
        }
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let c = AnimationCurve::INTERACTIVE_BOUNCY;
        let peak = (1..200)
            .map(|i| c.easing.interpolate(i as f32 / 200.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.2, "peak {peak}");
    }

    #[test]
    fn progress_holds_during_delay_and_completes() {
        let c = AnimationCurve::LINEAR
            .with_duration(Duration::from_millis(1000))
            .delayed(Duration::from_millis(500));
        assert_eq!(c.progress(Duration::from_millis(200)), 0.0);
        assert!((c.progress(Duration::from_millis(750)) - 0.25).abs() < EPS);
        assert_eq!(c.progress(Duration::from_millis(1500)), 1.0);
        assert!(!c.is_complete(Duration::from_millis(1499)));
        assert!(c.is_complete(Duration::from_millis(1500)));
    }

    #[test]
    fn catalog_lookup() {
        assert_eq!(
            AnimationCurve::named("easeInBack"),
            Some(AnimationCurve::EASE_IN_BACK)
        );
        assert_eq!(AnimationCurve::named("nope"), None);
        assert_eq!(AnimationCurve::catalog().count(), 20);
        assert_eq!(
            AnimationCurve::bouncy(Duration::from_millis(250)).easing,
            Easing::Spring {
                response: 0.25,
                damping_fraction: 0.7
            }
        );
    }

    #[test]
    fn lightly_damped_spring_is_capped() {
        let c = AnimationCurve::new(Easing::Spring {
            response: 0.5,
            damping_fraction: 1e-30,
        });
        assert_eq!(c.duration(), MAX_SPRING_SETTLE);
    }

    #[test]
    fn huge_delay_saturates_total_duration() {
        let c = AnimationCurve::EASE_IN.delayed(Duration::MAX);
        assert_eq!(c.total_duration(), Duration::MAX);
        assert!(!c.is_complete(Duration::from_secs(3600)));
        assert_eq!(c.progress(Duration::from_secs(3600)), 0.0);
    }

    #[test]
    fn manual_clock_is_shared_between_clones() {
        let t0 = Instant::now();
        let clock = ManualClock::new(t0);
        let other = clock.clone();
        clock.advance(Duration::from_millis(250));
        assert_eq!(other.now(), t0 + Duration::from_millis(250));
    }
}
