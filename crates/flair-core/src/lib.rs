//! # Change effects
//!
//! Flair turns value changes into short, self-contained visual effects: a
//! scale pulse when a counter increments, a shake when validation fails, a
//! shimmer sweeping across a button. Three pieces cooperate:
//!
//! - [`TriggerState`] — watches a value and bumps a fire count on each
//!   accepted change (enabled, not within cooldown).
//! - [`EffectKind::resolve`] — maps a phase derived from that count to a
//!   transform or mask.
//! - [`Transition`] / [`resolve_curve`] — decide which curve animates the
//!   phase from `count - 1` to `count`, and when it starts.
//!
//! ```rust
//! use flair_core::*;
//! use web_time::{Duration, Instant};
//!
//! let t0 = Instant::now();
//! let mut shake = ChangeEffectDriver::new(Effect::shake(), 0u32);
//!
//! shake.observe(1, true, None, t0, &NoHaptics);
//! assert_eq!(shake.fire_count(), 1);
//!
//! let ctx = ResolveContext::default();
//! let mid = shake.output(t0 + Duration::from_millis(100), &ctx);
//! log::debug!("offset {:?}", mid.transform().translate_x);
//! ```
//!
//! ## Conditional effects
//!
//! [`ConditionalEffect`]s follow a boolean instead of a counter, e.g.
//! push-down while a button is pressed. [`ConditionalEffectDriver`] ignores a
//! request for the state already in flight, so a fast-toggling flag does not
//! restart the animation every frame.
//!
//! ## Time
//!
//! Nothing here reads a global clock: every operation takes `now`. Hosts use
//! [`SystemClock`]; tests drive a [`ManualClock`].
//!
//! ## Threads
//!
//! Drivers are plain values updated from the UI thread. Curves and presets
//! are immutable and can be shared freely.

pub mod animation;
pub mod conditional;
pub mod effect;
pub mod error;
pub mod geometry;
pub mod haptics;
pub mod math;
pub mod prelude;
pub mod shimmer;
pub mod transaction;
pub mod trigger;

pub use animation::*;
pub use conditional::*;
pub use effect::*;
pub use error::{Error, Result};
pub use geometry::*;
pub use haptics::{HapticError, HapticPulse, Haptics, ImpactStyle, NoHaptics, NotificationKind};
pub use math::{clamp, fractional, lerp};
pub use shimmer::*;
pub use transaction::*;
pub use trigger::*;
