//! Attaching Flair effects during a render pass.
//!
//! ```rust
//! use flair_core::*;
//! use flair_ui::*;
//!
//! let clock = ManualClock::default();
//! let env = EffectEnv::new(&clock);
//!
//! let _frame = ComposeGuard::begin();
//! let cart_items = 3;
//! let layer = change_effect(
//!     "cart-badge",
//!     Layer::new(Size::new(24.0, 24.0)),
//!     Effect::scale(),
//!     cart_items,
//!     true,
//!     None,
//!     &env,
//! );
//! assert!(!layer.animating);
//! ```

pub mod attach;
pub mod env;
pub mod layer;
pub mod runtime;

pub use attach::{change_effect, conditional_effect};
pub use env::EffectEnv;
pub use layer::Layer;
pub use runtime::{ComposeGuard, forget, remember_state_with_key, remember_with_key};
