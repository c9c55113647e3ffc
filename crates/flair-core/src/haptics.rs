//! Haptic feedback collaborator.
//!
//! The platform owns the actual generators; effects only describe which pulse
//! to play. Failures are best-effort and never reach the caller of an effect.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

/// Mass of the simulated collision behind an impact pulse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImpactStyle {
    Light,
    #[default]
    Medium,
    Heavy,
    Soft,
    Rigid,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HapticPulse {
    Selection,
    /// `intensity` in `[0, 1]`; `None` uses the platform default.
    Impact {
        style: ImpactStyle,
        intensity: Option<f32>,
    },
    Notification(NotificationKind),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HapticError {
    #[error("no haptic hardware available")]
    Unavailable,
    #[error("haptic engine failed: {0}")]
    Engine(String),
}

pub trait Haptics {
    fn pulse(&self, pulse: HapticPulse) -> Result<(), HapticError>;

    fn selection(&self) -> Result<(), HapticError> {
        self.pulse(HapticPulse::Selection)
    }

    fn impact(&self, style: ImpactStyle, intensity: Option<f32>) -> Result<(), HapticError> {
        self.pulse(HapticPulse::Impact { style, intensity })
    }

    fn notification(&self, kind: NotificationKind) -> Result<(), HapticError> {
        self.pulse(HapticPulse::Notification(kind))
    }
}

/// For hosts without haptic hardware. Every pulse reports `Unavailable`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&self, _pulse: HapticPulse) -> Result<(), HapticError> {
        Err(HapticError::Unavailable)
    }
}

/// Plays `pulse`, logging and discarding any failure.
pub fn play(haptics: &dyn Haptics, pulse: HapticPulse) {
    if let Err(e) = haptics.pulse(pulse) {
        log::debug!("haptic {pulse:?} dropped: {e}");
    }
}
