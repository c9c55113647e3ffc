use flair_core::{Clock, Haptics, LayoutDirection, NoHaptics};

/// Host collaborators handed to every effect attachment.
///
/// Passed explicitly instead of looked up from ambient state.
#[derive(Clone, Copy)]
pub struct EffectEnv<'a> {
    pub clock: &'a dyn Clock,
    pub layout_direction: LayoutDirection,
    pub haptics: &'a dyn Haptics,
}

impl<'a> EffectEnv<'a> {
    /// Left-to-right layout, no haptics.
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self {
            clock,
            layout_direction: LayoutDirection::default(),
            haptics: &NoHaptics,
        }
    }

    pub fn with_layout_direction(mut self, dir: LayoutDirection) -> Self {
        self.layout_direction = dir;
        self
    }

    pub fn with_haptics(mut self, haptics: &'a dyn Haptics) -> Self {
        self.haptics = haptics;
        self
    }
}
