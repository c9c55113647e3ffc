use flair_core::{EffectOutput, ShimmerMask, Size, Transform, Vec2};

/// The piece of rendered content effects are composed onto.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub size: Size,
    pub transform: Transform,
    pub masks: Vec<ShimmerMask>,
    /// Some effect on this layer is mid-transition; the host should render
    /// another frame.
    pub animating: bool,
}

impl Layer {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            transform: Transform::identity(),
            masks: Vec::new(),
            animating: false,
        }
    }

    /// Stacks one effect output on top of what is already applied.
    pub fn apply(mut self, output: EffectOutput) -> Self {
        match output {
            EffectOutput::Identity => {}
            EffectOutput::Geometry(t) => self.transform = self.transform.combine(&t),
            EffectOutput::Mask(m) => self.masks.push(m),
        }
        self
    }

    /// Combined shimmer overlay alpha at a unit-coordinate point.
    pub fn overlay_alpha_at(&self, p: Vec2, content_alpha: f32) -> f32 {
        self.masks
            .iter()
            .map(|m| m.alpha_at(p, content_alpha))
            .sum::<f32>()
            .min(content_alpha.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flair_core::{LayoutDirection, ShimmerParams};

    #[test]
    fn geometry_outputs_compose_in_order() {
        let layer = Layer::new(Size::new(10.0, 10.0))
            .apply(EffectOutput::Geometry(Transform::translate(2.0, 0.0)))
            .apply(EffectOutput::Identity)
            .apply(EffectOutput::Geometry(Transform::translate(0.0, -3.0)));
        let p = layer.transform.apply_to_point(Vec2 { x: 0.0, y: 0.0 });
        assert_eq!(p, Vec2 { x: 2.0, y: -3.0 });
        assert!(layer.masks.is_empty());
    }

    #[test]
    fn masks_are_clipped_to_content() {
        let mask = ShimmerMask::new(0.5, &ShimmerParams::default(), LayoutDirection::LeftToRight);
        let layer = Layer::new(Size::new(10.0, 10.0)).apply(EffectOutput::Mask(mask));
        let center = Vec2 { x: 0.5, y: 0.5 };
        assert!((layer.overlay_alpha_at(center, 1.0) - 0.4).abs() < 1e-5);
        assert_eq!(layer.overlay_alpha_at(center, 0.0), 0.0);
    }
}
