#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }

    pub fn bottom_center(&self) -> Vec2 {
        Vec2 {
            x: self.width / 2.0,
            y: self.height,
        }
    }
}

/// Affine transform without shear, applied as scale, then rotate, then translate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotate: f32, // radians
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub const fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotate: 0.0,
        }
    }

    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            scale_x: 1.0,
            scale_y: 1.0,
            rotate: 0.0,
        }
    }

    /// Uniform scale that keeps `anchor` fixed: `p' = anchor + s * (p - anchor)`.
    pub fn scale_about(scale: f32, anchor: Vec2) -> Self {
        Self {
            translate_x: anchor.x * (1.0 - scale),
            translate_y: anchor.y * (1.0 - scale),
            scale_x: scale,
            scale_y: scale,
            rotate: 0.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn apply_to_point(&self, p: Vec2) -> Vec2 {
        let mut x = p.x * self.scale_x;
        let mut y = p.y * self.scale_y;

        if self.rotate != 0.0 {
            let cos = self.rotate.cos();
            let sin = self.rotate.sin();
            let nx = x * cos - y * sin;
            let ny = x * sin + y * cos;
            x = nx;
            y = ny;
        }

        Vec2 {
            x: x + self.translate_x,
            y: y + self.translate_y,
        }
    }

    /// Applies `other` first, then `self`. Exact for the scale/translate
    /// transforms effects produce; rotations are summed.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            translate_x: self.scale_x * other.translate_x + self.translate_x,
            translate_y: self.scale_y * other.translate_y + self.translate_y,
            scale_x: self.scale_x * other.scale_x,
            scale_y: self.scale_y * other.scale_y,
            rotate: self.rotate + other.rotate,
        }
    }

    /// Stacks `other` on top of `self`: `other` runs after `self`.
    pub fn combine(&self, other: &Transform) -> Transform {
        other.then(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn scale_about_keeps_anchor_fixed() {
        let size = Size::new(100.0, 40.0);
        let t = Transform::scale_about(1.5, size.center());
        assert!(close(t.apply_to_point(size.center()), size.center()));
        assert!(close(
            t.apply_to_point(Vec2 { x: 0.0, y: 0.0 }),
            Vec2 { x: -25.0, y: -10.0 }
        ));
    }

    #[test]
    fn combine_matches_sequential_application() {
        let a = Transform::scale_about(0.9, Vec2 { x: 50.0, y: 40.0 });
        let b = Transform::translate(3.0, -7.0);
        let p = Vec2 { x: 12.0, y: 30.0 };

        let stacked = a.combine(&b).apply_to_point(p);
        let manual = b.apply_to_point(a.apply_to_point(p));
        assert!(close(stacked, manual));
    }

    #[test]
    fn identity_is_neutral() {
        let t = Transform::translate(4.0, 2.0);
        assert_eq!(Transform::identity().combine(&t), t);
        assert_eq!(t.combine(&Transform::identity()), t);
        assert!(Transform::default().is_identity());
    }
}
