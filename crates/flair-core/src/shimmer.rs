//! Travelling highlight band for the shimmer effect.
//!
//! The band is described along a gradient axis in unit content coordinates
//! (`(0,0)` top-leading, `(1,1)` bottom-trailing). Positions wrap modulo 1 so
//! a band near the end of the axis continues at its start.

use smallvec::{SmallVec, smallvec};

use crate::geometry::{LayoutDirection, Vec2};

/// Half-open range `[start, end]` along the gradient axis, inside `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BandSegment {
    pub start: f32,
    pub end: f32,
}

impl BandSegment {
    pub fn contains(&self, t: f32) -> bool {
        t >= self.start && t <= self.end
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShimmerParams {
    /// Half width of the fully lit core.
    pub core_half_width: f32,
    /// Half width at which the highlight has faded to zero.
    pub falloff_half_width: f32,
    /// Overlay opacity at full intensity.
    pub opacity: f32,
}

impl Default for ShimmerParams {
    fn default() -> Self {
        Self {
            core_half_width: 0.05,
            falloff_half_width: 0.10,
            opacity: 0.4,
        }
    }
}

/// Resolved shimmer overlay for one phase value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShimmerMask {
    pub center: f32,
    pub core_half_width: f32,
    pub falloff_half_width: f32,
    pub opacity: f32,
    pub axis_start: Vec2,
    pub axis_end: Vec2,
}

impl ShimmerMask {
    /// `center` is the fractional phase; RTL mirrors the axis horizontally so
    /// the band travels from the trailing edge.
    pub fn new(center: f32, params: &ShimmerParams, direction: LayoutDirection) -> Self {
        let (axis_start, axis_end) = match direction {
            LayoutDirection::LeftToRight => (Vec2 { x: 0.0, y: 0.0 }, Vec2 { x: 1.0, y: 1.0 }),
            LayoutDirection::RightToLeft => (Vec2 { x: 1.0, y: 0.0 }, Vec2 { x: 0.0, y: 1.0 }),
        };
        Self {
            center: center.rem_euclid(1.0),
            core_half_width: params.core_half_width,
            falloff_half_width: params.falloff_half_width,
            opacity: params.opacity,
            axis_start,
            axis_end,
        }
    }

    /// Highlight strength at axis position `t`: 1 in the core, fading linearly
    /// to 0 at the falloff edge.
    pub fn intensity_at(&self, t: f32) -> f32 {
        let d = wrapped_distance(t, self.center);
        if d <= self.core_half_width {
            1.0
        } else if d >= self.falloff_half_width {
            0.0
        } else {
            1.0 - (d - self.core_half_width) / (self.falloff_half_width - self.core_half_width)
        }
    }

    /// Ranges lit by the full falloff band.
    pub fn highlight_segments(&self) -> SmallVec<[BandSegment; 2]> {
        band_segments(self.center, self.falloff_half_width)
    }

    /// Ranges lit by the fully opaque core.
    pub fn core_segments(&self) -> SmallVec<[BandSegment; 2]> {
        band_segments(self.center, self.core_half_width)
    }

    /// Projects a unit-coordinate point onto the gradient axis.
    pub fn axis_position(&self, p: Vec2) -> f32 {
        let dx = self.axis_end.x - self.axis_start.x;
        let dy = self.axis_end.y - self.axis_start.y;
        let len2 = dx * dx + dy * dy;
        if len2 == 0.0 {
            return 0.0;
        }
        (((p.x - self.axis_start.x) * dx + (p.y - self.axis_start.y) * dy) / len2).clamp(0.0, 1.0)
    }

    /// Overlay alpha at `p`, masked by the content's own alpha so the band only
    /// shows on the rendered silhouette.
    pub fn alpha_at(&self, p: Vec2, content_alpha: f32) -> f32 {
        content_alpha.clamp(0.0, 1.0) * self.opacity * self.intensity_at(self.axis_position(p))
    }
}

fn wrapped_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(1.0);
    d.min(1.0 - d)
}

fn band_segments(center: f32, half_width: f32) -> SmallVec<[BandSegment; 2]> {
    if half_width >= 0.5 {
        return smallvec![BandSegment {
            start: 0.0,
            end: 1.0
        }];
    }
    let start = center - half_width;
    let end = center + half_width;
    if start < 0.0 {
        smallvec![
            BandSegment { start: 0.0, end },
            BandSegment {
                start: start + 1.0,
                end: 1.0
            },
        ]
    } else if end > 1.0 {
        smallvec![
            BandSegment {
                start: 0.0,
                end: end - 1.0
            },
            BandSegment { start, end: 1.0 },
        ]
    } else {
        smallvec![BandSegment { start, end }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn mask(center: f32, direction: LayoutDirection) -> ShimmerMask {
        ShimmerMask::new(center, &ShimmerParams::default(), direction)
    }

    #[test]
    fn band_wraps_past_the_end() {
        let segs = mask(0.97, LayoutDirection::LeftToRight).core_segments();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].start, 0.0);
        assert!((segs[0].end - 0.02).abs() < EPS);
        assert!((segs[1].start - 0.92).abs() < EPS);
        assert_eq!(segs[1].end, 1.0);
        assert!(segs[0].contains(0.01));
    }

    #[test]
    fn band_wraps_before_the_start() {
        let segs = mask(0.03, LayoutDirection::LeftToRight).highlight_segments();
        assert_eq!(segs.len(), 2);
        assert!((segs[0].end - 0.13).abs() < EPS);
        assert!((segs[1].start - 0.93).abs() < EPS);
    }

    #[test]
    fn intensity_profile() {
        let m = mask(0.5, LayoutDirection::LeftToRight);
        assert_eq!(m.intensity_at(0.5), 1.0);
        assert_eq!(m.intensity_at(0.54), 1.0);
        assert!((m.intensity_at(0.575) - 0.5).abs() < 1e-3);
        assert_eq!(m.intensity_at(0.7), 0.0);

        let wrapped = mask(0.98, LayoutDirection::LeftToRight);
        assert_eq!(wrapped.intensity_at(0.01), 1.0);
    }

    #[test]
    fn rtl_mirrors_travel() {
        let ltr = mask(0.1, LayoutDirection::LeftToRight);
        let rtl = mask(0.1, LayoutDirection::RightToLeft);
        let top_left = Vec2 { x: 0.05, y: 0.05 };
        let top_right = Vec2 { x: 0.95, y: 0.05 };
        assert!(ltr.alpha_at(top_left, 1.0) > 0.0);
        assert_eq!(ltr.alpha_at(top_right, 1.0), 0.0);
        assert!(rtl.alpha_at(top_right, 1.0) > 0.0);
        assert_eq!(rtl.alpha_at(top_left, 1.0), 0.0);
    }

    #[test]
    fn masked_by_content_alpha() {
        let m = mask(0.5, LayoutDirection::LeftToRight);
        let p = Vec2 { x: 0.5, y: 0.5 };
        assert!((m.alpha_at(p, 1.0) - 0.4).abs() < EPS);
        assert_eq!(m.alpha_at(p, 0.0), 0.0);
    }
}
