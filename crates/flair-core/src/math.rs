/// Linear interpolation from `v0` (at `t = 0`) to `v1` (at `t = 1`). Not clamped.
#[inline]
pub fn lerp(t: f32, v0: f32, v1: f32) -> f32 {
    v0 + t * (v1 - v0)
}

#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// `phase - floor(phase)`, always in `[0, 1)`.
#[inline]
pub fn fractional(phase: f64) -> f64 {
    let f = phase - phase.floor();
    // -1e-17 - floor(-1e-17) rounds to 1.0
    if f >= 1.0 { 0.0 } else { f }
}
