//! Depth fog blending
//!
//! Reproduces the fixed-function fog of the live renderer on the CPU so
//! exported frames match the screen: a smoothstep of depth between the fog
//! near and far planes, mixed channel-wise into the fog color.

use crate::camera::FogParams;
use crate::types::ColorRgb;

/// Clamp `x` into `[min_v, max_v]`
pub fn clamp(x: f32, min_v: f32, max_v: f32) -> f32 {
    x.min(max_v).max(min_v)
}

/// Hermite smoothstep between `edge0` and `edge1`
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = clamp((x - edge0) / (edge1 - edge0), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation: `x` at `a = 0`, `y` at `a = 1`
pub fn mix(x: f32, y: f32, a: f32) -> f32 {
    x * (1.0 - a) + y * a
}

/// Blend a base color toward the fog color by depth
///
/// At `depth <= near` the result is exactly the base color; at
/// `depth >= far` exactly the fog color. The clamp inside [`smoothstep`]
/// makes both boundaries exact, not approximate.
pub fn blend(fog: &FogParams, depth: f32, base: ColorRgb) -> ColorRgb {
    let factor = smoothstep(fog.near, fog.far, depth);
    ColorRgb::new(
        mix(base.r, fog.color.r, factor),
        mix(base.g, fog.color.g, factor),
        mix(base.b, fog.color.b, factor),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fog() -> FogParams {
        FogParams {
            near: 2.0,
            far: 10.0,
            color: ColorRgb::new(0.9, 0.9, 1.0),
        }
    }

    #[test]
    fn test_smoothstep_boundaries() {
        assert_eq!(smoothstep(2.0, 10.0, 2.0), 0.0);
        assert_eq!(smoothstep(2.0, 10.0, 10.0), 1.0);
        assert_eq!(smoothstep(2.0, 10.0, -5.0), 0.0);
        assert_eq!(smoothstep(2.0, 10.0, 50.0), 1.0);
        assert_eq!(smoothstep(2.0, 10.0, 6.0), 0.5);
    }

    #[test]
    fn test_blend_exact_at_near() {
        let base = ColorRgb::new(0.123, 0.456, 0.789);
        // Bit-exact identity, not epsilon-close
        assert_eq!(blend(&fog(), 2.0, base), base);
        assert_eq!(blend(&fog(), 0.0, base), base);
    }

    #[test]
    fn test_blend_exact_at_far() {
        let base = ColorRgb::new(0.123, 0.456, 0.789);
        assert_eq!(blend(&fog(), 10.0, base), fog().color);
        assert_eq!(blend(&fog(), 100.0, base), fog().color);
    }

    #[test]
    fn test_blend_is_convex_combination() {
        let base = ColorRgb::new(0.2, 0.4, 0.6);
        let f = fog();
        for depth in [2.5, 4.0, 6.0, 8.0, 9.5] {
            let out = blend(&f, depth, base);
            for (channel, (lo, hi)) in [
                (out.r, (base.r, f.color.r)),
                (out.g, (base.g, f.color.g)),
                (out.b, (base.b, f.color.b)),
            ] {
                let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                assert!(channel >= lo - 1e-6 && channel <= hi + 1e-6);
            }
        }
    }

    #[test]
    fn test_blend_monotone_in_depth() {
        let base = ColorRgb::black();
        let f = fog();
        let mut last = -1.0f32;
        for depth in [2.0, 3.0, 5.0, 7.0, 9.0, 10.0] {
            let out = blend(&f, depth, base);
            assert!(out.r >= last);
            last = out.r;
        }
    }
}
