//! Point size model
//!
//! Base point radius scales inverse-logarithmically with the number of
//! points, so dense embeddings stay readable and sparse ones stay visible.

use crate::trace::Dimensions;

const SCALE: f32 = 200.0;
const LOG_BASE: f32 = 8.0;
const DIVISOR_2D: f32 = 1.5;

/// Base point radius for a trace of `npoints` points
///
/// `npoints` is clamped to at least 2 before the logarithm; n = 0 or 1
/// would otherwise produce a non-finite radius.
pub fn base_point_size(npoints: usize, dimensions: Dimensions) -> f32 {
    let n = npoints.max(2) as f32;
    let size = SCALE / n.ln() / LOG_BASE.ln();
    match dimensions {
        Dimensions::Three => size,
        Dimensions::Two => size / DIVISOR_2D,
    }
}
