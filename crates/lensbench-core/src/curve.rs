//! The v–u curve of a convex lens, restricted to real images.
//!
//! Plots `v = u f / (u - f)` for `u` from just beyond `f` to the edge of the
//! bench, with both axes capped at [`AXIS_MAX`].

use crate::state::OpticalState;
use crate::types::{LensKind, OpticsResult};

/// Upper bound of both plot axes (cm).
pub const AXIS_MAX: f64 = 30.0;
/// Sampling step along u (cm).
pub const U_STEP: f64 = 0.5;
/// Offset from the asymptote at u = f where sampling starts (cm).
pub const U_START_OFFSET: f64 = 0.1;

/// Sample the real-image branch for focal length magnitude `f`.
///
/// Points with `v > AXIS_MAX` are skipped.
pub fn uv_curve(f: f64) -> Vec<[f64; 2]> {
    let f = f.abs();
    let start = f + U_START_OFFSET;
    let steps = ((AXIS_MAX - start) / U_STEP).floor().max(-1.0) as i64;

    (0..=steps)
        .map(|i| start + i as f64 * U_STEP)
        .map(|u| [u, u * f / (u - f)])
        .filter(|p| p[1] <= AXIS_MAX)
        .collect()
}

/// The current `(|u|, v)` point, when the bench is on the plotted branch.
pub fn current_marker(state: &OpticalState, result: &OpticsResult) -> Option<[f64; 2]> {
    let lens = state.lens();
    let u = state.object_distance();
    if lens.kind != LensKind::Convex || u <= 0.0 || u <= lens.focal_magnitude() {
        return None;
    }
    let v = result.image_distance.finite()?;
    (v > 0.0 && v <= AXIS_MAX).then_some([u, v])
}
