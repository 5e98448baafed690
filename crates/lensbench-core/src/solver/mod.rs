//! Thin-lens solving for an [`OpticalState`] snapshot.
//!
//! The equations themselves live in [`thin_lens`]; this module binds them to
//! the state so callers recompute with a single call after every mutation.

pub mod thin_lens;

pub use thin_lens::{solve_image_distance, solve_magnification};

use crate::state::OpticalState;
use crate::types::OpticsResult;

/// Solve the thin-lens equation for the current lens and object.
///
/// Pure and deterministic: the same state always yields a bit-identical result.
pub fn compute_optics(state: &OpticalState) -> OpticsResult {
    let u = state.object_distance();
    let lens = state.lens();
    let image_distance = solve_image_distance(u, lens.focal_length, lens.kind);
    let magnification = solve_magnification(u, image_distance, lens.kind);

    log::debug!(
        "solve: kind={} f={:.1} u={:.2} -> v={:?} m={:?}",
        lens.kind,
        lens.focal_length,
        u,
        image_distance,
        magnification
    );

    OpticsResult { image_distance, magnification }
}
