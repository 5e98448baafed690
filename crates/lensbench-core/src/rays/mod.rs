//! Principal-ray construction.
//!
//! Every construction is computed in a canonical frame (lens centre at the
//! origin, object on the left, light toward +x) by one of a closed set of
//! strategies selected from the lens kind and image reality:
//!
//! | Strategy | Lens | Image |
//! |----------|------|-------|
//! | [`Strategy::ConvexReal`] | convex | real |
//! | [`Strategy::ConvexVirtual`] | convex | virtual |
//! | [`Strategy::Concave`] | concave | always virtual |
//!
//! The resulting segments are then placed on the bench with a
//! [`Transform2`], which mirrors them about the lens plane when the object is
//! on the right. Output is therefore mirror-symmetric under `u -> -u` by
//! construction.
//!
//! - [`principal`]: the three rules for a single source height.
//! - [`fan`]: bundles of rays over several heights or an angular cone.

pub mod fan;
pub mod principal;

pub use fan::{generate_cone_fan, generate_ray_fan, generate_ray_fan_with, ConeSpec};

use serde::{Deserialize, Serialize};

use crate::classify::classify_image;
use crate::state::OpticalState;
use crate::transform::{Side, Transform2};
use crate::types::{LensKind, OpticsResult, Point2, RayRule, Segment};

/// Tunables for ray construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayOptions {
    /// How far past the lens (along the axis, cm) an open-ended emergent ray
    /// is drawn when it does not terminate on a real image.
    pub extension_cm: f64,
}

impl Default for RayOptions {
    fn default() -> Self {
        Self { extension_cm: 20.0 }
    }
}

/// Geometric construction strategy for a `{kind, reality}` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    ConvexReal,
    ConvexVirtual,
    Concave,
}

/// Everything a strategy needs, in the canonical frame.
#[derive(Debug, Clone)]
pub struct Construction {
    pub strategy: Strategy,
    /// Object distance magnitude |u| (cm). The source sits at x = -d.
    pub d: f64,
    /// Focal length magnitude |f| (cm).
    pub f: f64,
    /// Axial position of the image: +|v| when real, -|v| when virtual.
    pub image_x: f64,
    /// Signed magnification; image height = m * source height.
    pub magnification: f64,
    /// Open-ended ray length along the axis (cm).
    pub extension: f64,
    placement: Transform2,
}

impl Construction {
    /// Set up a construction for the current bench.
    ///
    /// Returns `None` when no image forms (object on the lens or on the focal
    /// plane); such configurations produce no rays.
    pub fn new(state: &OpticalState, result: &OpticsResult, options: &RayOptions) -> Option<Self> {
        let nature = classify_image(state, result).nature()?;
        let v = result.image_distance.finite()?;
        let magnification = result.magnification.finite()?;

        let lens = state.lens();
        let u = state.object_distance();
        let strategy = match (lens.kind, nature.is_real) {
            (LensKind::Concave, _) => Strategy::Concave,
            (LensKind::Convex, true) => Strategy::ConvexReal,
            (LensKind::Convex, false) => Strategy::ConvexVirtual,
        };
        let image_x = if nature.is_real { v.abs() } else { -v.abs() };

        Some(Self {
            strategy,
            d: u.abs(),
            f: lens.focal_magnitude(),
            image_x,
            magnification,
            extension: options.extension_cm,
            placement: Transform2::placement(lens.position, Side::of_object_distance(u)),
        })
    }

    /// Canonical source point at height `y`.
    pub fn source(&self, y: f64) -> Point2 {
        [-self.d, y]
    }

    /// Canonical image of a source point at height `y`.
    pub fn image_of(&self, y: f64) -> Point2 {
        [self.image_x, self.magnification * y]
    }

    /// Map canonical segments onto the bench.
    pub fn place(&self, segments: Vec<Segment>) -> Vec<Segment> {
        segments
            .into_iter()
            .map(|s| Segment {
                from: self.placement.apply(&s.from),
                to: self.placement.apply(&s.to),
                ..s
            })
            .collect()
    }
}

/// Segments for one rule, traced from the object apex.
///
/// Empty when no image forms.
pub fn generate_ray_path(state: &OpticalState, result: &OpticsResult, rule: RayRule) -> Vec<Segment> {
    generate_ray_path_with(state, result, rule, &RayOptions::default())
}

/// [`generate_ray_path`] with explicit options.
pub fn generate_ray_path_with(
    state: &OpticalState,
    result: &OpticsResult,
    rule: RayRule,
    options: &RayOptions,
) -> Vec<Segment> {
    match Construction::new(state, result, options) {
        Some(c) => c.place(principal::trace(&c, rule, state.object().height)),
        None => Vec::new(),
    }
}
