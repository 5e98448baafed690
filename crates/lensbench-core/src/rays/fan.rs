//! Light bundles: the principal constructions repeated over many rays.
//!
//! Two bundle shapes are supported:
//!
//! - a **height fan**, tracing one principal rule from evenly spaced points
//!   between the foot of the object and its apex;
//! - a **cone**, a spread of rays leaving the apex at evenly spaced angles
//!   about the horizontal, each refracted toward (or away from) the image of
//!   the apex.

use serde::{Deserialize, Serialize};

use super::{principal, Construction, RayOptions, Strategy};
use crate::state::OpticalState;
use crate::types::{OpticsResult, Point2, RayRule, Segment, DEGENERATE_TOLERANCE};

/// Shape of a cone bundle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConeSpec {
    /// Number of rays.
    pub rays: usize,
    /// Full angular spread (degrees).
    pub spread_deg: f64,
}

impl Default for ConeSpec {
    fn default() -> Self {
        Self { rays: 12, spread_deg: 12.0 }
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
///
/// A single sample sits at `end`.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![end],
        n => (0..n)
            .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Trace `rule` from `count` heights spanning the object, concatenated
/// foot-first.
pub fn generate_ray_fan(
    state: &OpticalState,
    result: &OpticsResult,
    rule: RayRule,
    count: usize,
) -> Vec<Segment> {
    generate_ray_fan_with(state, result, rule, count, &RayOptions::default())
}

/// [`generate_ray_fan`] with explicit options.
pub fn generate_ray_fan_with(
    state: &OpticalState,
    result: &OpticsResult,
    rule: RayRule,
    count: usize,
    options: &RayOptions,
) -> Vec<Segment> {
    let Some(c) = Construction::new(state, result, options) else {
        return Vec::new();
    };
    let segments = linspace(0.0, state.object().height, count)
        .into_iter()
        .flat_map(|y| principal::trace(&c, rule, y))
        .collect();
    c.place(segments)
}

/// Trace a cone of rays from the object apex.
pub fn generate_cone_fan(
    state: &OpticalState,
    result: &OpticsResult,
    cone: &ConeSpec,
    options: &RayOptions,
) -> Vec<Segment> {
    let Some(c) = Construction::new(state, result, options) else {
        return Vec::new();
    };
    let half = cone.spread_deg.to_radians() / 2.0;
    let apex_y = state.object().height;
    let segments = linspace(-half, half, cone.rays)
        .into_iter()
        .flat_map(|angle| cone_ray(&c, apex_y, angle))
        .collect();
    c.place(segments)
}

/// One cone ray. Every ray from a source point that crosses a thin lens
/// passes through (or, for virtual images, diverges from) the source's image.
fn cone_ray(c: &Construction, y: f64, angle: f64) -> Vec<Segment> {
    let source = c.source(y);
    let at_lens = [0.0, y + c.d * angle.tan()];
    let image = c.image_of(y);

    let mut path = vec![Segment::solid(source, at_lens)];
    match c.strategy {
        Strategy::ConvexReal => path.push(Segment::solid(at_lens, image)),
        Strategy::ConvexVirtual | Strategy::Concave => {
            let slope = emergent_slope(c, angle.tan(), at_lens, image);
            let beyond = [c.extension, at_lens[1] + slope * c.extension];
            path.push(Segment::solid(at_lens, beyond));
            path.push(Segment::dashed_back(at_lens, image));
        }
    }
    path
}

/// Slope of a virtual-image ray after the lens.
///
/// The ray diverges from the image point. When the rounded image distance
/// puts that point on the lens plane, the slope comes from thin-lens
/// refraction of the incident slope instead.
fn emergent_slope(c: &Construction, incident_slope: f64, at_lens: Point2, image: Point2) -> f64 {
    let run = at_lens[0] - image[0];
    if run.abs() > DEGENERATE_TOLERANCE {
        return (at_lens[1] - image[1]) / run;
    }
    let focal_length = match c.strategy {
        Strategy::Concave => -c.f,
        Strategy::ConvexReal | Strategy::ConvexVirtual => c.f,
    };
    incident_slope - at_lens[1] / focal_length
}
