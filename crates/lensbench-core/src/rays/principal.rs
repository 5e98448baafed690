//! The three principal rays, in the canonical frame.
//!
//! Each rule walks the same states: an incident segment to the lens plane,
//! then either an emergent segment that reaches a real image, or an
//! open-ended emergent segment plus dashed back-projections that locate a
//! virtual image. Each `{rule, strategy}` pair is its own function.

use super::{Construction, Strategy};
use crate::types::{Point2, RayRule, Segment};

/// Trace `rule` from a source at height `y` on the object plane.
pub fn trace(c: &Construction, rule: RayRule, y: f64) -> Vec<Segment> {
    match rule {
        RayRule::ParallelThenFocus => parallel_then_focus(c, y),
        RayRule::ThroughCentre => through_centre(c, y),
        RayRule::FocusThenParallel => focus_then_parallel(c, y),
    }
}

/// Point on the line through `a` and `b` at axial position `x`.
fn along(a: Point2, b: Point2, x: f64) -> Point2 {
    let slope = (b[1] - a[1]) / (b[0] - a[0]);
    [x, a[1] + slope * (x - a[0])]
}

// ─────────────────────────────────────────────────────────────
// Parallel ray -> through focus
// ─────────────────────────────────────────────────────────────

fn parallel_then_focus(c: &Construction, y: f64) -> Vec<Segment> {
    let at_lens = [0.0, y];
    let mut path = vec![Segment::solid(c.source(y), at_lens)];
    path.extend(match c.strategy {
        Strategy::ConvexReal => parallel_convex_real(c, at_lens, y),
        Strategy::ConvexVirtual => parallel_convex_virtual(c, at_lens, y),
        Strategy::Concave => parallel_concave(c, at_lens, y),
    });
    path
}

fn parallel_convex_real(c: &Construction, at_lens: Point2, y: f64) -> Vec<Segment> {
    let focus = [c.f, 0.0];
    let image = c.image_of(y);
    let mut path = vec![Segment::solid(at_lens, focus)];
    if image[0] > focus[0] {
        path.push(Segment::solid(focus, image));
    }
    path
}

fn parallel_convex_virtual(c: &Construction, at_lens: Point2, y: f64) -> Vec<Segment> {
    let focus = [c.f, 0.0];
    let beyond = along(at_lens, focus, c.f + c.extension);
    vec![
        Segment::solid(at_lens, focus),
        Segment::solid(focus, beyond),
        Segment::dashed_back(at_lens, c.image_of(y)),
    ]
}

fn parallel_concave(c: &Construction, at_lens: Point2, y: f64) -> Vec<Segment> {
    // Diverges as if it came from the focal point on the incident side.
    let virtual_focus = [-c.f, 0.0];
    let beyond = along(virtual_focus, at_lens, c.extension);
    vec![
        Segment::solid(at_lens, beyond),
        Segment::dashed_back(at_lens, virtual_focus),
        Segment::dashed_back(at_lens, c.image_of(y)),
    ]
}

// ─────────────────────────────────────────────────────────────
// Ray through the optical centre
// ─────────────────────────────────────────────────────────────

fn through_centre(c: &Construction, y: f64) -> Vec<Segment> {
    let source = c.source(y);
    let centre = [0.0, 0.0];
    let mut path = vec![Segment::solid(source, centre)];
    match c.strategy {
        Strategy::ConvexReal => path.push(Segment::solid(centre, c.image_of(y))),
        Strategy::ConvexVirtual | Strategy::Concave => {
            path.push(Segment::solid(centre, along(source, centre, c.extension)));
            path.push(Segment::dashed_back(centre, c.image_of(y)));
        }
    }
    path
}

// ─────────────────────────────────────────────────────────────
// Ray through focus -> parallel
// ─────────────────────────────────────────────────────────────

fn focus_then_parallel(c: &Construction, y: f64) -> Vec<Segment> {
    match c.strategy {
        Strategy::ConvexReal => focus_convex_real(c, y),
        Strategy::ConvexVirtual => focus_convex_virtual(c, y),
        Strategy::Concave => focus_concave(c, y),
    }
}

/// Lens-plane crossing of the line from the source through `focus`, by
/// similar triangles.
fn lens_crossing(c: &Construction, y: f64, focus: Point2) -> Point2 {
    along(c.source(y), focus, 0.0)
}

fn focus_convex_real(c: &Construction, y: f64) -> Vec<Segment> {
    let at_lens = lens_crossing(c, y, [-c.f, 0.0]);
    vec![
        Segment::solid(c.source(y), at_lens),
        Segment::solid(at_lens, [c.image_x, at_lens[1]]),
    ]
}

fn focus_convex_virtual(c: &Construction, y: f64) -> Vec<Segment> {
    // The source lies between the near focal point and the lens, so the
    // incident ray only points away from the focus.
    let near_focus = [-c.f, 0.0];
    let at_lens = lens_crossing(c, y, near_focus);
    vec![
        Segment::solid(c.source(y), at_lens),
        Segment::solid(at_lens, [c.extension, at_lens[1]]),
        Segment::dashed_back(at_lens, near_focus),
        Segment::dashed_back(at_lens, c.image_of(y)),
    ]
}

fn focus_concave(c: &Construction, y: f64) -> Vec<Segment> {
    // Aimed at the focal point beyond the lens; the lens bends it parallel
    // before it gets there.
    let far_focus = [c.f, 0.0];
    let at_lens = lens_crossing(c, y, far_focus);
    vec![
        Segment::solid(c.source(y), at_lens),
        Segment::solid(at_lens, [c.extension, at_lens[1]]),
        Segment::dashed_forward(at_lens, far_focus),
        Segment::dashed_back(at_lens, c.image_of(y)),
    ]
}
