//! The Gaussian thin-lens equation, $1/f = 1/u + 1/v$.
//!
//! Object distance `u` is positive when the object is on the left of the
//! lens (light travelling left to right) and negative when it has been moved
//! to the right. The negative branches reproduce the conventional-side
//! construction with the roles of the two sides exchanged.

use crate::types::{round_tenth, LensKind, OpticalValue, DEGENERATE_TOLERANCE};

/// Solve for the signed image distance (cm), rounded to 0.1 cm.
///
/// Returns [`OpticalValue::Infinity`] when the object sits on the lens, or on
/// the focal plane of a convex lens.
///
/// # Arguments
/// * `u` - Signed object distance (cm).
/// * `f` - Focal length (cm). Only its magnitude is used; the sign follows `kind`.
/// * `kind` - Lens type.
pub fn solve_image_distance(u: f64, f: f64, kind: LensKind) -> OpticalValue {
    if u.abs() < DEGENERATE_TOLERANCE {
        return OpticalValue::Infinity;
    }
    if kind == LensKind::Convex && (u.abs() - f.abs()).abs() < DEGENERATE_TOLERANCE {
        return OpticalValue::Infinity;
    }

    let fe = kind.focal_sign() * f.abs();
    let v = match (kind, u < 0.0) {
        (LensKind::Concave, true) => fe * u.abs() / (u.abs() - fe),
        (LensKind::Convex, true) => -(fe * u.abs()) / (u.abs() - fe),
        (_, false) => u * fe / (u - fe),
    };

    OpticalValue::Finite(round_tenth(v))
}

/// Lateral magnification for a solved image distance.
///
/// A concave lens never inverts, so its magnification is reported as the
/// non-negative `|v / u|`; otherwise $m = -v/u$.
pub fn solve_magnification(u: f64, v: OpticalValue, kind: LensKind) -> OpticalValue {
    let v = match v {
        OpticalValue::Finite(v) if u.abs() >= DEGENERATE_TOLERANCE => v,
        _ => return OpticalValue::Infinity,
    };

    match kind {
        LensKind::Concave => OpticalValue::Finite((v / u).abs()),
        LensKind::Convex => OpticalValue::Finite(-v / u),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finite(v: OpticalValue) -> f64 {
        v.finite().expect("expected a finite value")
    }

    #[test]
    fn test_object_on_lens_diverges() {
        assert!(solve_image_distance(0.0, 7.5, LensKind::Convex).is_infinite());
        assert!(solve_image_distance(0.0, -7.5, LensKind::Concave).is_infinite());
    }

    #[test]
    fn test_focal_plane_diverges_only_for_convex() {
        assert!(solve_image_distance(7.5, 7.5, LensKind::Convex).is_infinite());
        assert!(solve_image_distance(-7.5, 7.5, LensKind::Convex).is_infinite());
        let v = finite(solve_image_distance(7.5, -7.5, LensKind::Concave));
        assert!((v + 3.8).abs() < 1e-12, "v = {}", v);
    }

    #[test]
    fn test_focal_sign_follows_kind() {
        // A positive focal length passed with a concave lens is still diverging.
        let a = solve_image_distance(10.0, 7.5, LensKind::Concave);
        let b = solve_image_distance(10.0, -7.5, LensKind::Concave);
        assert_eq!(a, b);
    }

    #[test]
    fn test_convex_reversed_side_mirrors() {
        let left = finite(solve_image_distance(30.0, 7.5, LensKind::Convex));
        let right = finite(solve_image_distance(-30.0, 7.5, LensKind::Convex));
        assert!((left - 10.0).abs() < 1e-12);
        assert!((right + 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_magnification_sign_conventions() {
        let m = finite(solve_magnification(30.0, OpticalValue::Finite(10.0), LensKind::Convex));
        assert!((m + 1.0 / 3.0).abs() < 1e-12);
        let m = finite(solve_magnification(10.0, OpticalValue::Finite(-4.3), LensKind::Concave));
        assert!((m - 0.43).abs() < 1e-12);
        assert!(solve_magnification(7.5, OpticalValue::Infinity, LensKind::Convex).is_infinite());
        assert!(solve_magnification(0.0, OpticalValue::Finite(1.0), LensKind::Convex).is_infinite());
    }
}
