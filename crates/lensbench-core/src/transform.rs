//! Affine maps of the optical plane.
//!
//! Ray constructions are built in a canonical frame: lens centre at the
//! origin, object on the left, light travelling toward +x. A [`Transform2`]
//! then places the construction on the bench, mirroring it about the lens
//! plane when the object has been moved to the right.

use nalgebra::{Matrix2, Vector2};

use crate::types::Point2;

/// Which side of the lens the object is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// `u > 0`: object on the left, light travels toward +x.
    Left,
    /// `u < 0`: object on the right, light travels toward -x.
    Right,
}

impl Side {
    pub fn of_object_distance(u: f64) -> Self {
        if u < 0.0 {
            Side::Right
        } else {
            Side::Left
        }
    }
}

/// An affine transformation: linear part + translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform2 {
    /// 2x2 linear part (reflection/scale).
    pub matrix: Matrix2<f64>,
    /// Translation (cm).
    pub translation: Vector2<f64>,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self {
            matrix: Matrix2::identity(),
            translation: Vector2::zeros(),
        }
    }
}

impl Transform2 {
    /// Create a pure translation.
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            matrix: Matrix2::identity(),
            translation: Vector2::new(dx, dy),
        }
    }

    /// Reflect across the vertical line `x = 0`.
    pub fn mirror_x() -> Self {
        Self {
            matrix: Matrix2::from_diagonal(&Vector2::new(-1.0, 1.0)),
            translation: Vector2::zeros(),
        }
    }

    /// Map the canonical frame onto a lens at `lens_x` with the object on `side`.
    pub fn placement(lens_x: f64, side: Side) -> Self {
        let place = Transform2::translation(lens_x, 0.0);
        match side {
            Side::Left => place,
            Side::Right => Transform2::mirror_x().then(&place),
        }
    }

    /// Apply this transformation to a point.
    pub fn apply(&self, point: &Point2) -> Point2 {
        let p = self.matrix * Vector2::new(point[0], point[1]) + self.translation;
        [p.x, p.y]
    }

    /// Compose two transforms: self followed by other.
    pub fn then(&self, other: &Transform2) -> Transform2 {
        Transform2 {
            matrix: other.matrix * self.matrix,
            translation: other.matrix * self.translation + other.translation,
        }
    }
}
