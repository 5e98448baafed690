//! Core types shared across the Lensbench engine.
//!
//! This module defines the data structures that flow through the pipeline:
//! the lens and object descriptions, solver results, image classification,
//! and the ray segments handed to a renderer. All lengths are centimetres,
//! measured along the optical axis (x) and perpendicular to it (y, up).

use serde::{Deserialize, Serialize};

/// A point in the optical plane: `[x, y]` in centimetres.
pub type Point2 = [f64; 2];

/// Tolerance for treating an object as sitting on the lens or on the focal
/// plane. Positions are derived by subtraction, so exact equality would miss
/// configurations the user set up exactly.
pub const DEGENERATE_TOLERANCE: f64 = 1e-9;

/// Relative tolerance under which |m| counts as unit magnification.
pub const SAME_SIZE_TOLERANCE: f64 = 0.01;

/// Round to the nearest 0.1 cm, half away from zero.
///
/// Rounding symmetrically keeps |v(u)| == |v(-u)| at ties.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Lens type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LensKind {
    /// Converging lens, positive focal length.
    Convex,
    /// Diverging lens, negative focal length.
    Concave,
}

impl LensKind {
    /// Sign carried by the focal length of this kind of lens.
    pub fn focal_sign(self) -> f64 {
        match self {
            LensKind::Convex => 1.0,
            LensKind::Concave => -1.0,
        }
    }
}

impl std::fmt::Display for LensKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LensKind::Convex => write!(f, "convex"),
            LensKind::Concave => write!(f, "concave"),
        }
    }
}

/// How the object is drawn. Has no effect on the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    #[default]
    Arrow,
    Figure,
}

/// A thin lens on the optical axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LensSpec {
    pub kind: LensKind,
    /// Signed focal length (cm). Positive iff `kind` is convex.
    pub focal_length: f64,
    /// Axial position of the optical centre (cm).
    pub position: f64,
}

impl LensSpec {
    /// Focal length magnitude (cm).
    pub fn focal_magnitude(&self) -> f64 {
        self.focal_length.abs()
    }

    /// Axial positions of the focal points and 2F points.
    pub fn focal_points(&self) -> FocalPoints {
        let f = self.focal_magnitude();
        FocalPoints {
            left: self.position - f,
            right: self.position + f,
            left_2f: self.position - 2.0 * f,
            right_2f: self.position + 2.0 * f,
        }
    }
}

impl Default for LensSpec {
    fn default() -> Self {
        Self {
            kind: LensKind::Convex,
            focal_length: 7.5,
            position: 8.0,
        }
    }
}

/// Axial positions (cm) of the reference points either side of a lens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocalPoints {
    pub left: f64,
    pub right: f64,
    pub left_2f: f64,
    pub right_2f: f64,
}

/// The object standing on the optical axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    /// Axial position of the object (cm). The apex sits at `(position, height)`.
    pub position: f64,
    /// Height above the axis (cm).
    pub height: f64,
    pub kind: ObjectKind,
}

impl ObjectSpec {
    /// The object's apex point.
    pub fn apex(&self) -> Point2 {
        [self.position, self.height]
    }
}

impl Default for ObjectSpec {
    fn default() -> Self {
        Self {
            position: -22.0,
            height: 9.0,
            kind: ObjectKind::Arrow,
        }
    }
}

/// A solver quantity that may diverge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpticalValue {
    Finite(f64),
    Infinity,
}

impl OpticalValue {
    /// The finite value, if any.
    pub fn finite(self) -> Option<f64> {
        match self {
            OpticalValue::Finite(v) => Some(v),
            OpticalValue::Infinity => None,
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, OpticalValue::Infinity)
    }

    /// Absolute value, preserving divergence.
    pub fn abs(self) -> Self {
        match self {
            OpticalValue::Finite(v) => OpticalValue::Finite(v.abs()),
            OpticalValue::Infinity => OpticalValue::Infinity,
        }
    }
}

/// Result of one thin-lens solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticsResult {
    /// Signed image distance (cm), rounded to 0.1 cm.
    pub image_distance: OpticalValue,
    /// Signed lateral magnification.
    pub magnification: OpticalValue,
}

impl OpticsResult {
    /// Whether an image forms at a finite distance.
    pub fn has_image(&self) -> bool {
        !self.image_distance.is_infinite() && !self.magnification.is_infinite()
    }
}

/// Size of the image relative to the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeRelation {
    Magnified,
    Same,
    Diminished,
}

/// Nature of a finite image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageNature {
    pub is_real: bool,
    pub is_erect: bool,
    pub size: SizeRelation,
}

/// Outcome of classifying a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Classification {
    /// A finite image forms.
    Image(ImageNature),
    /// The object sits on the lens or on the focal plane: emergent rays are
    /// parallel and no image forms.
    NoImage,
}

/// How a segment is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Direction of light along a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Travel {
    /// Light propagates from `from` to `to`.
    Forward,
    /// Construction line traced back against the light, e.g. toward a
    /// virtual image. Renderers draw no arrowhead on it.
    Backward,
}

/// One straight piece of a ray construction, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point2,
    pub to: Point2,
    pub style: LineStyle,
    pub travel: Travel,
}

impl Segment {
    /// A solid segment carrying light forward.
    pub fn solid(from: Point2, to: Point2) -> Self {
        Self { from, to, style: LineStyle::Solid, travel: Travel::Forward }
    }

    /// A dashed back-projection.
    pub fn dashed_back(from: Point2, to: Point2) -> Self {
        Self { from, to, style: LineStyle::Dashed, travel: Travel::Backward }
    }

    /// A dashed continuation of a ray the lens deflected.
    pub fn dashed_forward(from: Point2, to: Point2) -> Self {
        Self { from, to, style: LineStyle::Dashed, travel: Travel::Forward }
    }
}

/// The three principal-ray construction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RayRule {
    /// Incident parallel to the axis, emerges through the far focal point.
    ParallelThenFocus,
    /// Passes undeviated through the optical centre.
    ThroughCentre,
    /// Incident through the near focal point, emerges parallel to the axis.
    FocusThenParallel,
}

impl RayRule {
    pub const ALL: [RayRule; 3] = [
        RayRule::ParallelThenFocus,
        RayRule::ThroughCentre,
        RayRule::FocusThenParallel,
    ];
}

impl std::fmt::Display for RayRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RayRule::ParallelThenFocus => write!(f, "parallel_then_focus"),
            RayRule::ThroughCentre => write!(f, "through_centre"),
            RayRule::FocusThenParallel => write!(f, "focus_then_parallel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_tenth_is_symmetric() {
        assert_eq!(round_tenth(4.2857), 4.3);
        assert_eq!(round_tenth(-4.2857), -4.3);
        assert_eq!(round_tenth(12.25), -round_tenth(-12.25));
    }

    #[test]
    fn test_focal_points_straddle_lens() {
        let lens = LensSpec { kind: LensKind::Concave, focal_length: -5.0, position: 2.0 };
        let fp = lens.focal_points();
        assert!((fp.left + 3.0).abs() < 1e-12);
        assert!((fp.right - 7.0).abs() < 1e-12);
        assert!((fp.left_2f + 8.0).abs() < 1e-12);
        assert!((fp.right_2f - 12.0).abs() < 1e-12);
    }
}
