//! The mutable optical bench: one lens and one object on a shared axis.
//!
//! [`OpticalState`] is the only mutable value in the engine. Its setters
//! validate and clamp their argument, then restore the coupling
//! `object_distance == lens.position - object.position` before returning, so
//! a recompute never observes a half-updated bench.
//!
//! Bad input is never fatal. Each setter recovers from an [`InputIssue`]
//! (keeping the previous value, clamping, or correcting a sign) and logs it.
//! The `check_*` functions expose the same validation without mutating
//! anything, for front ends that want to report issues up front.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{round_tenth, LensKind, LensSpec, ObjectKind, ObjectSpec};

/// Allowed object distance (cm).
pub const OBJECT_DISTANCE_RANGE: (f64, f64) = (-30.0, 30.0);
/// Allowed focal length magnitude (cm).
pub const FOCAL_LENGTH_RANGE: (f64, f64) = (3.0, 15.0);
/// Allowed lens position (cm).
pub const LENS_POSITION_RANGE: (f64, f64) = (-15.0, 15.0);
/// Allowed object height (cm).
pub const OBJECT_HEIGHT_RANGE: (f64, f64) = (0.1, 9.0);

/// A recoverable problem with a setter argument.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputIssue {
    #[error("{field}: value {value} is not a finite number; keeping previous value")]
    InvalidInput { field: &'static str, value: f64 },

    #[error("{field}: {value} is outside [{min}, {max}]; clamped")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("focal length {focal_length} has the wrong sign for a {kind} lens; sign corrected")]
    SignMismatch { kind: LensKind, focal_length: f64 },
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<f64, InputIssue> {
    if !value.is_finite() {
        return Err(InputIssue::InvalidInput { field, value });
    }
    if value < min || value > max {
        return Err(InputIssue::OutOfRange { field, value, min, max });
    }
    Ok(value)
}

/// Validate a lens position.
pub fn check_lens_position(value: f64) -> Result<f64, InputIssue> {
    check_range("lens_position", value, LENS_POSITION_RANGE)
}

/// Validate an object distance.
pub fn check_object_distance(value: f64) -> Result<f64, InputIssue> {
    check_range("object_distance", value, OBJECT_DISTANCE_RANGE)
}

/// Validate an object height.
pub fn check_object_height(value: f64) -> Result<f64, InputIssue> {
    check_range("object_height", value, OBJECT_HEIGHT_RANGE)
}

/// Every problem with a signed focal length for `kind`, range first.
///
/// A non-finite value is reported alone. Otherwise the magnitude must lie in
/// [`FOCAL_LENGTH_RANGE`] and the sign must agree with `kind`; both problems
/// are reported when both apply.
pub fn focal_length_issues(value: f64, kind: LensKind) -> Vec<InputIssue> {
    if !value.is_finite() {
        return vec![InputIssue::InvalidInput { field: "focal_length", value }];
    }
    let (min, max) = FOCAL_LENGTH_RANGE;
    let magnitude = value.abs();
    let mut issues = Vec::new();
    if magnitude < min || magnitude > max {
        issues.push(InputIssue::OutOfRange { field: "focal_length", value: magnitude, min, max });
    }
    if value * kind.focal_sign() < 0.0 {
        issues.push(InputIssue::SignMismatch { kind, focal_length: value });
    }
    issues
}

/// Validate a signed focal length against the lens kind.
///
/// Returns the first of [`focal_length_issues`].
pub fn check_focal_length(value: f64, kind: LensKind) -> Result<f64, InputIssue> {
    match focal_length_issues(value, kind).into_iter().next() {
        Some(issue) => Err(issue),
        None => Ok(value),
    }
}

/// Resolve a validation outcome the way setters do: keep `previous` for
/// non-finite input, clamp out-of-range input, log the issue.
fn recover(outcome: Result<f64, InputIssue>, previous: f64) -> f64 {
    match outcome {
        Ok(value) => value,
        Err(issue) => {
            log::warn!("{}", issue);
            match issue {
                InputIssue::InvalidInput { .. } => previous,
                InputIssue::OutOfRange { value, min, max, .. } => value.clamp(min, max),
                InputIssue::SignMismatch { focal_length, kind } => {
                    focal_length.abs() * kind.focal_sign()
                }
            }
        }
    }
}

/// Named starting configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Object beyond 2F: real, inverted, diminished image.
    Standard,
    /// Object between F and 2F: real, inverted, magnified image.
    Magnified,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Standard, Preset::Magnified];

    /// `(lens_position, object_distance, focal_length)` in cm.
    pub fn parameters(self) -> (f64, f64, f64) {
        match self {
            Preset::Standard => (8.0, 30.0, 7.5),
            Preset::Magnified => (-12.0, 10.0, 7.5),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Standard => "standard",
            Preset::Magnified => "magnified",
        }
    }
}

/// The authoritative lens-and-object configuration.
///
/// Deserialised states are replayed through the setters, so stored data is
/// validated and coupled like any other input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredState")]
pub struct OpticalState {
    lens: LensSpec,
    object: ObjectSpec,
    object_distance: f64,
}

/// Serialised shape of [`OpticalState`], before validation.
#[derive(Deserialize)]
struct StoredState {
    lens: LensSpec,
    object: ObjectSpec,
    object_distance: f64,
}

impl From<StoredState> for OpticalState {
    /// `object_distance` wins over `object.position` when the two disagree.
    fn from(stored: StoredState) -> Self {
        let mut state = OpticalState::default();
        state.set_lens_kind(stored.lens.kind);
        state.set_focal_length(stored.lens.focal_length);
        state.set_lens_position(stored.lens.position);
        state.set_object_distance(stored.object_distance);
        state.set_object_height(stored.object.height);
        state.set_object_kind(stored.object.kind);
        state
    }
}

impl Default for OpticalState {
    fn default() -> Self {
        let lens = LensSpec::default();
        let object = ObjectSpec::default();
        let object_distance = lens.position - object.position;
        Self { lens, object, object_distance }
    }
}

impl OpticalState {
    pub fn lens(&self) -> &LensSpec {
        &self.lens
    }

    pub fn object(&self) -> &ObjectSpec {
        &self.object
    }

    /// Signed object distance `u = lens.position - object.position` (cm).
    pub fn object_distance(&self) -> f64 {
        self.object_distance
    }

    /// Move the lens, keeping the object where it is unless that would push
    /// `u` out of range, in which case the object follows the lens.
    pub fn set_lens_position(&mut self, position: f64) -> &Self {
        let position = recover(check_lens_position(position), self.lens.position);
        self.lens.position = round_tenth(position);
        self.couple_from_object_position(self.object.position);
        self
    }

    /// Move the object, clamping so that `u` stays in range.
    pub fn set_object_position(&mut self, position: f64) -> &Self {
        if !position.is_finite() {
            log::warn!(
                "{}",
                InputIssue::InvalidInput { field: "object_position", value: position }
            );
            return self;
        }
        self.couple_from_object_position(position);
        self
    }

    /// Set `u` directly; the object moves, the lens stays.
    pub fn set_object_distance(&mut self, distance: f64) -> &Self {
        let distance = recover(check_object_distance(distance), self.object_distance);
        self.object_distance = distance;
        self.object.position = self.lens.position - distance;
        self
    }

    /// Set the focal length. The magnitude is clamped; a sign that disagrees
    /// with the lens kind is corrected.
    pub fn set_focal_length(&mut self, focal_length: f64) -> &Self {
        let kind = self.lens.kind;
        let issues = focal_length_issues(focal_length, kind);
        for issue in &issues {
            log::warn!("{}", issue);
        }
        let magnitude = match issues.first() {
            Some(InputIssue::InvalidInput { .. }) => self.lens.focal_length.abs(),
            _ => {
                let (min, max) = FOCAL_LENGTH_RANGE;
                focal_length.abs().clamp(min, max)
            }
        };
        self.lens.focal_length = magnitude * kind.focal_sign();
        self
    }

    /// Change the lens kind, flipping the focal length sign to match.
    pub fn set_lens_kind(&mut self, kind: LensKind) -> &Self {
        self.lens.kind = kind;
        self.lens.focal_length = self.lens.focal_length.abs() * kind.focal_sign();
        self
    }

    pub fn set_object_height(&mut self, height: f64) -> &Self {
        self.object.height = recover(check_object_height(height), self.object.height);
        self
    }

    pub fn set_object_kind(&mut self, kind: ObjectKind) -> &Self {
        self.object.kind = kind;
        self
    }

    /// Apply a preset: lens position, then object distance, then focal
    /// length. Lens kind and object height are left alone.
    pub fn apply_preset(&mut self, preset: Preset) -> &Self {
        let (lens_position, object_distance, focal_length) = preset.parameters();
        self.set_lens_position(lens_position);
        self.set_object_distance(object_distance);
        self.set_focal_length(focal_length.abs() * self.lens.kind.focal_sign());
        self
    }

    /// Derive `u` from an object position, clamping by moving the object.
    fn couple_from_object_position(&mut self, position: f64) {
        let (min, max) = OBJECT_DISTANCE_RANGE;
        let u = self.lens.position - position;
        if u < min || u > max {
            log::warn!(
                "{}",
                InputIssue::OutOfRange { field: "object_distance", value: u, min, max }
            );
            self.object_distance = u.clamp(min, max);
            self.object.position = self.lens.position - self.object_distance;
        } else {
            self.object_distance = u;
            self.object.position = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coupled(state: &OpticalState) -> bool {
        (state.lens().position - state.object().position - state.object_distance()).abs() < 1e-9
    }

    #[test]
    fn test_default_matches_startup_bench() {
        let state = OpticalState::default();
        assert_eq!(state.object_distance(), 30.0);
        assert_eq!(state.lens().focal_length, 7.5);
        assert!(coupled(&state));
    }

    #[test]
    fn test_lens_move_keeps_object_in_place() {
        let mut state = OpticalState::default();
        state.set_lens_position(0.0);
        assert_eq!(state.object().position, -22.0);
        assert_eq!(state.object_distance(), 22.0);
        assert!(coupled(&state));
    }

    #[test]
    fn test_lens_move_drags_object_at_range_limit() {
        let mut state = OpticalState::default();
        state.set_lens_position(15.0);
        assert_eq!(state.object_distance(), 30.0);
        assert_eq!(state.object().position, -15.0);
        assert!(coupled(&state));
    }

    #[test]
    fn test_lens_position_is_clamped_and_rounded() {
        let mut state = OpticalState::default();
        state.set_lens_position(99.0);
        assert_eq!(state.lens().position, 15.0);
        state.set_lens_position(3.14159);
        assert!((state.lens().position - 3.1).abs() < 1e-12);
        assert!(coupled(&state));
    }

    #[test]
    fn test_non_finite_input_keeps_previous_value() {
        let mut state = OpticalState::default();
        state.set_object_distance(f64::NAN);
        state.set_object_height(f64::INFINITY);
        state.set_lens_position(f64::NAN);
        state.set_object_position(f64::NEG_INFINITY);
        assert_eq!(state, OpticalState::default());
    }

    #[test]
    fn test_focal_length_clamped_and_signed() {
        let mut state = OpticalState::default();
        state.set_focal_length(40.0);
        assert_eq!(state.lens().focal_length, 15.0);
        state.set_lens_kind(LensKind::Concave);
        assert_eq!(state.lens().focal_length, -15.0);
        state.set_focal_length(5.0);
        assert_eq!(state.lens().focal_length, -5.0);
        state.set_focal_length(-1.0);
        assert_eq!(state.lens().focal_length, -3.0);
    }

    #[test]
    fn test_check_focal_length_reports_sign_mismatch() {
        let issue = check_focal_length(-7.5, LensKind::Convex).unwrap_err();
        assert!(matches!(issue, InputIssue::SignMismatch { .. }));
        assert_eq!(check_focal_length(-7.5, LensKind::Concave), Ok(-7.5));
    }

    #[test]
    fn test_range_and_sign_reported_together() {
        let issues = focal_length_issues(-20.0, LensKind::Convex);
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], InputIssue::OutOfRange { value, .. } if value == 20.0));
        assert!(matches!(issues[1], InputIssue::SignMismatch { focal_length, .. } if focal_length == -20.0));
        assert!(matches!(
            check_focal_length(-20.0, LensKind::Convex),
            Err(InputIssue::OutOfRange { .. })
        ));
        assert_eq!(focal_length_issues(f64::NAN, LensKind::Concave).len(), 1);

        let mut state = OpticalState::default();
        state.set_focal_length(-20.0);
        assert_eq!(state.lens().focal_length, 15.0);
    }

    #[test]
    fn test_presets_apply_in_order() {
        let mut state = OpticalState::default();
        state.set_object_height(4.0);
        state.apply_preset(Preset::Magnified);
        assert_eq!(state.lens().position, -12.0);
        assert_eq!(state.object_distance(), 10.0);
        assert_eq!(state.object().position, -22.0);
        assert_eq!(state.object().height, 4.0);
        assert!(coupled(&state));
    }
}
