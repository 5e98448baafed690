//! TOML scene description.

use serde::Deserialize;

use lensbench_core::rays::{ConeSpec, RayOptions};
use lensbench_core::state::{self, InputIssue, OpticalState};
use lensbench_core::types::{round_tenth, LensKind, ObjectKind, RayRule};

/// Top-level scene configuration.
#[derive(Debug, Default, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub lens: LensConfig,
    #[serde(default)]
    pub object: ObjectConfig,
    #[serde(default)]
    pub rays: RaysConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Lens parameters.
#[derive(Debug, Deserialize)]
pub struct LensConfig {
    #[serde(default = "default_kind")]
    pub kind: LensKind,
    /// Signed focal length (cm). A sign that contradicts `kind` is corrected
    /// with a warning.
    #[serde(default = "default_focal_length")]
    pub focal_length: f64,
    #[serde(default = "default_lens_position")]
    pub position: f64,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            focal_length: default_focal_length(),
            position: default_lens_position(),
        }
    }
}

fn default_kind() -> LensKind {
    LensKind::Convex
}
fn default_focal_length() -> f64 {
    7.5
}
fn default_lens_position() -> f64 {
    8.0
}

/// Object parameters. `distance` takes precedence over `position`.
#[derive(Debug, Deserialize)]
pub struct ObjectConfig {
    /// Signed object distance `u` (cm).
    pub distance: Option<f64>,
    /// Absolute axial position (cm).
    pub position: Option<f64>,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub kind: ObjectKind,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            distance: None,
            position: None,
            height: default_height(),
            kind: ObjectKind::default(),
        }
    }
}

fn default_height() -> f64 {
    9.0
}

/// Which constructions to emit.
#[derive(Debug, Deserialize)]
pub struct RaysConfig {
    #[serde(default = "default_rules")]
    pub rules: Vec<RayRule>,
    /// Rays per height fan; 0 disables fans.
    #[serde(default)]
    pub fan_count: usize,
    /// Rays in the apex cone; 0 disables the cone.
    #[serde(default)]
    pub cone_rays: usize,
    #[serde(default = "default_cone_spread")]
    pub cone_spread_deg: f64,
    #[serde(default = "default_extension")]
    pub extension_cm: f64,
}

impl Default for RaysConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            fan_count: 0,
            cone_rays: 0,
            cone_spread_deg: default_cone_spread(),
            extension_cm: default_extension(),
        }
    }
}

impl RaysConfig {
    pub fn options(&self) -> RayOptions {
        RayOptions { extension_cm: self.extension_cm }
    }

    pub fn cone(&self) -> Option<ConeSpec> {
        (self.cone_rays > 0).then_some(ConeSpec {
            rays: self.cone_rays,
            spread_deg: self.cone_spread_deg,
        })
    }
}

fn default_rules() -> Vec<RayRule> {
    RayRule::ALL.to_vec()
}
fn default_cone_spread() -> f64 {
    ConeSpec::default().spread_deg
}
fn default_extension() -> f64 {
    RayOptions::default().extension_cm
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save ray segments as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_segments: bool,
    /// Whether to also save the full scene as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_segments: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

impl SceneConfig {
    /// Build the bench through the validated setters, in the order a user
    /// would: lens kind, focal length, lens position, then the object.
    pub fn build_state(&self) -> OpticalState {
        let mut bench = OpticalState::default();
        bench.set_lens_kind(self.lens.kind);
        bench.set_focal_length(self.lens.focal_length);
        bench.set_lens_position(self.lens.position);
        match (self.object.distance, self.object.position) {
            (Some(distance), _) => {
                bench.set_object_distance(distance);
            }
            (None, Some(position)) => {
                bench.set_object_position(position);
            }
            (None, None) => {}
        }
        bench.set_object_height(self.object.height);
        bench.set_object_kind(self.object.kind);
        bench
    }

    /// Every input the setters would have to correct.
    pub fn issues(&self) -> Vec<InputIssue> {
        let mut issues = state::focal_length_issues(self.lens.focal_length, self.lens.kind);
        issues.extend(
            [
                state::check_lens_position(self.lens.position),
                state::check_object_height(self.object.height),
            ]
            .into_iter()
            .filter_map(Result::err),
        );

        let distance = self
            .object
            .distance
            .or_else(|| self.object.position.map(|p| self.resolved_lens_position() - p));
        if let Some(Err(issue)) = distance.map(state::check_object_distance) {
            issues.push(issue);
        }
        issues
    }

    /// The lens position [`SceneConfig::build_state`] ends up with.
    fn resolved_lens_position(&self) -> f64 {
        let position = match state::check_lens_position(self.lens.position) {
            Ok(position) => position,
            Err(InputIssue::OutOfRange { value, min, max, .. }) => value.clamp(min, max),
            Err(_) => default_lens_position(),
        };
        round_tenth(position)
    }
}

/// Load and parse a TOML scene file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<SceneConfig> {
    use anyhow::Context;

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read scene file '{}'", path.display()))?;
    let config: SceneConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid scene file '{}'", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scene_is_default_bench() {
        let config: SceneConfig = toml::from_str("").unwrap();
        assert_eq!(config.build_state(), OpticalState::default());
        assert_eq!(config.rays.rules.len(), 3);
        assert!(config.issues().is_empty());
    }

    #[test]
    fn test_scene_parses_and_reports_issues() {
        let config: SceneConfig = toml::from_str(
            r#"
            [lens]
            kind = "concave"
            focal_length = 20.0
            position = 0.0

            [object]
            position = 12.0
            height = 3.0

            [rays]
            rules = ["through_centre"]
            cone_rays = 5
            "#,
        )
        .unwrap();

        let bench = config.build_state();
        assert_eq!(bench.lens().focal_length, -15.0);
        assert_eq!(bench.object_distance(), -12.0);
        assert_eq!(config.rays.rules, vec![RayRule::ThroughCentre]);
        assert_eq!(config.rays.cone().unwrap().rays, 5);

        let issues = config.issues();
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], InputIssue::OutOfRange { field: "focal_length", .. }));
        assert!(matches!(issues[1], InputIssue::SignMismatch { kind: LensKind::Concave, .. }));
    }

    #[test]
    fn test_object_position_measured_from_clamped_lens() {
        let config: SceneConfig = toml::from_str(
            r#"
            [lens]
            position = 40.0

            [object]
            position = 0.0
            "#,
        )
        .unwrap();
        let issues = config.issues();
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], InputIssue::OutOfRange { field: "lens_position", .. }));

        let bench = config.build_state();
        assert_eq!(bench.lens().position, 15.0);
        assert_eq!(bench.object_distance(), 15.0);
    }

    #[test]
    fn test_issues_cover_sign_and_distance() {
        let config: SceneConfig = toml::from_str(
            r#"
            [lens]
            focal_length = -7.5
            position = 10.0

            [object]
            position = -25.0
            "#,
        )
        .unwrap();
        let issues = config.issues();
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], InputIssue::SignMismatch { .. }));
        assert!(matches!(issues[1], InputIssue::OutOfRange { field: "object_distance", .. }));

        let bench = config.build_state();
        assert_eq!(bench.lens().focal_length, 7.5);
        assert_eq!(bench.object_distance(), 30.0);
    }
}
