//! Scene runner: builds the bench, solves it, and traces every requested ray.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use lensbench_core::curve::{current_marker, uv_curve};
use lensbench_core::rays::{generate_cone_fan, generate_ray_fan_with, generate_ray_path_with};
use lensbench_core::readout::Measurements;
use lensbench_core::state::OpticalState;
use lensbench_core::types::{
    Classification, FocalPoints, LineStyle, OpticsResult, RayRule, Segment, Travel,
};
use lensbench_core::{classify_image, compute_optics};

use crate::config::SceneConfig;

/// A labelled group of segments, e.g. one principal ray or one fan.
#[derive(Debug, Serialize)]
pub struct Trace {
    pub label: String,
    pub segments: Vec<Segment>,
}

/// Everything computed for one scene.
#[derive(Debug, Serialize)]
pub struct SceneOutput {
    pub state: OpticalState,
    pub optics: OpticsResult,
    pub classification: Classification,
    pub measurements: Measurements,
    pub focal_points: FocalPoints,
    pub curve_marker: Option<[f64; 2]>,
    pub traces: Vec<Trace>,
}

impl SceneOutput {
    pub fn segment_count(&self) -> usize {
        self.traces.iter().map(|t| t.segments.len()).sum()
    }
}

/// Solve a scene and trace the rays it asks for.
pub fn run_scene(scene: &SceneConfig) -> Result<SceneOutput> {
    let state = scene.build_state();
    let optics = compute_optics(&state);
    let classification = classify_image(&state, &optics);
    let measurements = Measurements::from_optics(&state, &optics);

    println!(
        "  Lens: {} f={:.1} cm at x={:.1} cm",
        state.lens().kind,
        state.lens().focal_length,
        state.lens().position
    );
    println!(
        "  Object: u={:.1} cm, height={:.1} cm",
        state.object_distance(),
        state.object().height
    );

    let options = scene.rays.options();
    if options.extension_cm.is_nan() || options.extension_cm <= 0.0 {
        anyhow::bail!(
            "rays.extension_cm must be positive, got {}",
            options.extension_cm
        );
    }

    let mut traces = Vec::new();
    for &rule in &scene.rays.rules {
        traces.push(Trace {
            label: rule.to_string(),
            segments: generate_ray_path_with(&state, &optics, rule, &options),
        });
        if scene.rays.fan_count > 0 {
            traces.push(Trace {
                label: format!("{}_fan", rule),
                segments: generate_ray_fan_with(
                    &state,
                    &optics,
                    rule,
                    scene.rays.fan_count,
                    &options,
                ),
            });
        }
    }
    if let Some(cone) = scene.rays.cone() {
        traces.push(Trace {
            label: "cone".into(),
            segments: generate_cone_fan(&state, &optics, &cone, &options),
        });
    }

    let output = SceneOutput {
        focal_points: state.lens().focal_points(),
        curve_marker: current_marker(&state, &optics),
        state,
        optics,
        classification,
        measurements,
        traces,
    };

    if !output.optics.has_image() {
        log::info!("No image forms; ray constructions are empty");
    }
    log::debug!(
        "{} traces, {} segments",
        output.traces.len(),
        output.segment_count()
    );
    Ok(output)
}

/// Print the measurement panel.
pub fn print_measurements(measurements: &Measurements) {
    for (label, value) in measurements.rows() {
        println!("  {:<16} {}", label, value);
    }
}

fn style_name(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Solid => "solid",
        LineStyle::Dashed => "dashed",
    }
}

fn travel_name(travel: Travel) -> &'static str {
    match travel {
        Travel::Forward => "forward",
        Travel::Backward => "backward",
    }
}

/// Write every traced segment to a CSV file with a metadata header.
pub fn write_segments_csv(output: &SceneOutput, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;

    let lens = output.state.lens();
    writeln!(file, "# Lensbench ray segments")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        file,
        "# lens: kind={}, focal_length={} cm, position={} cm",
        lens.kind, lens.focal_length, lens.position
    )?;
    writeln!(
        file,
        "# object: distance={} cm, height={} cm",
        output.state.object_distance(),
        output.state.object().height
    )?;
    writeln!(file, "# image: {}", output.classification.label())?;
    writeln!(file, "#")?;
    writeln!(file, "trace,index,x0_cm,y0_cm,x1_cm,y1_cm,style,travel")?;

    for trace in &output.traces {
        for (i, s) in trace.segments.iter().enumerate() {
            writeln!(
                file,
                "{},{},{:.4},{:.4},{:.4},{:.4},{},{}",
                trace.label,
                i,
                s.from[0],
                s.from[1],
                s.to[0],
                s.to[1],
                style_name(s.style),
                travel_name(s.travel),
            )?;
        }
    }

    println!("Segments written to: {}", path.display());
    Ok(())
}

/// Write the full scene (state, optics, readout, traces) to a JSON file.
pub fn write_scene_json(output: &SceneOutput, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(output)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Scene (JSON) written to: {}", path.display());
    Ok(())
}

/// Write the real-image v–u curve for a convex lens of focal length `f`.
pub fn write_curve_csv(focal_length: f64, path: &Path) -> Result<usize> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let points = uv_curve(focal_length);
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    writeln!(file, "# Lensbench v-u curve (convex, real images)")?;
    writeln!(file, "# focal_length: {} cm", focal_length.abs())?;
    writeln!(file, "#")?;
    writeln!(file, "u_cm,v_cm")?;
    for p in &points {
        writeln!(file, "{:.2},{:.4}", p[0], p[1])?;
    }

    println!("Curve written to: {}", path.display());
    Ok(points.len())
}

/// The rules a scene traces, for display.
pub fn rule_names(rules: &[RayRule]) -> String {
    rules
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(toml_text: &str) -> SceneConfig {
        toml::from_str(toml_text).unwrap()
    }

    #[test]
    fn test_default_scene_traces_three_rules() {
        let output = run_scene(&SceneConfig::default()).unwrap();
        assert_eq!(output.traces.len(), 3);
        assert_eq!(output.traces[0].label, "parallel_then_focus");
        assert!(output.traces.iter().all(|t| !t.segments.is_empty()));
        assert_eq!(output.curve_marker, Some([30.0, 10.0]));
    }

    #[test]
    fn test_fans_and_cone_are_added() {
        let output = run_scene(&scene(
            r#"
            [rays]
            rules = ["through_centre"]
            fan_count = 3
            cone_rays = 4
            "#,
        ))
        .unwrap();
        let labels: Vec<&str> = output.traces.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["through_centre", "through_centre_fan", "cone"]);
        assert_eq!(output.traces[1].segments.len(), 3 * output.traces[0].segments.len());
    }

    #[test]
    fn test_focal_plane_scene_has_empty_traces() {
        let output = run_scene(&scene(
            r#"
            [object]
            distance = 7.5
            "#,
        ))
        .unwrap();
        assert_eq!(output.classification, Classification::NoImage);
        assert_eq!(output.segment_count(), 0);
    }

    #[test]
    fn test_non_positive_extension_is_rejected() {
        let result = run_scene(&scene(
            r#"
            [rays]
            extension_cm = 0.0
            "#,
        ));
        assert!(result.is_err());
    }

    #[test]
    fn test_outputs_are_written() {
        let dir = std::env::temp_dir().join(format!("lensbench-runner-{}", std::process::id()));
        let output = run_scene(&SceneConfig::default()).unwrap();

        let csv = dir.join("segments.csv");
        write_segments_csv(&output, &csv).unwrap();
        let text = std::fs::read_to_string(&csv).unwrap();
        let rows = text.lines().filter(|l| !l.starts_with('#')).count();
        assert_eq!(rows, 1 + output.segment_count());

        let json = dir.join("scene.json");
        write_scene_json(&output, &json).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(value["classification"]["type"], "image");

        let curve = dir.join("curve.csv");
        let n = write_curve_csv(7.5, &curve).unwrap();
        assert_eq!(n, uv_curve(7.5).len());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
