//! Lensbench command-line interface.
//!
//! Solve ray diagrams from TOML scene files:
//! ```sh
//! lensbench solve scene.toml
//! lensbench validate scene.toml
//! lensbench curve --focal-length 7.5
//! lensbench presets
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lensbench_core::state::{OpticalState, Preset};

#[derive(Parser)]
#[command(name = "lensbench")]
#[command(about = "Lensbench: thin-lens ray diagram engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a scene and write its ray segments.
    Solve {
        /// Path to the scene file.
        config: PathBuf,
        /// Output directory (overrides scene file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a scene file and report every value that would be corrected.
    Validate {
        /// Path to the scene file.
        config: PathBuf,
    },
    /// Write the real-image v–u curve of a convex lens.
    Curve {
        /// Focal length magnitude (cm).
        #[arg(short, long, default_value_t = 7.5)]
        focal_length: f64,
        /// Output directory.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
    },
    /// List the built-in presets.
    Presets,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { config, output } => {
            println!("Lensbench");
            println!("=========");
            let scene = config::load_config(&config)?;
            println!("Scene: {}", config.display());
            println!("Rules: {}", runner::rule_names(&scene.rays.rules));

            let result = runner::run_scene(&scene)?;
            println!("Image: {}", result.classification.label());
            runner::print_measurements(&result.measurements);

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&scene.output.directory));

            if scene.output.save_segments {
                runner::write_segments_csv(&result, &out_dir.join("segments.csv"))?;
            }
            if scene.output.save_json {
                runner::write_scene_json(&result, &out_dir.join("scene.json"))?;
            }

            println!("Done: {} segments.", result.segment_count());
            Ok(())
        }
        Commands::Validate { config } => {
            let scene = config::load_config(&config)?;
            let issues = scene.issues();
            if issues.is_empty() {
                println!("Scene is valid: {}", config.display());
                return Ok(());
            }
            println!("Scene {} has {} issue(s):", config.display(), issues.len());
            for issue in &issues {
                println!("  - {}", issue);
            }
            anyhow::bail!("{} value(s) would be corrected", issues.len())
        }
        Commands::Curve { focal_length, output } => {
            let n = runner::write_curve_csv(focal_length, &output.join("curve.csv"))?;
            println!("{} points.", n);
            Ok(())
        }
        Commands::Presets => {
            println!("Available presets:");
            println!();
            for preset in Preset::ALL {
                let mut bench = OpticalState::default();
                bench.apply_preset(preset);
                let (lens_position, object_distance, focal_length) = preset.parameters();
                println!(
                    "  {:<10} lens x={:>5.1} cm, u={:>5.1} cm, f={:.1} cm  ->  {}",
                    preset.name(),
                    lens_position,
                    object_distance,
                    focal_length,
                    lensbench_core::classify_image(
                        &bench,
                        &lensbench_core::compute_optics(&bench)
                    )
                    .label()
                );
            }
            Ok(())
        }
    }
}
