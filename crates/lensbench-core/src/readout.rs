//! Measurement readout for display panels.
//!
//! Distances and magnification are reported as magnitudes; sign information
//! is carried by the status line instead.

use serde::{Deserialize, Serialize};

use crate::classify::classify_image;
use crate::state::OpticalState;
use crate::types::{Classification, LensKind, OpticalValue, OpticsResult, SizeRelation};

/// Magnitudes shown alongside the bench.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    /// |u| (cm).
    pub object_distance: f64,
    /// |v| (cm).
    pub image_distance: OpticalValue,
    /// |m|.
    pub magnification: OpticalValue,
    /// |u| + |v| (cm), object-to-image separation along the axis.
    pub total_distance: OpticalValue,
    /// Human-readable image description.
    pub status: String,
}

impl Measurements {
    pub fn from_optics(state: &OpticalState, result: &OpticsResult) -> Self {
        let object_distance = state.object_distance().abs();
        let image_distance = result.image_distance.abs();
        let total_distance = match image_distance {
            OpticalValue::Finite(v) => OpticalValue::Finite(object_distance + v),
            OpticalValue::Infinity => OpticalValue::Infinity,
        };

        Self {
            object_distance,
            image_distance,
            magnification: result.magnification.abs(),
            total_distance,
            status: status_line(state, result),
        }
    }

    /// Display rows as `(label, value)` pairs.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Object distance", format!("{:.1} cm", self.object_distance)),
            ("Image distance", format_cm(self.image_distance)),
            ("Magnification", format_times(self.magnification)),
            ("Total distance", format_cm(self.total_distance)),
            ("Image", self.status.clone()),
        ]
    }
}

fn format_cm(value: OpticalValue) -> String {
    match value {
        OpticalValue::Finite(v) => format!("{:.1} cm", v),
        OpticalValue::Infinity => "Infinity".to_string(),
    }
}

fn format_times(value: OpticalValue) -> String {
    match value {
        OpticalValue::Finite(v) => format!("{:.2}x", v),
        OpticalValue::Infinity => "Infinity".to_string(),
    }
}

/// Orientation first, then size, then reality.
fn status_line(state: &OpticalState, result: &OpticsResult) -> String {
    if state.lens().kind == LensKind::Concave {
        return "Erect, Diminished, Virtual image".to_string();
    }
    match classify_image(state, result) {
        Classification::NoImage => "No image (parallel rays)".to_string(),
        Classification::Image(nature) => {
            let orientation = if nature.is_erect { "Erect" } else { "Inverted" };
            let size = match nature.size {
                SizeRelation::Magnified => "Magnified",
                SizeRelation::Same => "Same size",
                SizeRelation::Diminished => "Diminished",
            };
            let reality = if nature.is_real { "Real image" } else { "Virtual image" };
            format!("{}, {}, {}", orientation, size, reality)
        }
    }
}
