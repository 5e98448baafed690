//! Image classification: real or virtual, erect or inverted, and size.

use crate::state::OpticalState;
use crate::types::{
    Classification, ImageNature, LensKind, OpticalValue, OpticsResult, SizeRelation,
    DEGENERATE_TOLERANCE, SAME_SIZE_TOLERANCE,
};

/// Classify the image described by a solve.
///
/// Returns [`Classification::NoImage`] when the object sits on the lens or the
/// image distance diverges.
pub fn classify_image(state: &OpticalState, result: &OpticsResult) -> Classification {
    let lens = state.lens();
    classify(
        state.object_distance(),
        result.image_distance,
        result.magnification,
        lens.kind,
        lens.focal_length,
    )
}

/// Classification from raw solver quantities.
///
/// # Arguments
/// * `u` - Signed object distance (cm).
/// * `v` - Signed image distance (cm).
/// * `m` - Signed magnification.
/// * `kind` - Lens type.
/// * `f` - Focal length (cm); only its magnitude is used.
pub fn classify(
    u: f64,
    v: OpticalValue,
    m: OpticalValue,
    kind: LensKind,
    f: f64,
) -> Classification {
    let (v, m) = match (v, m) {
        (OpticalValue::Finite(v), OpticalValue::Finite(m)) if u.abs() >= DEGENERATE_TOLERANCE => {
            (v, m)
        }
        _ => return Classification::NoImage,
    };

    if kind == LensKind::Concave {
        return Classification::Image(ImageNature {
            is_real: false,
            is_erect: true,
            size: SizeRelation::Diminished,
        });
    }

    // On the reversed side v is negative for real images, so reality is
    // decided from the object's position relative to the focal plane.
    let is_real = if u < 0.0 { u.abs() >= f.abs() } else { v >= 0.0 };

    Classification::Image(ImageNature {
        is_real,
        is_erect: m > 0.0,
        size: size_relation(m),
    })
}

/// Compare |m| with unity, within [`SAME_SIZE_TOLERANCE`].
pub fn size_relation(m: f64) -> SizeRelation {
    let magnitude = m.abs();
    if (magnitude - 1.0).abs() < SAME_SIZE_TOLERANCE {
        SizeRelation::Same
    } else if magnitude > 1.0 {
        SizeRelation::Magnified
    } else {
        SizeRelation::Diminished
    }
}

impl Classification {
    /// The finite image's nature, if one forms.
    pub fn nature(&self) -> Option<ImageNature> {
        match self {
            Classification::Image(nature) => Some(*nature),
            Classification::NoImage => None,
        }
    }

    /// Short label in the form the simulator has always shown.
    ///
    /// A diverging image is labelled "Real image, at infinity" even though no
    /// image actually forms; [`crate::readout`] reports it as "No image".
    pub fn label(&self) -> String {
        match self {
            Classification::NoImage => "Real image, at infinity".to_string(),
            Classification::Image(nature) => {
                let reality = if nature.is_real { "Real image" } else { "Virtual image" };
                let orientation = if nature.is_erect { "Erect" } else { "Inverted" };
                let size = match nature.size {
                    SizeRelation::Magnified => "Magnified",
                    SizeRelation::Same => "Same size",
                    SizeRelation::Diminished => "Diminished",
                };
                format!("{}, {}, {}", reality, size, orientation)
            }
        }
    }
}
