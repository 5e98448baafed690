//! # Lensbench Core
//!
//! The optical engine behind the Lensbench single-lens simulator. Given a
//! thin lens and an object on the optical axis, it solves the thin-lens
//! equation, classifies the image, and constructs the principal rays a
//! renderer needs to draw the classic ray diagram.
//!
//! ## Pipeline
//!
//! ```text
//! OpticalState --compute_optics--> OpticsResult --classify_image--> Classification
//!                                       |
//!                                       +--generate_ray_path / generate_ray_fan--> Vec<Segment>
//! ```
//!
//! Every stage after [`state::OpticalState`] is a pure function of a state
//! snapshot, so hosts can recompute on every mutation or animation tick.
//! All lengths are centimetres; the renderer owns the mapping to pixels.
//!
//! ## Modules
//!
//! - [`types`] — Lens, object, result and segment types.
//! - [`state`] — The validated, self-consistent bench configuration.
//! - [`solver`] — Thin-lens image distance and magnification.
//! - [`classify`] — Real/virtual, orientation and size of the image.
//! - [`rays`] — Principal-ray construction and light bundles.
//! - [`transform`] — Affine placement of canonical constructions.
//! - [`readout`] — Measurement panel values.
//! - [`curve`] — The v–u curve for convex lenses.

pub mod classify;
pub mod curve;
pub mod rays;
pub mod readout;
pub mod solver;
pub mod state;
pub mod transform;
pub mod types;

pub use classify::classify_image;
pub use rays::{generate_ray_fan, generate_ray_path};
pub use solver::compute_optics;
pub use state::OpticalState;
