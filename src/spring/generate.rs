//! Family dispatch and batch generation.
//!
//! # Example
//!
//! ```ignore
//! use spring_engine::spring::{SpringDesign, generate};
//!
//! let design = SpringDesign::from_json(
//!     r#"{"springType": "compression", "geometry": {"wireDiameter": 3.2}}"#,
//! )?;
//! let centerline = generate(&design)?;
//! println!("{} points", centerline.path.len());
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::geom::Vec3;

use super::arc::generate_arc;
use super::centerline::SpringCenterline;
use super::compression::{generate_compression, generate_conical};
use super::error::SpringError;
use super::extension::generate_extension;
use super::options::GenerationOptions;
use super::params::{NormalizedSpring, SpringDesign};
use super::spiral::generate_spiral_torsion;
use super::torsion::generate_torsion;
use super::wave::generate_wave;

pub type SpringResult<T> = Result<T, SpringError>;

/// Normalizes the design's parameters and samples its centerline.
pub fn generate(design: &SpringDesign) -> SpringResult<SpringCenterline> {
    generate_normalized(&design.parameters.normalize(), &design.options)
}

/// Parses a JSON design and samples it.
pub fn generate_json(text: &str) -> SpringResult<SpringCenterline> {
    generate(&SpringDesign::from_json(text)?)
}

pub fn generate_normalized(
    spring: &NormalizedSpring,
    options: &GenerationOptions,
) -> SpringResult<SpringCenterline> {
    options.validate()?;
    let centerline = match spring {
        NormalizedSpring::Compression(s) => generate_compression(s, options),
        NormalizedSpring::Extension(s) => generate_extension(s, options),
        NormalizedSpring::Torsion(s) => generate_torsion(s, options),
        NormalizedSpring::Conical(s) => generate_conical(s, options),
        NormalizedSpring::Arc(s) => generate_arc(s, options),
        NormalizedSpring::SpiralTorsion(s) => generate_spiral_torsion(s, options),
        NormalizedSpring::Wave(s) => generate_wave(s, options),
    }?;
    log::debug!(
        "{}: centerline with {} points",
        centerline.family,
        centerline.path.len()
    );

    if !options.include_frames {
        return Ok(centerline);
    }
    let hint = frame_hint(&centerline);
    Ok(SpringCenterline {
        path: centerline.path.with_frames(hint),
        ..centerline
    })
}

/// Initial frame normal: toward the axis for coiled wire, +Z for strip.
fn frame_hint(centerline: &SpringCenterline) -> Vec3 {
    match centerline.spring {
        NormalizedSpring::SpiralTorsion(_) | NormalizedSpring::Wave(_) | NormalizedSpring::Arc(_) => {
            Vec3::Z
        }
        _ => centerline
            .path
            .first()
            .map(|p| -p.to_vec3().flatten_xy())
            .unwrap_or(-Vec3::X),
    }
}

/// One result per design, in input order. Jobs fail independently.
#[cfg(feature = "parallel")]
pub fn generate_batch(designs: &[SpringDesign]) -> Vec<SpringResult<SpringCenterline>> {
    designs.par_iter().map(generate).collect()
}

/// One result per design, in input order. Jobs fail independently.
#[cfg(not(feature = "parallel"))]
pub fn generate_batch(designs: &[SpringDesign]) -> Vec<SpringResult<SpringCenterline>> {
    designs.iter().map(generate).collect()
}
