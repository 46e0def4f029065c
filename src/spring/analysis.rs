//! Engineering factors computed from the normalized geometry.
//!
//! Stresses are in MPa for forces in N, moments in N·mm and lengths in mm.

use std::f64::consts::PI;

use serde::Serialize;

use super::params::NormalizedSpring;

/// `C = D/d`.
#[must_use]
pub fn spring_index(mean_diameter: f64, wire_diameter: f64) -> f64 {
    mean_diameter / wire_diameter
}

/// Wahl stress correction `(4C−1)/(4C−4) + 0.615/C`.
#[must_use]
pub fn wahl_factor(index: f64) -> f64 {
    (4.0 * index - 1.0) / (4.0 * index - 4.0) + 0.615 / index
}

/// Bergsträsser stress correction `(4C+2)/(4C−3)`.
#[must_use]
pub fn bergstrasser_factor(index: f64) -> f64 {
    (4.0 * index + 2.0) / (4.0 * index - 3.0)
}

/// Inner-fibre bending correction of torsion springs,
/// `(4C²−C−1)/(4C(C−1))`.
#[must_use]
pub fn torsion_correction(index: f64) -> f64 {
    (4.0 * index * index - index - 1.0) / (4.0 * index * (index - 1.0))
}

/// Corrected shear stress `8FD·Kw/(πd³)`.
#[must_use]
pub fn shear_stress(force: f64, mean_diameter: f64, wire_diameter: f64) -> f64 {
    let k = wahl_factor(spring_index(mean_diameter, wire_diameter));
    8.0 * force * mean_diameter * k / (PI * wire_diameter.powi(3))
}

/// Corrected bending stress `Ki·32M/(πd³)`.
#[must_use]
pub fn bending_stress(moment: f64, mean_diameter: f64, wire_diameter: f64) -> f64 {
    let ki = torsion_correction(spring_index(mean_diameter, wire_diameter));
    ki * 32.0 * moment / (PI * wire_diameter.powi(3))
}

/// Axial rate `Gd⁴/(8D³Na)`, N/mm.
#[must_use]
pub fn axial_rate(shear_modulus: f64, wire_diameter: f64, mean_diameter: f64, active_coils: f64) -> f64 {
    shear_modulus * wire_diameter.powi(4) / (8.0 * mean_diameter.powi(3) * active_coils)
}

/// Angular rate `Ed⁴/(64·D·Na)`, N·mm per radian.
#[must_use]
pub fn torsion_rate(youngs_modulus: f64, wire_diameter: f64, mean_diameter: f64, active_coils: f64) -> f64 {
    youngs_modulus * wire_diameter.powi(4) / (64.0 * mean_diameter * active_coils)
}

/// Index and correction factors of a round-wire spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringFactors {
    pub index: f64,
    pub wahl: f64,
    pub bergstrasser: f64,
    pub torsion_correction: f64,
}

impl SpringFactors {
    /// `None` when the index is not above 1, where every correction diverges.
    #[must_use]
    pub fn new(mean_diameter: f64, wire_diameter: f64) -> Option<Self> {
        let index = spring_index(mean_diameter, wire_diameter);
        (index.is_finite() && index > 1.0).then(|| Self {
            index,
            wahl: wahl_factor(index),
            bergstrasser: bergstrasser_factor(index),
            torsion_correction: torsion_correction(index),
        })
    }

    /// Factors of the round-wire families; arc springs use their start diameter.
    #[must_use]
    pub fn for_spring(spring: &NormalizedSpring) -> Option<Self> {
        let (mean, wire) = match spring {
            NormalizedSpring::Compression(s) => (s.mean_diameter, s.wire_diameter),
            NormalizedSpring::Extension(s) => (s.mean_diameter(), s.wire_diameter),
            NormalizedSpring::Torsion(s) => (s.mean_diameter, s.wire_diameter),
            NormalizedSpring::Conical(s) => (s.large_mean_radius() * 2.0, s.wire_diameter),
            NormalizedSpring::Arc(s) => (s.mean_diameter, s.wire_diameter),
            NormalizedSpring::SpiralTorsion(_) | NormalizedSpring::Wave(_) => return None,
        };
        Self::new(mean, wire)
    }
}
