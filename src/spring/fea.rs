//! Records handed to the beam-model FEA deck writer.
//!
//! The deck text itself is written elsewhere; this module only supplies the
//! resampled centerline, the quadratic beam topology, material and
//! displacement-controlled load cases.

use serde::{Deserialize, Serialize};

use crate::geom::Point3;

use super::centerline::{CrossSection, SpringCenterline};
use super::error::SpringError;
use super::generate::generate_normalized;
use super::params::{NormalizedSpring, SpringDesign};

// ─────────────────────────────────────────────────────────────────────────────
// Material and load cases
// ─────────────────────────────────────────────────────────────────────────────

/// Linear elastic material, MPa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub name: String,
    pub youngs_modulus: f64,
    pub poisson_ratio: f64,
    pub shear_modulus: f64,
    /// tonne/mm³
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_strength: Option<f64>,
}

impl Material {
    /// Spring steel used for round-wire springs.
    #[must_use]
    pub fn steel() -> Self {
        Self {
            name: "STEEL".to_string(),
            youngs_modulus: 206_000.0,
            poisson_ratio: 0.3,
            shear_modulus: 79_000.0,
            density: None,
            yield_strength: None,
        }
    }

    /// 17-7PH in condition CH900, used for wave springs.
    #[must_use]
    pub fn wave_alloy() -> Self {
        let youngs_modulus = 203_000.0;
        let poisson_ratio = 0.28;
        Self {
            name: "MAT_177PH_CH900".to_string(),
            youngs_modulus,
            poisson_ratio,
            shear_modulus: youngs_modulus / (2.0 * (1.0 + poisson_ratio)),
            density: Some(7.85e-9),
            yield_strength: Some(1170.0),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}

/// Displacement-controlled step: the top is moved to `target_height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadCase {
    pub name: String,
    pub target_height: f64,
}

impl LoadCase {
    #[must_use]
    pub fn new(name: impl Into<String>, target_height: f64) -> Self {
        Self {
            name: name.into(),
            target_height,
        }
    }

    /// Axial displacement applied to the top node.
    #[must_use]
    pub fn displacement(&self, free_length: f64) -> f64 {
        self.target_height - free_length
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeshLevel {
    Coarse,
    #[default]
    Medium,
    Fine,
}

impl MeshLevel {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "coarse" => Some(Self::Coarse),
            "medium" => Some(Self::Medium),
            "fine" => Some(Self::Fine),
            _ => None,
        }
    }

    #[must_use]
    pub const fn segments_per_coil(self) -> usize {
        match self {
            Self::Coarse => 18,
            Self::Medium => 36,
            Self::Fine => 72,
        }
    }

    /// Samples per wave of a wave spring; never below the 20 the generator
    /// accepts.
    #[must_use]
    pub const fn segments_per_wave(self) -> usize {
        match self {
            Self::Coarse => 20,
            Self::Medium => 24,
            Self::Fine => 48,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Beam topology
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamNode {
    /// 1-based.
    pub id: usize,
    pub position: Point3,
}

/// Quadratic beam element, nodes in `start, end, mid` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamElement {
    pub id: usize,
    pub start: usize,
    pub end: usize,
    pub mid: usize,
}

/// Corner nodes `1..=n` follow the centerline; midpoint node `n + i`
/// belongs to element `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamMesh {
    pub nodes: Vec<BeamNode>,
    pub elements: Vec<BeamElement>,
    /// First corner node (clamped).
    pub bottom_node: usize,
    /// Last corner node (driven).
    pub top_node: usize,
}

impl BeamMesh {
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Self {
        let corners = points.len();
        let mut nodes: Vec<BeamNode> = points
            .iter()
            .enumerate()
            .map(|(i, &position)| BeamNode { id: i + 1, position })
            .collect();
        let mut elements = Vec::with_capacity(corners.saturating_sub(1));
        for (i, pair) in points.windows(2).enumerate() {
            let mid = corners + i + 1;
            nodes.push(BeamNode {
                id: mid,
                position: pair[0].lerp(pair[1], 0.5),
            });
            elements.push(BeamElement {
                id: i + 1,
                start: i + 1,
                end: i + 2,
                mid,
            });
        }
        Self {
            nodes,
            elements,
            bottom_node: 1,
            top_node: corners,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hand-off
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaHandoff {
    pub centerline: Vec<Point3>,
    pub cross_section: CrossSection,
    pub material: Material,
    pub load_cases: Vec<LoadCase>,
    /// Height the load-case displacements are measured from.
    pub free_length: f64,
    pub mesh: BeamMesh,
}

/// Unloaded axial height of a spring.
#[must_use]
pub fn reference_height(centerline: &SpringCenterline) -> f64 {
    match &centerline.spring {
        NormalizedSpring::Compression(s) => s.free_length,
        NormalizedSpring::Conical(s) => s.free_length,
        NormalizedSpring::Extension(s) => s.extended_body_length(),
        NormalizedSpring::Torsion(s) => s.body_length,
        NormalizedSpring::Wave(s) => s.free_height,
        NormalizedSpring::Arc(_) | NormalizedSpring::SpiralTorsion(_) => {
            let (lo, hi) = centerline.path.z_range();
            hi - lo
        }
    }
}

impl FeaHandoff {
    /// Resamples the design at the mesh level's density and builds the beam
    /// topology on the result.
    pub fn new(
        design: &SpringDesign,
        material: Material,
        load_cases: Vec<LoadCase>,
        level: MeshLevel,
    ) -> Result<Self, SpringError> {
        let family = design.parameters.family();
        if let Some(case) = load_cases.iter().find(|case| !(case.target_height > 0.0)) {
            return Err(SpringError::degenerate(
                family,
                "targetHeight",
                format!("load case `{}` needs a positive target height", case.name),
            ));
        }
        let options = design
            .options
            .min_samples(2)
            .samples_per_turn(level.segments_per_coil())
            .segments_per_wave(level.segments_per_wave());
        let centerline = generate_normalized(&design.parameters.normalize(), &options)?;
        let free_length = reference_height(&centerline);
        let points = centerline.path.points().to_vec();
        log::debug!(
            "{family}: FEA hand-off with {} corner nodes at {level:?} density",
            points.len()
        );

        Ok(Self {
            mesh: BeamMesh::from_points(&points),
            centerline: points,
            cross_section: centerline.cross_section,
            material,
            load_cases,
            free_length,
        })
    }
}
