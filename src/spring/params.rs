//! Raw design inputs and their normalized counterparts.
//!
//! Every value a sampler needs is resolved here, first hit wins:
//! explicit field, convertible alternate field, value computed from other
//! fields, hard default. Resolution never fails; hard defaults are logged
//! with `warn!`, derived values with `debug!`. Whether the resolved values
//! describe buildable geometry is checked later by the generators.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::SpringError;
use super::hook::{HookKind, HookSpec};
use super::options::GenerationOptions;

// ─────────────────────────────────────────────────────────────────────────────
// Enumerations
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpringFamily {
    Compression,
    Extension,
    Torsion,
    Conical,
    Arc,
    SpiralTorsion,
    Wave,
}

impl SpringFamily {
    pub const ALL: [Self; 7] = [
        Self::Compression,
        Self::Extension,
        Self::Torsion,
        Self::Conical,
        Self::Arc,
        Self::SpiralTorsion,
        Self::Wave,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compression => "compression",
            Self::Extension => "extension",
            Self::Torsion => "torsion",
            Self::Conical => "conical",
            Self::Arc => "arc",
            Self::SpiralTorsion => "spiralTorsion",
            Self::Wave => "wave",
        }
    }
}

impl fmt::Display for SpringFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Winding sense looking down +Z. Right-handed coils advance counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Handedness {
    #[default]
    Right,
    Left,
}

impl Handedness {
    /// Accepts `right`/`left`, `rh`/`lh` and `ccw`/`cw`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "right" | "rh" | "ccw" => Some(Self::Right),
            "left" | "lh" | "cw" => Some(Self::Left),
            _ => None,
        }
    }

    /// +1 for right-handed, -1 for left-handed.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndType {
    Open,
    Closed,
    #[default]
    ClosedGround,
}

impl EndType {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "open" | "plain" => Some(Self::Open),
            "closed" | "squared" => Some(Self::Closed),
            "closed_ground" | "closedground" | "ground" | "squared_ground" => {
                Some(Self::ClosedGround)
            }
            _ => None,
        }
    }

    #[must_use]
    pub const fn has_dead_coils(self) -> bool {
        !matches!(self, Self::Open)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegStyle {
    /// Legs leave the body along the projected coil tangent.
    #[default]
    Tangential,
    /// Legs run radially outward from the end points.
    Radial,
}

impl LegStyle {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tangential" | "tangent" => Some(Self::Tangential),
            "radial" => Some(Self::Radial),
            _ => None,
        }
    }
}

/// Mean-diameter variation along an arc spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiameterProfile {
    #[default]
    Constant,
    Conical,
    Barrel,
}

impl DiameterProfile {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "constant" | "arc" | "cylindrical" => Some(Self::Constant),
            "conical" | "taper" | "tapered" => Some(Self::Conical),
            "barrel" | "bow" => Some(Self::Barrel),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Hard fallback constants, last link of every resolution chain (mm, coils, degrees).
pub mod defaults {
    pub mod compression {
        pub const WIRE_DIAMETER: f64 = 3.2;
        pub const MEAN_DIAMETER: f64 = 24.0;
        pub const ACTIVE_COILS: f64 = 8.0;
        pub const DEAD_COILS_TOTAL: f64 = 2.0;
        pub const FREE_LENGTH: f64 = 50.0;
    }

    pub mod extension {
        pub const WIRE_DIAMETER: f64 = 2.0;
        pub const OUTER_DIAMETER: f64 = 18.0;
        pub const ACTIVE_COILS: f64 = 10.0;
        /// Free length minus this many wire diameters is left for the body.
        pub const HOOK_ALLOWANCE_WIRES: f64 = 4.0;
    }

    pub mod torsion {
        pub const WIRE_DIAMETER: f64 = 1.5;
        pub const MEAN_DIAMETER: f64 = 12.0;
        pub const ACTIVE_COILS: f64 = 6.0;
        /// Body length as a multiple of the solid length.
        pub const BODY_LENGTH_FACTOR: f64 = 1.1;
        pub const LEG_LENGTH: f64 = 25.0;
        pub const FREE_ANGLE_DEG: f64 = 90.0;
    }

    pub mod conical {
        pub const WIRE_DIAMETER: f64 = 3.0;
        pub const LARGE_OUTER_DIAMETER: f64 = 30.0;
        pub const SMALL_OUTER_DIAMETER: f64 = 15.0;
        pub const ACTIVE_COILS: f64 = 6.0;
        pub const FREE_LENGTH: f64 = 50.0;
    }

    pub mod arc {
        pub const WIRE_DIAMETER: f64 = 5.0;
        pub const MEAN_DIAMETER: f64 = 30.0;
        pub const ACTIVE_COILS: f64 = 8.0;
        pub const ARC_RADIUS: f64 = 150.0;
        pub const ALPHA_DEG: f64 = 60.0;
        pub const DEAD_COILS: f64 = 1.0;
        pub const BLEND_K: f64 = 0.5;
    }

    pub mod spiral_torsion {
        pub const INNER_DIAMETER: f64 = 15.0;
        pub const OUTER_DIAMETER: f64 = 50.0;
        pub const TURNS: f64 = 5.0;
        pub const STRIP_WIDTH: f64 = 10.0;
        pub const STRIP_THICKNESS: f64 = 0.8;
        /// End feature lengths as shares of the outer diameter.
        pub const OUTER_LEG_SHARE: f64 = 0.2;
        pub const SIDE_SHARE: f64 = 0.1;
        pub const TOP_SHARE: f64 = 0.1;
        /// Inner leg overshoot past the axis as a share of the inner radius.
        pub const INNER_OVERSHOOT_SHARE: f64 = 0.5;
    }

    pub mod wave {
        pub const INNER_DIAMETER: f64 = 20.0;
        pub const OUTER_DIAMETER: f64 = 30.0;
        pub const THICKNESS: f64 = 0.5;
        pub const WAVES_PER_TURN: f64 = 3.5;
        pub const TURNS: f64 = 1.0;
        pub const FREE_HEIGHT: f64 = 5.0;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw inputs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompressionInput {
    pub wire_diameter: Option<f64>,
    pub mean_diameter: Option<f64>,
    pub outer_diameter: Option<f64>,
    pub active_coils: Option<f64>,
    pub total_coils: Option<f64>,
    pub free_length: Option<f64>,
    pub current_deflection: Option<f64>,
    pub end_type: Option<String>,
    pub handedness: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtensionInput {
    pub wire_diameter: Option<f64>,
    pub outer_diameter: Option<f64>,
    pub mean_diameter: Option<f64>,
    pub active_coils: Option<f64>,
    pub total_coils: Option<f64>,
    pub body_length: Option<f64>,
    pub free_length: Option<f64>,
    pub free_length_inside_hooks: Option<f64>,
    pub current_extension: Option<f64>,
    pub hook_type: Option<String>,
    pub hook_radius_factor: Option<f64>,
    pub hook_angle_deg: Option<f64>,
    pub handedness: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TorsionInput {
    pub wire_diameter: Option<f64>,
    pub mean_diameter: Option<f64>,
    pub outer_diameter: Option<f64>,
    pub active_coils: Option<f64>,
    pub body_length: Option<f64>,
    pub leg_length1: Option<f64>,
    pub leg_length2: Option<f64>,
    pub winding_direction: Option<String>,
    pub free_angle_deg: Option<f64>,
    pub working_angle_deg: Option<f64>,
    pub leg_style: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConicalInput {
    pub wire_diameter: Option<f64>,
    pub large_outer_diameter: Option<f64>,
    pub small_outer_diameter: Option<f64>,
    pub active_coils: Option<f64>,
    pub total_coils: Option<f64>,
    pub free_length: Option<f64>,
    pub current_deflection: Option<f64>,
    pub end_type: Option<String>,
    pub handedness: Option<String>,
}

/// Arc/bow spring input; field names follow the arc-spring calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcInput {
    #[serde(rename = "d")]
    pub wire_diameter: Option<f64>,
    #[serde(rename = "D")]
    pub mean_diameter: Option<f64>,
    #[serde(rename = "n")]
    pub active_coils: Option<f64>,
    #[serde(rename = "r")]
    pub arc_radius: Option<f64>,
    #[serde(rename = "alphaDeg")]
    pub alpha_deg: Option<f64>,
    pub profile: Option<String>,
    #[serde(rename = "deadCoilsStart")]
    pub dead_coils_start: Option<f64>,
    #[serde(rename = "deadCoilsEnd")]
    pub dead_coils_end: Option<f64>,
    #[serde(rename = "k")]
    pub blend: Option<f64>,
    #[serde(rename = "phaseDeg")]
    pub phase_deg: Option<f64>,
    #[serde(rename = "dEnd")]
    pub end_mean_diameter: Option<f64>,
    #[serde(rename = "dMid")]
    pub mid_mean_diameter: Option<f64>,
    #[serde(rename = "tiltDeg")]
    pub tilt_deg: Option<f64>,
    #[serde(rename = "leanDeg")]
    pub lean_deg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpiralTorsionInput {
    pub inner_diameter: Option<f64>,
    pub outer_diameter: Option<f64>,
    pub turns: Option<f64>,
    pub active_coils: Option<f64>,
    pub strip_width: Option<f64>,
    pub strip_thickness: Option<f64>,
    pub handedness: Option<String>,
    pub inner_leg_length: Option<f64>,
    pub outer_leg_length: Option<f64>,
    pub side_length: Option<f64>,
    pub top_length: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaveInput {
    pub inner_diameter: Option<f64>,
    pub outer_diameter: Option<f64>,
    pub thickness: Option<f64>,
    pub width: Option<f64>,
    pub waves_per_turn: Option<f64>,
    pub turns: Option<f64>,
    pub free_height: Option<f64>,
}

/// Raw parameters of one spring, tagged by family.
#[derive(Debug, Clone, PartialEq)]
pub enum SpringParameters {
    Compression(CompressionInput),
    Extension(ExtensionInput),
    Torsion(TorsionInput),
    Conical(ConicalInput),
    Arc(ArcInput),
    SpiralTorsion(SpiralTorsionInput),
    Wave(WaveInput),
}

impl SpringParameters {
    #[must_use]
    pub const fn family(&self) -> SpringFamily {
        match self {
            Self::Compression(_) => SpringFamily::Compression,
            Self::Extension(_) => SpringFamily::Extension,
            Self::Torsion(_) => SpringFamily::Torsion,
            Self::Conical(_) => SpringFamily::Conical,
            Self::Arc(_) => SpringFamily::Arc,
            Self::SpiralTorsion(_) => SpringFamily::SpiralTorsion,
            Self::Wave(_) => SpringFamily::Wave,
        }
    }

    /// Resolves every field to a concrete value.
    #[must_use]
    pub fn normalize(&self) -> NormalizedSpring {
        match self {
            Self::Compression(input) => NormalizedSpring::Compression(input.normalize()),
            Self::Extension(input) => NormalizedSpring::Extension(input.normalize()),
            Self::Torsion(input) => NormalizedSpring::Torsion(input.normalize()),
            Self::Conical(input) => NormalizedSpring::Conical(input.normalize()),
            Self::Arc(input) => NormalizedSpring::Arc(input.normalize()),
            Self::SpiralTorsion(input) => NormalizedSpring::SpiralTorsion(input.normalize()),
            Self::Wave(input) => NormalizedSpring::Wave(input.normalize()),
        }
    }
}

/// A generation request: `{"springType": ..., "geometry": {...}, "options": {...}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawDesign")]
pub struct SpringDesign {
    pub parameters: SpringParameters,
    pub options: GenerationOptions,
}

impl SpringDesign {
    #[must_use]
    pub fn new(parameters: SpringParameters) -> Self {
        Self {
            parameters,
            options: GenerationOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn from_json(text: &str) -> Result<Self, SpringError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDesign {
    spring_type: SpringFamily,
    #[serde(default)]
    geometry: serde_json::Value,
    #[serde(default)]
    options: GenerationOptions,
}

impl TryFrom<RawDesign> for SpringDesign {
    type Error = SpringError;

    fn try_from(raw: RawDesign) -> Result<Self, Self::Error> {
        let geometry = match raw.geometry {
            serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
            other => other,
        };
        let parameters = match raw.spring_type {
            SpringFamily::Compression => {
                SpringParameters::Compression(serde_json::from_value(geometry)?)
            }
            SpringFamily::Extension => {
                SpringParameters::Extension(serde_json::from_value(geometry)?)
            }
            SpringFamily::Torsion => SpringParameters::Torsion(serde_json::from_value(geometry)?),
            SpringFamily::Conical => SpringParameters::Conical(serde_json::from_value(geometry)?),
            SpringFamily::Arc => SpringParameters::Arc(serde_json::from_value(geometry)?),
            SpringFamily::SpiralTorsion => {
                SpringParameters::SpiralTorsion(serde_json::from_value(geometry)?)
            }
            SpringFamily::Wave => SpringParameters::Wave(serde_json::from_value(geometry)?),
        };
        Ok(Self {
            parameters,
            options: raw.options,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Normalized records
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionSpring {
    pub wire_diameter: f64,
    pub mean_diameter: f64,
    pub active_coils: f64,
    pub total_coils: f64,
    pub free_length: f64,
    pub current_deflection: f64,
    pub end_type: EndType,
    pub handedness: Handedness,
}

impl CompressionSpring {
    #[must_use]
    pub fn mean_radius(&self) -> f64 {
        self.mean_diameter * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionSpring {
    pub wire_diameter: f64,
    pub outer_diameter: f64,
    pub active_coils: f64,
    /// Free body length.
    pub body_length: f64,
    pub current_extension: f64,
    pub hook: HookSpec,
    pub handedness: Handedness,
}

impl ExtensionSpring {
    #[must_use]
    pub fn mean_diameter(&self) -> f64 {
        self.outer_diameter - self.wire_diameter
    }

    #[must_use]
    pub fn mean_radius(&self) -> f64 {
        self.mean_diameter() * 0.5
    }

    /// Body length under the current extension.
    #[must_use]
    pub fn extended_body_length(&self) -> f64 {
        self.body_length + self.current_extension
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TorsionSpring {
    pub wire_diameter: f64,
    pub mean_diameter: f64,
    pub active_coils: f64,
    pub body_length: f64,
    pub leg_length1: f64,
    pub leg_length2: f64,
    pub winding_direction: Handedness,
    pub free_angle_deg: f64,
    pub working_angle_deg: f64,
    pub leg_style: LegStyle,
}

impl TorsionSpring {
    #[must_use]
    pub fn mean_radius(&self) -> f64 {
        self.mean_diameter * 0.5
    }

    /// Body turns after winding the legs from the free to the working angle.
    #[must_use]
    pub fn loaded_turns(&self) -> f64 {
        self.active_coils + (self.free_angle_deg - self.working_angle_deg) / 360.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConicalSpring {
    pub wire_diameter: f64,
    pub large_outer_diameter: f64,
    pub small_outer_diameter: f64,
    pub active_coils: f64,
    pub total_coils: f64,
    pub free_length: f64,
    pub current_deflection: f64,
    pub end_type: EndType,
    pub handedness: Handedness,
}

impl ConicalSpring {
    #[must_use]
    pub fn large_mean_radius(&self) -> f64 {
        (self.large_outer_diameter - self.wire_diameter) * 0.5
    }

    #[must_use]
    pub fn small_mean_radius(&self) -> f64 {
        (self.small_outer_diameter - self.wire_diameter) * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcSpring {
    pub wire_diameter: f64,
    /// Mean coil diameter at the start of the arc.
    pub mean_diameter: f64,
    pub active_coils: f64,
    pub arc_radius: f64,
    pub alpha_deg: f64,
    pub profile: DiameterProfile,
    pub dead_coils_start: f64,
    pub dead_coils_end: f64,
    /// Blend between uniform (0) and solid-packed (1) end anchors.
    pub blend_k: f64,
    pub phase_deg: f64,
    /// Mean diameter at the far end (conical profile).
    pub end_mean_diameter: f64,
    /// Mean diameter at mid-span (barrel profile).
    pub mid_mean_diameter: f64,
    pub tilt_deg: f64,
    pub lean_deg: f64,
}

impl ArcSpring {
    #[must_use]
    pub fn total_coils(&self) -> f64 {
        self.dead_coils_start + self.active_coils + self.dead_coils_end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiralTorsionSpring {
    pub inner_diameter: f64,
    pub outer_diameter: f64,
    pub turns: f64,
    pub strip_width: f64,
    pub strip_thickness: f64,
    pub handedness: Handedness,
    /// Straight inner leg length measured from the end of the transition arc.
    pub inner_leg_length: f64,
    pub outer_leg_length: f64,
    pub side_length: f64,
    pub top_length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveSpring {
    pub inner_diameter: f64,
    pub outer_diameter: f64,
    pub thickness: f64,
    /// Radial width of the strip.
    pub width: f64,
    pub waves_per_turn: f64,
    pub turns: f64,
    pub free_height: f64,
}

impl WaveSpring {
    /// Radius of the strip centerline, midway between inner and outer edge.
    #[must_use]
    pub fn mean_radius(&self) -> f64 {
        (self.inner_diameter + self.outer_diameter) * 0.25
    }
}

/// Fully resolved parameters, one variant per family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "springType", content = "geometry", rename_all = "camelCase")]
pub enum NormalizedSpring {
    Compression(CompressionSpring),
    Extension(ExtensionSpring),
    Torsion(TorsionSpring),
    Conical(ConicalSpring),
    Arc(ArcSpring),
    SpiralTorsion(SpiralTorsionSpring),
    Wave(WaveSpring),
}

impl NormalizedSpring {
    #[must_use]
    pub const fn family(&self) -> SpringFamily {
        match self {
            Self::Compression(_) => SpringFamily::Compression,
            Self::Extension(_) => SpringFamily::Extension,
            Self::Torsion(_) => SpringFamily::Torsion,
            Self::Conical(_) => SpringFamily::Conical,
            Self::Arc(_) => SpringFamily::Arc,
            Self::SpiralTorsion(_) => SpringFamily::SpiralTorsion,
            Self::Wave(_) => SpringFamily::Wave,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolution helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Explicit value when finite.
fn given(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Explicit value when finite and strictly positive.
fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Explicit value when finite and not negative.
fn non_negative(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

fn derived(family: SpringFamily, field: &str, value: f64) -> f64 {
    log::debug!("{family}: `{field}` derived as {value}");
    value
}

fn fallback(family: SpringFamily, field: &str, value: f64) -> f64 {
    log::warn!("{family}: `{field}` missing, using default {value}");
    value
}

fn parse_or<T: Copy + fmt::Debug>(
    family: SpringFamily,
    field: &str,
    raw: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
    default: T,
) -> T {
    match raw {
        None => default,
        Some(name) => parse(name).unwrap_or_else(|| {
            log::warn!("{family}: unknown `{field}` {name:?}, using {default:?}");
            default
        }),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Normalization
// ─────────────────────────────────────────────────────────────────────────────

impl CompressionInput {
    #[must_use]
    pub fn normalize(&self) -> CompressionSpring {
        use defaults::compression as def;
        let family = SpringFamily::Compression;

        let wire_diameter = given(self.wire_diameter)
            .unwrap_or_else(|| fallback(family, "wireDiameter", def::WIRE_DIAMETER));
        let mean_diameter = given(self.mean_diameter)
            .or_else(|| {
                positive(self.outer_diameter)
                    .map(|od| derived(family, "meanDiameter", od - wire_diameter))
            })
            .unwrap_or_else(|| fallback(family, "meanDiameter", def::MEAN_DIAMETER));
        let active_coils = given(self.active_coils)
            .or_else(|| {
                positive(self.total_coils)
                    .map(|nt| nt - def::DEAD_COILS_TOTAL)
                    .filter(|na| *na > 0.0)
                    .map(|na| derived(family, "activeCoils", na))
            })
            .unwrap_or_else(|| fallback(family, "activeCoils", def::ACTIVE_COILS));
        let mut total_coils = given(self.total_coils).unwrap_or_else(|| {
            derived(family, "totalCoils", active_coils + def::DEAD_COILS_TOTAL)
        });
        if total_coils < active_coils {
            log::warn!(
                "{family}: totalCoils {total_coils} below activeCoils {active_coils}, raised to match"
            );
            total_coils = active_coils;
        }
        let free_length = given(self.free_length)
            .unwrap_or_else(|| fallback(family, "freeLength", def::FREE_LENGTH));

        CompressionSpring {
            wire_diameter,
            mean_diameter,
            active_coils,
            total_coils,
            free_length,
            current_deflection: non_negative(self.current_deflection).unwrap_or(0.0),
            end_type: parse_or(
                family,
                "endType",
                self.end_type.as_deref(),
                EndType::parse,
                EndType::ClosedGround,
            ),
            handedness: parse_or(
                family,
                "handedness",
                self.handedness.as_deref(),
                Handedness::parse,
                Handedness::Right,
            ),
        }
    }
}

impl ExtensionInput {
    #[must_use]
    pub fn normalize(&self) -> ExtensionSpring {
        use defaults::extension as def;
        let family = SpringFamily::Extension;

        let wire_diameter = given(self.wire_diameter)
            .unwrap_or_else(|| fallback(family, "wireDiameter", def::WIRE_DIAMETER));
        let outer_diameter = given(self.outer_diameter)
            .or_else(|| {
                positive(self.mean_diameter)
                    .map(|dm| derived(family, "outerDiameter", dm + wire_diameter))
            })
            .unwrap_or_else(|| fallback(family, "outerDiameter", def::OUTER_DIAMETER));
        // Non-positive counts are treated as missing here, matching the
        // calculator that produces these requests.
        let active_coils = positive(self.active_coils)
            .or_else(|| positive(self.total_coils).map(|nt| derived(family, "activeCoils", nt)))
            .unwrap_or_else(|| fallback(family, "activeCoils", def::ACTIVE_COILS));
        let solid_body = active_coils * wire_diameter;
        let body_length = positive(self.body_length)
            .or_else(|| {
                positive(self.free_length_inside_hooks)
                    .or_else(|| positive(self.free_length))
                    .map(|free| {
                        let body = (free - def::HOOK_ALLOWANCE_WIRES * wire_diameter).max(solid_body);
                        derived(family, "bodyLength", body)
                    })
            })
            .unwrap_or_else(|| derived(family, "bodyLength", solid_body));

        let kind = parse_or(
            family,
            "hookType",
            self.hook_type.as_deref(),
            HookKind::parse,
            HookKind::Machine,
        );
        let mut hook = kind.spec();
        if let Some(factor) = positive(self.hook_radius_factor) {
            hook.hook_radius_factor = factor;
        }
        if let Some(angle) = positive(self.hook_angle_deg) {
            hook.loop_angle_deg = angle;
        }

        ExtensionSpring {
            wire_diameter,
            outer_diameter,
            active_coils,
            body_length,
            current_extension: non_negative(self.current_extension).unwrap_or(0.0),
            hook,
            handedness: parse_or(
                family,
                "handedness",
                self.handedness.as_deref(),
                Handedness::parse,
                Handedness::Right,
            ),
        }
    }
}

impl TorsionInput {
    #[must_use]
    pub fn normalize(&self) -> TorsionSpring {
        use defaults::torsion as def;
        let family = SpringFamily::Torsion;

        let wire_diameter = given(self.wire_diameter)
            .unwrap_or_else(|| fallback(family, "wireDiameter", def::WIRE_DIAMETER));
        let mean_diameter = given(self.mean_diameter)
            .or_else(|| {
                positive(self.outer_diameter)
                    .map(|od| derived(family, "meanDiameter", od - wire_diameter))
            })
            .unwrap_or_else(|| fallback(family, "meanDiameter", def::MEAN_DIAMETER));
        let active_coils = given(self.active_coils)
            .unwrap_or_else(|| fallback(family, "activeCoils", def::ACTIVE_COILS));
        let body_length = given(self.body_length).unwrap_or_else(|| {
            derived(
                family,
                "bodyLength",
                active_coils * wire_diameter * def::BODY_LENGTH_FACTOR,
            )
        });
        let free_angle_deg = given(self.free_angle_deg)
            .unwrap_or_else(|| fallback(family, "freeAngleDeg", def::FREE_ANGLE_DEG));

        TorsionSpring {
            wire_diameter,
            mean_diameter,
            active_coils,
            body_length,
            leg_length1: given(self.leg_length1)
                .unwrap_or_else(|| fallback(family, "legLength1", def::LEG_LENGTH)),
            leg_length2: given(self.leg_length2)
                .unwrap_or_else(|| fallback(family, "legLength2", def::LEG_LENGTH)),
            winding_direction: parse_or(
                family,
                "windingDirection",
                self.winding_direction.as_deref(),
                Handedness::parse,
                Handedness::Right,
            ),
            free_angle_deg,
            working_angle_deg: given(self.working_angle_deg).unwrap_or(free_angle_deg),
            leg_style: parse_or(
                family,
                "legStyle",
                self.leg_style.as_deref(),
                LegStyle::parse,
                LegStyle::Tangential,
            ),
        }
    }
}

impl ConicalInput {
    #[must_use]
    pub fn normalize(&self) -> ConicalSpring {
        use defaults::conical as def;
        let family = SpringFamily::Conical;

        let wire_diameter = given(self.wire_diameter)
            .unwrap_or_else(|| fallback(family, "wireDiameter", def::WIRE_DIAMETER));
        let mut large = given(self.large_outer_diameter)
            .unwrap_or_else(|| fallback(family, "largeOuterDiameter", def::LARGE_OUTER_DIAMETER));
        let mut small = given(self.small_outer_diameter)
            .unwrap_or_else(|| fallback(family, "smallOuterDiameter", def::SMALL_OUTER_DIAMETER));
        if small > large {
            log::warn!("{family}: smallOuterDiameter {small} exceeds largeOuterDiameter {large}, swapped");
            std::mem::swap(&mut small, &mut large);
        }
        let active_coils = given(self.active_coils)
            .unwrap_or_else(|| fallback(family, "activeCoils", def::ACTIVE_COILS));
        let mut total_coils = given(self.total_coils)
            .unwrap_or_else(|| derived(family, "totalCoils", active_coils));
        if total_coils < active_coils {
            log::warn!(
                "{family}: totalCoils {total_coils} below activeCoils {active_coils}, raised to match"
            );
            total_coils = active_coils;
        }

        ConicalSpring {
            wire_diameter,
            large_outer_diameter: large,
            small_outer_diameter: small,
            active_coils,
            total_coils,
            free_length: given(self.free_length)
                .unwrap_or_else(|| fallback(family, "freeLength", def::FREE_LENGTH)),
            current_deflection: non_negative(self.current_deflection).unwrap_or(0.0),
            end_type: parse_or(
                family,
                "endType",
                self.end_type.as_deref(),
                EndType::parse,
                EndType::ClosedGround,
            ),
            handedness: parse_or(
                family,
                "handedness",
                self.handedness.as_deref(),
                Handedness::parse,
                Handedness::Right,
            ),
        }
    }
}

impl ArcInput {
    #[must_use]
    pub fn normalize(&self) -> ArcSpring {
        use defaults::arc as def;
        let family = SpringFamily::Arc;

        let mean_diameter = given(self.mean_diameter)
            .unwrap_or_else(|| fallback(family, "D", def::MEAN_DIAMETER));
        let blend = given(self.blend).unwrap_or(def::BLEND_K);
        let blend_k = blend.clamp(0.0, 1.0);
        if blend_k != blend {
            log::warn!("{family}: k {blend} outside [0, 1], clamped to {blend_k}");
        }

        ArcSpring {
            wire_diameter: given(self.wire_diameter)
                .unwrap_or_else(|| fallback(family, "d", def::WIRE_DIAMETER)),
            mean_diameter,
            active_coils: given(self.active_coils)
                .unwrap_or_else(|| fallback(family, "n", def::ACTIVE_COILS)),
            arc_radius: given(self.arc_radius)
                .unwrap_or_else(|| fallback(family, "r", def::ARC_RADIUS)),
            alpha_deg: given(self.alpha_deg)
                .unwrap_or_else(|| fallback(family, "alphaDeg", def::ALPHA_DEG)),
            profile: parse_or(
                family,
                "profile",
                self.profile.as_deref(),
                DiameterProfile::parse,
                DiameterProfile::Constant,
            ),
            dead_coils_start: given(self.dead_coils_start).unwrap_or(def::DEAD_COILS),
            dead_coils_end: given(self.dead_coils_end).unwrap_or(def::DEAD_COILS),
            blend_k,
            phase_deg: given(self.phase_deg).unwrap_or(0.0),
            end_mean_diameter: given(self.end_mean_diameter).unwrap_or(mean_diameter),
            mid_mean_diameter: given(self.mid_mean_diameter).unwrap_or(mean_diameter),
            tilt_deg: given(self.tilt_deg).unwrap_or(0.0),
            lean_deg: given(self.lean_deg).unwrap_or(0.0),
        }
    }
}

impl SpiralTorsionInput {
    #[must_use]
    pub fn normalize(&self) -> SpiralTorsionSpring {
        use defaults::spiral_torsion as def;
        let family = SpringFamily::SpiralTorsion;

        let inner_diameter = given(self.inner_diameter)
            .unwrap_or_else(|| fallback(family, "innerDiameter", def::INNER_DIAMETER));
        let outer_diameter = given(self.outer_diameter)
            .unwrap_or_else(|| fallback(family, "outerDiameter", def::OUTER_DIAMETER));
        let turns = given(self.turns)
            .or_else(|| positive(self.active_coils).map(|na| derived(family, "turns", na)))
            .unwrap_or_else(|| fallback(family, "turns", def::TURNS));

        SpiralTorsionSpring {
            inner_diameter,
            outer_diameter,
            turns,
            strip_width: given(self.strip_width)
                .unwrap_or_else(|| fallback(family, "stripWidth", def::STRIP_WIDTH)),
            strip_thickness: given(self.strip_thickness)
                .unwrap_or_else(|| fallback(family, "stripThickness", def::STRIP_THICKNESS)),
            handedness: parse_or(
                family,
                "handedness",
                self.handedness.as_deref(),
                Handedness::parse,
                Handedness::Right,
            ),
            // The inner leg crosses the axis and overshoots it.
            inner_leg_length: given(self.inner_leg_length).unwrap_or_else(|| {
                derived(
                    family,
                    "innerLegLength",
                    inner_diameter * 0.5 * (1.0 + def::INNER_OVERSHOOT_SHARE),
                )
            }),
            outer_leg_length: given(self.outer_leg_length).unwrap_or_else(|| {
                derived(family, "outerLegLength", outer_diameter * def::OUTER_LEG_SHARE)
            }),
            side_length: given(self.side_length)
                .unwrap_or_else(|| derived(family, "sideLength", outer_diameter * def::SIDE_SHARE)),
            top_length: given(self.top_length)
                .unwrap_or_else(|| derived(family, "topLength", outer_diameter * def::TOP_SHARE)),
        }
    }
}

impl WaveInput {
    #[must_use]
    pub fn normalize(&self) -> WaveSpring {
        use defaults::wave as def;
        let family = SpringFamily::Wave;

        let inner_diameter = given(self.inner_diameter)
            .unwrap_or_else(|| fallback(family, "innerDiameter", def::INNER_DIAMETER));
        let outer_diameter = given(self.outer_diameter)
            .unwrap_or_else(|| fallback(family, "outerDiameter", def::OUTER_DIAMETER));

        WaveSpring {
            inner_diameter,
            outer_diameter,
            thickness: given(self.thickness)
                .unwrap_or_else(|| fallback(family, "thickness", def::THICKNESS)),
            width: given(self.width).unwrap_or_else(|| {
                derived(family, "width", (outer_diameter - inner_diameter) * 0.5)
            }),
            waves_per_turn: given(self.waves_per_turn)
                .unwrap_or_else(|| fallback(family, "wavesPerTurn", def::WAVES_PER_TURN)),
            turns: given(self.turns).unwrap_or(def::TURNS),
            free_height: given(self.free_height)
                .unwrap_or_else(|| fallback(family, "freeHeight", def::FREE_HEIGHT)),
        }
    }
}
