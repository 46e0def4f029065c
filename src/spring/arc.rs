//! Arc (bow) springs: a helix wound around a circular backbone.
//!
//! The backbone lies in the XY plane, starts at `(r, 0, 0)` and sweeps
//! `alphaDeg` counter-clockwise. Its frames carry the tangent along the arc,
//! the normal toward the arc center and the binormal along +Z. An optional
//! tilt rotates the whole backbone about X; lean rolls every frame about its
//! own tangent.
//!
//! Arc length is mapped to a turn count by [`AnchorMapping`], which lets
//! tightly packed dead zones and the active zone share one
//! parameterization:
//!
//! ```text
//!   T
//!   ▲                              ╱ total
//!   │                     ╱───────
//!   │            ╱───────           active ramp
//!   │      ╱────
//!   │   ╱  dead start
//!   └──┴────┴───────────────────┴────► L
//!      0    Ls                  Lb  Ltot
//! ```

use std::f64::consts::TAU;

use serde::Serialize;

use crate::geom::{Frame, Point3, Tolerance, Vec3, cumulative_lengths};

use super::centerline::{CenterlinePath, CrossSection, SpringCenterline};
use super::error::SpringError;
use super::helix::RadiusProfile;
use super::options::GenerationOptions;
use super::params::{ArcSpring, DiameterProfile, NormalizedSpring, SpringFamily};

const FAMILY: SpringFamily = SpringFamily::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// Backbone
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcBackbone {
    pub frames: Vec<Frame>,
    /// Accumulated chord length at every frame.
    pub arc_lengths: Vec<f64>,
}

impl ArcBackbone {
    /// `samples + 1` frames along an arc of `radius` spanning `alpha_deg`.
    #[must_use]
    pub fn new(radius: f64, alpha_deg: f64, tilt_deg: f64, lean_deg: f64, samples: usize) -> Self {
        let samples = samples.max(1);
        let alpha = alpha_deg.to_radians();
        let frames: Vec<Frame> = (0..=samples)
            .map(|i| {
                let phi = alpha * (i as f64 / samples as f64);
                let (s, c) = phi.sin_cos();
                let mut frame = Frame::from_tangent_normal(
                    Point3::new(radius * c, radius * s, 0.0),
                    Vec3::new(-s, c, 0.0),
                    Vec3::new(-c, -s, 0.0),
                );
                if tilt_deg != 0.0 {
                    frame = frame.rotated_about(Point3::ORIGIN, Vec3::X, tilt_deg);
                }
                if lean_deg != 0.0 {
                    frame = frame.rolled(lean_deg);
                }
                frame
            })
            .collect();
        let positions: Vec<Point3> = frames.iter().map(|frame| frame.position).collect();
        Self {
            arc_lengths: cumulative_lengths(&positions),
            frames,
        }
    }

    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Blended anchor
// ─────────────────────────────────────────────────────────────────────────────

/// Arc length → fractional turn count.
///
/// Each end anchor blends a uniform share of the length with the length the
/// dead coils would take when solid; `blend_k = 0` is uniform, `1` solid.
/// The two anchors together never exceed `cap_ratio · l_total`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorMapping {
    pub l_total: f64,
    pub anchor_ls: f64,
    pub anchor_le: f64,
    pub dead_start: f64,
    pub active: f64,
    pub dead_end: f64,
    /// The anchors were scaled down to respect the cap.
    pub capped: bool,
}

impl AnchorMapping {
    #[must_use]
    pub fn new(
        l_total: f64,
        wire_diameter: f64,
        dead_start: f64,
        active: f64,
        dead_end: f64,
        blend_k: f64,
        cap_ratio: f64,
    ) -> Self {
        let total = dead_start + active + dead_end;
        let k = blend_k.clamp(0.0, 1.0);
        let anchor = |dead: f64| {
            let uniform = if total > 0.0 { dead / total * l_total } else { 0.0 };
            let solid = dead * wire_diameter;
            uniform * (1.0 - k) + solid * k
        };
        let mut anchor_ls = anchor(dead_start);
        let mut anchor_le = anchor(dead_end);

        let cap = cap_ratio * l_total;
        let sum = anchor_ls + anchor_le;
        let capped = sum > cap;
        if capped {
            let scale = cap / sum;
            anchor_ls *= scale;
            anchor_le *= scale;
            log::debug!("arc: anchors {sum:.4} exceed cap {cap:.4}, scaled by {scale:.4}");
        }

        Self {
            l_total,
            anchor_ls,
            anchor_le,
            dead_start,
            active,
            dead_end,
            capped,
        }
    }

    #[must_use]
    pub fn total_coils(&self) -> f64 {
        self.dead_start + self.active + self.dead_end
    }

    /// Start of the end anchor, `Lb = Ltot − Le`.
    #[must_use]
    pub fn active_end(&self) -> f64 {
        self.l_total - self.anchor_le
    }

    /// Three linear ramps: dead start, active, dead end.
    #[must_use]
    pub fn turn_count(&self, l: f64) -> f64 {
        let lb = self.active_end();
        if l <= self.anchor_ls {
            ramp(0.0, self.dead_start, l, self.anchor_ls)
        } else if l >= lb {
            ramp(
                self.dead_start + self.active,
                self.dead_end,
                l - lb,
                self.anchor_le,
            )
        } else {
            ramp(self.dead_start, self.active, l - self.anchor_ls, lb - self.anchor_ls)
        }
    }

    /// Turn count per length, first and last pinned to `0` and the total.
    #[must_use]
    pub fn turn_counts(&self, lengths: &[f64]) -> Vec<f64> {
        let mut counts: Vec<f64> = lengths.iter().map(|&l| self.turn_count(l)).collect();
        if let Some(first) = counts.first_mut() {
            *first = 0.0;
        }
        if counts.len() > 1 {
            if let Some(last) = counts.last_mut() {
                *last = self.total_coils();
            }
        }
        counts
    }
}

/// `base + rise · along/span`, the full rise for an empty span.
fn ramp(base: f64, rise: f64, along: f64, span: f64) -> f64 {
    if span > Tolerance::ZERO_LENGTH.eps {
        base + rise * (along / span).clamp(0.0, 1.0)
    } else {
        base + rise
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Generator
// ─────────────────────────────────────────────────────────────────────────────

/// Coil radius over the normalized turn fraction.
#[must_use]
pub fn coil_radius_profile(spring: &ArcSpring) -> RadiusProfile {
    let total = spring.total_coils();
    let (active_from, active_to) = if total > 0.0 {
        (
            spring.dead_coils_start / total,
            (spring.dead_coils_start + spring.active_coils) / total,
        )
    } else {
        (0.0, 1.0)
    };
    RadiusProfile::Zoned {
        start: spring.mean_diameter * 0.5,
        mid: spring.mid_mean_diameter * 0.5,
        end: spring.end_mean_diameter * 0.5,
        active_from,
        active_to,
        shape: spring.profile,
    }
}

fn validate(spring: &ArcSpring) -> Result<(), SpringError> {
    if !(spring.wire_diameter > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "d", "must be positive"));
    }
    if !(spring.mean_diameter * 0.5 > Tolerance::NORMALIZE.eps) {
        return Err(SpringError::degenerate(FAMILY, "D", "must be positive"));
    }
    if !(spring.active_coils > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "n", "must be positive"));
    }
    if !(spring.arc_radius > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "r", "must be positive"));
    }
    if !(spring.alpha_deg > 0.0 && spring.alpha_deg <= 360.0) {
        return Err(SpringError::degenerate(
            FAMILY,
            "alphaDeg",
            format!("{} is outside (0, 360]", spring.alpha_deg),
        ));
    }
    if !(spring.dead_coils_start >= 0.0) {
        return Err(SpringError::degenerate(FAMILY, "deadCoilsStart", "must not be negative"));
    }
    if !(spring.dead_coils_end >= 0.0) {
        return Err(SpringError::degenerate(FAMILY, "deadCoilsEnd", "must not be negative"));
    }
    match spring.profile {
        DiameterProfile::Conical if !(spring.end_mean_diameter > 0.0) => {
            return Err(SpringError::degenerate(FAMILY, "dEnd", "must be positive"));
        }
        DiameterProfile::Barrel if !(spring.mid_mean_diameter > 0.0) => {
            return Err(SpringError::degenerate(FAMILY, "dMid", "must be positive"));
        }
        _ => {}
    }
    let largest = match spring.profile {
        DiameterProfile::Constant => spring.mean_diameter,
        DiameterProfile::Conical => spring.mean_diameter.max(spring.end_mean_diameter),
        DiameterProfile::Barrel => spring
            .mean_diameter
            .max(spring.end_mean_diameter)
            .max(spring.mid_mean_diameter),
    };
    if largest * 0.5 >= spring.arc_radius {
        return Err(SpringError::degenerate(
            FAMILY,
            "D",
            format!(
                "coil radius {} reaches the arc center (r = {})",
                largest * 0.5,
                spring.arc_radius
            ),
        ));
    }
    Ok(())
}

/// Backbone samples such that every zone of the anchor mapping gets at least
/// `samples_per_turn` points per turn.
///
/// The backbone is sampled uniformly in length while a short dead anchor packs
/// whole turns into a few samples, so the count follows the densest zone. The
/// anchors are estimated on the analytic arc length `r · α`; the trailing `+ 1`
/// absorbs the chord shortfall of the sampled backbone.
fn backbone_samples(
    spring: &ArcSpring,
    options: &GenerationOptions,
) -> Result<usize, SpringError> {
    let base = options.checked_sample_count(FAMILY, "n", spring.total_coils())?;
    let estimate = AnchorMapping::new(
        spring.arc_radius * spring.alpha_deg.to_radians(),
        spring.wire_diameter,
        spring.dead_coils_start,
        spring.active_coils,
        spring.dead_coils_end,
        spring.blend_k,
        options.cap_ratio,
    );
    let per_turn = options.samples_per_turn as f64;
    let zone = |turns: f64, length: f64| {
        if turns > 0.0 && length > 1e-12 {
            per_turn * turns * estimate.l_total / length
        } else {
            0.0
        }
    };
    let densest = zone(spring.dead_coils_start, estimate.anchor_ls)
        .max(zone(
            spring.active_coils,
            estimate.active_end() - estimate.anchor_ls,
        ))
        .max(zone(spring.dead_coils_end, estimate.anchor_le));
    options.check_budget(FAMILY, "n", densest + 1.0)?;
    Ok(base.max(densest.ceil() as usize + 1))
}

/// Backbone and anchor mapping for a spring, sampled per `options`.
pub fn arc_layout(
    spring: &ArcSpring,
    options: &GenerationOptions,
) -> Result<(ArcBackbone, AnchorMapping), SpringError> {
    validate(spring)?;
    let samples = backbone_samples(spring, options)?;
    log::debug!("arc: {samples} backbone samples");
    let backbone = ArcBackbone::new(
        spring.arc_radius,
        spring.alpha_deg,
        spring.tilt_deg,
        spring.lean_deg,
        samples,
    );
    let mapping = AnchorMapping::new(
        backbone.total_length(),
        spring.wire_diameter,
        spring.dead_coils_start,
        spring.active_coils,
        spring.dead_coils_end,
        spring.blend_k,
        options.cap_ratio,
    );
    Ok((backbone, mapping))
}

pub fn generate_arc(
    spring: &ArcSpring,
    options: &GenerationOptions,
) -> Result<SpringCenterline, SpringError> {
    let (backbone, mapping) = arc_layout(spring, options)?;
    let turn_counts = mapping.turn_counts(&backbone.arc_lengths);
    let total = mapping.total_coils();
    let profile = coil_radius_profile(spring);
    let phase = spring.phase_deg.to_radians();

    let points: Vec<Point3> = backbone
        .frames
        .iter()
        .zip(&turn_counts)
        .map(|(frame, &turns)| {
            let radius = profile.radius_at(turns / total);
            frame.offset_in_plane(radius, TAU * turns + phase)
        })
        .collect();
    log::debug!(
        "{FAMILY}: {} points over {:.4} mm, anchors {:.4}/{:.4}",
        points.len(),
        mapping.l_total,
        mapping.anchor_ls,
        mapping.anchor_le
    );

    let path = CenterlinePath::from_points(points);
    path.validate_distinct(FAMILY)?;

    Ok(SpringCenterline {
        family: FAMILY,
        spring: NormalizedSpring::Arc(*spring),
        path,
        cross_section: CrossSection::Circular {
            wire_diameter: spring.wire_diameter,
        },
        grinding: None,
        turn_counts: Some(turn_counts),
    })
}
