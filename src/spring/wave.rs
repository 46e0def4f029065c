//! Wave springs: a flat strip ring (or crest-to-crest stack) with a
//! sinusoidal height.
//!
//! A single turn oscillates around the mid-plane of the free height. Several
//! turns stack crest to crest, each rising `p = H0/(turns + 1)`, so the
//! envelope including the strip thickness is exactly the free height:
//!
//! ```text
//!   single:  z(θ) = t/2 + A + A·sin(nθ),             A = (H0 − t)/2
//!   stack:   z(θ) = t/2 + A + p·θ/2π + A·sin(nθ),    A = (p − t)/2
//! ```

use std::f64::consts::TAU;

use serde::Serialize;

use crate::geom::{Curve3, Point3, Tolerance, tessellate_curve_uniform};

use super::centerline::{CenterlinePath, CrossSection, SpringCenterline};
use super::error::SpringError;
use super::options::GenerationOptions;
use super::params::{NormalizedSpring, SpringFamily, WaveSpring};

const FAMILY: SpringFamily = SpringFamily::Wave;

/// Height law of a wave spring over the winding angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveProfile {
    pub radius: f64,
    pub thickness: f64,
    pub amplitude: f64,
    /// Rise per turn; zero for a single ring.
    pub rise_per_turn: f64,
    pub waves_per_turn: f64,
    pub turns: f64,
}

impl WaveProfile {
    pub fn new(spring: &WaveSpring) -> Result<Self, SpringError> {
        validate(spring)?;
        let thickness = spring.thickness;
        let (amplitude, rise_per_turn) = if spring.turns <= 1.0 {
            ((spring.free_height - thickness) * 0.5, 0.0)
        } else {
            let rise = spring.free_height / (spring.turns + 1.0);
            ((rise - thickness) * 0.5, rise)
        };
        if amplitude <= 0.0 {
            return Err(SpringError::degenerate(
                FAMILY,
                "freeHeight",
                format!(
                    "{} leaves no wave amplitude for thickness {thickness} over {} turns",
                    spring.free_height, spring.turns
                ),
            ));
        }
        Ok(Self {
            radius: spring.mean_radius(),
            thickness,
            amplitude,
            rise_per_turn,
            waves_per_turn: spring.waves_per_turn,
            turns: spring.turns,
        })
    }

    #[must_use]
    pub fn total_angle(&self) -> f64 {
        TAU * self.turns
    }

    /// Stacking height without the oscillation; never decreases.
    #[must_use]
    pub fn base_height(&self, theta: f64) -> f64 {
        self.thickness * 0.5 + self.amplitude + self.rise_per_turn * theta / TAU
    }

    #[must_use]
    pub fn height(&self, theta: f64) -> f64 {
        self.base_height(theta) + self.amplitude * (self.waves_per_turn * theta).sin()
    }

    /// Point at `theta` on a ring of the given radius.
    #[must_use]
    pub fn point_on_ring(&self, radius: f64, theta: f64) -> Point3 {
        let (s, c) = theta.sin_cos();
        Point3::new(radius * c, radius * s, self.height(theta))
    }

    /// `max(min_samples, ceil(waves · segments_per_wave))`.
    #[must_use]
    pub fn sample_count(&self, options: &GenerationOptions) -> usize {
        let waves = (self.waves_per_turn * self.turns).abs();
        let count = (waves * options.segments_per_wave as f64).ceil();
        if count.is_finite() && count > options.min_samples as f64 {
            count as usize
        } else {
            options.min_samples
        }
    }

    /// [`Self::sample_count`], refused on `turns` above `max_samples`.
    pub fn checked_sample_count(&self, options: &GenerationOptions) -> Result<usize, SpringError> {
        let waves = (self.waves_per_turn * self.turns).abs();
        options.check_budget(FAMILY, "turns", waves * options.segments_per_wave as f64)?;
        Ok(self.sample_count(options))
    }
}

impl Curve3 for WaveProfile {
    fn point_at(&self, t: f64) -> Point3 {
        self.point_on_ring(self.radius, self.total_angle() * t)
    }
}

fn validate(spring: &WaveSpring) -> Result<(), SpringError> {
    if !(spring.inner_diameter > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "innerDiameter", "must be positive"));
    }
    if !(spring.outer_diameter > spring.inner_diameter) {
        return Err(SpringError::degenerate(
            FAMILY,
            "outerDiameter",
            format!(
                "{} must exceed innerDiameter {}",
                spring.outer_diameter, spring.inner_diameter
            ),
        ));
    }
    if !(spring.thickness > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "thickness", "must be positive"));
    }
    if !(spring.width > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "width", "must be positive"));
    }
    if !(spring.waves_per_turn > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "wavesPerTurn", "must be positive"));
    }
    if !(spring.turns > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "turns", "must be positive"));
    }
    if !(spring.free_height > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "freeHeight", "must be positive"));
    }
    Ok(())
}

/// Surface grid for shell meshing: `width_segments + 1` rings from the inner
/// to the outer edge, each sampled like the centerline.
pub fn wave_shell_grid(
    spring: &WaveSpring,
    options: &GenerationOptions,
    width_segments: usize,
) -> Result<Vec<Vec<Point3>>, SpringError> {
    let profile = WaveProfile::new(spring)?;
    let samples = profile.checked_sample_count(options)?;
    let width_segments = width_segments.max(1);
    options.check_budget(
        FAMILY,
        "turns",
        (width_segments as f64 + 1.0) * (samples as f64 + 1.0),
    )?;
    let inner = spring.inner_diameter * 0.5;
    let outer = spring.outer_diameter * 0.5;
    let total = profile.total_angle();

    Ok((0..=width_segments)
        .map(|row| {
            let radius = inner + (outer - inner) * (row as f64 / width_segments as f64);
            (0..=samples)
                .map(|i| profile.point_on_ring(radius, total * (i as f64 / samples as f64)))
                .collect()
        })
        .collect())
}

pub fn generate_wave(
    spring: &WaveSpring,
    options: &GenerationOptions,
) -> Result<SpringCenterline, SpringError> {
    let profile = WaveProfile::new(spring)?;
    let samples = profile.checked_sample_count(options)?;
    log::debug!(
        "{FAMILY}: amplitude {:.4}, rise {:.4}, {samples} samples",
        profile.amplitude,
        profile.rise_per_turn
    );

    let mut points = tessellate_curve_uniform(&profile, samples);
    // A closed single ring would repeat its first point.
    if profile.rise_per_turn == 0.0 && (profile.turns - 1.0).abs() <= Tolerance::DEFAULT.eps {
        let closes = match (points.first(), points.last()) {
            (Some(first), Some(last)) => Tolerance::LOOSE.approx_eq_point3(*first, *last),
            _ => false,
        };
        if closes {
            points.pop();
        }
    }

    let path = CenterlinePath::from_points(points);
    path.validate_distinct(FAMILY)?;

    Ok(SpringCenterline {
        family: FAMILY,
        spring: NormalizedSpring::Wave(*spring),
        path,
        cross_section: CrossSection::Rectangular {
            width: spring.width,
            thickness: spring.thickness,
        },
        grinding: None,
        turn_counts: None,
    })
}
