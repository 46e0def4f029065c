//! Spiral torsion springs: a flat Archimedean spiral of strip material.
//!
//! `r(θ) = r_i + aθ` with `a = (r_o − r_i)/(2π·turns)` in the plane z = 0;
//! the strip width runs along Z. The inner end bends toward the axis and
//! runs straight across it to engage an arbor slot. The outer end carries a
//! leg, a 90° bend outward, a side run, a second bend and a top run. Every
//! feature starts on the tangent of the one before it.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::geom::{Arc3, Curve3, Line3, Point3, Tolerance, Vec3, tessellate_curve_uniform};

use super::centerline::{CrossSection, PathBuilder, SectionKind, SpringCenterline};
use super::error::SpringError;
use super::options::GenerationOptions;
use super::params::{NormalizedSpring, SpiralTorsionSpring, SpringFamily};

const FAMILY: SpringFamily = SpringFamily::SpiralTorsion;

pub const ARC_SEGMENTS: usize = 8;
pub const STRAIGHT_SEGMENTS: usize = 6;
/// End bends are this many strip thicknesses in radius.
pub const BEND_RADIUS_FACTOR: f64 = 2.0;

const INNER_ITERATIONS: usize = 32;

/// The spiral body as a curve over `t ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchimedeanSpiral {
    pub inner_radius: f64,
    /// Radial growth per radian.
    pub growth: f64,
    pub total_angle: f64,
    /// +1 counter-clockwise, -1 clockwise.
    pub sign: f64,
}

impl ArchimedeanSpiral {
    #[must_use]
    pub fn new(spring: &SpiralTorsionSpring) -> Self {
        let inner_radius = spring.inner_diameter * 0.5;
        let outer_radius = spring.outer_diameter * 0.5;
        let total_angle = TAU * spring.turns;
        Self {
            inner_radius,
            growth: (outer_radius - inner_radius) / total_angle,
            total_angle,
            sign: spring.handedness.sign(),
        }
    }

    /// Radial distance between neighbouring turns.
    #[must_use]
    pub fn radial_pitch(&self) -> f64 {
        TAU * self.growth
    }

    #[must_use]
    pub fn radius_at(&self, t: f64) -> f64 {
        self.inner_radius + self.growth * self.total_angle * t
    }
}

impl Curve3 for ArchimedeanSpiral {
    fn point_at(&self, t: f64) -> Point3 {
        let (s, c) = (self.sign * self.total_angle * t).sin_cos();
        let r = self.radius_at(t);
        Point3::new(r * c, r * s, 0.0)
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        let (s, c) = (self.sign * self.total_angle * t).sin_cos();
        let r = self.radius_at(t);
        let radial = Vec3::new(c, s, 0.0) * self.growth;
        let around = Vec3::new(-s, c, 0.0) * (r * self.sign);
        (radial + around) * self.total_angle
    }
}

fn validate(spring: &SpiralTorsionSpring) -> Result<(), SpringError> {
    if !(spring.inner_diameter * 0.5 > Tolerance::NORMALIZE.eps) {
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
    if !(spring.turns > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "turns", "must be positive"));
    }
    if !(spring.strip_width > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "stripWidth", "must be positive"));
    }
    if !(spring.strip_thickness > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "stripThickness", "must be positive"));
    }
    let pitch = ArchimedeanSpiral::new(spring).radial_pitch();
    if pitch <= spring.strip_thickness {
        return Err(SpringError::degenerate(
            FAMILY,
            "turns",
            format!(
                "radial pitch {pitch:.4} does not clear strip thickness {}",
                spring.strip_thickness
            ),
        ));
    }
    for (field, length) in [
        ("innerLegLength", spring.inner_leg_length),
        ("outerLegLength", spring.outer_leg_length),
        ("sideLength", spring.side_length),
        ("topLength", spring.top_length),
    ] {
        if !(length >= 0.0) {
            return Err(SpringError::degenerate(FAMILY, field, "must not be negative"));
        }
    }
    Ok(())
}

/// Appends `curve` to `points`, skipping its first sample.
fn extend_with(points: &mut Vec<Point3>, curve: &impl Curve3, segments: usize) {
    points.extend(tessellate_curve_uniform(curve, segments).into_iter().skip(1));
}

/// Appends a straight run and returns its end, or `start` for a zero length.
fn extend_straight(points: &mut Vec<Point3>, start: Point3, direction: Vec3, length: f64) -> Point3 {
    if length <= Tolerance::ZERO_LENGTH.eps {
        return start;
    }
    let line = Line3::from_ray(start, direction, length);
    extend_with(points, &line, STRAIGHT_SEGMENTS);
    line.end
}

/// Arc from the spiral start toward the axis, swept until its end tangent
/// points at the axis.
fn inner_transition(start: Point3, tangent: Vec3, bend_radius: f64) -> Arc3 {
    let toward_axis = -start.to_vec3();
    let aim = |from: Point3| (-from.to_vec3()).normalized_or(toward_axis.normalized_or(-Vec3::X));
    let mut sweep = tangent.dot(aim(start)).clamp(-1.0, 1.0).acos();
    let mut arc = Arc3::tangent_continuation(start, tangent, toward_axis, bend_radius, sweep);
    for _ in 0..INNER_ITERATIONS {
        let next = tangent.dot(aim(arc.point_at(1.0))).clamp(-1.0, 1.0).acos();
        if (next - sweep).abs() <= Tolerance::DEFAULT.eps {
            break;
        }
        sweep = next;
        arc = Arc3::tangent_continuation(start, tangent, toward_axis, bend_radius, sweep);
    }
    arc
}

/// Inner end feature, ordered from the spiral start outward.
fn inner_end(spiral: &ArchimedeanSpiral, spring: &SpiralTorsionSpring, bend_radius: f64) -> Vec<Point3> {
    let start = spiral.point_at(0.0);
    let backward = -spiral.tangent_at(0.0).unwrap_or(Vec3::Y * spiral.sign);
    let arc = inner_transition(start, backward, bend_radius);

    let mut points = vec![start];
    extend_with(&mut points, &arc, ARC_SEGMENTS);
    let leg_dir = arc.tangent_at(1.0).unwrap_or(backward);
    extend_straight(&mut points, arc.point_at(1.0), leg_dir, spring.inner_leg_length);
    points
}

/// Outer end feature, ordered from the spiral end outward.
fn outer_end(spiral: &ArchimedeanSpiral, spring: &SpiralTorsionSpring, bend_radius: f64) -> Vec<Point3> {
    let start = spiral.point_at(1.0);
    let mut direction = spiral.tangent_at(1.0).unwrap_or(Vec3::Y * spiral.sign);
    let mut points = vec![start];
    let mut cursor = extend_straight(&mut points, start, direction, spring.outer_leg_length);

    for length in [spring.side_length, spring.top_length] {
        // Turning against the winding sense bends away from the coils.
        let outward = direction.rotated_about(Vec3::Z, -90.0 * spiral.sign);
        let bend = Arc3::tangent_continuation(cursor, direction, outward, bend_radius, FRAC_PI_2);
        extend_with(&mut points, &bend, ARC_SEGMENTS);
        cursor = bend.point_at(1.0);
        direction = bend.tangent_at(1.0).unwrap_or(outward);
        cursor = extend_straight(&mut points, cursor, direction, length);
    }
    points
}

pub fn generate_spiral_torsion(
    spring: &SpiralTorsionSpring,
    options: &GenerationOptions,
) -> Result<SpringCenterline, SpringError> {
    validate(spring)?;
    let spiral = ArchimedeanSpiral::new(spring);
    let bend_radius = BEND_RADIUS_FACTOR * spring.strip_thickness;
    let samples = options.checked_sample_count(FAMILY, "turns", spring.turns)?;
    log::debug!(
        "{FAMILY}: {samples} samples, radial pitch {:.4}",
        spiral.radial_pitch()
    );

    let mut builder = PathBuilder::new();
    builder.push(
        SectionKind::InnerEnd,
        inner_end(&spiral, spring, bend_radius).into_iter().rev(),
    );
    builder.push(SectionKind::Body, tessellate_curve_uniform(&spiral, samples));
    builder.push(SectionKind::OuterEnd, outer_end(&spiral, spring, bend_radius));
    let path = builder.finish();
    path.validate_distinct(FAMILY)?;

    Ok(SpringCenterline {
        family: FAMILY,
        spring: NormalizedSpring::SpiralTorsion(*spring),
        path,
        cross_section: CrossSection::Rectangular {
            width: spring.strip_width,
            thickness: spring.strip_thickness,
        },
        grinding: None,
        turn_counts: None,
    })
}
