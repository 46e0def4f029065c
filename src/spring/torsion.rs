//! Torsion springs: helical body with a straight leg at each end.
//!
//! Winding the legs from the free angle to the working angle adds
//! `(free − working)/360` turns to the body. Legs stay level with the body
//! ends and leave either along the projected coil tangent or radially.

use crate::geom::{Curve3, Line3, Point3, Tolerance, Vec3, tessellate_curve_uniform};

use super::centerline::{CrossSection, PathBuilder, SectionKind, SpringCenterline};
use super::error::SpringError;
use super::helix::{Helix, RadiusProfile};
use super::options::GenerationOptions;
use super::params::{LegStyle, NormalizedSpring, SpringFamily, TorsionSpring};

const FAMILY: SpringFamily = SpringFamily::Torsion;

/// Segments per straight leg.
pub const LEG_SEGMENTS: usize = 6;

fn validate(spring: &TorsionSpring) -> Result<(), SpringError> {
    if !(spring.wire_diameter > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "wireDiameter", "must be positive"));
    }
    if !(spring.mean_radius() > Tolerance::NORMALIZE.eps) {
        return Err(SpringError::degenerate(FAMILY, "meanDiameter", "must be positive"));
    }
    if !(spring.active_coils > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "activeCoils", "must be positive"));
    }
    if !(spring.loaded_turns() > 0.0) {
        return Err(SpringError::degenerate(
            FAMILY,
            "workingAngleDeg",
            format!("wind-up leaves {} body turns", spring.loaded_turns()),
        ));
    }
    if !(spring.body_length > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "bodyLength", "must be positive"));
    }
    if !(spring.leg_length1 >= 0.0) {
        return Err(SpringError::degenerate(FAMILY, "legLength1", "must not be negative"));
    }
    if !(spring.leg_length2 >= 0.0) {
        return Err(SpringError::degenerate(FAMILY, "legLength2", "must not be negative"));
    }
    Ok(())
}

/// Horizontal leg direction at a body end. `tangent` points away from the body.
fn leg_direction(style: LegStyle, end: Point3, tangent: Vec3) -> Vec3 {
    let radial = end.to_vec3().flatten_xy().normalized_or(Vec3::X);
    match style {
        LegStyle::Tangential => tangent.flatten_xy().normalized_or(radial),
        LegStyle::Radial => radial,
    }
}

fn leg_points(start: Point3, direction: Vec3, length: f64) -> Vec<Point3> {
    if length <= 0.0 {
        return vec![start];
    }
    tessellate_curve_uniform(&Line3::from_ray(start, direction, length), LEG_SEGMENTS)
}

pub fn generate_torsion(
    spring: &TorsionSpring,
    options: &GenerationOptions,
) -> Result<SpringCenterline, SpringError> {
    validate(spring)?;

    let turns = spring.loaded_turns();
    let length = spring.body_length;
    let helix = Helix::new(
        RadiusProfile::Constant(spring.mean_radius()),
        move |t: f64| t * length,
        turns,
        spring.winding_direction,
    );
    let samples = options.checked_sample_count(FAMILY, "activeCoils", turns)?;
    let body = helix.sample(samples);

    let start = helix.point_at(0.0);
    let end = helix.point_at(1.0);
    let leg1 = leg_points(
        start,
        leg_direction(spring.leg_style, start, -helix.end_tangent(true)),
        spring.leg_length1,
    );
    let leg2 = leg_points(
        end,
        leg_direction(spring.leg_style, end, helix.end_tangent(false)),
        spring.leg_length2,
    );
    log::debug!(
        "{FAMILY}: {turns:.4} loaded turns, {samples} samples, {:?} legs",
        spring.leg_style
    );

    let mut builder = PathBuilder::new();
    builder.push(SectionKind::StartLeg, leg1.into_iter().rev());
    builder.push(SectionKind::Body, body);
    builder.push(SectionKind::EndLeg, leg2);
    let path = builder.finish();

    path.validate_distinct(FAMILY)?;
    path.validate_monotonic_z(FAMILY, None)?;

    Ok(SpringCenterline {
        family: FAMILY,
        spring: NormalizedSpring::Torsion(*spring),
        path,
        cross_section: CrossSection::Circular {
            wire_diameter: spring.wire_diameter,
        },
        grinding: None,
        turn_counts: None,
    })
}
