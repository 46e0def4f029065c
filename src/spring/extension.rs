//! Extension springs: close-wound body with a hook at each end.
//!
//! The body is a constant-radius helix whose height is the free body length
//! plus the current extension. Both hooks come from the same
//! [`HookBuilder`]; the start hook is built downward from the first body
//! point and reversed so the whole path runs hook → body → hook.

use crate::geom::{Curve3, Point3, Tolerance, Vec3};

use super::centerline::{CrossSection, PathBuilder, SectionKind, SpringCenterline};
use super::error::SpringError;
use super::helix::{Helix, RadiusProfile};
use super::hook::{BodyEnd, Hook, HookBuilder};
use super::options::GenerationOptions;
use super::params::{ExtensionSpring, NormalizedSpring, SpringFamily};

const FAMILY: SpringFamily = SpringFamily::Extension;

/// Both hooks of an extension spring, each ordered from the body outward.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionHooks {
    pub start: Hook,
    pub end: Hook,
}

fn validate(spring: &ExtensionSpring) -> Result<(), SpringError> {
    if !(spring.wire_diameter > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "wireDiameter", "must be positive"));
    }
    if !(spring.mean_radius() > Tolerance::NORMALIZE.eps) {
        return Err(SpringError::degenerate(
            FAMILY,
            "outerDiameter",
            format!(
                "{} leaves no mean diameter for wire {}",
                spring.outer_diameter, spring.wire_diameter
            ),
        ));
    }
    if !(spring.active_coils > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "activeCoils", "must be positive"));
    }
    if !(spring.body_length > 0.0) {
        return Err(SpringError::degenerate(FAMILY, "bodyLength", "must be positive"));
    }
    if !(spring.current_extension >= 0.0) {
        return Err(SpringError::degenerate(
            FAMILY,
            "currentExtension",
            "must not be negative",
        ));
    }
    if spring.hook.loop_count == 0 || !(spring.hook.hook_radius_factor > 0.0) {
        return Err(SpringError::degenerate(
            FAMILY,
            "hookType",
            "hook needs at least one loop with a positive radius",
        ));
    }
    Ok(())
}

fn body_helix(spring: &ExtensionSpring) -> Helix<impl Fn(f64) -> f64> {
    let length = spring.extended_body_length();
    Helix::new(
        RadiusProfile::Constant(spring.mean_radius()),
        move |t| t * length,
        spring.active_coils,
        spring.handedness,
    )
}

/// Builds both hooks for the given body.
pub fn extension_hooks(
    spring: &ExtensionSpring,
    options: &GenerationOptions,
) -> Result<ExtensionHooks, SpringError> {
    validate(spring)?;
    let helix = body_helix(spring);
    let builder = HookBuilder::new(
        spring.hook,
        spring.wire_diameter,
        spring.mean_radius(),
        options,
    );
    let z_max = spring.extended_body_length();

    let start = builder.build(&BodyEnd {
        point: helix.point_at(0.0),
        tangent: -helix.end_tangent(true),
        axis_dir: -Vec3::Z,
        z_min: 0.0,
        z_max,
    });
    let end = builder.build(&BodyEnd {
        point: helix.point_at(1.0),
        tangent: helix.end_tangent(false),
        axis_dir: Vec3::Z,
        z_min: 0.0,
        z_max,
    });
    Ok(ExtensionHooks { start, end })
}

/// Samples hook, body and hook into one continuous centerline.
pub fn generate_extension(
    spring: &ExtensionSpring,
    options: &GenerationOptions,
) -> Result<SpringCenterline, SpringError> {
    let hooks = extension_hooks(spring, options)?;
    let helix = body_helix(spring);
    let samples = options.checked_sample_count(FAMILY, "activeCoils", spring.active_coils)?;
    let body: Vec<Point3> = helix.sample(samples);
    log::debug!(
        "{FAMILY}: {samples} body samples over {:.4} mm, {:?} hooks",
        spring.extended_body_length(),
        spring.hook.kind
    );

    let mut builder = PathBuilder::new();
    builder.push(SectionKind::StartHook, hooks.start.points.into_iter().rev());
    builder.push(SectionKind::Body, body);
    builder.push(SectionKind::EndHook, hooks.end.points);
    let path = builder.finish();

    path.validate_distinct(FAMILY)?;
    path.validate_monotonic_z(FAMILY, Some(SectionKind::Body))?;

    Ok(SpringCenterline {
        family: FAMILY,
        spring: NormalizedSpring::Extension(*spring),
        path,
        cross_section: CrossSection::Circular {
            wire_diameter: spring.wire_diameter,
        },
        grinding: None,
        turn_counts: None,
    })
}
