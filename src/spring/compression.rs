//! Compression and conical springs.
//!
//! Both are helices around +Z whose height follows a [`DeadCoilPartition`];
//! they only differ in the radius law. With [`PitchStrategy::Uniform`] the
//! height is instead spread evenly over the turns, which matches the old
//! preview renderer.

use crate::geom::Tolerance;

use super::centerline::{CenterlinePath, CrossSection, SpringCenterline};
use super::dead_coil::{DeadCoilPartition, EndGrinding};
use super::error::SpringError;
use super::helix::{Helix, RadiusProfile};
use super::options::{GenerationOptions, PitchStrategy};
use super::params::{
    CompressionSpring, ConicalSpring, EndType, Handedness, NormalizedSpring, SpringFamily,
};

/// Shared inputs of the two axial families.
struct AxialCoil {
    family: SpringFamily,
    wire_diameter: f64,
    active_coils: f64,
    total_coils: f64,
    free_length: f64,
    deflection: f64,
    end_type: EndType,
    handedness: Handedness,
    radius: RadiusProfile,
}

impl AxialCoil {
    fn partition(&self) -> Result<DeadCoilPartition, SpringError> {
        DeadCoilPartition::new(
            self.family,
            self.wire_diameter,
            self.active_coils,
            self.total_coils,
            self.free_length,
            self.deflection,
            self.end_type,
        )
    }

    fn sample(
        &self,
        options: &GenerationOptions,
    ) -> Result<(CenterlinePath, Option<EndGrinding>), SpringError> {
        let partition = self.partition()?;
        let turns = partition.total_coils;
        let samples = options.checked_sample_count(self.family, "totalCoils", turns)?;

        let points = match options.pitch_strategy {
            PitchStrategy::Partitioned => Helix::new(
                self.radius,
                |t: f64| partition.z_at_turn(t * turns),
                turns,
                self.handedness,
            )
            .sample(samples),
            PitchStrategy::Uniform => {
                let length = partition.loaded_length();
                Helix::new(self.radius, move |t: f64| t * length, turns, self.handedness)
                    .sample(samples)
            }
        };
        log::debug!(
            "{}: {samples} samples, {} dead coils per end, pitch {:.4}",
            self.family,
            partition.dead_coils_per_end,
            partition.pitch_active_compressed
        );

        let path = CenterlinePath::from_points(points);
        path.validate_distinct(self.family)?;
        path.validate_monotonic_z(self.family, None)?;

        let grinding = (self.end_type == EndType::ClosedGround).then(|| {
            let (min_z, max_z) = path.z_range();
            EndGrinding::for_span(self.wire_diameter, min_z, max_z)
        });
        Ok((path, grinding))
    }
}

fn require_radius(family: SpringFamily, field: &'static str, radius: f64) -> Result<(), SpringError> {
    if radius > Tolerance::NORMALIZE.eps {
        Ok(())
    } else {
        Err(SpringError::degenerate(
            family,
            field,
            format!("mean radius {radius} is not positive"),
        ))
    }
}

/// Height partition of a compression spring.
pub fn compression_partition(spring: &CompressionSpring) -> Result<DeadCoilPartition, SpringError> {
    compression_coil(spring).partition()
}

fn compression_coil(spring: &CompressionSpring) -> AxialCoil {
    AxialCoil {
        family: SpringFamily::Compression,
        wire_diameter: spring.wire_diameter,
        active_coils: spring.active_coils,
        total_coils: spring.total_coils,
        free_length: spring.free_length,
        deflection: spring.current_deflection,
        end_type: spring.end_type,
        handedness: spring.handedness,
        radius: RadiusProfile::Constant(spring.mean_radius()),
    }
}

pub fn generate_compression(
    spring: &CompressionSpring,
    options: &GenerationOptions,
) -> Result<SpringCenterline, SpringError> {
    require_radius(SpringFamily::Compression, "meanDiameter", spring.mean_radius())?;
    let (path, grinding) = compression_coil(spring).sample(options)?;
    Ok(SpringCenterline {
        family: SpringFamily::Compression,
        spring: NormalizedSpring::Compression(*spring),
        path,
        cross_section: CrossSection::Circular {
            wire_diameter: spring.wire_diameter,
        },
        grinding,
        turn_counts: None,
    })
}

/// Height partition of a conical spring.
pub fn conical_partition(spring: &ConicalSpring) -> Result<DeadCoilPartition, SpringError> {
    conical_coil(spring).partition()
}

fn conical_coil(spring: &ConicalSpring) -> AxialCoil {
    AxialCoil {
        family: SpringFamily::Conical,
        wire_diameter: spring.wire_diameter,
        active_coils: spring.active_coils,
        total_coils: spring.total_coils,
        free_length: spring.free_length,
        deflection: spring.current_deflection,
        end_type: spring.end_type,
        handedness: spring.handedness,
        radius: RadiusProfile::Linear {
            start: spring.large_mean_radius(),
            end: spring.small_mean_radius(),
        },
    }
}

/// Large end at z = 0, tapering linearly to the small end.
pub fn generate_conical(
    spring: &ConicalSpring,
    options: &GenerationOptions,
) -> Result<SpringCenterline, SpringError> {
    require_radius(SpringFamily::Conical, "smallOuterDiameter", spring.small_mean_radius())?;
    let (path, grinding) = conical_coil(spring).sample(options)?;
    Ok(SpringCenterline {
        family: SpringFamily::Conical,
        spring: NormalizedSpring::Conical(*spring),
        path,
        cross_section: CrossSection::Circular {
            wire_diameter: spring.wire_diameter,
        },
        grinding,
        turn_counts: None,
    })
}
