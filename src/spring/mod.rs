//! Spring centerline generation.
//!
//! A [`SpringDesign`] names a family and carries raw, possibly incomplete
//! parameters. [`generate`] resolves them into a [`NormalizedSpring`] and
//! samples the family's centerline into a [`SpringCenterline`].

mod analysis;
mod arc;
mod centerline;
mod compression;
mod dead_coil;
mod error;
mod extension;
mod fea;
mod generate;
mod helix;
mod hook;
mod options;
mod params;
mod spiral;
mod torsion;
mod wave;

pub use analysis::{
    SpringFactors, axial_rate, bending_stress, bergstrasser_factor, shear_stress, spring_index,
    torsion_correction, torsion_rate, wahl_factor,
};
pub use arc::{AnchorMapping, ArcBackbone, arc_layout, coil_radius_profile, generate_arc};
pub use centerline::{
    CenterlinePath, CrossSection, PathBuilder, PathSection, SectionKind, SpringCenterline,
};
pub use compression::{
    compression_partition, conical_partition, generate_compression, generate_conical,
};
pub use dead_coil::{DeadCoilPartition, EndGrinding, GRIND_DEPTH_FACTOR};
pub use error::SpringError;
pub use extension::{ExtensionHooks, extension_hooks, generate_extension};
pub use fea::{
    BeamElement, BeamMesh, BeamNode, FeaHandoff, LoadCase, Material, MeshLevel, reference_height,
};
pub use generate::{SpringResult, generate, generate_batch, generate_json, generate_normalized};
pub use helix::{Helix, RadiusProfile, smoothstep};
pub use hook::{
    BodyEnd, CenterMode, HOOK_SPECS, Hook, HookBuilder, HookKind, HookLoop, HookSpec, LoopPlane,
    RadiusClamp,
};
pub use options::{GenerationOptions, PitchStrategy};
pub use params::{
    ArcInput, ArcSpring, CompressionInput, CompressionSpring, ConicalInput, ConicalSpring,
    DiameterProfile, EndType, ExtensionInput, ExtensionSpring, Handedness, LegStyle,
    NormalizedSpring, SpiralTorsionInput, SpiralTorsionSpring, SpringDesign, SpringFamily,
    SpringParameters, TorsionInput, TorsionSpring, WaveInput, WaveSpring, defaults,
};
pub use spiral::{ArchimedeanSpiral, generate_spiral_torsion};
pub use torsion::generate_torsion;
pub use wave::{WaveProfile, generate_wave, wave_shell_grid};

#[cfg(test)]
mod tests;
