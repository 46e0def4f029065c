//! Height bookkeeping for springs with tight end coils.
//!
//! `total_coils` splits into `dead_coils_per_end` at each end, wound at
//! wire-diameter pitch, and `active_coils` in between. The dead pitch is
//! exactly the wire diameter for every family.
//!
//! ```text
//!   z(n) = d·n                                   n ≤ dpe
//!   z(n) = dpe·d + pitch_c·(n − dpe)             dpe < n < Nt − dpe
//!   z(n) = dpe·d + H_c + (n − (Nt − dpe))·d      n ≥ Nt − dpe
//! ```
//!
//! with `H_c = max(L0 − δ − deadHeight, Na·d)` the (possibly compressed)
//! active height and `pitch_c = H_c / Na`.

use serde::Serialize;

use super::error::SpringError;
use super::params::{EndType, SpringFamily};

/// Grinding removes this share of a wire diameter from each closed end.
pub const GRIND_DEPTH_FACTOR: f64 = 0.3;

/// Rounding slack when comparing a height against solid height.
const SOLID_SLACK: f64 = 1.0 - 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadCoilPartition {
    pub wire_diameter: f64,
    pub free_length: f64,
    pub total_coils: f64,
    /// Coils that deflect; equals `total_coils` once ends are open.
    pub active_coils: f64,
    pub dead_coils_per_end: f64,
    pub pitch_dead: f64,
    pub dead_height: f64,
    pub active_height: f64,
    pub pitch_active: f64,
    pub active_height_compressed: f64,
    pub pitch_active_compressed: f64,
}

impl DeadCoilPartition {
    /// Partitions `free_length` for the given coil counts.
    ///
    /// Fails when a count or length is not positive, or when the free length
    /// is below the solid height `total_coils · d`. Closed and open ends share
    /// that bound since dead coils are wound at wire-diameter pitch.
    pub fn new(
        family: SpringFamily,
        wire_diameter: f64,
        active_coils: f64,
        total_coils: f64,
        free_length: f64,
        deflection: f64,
        end_type: EndType,
    ) -> Result<Self, SpringError> {
        if !(wire_diameter > 0.0) {
            return Err(SpringError::degenerate(family, "wireDiameter", "must be positive"));
        }
        if !(active_coils > 0.0) {
            return Err(SpringError::degenerate(family, "activeCoils", "must be positive"));
        }
        if !(total_coils >= active_coils) {
            return Err(SpringError::degenerate(
                family,
                "totalCoils",
                format!("{total_coils} is below activeCoils {active_coils}"),
            ));
        }
        if !(free_length > 0.0) {
            return Err(SpringError::degenerate(family, "freeLength", "must be positive"));
        }
        if !(deflection >= 0.0) {
            return Err(SpringError::degenerate(
                family,
                "currentDeflection",
                "must not be negative",
            ));
        }

        let pitch_dead = wire_diameter;
        let (active, dead_per_end) = if end_type.has_dead_coils() {
            (active_coils, (total_coils - active_coils) * 0.5)
        } else {
            (total_coils, 0.0)
        };

        let dead_height = dead_per_end * 2.0 * pitch_dead;
        let active_height = free_length - dead_height;
        let pitch_active = active_height / active;
        if pitch_active < wire_diameter * SOLID_SLACK {
            return Err(SpringError::degenerate(
                family,
                "freeLength",
                format!(
                    "{free_length} is below the solid height {}",
                    total_coils * wire_diameter
                ),
            ));
        }
        let active_height_compressed =
            (free_length - deflection - dead_height).max(active * wire_diameter);

        Ok(Self {
            wire_diameter,
            free_length,
            total_coils,
            active_coils: active,
            dead_coils_per_end: dead_per_end,
            pitch_dead,
            dead_height,
            active_height,
            pitch_active,
            active_height_compressed,
            pitch_active_compressed: active_height_compressed / active,
        })
    }

    /// Height below the lower dead/active seam.
    #[must_use]
    pub fn z_dead(&self, n: f64) -> f64 {
        self.pitch_dead * n
    }

    #[must_use]
    pub fn z_active(&self, n: f64) -> f64 {
        self.dead_coils_per_end * self.pitch_dead
            + self.pitch_active_compressed * (n - self.dead_coils_per_end)
    }

    /// Height above the upper active/dead seam.
    #[must_use]
    pub fn z_top(&self, n: f64) -> f64 {
        self.dead_coils_per_end * self.pitch_dead
            + self.active_height_compressed
            + (n - self.upper_seam()) * self.pitch_dead
    }

    /// Turn count where the top dead coils begin.
    #[must_use]
    pub fn upper_seam(&self) -> f64 {
        self.total_coils - self.dead_coils_per_end
    }

    /// Height of the centerline after `n` turns.
    #[must_use]
    pub fn z_at_turn(&self, n: f64) -> f64 {
        if n <= self.dead_coils_per_end {
            self.z_dead(n)
        } else if n >= self.upper_seam() {
            self.z_top(n)
        } else {
            self.z_active(n)
        }
    }

    /// Loaded length: dead height plus the compressed active height.
    #[must_use]
    pub fn loaded_length(&self) -> f64 {
        self.dead_height + self.active_height_compressed
    }
}

/// Flat-end machining data handed to the CAD kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndGrinding {
    pub depth: f64,
    pub bottom_cut_z: f64,
    pub top_cut_z: f64,
}

impl EndGrinding {
    /// Cut planes `grind depth` inside the lowest and highest centerline Z.
    #[must_use]
    pub fn for_span(wire_diameter: f64, min_z: f64, max_z: f64) -> Self {
        let depth = GRIND_DEPTH_FACTOR * wire_diameter;
        Self {
            depth,
            bottom_cut_z: min_z + depth,
            top_cut_z: max_z - depth,
        }
    }
}
