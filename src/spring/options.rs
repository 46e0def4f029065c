//! Generation settings shared by every spring family.
//!
//! Sampling density is empirical: the downstream curve fit needs enough
//! points per coil to avoid faceting. The defaults (200 minimum, 36 per turn)
//! are the values the CAD pipeline was validated with; callers re-tune them
//! per kernel through [`GenerationOptions`].
//!
//! # Example
//!
//! ```ignore
//! use spring_engine::spring::{GenerationOptions, PitchStrategy};
//!
//! let options = GenerationOptions::new()
//!     .samples_per_turn(72)
//!     .pitch_strategy(PitchStrategy::Uniform);
//! options.validate()?;
//! ```

use serde::{Deserialize, Serialize};

use super::error::SpringError;
use super::params::SpringFamily;

/// How axial height is distributed over the turns of a compression or
/// conical spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PitchStrategy {
    /// Dead end coils at wire-diameter pitch around an active region.
    #[default]
    Partitioned,
    /// Legacy preview: height proportional to the turn fraction.
    Uniform,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    /// Lower bound on samples for a helical body or spiral.
    pub min_samples: usize,
    /// Upper bound on samples for one body; larger requests are refused
    /// before anything is allocated.
    pub max_samples: usize,
    /// Samples per coil turn.
    pub samples_per_turn: usize,
    /// Segments per hook loop arc.
    pub hook_loop_segments: usize,
    /// Segments of the Bezier transition between body and hook loop.
    pub hook_transition_segments: usize,
    /// Segments of the straight run leaving the body.
    pub hook_straight_segments: usize,
    /// Samples per wave of a wave spring.
    pub segments_per_wave: usize,
    /// Upper bound of `anchorLs + anchorLe` as a share of the arc length.
    pub cap_ratio: f64,
    pub pitch_strategy: PitchStrategy,
    /// Attach rotation-minimizing frames to the output path.
    pub include_frames: bool,
}

impl GenerationOptions {
    pub const DEFAULT_MIN_SAMPLES: usize = 200;
    pub const DEFAULT_SAMPLES_PER_TURN: usize = 36;
    pub const DEFAULT_CAP_RATIO: f64 = 0.95;
    pub const DEFAULT_MAX_SAMPLES: usize = 1_000_000;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_samples: Self::DEFAULT_MIN_SAMPLES,
            max_samples: Self::DEFAULT_MAX_SAMPLES,
            samples_per_turn: Self::DEFAULT_SAMPLES_PER_TURN,
            hook_loop_segments: 36,
            hook_transition_segments: 24,
            hook_straight_segments: 4,
            segments_per_wave: 24,
            cap_ratio: Self::DEFAULT_CAP_RATIO,
            pitch_strategy: PitchStrategy::Partitioned,
            include_frames: false,
        }
    }

    #[must_use]
    pub const fn min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    #[must_use]
    pub const fn max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    #[must_use]
    pub const fn samples_per_turn(mut self, samples_per_turn: usize) -> Self {
        self.samples_per_turn = samples_per_turn;
        self
    }

    #[must_use]
    pub const fn segments_per_wave(mut self, segments_per_wave: usize) -> Self {
        self.segments_per_wave = segments_per_wave;
        self
    }

    #[must_use]
    pub const fn cap_ratio(mut self, cap_ratio: f64) -> Self {
        self.cap_ratio = cap_ratio;
        self
    }

    #[must_use]
    pub const fn pitch_strategy(mut self, pitch_strategy: PitchStrategy) -> Self {
        self.pitch_strategy = pitch_strategy;
        self
    }

    #[must_use]
    pub const fn include_frames(mut self, include_frames: bool) -> Self {
        self.include_frames = include_frames;
        self
    }

    /// Rejects settings that would produce visibly faceted or degenerate
    /// output.
    pub fn validate(&self) -> Result<(), SpringError> {
        if self.min_samples < 2 {
            return Err(invalid("minSamples", "must be at least 2"));
        }
        if self.max_samples < self.min_samples {
            return Err(invalid("maxSamples", "must not be below minSamples"));
        }
        if self.samples_per_turn < 8 {
            return Err(invalid("samplesPerTurn", "must be at least 8"));
        }
        let segment_counts = [
            ("samplesPerTurn", self.samples_per_turn),
            ("hookLoopSegments", self.hook_loop_segments),
            ("hookTransitionSegments", self.hook_transition_segments),
            ("hookStraightSegments", self.hook_straight_segments),
            ("segmentsPerWave", self.segments_per_wave),
        ];
        if let Some((field, _)) = segment_counts
            .iter()
            .find(|(_, count)| *count > self.max_samples)
        {
            return Err(invalid(*field, "must not exceed maxSamples"));
        }
        if self.hook_loop_segments < 4 {
            return Err(invalid("hookLoopSegments", "must be at least 4"));
        }
        if self.hook_transition_segments < 4 {
            return Err(invalid("hookTransitionSegments", "must be at least 4"));
        }
        if self.hook_straight_segments == 0 {
            return Err(invalid("hookStraightSegments", "must be at least 1"));
        }
        if self.segments_per_wave < 20 {
            return Err(invalid("segmentsPerWave", "must be at least 20"));
        }
        if !(self.cap_ratio > 0.0 && self.cap_ratio < 1.0) {
            return Err(invalid("capRatio", "must lie strictly between 0 and 1"));
        }
        Ok(())
    }

    /// `max(min_samples, ceil(turns * samples_per_turn))`.
    #[must_use]
    pub fn sample_count(&self, turns: f64) -> usize {
        let per_turn = (turns.abs() * self.samples_per_turn as f64).ceil();
        if per_turn.is_finite() && per_turn > self.min_samples as f64 {
            per_turn as usize
        } else {
            self.min_samples
        }
    }

    /// [`Self::sample_count`], refused with `DegenerateGeometry` on `field`
    /// when it would exceed `max_samples`.
    pub fn checked_sample_count(
        &self,
        family: SpringFamily,
        field: &'static str,
        turns: f64,
    ) -> Result<usize, SpringError> {
        self.check_budget(family, field, turns.abs() * self.samples_per_turn as f64)?;
        Ok(self.sample_count(turns))
    }

    /// Refuses an estimated sample count above `max_samples`. NaN and
    /// infinite estimates are refused too.
    pub fn check_budget(
        &self,
        family: SpringFamily,
        field: &'static str,
        estimate: f64,
    ) -> Result<(), SpringError> {
        if estimate.ceil() <= self.max_samples as f64 {
            Ok(())
        } else {
            Err(SpringError::degenerate(
                family,
                field,
                format!(
                    "needs {estimate:.0} samples, more than maxSamples {}",
                    self.max_samples
                ),
            ))
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(field: &'static str, reason: &str) -> SpringError {
    SpringError::InvalidOptions {
        field,
        reason: reason.to_string(),
    }
}
