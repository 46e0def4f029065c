//! Helical sampling shared by the compression, extension, torsion and
//! conical generators.
//!
//! A [`Helix`] maps the turn fraction `t ∈ [0, 1]` to
//! `(r(t) cos θ, r(t) sin θ, z(t))` with `θ = ±2π·turns·t + phase`. Radius
//! variation is described by a [`RadiusProfile`]; height is any function of
//! `t`, which is where the pitch models plug in.

use std::f64::consts::TAU;

use crate::geom::{Curve3, Point3, Vec3, tessellate_curve_uniform};

use super::params::{DiameterProfile, Handedness};

/// Coil radius as a function of the turn fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadiusProfile {
    Constant(f64),
    /// `start + (end - start)·t`.
    Linear { start: f64, end: f64 },
    /// Constant `start` up to `active_from`, constant `end` after
    /// `active_to`, shaped by `shape` in between (`mid` is the barrel bulge).
    Zoned {
        start: f64,
        mid: f64,
        end: f64,
        active_from: f64,
        active_to: f64,
        shape: DiameterProfile,
    },
}

impl RadiusProfile {
    #[must_use]
    pub fn radius_at(&self, t: f64) -> f64 {
        match *self {
            Self::Constant(r) => r,
            Self::Linear { start, end } => start + (end - start) * t,
            Self::Zoned {
                start,
                mid,
                end,
                active_from,
                active_to,
                shape,
            } => {
                let s = if active_to > active_from {
                    ((t - active_from) / (active_to - active_from)).clamp(0.0, 1.0)
                } else if t < active_from {
                    0.0
                } else {
                    1.0
                };
                match shape {
                    DiameterProfile::Constant => start,
                    DiameterProfile::Conical => start + (end - start) * s,
                    DiameterProfile::Barrel => {
                        let base = start + (end - start) * s;
                        let bulge = mid - 0.5 * (start + end);
                        base + bulge * smoothstep(1.0 - (2.0 * s - 1.0).abs())
                    }
                }
            }
        }
    }

    /// Smallest radius the profile reaches.
    #[must_use]
    pub fn min_radius(&self) -> f64 {
        match *self {
            Self::Constant(r) => r,
            Self::Linear { start, end } => start.min(end),
            Self::Zoned { start, mid, end, shape, .. } => match shape {
                DiameterProfile::Constant => start,
                DiameterProfile::Conical => start.min(end),
                DiameterProfile::Barrel => start.min(end).min(mid),
            },
        }
    }
}

/// `s²(3 - 2s)` on `[0, 1]`.
#[must_use]
pub fn smoothstep(s: f64) -> f64 {
    let s = s.clamp(0.0, 1.0);
    s * s * (3.0 - 2.0 * s)
}

/// A helix around +Z with arbitrary radius and height laws.
pub struct Helix<Z> {
    pub radius: RadiusProfile,
    pub height: Z,
    pub turns: f64,
    pub handedness: Handedness,
    /// Angle of the first point, radians.
    pub phase: f64,
}

impl<Z: Fn(f64) -> f64> Helix<Z> {
    #[must_use]
    pub fn new(radius: RadiusProfile, height: Z, turns: f64, handedness: Handedness) -> Self {
        Self {
            radius,
            height,
            turns,
            handedness,
            phase: 0.0,
        }
    }

    #[must_use]
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    #[must_use]
    pub fn angle_at(&self, t: f64) -> f64 {
        self.handedness.sign() * TAU * self.turns * t + self.phase
    }

    /// `samples + 1` points uniformly in `t`, endpoints exact.
    #[must_use]
    pub fn sample(&self, samples: usize) -> Vec<Point3> {
        tessellate_curve_uniform(self, samples)
    }

    /// Unit tangent at an end, or the circumferential direction if the
    /// derivative vanishes.
    #[must_use]
    pub fn end_tangent(&self, at_start: bool) -> Vec3 {
        let t = if at_start { 0.0 } else { 1.0 };
        let p = self.point_at(t);
        let fallback = Vec3::new(-p.y, p.x, 0.0).normalized_or(Vec3::Y) * self.handedness.sign();
        self.derivative_at(t).normalized_or(fallback)
    }
}

impl<Z: Fn(f64) -> f64> Curve3 for Helix<Z> {
    fn point_at(&self, t: f64) -> Point3 {
        let (s, c) = self.angle_at(t).sin_cos();
        let r = self.radius.radius_at(t);
        Point3::new(r * c, r * s, (self.height)(t))
    }
}
