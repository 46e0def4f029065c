//! Extension-spring hooks.
//!
//! One algorithm builds every hook kind; the kinds only differ by their row
//! in [`HOOK_SPECS`]. Seen from the body end outward a hook is
//!
//! 1. a straight run of one wire diameter along the body tangent,
//! 2. a cubic Bezier whose handles follow the straight run and the loop, so
//!    both joints are C¹,
//! 3. a circular loop in the plane spanned by the spring axis and the
//!    endpoint's circumferential direction,
//! 4. optionally a straight extended leg.
//!
//! Transition points level with the body are pushed out to the body's mean
//! radius so the hook never cuts through the last coil.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::geom::{
    Arc3, CubicBezier3, Curve3, Line3, Point3, Tolerance, Vec3, tessellate_curve_uniform,
};

use super::options::GenerationOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookKind {
    Machine,
    Side,
    Crossover,
    Extended,
    DoubleLoop,
}

impl HookKind {
    pub const ALL: [Self; 5] = [
        Self::Machine,
        Self::Side,
        Self::Crossover,
        Self::Extended,
        Self::DoubleLoop,
    ];

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "machine" | "fullloop" => Some(Self::Machine),
            "side" | "sideloop" => Some(Self::Side),
            "crossover" | "cross" => Some(Self::Crossover),
            "extended" | "extendedloop" => Some(Self::Extended),
            "doubleloop" | "double" => Some(Self::DoubleLoop),
            _ => None,
        }
    }

    #[must_use]
    pub const fn spec(self) -> HookSpec {
        HOOK_SPECS[self as usize]
    }
}

/// Plane the hook loop lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoopPlane {
    /// Contains the spring axis and the endpoint's circumferential direction.
    AxisPlane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CenterMode {
    OnAxis,
    RadialOffset,
}

/// Geometry constants of one hook topology. Factors multiply the wire
/// diameter, except `hook_radius_factor` which multiplies the mean radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpec {
    pub kind: HookKind,
    pub loop_count: u32,
    pub loop_angle_deg: f64,
    pub loop_start_angle_rad: f64,
    pub loop_plane: LoopPlane,
    pub center_mode: CenterMode,
    pub axial_gap_factor: f64,
    pub radial_offset_factor: f64,
    pub hook_radius_factor: f64,
    pub handle_length_factor: f64,
    pub has_extended_leg: bool,
    pub extended_leg_length_factor: f64,
}

/// Indexed by `HookKind as usize`.
pub const HOOK_SPECS: [HookSpec; 5] = [
    HookSpec {
        kind: HookKind::Machine,
        loop_count: 1,
        loop_angle_deg: 160.0,
        loop_start_angle_rad: -FRAC_PI_2,
        loop_plane: LoopPlane::AxisPlane,
        center_mode: CenterMode::OnAxis,
        axial_gap_factor: 1.2,
        radial_offset_factor: 0.0,
        hook_radius_factor: 0.85,
        handle_length_factor: 2.0,
        has_extended_leg: false,
        extended_leg_length_factor: 0.0,
    },
    HookSpec {
        kind: HookKind::Side,
        loop_count: 1,
        loop_angle_deg: 270.0,
        loop_start_angle_rad: FRAC_PI_2,
        loop_plane: LoopPlane::AxisPlane,
        center_mode: CenterMode::RadialOffset,
        axial_gap_factor: 0.8,
        radial_offset_factor: 0.0,
        hook_radius_factor: 0.7,
        handle_length_factor: 0.3,
        has_extended_leg: false,
        extended_leg_length_factor: 0.0,
    },
    HookSpec {
        kind: HookKind::Crossover,
        loop_count: 1,
        loop_angle_deg: 180.0,
        loop_start_angle_rad: -FRAC_PI_2,
        loop_plane: LoopPlane::AxisPlane,
        center_mode: CenterMode::OnAxis,
        axial_gap_factor: 1.4,
        radial_offset_factor: 0.0,
        hook_radius_factor: 1.0,
        handle_length_factor: 2.5,
        has_extended_leg: false,
        extended_leg_length_factor: 0.0,
    },
    HookSpec {
        kind: HookKind::Extended,
        loop_count: 1,
        loop_angle_deg: 200.0,
        loop_start_angle_rad: -FRAC_PI_2,
        loop_plane: LoopPlane::AxisPlane,
        center_mode: CenterMode::RadialOffset,
        axial_gap_factor: 1.5,
        radial_offset_factor: 0.8,
        hook_radius_factor: 0.85,
        handle_length_factor: 2.0,
        has_extended_leg: true,
        extended_leg_length_factor: 0.5,
    },
    HookSpec {
        kind: HookKind::DoubleLoop,
        loop_count: 2,
        loop_angle_deg: 340.0,
        loop_start_angle_rad: -FRAC_PI_2,
        loop_plane: LoopPlane::AxisPlane,
        center_mode: CenterMode::OnAxis,
        axial_gap_factor: 1.8,
        radial_offset_factor: 0.0,
        hook_radius_factor: 0.85,
        handle_length_factor: 2.0,
        has_extended_leg: false,
        extended_leg_length_factor: 0.0,
    },
];

// ─────────────────────────────────────────────────────────────────────────────
// Radius clamp
// ─────────────────────────────────────────────────────────────────────────────

/// Pushes points inside a Z window out to a minimum XY radius.
///
/// Z is never modified; a point already on or outside the radius is
/// returned unchanged, so applying the clamp twice equals applying it once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusClamp {
    pub min_radius: f64,
    pub z_min: f64,
    pub z_max: f64,
    /// Direction used for points sitting on the axis.
    pub fallback_dir: Vec3,
}

impl RadiusClamp {
    // Relative slack so a point rescaled onto the radius is not rescaled again.
    const SLACK: f64 = 1e-12;

    #[must_use]
    pub fn apply(&self, p: Point3) -> Point3 {
        if p.z < self.z_min || p.z > self.z_max {
            return p;
        }
        let r = p.radius_xy();
        if r >= self.min_radius * (1.0 - Self::SLACK) {
            return p;
        }
        if r > Tolerance::NORMALIZE.eps {
            let scale = self.min_radius / r;
            Point3::new(p.x * scale, p.y * scale, p.z)
        } else {
            let dir = self.fallback_dir.flatten_xy().normalized_or(Vec3::X);
            Point3::new(dir.x * self.min_radius, dir.y * self.min_radius, p.z)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hook loop
// ─────────────────────────────────────────────────────────────────────────────

/// Circular loop with an optional linear drift, so multi-turn loops stack
/// side by side instead of overlapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookLoop {
    pub arc: Arc3,
    /// Offset reached at the end of the sweep.
    pub drift: Vec3,
}

impl Curve3 for HookLoop {
    fn point_at(&self, t: f64) -> Point3 {
        self.arc.point_at(t) + self.drift * t.clamp(0.0, 1.0)
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        self.arc.derivative_at(t) + self.drift
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Body end a hook grows from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyEnd {
    pub point: Point3,
    /// Unit direction leaving the body.
    pub tangent: Vec3,
    /// +Z at the top end, -Z at the bottom end.
    pub axis_dir: Vec3,
    /// Z extent of the body.
    pub z_min: f64,
    pub z_max: f64,
}

/// A built hook, ordered from the body end outward.
#[derive(Debug, Clone, PartialEq)]
pub struct Hook {
    pub points: Vec<Point3>,
    pub transition: CubicBezier3,
    pub hook_loop: HookLoop,
    pub loop_radius: f64,
    pub center: Point3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookBuilder {
    pub spec: HookSpec,
    pub wire_diameter: f64,
    pub mean_radius: f64,
    pub loop_segments: usize,
    pub transition_segments: usize,
    pub straight_segments: usize,
}

impl HookBuilder {
    #[must_use]
    pub fn new(spec: HookSpec, wire_diameter: f64, mean_radius: f64, options: &GenerationOptions) -> Self {
        Self {
            spec,
            wire_diameter,
            mean_radius,
            loop_segments: options.hook_loop_segments,
            transition_segments: options.hook_transition_segments,
            straight_segments: options.hook_straight_segments,
        }
    }

    /// `hook_radius_factor · mean radius`.
    #[must_use]
    pub fn loop_radius(&self) -> f64 {
        self.spec.hook_radius_factor * self.mean_radius
    }

    /// Radial direction of the endpoint in XY (+X on the axis).
    fn radial_dir(point: Point3) -> Vec3 {
        point.to_vec3().flatten_xy().normalized_or(Vec3::X)
    }

    #[must_use]
    pub fn loop_center(&self, end: &BodyEnd) -> Point3 {
        let d = self.wire_diameter;
        let on_axis = Point3::new(0.0, 0.0, end.point.z) + end.axis_dir * (self.spec.axial_gap_factor * d);
        match self.spec.center_mode {
            CenterMode::OnAxis => on_axis,
            CenterMode::RadialOffset => {
                on_axis + Self::radial_dir(end.point) * (self.spec.radial_offset_factor * d)
            }
        }
    }

    #[must_use]
    pub fn hook_loop(&self, end: &BodyEnd) -> HookLoop {
        let u = end.axis_dir.normalized_or(Vec3::Z);
        let v = Self::radial_dir(end.point).cross(u).normalized_or(Vec3::Y);
        let extra_loops = f64::from(self.spec.loop_count.saturating_sub(1));
        let sweep = (self.spec.loop_angle_deg + 360.0 * extra_loops).to_radians();
        // One wire diameter of drift per revolution.
        let drift = if self.spec.loop_count > 1 {
            u.cross(v) * (self.wire_diameter * sweep / TAU)
        } else {
            Vec3::ZERO
        };
        let arc = Arc3::from_center_axes(
            self.loop_center(end),
            u,
            v,
            self.loop_radius(),
            self.spec.loop_start_angle_rad,
            sweep,
        );
        HookLoop { arc, drift }
    }

    #[must_use]
    pub fn build(&self, end: &BodyEnd) -> Hook {
        let d = self.wire_diameter;
        let tangent = end.tangent.normalized_or(end.axis_dir);

        let straight = Line3::from_ray(end.point, tangent, d);
        let hook_loop = self.hook_loop(end);
        let loop_start = hook_loop.point_at(0.0);
        let loop_tangent = hook_loop
            .tangent_at(0.0)
            .unwrap_or(end.axis_dir);
        let transition = CubicBezier3::from_tangents(
            straight.end,
            tangent,
            loop_start,
            loop_tangent,
            self.spec.handle_length_factor * d,
        );

        let clamp = RadiusClamp {
            min_radius: self.mean_radius,
            z_min: end.z_min,
            z_max: end.z_max,
            fallback_dir: Self::radial_dir(end.point),
        };

        let mut points = tessellate_curve_uniform(&straight, self.straight_segments);
        let bezier = tessellate_curve_uniform(&transition, self.transition_segments);
        points.extend(bezier.into_iter().skip(1));
        // The body end and the loop start stay fixed.
        let transition_end = points.len() - 1;
        for p in &mut points[1..transition_end] {
            *p = clamp.apply(*p);
        }

        let loop_points = tessellate_curve_uniform(&hook_loop, self.loop_segments);
        points.extend(loop_points.into_iter().skip(1));

        if self.spec.has_extended_leg && self.spec.extended_leg_length_factor > 0.0 {
            let leg_start = hook_loop.point_at(1.0);
            let leg_dir = hook_loop.tangent_at(1.0).unwrap_or(end.axis_dir);
            let leg = Line3::from_ray(leg_start, leg_dir, self.spec.extended_leg_length_factor * d);
            points.extend(
                tessellate_curve_uniform(&leg, self.straight_segments)
                    .into_iter()
                    .skip(1),
            );
        }

        log::debug!(
            "{:?} hook: {} points, loop radius {:.4}",
            self.spec.kind,
            points.len(),
            self.loop_radius()
        );

        Hook {
            points,
            transition,
            hook_loop,
            loop_radius: self.loop_radius(),
            center: hook_loop.arc.center,
        }
    }
}
