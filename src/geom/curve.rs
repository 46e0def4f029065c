use super::core::{Frame, Point3, Tolerance, Vec3};

/// A parametric curve in 3D.
pub trait Curve3 {
    fn point_at(&self, t: f64) -> Point3;

    #[must_use]
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[must_use]
    fn derivative_at(&self, t: f64) -> Vec3 {
        let (a, b) = self.domain();
        let span = b - a;
        if !span.is_finite() || span == 0.0 {
            return Vec3::ZERO;
        }

        let h = Tolerance::DERIVATIVE.relative_to(span);
        let t0 = (t - h).max(a);
        let t1 = (t + h).min(b);
        if t1 == t0 {
            return Vec3::ZERO;
        }

        let p0 = self.point_at(t0);
        let p1 = self.point_at(t1);
        (p1 - p0) / (t1 - t0)
    }

    /// Returns the unit tangent vector at parameter `t`.
    /// Returns `None` if the derivative is zero or degenerate.
    #[must_use]
    fn tangent_at(&self, t: f64) -> Option<Vec3> {
        self.derivative_at(t).normalized()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Line3
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    pub start: Point3,
    pub end: Point3,
}

impl Line3 {
    #[must_use]
    pub const fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Segment of `length` starting at `start` along `direction` (normalized,
    /// +X for a degenerate direction).
    #[must_use]
    pub fn from_ray(start: Point3, direction: Vec3, length: f64) -> Self {
        let dir = direction.normalized_or(Vec3::X);
        Self::new(start, start + dir * length)
    }

    #[must_use]
    pub const fn direction(self) -> Vec3 {
        self.end.sub_point(self.start)
    }
}

impl Curve3 for Line3 {
    fn point_at(&self, t: f64) -> Point3 {
        self.start.lerp(self.end, t)
    }

    fn derivative_at(&self, _t: f64) -> Vec3 {
        self.direction()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Arc3
// ─────────────────────────────────────────────────────────────────────────────

/// Circular arc `center + r cos(a) x_axis + r sin(a) y_axis`, with
/// `a = start_angle + sweep_angle * t`, `t ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc3 {
    pub center: Point3,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl Arc3 {
    /// Arc in the plane spanned by `x_axis` and `y_axis`, which are
    /// orthonormalized (Gram-Schmidt) before use.
    #[must_use]
    pub fn from_center_axes(
        center: Point3,
        x_axis: Vec3,
        y_axis: Vec3,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
    ) -> Self {
        let frame = Frame::from_tangent_normal(center, x_axis, y_axis);
        Self {
            center,
            x_axis: frame.tangent,
            y_axis: frame.normal,
            radius,
            start_angle,
            sweep_angle,
        }
    }

    /// Arc starting at `start` with unit direction `start_tangent`, bending
    /// towards `turn_towards` (any vector with a component perpendicular to
    /// the tangent) with the given radius and sweep (radians, >= 0).
    #[must_use]
    pub fn tangent_continuation(
        start: Point3,
        start_tangent: Vec3,
        turn_towards: Vec3,
        radius: f64,
        sweep: f64,
    ) -> Self {
        let frame = Frame::from_tangent_normal(start, start_tangent, turn_towards);
        // Center sits on the inner side, the start point at angle zero.
        let center = start + frame.normal * radius;
        Self {
            center,
            x_axis: -frame.normal,
            y_axis: frame.tangent,
            radius,
            start_angle: 0.0,
            sweep_angle: sweep,
        }
    }

    #[must_use]
    pub fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + self.sweep_angle * t.clamp(0.0, 1.0)
    }
}

impl Curve3 for Arc3 {
    fn point_at(&self, t: f64) -> Point3 {
        let (s, c) = self.angle_at(t).sin_cos();
        self.center + self.x_axis * (self.radius * c) + self.y_axis * (self.radius * s)
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        let (s, c) = self.angle_at(t).sin_cos();
        (self.x_axis * (-self.radius * s) + self.y_axis * (self.radius * c)) * self.sweep_angle
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CubicBezier3
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier3 {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
}

impl CubicBezier3 {
    #[must_use]
    pub const fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Hermite-style construction: the handles leave `start` along
    /// `start_tangent` and arrive at `end` along `end_tangent`, each
    /// `handle` long. Both end tangents of the result are therefore
    /// parallel to the supplied ones.
    #[must_use]
    pub fn from_tangents(
        start: Point3,
        start_tangent: Vec3,
        end: Point3,
        end_tangent: Vec3,
        handle: f64,
    ) -> Self {
        let t0 = start_tangent.normalized_or(Vec3::Z);
        let t1 = end_tangent.normalized_or(Vec3::Z);
        Self::new(start, start + t0 * handle, end - t1 * handle, end)
    }
}

impl Curve3 for CubicBezier3 {
    fn point_at(&self, t: f64) -> Point3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let u2 = u * u;
        let t2 = t * t;
        point_weighted_sum4(
            [self.p0, self.p1, self.p2, self.p3],
            [u2 * u, 3.0 * u2 * t, 3.0 * u * t2, t2 * t],
        )
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let a = self.p1 - self.p0;
        let b = self.p2 - self.p1;
        let c = self.p3 - self.p2;
        a * (3.0 * u * u) + b * (6.0 * u * t) + c * (3.0 * t * t)
    }
}

fn point_weighted_sum4(points: [Point3; 4], weights: [f64; 4]) -> Point3 {
    let mut acc = Vec3::ZERO;
    for (p, w) in points.iter().zip(weights) {
        acc = acc + p.to_vec3() * w;
    }
    acc.into()
}

// ─────────────────────────────────────────────────────────────────────────────
// Sampling
// ─────────────────────────────────────────────────────────────────────────────

/// Samples `steps + 1` points uniformly in the curve parameter.
#[must_use]
pub fn tessellate_curve_uniform(curve: &impl Curve3, steps: usize) -> Vec<Point3> {
    let steps = steps.max(1);
    let (t0, t1) = curve.domain();
    (0..=steps)
        .map(|i| {
            // Pin the last sample to the domain end so seams share exact points.
            let t = if i == steps {
                t1
            } else {
                t0 + (t1 - t0) * (i as f64 / steps as f64)
            };
            curve.point_at(t)
        })
        .collect()
}

/// Accumulated chord length at every point (`result[0] == 0`).
#[must_use]
pub fn cumulative_lengths(points: &[Point3]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += p.distance_to(points[i - 1]);
        }
        lengths.push(total);
    }
    lengths
}

/// Unit tangents by central differences (one-sided at the ends).
#[must_use]
pub fn polyline_tangents(points: &[Point3]) -> Vec<Vec3> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let prev = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(n - 1)];
            (next - prev).normalized_or(Vec3::X)
        })
        .collect()
}

/// Rotation-minimizing frames along a polyline (double reflection).
///
/// The first normal is `normal_hint` projected off the first tangent; every
/// following frame is transported without twist.
#[must_use]
pub fn polyline_frames(points: &[Point3], normal_hint: Vec3) -> Vec<Frame> {
    if points.is_empty() {
        return Vec::new();
    }
    let tangents = polyline_tangents(points);
    let mut frames = Vec::with_capacity(points.len());
    frames.push(Frame::from_tangent_normal(points[0], tangents[0], normal_hint));

    for i in 0..points.len() - 1 {
        let current = frames[i];
        let v1 = points[i + 1] - points[i];
        let c1 = v1.length_squared();
        if c1 <= Tolerance::ZERO_LENGTH.eps_squared() {
            frames.push(Frame::from_tangent_normal(
                points[i + 1],
                tangents[i + 1],
                current.normal,
            ));
            continue;
        }
        let r_l = current.normal - v1 * (2.0 / c1 * v1.dot(current.normal));
        let t_l = current.tangent - v1 * (2.0 / c1 * v1.dot(current.tangent));
        let v2 = tangents[i + 1] - t_l;
        let c2 = v2.length_squared();
        let normal = if c2 <= Tolerance::ZERO_LENGTH.eps_squared() {
            r_l
        } else {
            r_l - v2 * (2.0 / c2 * v2.dot(r_l))
        };
        frames.push(Frame::from_tangent_normal(points[i + 1], tangents[i + 1], normal));
    }
    frames
}
