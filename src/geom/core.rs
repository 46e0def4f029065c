use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Vec3
// ─────────────────────────────────────────────────────────────────────────────

/// A direction or offset in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit vector along the X axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector along the Y axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector along the Z axis (the spring axis).
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub const fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub const fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub const fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Unit vector in the same direction, or `None` when the length is below
    /// [`Tolerance::NORMALIZE`] or not finite.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len.is_finite() && len > Tolerance::NORMALIZE.eps {
            Some(Self::new(self.x / len, self.y / len, self.z / len))
        } else {
            None
        }
    }

    /// Unit vector in the same direction, or `fallback` for near-zero input.
    #[must_use]
    pub fn normalized_or(self, fallback: Self) -> Self {
        self.normalized().unwrap_or(fallback)
    }

    /// Rotate around `axis` by `degrees` (Rodrigues' rotation formula).
    ///
    /// A degenerate axis leaves the vector unchanged.
    #[must_use]
    pub fn rotated_about(self, axis: Self, degrees: f64) -> Self {
        let Some(k) = axis.normalized() else {
            return self;
        };
        let (s, c) = degrees.to_radians().sin_cos();
        self * c + k.cross(self) * s + k * (k.dot(self) * (1.0 - c))
    }

    /// Projection onto the XY plane.
    #[must_use]
    pub const fn flatten_xy(self) -> Self {
        Self::new(self.x, self.y, 0.0)
    }

    /// A unit vector perpendicular to `self`.
    #[must_use]
    pub fn any_orthogonal(self) -> Self {
        let candidate = if self.x.abs() < self.y.abs() {
            Self::new(0.0, -self.z, self.y)
        } else {
            Self::new(-self.z, 0.0, self.x)
        };
        candidate.normalized_or(Self::X)
    }

    #[must_use]
    pub const fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self * rhs.x, self * rhs.y, self * rhs.z)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Point3
// ─────────────────────────────────────────────────────────────────────────────

/// A position on a centerline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Position vector from the origin.
    #[must_use]
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Distance from the Z axis.
    #[must_use]
    pub fn radius_xy(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub const fn add_vec(self, v: Vec3) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    #[must_use]
    pub const fn sub_vec(self, v: Vec3) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }

    #[must_use]
    pub const fn sub_point(self, rhs: Self) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    #[must_use]
    pub fn lerp(self, rhs: Self, t: f64) -> Self {
        Self::new(
            self.x + (rhs.x - self.x) * t,
            self.y + (rhs.y - self.y) * t,
            self.z + (rhs.z - self.z) * t,
        )
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        self.sub_point(other).length()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Default for Point3 {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}

impl From<Vec3> for Point3 {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point3> for Vec3 {
    fn from(p: Point3) -> Self {
        p.to_vec3()
    }
}

impl Add<Vec3> for Point3 {
    type Output = Self;
    fn add(self, rhs: Vec3) -> Self::Output {
        self.add_vec(rhs)
    }
}

impl Sub<Vec3> for Point3 {
    type Output = Self;
    fn sub(self, rhs: Vec3) -> Self::Output {
        self.sub_vec(rhs)
    }
}

impl Sub for Point3 {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Self::Output {
        self.sub_point(rhs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Frame
// ─────────────────────────────────────────────────────────────────────────────

/// A right-handed orthonormal frame attached to a point of a path.
///
/// `tangent × normal == binormal` holds for every frame produced by the
/// constructors and rotations below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub position: Point3,
    pub tangent: Vec3,
    pub normal: Vec3,
    pub binormal: Vec3,
}

impl Frame {
    /// Builds a frame from a tangent and a normal hint (Gram-Schmidt).
    ///
    /// A degenerate tangent falls back to +X; a hint parallel to the tangent
    /// falls back to an arbitrary perpendicular.
    #[must_use]
    pub fn from_tangent_normal(position: Point3, tangent: Vec3, normal_hint: Vec3) -> Self {
        let tangent = tangent.normalized_or(Vec3::X);
        let projected = normal_hint - tangent * tangent.dot(normal_hint);
        let normal = projected
            .normalized()
            .unwrap_or_else(|| tangent.any_orthogonal());
        let binormal = tangent.cross(normal).normalized_or(Vec3::Z);
        Self {
            position,
            tangent,
            normal,
            binormal,
        }
    }

    /// Rotates the axes (and the position about the origin-anchored `axis`
    /// through `pivot`) by `degrees`, then re-orthonormalizes.
    #[must_use]
    pub fn rotated_about(self, pivot: Point3, axis: Vec3, degrees: f64) -> Self {
        let offset = (self.position - pivot).rotated_about(axis, degrees);
        Self::from_tangent_normal(
            pivot + offset,
            self.tangent.rotated_about(axis, degrees),
            self.normal.rotated_about(axis, degrees),
        )
    }

    /// Rolls the normal/binormal pair around the tangent by `degrees`.
    #[must_use]
    pub fn rolled(self, degrees: f64) -> Self {
        Self::from_tangent_normal(
            self.position,
            self.tangent,
            self.normal.rotated_about(self.tangent, degrees),
        )
    }

    /// Point offset in the normal/binormal plane: `position + r(cos φ N + sin φ B)`.
    #[must_use]
    pub fn offset_in_plane(&self, radius: f64, phi: f64) -> Point3 {
        let (s, c) = phi.sin_cos();
        self.position + (self.normal * c + self.binormal * s) * radius
    }

    #[must_use]
    pub fn is_right_handed_orthonormal(&self, tol: Tolerance) -> bool {
        tol.approx_eq_f64(self.tangent.length(), 1.0)
            && tol.approx_eq_f64(self.normal.length(), 1.0)
            && tol.approx_zero_f64(self.tangent.dot(self.normal))
            && tol.approx_eq_vec3(self.tangent.cross(self.normal), self.binormal)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────────────────────────────────────

/// Tolerance configuration for geometric operations.
///
/// Use the named constants to avoid epsilon scatter:
/// - `Tolerance::DEFAULT` - General geometry comparisons (1e-9)
/// - `Tolerance::NORMALIZE` - Shortest vector that may be normalized (1e-8)
/// - `Tolerance::BOUNDARY` - Agreement of piecewise formulas at their seams (1e-8)
/// - `Tolerance::ZERO_LENGTH` - Coincident points (1e-12)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    /// Default geometric tolerance (1e-9).
    pub const DEFAULT: Self = Self { eps: 1e-9 };

    /// Vectors shorter than this are never divided by their length (1e-8).
    pub const NORMALIZE: Self = Self { eps: 1e-8 };

    /// Seams between piecewise height/turn formulas must agree to this (1e-8).
    pub const BOUNDARY: Self = Self { eps: 1e-8 };

    /// Consecutive points closer than this are treated as coincident (1e-12).
    pub const ZERO_LENGTH: Self = Self { eps: 1e-12 };

    /// Step size for numerical differentiation (1e-6).
    pub const DERIVATIVE: Self = Self { eps: 1e-6 };

    /// Loose tolerance for coarse comparisons (1e-6).
    pub const LOOSE: Self = Self { eps: 1e-6 };

    #[must_use]
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }

    #[must_use]
    pub const fn eps_squared(self) -> f64 {
        self.eps * self.eps
    }

    /// Create tolerance relative to a span/domain size.
    #[must_use]
    pub fn relative_to(self, span: f64) -> f64 {
        self.eps * span.abs()
    }

    #[must_use]
    pub fn approx_eq_f64(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.eps
    }

    #[must_use]
    pub fn approx_zero_f64(self, a: f64) -> bool {
        a.abs() <= self.eps
    }

    #[must_use]
    pub fn approx_eq_point3(self, a: Point3, b: Point3) -> bool {
        a.sub_point(b).length_squared() <= self.eps_squared()
    }

    #[must_use]
    pub fn approx_eq_vec3(self, a: Vec3, b: Vec3) -> bool {
        a.sub(b).length_squared() <= self.eps_squared()
    }

    #[must_use]
    pub fn is_zero_length(self, len: f64) -> bool {
        len.abs() <= self.eps
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operators() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, Vec3::new(0.5, 1.0, 1.5));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_normalize_guard() {
        assert!(Vec3::new(1e-9, 0.0, 0.0).normalized().is_none());
        assert_eq!(Vec3::new(0.0, 5e-9, 0.0).normalized_or(Vec3::Y), Vec3::Y);
        assert_eq!(Vec3::new(0.0, 0.0, 3.0).normalized(), Some(Vec3::Z));
        assert!(Vec3::new(f64::NAN, 0.0, 0.0).normalized().is_none());
    }

    #[test]
    fn test_rotated_about_quarter_turn() {
        let tol = Tolerance::DEFAULT;
        let r = Vec3::X.rotated_about(Vec3::Z, 90.0);
        assert!(tol.approx_eq_vec3(r, Vec3::Y));

        let r = Vec3::Y.rotated_about(Vec3::X, -90.0);
        assert!(tol.approx_eq_vec3(r, Vec3::new(0.0, 0.0, -1.0)));

        // Degenerate axis: unchanged.
        assert_eq!(Vec3::X.rotated_about(Vec3::ZERO, 45.0), Vec3::X);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let v = Vec3::new(1.0, -2.0, 0.5);
        let r = v.rotated_about(Vec3::new(1.0, 1.0, 1.0), 37.0);
        assert!((r.length() - v.length()).abs() < 1e-12);
    }

    #[test]
    fn test_frame_is_right_handed() {
        let frame = Frame::from_tangent_normal(
            Point3::ORIGIN,
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(-1.0, 0.3, 0.0),
        );
        assert!(frame.is_right_handed_orthonormal(Tolerance::DEFAULT));
        assert!(Tolerance::DEFAULT.approx_eq_vec3(frame.normal, Vec3::new(-1.0, 0.0, 0.0)));
        assert!(Tolerance::DEFAULT.approx_eq_vec3(frame.binormal, Vec3::Z));
    }

    #[test]
    fn test_frame_fallbacks() {
        let frame = Frame::from_tangent_normal(Point3::ORIGIN, Vec3::ZERO, Vec3::X);
        assert_eq!(frame.tangent, Vec3::X);
        assert!(frame.is_right_handed_orthonormal(Tolerance::DEFAULT));
    }

    #[test]
    fn test_frame_roll_and_tilt_stay_orthonormal() {
        let frame = Frame::from_tangent_normal(Point3::new(3.0, 0.0, 0.0), Vec3::Y, -Vec3::X)
            .rolled(17.0)
            .rotated_about(Point3::ORIGIN, Vec3::X, 25.0);
        assert!(frame.is_right_handed_orthonormal(Tolerance::DEFAULT));
        assert!(Tolerance::DEFAULT.approx_eq_point3(frame.position, Point3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn test_offset_in_plane() {
        let frame = Frame::from_tangent_normal(Point3::ORIGIN, Vec3::Y, -Vec3::X);
        let p = frame.offset_in_plane(2.0, std::f64::consts::FRAC_PI_2);
        assert!(Tolerance::DEFAULT.approx_eq_point3(p, Point3::new(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_point_radius_xy() {
        assert!((Point3::new(3.0, 4.0, 9.0).radius_xy() - 5.0).abs() < 1e-12);
    }
}
