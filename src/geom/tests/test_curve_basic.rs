use std::f64::consts::{FRAC_PI_2, PI};

use crate::geom::{
    Arc3, CubicBezier3, Curve3, Line3, Point3, Tolerance, Vec3, cumulative_lengths,
    tessellate_curve_uniform,
};

#[test]
fn tessellate_curve_preserves_endpoints() {
    let line = Line3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0));
    let pts = tessellate_curve_uniform(&line, 10);
    assert_eq!(pts.first().copied(), Some(line.start));
    assert_eq!(pts.last().copied(), Some(line.end));
    assert_eq!(pts.len(), 11);
}

#[test]
fn line_from_ray_has_requested_length() {
    let line = Line3::from_ray(Point3::ORIGIN, Vec3::new(0.0, 3.0, 4.0), 2.0);
    assert!((line.direction().length() - 2.0).abs() < 1e-12);
    assert!(Tolerance::DEFAULT.approx_eq_point3(line.end, Point3::new(0.0, 1.2, 1.6)));
}

#[test]
fn arc_has_expected_endpoints_with_explicit_frame() {
    let arc = Arc3::from_center_axes(Point3::ORIGIN, Vec3::X, Vec3::Y, 1.0, 0.0, FRAC_PI_2);
    let tol = Tolerance::new(1e-9);
    assert!(tol.approx_eq_point3(arc.point_at(0.0), Point3::new(1.0, 0.0, 0.0)));
    assert!(tol.approx_eq_point3(arc.point_at(1.0), Point3::new(0.0, 1.0, 0.0)));
    let tangent = arc.tangent_at(0.0).unwrap();
    assert!(tol.approx_eq_vec3(tangent, Vec3::Y));
}

#[test]
fn tangent_continuation_starts_on_the_ray() {
    let start = Point3::new(2.0, 0.0, 0.0);
    let arc = Arc3::tangent_continuation(start, Vec3::Y, Vec3::new(-1.0, 0.0, 0.0), 0.5, PI);
    let tol = Tolerance::new(1e-9);
    assert!(tol.approx_eq_point3(arc.point_at(0.0), start));
    assert!(tol.approx_eq_vec3(arc.tangent_at(0.0).unwrap(), Vec3::Y));
    // Half a turn towards -X reverses the direction one diameter over.
    assert!(tol.approx_eq_point3(arc.point_at(1.0), Point3::new(1.0, 0.0, 0.0)));
    assert!(tol.approx_eq_vec3(arc.tangent_at(1.0).unwrap(), -Vec3::Y));
}

#[test]
fn bezier_from_tangents_matches_end_directions() {
    let curve = CubicBezier3::from_tangents(
        Point3::ORIGIN,
        Vec3::X,
        Point3::new(3.0, 3.0, 1.0),
        Vec3::Z,
        1.5,
    );
    let t0 = curve.tangent_at(0.0).unwrap();
    let t1 = curve.tangent_at(1.0).unwrap();
    assert!(t0.dot(Vec3::X) > 0.999_999);
    assert!(t1.dot(Vec3::Z) > 0.999_999);
    assert_eq!(curve.point_at(0.0), Point3::ORIGIN);
    assert_eq!(curve.point_at(1.0), Point3::new(3.0, 3.0, 1.0));
}

#[test]
fn numeric_derivative_agrees_with_analytic() {
    let curve = CubicBezier3::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 2.0, 0.0),
        Point3::new(2.0, -1.0, 1.0),
        Point3::new(4.0, 0.0, 2.0),
    );
    struct Numeric<'a>(&'a CubicBezier3);
    impl Curve3 for Numeric<'_> {
        fn point_at(&self, t: f64) -> Point3 {
            self.0.point_at(t)
        }
    }
    let analytic = curve.derivative_at(0.4);
    let numeric = Numeric(&curve).derivative_at(0.4);
    assert!(Tolerance::new(1e-5).approx_eq_vec3(analytic, numeric));
}

#[test]
fn cumulative_lengths_accumulate_chords() {
    let pts = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(3.0, 4.0, 0.0),
        Point3::new(3.0, 4.0, 2.0),
    ];
    assert_eq!(cumulative_lengths(&pts), vec![0.0, 5.0, 7.0]);
}
