use crate::geom::{Point3, Tolerance, Vec3, polyline_frames, polyline_tangents};

fn helix_points(turns: f64, samples: usize) -> Vec<Point3> {
    (0..=samples)
        .map(|i| {
            let t = i as f64 / samples as f64;
            let theta = t * std::f64::consts::TAU * turns;
            Point3::new(5.0 * theta.cos(), 5.0 * theta.sin(), 8.0 * t)
        })
        .collect()
}

#[test]
fn frames_are_right_handed_along_a_helix() {
    let points = helix_points(3.0, 240);
    let frames = polyline_frames(&points, Vec3::Z);
    assert_eq!(frames.len(), points.len());
    let tol = Tolerance::new(1e-9);
    for frame in &frames {
        assert!(frame.is_right_handed_orthonormal(tol));
    }
}

#[test]
fn frames_on_a_straight_line_do_not_twist() {
    let points: Vec<Point3> = (0..10).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
    let frames = polyline_frames(&points, Vec3::Y);
    for frame in &frames {
        assert!(Tolerance::DEFAULT.approx_eq_vec3(frame.normal, Vec3::Y));
        assert!(Tolerance::DEFAULT.approx_eq_vec3(frame.binormal, Vec3::Z));
    }
}

#[test]
fn frames_follow_point_positions() {
    let points = helix_points(1.0, 36);
    let frames = polyline_frames(&points, Vec3::Z);
    for (frame, point) in frames.iter().zip(&points) {
        assert_eq!(frame.position, *point);
    }
}

#[test]
fn tangents_point_forward() {
    let points = helix_points(1.0, 72);
    let tangents = polyline_tangents(&points);
    for (i, t) in tangents.iter().enumerate().take(points.len() - 1) {
        let chord = points[i + 1] - points[i];
        assert!(t.dot(chord) > 0.0);
    }
}
