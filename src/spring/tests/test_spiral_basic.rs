use crate::geom::{Curve3, Point3};
use crate::spring::{
    ArchimedeanSpiral, CrossSection, GenerationOptions, SectionKind, SpiralTorsionInput,
    SpiralTorsionSpring, generate_spiral_torsion,
};

fn reference_spring() -> SpiralTorsionSpring {
    SpiralTorsionInput {
        inner_diameter: Some(15.0),
        outer_diameter: Some(50.0),
        turns: Some(5.0),
        strip_width: Some(10.0),
        strip_thickness: Some(0.8),
        ..SpiralTorsionInput::default()
    }
    .normalize()
}

#[test]
fn spiral_runs_from_inner_to_outer_radius() {
    let spiral = ArchimedeanSpiral::new(&reference_spring());
    assert!((spiral.radial_pitch() - 3.5).abs() < 1e-12);
    assert_eq!(spiral.point_at(0.0), Point3::new(7.5, 0.0, 0.0));
    let end = spiral.point_at(1.0);
    assert!((end.radius_xy() - 25.0).abs() < 1e-12);
    assert!(end.y.abs() < 1e-9);
}

#[test]
fn analytic_derivative_matches_the_curve() {
    let spiral = ArchimedeanSpiral::new(&reference_spring());
    let h = 1e-7;
    for t in [0.1, 0.4, 0.9] {
        let numeric = (spiral.point_at(t + h) - spiral.point_at(t - h)) / (2.0 * h);
        let analytic = spiral.derivative_at(t);
        assert!((numeric - analytic).length() / analytic.length() < 1e-5);
    }
}

#[test]
fn path_runs_inner_end_body_outer_end() {
    let centerline =
        generate_spiral_torsion(&reference_spring(), &GenerationOptions::default()).unwrap();
    let kinds: Vec<SectionKind> = centerline.path.sections().iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SectionKind::InnerEnd, SectionKind::Body, SectionKind::OuterEnd]);
    let body = centerline.path.section(SectionKind::Body).unwrap();
    assert_eq!(body.len(), 201);
    assert_eq!(body[0], Point3::new(7.5, 0.0, 0.0));
    assert!(centerline.path.points().iter().all(|p| p.z == 0.0));
}

#[test]
fn inner_leg_crosses_the_axis() {
    let spring = reference_spring();
    // Defaults to one and a half inner radii.
    assert!((spring.inner_leg_length - 11.25).abs() < 1e-12);
    let centerline = generate_spiral_torsion(&spring, &GenerationOptions::default()).unwrap();
    let inner = centerline.path.section(SectionKind::InnerEnd).unwrap();
    // Reversed: the leg tip comes first, the bend exit six segments later.
    let tip = inner[0];
    let bend_exit = inner[6];
    assert!((tip.distance_to(bend_exit) - spring.inner_leg_length).abs() < 1e-9);
    let leg = (tip - bend_exit).normalized().unwrap();
    let to_axis = Point3::ORIGIN - bend_exit;
    let miss = leg.cross(to_axis).length();
    assert!(miss < 1e-6, "inner leg misses the axis by {miss}");
    assert!(leg.dot(to_axis) > 0.0);
}

#[test]
fn outer_end_bends_away_from_the_coils() {
    let spring = reference_spring();
    let centerline = generate_spiral_torsion(&spring, &GenerationOptions::default()).unwrap();
    let outer = centerline.path.section(SectionKind::OuterEnd).unwrap();
    let tip = outer[outer.len() - 1];
    assert!(tip.radius_xy() > 25.0 + spring.side_length * 0.5);
}

#[test]
fn path_turns_smoothly_everywhere() {
    let centerline =
        generate_spiral_torsion(&reference_spring(), &GenerationOptions::default()).unwrap();
    let points = centerline.path.points();
    for (i, triple) in points.windows(3).enumerate() {
        let a = (triple[1] - triple[0]).normalized().unwrap();
        let b = (triple[2] - triple[1]).normalized().unwrap();
        assert!(a.dot(b) > 0.95, "kink at point {}", i + 1);
    }
}

#[test]
fn left_hand_winds_clockwise() {
    let spring = SpiralTorsionSpring {
        handedness: crate::spring::Handedness::Left,
        ..reference_spring()
    };
    let centerline = generate_spiral_torsion(&spring, &GenerationOptions::default()).unwrap();
    let body = centerline.path.section(SectionKind::Body).unwrap();
    assert!(body[1].y < 0.0);
}

#[test]
fn strip_cross_section_is_rectangular() {
    let centerline =
        generate_spiral_torsion(&reference_spring(), &GenerationOptions::default()).unwrap();
    assert_eq!(
        centerline.cross_section,
        CrossSection::Rectangular {
            width: 10.0,
            thickness: 0.8
        }
    );
}

#[test]
fn crowded_turns_are_rejected() {
    let spring = SpiralTorsionSpring {
        turns: 30.0,
        ..reference_spring()
    };
    let err = generate_spiral_torsion(&spring, &GenerationOptions::default()).unwrap_err();
    assert_eq!(err.field(), Some("turns"));
}

#[test]
fn outer_diameter_must_exceed_inner() {
    let spring = SpiralTorsionSpring {
        outer_diameter: 15.0,
        ..reference_spring()
    };
    let err = generate_spiral_torsion(&spring, &GenerationOptions::default()).unwrap_err();
    assert_eq!(err.field(), Some("outerDiameter"));
}

#[test]
fn turns_beyond_the_sample_budget_are_refused() {
    let options = GenerationOptions::new().min_samples(16).max_samples(100);
    let err = generate_spiral_torsion(&reference_spring(), &options).unwrap_err();
    assert_eq!(err.field(), Some("turns"));
}
