use crate::geom::{Point3, Tolerance};
use crate::spring::{
    GenerationOptions, SectionKind, TorsionInput, TorsionSpring, generate_torsion,
};

fn reference_spring() -> TorsionSpring {
    TorsionInput {
        wire_diameter: Some(1.5),
        mean_diameter: Some(12.0),
        active_coils: Some(6.0),
        body_length: Some(9.9),
        leg_length1: Some(25.0),
        leg_length2: Some(25.0),
        ..TorsionInput::default()
    }
    .normalize()
}

#[test]
fn path_runs_leg_body_leg() {
    let centerline = generate_torsion(&reference_spring(), &GenerationOptions::default()).unwrap();
    let kinds: Vec<SectionKind> = centerline.path.sections().iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SectionKind::StartLeg, SectionKind::Body, SectionKind::EndLeg]);
    // 216 body samples plus the closing point, six segments per leg.
    assert_eq!(centerline.path.len(), 217 + 6 + 6);
    let body = centerline.path.section(SectionKind::Body).unwrap();
    assert_eq!(body.len(), 217);
}

#[test]
fn tangential_legs_continue_the_coil() {
    let centerline = generate_torsion(&reference_spring(), &GenerationOptions::default()).unwrap();
    // End tangents come from a one-sided difference.
    let tol = Tolerance::new(1e-3);
    let first = centerline.path.first().unwrap();
    let last = centerline.path.last().unwrap();
    assert!(tol.approx_eq_point3(first, Point3::new(6.0, -25.0, 0.0)));
    assert!(tol.approx_eq_point3(last, Point3::new(6.0, 25.0, 9.9)));
}

#[test]
fn legs_stay_level_with_the_body_ends() {
    let centerline = generate_torsion(&reference_spring(), &GenerationOptions::default()).unwrap();
    let start_leg = centerline.path.section(SectionKind::StartLeg).unwrap();
    let end_leg = centerline.path.section(SectionKind::EndLeg).unwrap();
    assert!(start_leg.iter().all(|p| p.z.abs() < 1e-12));
    assert!(end_leg.iter().all(|p| (p.z - 9.9).abs() < 1e-9));
    let lengths = centerline.path.arc_lengths();
    let leg1 = lengths[start_leg.len() - 1];
    assert!((leg1 - 25.0).abs() < 1e-9);
}

#[test]
fn radial_legs_point_away_from_the_axis() {
    let spring = TorsionSpring {
        leg_style: crate::spring::LegStyle::Radial,
        ..reference_spring()
    };
    let centerline = generate_torsion(&spring, &GenerationOptions::default()).unwrap();
    let tol = Tolerance::new(1e-9);
    assert!(tol.approx_eq_point3(centerline.path.first().unwrap(), Point3::new(31.0, 0.0, 0.0)));
    assert!((centerline.path.last().unwrap().radius_xy() - 31.0).abs() < 1e-9);
}

#[test]
fn wind_up_adds_turns_to_the_body() {
    let spring = TorsionSpring {
        free_angle_deg: 90.0,
        working_angle_deg: 0.0,
        ..reference_spring()
    };
    assert_eq!(spring.loaded_turns(), 6.25);
    let centerline = generate_torsion(&spring, &GenerationOptions::default()).unwrap();
    let body = centerline.path.section(SectionKind::Body).unwrap();
    assert_eq!(body.len(), 226);
    // A quarter turn past a whole number ends on +Y.
    let end = body[body.len() - 1];
    assert!(end.x.abs() < 1e-9);
    assert!((end.y - 6.0).abs() < 1e-9);
}

#[test]
fn left_winding_mirrors_the_start_leg() {
    let spring = TorsionSpring {
        winding_direction: crate::spring::Handedness::Left,
        ..reference_spring()
    };
    let centerline = generate_torsion(&spring, &GenerationOptions::default()).unwrap();
    let first = centerline.path.first().unwrap();
    assert!(Tolerance::new(1e-3).approx_eq_point3(first, Point3::new(6.0, 25.0, 0.0)));
}

#[test]
fn zero_length_leg_is_allowed() {
    let spring = TorsionSpring {
        leg_length1: 0.0,
        ..reference_spring()
    };
    let centerline = generate_torsion(&spring, &GenerationOptions::default()).unwrap();
    assert_eq!(centerline.path.first().unwrap(), Point3::new(6.0, 0.0, 0.0));
    assert_eq!(centerline.path.len(), 217 + 6);
}

#[test]
fn excessive_wind_up_is_rejected() {
    let spring = TorsionSpring {
        working_angle_deg: 3000.0,
        ..reference_spring()
    };
    let err = generate_torsion(&spring, &GenerationOptions::default()).unwrap_err();
    assert_eq!(err.field(), Some("workingAngleDeg"));
}

#[test]
fn negative_leg_is_rejected() {
    let spring = TorsionSpring {
        leg_length2: -1.0,
        ..reference_spring()
    };
    let err = generate_torsion(&spring, &GenerationOptions::default()).unwrap_err();
    assert_eq!(err.field(), Some("legLength2"));
}
