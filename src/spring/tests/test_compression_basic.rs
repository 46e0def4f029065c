use crate::geom::{Point3, Tolerance};
use crate::spring::{
    CompressionInput, ConicalInput, EndType, GenerationOptions, Handedness, NormalizedSpring,
    PitchStrategy, SectionKind, SpringError, generate_compression, generate_conical,
    generate_normalized,
};

fn reference_input() -> CompressionInput {
    CompressionInput {
        wire_diameter: Some(3.2),
        mean_diameter: Some(24.0),
        active_coils: Some(8.0),
        total_coils: Some(10.0),
        free_length: Some(50.0),
        ..CompressionInput::default()
    }
}

#[test]
fn reference_spring_starts_on_the_x_axis() {
    let spring = reference_input().normalize();
    let centerline = generate_compression(&spring, &GenerationOptions::default()).unwrap();
    let first = centerline.path.first().unwrap();
    assert!(Tolerance::new(1e-12).approx_eq_point3(first, Point3::new(12.0, 0.0, 0.0)));
}

#[test]
fn reference_spring_spans_the_free_length() {
    let spring = reference_input().normalize();
    let centerline = generate_compression(&spring, &GenerationOptions::default()).unwrap();
    let (lo, hi) = centerline.path.z_range();
    assert_eq!(lo, 0.0);
    assert!((hi - lo - 50.0).abs() <= 1e-6 * 50.0);
    assert!((centerline.path.last().unwrap().z - 50.0).abs() < 1e-6);
}

#[test]
fn height_conservation_holds_over_a_grid() {
    for d in [1.0, 2.5, 3.2] {
        for mean in [10.0, 24.0] {
            for (na, nt) in [(4.0, 6.0), (8.0, 10.0), (7.5, 9.5)] {
                let free = nt * d * 1.8;
                let spring = CompressionInput {
                    wire_diameter: Some(d),
                    mean_diameter: Some(mean),
                    active_coils: Some(na),
                    total_coils: Some(nt),
                    free_length: Some(free),
                    ..CompressionInput::default()
                }
                .normalize();
                let centerline =
                    generate_compression(&spring, &GenerationOptions::default()).unwrap();
                let (lo, hi) = centerline.path.z_range();
                assert!((hi - lo - free).abs() <= 1e-6 * free, "d={d} D={mean} Na={na}");
            }
        }
    }
}

#[test]
fn z_never_decreases_and_radius_is_constant() {
    let spring = reference_input().normalize();
    let centerline = generate_compression(&spring, &GenerationOptions::default()).unwrap();
    let points = centerline.path.points();
    assert!(points.windows(2).all(|pair| pair[0].z <= pair[1].z));
    assert!(points.iter().all(|p| (p.radius_xy() - 12.0).abs() < 1e-9));
}

#[test]
fn sample_count_follows_the_options() {
    let spring = reference_input().normalize();
    let centerline = generate_compression(&spring, &GenerationOptions::default()).unwrap();
    // max(200, 10 * 36) samples plus the closing point.
    assert_eq!(centerline.path.len(), 361);

    let coarse = GenerationOptions::new().samples_per_turn(8).min_samples(20);
    let centerline = generate_compression(&spring, &coarse).unwrap();
    assert_eq!(centerline.path.len(), 81);
}

#[test]
fn closed_ground_ends_carry_grinding_planes() {
    let spring = reference_input().normalize();
    assert_eq!(spring.end_type, EndType::ClosedGround);
    let centerline = generate_compression(&spring, &GenerationOptions::default()).unwrap();
    let grinding = centerline.grinding.expect("ground ends");
    assert!((grinding.bottom_cut_z - 0.96).abs() < 1e-9);
    assert!((grinding.top_cut_z - 49.04).abs() < 1e-6);

    let open = CompressionInput {
        end_type: Some("open".into()),
        ..reference_input()
    }
    .normalize();
    let centerline = generate_compression(&open, &GenerationOptions::default()).unwrap();
    assert!(centerline.grinding.is_none());
}

#[test]
fn deflection_shortens_the_active_region() {
    let spring = CompressionInput {
        current_deflection: Some(10.0),
        ..reference_input()
    }
    .normalize();
    let centerline = generate_compression(&spring, &GenerationOptions::default()).unwrap();
    let (lo, hi) = centerline.path.z_range();
    assert!((hi - lo - 40.0).abs() < 1e-6);
}

#[test]
fn uniform_pitch_strategy_is_linear_in_turns() {
    let spring = reference_input().normalize();
    let options = GenerationOptions::new().pitch_strategy(PitchStrategy::Uniform);
    let centerline = generate_compression(&spring, &options).unwrap();
    let points = centerline.path.points();
    let n = points.len() - 1;
    for (i, p) in points.iter().enumerate() {
        let expected = 50.0 * i as f64 / n as f64;
        assert!((p.z - expected).abs() < 1e-9);
    }
}

#[test]
fn left_hand_winds_clockwise() {
    let spring = CompressionInput {
        handedness: Some("left".into()),
        ..reference_input()
    }
    .normalize();
    assert_eq!(spring.handedness, Handedness::Left);
    let centerline = generate_compression(&spring, &GenerationOptions::default()).unwrap();
    assert!(centerline.path.points()[1].y < 0.0);
}

#[test]
fn zero_mean_diameter_is_degenerate() {
    let spring = CompressionInput {
        mean_diameter: Some(0.0),
        ..reference_input()
    }
    .normalize();
    let err = generate_compression(&spring, &GenerationOptions::default()).unwrap_err();
    assert_eq!(err.field(), Some("meanDiameter"));
}

#[test]
fn conical_tapers_from_large_to_small() {
    let spring = ConicalInput {
        wire_diameter: Some(3.0),
        large_outer_diameter: Some(30.0),
        small_outer_diameter: Some(15.0),
        active_coils: Some(6.0),
        free_length: Some(50.0),
        ..ConicalInput::default()
    }
    .normalize();
    let centerline = generate_conical(&spring, &GenerationOptions::default()).unwrap();
    let first = centerline.path.first().unwrap();
    let last = centerline.path.last().unwrap();
    assert!((first.radius_xy() - 13.5).abs() < 1e-9);
    assert!((last.radius_xy() - 6.0).abs() < 1e-9);
    assert!((last.z - 50.0).abs() < 1e-6);
    let points = centerline.path.points();
    assert!(points.windows(2).all(|pair| pair[0].z <= pair[1].z));
    assert!(
        points
            .windows(2)
            .all(|pair| pair[1].radius_xy() <= pair[0].radius_xy() + 1e-12)
    );
}

#[test]
fn conical_with_dead_coils_keeps_tight_ends() {
    let spring = ConicalInput {
        wire_diameter: Some(3.0),
        large_outer_diameter: Some(30.0),
        small_outer_diameter: Some(15.0),
        active_coils: Some(6.0),
        total_coils: Some(8.0),
        free_length: Some(50.0),
        ..ConicalInput::default()
    }
    .normalize();
    let centerline = generate_conical(&spring, &GenerationOptions::default()).unwrap();
    // 8 turns at 36 per turn is 288 samples; 36 samples is exactly one turn.
    let after_one_turn = centerline.path.points()[36];
    assert!((after_one_turn.z - 3.0).abs() < 1e-9);
}

#[test]
fn generated_path_is_a_single_body_section() {
    let spring = NormalizedSpring::Compression(reference_input().normalize());
    let centerline = generate_normalized(&spring, &GenerationOptions::default()).unwrap();
    let sections = centerline.path.sections();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].kind, SectionKind::Body);
    assert_eq!(sections[0].first, 0);
    assert_eq!(sections[0].last, centerline.path.len() - 1);
}

#[test]
fn frames_follow_the_path_when_requested() {
    let spring = NormalizedSpring::Compression(reference_input().normalize());
    let options = GenerationOptions::new().include_frames(true);
    let centerline = generate_normalized(&spring, &options).unwrap();
    let frames = centerline.path.frames().expect("frames requested");
    assert_eq!(frames.len(), centerline.path.len());
    let tol = Tolerance::new(1e-9);
    assert!(frames.iter().all(|f| f.is_right_handed_orthonormal(tol)));
}

#[test]
fn coil_count_beyond_the_sample_budget_is_refused() {
    let spring = CompressionInput {
        active_coils: Some(1e7),
        total_coils: Some(1e7),
        free_length: Some(1e9),
        end_type: Some("open".into()),
        ..reference_input()
    }
    .normalize();
    let err = generate_compression(&spring, &GenerationOptions::default()).unwrap_err();
    assert!(matches!(err, SpringError::DegenerateGeometry { .. }));
    assert_eq!(err.field(), Some("totalCoils"));
    assert!(err.to_string().contains("maxSamples 1000000"), "{err}");
}

#[test]
fn sample_budget_is_configurable() {
    let spring = reference_input().normalize();
    let tight = GenerationOptions::new().max_samples(300);
    let err = generate_compression(&spring, &tight).unwrap_err();
    assert_eq!(err.field(), Some("totalCoils"));
    let exact = GenerationOptions::new().max_samples(360);
    assert_eq!(generate_compression(&spring, &exact).unwrap().path.len(), 361);
}
