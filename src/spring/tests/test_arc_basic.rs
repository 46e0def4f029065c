use std::f64::consts::PI;

use crate::geom::{Point3, Tolerance, Vec3};
use crate::spring::{
    AnchorMapping, ArcBackbone, ArcInput, GenerationOptions, arc_layout, coil_radius_profile,
    generate_arc,
};

fn reference_input() -> ArcInput {
    ArcInput {
        wire_diameter: Some(5.0),
        mean_diameter: Some(30.0),
        active_coils: Some(8.0),
        arc_radius: Some(150.0),
        alpha_deg: Some(60.0),
        ..ArcInput::default()
    }
}

#[test]
fn backbone_frames_are_right_handed_with_z_binormal() {
    let backbone = ArcBackbone::new(150.0, 60.0, 0.0, 0.0, 120);
    assert_eq!(backbone.frames.len(), 121);
    let tol = Tolerance::new(1e-9);
    for frame in &backbone.frames {
        assert!(frame.is_right_handed_orthonormal(tol));
        assert!(tol.approx_eq_vec3(frame.binormal, Vec3::Z));
        // Normal points at the arc center.
        let inward = (Point3::ORIGIN - frame.position) / 150.0;
        assert!(tol.approx_eq_vec3(frame.normal, inward));
    }
    assert!(tol.approx_eq_point3(backbone.frames[0].position, Point3::new(150.0, 0.0, 0.0)));
}

#[test]
fn backbone_length_approaches_the_arc() {
    let backbone = ArcBackbone::new(150.0, 60.0, 0.0, 0.0, 360);
    let exact = 150.0 * PI / 3.0;
    assert!(backbone.total_length() < exact);
    assert!(exact - backbone.total_length() < 1e-3);
}

#[test]
fn tilt_and_lean_keep_lengths_and_orthonormality() {
    let flat = ArcBackbone::new(150.0, 90.0, 0.0, 0.0, 64);
    let tilted = ArcBackbone::new(150.0, 90.0, 25.0, 10.0, 64);
    assert!((flat.total_length() - tilted.total_length()).abs() < 1e-9);
    let tol = Tolerance::new(1e-9);
    assert!(tilted.frames.iter().all(|f| f.is_right_handed_orthonormal(tol)));
    assert!(tilted.frames.iter().any(|f| f.position.z.abs() > 1.0));
}

#[test]
fn turn_counts_are_pinned_for_every_blend() {
    let lengths: Vec<f64> = (0..=100).map(|i| f64::from(i) * 1.5).collect();
    for k in [0.0, 0.25, 0.5, 1.0] {
        let mapping = AnchorMapping::new(150.0, 5.0, 1.0, 8.0, 1.5, k, 0.95);
        let counts = mapping.turn_counts(&lengths);
        assert_eq!(counts[0], 0.0);
        assert_eq!(counts[counts.len() - 1], 10.5);
        assert!(counts.windows(2).all(|pair| pair[0] <= pair[1]), "k={k}");
    }
}

#[test]
fn uniform_blend_spreads_coils_evenly() {
    let mapping = AnchorMapping::new(100.0, 5.0, 1.0, 8.0, 1.0, 0.0, 0.95);
    assert!((mapping.anchor_ls - 10.0).abs() < 1e-12);
    assert!((mapping.anchor_le - 10.0).abs() < 1e-12);
    for l in [0.0, 5.0, 37.5, 90.0, 100.0] {
        assert!((mapping.turn_count(l) - l / 10.0).abs() < 1e-12);
    }
}

#[test]
fn solid_blend_packs_dead_coils_at_wire_pitch() {
    let mapping = AnchorMapping::new(100.0, 5.0, 1.0, 8.0, 2.0, 1.0, 0.95);
    assert!((mapping.anchor_ls - 5.0).abs() < 1e-12);
    assert!((mapping.anchor_le - 10.0).abs() < 1e-12);
    assert!(!mapping.capped);
    assert!((mapping.turn_count(5.0) - 1.0).abs() < 1e-12);
    assert!((mapping.turn_count(mapping.active_end()) - 9.0).abs() < 1e-12);
}

#[test]
fn anchors_respect_the_cap() {
    let mapping = AnchorMapping::new(150.0, 5.0, 20.0, 2.0, 20.0, 1.0, 0.95);
    assert!(mapping.capped);
    let sum = mapping.anchor_ls + mapping.anchor_le;
    assert!(sum <= 0.95 * 150.0 + 1e-9);
    assert!((mapping.anchor_ls - mapping.anchor_le).abs() < 1e-12);
    assert!(mapping.active_end() > mapping.anchor_ls);
}

#[test]
fn layout_samples_by_the_densest_zone() {
    let spring = reference_input().normalize();
    let (backbone, mapping) = arc_layout(&spring, &GenerationOptions::default()).unwrap();
    // One dead coil on a 10.35 anchor of a 157.08 arc needs 547 samples, plus one.
    assert_eq!(backbone.frames.len(), 549);
    assert_eq!(mapping.total_coils(), 10.0);
    assert_eq!(mapping.l_total, backbone.total_length());
}

#[test]
fn uniform_blend_keeps_the_plain_turn_count() {
    let spring = ArcInput {
        blend: Some(0.0),
        ..reference_input()
    }
    .normalize();
    let (backbone, _) = arc_layout(&spring, &GenerationOptions::default()).unwrap();
    // Ten coils at 36 samples per turn, plus the chord margin.
    let samples = backbone.frames.len() - 1;
    assert!((360..=362).contains(&samples), "{samples}");
}

fn points_per_turn(counts: &[f64], total: f64) -> Vec<usize> {
    let mut per_turn = vec![0; total.ceil() as usize];
    for &t in counts {
        let turn = t.floor() as usize;
        if turn < per_turn.len() {
            per_turn[turn] += 1;
        }
    }
    per_turn
}

#[test]
fn solid_dead_coils_on_thin_wire_keep_the_turn_resolution() {
    let spring = ArcInput {
        wire_diameter: Some(2.0),
        blend: Some(1.0),
        ..reference_input()
    }
    .normalize();
    let options = GenerationOptions::default();
    let centerline = generate_arc(&spring, &options).unwrap();
    let counts = centerline.turn_counts.as_ref().unwrap();
    let per_turn = points_per_turn(counts, 10.0);
    assert_eq!(per_turn.len(), 10);
    for (turn, &n) in per_turn.iter().enumerate() {
        assert!(
            n >= options.samples_per_turn,
            "turn {turn} has {n} points, fewer than {}",
            options.samples_per_turn
        );
    }
}

#[test]
fn every_turn_of_the_reference_spring_is_resolved() {
    let spring = reference_input().normalize();
    let options = GenerationOptions::default();
    let centerline = generate_arc(&spring, &options).unwrap();
    let per_turn = points_per_turn(centerline.turn_counts.as_ref().unwrap(), 10.0);
    assert!(per_turn.iter().all(|&n| n >= options.samples_per_turn));
}

#[test]
fn dense_anchor_beyond_the_budget_is_refused() {
    let spring = ArcInput {
        wire_diameter: Some(0.01),
        blend: Some(1.0),
        ..reference_input()
    }
    .normalize();
    let options = GenerationOptions::default().max_samples(5_000);
    let err = generate_arc(&spring, &options).unwrap_err();
    assert_eq!(err.field(), Some("n"));
}

#[test]
fn reference_arc_spring_starts_and_ends_on_the_backbone_normal() {
    let spring = reference_input().normalize();
    let centerline = generate_arc(&spring, &GenerationOptions::default()).unwrap();
    let tol = Tolerance::new(1e-9);
    let first = centerline.path.first().unwrap();
    assert!(tol.approx_eq_point3(first, Point3::new(135.0, 0.0, 0.0)));
    let (s, c) = (PI / 3.0).sin_cos();
    let last = centerline.path.last().unwrap();
    assert!(tol.approx_eq_point3(last, Point3::new(135.0 * c, 135.0 * s, 0.0)));

    let counts = centerline.turn_counts.as_ref().expect("arc reports turn counts");
    assert_eq!(counts.len(), centerline.path.len());
    assert_eq!(counts[counts.len() - 1], 10.0);
}

#[test]
fn coils_stay_at_their_radius_from_the_backbone() {
    let spring = reference_input().normalize();
    let (backbone, _) = arc_layout(&spring, &GenerationOptions::default()).unwrap();
    let centerline = generate_arc(&spring, &GenerationOptions::default()).unwrap();
    for (frame, p) in backbone.frames.iter().zip(centerline.path.points()) {
        assert!((p.distance_to(frame.position) - 15.0).abs() < 1e-9);
    }
}

#[test]
fn barrel_profile_bulges_mid_span() {
    let spring = ArcInput {
        profile: Some("barrel".into()),
        mid_mean_diameter: Some(36.0),
        ..reference_input()
    }
    .normalize();
    let profile = coil_radius_profile(&spring);
    assert!((profile.radius_at(0.0) - 15.0).abs() < 1e-12);
    assert!((profile.radius_at(0.5) - 18.0).abs() < 1e-12);
    assert!((profile.radius_at(1.0) - 15.0).abs() < 1e-12);
    assert!(generate_arc(&spring, &GenerationOptions::default()).is_ok());
}

#[test]
fn conical_profile_holds_dead_zones_constant() {
    let spring = ArcInput {
        profile: Some("conical".into()),
        end_mean_diameter: Some(20.0),
        ..reference_input()
    }
    .normalize();
    let profile = coil_radius_profile(&spring);
    // One dead coil of ten at each end.
    assert_eq!(profile.radius_at(0.05), 15.0);
    assert_eq!(profile.radius_at(0.95), 10.0);
    assert!((profile.radius_at(0.5) - 12.5).abs() < 1e-12);
}

#[test]
fn sweep_outside_a_full_turn_is_rejected() {
    let spring = ArcInput {
        alpha_deg: Some(400.0),
        ..reference_input()
    }
    .normalize();
    let err = generate_arc(&spring, &GenerationOptions::default()).unwrap_err();
    assert_eq!(err.field(), Some("alphaDeg"));
}

#[test]
fn coils_may_not_reach_the_arc_center() {
    let spring = ArcInput {
        mean_diameter: Some(320.0),
        ..reference_input()
    }
    .normalize();
    let err = generate_arc(&spring, &GenerationOptions::default()).unwrap_err();
    assert_eq!(err.field(), Some("D"));
}
