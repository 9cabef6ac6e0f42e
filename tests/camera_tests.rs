// Host-side tests for the path curve, pose synthesis and camera tweens.

use glam::Vec3;
use odyssey_core::constants::*;
use odyssey_core::{
    default_sections, nearest_anchor, planet_anchors, Camera, CameraMode, CameraPose, CameraTween,
    CurveKind, Easing, PathCurve, PlanetAnchor, PoseSynthesizer, SceneError, SectionCurveTable,
    TrailingRig,
};
use std::time::Duration;

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn catmull_rom_passes_through_control_points() {
    let curve = PathCurve::default();
    let points = curve.points().to_vec();
    let last = points.len() - 1;
    for (i, p) in points.iter().enumerate() {
        let u = i as f32 / last as f32;
        assert!(close(curve.point_at(u), *p), "point {i}");
    }
}

#[test]
fn bezier_touches_only_the_endpoints() {
    let pts = vec![Vec3::ZERO, Vec3::new(1.0, 2.0, 0.0), Vec3::new(2.0, 0.0, 0.0)];
    let curve = PathCurve::new(pts.clone(), CurveKind::Bezier);
    assert!(close(curve.point_at(0.0), pts[0]));
    assert!(close(curve.point_at(1.0), pts[2]));
    // Quadratic midpoint is a quarter of the way to the middle control.
    assert!(close(curve.point_at(0.5), Vec3::new(1.0, 1.0, 0.0)));
}

#[test]
fn sampling_is_clamped_and_nan_safe() {
    let curve = PathCurve::default();
    assert_eq!(curve.point_at(-1.0), curve.point_at(0.0));
    assert_eq!(curve.point_at(2.0), curve.point_at(1.0));
    assert_eq!(curve.point_at(f32::NAN), curve.point_at(0.0));
}

#[test]
fn tangent_is_unit_and_points_forward() {
    let curve = PathCurve::default();
    for u in [0.0, 0.3, 0.6, 1.0] {
        let t = curve.tangent_at(u);
        assert!((t.length() - 1.0).abs() < 1e-4);
        // The path heads down -Z overall.
        assert!(t.z < 0.0, "u={u} tangent={t:?}");
    }
}

#[test]
fn degenerate_curves_are_reported_and_fall_back() {
    let empty = PathCurve::catmull_rom(Vec::<Vec3>::new());
    assert_eq!(empty.check(), Err(SceneError::DegenerateGeometry { points: 0 }));
    assert_eq!(empty.point_at(0.5), Vec3::ZERO);
    assert_eq!(empty.tangent_at(0.5), Vec3::NEG_Z);

    let single = PathCurve::catmull_rom(vec![Vec3::ONE]);
    assert!(single.is_degenerate());
    assert_eq!(single.point_at(0.7), Vec3::ONE);

    let table = SectionCurveTable::build(&default_sections());
    let synth = PoseSynthesizer::for_table(single, &table);
    for mode in [CameraMode::CurveFollow, CameraMode::ThirdPerson] {
        assert_eq!(synth.synthesize(0.4, mode), CameraPose::fallback());
    }
}

#[test]
fn anchors_sit_beside_the_path_at_planet_t() {
    let curve = PathCurve::default();
    let table = SectionCurveTable::build(&default_sections());
    let anchors = planet_anchors(&curve, &table);
    assert_eq!(anchors.len(), 3);
    for (a, t) in anchors.iter().zip(table.planet_t()) {
        assert_eq!(a.t, t);
        assert!(close(a.position, curve.point_at(t) + PLANET_ANCHOR_OFFSET));
    }
}

#[test]
fn nearest_anchor_prefers_lowest_on_ties() {
    let anchors = [
        PlanetAnchor { t: 0.2, position: Vec3::ZERO },
        PlanetAnchor { t: 0.6, position: Vec3::ONE },
    ];
    assert_eq!(nearest_anchor(&anchors, 0.0), Some(0));
    assert_eq!(nearest_anchor(&anchors, 0.4), Some(0));
    assert_eq!(nearest_anchor(&anchors, 0.5), Some(1));
    assert_eq!(nearest_anchor(&[], 0.5), None);
}

#[test]
fn curve_follow_rides_the_path_and_faces_the_nearest_planet() {
    let curve = PathCurve::default();
    let table = SectionCurveTable::build(&default_sections());
    let synth = PoseSynthesizer::for_table(curve.clone(), &table);
    let p = 0.3;
    let pose = synth.synthesize(p, CameraMode::CurveFollow);
    assert!(close(pose.position, curve.point_at(p)));
    let i = nearest_anchor(synth.anchors(), p).unwrap();
    assert_eq!(pose.look_at, synth.anchors()[i].position);
}

#[test]
fn third_person_trails_behind_and_above() {
    let curve = PathCurve::default();
    let table = SectionCurveTable::build(&default_sections());
    let synth = PoseSynthesizer::for_table(curve.clone(), &table);
    let rig = TrailingRig::default();
    let p = 0.5;
    let pose = synth.synthesize(p, CameraMode::ThirdPerson);
    let tangent = curve.tangent_at(p);

    let expected_look = curve.point_at(p) + tangent * rig.look_ahead;
    assert!(close(pose.look_at, expected_look));

    // Behind the tracked point along the direction of travel.
    let ship = synth.ship(p);
    assert!((pose.position - ship.position).dot(tangent) < 0.0);
    // Lifted off the path.
    let trailing = curve.point_at(p - rig.t_offset);
    let lift = pose.position - (trailing - tangent * rig.distance);
    assert!((lift.length() - rig.height).abs() < 1e-3);
}

#[test]
fn third_person_clamps_trailing_sample_at_the_start() {
    let curve = PathCurve::default();
    let table = SectionCurveTable::build(&default_sections());
    let synth = PoseSynthesizer::for_table(curve, &table);
    let pose = synth.synthesize(0.0, CameraMode::ThirdPerson);
    assert!(pose.position.is_finite() && pose.look_at.is_finite());
    assert_eq!(pose, synth.synthesize(-1.0, CameraMode::ThirdPerson));
}

#[test]
fn tween_goes_from_start_to_target() {
    let a = CameraPose::new(Vec3::ZERO, Vec3::NEG_Z);
    let b = CameraPose::new(Vec3::new(10.0, 0.0, 0.0), Vec3::X);
    let mut tween = CameraTween::new(a, b, Duration::from_millis(900));
    assert_eq!(tween.sample(), a);
    let mid = tween.advance(Duration::from_millis(450));
    assert!(close(mid.position, Vec3::new(5.0, 0.0, 0.0)));
    assert!(!tween.is_finished());
    let end = tween.advance(Duration::from_millis(1000));
    assert_eq!(end, b);
    assert!(tween.is_finished());
}

#[test]
fn retargeted_tween_ends_on_the_new_target() {
    let a = CameraPose::new(Vec3::ZERO, Vec3::NEG_Z);
    let b = CameraPose::new(Vec3::X, Vec3::NEG_Z);
    let c = CameraPose::new(Vec3::Y, Vec3::NEG_Z);
    let mut tween = CameraTween::new(a, b, Duration::from_millis(100)).with_easing(Easing::Linear);
    tween.advance(Duration::from_millis(50));
    tween.retarget(c);
    assert_eq!(tween.target(), c);
    assert_eq!(tween.advance(Duration::from_millis(50)), c);
}

#[test]
fn zero_length_tween_is_already_done() {
    let a = CameraPose::fallback();
    let b = CameraPose::new(Vec3::ZERO, Vec3::X);
    let tween = CameraTween::new(a, b, Duration::ZERO);
    assert!(tween.is_finished());
    assert_eq!(tween.sample(), b);
}

#[test]
fn camera_matrices_are_finite_even_when_eye_meets_target() {
    let pose = CameraPose::new(Vec3::ONE, Vec3::ONE);
    let cam = Camera::from_pose(&pose, 16.0 / 9.0);
    assert!(cam.view_matrix().is_finite());
    assert!(cam.projection_matrix().is_finite());
    assert!((cam.fovy_radians - CAMERA_FOVY_DEG.to_radians()).abs() < 1e-6);

    let flat = Camera::from_pose(&CameraPose::fallback(), 0.0);
    assert!(flat.projection_matrix().is_finite());
}

#[test]
fn easing_endpoints() {
    for e in [
        Easing::Linear,
        Easing::SmoothStep,
        Easing::Power1InOut,
        Easing::Power2Out,
        Easing::Power3Out,
    ] {
        assert_eq!(e.apply(0.0), 0.0, "{e:?}");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{e:?}");
        assert_eq!(e.apply(-1.0), e.apply(0.0));
        assert_eq!(e.apply(f32::NAN), 0.0);
    }
    assert!((Easing::Power1InOut.apply(0.5) - 0.5).abs() < 1e-6);
}
