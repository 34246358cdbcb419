use criterion::{Criterion, criterion_group, criterion_main};
use glam::Vec3;
use skel_kinematics::{
    BoneDescription, FabrikSolver, KinematicsConfig, Ray, RigDescription, RigEditor, Skeleton, pick,
};
use std::hint::black_box;

/// A spine with five three-bone limbs hanging off its tip
fn create_test_rig() -> RigDescription {
    let mut bones = vec![
        BoneDescription::new(None, [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        BoneDescription::new(Some(0), [0.0, 1.0, 0.0], [0.0, 2.0, 0.0]),
    ];
    for limb in 0..5 {
        let angle = limb as f32 * std::f32::consts::TAU / 5.0;
        let dir = [angle.cos(), 0.0, angle.sin()];
        let mut parent = 1;
        for segment in 0..3 {
            let s = segment as f32;
            let start = [dir[0] * s, 2.0, dir[2] * s];
            let end = [dir[0] * (s + 1.0), 2.0, dir[2] * (s + 1.0)];
            bones.push(BoneDescription::new(Some(parent), start, end));
            parent = bones.len() - 1;
        }
    }
    RigDescription::new(bones)
}

fn bench_propagation(c: &mut Criterion) {
    let mut skeleton =
        Skeleton::from_description(&create_test_rig(), &KinematicsConfig::default()).unwrap();

    c.bench_function("rotate_and_propagate", |b| {
        b.iter(|| {
            skeleton.rotate_on_axis(black_box(1), 0.01, Vec3::Y).unwrap();
        })
    });
}

fn bench_pick(c: &mut Criterion) {
    let skeleton =
        Skeleton::from_description(&create_test_rig(), &KinematicsConfig::default()).unwrap();
    let config = KinematicsConfig::default();
    let ray = Ray::new(Vec3::new(1.5, 2.0, 10.0), Vec3::NEG_Z);

    c.bench_function("pick", |b| {
        b.iter(|| pick(&skeleton, black_box(&ray), &config))
    });
}

fn bench_ik(c: &mut Criterion) {
    let rig = create_test_rig();
    let config = KinematicsConfig::default();

    c.bench_function("fabrik_solve", |b| {
        b.iter(|| {
            let mut skeleton = Skeleton::from_description(&rig, &config).unwrap();
            let chain = skeleton.ik_chain(4).unwrap();
            FabrikSolver::default()
                .solve(&mut skeleton, &chain, black_box(Vec3::new(1.0, 3.0, 1.0)))
                .unwrap()
        })
    });
}

fn bench_playback(c: &mut Criterion) {
    let mut editor = RigEditor::new(&create_test_rig(), KinematicsConfig::default()).unwrap();
    editor.capture().unwrap();
    editor.rotate_on_axis(1, 1.0, Vec3::Y).unwrap();
    editor.capture().unwrap();

    let mut time = 0.0f32;
    c.bench_function("evaluate_frame", |b| {
        b.iter(|| {
            time = (time + 0.013) % 1.0;
            editor.evaluate(black_box(time)).unwrap().len()
        })
    });
}

criterion_group!(benches, bench_propagation, bench_pick, bench_ik, bench_playback);
criterion_main!(benches);
