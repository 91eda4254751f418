use approx::assert_abs_diff_eq;
use mmplane::settings::DEFAULT_EPS;
use mmplane::{tetrahedron, Error, Matrix3x3, Matrix4x4, Mesh, Vector3, Vector4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_vector(rng: &mut StdRng) -> Vector3 {
    Vector3::new(
        rng.random_range(-10.0..10.0),
        rng.random_range(-10.0..10.0),
        rng.random_range(-10.0..10.0),
    )
}

#[test]
fn rotations_are_proper_orthogonal() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let axis = random_vector(&mut rng);
        let angle = rng.random_range(-10.0..10.0);

        let r = Matrix3x3::rotation(angle, &axis).unwrap();
        assert_abs_diff_eq!(r.det(), 1.0, epsilon = 1e-12);
        assert!((r * r.transpose() - Matrix3x3::identity()).norm() < 1e-12);

        // the axis is fixed by the rotation
        let fixed = r * axis - axis;
        assert!(fixed.norm_squared().sqrt() < 1e-11);

        let r4 = Matrix4x4::rotation(angle, &axis).unwrap();
        assert_abs_diff_eq!(r4.det(), 1.0, epsilon = 1e-12);
        assert_eq!(r4.upper_left(), r);
    }
}

#[test]
fn rotation_rejects_zero_axis() {
    assert!(matches!(
        Matrix3x3::rotation(0.5, &Vector3::zeros()),
        Err(Error::DegenerateAxis { .. })
    ));
}

#[test]
fn rotation_rejects_non_finite_axis() {
    for axis in [
        Vector3::new(f64::INFINITY, 0.0, 0.0),
        Vector3::new(f64::NAN, 1.0, 0.0),
    ] {
        assert!(matches!(
            Matrix3x3::rotation(1.0, &axis),
            Err(Error::DegenerateAxis { .. })
        ));
        assert!(matches!(
            Matrix4x4::rotation(1.0, &axis),
            Err(Error::DegenerateAxis { .. })
        ));
    }
}

#[test]
fn rotations_about_extreme_axes_are_proper_orthogonal() {
    let mut rng = StdRng::seed_from_u64(1234);
    for exponent in [-10, -5, 0, 100, 200, 300] {
        let magnitude = 10f64.powi(exponent);
        for _ in 0..50 {
            let axis = random_vector(&mut rng) * magnitude;
            let angle = rng.random_range(-10.0..10.0);

            let r = Matrix3x3::rotation(angle, &axis).unwrap();
            assert_abs_diff_eq!(r.det(), 1.0, epsilon = 1e-12);
            assert!((r * r.transpose() - Matrix3x3::identity()).norm() < 1e-12);

            let unit = axis / (axis / magnitude).norm_squared().sqrt() / magnitude;
            let fixed = r * unit - unit;
            assert!(fixed.norm_squared().sqrt() < 1e-11, "axis {}", axis);
        }
    }
}

#[test]
fn unit_tetrahedron() {
    let x0 = Vector3::new(0.0, 0.0, 0.0);
    let x1 = Vector3::new(1.0, 0.0, 0.0);
    let x2 = Vector3::new(0.0, 1.0, 0.0);
    let x3 = Vector3::new(0.0, 0.0, 1.0);
    assert_abs_diff_eq!(tetrahedron::volume(&x0, &x1, &x2, &x3), 1.0 / 6.0, epsilon = 1e-15);

    let mesh = Mesh::new(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        vec![[0, 1, 2, 3]],
        vec![1],
    )
    .unwrap();
    assert_abs_diff_eq!(mesh.volume(), 1.0 / 6.0, epsilon = 1e-15);
    let c = mesh.centroid();
    assert_abs_diff_eq!(c.x(), 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(c.y(), 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(c.z(), 0.25, epsilon = 1e-12);
}

#[test]
fn bounding_box_of_scattered_points() {
    let mesh = Mesh::new(
        vec![[-1.0, 2.0, 0.0], [3.0, -4.0, 5.0], [0.0, 0.0, 0.0]],
        vec![],
        vec![],
    )
    .unwrap();
    assert_eq!(mesh.box_min(), Vector3::new(-1.0, -4.0, 0.0));
    assert_eq!(mesh.box_max(), Vector3::new(3.0, 2.0, 5.0));
    assert!(mesh.bounding_box().is_valid());
}

#[test]
fn centroid_is_volume_weighted() {
    // a unit tetrahedron and one scaled by 2 and shifted along x
    let mesh = Mesh::new(
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [10.0, 0.0, 0.0],
            [12.0, 0.0, 0.0],
            [10.0, 2.0, 0.0],
            [10.0, 0.0, 2.0],
        ],
        vec![[0, 1, 2, 3], [4, 5, 6, 7]],
        vec![1, 1],
    )
    .unwrap();
    // volumes 1/6 and 8/6, centroids x = 0.25 and 10.5
    assert_abs_diff_eq!(mesh.volume(), 9.0 / 6.0, epsilon = 1e-12);
    assert_abs_diff_eq!(mesh.centroid().x(), (0.25 + 8.0 * 10.5) / 9.0, epsilon = 1e-12);
}

#[test]
fn degenerate_mesh_has_nan_centroid() {
    let mesh = Mesh::new(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
        vec![[0, 1, 2, 3]],
        vec![],
    )
    .unwrap();
    assert_eq!(mesh.volume(), 0.0);
    assert!(mesh.centroid().x().is_nan());
}

#[test]
fn bad_vertex_index_is_an_error() {
    let result = Mesh::new(vec![[0.0; 3]; 3], vec![[0, 1, 2, 3]], vec![]);
    assert!(matches!(result, Err(Error::Index { index: 3, len: 3, .. })));
}

#[test]
fn normalisation_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let v = random_vector(&mut rng);
        if v.norm_squared() < 1e-6 {
            continue;
        }
        let once = v.normalised();
        let twice = once.normalised();
        assert!((once - twice).norm_squared().sqrt() < 1e-12);
    }

    let v = Vector4::new(1.0, -2.0, 0.5, 3.0).normalised();
    assert!((v - v.normalised()).norm_squared().sqrt() < 1e-12);
}

#[test]
fn zero_norm_is_eps() {
    assert_abs_diff_eq!(Vector3::zeros().norm(), DEFAULT_EPS, epsilon = 1e-20);
    assert_abs_diff_eq!(Vector4::zeros().norm(), DEFAULT_EPS, epsilon = 1e-20);
    assert_eq!(Vector3::zeros().normalised(), Vector3::zeros());
}
