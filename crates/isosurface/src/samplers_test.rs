use super::*;
use crate::field::ScalarField;

#[test]
fn test_sphere_sign() {
  let sphere = SphereSampler::new(2.0).with_center([1.0, 1.0, 1.0]);
  assert!(sphere.eval([1.0, 1.0, 1.0]) < 0.0);
  assert!((sphere.eval([3.0, 1.0, 1.0])).abs() < 1e-6);
  assert!(sphere.eval([5.0, 1.0, 1.0]) > 0.0);
}

#[test]
fn test_box_distance() {
  let cube = BoxSampler::new([1.0, 2.0, 3.0]);
  assert_eq!(cube.eval([0.0, 0.0, 0.0]), -1.0);
  assert_eq!(cube.eval([2.0, 0.0, 0.0]), 1.0);
  assert!((cube.eval([2.0, 3.0, 0.0]) - 2.0f32.sqrt()).abs() < 1e-6);
}

#[test]
fn test_torus_distance() {
  let torus = TorusSampler::new(3.0, 1.0);
  assert_eq!(torus.eval([3.0, 0.0, 0.0]), -1.0);
  assert_eq!(torus.eval([0.0, 0.0, 0.0]), 2.0);
  assert!((torus.eval([0.0, 1.0, 3.0])).abs() < 1e-6);
}

#[test]
fn test_tilted_plane_default_is_diagonal() {
  let plane = TiltedPlaneSampler::new();
  assert!(plane.eval([1.0, 1.0, 0.0]).abs() < 1e-6);
  assert!(plane.eval([0.0, 1.0, 0.0]) > 0.0);
  assert!(plane.eval([1.0, 0.0, 0.0]) < 0.0);

  let flat = TiltedPlaneSampler::new().with_angle_degrees(0.0).with_height(2.0);
  assert_eq!(flat.eval([7.0, 2.0, -3.0]), 0.0);
}

#[test]
fn test_sample_grid_matches_eval() {
  let sphere = SphereSampler::new(1.5).with_center([2.0, 2.0, 2.0]);
  let grid = sphere.sample_grid([5, 5, 5], [0.0; 3], [1.0; 3]).unwrap();

  assert_eq!(grid.value_at(2, 2, 2), -1.5);
  assert_eq!(grid.value_at(4, 2, 2), sphere.eval([4.0, 2.0, 2.0]));
}
