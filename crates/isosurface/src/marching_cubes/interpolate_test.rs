use super::*;
use crate::field::{ImplicitField, VoxelGrid};
use crate::types::MinMaxAABB;

const SQRT_HALF: f32 = std::f32::consts::FRAC_1_SQRT_2;

fn unit_x_edge(start_value: f32, end_value: f32) -> EdgeSegment {
  EdgeSegment {
    start: [0.0, 0.0, 0.0],
    end: [1.0, 0.0, 0.0],
    start_value,
    end_value,
  }
}

/// f = x² - 0.5, crossing at x = √½ on the unit X edge.
fn parabola() -> ImplicitField<impl Fn([f32; 3]) -> f32> {
  let bounds = MinMaxAABB::new([0.0; 3], [1.0; 3]);
  ImplicitField::new(|p: [f32; 3]| p[0] * p[0] - 0.5, bounds, 1.0).unwrap()
}

#[test]
fn test_edge_t_basic() {
  assert_eq!(edge_t(-1.0, 1.0, 0.0), 0.5);
  assert_eq!(edge_t(0.0, 4.0, 1.0), 0.25);
  assert_eq!(edge_t(4.0, 0.0, 1.0), 0.75);
}

#[test]
fn test_edge_t_degenerate_is_midpoint() {
  assert_eq!(edge_t(1.0, 1.0, 1.0), 0.5);
  assert_eq!(edge_t(0.0, f32::NAN, 0.0), 0.5);
}

#[test]
fn test_edge_t_clamped() {
  assert_eq!(edge_t(1.0, 2.0, 0.0), 0.0);
  assert_eq!(edge_t(1.0, 2.0, 5.0), 1.0);
}

#[test]
fn test_edge_t_equal_to_iso() {
  assert_eq!(edge_t(0.0, 1.0, 0.0), 0.0);
  assert_eq!(edge_t(-1.0, 0.0, 0.0), 1.0);
}

#[test]
fn test_lerp_mode_matches_edge_t() {
  let field = parabola();
  let edge = unit_x_edge(-0.5, 0.5);
  assert_eq!(find_root(&field, &edge, 0.0, RootMode::Lerp), 0.5);
}

#[test]
fn test_bisection_converges() {
  let field = parabola();
  let edge = unit_x_edge(-0.5, 0.5);
  let t = find_root(&field, &edge, 0.0, RootMode::Bisection(20));
  assert!((t - SQRT_HALF).abs() < 1e-4, "t = {}", t);
}

#[test]
fn test_lerp_steps_converge() {
  let field = parabola();
  let edge = unit_x_edge(-0.5, 0.5);
  let t = find_root(&field, &edge, 0.0, RootMode::LerpSteps(10));
  assert!((t - SQRT_HALF).abs() < 1e-4, "t = {}", t);
}

#[test]
fn test_refinement_on_descending_edge() {
  // Same crossing, walked from the high end.
  let bounds = MinMaxAABB::new([0.0; 3], [1.0; 3]);
  let field = ImplicitField::new(|p: [f32; 3]| 0.5 - p[0] * p[0], bounds, 1.0).unwrap();
  let edge = unit_x_edge(0.5, -0.5);
  let t = find_root(&field, &edge, 0.0, RootMode::Bisection(20));
  assert!((t - SQRT_HALF).abs() < 1e-4, "t = {}", t);
}

#[test]
fn test_zero_steps_is_plain_lerp() {
  let field = parabola();
  let edge = unit_x_edge(-0.5, 0.5);
  assert_eq!(find_root(&field, &edge, 0.0, RootMode::Bisection(0)), 0.5);
  assert_eq!(find_root(&field, &edge, 0.0, RootMode::LerpSteps(0)), 0.5);
}

#[test]
fn test_lattice_field_falls_back_to_lerp() {
  let grid = VoxelGrid::from_values([2, 2, 2], vec![-0.5, 0.5, -0.5, 0.5, -0.5, 0.5, -0.5, 0.5])
    .unwrap();
  let edge = unit_x_edge(-0.5, 0.5);
  assert_eq!(find_root(&grid, &edge, 0.0, RootMode::Bisection(8)), 0.5);
  assert_eq!(find_root(&grid, &edge, 0.0, RootMode::LerpSteps(8)), 0.5);
}

#[test]
fn test_point_at() {
  let edge = EdgeSegment {
    start: [1.0, 2.0, 3.0],
    end: [1.0, 2.0, 5.0],
    start_value: 0.0,
    end_value: 1.0,
  };
  assert_eq!(edge.point_at(0.25), [1.0, 2.0, 3.5]);
}
