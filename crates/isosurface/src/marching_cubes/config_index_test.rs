use super::*;
use crate::field::VoxelGrid;

#[test]
fn test_all_below() {
  assert_eq!(build(&[-1.0; 8], 0.0), 0);
}

#[test]
fn test_all_above() {
  assert_eq!(build(&[1.0; 8], 0.0), 0xff);
}

#[test]
fn test_equal_counts_as_below() {
  assert_eq!(build(&[0.5; 8], 0.5), 0);

  let mut values = [0.5; 8];
  values[3] = 0.5001;
  assert_eq!(build(&values, 0.5), 1 << 3);
}

#[test]
fn test_each_corner_maps_to_its_bit() {
  for corner in 0..8 {
    let mut values = [-1.0; 8];
    values[corner] = 1.0;
    assert_eq!(build(&values, 0.0), 1u8 << corner, "corner {}", corner);
  }
}

#[test]
fn test_nan_counts_as_below() {
  let mut values = [1.0; 8];
  values[0] = f32::NAN;
  assert_eq!(build(&values, 0.0), 0xfe);
}

#[test]
fn test_corner_values_order() {
  // Value encodes the lattice coordinate: x + 10y + 100z
  let grid = VoxelGrid::from_fn([3, 3, 3], [0.0; 3], [1.0; 3], |p| {
    p[0] + 10.0 * p[1] + 100.0 * p[2]
  })
  .unwrap();

  let values = corner_values(&grid, [1, 0, 1]);
  assert_eq!(
    values,
    [101.0, 102.0, 112.0, 111.0, 201.0, 202.0, 212.0, 211.0]
  );
}
