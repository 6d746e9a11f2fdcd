use super::*;
use crate::field::VoxelGrid;

#[test]
fn test_vertex_index_limit() {
  assert_eq!(vertex_index(0).unwrap(), 0);
  assert_eq!(vertex_index(u32::MAX as usize).unwrap(), u32::MAX);

  // Past u32 the index would wrap back onto earlier vertices.
  #[cfg(target_pointer_width = "64")]
  {
    let len = u32::MAX as usize + 1;
    assert_eq!(
      vertex_index(len),
      Err(ExtractError::TooManyVertices { count: len })
    );
  }
}

#[test]
fn test_layer_range_counts_only_its_cells() {
  // Single inside corner at (1, 1, 1) touches the 8 cells around it.
  let mut values = vec![-1.0; 27];
  values[1 + 3 * (1 + 3)] = 1.0;
  let grid = VoxelGrid::from_values([3, 3, 3], values).unwrap();
  let config = ExtractConfig::default();

  let slab = extract_layers(&grid, &config, 1..2, None).unwrap();
  assert_eq!(slab.layers, 1..2);
  assert_eq!(slab.stats.cells_visited, 4);
  assert_eq!(slab.stats.active_cells, 4);
  // Plane z = 1 holds the 4 in-plane edges; the +z edge rises from it.
  assert_eq!(slab.vertices.len(), 5);
  assert_eq!(slab.keys.len(), slab.vertices.len());
  assert!(slab.indices.iter().all(|&i| (i as usize) < slab.vertices.len()));
}
