use super::*;
use crate::field::VoxelGrid;
use crate::samplers::{SdfSampler, SphereSampler};

fn sphere_grid() -> VoxelGrid {
  SphereSampler::new(5.3)
    .with_center([8.0, 8.0, 8.0])
    .sample_grid([17, 17, 17], [0.0; 3], [1.0; 3])
    .unwrap()
}

fn walk(grid: &VoxelGrid, config: &ExtractConfig, ranges: &[Range<usize>]) -> (MeshOutput, ExtractionStats) {
  let slabs = ranges
    .iter()
    .map(|r| slab::extract_layers(grid, config, r.clone(), None).unwrap())
    .collect();
  merge(slabs, grid.dimensions(), config.vertex_mode).unwrap()
}

#[test]
fn test_slab_ranges_cover_all_layers() {
  assert_eq!(slab_ranges(10, 3), vec![0..4, 4..7, 7..10]);
  assert_eq!(slab_ranges(4, 4), vec![0..1, 1..2, 2..3, 3..4]);
}

#[test]
fn test_slab_ranges_more_slabs_than_layers() {
  assert_eq!(slab_ranges(3, 64), vec![0..1, 1..2, 2..3]);
  assert_eq!(slab_ranges(5, 0), vec![0..5]);
}

#[test]
fn test_split_walk_matches_single_slab() {
  let grid = sphere_grid();
  let config = ExtractConfig::default();

  let (whole, whole_stats) = walk(&grid, &config, &[0..16]);
  let (split, split_stats) = walk(&grid, &config, &[0..5, 5..8, 8..9, 9..16]);

  assert_eq!(whole.vertices, split.vertices);
  assert_eq!(whole.indices, split.indices);
  assert_eq!(whole_stats, split_stats);
}

#[test]
fn test_split_walk_per_cell_concatenates() {
  let grid = sphere_grid();
  let config = ExtractConfig::default().with_vertex_mode(VertexMode::PerCell);

  let (whole, _) = walk(&grid, &config, &[0..16]);
  let (split, stats) = walk(&grid, &config, &[0..7, 7..16]);

  assert_eq!(whole, split);
  assert_eq!(stats.vertices_reused, 0);
  assert_eq!(stats.edge_intersections, split.vertices.len() as u64);
}

#[test]
fn test_merge_resolves_seam_vertices() {
  let grid = sphere_grid();
  let config = ExtractConfig::default();

  let (_, stats) = walk(&grid, &config, &[0..8, 8..16]);
  // Every sign-changing grid edge is interpolated exactly once.
  let (mesh, _) = walk(&grid, &config, &[0..16]);
  assert_eq!(stats.edge_intersections, mesh.vertices.len() as u64);
}
