//! End-to-end extraction through the public API.

use std::sync::Arc;

use isosurface::{
  extract, BoxSampler, ExtractConfig, ExtractError, ExtractionMetrics, ExtractionStage, Extractor,
  ImplicitField, MinMaxAABB, RootMode, ScalarField, SdfSampler, SphereSampler, TiltedPlaneSampler,
  VoxelGrid,
};

#[test]
fn box_mesh_is_axis_aligned() {
  let grid = BoxSampler::new([3.0, 2.0, 1.5])
    .with_center([5.0, 5.0, 5.0])
    .sample_grid([11, 11, 11], [0.0; 3], [1.0; 3])
    .unwrap();
  let mesh = extract(&grid, 0.0).unwrap();

  assert!(!mesh.is_empty());
  // Flat faces sit exactly between lattice points.
  assert!((mesh.bounds.min[0] - 2.0).abs() < 1e-5);
  assert!((mesh.bounds.max[0] - 8.0).abs() < 1e-5);
  assert!((mesh.bounds.min[1] - 3.0).abs() < 1e-5);
  assert!((mesh.bounds.max[2] - 6.5).abs() < 1e-5);
}

#[test]
fn tilted_plane_spans_the_lattice() {
  let plane = TiltedPlaneSampler::new().with_height(4.0);
  let grid = plane.sample_grid([9, 9, 5], [0.0; 3], [1.0; 3]).unwrap();
  let mesh = extract(&grid, 0.0).unwrap();

  assert!(!mesh.is_empty());
  for p in mesh.positions() {
    assert!(plane.eval(p).abs() < 1e-4, "{:?}", p);
  }
  // An open sheet reaching both Z faces of the lattice.
  assert_eq!(mesh.bounds.min[2], 0.0);
  assert_eq!(mesh.bounds.max[2], 4.0);
}

#[test]
fn implicit_field_extracts_without_dense_grid() {
  let sphere = SphereSampler::new(0.8);
  let bounds = MinMaxAABB::new([-1.0; 3], [1.0; 3]);
  let field = ImplicitField::new(|p: [f32; 3]| sphere.eval(p), bounds, 0.25).unwrap();
  assert_eq!(field.dimensions(), [9, 9, 9]);

  let dense = field.sample_grid().unwrap();
  let lazy = extract(&field, 0.0).unwrap();
  assert_eq!(lazy, extract(&dense, 0.0).unwrap());

  let refined = Extractor::new(ExtractConfig::new().with_root_mode(RootMode::Bisection(12)))
    .extract(&field)
    .unwrap();
  for p in refined.positions() {
    assert!(sphere.eval(p).abs() < 1e-3);
  }
}

#[test]
fn invalid_grid_is_the_only_failure() {
  let flat = VoxelGrid::uniform([8, 1, 8], 1.0).unwrap();
  assert_eq!(
    extract(&flat, 0.0),
    Err(ExtractError::InvalidGrid {
      dimensions: [8, 1, 8]
    })
  );

  let nan = VoxelGrid::from_values([2, 2, 2], vec![f32::NAN; 8]).unwrap();
  assert!(extract(&nan, 0.0).unwrap().is_empty());
}

#[test]
fn stage_feeds_metrics() {
  let grid = Arc::new(
    SphereSampler::new(3.0)
      .with_center([4.0; 3])
      .sample_grid([9, 9, 9], [0.0; 3], [1.0; 3])
      .unwrap(),
  );

  let mut stage = ExtractionStage::new();
  stage.enqueue(grid.clone(), ExtractConfig::default());
  stage.enqueue(grid, ExtractConfig::default().with_parallel(false));
  assert_eq!(stage.tick(), 2);

  let mut metrics = ExtractionMetrics::new();
  let completions = stage.drain_completions();
  for completion in &completions {
    metrics.record_completion(completion);
  }

  assert_eq!(
    completions[0].result.as_ref().unwrap(),
    completions[1].result.as_ref().unwrap()
  );
  if isosurface::metrics::is_enabled() {
    assert_eq!(metrics.total_meshes, 2);
  } else {
    assert_eq!(metrics.total_meshes, 0);
  }
}
