use super::*;

#[test]
fn test_aabb_encapsulate() {
  let mut aabb = MinMaxAABB::empty();
  assert!(!aabb.is_valid());

  aabb.encapsulate([1.0, 2.0, 3.0]);
  aabb.encapsulate([-1.0, -2.0, -3.0]);

  assert_eq!(aabb.min, [-1.0, -2.0, -3.0]);
  assert_eq!(aabb.max, [1.0, 2.0, 3.0]);
  assert!(aabb.is_valid());
  assert_eq!(aabb.extent(), [2.0, 4.0, 6.0]);
}

#[test]
fn test_mesh_output_clear() {
  let mut output = MeshOutput::new();
  output.vertices.push(Vertex::default());
  output.indices.extend_from_slice(&[0, 0, 0]);
  output.bounds.encapsulate([1.0, 1.0, 1.0]);
  assert_eq!(output.triangle_count(), 1);

  output.clear();

  assert!(output.is_empty());
  assert_eq!(output.triangle_count(), 0);
  assert!(!output.bounds.is_valid());
}

#[test]
fn test_mesh_output_triangles() {
  let mut output = MeshOutput::new();
  output.indices = vec![0, 1, 2, 2, 1, 3];

  let tris: Vec<[u32; 3]> = output.triangles().collect();
  assert_eq!(tris, vec![[0, 1, 2], [2, 1, 3]]);
}

#[test]
fn test_extract_config_builder() {
  let config = ExtractConfig::new()
    .with_iso_value(0.25)
    .with_vertex_mode(VertexMode::PerCell)
    .with_normal_mode(NormalMode::Geometry)
    .with_root_mode(RootMode::Bisection(6))
    .with_flip_winding(true)
    .with_parallel(false);

  assert_eq!(config.iso_value, 0.25);
  assert_eq!(config.vertex_mode, VertexMode::PerCell);
  assert_eq!(config.normal_mode, NormalMode::Geometry);
  assert_eq!(config.root_mode, RootMode::Bisection(6));
  assert!(config.flip_winding);
  assert!(!config.parallel);
}

#[test]
fn test_extract_config_defaults() {
  let config = ExtractConfig::default();
  assert_eq!(config.iso_value, 0.0);
  assert_eq!(config.vertex_mode, VertexMode::Shared);
  assert_eq!(config.normal_mode, NormalMode::Gradient);
  assert_eq!(config.root_mode, RootMode::Lerp);
  assert!(!config.flip_winding);
  assert!(config.parallel);
}

#[test]
fn test_stats_accumulate() {
  let mut total = ExtractionStats::default();
  total += ExtractionStats {
    cells_visited: 8,
    active_cells: 2,
    edge_intersections: 6,
    vertices_reused: 1,
    triangles: 3,
  };
  total += ExtractionStats {
    cells_visited: 4,
    triangles: 1,
    ..Default::default()
  };

  assert_eq!(total.cells_visited, 12);
  assert_eq!(total.active_cells, 2);
  assert_eq!(total.triangles, 4);
}

#[test]
fn test_cancel_flag_shared_between_clones() {
  let flag = CancelFlag::new();
  let observer = flag.clone();
  assert!(!observer.is_cancelled());

  flag.cancel();
  assert!(observer.is_cancelled());
}
