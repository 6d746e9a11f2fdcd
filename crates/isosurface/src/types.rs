//! Core data types for isosurface extraction.

use std::ops::AddAssign;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Normal computation mode for mesh generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalMode {
  /// Leave normals zeroed.
  None,

  /// Field gradient at the edge endpoints, interpolated to the crossing.
  #[default]
  Gradient,

  /// Angle-weighted average of incident triangle normals.
  Geometry,
}

/// How edge-crossing vertices are shared between cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VertexMode {
  /// One vertex per intersected grid edge, shared by every cell around it.
  #[default]
  Shared,

  /// One vertex per (cell, edge) pair. Interior crossings repeat up to 4×.
  PerCell,
}

/// How the crossing point along an edge is located.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RootMode {
  /// Single linear interpolation between the lattice samples.
  #[default]
  Lerp,

  /// Repeated false-position steps against the continuous field.
  LerpSteps(u32),

  /// Repeated bisection against the continuous field.
  Bisection(u32),
}

/// Output vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
  /// Vertex position in field coordinates.
  pub position: [f32; 3],

  /// Surface normal (unit vector, or zero with `NormalMode::None`).
  pub normal: [f32; 3],
}

impl Default for Vertex {
  fn default() -> Self {
    Self {
      position: [0.0; 3],
      normal: [0.0, 1.0, 0.0],
    }
  }
}

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Create AABB from min/max corners.
  pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
    Self { min, max }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }

  /// Size along each axis.
  pub fn extent(&self) -> [f32; 3] {
    [
      self.max[0] - self.min[0],
      self.max[1] - self.min[1],
      self.max[2] - self.min[2],
    ]
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Extraction result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshOutput {
  /// Output vertices in first-encounter order.
  pub vertices: Vec<Vertex>,

  /// Triangle indices (3 indices per triangle).
  ///
  /// Indices are `u32`: extraction fails with `TooManyVertices` rather than
  /// exceed `u32::MAX + 1` vertices.
  pub indices: Vec<u32>,

  /// Bounding box encompassing all vertices.
  pub bounds: MinMaxAABB,
}

impl MeshOutput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.indices.clear();
    self.bounds = MinMaxAABB::empty();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Triangles as index triples, in emission order.
  pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
    self
      .indices
      .chunks_exact(3)
      .map(|tri| [tri[0], tri[1], tri[2]])
  }

  /// Vertex positions, in vertex order.
  pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
    self.vertices.iter().map(|v| v.position)
  }
}

/// Configuration for isosurface extraction.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfig {
  /// Field value the surface passes through.
  pub iso_value: f32,

  /// Vertex sharing policy.
  pub vertex_mode: VertexMode,

  /// Normal computation mode.
  pub normal_mode: NormalMode,

  /// Crossing-point search along edges.
  pub root_mode: RootMode,

  /// Reverse triangle winding (and gradient normals).
  pub flip_winding: bool,

  /// Process cell layers on the rayon pool.
  pub parallel: bool,
}

impl Default for ExtractConfig {
  fn default() -> Self {
    Self {
      iso_value: 0.0,
      vertex_mode: VertexMode::default(),
      normal_mode: NormalMode::default(),
      root_mode: RootMode::default(),
      flip_winding: false,
      parallel: true,
    }
  }
}

impl ExtractConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_iso_value(mut self, iso_value: f32) -> Self {
    self.iso_value = iso_value;
    self
  }

  pub fn with_vertex_mode(mut self, mode: VertexMode) -> Self {
    self.vertex_mode = mode;
    self
  }

  pub fn with_normal_mode(mut self, mode: NormalMode) -> Self {
    self.normal_mode = mode;
    self
  }

  pub fn with_root_mode(mut self, mode: RootMode) -> Self {
    self.root_mode = mode;
    self
  }

  pub fn with_flip_winding(mut self, flip: bool) -> Self {
    self.flip_winding = flip;
    self
  }

  pub fn with_parallel(mut self, parallel: bool) -> Self {
    self.parallel = parallel;
    self
  }
}

/// Counters collected while walking the cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractionStats {
  /// Cells whose corners were classified.
  pub cells_visited: u64,
  /// Cells with at least one crossed edge.
  pub active_cells: u64,
  /// Edge crossings interpolated.
  pub edge_intersections: u64,
  /// Edge crossings served from the vertex cache.
  pub vertices_reused: u64,
  /// Triangles emitted.
  pub triangles: u64,
}

impl AddAssign for ExtractionStats {
  fn add_assign(&mut self, other: Self) {
    self.cells_visited += other.cells_visited;
    self.active_cells += other.active_cells;
    self.edge_intersections += other.edge_intersections;
    self.vertices_reused += other.vertices_reused;
    self.triangles += other.triangles;
  }
}

/// Shared cancellation flag, polled between cell layers.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
  pub fn new() -> Self {
    Self::default()
  }

  /// Request cancellation. Extractions observing this flag stop at the next
  /// layer boundary.
  pub fn cancel(&self) {
    self.0.store(true, Ordering::Relaxed);
  }

  pub fn is_cancelled(&self) -> bool {
    self.0.load(Ordering::Relaxed)
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
