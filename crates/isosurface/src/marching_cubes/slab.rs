//! Cell walk over a contiguous range of cell layers.
//!
//! A slab covers cell layers `start..end` along Z, i.e. lattice planes
//! `start..=end`. Within a slab cells are visited x fastest, then y, then z,
//! and every cell creates its edge vertices in edge-index order before its
//! triangles are emitted. Vertex indices are local to the slab; see
//! `parallel::merge` for how slabs are stitched together.

use std::ops::Range;

use super::config_index;
use super::edge_key::{edge_lower_corner, EdgeKey, VertexCache};
use super::interpolate::{find_root, EdgeSegment};
use super::normals;
use crate::error::ExtractError;
use crate::field::ScalarField;
use crate::tables::{triangles, EDGE_TABLE};
use crate::types::{CancelFlag, ExtractConfig, ExtractionStats, NormalMode, Vertex, VertexMode};

/// Geometry produced by one slab.
#[derive(Debug, Default)]
pub struct SlabMesh {
  /// Cell layers covered.
  pub layers: Range<usize>,
  pub vertices: Vec<Vertex>,
  /// Grid edge of each vertex (`Shared` mode only, parallel to `vertices`).
  pub keys: Vec<EdgeKey>,
  /// Slab-local triangle indices.
  pub indices: Vec<u32>,
  pub stats: ExtractionStats,
}

/// `u32` index of the vertex stored at position `len`.
pub fn vertex_index(len: usize) -> Result<u32, ExtractError> {
  u32::try_from(len).map_err(|_| ExtractError::TooManyVertices { count: len })
}

/// Walk cell layers `layers` of `field`.
///
/// `cancel` is polled before each layer.
pub fn extract_layers<F: ScalarField + ?Sized>(
  field: &F,
  config: &ExtractConfig,
  layers: Range<usize>,
  cancel: Option<&CancelFlag>,
) -> Result<SlabMesh, ExtractError> {
  let mut walker = SlabWalker {
    field,
    config,
    dimensions: field.dimensions(),
    cache: VertexCache::new(),
    mesh: SlabMesh {
      layers: layers.clone(),
      ..Default::default()
    },
  };

  let [nx, ny, _] = walker.dimensions;
  for k in layers {
    if cancel.is_some_and(CancelFlag::is_cancelled) {
      return Err(ExtractError::Cancelled);
    }

    for j in 0..ny - 1 {
      for i in 0..nx - 1 {
        walker.process_cell([i, j, k])?;
      }
    }

    walker.cache.retain_plane(walker.dimensions, k + 1);
  }

  log::trace!(
    "slab {:?}: {} vertices, {} triangles",
    walker.mesh.layers,
    walker.mesh.vertices.len(),
    walker.mesh.indices.len() / 3
  );

  Ok(walker.mesh)
}

struct SlabWalker<'a, F: ?Sized> {
  field: &'a F,
  config: &'a ExtractConfig,
  dimensions: [usize; 3],
  cache: VertexCache,
  mesh: SlabMesh,
}

impl<F: ScalarField + ?Sized> SlabWalker<'_, F> {
  fn process_cell(&mut self, cell: [usize; 3]) -> Result<(), ExtractError> {
    self.mesh.stats.cells_visited += 1;

    let values = config_index::corner_values(self.field, cell);
    let config = config_index::build(&values, self.config.iso_value);

    let edge_mask = EDGE_TABLE[config as usize];
    if edge_mask == 0 {
      return Ok(());
    }
    self.mesh.stats.active_cells += 1;

    let mut cell_vertices = [0u32; 12];
    for (edge, slot) in cell_vertices.iter_mut().enumerate() {
      if edge_mask & (1 << edge) != 0 {
        *slot = self.edge_vertex(cell, edge)?;
      }
    }

    for [a, b, c] in triangles(config) {
      let (a, b, c) = (cell_vertices[a], cell_vertices[b], cell_vertices[c]);
      if self.config.flip_winding {
        self.mesh.indices.extend_from_slice(&[a, c, b]);
      } else {
        self.mesh.indices.extend_from_slice(&[a, b, c]);
      }
      self.mesh.stats.triangles += 1;
    }
    Ok(())
  }

  /// Index of the vertex on local `edge` of `cell`, creating it if needed.
  fn edge_vertex(&mut self, cell: [usize; 3], edge: usize) -> Result<u32, ExtractError> {
    match self.config.vertex_mode {
      VertexMode::PerCell => self.push_vertex(cell, edge),
      VertexMode::Shared => {
        let key = EdgeKey::new(self.dimensions, cell, edge);
        if let Some(index) = self.cache.get(&key) {
          self.mesh.stats.vertices_reused += 1;
          return Ok(index);
        }
        let index = self.push_vertex(cell, edge)?;
        self.mesh.keys.push(key);
        self.cache.insert(key, index);
        Ok(index)
      }
    }
  }

  fn push_vertex(&mut self, cell: [usize; 3], edge: usize) -> Result<u32, ExtractError> {
    let (lower, axis) = edge_lower_corner(cell, edge);
    let step = axis.step();
    let upper = [lower[0] + step[0], lower[1] + step[1], lower[2] + step[2]];

    let field = self.field;
    let segment = EdgeSegment {
      start: field.position_of(lower[0], lower[1], lower[2]),
      end: field.position_of(upper[0], upper[1], upper[2]),
      start_value: field.value_at(lower[0], lower[1], lower[2]),
      end_value: field.value_at(upper[0], upper[1], upper[2]),
    };
    let t = find_root(field, &segment, self.config.iso_value, self.config.root_mode);

    let normal = match self.config.normal_mode {
      NormalMode::Gradient => {
        normals::gradient_normal(field, lower, upper, t, self.config.flip_winding)
      }
      NormalMode::None | NormalMode::Geometry => [0.0; 3],
    };

    let index = vertex_index(self.mesh.vertices.len())?;
    self.mesh.vertices.push(Vertex {
      position: segment.point_at(t),
      normal,
    });
    self.mesh.stats.edge_intersections += 1;
    Ok(index)
  }
}

#[cfg(test)]
#[path = "slab_test.rs"]
mod slab_test;
