//! Slab-parallel extraction.
//!
//! ```text
//!   z ▲   ┌──────────────┐
//!     │   │   slab 2     │  layers 6..9   ─┐
//!     │   ├──────────────┤ plane 6         │ rayon workers, each with
//!     │   │   slab 1     │  layers 3..6    │ its own edge cache
//!     │   ├──────────────┤ plane 3         │
//!     │   │   slab 0     │  layers 0..3   ─┘
//!     │   └──────────────┘
//!                  │
//!                  ▼
//!        merge in slab order: vertices on a shared plane
//!        resolve to the index the slab below assigned
//! ```
//!
//! Slabs meet on a lattice plane. Both slabs compute the vertices of sign
//! changing edges in that plane, walking each edge in the same direction, so
//! the copies are bit-identical and the merge keeps the first one. Vertex
//! order and statistics match a serial walk exactly.

use std::collections::HashMap;
use std::ops::Range;

use rayon::prelude::*;

use super::edge_key::EdgeKey;
use super::slab::{self, vertex_index, SlabMesh};
use crate::error::ExtractError;
use crate::field::ScalarField;
use crate::types::{CancelFlag, ExtractConfig, ExtractionStats, MeshOutput, VertexMode};

/// Slabs handed to each rayon thread, for load balancing.
const SLABS_PER_THREAD: usize = 4;

/// Split `layers` cell layers into `slab_count` contiguous ranges.
///
/// Earlier slabs take the remainder, one extra layer each. Empty ranges are
/// never produced.
pub fn slab_ranges(layers: usize, slab_count: usize) -> Vec<Range<usize>> {
  let slab_count = slab_count.clamp(1, layers.max(1));
  let base = layers / slab_count;
  let remainder = layers % slab_count;

  let mut ranges = Vec::with_capacity(slab_count);
  let mut start = 0;
  for slab in 0..slab_count {
    let len = base + usize::from(slab < remainder);
    if len == 0 {
      break;
    }
    ranges.push(start..start + len);
    start += len;
  }
  ranges
}

/// Walk all cell layers of `field` on the rayon pool.
pub fn extract_slabs<F: ScalarField + Sync + ?Sized>(
  field: &F,
  config: &ExtractConfig,
  cancel: Option<&CancelFlag>,
) -> Result<Vec<SlabMesh>, ExtractError> {
  let layers = field.dimensions()[2] - 1;
  let slab_count = rayon::current_num_threads() * SLABS_PER_THREAD;

  slab_ranges(layers, slab_count)
    .into_par_iter()
    .map(|range| slab::extract_layers(field, config, range, cancel))
    .collect()
}

/// Stitch slabs, given in layer order, into one mesh.
///
/// Bounds and geometry normals are left to the caller. Fails with
/// [`ExtractError::TooManyVertices`] once the merged mesh outgrows `u32`
/// indices.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "marching_cubes::merge"))]
pub fn merge(
  slabs: Vec<SlabMesh>,
  dimensions: [usize; 3],
  mode: VertexMode,
) -> Result<(MeshOutput, ExtractionStats), ExtractError> {
  let mut output = MeshOutput::new();
  let mut stats = ExtractionStats::default();

  output.vertices.reserve(slabs.iter().map(|s| s.vertices.len()).sum());
  output.indices.reserve(slabs.iter().map(|s| s.indices.len()).sum());

  // Vertices of the previous slab lying in its top plane.
  let mut seam: HashMap<EdgeKey, u32> = HashMap::new();

  for slab in slabs {
    stats += slab.stats;

    match mode {
      VertexMode::PerCell => {
        if let Some(last) = slab.vertices.len().checked_sub(1) {
          let base = vertex_index(output.vertices.len())?;
          vertex_index(output.vertices.len() + last)?;
          output.vertices.extend_from_slice(&slab.vertices);
          output.indices.extend(slab.indices.iter().map(|&i| base + i));
        }
      }
      VertexMode::Shared => {
        let mut next_seam = HashMap::new();
        let mut remap = Vec::with_capacity(slab.vertices.len());
        let mut seam_hits = 0usize;

        for (vertex, key) in slab.vertices.iter().zip(&slab.keys) {
          let existing = if key.lies_in_plane(dimensions, slab.layers.start) {
            seam.get(key).copied()
          } else {
            None
          };

          let index = match existing {
            Some(index) => {
              // Counted as a fresh crossing by this slab, a cache hit serially.
              stats.edge_intersections -= 1;
              stats.vertices_reused += 1;
              seam_hits += 1;
              index
            }
            None => {
              let index = vertex_index(output.vertices.len())?;
              output.vertices.push(*vertex);
              index
            }
          };

          if key.lies_in_plane(dimensions, slab.layers.end) {
            next_seam.insert(*key, index);
          }
          remap.push(index);
        }

        log::trace!(
          "merged slab {:?}: {} of {} vertices resolved on the lower seam",
          slab.layers,
          seam_hits,
          slab.vertices.len()
        );

        output
          .indices
          .extend(slab.indices.iter().map(|&i| remap[i as usize]));
        seam = next_seam;
      }
    }
  }

  Ok((output, stats))
}

#[cfg(test)]
#[path = "parallel_test.rs"]
mod parallel_test;
