//! Canonical grid-edge identity for vertex sharing.
//!
//! Up to four cells touch an interior grid edge, each naming it by a
//! different local edge index. Keying on the edge's lower lattice point and
//! axis gives all of them the same identity.
//!
//! ```text
//! cell (i,j,k), local edge 10  ──►  lower corner (i+1, j+1, k), axis Z
//! cell (i+1,j,k), local edge 11 ──►  lower corner (i+1, j+1, k), axis Z
//! ```

use std::collections::HashMap;

use crate::tables::{Axis, EDGE_ORIGINS};

/// Identity of a grid edge: linear index of its lower lattice point and the
/// axis it runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
  pub lattice_index: usize,
  pub axis: Axis,
}

impl EdgeKey {
  /// Key of local `edge` of the cell whose lowest corner is `cell`.
  #[inline]
  pub fn new(dimensions: [usize; 3], cell: [usize; 3], edge: usize) -> Self {
    let (lower, axis) = edge_lower_corner(cell, edge);
    Self {
      lattice_index: lower[0] + dimensions[0] * (lower[1] + dimensions[1] * lower[2]),
      axis,
    }
  }

  /// Z coordinate of the lattice plane the key's lower point lies in.
  #[inline]
  pub fn z_plane(&self, dimensions: [usize; 3]) -> usize {
    self.lattice_index / (dimensions[0] * dimensions[1])
  }

  /// True when the edge lies entirely within lattice plane `z`.
  #[inline]
  pub fn lies_in_plane(&self, dimensions: [usize; 3], z: usize) -> bool {
    self.axis != Axis::Z && self.z_plane(dimensions) == z
  }
}

/// Lower lattice point and axis of local `edge` of `cell`.
#[inline(always)]
pub fn edge_lower_corner(cell: [usize; 3], edge: usize) -> ([usize; 3], Axis) {
  let (offset, axis) = EDGE_ORIGINS[edge];
  (
    [cell[0] + offset[0], cell[1] + offset[1], cell[2] + offset[2]],
    axis,
  )
}

/// Maps grid edges to output vertex indices.
#[derive(Debug, Default)]
pub struct VertexCache {
  map: HashMap<EdgeKey, u32>,
}

impl VertexCache {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn get(&self, key: &EdgeKey) -> Option<u32> {
    self.map.get(key).copied()
  }

  #[inline]
  pub fn insert(&mut self, key: EdgeKey, index: u32) {
    self.map.insert(key, index);
  }

  /// Keep only edges lying in lattice plane `z`.
  ///
  /// Called after a cell layer completes: those are the only edges the next
  /// layer can share with it.
  pub fn retain_plane(&mut self, dimensions: [usize; 3], z: usize) {
    self.map.retain(|key, _| key.lies_in_plane(dimensions, z));
  }

  #[cfg(test)]
  pub fn len(&self) -> usize {
    self.map.len()
  }

  #[cfg(test)]
  pub fn is_empty(&self) -> bool {
    self.map.is_empty()
  }
}

#[cfg(test)]
#[path = "edge_key_test.rs"]
mod edge_key_test;
