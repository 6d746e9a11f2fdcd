//! Cell classification.
//!
//! The configuration index is an 8-bit value where each bit indicates whether
//! a corner of the cell lies strictly above the iso-value.

use crate::field::ScalarField;
use crate::tables::CORNER_OFFSETS;

/// Load the 8 corner values of cell (i, j, k) in classical corner order.
#[inline]
pub fn corner_values<F: ScalarField + ?Sized>(field: &F, cell: [usize; 3]) -> [f32; 8] {
  std::array::from_fn(|c| {
    let [dx, dy, dz] = CORNER_OFFSETS[c];
    field.value_at(cell[0] + dx, cell[1] + dy, cell[2] + dz)
  })
}

/// Build the configuration index from 8 corner values.
///
/// Bit `i` is set when `values[i] > iso_value`. A value equal to the
/// iso-value counts as below, so a constant field at the iso-value produces
/// no geometry.
#[inline]
pub fn build(values: &[f32; 8], iso_value: f32) -> u8 {
  values
    .iter()
    .enumerate()
    .fold(0u8, |mask, (i, &v)| mask | (((v > iso_value) as u8) << i))
}

#[cfg(test)]
#[path = "config_index_test.rs"]
mod config_index_test;
