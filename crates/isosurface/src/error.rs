//! Error type for field construction and extraction.

use thiserror::Error;

/// Errors surfaced by grid construction and isosurface extraction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
  /// A grid dimension is below 2, so no cell can be formed.
  #[error("invalid grid dimensions {dimensions:?}: every axis needs at least 2 samples")]
  InvalidGrid { dimensions: [usize; 3] },

  /// Sample buffer length does not match the grid dimensions.
  #[error("sample count mismatch: expected {expected}, got {actual}")]
  SampleCountMismatch { expected: usize, actual: usize },

  /// Lattice spacing must be positive and finite on every axis.
  #[error("invalid lattice spacing {spacing:?}")]
  InvalidSpacing { spacing: [f32; 3] },

  /// A grid axis exceeds the per-axis safety limit.
  #[error("grid dimension {dimension} exceeds the maximum of {max}")]
  GridTooLarge { dimension: usize, max: usize },

  /// Implicit sampling bounds must be finite.
  #[error("invalid sampling bounds {min:?} .. {max:?}")]
  InvalidBounds { min: [f32; 3], max: [f32; 3] },

  /// The mesh has more vertices than `u32` indices can address.
  #[error("mesh vertex {count} is not addressable by u32 indices")]
  TooManyVertices { count: usize },

  /// Extraction was cancelled between cell layers.
  #[error("extraction cancelled")]
  Cancelled,
}

/// Validate that a grid can form at least one cell.
#[inline]
pub fn check_dimensions(dimensions: [usize; 3]) -> Result<(), ExtractError> {
  if dimensions.iter().any(|&n| n < 2) {
    return Err(ExtractError::InvalidGrid { dimensions });
  }
  Ok(())
}
