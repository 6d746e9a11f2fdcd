//! Scalar fields sampled on a regular lattice.
//!
//! The extractor reads fields through [`ScalarField`] and never owns or
//! mutates them. Two implementations ship with the crate:
//!
//! - [`VoxelGrid`]: dense, owned samples (the usual input)
//! - [`ImplicitField`]: a closure evaluated lazily over a bounding box, which
//!   also exposes continuous sampling for root refinement
//!
//! # Memory Layout
//!
//! ```text
//! index = i + nx * (j + ny * k)
//!
//! Address:  0       1       ...  nx-1      nx      ...
//! Content: [0,0,0] [1,0,0] ... [nx-1,0,0] [0,1,0] ...
//!          └──────────── X ────────────┘
//! ```
//!
//! X varies fastest, matching the cell traversal order of the extractor.

use crate::error::ExtractError;
use crate::types::MinMaxAABB;

/// Upper bound on samples per axis for any grid.
pub const SAFETY_MAX_DIMENSION: usize = 4096;

/// Random-access scalar field on a regular lattice.
pub trait ScalarField {
  /// Sample counts along X, Y and Z.
  fn dimensions(&self) -> [usize; 3];

  /// Field value at lattice point (i, j, k).
  fn value_at(&self, i: usize, j: usize, k: usize) -> f32;

  /// World position of lattice point (i, j, k).
  fn position_of(&self, i: usize, j: usize, k: usize) -> [f32; 3];

  /// Field value at an arbitrary point, when the field is continuous.
  ///
  /// Lattice-only fields return `None`, which limits root finding to a single
  /// interpolation step.
  fn value_at_point(&self, _point: [f32; 3]) -> Option<f32> {
    None
  }

  /// Field gradient at lattice point (i, j, k) in world units.
  ///
  /// Central differences inside the lattice, one-sided differences on its
  /// faces.
  fn gradient_at(&self, i: usize, j: usize, k: usize) -> [f32; 3] {
    let dims = self.dimensions();
    let coord = [i, j, k];
    let mut gradient = [0.0f32; 3];

    for axis in 0..3 {
      if dims[axis] < 2 {
        continue;
      }
      let lo = coord[axis].saturating_sub(1);
      let hi = (coord[axis] + 1).min(dims[axis] - 1);

      let mut a = coord;
      let mut b = coord;
      a[axis] = lo;
      b[axis] = hi;

      let run = self.position_of(b[0], b[1], b[2])[axis] - self.position_of(a[0], a[1], a[2])[axis];
      if run.abs() > f32::EPSILON {
        let rise = self.value_at(b[0], b[1], b[2]) - self.value_at(a[0], a[1], a[2]);
        gradient[axis] = rise / run;
      }
    }

    gradient
  }
}

impl<T: ScalarField + ?Sized> ScalarField for &T {
  fn dimensions(&self) -> [usize; 3] {
    (**self).dimensions()
  }

  fn value_at(&self, i: usize, j: usize, k: usize) -> f32 {
    (**self).value_at(i, j, k)
  }

  fn position_of(&self, i: usize, j: usize, k: usize) -> [f32; 3] {
    (**self).position_of(i, j, k)
  }

  fn value_at_point(&self, point: [f32; 3]) -> Option<f32> {
    (**self).value_at_point(point)
  }

  fn gradient_at(&self, i: usize, j: usize, k: usize) -> [f32; 3] {
    (**self).gradient_at(i, j, k)
  }
}

/// Number of samples in a lattice of `dimensions`.
fn sample_count(dimensions: [usize; 3]) -> Result<usize, ExtractError> {
  let largest = dimensions.iter().copied().max().unwrap_or(0);
  let too_large = ExtractError::GridTooLarge {
    dimension: largest,
    max: SAFETY_MAX_DIMENSION,
  };
  if largest > SAFETY_MAX_DIMENSION {
    return Err(too_large);
  }
  dimensions
    .iter()
    .try_fold(1usize, |count, &n| count.checked_mul(n))
    .ok_or(too_large)
}

fn check_spacing(spacing: [f32; 3]) -> Result<(), ExtractError> {
  if spacing.iter().all(|s| s.is_finite() && *s > 0.0) {
    Ok(())
  } else {
    Err(ExtractError::InvalidSpacing { spacing })
  }
}

/// Dense scalar samples with an origin and per-axis spacing.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
  dimensions: [usize; 3],
  origin: [f32; 3],
  spacing: [f32; 3],
  values: Vec<f32>,
}

impl VoxelGrid {
  /// Wrap existing samples (x-fastest order).
  pub fn new(
    dimensions: [usize; 3],
    origin: [f32; 3],
    spacing: [f32; 3],
    values: Vec<f32>,
  ) -> Result<Self, ExtractError> {
    check_spacing(spacing)?;
    let expected = sample_count(dimensions)?;
    if values.len() != expected {
      return Err(ExtractError::SampleCountMismatch {
        expected,
        actual: values.len(),
      });
    }

    Ok(Self {
      dimensions,
      origin,
      spacing,
      values,
    })
  }

  /// Wrap samples on a unit lattice at the origin.
  pub fn from_values(dimensions: [usize; 3], values: Vec<f32>) -> Result<Self, ExtractError> {
    Self::new(dimensions, [0.0; 3], [1.0; 3], values)
  }

  /// Sample a function at every lattice point.
  pub fn from_fn<F>(
    dimensions: [usize; 3],
    origin: [f32; 3],
    spacing: [f32; 3],
    f: F,
  ) -> Result<Self, ExtractError>
  where
    F: Fn([f32; 3]) -> f32,
  {
    check_spacing(spacing)?;
    let [nx, ny, nz] = dimensions;
    let mut values = Vec::with_capacity(sample_count(dimensions)?);

    for k in 0..nz {
      for j in 0..ny {
        for i in 0..nx {
          values.push(f(lattice_position(origin, spacing, i, j, k)));
        }
      }
    }

    Self::new(dimensions, origin, spacing, values)
  }

  /// Constant field, handy for degenerate-input checks.
  pub fn uniform(dimensions: [usize; 3], value: f32) -> Result<Self, ExtractError> {
    let count = sample_count(dimensions)?;
    Self::from_values(dimensions, vec![value; count])
  }

  /// Linear sample index of lattice point (i, j, k).
  #[inline(always)]
  pub fn linear_index(&self, i: usize, j: usize, k: usize) -> usize {
    i + self.dimensions[0] * (j + self.dimensions[1] * k)
  }

  pub fn values(&self) -> &[f32] {
    &self.values
  }

  pub fn origin(&self) -> [f32; 3] {
    self.origin
  }

  pub fn spacing(&self) -> [f32; 3] {
    self.spacing
  }

  /// World-space box covered by the lattice.
  pub fn bounds(&self) -> MinMaxAABB {
    let [nx, ny, nz] = self.dimensions;
    MinMaxAABB::new(
      self.origin,
      lattice_position(
        self.origin,
        self.spacing,
        nx.saturating_sub(1),
        ny.saturating_sub(1),
        nz.saturating_sub(1),
      ),
    )
  }
}

impl ScalarField for VoxelGrid {
  #[inline]
  fn dimensions(&self) -> [usize; 3] {
    self.dimensions
  }

  #[inline]
  fn value_at(&self, i: usize, j: usize, k: usize) -> f32 {
    self.values[self.linear_index(i, j, k)]
  }

  #[inline]
  fn position_of(&self, i: usize, j: usize, k: usize) -> [f32; 3] {
    lattice_position(self.origin, self.spacing, i, j, k)
  }
}

/// Closure-backed field sampled over a bounding box at a fixed cube size.
pub struct ImplicitField<F> {
  function: F,
  origin: [f32; 3],
  cube_size: f32,
  dimensions: [usize; 3],
}

impl<F> ImplicitField<F>
where
  F: Fn([f32; 3]) -> f32,
{
  /// Cover `bounds` with cubes of edge `cube_size`.
  ///
  /// The lattice starts at `bounds.min` and may overhang `bounds.max` by less
  /// than one cube. Each axis gets at least one cell.
  pub fn new(function: F, bounds: MinMaxAABB, cube_size: f32) -> Result<Self, ExtractError> {
    check_spacing([cube_size; 3])?;
    if !bounds.min.iter().chain(&bounds.max).all(|v| v.is_finite()) {
      return Err(ExtractError::InvalidBounds {
        min: bounds.min,
        max: bounds.max,
      });
    }

    let extent = bounds.extent();
    let mut dimensions = [0usize; 3];
    for axis in 0..3 {
      // Float compare first: the extent itself may overflow to infinity.
      let cells = (extent[axis].max(0.0) / cube_size).ceil();
      if cells >= SAFETY_MAX_DIMENSION as f32 {
        return Err(ExtractError::GridTooLarge {
          dimension: (cells as usize).saturating_add(1),
          max: SAFETY_MAX_DIMENSION,
        });
      }
      dimensions[axis] = (cells as usize).max(1) + 1;
    }

    Ok(Self {
      function,
      origin: bounds.min,
      cube_size,
      dimensions,
    })
  }

  pub fn cube_size(&self) -> f32 {
    self.cube_size
  }

  /// Evaluate every lattice point into a dense grid.
  pub fn sample_grid(&self) -> Result<VoxelGrid, ExtractError> {
    VoxelGrid::from_fn(
      self.dimensions,
      self.origin,
      [self.cube_size; 3],
      &self.function,
    )
  }
}

impl<F> ScalarField for ImplicitField<F>
where
  F: Fn([f32; 3]) -> f32,
{
  fn dimensions(&self) -> [usize; 3] {
    self.dimensions
  }

  fn value_at(&self, i: usize, j: usize, k: usize) -> f32 {
    (self.function)(self.position_of(i, j, k))
  }

  fn position_of(&self, i: usize, j: usize, k: usize) -> [f32; 3] {
    lattice_position(self.origin, [self.cube_size; 3], i, j, k)
  }

  fn value_at_point(&self, point: [f32; 3]) -> Option<f32> {
    Some((self.function)(point))
  }
}

#[inline(always)]
fn lattice_position(origin: [f32; 3], spacing: [f32; 3], i: usize, j: usize, k: usize) -> [f32; 3] {
  [
    origin[0] + i as f32 * spacing[0],
    origin[1] + j as f32 * spacing[1],
    origin[2] + k as f32 * spacing[2],
  ]
}

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;
