//! Locating the iso crossing along a grid edge.
//!
//! Every edge is walked from its lower lattice point to its upper one, no
//! matter which cell asks for it. The same inputs therefore produce the same
//! bits, and neighbouring cells agree on shared vertices.

use crate::field::ScalarField;
use crate::types::RootMode;

/// A sign-changing grid edge, oriented from the lower lattice point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSegment {
  pub start: [f32; 3],
  pub end: [f32; 3],
  pub start_value: f32,
  pub end_value: f32,
}

impl EdgeSegment {
  #[inline(always)]
  pub fn point_at(&self, t: f32) -> [f32; 3] {
    lerp3(self.start, self.end, t)
  }
}

/// Parameter of the iso crossing between two samples.
///
/// `t = (iso - v0) / (v1 - v0)` clamped to [0, 1]. Falls back to the midpoint
/// when the samples are (nearly) equal or not comparable.
#[inline]
pub fn edge_t(v0: f32, v1: f32, iso_value: f32) -> f32 {
  let delta = v1 - v0;
  if !(delta.abs() >= f32::EPSILON) {
    return 0.5;
  }
  ((iso_value - v0) / delta).clamp(0.0, 1.0)
}

#[inline(always)]
pub fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
  [
    a[0] + (b[0] - a[0]) * t,
    a[1] + (b[1] - a[1]) * t,
    a[2] + (b[2] - a[2]) * t,
  ]
}

/// Crossing parameter along `edge` for the given root mode.
///
/// Refined modes probe the field through [`ScalarField::value_at_point`] and
/// keep a bracket around the crossing. When the field cannot be sampled off
/// the lattice the result is the plain interpolation.
pub fn find_root<F: ScalarField + ?Sized>(
  field: &F,
  edge: &EdgeSegment,
  iso_value: f32,
  mode: RootMode,
) -> f32 {
  let (steps, bisect) = match mode {
    RootMode::Lerp => return edge_t(edge.start_value, edge.end_value, iso_value),
    RootMode::LerpSteps(steps) => (steps, false),
    RootMode::Bisection(steps) => (steps, true),
  };

  let start_above = edge.start_value > iso_value;
  let (mut lo, mut hi) = (0.0f32, 1.0f32);
  let (mut value_lo, mut value_hi) = (edge.start_value, edge.end_value);

  for _ in 0..steps {
    let probe = if bisect {
      0.5 * (lo + hi)
    } else {
      lo + (hi - lo) * edge_t(value_lo, value_hi, iso_value)
    };

    let Some(value) = field.value_at_point(edge.point_at(probe)) else {
      break;
    };

    if (value > iso_value) == start_above {
      lo = probe;
      value_lo = value;
    } else {
      hi = probe;
      value_hi = value;
    }
  }

  lo + (hi - lo) * edge_t(value_lo, value_hi, iso_value)
}

#[cfg(test)]
#[path = "interpolate_test.rs"]
mod interpolate_test;
