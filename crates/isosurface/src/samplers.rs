//! Simple SDF samplers for testing and debugging.
//!
//! These samplers implement deterministic mathematical SDFs that are easy to
//! verify by hand. All of them are negative inside and positive outside, so
//! with the default iso-value of 0 the extracted triangles face outward.

use crate::error::ExtractError;
use crate::field::VoxelGrid;

/// Analytic signed distance function.
pub trait SdfSampler: Sync {
  /// Signed distance at a world position.
  fn eval(&self, point: [f32; 3]) -> f32;

  /// Sample the SDF on a lattice.
  fn sample_grid(
    &self,
    dimensions: [usize; 3],
    origin: [f32; 3],
    spacing: [f32; 3],
  ) -> Result<VoxelGrid, ExtractError> {
    VoxelGrid::from_fn(dimensions, origin, spacing, |p| self.eval(p))
  }
}

#[inline(always)]
fn length(v: [f32; 3]) -> f32 {
  (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

#[inline(always)]
fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
  [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Sphere SDF sampler.
#[derive(Clone, Debug)]
pub struct SphereSampler {
  /// Center of the sphere in world coordinates
  pub center: [f32; 3],
  /// Radius of the sphere
  pub radius: f32,
}

impl Default for SphereSampler {
  fn default() -> Self {
    Self {
      center: [0.0; 3],
      radius: 1.0,
    }
  }
}

impl SphereSampler {
  pub fn new(radius: f32) -> Self {
    Self {
      center: [0.0; 3],
      radius,
    }
  }

  pub fn with_center(mut self, center: [f32; 3]) -> Self {
    self.center = center;
    self
  }
}

impl SdfSampler for SphereSampler {
  #[inline]
  fn eval(&self, point: [f32; 3]) -> f32 {
    length(sub(point, self.center)) - self.radius
  }
}

/// Axis-aligned box SDF sampler.
#[derive(Clone, Debug)]
pub struct BoxSampler {
  pub center: [f32; 3],
  /// Half the box size along each axis.
  pub half_extents: [f32; 3],
}

impl BoxSampler {
  pub fn new(half_extents: [f32; 3]) -> Self {
    Self {
      center: [0.0; 3],
      half_extents,
    }
  }

  pub fn with_center(mut self, center: [f32; 3]) -> Self {
    self.center = center;
    self
  }
}

impl SdfSampler for BoxSampler {
  fn eval(&self, point: [f32; 3]) -> f32 {
    let p = sub(point, self.center);
    let q = [
      p[0].abs() - self.half_extents[0],
      p[1].abs() - self.half_extents[1],
      p[2].abs() - self.half_extents[2],
    ];
    let outside = length([q[0].max(0.0), q[1].max(0.0), q[2].max(0.0)]);
    let inside = q[0].max(q[1]).max(q[2]).min(0.0);
    outside + inside
  }
}

/// Torus SDF sampler, ring in the XZ plane.
#[derive(Clone, Debug)]
pub struct TorusSampler {
  pub center: [f32; 3],
  /// Distance from the center to the middle of the tube.
  pub major_radius: f32,
  /// Tube radius.
  pub minor_radius: f32,
}

impl TorusSampler {
  pub fn new(major_radius: f32, minor_radius: f32) -> Self {
    Self {
      center: [0.0; 3],
      major_radius,
      minor_radius,
    }
  }

  pub fn with_center(mut self, center: [f32; 3]) -> Self {
    self.center = center;
    self
  }
}

impl SdfSampler for TorusSampler {
  fn eval(&self, point: [f32; 3]) -> f32 {
    let p = sub(point, self.center);
    let ring = (p[0] * p[0] + p[2] * p[2]).sqrt() - self.major_radius;
    (ring * ring + p[1] * p[1]).sqrt() - self.minor_radius
  }
}

/// Tilted plane SDF sampler.
///
/// Creates a plane tilted around the Z axis. Useful for checking that a
/// surface crossing many cells at a predictable angle stays watertight.
///
/// SDF: `(y - height) * cos(angle) - x * sin(angle)`
#[derive(Clone, Debug)]
pub struct TiltedPlaneSampler {
  /// Height offset of the plane (default: 0.0)
  pub height: f32,
  /// Tilt angle in radians (default: π/4 = 45°)
  pub angle: f32,
}

impl Default for TiltedPlaneSampler {
  fn default() -> Self {
    Self {
      height: 0.0,
      angle: std::f32::consts::FRAC_PI_4,
    }
  }
}

impl TiltedPlaneSampler {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_height(mut self, height: f32) -> Self {
    self.height = height;
    self
  }

  pub fn with_angle_degrees(mut self, degrees: f32) -> Self {
    self.angle = degrees.to_radians();
    self
  }
}

impl SdfSampler for TiltedPlaneSampler {
  fn eval(&self, point: [f32; 3]) -> f32 {
    (point[1] - self.height) * self.angle.cos() - point[0] * self.angle.sin()
  }
}

#[cfg(test)]
#[path = "samplers_test.rs"]
mod samplers_test;
