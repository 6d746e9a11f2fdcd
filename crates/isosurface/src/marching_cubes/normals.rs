//! Vertex normal computation.
//!
//! Gradient normals come from the field itself, interpolated along the edge
//! that produced the vertex. Geometry normals are rebuilt from the finished
//! triangles.

use glam::Vec3A;

use crate::field::ScalarField;
use crate::types::MeshOutput;

const UP: [f32; 3] = [0.0, 1.0, 0.0];

/// Gradient normal at parameter `t` along the grid edge `lower -> upper`.
///
/// The gradient points toward larger field values, which is the side the
/// triangles face. `flip` negates it to follow reversed winding.
#[inline]
pub fn gradient_normal<F: ScalarField + ?Sized>(
  field: &F,
  lower: [usize; 3],
  upper: [usize; 3],
  t: f32,
  flip: bool,
) -> [f32; 3] {
  let g0 = Vec3A::from_array(field.gradient_at(lower[0], lower[1], lower[2]));
  let g1 = Vec3A::from_array(field.gradient_at(upper[0], upper[1], upper[2]));
  let gradient = g0.lerp(g1, t);

  let len_sq = gradient.length_squared();
  if !(len_sq >= 1e-12) {
    return UP;
  }

  let normal = gradient * len_sq.sqrt().recip();
  if flip {
    (-normal).to_array()
  } else {
    normal.to_array()
  }
}

/// Recalculate normals from triangle geometry using angle-weighted averaging.
///
/// Each face contributes its unit normal weighted by the interior angle of the
/// triangle at that vertex (Thürmer & Wüthrich, "Computing Vertex Normals from
/// Polygonal Facets", 1998). Degenerate faces contribute nothing; vertices
/// left without a contribution get +Y.
pub fn recalculate_from_geometry(output: &mut MeshOutput) {
  for vertex in &mut output.vertices {
    vertex.normal = [0.0; 3];
  }

  let indices = &output.indices;
  let vertices = &mut output.vertices;

  for tri in indices.chunks_exact(3) {
    let i0 = tri[0] as usize;
    let i1 = tri[1] as usize;
    let i2 = tri[2] as usize;

    let p0 = Vec3A::from_array(vertices[i0].position);
    let p1 = Vec3A::from_array(vertices[i1].position);
    let p2 = Vec3A::from_array(vertices[i2].position);

    let e01 = p1 - p0;
    let e02 = p2 - p0;
    let e12 = p2 - p1;

    let face_normal = e01.cross(e02);
    let face_len_sq = face_normal.length_squared();
    if face_len_sq < 1e-12 {
      continue;
    }
    let face_unit = face_normal * face_len_sq.sqrt().recip();

    let corners = [
      (i0, vertex_angle(e01, e02)),
      (i1, vertex_angle(-e01, e12)),
      (i2, vertex_angle(-e02, -e12)),
    ];
    for (index, angle) in corners {
      let accumulated = Vec3A::from_array(vertices[index].normal) + face_unit * angle;
      vertices[index].normal = accumulated.to_array();
    }
  }

  for vertex in &mut output.vertices {
    let n = Vec3A::from_array(vertex.normal);
    let len_sq = n.length_squared();
    vertex.normal = if len_sq < 1e-12 {
      UP
    } else {
      (n * len_sq.sqrt().recip()).to_array()
    };
  }
}

/// Angle between two edge vectors leaving a vertex, in radians.
#[inline]
fn vertex_angle(e1: Vec3A, e2: Vec3A) -> f32 {
  let len1_sq = e1.length_squared();
  let len2_sq = e2.length_squared();

  if len1_sq < 1e-12 || len2_sq < 1e-12 {
    return 0.0;
  }

  let cos_angle = e1.dot(e2) / (len1_sq.sqrt() * len2_sq.sqrt());
  // Clamp to [-1, 1] to handle floating point errors
  cos_angle.clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
#[path = "normals_test.rs"]
mod normals_test;
