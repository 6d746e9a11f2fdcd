//! Wavefront OBJ output.

use isosurface::MeshOutput;
use std::io::{self, Write};

/// Write `mesh` as OBJ.
///
/// Faces use 1-based indices. With `normals`, each vertex also gets a `vn`
/// line and faces reference it as `v//vn`.
pub fn write_obj<W: Write>(writer: &mut W, mesh: &MeshOutput, normals: bool) -> io::Result<()> {
	writeln!(writer, "# isosurface OBJ export")?;
	writeln!(
		writer,
		"# {} vertices, {} triangles",
		mesh.vertices.len(),
		mesh.triangle_count()
	)?;
	if mesh.bounds.is_valid() {
		writeln!(
			writer,
			"# bounds {:?} .. {:?}",
			mesh.bounds.min, mesh.bounds.max
		)?;
	}
	writeln!(writer)?;

	for v in &mesh.vertices {
		let [x, y, z] = v.position;
		writeln!(writer, "v {} {} {}", x, y, z)?;
	}

	if normals {
		for v in &mesh.vertices {
			let [x, y, z] = v.normal;
			writeln!(writer, "vn {} {} {}", x, y, z)?;
		}
	}

	writeln!(writer)?;

	for [a, b, c] in mesh.triangles() {
		let (a, b, c) = (a + 1, b + 1, c + 1);
		if normals {
			writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
		} else {
			writeln!(writer, "f {a} {b} {c}")?;
		}
	}

	Ok(())
}
