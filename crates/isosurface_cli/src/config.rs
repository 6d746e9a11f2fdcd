//! Configuration parsing for mesh extraction.

use anyhow::{Context, Result};
use isosurface::{
	BoxSampler, ExtractConfig, NormalMode, RootMode, ScalarField, SdfSampler, SphereSampler,
	TiltedPlaneSampler, TorusSampler, VertexMode, VoxelGrid,
};
use serde::Deserialize;
use std::path::Path;

/// Root configuration for an extraction run.
#[derive(Debug, Deserialize)]
pub struct Config {
	/// Field to extract.
	pub field: FieldConfig,
	/// Sampling lattice for analytic fields.
	pub grid: Option<GridConfig>,
	/// Extraction options.
	#[serde(default)]
	pub extract: ExtractOptions,
}

/// Scalar field source.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldConfig {
	Sphere {
		radius: f32,
		#[serde(default)]
		center: [f32; 3],
	},
	Box {
		half_extents: [f32; 3],
		#[serde(default)]
		center: [f32; 3],
	},
	Torus {
		major_radius: f32,
		minor_radius: f32,
		#[serde(default)]
		center: [f32; 3],
	},
	Plane {
		#[serde(default)]
		height: f32,
		#[serde(default = "default_plane_angle")]
		angle_degrees: f32,
	},
	/// Little-endian f32 samples, x fastest.
	Raw {
		/// Path to the sample file, relative to the config file.
		path: String,
		dimensions: [usize; 3],
		#[serde(default)]
		origin: [f32; 3],
		#[serde(default = "default_spacing")]
		spacing: [f32; 3],
	},
}

/// Lattice an analytic field is sampled on.
#[derive(Debug, Deserialize)]
pub struct GridConfig {
	/// Sample counts along X, Y, Z.
	pub dimensions: [usize; 3],
	#[serde(default)]
	pub origin: [f32; 3],
	#[serde(default = "default_spacing")]
	pub spacing: [f32; 3],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexModeOption {
	#[default]
	Shared,
	PerCell,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalModeOption {
	None,
	#[default]
	Gradient,
	Geometry,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootModeOption {
	#[default]
	Lerp,
	LerpSteps,
	Bisection,
}

/// Extraction options (all optional).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
	pub iso_value: f32,
	pub vertex_mode: VertexModeOption,
	pub normal_mode: NormalModeOption,
	pub root_mode: RootModeOption,
	/// Refinement iterations for `lerp_steps` and `bisection`.
	pub root_steps: u32,
	pub flip_winding: bool,
	/// Emit `vn` lines and `v//vn` faces.
	pub write_normals: bool,
}

impl Default for ExtractOptions {
	fn default() -> Self {
		Self {
			iso_value: 0.0,
			vertex_mode: VertexModeOption::default(),
			normal_mode: NormalModeOption::default(),
			root_mode: RootModeOption::default(),
			root_steps: 8,
			flip_winding: false,
			write_normals: true,
		}
	}
}

fn default_spacing() -> [f32; 3] {
	[1.0; 3]
}

fn default_plane_angle() -> f32 {
	45.0
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content)
	}

	/// Parse and validate configuration TOML.
	pub fn parse(content: &str) -> Result<Self> {
		let config: Config =
			toml::from_str(content).with_context(|| "Failed to parse config TOML")?;

		match &config.field {
			FieldConfig::Sphere { radius, .. } if *radius <= 0.0 => {
				anyhow::bail!("Sphere radius must be positive, got {}", radius);
			}
			FieldConfig::Box { half_extents, .. } if half_extents.iter().any(|h| *h <= 0.0) => {
				anyhow::bail!("Box half extents must be positive, got {:?}", half_extents);
			}
			FieldConfig::Torus {
				major_radius,
				minor_radius,
				..
			} if *minor_radius <= 0.0 || *major_radius <= 0.0 => {
				anyhow::bail!(
					"Torus radii must be positive, got {} and {}",
					major_radius,
					minor_radius
				);
			}
			FieldConfig::Raw { .. } => {}
			_ if config.grid.is_none() => {
				anyhow::bail!("Analytic fields need a [grid] section");
			}
			_ => {}
		}

		if config.extract.root_mode != RootModeOption::Lerp && config.extract.root_steps == 0 {
			anyhow::bail!("root_steps must be at least 1 when refining roots");
		}

		Ok(config)
	}

	/// Library configuration for these options.
	pub fn extract_config(&self) -> ExtractConfig {
		let options = &self.extract;
		let root_mode = match options.root_mode {
			RootModeOption::Lerp => RootMode::Lerp,
			RootModeOption::LerpSteps => RootMode::LerpSteps(options.root_steps),
			RootModeOption::Bisection => RootMode::Bisection(options.root_steps),
		};

		ExtractConfig::new()
			.with_iso_value(options.iso_value)
			.with_vertex_mode(match options.vertex_mode {
				VertexModeOption::Shared => VertexMode::Shared,
				VertexModeOption::PerCell => VertexMode::PerCell,
			})
			.with_normal_mode(match options.normal_mode {
				NormalModeOption::None => NormalMode::None,
				NormalModeOption::Gradient => NormalMode::Gradient,
				NormalModeOption::Geometry => NormalMode::Geometry,
			})
			.with_root_mode(root_mode)
			.with_flip_winding(options.flip_winding)
	}

	/// Sample the configured field.
	///
	/// Raw sample paths are resolved against `base_dir`.
	pub fn build_field(&self, base_dir: &Path) -> Result<SampledField> {
		let sampler: Box<dyn SdfSampler> = match &self.field {
			FieldConfig::Raw {
				path,
				dimensions,
				origin,
				spacing,
			} => {
				let grid = load_raw(&base_dir.join(path), *dimensions, *origin, *spacing)?;
				return Ok(SampledField {
					grid,
					sampler: None,
				});
			}
			FieldConfig::Sphere { radius, center } => {
				Box::new(SphereSampler::new(*radius).with_center(*center))
			}
			FieldConfig::Box {
				half_extents,
				center,
			} => Box::new(BoxSampler::new(*half_extents).with_center(*center)),
			FieldConfig::Torus {
				major_radius,
				minor_radius,
				center,
			} => Box::new(TorusSampler::new(*major_radius, *minor_radius).with_center(*center)),
			FieldConfig::Plane {
				height,
				angle_degrees,
			} => Box::new(
				TiltedPlaneSampler::new()
					.with_height(*height)
					.with_angle_degrees(*angle_degrees),
			),
		};

		let Some(grid) = &self.grid else {
			anyhow::bail!("Analytic fields need a [grid] section");
		};

		let grid = sampler
			.sample_grid(grid.dimensions, grid.origin, grid.spacing)
			.with_context(|| "Failed to sample field")?;
		Ok(SampledField {
			grid,
			sampler: Some(sampler),
		})
	}
}

/// Lattice samples, plus the analytic source when there is one.
///
/// Keeping the source lets root refinement probe between lattice points.
pub struct SampledField {
	pub grid: VoxelGrid,
	sampler: Option<Box<dyn SdfSampler>>,
}

impl ScalarField for SampledField {
	fn dimensions(&self) -> [usize; 3] {
		self.grid.dimensions()
	}

	fn value_at(&self, i: usize, j: usize, k: usize) -> f32 {
		self.grid.value_at(i, j, k)
	}

	fn position_of(&self, i: usize, j: usize, k: usize) -> [f32; 3] {
		self.grid.position_of(i, j, k)
	}

	fn value_at_point(&self, point: [f32; 3]) -> Option<f32> {
		self.sampler.as_ref().map(|s| s.eval(point))
	}
}

/// Load a raw little-endian f32 volume.
fn load_raw(
	path: &Path,
	dimensions: [usize; 3],
	origin: [f32; 3],
	spacing: [f32; 3],
) -> Result<VoxelGrid> {
	let bytes =
		std::fs::read(path).with_context(|| format!("Failed to read samples: {}", path.display()))?;
	let values = decode_samples(&bytes)
		.with_context(|| format!("Malformed sample file: {}", path.display()))?;
	VoxelGrid::new(dimensions, origin, spacing, values)
		.with_context(|| format!("Invalid raw grid: {}", path.display()))
}

/// Decode little-endian f32 samples.
pub fn decode_samples(bytes: &[u8]) -> Result<Vec<f32>> {
	if bytes.len() % 4 != 0 {
		anyhow::bail!("Byte length {} is not a multiple of 4", bytes.len());
	}
	Ok(bytes
		.chunks_exact(4)
		.map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
		.collect())
}

#[cfg(test)]
mod tests {
	use super::*;

	const SPHERE: &str = r#"
[field]
kind = "sphere"
radius = 5.3
center = [8.0, 8.0, 8.0]

[grid]
dimensions = [17, 17, 17]
"#;

	#[test]
	fn parses_sphere_with_defaults() {
		let config = Config::parse(SPHERE).unwrap();
		let grid = config.grid.as_ref().unwrap();
		assert_eq!(grid.spacing, [1.0; 3]);
		assert_eq!(grid.origin, [0.0; 3]);
		assert!(config.extract.write_normals);
		assert_eq!(config.extract_config(), ExtractConfig::default());

		let field = config.build_field(Path::new(".")).unwrap();
		let mesh = isosurface::extract(&field, 0.0).unwrap();
		assert_eq!(mesh.vertices.len(), 534);
		assert_eq!(field.value_at_point([8.0, 8.0, 8.0]), Some(-5.3));
	}

	#[test]
	fn parses_extract_options() {
		let toml = format!(
			"{}\n[extract]\niso_value = 0.5\nvertex_mode = \"per_cell\"\nnormal_mode = \"geometry\"\nroot_mode = \"bisection\"\nroot_steps = 12\nflip_winding = true\n",
			SPHERE
		);
		let config = Config::parse(&toml).unwrap().extract_config();
		assert_eq!(config.iso_value, 0.5);
		assert_eq!(config.vertex_mode, VertexMode::PerCell);
		assert_eq!(config.normal_mode, NormalMode::Geometry);
		assert_eq!(config.root_mode, RootMode::Bisection(12));
		assert!(config.flip_winding);
	}

	#[test]
	fn rejects_analytic_field_without_grid() {
		let err = Config::parse("[field]\nkind = \"plane\"\n").unwrap_err();
		assert!(err.to_string().contains("[grid]"));
	}

	#[test]
	fn rejects_bad_radius() {
		let toml = SPHERE.replace("5.3", "-1.0");
		assert!(Config::parse(&toml).is_err());
	}

	#[test]
	fn rejects_zero_refinement_steps() {
		let toml = format!("{}\n[extract]\nroot_mode = \"lerp_steps\"\nroot_steps = 0\n", SPHERE);
		assert!(Config::parse(&toml).is_err());
	}

	#[test]
	fn oversized_grid_fails_before_sampling() {
		let toml = SPHERE.replace("[17, 17, 17]", "[5000, 2, 2]");
		let err = Config::parse(&toml)
			.unwrap()
			.build_field(Path::new("."))
			.err()
			.unwrap();
		assert!(format!("{:#}", err).contains("exceeds the maximum"));
	}

	#[test]
	fn rejects_unknown_field_kind() {
		assert!(Config::parse("[field]\nkind = \"teapot\"\n").is_err());
	}

	#[test]
	fn raw_field_needs_no_grid() {
		let toml = "[field]\nkind = \"raw\"\npath = \"volume.f32\"\ndimensions = [2, 2, 2]\n";
		let config = Config::parse(toml).unwrap();
		assert!(config.grid.is_none());
	}

	#[test]
	fn decodes_little_endian_samples() {
		let mut bytes = Vec::new();
		for v in [1.0f32, -2.5, 0.125] {
			bytes.extend_from_slice(&v.to_le_bytes());
		}
		assert_eq!(decode_samples(&bytes).unwrap(), vec![1.0, -2.5, 0.125]);
		assert!(decode_samples(&bytes[..5]).is_err());
	}

	#[test]
	fn loads_raw_samples_relative_to_base_dir() {
		let dir = std::env::temp_dir().join(format!("extract_mesh_raw_{}", std::process::id()));
		std::fs::create_dir_all(&dir).unwrap();

		let mut bytes = Vec::new();
		for i in 0..8 {
			let v: f32 = if i == 0 { 1.0 } else { -1.0 };
			bytes.extend_from_slice(&v.to_le_bytes());
		}
		std::fs::write(dir.join("cell.f32"), &bytes).unwrap();

		let toml = "[field]\nkind = \"raw\"\npath = \"cell.f32\"\ndimensions = [2, 2, 2]\n";
		let field = Config::parse(toml).unwrap().build_field(&dir).unwrap();
		assert_eq!(field.value_at_point([0.5; 3]), None);
		let mesh = isosurface::extract(&field, 0.0).unwrap();
		assert_eq!(mesh.triangle_count(), 1);

		let toml = toml.replace("[2, 2, 2]", "[2, 2, 3]");
		assert!(Config::parse(&toml).unwrap().build_field(&dir).is_err());

		std::fs::remove_dir_all(&dir).unwrap();
	}
}
