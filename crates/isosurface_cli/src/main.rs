//! Isosurface extraction driver.
//!
//! Samples the field described by a TOML config (analytic SDF or raw f32
//! volume), extracts its isosurface with Marching Cubes and writes the mesh as
//! Wavefront OBJ.
//!
//! ```toml
//! [field]
//! kind = "torus"
//! major_radius = 10.0
//! minor_radius = 3.0
//! center = [16.0, 16.0, 16.0]
//!
//! [grid]
//! dimensions = [33, 33, 33]
//!
//! [extract]
//! normal_mode = "geometry"
//! ```

mod config;
mod obj;

use anyhow::{Context, Result};
use clap::Parser;
use isosurface::{Extractor, ScalarField};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use web_time::Instant;

use config::Config;

/// Marching Cubes isosurface extractor.
#[derive(Parser, Debug)]
#[command(name = "extract_mesh")]
#[command(about = "Extracts an isosurface mesh from a scalar field and writes OBJ")]
struct Args {
	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: PathBuf,

	/// Output OBJ path (default: config path with .obj extension).
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Override the iso-value from the config.
	#[arg(long)]
	iso: Option<f32>,

	/// Walk cells on the calling thread only.
	#[arg(long)]
	serial: bool,

	/// Log at debug level.
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<()> {
	let args = Args::parse();

	let default_level = if args.verbose { "debug" } else { "info" };
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
		.init();

	let output_path = args
		.output
		.clone()
		.unwrap_or_else(|| args.config.with_extension("obj"));
	let base_dir = args.config.parent().unwrap_or(Path::new(".")).to_path_buf();

	log::info!("Loading config from: {}", args.config.display());
	let config = Config::load(&args.config)?;

	let start = Instant::now();
	let field = config.build_field(&base_dir)?;
	log::info!(
		"Sampled {:?} lattice in {} ms",
		field.dimensions(),
		start.elapsed().as_millis()
	);

	let mut extract_config = config.extract_config().with_parallel(!args.serial);
	if let Some(iso) = args.iso {
		extract_config = extract_config.with_iso_value(iso);
	}

	let start = Instant::now();
	let (mesh, stats) = Extractor::new(extract_config)
		.extract_with_stats(&field)
		.context("Extraction failed")?;
	log::info!(
		"Extracted {} vertices, {} triangles in {} ms",
		mesh.vertices.len(),
		mesh.triangle_count(),
		start.elapsed().as_millis()
	);
	log::debug!(
		"{} of {} cells active, {} edge crossings, {} vertices reused",
		stats.active_cells,
		stats.cells_visited,
		stats.edge_intersections,
		stats.vertices_reused
	);

	if mesh.is_empty() {
		log::warn!("Field does not cross the iso-value; writing an empty mesh");
	}

	let file = File::create(&output_path)
		.with_context(|| format!("Failed to create output: {}", output_path.display()))?;
	let mut writer = BufWriter::new(file);
	obj::write_obj(&mut writer, &mesh, config.extract.write_normals)
		.and_then(|_| writer.flush())
		.with_context(|| format!("Failed to write: {}", output_path.display()))?;

	log::info!("Done! Output written to: {}", output_path.display());

	Ok(())
}
