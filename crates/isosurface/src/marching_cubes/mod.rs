//! Marching Cubes isosurface extraction.
//!
//! Converts a scalar field sampled on a regular lattice into a triangle mesh
//! approximating the surface where the field equals an iso-value.
//!
//! # Algorithm Overview
//!
//! Marching Cubes visits every cell (the cube spanned by 2×2×2 neighbouring
//! samples), classifies its corners against the iso-value, and looks up a
//! precomputed triangulation for that configuration. Vertices are placed ON
//! the cell edges where the field crosses the iso-value.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  field: impl ScalarField - Nx × Ny × Nz samples + positions     │
//! │  config: ExtractConfig   - iso-value, sharing, normals, roots   │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 1: Cell Walk (per slab)                │
//! │  For each cell, x fastest, then y, then z:                      │
//! │    Load 8 corner values                                         │
//! │    Build configuration index (bit i = value_i > iso)            │
//! │    Skip if EDGE_TABLE[config] == 0                              │
//! │    Create or reuse one vertex per active edge                   │
//! │    Emit TRI_TABLE[config] triples until -1                      │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 2: Merge                               │
//! │  Concatenate slabs in layer order, resolving vertices on        │
//! │  slab seams to the index assigned below                         │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 3: Normals + Bounds                    │
//! │  Gradient normals are set during the walk                       │
//! │  Geometry normals are rebuilt from the triangles here           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Orientation
//!
//! Triangles are counter-clockwise seen from the side of larger field values,
//! so for a signed distance field (negative inside) face normals point out of
//! the solid. `flip_winding` reverses this.
//!
//! # Determinism
//!
//! The output is a pure function of the field and the configuration. The
//! parallel walk produces exactly the serial vertex order, triangles and
//! statistics.

mod config_index;
mod edge_key;
mod interpolate;
mod normals;
mod parallel;
mod slab;

pub use edge_key::EdgeKey;
pub use interpolate::edge_t;

use crate::error::{check_dimensions, ExtractError};
use crate::field::ScalarField;
use crate::types::{CancelFlag, ExtractConfig, ExtractionStats, MeshOutput, NormalMode};

/// Extract the isosurface of `field` at `iso_value` with default settings.
///
/// Fails with [`ExtractError::InvalidGrid`] when any dimension is below 2,
/// and with [`ExtractError::TooManyVertices`] when the mesh needs more
/// vertices than `u32` indices address. Any other input, including a
/// constant field or NaN samples, produces a (possibly empty) mesh.
pub fn extract<F: ScalarField + Sync + ?Sized>(
  field: &F,
  iso_value: f32,
) -> Result<MeshOutput, ExtractError> {
  Extractor::new(ExtractConfig::new().with_iso_value(iso_value)).extract(field)
}

/// Configured isosurface extractor.
///
/// Holds no state between calls; the same extractor can be shared across
/// threads and reused for any number of fields.
#[derive(Clone, Debug, Default)]
pub struct Extractor {
  config: ExtractConfig,
}

impl Extractor {
  pub fn new(config: ExtractConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &ExtractConfig {
    &self.config
  }

  /// Extract the isosurface of `field`.
  pub fn extract<F: ScalarField + Sync + ?Sized>(
    &self,
    field: &F,
  ) -> Result<MeshOutput, ExtractError> {
    self.run(field, None).map(|(output, _)| output)
  }

  /// Extract the isosurface of `field` along with walk statistics.
  pub fn extract_with_stats<F: ScalarField + Sync + ?Sized>(
    &self,
    field: &F,
  ) -> Result<(MeshOutput, ExtractionStats), ExtractError> {
    self.run(field, None)
  }

  /// Extract, stopping with [`ExtractError::Cancelled`] once `cancel` is set.
  ///
  /// The flag is polled before each cell layer, so a run that has already
  /// passed its last layer check completes normally.
  pub fn extract_cancellable<F: ScalarField + Sync + ?Sized>(
    &self,
    field: &F,
    cancel: &CancelFlag,
  ) -> Result<MeshOutput, ExtractError> {
    self.run(field, Some(cancel)).map(|(output, _)| output)
  }

  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "marching_cubes::extract"))]
  fn run<F: ScalarField + Sync + ?Sized>(
    &self,
    field: &F,
    cancel: Option<&CancelFlag>,
  ) -> Result<(MeshOutput, ExtractionStats), ExtractError> {
    let dimensions = field.dimensions();
    check_dimensions(dimensions)?;

    let slabs = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("cell_walk").entered();

      if self.config.parallel {
        parallel::extract_slabs(field, &self.config, cancel)?
      } else {
        vec![slab::extract_layers(
          field,
          &self.config,
          0..dimensions[2] - 1,
          cancel,
        )?]
      }
    };

    let (mut output, stats) = parallel::merge(slabs, dimensions, self.config.vertex_mode)?;

    if self.config.normal_mode == NormalMode::Geometry {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("geometry_normals").entered();

      normals::recalculate_from_geometry(&mut output);
    }

    for vertex in &output.vertices {
      output.bounds.encapsulate(vertex.position);
    }

    log::debug!(
      "extracted {} vertices, {} triangles from {:?} samples (iso {}, {} active of {} cells)",
      output.vertices.len(),
      output.triangle_count(),
      dimensions,
      self.config.iso_value,
      stats.active_cells,
      stats.cells_visited
    );

    Ok((output, stats))
  }
}
