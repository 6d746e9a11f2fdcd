//! isosurface - Marching Cubes mesh extraction from sampled scalar fields
//!
//! This crate turns a scalar field sampled on a regular 3-D lattice into a
//! triangle mesh of the surface where the field equals an iso-value, using
//! the classical Marching Cubes case tables.
//!
//! # Features
//!
//! - **Marching Cubes**: classical 256-case triangulation, embedded verbatim
//! - **Vertex Sharing**: one vertex per intersected grid edge, or naive
//!   per-cell emission
//! - **Slab Parallelism**: rayon workers over z-slabs, with output identical
//!   to the serial walk
//! - **Normals**: field gradient or angle-weighted face normals
//! - **Root Refinement**: false-position or bisection along edges for fields
//!   that can be sampled between lattice points
//!
//! # Example
//!
//! ```
//! use isosurface::{extract, SdfSampler, SphereSampler};
//!
//! let grid = SphereSampler::new(5.3)
//!   .with_center([8.0, 8.0, 8.0])
//!   .sample_grid([17, 17, 17], [0.0; 3], [1.0; 3])
//!   .unwrap();
//!
//! let mesh = extract(&grid, 0.0).unwrap();
//! assert_eq!(mesh.triangle_count(), 1064);
//! ```

pub mod error;
pub mod field;
pub mod marching_cubes;
pub mod samplers;
pub mod tables;
pub mod types;

// Re-export commonly used items
pub use error::ExtractError;
pub use field::{ImplicitField, ScalarField, VoxelGrid, SAFETY_MAX_DIMENSION};
pub use marching_cubes::{extract, Extractor};
pub use samplers::{BoxSampler, SdfSampler, SphereSampler, TiltedPlaneSampler, TorusSampler};
pub use types::{
  CancelFlag, ExtractConfig, ExtractionStats, MeshOutput, MinMaxAABB, NormalMode, RootMode,
  Vertex, VertexMode,
};

// Task queue for batched extraction
pub mod task_queue;
pub use task_queue::{ExtractionCompletion, ExtractionRequest, ExtractionStage};

// Engine-agnostic metrics collection
pub mod metrics;
pub use metrics::{ExtractionMetrics, RollingWindow};
