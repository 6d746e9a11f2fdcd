//! Task queue for batched extraction.
//!
//! Following the IStage pattern: Enqueue → Tick → Completions
//!
//! Uses rayon for parallel execution on all platforms.
//! On WASM, requires wasm-bindgen-rayon initialization before use.

use std::sync::Arc;

use rayon::prelude::*;
use web_time::Instant;

use crate::{ExtractConfig, ExtractError, ExtractionStats, Extractor, MeshOutput, VoxelGrid};

/// Request to extract the isosurface of a grid.
#[derive(Clone, Debug)]
pub struct ExtractionRequest {
  /// Unique identifier for this request
  pub id: u64,
  /// Sampled field, shared with the caller
  pub grid: Arc<VoxelGrid>,
  /// Extraction configuration
  pub config: ExtractConfig,
}

/// Completed extraction result.
#[derive(Debug)]
pub struct ExtractionCompletion {
  /// Request ID this completion corresponds to
  pub id: u64,
  /// Extracted mesh, or why there is none
  pub result: Result<MeshOutput, ExtractError>,
  /// Walk statistics (zero when extraction failed)
  pub stats: ExtractionStats,
  /// Raw extraction time in microseconds
  pub extract_time_us: u64,
}

/// Extraction stage that processes requests in parallel.
pub struct ExtractionStage {
  /// Pending requests waiting to be processed
  pending: Vec<ExtractionRequest>,
  /// Completed results ready to be collected
  completed: Vec<ExtractionCompletion>,
  /// Next request ID
  next_id: u64,
}

impl Default for ExtractionStage {
  fn default() -> Self {
    Self::new()
  }
}

impl ExtractionStage {
  /// Create a new extraction stage.
  pub fn new() -> Self {
    Self {
      pending: Vec::new(),
      completed: Vec::new(),
      next_id: 0,
    }
  }

  /// Enqueue an extraction request, returning the assigned ID.
  pub fn enqueue(&mut self, grid: Arc<VoxelGrid>, config: ExtractConfig) -> u64 {
    let id = self.next_id;
    self.next_id += 1;

    self.pending.push(ExtractionRequest { id, grid, config });

    id
  }

  /// Process pending requests in parallel and move completions to output.
  /// Returns the number of tasks processed this tick.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "task_queue::tick"))]
  pub fn tick(&mut self) -> usize {
    if self.pending.is_empty() {
      return 0;
    }

    let requests = std::mem::take(&mut self.pending);
    let count = requests.len();

    let completions: Vec<ExtractionCompletion> = requests
      .into_par_iter()
      .map(|req| {
        let start = Instant::now();
        let (result, stats) = match Extractor::new(req.config).extract_with_stats(req.grid.as_ref()) {
          Ok((output, stats)) => (Ok(output), stats),
          Err(err) => (Err(err), ExtractionStats::default()),
        };
        let extract_time_us = start.elapsed().as_micros() as u64;

        if let Err(err) = &result {
          log::warn!("extraction request {} failed: {}", req.id, err);
        }

        ExtractionCompletion {
          id: req.id,
          result,
          stats,
          extract_time_us,
        }
      })
      .collect();

    log::debug!("extraction stage processed {} requests", count);

    self.completed.extend(completions);
    count
  }

  /// Take all completed extractions.
  pub fn drain_completions(&mut self) -> Vec<ExtractionCompletion> {
    std::mem::take(&mut self.completed)
  }

  /// Number of pending requests.
  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }

  /// Number of completed results waiting to be drained.
  pub fn completed_count(&self) -> usize {
    self.completed.len()
  }

  /// True when no work remains.
  pub fn is_idle(&self) -> bool {
    self.pending.is_empty() && self.completed.is_empty()
  }
}

#[cfg(test)]
#[path = "task_queue_test.rs"]
mod task_queue_test;
