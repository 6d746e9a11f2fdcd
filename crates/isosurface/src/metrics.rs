//! Extraction timing and volume statistics.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use isosurface::metrics::{ExtractionMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // Record completions drained from an ExtractionStage:
//! for completion in stage.drain_completions() {
//!     metrics.record_completion(&completion);
//! }
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::task_queue::ExtractionCompletion;
use crate::types::{ExtractionStats, MeshOutput, Vertex};

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create a new rolling window with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate over values (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    /// Get the most recent value.
    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl<T: Copy + Default + std::ops::Add<Output = T>> RollingWindow<T> {
    /// Compute the sum of all values.
    pub fn sum(&self) -> T {
        self.buffer.iter().copied().fold(T::default(), |acc, x| acc + x)
    }
}

impl RollingWindow<u64> {
    /// Compute the average of all values.
    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.buffer.len() as f64
        }
    }

    /// Get min and max values.
    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = *self.buffer.iter().min()?;
        let max = *self.buffer.iter().max()?;
        Some((min, max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(128)
    }
}

/// Totals and recent timings across many extractions.
#[derive(Debug, Clone, Default)]
pub struct ExtractionMetrics {
    // Timing
    /// Rolling window of extraction times in microseconds.
    pub extract_timings: RollingWindow<u64>,
    /// Last extraction time in microseconds.
    pub last_extract_us: u64,

    // Volume
    /// Meshes produced this session.
    pub total_meshes: u64,
    /// Extractions that returned an error.
    pub failed_extractions: u64,
    pub total_vertices: u64,
    pub total_triangles: u64,
    /// Walk counters summed over all extractions.
    pub stats: ExtractionStats,
    /// Approximate memory held by produced meshes (vertices + indices).
    pub mesh_memory_bytes: u64,
}

impl ExtractionMetrics {
    /// Create new metrics with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset timings. Session totals are cumulative and kept.
    pub fn reset(&mut self) {
        self.extract_timings.clear();
        self.last_extract_us = 0;
    }

    /// Record an extraction timing.
    pub fn record_extract_timing(&mut self, timing_us: u64) {
        if is_enabled() {
            self.extract_timings.push(timing_us);
            self.last_extract_us = timing_us;
        }
    }

    /// Record a produced mesh and its walk statistics.
    pub fn record_mesh(&mut self, output: &MeshOutput, stats: &ExtractionStats) {
        if !is_enabled() {
            return;
        }

        self.total_meshes += 1;
        self.total_vertices += output.vertices.len() as u64;
        self.total_triangles += output.triangle_count() as u64;
        self.stats += *stats;
        self.mesh_memory_bytes += (output.vertices.len() * std::mem::size_of::<Vertex>()
            + output.indices.len() * std::mem::size_of::<u32>()) as u64;
    }

    /// Record a completion drained from an extraction stage.
    pub fn record_completion(&mut self, completion: &ExtractionCompletion) {
        if !is_enabled() {
            return;
        }

        self.record_extract_timing(completion.extract_time_us);
        match &completion.result {
            Ok(output) => self.record_mesh(output, &completion.stats),
            Err(_) => self.failed_extractions += 1,
        }
    }

    /// Get average extraction timing in microseconds.
    pub fn avg_extract_timing_us(&self) -> f64 {
        self.extract_timings.average()
    }

    pub fn mesh_memory_mb(&self) -> f64 {
        self.mesh_memory_bytes as f64 / 1_048_576.0
    }
}

#[cfg(all(test, feature = "metrics"))]
mod tests {
    use super::*;
    use crate::ExtractError;

    #[test]
    fn test_rolling_window() {
        let mut window = RollingWindow::new(3);
        assert!(window.is_empty());

        window.push(10u64);
        window.push(20);
        window.push(30);
        assert_eq!(window.len(), 3);
        assert_eq!(window.sum(), 60);
        assert_eq!(window.average(), 20.0);

        // Push one more, oldest should be evicted
        window.push(40);
        assert_eq!(window.len(), 3);
        assert_eq!(window.sum(), 90);
        assert_eq!(window.last(), Some(&40));

        let (min, max) = window.min_max().unwrap();
        assert_eq!(min, 20);
        assert_eq!(max, 40);
    }

    #[test]
    fn test_zero_capacity_window_stays_empty() {
        let mut window = RollingWindow::new(0);
        window.push(1u64);
        assert!(window.is_empty());
        assert_eq!(window.min_max(), None);
        assert_eq!(window.average(), 0.0);
    }

    #[test]
    fn test_timing_recording() {
        let mut metrics = ExtractionMetrics::new();

        metrics.record_extract_timing(1000);
        metrics.record_extract_timing(2000);
        metrics.record_extract_timing(3000);

        assert_eq!(metrics.extract_timings.len(), 3);
        assert_eq!(metrics.avg_extract_timing_us(), 2000.0);
        assert_eq!(metrics.last_extract_us, 3000);

        metrics.reset();
        assert!(metrics.extract_timings.is_empty());
    }

    #[test]
    fn test_record_completions() {
        let mut metrics = ExtractionMetrics::new();

        let mut output = MeshOutput::new();
        output.vertices = vec![Vertex::default(); 3];
        output.indices = vec![0, 1, 2];
        let stats = ExtractionStats {
            cells_visited: 1,
            active_cells: 1,
            edge_intersections: 3,
            vertices_reused: 0,
            triangles: 1,
        };

        metrics.record_completion(&ExtractionCompletion {
            id: 0,
            result: Ok(output),
            stats,
            extract_time_us: 50,
        });
        metrics.record_completion(&ExtractionCompletion {
            id: 1,
            result: Err(ExtractError::Cancelled),
            stats: ExtractionStats::default(),
            extract_time_us: 10,
        });

        assert_eq!(metrics.total_meshes, 1);
        assert_eq!(metrics.failed_extractions, 1);
        assert_eq!(metrics.total_vertices, 3);
        assert_eq!(metrics.total_triangles, 1);
        assert_eq!(metrics.stats.edge_intersections, 3);
        assert_eq!(metrics.mesh_memory_bytes, 3 * 24 + 3 * 4);
        assert_eq!(metrics.extract_timings.len(), 2);
    }
}
