//! Extraction throughput on analytic fields.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use isosurface::{
  ExtractConfig, Extractor, NormalMode, SdfSampler, SphereSampler, TorusSampler, VertexMode,
  VoxelGrid,
};

/// Sphere SDF centered in an `n³` lattice.
fn sphere_grid(n: usize, radius: f32) -> VoxelGrid {
  let c = (n - 1) as f32 / 2.0;
  SphereSampler::new(radius)
    .with_center([c; 3])
    .sample_grid([n; 3], [0.0; 3], [1.0; 3])
    .expect("valid lattice")
}

/// Benchmark serial vs parallel walks at increasing resolution.
fn bench_serial_vs_parallel(c: &mut Criterion) {
  let mut group = c.benchmark_group("serial_vs_parallel");

  for n in [32usize, 64, 128] {
    let grid = sphere_grid(n, n as f32 * 0.4);

    for parallel in [false, true] {
      let extractor = Extractor::new(ExtractConfig::new().with_parallel(parallel));
      let label = if parallel { "parallel" } else { "serial" };
      group.bench_with_input(BenchmarkId::new(label, format!("{}³", n)), &grid, |b, grid| {
        b.iter(|| black_box(extractor.extract(black_box(grid))))
      });
    }
  }

  group.finish();
}

/// Cost of vertex sharing and normal modes on a 64³ sphere.
fn bench_modes(c: &mut Criterion) {
  let mut group = c.benchmark_group("modes");
  let grid = sphere_grid(64, 25.0);

  let configs = [
    ("shared_gradient", ExtractConfig::new()),
    (
      "per_cell",
      ExtractConfig::new().with_vertex_mode(VertexMode::PerCell),
    ),
    (
      "geometry_normals",
      ExtractConfig::new().with_normal_mode(NormalMode::Geometry),
    ),
    (
      "no_normals",
      ExtractConfig::new().with_normal_mode(NormalMode::None),
    ),
  ];

  for (name, config) in configs {
    let extractor = Extractor::new(config.with_parallel(false));
    group.bench_function(name, |b| {
      b.iter(|| black_box(extractor.extract(black_box(&grid))))
    });
  }

  group.finish();
}

/// Torus: more surface per cell than a sphere of similar extent.
fn bench_torus(c: &mut Criterion) {
  let grid = TorusSampler::new(20.0, 6.0)
    .with_center([32.0; 3])
    .sample_grid([65; 3], [0.0; 3], [1.0; 3])
    .expect("valid lattice");
  let extractor = Extractor::default();

  c.bench_function("isosurface::extract (65³ torus)", |b| {
    b.iter(|| black_box(extractor.extract(black_box(&grid))))
  });
}

criterion_group!(benches, bench_serial_vs_parallel, bench_modes, bench_torus);
criterion_main!(benches);
