use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use glob::glob;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use maze_search::problems::grid::Grid;
use maze_search::problems::maze_file;
use maze_search::strategy::Strategy;

const RANDOM_INSTANCES: u64 = 3;
const WALL_DENSITY: f64 = 0.25;

fn bench_grid(c: &mut Criterion, group_name: &str, instances: Vec<(String, Grid)>) {
    let mut group = c.benchmark_group(group_name);
    for (instance_name, grid) in &instances {
        for strategy in Strategy::DEFAULT {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), instance_name),
                grid,
                |b, g| b.iter(|| strategy.run(g).metrics),
            );
        }
    }
    group.finish();
}

fn compare_random(c: &mut Criterion) {
    let mut instances = vec![];
    for (rows, cols) in [(32, 32), (64, 128)] {
        for i in 0..RANDOM_INSTANCES {
            let mut rng = ChaCha8Rng::seed_from_u64(i);
            match Grid::random(&mut rng, rows, cols, WALL_DENSITY) {
                Ok(grid) => instances.push((format!("random[{rows}x{cols}]:{i}"), grid)),
                Err(e) => log::warn!("Skipping random[{rows}x{cols}]:{i}: {e}"),
            }
        }
    }
    bench_grid(c, "Random grids", instances);
}

fn compare_fixtures(c: &mut Criterion) {
    let mut instances = vec![];
    for path in glob("data/mazes/*.txt")
        .into_iter()
        .flatten()
        .filter_map(std::result::Result::ok)
    {
        let name = path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        match maze_file::load(&path) {
            Ok(mazes) => {
                for (i, grid) in mazes.into_iter().enumerate() {
                    let (rows, cols) = grid.dimensions();
                    instances.push((format!("{name}[{rows}x{cols}]:{i}"), grid));
                }
            }
            Err(e) => log::warn!("Skipping {name}: {e}"),
        }
    }
    bench_grid(c, "Fixture mazes", instances);
}

criterion_group!(benches, compare_random, compare_fixtures);
criterion_main!(benches);
