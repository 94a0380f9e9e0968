use std::path::PathBuf;

use anstream::println;
use clap::Parser;
use owo_colors::OwoColorize;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use maze_search::problems::grid::Grid;
use maze_search::problems::maze_file;
use maze_search::report;
use maze_search::report::MazeReport;
use maze_search::strategy::Strategy;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const DEFAULT_MAZES: &str = "data/mazes/*.txt";

/// Compares search strategies on grid mazes
#[derive(Parser, Debug)]
#[clap(long_version = maze_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Maze files (text or PNG) or glob patterns. Defaults to `data/mazes/*.txt`.
    #[arg()]
    pub mazes: Vec<String>,

    #[arg(short, long, env = "MAZE_REPORT", default_value = "logs/report.org")]
    pub output: PathBuf,

    /// Strategies to compare.
    #[arg(
        short,
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = Strategy::DEFAULT
    )]
    pub strategy: Vec<Strategy>,

    /// Number of random grids to add to the comparison.
    #[arg(long, default_value_t = 0usize)]
    pub generate: usize,
    #[arg(long, default_value_t = 0u64)]
    pub seed: u64,
    #[arg(long, default_value_t = 20usize)]
    pub rows: usize,
    #[arg(long, default_value_t = 40usize)]
    pub cols: usize,
    #[arg(long, default_value_t = 0.3f64)]
    pub wall_density: f64,

    /// Print every maze with the path each strategy found.
    #[arg(long)]
    pub show_paths: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

/// Expands glob patterns, keeping plain paths as they are.
fn maze_paths(patterns: &[String]) -> Vec<PathBuf> {
    let mut paths = vec![];
    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(pattern));
            continue;
        }
        match glob::glob(pattern) {
            Ok(matches) => {
                let before = paths.len();
                paths.extend(matches.filter_map(|m| match m {
                    Ok(p) => Some(p),
                    Err(e) => {
                        log::warn!("Skipping unreadable path: {e}");
                        None
                    }
                }));
                if paths.len() == before {
                    log::warn!("No mazes match {pattern:?}");
                }
            }
            Err(e) => log::error!("Invalid pattern {pattern:?}: {e}"),
        }
    }
    paths
}

fn print_maze(report: &MazeReport) {
    println!(
        "{} {} ({})",
        "Maze".bold(),
        report.number.bold(),
        report.source.display().dimmed()
    );
    for run in &report.runs {
        match &run.result.path {
            Some(path) => {
                println!(
                    "{:20} cost {} in {} steps, {}",
                    run.strategy.to_string().green(),
                    path.cost(),
                    path.len(),
                    run.result.metrics
                );
                println!("{}", report.grid.render_path(path));
            }
            None => println!(
                "{:20} no path, {}",
                run.strategy.to_string().red(),
                run.result.metrics
            ),
        }
    }
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    let args = Args::parse();
    args.color.write_global();

    let patterns = if args.mazes.is_empty() && args.generate == 0 {
        vec![DEFAULT_MAZES.to_string()]
    } else {
        args.mazes.clone()
    };

    let mut reports: Vec<MazeReport> = vec![];
    for path in maze_paths(&patterns) {
        let mazes = match maze_file::load(&path) {
            Ok(mazes) => mazes,
            Err(e) => {
                log::error!("{e}");
                continue;
            }
        };
        log::info!("{}: {} mazes", path.display(), mazes.len());
        for grid in mazes {
            let number = reports.len() + 1;
            reports.push(report::run_maze(number, &path, grid, &args.strategy));
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    for i in 0..args.generate {
        let grid = Grid::random(&mut rng, args.rows, args.cols, args.wall_density)
            .map_err(std::io::Error::other)?;
        let number = reports.len() + 1;
        let source = PathBuf::from(format!("random-{}-{i}", args.seed));
        reports.push(report::run_maze(number, &source, grid, &args.strategy));
    }

    if reports.is_empty() {
        return Err(std::io::Error::other("No mazes to compare"));
    }

    if args.show_paths {
        for r in &reports {
            print_maze(r);
        }
    }

    for s in report::summarize(&reports, &args.strategy) {
        println!(
            "{:20} solved {:>5.1}%, mean nodes {:>10.1}, mean memory {:>10.1}",
            s.strategy.to_string().cyan(),
            s.success_rate(),
            s.mean_nodes(),
            s.mean_memory()
        );
    }

    report::save(&args.output, &reports, &args.strategy)?;
    println!(
        "Compared {} mazes, report written to {:?}",
        reports.len(),
        args.output.yellow()
    );
    Ok(())
}
