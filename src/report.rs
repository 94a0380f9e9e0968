//! Strategy comparison runs and the org-mode report written from them.

use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDateTime;
use hrsw::Stopwatch;
use human_duration::human_duration;
use thousands::Separable;

use crate::problems::grid::Grid;
use crate::strategy::GridResult;
use crate::strategy::Strategy;

/// One strategy run on one maze.
#[derive(Clone, Debug)]
pub struct Run {
    pub strategy: Strategy,
    pub result: GridResult,
    pub elapsed: Duration,
}

impl Run {
    pub fn found(&self) -> bool {
        self.result.found()
    }

    pub fn cost(&self) -> Option<f64> {
        self.result.path.as_ref().map(|p| p.cost().value())
    }
}

/// Every run on a single maze.
#[derive(Clone, Debug)]
pub struct MazeReport {
    /// 1-based, in the order mazes were run.
    pub number: usize,
    pub source: PathBuf,
    pub grid: Grid,
    pub runs: Vec<Run>,
}

/// Runs each strategy on `grid`, timing them one by one.
pub fn run_maze(number: usize, source: &Path, grid: Grid, strategies: &[Strategy]) -> MazeReport {
    let runs = strategies
        .iter()
        .map(|strategy| {
            let mut stopwatch = Stopwatch::new_started();
            let result = strategy.run(&grid);
            stopwatch.stop();
            Run {
                strategy: *strategy,
                result,
                elapsed: stopwatch.elapsed(),
            }
        })
        .collect();

    MazeReport {
        number,
        source: source.to_path_buf(),
        grid,
        runs,
    }
}

/// Totals for a strategy across every maze it ran on.
#[derive(Clone, Debug, PartialEq)]
pub struct StrategySummary {
    pub strategy: Strategy,
    pub mazes: usize,
    pub solved: usize,
    pub total_time: Duration,
    pub total_nodes: usize,
    pub total_memory: usize,
    /// Summed over solved mazes only.
    pub total_cost: f64,
}

impl StrategySummary {
    fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            mazes: 0,
            solved: 0,
            total_time: Duration::ZERO,
            total_nodes: 0,
            total_memory: 0,
            total_cost: 0.0,
        }
    }

    fn add(&mut self, run: &Run) {
        debug_assert_eq!(run.strategy, self.strategy);
        self.mazes += 1;
        self.total_time += run.elapsed;
        self.total_nodes += run.result.metrics.nodes_expanded;
        self.total_memory += run.result.metrics.max_memory_usage;
        if let Some(c) = run.cost() {
            self.solved += 1;
            self.total_cost += c;
        }
    }

    /// Percentage of mazes solved.
    pub fn success_rate(&self) -> f64 {
        if self.mazes == 0 {
            return 0.0;
        }
        100.0 * self.solved as f64 / self.mazes as f64
    }

    pub fn mean_time(&self) -> Duration {
        match u32::try_from(self.mazes) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total_time / n,
            Err(_) => Duration::from_secs_f64(self.total_time.as_secs_f64() / self.mazes as f64),
        }
    }

    pub fn mean_nodes(&self) -> f64 {
        mean(self.total_nodes as f64, self.mazes)
    }

    pub fn mean_memory(&self) -> f64 {
        mean(self.total_memory as f64, self.mazes)
    }

    /// Mean path cost over solved mazes, `None` if it solved none.
    pub fn mean_cost(&self) -> Option<f64> {
        (self.solved > 0).then(|| self.total_cost / self.solved as f64)
    }
}

fn mean(total: f64, n: usize) -> f64 {
    if n == 0 { 0.0 } else { total / n as f64 }
}

/// Aggregates runs per strategy, in the order given.
pub fn summarize(reports: &[MazeReport], strategies: &[Strategy]) -> Vec<StrategySummary> {
    let mut summaries: Vec<StrategySummary> =
        strategies.iter().map(|s| StrategySummary::new(*s)).collect();

    for run in reports.iter().flat_map(|r| r.runs.iter()) {
        if let Some(summary) = summaries.iter_mut().find(|s| s.strategy == run.strategy) {
            summary.add(run);
        }
    }
    summaries
}

fn file_name(p: &Path) -> String {
    p.file_name()
        .map_or_else(|| p.display().to_string(), |n| n.to_string_lossy().into_owned())
}

fn separated(x: f64) -> String {
    format!("{x:.1}").separate_with_commas()
}

/// Writes the comparison as an org-mode document.
pub fn write_report<W: Write>(
    out: &mut W,
    reports: &[MazeReport],
    strategies: &[Strategy],
    date: NaiveDateTime,
) -> std::io::Result<()> {
    writeln!(out, ":PROPERTIES:")?;
    writeln!(out, ":VERSION: {:?}", crate::build::PKG_VERSION)?;
    if crate::build::GIT_CLEAN {
        writeln!(out, ":GIT_STATUS: CLEAN")?;
    } else {
        writeln!(out, ":GIT_STATUS: DIRTY")?;
    }
    writeln!(out, ":END:")?;
    writeln!(out, "#+title: Maze search comparison")?;
    writeln!(out, "#+date: {}", date.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out)?;

    writeln!(out, "* Summary")?;
    writeln!(out, "Mazes tested: {}", reports.len().separate_with_commas())?;
    writeln!(out)?;
    writeln!(
        out,
        "| {:20} | {:>8} | {:>12} | {:>12} | {:>12} | {:>10} |",
        "Strategy", "Solved", "Mean time", "Mean nodes", "Mean memory", "Mean cost"
    )?;
    writeln!(out, "|-")?;
    for s in summarize(reports, strategies) {
        let cost = s.mean_cost().map_or_else(|| "-".to_string(), separated);
        writeln!(
            out,
            "| {:20} | {:>7.1}% | {:>12} | {:>12} | {:>12} | {:>10} |",
            s.strategy.to_string(),
            s.success_rate(),
            human_duration(&s.mean_time()),
            separated(s.mean_nodes()),
            separated(s.mean_memory()),
            cost,
        )?;
    }

    for report in reports {
        let (rows, cols) = report.grid.dimensions();
        writeln!(out)?;
        writeln!(out, "* Maze {}", report.number)?;
        writeln!(out, "Source: ~{}~", file_name(&report.source))?;
        writeln!(out, "Size: {rows}x{cols}")?;
        writeln!(out)?;
        writeln!(
            out,
            "| {:20} | {:>5} | {:>8} | {:>12} | {:>10} | {:>10} |",
            "Strategy", "Found", "Cost", "Time", "Nodes", "Memory"
        )?;
        writeln!(out, "|-")?;
        for run in &report.runs {
            let (found, cost) = match &run.result.path {
                Some(p) => ("yes", p.cost().to_string()),
                None => ("no", "-".to_string()),
            };
            writeln!(
                out,
                "| {:20} | {:>5} | {:>8} | {:>12} | {:>10} | {:>10} |",
                run.strategy.to_string(),
                found,
                cost,
                human_duration(&run.elapsed),
                run.result.metrics.nodes_expanded.separate_with_commas(),
                run.result.metrics.max_memory_usage.separate_with_commas(),
            )?;
        }
    }

    out.flush()
}

/// Writes the report to `path`, creating missing parent directories.
pub fn save(path: &Path, reports: &[MazeReport], strategies: &[Strategy]) -> std::io::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let mut out = BufWriter::new(std::fs::File::create(path)?);
    write_report(
        &mut out,
        reports,
        strategies,
        chrono::Local::now().naive_local(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use indoc::indoc;
    use tempfile::TempDir;

    use super::*;

    fn reports() -> Vec<MazeReport> {
        let open = Grid::try_from(indoc! {"
            S...
            ....
            ...G
        "})
        .unwrap();
        let closed = Grid::try_from(indoc! {"
            S.#.
            ..#G
        "})
        .unwrap();
        let source = Path::new("data/mazes/tiny.txt");
        vec![
            run_maze(1, source, open, &Strategy::CORE),
            run_maze(2, source, closed, &Strategy::CORE),
        ]
    }

    #[test]
    fn runs_every_strategy_on_every_maze() {
        let reports = reports();
        for report in &reports {
            let strategies: Vec<Strategy> = report.runs.iter().map(|r| r.strategy).collect();
            assert_eq!(strategies, Strategy::CORE.to_vec());
        }
        assert!(reports[0].runs.iter().all(Run::found));
        assert!(!reports[1].runs.iter().any(Run::found));
        assert_eq!(reports[0].runs[1].cost(), Some(5.0));
        assert_eq!(reports[1].runs[1].cost(), None);
    }

    #[test]
    fn summaries_average_over_mazes() {
        let reports = reports();
        let summaries = summarize(&reports, &Strategy::CORE);
        assert_eq!(summaries.len(), 4);

        let bfs = &summaries[1];
        assert_eq!(bfs.strategy, Strategy::BreadthFirst);
        assert_eq!(bfs.mazes, 2);
        assert_eq!(bfs.solved, 1);
        assert_eq!(bfs.success_rate(), 50.0);
        assert_eq!(bfs.mean_cost(), Some(5.0));
        let nodes: usize = reports
            .iter()
            .map(|r| r.runs[1].result.metrics.nodes_expanded)
            .sum();
        assert_eq!(bfs.mean_nodes(), nodes as f64 / 2.0);
    }

    #[test]
    fn summaries_skip_unselected_strategies() {
        let summaries = summarize(&reports(), &[Strategy::UniformCost]);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].mazes, 0);
        assert_eq!(summaries[0].success_rate(), 0.0);
        assert_eq!(summaries[0].mean_cost(), None);
        assert_eq!(summaries[0].mean_time(), Duration::ZERO);
    }

    #[test]
    fn org_report_layout() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(15, 9, 26)
            .unwrap();
        let mut out = vec![];
        write_report(&mut out, &reports(), &Strategy::CORE, date).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("#+date: 2025-03-14 15:09:26"));
        assert!(text.contains("Mazes tested: 2"));
        assert!(text.contains("* Summary"));
        assert!(text.contains("* Maze 1\n"));
        assert!(text.contains("* Maze 2\n"));
        assert!(text.contains("Source: ~tiny.txt~"));
        assert!(text.contains("Size: 2x4"));
        assert!(text.contains(" 50.0% |"));
        for strategy in Strategy::CORE {
            assert!(text.contains(&strategy.to_string()), "{strategy}");
        }
    }

    #[test]
    fn save_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("report.org");
        save(&path, &reports(), &Strategy::CORE).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(":PROPERTIES:"));

        let root = dir.path().to_path_buf();
        dir.close().unwrap();
        assert!(!root.exists());
    }
}
