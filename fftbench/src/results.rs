//! Criterion stores every benchmark under
//! `<criterion-dir>/<group>/<parameter>/new/` with a `benchmark.json`
//! naming it and an `estimates.json` holding its statistics in nanoseconds.
//! This module reads the `c2c_{D}d::{label}` groups back and lays the mean
//! time per transform out as one table per dimensionality and threading
//! mode, extents down and implementations across.

use std::{
    fmt::{self, Display, Write as _},
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use walkdir::WalkDir;

/// Suffix distinguishing multi-threaded implementation labels.
pub const MT_SUFFIX: &str = "-mt";

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("{}: {source}", .path.display())]
    Json { path: PathBuf, source: serde_json::Error },

    #[error("{}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("no c2c results under {}", .0.display())]
    Empty(PathBuf),
}

#[derive(Deserialize)]
struct BenchmarkRecord {
    group_id: String,
    value_str: Option<String>,
}

#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

/// Mean execution time of one scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    pub dims: usize,
    pub implementation: String,
    pub extent: usize,
    pub mean_ns: f64,
}

impl Measurement {
    pub fn is_threaded(&self) -> bool {
        self.implementation.ends_with(MT_SUFFIX)
    }

    pub fn mean_us(&self) -> f64 {
        self.mean_ns / 1e3
    }
}

/// Splits a group name `c2c_{D}d::{label}` into `(D, label)`.
pub fn parse_group_id(group: &str) -> Option<(usize, &str)> {
    let (prefix, label) = group.split_once("::")?;
    let dims: usize = prefix.strip_prefix("c2c_")?.strip_suffix('d')?.parse().ok()?;
    (dims > 0 && !label.is_empty()).then_some((dims, label))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CollectError> {
    let bytes: Vec<u8> = fs::read(path).map_err(|source| CollectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CollectError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads one `new/benchmark.json` and its sibling `estimates.json`.
///
/// Returns `None` for benchmarks that are not `c2c` scenarios.
pub fn read_measurement(benchmark_json: &Path) -> Result<Option<Measurement>, CollectError> {
    let record: BenchmarkRecord = read_json(benchmark_json)?;
    let Some((dims, label)) = parse_group_id(&record.group_id) else {
        return Ok(None);
    };

    let malformed = |reason: String| CollectError::Malformed {
        path: benchmark_json.to_path_buf(),
        reason,
    };
    let value: String = record
        .value_str
        .ok_or_else(|| malformed("missing `value_str`".to_string()))?;
    let extent: usize = value
        .parse()
        .map_err(|_| malformed(format!("`{value}` is not an extent")))?;

    let estimates: Estimates = read_json(&benchmark_json.with_file_name("estimates.json"))?;

    Ok(Some(Measurement {
        dims,
        implementation: label.to_string(),
        extent,
        mean_ns: estimates.mean.point_estimate,
    }))
}

/// Collects every `c2c` measurement below `root`, in path order.
///
/// Only the latest run (`new/`) is read; saved baselines are ignored.
pub fn load(root: &Path) -> Result<Vec<Measurement>, CollectError> {
    let mut measurements: Vec<Measurement> = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let path: &Path = entry.path();
        let is_latest: bool = path
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|dir| dir == "new");
        if entry.file_type().is_file() && entry.file_name() == "benchmark.json" && is_latest {
            if let Some(measurement) = read_measurement(path)? {
                measurements.push(measurement);
            }
        }
    }

    if measurements.is_empty() {
        return Err(CollectError::Empty(root.to_path_buf()));
    }

    log::debug!("read {} measurements from {}", measurements.len(), root.display());
    Ok(measurements)
}

/// Mean time per transform in microseconds for one dimensionality and
/// threading mode.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub dims: usize,
    pub threaded: bool,
    pub implementations: Vec<String>,
    /// Ascending extents, each with one cell per implementation.
    pub rows: Vec<(usize, Vec<Option<f64>>)>,
}

impl Table {
    fn build(dims: usize, threaded: bool, measurements: Vec<&Measurement>) -> Self {
        let implementations: Vec<String> = measurements
            .iter()
            .map(|m| m.implementation.clone())
            .sorted()
            .dedup()
            .collect();

        let rows: Vec<(usize, Vec<Option<f64>>)> = measurements
            .iter()
            .map(|m| m.extent)
            .sorted()
            .dedup()
            .map(|extent| {
                let cells: Vec<Option<f64>> = implementations
                    .iter()
                    .map(|name| {
                        measurements
                            .iter()
                            .find(|m| m.extent == extent && &m.implementation == name)
                            .map(|m| m.mean_us())
                    })
                    .collect();
                (extent, cells)
            })
            .collect();

        Self {
            dims,
            threaded,
            implementations,
            rows,
        }
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let threading: &str = if self.threaded { "multi-threaded" } else { "single-threaded" };
        writeln!(f, "{}-D C2C, {threading} (mean time per transform, µs)", self.dims)?;

        let widths: Vec<usize> = self.implementations.iter().map(|name| name.len().max(10)).collect();

        write!(f, "{:>10}", "extent")?;
        for (name, &w) in self.implementations.iter().zip(&widths) {
            write!(f, "  {name:>w$}")?;
        }
        writeln!(f)?;

        for (extent, cells) in &self.rows {
            write!(f, "{extent:>10}")?;
            for (cell, &w) in cells.iter().zip(&widths) {
                match cell {
                    Some(us) => write!(f, "  {us:>w$.3}")?,
                    None => write!(f, "  {:>w$}", "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Groups measurements into tables ordered by dimensionality, single-threaded
/// before multi-threaded.
pub fn tabulate(measurements: &[Measurement]) -> Vec<Table> {
    measurements
        .iter()
        .map(|m| (m.dims, m.is_threaded()))
        .sorted()
        .dedup()
        .map(|(dims, threaded)| {
            let members: Vec<&Measurement> = measurements
                .iter()
                .filter(|m| m.dims == dims && m.is_threaded() == threaded)
                .collect();
            Table::build(dims, threaded, members)
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Aligned tables, one per dimensionality and threading mode.
    #[default]
    Table,
    /// One `dims,threading,implementation,extent,mean_us` line per scenario.
    Csv,
}

/// Renders the measurements of `dims` (all when `None`) in `format`.
pub fn render(measurements: &[Measurement], dims: Option<usize>, format: Format) -> String {
    let selected: Vec<Measurement> = measurements
        .iter()
        .filter(|m| dims.is_none_or(|d| m.dims == d))
        .cloned()
        .collect();

    match format {
        Format::Table => tabulate(&selected).iter().map(Table::to_string).join("\n"),
        Format::Csv => {
            let mut out: String = String::from("dims,threading,implementation,extent,mean_us\n");
            for m in selected
                .iter()
                .sorted_by_key(|m| (m.dims, m.is_threaded(), m.implementation.clone(), m.extent))
            {
                let threading: &str = if m.is_threaded() { "mt" } else { "st" };
                // Writing to a String cannot fail.
                let _ = writeln!(
                    out,
                    "{},{threading},{},{},{:.3}",
                    m.dims,
                    m.implementation,
                    m.extent,
                    m.mean_us()
                );
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn measurement(dims: usize, implementation: &str, extent: usize, mean_ns: f64) -> Measurement {
        Measurement {
            dims,
            implementation: implementation.to_string(),
            extent,
            mean_ns,
        }
    }

    fn write_result(root: &Path, run: &str, group: &str, extent: usize, mean_ns: f64) {
        let dir: PathBuf = root.join(group.replace("::", "__")).join(extent.to_string()).join(run);
        fs::create_dir_all(&dir).unwrap();
        let benchmark: serde_json::Value = serde_json::json!({
            "group_id": group,
            "function_id": null,
            "value_str": extent.to_string(),
            "throughput": { "Elements": extent },
            "full_id": format!("{group}/{extent}"),
        });
        let estimates: serde_json::Value = serde_json::json!({
            "mean": {
                "confidence_interval": { "confidence_level": 0.95, "lower_bound": mean_ns, "upper_bound": mean_ns },
                "point_estimate": mean_ns,
                "standard_error": 0.0
            },
            "median": { "point_estimate": mean_ns }
        });
        fs::write(dir.join("benchmark.json"), benchmark.to_string()).unwrap();
        fs::write(dir.join("estimates.json"), estimates.to_string()).unwrap();
    }

    #[test]
    fn group_ids() {
        assert_eq!(parse_group_id("c2c_1d::fftw3"), Some((1, "fftw3")));
        assert_eq!(parse_group_id("c2c_3d::mkl-mt"), Some((3, "mkl-mt")));
        assert_eq!(parse_group_id("c2c_0d::mkl"), None);
        assert_eq!(parse_group_id("c2c_2d::"), None);
        assert_eq!(parse_group_id("fft_ref"), None);
        assert_eq!(parse_group_id("c2c_xd::mkl"), None);
    }

    #[test]
    fn tables_split_on_dims_and_threading() {
        let measurements: Vec<Measurement> = vec![
            measurement(1, "fftw3", 512, 2000.0),
            measurement(1, "mkl", 256, 900.0),
            measurement(1, "fftw3", 256, 1000.0),
            measurement(1, "fftw3-mt", 256, 500.0),
            measurement(2, "mkl", 16, 3000.0),
        ];

        let tables: Vec<Table> = tabulate(&measurements);
        assert_eq!(
            tables.iter().map(|t| (t.dims, t.threaded)).collect::<Vec<_>>(),
            vec![(1, false), (1, true), (2, false)]
        );

        let st: &Table = &tables[0];
        assert_eq!(st.implementations, vec!["fftw3".to_string(), "mkl".to_string()]);
        assert_eq!(st.rows, vec![(256, vec![Some(1.0), Some(0.9)]), (512, vec![Some(2.0), None])]);

        let rendered: String = st.to_string();
        assert!(rendered.starts_with("1-D C2C, single-threaded"));
        assert!(rendered.contains("1.000"));
        assert!(rendered.lines().nth(3).is_some_and(|l| l.trim_end().ends_with('-')));
    }

    #[test]
    fn csv_is_filtered_and_sorted() {
        let measurements: Vec<Measurement> = vec![
            measurement(2, "mkl", 32, 4000.0),
            measurement(1, "mkl", 256, 900.0),
            measurement(2, "mkl", 16, 3000.0),
        ];
        let csv: String = render(&measurements, Some(2), Format::Csv);
        assert_eq!(
            csv,
            "dims,threading,implementation,extent,mean_us\n2,st,mkl,16,3.000\n2,st,mkl,32,4.000\n"
        );
    }

    #[test]
    fn load_reads_latest_c2c_runs_only() {
        let dir: TempDir = TempDir::new().unwrap();
        write_result(dir.path(), "new", "c2c_1d::fftw3", 256, 1500.0);
        write_result(dir.path(), "new", "c2c_2d::fftw3-mt", 16, 2500.0);
        write_result(dir.path(), "base", "c2c_1d::fftw3", 512, 1.0);
        write_result(dir.path(), "new", "unrelated", 1, 1.0);

        let measurements: Vec<Measurement> = load(dir.path()).unwrap();
        assert_eq!(
            measurements,
            vec![
                measurement(1, "fftw3", 256, 1500.0),
                measurement(2, "fftw3-mt", 16, 2500.0)
            ]
        );
        assert!(measurements[1].is_threaded());
    }

    #[test]
    fn load_reports_missing_estimates() {
        let dir: TempDir = TempDir::new().unwrap();
        write_result(dir.path(), "new", "c2c_1d::mkl", 256, 1500.0);
        fs::remove_file(dir.path().join("c2c_1d__mkl/256/new/estimates.json")).unwrap();

        assert!(matches!(load(dir.path()), Err(CollectError::Io { .. })));
    }

    #[test]
    fn load_rejects_empty_directory() {
        let dir: TempDir = TempDir::new().unwrap();
        assert!(matches!(load(dir.path()), Err(CollectError::Empty(_))));
    }
}
