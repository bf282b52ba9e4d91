//! CSV ingestion and persistence around the allocation core.

pub mod record_reader;
pub mod report_writer;

use crate::application::report::Report;
use crate::domain::covenant::Covenant;
use crate::domain::facility::Facility;
use crate::domain::loan::Loan;
use crate::error::{AllocationError, Result};
use record_reader::RecordReader;
use report_writer::ReportWriter;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const FACILITIES_FILE: &str = "facilities.csv";
pub const COVENANTS_FILE: &str = "covenants.csv";
pub const LOANS_FILE: &str = "loans.csv";
pub const YIELDS_FILE: &str = "yields.csv";
pub const ASSIGNMENTS_FILE: &str = "assignments.csv";

/// Locations of the three input tables.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPaths {
    pub facilities: PathBuf,
    pub covenants: PathBuf,
    pub loans: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            facilities: dir.join(FACILITIES_FILE),
            covenants: dir.join(COVENANTS_FILE),
            loans: dir.join(LOANS_FILE),
        }
    }
}

/// Locations of the two output tables.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub yields: PathBuf,
    pub assignments: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            yields: dir.join(YIELDS_FILE),
            assignments: dir.join(ASSIGNMENTS_FILE),
        }
    }
}

/// The three typed input collections, in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub facilities: Vec<Facility>,
    pub covenants: Vec<Covenant>,
    pub loans: Vec<Loan>,
    /// Rows skipped because they could not be parsed or failed validation.
    pub rejected: usize,
}

/// Reads all three tables on the blocking pool.
///
/// Bad rows are logged and skipped. A file that cannot be opened fails the
/// whole load.
pub async fn load_dataset(paths: &DataPaths) -> Result<Dataset> {
    let (facilities, covenants, loans) = tokio::try_join!(
        read_table(paths.facilities.clone(), RecordReader::facilities),
        read_table(paths.covenants.clone(), RecordReader::covenants),
        read_table(paths.loans.clone(), RecordReader::loans),
    )?;

    let dataset = Dataset {
        rejected: facilities.1 + covenants.1 + loans.1,
        facilities: facilities.0,
        covenants: covenants.0,
        loans: loans.0,
    };
    info!(
        facilities = dataset.facilities.len(),
        covenants = dataset.covenants.len(),
        loans = dataset.loans.len(),
        rejected = dataset.rejected,
        "dataset loaded"
    );
    Ok(dataset)
}

async fn read_table<T, I, F>(path: PathBuf, records: F) -> Result<(Vec<T>, usize)>
where
    T: Send + 'static,
    I: Iterator<Item = Result<T>>,
    F: FnOnce(RecordReader<File>) -> I + Send + 'static,
{
    tokio::task::spawn_blocking(move || -> Result<(Vec<T>, usize)> {
        let file = File::open(&path).map_err(|source| AllocationError::File {
            path: path.clone(),
            source,
        })?;
        Ok(collect_valid(&path, records(RecordReader::new(file))))
    })
    .await?
}

fn collect_valid<T>(path: &Path, records: impl Iterator<Item = Result<T>>) -> (Vec<T>, usize) {
    let mut valid = Vec::new();
    let mut rejected = 0;
    for (index, result) in records.enumerate() {
        match result {
            Ok(record) => valid.push(record),
            Err(e) => {
                warn!(file = %path.display(), record = index + 1, error = %e, "skipping record");
                rejected += 1;
            }
        }
    }
    (valid, rejected)
}

/// Writes both report tables, replacing any existing files.
pub fn write_report(report: &Report, outputs: &OutputPaths) -> Result<()> {
    ReportWriter::new(create(&outputs.yields)?).write_yields(report)?;
    ReportWriter::new(create(&outputs.assignments)?).write_assignments(report)?;
    info!(
        yields = %outputs.yields.display(),
        assignments = %outputs.assignments.display(),
        "report written"
    );
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| AllocationError::File {
        path: path.to_path_buf(),
        source,
    })
}
