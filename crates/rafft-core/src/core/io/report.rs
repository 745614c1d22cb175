use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("CSV error: {0}")]
    Stream(#[from] csv::Error),
}

/// One row of a benchmark report comparing a prediction with a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub name: String,
    pub length: usize,
    pub reference_energy: f64,
    pub predicted_energy: f64,
    /// Hamming distance between the two dot-bracket strings.
    pub distance: usize,
    pub base_pair_distance: usize,
    pub sequence: String,
    pub predicted: String,
    pub reference: String,
}

/// Writes the records with a header row to any writer.
pub fn write_records<W: Write>(writer: W, records: &[BenchmarkRecord]) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_report(path: &Path, records: &[BenchmarkRecord]) -> Result<(), ReportError> {
    let path_str = path.to_string_lossy().to_string();
    let mut writer = csv::Writer::from_path(path).map_err(|e| ReportError::Csv {
        path: path_str.clone(),
        source: e,
    })?;
    for record in records {
        writer.serialize(record).map_err(|e| ReportError::Csv {
            path: path_str.clone(),
            source: e,
        })?;
    }
    writer.flush().map_err(|e| ReportError::Csv {
        path: path_str,
        source: e.into(),
    })
}

pub fn read_report(path: &Path) -> Result<Vec<BenchmarkRecord>, ReportError> {
    let path_str = path.to_string_lossy().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|e| ReportError::Csv {
        path: path_str.clone(),
        source: e,
    })?;
    reader
        .deserialize::<BenchmarkRecord>()
        .map(|result| {
            result.map_err(|e| ReportError::Csv {
                path: path_str.clone(),
                source: e,
            })
        })
        .collect()
}
