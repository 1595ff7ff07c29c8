//! Spreadsheet export (CSV).

pub mod error;


pub use error::ExportError;

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::constants::SENTINEL;
use crate::record::CandidateRecord;

/// Column headers, in output order.
pub const COLUMNS: [&str; 10] = [
    "Candidate name",
    "Experience",
    "Mobile Number",
    "Email",
    "Skills",
    "Education",
    "CV Summary",
    "CV Name",
    "Action",
    "Match Score",
];

/// Skills joined with `"; "`, or the sentinel when there are none.
pub fn skills_cell(record: &CandidateRecord) -> String {
    if record.skills().is_empty() {
        SENTINEL.to_string()
    } else {
        record
            .skills()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn row(record: &CandidateRecord) -> [String; 10] {
    [
        record.name().to_string(),
        record.experience().to_string(),
        record.phone().to_string(),
        record.email().to_string(),
        skills_cell(record),
        record.education().to_string(),
        record.summary().to_string(),
        record.source_file().to_string(),
        record.decision().to_string(),
        format!("{:.2}", record.match_score()),
    ]
}

/// Writes a header row plus one row per record, in the order given.
pub fn write_records<W: Write>(writer: W, records: &[CandidateRecord]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.write_record(row(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `records` to `path`, creating parent directories and replacing any existing file.
pub fn export_csv(path: &Path, records: &[CandidateRecord]) -> Result<(), ExportError> {
    if path.is_dir() {
        return Err(ExportError::IsDirectory {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::create(path).map_err(|e| write_err(csv::Error::from(e)))?;
    write_records(file, records).map_err(write_err)?;

    info!(path = %path.display(), rows = records.len(), "Results exported");
    Ok(())
}
