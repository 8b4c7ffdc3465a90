use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("read record in {}: {source}", path.display())]
    Record { path: PathBuf, source: csv::Error },
    #[error("{}: data row {row} is missing required field `{field}`", path.display())]
    MissingField {
        path: PathBuf,
        row: u64,
        field: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
