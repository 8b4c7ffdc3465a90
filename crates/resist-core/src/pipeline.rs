//! The pipeline driver.
//!
//! Builds the three reference maps up front, then streams both relation
//! tables through the joiner: the general drug-disease-molecule table first,
//! the HIV table second. Output order is file-then-row order.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use resist_ingest::{IngestError, SourceFile, TsvRows, load_reference_maps};
use resist_model::{Association, ReferenceMaps};

use crate::join::{JoinError, join_row};

/// The two relation tables, in processing order.
pub const RELATION_TABLES: [SourceFile; 2] = [SourceFile::GeneralPairs, SourceFile::HivPairs];

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("{}: data row {row}: {source}", path.display())]
    Join {
        path: PathBuf,
        row: u64,
        source: JoinError,
    },
}

/// Builds the reference maps strictly, then returns the lazy association
/// stream over both relation tables.
///
/// Map construction happens here, fully materialized, before any relation
/// row is read; record production is demand-driven from the returned
/// iterator.
pub fn load_associations(data_folder: &Path) -> Result<AssociationStream, PipelineError> {
    let maps = load_reference_maps(data_folder)?;
    Ok(AssociationStream::new(data_folder, maps))
}

struct OpenTable {
    path: PathBuf,
    rows: TsvRows,
    row_number: u64,
    emitted: u64,
}

/// A lazy, single-pass, non-restartable stream of association records.
///
/// Relation files are opened one at a time, each scanned forward-only and
/// closed before the next opens. A fatal error is yielded once as an `Err`
/// item, after which the stream is exhausted.
pub struct AssociationStream {
    data_folder: PathBuf,
    maps: ReferenceMaps,
    pending: std::array::IntoIter<SourceFile, 2>,
    current: Option<OpenTable>,
    failed: bool,
}

impl AssociationStream {
    fn new(data_folder: &Path, maps: ReferenceMaps) -> Self {
        Self {
            data_folder: data_folder.to_path_buf(),
            maps,
            pending: RELATION_TABLES.into_iter(),
            current: None,
            failed: false,
        }
    }

    fn fail(&mut self, error: PipelineError) -> Option<Result<Association, PipelineError>> {
        self.failed = true;
        self.current = None;
        Some(Err(error))
    }
}

impl Iterator for AssociationStream {
    type Item = Result<Association, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if self.current.is_none() {
                let source = self.pending.next()?;
                let path = source.path_in(&self.data_folder);
                info!(table = source.file_name(), "joining relation table");
                match TsvRows::open(&path) {
                    Ok(rows) => {
                        self.current = Some(OpenTable {
                            path,
                            rows,
                            row_number: 0,
                            emitted: 0,
                        });
                    }
                    Err(error) => return self.fail(error.into()),
                }
            }
            let Some(current) = self.current.as_mut() else {
                continue;
            };
            match current.rows.next() {
                None => {
                    info!(
                        rows = current.row_number,
                        emitted = current.emitted,
                        "finished relation table"
                    );
                    self.current = None;
                }
                Some(Err(error)) => return self.fail(error.into()),
                Some(Ok(row)) => {
                    current.row_number += 1;
                    match join_row(&row, &self.maps) {
                        Ok(Some(association)) => {
                            current.emitted += 1;
                            return Some(Ok(association));
                        }
                        Ok(None) => {
                            debug!(row = current.row_number, "relation row did not qualify");
                        }
                        Err(source) => {
                            let error = PipelineError::Join {
                                path: current.path.clone(),
                                row: current.row_number,
                                source,
                            };
                            return self.fail(error);
                        }
                    }
                }
            }
        }
    }
}
