//! Tab-delimited reading with tolerant decoding.
//!
//! Source files are tab-delimited, nominally UTF-8, and occasionally carry
//! embedded NUL bytes from upstream export corruption. NUL bytes are
//! stripped before tokenizing and undecodable byte sequences are replaced
//! rather than rejected.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder};

use resist_model::DecodedRow;

use crate::error::{IngestError, Result};

/// A `Read` adapter that drops NUL bytes from the underlying stream.
struct NulStrippingReader<R: Read> {
    inner: R,
}

impl<R: Read> NulStrippingReader<R> {
    fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read> Read for NulStrippingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // A read must not report 0 bytes unless the source is exhausted, so
        // keep pulling if a chunk was entirely NULs.
        loop {
            let n = self.inner.read(buf)?;
            if n == 0 {
                return Ok(0);
            }
            let mut kept = 0;
            for idx in 0..n {
                if buf[idx] != 0 {
                    buf[kept] = buf[idx];
                    kept += 1;
                }
            }
            if kept > 0 {
                return Ok(kept);
            }
        }
    }
}

/// Pairs header names with field values by position, up to the shorter of
/// the two sequences. Extra values are dropped; missing trailing values
/// leave their headers absent from the row. Length mismatches are tolerated
/// by design, never an error.
pub fn decode_row<S: AsRef<str>>(headers: &[String], values: &[S]) -> DecodedRow {
    headers
        .iter()
        .zip(values.iter())
        .map(|(header, value)| (header.clone(), value.as_ref().to_string()))
        .collect()
}

/// A forward-only pass over one tab-delimited file.
///
/// The first record is consumed as the header row at open time; iteration
/// then yields one [`DecodedRow`] per data row.
pub struct TsvRows {
    path: PathBuf,
    headers: Vec<String>,
    records: csv::ByteRecordsIntoIter<NulStrippingReader<File>>,
}

impl std::fmt::Debug for TsvRows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsvRows")
            .field("path", &self.path)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl TsvRows {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| IngestError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(NulStrippingReader::new(file));

        let mut header_record = ByteRecord::new();
        let has_header = reader
            .read_byte_record(&mut header_record)
            .map_err(|source| IngestError::Record {
                path: path.to_path_buf(),
                source,
            })?;
        let headers = if has_header {
            header_record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            records: reader.into_byte_records(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for TsvRows {
    type Item = Result<DecodedRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(source) => {
                return Some(Err(IngestError::Record {
                    path: self.path.clone(),
                    source,
                }));
            }
        };
        let values: Vec<String> = record
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();
        Some(Ok(decode_row(&self.headers, &values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn decode_row_leaves_trailing_headers_absent() {
        let row = decode_row(&headers(&["A", "B", "C"]), &["1", "2"]);
        assert_eq!(row.get("A"), Some("1"));
        assert_eq!(row.get("B"), Some("2"));
        assert!(!row.contains("C"));
    }

    #[test]
    fn decode_row_drops_extra_values() {
        let row = decode_row(&headers(&["A", "B"]), &["1", "2", "3"]);
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("A"), Some("1"));
        assert_eq!(row.get("B"), Some("2"));
    }

    #[test]
    fn decode_row_keeps_empty_values() {
        let row = decode_row(&headers(&["A", "B"]), &["", "2"]);
        assert!(row.contains("A"));
        assert_eq!(row.get("A"), Some(""));
    }

    #[test]
    fn reads_tab_delimited_rows_after_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.txt");
        std::fs::write(&path, "A\tB\n1\t2\n3\t4\n").unwrap();

        let mut rows = TsvRows::open(&path).unwrap();
        assert_eq!(rows.headers(), &["A".to_string(), "B".to_string()]);

        let first = rows.next().unwrap().unwrap();
        assert_eq!(first.get("A"), Some("1"));
        assert_eq!(first.get("B"), Some("2"));
        let second = rows.next().unwrap().unwrap();
        assert_eq!(second.get("B"), Some("4"));
        assert!(rows.next().is_none());
    }

    #[test]
    fn strips_embedded_nul_bytes_before_tokenizing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.txt");
        std::fs::write(&path, b"A\tB\n1\x002\t3\x00\n").unwrap();

        let mut rows = TsvRows::open(&path).unwrap();
        let row = rows.next().unwrap().unwrap();
        assert_eq!(row.get("A"), Some("12"));
        assert_eq!(row.get("B"), Some("3"));
    }

    #[test]
    fn short_rows_leave_later_headers_unmapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.txt");
        std::fs::write(&path, "A\tB\tC\n1\t2\n").unwrap();

        let mut rows = TsvRows::open(&path).unwrap();
        let row = rows.next().unwrap().unwrap();
        assert!(row.contains("B"));
        assert!(!row.contains("C"));
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let error = TsvRows::open(&path).unwrap_err();
        assert!(matches!(error, IngestError::FileOpen { .. }));
    }
}
