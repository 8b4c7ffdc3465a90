//! Reference-table loaders.
//!
//! Each loader scans one reference table and builds a map from the local ID
//! used by the relation tables to a normalized entity record. Rows whose
//! required cross-reference identifier is absent or shorter than three
//! characters are quality-filtered out of the map, silently.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use resist_model::{DecodedRow, DiseaseRecord, DrugRecord, MoleculeRecord, ReferenceMaps};

use crate::error::{IngestError, Result};
use crate::sources::SourceFile;
use crate::tsv::TsvRows;

/// Returns the cross-reference value only when it passes the quality filter.
fn valid_xref<'a>(row: &'a DecodedRow, field: &str) -> Option<&'a str> {
    row.get(field).filter(|value| value.len() > 2)
}

/// Fields the upstream format guarantees on rows that pass the filter; their
/// absence is a malformed table, not a filterable row.
fn require<'a>(
    row: &'a DecodedRow,
    field: &'static str,
    path: &Path,
    row_number: u64,
) -> Result<&'a str> {
    row.get(field).ok_or_else(|| IngestError::MissingField {
        path: path.to_path_buf(),
        row: row_number,
        field,
    })
}

/// `Disease_ICD` values read like `"ICD11: A1.2"`; keep the last
/// colon-separated segment, drop spaces, and re-prefix.
fn normalize_icd(raw: &str) -> String {
    let segment = raw.rsplit(':').next().unwrap_or(raw);
    format!("ICD11:{}", segment.replace(' ', ""))
}

pub fn load_drug_map(data_folder: &Path) -> Result<BTreeMap<String, DrugRecord>> {
    let path = SourceFile::DrugInfo.path_in(data_folder);
    let mut map = BTreeMap::new();
    let mut skipped = 0usize;
    for (idx, row) in TsvRows::open(&path)?.enumerate() {
        let row = row?;
        let row_number = idx as u64 + 1;
        let Some(drugbank_id) = valid_xref(&row, "DrugBank_ID") else {
            skipped += 1;
            continue;
        };
        let drug_id = require(&row, "Drug_ID", &path, row_number)?;
        let drug_name = require(&row, "Drug_Name", &path, row_number)?;
        map.insert(
            drug_id.to_string(),
            DrugRecord {
                drug_id: format!("DRUGBANK:{drugbank_id}"),
                drug_name: drug_name.to_string(),
            },
        );
    }
    info!(count = map.len(), skipped, "loaded drug reference table");
    Ok(map)
}

pub fn load_disease_map(data_folder: &Path) -> Result<BTreeMap<String, DiseaseRecord>> {
    let path = SourceFile::DiseaseInfo.path_in(data_folder);
    let mut map = BTreeMap::new();
    let mut skipped = 0usize;
    for (idx, row) in TsvRows::open(&path)?.enumerate() {
        let row = row?;
        let row_number = idx as u64 + 1;
        let Some(icd) = valid_xref(&row, "Disease_ICD") else {
            skipped += 1;
            continue;
        };
        let disease_id = require(&row, "Disease_ID", &path, row_number)?;
        let disease_name = require(&row, "Disease_name", &path, row_number)?;
        map.insert(
            disease_id.to_string(),
            DiseaseRecord {
                disease_id: normalize_icd(icd),
                disease_name: disease_name.to_string(),
            },
        );
    }
    info!(count = map.len(), skipped, "loaded disease reference table");
    Ok(map)
}

pub fn load_molecule_map(data_folder: &Path) -> Result<BTreeMap<String, MoleculeRecord>> {
    let path = SourceFile::MoleculeInfo.path_in(data_folder);
    let mut map = BTreeMap::new();
    let mut skipped = 0usize;
    for (idx, row) in TsvRows::open(&path)?.enumerate() {
        let row = row?;
        let row_number = idx as u64 + 1;
        let Some(hgnc_id) = valid_xref(&row, "HGNC_ID") else {
            skipped += 1;
            continue;
        };
        let molecule_id = require(&row, "Molecule_ID", &path, row_number)?;
        let species = require(&row, "Molecule_species", &path, row_number)?;
        map.insert(
            molecule_id.to_string(),
            MoleculeRecord {
                molecule_id: hgnc_id.to_string(),
                molecule_name: row.get("Molecule_name").map(str::to_string),
                molecule_type: row.get("Molecule_type").map(str::to_string),
                species: species.to_string(),
            },
        );
    }
    info!(count = map.len(), skipped, "loaded molecule reference table");
    Ok(map)
}

/// Builds all three maps, fully materialized, in table order.
pub fn load_reference_maps(data_folder: &Path) -> Result<ReferenceMaps> {
    let drugs = load_drug_map(data_folder)?;
    let diseases = load_disease_map(data_folder)?;
    let molecules = load_molecule_map(data_folder)?;
    debug!(
        drugs = drugs.len(),
        diseases = diseases.len(),
        molecules = molecules.len(),
        "reference maps ready"
    );
    Ok(ReferenceMaps {
        drugs,
        diseases,
        molecules,
    })
}
