//! The association joiner.
//!
//! Resolves one decoded relation row against the three reference maps and
//! shapes the result into a normalized [`Association`], or drops the row
//! when any side fails to resolve.

use thiserror::Error;

use resist_model::{Association, AssociationContext, DecodedRow, ReferenceMaps};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinError {
    #[error("relation row is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Joins one relation row, yielding a record only when the molecular
/// subject, drug object, and disease context all resolve.
///
/// A row with no `Disease_ID` field at all comes from the HIV relation
/// table, where the disease is implicit; it gets the synthetic HIV context.
/// `Drug_sensitivity` is required on every row that reaches the join,
/// whether or not the row ends up qualifying.
pub fn join_row(
    row: &DecodedRow,
    maps: &ReferenceMaps,
) -> Result<Option<Association>, JoinError> {
    if row.is_empty() {
        return Ok(None);
    }

    let subject = row
        .get("Molecule_ID")
        .and_then(|id| maps.molecules.get(id));
    let object = row.get("Drug_ID").and_then(|id| maps.drugs.get(id));

    let sensitivity = row
        .get("Drug_sensitivity")
        .ok_or(JoinError::MissingField("Drug_sensitivity"))?;

    let association = if row.contains("Disease_ID") {
        row.get("Disease_ID")
            .and_then(|id| maps.diseases.get(id))
            .map(|disease| AssociationContext::from_disease(disease, sensitivity))
    } else {
        Some(AssociationContext::hiv(sensitivity))
    };

    match (subject, object, association) {
        (Some(subject), Some(object), Some(association)) => Ok(Some(Association {
            subject: subject.clone(),
            object: object.clone(),
            association,
        })),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resist_model::{DiseaseRecord, DrugRecord, MoleculeRecord};

    fn maps() -> ReferenceMaps {
        let mut maps = ReferenceMaps::default();
        maps.drugs.insert(
            "D1".to_string(),
            DrugRecord {
                drug_id: "DRUGBANK:DB00001".to_string(),
                drug_name: "Aspirin".to_string(),
            },
        );
        maps.diseases.insert(
            "DIS1".to_string(),
            DiseaseRecord {
                disease_id: "ICD11:A1.2".to_string(),
                disease_name: "Some disease".to_string(),
            },
        );
        maps.molecules.insert(
            "M1".to_string(),
            MoleculeRecord {
                molecule_id: "HGNC:5".to_string(),
                molecule_name: Some("ABC".to_string()),
                molecule_type: None,
                species: "Homo sapiens".to_string(),
            },
        );
        maps
    }

    fn row(fields: &[(&str, &str)]) -> DecodedRow {
        let mut row = DecodedRow::new();
        for (name, value) in fields {
            row.insert(*name, *value);
        }
        row
    }

    #[test]
    fn joins_fully_resolved_row() {
        let row = row(&[
            ("Molecule_ID", "M1"),
            ("Drug_ID", "D1"),
            ("Disease_ID", "DIS1"),
            ("Drug_sensitivity", "Resistant"),
        ]);
        let association = join_row(&row, &maps()).unwrap().unwrap();
        assert_eq!(association.subject.molecule_id, "HGNC:5");
        assert_eq!(association.object.drug_id, "DRUGBANK:DB00001");
        assert_eq!(
            association.association.disease_id.as_deref(),
            Some("ICD11:A1.2")
        );
        assert_eq!(association.association.sensitivity, "Resistant");
    }

    #[test]
    fn absent_disease_field_means_hiv() {
        let row = row(&[
            ("Molecule_ID", "M1"),
            ("Drug_ID", "D1"),
            ("Drug_sensitivity", "Sensitive"),
        ]);
        let association = join_row(&row, &maps()).unwrap().unwrap();
        assert!(association.association.is_hiv());
        assert_eq!(association.association.disease_name, "HIV");
        assert_eq!(association.association.sensitivity, "Sensitive");
    }

    #[test]
    fn empty_disease_value_is_not_hiv() {
        // The HIV rule keys on field absence; an empty value is a failed
        // disease lookup and the row is dropped.
        let row = row(&[
            ("Molecule_ID", "M1"),
            ("Drug_ID", "D1"),
            ("Disease_ID", ""),
            ("Drug_sensitivity", "Resistant"),
        ]);
        assert_eq!(join_row(&row, &maps()).unwrap(), None);
    }

    #[test]
    fn unresolved_molecule_drops_row() {
        let row = row(&[
            ("Molecule_ID", "UNKNOWN"),
            ("Drug_ID", "D1"),
            ("Disease_ID", "DIS1"),
            ("Drug_sensitivity", "Resistant"),
        ]);
        assert_eq!(join_row(&row, &maps()).unwrap(), None);
    }

    #[test]
    fn unresolved_disease_drops_row() {
        let row = row(&[
            ("Molecule_ID", "M1"),
            ("Drug_ID", "D1"),
            ("Disease_ID", "UNKNOWN"),
            ("Drug_sensitivity", "Resistant"),
        ]);
        assert_eq!(join_row(&row, &maps()).unwrap(), None);
    }

    #[test]
    fn empty_row_yields_nothing() {
        assert_eq!(join_row(&DecodedRow::new(), &maps()).unwrap(), None);
    }

    #[test]
    fn missing_sensitivity_is_fatal_even_when_row_would_not_qualify() {
        let row = row(&[("Molecule_ID", "UNKNOWN"), ("Drug_ID", "D1")]);
        assert_eq!(
            join_row(&row, &maps()).unwrap_err(),
            JoinError::MissingField("Drug_sensitivity")
        );
    }
}
