#![deny(unsafe_code)]

use std::collections::BTreeMap;

/// A drug reference entry, keyed in [`ReferenceMaps::drugs`] by its local `Drug_ID`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DrugRecord {
    /// Normalized cross-reference: `DRUGBANK:` followed by the DrugBank accession.
    pub drug_id: String,
    pub drug_name: String,
}

/// A disease reference entry, keyed in [`ReferenceMaps::diseases`] by its local `Disease_ID`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DiseaseRecord {
    /// Normalized cross-reference: `ICD11:` followed by the bare ICD-11 code.
    pub disease_id: String,
    pub disease_name: String,
}

/// A molecular-entity reference entry, keyed in [`ReferenceMaps::molecules`]
/// by its local `Molecule_ID`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MoleculeRecord {
    /// HGNC cross-reference identifier.
    pub molecule_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molecule_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molecule_type: Option<String>,
    pub species: String,
}

/// The three reference lookup maps, built once before any join step and
/// read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceMaps {
    pub drugs: BTreeMap<String, DrugRecord>,
    pub diseases: BTreeMap<String, DiseaseRecord>,
    pub molecules: BTreeMap<String, MoleculeRecord>,
}

/// The disease/association side of an emitted record.
///
/// Either a resolved disease reference (`disease_id` present) or the
/// synthetic HIV context used for the relation table that carries no disease
/// column. `sensitivity` is copied verbatim from the relation row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssociationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_id: Option<String>,
    pub disease_name: String,
    pub sensitivity: String,
}

impl AssociationContext {
    pub fn from_disease(record: &DiseaseRecord, sensitivity: impl Into<String>) -> Self {
        Self {
            disease_id: Some(record.disease_id.clone()),
            disease_name: record.disease_name.clone(),
            sensitivity: sensitivity.into(),
        }
    }

    /// The HIV relation table has no disease column; the disease is implicit.
    pub fn hiv(sensitivity: impl Into<String>) -> Self {
        Self {
            disease_id: None,
            disease_name: "HIV".to_string(),
            sensitivity: sensitivity.into(),
        }
    }

    pub fn is_hiv(&self) -> bool {
        self.disease_id.is_none() && self.disease_name == "HIV"
    }
}

/// One normalized resistance association: a molecular subject, a drug
/// object, and the disease context the observation was made in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Association {
    pub subject: MoleculeRecord,
    pub object: DrugRecord,
    pub association: AssociationContext,
}
