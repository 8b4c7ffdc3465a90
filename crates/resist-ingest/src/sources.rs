//! The fixed source-table catalogue.
//!
//! The dataset ships as five tab-delimited files with fixed names under a
//! caller-supplied data folder; there is no discovery step.

use std::path::{Path, PathBuf};

/// One of the five expected source tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFile {
    /// Drug reference table (`Drug_ID`, `DrugBank_ID`, `Drug_Name`, ...).
    DrugInfo,
    /// Disease reference table (`Disease_ID`, `Disease_ICD`, `Disease_name`, ...).
    DiseaseInfo,
    /// Molecular-entity reference table (`Molecule_ID`, `HGNC_ID`, ...).
    MoleculeInfo,
    /// Drug-disease-molecule relation table covering everything besides HIV.
    GeneralPairs,
    /// HIV relation table; carries no `Disease_ID` column.
    HivPairs,
}

impl SourceFile {
    pub const ALL: [SourceFile; 5] = [
        SourceFile::DrugInfo,
        SourceFile::DiseaseInfo,
        SourceFile::MoleculeInfo,
        SourceFile::GeneralPairs,
        SourceFile::HivPairs,
    ];

    /// The fixed file name, verbatim from the upstream dataset.
    pub fn file_name(self) -> &'static str {
        match self {
            SourceFile::DrugInfo => {
                "2-1. The general information of drugs associated with resistance.txt"
            }
            SourceFile::DiseaseInfo => {
                "3-1. The general information of disease related with resistance.txt"
            }
            SourceFile::MoleculeInfo => {
                "4-1. The general information of molecular associated with resistance.txt"
            }
            SourceFile::GeneralPairs => {
                "1-1. The pair information of drug-disease (Besides HIV)-molecular based resistance.txt"
            }
            SourceFile::HivPairs => {
                "1-11. The pair information of HIV-drug-molecular based resistance.txt"
            }
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            SourceFile::DrugInfo => "drug reference table",
            SourceFile::DiseaseInfo => "disease reference table",
            SourceFile::MoleculeInfo => "molecular-entity reference table",
            SourceFile::GeneralPairs => "drug-disease-molecule relation table (besides HIV)",
            SourceFile::HivPairs => "HIV drug-molecule relation table",
        }
    }

    pub fn path_in(self, data_folder: &Path) -> PathBuf {
        data_folder.join(self.file_name())
    }
}
