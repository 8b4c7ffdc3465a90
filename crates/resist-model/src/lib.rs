pub mod error;
pub mod records;
pub mod row;

pub use error::{ModelError, Result};
pub use records::{
    Association, AssociationContext, DiseaseRecord, DrugRecord, MoleculeRecord, ReferenceMaps,
};
pub use row::DecodedRow;
