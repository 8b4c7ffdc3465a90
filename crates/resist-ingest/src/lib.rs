pub mod error;
pub mod reference;
pub mod sources;
pub mod tsv;

pub use error::{IngestError, Result};
pub use reference::{load_disease_map, load_drug_map, load_molecule_map, load_reference_maps};
pub use sources::SourceFile;
pub use tsv::{TsvRows, decode_row};
