pub mod join;
pub mod pipeline;

pub use join::{JoinError, join_row};
pub use pipeline::{AssociationStream, PipelineError, RELATION_TABLES, load_associations};
