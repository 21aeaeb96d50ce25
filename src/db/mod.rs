pub mod artifacts;
pub mod cache;

mod macros;

pub use artifacts::{Artifacts, Catalog, SimilarityMatrix};
pub use cache::Cache;
