//! Retrieval method catalog.
//!
//! - `model`: the closed `RagMethod` enumeration and its static descriptors
//! - `selection`: single-selection / single-expansion state over the catalog

mod model;
mod selection;

pub use model::{CATALOG, RagCategory, RagMethod, RagMethodDescriptor};
pub use selection::{MethodSelection, RagMethodCatalog};
