//! File catalog domain module.
//!
//! - `model`: `FileRecord` and upload validation rules
//! - `view`: pure filter/selection state with the select-all invariant
//! - `registry`: `FileRegistry`, the backend-synchronized mirror

mod model;
mod registry;
mod view;

pub use model::{ALLOWED_EXTENSIONS, FileRecord, validate_upload_name};
pub use registry::{FileRegistry, RegistrySnapshot};
pub use view::FileCatalogView;
