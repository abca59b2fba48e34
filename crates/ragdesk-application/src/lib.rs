pub mod app;
pub mod chat_pipeline;
pub mod confirm;
pub mod index_coordinator;

pub use app::{APP_ORIGIN, RagdeskApp};
pub use chat_pipeline::{ChatPipelineClient, DropReason, SendOutcome};
pub use confirm::{AutoConfirm, Confirmation};
pub use index_coordinator::{DeleteOutcome, DeleteSummary, IndexCoordinator, IndexReport};
