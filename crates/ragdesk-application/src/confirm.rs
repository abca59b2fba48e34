//! User confirmation port.

use async_trait::async_trait;

/// Asks the user to approve a destructive action.
///
/// Returning `false` is a cancellation, never an error.
#[async_trait]
pub trait Confirmation: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Approves every prompt (non-interactive runs).
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait]
impl Confirmation for AutoConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!("[AutoConfirm] Approved: {}", prompt);
        true
    }
}
