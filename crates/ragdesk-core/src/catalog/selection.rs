//! Method selection state.

use super::model::{CATALOG, RagCategory, RagMethod, RagMethodDescriptor};
use crate::error::{RagdeskError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which method is chosen for chat turns and which card is expanded.
///
/// Selecting a method always expands it; at most one method is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MethodSelection {
    pub selected_id: RagMethod,
    pub expanded_id: Option<RagMethod>,
}

/// Read-only catalog plus the in-memory selection state.
///
/// Holds no network or persistence handles; every operation is pure
/// in-memory state.
#[derive(Debug, Clone, Default)]
pub struct RagMethodCatalog {
    selection: MethodSelection,
}

impl RagMethodCatalog {
    /// Creates a catalog with `method` selected and nothing expanded.
    pub fn with_selected(method: RagMethod) -> Self {
        Self {
            selection: MethodSelection {
                selected_id: method,
                expanded_id: None,
            },
        }
    }

    /// All descriptors in stable catalog order.
    pub fn list(&self) -> &'static [RagMethodDescriptor] {
        &CATALOG
    }

    /// Lazily filters the catalog by category.
    pub fn by_category(
        &self,
        category: RagCategory,
    ) -> impl Iterator<Item = &'static RagMethodDescriptor> {
        CATALOG.iter().filter(move |d| d.category == category)
    }

    /// Looks a descriptor up by its `option<N>` id.
    pub fn get(&self, id: &str) -> Option<&'static RagMethodDescriptor> {
        RagMethod::from_str(id).ok().map(RagMethod::descriptor)
    }

    /// Selects `id` and forces it to be the expanded method.
    pub fn select(&mut self, id: &str) -> Result<()> {
        let method = Self::parse(id)?;
        self.selection = MethodSelection {
            selected_id: method,
            expanded_id: Some(method),
        };
        tracing::debug!("[RagMethodCatalog] Selected {}", method);
        Ok(())
    }

    /// Collapses `id` when it is the expanded method, otherwise expands it.
    /// The selection is never changed.
    pub fn toggle_expand(&mut self, id: &str) -> Result<()> {
        let method = Self::parse(id)?;
        self.selection.expanded_id = if self.selection.expanded_id == Some(method) {
            None
        } else {
            Some(method)
        };
        Ok(())
    }

    pub fn selected(&self) -> RagMethod {
        self.selection.selected_id
    }

    pub fn expanded(&self) -> Option<RagMethod> {
        self.selection.expanded_id
    }

    pub fn selection(&self) -> MethodSelection {
        self.selection
    }

    fn parse(id: &str) -> Result<RagMethod> {
        RagMethod::from_str(id.trim()).map_err(|_| RagdeskError::not_found("RagMethod", id))
    }
}
