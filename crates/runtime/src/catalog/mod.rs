//! Item catalog boundary.
//!
//! The catalog resolves sampled ids into displayable items. Lookups for one
//! round run concurrently and the round only starts if every lookup succeeds.
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinSet;

use match_core::{ErrorSeverity, GameError, Item, ItemId};

use crate::api::{Result, RuntimeError};

pub use memory::InMemoryCatalog;

/// Failure of a single catalog lookup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("item {0} does not exist in the catalog")]
    NotFound(ItemId),

    #[error("catalog unreachable: {0}")]
    Network(String),

    #[error("catalog returned an unusable entry for item {id}: {reason}")]
    Malformed { id: ItemId, reason: String },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Network(_) => ErrorSeverity::Recoverable,
            Self::NotFound(_) | Self::Malformed { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "CATALOG_NOT_FOUND",
            Self::Network(_) => "CATALOG_NETWORK",
            Self::Malformed { .. } => "CATALOG_MALFORMED",
        }
    }
}

/// Source of items, typically a remote lookup service.
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    async fn fetch_item(&self, id: ItemId) -> std::result::Result<Item, CatalogError>;
}

/// Resolves every id concurrently, preserving the order of `ids`.
///
/// The first failure aborts the remaining lookups and is returned as
/// [`RuntimeError::Catalog`]; no partial result escapes.
pub async fn fetch_all(catalog: &Arc<dyn ItemCatalog>, ids: &[ItemId]) -> Result<Vec<Item>> {
    let mut lookups = JoinSet::new();
    for (index, &id) in ids.iter().enumerate() {
        let catalog = Arc::clone(catalog);
        lookups.spawn(async move { (index, id, catalog.fetch_item(id).await) });
    }

    let mut slots: Vec<Option<Item>> = vec![None; ids.len()];
    while let Some(joined) = lookups.join_next().await {
        let (index, id, fetched) = joined.map_err(RuntimeError::WorkerJoin)?;
        let item = fetched.map_err(|source| RuntimeError::Catalog { id, source })?;
        slots[index] = Some(item);
    }

    Ok(slots.into_iter().flatten().collect())
}
