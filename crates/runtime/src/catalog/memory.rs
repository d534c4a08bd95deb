use std::collections::HashMap;

use async_trait::async_trait;

use match_core::{Item, ItemId};

use super::{CatalogError, ItemCatalog};

/// Catalog backed by a fixed in-process table.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    items: HashMap<ItemId, Item>,
}

impl InMemoryCatalog {
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    /// Catalog with ids `1..=count`, named `item-<id>`.
    pub fn generated(count: u32) -> Self {
        Self::new((1..=count).map(|n| {
            Item::new(ItemId(n), format!("item-{n}"), format!("memory://items/{n}.png"))
        }))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl ItemCatalog for InMemoryCatalog {
    async fn fetch_item(&self, id: ItemId) -> Result<Item, CatalogError> {
        self.items.get(&id).cloned().ok_or(CatalogError::NotFound(id))
    }
}
