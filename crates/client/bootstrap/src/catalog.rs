//! HTTP adapter for the remote creature catalog.
//!
//! Items are fetched from `{base_url}/{id}/`. The payload's `name` becomes the
//! label and the shiny official artwork becomes the picture, falling back to
//! the default front sprite.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use match_core::{Item, ItemId};
use match_runtime::{CatalogError, ItemCatalog};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// [`ItemCatalog`] backed by a JSON-over-HTTP lookup service.
#[derive(Clone, Debug)]
pub struct HttpItemCatalog {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpItemCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::with_client(http_client, base_url)
    }

    pub fn with_client(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn item_url(&self, id: ItemId) -> String {
        format!("{}/{}/", self.base_url, id.0)
    }
}

#[async_trait]
impl ItemCatalog for HttpItemCatalog {
    async fn fetch_item(&self, id: ItemId) -> Result<Item, CatalogError> {
        let url = self.item_url(id);
        debug!(target: "bootstrap::catalog", %id, url = %url, "Fetching item");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            return Err(CatalogError::Network(format!(
                "catalog responded with status {status} for {url}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        item_from_payload(id, &body)
    }
}

#[derive(Deserialize)]
struct Payload {
    name: Option<String>,
    #[serde(default)]
    sprites: Sprites,
}

#[derive(Default, Deserialize)]
struct Sprites {
    front_default: Option<String>,
    #[serde(default)]
    other: OtherSprites,
}

#[derive(Default, Deserialize)]
struct OtherSprites {
    #[serde(rename = "official-artwork")]
    official_artwork: Option<Artwork>,
}

#[derive(Deserialize)]
struct Artwork {
    front_shiny: Option<String>,
}

/// Maps one catalog JSON document to an [`Item`].
pub fn item_from_payload(id: ItemId, body: &str) -> Result<Item, CatalogError> {
    let malformed = |reason: String| CatalogError::Malformed { id, reason };

    let payload: Payload =
        serde_json::from_str(body).map_err(|e| malformed(format!("invalid JSON: {e}")))?;

    let name = payload
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| malformed("missing name".into()))?;

    let image = payload
        .sprites
        .other
        .official_artwork
        .and_then(|artwork| artwork.front_shiny)
        .or(payload.sprites.front_default)
        .ok_or_else(|| malformed("missing artwork".into()))?;

    Ok(Item::new(id, name, image))
}
