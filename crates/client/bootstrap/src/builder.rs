//! Builds the runtime and catalog bundle used by front-ends.
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use match_runtime::{ItemCatalog, Runtime, SessionHandle};

use crate::catalog::HttpItemCatalog;
use crate::config::BootstrapConfig;

/// Builder that assembles the item catalog, runtime, and configuration for clients.
pub struct Bootstrap {
    config: BootstrapConfig,
    catalog: Option<Arc<dyn ItemCatalog>>,
}

impl Bootstrap {
    pub fn new(config: BootstrapConfig) -> Self {
        Self {
            config,
            catalog: None,
        }
    }

    /// Bootstrap from `.env` and the process environment.
    pub fn from_env() -> Self {
        Self::new(BootstrapConfig::from_env())
    }

    /// Provide a custom catalog instead of the HTTP catalog at `catalog_url`.
    pub fn catalog(mut self, catalog: impl ItemCatalog + 'static) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    pub async fn build(self) -> Result<SessionSetup> {
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Arc::new(HttpItemCatalog::new(self.config.catalog_url.clone())),
        };

        let runtime = Runtime::builder()
            .config(self.config.runtime_config())
            .shared_catalog(catalog)
            .build()
            .await
            .context("failed to start the session runtime")?;

        info!(
            tier = %self.config.tier,
            catalog_size = self.config.catalog_size,
            "Session runtime ready"
        );

        Ok(SessionSetup {
            config: self.config,
            runtime,
        })
    }
}

pub struct SessionSetup {
    pub config: BootstrapConfig,
    pub runtime: Runtime,
}

impl SessionSetup {
    pub fn handle(&self) -> SessionHandle {
        self.runtime.handle()
    }
}
