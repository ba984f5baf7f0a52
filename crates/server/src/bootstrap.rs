use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use techadvisor_agent::{AdvisorService, CacheConfig, GeminiClient, PromptError, PromptTemplate};
use techadvisor_core::catalog::{Catalog, CatalogError};
use techadvisor_core::config::{AppConfig, ConfigError};

pub struct Application {
    pub config: AppConfig,
    pub advisor: Arc<AdvisorService>,
    pub catalog_size: usize,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog load failed: {0}")]
    Catalog(#[from] CatalogError),
    #[error("prompt template load failed: {0}")]
    Prompt(#[from] PromptError),
    #[error("model gateway initialization failed: {0}")]
    Gateway(anyhow::Error),
}

/// Assemble the process-scoped state the HTTP surface serves from.
/// Any failure here is fatal; the server never starts half-initialized.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let catalog = Catalog::load(&config.catalog.path)?;
    let catalog_size = catalog.len();
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        correlation_id = "bootstrap",
        products = catalog_size,
        "product catalog loaded"
    );

    let template = PromptTemplate::load(&config.prompt.template_path)?;
    info!(
        event_name = "system.bootstrap.template_loaded",
        correlation_id = "bootstrap",
        "prompt template loaded"
    );

    let gateway = GeminiClient::new(&config.llm).map_err(BootstrapError::Gateway)?;
    let cache_config = CacheConfig {
        max_entries: config.cache.max_entries,
        ttl: Duration::from_secs(config.cache.ttl_secs),
    };
    let advisor = Arc::new(AdvisorService::new(
        Arc::new(catalog),
        template,
        Arc::new(gateway),
        &cache_config,
    ));

    Ok(Application { config, advisor, catalog_size })
}
