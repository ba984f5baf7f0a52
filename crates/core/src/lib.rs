pub mod catalog;
pub mod config;
pub mod domain;
pub mod query;

pub use catalog::{Catalog, CatalogError};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions};
pub use domain::product::{Category, Product};
pub use query::{classify_category, extract_budget, is_on_topic};
