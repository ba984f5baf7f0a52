use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The two product families the advisor knows about. Catalog entries with
/// any other category are dropped at load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Smartphone,
    Laptop,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Smartphone => f.write_str("smartphone"),
            Self::Laptop => f.write_str("laptop"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub brand: String,
    pub price_inr: u32,
    pub specs: BTreeMap<String, String>,
    pub rating: f32,
    #[serde(default)]
    pub tier: Option<String>,
}

impl Product {
    /// Named spec attribute, or `None` when the catalog entry omits it.
    pub fn spec(&self, key: &str) -> Option<&str> {
        self.specs.get(key).map(String::as_str)
    }
}
