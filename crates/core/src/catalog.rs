//! Catalog loading and shortlist filtering.
//!
//! The catalog is read once at startup from a JSON array of product
//! records and is immutable afterwards. Individual malformed entries are
//! dropped with a warning; a missing, unparsable, or entirely invalid
//! source is fatal so the service never starts with an empty catalog.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::domain::product::{Category, Product};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("catalog `{path}` contains no valid products")]
    Empty { path: PathBuf },
}

#[derive(Clone, Debug)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Load and validate the product catalog.
    ///
    /// Entries that are not JSON objects, lack a required field, or carry
    /// an unrecognized category are skipped with a warning. The source
    /// order of the surviving entries is preserved.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::Read { path: path.to_path_buf(), source })?;
        let entries: Vec<serde_json::Value> = serde_json::from_str(&raw)
            .map_err(|source| CatalogError::Parse { path: path.to_path_buf(), source })?;

        let mut products = Vec::with_capacity(entries.len());
        for entry in entries {
            if !entry.is_object() {
                warn!(
                    event_name = "catalog.entry_skipped",
                    reason = "not an object",
                    "skipping invalid catalog entry"
                );
                continue;
            }

            let entry_id = entry.get("id").and_then(|id| id.as_str()).unwrap_or("unknown").to_string();
            match serde_json::from_value::<Product>(entry) {
                Ok(product) => products.push(product),
                Err(error) => {
                    warn!(
                        event_name = "catalog.entry_skipped",
                        product_id = %entry_id,
                        reason = %error,
                        "skipping invalid catalog entry"
                    );
                }
            }
        }

        if products.is_empty() {
            return Err(CatalogError::Empty { path: path.to_path_buf() });
        }

        Ok(Self { products })
    }

    /// Build a catalog from already-validated products.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Narrow the catalog by the optional category and budget extracted
    /// from a query. Falls back to the full catalog when nothing survives
    /// the filter, so the prompt builder always has candidates.
    pub fn shortlist(&self, budget: Option<u32>, category: Option<Category>) -> Vec<Product> {
        let filtered: Vec<Product> = self
            .products
            .iter()
            .filter(|product| category.map_or(true, |wanted| product.category == wanted))
            .filter(|product| budget.map_or(true, |limit| product.price_inr <= limit))
            .cloned()
            .collect();

        if filtered.is_empty() {
            self.products.clone()
        } else {
            filtered
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs;

    use tempfile::TempDir;

    use super::{Catalog, CatalogError};
    use crate::domain::product::{Category, Product};

    fn product(id: &str, category: Category, price_inr: u32) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Test {id}"),
            category,
            brand: "TestBrand".to_string(),
            price_inr,
            specs: BTreeMap::new(),
            rating: 4.2,
            tier: None,
        }
    }

    #[test]
    fn load_keeps_valid_entries_and_drops_malformed_ones() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("products.json");
        fs::write(
            &path,
            r#"[
                {"id": "p1", "name": "Alpha 5G", "category": "smartphone", "brand": "Alpha",
                 "price_inr": 24999, "specs": {"RAM": "8GB"}, "rating": 4.4},
                "not-an-object",
                {"id": "p2", "name": "No Category", "brand": "Beta",
                 "price_inr": 10000, "specs": {}, "rating": 3.0},
                {"id": "p3", "name": "Tabby", "category": "tablet", "brand": "Gamma",
                 "price_inr": 30000, "specs": {}, "rating": 4.0},
                {"id": "p4", "name": "WorkBook 14", "category": "laptop", "brand": "Delta",
                 "price_inr": 55999, "specs": {"RAM": "16GB"}, "rating": 4.6, "tier": "mid-range"}
            ]"#,
        )
        .expect("write catalog");

        let catalog = Catalog::load(&path).expect("catalog load");

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[0].id, "p1");
        assert_eq!(catalog.products()[1].id, "p4");
        assert_eq!(catalog.products()[1].tier.as_deref(), Some("mid-range"));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("absent.json");

        assert!(matches!(Catalog::load(&path), Err(CatalogError::Read { .. })));
    }

    #[test]
    fn load_fails_for_invalid_json() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("products.json");
        fs::write(&path, "{ not json").expect("write catalog");

        assert!(matches!(Catalog::load(&path), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn load_fails_when_no_entry_survives() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("products.json");
        fs::write(&path, r#"[{"id": "p1", "category": "tablet"}]"#).expect("write catalog");

        assert!(matches!(Catalog::load(&path), Err(CatalogError::Empty { .. })));
    }

    #[test]
    fn shortlist_applies_both_predicates() {
        let catalog = Catalog::new(vec![
            product("phone-cheap", Category::Smartphone, 20000),
            product("phone-pricey", Category::Smartphone, 90000),
            product("laptop-cheap", Category::Laptop, 45000),
            product("laptop-pricey", Category::Laptop, 150000),
        ]);

        let shortlist = catalog.shortlist(Some(60000), Some(Category::Laptop));

        assert_eq!(shortlist.len(), 1);
        assert_eq!(shortlist[0].id, "laptop-cheap");
        assert!(shortlist.iter().all(|p| p.category == Category::Laptop && p.price_inr <= 60000));
    }

    #[test]
    fn shortlist_without_constraints_returns_everything() {
        let catalog = Catalog::new(vec![
            product("a", Category::Smartphone, 20000),
            product("b", Category::Laptop, 45000),
        ]);

        assert_eq!(catalog.shortlist(None, None).len(), 2);
    }

    #[test]
    fn empty_shortlist_falls_back_to_full_catalog() {
        let catalog = Catalog::new(vec![
            product("phone-pricey", Category::Smartphone, 90000),
            product("laptop-pricey", Category::Laptop, 150000),
        ]);

        // Nothing fits the cap, so the whole catalog comes back unfiltered.
        let shortlist = catalog.shortlist(Some(10000), Some(Category::Laptop));
        assert_eq!(shortlist.len(), 2);
    }
}
