//! Prompt template loading and product summary formatting.

use std::fs;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};
use thiserror::Error;

use techadvisor_core::domain::product::Product;

const TEMPLATE_NAME: &str = "advisor_prompt";

/// Spec attributes surfaced to the model, in the order they are printed.
const SPEC_FIELDS: [(&str, &str); 6] = [
    ("RAM", "RAM"),
    ("Storage", "storage"),
    ("Processor", "processor"),
    ("Display", "display"),
    ("Battery", "battery"),
    ("Camera", "camera"),
];

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("could not read prompt template `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse prompt template `{path}`: {source}")]
    Parse { path: PathBuf, source: tera::Error },
    #[error("could not render prompt template: {0}")]
    Render(#[source] tera::Error),
}

/// The advisor prompt, read and validated once at startup.
pub struct PromptTemplate {
    tera: Tera,
}

impl PromptTemplate {
    /// Load the template and probe-render it so a missing file or an
    /// unknown placeholder aborts startup instead of a request.
    pub fn load(path: &Path) -> Result<Self, PromptError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| PromptError::Read { path: path.to_path_buf(), source })?;

        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, &raw)
            .map_err(|source| PromptError::Parse { path: path.to_path_buf(), source })?;

        let template = Self { tera };
        template
            .render("", "")
            .map_err(|error| match error {
                PromptError::Render(source) => {
                    PromptError::Parse { path: path.to_path_buf(), source }
                }
                other => other,
            })?;

        Ok(template)
    }

    /// Substitute the raw user message and the formatted shortlist into
    /// the template.
    pub fn build(&self, user_message: &str, products: &[Product]) -> Result<String, PromptError> {
        self.render(user_message, &product_summary(products))
    }

    fn render(&self, user_message: &str, product_summary: &str) -> Result<String, PromptError> {
        let mut context = Context::new();
        context.insert("user_message", user_message);
        context.insert("product_summary", product_summary);
        self.tera.render(TEMPLATE_NAME, &context).map_err(PromptError::Render)
    }
}

/// One newline-separated block per product.
fn product_summary(products: &[Product]) -> String {
    products.iter().map(format_product).collect::<Vec<_>>().join("\n")
}

fn format_product(product: &Product) -> String {
    let specs = SPEC_FIELDS
        .iter()
        .map(|(label, key)| format!("{label}: {}", product.spec(key).unwrap_or("N/A")))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "- {} ({})\n  \u{20b9}{} | \u{2b50} {} | Tier: {}\n  Specs: {}",
        product.name,
        product.brand,
        product.price_inr,
        product.rating,
        product.tier.as_deref().unwrap_or("N/A"),
        specs
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs;

    use tempfile::TempDir;

    use techadvisor_core::domain::product::{Category, Product};

    use super::{format_product, PromptError, PromptTemplate};

    fn write_template(contents: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("advisor_prompt.md");
        fs::write(&path, contents).expect("write template");
        (dir, path)
    }

    fn phone() -> Product {
        let mut specs = BTreeMap::new();
        specs.insert("RAM".to_string(), "8GB".to_string());
        specs.insert("storage".to_string(), "128GB".to_string());
        specs.insert("battery".to_string(), "5000mAh".to_string());

        Product {
            id: "alpha-5g".to_string(),
            name: "Alpha 5G".to_string(),
            category: Category::Smartphone,
            brand: "Alpha".to_string(),
            price_inr: 24999,
            specs,
            rating: 4.4,
            tier: Some("budget".to_string()),
        }
    }

    #[test]
    fn substitutes_both_placeholders() {
        let (_dir, path) =
            write_template("Q: {{ user_message }}\nCatalog:\n{{ product_summary }}");
        let template = PromptTemplate::load(&path).expect("template load");

        let prompt = template.build("best phone", &[phone()]).expect("render");

        assert!(prompt.starts_with("Q: best phone\n"));
        assert!(prompt.contains("Alpha 5G (Alpha)"));
    }

    #[test]
    fn missing_template_file_is_fatal() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("absent.md");

        assert!(matches!(PromptTemplate::load(&path), Err(PromptError::Read { .. })));
    }

    #[test]
    fn unknown_placeholder_is_fatal_at_load() {
        let (_dir, path) = write_template("{{ user_message }} {{ no_such_variable }}");

        assert!(matches!(PromptTemplate::load(&path), Err(PromptError::Parse { .. })));
    }

    #[test]
    fn product_block_fills_missing_fields_with_na() {
        let mut product = phone();
        product.tier = None;
        product.specs.clear();

        let block = format_product(&product);

        assert!(block.contains("Tier: N/A"));
        assert!(block.contains("RAM: N/A"));
        assert!(block.contains("Camera: N/A"));
    }

    #[test]
    fn product_block_lists_known_specs() {
        let block = format_product(&phone());

        assert!(block.contains("\u{20b9}24999"));
        assert!(block.contains("RAM: 8GB"));
        assert!(block.contains("Storage: 128GB"));
        assert!(block.contains("Battery: 5000mAh"));
        assert!(block.contains("Processor: N/A"));
    }
}
