//! Product catalog loaded from a JSON file at startup.
//!
//! The file holds an array of products. Prices are decimal strings so they
//! survive JSON without float rounding:
//!
//! ```json
//! [
//!   { "id": 1, "title": "Tênis de Caminhada Leve Confortável", "price": "179.90",
//!     "image": "https://images.example.com/1.jpg" }
//! ]
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use rocketshoes_core::{Product, ProductId};
use thiserror::Error;

/// Errors loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id {0} in catalog")]
    DuplicateId(ProductId),
}

/// Products available in the store, in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a valid product
    /// list, or repeats a product ID.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&raw)?;
        tracing::info!(
            products = catalog.products.len(),
            path = %path.display(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse the catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// See [`Catalog::load`].
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(raw)?;
        Self::from_products(products)
    }

    /// Build the catalog from a product list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an ID.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    const SAMPLE: &str = r#"[
        {"id": 1, "title": "Tênis de Caminhada", "price": "179.90", "image": "https://images.example.com/1.jpg"},
        {"id": 2, "title": "Tênis VR Caminhada", "price": "139.90", "image": "https://images.example.com/2.jpg"}
    ]"#;

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.products().len(), 2);

        let product = catalog.get(ProductId::new(1)).unwrap();
        assert_eq!(product.title, "Tênis de Caminhada");
        assert_eq!(product.price, Decimal::new(17_990, 2));
        assert!(catalog.get(ProductId::new(3)).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let raw = r#"[
            {"id": 1, "title": "A", "price": "1.00", "image": "a.jpg"},
            {"id": 1, "title": "B", "price": "2.00", "image": "b.jpg"}
        ]"#;
        assert!(matches!(
            Catalog::from_json(raw),
            Err(CatalogError::DuplicateId(id)) if id == ProductId::new(1)
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = Catalog::load(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_bundled_catalog_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("content/products.json");
        let catalog = Catalog::load(&path).unwrap();
        assert!(!catalog.products().is_empty());
    }
}
