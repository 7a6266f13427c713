//! Product catalog loading and filter queries

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// A product record from the catalog
///
/// Immutable once loaded. The selection set stores snapshot copies of these,
/// keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique, stable identifier
    pub id: u32,
    pub name: String,
    pub brand: String,
    pub category: String,
    /// Image reference (path or URL), opaque to this crate
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// On-disk catalog document: a mapping with a "products" sequence
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// The full product list, loaded once at startup
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Load the catalog from a JSON document
    ///
    /// A read or parse failure is an error for the caller to surface; it is
    /// never fatal to the process.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).context(format!("Failed to read catalog: {}", path.display()))?;
        let file: CatalogFile =
            serde_json::from_str(&content).context(format!("Failed to parse catalog: {}", path.display()))?;

        info!(count = file.products.len(), "Catalog loaded");
        Ok(Self { products: file.products })
    }

    /// Build a catalog from an in-memory product list
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in catalog order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id
    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(product.category.as_str());
            }
        }
        seen
    }

    /// Filter by category equality and case-insensitive substring search
    ///
    /// An empty or whitespace-only search term applies no search constraint.
    /// The search term matches against name, brand, or description; a missing
    /// description never matches. Both constraints are AND-ed and catalog
    /// order is preserved.
    pub fn filter(&self, category: Option<&str>, search: Option<&str>) -> Vec<&Product> {
        let term = search.map(str::trim).filter(|t| !t.is_empty()).map(str::to_lowercase);
        debug!(?category, ?term, "Catalog::filter");

        self.products
            .iter()
            .filter(|p| match category {
                Some(c) if !c.is_empty() => p.category == c,
                _ => true,
            })
            .filter(|p| match &term {
                Some(t) => {
                    p.name.to_lowercase().contains(t)
                        || p.brand.to_lowercase().contains(t)
                        || p.description.as_ref().is_some_and(|d| d.to_lowercase().contains(t))
                }
                None => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32, name: &str, brand: &str, category: &str, description: Option<&str>) -> Product {
        Product {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
            image: format!("img/{}.png", id),
            description: description.map(str::to_string),
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::from_products(vec![
            product(1, "Cleanser", "X", "skincare", None),
            product(2, "Day Cream", "Lumina", "skincare", Some("A moisturizing day cream")),
            product(3, "Volume Shampoo", "Lumina", "haircare", None),
        ])
    }

    #[test]
    fn test_filter_category_and_search() {
        let catalog = Catalog::from_products(vec![product(1, "Cleanser", "X", "skincare", None)]);

        let hits = catalog.filter(Some("skincare"), Some("clean"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        let hits = catalog.filter(Some("skincare"), Some("moistur"));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let catalog = sample_catalog();
        let hits = catalog.filter(None, Some("CLEANSER"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn test_filter_matches_brand_and_description() {
        let catalog = sample_catalog();

        // Brand matches across categories
        let hits = catalog.filter(None, Some("lumina"));
        assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 3]);

        // Description matches, but only where present
        let hits = catalog.filter(None, Some("moistur"));
        assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_filter_blank_search_is_no_constraint() {
        let catalog = sample_catalog();
        assert_eq!(catalog.filter(None, Some("   ")).len(), 3);
        assert_eq!(catalog.filter(None, Some("")).len(), 3);
        assert_eq!(catalog.filter(None, None).len(), 3);
    }

    #[test]
    fn test_filter_category_only() {
        let catalog = sample_catalog();
        let hits = catalog.filter(Some("haircare"), None);
        assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = sample_catalog();
        assert_eq!(catalog.categories(), vec!["skincare", "haircare"]);
    }

    #[test]
    fn test_get_by_id() {
        let catalog = sample_catalog();
        assert_eq!(catalog.get(3).map(|p| p.name.as_str()), Some("Volume Shampoo"));
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn test_load_parses_products_document() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("products.json");
        std::fs::write(
            &path,
            r#"{"products": [{"id": 1, "name": "Cleanser", "brand": "X", "category": "skincare", "image": "img/1.png"}]}"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.products().len(), 1);
        assert!(catalog.products()[0].description.is_none());
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(Catalog::load(temp.path().join("nope.json")).is_err());
    }
}
