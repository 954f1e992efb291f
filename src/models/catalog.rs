//! Product catalog keyed by product id.

use std::collections::HashMap;

use crate::models::Product;

/// Mapping from product id to the scraped product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: HashMap<String, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product, replacing any previous product with the same id.
    pub fn insert(&mut self, product: Product) -> Option<Product> {
        self.products.insert(product.id.clone(), product)
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products ordered by numeric id (shorter ids first, then lexically).
    pub fn sorted(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.values().collect();
        products.sort_by(|a, b| (a.id.len(), &a.id).cmp(&(b.id.len(), &b.id)));
        products
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for product in iter {
            catalog.insert(product);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Macro;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            slug: name.to_lowercase(),
            name: name.to_string(),
            price: 1.0,
            macros: Macro::default(),
        }
    }

    #[test]
    fn test_collect_and_lookup() {
        let catalog: Catalog = vec![product("10", "A"), product("9", "B")]
            .into_iter()
            .collect();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("10").map(|p| p.name.as_str()), Some("A"));
        assert!(catalog.get("99").is_none());
    }

    #[test]
    fn test_sorted_is_numeric() {
        let catalog: Catalog = vec![product("100", "C"), product("10", "A"), product("9", "B")]
            .into_iter()
            .collect();
        let ids: Vec<&str> = catalog.sorted().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["9", "10", "100"]);
    }
}
