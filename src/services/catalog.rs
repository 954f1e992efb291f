// src/services/catalog.rs

//! Catalog crawler service.
//!
//! Indexes the product listing page and fetches every product page to build
//! the `Catalog`.

use std::sync::Arc;

use futures::future::try_join_all;
use scraper::Html;

use crate::error::Result;
use crate::models::{Catalog, Config, ListingEntry, Product};
use crate::services::{PageExtractor, PageSource};

/// Service for building the product catalog.
pub struct CatalogCrawler {
    config: Arc<Config>,
    source: Arc<dyn PageSource>,
    extractor: Arc<dyn PageExtractor>,
}

impl CatalogCrawler {
    pub fn new(
        config: Arc<Config>,
        source: Arc<dyn PageSource>,
        extractor: Arc<dyn PageExtractor>,
    ) -> Self {
        Self {
            config,
            source,
            extractor,
        }
    }

    /// Fetch the listing page and extract `(slug, id)` pairs.
    pub async fn index(&self) -> Result<Vec<ListingEntry>> {
        let url = self.config.listing_url()?;
        let body = self.source.fetch(&url).await?;
        let document = Html::parse_document(&body);
        let entries = self.extractor.extract_listing(&document)?;
        log::info!("Indexed {} products from {}", entries.len(), url);
        Ok(entries)
    }

    /// Fetch one product page and extract the product.
    pub async fn fetch_product(&self, entry: &ListingEntry, off: f64) -> Result<Product> {
        let url = self.config.product_url(&entry.slug)?;
        let body = self.source.fetch(&url).await?;
        let document = Html::parse_document(&body);
        let product = self.extractor.extract_product(&document, entry, off)?;
        log::debug!("Extracted {} ({}) from {}", product.name, product.id, url);
        Ok(product)
    }

    /// Build the full catalog.
    ///
    /// Every product page is fetched concurrently; the first failure fails
    /// the whole build and no partial catalog is returned.
    pub async fn build(&self, off: f64) -> Result<Catalog> {
        log::info!("Getting information from all products.");
        let entries = self.index().await?;
        let products = try_join_all(entries.iter().map(|entry| self.fetch_product(entry, off))).await?;
        Ok(products.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;
    use crate::models::Macro;
    use crate::services::SiteExtractor;

    struct StaticSource {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageSource for StaticSource {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::extract(url, "page not found"))
        }
    }

    fn listing(items: &[(&str, u32)]) -> String {
        items
            .iter()
            .map(|(slug, id)| {
                format!(
                    r#"<div class="menu-item-wrap"><div class="content">
                         <h2><a href="/p/{slug}">{slug}</a></h2>
                         <a class="btn" onclick="adauga_in_cos({id}, 'produs')">+</a>
                       </div></div>"#
                )
            })
            .collect()
    }

    fn product(name: &str, price: u32, macros: [u32; 6]) -> String {
        let labels = ["Gramaj", "Energie", "Carbohidrati", "Grasimi", "Proteine", "Fibre"];
        let rows: String = labels
            .iter()
            .zip(macros)
            .map(|(label, value)| format!("<div>{label}: {value}</div>"))
            .collect();
        format!(
            r#"<div class="banner-text"><h1>{name}</h1></div>
               <div class="price">{price} Lei</div>
               <div class="amount-per-serving">{rows}</div>"#
        )
    }

    fn crawler(pages: Vec<(String, String)>) -> CatalogCrawler {
        let config = Arc::new(Config::default());
        let extractor = Arc::new(SiteExtractor::from_config(&config).unwrap());
        let source = Arc::new(StaticSource {
            pages: pages.into_iter().collect(),
        });
        CatalogCrawler::new(config, source, extractor)
    }

    #[tokio::test]
    async fn test_build_catalog() {
        let crawler = crawler(vec![
            (
                "https://fitfoodway.ro/produse".to_string(),
                listing(&[("a", 10), ("b", 20)]),
            ),
            (
                "https://fitfoodway.ro/p/a".to_string(),
                product("A", 10, [1, 2, 3, 4, 5, 6]),
            ),
            (
                "https://fitfoodway.ro/p/b".to_string(),
                product("B", 20, [2, 4, 6, 8, 10, 12]),
            ),
        ]);

        let catalog = crawler.build(0.0).await.unwrap();
        assert_eq!(catalog.len(), 2);
        let a = catalog.get("10").unwrap();
        assert_eq!(a.name, "A");
        assert_eq!(a.price, 10.0);
        assert_eq!(a.macros, Macro::from_ordered(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
        assert_eq!(catalog.get("20").unwrap().slug, "b");
    }

    #[tokio::test]
    async fn test_one_failed_page_fails_the_build() {
        let crawler = crawler(vec![
            (
                "https://fitfoodway.ro/produse".to_string(),
                listing(&[("a", 10), ("missing", 20)]),
            ),
            (
                "https://fitfoodway.ro/p/a".to_string(),
                product("A", 10, [1, 2, 3, 4, 5, 6]),
            ),
        ]);

        assert!(crawler.build(0.0).await.is_err());
    }

    #[tokio::test]
    async fn test_index_counts_items() {
        let crawler = crawler(vec![(
            "https://fitfoodway.ro/produse".to_string(),
            listing(&[("a", 10), ("b", 20), ("c", 30), ("a", 40)]),
        )]);

        let entries = crawler.index().await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, "40");
    }
}
