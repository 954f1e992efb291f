// src/pipeline/report.rs

//! Catalog and menu report pipeline.

use std::sync::Arc;

use reqwest::Client;

use crate::error::Result;
use crate::models::{Catalog, Config, DayTotal};
use crate::services::aggregate::aggregate_day;
use crate::services::targets::check_day;
use crate::services::{CatalogCrawler, HttpSource, SiteExtractor};

/// Scrape the catalog and print one line per product.
pub async fn run_catalog(config: Arc<Config>, client: &Client) -> Result<Catalog> {
    let extractor = Arc::new(SiteExtractor::from_config(&config)?);
    let source = Arc::new(HttpSource::new(client.clone()));
    let crawler = CatalogCrawler::new(Arc::clone(&config), source, extractor);

    let catalog = crawler.build(config.pricing.off).await?;
    for product in catalog.sorted() {
        println!("{}", product.summary(&config.site.currency));
    }
    log::info!("Catalog holds {} products", catalog.len());
    Ok(catalog)
}

/// Scrape the catalog and print the totals for every menu day.
///
/// Days are reported in menu order; a day referencing an unknown product
/// aborts the report.
pub async fn run_report(config: Arc<Config>, client: &Client) -> Result<Vec<DayTotal>> {
    let catalog = run_catalog(Arc::clone(&config), client).await?;
    report_menu(&config, &catalog)
}

/// Print the totals for every menu day from an already built catalog.
pub fn report_menu(config: &Config, catalog: &Catalog) -> Result<Vec<DayTotal>> {
    let mut totals = Vec::with_capacity(config.menu.len());
    for day in config.menu.iter() {
        let total = aggregate_day(catalog, day)?;
        println!("{}", total.format(&config.site.currency));

        if let Some(targets) = config.targets {
            for line in check_day(&total, targets, &config.supplements).lines() {
                println!("{line}");
            }
        }
        totals.push(total);
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{DayMenu, Macro, Menu, Product};

    fn catalog() -> Catalog {
        vec![
            Product {
                id: "10".to_string(),
                slug: "a".to_string(),
                name: "A".to_string(),
                price: 10.0,
                macros: Macro::from_ordered(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            },
            Product {
                id: "20".to_string(),
                slug: "b".to_string(),
                name: "B".to_string(),
                price: 20.0,
                macros: Macro::from_ordered(&[2.0, 4.0, 6.0, 8.0, 10.0, 12.0]),
            },
        ]
        .into_iter()
        .collect()
    }

    fn config(days: Vec<DayMenu>) -> Config {
        Config {
            menu: Menu::new(days),
            ..Config::default()
        }
    }

    #[test]
    fn test_report_keeps_menu_order() {
        let config = config(vec![
            DayMenu::new("Tuesday", [20]),
            DayMenu::new("Monday", [10, 20]),
        ]);
        let totals = report_menu(&config, &catalog()).unwrap();

        let days: Vec<&str> = totals.iter().map(|t| t.day.as_str()).collect();
        assert_eq!(days, vec!["Tuesday", "Monday"]);
        assert_eq!(totals[1].price, 30.0);
        assert_eq!(
            totals[1].format("Lei"),
            "On Monday the menu is: A, B - 30.00 Lei: \n\
             {\"grams\":3,\"kcal\":6,\"carbohydrates\":9,\"fats\":12,\"proteins\":15,\"fibers\":18}."
        );
    }

    #[test]
    fn test_report_is_repeatable() {
        let config = config(vec![DayMenu::new("Monday", [10, 20])]);
        let catalog = catalog();
        assert_eq!(
            report_menu(&config, &catalog).unwrap(),
            report_menu(&config, &catalog).unwrap()
        );
    }

    #[test]
    fn test_lookup_miss_aborts_report() {
        let config = config(vec![
            DayMenu::new("Monday", [10]),
            DayMenu::new("Tuesday", [99]),
            DayMenu::new("Wednesday", [20]),
        ]);
        assert!(matches!(
            report_menu(&config, &catalog()),
            Err(AppError::Lookup { .. })
        ));
    }
}
