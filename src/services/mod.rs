//! Service layer for the scraper.
//!
//! This module contains the business logic for:
//! - Page fetching (`PageSource`, `HttpSource`)
//! - Listing and product extraction (`PageExtractor`, `SiteExtractor`)
//! - Catalog building (`CatalogCrawler`)
//! - Menu aggregation and target checks
//! - Fitness program menus (`ProgramExtractor`)
//! - Basket filling (`BasketFiller`)

pub mod aggregate;
mod basket;
mod catalog;
mod extract;
mod program;
mod source;
pub mod targets;

pub use basket::{BasketFiller, FillOutcome, menu_day_name, plan_days, weekly_product_count};
pub use catalog::CatalogCrawler;
pub use extract::{EXPECTED_TOKENS, PageExtractor, SiteExtractor, apply_discount};
pub use program::{ProgramArgs, ProgramExtractor};
pub use source::{HttpSource, PageSource};
