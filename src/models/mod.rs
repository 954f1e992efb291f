// src/models/mod.rs

//! Domain models for the scraper.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod catalog;
mod config;
mod menu;
mod product;
mod program;
mod targets;

// Re-export all public types
pub use catalog::Catalog;
pub use config::{
    BasketConfig, Config, CrawlerConfig, ExtractionConfig, MacroLabels, MacroLayout, PatternConfig,
    PricingConfig, ProgramConfig, SiteConfig, SiteSelectors,
};
pub use menu::{DayMenu, DayTotal, Menu};
pub use product::{ListingEntry, Macro, Product};
pub use program::{ProgramFood, ProgramMenu};
pub use targets::{DailyTargets, ScaledSupplement, Supplement};
