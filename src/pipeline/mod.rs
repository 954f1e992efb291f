//! Pipeline entry points.
//!
//! - `run_catalog`: Scrape the listing and every product page
//! - `run_report`: Catalog plus per-day menu totals
//! - `run_basket`: Fill the site basket for the menu
//! - `run_program`: Today's fitness program menu checked against the targets

pub mod basket;
pub mod program;
pub mod report;

pub use basket::run_basket;
pub use program::run_program;
pub use report::{report_menu, run_catalog, run_report};
