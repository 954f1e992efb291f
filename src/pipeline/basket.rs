// src/pipeline/basket.rs

//! Basket filling pipeline.

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::Client;

use crate::error::Result;
use crate::models::Config;
use crate::services::{BasketFiller, FillOutcome};

/// Fill the basket for `days` menu days from `start` and apply `code`.
pub async fn run_basket(
    config: Arc<Config>,
    client: &Client,
    days: u32,
    start: NaiveDate,
    code: &str,
) -> Result<FillOutcome> {
    let filler = BasketFiller::new(Arc::clone(&config), client.clone());
    let outcome = filler.fill(&config.menu, days, start, code).await?;

    if outcome.failures > 0 {
        log::warn!(
            "{} of {} basket requests failed",
            outcome.failures,
            outcome.requests
        );
    } else {
        log::info!(
            "Basket filled for {} day(s) with {} request(s)",
            outcome.days_filled,
            outcome.requests
        );
    }
    Ok(outcome)
}
