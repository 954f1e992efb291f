// src/pipeline/program.rs

//! Fitness program menu pipeline.

use reqwest::Client;
use scraper::Html;

use crate::error::Result;
use crate::models::{Config, ProgramMenu};
use crate::services::{ProgramExtractor, targets::check_day};
use crate::utils::http;

/// Fetch today's menu of the configured program, print it and check it
/// against the daily targets.
pub async fn run_program(config: &Config, client: &Client) -> Result<ProgramMenu> {
    let extractor = ProgramExtractor::from_config(config)?;

    let page_url = config.site_url(&config.program.page_path)?;
    log::info!("Fetching program page {}", page_url);
    let page = http::fetch_text(client, &page_url).await?;
    let args = extractor.parse_details_args(&Html::parse_document(&page))?;
    log::debug!("Program day {:?}", args);

    let menu_url = config.site_url(&config.program.menu_path)?;
    let body = http::post_form_text(client, &menu_url, &args.form()).await?;
    let menu = extractor.parse_menu(&Html::parse_document(&body), &args.date)?;
    log::info!("Program menu for {} has {} food(s)", menu.date, menu.foods.len());

    println!("{}", menu);
    match config.targets {
        Some(targets) => {
            let check = check_day(&menu.day_total(), targets, &config.supplements);
            for line in check.lines() {
                println!("{}", line);
            }
        }
        None => log::warn!("No [targets] configured; skipping the target check"),
    }
    Ok(menu)
}
