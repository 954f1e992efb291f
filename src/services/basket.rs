// src/services/basket.rs

//! Basket filling service.
//!
//! Walks calendar days from a start date, adds each weekday's menu to the
//! site basket and finally applies a discount code. Every request is
//! best-effort: failures are logged and the fill carries on.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use futures::future::join_all;
use reqwest::Client;

use crate::error::Result;
use crate::models::{Config, DayMenu, Menu};
use crate::utils::http;

/// Menu day name for a calendar weekday. Weekends have none.
pub fn menu_day_name(weekday: Weekday) -> Option<&'static str> {
    match weekday {
        Weekday::Mon => Some("Monday"),
        Weekday::Tue => Some("Tuesday"),
        Weekday::Wed => Some("Wednesday"),
        Weekday::Thu => Some("Thursday"),
        Weekday::Fri => Some("Friday"),
        Weekday::Sat | Weekday::Sun => None,
    }
}

const WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Number of products the menu orders over one Monday-Friday week.
pub fn weekly_product_count(menu: &Menu) -> usize {
    WEEKDAYS
        .iter()
        .filter_map(|w| menu_day_name(*w))
        .filter_map(|name| menu.get(name))
        .map(|day| day.products.len())
        .sum()
}

/// Calendar dates to order for, each paired with its menu day.
///
/// Steps one day at a time from `start`, taking every date whose weekday has
/// a menu entry, until `days` dates are collected.
pub fn plan_days(menu: &Menu, days: u32, start: NaiveDate) -> Vec<(NaiveDate, &DayMenu)> {
    if weekly_product_count(menu) == 0 {
        return Vec::new();
    }

    let mut plan = Vec::with_capacity(days as usize);
    let mut date = start;
    while plan.len() < days as usize {
        if let Some(day) = menu_day_name(date.weekday()).and_then(|name| menu.get(name)) {
            plan.push((date, day));
        }
        date += Duration::days(1);
    }
    plan
}

/// Summary of a basket fill.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FillOutcome {
    pub days_filled: usize,
    pub requests: usize,
    pub failures: usize,
    pub discount_applied: bool,
}

/// Service adding menu products to the site basket.
pub struct BasketFiller {
    config: Arc<Config>,
    client: Client,
}

impl BasketFiller {
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        Self { config, client }
    }

    /// Fill the basket for `days` menu days starting at `start`, then apply `code`.
    pub async fn fill(
        &self,
        menu: &Menu,
        days: u32,
        start: NaiveDate,
        code: &str,
    ) -> Result<FillOutcome> {
        let mut outcome = FillOutcome::default();
        if weekly_product_count(menu) == 0 {
            log::info!("Empty product list, nothing to add.");
            return Ok(outcome);
        }
        let plan = plan_days(menu, days, start);

        log::info!("Filling basket.");
        for (date, day) in plan {
            let results = join_all(day.products.iter().map(|id| self.add_product(date, id))).await;
            outcome.requests += results.len();
            outcome.failures += results.iter().filter(|ok| !**ok).count();
            outcome.days_filled += 1;
            log::info!("Added {} on {}.", day.products.join(","), date);
        }
        log::info!("Basket filled.");

        log::info!("Adding off code.");
        outcome.requests += 1;
        outcome.discount_applied = self.apply_discount_code(code).await;
        if !outcome.discount_applied {
            outcome.failures += 1;
        }
        Ok(outcome)
    }

    /// Add one product for one delivery date. Returns whether the request succeeded.
    pub async fn add_product(&self, date: NaiveDate, id: &str) -> bool {
        let basket = &self.config.basket;
        let date = date.format("%Y-%m-%d").to_string();
        let form = [
            ("tip_id", id),
            ("tip", basket.product_type.as_str()),
            ("date", date.as_str()),
        ];
        let context = format!(
            "Failed sending request for type:{}, id:{}, date:{}.",
            basket.product_type, id, date
        );
        self.post(&basket.add_path, &form, &context).await
    }

    /// Apply a discount code to the basket. Returns whether the request succeeded.
    pub async fn apply_discount_code(&self, code: &str) -> bool {
        let context = format!("Failed applying off code \"{code}\".");
        self.post(&self.config.basket.discount_path, &[("cod_reducere", code)], &context)
            .await
    }

    async fn post(&self, path: &str, form: &[(&str, &str)], context: &str) -> bool {
        let result = match self.config.site_url(path) {
            Ok(url) => http::post_form(&self.client, &url, form).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{} {}", context, e);
                false
            }
        }
    }
}
