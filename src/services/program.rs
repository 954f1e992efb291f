// src/services/program.rs

//! Fitness program menu extraction.
//!
//! The program page carries a "details" control whose inline call names the
//! day's menu. Posting those arguments back returns a dialog listing each
//! food as a run of text nodes: a description, a quantity, the energy and the
//! proteins, in any order.

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Config, ProgramConfig, ProgramFood, ProgramMenu};
use crate::services::extract::{missing, parse_selector};
use crate::utils::parse_decimal;

/// Arguments identifying one program day on the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramArgs {
    pub id: String,
    pub date: String,
    pub program_id: String,
}

impl ProgramArgs {
    /// Form fields for the menu details request.
    pub fn form(&self) -> [(&str, &str); 3] {
        [
            ("id", self.id.as_str()),
            ("data", self.date.as_str()),
            ("program_id", self.program_id.as_str()),
        ]
    }
}

/// Extractor for the program page and its menu details.
pub struct ProgramExtractor {
    sources: ProgramConfig,
    details_button: Selector,
    menu_body: Selector,
    details_call: Regex,
    quantity: Regex,
    kcal: Regex,
    proteins: Regex,
    description: Regex,
}

impl ProgramExtractor {
    pub fn from_config(config: &Config) -> Result<Self> {
        let p = &config.program;
        Ok(Self {
            details_button: parse_selector(&p.details_button)?,
            menu_body: parse_selector(&p.menu_body)?,
            details_call: Regex::new(&p.details_call)?,
            quantity: Regex::new(&p.quantity_pattern)?,
            kcal: Regex::new(&p.kcal_pattern)?,
            proteins: Regex::new(&p.proteins_pattern)?,
            description: Regex::new(&p.description_pattern)?,
            sources: p.clone(),
        })
    }

    /// Read today's menu arguments from the first "details" control.
    pub fn parse_details_args(&self, document: &Html) -> Result<ProgramArgs> {
        let button = document
            .select(&self.details_button)
            .next()
            .ok_or_else(|| missing("program page", &self.sources.details_button))?;
        let call = button
            .value()
            .attr(&self.sources.details_attr)
            .ok_or_else(|| {
                AppError::extract(
                    "program page",
                    format!("details control has no '{}'", self.sources.details_attr),
                )
            })?;
        let caps = self.details_call.captures(call).ok_or_else(|| {
            AppError::extract("program page", format!("unexpected details call '{call}'"))
        })?;
        let group = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str().to_string())
                .ok_or_else(|| AppError::extract("program page", format!("details call lacks argument {i}")))
        };
        Ok(ProgramArgs {
            id: group(1)?,
            date: group(2)?,
            program_id: group(3)?,
        })
    }

    /// Parse the menu details dialog into the foods of `date`.
    ///
    /// The first text node is the dialog heading and is skipped. A food is
    /// emitted once its four fields have been seen; a field seen twice before
    /// that, or fields left over at the end, make the dialog unreadable.
    pub fn parse_menu(&self, document: &Html, date: &str) -> Result<ProgramMenu> {
        let body = document
            .select(&self.menu_body)
            .next()
            .ok_or_else(|| missing("menu details", &self.sources.menu_body))?;

        let mut menu = ProgramMenu::new(date);
        let mut pending = PendingFood::default();
        for slice in body.text().skip(1) {
            if let Some(description) = self.description_of(slice) {
                PendingFood::set(&mut pending.description, description, "description", slice)?;
            }
            if let Some(grams) = capture_number(&self.quantity, slice) {
                PendingFood::set(&mut pending.grams, grams, "quantity", slice)?;
            }
            if let Some(kcal) = capture_number(&self.kcal, slice) {
                PendingFood::set(&mut pending.kcal, kcal, "kcal", slice)?;
            }
            if let Some(proteins) = capture_number(&self.proteins, slice) {
                PendingFood::set(&mut pending.proteins, proteins, "proteins", slice)?;
            }
            if let Some(food) = pending.take_complete()? {
                log::debug!("Program food: {}", food.description);
                menu.foods.push(food);
            }
        }

        let leftover = pending.missing();
        if leftover.len() < 4 {
            return Err(AppError::extract(
                "menu details",
                format!("last food is incomplete; missing {}", leftover.join(", ")),
            ));
        }
        Ok(menu)
    }

    fn description_of(&self, slice: &str) -> Option<String> {
        if let Some(rest) = slice.strip_prefix("\n-") {
            return Some(rest.to_string());
        }
        self.description
            .is_match(slice)
            .then(|| slice.strip_prefix('\n').unwrap_or(slice).to_string())
    }
}

fn capture_number(regex: &Regex, slice: &str) -> Option<f64> {
    parse_decimal(regex.captures(slice)?.get(1)?.as_str())
}

/// Fields of the food currently being read.
#[derive(Default)]
struct PendingFood {
    description: Option<String>,
    grams: Option<f64>,
    kcal: Option<f64>,
    proteins: Option<f64>,
}

impl PendingFood {
    fn set<T>(field: &mut Option<T>, value: T, name: &str, slice: &str) -> Result<()> {
        if field.is_some() {
            return Err(AppError::extract(
                "menu details",
                format!("{name} seen twice for one food at {:?}", slice.trim()),
            ));
        }
        *field = Some(value);
        Ok(())
    }

    fn missing(&self) -> Vec<&'static str> {
        [
            (self.description.is_none(), "description"),
            (self.grams.is_none(), "quantity"),
            (self.kcal.is_none(), "kcal"),
            (self.proteins.is_none(), "proteins"),
        ]
        .into_iter()
        .filter_map(|(absent, name)| absent.then_some(name))
        .collect()
    }

    fn take_complete(&mut self) -> Result<Option<ProgramFood>> {
        if !self.missing().is_empty() {
            return Ok(None);
        }
        let taken = std::mem::take(self);
        let food = ProgramFood {
            description: taken.description.unwrap_or_default(),
            grams: taken.grams.unwrap_or_default(),
            kcal: taken.kcal.unwrap_or_default(),
            proteins: taken.proteins.unwrap_or_default(),
        };
        if food.description.trim().is_empty()
            || food.grams <= 0.0
            || food.kcal <= 0.0
            || food.proteins <= 0.0
        {
            return Err(AppError::extract(
                "menu details",
                format!("food {:?} has an empty or zero field", food.description),
            ));
        }
        Ok(Some(food))
    }
}
