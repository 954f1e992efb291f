//! Daily menu of a site fitness program.

use std::fmt;

use serde::Serialize;

use crate::models::{DayTotal, Macro};

/// One food of a program day, as listed in the menu details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramFood {
    pub description: String,
    pub grams: f64,
    pub kcal: f64,
    pub proteins: f64,
}

impl fmt::Display for ProgramFood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}g)", self.description, self.grams)?;
        writeln!(f, "Calories: {} kcals", self.kcal)?;
        writeln!(f, "Proteins: {}g", self.proteins)
    }
}

/// The foods a program serves on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramMenu {
    /// Date as published by the site (`YYYY-MM-DD`)
    pub date: String,
    pub foods: Vec<ProgramFood>,
}

impl ProgramMenu {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            foods: Vec::new(),
        }
    }

    pub fn total_kcal(&self) -> f64 {
        self.foods.iter().map(|food| food.kcal).sum()
    }

    pub fn total_proteins(&self) -> f64 {
        self.foods.iter().map(|food| food.proteins).sum()
    }

    /// Day totals for the target check.
    ///
    /// The menu details carry no price, carbohydrates, fats or fibers; price
    /// is zero and the missing macros are NaN.
    pub fn day_total(&self) -> DayTotal {
        DayTotal {
            day: self.date.clone(),
            menu: self.foods.iter().map(|food| food.description.clone()).collect(),
            price: 0.0,
            macros: Macro {
                grams: self.foods.iter().map(|food| food.grams).sum(),
                kcal: self.total_kcal(),
                carbohydrates: f64::NAN,
                fats: f64::NAN,
                proteins: self.total_proteins(),
                fibers: f64::NAN,
            },
        }
    }
}

impl fmt::Display for ProgramMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(60);
        writeln!(f, "Menu for date {}", self.date)?;
        writeln!(f, "{rule}")?;
        for food in &self.foods {
            write!(f, "{food}")?;
            writeln!(f, "{rule}")?;
        }
        writeln!(f, "Total menu calories {} kcals", self.total_kcal())?;
        write!(f, "Total menu proteins {}g", self.total_proteins())
    }
}
