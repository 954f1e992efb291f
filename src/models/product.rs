//! Product and macro-nutrient data structures.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Nutritional breakdown of one product or one day.
///
/// A field the product page did not expose is `NaN`, so any sum it takes
/// part in is `NaN` as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macro {
    pub grams: f64,
    pub kcal: f64,
    pub carbohydrates: f64,
    pub fats: f64,
    pub proteins: f64,
    pub fibers: f64,
}

impl Macro {
    /// Build a macro record from values in site order:
    /// grams, kcal, carbohydrates, fats, proteins, fibers.
    ///
    /// Missing trailing values become `NaN`.
    pub fn from_ordered(values: &[f64]) -> Self {
        let at = |i: usize| values.get(i).copied().unwrap_or(f64::NAN);
        Self {
            grams: at(0),
            kcal: at(1),
            carbohydrates: at(2),
            fats: at(3),
            proteins: at(4),
            fibers: at(5),
        }
    }

    /// Whether every field holds a real number.
    pub fn is_complete(&self) -> bool {
        [
            self.grams,
            self.kcal,
            self.carbohydrates,
            self.fats,
            self.proteins,
            self.fibers,
        ]
        .iter()
        .all(|v| !v.is_nan())
    }

    /// Render as a compact JSON object.
    ///
    /// Whole values print without a fraction and missing values as `null`.
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "grams": json_number(self.grams),
            "kcal": json_number(self.kcal),
            "carbohydrates": json_number(self.carbohydrates),
            "fats": json_number(self.fats),
            "proteins": json_number(self.proteins),
            "fibers": json_number(self.fibers),
        })
        .to_string()
    }
}

fn json_number(value: f64) -> serde_json::Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        serde_json::Value::from(value as i64)
    } else {
        serde_json::Value::from(value)
    }
}

impl Add for Macro {
    type Output = Macro;

    fn add(mut self, rhs: Macro) -> Macro {
        self += rhs;
        self
    }
}

impl AddAssign for Macro {
    fn add_assign(&mut self, rhs: Macro) {
        self.grams += rhs.grams;
        self.kcal += rhs.kcal;
        self.carbohydrates += rhs.carbohydrates;
        self.fats += rhs.fats;
        self.proteins += rhs.proteins;
        self.fibers += rhs.fibers;
    }
}

impl Sum for Macro {
    fn sum<I: Iterator<Item = Macro>>(iter: I) -> Self {
        iter.fold(Macro::default(), Add::add)
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

/// A product scraped from its detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Numeric site id, kept as a string
    pub id: String,

    /// URL slug the product was fetched from
    pub slug: String,

    /// Display name from the page heading
    pub name: String,

    /// Price after the run-time discount
    pub price: f64,

    /// Nutritional breakdown for one serving
    #[serde(rename = "macro")]
    pub macros: Macro,
}

impl Product {
    /// One-line summary used when listing the catalog.
    pub fn summary(&self, currency: &str) -> String {
        format!(
            "{} - {}: {:.2} {} => {}",
            self.id, self.name, self.price, currency, self.macros
        )
    }
}

/// One item of the product listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub slug: String,
    pub id: String,
}
