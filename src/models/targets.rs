//! Daily nutrition targets and supplementary foods.

use serde::{Deserialize, Serialize};

/// Daily energy and protein goals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTargets {
    pub kcal: f64,
    pub proteins: f64,
}

/// A food that can be added on top of the menu to reach the daily goal.
///
/// Nutrition values are given for `grams` grams of the food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplement {
    pub name: String,
    pub grams: f64,
    pub kcal: f64,
    pub proteins: f64,

    /// Share of the calorie deficit this food covers. Defaults to an even split.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// A supplement scaled to cover its share of a calorie deficit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledSupplement {
    pub name: String,
    pub grams: f64,
    pub kcal: f64,
    pub proteins: f64,
}
