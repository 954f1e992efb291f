// src/services/targets.rs

//! Daily target checks.
//!
//! Compares a day's totals against kcal and protein goals and, when the day
//! falls short on energy, scales supplementary foods to cover the gap.

use serde::Serialize;

use crate::models::{DailyTargets, DayTotal, ScaledSupplement, Supplement};

/// Outcome of checking one day against the targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetCheck {
    pub day: String,
    pub kcal: f64,
    pub proteins: f64,
    pub targets: DailyTargets,

    /// Foods added to close the kcal gap (empty when the goal is met)
    pub top_up: Vec<ScaledSupplement>,
}

impl TargetCheck {
    pub fn kcal_delta(&self) -> f64 {
        self.kcal - self.targets.kcal
    }

    pub fn proteins_delta(&self) -> f64 {
        self.proteins - self.targets.proteins
    }

    /// kcal after the top-up foods are added.
    pub fn topped_up_kcal(&self) -> f64 {
        self.kcal + self.top_up.iter().map(|s| s.kcal).sum::<f64>()
    }

    /// Proteins after the top-up foods are added.
    pub fn topped_up_proteins(&self) -> f64 {
        self.proteins + self.top_up.iter().map(|s| s.proteins).sum::<f64>()
    }

    /// Human-readable report lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "{}: {:.0} of {:.0} kcal ({:+.0}), {:.0} of {:.0}g proteins ({:+.0})",
                self.day,
                self.kcal,
                self.targets.kcal,
                self.kcal_delta(),
                self.proteins,
                self.targets.proteins,
                self.proteins_delta()
            ),
        ];
        for food in &self.top_up {
            lines.push(format!(
                "    add {:.0}g of {} ({:.0} kcal, {:.0}g proteins)",
                food.grams, food.name, food.kcal, food.proteins
            ));
        }
        if !self.top_up.is_empty() {
            lines.push(format!(
                "    with top-up: {:.0} kcal, {:.0}g proteins",
                self.topped_up_kcal(),
                self.topped_up_proteins()
            ));
        }
        lines
    }
}

/// Check a day against the targets, scaling supplements to cover any kcal deficit.
///
/// Each supplement covers `weight` of the deficit; supplements without a
/// weight share the deficit evenly.
pub fn check_day(total: &DayTotal, targets: DailyTargets, supplements: &[Supplement]) -> TargetCheck {
    let kcal = total.macros.kcal;
    let deficit = targets.kcal - kcal;

    let top_up = if deficit > 0.0 && !supplements.is_empty() {
        let even = 1.0 / supplements.len() as f64;
        supplements
            .iter()
            .map(|food| {
                let scale = food.weight.unwrap_or(even) * deficit / food.kcal;
                ScaledSupplement {
                    name: food.name.clone(),
                    grams: (food.grams * scale).round(),
                    kcal: (food.kcal * scale).round(),
                    proteins: (food.proteins * scale).round(),
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    TargetCheck {
        day: total.day.clone(),
        kcal,
        proteins: total.macros.proteins,
        targets,
        top_up,
    }
}
