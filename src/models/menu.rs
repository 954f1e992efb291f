//! Weekly menu and per-day totals.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::Macro;

/// Products served on one named day, in serving order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMenu {
    /// Day name (e.g., "Monday")
    pub day: String,

    /// Product ids; integers in the config file are accepted and string-ified
    #[serde(deserialize_with = "de_product_ids")]
    pub products: Vec<String>,
}

impl DayMenu {
    pub fn new<I, S>(day: impl Into<String>, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self {
            day: day.into(),
            products: products.into_iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Ordered mapping from day name to the products eaten that day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Menu {
    days: Vec<DayMenu>,
}

impl Menu {
    pub fn new(days: Vec<DayMenu>) -> Self {
        Self { days }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayMenu> {
        self.days.iter()
    }

    /// Look up a day by its exact name.
    pub fn get(&self, day: &str) -> Option<&DayMenu> {
        self.days.iter().find(|d| d.day == day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<DayMenu> for Menu {
    fn from_iter<I: IntoIterator<Item = DayMenu>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

fn de_product_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<RawId> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|id| match id {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        })
        .collect())
}

/// Price and macro totals for one day of the menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotal {
    pub day: String,

    /// Product names in serving order
    pub menu: Vec<String>,

    pub price: f64,

    #[serde(rename = "macro")]
    pub macros: Macro,
}

impl DayTotal {
    /// Human-readable report line for this day.
    pub fn format(&self, currency: &str) -> String {
        format!(
            "On {} the menu is: {} - {:.2} {}: \n{}.",
            self.day,
            self.menu.join(", "),
            self.price,
            currency,
            self.macros
        )
    }
}
