//! Menu aggregation.
//!
//! Sums price and macros per menu day from a scraped catalog.

use crate::error::{AppError, Result};
use crate::models::{Catalog, DayMenu, DayTotal, Macro};

/// Total one day of the menu.
///
/// Fails with a lookup error when the day references a product that is not
/// in the catalog.
pub fn aggregate_day(catalog: &Catalog, day: &DayMenu) -> Result<DayTotal> {
    let mut total = DayTotal {
        day: day.day.clone(),
        menu: Vec::with_capacity(day.products.len()),
        price: 0.0,
        macros: Macro::default(),
    };

    for id in &day.products {
        let product = catalog
            .get(id)
            .ok_or_else(|| AppError::lookup(&day.day, id))?;
        total.menu.push(product.name.clone());
        total.price += product.price;
        total.macros += product.macros;
    }

    Ok(total)
}
