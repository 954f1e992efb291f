// src/services/extract.rs

//! Page extraction strategies.
//!
//! Turns parsed listing and product pages into `ListingEntry` and `Product`
//! values. The site-specific selectors and regexes live behind the
//! `PageExtractor` trait so they can be swapped and tested offline.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Config, ListingEntry, Macro, MacroLabels, MacroLayout, Product, SiteSelectors};
use crate::utils::{element_text, last_path_segment, parse_decimal};

/// Number of numeric tokens a complete product page yields (price + 6 macros).
pub const EXPECTED_TOKENS: usize = 7;

/// Extraction strategy for the listing and product pages.
pub trait PageExtractor: Send + Sync {
    /// Extract `(slug, id)` pairs from the listing page, in document order.
    ///
    /// A slug seen twice keeps its first position and takes the later id.
    fn extract_listing(&self, document: &Html) -> Result<Vec<ListingEntry>>;

    /// Extract one product from its detail page, applying an `off` percent discount.
    fn extract_product(&self, document: &Html, entry: &ListingEntry, off: f64) -> Result<Product>;
}

/// Apply a percentage discount to a raw price.
pub fn apply_discount(raw_price: f64, off: f64) -> f64 {
    raw_price * (100.0 - off) / 100.0
}

/// Extractor for the meal-delivery site's markup.
pub struct SiteExtractor {
    sources: SiteSelectors,
    listing_item: Selector,
    title_link: Selector,
    cart_button: Selector,
    price_and_macros: Selector,
    price: Selector,
    macro_rows: Selector,
    product_name: Selector,
    cart_call: Regex,
    value: Regex,
    layout: MacroLayout,
    labels: MacroLabels,
}

impl SiteExtractor {
    /// Compile selectors and patterns from the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let s = &config.selectors;
        Ok(Self {
            listing_item: parse_selector(&s.listing_item)?,
            title_link: parse_selector(&s.title_link)?,
            cart_button: parse_selector(&s.cart_button)?,
            price_and_macros: parse_selector(&s.price_and_macros)?,
            price: parse_selector(&s.price)?,
            macro_rows: parse_selector(&s.macro_rows)?,
            product_name: parse_selector(&s.product_name)?,
            cart_call: Regex::new(&config.patterns.cart_call)?,
            value: Regex::new(&config.patterns.value)?,
            layout: config.extraction.macro_layout,
            labels: config.extraction.labels.clone(),
            sources: s.clone(),
        })
    }

    fn parse_listing_item(&self, item: &ElementRef<'_>) -> Result<ListingEntry> {
        let link = item
            .select(&self.title_link)
            .next()
            .ok_or_else(|| missing("listing item", &self.sources.title_link))?;
        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| AppError::extract("listing item", "title link has no href"))?;
        let slug = last_path_segment(href).ok_or_else(|| {
            AppError::extract("listing item", format!("href '{href}' has no path segment"))
        })?;

        let button = item
            .select(&self.cart_button)
            .next()
            .ok_or_else(|| missing("listing item", &self.sources.cart_button))?;
        let call = button.value().attr(&self.sources.cart_attr).ok_or_else(|| {
            AppError::extract(
                format!("listing item '{slug}'"),
                format!("cart control has no '{}' attribute", self.sources.cart_attr),
            )
        })?;
        let id = self
            .cart_call
            .captures(call)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| {
                AppError::extract(
                    format!("listing item '{slug}'"),
                    format!("no product id in '{call}'"),
                )
            })?;

        Ok(ListingEntry {
            slug: slug.to_string(),
            id: id.as_str().to_string(),
        })
    }

    /// Numeric tokens of the given elements, one per matching text line.
    fn numeric_tokens<'a>(&self, elements: impl Iterator<Item = ElementRef<'a>>) -> Vec<f64> {
        elements
            .map(|el| element_text(&el))
            .collect::<Vec<_>>()
            .iter()
            .flat_map(|text| text.lines())
            .filter_map(|line| self.first_number(line))
            .collect()
    }

    fn first_number(&self, text: &str) -> Option<f64> {
        self.value
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_decimal(m.as_str()))
    }

    fn positional(&self, document: &Html, context: &str) -> (f64, Macro) {
        let tokens = self.numeric_tokens(document.select(&self.price_and_macros));
        if tokens.len() < EXPECTED_TOKENS {
            log::warn!(
                "{}: found {} numeric values, expected {}; missing fields are NaN",
                context,
                tokens.len(),
                EXPECTED_TOKENS
            );
        }
        let raw_price = tokens.first().copied().unwrap_or(f64::NAN);
        let macros = Macro::from_ordered(tokens.get(1..).unwrap_or(&[]));
        (raw_price, macros)
    }

    fn labeled(&self, document: &Html, context: &str) -> (f64, Macro) {
        let raw_price = self
            .numeric_tokens(document.select(&self.price))
            .first()
            .copied()
            .unwrap_or(f64::NAN);

        let fields = [
            &self.labels.grams,
            &self.labels.kcal,
            &self.labels.carbohydrates,
            &self.labels.fats,
            &self.labels.proteins,
            &self.labels.fibers,
        ];
        let mut values = [f64::NAN; 6];
        for row in document.select(&self.macro_rows) {
            let text = element_text(&row);
            let caption = text.to_lowercase();
            let Some(slot) = fields.iter().enumerate().position(|(i, keywords)| {
                values[i].is_nan() && keywords.iter().any(|k| caption.contains(k.as_str()))
            }) else {
                log::debug!("{}: unlabeled macro row '{}'", context, text.trim());
                continue;
            };
            if let Some(value) = text.lines().find_map(|line| self.first_number(line)) {
                values[slot] = value;
            }
        }

        let macros = Macro::from_ordered(&values);
        if !macros.is_complete() {
            log::warn!("{}: some macro rows were not found; missing fields are NaN", context);
        }
        (raw_price, macros)
    }
}

impl PageExtractor for SiteExtractor {
    fn extract_listing(&self, document: &Html) -> Result<Vec<ListingEntry>> {
        let mut entries: Vec<ListingEntry> = Vec::new();
        for item in document.select(&self.listing_item) {
            let entry = self.parse_listing_item(&item)?;
            match entries.iter_mut().find(|e| e.slug == entry.slug) {
                Some(existing) => {
                    log::debug!(
                        "Slug '{}' listed again; id {} replaces {}",
                        entry.slug,
                        entry.id,
                        existing.id
                    );
                    existing.id = entry.id;
                }
                None => entries.push(entry),
            }
        }
        Ok(entries)
    }

    fn extract_product(&self, document: &Html, entry: &ListingEntry, off: f64) -> Result<Product> {
        let context = format!("product '{}'", entry.slug);
        let name = document
            .select(&self.product_name)
            .next()
            .map(|el| element_text(&el).trim().to_string())
            .ok_or_else(|| missing(&context, &self.sources.product_name))?;

        let (raw_price, macros) = match self.layout {
            MacroLayout::Positional => self.positional(document, &context),
            MacroLayout::Labeled => self.labeled(document, &context),
        };

        Ok(Product {
            id: entry.id.clone(),
            slug: entry.slug.clone(),
            name,
            price: apply_discount(raw_price, off),
            macros,
        })
    }
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

pub(crate) fn missing(context: impl Into<String>, selector: &str) -> AppError {
    AppError::extract(context, format!("no element matches '{selector}'"))
}
