//! Application configuration structures.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{DailyTargets, Menu, Supplement};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site endpoints
    #[serde(default)]
    pub site: SiteConfig,

    /// HTTP client settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// CSS selectors for the listing and product pages
    #[serde(default)]
    pub selectors: SiteSelectors,

    /// Regex patterns applied to scraped text
    #[serde(default)]
    pub patterns: PatternConfig,

    /// How macro rows are mapped onto fields
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Client-side price adjustments
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Weekly menu
    #[serde(default = "defaults::menu")]
    pub menu: Menu,

    /// Basket filling settings
    #[serde(default)]
    pub basket: BasketConfig,

    /// Site fitness program whose daily menu can be checked against the targets
    #[serde(default)]
    pub program: ProgramConfig,

    /// Optional daily goals to compare each day against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<DailyTargets>,

    /// Foods used to top up a day that falls short of the kcal goal
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supplements: Vec<Supplement>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration, falling back to defaults only when the file is missing.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(&path) {
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!(
                    "Config file {:?} not found. Using defaults.",
                    path.as_ref()
                );
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.site.base_url)?;
        if !self.site.product_path.contains("{slug}") {
            return Err(AppError::validation(
                "site.product_path must contain a {slug} placeholder",
            ));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == Some(0) {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if !(0.0..=100.0).contains(&self.pricing.off) {
            return Err(AppError::validation("pricing.off must be within 0..=100"));
        }
        if let Some(targets) = &self.targets {
            if targets.kcal <= 0.0 || targets.proteins < 0.0 {
                return Err(AppError::validation(
                    "targets.kcal must be > 0 and targets.proteins >= 0",
                ));
            }
        }
        for supplement in &self.supplements {
            if supplement.kcal <= 0.0 {
                return Err(AppError::validation(format!(
                    "supplement '{}' must have kcal > 0",
                    supplement.name
                )));
            }
        }
        if self.basket.discount_code.trim().is_empty() {
            return Err(AppError::validation("basket.discount_code is empty"));
        }

        regex::Regex::new(&self.patterns.value)?;
        self.program.validate()?;
        if regex::Regex::new(&self.patterns.cart_call)?.captures_len() < 2 {
            return Err(AppError::validation(
                "patterns.cart_call needs a capture group for the product id",
            ));
        }
        Ok(())
    }

    /// Absolute URL of the product listing page.
    pub fn listing_url(&self) -> Result<String> {
        self.site_url(&self.site.listing_path)
    }

    /// Absolute URL of a product detail page.
    pub fn product_url(&self, slug: &str) -> Result<String> {
        self.site_url(&self.site.product_path.replace("{slug}", slug))
    }

    /// Resolve a site-relative path against the base URL.
    pub fn site_url(&self, path: &str) -> Result<String> {
        let base = url::Url::parse(&self.site.base_url)?;
        Ok(base.join(path)?.to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            crawler: CrawlerConfig::default(),
            selectors: SiteSelectors::default(),
            patterns: PatternConfig::default(),
            extraction: ExtractionConfig::default(),
            pricing: PricingConfig::default(),
            menu: defaults::menu(),
            basket: BasketConfig::default(),
            program: ProgramConfig::default(),
            targets: None,
            supplements: Vec::new(),
        }
    }
}

/// Site endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Path of the product listing page
    #[serde(default = "defaults::listing_path")]
    pub listing_path: String,

    /// Path template of a product page; `{slug}` is substituted
    #[serde(default = "defaults::product_path")]
    pub product_path: String,

    /// Currency label used in reports
    #[serde(default = "defaults::currency")]
    pub currency: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            listing_path: defaults::listing_path(),
            product_path: defaults::product_path(),
            currency: defaults::currency(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; requests never time out when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
        }
    }
}

/// CSS selectors for the listing and product pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSelectors {
    /// Selector for each product on the listing page
    #[serde(default = "defaults::listing_item")]
    pub listing_item: String,

    /// Link to the product page within a listing item
    #[serde(default = "defaults::title_link")]
    pub title_link: String,

    /// "Add to cart" control within a listing item
    #[serde(default = "defaults::cart_button")]
    pub cart_button: String,

    /// Attribute on the cart control holding the inline call
    #[serde(default = "defaults::cart_attr")]
    pub cart_attr: String,

    /// Price element and macro rows on the product page, in document order
    #[serde(default = "defaults::price_and_macros")]
    pub price_and_macros: String,

    /// Price element alone, used by the labeled macro layout
    #[serde(default = "defaults::price")]
    pub price: String,

    /// Macro rows alone, used by the labeled macro layout
    #[serde(default = "defaults::macro_rows")]
    pub macro_rows: String,

    /// Heading holding the product display name
    #[serde(default = "defaults::product_name")]
    pub product_name: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            listing_item: defaults::listing_item(),
            title_link: defaults::title_link(),
            cart_button: defaults::cart_button(),
            cart_attr: defaults::cart_attr(),
            price_and_macros: defaults::price_and_macros(),
            price: defaults::price(),
            macro_rows: defaults::macro_rows(),
            product_name: defaults::product_name(),
        }
    }
}

/// Regex patterns applied to scraped text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Inline cart call; the first capture group is the product id
    #[serde(default = "defaults::cart_call")]
    pub cart_call: String,

    /// Numeric token; the first capture group is the value
    #[serde(default = "defaults::value")]
    pub value: String,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            cart_call: defaults::cart_call(),
            value: defaults::value(),
        }
    }
}

/// How macro rows on a product page map to macro fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroLayout {
    /// Price then grams, kcal, carbohydrates, fats, proteins, fibers by position
    #[default]
    Positional,
    /// Each row is matched to a field by its caption
    Labeled,
}

/// Macro extraction settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub macro_layout: MacroLayout,

    #[serde(default)]
    pub labels: MacroLabels,
}

/// Lowercase caption keywords identifying each macro row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroLabels {
    #[serde(default = "defaults::label_grams")]
    pub grams: Vec<String>,
    #[serde(default = "defaults::label_kcal")]
    pub kcal: Vec<String>,
    #[serde(default = "defaults::label_carbohydrates")]
    pub carbohydrates: Vec<String>,
    #[serde(default = "defaults::label_fats")]
    pub fats: Vec<String>,
    #[serde(default = "defaults::label_proteins")]
    pub proteins: Vec<String>,
    #[serde(default = "defaults::label_fibers")]
    pub fibers: Vec<String>,
}

impl Default for MacroLabels {
    fn default() -> Self {
        Self {
            grams: defaults::label_grams(),
            kcal: defaults::label_kcal(),
            carbohydrates: defaults::label_carbohydrates(),
            fats: defaults::label_fats(),
            proteins: defaults::label_proteins(),
            fibers: defaults::label_fibers(),
        }
    }
}

/// Client-side price adjustments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Discount percentage applied to every scraped price (0-100)
    #[serde(default = "defaults::off")]
    pub off: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            off: defaults::off(),
        }
    }
}

/// Basket filling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasketConfig {
    /// First calendar day to order for
    #[serde(default = "defaults::start_date")]
    pub start_date: NaiveDate,

    /// Number of menu days to order
    #[serde(default = "defaults::days")]
    pub days: u32,

    /// Discount code applied once the basket is filled
    #[serde(default = "defaults::discount_code")]
    pub discount_code: String,

    /// Item type sent with each add-to-cart request
    #[serde(default = "defaults::product_type")]
    pub product_type: String,

    #[serde(default = "defaults::add_path")]
    pub add_path: String,

    #[serde(default = "defaults::discount_path")]
    pub discount_path: String,
}

impl Default for BasketConfig {
    fn default() -> Self {
        Self {
            start_date: defaults::start_date(),
            days: defaults::days(),
            discount_code: defaults::discount_code(),
            product_type: defaults::product_type(),
            add_path: defaults::add_path(),
            discount_path: defaults::discount_path(),
        }
    }
}

/// A fitness program published by the site and how to read its daily menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramConfig {
    /// Program page holding today's "details" control
    #[serde(default = "defaults::program_path")]
    pub page_path: String,

    /// Endpoint returning the menu details for a day
    #[serde(default = "defaults::program_menu_path")]
    pub menu_path: String,

    /// "Details" control on the program page
    #[serde(default = "defaults::details_button")]
    pub details_button: String,

    /// Attribute of the control holding the inline call
    #[serde(default = "defaults::details_attr")]
    pub details_attr: String,

    /// Inline call; captures menu id, date and program id
    #[serde(default = "defaults::details_call")]
    pub details_call: String,

    /// Container of the menu details in the response
    #[serde(default = "defaults::menu_body")]
    pub menu_body: String,

    /// Food quantity in grams; first capture group is the value
    #[serde(default = "defaults::quantity_pattern")]
    pub quantity_pattern: String,

    /// Food energy; first capture group is the value
    #[serde(default = "defaults::kcal_pattern")]
    pub kcal_pattern: String,

    /// Food proteins; first capture group is the value
    #[serde(default = "defaults::proteins_pattern")]
    pub proteins_pattern: String,

    /// Text node naming a food ("Name: ingredients")
    #[serde(default = "defaults::description_pattern")]
    pub description_pattern: String,
}

impl ProgramConfig {
    fn validate(&self) -> Result<()> {
        let patterns = [
            (&self.details_call, 4, "program.details_call"),
            (&self.quantity_pattern, 2, "program.quantity_pattern"),
            (&self.kcal_pattern, 2, "program.kcal_pattern"),
            (&self.proteins_pattern, 2, "program.proteins_pattern"),
            (&self.description_pattern, 1, "program.description_pattern"),
        ];
        for (pattern, groups, name) in patterns {
            if regex::Regex::new(pattern)?.captures_len() < groups {
                return Err(AppError::validation(format!(
                    "{name} needs {} capture group(s)",
                    groups - 1
                )));
            }
        }
        Ok(())
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            page_path: defaults::program_path(),
            menu_path: defaults::program_menu_path(),
            details_button: defaults::details_button(),
            details_attr: defaults::details_attr(),
            details_call: defaults::details_call(),
            menu_body: defaults::menu_body(),
            quantity_pattern: defaults::quantity_pattern(),
            kcal_pattern: defaults::kcal_pattern(),
            proteins_pattern: defaults::proteins_pattern(),
            description_pattern: defaults::description_pattern(),
        }
    }
}

mod defaults {
    use chrono::NaiveDate;

    use crate::models::{DayMenu, Menu};

    // Site defaults
    pub fn base_url() -> String {
        "https://fitfoodway.ro".into()
    }
    pub fn listing_path() -> String {
        "/produse".into()
    }
    pub fn product_path() -> String {
        "/p/{slug}".into()
    }
    pub fn currency() -> String {
        "Lei".into()
    }

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; fitmenu/0.1)".into()
    }

    // Selector defaults
    pub fn listing_item() -> String {
        ".menu-item-wrap > div.content".into()
    }
    pub fn title_link() -> String {
        "h2 > a".into()
    }
    pub fn cart_button() -> String {
        "a.btn".into()
    }
    pub fn cart_attr() -> String {
        "onclick".into()
    }
    pub fn price_and_macros() -> String {
        ".price, div.amount-per-serving > div".into()
    }
    pub fn price() -> String {
        ".price".into()
    }
    pub fn macro_rows() -> String {
        "div.amount-per-serving > div".into()
    }
    pub fn product_name() -> String {
        ".banner-text h1".into()
    }

    // Pattern defaults
    pub fn cart_call() -> String {
        r"adauga_in_cos\((\d+),".into()
    }
    pub fn value() -> String {
        r"(\d+(?:[.,]\d+)?)".into()
    }

    // Label defaults
    fn labels(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }
    pub fn label_grams() -> Vec<String> {
        labels(&["gramaj", "cantitate"])
    }
    pub fn label_kcal() -> Vec<String> {
        labels(&["kcal", "energ", "calori"])
    }
    pub fn label_carbohydrates() -> Vec<String> {
        labels(&["carbohidra", "glucide"])
    }
    pub fn label_fats() -> Vec<String> {
        labels(&["grasimi", "grăsimi", "lipide"])
    }
    pub fn label_proteins() -> Vec<String> {
        labels(&["protein"])
    }
    pub fn label_fibers() -> Vec<String> {
        labels(&["fibre", "fibr"])
    }

    // Pricing defaults
    pub fn off() -> f64 {
        10.0
    }

    // Menu defaults
    pub fn menu() -> Menu {
        Menu::new(vec![
            DayMenu::new("Monday", [28, 39, 16, 24]),
            DayMenu::new("Tuesday", [28, 39, 16]),
            DayMenu::new("Wednesday", [28, 39, 16, 24]),
            DayMenu::new("Thursday", [28, 39, 16]),
            DayMenu::new("Friday", [28, 39, 16, 24]),
        ])
    }

    // Basket defaults
    pub fn start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 2, 6).unwrap_or_default()
    }
    pub fn days() -> u32 {
        5
    }
    pub fn discount_code() -> String {
        "WELCOME".into()
    }
    pub fn product_type() -> String {
        "produs".into()
    }
    pub fn add_path() -> String {
        "/comanda/adauga_in_cos".into()
    }
    pub fn discount_path() -> String {
        "/cos/adauga_cod".into()
    }

    // Program defaults
    pub fn program_path() -> String {
        "/programe/creste-masa-musculara".into()
    }
    pub fn program_menu_path() -> String {
        "/fitfoodway/detalii_meniu".into()
    }
    pub fn details_button() -> String {
        "div.btn-detalii > a".into()
    }
    pub fn details_attr() -> String {
        "onclick".into()
    }
    pub fn details_call() -> String {
        r"\(([0-9]+), '([0-9\-]+)', '([0-9]+)'\)".into()
    }
    pub fn menu_body() -> String {
        "div.modal-body".into()
    }
    pub fn quantity_pattern() -> String {
        r"Gramaje?\s*:?\s*([0-9]+)\s*[gm]".into()
    }
    pub fn kcal_pattern() -> String {
        r"([0-9]+)\s*kcal".into()
    }
    pub fn proteins_pattern() -> String {
        r"proteine\s*:?\s*([0-9]+)\s*g".into()
    }
    pub fn description_pattern() -> String {
        r"^\n[^*][^:0-9]+:[^:0-9]+$".into()
    }
}
