// src/error.rs

//! Unified error handling for the scraper.

use std::fmt;

use thiserror::Error;

/// Result type alias for fitmenu operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed or returned a non-success status
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configured regex pattern failed to compile
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// An expected page element or value was missing
    #[error("Extraction failed for {context}: {message}")]
    Extract { context: String, message: String },

    /// A menu referenced a product that is not in the catalog
    #[error("Product {id} referenced on {day} is not in the catalog")]
    Lookup { day: String, id: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create an extraction error with context.
    pub fn extract(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Extract {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a lookup-miss error.
    pub fn lookup(day: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Lookup {
            day: day.into(),
            id: id.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
