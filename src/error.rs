// src/error.rs

//! Unified error handling for the catalog.

use std::fmt;

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Everything that can go wrong while loading, searching or rendering.
#[derive(Error, Debug)]
pub enum AppError {
    /// Reading the dataset or writing a depiction failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Depiction service request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed configuration file
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bad endpoint or reference URL
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A configuration value is out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// The static dataset is missing or structurally invalid
    #[error("Dataset error in {source_name}: {message}")]
    Dataset {
        source_name: String,
        message: String,
    },

    /// Structure depiction failed
    #[error("Render error for {context}: {message}")]
    Render { context: String, message: String },
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a dataset error for the named source.
    pub fn dataset(source_name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Dataset {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Create a render error with context.
    pub fn render(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Render {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
