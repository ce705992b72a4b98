//! Typed error hierarchy for henhouse.
//!
//! Three enums cover the three failure surfaces:
//! - `ApiError`: transport, status and decoding failures at the HTTP boundary
//! - `ValidationError`: client-side form checks that block a submission
//! - `RouteError`: navigation to a path the shell does not know

use thiserror::Error;

/// Errors from the REST API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid API base URL '{0}': expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Errors from client-side form validation. Carries every failing field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

fn join_messages(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Message recorded for `field`, if it failed.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.message.as_str())
    }
}

/// Errors from client-side navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("No route matches '{0}'. Known routes: /, /batches, /add-batch, /history")]
    UnknownPath(String),
}
