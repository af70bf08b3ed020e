//! Unified error type for storefront.

use thiserror::Error;

/// Errors that can occur during a fetch-compose-publish cycle.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// A font or template resource failed to load.
    #[error("Asset error: {0}")]
    Asset(String),

    /// Image encoding or conversion error.
    #[error("Image error: {0}")]
    Image(String),

    /// A publisher failed to deliver the post.
    #[error("Publish error ({publisher}): {message}")]
    Publish {
        /// The publisher name.
        publisher: String,
        /// What went wrong.
        message: String,
    },

    /// No credential configured for an enabled publisher.
    #[error("No {key} configured for the {publisher} publisher. Set it in the config file or environment.")]
    MissingCredential {
        /// The publisher name.
        publisher: String,
        /// The missing credential key.
        key: String,
    },
}
