use thiserror::Error;

/// Why a configuration document fell back to the empty object.
///
/// Load errors are never returned from the accessors. They are logged once
/// when the document is built and kept on it for inspection through
/// [`MaskConfig::load_error`](crate::MaskConfig::load_error).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The assembled text was not valid JSON.
    #[error("invalid JSON in configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error returned when the source configuration cannot be modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configuration was attempted after the global document was initialized.
    #[error("cannot modify source configuration after MASK_CONFIG has been accessed")]
    AlreadyInitialized,
}
