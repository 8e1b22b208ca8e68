use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::{LoadError, SourceConfig, lowercase_cache::LowercaseCache};

/// An immutable, parsed configuration document.
///
/// A `MaskConfig` is built once from JSON text and never changes afterwards.
/// Malformed or absent text produces an empty document rather than an error,
/// so every accessor simply reports the value as absent.
///
/// The process-wide instance lives in [`MASK_CONFIG`](crate::MASK_CONFIG);
/// independent instances can be built with [`MaskConfig::from_json_str`].
///
/// # Examples
///
/// ```
/// use mask_config::MaskConfig;
///
/// let config = MaskConfig::from_json_str(r#"{"navigator.userAgent": "Mozilla/5.0"}"#);
/// assert_eq!(config.get_string("navigator.userAgent").as_deref(), Some("Mozilla/5.0"));
/// assert!(config.lookup("missing").is_none());
///
/// let broken = MaskConfig::from_json_str("{not json");
/// assert!(broken.is_empty());
/// assert!(broken.load_error().is_some());
/// ```
#[derive(Debug)]
pub struct MaskConfig {
    root: Value,
    load_error: Option<LoadError>,
    pub(crate) lowercase_cache: LowercaseCache,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self::from_value(Value::Object(Map::new()))
    }
}

impl MaskConfig {
    /// Builds a document from an already parsed value.
    pub fn from_value(root: Value) -> Self {
        if !root.is_object() {
            warn!("configuration root is not a JSON object; all lookups will be absent");
        }
        Self {
            root,
            load_error: None,
            lowercase_cache: LowercaseCache::default(),
        }
    }

    /// Parses `text` into a document.
    ///
    /// Empty text is treated as absent configuration. Malformed text is
    /// logged and replaced by an empty object.
    pub fn from_json_str(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<Value>(text) {
            Ok(root) => {
                debug!(bytes = text.len(), "parsed configuration");
                Self::from_value(root)
            }
            Err(e) => {
                let e = LoadError::from(e);
                error!(error = %e, "invalid JSON passed as configuration");
                Self {
                    load_error: Some(e),
                    ..Self::default()
                }
            }
        }
    }

    /// Reads the environment variables named by `source` and parses them.
    pub fn from_source(source: &SourceConfig) -> Self {
        Self::from_json_str(&source.assemble())
    }

    /// Returns the root of the document.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Returns the error that caused this document to fall back to the empty
    /// object, if any.
    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    /// Returns true if the root holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.as_object().is_none_or(Map::is_empty)
    }

    /// Looks up `key` in the root object.
    ///
    /// Returns `None` if the root is not an object or the key is missing.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        self.root.as_object()?.get(key)
    }

    /// Looks up `root[domain][key]`.
    ///
    /// Returns `None` if either level is missing or `root[domain]` is not an
    /// object.
    ///
    /// # Examples
    ///
    /// ```
    /// use mask_config::MaskConfig;
    ///
    /// let config = MaskConfig::from_json_str(r#"{"webGl:parameters": {"3379": 16384}}"#);
    /// assert_eq!(
    ///     config.nested_lookup("webGl:parameters", "3379").and_then(|v| v.as_u64()),
    ///     Some(16384)
    /// );
    /// assert!(config.nested_lookup("webGl2:parameters", "3379").is_none());
    /// ```
    pub fn nested_lookup(&self, domain: &str, key: &str) -> Option<&Value> {
        self.lookup(domain)?.as_object()?.get(key)
    }
}
