//! Assembly of the configuration text from environment variables.
//!
//! Some platforms bound the length of a single environment variable, so a
//! large configuration may be split into shards:
//!
//! ```text
//! CAMOU_CONFIG_1='{"screen.width": 19'
//! CAMOU_CONFIG_2='20, "screen.height": 1080}'
//! ```
//!
//! Shards are read from index 1 upward until the first missing index and
//! concatenated with no separator. When no shard yields any text, the
//! unindexed `CAMOU_CONFIG` variable is used in full instead.

use std::ffi::OsString;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::ConfigError;

/// The base variable name used when no [`SourceConfig`] has been set.
pub const DEFAULT_BASE_NAME: &str = "CAMOU_CONFIG";

/// Configuration for where the global document is read from.
///
/// # Examples
///
/// ```
/// use mask_config::SourceConfig;
///
/// let config = SourceConfig::default();
/// assert_eq!(config.base_name(), "CAMOU_CONFIG");
///
/// let config = SourceConfig::with_base_name("MY_APP_CONFIG");
/// assert_eq!(config.shard_name(2), "MY_APP_CONFIG_2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    base_name: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::with_base_name(DEFAULT_BASE_NAME)
    }
}

impl SourceConfig {
    /// Creates a configuration reading `NAME` and `NAME_1..NAME_N`.
    pub fn with_base_name(base_name: impl Into<String>) -> Self {
        Self { base_name: base_name.into() }
    }

    /// Returns the unindexed variable name.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Returns the variable name of the shard at `index` (1-based).
    pub fn shard_name(&self, index: usize) -> String {
        format!("{}_{}", self.base_name, index)
    }

    /// Reads and assembles the configuration text from the process
    /// environment.
    pub fn assemble(&self) -> String {
        self.assemble_with(read_env_utf8)
    }

    /// Assembles the configuration text using `lookup` in place of the
    /// process environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use mask_config::SourceConfig;
    ///
    /// let vars = HashMap::from([
    ///     ("CAMOU_CONFIG_1".to_string(), r#"{"a":"#.to_string()),
    ///     ("CAMOU_CONFIG_2".to_string(), "1}".to_string()),
    /// ]);
    /// let text = SourceConfig::default().assemble_with(|name| vars.get(name).cloned());
    /// assert_eq!(text, r#"{"a":1}"#);
    /// ```
    pub fn assemble_with<F>(&self, mut lookup: F) -> String
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut text = String::new();
        let mut shards = 0usize;
        while let Some(part) = lookup(&self.shard_name(shards + 1)) {
            text.push_str(&part);
            shards += 1;
        }

        if text.is_empty() {
            text = lookup(&self.base_name).unwrap_or_default();
        }

        debug!(
            base_name = %self.base_name,
            shards,
            bytes = text.len(),
            "assembled configuration text"
        );
        text
    }
}

/// Reads an environment variable, canonicalizing the platform-native value
/// to UTF-8.
fn read_env_utf8(name: &str) -> Option<String> {
    std::env::var_os(name).map(|value: OsString| value.to_string_lossy().into_owned())
}

// Global source state
static CUSTOM_SOURCE: Mutex<Option<SourceConfig>> = Mutex::new(None);
static SOURCE_LOCKED: AtomicBool = AtomicBool::new(false);

/// Sets the source configuration for the global document.
///
/// This function must be called **before** the first access to
/// [`MASK_CONFIG`](crate::MASK_CONFIG). Once the document has been built the
/// configuration is locked.
///
/// # Examples
///
/// ```rust,ignore
/// use mask_config::{set_source_config, SourceConfig, MASK_CONFIG};
///
/// set_source_config(SourceConfig::with_base_name("MY_APP_CONFIG"))
///     .expect("configuration should succeed");
///
/// // Reads MY_APP_CONFIG_1.. / MY_APP_CONFIG from now on.
/// let config = MASK_CONFIG.get();
/// ```
pub fn set_source_config(config: SourceConfig) -> Result<(), ConfigError> {
    // The flag is only read or written while CUSTOM_SOURCE is held.
    let mut guard = CUSTOM_SOURCE.lock().unwrap_or_else(PoisonError::into_inner);
    if SOURCE_LOCKED.load(Ordering::SeqCst) {
        return Err(ConfigError::AlreadyInitialized);
    }
    *guard = Some(config);
    Ok(())
}

/// Takes the current source configuration, locking it for future
/// modifications.
///
/// This is called internally during `MASK_CONFIG` initialization.
pub(crate) fn get_and_lock_source() -> SourceConfig {
    let mut guard = CUSTOM_SOURCE.lock().unwrap_or_else(PoisonError::into_inner);
    SOURCE_LOCKED.store(true, Ordering::SeqCst);
    guard.take().unwrap_or_default()
}
