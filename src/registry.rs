use std::sync::OnceLock;

use crate::{MaskConfig, source::get_and_lock_source};

/// A lazily initialized, process-wide [`MaskConfig`].
///
/// The document is assembled from the environment and parsed on the first
/// call to [`get`](Self::get). Concurrent first callers block until the one
/// initialization completes, and every caller receives the same document.
#[derive(Debug)]
pub struct LazyMaskConfig {
    cell: OnceLock<MaskConfig>,
}

impl LazyMaskConfig {
    /// Creates an uninitialized instance.
    pub const fn new() -> Self {
        Self { cell: OnceLock::new() }
    }

    /// Returns the document, reading and parsing it on first access.
    ///
    /// The first access also locks the source configuration; see
    /// [`set_source_config`](crate::set_source_config).
    pub fn get(&self) -> &MaskConfig {
        self.get_or_init_with(|| MaskConfig::from_source(&get_and_lock_source()))
    }

    /// Returns true once the document has been built.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    pub(crate) fn get_or_init_with<F>(&self, init: F) -> &MaskConfig
    where
        F: FnOnce() -> MaskConfig,
    {
        self.cell.get_or_init(init)
    }
}

impl Default for LazyMaskConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The global configuration document.
///
/// # Examples
///
/// ```
/// use mask_config::MASK_CONFIG;
///
/// let width = MASK_CONFIG.get().get_uint32("screen.width").unwrap_or(1920);
/// assert!(MASK_CONFIG.is_initialized());
/// # let _ = width;
/// ```
pub static MASK_CONFIG: LazyMaskConfig = LazyMaskConfig::new();

/// Shorthand for `MASK_CONFIG.get()`.
pub fn mask_config() -> &'static MaskConfig {
    MASK_CONFIG.get()
}
