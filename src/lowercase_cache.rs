use std::collections::HashMap;
use std::sync::RwLock;

use crate::MaskConfig;

/// Cache of lowercased string lists, keyed by configuration key.
///
/// Entries are inserted on first miss and never replaced or evicted.
#[derive(Debug, Default)]
pub(crate) struct LowercaseCache {
    entries: RwLock<HashMap<String, Vec<String>>>,
}

impl LowercaseCache {
    fn get(&self, key: &str) -> Option<Vec<String>> {
        self.entries.read().ok()?.get(key).cloned()
    }

    /// Inserts `value` unless another caller got there first, returning the
    /// committed entry either way.
    fn insert_if_absent(&self, key: &str, value: Vec<String>) -> Vec<String> {
        match self.entries.write() {
            Ok(mut guard) => guard.entry(key.to_owned()).or_insert(value).clone(),
            Err(_) => value,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.read().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl MaskConfig {
    /// Returns [`get_string_list`](Self::get_string_list) with every ASCII
    /// character lowercased.
    ///
    /// The result is computed once per key and cached for the lifetime of
    /// the document. Concurrent first calls may each compute the list, but
    /// only the first insertion is kept and every caller receives it.
    ///
    /// # Examples
    ///
    /// ```
    /// use mask_config::MaskConfig;
    ///
    /// let config = MaskConfig::from_json_str(r#"{"fonts": ["Arial", "Segoe UI"]}"#);
    /// assert_eq!(config.get_string_list_lower("fonts"), vec!["arial", "segoe ui"]);
    /// ```
    pub fn get_string_list_lower(&self, key: &str) -> Vec<String> {
        if let Some(cached) = self.lowercase_cache.get(key) {
            return cached;
        }

        let mut list = self.get_string_list(key);
        for s in &mut list {
            s.make_ascii_lowercase();
        }

        self.lowercase_cache.insert_if_absent(key, list)
    }
}
