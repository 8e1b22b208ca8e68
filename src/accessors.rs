use paste::paste;
use tracing::warn;

use crate::{FromConfigValue, MaskConfig};

/// A rectangle read from four configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect<T> {
    /// Horizontal offset; 0 when its key is absent.
    pub left: T,
    /// Vertical offset; 0 when its key is absent.
    pub top: T,
    /// Width, always read from its key.
    pub width: T,
    /// Height, always read from its key.
    pub height: T,
}

impl<T: Copy> Rect<T> {
    /// Returns the fields in `[left, top, width, height]` order.
    pub fn to_array(self) -> [T; 4] {
        [self.left, self.top, self.width, self.height]
    }
}

/// Declares a root-level getter named `get_<suffix>` for type `$ty`.
macro_rules! typed_getter {
    ($(#[$attr:meta])* $suffix:ident, $ty:ty) => {
        paste! {
            $(#[$attr])*
            pub fn [<get_ $suffix>](&self, key: &str) -> Option<$ty> {
                self.get::<$ty>(key)
            }
        }
    };
}

impl MaskConfig {
    /// Reads the root-level value at `key` as `T`.
    ///
    /// Returns `None` if the key is missing, the value has the wrong type, or
    /// it does not fit `T`. See [`FromConfigValue`] for the coercion rules.
    pub fn get<T: FromConfigValue>(&self, key: &str) -> Option<T> {
        T::from_config_value(self.lookup(key)?)
    }

    typed_getter!(
        /// Reads a string value.
        string, String
    );
    typed_getter!(
        /// Reads a boolean value. Numbers are not booleans.
        bool, bool
    );
    typed_getter!(
        /// Reads a non-negative integer that fits in `u32`.
        uint32, u32
    );
    typed_getter!(
        /// Reads a non-negative integer that fits in `u64`.
        uint64, u64
    );
    typed_getter!(
        /// Reads an integer that fits in `i32`.
        int32, i32
    );
    typed_getter!(
        /// Reads a number as `f64`. Integers above 2^53 lose precision.
        double, f64
    );

    /// Returns the boolean at `key`, or `false` if it is absent or not a
    /// boolean.
    pub fn check_bool(&self, key: &str) -> bool {
        self.get_bool(key).unwrap_or(false)
    }

    /// Returns the strings in the array at `key`, in order.
    ///
    /// A missing key or non-array value yields an empty list. Elements that
    /// are not strings are skipped.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.lookup(key)
            .and_then(|value| value.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Reads a rectangle from four `u32` keys.
    ///
    /// Width and height are required. Left and top default to 0. If only one
    /// of width and height is set, a warning is logged and `None` is
    /// returned so the caller falls back to its default behavior.
    ///
    /// # Examples
    ///
    /// ```
    /// use mask_config::{MaskConfig, Rect};
    ///
    /// let config = MaskConfig::from_json_str(r#"{"screen.width": 1920, "screen.height": 1080}"#);
    /// assert_eq!(
    ///     config.get_rect("screen.left", "screen.top", "screen.width", "screen.height"),
    ///     Some(Rect { left: 0, top: 0, width: 1920, height: 1080 })
    /// );
    /// ```
    pub fn get_rect(&self, left: &str, top: &str, width: &str, height: &str) -> Option<Rect<u32>> {
        let (w, h) = match (self.get_uint32(width), self.get_uint32(height)) {
            (Some(w), Some(h)) => (w, h),
            (None, None) => return None,
            _ => {
                warn!(
                    width = width,
                    height = height,
                    "both {} and {} must be provided; using default behavior",
                    width,
                    height
                );
                return None;
            }
        };
        Some(Rect {
            left: self.get_uint32(left).unwrap_or(0),
            top: self.get_uint32(top).unwrap_or(0),
            width: w,
            height: h,
        })
    }

    /// Reads a rectangle like [`get_rect`](Self::get_rect) and narrows it to
    /// `i32`, returning `None` if any field exceeds `i32::MAX`.
    pub fn get_int32_rect(
        &self,
        left: &str,
        top: &str,
        width: &str,
        height: &str,
    ) -> Option<Rect<i32>> {
        let rect = self.get_rect(left, top, width, height)?;
        Some(Rect {
            left: i32::try_from(rect.left).ok()?,
            top: i32::try_from(rect.top).ok()?,
            width: i32::try_from(rect.width).ok()?,
            height: i32::try_from(rect.height).ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn with_captured_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.contents())
    }

    const KEYS: [&str; 4] = ["win.left", "win.top", "win.width", "win.height"];

    fn rect(config: &MaskConfig) -> Option<Rect<u32>> {
        config.get_rect(KEYS[0], KEYS[1], KEYS[2], KEYS[3])
    }

    fn int32_rect(config: &MaskConfig) -> Option<Rect<i32>> {
        config.get_int32_rect(KEYS[0], KEYS[1], KEYS[2], KEYS[3])
    }

    #[test]
    fn test_scalar_getters() {
        let config = MaskConfig::from_json_str(
            r#"{
                "s": "text",
                "b": true,
                "u": 4294967295,
                "big": 18446744073709551615,
                "neg": -5,
                "d": 1.25,
                "i": 3
            }"#,
        );
        assert_eq!(config.get_string("s").as_deref(), Some("text"));
        assert_eq!(config.get_bool("b"), Some(true));
        assert_eq!(config.get_uint32("u"), Some(u32::MAX));
        assert_eq!(config.get_uint64("big"), Some(u64::MAX));
        assert_eq!(config.get_uint32("big"), None);
        assert_eq!(config.get_int32("neg"), Some(-5));
        assert_eq!(config.get_uint32("neg"), None);
        assert_eq!(config.get_double("d"), Some(1.25));
        assert_eq!(config.get_double("i"), Some(3.0));
        assert_eq!(config.get_double("s"), None);
        assert_eq!(config.get::<u8>("i"), Some(3));
    }

    #[test]
    fn test_uint32_boundary() {
        let config = MaskConfig::from_json_str(r#"{"over": 4294967296, "max": 4294967295}"#);
        assert_eq!(config.get_uint32("over"), None);
        assert_eq!(config.get_uint32("max"), Some(4294967295));
    }

    #[test]
    fn test_check_bool_collapses_absent_and_false() {
        let config = MaskConfig::from_json_str(r#"{"on": true, "off": false, "num": 1}"#);
        assert!(config.check_bool("on"));
        assert!(!config.check_bool("off"));
        assert!(!config.check_bool("num"));
        assert!(!config.check_bool("missing"));
    }

    #[test]
    fn test_string_list_skips_non_strings() {
        let config = MaskConfig::from_json_str(r#"{"fonts": ["Arial", 1, null, "Calibri"], "x": "y"}"#);
        assert_eq!(config.get_string_list("fonts"), vec!["Arial", "Calibri"]);
        assert!(config.get_string_list("x").is_empty());
        assert!(config.get_string_list("missing").is_empty());
    }

    #[test]
    fn test_rect_requires_width_and_height() {
        let only_width = MaskConfig::from_json_str(r#"{"win.width": 800}"#);
        assert_eq!(rect(&only_width), None);

        let only_height = MaskConfig::from_json_str(r#"{"win.height": 600, "win.left": 5}"#);
        assert_eq!(rect(&only_height), None);

        let neither = MaskConfig::from_json_str(r#"{"win.left": 5}"#);
        assert_eq!(rect(&neither), None);
    }

    #[test]
    fn test_rect_mismatch_is_reported() {
        let only_width = MaskConfig::from_json_str(r#"{"win.width": 800}"#);
        let (result, logs) = with_captured_logs(|| rect(&only_width));
        assert_eq!(result, None);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("both win.width and win.height must be provided"));

        let neither = MaskConfig::from_json_str("{}");
        let (result, logs) = with_captured_logs(|| rect(&neither));
        assert_eq!(result, None);
        assert!(logs.is_empty());
    }

    #[test]
    fn test_rect_defaults_origin() {
        let config = MaskConfig::from_json_str(r#"{"win.width": 800, "win.height": 600}"#);
        assert_eq!(
            rect(&config),
            Some(Rect { left: 0, top: 0, width: 800, height: 600 })
        );
    }

    #[test]
    fn test_rect_all_four() {
        let config = MaskConfig::from_json_str(
            r#"{"win.left": 10, "win.top": 20, "win.width": 800, "win.height": 600}"#,
        );
        assert_eq!(rect(&config).map(Rect::to_array), Some([10, 20, 800, 600]));
        assert_eq!(int32_rect(&config).map(Rect::to_array), Some([10, 20, 800, 600]));
    }

    #[test]
    fn test_int32_rect_overflow() {
        let config = MaskConfig::from_json_str(
            r#"{"win.left": 2147483648, "win.width": 800, "win.height": 600}"#,
        );
        assert!(rect(&config).is_some());
        assert_eq!(int32_rect(&config), None);
    }
}
