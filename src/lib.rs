//! Mask Config: process-wide, fault-tolerant JSON configuration.
//!
//! This crate reads a JSON object from environment variables once per
//! process and exposes strictly typed, never-failing accessors on it. Every
//! accessor reports a missing key, a mismatched type and an out-of-range
//! value the same way: as `None`, or as the caller's default.
//!
//! # Basic Usage
//!
//! ```rust
//! use mask_config::{GlParam, MaskConfig};
//!
//! let config = MaskConfig::from_json_str(r#"{
//!     "screen.width": 1920,
//!     "screen.height": 1080,
//!     "navigator.languages": ["en-US", "EN"],
//!     "webGl:parameters": {"3379": 16384, "7936": "Mozilla"}
//! }"#);
//!
//! assert_eq!(config.get_uint32("screen.width"), Some(1920));
//! assert_eq!(config.get_string("screen.width"), None);
//! assert_eq!(config.get_string_list_lower("navigator.languages"), vec!["en-us", "en"]);
//! assert_eq!(config.get_parameter::<i32>(3379, 0, false), 16384);
//! assert_eq!(
//!     config.get_parameter_variant(7936, false),
//!     Some(GlParam::String("Mozilla".into()))
//! );
//! ```
//!
//! # Environment Loading
//!
//! On first access to [`MASK_CONFIG`], the crate:
//! 1. Reads `CAMOU_CONFIG_1`, `CAMOU_CONFIG_2`, … until the first missing
//!    index and concatenates them
//! 2. Falls back to `CAMOU_CONFIG` if the shards yielded no text
//! 3. Parses the text once; malformed JSON is logged and treated as `{}`
//!
//! ```rust,ignore
//! use mask_config::mask_config;
//!
//! if let Some(rect) = mask_config().get_rect("window.screenX", "window.screenY",
//!                                            "window.outerWidth", "window.outerHeight") {
//!     // ...
//! }
//! ```
//!
//! ## Custom Variable Name
//!
//! Choose another base name before first access:
//!
//! ```rust,ignore
//! use mask_config::{set_source_config, SourceConfig};
//!
//! set_source_config(SourceConfig::with_base_name("MY_APP_CONFIG")).unwrap();
//! ```
//!
//! # Diagnostics
//!
//! Parse failures and incomplete rectangles are reported through
//! [`tracing`]. The crate never installs a subscriber.

mod error;
pub use error::{ConfigError, LoadError};

mod source;
pub use source::{DEFAULT_BASE_NAME, SourceConfig, set_source_config};

mod config_store;
pub use config_store::MaskConfig;

mod registry;
pub use registry::{LazyMaskConfig, MASK_CONFIG, mask_config};

mod coerce;
pub use coerce::FromConfigValue;

mod accessors;
pub use accessors::Rect;

mod lowercase_cache;

mod webgl;
pub use webgl::{GlParam, ShaderPrecisionFormat};

mod voices;
pub use voices::VoiceDescriptor;
