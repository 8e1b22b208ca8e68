//! WebGL context attributes, parameters and shader precision formats.
//!
//! Each query reads from one of two domains selected by `is_webgl2`:
//!
//! ```json
//! {
//!   "webGl:contextAttributes": {"antialias": true},
//!   "webGl:parameters": {"3379": 16384, "33902": [1, 1]},
//!   "webGl:shaderPrecisionFormats": {
//!     "35633,36338": {"rangeMin": 127, "rangeMax": 127, "precision": 23}
//!   },
//!   "webGl2:parameters": {"7936": "Mozilla"}
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::{FromConfigValue, MaskConfig};

const ATTRIBUTES_V1: &str = "webGl:contextAttributes";
const ATTRIBUTES_V2: &str = "webGl2:contextAttributes";
const PARAMETERS_V1: &str = "webGl:parameters";
const PARAMETERS_V2: &str = "webGl2:parameters";
const SHADER_PRECISION_V1: &str = "webGl:shaderPrecisionFormats";
const SHADER_PRECISION_V2: &str = "webGl2:shaderPrecisionFormats";

fn attributes_domain(is_webgl2: bool) -> &'static str {
    if is_webgl2 { ATTRIBUTES_V2 } else { ATTRIBUTES_V1 }
}

fn parameters_domain(is_webgl2: bool) -> &'static str {
    if is_webgl2 { PARAMETERS_V2 } else { PARAMETERS_V1 }
}

fn shader_precision_domain(is_webgl2: bool) -> &'static str {
    if is_webgl2 { SHADER_PRECISION_V2 } else { SHADER_PRECISION_V1 }
}

/// A WebGL parameter whose type is decided by its JSON encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum GlParam {
    /// An integer that fits in `i64`.
    Int(i64),
    /// A boolean.
    Bool(bool),
    /// A float-encoded number, or an integer above `i64::MAX`.
    Double(f64),
    /// A string.
    String(String),
    /// An explicit JSON `null`.
    Null,
}

type ParamDecoder = fn(&Value) -> Option<GlParam>;

/// Candidate decoders for [`MaskConfig::get_parameter_variant`], tried in
/// order. The order must not change: a float-encoded number is a double even
/// if its value is integral, and booleans are only tried last. Integers above
/// `i64::MAX` only fit the double decoder.
const PARAM_DECODERS: [ParamDecoder; 5] = [
    |v| v.is_null().then_some(GlParam::Null),
    |v| v.as_str().map(|s| GlParam::String(s.to_owned())),
    |v| v.as_f64().filter(|_| v.is_f64() || v.as_i64().is_none()).map(GlParam::Double),
    |v| v.as_i64().map(GlParam::Int),
    |v| v.as_bool().map(GlParam::Bool),
];

/// Range and precision of a shader numeric format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderPrecisionFormat {
    /// Log2 of the smallest representable magnitude (`rangeMin`).
    pub range_min: i32,
    /// Log2 of the largest representable magnitude (`rangeMax`).
    pub range_max: i32,
    /// Bits of precision (`precision`).
    pub precision: i32,
}

impl ShaderPrecisionFormat {
    /// Returns the fields in `[range_min, range_max, precision]` order.
    pub fn to_array(self) -> [i32; 3] {
        [self.range_min, self.range_max, self.precision]
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShaderPrecision {
    range_min: i64,
    range_max: i64,
    precision: i64,
}

impl TryFrom<RawShaderPrecision> for ShaderPrecisionFormat {
    type Error = std::num::TryFromIntError;

    fn try_from(raw: RawShaderPrecision) -> Result<Self, Self::Error> {
        Ok(Self {
            range_min: i32::try_from(raw.range_min)?,
            range_max: i32::try_from(raw.range_max)?,
            precision: i32::try_from(raw.precision)?,
        })
    }
}

impl MaskConfig {
    fn parameter(&self, pname: u32, is_webgl2: bool) -> Option<&Value> {
        self.nested_lookup(parameters_domain(is_webgl2), &pname.to_string())
    }

    /// Reads a WebGL context attribute by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use mask_config::MaskConfig;
    ///
    /// let config = MaskConfig::from_json_str(
    ///     r#"{"webGl2:contextAttributes": {"antialias": false, "powerPreference": "default"}}"#,
    /// );
    /// assert_eq!(config.get_attribute::<bool>("antialias", true), Some(false));
    /// assert_eq!(config.get_attribute::<bool>("antialias", false), None);
    /// assert_eq!(
    ///     config.get_attribute::<String>("powerPreference", true).as_deref(),
    ///     Some("default")
    /// );
    /// ```
    pub fn get_attribute<T: FromConfigValue>(&self, name: &str, is_webgl2: bool) -> Option<T> {
        T::from_config_value(self.nested_lookup(attributes_domain(is_webgl2), name)?)
    }

    /// Reads a WebGL parameter by its numeric id, returning `default` if it
    /// is absent or does not coerce to `T`.
    pub fn get_parameter<T: FromConfigValue>(&self, pname: u32, default: T, is_webgl2: bool) -> T {
        self.parameter(pname, is_webgl2)
            .and_then(T::from_config_value)
            .unwrap_or(default)
    }

    /// Reads an array-valued WebGL parameter.
    ///
    /// Every element must coerce to `T`; if any element fails, or the value
    /// is not an array, `default` is returned in full.
    ///
    /// # Examples
    ///
    /// ```
    /// use mask_config::MaskConfig;
    ///
    /// let config = MaskConfig::from_json_str(
    ///     r#"{"webGl:parameters": {"33902": [1, 1], "33901": [1, "x"]}}"#,
    /// );
    /// assert_eq!(config.get_parameter_vector::<f32>(33902, vec![], false), vec![1.0, 1.0]);
    /// assert_eq!(config.get_parameter_vector::<f32>(33901, vec![0.5], false), vec![0.5]);
    /// ```
    pub fn get_parameter_vector<T: FromConfigValue>(
        &self,
        pname: u32,
        default: Vec<T>,
        is_webgl2: bool,
    ) -> Vec<T> {
        self.parameter(pname, is_webgl2)
            .and_then(Value::as_array)
            .and_then(|items| items.iter().map(T::from_config_value).collect::<Option<Vec<T>>>())
            .unwrap_or(default)
    }

    /// Reads a WebGL parameter whose type is decided by its encoding.
    ///
    /// Decoding tries null, string, float, integer and boolean, in that
    /// order, and returns the first that matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use mask_config::{GlParam, MaskConfig};
    ///
    /// let config = MaskConfig::from_json_str(
    ///     r#"{"webGl:parameters": {"1": "5", "2": 5.0, "3": 5, "4": true, "5": null}}"#,
    /// );
    /// assert_eq!(config.get_parameter_variant(1, false), Some(GlParam::String("5".into())));
    /// assert_eq!(config.get_parameter_variant(2, false), Some(GlParam::Double(5.0)));
    /// assert_eq!(config.get_parameter_variant(3, false), Some(GlParam::Int(5)));
    /// assert_eq!(config.get_parameter_variant(4, false), Some(GlParam::Bool(true)));
    /// assert_eq!(config.get_parameter_variant(5, false), Some(GlParam::Null));
    /// assert_eq!(config.get_parameter_variant(6, false), None);
    /// ```
    pub fn get_parameter_variant(&self, pname: u32, is_webgl2: bool) -> Option<GlParam> {
        let value = self.parameter(pname, is_webgl2)?;
        PARAM_DECODERS.iter().find_map(|decode| decode(value))
    }

    /// Reads the precision format for a shader type and precision type.
    ///
    /// Returns `None` if the entry is missing, any of `rangeMin`, `rangeMax`
    /// or `precision` is missing or not an integer, or any value overflows
    /// `i32`.
    pub fn get_shader_precision(
        &self,
        shader_type: u32,
        precision_type: u32,
        is_webgl2: bool,
    ) -> Option<ShaderPrecisionFormat> {
        let key = format!("{shader_type},{precision_type}");
        let value = self
            .nested_lookup(shader_precision_domain(is_webgl2), &key)
            .filter(|value| value.is_object())?;
        let raw = RawShaderPrecision::deserialize(value).ok()?;
        ShaderPrecisionFormat::try_from(raw).ok()
    }
}
