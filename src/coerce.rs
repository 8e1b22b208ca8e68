use serde_json::Value;

/// A type that can be read out of a configuration value.
///
/// This is the closed set of types every typed accessor supports. Each
/// implementation accepts only the JSON encodings that represent its type
/// exactly:
///
/// - unsigned integers accept any non-negative JSON integer that fits, whether
///   it was encoded as signed or unsigned;
/// - signed integers accept any JSON integer in range;
/// - floats accept float and integer encodings (integers above 2^53 lose
///   precision);
/// - `bool` and `String` accept only booleans and strings.
///
/// Strings are never converted to numbers and numbers are never converted to
/// booleans.
///
/// # Examples
///
/// ```
/// use mask_config::FromConfigValue;
/// use serde_json::json;
///
/// assert_eq!(u32::from_config_value(&json!(4294967295u64)), Some(u32::MAX));
/// assert_eq!(u32::from_config_value(&json!(4294967296u64)), None);
/// assert_eq!(u32::from_config_value(&json!(-1)), None);
/// assert_eq!(u32::from_config_value(&json!("7")), None);
/// assert_eq!(f64::from_config_value(&json!(7)), Some(7.0));
/// ```
pub trait FromConfigValue: Sized {
    /// Converts `value`, returning `None` on a type mismatch or overflow.
    fn from_config_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl FromConfigValue for $ty {
                fn from_config_value(value: &Value) -> Option<Self> {
                    // as_u64 covers both positive encodings; negatives fail.
                    <$ty>::try_from(value.as_u64()?).ok()
                }
            }
        )*
    };
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl FromConfigValue for $ty {
                fn from_config_value(value: &Value) -> Option<Self> {
                    <$ty>::try_from(value.as_i64()?).ok()
                }
            }
        )*
    };
}

impl_unsigned!(u8, u16, u32, u64);
impl_signed!(i8, i16, i32, i64);

impl FromConfigValue for f64 {
    fn from_config_value(value: &Value) -> Option<Self> {
        // Integer encodings convert with `as`, so u64 above 2^53 rounds.
        value.as_f64()
    }
}

impl FromConfigValue for f32 {
    fn from_config_value(value: &Value) -> Option<Self> {
        f64::from_config_value(value).map(|d| d as f32)
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromConfigValue for String {
    fn from_config_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}
