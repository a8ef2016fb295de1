//! Attribute value types and their canonical text forms.

use std::fmt;

use serde::Serialize;

/// Declared type of a schema attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Bool,
    U8,
    U32,
    I32,
    F64,
    /// An `xsd:string` restriction to a fixed token list (e.g. `ST_Axis`).
    Enum(&'static [&'static str]),
}

/// A decoded attribute value.
///
/// Enumerated tokens are stored as [`Scalar::String`]; membership is checked when the value is
/// parsed or assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    String(String),
    Bool(bool),
    U8(u8),
    U32(u32),
    I32(i32),
    F64(f64),
}

impl ScalarType {
    /// Parse attribute text according to this type. Returns `None` when the text is not a valid
    /// lexical form.
    ///
    /// Non-string types collapse surrounding whitespace (XSD `whiteSpace="collapse"`); strings are
    /// taken verbatim.
    pub fn parse(self, text: &str) -> Option<Scalar> {
        match self {
            ScalarType::String => Some(Scalar::String(text.to_string())),
            ScalarType::Enum(tokens) => tokens
                .iter()
                .any(|token| *token == text)
                .then(|| Scalar::String(text.to_string())),
            ScalarType::Bool => parse_bool(text).map(Scalar::Bool),
            ScalarType::U8 => text.trim().parse::<u8>().ok().map(Scalar::U8),
            ScalarType::U32 => text.trim().parse::<u32>().ok().map(Scalar::U32),
            ScalarType::I32 => text.trim().parse::<i32>().ok().map(Scalar::I32),
            ScalarType::F64 => parse_double(text.trim()).map(Scalar::F64),
        }
    }

    /// Convert `value` into this type if it is compatible.
    ///
    /// Integers are narrowed or widened when the value fits, so callers can pass plain integer
    /// literals for any integer-typed attribute.
    pub fn coerce(self, value: Scalar) -> Option<Scalar> {
        match (self, value) {
            (ScalarType::String, value @ Scalar::String(_)) => Some(value),
            (ScalarType::Enum(tokens), Scalar::String(s)) => {
                tokens.contains(&s.as_str()).then_some(Scalar::String(s))
            }
            (ScalarType::Bool, value @ Scalar::Bool(_)) => Some(value),
            (ScalarType::F64, Scalar::F64(v)) => Some(Scalar::F64(v)),
            (ScalarType::F64, value) => value.as_i64().map(|v| Scalar::F64(v as f64)),
            (ScalarType::U8, value) => value
                .as_i64()
                .and_then(|v| u8::try_from(v).ok())
                .map(Scalar::U8),
            (ScalarType::U32, value) => value
                .as_i64()
                .and_then(|v| u32::try_from(v).ok())
                .map(Scalar::U32),
            (ScalarType::I32, value) => value
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(Scalar::I32),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::String => f.write_str("string"),
            ScalarType::Bool => f.write_str("boolean"),
            ScalarType::U8 => f.write_str("unsignedByte"),
            ScalarType::U32 => f.write_str("unsignedInt"),
            ScalarType::I32 => f.write_str("int"),
            ScalarType::F64 => f.write_str("double"),
            ScalarType::Enum(tokens) => write!(f, "one of [{}]", tokens.join(", ")),
        }
    }
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        self.as_i64().and_then(|v| u32::try_from(v).ok())
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.as_i64().and_then(|v| i32::try_from(v).ok())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::F64(v) => Some(*v),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::U8(v) => Some(i64::from(*v)),
            Scalar::U32(v) => Some(i64::from(*v)),
            Scalar::I32(v) => Some(i64::from(*v)),
            _ => None,
        }
    }
}

/// Canonical XML text: `true`/`false`, decimal integers, strings verbatim, shortest round-trip
/// doubles (`INF`, `-INF` and `NaN` for the special values).
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Bool(true) => f.write_str("true"),
            Scalar::Bool(false) => f.write_str("false"),
            Scalar::U8(v) => write!(f, "{v}"),
            Scalar::U32(v) => write!(f, "{v}"),
            Scalar::I32(v) => write!(f, "{v}"),
            Scalar::F64(v) if v.is_nan() => f.write_str("NaN"),
            Scalar::F64(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "INF" } else { "-INF" })
            }
            Scalar::F64(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<u8> for Scalar {
    fn from(value: u8) -> Self {
        Scalar::U8(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::U32(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::I32(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::F64(value)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "True" => Some(true),
        "0" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

fn parse_double(value: &str) -> Option<f64> {
    match value {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        // Rust also accepts `inf`/`infinity`/`nan` spellings, which are not valid `xsd:double`.
        _ if value.bytes().any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) => None,
        _ => value.parse::<f64>().ok(),
    }
}
