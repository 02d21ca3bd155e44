//! Typed result values and their textual form.
//!
//! Renderers only need three things from a value: its [`ValueKind`], the raw
//! bytes of a string value, and a textual representation written into a
//! caller-supplied buffer. [`TypedValue`] captures that; [`Value`] is the
//! bundled implementation.

use std::fmt::{self, Write as _};

/// Kind of a value, as far as rendering is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    /// Anything else (lists, maps, bytes, driver-specific structures).
    Other,
}

impl ValueKind {
    /// True for kinds written unquoted in CSV output.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            ValueKind::Null | ValueKind::Bool | ValueKind::Int | ValueKind::Float
        )
    }
}

/// A value that can be rendered.
pub trait TypedValue {
    fn kind(&self) -> ValueKind;

    /// Raw content of a string value, `None` for other kinds.
    fn str_bytes(&self) -> Option<&[u8]>;

    /// Writes as much of the textual form as fits into `buf` and returns the
    /// length of the complete textual form.
    ///
    /// A return value `>= buf.len()` means the text did not fit (or exactly
    /// filled the buffer); the caller grows the buffer to at least
    /// `required + 1` bytes and calls again.
    fn to_text(&self, buf: &mut [u8]) -> usize;

    fn is_null(&self) -> bool {
        self.kind() == ValueKind::Null
    }
}

/// A result value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    /// Entries in insertion order.
    Map(Vec<(String, Value)>),
}

impl TypedValue for Value {
    fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) | Value::List(_) | Value::Map(_) => ValueKind::Other,
        }
    }

    fn str_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    fn to_text(&self, buf: &mut [u8]) -> usize {
        format_into(self, buf)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            // Debug keeps the decimal point on integral floats ("1.0")
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => write_quoted(f, s),
            Value::Bytes(bytes) => {
                f.write_char('#')?;
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Value::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_char(']')
            }
            Value::Map(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_char('}')
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        if c == '"' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}

/// Writes the `Display` form of `value` into `buf`, truncating when it does
/// not fit, and returns the untruncated length.
///
/// This is the building block for [`TypedValue::to_text`] implementations.
pub fn format_into(value: &impl fmt::Display, buf: &mut [u8]) -> usize {
    let mut writer = TruncatingWriter { buf, len: 0 };
    // The writer never fails, so neither does formatting.
    let _ = write!(writer, "{}", value);
    writer.len
}

struct TruncatingWriter<'b> {
    buf: &'b mut [u8],
    len: usize,
}

impl fmt::Write for TruncatingWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.len < self.buf.len() {
            let n = s.len().min(self.buf.len() - self.len);
            self.buf[self.len..self.len + n].copy_from_slice(&s.as_bytes()[..n]);
        }
        self.len += s.len();
        Ok(())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
