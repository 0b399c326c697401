use std::borrow::Cow;

use serde::Serialize;

use crate::error::Result;

/// A directive payload or parameter value before escaping.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Absent,
    Text(String),
    Structured(serde_json::Value),
}

impl Value {
    /// Serialize any serde type into a structured value.
    pub fn structured<T: Serialize + ?Sized>(v: &T) -> Result<Self> {
        Ok(serde_json::to_value(v)?.into())
    }

    /// The textual form of the value, before any escaping is applied.
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            Value::Absent => Cow::Borrowed(""),
            Value::Text(s) => Cow::Borrowed(s.as_str()),
            Value::Structured(v) => canonical_json(v),
        }
    }
}

fn canonical_json(v: &serde_json::Value) -> Cow<'_, str> {
    match v {
        serde_json::Value::Null => Cow::Borrowed(""),
        serde_json::Value::String(s) => Cow::Borrowed(s.as_str()),
        // Display on serde_json::Value is the compact form.
        other => Cow::Owned(other.to_string()),
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Structured(other),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Absent)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Absent
    }
}

macro_rules! structured_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Structured(serde_json::Value::from(v))
                }
            }
        )*
    };
}

structured_from!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
