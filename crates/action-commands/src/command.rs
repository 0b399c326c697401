use std::fmt;

use crate::escape::{escape_data, escape_property};
use crate::value::Value;

/// Name used when a directive is emitted without one.
pub const MISSING_COMMAND: &str = "missing.command";

/// Ordered parameter list. Keys keep their first insertion position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// One workflow command line: `::name k=v,...::value`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directive {
    pub name: Option<String>,
    pub params: Params,
    pub value: Value,
}

impl Directive {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn param<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn value<V: Into<Value>>(mut self, value: V) -> Self {
        self.value = value.into();
        self
    }

    pub fn name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(MISSING_COMMAND)
    }

    /// Render the directive without a trailing newline.
    ///
    /// Parameter keys are written as given; callers must keep `=`, `,` and `:`
    /// out of them.
    pub fn render(&self) -> String {
        let mut out = String::from("::");
        out.push_str(self.name());
        if !self.params.is_empty() {
            out.push(' ');
            for (i, (key, value)) in self.params.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(key);
                out.push('=');
                out.push_str(&escape_property(&value.canonical()));
            }
        }
        out.push_str("::");
        out.push_str(&escape_data(&self.value.canonical()));
        out
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
