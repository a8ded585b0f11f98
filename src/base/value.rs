//! Attribute arguments.
//!
//! An attribute records the arguments written at its use site, positional first and
//! then named. Constructors read them back through the typed accessors on
//! [`Arguments`], which report [`ConstructError`] on a missing or mistyped value.

use indexmap::IndexMap;
use smol_str::SmolStr;
use thiserror::Error;

/// A constant argument value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "manifest", derive(serde::Deserialize), serde(untagged))]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    /// Type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "array",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// Errors returned by attribute constructors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructError {
    /// Required argument was not supplied.
    #[error("missing argument {0}")]
    MissingArgument(String),

    /// Argument was supplied with the wrong type.
    #[error("argument {argument} must be of type {expected}, {found} given")]
    ArgumentType {
        argument: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Any other constructor failure.
    #[error("{0}")]
    Custom(String),
}

impl ConstructError {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Arguments recorded on an attribute use site.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "manifest", derive(serde::Deserialize), serde(default))]
pub struct Arguments {
    positional: Vec<Value>,
    named: IndexMap<SmolStr, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a named argument. A repeated name replaces the earlier value.
    pub fn with_named(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.named.insert(SmolStr::new(name), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn named(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.named.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Parameter lookup: the positional slot, falling back to the named argument.
    pub fn param(&self, index: usize, name: &str) -> Option<&Value> {
        self.get(index).or_else(|| self.get_named(name))
    }

    /// Required string parameter.
    pub fn str(&self, index: usize, name: &str) -> Result<&str, ConstructError> {
        match self.require(index, name)? {
            Value::Str(s) => Ok(s),
            other => Err(type_error(name, "string", other)),
        }
    }

    /// Required int parameter.
    pub fn int(&self, index: usize, name: &str) -> Result<i64, ConstructError> {
        match self.require(index, name)? {
            Value::Int(i) => Ok(*i),
            other => Err(type_error(name, "int", other)),
        }
    }

    /// Optional bool parameter, `default` when absent.
    pub fn bool_or(&self, index: usize, name: &str, default: bool) -> Result<bool, ConstructError> {
        match self.param(index, name) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(type_error(name, "bool", other)),
        }
    }

    fn require(&self, index: usize, name: &str) -> Result<&Value, ConstructError> {
        self.param(index, name)
            .ok_or_else(|| ConstructError::MissingArgument(format!("#{} (${name})", index + 1)))
    }
}

fn type_error(name: &str, expected: &'static str, found: &Value) -> ConstructError {
    ConstructError::ArgumentType {
        argument: format!("${name}"),
        expected,
        found: found.type_name(),
    }
}

impl<T: Into<Value>> FromIterator<T> for Arguments {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            positional: iter.into_iter().map(Into::into).collect(),
            named: IndexMap::new(),
        }
    }
}
