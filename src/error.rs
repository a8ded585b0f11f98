//! Error types for reflection operations.

use thiserror::Error;

use crate::base::{ConstructError, Name};

/// Convenience alias used across the crate.
pub type ReflectResult<T> = Result<T, ReflectError>;

/// Errors that can occur while resolving targets or reading metadata.
#[derive(Debug, Error)]
pub enum ReflectError {
    /// The value is not a handle, class, method pair or function name.
    #[error("Invalid target: {target}")]
    InvalidTarget { target: String },

    /// An attribute could not be materialized.
    #[error(transparent)]
    Instantiation(#[from] InstantiationError),

    /// Class-like lookup failed.
    #[error("Class \"{0}\" does not exist")]
    ClassNotFound(String),

    /// Method lookup failed.
    #[error("Method {class}::{method}() does not exist")]
    MethodNotFound { class: String, method: String },

    /// Free function lookup failed.
    #[error("Function {0}() does not exist")]
    FunctionNotFound(String),

    /// A declaration with the same name is already registered.
    #[error("Cannot declare {kind} {name}, because the name is already in use")]
    AlreadyDeclared { kind: &'static str, name: Name },

    /// The class-like cannot be instantiated (interface, trait, enum or abstract class).
    #[error("Cannot instantiate {kind} {name}")]
    NotInstantiable { kind: &'static str, name: Name },

    /// An ancestor walk revisited a class.
    #[error("Circular inheritance detected at class {class}")]
    CircularInheritance { class: Name },

    /// Declaration manifest could not be read.
    #[cfg(feature = "manifest")]
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl ReflectError {
    /// Create an invalid target error from the offending value.
    pub fn invalid_target(target: impl std::fmt::Debug) -> Self {
        Self::InvalidTarget {
            target: format!("{target:?}"),
        }
    }

    pub fn class_not_found(name: impl Into<String>) -> Self {
        Self::ClassNotFound(name.into())
    }

    pub fn method_not_found(class: impl Into<String>, method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            class: class.into(),
            method: method.into(),
        }
    }
}

/// Errors raised when turning an attribute descriptor into an instance.
#[derive(Debug, Error)]
pub enum InstantiationError {
    /// The attribute class cannot be loaded.
    #[error("Attribute class \"{0}\" not found")]
    ClassNotFound(Name),

    /// The class exists but is not marked as an attribute.
    #[error("Attempting to use non-attribute class \"{0}\" as attribute")]
    NotAnAttribute(Name),

    /// The attribute's flags do not allow the declaration it is attached to.
    #[error("Attribute \"{attribute}\" cannot target {target} (allowed targets: {allowed})")]
    TargetNotAllowed {
        attribute: Name,
        target: &'static str,
        allowed: String,
    },

    /// The attribute appears more than once but is not repeatable.
    #[error("Attribute \"{0}\" must not be repeated")]
    NotRepeatable(Name),

    /// Arguments were passed to an attribute without a constructor.
    #[error("Attribute class {0} does not have a constructor, cannot pass arguments")]
    UnexpectedArguments(Name),

    /// The attribute constructor failed.
    #[error("Constructor of attribute {attribute} failed: {source}")]
    Constructor {
        attribute: Name,
        #[source]
        source: ConstructError,
    },
}
