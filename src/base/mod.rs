//! Foundation types for the reflector toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Name`] - Case-insensitive identifiers for classes, traits, functions and methods
//! - [`Value`], [`Arguments`] - Attribute arguments as recorded on a declaration
//! - [`ConstructError`] - Failures raised by attribute constructors
//!
//! This module has NO dependencies on other reflector modules.

mod name;
mod value;

pub use name::{Name, normalize_key};
pub use value::{Arguments, ConstructError, Value};
