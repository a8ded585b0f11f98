//! # reflector-base
//!
//! Normalizes references to program elements (classes, instances, methods, free
//! functions, or existing handles) into introspection handles, reads the attribute
//! metadata attached to them, and aggregates attributes and traits across a class's
//! ancestors.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! reflect   → Inspector: classification, resolution, extraction, ancestor walks
//!   ↓
//! host      → Host trait, declarations, handles, ClassRegistry
//!   ↓
//! base      → Name, Value/Arguments
//! ```
//!
//! ## Example
//!
//! ```
//! use reflector::host::{AttributeFlags, AttributeSpec, ClassDecl, ClassRegistry, MatchMode};
//! use reflector::{Arguments, Inspector};
//!
//! #[derive(Debug, PartialEq)]
//! struct Tag(String);
//!
//! let registry = ClassRegistry::new();
//! registry.declare(ClassDecl::new_class("Tag").as_attribute(AttributeFlags::TARGET_CLASS))?;
//! registry.register_constructor("Tag", |args: &Arguments| Ok(Tag(args.str(0, "value")?.to_string())));
//! registry.declare(ClassDecl::new_class("Base").with_attribute(AttributeSpec::new("Tag").with("a")))?;
//! registry.declare(
//!     ClassDecl::new_class("Child")
//!         .extends("Base")
//!         .with_attribute(AttributeSpec::new("Tag").with("b")),
//! )?;
//!
//! let tags: Vec<String> = Inspector::new(&registry)
//!     .get_decorators_deep("Child", "Tag", MatchMode::InstanceOf)?
//!     .iter()
//!     .filter_map(|d| d.downcast_ref::<Tag>().map(|t| t.0.clone()))
//!     .collect();
//! assert_eq!(tags, ["b", "a"]);
//! # Ok::<(), reflector::ReflectError>(())
//! ```

// ============================================================================
// MODULES (dependency order: base → host → reflect)
// ============================================================================

/// Foundation types: Name, Value, Arguments
pub mod base;

/// Error types shared by every layer
pub mod error;

/// Host reflection capability and the in-memory registry
pub mod host;

/// Target classification, handle resolution and hierarchy aggregation
pub mod reflect;

// Re-export commonly needed items
pub use base::{Arguments, ConstructError, Name, Value};
pub use error::{InstantiationError, ReflectError, ReflectResult};
pub use host::{
    AttributeDescriptor, ClassRegistry, Decorator, Host, MatchMode, Object, Reflector,
};
pub use reflect::{Inspector, Target, TargetKind};
