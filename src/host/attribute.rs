//! Attribute descriptors and their materialized instances.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::decl::AttributeTarget;
use crate::base::{Arguments, Name};

/// How an attribute type filter is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// The attribute class is the filter class, a subclass, or an implementor.
    #[default]
    InstanceOf,
    /// The attribute class name equals the filter.
    Exact,
}

/// An attribute found on a declaration, not yet instantiated.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDescriptor {
    name: Name,
    arguments: Arguments,
    target: AttributeTarget,
    repeated: bool,
}

impl AttributeDescriptor {
    pub fn new(name: Name, arguments: Arguments, target: AttributeTarget, repeated: bool) -> Self {
        Self {
            name,
            arguments,
            target,
            repeated,
        }
    }

    /// Attribute class name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn target(&self) -> AttributeTarget {
        self.target
    }

    /// True when the same attribute class appears more than once on the declaration.
    pub fn is_repeated(&self) -> bool {
        self.repeated
    }
}

/// Type-erased value produced by an attribute constructor.
pub type DecoratorValue = Arc<dyn Any + Send + Sync>;

/// An instantiated attribute.
#[derive(Clone)]
pub struct Decorator {
    class: Name,
    value: DecoratorValue,
}

impl Decorator {
    pub fn new(class: Name, value: DecoratorValue) -> Self {
        Self { class, value }
    }

    /// Attribute class this instance was created from.
    pub fn class(&self) -> &Name {
        &self.class
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn value(&self) -> &DecoratorValue {
        &self.value
    }
}

impl fmt::Debug for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorator")
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}
