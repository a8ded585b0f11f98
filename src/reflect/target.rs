//! Loosely-typed targets.
//!
//! A [`Target`] is whatever a caller hands in: a handle, an instance, a name, a list
//! or some other scalar. What it *denotes* is decided later by the classifier, so
//! the same `Name("Foo")` may be a class or a function depending on the host.

use crate::base::{Name, Value};
use crate::host::{
    ClassRef, ClassReflector, FunctionReflector, MethodReflector, Object, Reflector,
};

/// Input value for resolution.
#[derive(Debug, Clone)]
pub enum Target {
    /// An already-resolved handle.
    Reflector(Reflector),
    /// A live instance.
    Object(Object),
    /// A class, function or `Class::method` name.
    Name(String),
    /// An ordered list; `(owner, method)` pairs are two-element lists.
    List(Vec<Target>),
    /// Any other scalar.
    Value(Value),
}

impl Target {
    /// Build an `(owner, method)` pair.
    pub fn method(owner: impl Into<Target>, method: &str) -> Self {
        Target::List(vec![owner.into(), Target::Name(method.to_string())])
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Target::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// What a target was classified as, in priority order.
#[derive(Debug, Clone)]
pub enum TargetKind<'t> {
    Reflector(&'t Reflector),
    Class(ClassRef),
    Method(ClassRef, &'t str),
    Function(&'t str),
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Name(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::Name(name)
    }
}

impl From<Name> for Target {
    fn from(name: Name) -> Self {
        Target::Name(name.as_str().to_string())
    }
}

impl From<&Name> for Target {
    fn from(name: &Name) -> Self {
        Target::Name(name.as_str().to_string())
    }
}

impl From<Object> for Target {
    fn from(object: Object) -> Self {
        Target::Object(object)
    }
}

impl From<&Object> for Target {
    fn from(object: &Object) -> Self {
        Target::Object(object.clone())
    }
}

impl From<ClassRef> for Target {
    fn from(class: ClassRef) -> Self {
        match class {
            ClassRef::Name(name) => name.into(),
            ClassRef::Object(object) => Target::Object(object),
        }
    }
}

impl From<Reflector> for Target {
    fn from(reflector: Reflector) -> Self {
        Target::Reflector(reflector)
    }
}

impl From<ClassReflector> for Target {
    fn from(reflector: ClassReflector) -> Self {
        Target::Reflector(reflector.into())
    }
}

impl From<MethodReflector> for Target {
    fn from(reflector: MethodReflector) -> Self {
        Target::Reflector(reflector.into())
    }
}

impl From<FunctionReflector> for Target {
    fn from(reflector: FunctionReflector) -> Self {
        Target::Reflector(reflector.into())
    }
}

impl From<Value> for Target {
    fn from(value: Value) -> Self {
        Target::Value(value)
    }
}

impl From<Vec<Target>> for Target {
    fn from(items: Vec<Target>) -> Self {
        Target::List(items)
    }
}

impl<A: Into<Target>, B: Into<Target>> From<(A, B)> for Target {
    fn from((owner, method): (A, B)) -> Self {
        Target::List(vec![owner.into(), method.into()])
    }
}
