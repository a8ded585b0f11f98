//! Introspection handles.
//!
//! A [`Reflector`] is bound to exactly one class-like, method or free function. Handles
//! hold shared references to the registered declarations, so they are cheap to clone
//! and stay valid independently of the host that produced them.

use std::sync::Arc;

use super::decl::{AttributeSpec, AttributeTarget, ClassDecl, ClassKind, FunctionDecl, MethodDecl};
use crate::base::Name;

/// A live instance of a declared class.
#[derive(Debug, Clone)]
pub struct Object {
    id: u64,
    class: Arc<ClassDecl>,
}

impl Object {
    pub(crate) fn new(id: u64, class: Arc<ClassDecl>) -> Self {
        Self { id, class }
    }

    /// Identity of this instance within its host.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn class_name(&self) -> &Name {
        &self.class.name
    }

    pub fn class(&self) -> &Arc<ClassDecl> {
        &self.class
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.class, &other.class)
    }
}

/// A class given by name or by instance.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassRef {
    Name(Name),
    Object(Object),
}

impl ClassRef {
    pub fn name(&self) -> &Name {
        match self {
            ClassRef::Name(name) => name,
            ClassRef::Object(object) => object.class_name(),
        }
    }
}

impl From<&str> for ClassRef {
    fn from(name: &str) -> Self {
        ClassRef::Name(Name::new(name))
    }
}

impl From<Name> for ClassRef {
    fn from(name: Name) -> Self {
        ClassRef::Name(name)
    }
}

impl From<Object> for ClassRef {
    fn from(object: Object) -> Self {
        ClassRef::Object(object)
    }
}

/// Handle bound to a class-like declaration.
#[derive(Debug, Clone)]
pub struct ClassReflector {
    decl: Arc<ClassDecl>,
}

impl ClassReflector {
    pub(crate) fn new(decl: Arc<ClassDecl>) -> Self {
        Self { decl }
    }

    pub fn name(&self) -> &Name {
        &self.decl.name
    }

    pub fn kind(&self) -> ClassKind {
        self.decl.kind
    }

    pub fn decl(&self) -> &Arc<ClassDecl> {
        &self.decl
    }

    /// Declared parent class, if any.
    pub fn parent_name(&self) -> Option<&Name> {
        self.decl.parent.as_ref()
    }
}

/// Handle bound to a method.
///
/// `class` is the class the method belongs to (the class that declares it or
/// composes it from a trait); `origin` is the class-like whose body holds it.
#[derive(Debug, Clone)]
pub struct MethodReflector {
    class: Arc<ClassDecl>,
    origin: Arc<ClassDecl>,
    index: usize,
}

impl MethodReflector {
    /// `index` must point into `origin.methods`.
    pub(crate) fn new(class: Arc<ClassDecl>, origin: Arc<ClassDecl>, index: usize) -> Option<Self> {
        (index < origin.methods.len()).then_some(Self {
            class,
            origin,
            index,
        })
    }

    pub fn method(&self) -> &MethodDecl {
        &self.origin.methods[self.index]
    }

    pub fn name(&self) -> &Name {
        &self.method().name
    }

    /// Class the method belongs to.
    pub fn declaring_class(&self) -> &Name {
        &self.class.name
    }

    /// Class-like that holds the method body (a trait for composed methods).
    pub fn origin(&self) -> &Name {
        &self.origin.name
    }
}

/// Handle bound to a free function.
#[derive(Debug, Clone)]
pub struct FunctionReflector {
    decl: Arc<FunctionDecl>,
}

impl FunctionReflector {
    pub(crate) fn new(decl: Arc<FunctionDecl>) -> Self {
        Self { decl }
    }

    pub fn name(&self) -> &Name {
        &self.decl.name
    }
}

/// An introspection handle.
#[derive(Debug, Clone)]
pub enum Reflector {
    Class(ClassReflector),
    Method(MethodReflector),
    Function(FunctionReflector),
}

impl Reflector {
    /// Display name: `Class`, `Class::method` or `function`.
    pub fn name(&self) -> String {
        match self {
            Reflector::Class(class) => class.name().to_string(),
            Reflector::Method(method) => {
                format!("{}::{}", method.declaring_class(), method.name())
            }
            Reflector::Function(function) => function.name().to_string(),
        }
    }

    /// Attributes attached to the reflected declaration, in declaration order.
    pub fn attributes(&self) -> &[AttributeSpec] {
        match self {
            Reflector::Class(class) => &class.decl.attributes,
            Reflector::Method(method) => &method.method().attributes,
            Reflector::Function(function) => &function.decl.attributes,
        }
    }

    /// Declaration kind the attributes are attached to.
    pub fn target(&self) -> AttributeTarget {
        match self {
            Reflector::Class(_) => AttributeTarget::Class,
            Reflector::Method(_) => AttributeTarget::Method,
            Reflector::Function(_) => AttributeTarget::Function,
        }
    }

    pub fn as_class(&self) -> Option<&ClassReflector> {
        match self {
            Reflector::Class(class) => Some(class),
            _ => None,
        }
    }
}

impl From<ClassReflector> for Reflector {
    fn from(reflector: ClassReflector) -> Self {
        Reflector::Class(reflector)
    }
}

impl From<MethodReflector> for Reflector {
    fn from(reflector: MethodReflector) -> Self {
        Reflector::Method(reflector)
    }
}

impl From<FunctionReflector> for Reflector {
    fn from(reflector: FunctionReflector) -> Self {
        Reflector::Function(reflector)
    }
}
