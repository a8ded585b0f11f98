//! Declarations held by a host: class-likes, methods, free functions and the
//! attributes attached to them.
//!
//! Declarations are plain data built with `with_*` style builders and registered
//! once. Attribute *use sites* are [`AttributeSpec`]s; a class becomes an attribute
//! *class* when it carries [`AttributeFlags`].

use crate::base::{Arguments, Name, Value};

/// Kind of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "manifest",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Trait,
    Enum,
}

impl ClassKind {
    /// Classes and enums are classes; interfaces and traits are not.
    pub fn is_class(self) -> bool {
        matches!(self, ClassKind::Class | ClassKind::Enum)
    }

    pub fn display(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Trait => "trait",
            ClassKind::Enum => "enum",
        }
    }
}

/// Method visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "manifest",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

bitflags::bitflags! {
    /// Declarations an attribute class may be attached to, plus repeatability.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "manifest", derive(serde::Deserialize))]
    pub struct AttributeFlags: u32 {
        const TARGET_CLASS = 1 << 0;
        const TARGET_FUNCTION = 1 << 1;
        const TARGET_METHOD = 1 << 2;
        const TARGET_PROPERTY = 1 << 3;
        const TARGET_CLASS_CONSTANT = 1 << 4;
        const TARGET_PARAMETER = 1 << 5;
        const TARGET_ALL = Self::TARGET_CLASS.bits()
            | Self::TARGET_FUNCTION.bits()
            | Self::TARGET_METHOD.bits()
            | Self::TARGET_PROPERTY.bits()
            | Self::TARGET_CLASS_CONSTANT.bits()
            | Self::TARGET_PARAMETER.bits();
        /// The attribute may appear more than once on one declaration.
        const IS_REPEATABLE = 1 << 6;
    }
}

impl Default for AttributeFlags {
    fn default() -> Self {
        Self::TARGET_ALL
    }
}

impl AttributeFlags {
    /// Human-readable list of allowed targets, e.g. `"class, method"`.
    pub fn describe_targets(self) -> String {
        const NAMES: [(AttributeFlags, &str); 6] = [
            (AttributeFlags::TARGET_CLASS, "class"),
            (AttributeFlags::TARGET_FUNCTION, "function"),
            (AttributeFlags::TARGET_METHOD, "method"),
            (AttributeFlags::TARGET_PROPERTY, "property"),
            (AttributeFlags::TARGET_CLASS_CONSTANT, "class constant"),
            (AttributeFlags::TARGET_PARAMETER, "parameter"),
        ];
        NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Kind of declaration an attribute was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeTarget {
    Class,
    Function,
    Method,
}

impl AttributeTarget {
    pub fn flag(self) -> AttributeFlags {
        match self {
            AttributeTarget::Class => AttributeFlags::TARGET_CLASS,
            AttributeTarget::Function => AttributeFlags::TARGET_FUNCTION,
            AttributeTarget::Method => AttributeFlags::TARGET_METHOD,
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            AttributeTarget::Class => "class",
            AttributeTarget::Function => "function",
            AttributeTarget::Method => "method",
        }
    }
}

/// An attribute use site: the attribute class name and its recorded arguments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "manifest", derive(serde::Deserialize))]
pub struct AttributeSpec {
    pub name: Name,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub arguments: Arguments,
}

impl AttributeSpec {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            arguments: Arguments::new(),
        }
    }

    /// Append a positional argument.
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.arguments = self.arguments.with(value);
        self
    }

    pub fn with_named(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.arguments = self.arguments.with_named(name, value);
        self
    }

    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }
}

/// A method declared on a class-like.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "manifest", derive(serde::Deserialize))]
pub struct MethodDecl {
    pub name: Name,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub visibility: Visibility,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub is_static: bool,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub attributes: Vec<AttributeSpec>,
}

impl MethodDecl {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            attributes: Vec::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeSpec) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// A free function.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "manifest", derive(serde::Deserialize))]
pub struct FunctionDecl {
    pub name: Name,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub attributes: Vec<AttributeSpec>,
}

impl FunctionDecl {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeSpec) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// A class, interface, trait or enum.
///
/// For interfaces, `interfaces` holds the extended interfaces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "manifest", derive(serde::Deserialize))]
pub struct ClassDecl {
    pub name: Name,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub kind: ClassKind,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub parent: Option<Name>,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub interfaces: Vec<Name>,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub traits: Vec<Name>,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub methods: Vec<MethodDecl>,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub attributes: Vec<AttributeSpec>,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub is_abstract: bool,
    /// Set when this class is itself an attribute class.
    #[cfg_attr(feature = "manifest", serde(default))]
    pub attribute_flags: Option<AttributeFlags>,
}

impl ClassDecl {
    pub fn new(kind: ClassKind, name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            interfaces: Vec::new(),
            traits: Vec::new(),
            methods: Vec::new(),
            attributes: Vec::new(),
            is_abstract: false,
            attribute_flags: None,
        }
    }

    pub fn new_class(name: impl Into<Name>) -> Self {
        Self::new(ClassKind::Class, name)
    }

    pub fn new_interface(name: impl Into<Name>) -> Self {
        Self::new(ClassKind::Interface, name)
    }

    pub fn new_trait(name: impl Into<Name>) -> Self {
        Self::new(ClassKind::Trait, name)
    }

    pub fn new_enum(name: impl Into<Name>) -> Self {
        Self::new(ClassKind::Enum, name)
    }

    /// Set the parent class. On an interface this adds an extended interface.
    pub fn extends(mut self, parent: impl Into<Name>) -> Self {
        if self.kind == ClassKind::Interface {
            self.interfaces.push(parent.into());
        } else {
            self.parent = Some(parent.into());
        }
        self
    }

    pub fn implements(mut self, interface: impl Into<Name>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn uses(mut self, trait_name: impl Into<Name>) -> Self {
        self.traits.push(trait_name.into());
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeSpec) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Mark this class as an attribute class.
    pub fn as_attribute(mut self, flags: AttributeFlags) -> Self {
        self.attribute_flags = Some(flags);
        self
    }

    pub fn is_attribute(&self) -> bool {
        self.attribute_flags.is_some()
    }

    /// Index of a method declared directly on this class-like.
    pub fn method_index(&self, name: &str) -> Option<usize> {
        self.methods.iter().position(|m| m.name.matches(name))
    }
}
