//! # Host reflection facility
//!
//! The reflection primitives the resolver builds on, expressed as the [`Host`]
//! trait, plus the declaration model and [`ClassRegistry`], an in-memory host.
//!
//! ## Contract
//!
//! ```text
//! (a) handles        reflect_class / reflect_method / reflect_function
//! (b) attributes     attributes(reflector, type, mode)
//! (c) instances      instantiate(descriptor)
//! (d) parents        parent_class(class, autoload)
//! (e) traits         class_uses(class)
//! (f) interfaces     class_implements(class)
//! (g) checks         class_exists / function_exists / is_callable_* / is_a
//! ```
//!
//! Every check that can load a class takes an `autoload` flag.

mod attribute;
mod decl;
#[cfg(feature = "manifest")]
mod manifest;
mod reflector;
mod registry;


pub use attribute::{AttributeDescriptor, Decorator, DecoratorValue, MatchMode};
pub use decl::{
    AttributeFlags, AttributeSpec, AttributeTarget, ClassDecl, ClassKind, FunctionDecl, MethodDecl,
    Visibility,
};
pub use reflector::{ClassRef, ClassReflector, FunctionReflector, MethodReflector, Object, Reflector};
pub use registry::{Autoloader, ClassRegistry};

use crate::base::Name;
use crate::error::{ReflectError, ReflectResult};

/// Reflection capability supplied by the host runtime.
pub trait Host {
    /// A class (or enum) with this name is known. Interfaces and traits are not classes.
    fn class_exists(&self, name: &str, autoload: bool) -> bool;

    /// Any class-like (class, interface, trait, enum) with this name is known.
    fn class_like_exists(&self, name: &str, autoload: bool) -> bool;

    fn function_exists(&self, name: &str) -> bool;

    /// `(owner, method)` can be invoked from outside the class.
    fn is_callable_method(&self, owner: &ClassRef, method: &str, autoload: bool) -> bool;

    /// A bare name can be invoked.
    fn is_callable_name(&self, name: &str, autoload: bool) -> bool;

    /// `class` is `ancestor`, extends it, or implements it.
    fn is_a(&self, class: &str, ancestor: &str, autoload: bool) -> bool;

    fn reflect_class(&self, class: &ClassRef) -> ReflectResult<ClassReflector>;

    fn reflect_method(&self, owner: &ClassRef, method: &str) -> ReflectResult<MethodReflector>;

    fn reflect_function(&self, name: &str) -> ReflectResult<FunctionReflector>;

    /// Attributes on the reflected declaration whose class matches `metadata_type`
    /// under `mode`, in declaration order.
    ///
    /// In [`MatchMode::InstanceOf`] the filter class must exist; attributes whose own
    /// class cannot be loaded never match by inheritance.
    fn attributes(
        &self,
        reflector: &Reflector,
        metadata_type: &str,
        mode: MatchMode,
    ) -> ReflectResult<Vec<AttributeDescriptor>> {
        if mode == MatchMode::InstanceOf && !self.class_like_exists(metadata_type, true) {
            return Err(ReflectError::class_not_found(metadata_type));
        }

        let declared = reflector.attributes();
        let target = reflector.target();

        let matches = |name: &Name| match mode {
            MatchMode::Exact => name.matches(metadata_type),
            MatchMode::InstanceOf => {
                name.matches(metadata_type) || self.is_a(name.as_str(), metadata_type, true)
            }
        };

        Ok(declared
            .iter()
            .filter(|spec| matches(&spec.name))
            .map(|spec| {
                let repeated = declared.iter().filter(|other| other.name == spec.name).count() > 1;
                AttributeDescriptor::new(
                    spec.name.clone(),
                    spec.arguments.clone(),
                    target,
                    repeated,
                )
            })
            .collect())
    }

    /// Materialize a descriptor by running its attribute class constructor.
    fn instantiate(&self, descriptor: &AttributeDescriptor) -> ReflectResult<Decorator>;

    /// Parent class name, or `None` at the root of the chain or when the parent
    /// is not known (and cannot be loaded, when `autoload` is set).
    fn parent_class(&self, class: &ClassRef, autoload: bool) -> Option<Name>;

    /// Traits used directly by a class-like. Unknown names yield an empty list.
    fn class_uses(&self, class: &str, autoload: bool) -> Vec<Name>;

    /// All interfaces implemented by a class, direct and inherited.
    /// `None` when the class-like is unknown.
    fn class_implements(&self, class: &str, autoload: bool) -> Option<Vec<Name>>;
}
