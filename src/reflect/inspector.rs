//! Target classification and handle resolution.

use tracing::debug;

use super::target::{Target, TargetKind};
use crate::base::Name;
use crate::error::{ReflectError, ReflectResult};
use crate::host::{ClassRef, Host, Reflector};

/// Stateless entry point over a [`Host`].
///
/// Holds a shared reference to the host and the autoload setting used by the
/// classification predicates. Nothing is cached between calls.
pub struct Inspector<'h, H: Host + ?Sized> {
    pub(super) host: &'h H,
    pub(super) autoload: bool,
}

impl<'h, H: Host + ?Sized> Clone for Inspector<'h, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'h, H: Host + ?Sized> Copy for Inspector<'h, H> {}

impl<'h, H: Host + ?Sized> Inspector<'h, H> {
    /// Create an inspector with autoloading enabled.
    pub fn new(host: &'h H) -> Self {
        Self {
            host,
            autoload: true,
        }
    }

    /// Whether classification may trigger autoloading.
    pub fn with_autoload(mut self, autoload: bool) -> Self {
        self.autoload = autoload;
        self
    }

    pub fn host(&self) -> &'h H {
        self.host
    }

    pub fn autoload(&self) -> bool {
        self.autoload
    }

    // ========================================================================
    // CLASSIFICATION
    // ========================================================================

    /// An object, or a name the host knows as a class.
    pub fn is_valid_class(&self, target: &Target) -> bool {
        self.as_class(target).is_some()
    }

    /// A two-element `(owner, method)` list the host considers callable.
    pub fn is_valid_method(&self, target: &Target) -> bool {
        self.as_method(target).is_some()
    }

    /// A declared function name, or any other name the host considers callable.
    pub fn is_valid_function(&self, target: &Target) -> bool {
        self.as_function(target).is_some()
    }

    /// Method or function. Classes are never callable here, even invocable ones.
    pub fn is_callable(&self, target: &Target) -> bool {
        self.is_valid_method(target) || self.is_valid_function(target)
    }

    /// First matching classification in the order handle, class, method, function.
    pub fn classify<'t>(&self, target: &'t Target) -> Option<TargetKind<'t>> {
        if let Target::Reflector(reflector) = target {
            return Some(TargetKind::Reflector(reflector));
        }
        if let Some(class) = self.as_class(target) {
            return Some(TargetKind::Class(class));
        }
        if let Some((owner, method)) = self.as_method(target) {
            return Some(TargetKind::Method(owner, method));
        }
        self.as_function(target).map(TargetKind::Function)
    }

    fn as_class(&self, target: &Target) -> Option<ClassRef> {
        match target {
            Target::Object(object) => Some(ClassRef::Object(object.clone())),
            Target::Name(name) if self.host.class_exists(name, self.autoload) => {
                Some(ClassRef::Name(Name::new(name)))
            }
            _ => None,
        }
    }

    fn as_method<'t>(&self, target: &'t Target) -> Option<(ClassRef, &'t str)> {
        let Target::List(items) = target else {
            return None;
        };
        let [owner, Target::Name(method)] = items.as_slice() else {
            return None;
        };
        let owner = match owner {
            Target::Name(name) => ClassRef::Name(Name::new(name)),
            Target::Object(object) => ClassRef::Object(object.clone()),
            _ => return None,
        };
        self.host
            .is_callable_method(&owner, method, self.autoload)
            .then_some((owner, method.as_str()))
    }

    fn as_function<'t>(&self, target: &'t Target) -> Option<&'t str> {
        let name = target.as_name()?;
        (self.host.function_exists(name) || self.host.is_callable_name(name, self.autoload))
            .then_some(name)
    }

    // ========================================================================
    // RESOLUTION
    // ========================================================================

    /// Normalize a target into a handle.
    ///
    /// Handles pass through unchanged. Anything that is not a handle, class, method
    /// pair or function fails with [`ReflectError::InvalidTarget`].
    pub fn get_reflector(&self, target: impl Into<Target>) -> ReflectResult<Reflector> {
        let target = target.into();
        self.reflector_for(&target)
    }

    pub(super) fn reflector_for(&self, target: &Target) -> ReflectResult<Reflector> {
        let reflector: Reflector = match self.classify(target) {
            Some(TargetKind::Reflector(reflector)) => return Ok(reflector.clone()),
            Some(TargetKind::Class(class)) => self.host.reflect_class(&class)?.into(),
            Some(TargetKind::Method(owner, method)) => {
                self.host.reflect_method(&owner, method)?.into()
            }
            Some(TargetKind::Function(name)) => self.host.reflect_function(name)?.into(),
            None => return Err(ReflectError::invalid_target(target)),
        };
        debug!("[GET_REFLECTOR] resolved {}", reflector.name());
        Ok(reflector)
    }
}
