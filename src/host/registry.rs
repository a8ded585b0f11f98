//! In-memory host.
//!
//! [`ClassRegistry`] stores class-likes, free functions and attribute constructors
//! keyed by lowercased name. Registration is append-only: a name is bound once and
//! never replaced, which keeps concurrent autoloading idempotent.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexSet;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::{debug, trace, warn};

use super::attribute::{AttributeDescriptor, Decorator, DecoratorValue};
use super::decl::{AttributeFlags, ClassDecl, ClassKind, FunctionDecl};
use super::reflector::{ClassRef, ClassReflector, FunctionReflector, MethodReflector, Object};
use super::Host;
use crate::base::{Arguments, ConstructError, Name, normalize_key};
use crate::error::{InstantiationError, ReflectError, ReflectResult};

/// Loads class-like declarations on demand.
///
/// Called with the requested name when a lookup with autoloading misses. Loaders run
/// in registration order until the class-like is known.
pub trait Autoloader: Send + Sync {
    fn load(&self, name: &str) -> Option<ClassDecl>;
}

impl<F> Autoloader for F
where
    F: Fn(&str) -> Option<ClassDecl> + Send + Sync,
{
    fn load(&self, name: &str) -> Option<ClassDecl> {
        self(name)
    }
}

type Constructor =
    Arc<dyn Fn(&Arguments) -> Result<DecoratorValue, ConstructError> + Send + Sync>;

/// Thread-safe, append-only registry of declarations.
#[derive(Default)]
pub struct ClassRegistry {
    /// Lowercased name -> class-like.
    class_likes: RwLock<FxHashMap<SmolStr, Arc<ClassDecl>>>,
    /// Lowercased name -> free function.
    functions: RwLock<FxHashMap<SmolStr, Arc<FunctionDecl>>>,
    /// Lowercased attribute class name -> constructor.
    constructors: RwLock<FxHashMap<SmolStr, Constructor>>,
    autoloaders: RwLock<Vec<Arc<dyn Autoloader>>>,
    next_object_id: AtomicU64,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class-like. Fails if the name is already bound.
    pub fn declare(&self, decl: ClassDecl) -> ReflectResult<()> {
        let key = decl.name.key();
        let mut class_likes = self.class_likes.write();
        if class_likes.contains_key(&key) {
            return Err(ReflectError::AlreadyDeclared {
                kind: decl.kind.display(),
                name: decl.name,
            });
        }
        trace!("[REGISTRY] declare {} {}", decl.kind.display(), decl.name);
        class_likes.insert(key, Arc::new(decl));
        Ok(())
    }

    /// Register a free function. Fails if the name is already bound.
    pub fn declare_function(&self, decl: FunctionDecl) -> ReflectResult<()> {
        let key = decl.name.key();
        let mut functions = self.functions.write();
        if functions.contains_key(&key) {
            return Err(ReflectError::AlreadyDeclared {
                kind: "function",
                name: decl.name,
            });
        }
        functions.insert(key, Arc::new(decl));
        Ok(())
    }

    /// Register the constructor used to instantiate attribute class `class`.
    ///
    /// A later registration for the same class replaces the earlier one.
    pub fn register_constructor<T, F>(&self, class: &str, constructor: F)
    where
        T: Any + Send + Sync,
        F: Fn(&Arguments) -> Result<T, ConstructError> + Send + Sync + 'static,
    {
        let constructor: Constructor = Arc::new(move |args: &Arguments| {
            constructor(args).map(|value| Arc::new(value) as DecoratorValue)
        });
        self.constructors
            .write()
            .insert(normalize_key(class), constructor);
    }

    pub fn register_autoloader(&self, autoloader: impl Autoloader + 'static) {
        self.autoloaders.write().push(Arc::new(autoloader));
    }

    /// Create an instance of a concrete class.
    pub fn new_object(&self, class: &str) -> ReflectResult<Object> {
        let decl = self
            .class_like(class, true)
            .ok_or_else(|| ReflectError::class_not_found(class))?;
        if decl.kind != ClassKind::Class || decl.is_abstract {
            let kind = if decl.is_abstract && decl.kind == ClassKind::Class {
                "abstract class"
            } else {
                decl.kind.display()
            };
            return Err(ReflectError::NotInstantiable {
                kind,
                name: decl.name.clone(),
            });
        }
        let id = self.next_object_id.fetch_add(1, Ordering::Relaxed);
        Ok(Object::new(id, decl))
    }

    /// Look up a class-like, optionally running the autoloaders on a miss.
    pub fn class_like(&self, name: &str, autoload: bool) -> Option<Arc<ClassDecl>> {
        let key = normalize_key(name);
        if let Some(decl) = self.class_likes.read().get(&key) {
            return Some(Arc::clone(decl));
        }
        if autoload {
            self.autoload(name, &key)
        } else {
            None
        }
    }

    pub fn function(&self, name: &str) -> Option<Arc<FunctionDecl>> {
        self.functions.read().get(&normalize_key(name)).cloned()
    }

    fn autoload(&self, name: &str, key: &SmolStr) -> Option<Arc<ClassDecl>> {
        // Snapshot so no lock is held while loaders run.
        let loaders: Vec<Arc<dyn Autoloader>> = self.autoloaders.read().clone();
        for loader in loaders {
            if let Some(decl) = loader.load(name) {
                let loaded_key = decl.name.key();
                debug!("[AUTOLOAD] {} loaded {}", name, decl.name);
                self.class_likes
                    .write()
                    .entry(loaded_key)
                    .or_insert_with(|| Arc::new(decl));
            }
            if let Some(decl) = self.class_likes.read().get(key) {
                return Some(Arc::clone(decl));
            }
        }
        None
    }

    fn class_for(&self, class: &ClassRef, autoload: bool) -> Option<Arc<ClassDecl>> {
        match class {
            ClassRef::Object(object) => Some(Arc::clone(object.class())),
            ClassRef::Name(name) => self.class_like(name.as_str(), autoload),
        }
    }

    /// Find a method on `class`: own methods, then methods composed from traits,
    /// then the parent chain.
    ///
    /// Returns the class the method belongs to, the class-like holding the body, and
    /// the method's index in that body.
    fn find_method(
        &self,
        class: &Arc<ClassDecl>,
        method: &str,
        autoload: bool,
    ) -> Option<(Arc<ClassDecl>, Arc<ClassDecl>, usize)> {
        let mut visited = FxHashSet::default();
        let mut current = Some(Arc::clone(class));
        while let Some(decl) = current {
            if !visited.insert(decl.name.key()) {
                break;
            }
            if let Some(index) = decl.method_index(method) {
                return Some((Arc::clone(&decl), Arc::clone(&decl), index));
            }
            if let Some((origin, index)) = self.find_trait_method(&decl, method, autoload) {
                return Some((decl, origin, index));
            }
            current = decl
                .parent
                .as_ref()
                .and_then(|parent| self.class_like(parent.as_str(), autoload));
        }
        None
    }

    fn find_trait_method(
        &self,
        class: &ClassDecl,
        method: &str,
        autoload: bool,
    ) -> Option<(Arc<ClassDecl>, usize)> {
        let mut visited = FxHashSet::default();
        let mut stack: Vec<Name> = class.traits.iter().rev().cloned().collect();
        while let Some(trait_name) = stack.pop() {
            if !visited.insert(trait_name.key()) {
                continue;
            }
            let Some(trait_decl) = self.class_like(trait_name.as_str(), autoload) else {
                continue;
            };
            if let Some(index) = trait_decl.method_index(method) {
                return Some((trait_decl, index));
            }
            stack.extend(trait_decl.traits.iter().rev().cloned());
        }
        None
    }

    /// Interfaces implemented by `class` and its ancestors, including interfaces
    /// those interfaces extend. First-seen order.
    fn all_interfaces(&self, class: &Arc<ClassDecl>, autoload: bool) -> Vec<Name> {
        let mut interfaces: IndexSet<Name> = IndexSet::new();
        let mut visited_classes = FxHashSet::default();
        let mut current = Some(Arc::clone(class));

        while let Some(decl) = current {
            if !visited_classes.insert(decl.name.key()) {
                break;
            }
            let mut stack: Vec<Name> = decl.interfaces.iter().rev().cloned().collect();
            while let Some(interface) = stack.pop() {
                let Some(interface_decl) = self.class_like(interface.as_str(), autoload) else {
                    continue;
                };
                if interfaces.insert(interface_decl.name.clone()) {
                    stack.extend(interface_decl.interfaces.iter().rev().cloned());
                }
            }
            current = decl
                .parent
                .as_ref()
                .and_then(|parent| self.class_like(parent.as_str(), autoload));
        }

        interfaces.into_iter().collect()
    }

    fn check_instantiable(
        &self,
        descriptor: &AttributeDescriptor,
        flags: AttributeFlags,
    ) -> Result<(), InstantiationError> {
        let target = descriptor.target();
        if !flags.contains(target.flag()) {
            return Err(InstantiationError::TargetNotAllowed {
                attribute: descriptor.name().clone(),
                target: target.display(),
                allowed: flags.describe_targets(),
            });
        }
        if descriptor.is_repeated() && !flags.contains(AttributeFlags::IS_REPEATABLE) {
            return Err(InstantiationError::NotRepeatable(descriptor.name().clone()));
        }
        Ok(())
    }
}

impl Host for ClassRegistry {
    fn class_exists(&self, name: &str, autoload: bool) -> bool {
        self.class_like(name, autoload)
            .is_some_and(|decl| decl.kind.is_class())
    }

    fn class_like_exists(&self, name: &str, autoload: bool) -> bool {
        self.class_like(name, autoload).is_some()
    }

    fn function_exists(&self, name: &str) -> bool {
        self.function(name).is_some()
    }

    fn is_callable_method(&self, owner: &ClassRef, method: &str, autoload: bool) -> bool {
        let Some(class) = self.class_for(owner, autoload) else {
            return false;
        };
        let Some((_, origin, index)) = self.find_method(&class, method, autoload) else {
            return false;
        };
        let method = &origin.methods[index];
        // A class name is a static context.
        method.is_public() && (method.is_static || matches!(owner, ClassRef::Object(_)))
    }

    fn is_callable_name(&self, name: &str, autoload: bool) -> bool {
        if self.function_exists(name) {
            return true;
        }
        let Some((class, method)) = name.split_once("::") else {
            return false;
        };
        self.is_callable_method(&ClassRef::Name(Name::new(class)), method, autoload)
    }

    fn is_a(&self, class: &str, ancestor: &str, autoload: bool) -> bool {
        let Some(decl) = self.class_like(class, autoload) else {
            return false;
        };

        let mut visited = FxHashSet::default();
        let mut current = Some(Arc::clone(&decl));
        while let Some(decl) = current {
            if !visited.insert(decl.name.key()) {
                break;
            }
            if decl.name.matches(ancestor) {
                return true;
            }
            current = decl
                .parent
                .as_ref()
                .and_then(|parent| self.class_like(parent.as_str(), autoload));
        }

        self.all_interfaces(&decl, autoload)
            .iter()
            .any(|interface| interface.matches(ancestor))
    }

    fn reflect_class(&self, class: &ClassRef) -> ReflectResult<ClassReflector> {
        self.class_for(class, true)
            .map(ClassReflector::new)
            .ok_or_else(|| ReflectError::class_not_found(class.name().as_str()))
    }

    fn reflect_method(&self, owner: &ClassRef, method: &str) -> ReflectResult<MethodReflector> {
        let class = self
            .class_for(owner, true)
            .ok_or_else(|| ReflectError::class_not_found(owner.name().as_str()))?;
        self.find_method(&class, method, true)
            .and_then(|(declaring, origin, index)| MethodReflector::new(declaring, origin, index))
            .ok_or_else(|| ReflectError::method_not_found(class.name.as_str(), method))
    }

    fn reflect_function(&self, name: &str) -> ReflectResult<FunctionReflector> {
        self.function(name)
            .map(FunctionReflector::new)
            .ok_or_else(|| ReflectError::FunctionNotFound(name.to_string()))
    }

    fn instantiate(&self, descriptor: &AttributeDescriptor) -> ReflectResult<Decorator> {
        let name = descriptor.name();
        let class = self
            .class_like(name.as_str(), true)
            .ok_or_else(|| InstantiationError::ClassNotFound(name.clone()))?;
        let flags = class
            .attribute_flags
            .ok_or_else(|| InstantiationError::NotAnAttribute(class.name.clone()))?;
        self.check_instantiable(descriptor, flags)?;

        let constructor = self.constructors.read().get(&class.name.key()).cloned();
        let value: DecoratorValue = match constructor {
            Some(constructor) => constructor(descriptor.arguments()).map_err(|source| {
                InstantiationError::Constructor {
                    attribute: class.name.clone(),
                    source,
                }
            })?,
            None if descriptor.arguments().is_empty() => Arc::new(()),
            None => return Err(InstantiationError::UnexpectedArguments(class.name.clone()).into()),
        };

        trace!("[INSTANTIATE] {} on {}", class.name, descriptor.target().display());
        Ok(Decorator::new(class.name.clone(), value))
    }

    fn parent_class(&self, class: &ClassRef, autoload: bool) -> Option<Name> {
        let decl = self.class_for(class, autoload)?;
        let parent = decl.parent.as_ref()?;
        match self.class_like(parent.as_str(), autoload) {
            Some(parent_decl) => Some(parent_decl.name.clone()),
            None if autoload => {
                warn!(
                    "[PARENT_CLASS] parent {} of {} cannot be loaded",
                    parent, decl.name
                );
                None
            }
            None => {
                trace!("[PARENT_CLASS] parent {} of {} is not loaded", parent, decl.name);
                None
            }
        }
    }

    fn class_uses(&self, class: &str, autoload: bool) -> Vec<Name> {
        match self.class_like(class, autoload) {
            Some(decl) => decl.traits.clone(),
            None => {
                trace!("[CLASS_USES] {} does not exist", class);
                Vec::new()
            }
        }
    }

    fn class_implements(&self, class: &str, autoload: bool) -> Option<Vec<Name>> {
        let decl = self.class_like(class, autoload)?;
        Some(self.all_interfaces(&decl, autoload))
    }
}
