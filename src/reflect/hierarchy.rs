//! Ancestor walks: deep decorators, deep traits and interface checks.
//!
//! Walks keep the set of classes already visited and stop with
//! [`ReflectError::CircularInheritance`] if a class comes around again. On a
//! well-formed hierarchy the set never fires.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::trace;

use super::inspector::Inspector;
use super::target::Target;
use crate::base::Name;
use crate::error::{ReflectError, ReflectResult};
use crate::host::{ClassRef, Decorator, Host, MatchMode, Reflector};

impl<'h, H: Host + ?Sized> Inspector<'h, H> {
    /// Decorators of the target followed by those of each ancestor class.
    ///
    /// Results are appended level by level, leaf first, without deduplication. Method
    /// and function targets have no parent class, so only their own level is read.
    pub fn get_decorators_deep(
        &self,
        target: impl Into<Target>,
        metadata_type: &str,
        mode: MatchMode,
    ) -> ReflectResult<Vec<Decorator>> {
        let mut target = target.into();
        let mut decorators = Vec::new();
        let mut visited = FxHashSet::default();
        let mut level = 0usize;

        loop {
            let reflector = self.reflector_for(&target)?;
            if let Reflector::Class(class) = &reflector {
                Self::enter(&mut visited, class.name())?;
            }

            let found = self.decorators_of(&reflector, metadata_type, mode)?;
            trace!(
                "[DEEP_DECORATORS] level={} target={} found={}",
                level,
                reflector.name(),
                found.len()
            );
            decorators.extend(found);

            let Some(parent) = self.parent_of(&target, &reflector) else {
                break;
            };
            target = Target::from(parent);
            level += 1;
        }

        Ok(decorators)
    }

    /// Traits used by a class, its ancestors, and (one level deep) by those traits.
    ///
    /// Deduplicated case-insensitively; the first occurrence keeps its position.
    pub fn class_uses_deep(
        &self,
        target: impl Into<Target>,
        autoload: bool,
    ) -> ReflectResult<Vec<Name>> {
        let target = target.into();
        let class = match &target {
            Target::Object(object) => ClassRef::Object(object.clone()),
            Target::Name(name) => ClassRef::Name(Name::new(name)),
            Target::Reflector(Reflector::Class(class)) => ClassRef::Name(class.name().clone()),
            other => return Err(ReflectError::invalid_target(other)),
        };

        let mut traits: IndexSet<Name> = IndexSet::new();
        let mut visited = FxHashSet::default();
        let mut current = Some(class);

        while let Some(class) = current {
            Self::enter(&mut visited, class.name())?;
            let direct = self.host.class_uses(class.name().as_str(), autoload);
            trace!("[CLASS_USES_DEEP] {} uses {:?}", class.name(), direct);
            traits = prepend(direct, traits);
            current = self.host.parent_class(&class, autoload).map(ClassRef::Name);
        }

        let discovered: Vec<Name> = traits.iter().cloned().collect();
        for trait_name in discovered {
            let nested = self.host.class_uses(trait_name.as_str(), autoload);
            traits = prepend(nested, traits);
        }

        Ok(traits.into_iter().collect())
    }

    /// Whether the class of `thing` implements `interface`, directly or by
    /// inheritance. Unknown classes and non-class values yield `false`.
    pub fn class_implements(
        &self,
        thing: impl Into<Target>,
        interface: &str,
        autoload: bool,
    ) -> bool {
        let class = match thing.into() {
            Target::Object(object) => object.class_name().clone(),
            Target::Name(name) => Name::new(&name),
            _ => return false,
        };
        if !self.host.class_exists(class.as_str(), autoload) {
            return false;
        }
        self.host
            .class_implements(class.as_str(), autoload)
            .is_some_and(|interfaces| interfaces.iter().any(|name| name.matches(interface)))
    }

    /// Next level of a deep walk. Every start (handle, object or name) asks the
    /// host under the inspector's autoload flag.
    fn parent_of(&self, target: &Target, reflector: &Reflector) -> Option<Name> {
        let Reflector::Class(class) = reflector else {
            return None;
        };
        let class = match target {
            Target::Object(object) => ClassRef::Object(object.clone()),
            _ => ClassRef::Name(class.name().clone()),
        };
        self.host.parent_class(&class, self.autoload)
    }

    fn enter(visited: &mut FxHashSet<SmolStr>, class: &Name) -> ReflectResult<()> {
        if visited.insert(class.key()) {
            Ok(())
        } else {
            Err(ReflectError::CircularInheritance {
                class: class.clone(),
            })
        }
    }
}

/// `new` followed by `existing`, keeping the first occurrence of each name.
fn prepend(new: Vec<Name>, existing: IndexSet<Name>) -> IndexSet<Name> {
    let mut merged: IndexSet<Name> = new.into_iter().collect();
    merged.extend(existing);
    merged
}
