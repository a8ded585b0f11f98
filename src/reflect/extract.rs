//! Attribute and decorator extraction for a single declaration.

use super::inspector::Inspector;
use super::target::Target;
use crate::error::ReflectResult;
use crate::host::{AttributeDescriptor, Decorator, Host, MatchMode, Reflector};

impl<'h, H: Host + ?Sized> Inspector<'h, H> {
    /// Attributes of type `metadata_type` attached to the target, in declaration order.
    pub fn get_attributes(
        &self,
        target: impl Into<Target>,
        metadata_type: &str,
        mode: MatchMode,
    ) -> ReflectResult<Vec<AttributeDescriptor>> {
        let reflector = self.get_reflector(target)?;
        self.host.attributes(&reflector, metadata_type, mode)
    }

    /// The attribute at `index` of [`get_attributes`](Self::get_attributes), or `None`
    /// when out of range.
    pub fn get_attribute(
        &self,
        target: impl Into<Target>,
        metadata_type: &str,
        index: usize,
        mode: MatchMode,
    ) -> ReflectResult<Option<AttributeDescriptor>> {
        Ok(self
            .get_attributes(target, metadata_type, mode)?
            .into_iter()
            .nth(index))
    }

    /// Instantiated attributes of type `metadata_type`.
    ///
    /// The first instantiation failure aborts the whole call.
    pub fn get_decorators(
        &self,
        target: impl Into<Target>,
        metadata_type: &str,
        mode: MatchMode,
    ) -> ReflectResult<Vec<Decorator>> {
        let reflector = self.get_reflector(target)?;
        self.decorators_of(&reflector, metadata_type, mode)
    }

    /// The decorator at `index` of [`get_decorators`](Self::get_decorators), or `None`
    /// when out of range. Every matching attribute is instantiated.
    pub fn get_decorator(
        &self,
        target: impl Into<Target>,
        metadata_type: &str,
        index: usize,
        mode: MatchMode,
    ) -> ReflectResult<Option<Decorator>> {
        Ok(self
            .get_decorators(target, metadata_type, mode)?
            .into_iter()
            .nth(index))
    }

    pub(super) fn decorators_of(
        &self,
        reflector: &Reflector,
        metadata_type: &str,
        mode: MatchMode,
    ) -> ReflectResult<Vec<Decorator>> {
        self.host
            .attributes(reflector, metadata_type, mode)?
            .iter()
            .map(|attribute| self.host.instantiate(attribute))
            .collect()
    }
}
