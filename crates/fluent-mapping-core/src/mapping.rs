// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Mapping definitions and their type-erased form.
//!
//! A mapping is written once per entity type by implementing
//! [`EntityMapping`]. The registration layer stores mappings of different
//! entity types in one table, so each is boxed as an [`ErasedMapping`]
//! through [`MappingWrapper`].
//!
//! ```text
//! EntityMapping<Entity = Person>
//!         │ into_erased
//!         ▼
//! MappingWrapper<PersonMap> ── impl ErasedMapping
//!         │ configure(&dyn MetadataRecord)
//!         ▼
//! BuilderFactories::build::<EntityTypeBuilder<Person>>
//!         │
//!         ▼
//! PersonMap::configure(&mut EntityTypeBuilder<Person>)
//! ```

use std::fmt;

use tracing::trace;

use crate::{
    BuilderFactories, EntityType, EntityTypeBuilder, Mappable, MappingError, MetadataRecord
};

/// Fluent mapping definition for one entity type.
///
/// `configure` runs once for the entity's table record and once for each
/// column record, so it must describe the whole entity every time and stay
/// free of side effects other than builder calls.
///
/// # Example
///
/// ```rust,ignore
/// struct PersonMap;
///
/// impl EntityMapping for PersonMap {
///     type Entity = Person;
///
///     fn configure(&self, builder: &mut EntityTypeBuilder<Person>) -> Result<(), MappingError> {
///         builder.to_table("tbl_person");
///         builder.property(|m| m.id)?.is_primary_key().is_identity();
///         builder
///             .property(|m| m.name)?
///             .column_name("full_name")
///             .has_max_length(100)
///             .is_not_null();
///         Ok(())
///     }
/// }
/// ```
pub trait EntityMapping: Send + Sync + 'static {
    /// Entity type the mapping configures.
    type Entity: Mappable;

    /// Describe the entity through `builder`.
    ///
    /// # Errors
    ///
    /// Propagates errors from builder calls, plus any error the
    /// implementation raises itself (see [`MappingError::custom`]).
    fn configure(&self, builder: &mut EntityTypeBuilder<Self::Entity>) -> Result<(), MappingError>;
}

/// Mapping with its entity type erased.
pub trait ErasedMapping: Send + Sync {
    /// Entity type of the underlying mapping.
    fn entity_type(&self) -> EntityType;

    /// Build an entity builder around `record` and run the mapping on it.
    ///
    /// # Errors
    ///
    /// Propagates factory errors and errors from the mapping itself.
    fn configure(
        &self,
        record: &dyn MetadataRecord,
        factories: &BuilderFactories
    ) -> Result<(), MappingError>;
}

/// Adapter from a typed [`EntityMapping`] to [`ErasedMapping`].
pub struct MappingWrapper<M> {
    mapping: M
}

impl<M: EntityMapping> MappingWrapper<M> {
    /// Wrap `mapping`.
    pub const fn new(mapping: M) -> Self {
        Self {
            mapping
        }
    }

    /// Wrapped mapping.
    pub const fn inner(&self) -> &M {
        &self.mapping
    }
}

impl<M: EntityMapping> ErasedMapping for MappingWrapper<M> {
    fn entity_type(&self) -> EntityType {
        EntityType::of::<M::Entity>()
    }

    fn configure(
        &self,
        record: &dyn MetadataRecord,
        factories: &BuilderFactories
    ) -> Result<(), MappingError> {
        let entity = self.entity_type();
        trace!(entity = %entity, kind = ?record.kind(), "dispatching fluent mapping");

        let mut builder =
            factories.build::<EntityTypeBuilder<M::Entity>>(entity, record.as_any())?;
        self.mapping.configure(&mut builder)
    }
}

impl<M> fmt::Debug for MappingWrapper<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingWrapper")
            .field("mapping", &std::any::type_name::<M>())
            .finish()
    }
}

/// Box `mapping` as an [`ErasedMapping`].
pub fn into_erased<M: EntityMapping>(mapping: M) -> Box<dyn ErasedMapping> {
    Box::new(MappingWrapper::new(mapping))
}
