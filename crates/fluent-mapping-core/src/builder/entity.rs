// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level builder.

use std::{fmt, marker::PhantomData};

use tracing::trace;

use super::PropertyBuilder;
use crate::{
    ColumnRecord, Constructible, Constructor, EntityRecord, EntityType, Expression, Mappable,
    MappingError
};

/// Record a builder was constructed around.
enum Scope {
    Entity(EntityRecord),
    Column(ColumnRecord)
}

/// Fluent builder handed to [`EntityMapping::configure`](crate::EntityMapping::configure).
///
/// Wraps exactly one record: the entity's table record while the mapper
/// visits the entity, or one column record while it visits a property.
///
/// # Example
///
/// ```rust,ignore
/// fn configure(&self, builder: &mut EntityTypeBuilder<Person>) -> Result<(), MappingError> {
///     builder.to_table("tbl_person");
///     builder
///         .property(|m| m.name)?
///         .column_name("full_name")
///         .has_max_length(100)
///         .is_not_null();
///     Ok(())
/// }
/// ```
pub struct EntityTypeBuilder<T> {
    scope:   Scope,
    _entity: PhantomData<fn() -> T>
}

impl<T: Mappable> EntityTypeBuilder<T> {
    /// Builder in table scope.
    pub fn for_entity(record: EntityRecord) -> Self {
        Self {
            scope:   Scope::Entity(record),
            _entity: PhantomData
        }
    }

    /// Builder in column scope.
    pub fn for_column(record: ColumnRecord) -> Self {
        Self {
            scope:   Scope::Column(record),
            _entity: PhantomData
        }
    }

    /// Entity type the builder configures.
    pub fn entity_type(&self) -> EntityType {
        EntityType::of::<T>()
    }

    /// Check if the builder wraps the entity's table record.
    pub fn is_entity_scope(&self) -> bool {
        matches!(self.scope, Scope::Entity(_))
    }

    /// Check if the builder wraps a column record.
    pub fn is_column_scope(&self) -> bool {
        matches!(self.scope, Scope::Column(_))
    }

    /// Set the database table name.
    ///
    /// No-op in column scope.
    pub fn to_table(&mut self, name: impl Into<String>) -> &mut Self {
        if let Scope::Entity(record) = &self.scope {
            record.write().db_table_name = name.into();
        }
        self
    }

    /// Builder for the property selected by `select`.
    ///
    /// Returns a live builder only in column scope and only if the visited
    /// column belongs to the selected property. Every other case yields a
    /// dummy builder whose methods do nothing.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidExpression`] if the selected expression
    /// is not a member access.
    pub fn property<E>(
        &self,
        select: impl FnOnce(&T::Members) -> E
    ) -> Result<PropertyBuilder<T>, MappingError>
    where
        E: Into<Expression<T>>
    {
        self.property_for(select(&T::MEMBERS).into())
    }

    /// Builder for the property called `name`.
    ///
    /// String-keyed form of [`property`](Self::property) for mappings
    /// written against entities without generated accessors.
    ///
    /// # Errors
    ///
    /// Never fails; returns `Result` to match [`property`](Self::property).
    pub fn property_named(&self, name: &'static str) -> Result<PropertyBuilder<T>, MappingError> {
        self.property_for(Expression::member_named(name))
    }

    fn property_for(&self, expression: Expression<T>) -> Result<PropertyBuilder<T>, MappingError> {
        let member = *expression.resolve()?;

        match &self.scope {
            Scope::Column(record) if record.read().property_name() == member.name() => {
                Ok(PropertyBuilder::for_member(record.clone(), member))
            }
            Scope::Column(record) => {
                trace!(
                    entity = %self.entity_type(),
                    property = member.name(),
                    visiting = record.read().property_name(),
                    "property does not match visited column"
                );
                Ok(PropertyBuilder::dummy())
            }
            Scope::Entity(_) => Ok(PropertyBuilder::dummy())
        }
    }
}

impl<T: Mappable> Constructible for EntityTypeBuilder<T> {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![
            Constructor::unary(Self::for_entity),
            Constructor::unary(Self::for_column)
        ]
    }
}

impl<T> fmt::Debug for EntityTypeBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = match &self.scope {
            Scope::Entity(record) => format!("entity `{}`", record.read().entity_name),
            Scope::Column(record) => format!("column `{}`", record.read().property_name())
        };
        f.debug_struct("EntityTypeBuilder")
            .field("entity", &std::any::type_name::<T>())
            .field("scope", &scope)
            .finish()
    }
}
