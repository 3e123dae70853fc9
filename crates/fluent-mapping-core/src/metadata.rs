// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Metadata records owned by the external mapper.
//!
//! The mapper creates one [`EntityMetadata`] per entity type and one
//! [`ColumnMetadata`] per property, then hands them to the installed hooks
//! through shared [`Record`] handles. Builders mutate the records in place;
//! a record is never replaced.
//!
//! # Overview
//!
//! - [`EntityType`] — Type identity of a mapped entity
//! - [`Record`] — Shared, lockable handle around a metadata value
//! - [`EntityMetadata`] / [`ColumnMetadata`] — Table and column descriptors
//! - [`Navigation`] — Relation descriptor attached to a column
//! - [`MemberInfo`] — Property visited by the property-level hook
//! - [`MetadataRecord`] — Object-safe view used by type-erased dispatch

use std::{
    any::{Any, TypeId},
    fmt,
    hash::{Hash, Hasher},
    sync::Arc
};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Type identity of an entity.
///
/// Equality and hashing use the [`TypeId`] only; the type name is kept for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct EntityType {
    id:   TypeId,
    name: &'static str
}

impl EntityType {
    /// Identity of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id:   TypeId::of::<T>(),
            name: std::any::type_name::<T>()
        }
    }

    /// Underlying [`TypeId`].
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Fully-qualified type name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path or generic arguments.
    ///
    /// ```rust
    /// use fluent_mapping_core::EntityType;
    ///
    /// struct Person;
    /// assert_eq!(EntityType::of::<Person>().short_name(), "Person");
    /// ```
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// Check if this is the identity of `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EntityType {}

impl Hash for EntityType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Shared handle around a metadata value.
///
/// Cloning the handle shares the same underlying record, so a builder
/// holding a clone mutates what the mapper sees.
pub struct Record<M>(Arc<RwLock<M>>);

/// Handle to an entity-level record.
pub type EntityRecord = Record<EntityMetadata>;

/// Handle to a column-level record.
pub type ColumnRecord = Record<ColumnMetadata>;

impl<M> Record<M> {
    /// Wrap a metadata value in a new shared handle.
    pub fn new(value: M) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Lock the record for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, M> {
        self.0.read()
    }

    /// Lock the record for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, M> {
        self.0.write()
    }

    /// Check if both handles point at the same record.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<M: Clone> Record<M> {
    /// Copy of the current value.
    pub fn snapshot(&self) -> M {
        self.read().clone()
    }
}

impl<M> Clone for Record<M> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<M> From<M> for Record<M> {
    fn from(value: M) -> Self {
        Self::new(value)
    }
}

impl<M: fmt::Debug> fmt::Debug for Record<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Record").field(&*self.read()).finish()
    }
}

/// Kind of metadata record passed to a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Table-level record ([`EntityMetadata`]).
    Entity,

    /// Column-level record ([`ColumnMetadata`]).
    Column
}

/// Object-safe view over a metadata record handle.
///
/// Lets the registration layer hand either kind of record to a type-erased
/// mapping, which then converts it back through the builder-factory cache.
pub trait MetadataRecord: Any + Send + Sync {
    /// Kind of the record.
    fn kind(&self) -> RecordKind;

    /// The handle as [`Any`], used as a constructor argument.
    fn as_any(&self) -> &dyn Any;
}

impl MetadataRecord for EntityRecord {
    fn kind(&self) -> RecordKind {
        RecordKind::Entity
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl MetadataRecord for ColumnRecord {
    fn kind(&self) -> RecordKind {
        RecordKind::Column
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Table-level metadata for one entity type.
#[derive(Debug, Clone, Default)]
pub struct EntityMetadata {
    /// Entity name as known to the mapper.
    pub entity_name: String,

    /// Database table name. Defaults to the entity name.
    pub db_table_name: String,

    /// Optional table description.
    pub table_description: Option<String>,

    /// Column records, in declaration order.
    pub columns: Vec<ColumnRecord>
}

impl EntityMetadata {
    /// Create metadata whose table name defaults to the entity name.
    pub fn new(entity_name: impl Into<String>) -> Self {
        let entity_name = entity_name.into();
        Self {
            db_table_name: entity_name.clone(),
            entity_name,
            table_description: None,
            columns: Vec::new()
        }
    }

    /// Append a column record.
    pub fn with_column(mut self, column: ColumnMetadata) -> Self {
        self.columns.push(Record::new(column));
        self
    }

    /// Find the column record for a property.
    pub fn column(&self, property: &str) -> Option<ColumnRecord> {
        self.columns
            .iter()
            .find(|c| c.read().property_name() == property)
            .cloned()
    }

    /// Plain copy of the entity and all of its columns.
    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            entity_name:       self.entity_name.clone(),
            db_table_name:     self.db_table_name.clone(),
            table_description: self.table_description.clone(),
            columns:           self.columns.iter().map(Record::snapshot).collect()
        }
    }
}

/// Detached copy of an [`EntityMetadata`] with plain columns.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySnapshot {
    /// Entity name as known to the mapper.
    pub entity_name:       String,
    /// Database table name.
    pub db_table_name:     String,
    /// Optional table description.
    pub table_description: Option<String>,
    /// Column values, in declaration order.
    pub columns:           Vec<ColumnMetadata>
}

/// Column-level metadata for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnMetadata {
    property_name: String,

    /// Database column name. Defaults to the property name.
    pub db_column_name: String,

    /// Column is part of the primary key.
    pub is_primary_key: bool,

    /// Column is generated by the database (auto-increment).
    pub is_identity: bool,

    /// Maximum length, if constrained.
    pub length: Option<u32>,

    /// Column accepts `NULL`.
    pub is_nullable: bool,

    /// Property is not mapped to any column.
    pub is_ignore: bool,

    /// Column is skipped by `INSERT` statements.
    pub is_only_ignore_insert: bool,

    /// Column is skipped by `UPDATE` statements.
    pub is_only_ignore_update: bool,

    /// Column description stored in the database.
    pub column_description: Option<String>,

    /// Relation descriptor for navigation properties.
    pub navigation: Option<Navigation>
}

impl ColumnMetadata {
    /// Create column metadata for a property.
    ///
    /// The column name defaults to the property name and the column is
    /// nullable until configured otherwise.
    pub fn new(property_name: impl Into<String>) -> Self {
        let property_name = property_name.into();
        Self {
            db_column_name: property_name.clone(),
            property_name,
            is_primary_key: false,
            is_identity: false,
            length: None,
            is_nullable: true,
            is_ignore: false,
            is_only_ignore_insert: false,
            is_only_ignore_update: false,
            column_description: None,
            navigation: None
        }
    }

    /// Property name this column belongs to.
    ///
    /// This is the key builders match against; it cannot be changed after
    /// construction.
    pub fn property_name(&self) -> &str {
        &self.property_name
    }
}

/// Kind of relation carried by a [`Navigation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationKind {
    /// One related entity.
    OneToOne,

    /// Many related entities referencing this one.
    OneToMany,

    /// Many related entities through a junction entity.
    ManyToMany
}

/// Relation descriptor attached to a navigation column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Navigation {
    /// Relation kind.
    pub kind:      NavigationKind,
    /// Property of the declaring entity the relation is keyed on.
    pub property:  String,
    /// First join key name.
    pub first_key: String,
    /// Optional second join key name.
    pub last_key:  Option<String>,
    /// Junction entity for many-to-many relations.
    pub junction:  Option<Junction>
}

/// Junction entity of a many-to-many relation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Junction {
    /// Type name of the junction entity.
    pub entity_name: String,
    /// Junction key referencing the declaring entity.
    pub a_key:       String,
    /// Junction key referencing the related entity.
    pub b_key:       String,
    #[cfg_attr(feature = "serde", serde(skip))]
    type_id:         Option<TypeId>
}

impl Junction {
    /// Junction through entity `J`.
    pub fn of<J: 'static>(a_key: impl Into<String>, b_key: impl Into<String>) -> Self {
        let entity = EntityType::of::<J>();
        Self {
            entity_name: entity.short_name().to_string(),
            a_key:       a_key.into(),
            b_key:       b_key.into(),
            type_id:     Some(entity.id())
        }
    }

    /// Check if the junction entity is `J`.
    ///
    /// Always `false` for junctions restored from a serialised form.
    pub fn is<J: 'static>(&self) -> bool {
        self.type_id == Some(TypeId::of::<J>())
    }
}

/// Property visited by the property-level hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    /// Property name.
    pub name:           String,
    /// Entity type declaring the property, if any.
    pub declaring_type: Option<EntityType>
}

impl MemberInfo {
    /// Member without a declaring type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:           name.into(),
            declaring_type: None
        }
    }

    /// Member declared by entity `T`.
    pub fn declared_by<T: 'static>(name: impl Into<String>) -> Self {
        Self {
            name:           name.into(),
            declaring_type: Some(EntityType::of::<T>())
        }
    }
}
