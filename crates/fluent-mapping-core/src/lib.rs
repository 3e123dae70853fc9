// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core traits and types for fluent-mapping.
//!
//! Fluent mappings describe how entity types map to database tables and
//! columns through chained builder calls written in code, and apply those
//! descriptions to an external mapper's metadata through two hooks.
//!
//! # Overview
//!
//! - [`EntityMapping`] — One mapping definition per entity type
//! - [`EntityTypeBuilder`] / [`PropertyBuilder`] — Fluent builders over metadata records
//! - [`Mappable`] / [`Member`] — Typed member accessors, usually derived
//! - [`BuilderFactories`] — Cache of builder constructors per record type
//! - [`apply_fluent_mapping`] / [`FluentMapping`] — Hook registration on a [`MapperClient`]
//! - [`prelude`] — Convenient re-exports
//!
//! # Module Structure
//!
//! ```text
//! fluent-mapping-core/src/
//! ├── lib.rs          — Crate root and re-exports
//! ├── error.rs        — MappingError
//! ├── metadata.rs     — Records, entity type identity, relation descriptors
//! ├── member.rs       — Mappable, Member, Expression
//! ├── builder.rs      — EntityTypeBuilder, PropertyBuilder
//! ├── factory.rs      — Constructible, BuilderFactory, BuilderFactories
//! ├── mapping.rs      — EntityMapping, ErasedMapping, MappingWrapper
//! ├── services.rs     — MapperClient and hook slots
//! ├── registration.rs — apply_fluent_mapping, FluentMapping, options
//! └── prelude.rs      — Re-exports
//! ```
//!
//! # Usage
//!
//! Most users should use `fluent-mapping` directly, which re-exports this
//! crate together with `#[derive(Mappable)]`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod builder;
mod error;
mod factory;
mod mapping;
mod member;
mod metadata;
pub mod prelude;
mod registration;
mod services;

pub use builder::{EntityTypeBuilder, PropertyBuilder};
pub use error::MappingError;
pub use factory::{
    BuilderFactories, BuilderFactory, Constructible, Constructor, ConstructorTier, ParamInfo
};
pub use mapping::{EntityMapping, ErasedMapping, MappingWrapper, into_erased};
pub use member::{Expression, Mappable, Member};
pub use metadata::{
    ColumnMetadata, ColumnRecord, EntityMetadata, EntityRecord, EntitySnapshot, EntityType,
    Junction, MemberInfo, MetadataRecord, Navigation, NavigationKind, Record, RecordKind
};
pub use registration::{
    FluentMapping, FluentMappingExt, FluentMappingOptions, Registration, apply_fluent_mapping
};
pub use services::{
    ConnectionConfig, EntityNameService, EntityService, ExternalServices, MapperClient
};
