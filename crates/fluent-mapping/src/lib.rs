// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # fluent-mapping
//!
//! One crate, all features. Re-exports:
//! - [`Mappable`](macro@Mappable) derive macro from `fluent-mapping-impl`
//! - All types from `fluent-mapping-core` ([`EntityMapping`],
//!   [`EntityTypeBuilder`], [`FluentMapping`], [`MapperClient`], ...)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fluent_mapping::prelude::*;
//!
//! #[derive(Mappable)]
//! pub struct Person {
//!     pub id: i64,
//!     pub name: String,
//! }
//!
//! struct PersonMap;
//!
//! impl EntityMapping for PersonMap {
//!     type Entity = Person;
//!
//!     fn configure(&self, builder: &mut EntityTypeBuilder<Person>) -> Result<(), MappingError> {
//!         builder.to_table("tbl_person");
//!         builder.property(|m| m.id)?.is_primary_key().is_identity();
//!         builder.property(|m| m.name)?.column_name("full_name").is_not_null();
//!         Ok(())
//!     }
//! }
//!
//! client.apply_fluent_mapping(FluentMapping::new().with(PersonMap))?;
//! ```

pub use fluent_mapping_core::*;
pub use fluent_mapping_impl::Mappable;

/// Paths used by `#[derive(Mappable)]` expansions. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use fluent_mapping_core::{Mappable, Member};
}

/// Convenient re-exports for writing mappings, including the derive macro.
pub mod prelude {
    pub use fluent_mapping_core::prelude::*;
    pub use fluent_mapping_impl::Mappable;
}
