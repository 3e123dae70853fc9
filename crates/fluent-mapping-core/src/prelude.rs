// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for writing mappings.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fluent_mapping_core::prelude::*;
//! ```

pub use crate::{
    EntityMapping, EntityTypeBuilder, FluentMapping, FluentMappingExt, FluentMappingOptions,
    MapperClient, Mappable, MappingError, PropertyBuilder
};
