// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Attribute Quick Reference
//!
//! ```rust,ignore
//! #[derive(Mappable)]
//! #[mappable(members = "PersonColumns")] // Optional: accessor struct name
//! pub struct Person {
//!     pub id: i64,
//!
//!     /// Full name.                      // Carried into the accessor
//!     pub name: String,
//!
//!     #[mappable(skip)]                   // No accessor generated
//!     pub cache: Vec<u8>,
//! }
//! ```

mod mappable;
mod utils;

use proc_macro::TokenStream;

/// Derive typed member accessors for fluent mappings.
///
/// # Overview
///
/// Generates a `{Name}Members` struct with one
/// `fluent_mapping::Member<Name>` per field, and implements
/// `fluent_mapping::Mappable` for the entity. Mapping definitions then
/// select properties with closures instead of strings:
///
/// ```rust,ignore
/// builder.property(|m| m.name)?.column_name("full_name");
/// ```
///
/// # Attributes
///
/// | Attribute | Level | Description |
/// |-----------|-------|-------------|
/// | `#[mappable(members = "Ident")]` | struct | Rename the accessor struct |
/// | `#[mappable(skip)]` | field | Omit the field's accessor |
///
/// Field doc comments are attached to the accessors and can be stored as
/// column descriptions with `PropertyBuilder::description_from_doc`.
///
/// # Errors
///
/// Compile errors for enums, unions, tuple and unit structs, and generic
/// structs.
#[proc_macro_derive(Mappable, attributes(mappable))]
pub fn derive_mappable(input: TokenStream) -> TokenStream {
    mappable::derive(input)
}
