// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[derive(Mappable)]` implementation.
//!
//! # Module Structure
//!
//! ```text
//! mappable/
//! ├── parse.rs   — MappableDef, MemberDef (darling parsing)
//! └── members.rs — Accessor struct and Mappable impl generation
//! ```

mod members;
pub mod parse;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::MappableDef;

/// Main entry point for the Mappable derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match MappableDef::from_derive_input(&input) {
        Ok(def) => members::generate(&def).into(),
        Err(err) => err.write_errors().into()
    }
}
