// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Fluent builders over metadata records.
//!
//! # Module Structure
//!
//! ```text
//! builder/
//! ├── entity.rs   — EntityTypeBuilder (table scope or column scope)
//! └── property.rs — PropertyBuilder (live or dummy)
//! ```
//!
//! A mapping's `configure` runs once for the entity record and once for
//! every column record of that entity. The same `property(...)` calls
//! therefore execute for every column; each returns a live builder only when
//! the visited column is the one the expression names.

mod entity;
mod property;

pub use entity::EntityTypeBuilder;
pub use property::PropertyBuilder;
