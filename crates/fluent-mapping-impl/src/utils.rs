// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared utilities for code generation.
//!
//! # Submodules
//!
//! - [`docs`] — Doc comment extraction
//! - [`types`] — Source-like rendering of field types

pub mod docs;
pub mod types;
