// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type rendering for generated accessors.

use quote::ToTokens;
use syn::Type;

/// Render `ty` the way it is usually written in source.
///
/// Token streams print with spaces around every punctuation token
/// (`Option < String >`, `& 'static str`); spacing after `&` and around
/// `<`, `>`, `::`, `,`, `;` and brackets is normalised.
pub fn type_name(ty: &Type) -> String {
    ty.to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" < ", "<")
        .replace("< ", "<")
        .replace(" <", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace(" ;", ";")
        .replace("& ", "&")
        .replace("[ ", "[")
        .replace(" ]", "]")
        .replace("( ", "(")
        .replace(" )", ")")
}
