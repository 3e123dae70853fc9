// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Documentation extraction utilities.
//!
//! Field doc comments are carried into the generated accessors, where
//! `PropertyBuilder::description_from_doc` turns them into column
//! descriptions.
//!
//! # Doc Comment Format
//!
//! Doc comments (`///` and `/** */`) are stored as `#[doc = "..."]`
//! attributes. Each line is trimmed and lines are joined with `\n`.
//!
//! ```rust,ignore
//! /// Full name of the person.
//! ///
//! /// Shown on invoices.
//! pub name: String,
//!
//! // Extracts to: "Full name of the person.\n\nShown on invoices."
//! ```

use syn::Attribute;

/// Extract doc comments from attributes.
///
/// Returns `None` if there are no doc attributes or they are all blank.
pub fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let doc_lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| {
            if let syn::Meta::NameValue(meta) = &attr.meta
                && let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit_str),
                    ..
                }) = &meta.value
            {
                return Some(lit_str.value());
            }
            None
        })
        .collect();

    let combined = doc_lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed = combined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_attrs(input: syn::FieldsNamed) -> Vec<Attribute> {
        input
            .named
            .into_iter()
            .next()
            .map(|field| field.attrs)
            .unwrap_or_default()
    }

    #[test]
    fn extract_single_line_doc() {
        let attrs = field_attrs(syn::parse_quote!({
            /// Full name.
            name: String
        }));
        assert_eq!(extract_doc_comments(&attrs), Some("Full name.".to_string()));
    }

    #[test]
    fn extract_multi_line_doc() {
        let attrs = field_attrs(syn::parse_quote!({
            /// Full name.
            ///
            /// Shown on invoices.
            name: String
        }));
        assert_eq!(
            extract_doc_comments(&attrs),
            Some("Full name.\n\nShown on invoices.".to_string())
        );
    }

    #[test]
    fn ignores_other_attributes() {
        let attrs = field_attrs(syn::parse_quote!({
            #[mappable(skip)]
            name: String
        }));
        assert_eq!(extract_doc_comments(&attrs), None);
    }

    #[test]
    fn blank_doc_is_none() {
        let attrs = field_attrs(syn::parse_quote!({
            ///
            name: String
        }));
        assert_eq!(extract_doc_comments(&attrs), None);
    }
}
