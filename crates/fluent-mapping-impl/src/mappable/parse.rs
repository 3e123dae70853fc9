// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for `#[derive(Mappable)]`.
//!
//! # Supported Attributes
//!
//! | Attribute | Level | Default | Description |
//! |-----------|-------|---------|-------------|
//! | `members = "Ident"` | struct | `{Name}Members` | Name of the generated accessor struct |
//! | `skip` | field | `false` | Omit the field's accessor |

use darling::{FromDeriveInput, FromField};
use quote::format_ident;
use syn::{DeriveInput, Field, Ident, Type, Visibility, ext::IdentExt};

use crate::utils::{docs::extract_doc_comments, types::type_name};

/// Struct-level attributes parsed from `#[mappable(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(mappable), supports(struct_named))]
pub struct MappableAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct visibility, reused for the accessor struct.
    pub vis: Visibility,

    /// Generics, rejected after parsing.
    pub generics: syn::Generics,

    /// Custom accessor struct name.
    #[darling(default)]
    pub members: Option<Ident>
}

/// Field-level attributes parsed from `#[mappable(...)]`.
#[derive(Debug, Default, FromField)]
#[darling(attributes(mappable))]
pub struct MemberAttrs {
    /// Omit the accessor.
    #[darling(default)]
    pub skip: bool
}

/// One mapped field.
#[derive(Debug)]
pub struct MemberDef {
    /// Field identifier.
    pub ident: Ident,

    /// Field type.
    pub ty: Type,

    /// Doc comment of the field.
    pub doc: Option<String>,

    /// Field carries `#[mappable(skip)]`.
    pub skip: bool
}

impl MemberDef {
    /// Parse a named field.
    ///
    /// # Errors
    ///
    /// Returns an error for unnamed fields or malformed attributes.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Mappable fields must be named").with_span(field)
        })?;
        let attrs = MemberAttrs::from_field(field)?;

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            doc: extract_doc_comments(&field.attrs),
            skip: attrs.skip
        })
    }

    /// Member name without the `r#` prefix of raw identifiers.
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Field type as written in the struct.
    pub fn type_name(&self) -> String {
        type_name(&self.ty)
    }
}

/// Parsed `#[derive(Mappable)]` input.
#[derive(Debug)]
pub struct MappableDef {
    /// Entity struct identifier.
    pub ident: Ident,

    /// Entity visibility.
    pub vis: Visibility,

    /// Accessor struct identifier.
    pub members_ident: Ident,

    /// All named fields, including skipped ones.
    pub fields: Vec<MemberDef>
}

impl MappableDef {
    /// Parse and validate the derive input.
    ///
    /// # Errors
    ///
    /// - Applied to an enum or union
    /// - Applied to a tuple or unit struct
    /// - Struct has generic parameters
    /// - Malformed `#[mappable(...)]` attributes
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = MappableAttrs::from_derive_input(input)?;

        if !attrs.generics.params.is_empty() {
            return Err(darling::Error::custom(
                "Mappable cannot be derived for generic structs"
            )
            .with_span(&attrs.generics));
        }

        let fields = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => named
                    .named
                    .iter()
                    .map(MemberDef::from_field)
                    .collect::<darling::Result<Vec<_>>>()?,
                _ => {
                    return Err(darling::Error::custom("Mappable requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Mappable can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        let members_ident = attrs
            .members
            .unwrap_or_else(|| format_ident!("{}Members", attrs.ident));

        Ok(Self {
            ident: attrs.ident,
            vis: attrs.vis,
            members_ident,
            fields
        })
    }

    /// Fields that get an accessor.
    pub fn members(&self) -> impl Iterator<Item = &MemberDef> {
        self.fields.iter().filter(|f| !f.skip)
    }
}
