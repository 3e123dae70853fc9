// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Accessor struct and `Mappable` impl generation.
//!
//! # Generated Code
//!
//! For `Person { id: i64, name: String }`:
//!
//! ```rust,ignore
//! #[derive(Clone, Copy, Debug)]
//! pub struct PersonMembers {
//!     pub id:   ::fluent_mapping::__private::Member<Person>,
//!     pub name: ::fluent_mapping::__private::Member<Person>
//! }
//!
//! impl ::fluent_mapping::__private::Mappable for Person {
//!     type Members = PersonMembers;
//!     const MEMBERS: PersonMembers = PersonMembers {
//!         id:   ::fluent_mapping::__private::Member::new("id").with_type_name("i64"),
//!         name: ::fluent_mapping::__private::Member::new("name").with_type_name("String")
//!     };
//!     const MEMBER_NAMES: &'static [&'static str] = &["id", "name"];
//! }
//! ```
//!
//! Paths go through the hidden `fluent_mapping::__private` module, so a
//! crate depending only on `fluent-mapping` can expand the derive.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{MappableDef, MemberDef};

/// Generate the accessor struct and the trait impl.
pub fn generate(def: &MappableDef) -> TokenStream {
    let entity = &def.ident;
    let vis = &def.vis;
    let members_ident = &def.members_ident;

    let struct_doc = format!("Member accessors of `{entity}`.");
    let fields = def.members().map(|m| field(entity, m));
    let values = def.members().map(value);
    let names = def.members().map(MemberDef::name);

    quote! {
        #[doc = #struct_doc]
        #[derive(Clone, Copy, Debug)]
        #vis struct #members_ident {
            #(#fields),*
        }

        impl ::fluent_mapping::__private::Mappable for #entity {
            type Members = #members_ident;

            const MEMBERS: #members_ident = #members_ident {
                #(#values),*
            };

            const MEMBER_NAMES: &'static [&'static str] = &[#(#names),*];
        }
    }
}

fn field(entity: &syn::Ident, member: &MemberDef) -> TokenStream {
    let ident = &member.ident;
    let doc = format!("Accessor for `{entity}::{ident}`.");
    quote! {
        #[doc = #doc]
        pub #ident: ::fluent_mapping::__private::Member<#entity>
    }
}

fn value(member: &MemberDef) -> TokenStream {
    let ident = &member.ident;
    let name = member.name();
    let type_name = member.type_name();
    let doc = member.doc.as_ref().map(|doc| quote!(.with_doc(#doc)));
    quote! {
        #ident: ::fluent_mapping::__private::Member::new(#name).with_type_name(#type_name) #doc
    }
}
