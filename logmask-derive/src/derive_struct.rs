//! Struct-specific member-table derivation.
//!
//! Named fields are reported under their identifier. Tuple fields have no
//! name, so they never match a rule and only carry explicit directives.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{ext::IdentExt, DataStruct, Fields, Result};

use crate::member::{member_entry, MemberContext};

pub(crate) struct StructDeriveOutput {
    pub(crate) members: Vec<TokenStream>,
    pub(crate) masked_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    data: &DataStruct,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    let mut members = Vec::new();
    let mut masked_generics = Vec::new();
    let mut ctx = MemberContext {
        generics,
        masked_generics: &mut masked_generics,
    };

    match &data.fields {
        Fields::Named(fields) => {
            for field in &fields.named {
                let Some(ident) = &field.ident else {
                    continue;
                };
                let name = ident.unraw().to_string();
                let access = quote! {
                    |value| ::core::option::Option::Some(&mut value.#ident)
                };
                members.extend(member_entry(&mut ctx, field, &name, access)?);
            }
        }
        Fields::Unnamed(fields) => {
            for (index, field) in fields.unnamed.iter().enumerate() {
                let index = syn::Index::from(index);
                let access = quote! {
                    |value| ::core::option::Option::Some(&mut value.#index)
                };
                members.extend(member_entry(&mut ctx, field, "", access)?);
            }
        }
        Fields::Unit => {}
    }

    Ok(StructDeriveOutput {
        members,
        masked_generics,
    })
}
