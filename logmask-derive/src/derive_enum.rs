//! Enum-specific member-table derivation.
//!
//! Every field of every variant becomes one member. Its accessor matches the
//! owning variant and yields `None` for any other, so a plan entry only
//! touches values currently holding that variant.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{ext::IdentExt, DataEnum, Fields, Result};

use crate::member::{member_entry, MemberContext};

pub(crate) struct EnumDeriveOutput {
    pub(crate) members: Vec<TokenStream>,
    pub(crate) masked_generics: Vec<Ident>,
}

pub(crate) fn derive_enum(data: &DataEnum, generics: &syn::Generics) -> Result<EnumDeriveOutput> {
    let mut members = Vec::new();
    let mut masked_generics = Vec::new();
    let mut ctx = MemberContext {
        generics,
        masked_generics: &mut masked_generics,
    };

    for variant in &data.variants {
        let variant_ident = &variant.ident;
        match &variant.fields {
            Fields::Unit => {}
            Fields::Named(fields) => {
                for field in &fields.named {
                    let Some(ident) = &field.ident else {
                        continue;
                    };
                    let name = ident.unraw().to_string();
                    let access = variant_accessor(quote! {
                        Self::#variant_ident { #ident: member, .. }
                    });
                    members.extend(member_entry(&mut ctx, field, &name, access)?);
                }
            }
            Fields::Unnamed(fields) => {
                for (index, field) in fields.unnamed.iter().enumerate() {
                    let skipped = (0..index).map(|_| quote! { _ });
                    let access = variant_accessor(quote! {
                        Self::#variant_ident ( #(#skipped,)* member, .. )
                    });
                    members.extend(member_entry(&mut ctx, field, "", access)?);
                }
            }
        }
    }

    Ok(EnumDeriveOutput {
        members,
        masked_generics,
    })
}

fn variant_accessor(pattern: TokenStream) -> TokenStream {
    quote! {
        |value| match value {
            #pattern => ::core::option::Option::Some(member),
            #[allow(unreachable_patterns)]
            _ => ::core::option::Option::None,
        }
    }
}
