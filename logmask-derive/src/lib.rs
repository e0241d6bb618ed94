//! Derive macro for `logmask`.
//!
//! This crate generates the member tables behind `#[derive(Mask)]`. It:
//! - reads `#[mask(...)]` field and container attributes
//! - emits `Composite` and `Maskable` implementations that hand the value to
//!   the engine's shape plan
//!
//! It does **not** resolve rules or apply policies. Those live in the main
//! `logmask` crate and run when a plan is first built.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Fields, Result};

mod container;
mod derive_enum;
mod derive_struct;
mod generics;
mod member;
mod strategy;
use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::{add_member_bounds, reject_unsupported_params};

/// Derives `logmask::Maskable` and `logmask::Composite` for structs and enums.
///
/// # Container Attributes
///
/// - `#[mask(opaque)]`: the type is a scalar to the engine. Nothing inside it
///   is ever masked, and no field needs to implement `Maskable`.
///
/// # Field Attributes
///
/// - **No annotation**: the field is resolved against the engine's rules by its
///   identifier (`first_name` also matches a `FirstName` rule). Without a
///   matching rule the field's own shape is walked.
/// - `#[mask]`: the field is fully masked regardless of rules.
/// - `#[mask(prefix = N, suffix = N, exclude, field_name = "...")]`: the field is
///   masked with this policy regardless of rules. Omitted keys default to `0`
///   and `false`.
/// - `#[mask(field_name = "...")]` alone: rules are resolved by that name
///   instead of the identifier.
/// - `#[mask(skip)]`: the field is left out of masking and need not implement
///   `Maskable`.
///
/// Tuple fields have no name and only react to explicit directives. Enums get
/// one member per variant field; enums without fields are opaque. Types with
/// lifetime parameters and unions are rejected at compile time.
///
/// Policies only ever change strings. A directive or rule on a field of any
/// other type walks into the field instead.
#[proc_macro_derive(Mask, attributes(mask))]
pub fn derive_mask(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the logmask crate root.
///
/// Handles crate renaming (e.g., `masking = { package = "logmask", ... }`)
/// and internal usage (when derive is used inside logmask itself).
fn crate_root() -> TokenStream {
    match crate_name("logmask") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::logmask },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item = format_ident!("{}", item);
    quote! { #root::#item }
}

fn has_fields(data: &Data) -> bool {
    match data {
        Data::Struct(data) => !matches!(data.fields, Fields::Unit),
        Data::Enum(data) => data
            .variants
            .iter()
            .any(|variant| !matches!(variant.fields, Fields::Unit)),
        Data::Union(_) => false,
    }
}

fn union_error(data: &syn::DataUnion) -> syn::Error {
    syn::Error::new(data.union_token.span(), "`Mask` cannot be derived for unions")
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    if let Data::Union(u) = &data {
        return Err(union_error(u));
    }

    let ContainerOptions { opaque } = parse_container_options(&attrs)?;
    let crate_root = crate_root();

    if opaque || !has_fields(&data) {
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        return Ok(quote! {
            #[automatically_derived]
            impl #impl_generics #crate_root::Maskable for #ident #ty_generics #where_clause {
                fn mask_with(&mut self, _engine: &#crate_root::MaskingEngine) {}
            }
        });
    }

    reject_unsupported_params(&generics)?;

    let (members, masked_generics) = match &data {
        Data::Struct(data) => {
            let output = derive_struct(data, &generics)?;
            (output.members, output.masked_generics)
        }
        Data::Enum(data) => {
            let output = derive_enum(data, &generics)?;
            (output.members, output.masked_generics)
        }
        Data::Union(u) => return Err(union_error(u)),
    };

    let bounded = add_member_bounds(generics, &masked_generics);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics #crate_root::Composite for #ident #ty_generics #where_clause {
            fn members() -> ::std::vec::Vec<#crate_root::Member<Self>> {
                ::std::vec![#(#members),*]
            }
        }

        #[automatically_derived]
        impl #impl_generics #crate_root::Maskable for #ident #ty_generics #where_clause {
            fn mask_with(&mut self, engine: &#crate_root::MaskingEngine) {
                engine.apply_plan(self);
            }
        }
    })
}
