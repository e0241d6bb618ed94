//! Generic parameter handling and trait bound management.
//!
//! Every type parameter gets `'static`, since shape plans are cached by
//! `TypeId`. Only parameters that appear in a masked member also get
//! `Maskable`.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` is skipped when collecting generics:
//!
//! ```ignore
//! struct TypedId<T> {
//!     id: String,
//!     _marker: PhantomData<T>,  // T does not need Maskable
//! }
//! ```
//!
//! `PhantomData<T>` is `Maskable` for every `T`, so the marker field needs no
//! annotation and `TypedId<chrono::DateTime<Utc>>` still masks its `id`.

use syn::{parse_quote, spanned::Spanned, Ident, Result};

use crate::crate_path;

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            if let Some(qself) = &path.qself {
                collect_generics_from_type(&qself.ty, generics, result);
            }
            if let Some(segment) = path.path.segments.last() {
                if segment.ident == "PhantomData" {
                    return;
                }

                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        if let syn::GenericArgument::Type(inner_ty) = arg {
                            collect_generics_from_type(inner_ty, generics, result);
                        }
                    }
                }
            }
            if let Some(first) = path.path.segments.first() {
                for param in generics.type_params() {
                    if first.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                        result.push(param.ident.clone());
                    }
                }
            }
        }
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Slice(slice) => collect_generics_from_type(&slice.elem, generics, result),
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_generics_from_type(elem, generics, result);
            }
        }
        _ => {}
    }
}

/// Rejects lifetime parameters.
///
/// Plans are keyed by `TypeId`, which only exists for `'static` types.
pub(crate) fn reject_unsupported_params(generics: &syn::Generics) -> Result<()> {
    if let Some(lifetime) = generics.lifetimes().next() {
        return Err(syn::Error::new(
            lifetime.span(),
            "`Mask` cannot be derived for types with lifetime parameters; \
             use #[mask(opaque)] or owned fields",
        ));
    }
    Ok(())
}

/// Adds `'static` to every type parameter and `Maskable` to those in `masked`.
pub(crate) fn add_member_bounds(mut generics: syn::Generics, masked: &[Ident]) -> syn::Generics {
    let maskable = crate_path("Maskable");
    for param in generics.type_params_mut() {
        if masked.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(#maskable));
        }
        param.bounds.push(parse_quote!('static));
    }
    generics
}
