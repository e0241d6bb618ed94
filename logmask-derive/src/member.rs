//! Member-table entries shared by struct and enum derivation.
//!
//! Each masked field becomes one `Member::new(name, accessor)` expression,
//! optionally followed by `.with_alias(..)` or `.with_directive(..)`. The
//! accessor is a non-capturing closure coerced to `logmask::Accessor<Self>`.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, Result};

use crate::{
    crate_path,
    generics::collect_generics_from_type,
    strategy::{parse_field_strategy, Directive, Strategy},
};

/// Accumulated state while walking the fields of one container.
pub(crate) struct MemberContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) masked_generics: &'a mut Vec<Ident>,
}

/// Generates the member-table entry for one field.
///
/// Returns `None` for `#[mask(skip)]` fields.
///
/// | Annotation | Entry |
/// |------------|-------|
/// | None | `Member::new(name, access)` |
/// | `#[mask(field_name = "x")]` | `...with_alias("x")` |
/// | `#[mask(...)]` | `...with_directive(MemberDirective::new(p, s, e))` |
pub(crate) fn member_entry(
    ctx: &mut MemberContext<'_>,
    field: &syn::Field,
    name: &str,
    access: TokenStream,
) -> Result<Option<TokenStream>> {
    let strategy = parse_field_strategy(&field.attrs)?;
    if strategy == Strategy::Skip {
        return Ok(None);
    }

    collect_generics_from_type(&field.ty, ctx.generics, ctx.masked_generics);

    let span = field.span();
    let member = crate_path("Member");
    let base = quote_spanned! { span =>
        #member::<Self>::new(#name, #access)
    };

    let entry = match strategy {
        Strategy::Rules | Strategy::Skip => base,
        Strategy::Alias(alias) => quote_spanned! { span => #base.with_alias(#alias) },
        Strategy::Directive(directive) => {
            let directive = directive_tokens(&directive, span);
            quote_spanned! { span => #base.with_directive(#directive) }
        }
    };
    Ok(Some(entry))
}

fn directive_tokens(directive: &Directive, span: Span) -> TokenStream {
    let directive_path = crate_path("MemberDirective");
    let Directive {
        prefix,
        suffix,
        exclude,
        field_name,
    } = directive;
    let base = quote_spanned! { span =>
        #directive_path::new(#prefix, #suffix, #exclude)
    };
    match field_name {
        Some(field_name) => quote! { #base.with_field_name(#field_name) },
        None => base,
    }
}
