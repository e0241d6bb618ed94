//! Parsing of `#[mask(...)]` field attributes.
//!
//! This module maps attribute syntax to member-table decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, LitBool, LitInt, LitStr, Meta, Result};

/// How a field enters the generated member table.
///
/// ## Strategy Mapping
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `Rules` | Resolved against the engine's rules by field name |
/// | `#[mask(field_name = "x")]` | `Alias("x")` | Resolved by `x` instead |
/// | `#[mask]` | `Directive` | Fully masked, rules ignored |
/// | `#[mask(prefix = 2, suffix = 2, exclude)]` | `Directive` | Masked as given, rules ignored |
/// | `#[mask(skip)]` | `Skip` | Left out of the table entirely |
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    Rules,
    Alias(String),
    Directive(Directive),
    Skip,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Directive {
    pub(crate) prefix: usize,
    pub(crate) suffix: usize,
    pub(crate) exclude: bool,
    pub(crate) field_name: Option<String>,
}

#[derive(Default)]
struct Keys {
    prefix: Option<usize>,
    suffix: Option<usize>,
    exclude: Option<bool>,
    field_name: Option<String>,
    skip: bool,
}

impl Keys {
    fn has_policy(&self) -> bool {
        self.prefix.is_some() || self.suffix.is_some() || self.exclude.is_some()
    }

    fn into_strategy(self, span: Span) -> Result<Strategy> {
        if self.skip {
            if self.has_policy() || self.field_name.is_some() {
                return Err(syn::Error::new(
                    span,
                    "`skip` cannot be combined with other #[mask] options",
                ));
            }
            return Ok(Strategy::Skip);
        }
        if !self.has_policy() {
            if let Some(alias) = self.field_name {
                return Ok(Strategy::Alias(alias));
            }
        }
        Ok(Strategy::Directive(Directive {
            prefix: self.prefix.unwrap_or(0),
            suffix: self.suffix.unwrap_or(0),
            exclude: self.exclude.unwrap_or(false),
            field_name: self.field_name,
        }))
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, key: &str, span: Span) -> Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new(span, format!("duplicate `{key}` option")));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_keys(list: &syn::MetaList) -> Result<Keys> {
    let mut keys = Keys::default();
    list.parse_nested_meta(|meta| {
        let span = meta.path.span();
        if meta.path.is_ident("prefix") {
            let value: LitInt = meta.value()?.parse()?;
            set_once(&mut keys.prefix, value.base10_parse()?, "prefix", span)
        } else if meta.path.is_ident("suffix") {
            let value: LitInt = meta.value()?.parse()?;
            set_once(&mut keys.suffix, value.base10_parse()?, "suffix", span)
        } else if meta.path.is_ident("exclude") {
            let exclude = if meta.input.peek(syn::Token![=]) {
                meta.value()?.parse::<LitBool>()?.value
            } else {
                true
            };
            set_once(&mut keys.exclude, exclude, "exclude", span)
        } else if meta.path.is_ident("field_name") {
            let value: LitStr = meta.value()?.parse()?;
            if value.value().trim().is_empty() {
                return Err(syn::Error::new(value.span(), "`field_name` cannot be blank"));
            }
            set_once(&mut keys.field_name, value.value(), "field_name", span)
        } else if meta.path.is_ident("skip") {
            keys.skip = true;
            Ok(())
        } else {
            Err(meta.error(format!(
                "unknown #[mask] option `{}`; expected `prefix`, `suffix`, `exclude`, \
                 `field_name` or `skip`",
                meta.path
                    .get_ident()
                    .map_or_else(|| "?".to_string(), ToString::to_string)
            )))
        }
    })?;
    Ok(keys)
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut strategy: Option<Strategy> = None;
    for attr in attrs {
        if !attr.path().is_ident("mask") {
            continue;
        }
        if strategy.is_some() {
            return Err(syn::Error::new(
                attr.span(),
                "multiple #[mask] attributes specified on the same field",
            ));
        }

        strategy = Some(match &attr.meta {
            Meta::Path(_) => Strategy::Directive(Directive::default()),
            Meta::List(list) => parse_keys(list)?.into_strategy(attr.span())?,
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[mask]",
                ));
            }
        });
    }

    Ok(strategy.unwrap_or(Strategy::Rules))
}
