//! Rule-driven masking of sensitive values in structured log data.
//!
//! A [`MaskingEngine`] is built once from [`MaskingOptions`]: a list of
//! [`FieldRule`]s keyed by field name, plus global switches. It then masks
//! values just before they are logged:
//!
//! - typed structs and enums deriving [`Mask`], member by member;
//! - string-keyed maps and runtime-shaped [`Value`] trees, entry by entry;
//! - sequences, element by element;
//! - JSON documents held in strings, by object key.
//!
//! Rules match names loosely. `FirstName`, `first_name`, `first-name` and
//! `firstName` all resolve to the same rule, and a rule for `Iban` also
//! covers `FastIban` through its canonical form. A `#[mask(...)]` directive on
//! a member always beats any rule.
//!
//! ```
//! use logmask::{FieldRule, MaskingEngine, MaskingOptions};
//!
//! let engine = MaskingEngine::new(
//!     MaskingOptions::default().with_rule(FieldRule::new("Iban").keep(3, 3)),
//! );
//! let masked = engine.mask_json(r#"{"iban":"TR330006100519786457841326"}"#);
//! assert_eq!(masked, r#"{"iban":"TR3********************326"}"#);
//! ```
//!
//! What it does not do:
//! - write logs itself; [`slog`] helpers only produce masked values
//! - mask numbers, booleans or other non-string leaves
//! - follow shared ownership (`Rc`, `Arc`) or cycles

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

pub use logmask_derive::Mask;

#[allow(unused_extern_crates)]
extern crate self as logmask;

// Module declarations
mod error;
mod masking;
mod naming;
mod options;
mod rules;
pub mod slog;
mod value;

// Re-exports
pub use error::ConfigError;
pub use masking::{
    Accessor, Composite, Maskable, MaskingEngine, Member, MemberAction, MemberDirective,
    ShapePlan, TextMask,
};
pub use naming::{canonicalize, tokenize, StyleVariants};
pub use options::{load_rules, MaskingOptions};
pub use rules::FieldRule;
pub use value::{DynObject, Value};
