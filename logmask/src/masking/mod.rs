//! Masking engine, traversal contracts, and shape plans.
//!
//! This module ties the pieces together:
//!
//! - **`policy`**: how one string is masked (`TextMask`)
//! - **`maskable`**: what can be traversed (`Maskable`, `Composite`, member tables)
//! - **`plan`**: per-type masking decisions, cached per engine (`ShapePlan`)
//! - **`json`**: masking of JSON documents carried in strings
//! - **`engine`**: entry points and shape dispatch (`MaskingEngine`)
//!
//! Rule lookup lives in `crate::rules`; identifier handling in `crate::naming`.

mod engine;
mod json;
mod maskable;
mod plan;
mod policy;

pub use engine::MaskingEngine;
pub use maskable::{Accessor, Composite, Maskable, Member, MemberDirective};
pub use plan::{MemberAction, ShapePlan};
pub use policy::TextMask;
