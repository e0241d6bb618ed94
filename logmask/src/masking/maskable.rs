//! Types the engine can walk.
//!
//! - [`Maskable`]: anything that can be traversed and, if string-shaped,
//!   redacted in place.
//! - [`Composite`]: structs and enums with named members, described by a
//!   member table that `#[derive(Mask)]` generates.
//!
//! ## Shape handling
//!
//! | Shape | `mask_with` (no name context) | `mask_as` (rule/directive applies) |
//! |-------|-------------------------------|------------------------------------|
//! | scalars | unchanged | unchanged |
//! | `String`, `Cow<str>` | JSON-looking text is masked | policy applied |
//! | `Option<T>`, `Box<T>` | inner value | inner value |
//! | `Vec<T>` | per element, in place | per element, in place |
//! | string-keyed maps | per key, in place | per key, in place |
//! | derived composites | shape plan, in place | shape plan, in place |
//!
//! A policy only ever reaches a string. Any other value carrying a rule or
//! directive is traversed structurally instead.

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

use super::{engine::MaskingEngine, policy::TextMask};

/// A value the engine can traverse.
///
/// Implemented for common std types here and generated for user types by
/// `#[derive(Mask)]`. The trait is object safe: shape plans reach members
/// through `&mut dyn Maskable`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be masked",
    label = "this type has no `Maskable` implementation",
    note = "use `#[derive(Mask)]` on the type definition",
    note = "or mark the field `#[mask(skip)]` to leave it out of masking"
)]
pub trait Maskable {
    /// Traverses the value with no field-name context.
    fn mask_with(&mut self, engine: &MaskingEngine);

    /// Applies `mask` when the value is a string; traverses it otherwise.
    fn mask_as(&mut self, mask: TextMask, engine: &MaskingEngine) {
        let _ = mask;
        self.mask_with(engine);
    }
}

/// Accessor from a composite to one of its members.
///
/// Returns `None` when the member does not exist on this value, i.e. the enum
/// is currently a different variant.
pub type Accessor<T> = for<'a> fn(&'a mut T) -> Option<&'a mut dyn Maskable>;

/// Per-member override attached with `#[mask(...)]`.
///
/// A directive strictly overrides any name-based rule for its member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemberDirective {
    /// Leading characters left visible.
    pub prefix: usize,
    /// Trailing characters left visible.
    pub suffix: usize,
    /// Drop the value instead of masking it.
    pub exclude: bool,
    /// Name the member is reported under instead of its identifier.
    pub field_name: Option<&'static str>,
}

impl MemberDirective {
    /// A directive reported under the member's own identifier.
    pub const fn new(prefix: usize, suffix: usize, exclude: bool) -> Self {
        Self {
            prefix,
            suffix,
            exclude,
            field_name: None,
        }
    }

    /// Reports the member as `field_name` in its shape plan.
    #[must_use]
    pub const fn with_field_name(mut self, field_name: &'static str) -> Self {
        self.field_name = Some(field_name);
        self
    }

    /// The string policy this directive stands for.
    pub const fn text_mask(&self) -> TextMask {
        TextMask::new(self.prefix, self.suffix, self.exclude)
    }
}

/// One entry of a composite's member table.
pub struct Member<T> {
    name: &'static str,
    alias: Option<&'static str>,
    directive: Option<MemberDirective>,
    access: Accessor<T>,
}

impl<T> Member<T> {
    /// A member resolved by `name` against the engine's rules.
    ///
    /// Unnamed (tuple) members pass an empty name and never match a rule.
    pub const fn new(name: &'static str, access: Accessor<T>) -> Self {
        Self {
            name,
            alias: None,
            directive: None,
            access,
        }
    }

    /// Attaches a directive; rules are no longer consulted for this member.
    #[must_use]
    pub const fn with_directive(mut self, directive: MemberDirective) -> Self {
        self.directive = Some(directive);
        self
    }

    /// Resolves rules by `alias` instead of the member's identifier.
    #[must_use]
    pub const fn with_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// The identifier the member was declared with.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The name used for rule lookup and reporting.
    pub fn lookup_name(&self) -> &'static str {
        self.directive
            .and_then(|directive| directive.field_name)
            .or(self.alias)
            .unwrap_or(self.name)
    }

    /// The attached directive, if any.
    pub const fn directive(&self) -> Option<MemberDirective> {
        self.directive
    }

    pub(crate) const fn accessor(&self) -> Accessor<T> {
        self.access
    }
}

/// A struct or enum whose members are known at compile time.
///
/// `#[derive(Mask)]` implements this together with [`Maskable`]. The member
/// table is read once per engine to build the type's shape plan.
pub trait Composite: Sized + 'static {
    fn members() -> Vec<Member<Self>>;
}

// =============================================================================
// Maskable implementations for standard library types
// =============================================================================

macro_rules! impl_maskable_opaque {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Maskable for $ty {
                fn mask_with(&mut self, _engine: &MaskingEngine) {}
            }
        )*
    };
}

impl_maskable_opaque!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    (),
    std::time::Duration,
    std::time::SystemTime,
    std::net::IpAddr,
    std::path::PathBuf,
);

impl<T: ?Sized> Maskable for std::marker::PhantomData<T> {
    fn mask_with(&mut self, _engine: &MaskingEngine) {}
}

impl Maskable for String {
    fn mask_with(&mut self, engine: &MaskingEngine) {
        if let Some(masked) = engine.mask_json_text(self) {
            *self = masked;
        }
    }

    fn mask_as(&mut self, mask: TextMask, engine: &MaskingEngine) {
        *self = engine.redact(self, mask);
    }
}

impl Maskable for Cow<'_, str> {
    fn mask_with(&mut self, engine: &MaskingEngine) {
        if let Some(masked) = engine.mask_json_text(self) {
            *self = Cow::Owned(masked);
        }
    }

    fn mask_as(&mut self, mask: TextMask, engine: &MaskingEngine) {
        *self = Cow::Owned(engine.redact(self, mask));
    }
}

impl<T> Maskable for Option<T>
where
    T: Maskable,
{
    fn mask_with(&mut self, engine: &MaskingEngine) {
        if let Some(value) = self {
            value.mask_with(engine);
        }
    }

    fn mask_as(&mut self, mask: TextMask, engine: &MaskingEngine) {
        if let Some(value) = self {
            value.mask_as(mask, engine);
        }
    }
}

impl<T> Maskable for Box<T>
where
    T: Maskable + ?Sized,
{
    fn mask_with(&mut self, engine: &MaskingEngine) {
        (**self).mask_with(engine);
    }

    fn mask_as(&mut self, mask: TextMask, engine: &MaskingEngine) {
        (**self).mask_as(mask, engine);
    }
}

// Parsed JSON follows the document rules: object members are masked by key,
// array scalars are left alone.
impl Maskable for serde_json::Value {
    fn mask_with(&mut self, engine: &MaskingEngine) {
        engine.mask_json_value(self);
    }

    fn mask_as(&mut self, mask: TextMask, engine: &MaskingEngine) {
        match self {
            serde_json::Value::String(text) => *text = engine.redact(text, mask),
            _ => self.mask_with(engine),
        }
    }
}

// Sequences carry no name for their elements, so each element is traversed
// on its own. Callers that need the input untouched go through
// `MaskingEngine::mask_sequence`.
impl<T> Maskable for Vec<T>
where
    T: Maskable,
{
    fn mask_with(&mut self, engine: &MaskingEngine) {
        for item in self.iter_mut() {
            item.mask_with(engine);
        }
    }
}

impl<K, V, S> Maskable for HashMap<K, V, S>
where
    K: AsRef<str> + Hash + Eq,
    V: Maskable,
    S: BuildHasher,
{
    fn mask_with(&mut self, engine: &MaskingEngine) {
        for (key, value) in self.iter_mut() {
            engine.mask_entry(key.as_ref(), value);
        }
    }
}

impl<K, V> Maskable for BTreeMap<K, V>
where
    K: AsRef<str> + Ord,
    V: Maskable,
{
    fn mask_with(&mut self, engine: &MaskingEngine) {
        for (key, value) in self.iter_mut() {
            engine.mask_entry(key.as_ref(), value);
        }
    }
}
