//! The string masking policy.
//!
//! Policies are pure string transformations. They do not traverse structures
//! or resolve rules; the engine decides which policy applies and hands the
//! value over.

use crate::options::MaskingOptions;

/// How a single string value is masked.
///
/// The policy operates on Unicode scalar values: a value of `n` characters
/// masks to `n` characters (unless it is excluded as empty).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextMask {
    /// Number of leading characters to keep visible.
    prefix: usize,
    /// Number of trailing characters to keep visible.
    suffix: usize,
    /// Drop the value entirely.
    exclude: bool,
}

impl TextMask {
    /// Constructs a policy from its raw parts.
    #[must_use]
    pub const fn new(prefix: usize, suffix: usize, exclude: bool) -> Self {
        Self {
            prefix,
            suffix,
            exclude,
        }
    }

    /// Masks every character.
    #[must_use]
    pub const fn full() -> Self {
        Self::new(0, 0, false)
    }

    /// Keeps `prefix` leading and `suffix` trailing characters visible.
    #[must_use]
    pub const fn keep(prefix: usize, suffix: usize) -> Self {
        Self::new(prefix, suffix, false)
    }

    /// Excludes the value: empty or fully masked depending on
    /// [`MaskingOptions::full_exclude_as_empty`].
    #[must_use]
    pub const fn exclude() -> Self {
        Self::new(0, 0, true)
    }

    /// Leading characters kept visible.
    pub const fn prefix(&self) -> usize {
        self.prefix
    }

    /// Trailing characters kept visible.
    pub const fn suffix(&self) -> usize {
        self.suffix
    }

    /// Whether the value is excluded rather than masked.
    pub const fn is_exclude(&self) -> bool {
        self.exclude
    }

    /// Applies the policy to `value`.
    ///
    /// - Masking disabled, or an empty value: returned unchanged.
    /// - `exclude`: empty string, or a full mask when exclusions are masked.
    /// - `prefix == 0 && suffix == 0`: full mask.
    /// - `prefix + suffix >= len`: full mask. Keeping both ends of a short
    ///   value would reveal most of it.
    /// - Otherwise the middle `len - prefix - suffix` characters are masked.
    ///
    /// This method is total (it does not return errors).
    #[must_use]
    pub fn apply_to(&self, value: &str, options: &MaskingOptions) -> String {
        if !options.enabled || value.is_empty() {
            return value.to_string();
        }

        let mask_char = options.mask_char;
        let mut chars: Vec<char> = value.chars().collect();
        let total = chars.len();

        if self.exclude && options.full_exclude_as_empty {
            return String::new();
        }

        if self.exclude
            || (self.prefix == 0 && self.suffix == 0)
            || self.prefix.saturating_add(self.suffix) >= total
        {
            chars.fill(mask_char);
            return chars.into_iter().collect();
        }

        chars[self.prefix..(total - self.suffix)].fill(mask_char);
        chars.into_iter().collect()
    }
}
