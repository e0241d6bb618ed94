//! Name-based masking rules and their lookup index.
//!
//! A [`FieldRule`] says how values stored under a given field name are masked.
//! [`RuleIndex`] is built once per engine and answers "which rule applies to
//! this name?" using, in order:
//!
//! 1. the exact normalized name,
//! 2. the exact normalized snake/kebab/Pascal/camel spelling of the name,
//! 3. the first rule whose canonical form is a substring of the name's
//!    canonical form.
//!
//! Step 3 lets a rule for `Iban` cover `FastIban` or `sender_iban`. It also
//! means a short rule name can match unrelated identifiers that happen to
//! contain it; rules are scanned in registration order, so list specific
//! names before broad ones.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    masking::TextMask,
    naming::{canonicalize, StyleVariants},
};

/// A name-keyed masking policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRule {
    /// Field name the rule is registered under.
    pub field: String,
    /// Leading characters left visible.
    pub prefix: usize,
    /// Trailing characters left visible.
    pub suffix: usize,
    /// Drop (or fully mask) the value regardless of `prefix`/`suffix`.
    pub exclude: bool,
}

impl FieldRule {
    /// Rule that fully masks `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Self::default()
        }
    }

    /// Keeps `prefix` leading and `suffix` trailing characters visible.
    #[must_use]
    pub fn keep(mut self, prefix: usize, suffix: usize) -> Self {
        self.prefix = prefix;
        self.suffix = suffix;
        self
    }

    /// Marks the field as excluded.
    #[must_use]
    pub fn excluded(mut self) -> Self {
        self.exclude = true;
        self
    }

    /// The string policy this rule applies.
    pub fn text_mask(&self) -> TextMask {
        TextMask::new(self.prefix, self.suffix, self.exclude)
    }
}

/// Lookup structure over an ordered rule list.
#[derive(Clone, Debug, Default)]
pub(crate) struct RuleIndex {
    rules: Vec<FieldRule>,
    exact: HashMap<String, usize>,
    canonical: Vec<(String, usize)>,
    case_insensitive: bool,
}

impl RuleIndex {
    pub(crate) fn build(rules: &[FieldRule], case_insensitive: bool) -> Self {
        let mut index = Self {
            rules: Vec::with_capacity(rules.len()),
            exact: HashMap::with_capacity(rules.len()),
            canonical: Vec::with_capacity(rules.len()),
            case_insensitive,
        };

        for rule in rules.iter().filter(|rule| !rule.field.trim().is_empty()) {
            let position = index.rules.len();
            index.rules.push(rule.clone());

            let key = index.normalize(&rule.field);
            index.exact.entry(key).or_insert(position);

            let canonical = canonicalize(&rule.field);
            if !canonical.is_empty() {
                index.canonical.push((canonical, position));
            }
        }
        index
    }

    /// Number of distinct exact-match names.
    pub(crate) fn len(&self) -> usize {
        self.exact.len()
    }

    pub(crate) fn resolve(&self, name: &str) -> Option<&FieldRule> {
        if name.trim().is_empty() || self.rules.is_empty() {
            return None;
        }

        if let Some(rule) = self.exact_match(name) {
            return Some(rule);
        }

        let variants = StyleVariants::of_name(name);
        if let Some(rule) = variants.iter().find_map(|variant| self.exact_match(variant)) {
            return Some(rule);
        }

        let canonical = canonicalize(name);
        if canonical.is_empty() {
            return None;
        }
        self.canonical
            .iter()
            .find(|(rule_canonical, _)| canonical.contains(rule_canonical.as_str()))
            .map(|(_, position)| &self.rules[*position])
    }

    fn exact_match(&self, name: &str) -> Option<&FieldRule> {
        self.exact
            .get(&self.normalize(name))
            .map(|position| &self.rules[*position])
    }

    fn normalize(&self, name: &str) -> String {
        let trimmed = name.trim();
        if self.case_insensitive {
            trimmed.to_lowercase()
        } else {
            trimmed.to_string()
        }
    }
}
