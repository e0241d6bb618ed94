//! The masking engine: entry points and shape dispatch.

use std::{any::type_name, sync::Arc};

use serde_json::Value as JsonValue;
use slog::{debug, o, trace, Discard, Logger};

use super::{
    json,
    maskable::{Composite, Maskable},
    plan::{MemberAction, PlanCache, ShapePlan},
    policy::TextMask,
};
use crate::{
    error::ConfigError,
    options::MaskingOptions,
    rules::{FieldRule, RuleIndex},
    value::Value,
};

/// Applies name-based rules and member directives to structured values.
///
/// Built once from [`MaskingOptions`]; the options and rule index are
/// read-only afterwards. Shape plans are cached per engine, so engines with
/// different rules can coexist in one process.
///
/// ## In-place versus copying entry points
///
/// Named containers are masked destructively, unnamed sequences are copied:
///
/// - [`MaskingEngine::mask`] mutates composites, maps and strings in place;
/// - [`MaskingEngine::mask_sequence`] returns a new vector and leaves the
///   input slice untouched;
/// - [`MaskingEngine::mask_dynamic`] hands back the same map or object it was
///   given, and a newly built vector for sequences.
///
/// Values reachable only through shared ownership (`Rc`, `Arc`) are not
/// traversed, so cyclic graphs cannot be expressed.
#[derive(Debug)]
pub struct MaskingEngine {
    options: MaskingOptions,
    rules: RuleIndex,
    plans: PlanCache,
    logger: Logger,
}

impl MaskingEngine {
    /// Builds an engine and its rule index from `options`.
    pub fn new(options: MaskingOptions) -> Self {
        let rules = RuleIndex::build(&options.rules, options.case_insensitive);
        Self {
            options,
            rules,
            plans: PlanCache::default(),
            logger: Logger::root(Discard, o!()),
        }
    }

    /// Builds an engine from a rule document (see [`MaskingOptions::from_json_str`]).
    pub fn from_rules_json(text: &str) -> Result<Self, ConfigError> {
        MaskingOptions::from_json_str(text).map(Self::new)
    }

    /// Routes the engine's diagnostics to `logger`.
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger.new(o!("component" => "logmask"));
        debug!(self.logger, "masking engine configured";
            "enabled" => self.options.enabled,
            "rules" => self.rules.len(),
            "case_insensitive" => self.options.case_insensitive,
            "full_exclude_as_empty" => self.options.full_exclude_as_empty);
        self
    }

    /// The options this engine was built from.
    pub fn options(&self) -> &MaskingOptions {
        &self.options
    }

    /// False when every entry point returns its input unchanged.
    pub fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Masks `value` in place.
    ///
    /// Composites apply their shape plan, maps are masked key by key, and
    /// strings holding JSON have their document masked.
    pub fn mask<T>(&self, value: &mut T)
    where
        T: Maskable + ?Sized,
    {
        if self.options.enabled {
            value.mask_with(self);
        }
    }

    /// Masks a copy of every element and returns the copies.
    ///
    /// `items` itself is never modified.
    pub fn mask_sequence<T>(&self, items: &[T]) -> Vec<T>
    where
        T: Maskable + Clone,
    {
        let mut masked = items.to_vec();
        if self.options.enabled {
            for item in &mut masked {
                item.mask_with(self);
            }
        }
        masked
    }

    /// Masks a value whose shape is only known at runtime.
    pub fn mask_dynamic(&self, value: Value) -> Value {
        if !self.options.enabled {
            return value;
        }

        match value {
            Value::String(text) => match self.mask_json_text(&text) {
                Some(masked) => Value::String(masked),
                None => Value::String(text),
            },
            Value::Map(mut entries) => {
                for (key, entry) in &mut entries {
                    self.mask_entry(key, entry);
                }
                Value::Map(entries)
            }
            Value::Sequence(items) => {
                let mut masked = Vec::with_capacity(items.len());
                for item in items {
                    masked.push(self.mask_dynamic(item));
                }
                Value::Sequence(masked)
            }
            Value::Object(mut object) => {
                object.mask_with(self);
                Value::Object(object)
            }
            scalar @ (Value::Null
            | Value::Bool(_)
            | Value::Int(_)
            | Value::UInt(_)
            | Value::Float(_)) => scalar,
        }
    }

    /// Masks a JSON document held in a string.
    ///
    /// Text that does not start with `{` or `[`, or does not parse, is
    /// returned unchanged.
    pub fn mask_json(&self, text: &str) -> String {
        self.mask_json_text(text).unwrap_or_else(|| text.to_string())
    }

    /// Masks an already parsed JSON document in place.
    pub fn mask_json_value(&self, node: &mut JsonValue) {
        if self.options.enabled {
            json::mask_node(self, node);
        }
    }

    /// Masks a single string with an explicit policy.
    ///
    /// An absent value yields an empty string.
    pub fn mask_value(
        &self,
        value: Option<&str>,
        prefix: usize,
        suffix: usize,
        exclude: bool,
    ) -> String {
        value.map_or_else(String::new, |value| {
            self.redact(value, TextMask::new(prefix, suffix, exclude))
        })
    }

    /// The rule that applies to `name`, if any.
    pub fn resolve(&self, name: &str) -> Option<&FieldRule> {
        self.rules.resolve(name)
    }

    /// The shape plan this engine uses for `T`, building it on first use.
    pub fn plan_for<T: Composite>(&self) -> Arc<ShapePlan<T>> {
        let (plan, built) = self.plans.get_or_build(|| ShapePlan::<T>::build(&self.rules));
        if built {
            debug!(self.logger, "built shape plan";
                "type" => type_name::<T>(),
                "members" => plan.len());
        }
        plan
    }

    // =========================================================================
    // Traversal helpers used by `Maskable` implementations
    // =========================================================================

    /// Applies `T`'s shape plan to `value`.
    ///
    /// This is the body `#[derive(Mask)]` generates for `Maskable::mask_with`.
    pub fn apply_plan<T: Composite>(&self, value: &mut T) {
        if !self.options.enabled {
            return;
        }
        let plan = self.plan_for::<T>();
        for entry in plan.entries() {
            let Some(member) = (entry.access())(value) else {
                continue;
            };
            match entry.action() {
                MemberAction::Directive(mask) | MemberAction::Rule(mask) => {
                    member.mask_as(mask, self);
                }
                MemberAction::Traverse => member.mask_with(self),
            }
        }
    }

    /// Masks one map entry: by rule when `key` resolves, structurally otherwise.
    pub fn mask_entry(&self, key: &str, value: &mut dyn Maskable) {
        match self.rules.resolve(key) {
            Some(rule) => value.mask_as(rule.text_mask(), self),
            None => value.mask_with(self),
        }
    }

    /// Applies `mask` to `value` under this engine's options.
    pub fn redact(&self, value: &str, mask: TextMask) -> String {
        mask.apply_to(value, &self.options)
    }

    /// Masked document, or `None` when `text` is not a JSON object or array.
    pub(crate) fn mask_json_text(&self, text: &str) -> Option<String> {
        if !self.options.enabled || !json::looks_like_json(text) {
            return None;
        }

        let mut node: JsonValue = match serde_json::from_str(text) {
            Ok(node) => node,
            Err(err) => {
                trace!(self.logger, "leaving non-JSON text unmasked"; "error" => %err);
                return None;
            }
        };
        json::mask_node(self, &mut node);
        match serde_json::to_string(&node) {
            Ok(masked) => Some(masked),
            Err(err) => {
                debug!(self.logger, "failed to re-encode masked JSON"; "error" => %err);
                None
            }
        }
    }
}
