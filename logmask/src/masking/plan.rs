//! Shape plans: per-type masking decisions, compiled once and cached.
//!
//! A plan pairs each member accessor of a [`Composite`] with the action the
//! engine resolved for it when the plan was built. Rule resolution therefore
//! runs once per type and engine, not once per value.
//!
//! The cache belongs to a single engine. Plans embed decisions taken against
//! that engine's rules, so two engines with different rules never share them.

use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use super::{
    maskable::{Accessor, Composite},
    policy::TextMask,
};
use crate::rules::RuleIndex;

/// What the engine does with one member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberAction {
    /// A directive on the member decided the policy.
    Directive(TextMask),
    /// A name-based rule decided the policy.
    Rule(TextMask),
    /// No policy at this level; the member's own shape is walked.
    Traverse,
}

pub(crate) struct PlanEntry<T> {
    name: &'static str,
    access: Accessor<T>,
    action: MemberAction,
}

impl<T> PlanEntry<T> {
    pub(crate) fn access(&self) -> Accessor<T> {
        self.access
    }

    pub(crate) fn action(&self) -> MemberAction {
        self.action
    }
}

/// The compiled masking plan of one composite type.
pub struct ShapePlan<T> {
    entries: Vec<PlanEntry<T>>,
}

impl<T> ShapePlan<T>
where
    T: Composite,
{
    pub(crate) fn build(rules: &RuleIndex) -> Self {
        let entries = T::members()
            .into_iter()
            .map(|member| {
                let action = match member.directive() {
                    Some(directive) => MemberAction::Directive(directive.text_mask()),
                    None => rules
                        .resolve(member.lookup_name())
                        .map_or(MemberAction::Traverse, |rule| {
                            MemberAction::Rule(rule.text_mask())
                        }),
                };
                PlanEntry {
                    name: member.lookup_name(),
                    access: member.accessor(),
                    action,
                }
            })
            .collect();
        Self { entries }
    }
}

impl<T> ShapePlan<T> {
    pub(crate) fn entries(&self) -> &[PlanEntry<T>] {
        &self.entries
    }

    /// Member names and their resolved actions, in declaration order.
    pub fn actions(&self) -> impl Iterator<Item = (&'static str, MemberAction)> + '_ {
        self.entries.iter().map(|entry| (entry.name, entry.action))
    }

    /// The action resolved for the member reported as `name`.
    pub fn action_for(&self, name: &str) -> Option<MemberAction> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.action)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Type-keyed store of built plans.
///
/// Lookups take a read lock. A missing plan is built outside any lock, so two
/// threads meeting a new type at once may both build it; the first insert wins
/// and every caller gets the retained plan.
#[derive(Default)]
pub(crate) struct PlanCache {
    plans: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl PlanCache {
    pub(crate) fn get<T: Composite>(&self) -> Option<Arc<ShapePlan<T>>> {
        let plans = self.plans.read().unwrap_or_else(PoisonError::into_inner);
        plans
            .get(&TypeId::of::<T>())
            .and_then(|plan| plan.downcast_ref::<Arc<ShapePlan<T>>>())
            .cloned()
    }

    /// Returns the cached plan for `T`, building it with `build` on first use.
    ///
    /// The second element is true when this call's build was retained.
    pub(crate) fn get_or_build<T, F>(&self, build: F) -> (Arc<ShapePlan<T>>, bool)
    where
        T: Composite,
        F: FnOnce() -> ShapePlan<T>,
    {
        if let Some(plan) = self.get::<T>() {
            return (plan, false);
        }

        let built = Arc::new(build());
        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
        let mut inserted = false;
        let retained = plans.entry(TypeId::of::<T>()).or_insert_with(|| {
            inserted = true;
            let boxed: Box<dyn Any + Send + Sync> = Box::new(Arc::clone(&built));
            boxed
        });
        let plan = retained
            .downcast_ref::<Arc<ShapePlan<T>>>()
            .cloned()
            .unwrap_or(built);
        (plan, inserted)
    }

    pub(crate) fn len(&self) -> usize {
        self.plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl std::fmt::Debug for PlanCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanCache")
            .field("plans", &self.len())
            .finish()
    }
}

impl<T> std::fmt::Debug for ShapePlan<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapePlan")
            .field("type", &type_name::<T>())
            .field("members", &self.actions().collect::<Vec<_>>())
            .finish()
    }
}
