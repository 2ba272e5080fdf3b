//! Whole-rule relation classification
//!
//! A packet matches a rule only if every field matches, so whole-rule
//! containment requires simultaneous per-field containment. The engine folds
//! the five per-field relations of an ordered pair into one [`RuleRelation`]:
//!
//! 1. all five fields Equal → [`RuleRelation::ExactMatch`];
//! 2. all Equal-or-Subset with at least one strict Subset →
//!    [`RuleRelation::FirstWithinSecond`]; the symmetric all-Superset case →
//!    [`RuleRelation::SecondWithinFirst`];
//! 3. any field Disjoint → [`RuleRelation::Disjoint`] — one disjoint field
//!    already guarantees no packet satisfies both rules, so it beats
//!    apparent containment in the remaining fields;
//! 4. otherwise → [`RuleRelation::Correlated`].

use super::policy::Policy;
use super::relation::SetRelation;

/// Relation between an ordered pair of rules (first, second)
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter, strum::AsRefStr)]
pub enum RuleRelation {
    /// Identical match scope in every field
    #[strum(serialize = "exact match")]
    ExactMatch,
    /// Every packet matching the first rule also matches the second; the
    /// first is strictly more specific
    #[strum(serialize = "first within second")]
    FirstWithinSecond,
    /// Every packet matching the second rule also matches the first
    #[strum(serialize = "second within first")]
    SecondWithinFirst,
    /// Overlapping scope without containment either way
    #[strum(serialize = "correlated")]
    Correlated,
    /// No packet can match both rules
    #[strum(serialize = "disjoint")]
    Disjoint,
}

impl RuleRelation {
    /// The relation seen from the swapped pair (second, first).
    pub const fn mirror(self) -> Self {
        match self {
            RuleRelation::FirstWithinSecond => RuleRelation::SecondWithinFirst,
            RuleRelation::SecondWithinFirst => RuleRelation::FirstWithinSecond,
            other => other,
        }
    }
}

/// Classifies the relation between any two policies
pub struct RelationEngine;

impl RelationEngine {
    /// Combines the five per-field relations of `(a, b)` into one
    /// [`RuleRelation`].
    pub fn compute(a: &Policy, b: &Policy) -> RuleRelation {
        let fields = a.field_relations(b);

        if fields.contains(&SetRelation::Disjoint) {
            return RuleRelation::Disjoint;
        }
        if fields.iter().all(|r| *r == SetRelation::Equal) {
            return RuleRelation::ExactMatch;
        }
        if fields.iter().all(|r| r.is_within()) {
            return RuleRelation::FirstWithinSecond;
        }
        if fields.iter().all(|r| r.is_covering()) {
            return RuleRelation::SecondWithinFirst;
        }
        RuleRelation::Correlated
    }
}
