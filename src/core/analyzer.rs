//! Analysis facade over one immutable rule list
//!
//! [`PolicyAnalyzer`] composes [`RelationEngine`], [`AnomalyDetector`], and
//! [`MatchEngine`] over a rule list taken at construction. All three
//! computations are synchronous, stateless, and re-entrant: they read only
//! the immutable policies, so repeated calls (or calls from multiple
//! threads) always produce the same result.

use std::collections::BTreeMap;

use super::anomaly::{Anomaly, AnomalyDetector};
use super::engine::{RelationEngine, RuleRelation};
use super::matcher::MatchEngine;
use super::policy::{Packet, Policy};

/// Facade composing the three engines over one rule list
#[derive(Debug, Clone)]
pub struct PolicyAnalyzer {
    policies: Vec<Policy>,
}

impl PolicyAnalyzer {
    /// Takes ownership of the normalized rule list. Indices are expected to
    /// be unique and ascending in document order, as the loader assigns
    /// them.
    pub fn new(policies: Vec<Policy>) -> Self {
        PolicyAnalyzer { policies }
    }

    /// The rule list in evaluation order.
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// Whole-rule relation for every ordered pair `(i, j)`, `i < j`.
    pub fn get_relations(&self) -> BTreeMap<(usize, usize), RuleRelation> {
        let mut relations = BTreeMap::new();
        for (pos, later) in self.policies.iter().enumerate() {
            for earlier in &self.policies[..pos] {
                relations.insert(
                    (earlier.index, later.index),
                    RelationEngine::compute(earlier, later),
                );
            }
        }
        relations
    }

    /// Per-index anomaly map; empty for an empty rule list.
    pub fn get_anomalies(&self) -> BTreeMap<usize, Anomaly> {
        AnomalyDetector::classify(&self.policies)
    }

    /// First rule matching the packet, or `None`; `None` for an empty list.
    pub fn get_first_match(&self, packet: &Packet) -> Option<&Policy> {
        MatchEngine::first_match(packet, &self.policies)
    }
}
