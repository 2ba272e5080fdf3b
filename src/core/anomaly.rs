//! Order-dependent anomaly detection
//!
//! The detector scans every ordered pair `(i, j)` with `i < j`, classifies
//! the pair through [`RelationEngine`], and maps relation plus action
//! equality to at most one finding per pair:
//!
//! | relation            | equal actions         | differing actions          |
//! |---------------------|-----------------------|----------------------------|
//! | exact match         | Redundancy on j       | Shadowing on j             |
//! | first within second | Redundancy on j       | Generalization on i        |
//! | second within first | Redundancy on j       | Shadowing on j             |
//! | correlated          | —                     | Correlation on j           |
//! | disjoint            | —                     | —                          |
//!
//! Generalization is informational: the earlier, narrower rule correctly
//! carves an exception out of the later, broader one, so the finding tags
//! the earlier index and the later rule keeps no fault from the pair.
//!
//! Each index keeps only the finding with the smallest peer index. Under
//! first-match evaluation only the earliest conflicting predecessor
//! determines runtime behavior, so later qualifying peers are moot. The
//! merge is a commutative keep-minimum reduction, which keeps results
//! deterministic regardless of scan or worker order. Unlike the match
//! engine, the scan never short-circuits: every predecessor of every index
//! must be inspected to find the true minimum peer.

use std::collections::BTreeMap;
use std::fmt;

use super::engine::{RelationEngine, RuleRelation};
use super::policy::Policy;

/// The four detected conflict classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter, strum::AsRefStr)]
pub enum AnomalyKind {
    /// Rule permanently unreachable: an earlier, fully covering rule with a
    /// different action always matches first
    #[strum(serialize = "shadowing")]
    Shadowing,
    /// Rule's effect already produced by an earlier rule with the same action
    #[strum(serialize = "redundancy")]
    Redundancy,
    /// Partially overlapping scope with differing actions; outcome depends
    /// on relative order for the shared packet space
    #[strum(serialize = "correlation")]
    Correlation,
    /// Earlier, narrower rule intentionally overriding a later, broader rule
    /// of the opposite action; not a fault
    #[strum(serialize = "generalization")]
    Generalization,
}

/// One finding attached to a rule index
///
/// Derived and non-persisted; recomputed per analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anomaly {
    /// Index of the conflicting rule
    pub peer: usize,
    pub kind: AnomalyKind,
    /// Whole-rule relation of the pair, oriented as (lower index, higher index)
    pub relation: RuleRelation,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with rule {} ({})", self.kind, self.peer, self.relation)
    }
}

/// Scans all rule pairs and classifies conflicts
pub struct AnomalyDetector;

impl AnomalyDetector {
    /// Classifies the whole rule list into a per-index anomaly map.
    ///
    /// O(n²) pair evaluations; accepted for rule sets up to low thousands of
    /// entries. `classify(&[])` is the empty map.
    pub fn classify(policies: &[Policy]) -> BTreeMap<usize, Anomaly> {
        let mut findings = BTreeMap::new();
        for (pos, later) in policies.iter().enumerate() {
            for earlier in &policies[..pos] {
                let relation = RelationEngine::compute(earlier, later);
                if let Some((index, anomaly)) = Self::pair_finding(earlier, later, relation) {
                    Self::record(&mut findings, index, anomaly);
                }
            }
        }
        findings
    }

    /// Applies the relation × action table to one ordered pair.
    fn pair_finding(
        earlier: &Policy,
        later: &Policy,
        relation: RuleRelation,
    ) -> Option<(usize, Anomaly)> {
        let same_action = earlier.action == later.action;
        let kind = match relation {
            RuleRelation::ExactMatch | RuleRelation::SecondWithinFirst => {
                if same_action {
                    AnomalyKind::Redundancy
                } else {
                    AnomalyKind::Shadowing
                }
            }
            RuleRelation::FirstWithinSecond => {
                if same_action {
                    AnomalyKind::Redundancy
                } else {
                    // Tags the earlier rule; the later one keeps no fault
                    return Some((
                        earlier.index,
                        Anomaly {
                            peer: later.index,
                            kind: AnomalyKind::Generalization,
                            relation,
                        },
                    ));
                }
            }
            RuleRelation::Correlated => {
                if same_action {
                    return None;
                }
                AnomalyKind::Correlation
            }
            RuleRelation::Disjoint => return None,
        };
        Some((
            later.index,
            Anomaly {
                peer: earlier.index,
                kind,
                relation,
            },
        ))
    }

    /// Keep-minimum merge on peer index. Commutative and idempotent, so the
    /// result is independent of the order findings arrive in.
    fn record(findings: &mut BTreeMap<usize, Anomaly>, index: usize, anomaly: Anomaly) {
        findings
            .entry(index)
            .and_modify(|existing| {
                if anomaly.peer < existing.peer {
                    *existing = anomaly;
                }
            })
            .or_insert(anomaly);
    }
}
