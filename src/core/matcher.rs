//! First-match packet evaluation
//!
//! Walks the rule list in ascending index order and returns the first rule
//! whose every field contains the packet's scope. Containment, not overlap:
//! a range-valued packet field must fit entirely inside the rule's field.
//!
//! The engine asserts no implicit default action. `None` means no rule
//! matched; default-deny versus default-permit is the caller's policy.

use super::policy::{Packet, Policy};

/// Evaluates concrete packets against the ordered rule list
pub struct MatchEngine;

impl MatchEngine {
    /// Returns the first matching policy, or `None` when no rule matches.
    ///
    /// Deterministic and order-sensitive: rules past the first match are
    /// never considered, so an earlier broad rule wins over a later, more
    /// specific one.
    pub fn first_match<'a>(packet: &Packet, policies: &'a [Policy]) -> Option<&'a Policy> {
        policies.iter().find(|policy| policy.matches(packet))
    }
}
