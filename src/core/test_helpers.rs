//! Shared builders for core tests
//!
//! Rules and packets are written as single normalized strings so scenario
//! tests read like the ACLs they exercise.

use super::policy::{Packet, Policy};

/// Builds a policy from `"action protocol src sport dst dport"`.
///
/// # Panics
///
/// Panics on a malformed spec; test inputs are expected to be valid.
pub fn policy(index: usize, spec: &str) -> Policy {
    let tokens: Vec<&str> = spec.split_whitespace().collect();
    assert_eq!(
        tokens.len(),
        6,
        "policy spec needs 'action protocol src sport dst dport', got '{spec}'"
    );
    Policy::parse(
        index, tokens[1], tokens[2], tokens[3], tokens[4], tokens[5], tokens[0],
    )
    .expect("valid policy spec")
}

/// Builds a rule list, assigning indices by position.
pub fn policies(specs: &[&str]) -> Vec<Policy> {
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| policy(index, spec))
        .collect()
}

/// Builds a packet from `"protocol src sport dst dport"`.
///
/// # Panics
///
/// Panics on a malformed spec.
pub fn packet(spec: &str) -> Packet {
    let tokens: Vec<&str> = spec.split_whitespace().collect();
    assert_eq!(
        tokens.len(),
        5,
        "packet spec needs 'protocol src sport dst dport', got '{spec}'"
    );
    Packet::parse(tokens[0], tokens[1], tokens[2], tokens[3], tokens[4]).expect("valid packet spec")
}
