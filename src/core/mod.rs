//! Core ACL analysis functionality
//!
//! This module contains the types and algorithms for auditing an ordered
//! firewall rule set. It provides:
//!
//! - [`address`] / [`port`]: normalized address and port sets
//! - [`relation`]: the five-way per-field relation they share
//! - [`policy`]: normalized rules, packets, and per-field dispatch
//! - [`engine`]: whole-rule relation classification
//! - [`anomaly`]: shadowing/redundancy/correlation/generalization detection
//! - [`matcher`]: first-match packet evaluation
//! - [`analyzer`]: facade composing the three engines over one rule list
//! - [`error`]: error types for rule normalization

pub mod address;
pub mod analyzer;
pub mod anomaly;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod policy;
pub mod port;
pub mod relation;

#[cfg(test)]
pub mod test_helpers;
