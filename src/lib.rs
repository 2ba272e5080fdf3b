//! ACLScan - order-aware firewall ACL conflict analyzer
//!
//! Audits an ordered firewall rule set for conflicts that only manifest
//! through evaluation order, and simulates how a concrete packet would be
//! handled.
//!
//! # Architecture
//!
//! - [`core`](crate::core) - Address/port normalization, relation
//!   classification, anomaly detection, and first-match evaluation
//! - [`loader`] - CSV/JSON loading of already-normalized rule records
//!
//! # Example
//!
//! ```
//! use aclscan::core::analyzer::PolicyAnalyzer;
//! use aclscan::core::anomaly::AnomalyKind;
//! use aclscan::core::policy::{Packet, Policy};
//!
//! let policies = vec![
//!     Policy::parse(0, "tcp", "any", "any", "any", "80", "permit").unwrap(),
//!     Policy::parse(1, "tcp", "any", "any", "any", "80", "deny").unwrap(),
//! ];
//! let analyzer = PolicyAnalyzer::new(policies);
//!
//! let anomalies = analyzer.get_anomalies();
//! assert_eq!(anomalies[&1].kind, AnomalyKind::Shadowing);
//! assert_eq!(anomalies[&1].peer, 0);
//!
//! let packet = Packet::parse("tcp", "10.1.2.3", "any", "8.8.8.8", "80").unwrap();
//! assert_eq!(analyzer.get_first_match(&packet).unwrap().index, 0);
//! ```

#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]

pub mod core;
pub mod loader;

// Re-export commonly used types
pub use crate::core::analyzer::PolicyAnalyzer;
pub use crate::core::anomaly::{Anomaly, AnomalyKind};
pub use crate::core::engine::{RelationEngine, RuleRelation};
pub use crate::core::error::{Error, Result};
pub use crate::core::policy::{Action, Packet, Policy};
