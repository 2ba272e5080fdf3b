//! Normalized rules and packets
//!
//! A [`Policy`] is one rule of the ordered ACL after vendor-specific
//! normalization: protocol token, source/destination address sets,
//! source/destination port sets, action, and the position index assigned by
//! original document order. The index is load-bearing: every algorithm in
//! this crate (relations, anomalies, first-match) is defined in terms of it.
//! Policies are created once and never mutated.
//!
//! A [`Packet`] carries the same field types but describes a concrete scope
//! to evaluate, normally a single point. A range-valued packet field is
//! allowed and must be fully contained by a rule's field to match.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::address::AddressSet;
use super::error::{Error, Result};
use super::port::PortSpec;
use super::relation::SetRelation;

/// Protocol token of a rule or packet
///
/// Case-insensitive; `ip` and `any` are the universal wildcard. Two distinct
/// concrete tokens are Disjoint, since no packet carries both protocols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Matches every protocol (`ip` / `any`)
    Any,
    /// One concrete protocol, stored lowercase
    Token(String),
}

impl Protocol {
    /// Parses a protocol token.
    ///
    /// # Errors
    ///
    /// `Error::Parse` on an empty token.
    pub fn parse(text: &str) -> Result<Self> {
        let token = text.trim().to_ascii_lowercase();
        if token.is_empty() {
            return Err(Error::parse(text, "empty protocol token"));
        }
        if token == "ip" || token == "any" {
            return Ok(Protocol::Any);
        }
        Ok(Protocol::Token(token))
    }

    /// Five-way relation; only Equal, Subset, Superset, and Disjoint can
    /// occur for protocols.
    pub fn relation(&self, other: &Protocol) -> SetRelation {
        match (self, other) {
            (Protocol::Any, Protocol::Any) => SetRelation::Equal,
            (Protocol::Any, Protocol::Token(_)) => SetRelation::Superset,
            (Protocol::Token(_), Protocol::Any) => SetRelation::Subset,
            (Protocol::Token(a), Protocol::Token(b)) => {
                if a == b {
                    SetRelation::Equal
                } else {
                    SetRelation::Disjoint
                }
            }
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Any => write!(f, "ip"),
            Protocol::Token(t) => write!(f, "{t}"),
        }
    }
}

/// Rule action
///
/// The upstream contract allows the spellings `permit`/`accept` for Permit
/// and `deny` for Deny, case-insensitively.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Action {
    #[strum(to_string = "permit", serialize = "accept")]
    Permit,
    #[strum(serialize = "deny")]
    Deny,
}

/// The five match fields of a rule, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter, strum::AsRefStr)]
pub enum Field {
    #[strum(serialize = "protocol")]
    Protocol,
    #[strum(serialize = "src")]
    Src,
    #[strum(serialize = "sport")]
    SrcPort,
    #[strum(serialize = "dst")]
    Dst,
    #[strum(serialize = "dport")]
    DstPort,
}

/// One normalized firewall rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Unique position in the evaluation order; lower = higher precedence
    pub index: usize,
    pub protocol: Protocol,
    pub src: AddressSet,
    pub sport: PortSpec,
    pub dst: AddressSet,
    pub dport: PortSpec,
    pub action: Action,
}

impl Policy {
    /// Builds a policy from normalized text fields.
    ///
    /// # Errors
    ///
    /// Propagates the `Parse`/`Validation` error of the first offending
    /// field; a failure aborts only this rule's construction.
    pub fn parse(
        index: usize,
        protocol: &str,
        src: &str,
        sport: &str,
        dst: &str,
        dport: &str,
        action: &str,
    ) -> Result<Self> {
        Ok(Policy {
            index,
            protocol: Protocol::parse(protocol)?,
            src: AddressSet::parse(src)?,
            sport: PortSpec::parse(sport)?,
            dst: AddressSet::parse(dst)?,
            dport: PortSpec::parse(dport)?,
            action: action.trim().parse().map_err(|_| {
                Error::parse(action, "unknown action (expected permit/accept/deny)")
            })?,
        })
    }

    /// Relation of one field of this rule against the same field of `other`.
    pub fn field_relation(&self, field: Field, other: &Policy) -> SetRelation {
        match field {
            Field::Protocol => self.protocol.relation(&other.protocol),
            Field::Src => self.src.relation(&other.src),
            Field::SrcPort => self.sport.relation(&other.sport),
            Field::Dst => self.dst.relation(&other.dst),
            Field::DstPort => self.dport.relation(&other.dport),
        }
    }

    /// All five field relations against `other`, in [`Field`] order.
    pub fn field_relations(&self, other: &Policy) -> [SetRelation; 5] {
        [
            self.protocol.relation(&other.protocol),
            self.src.relation(&other.src),
            self.sport.relation(&other.sport),
            self.dst.relation(&other.dst),
            self.dport.relation(&other.dport),
        ]
    }

    /// True iff this rule matches the packet: the protocol covers the
    /// packet's protocol and every address/port field fully contains the
    /// packet's scope.
    pub fn matches(&self, packet: &Packet) -> bool {
        self.protocol.relation(&packet.protocol).is_covering()
            && self.src.contains(&packet.src)
            && self.sport.contains(&packet.sport)
            && self.dst.contains(&packet.dst)
            && self.dport.contains(&packet.dport)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} -> {} {}",
            self.action, self.protocol, self.src, self.sport, self.dst, self.dport
        )
    }
}

/// A concrete packet scope to evaluate against the rule list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub protocol: Protocol,
    pub src: AddressSet,
    pub sport: PortSpec,
    pub dst: AddressSet,
    pub dport: PortSpec,
}

impl Packet {
    /// Builds a packet from normalized text fields, with the same grammar as
    /// rule fields.
    ///
    /// # Errors
    ///
    /// Propagates the `Parse`/`Validation` error of the first offending
    /// field.
    pub fn parse(protocol: &str, src: &str, sport: &str, dst: &str, dport: &str) -> Result<Self> {
        Ok(Packet {
            protocol: Protocol::parse(protocol)?,
            src: AddressSet::parse(src)?,
            sport: PortSpec::parse(sport)?,
            dst: AddressSet::parse(dst)?,
            dport: PortSpec::parse(dport)?,
        })
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} -> {} {}",
            self.protocol, self.src, self.sport, self.dst, self.dport
        )
    }
}
