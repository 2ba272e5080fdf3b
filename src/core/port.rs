//! Normalized port sets
//!
//! [`PortSpec`] mirrors [`AddressSet`] over the 16-bit port space. Named
//! services are resolved through a fixed lookup table before range
//! construction, and the Cisco `gt`/`lt` operators become open-ended
//! inclusive ranges.
//!
//! [`AddressSet`]: crate::core::address::AddressSet

use std::fmt;

use super::error::{Error, Result};
use super::relation::{SetRelation, range_relation};

/// One normalized port expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortSpec {
    /// Matches every port
    Any,
    Single(u16),
    /// Inclusive range, `lo < hi`
    Range { lo: u16, hi: u16 },
}

/// Fixed service-name table used by the upstream normalizers.
///
/// Deliberately small: the vendor parsers only emit names they recognize,
/// and an unknown name here is a normalization bug worth surfacing.
fn service_port(name: &str) -> Option<u16> {
    let port = match name {
        "echo" => 7,
        "ftp-data" => 20,
        "ftp" => 21,
        "ssh" => 22,
        "telnet" => 23,
        "smtp" => 25,
        "domain" | "dns" => 53,
        "bootps" => 67,
        "bootpc" => 68,
        "tftp" => 69,
        "www" | "http" => 80,
        "pop3" => 110,
        "ntp" => 123,
        "imap" => 143,
        "snmp" => 161,
        "snmptrap" => 162,
        "https" => 443,
        "syslog" => 514,
        "rip" => 520,
        _ => return None,
    };
    Some(port)
}

impl PortSpec {
    /// Builds a set from inclusive bounds, collapsing degenerate ranges to
    /// `Single`.
    ///
    /// # Errors
    ///
    /// `Error::Validation` when `lo > hi`.
    pub fn range(lo: u16, hi: u16) -> Result<Self> {
        if lo > hi {
            return Err(Error::validation(
                "port",
                format!("inverted port range {lo}-{hi}"),
            ));
        }
        if lo == hi {
            Ok(PortSpec::Single(lo))
        } else {
            Ok(PortSpec::Range { lo, hi })
        }
    }

    /// Parses one normalized port token: `any`, a number, a service name,
    /// `lo-hi` / `lo hi`, or `gt`/`lt` with an operand.
    ///
    /// # Errors
    ///
    /// `Error::Parse` for unresolvable names or malformed tokens;
    /// `Error::Validation` for ports over 65535, inverted ranges, and the
    /// empty `gt 65535` / `lt 0` cases.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("any") {
            return Ok(PortSpec::Any);
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        match tokens.as_slice() {
            &[one] => Self::parse_joined(&one.to_ascii_lowercase(), text),
            &[op, value] => match op.to_ascii_lowercase().as_str() {
                "gt" => Self::greater_than(resolve(value)?),
                "lt" => Self::less_than(resolve(value)?),
                "neq" => Err(Error::parse(text, "'neq' port match is not supported")),
                _ => Self::range(resolve(op)?, resolve(value)?),
            },
            _ => Err(Error::parse(text, "malformed port expression")),
        }
    }

    /// Single-token forms, where the normalizers join operator and operand
    /// with a dash (`gt-1023`, `10000-10010`).
    fn parse_joined(token: &str, original: &str) -> Result<Self> {
        // Whole-token service lookup first: names like "ftp-data" contain
        // the range separator.
        if let Some(port) = service_port(token) {
            return Ok(PortSpec::Single(port));
        }
        if let Some(value) = token.strip_prefix("gt-") {
            return Self::greater_than(resolve(value)?);
        }
        if let Some(value) = token.strip_prefix("lt-") {
            return Self::less_than(resolve(value)?);
        }
        if token == "neq" || token.starts_with("neq-") {
            // neq produces a non-contiguous set; the data model has no
            // representation for it
            return Err(Error::parse(original, "'neq' port match is not supported"));
        }
        if let Some((lo, hi)) = token.split_once('-') {
            return Self::range(resolve(lo)?, resolve(hi)?);
        }
        Ok(PortSpec::Single(resolve(token)?))
    }

    fn greater_than(port: u16) -> Result<Self> {
        if port == u16::MAX {
            return Err(Error::validation("port", "'gt 65535' matches no port"));
        }
        Self::range(port + 1, u16::MAX)
    }

    fn less_than(port: u16) -> Result<Self> {
        if port == 0 {
            return Err(Error::validation("port", "'lt 0' matches no port"));
        }
        Self::range(0, port - 1)
    }

    /// Inclusive bounds, or `None` for the universal sentinel.
    pub fn bounds(&self) -> Option<(u16, u16)> {
        match *self {
            PortSpec::Any => None,
            PortSpec::Single(p) => Some((p, p)),
            PortSpec::Range { lo, hi } => Some((lo, hi)),
        }
    }

    /// Five-way relation against another port set. `Any` is the universal
    /// superset and `Equal` only to another `Any`.
    pub fn relation(&self, other: &PortSpec) -> SetRelation {
        match (self.bounds(), other.bounds()) {
            (None, None) => SetRelation::Equal,
            (None, Some(_)) => SetRelation::Superset,
            (Some(_), None) => SetRelation::Subset,
            (Some((a_lo, a_hi)), Some((b_lo, b_hi))) => range_relation(a_lo, a_hi, b_lo, b_hi),
        }
    }

    /// True iff `other` lies entirely within this set.
    pub fn contains(&self, other: &PortSpec) -> bool {
        match (self.bounds(), other.bounds()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some((a_lo, a_hi)), Some((b_lo, b_hi))) => a_lo <= b_lo && b_hi <= a_hi,
        }
    }
}

/// Resolves a single operand: numeric port or service name.
fn resolve(token: &str) -> Result<u16> {
    let lower = token.to_ascii_lowercase();
    if let Some(port) = service_port(&lower) {
        return Ok(port);
    }
    let value: u32 = lower
        .parse()
        .map_err(|_| Error::parse(token, "unresolvable port or service name"))?;
    u16::try_from(value)
        .map_err(|_| Error::validation("port", format!("port {value} exceeds 65535")))
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PortSpec::Any => write!(f, "any"),
            PortSpec::Single(p) => write!(f, "{p}"),
            PortSpec::Range { lo, hi } => write!(f, "{lo}-{hi}"),
        }
    }
}
