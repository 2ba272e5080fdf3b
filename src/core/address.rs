//! Normalized IPv4 address sets
//!
//! An [`AddressSet`] is the comparable form of one address expression from a
//! normalized rule: the universal `any`, a single host, or an inclusive
//! range of 32-bit addresses. Construction happens once during rule
//! normalization; afterwards the set is immutable and only queried for
//! relation and containment.
//!
//! # Accepted text forms
//!
//! - `any`
//! - `140.192.37.20` (bare host)
//! - `140.192.37.0/24` (CIDR)
//! - `140.192.37.0/0.0.0.255` or `140.192.37.0 0.0.0.255` (dotted mask)
//!
//! A dotted mask with its most significant bit clear is read as a Cisco
//! wildcard mask (set bits are don't-care), otherwise as a subnet mask. The
//! don't-care bits must be contiguous in either reading.

use std::fmt;
use std::net::Ipv4Addr;

use ipnetwork::Ipv4Network;

use super::error::{Error, Result};
use super::relation::{SetRelation, range_relation};

/// One normalized address expression
///
/// `Any` is a distinct universal sentinel: it is the superset of every set
/// (including the full range `0.0.0.0/0`) and `Equal` only to another `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressSet {
    /// Matches every address
    Any,
    /// Exactly one host
    Single(u32),
    /// Inclusive range, `lo < hi`
    Range { lo: u32, hi: u32 },
}

impl AddressSet {
    /// Builds a set from inclusive bounds, collapsing degenerate ranges to
    /// `Single`.
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`; all construction paths order the bounds first.
    pub fn range(lo: u32, hi: u32) -> Self {
        assert!(lo <= hi, "inverted address range");
        if lo == hi {
            AddressSet::Single(lo)
        } else {
            AddressSet::Range { lo, hi }
        }
    }

    /// Single-host set.
    pub fn host(addr: Ipv4Addr) -> Self {
        AddressSet::Single(u32::from(addr))
    }

    /// Parses one normalized address token.
    ///
    /// # Examples
    ///
    /// ```
    /// use aclscan::core::address::AddressSet;
    ///
    /// let cidr = AddressSet::parse("172.16.130.0/24").unwrap();
    /// let wildcard = AddressSet::parse("172.16.130.0 0.0.0.255").unwrap();
    /// assert_eq!(cidr, wildcard);
    ///
    /// assert!(AddressSet::parse("172.16.130.0/33").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// `Error::Parse` for malformed octets, masks, or prefixes;
    /// `Error::Validation` for a prefix length over 32.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("any") {
            return Ok(AddressSet::Any);
        }

        // The upstream normalizers emit "addr mask" pairs joined by either
        // a space or a slash; fold both into the slash form.
        let norm = text.split_whitespace().collect::<Vec<_>>().join("/");

        let Some((addr, mask)) = norm.split_once('/') else {
            let ip: Ipv4Addr = norm
                .parse()
                .map_err(|_| Error::parse(text, "malformed IPv4 address"))?;
            return Ok(AddressSet::host(ip));
        };

        let ip: Ipv4Addr = addr
            .parse()
            .map_err(|_| Error::parse(text, "malformed IPv4 address"))?;

        if mask.contains('.') {
            let mask_ip: Ipv4Addr = mask
                .parse()
                .map_err(|_| Error::parse(text, "malformed dotted mask"))?;
            return Self::from_dotted_mask(text, u32::from(ip), u32::from(mask_ip));
        }

        let prefix: u32 = mask
            .parse()
            .map_err(|_| Error::parse(text, "malformed prefix length"))?;
        if prefix > 32 {
            return Err(Error::validation(
                "address",
                format!("prefix length {prefix} exceeds 32"),
            ));
        }
        // Prefix already range-checked, so this cannot fail
        let net = Ipv4Network::new(ip, u8::try_from(prefix).unwrap_or(32))
            .map_err(|e| Error::parse(text, e.to_string()))?;
        Ok(Self::range(
            u32::from(net.network()),
            u32::from(net.broadcast()),
        ))
    }

    /// Dotted masks are ambiguous between Cisco wildcard and subnet form;
    /// the most significant bit decides (0 = wildcard, 1 = subnet mask).
    fn from_dotted_mask(token: &str, addr: u32, mask: u32) -> Result<Self> {
        if mask & 0x8000_0000 == 0 {
            // Wildcard: don't-care bits must be a contiguous low block
            if mask & (mask + 1) != 0 {
                return Err(Error::parse(token, "non-contiguous wildcard mask"));
            }
            Ok(Self::range(addr & !mask, addr | mask))
        } else {
            let host_bits = !mask;
            if host_bits & (host_bits + 1) != 0 {
                return Err(Error::parse(token, "non-contiguous subnet mask"));
            }
            Ok(Self::range(addr & mask, addr | host_bits))
        }
    }

    /// Inclusive bounds, or `None` for the universal sentinel.
    pub fn bounds(&self) -> Option<(u32, u32)> {
        match *self {
            AddressSet::Any => None,
            AddressSet::Single(a) => Some((a, a)),
            AddressSet::Range { lo, hi } => Some((lo, hi)),
        }
    }

    /// Five-way relation against another address set.
    pub fn relation(&self, other: &AddressSet) -> SetRelation {
        match (self.bounds(), other.bounds()) {
            (None, None) => SetRelation::Equal,
            (None, Some(_)) => SetRelation::Superset,
            (Some(_), None) => SetRelation::Subset,
            (Some((a_lo, a_hi)), Some((b_lo, b_hi))) => range_relation(a_lo, a_hi, b_lo, b_hi),
        }
    }

    /// True iff `other` lies entirely within this set.
    ///
    /// Containment, not overlap: a packet field that is itself a range must
    /// fit completely inside the rule's field.
    pub fn contains(&self, other: &AddressSet) -> bool {
        match (self.bounds(), other.bounds()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some((a_lo, a_hi)), Some((b_lo, b_hi))) => a_lo <= b_lo && b_hi <= a_hi,
        }
    }
}

impl fmt::Display for AddressSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AddressSet::Any => write!(f, "any"),
            AddressSet::Single(a) => write!(f, "{}", Ipv4Addr::from(a)),
            AddressSet::Range { lo, hi } => {
                if lo == 0 && hi == u32::MAX {
                    return write!(f, "0.0.0.0/0");
                }
                let size = hi - lo + 1;
                if size.is_power_of_two() && lo & (size - 1) == 0 {
                    write!(f, "{}/{}", Ipv4Addr::from(lo), 32 - size.trailing_zeros())
                } else {
                    write!(f, "{}-{}", Ipv4Addr::from(lo), Ipv4Addr::from(hi))
                }
            }
        }
    }
}
