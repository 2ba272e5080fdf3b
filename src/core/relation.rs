//! The five-way set relation shared by every rule field
//!
//! Addresses, ports, and protocols all reduce to the same question: how does
//! one match set stand relative to another? Answering it uniformly per field
//! is what lets [`RelationEngine`] fold five field answers into a single
//! whole-rule relation.
//!
//! [`RelationEngine`]: crate::core::engine::RelationEngine

/// Relation between two match sets of the same field
///
/// `Subset` and `Superset` are strict: `Equal` is its own case, never a
/// degenerate containment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum SetRelation {
    #[strum(serialize = "equal")]
    Equal,
    /// This set lies strictly inside the other
    #[strum(serialize = "subset")]
    Subset,
    /// The other set lies strictly inside this one
    #[strum(serialize = "superset")]
    Superset,
    /// Empty intersection
    #[strum(serialize = "disjoint")]
    Disjoint,
    /// Intersecting without containment either way
    #[strum(serialize = "overlapping")]
    Overlapping,
}

impl SetRelation {
    /// Returns the relation seen from the other operand's side.
    ///
    /// Equal, Disjoint, and Overlapping are self-symmetric; Subset and
    /// Superset swap.
    pub const fn mirror(self) -> Self {
        match self {
            SetRelation::Subset => SetRelation::Superset,
            SetRelation::Superset => SetRelation::Subset,
            other => other,
        }
    }

    /// True for Equal or (strict) Subset: every member of this set is a
    /// member of the other.
    pub const fn is_within(self) -> bool {
        matches!(self, SetRelation::Equal | SetRelation::Subset)
    }

    /// True for Equal or (strict) Superset.
    pub const fn is_covering(self) -> bool {
        matches!(self, SetRelation::Equal | SetRelation::Superset)
    }
}

/// Relation between two inclusive integer ranges.
///
/// Works for both 32-bit address space and 16-bit port space; the universal
/// "any" sentinel is handled by the callers before ranges are compared.
pub(crate) fn range_relation<T: Copy + Ord>(a_lo: T, a_hi: T, b_lo: T, b_hi: T) -> SetRelation {
    if (a_lo, a_hi) == (b_lo, b_hi) {
        SetRelation::Equal
    } else if a_lo >= b_lo && a_hi <= b_hi {
        SetRelation::Subset
    } else if b_lo >= a_lo && b_hi <= a_hi {
        SetRelation::Superset
    } else if a_hi < b_lo || b_hi < a_lo {
        SetRelation::Disjoint
    } else {
        SetRelation::Overlapping
    }
}
