//! Node ordering policies.
//!
//! A policy is the only place tie-break rules live. It answers two questions
//! for the tree builder:
//!
//! - [`OrderingPolicy::compare`]: which candidates are merged next. The two
//!   nodes that compare lowest are selected, the lowest one first.
//! - [`OrderingPolicy::orient`]: which of the two selected nodes becomes the
//!   left (`0`) child.
//!
//! Different policies produce different trees that are all optimal by weight.
//! Only one of them matches a given piece of hardware, so the builder never
//! hard-codes a comparison. Any `Fn(&NodeKey, &NodeKey) -> Ordering` is a
//! policy with the default placement.

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::{error::GoldenError, huffman::NodeKey};

/// Which of the two selected nodes goes left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    FirstLeft,
    SecondLeft,
}

pub trait OrderingPolicy {
    /// `Less` means `a` is merged before `b`. Must be a total order over the
    /// candidates of one build; equal keys fall back to candidate order.
    fn compare(&self, a: &NodeKey, b: &NodeKey) -> Ordering;

    /// Defaults to putting the later-ranked (heavier or tie-losing) node left.
    fn orient(&self, _first: &NodeKey, _second: &NodeKey) -> Placement {
        Placement::SecondLeft
    }
}

impl<F> OrderingPolicy for F
where
    F: Fn(&NodeKey, &NodeKey) -> Ordering,
{
    fn compare(&self, a: &NodeKey, b: &NodeKey) -> Ordering {
        self(a, b)
    }
}

/// Leaves rank before internal nodes; leaves by alphabet rank, internal
/// nodes by age.
fn leaf_then_rank_then_age(a: &NodeKey, b: &NodeKey) -> Ordering {
    a.weight.cmp(&b.weight).then_with(|| match (a.rank(), b.rank()) {
        (Some(ra), Some(rb)) => ra.cmp(&rb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.creation.cmp(&b.creation),
    })
}

/// Ascending weight, then leaf before internal, then alphabet rank among
/// leaves and creation order among internal nodes. The heavier or
/// tie-losing node goes left.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafFirst;

impl OrderingPolicy for LeafFirst {
    fn compare(&self, a: &NodeKey, b: &NodeKey) -> Ordering {
        leaf_then_rank_then_age(a, b)
    }
}

/// Same selection order as [`LeafFirst`], but when the two selected nodes
/// weigh the same the tie-break winner goes left.
///
/// Internal nodes of equal weight are taken oldest first. Heap-ordered
/// generators of this convention leave that tie to heap layout, so their
/// tables differ whenever two internal nodes tie: all-equal weights give
/// `A:000;B:001;...` here but `A:100;B:101;C:000;...` from a binary heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolPriority;

impl OrderingPolicy for SymbolPriority {
    fn compare(&self, a: &NodeKey, b: &NodeKey) -> Ordering {
        leaf_then_rank_then_age(a, b)
    }

    fn orient(&self, first: &NodeKey, second: &NodeKey) -> Placement {
        if first.weight < second.weight {
            Placement::SecondLeft
        } else {
            Placement::FirstLeft
        }
    }
}

/// Ascending weight, then the most recently created node first. Ignores the
/// alphabet entirely; leaf creation indices stand in for symbol ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescendingId;

impl OrderingPolicy for DescendingId {
    fn compare(&self, a: &NodeKey, b: &NodeKey) -> Ordering {
        a.weight
            .cmp(&b.weight)
            .then_with(|| b.creation.cmp(&a.creation))
    }
}

/// The built-in policies, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    #[default]
    LeafFirst,
    SymbolPriority,
    DescendingId,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::LeafFirst,
        PolicyKind::SymbolPriority,
        PolicyKind::DescendingId,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::LeafFirst => "leaf-first",
            PolicyKind::SymbolPriority => "symbol-priority",
            PolicyKind::DescendingId => "descending-id",
        }
    }
}

impl OrderingPolicy for PolicyKind {
    fn compare(&self, a: &NodeKey, b: &NodeKey) -> Ordering {
        match self {
            PolicyKind::LeafFirst => LeafFirst.compare(a, b),
            PolicyKind::SymbolPriority => SymbolPriority.compare(a, b),
            PolicyKind::DescendingId => DescendingId.compare(a, b),
        }
    }

    fn orient(&self, first: &NodeKey, second: &NodeKey) -> Placement {
        match self {
            PolicyKind::LeafFirst => LeafFirst.orient(first, second),
            PolicyKind::SymbolPriority => SymbolPriority.orient(first, second),
            PolicyKind::DescendingId => DescendingId.orient(first, second),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = GoldenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GoldenError::InvalidInput(format!("unknown tie-break policy {s:?}")))
    }
}
