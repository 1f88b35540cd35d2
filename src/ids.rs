//! Dense integer identities used throughout the engine.
//!
//! Per the re-architecture notes in the specification, every signal and
//! block is identified by a small `Copy` newtype indexing into a `Vec`
//! rather than by shared pointer/object identity. This gives trivial
//! equality, `Ord` for deterministic tie-breaking, and cache-friendly
//! storage.

use std::fmt;

/// Identity of a [`crate::model::SignalDecl`] as emitted by the elaborated
/// model, before net unification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignalId(pub u32);

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sig{}", self.0)
    }
}

/// Identity of a net's shared [`crate::signal::SignalCell`], after union-find
/// collapses whole signals into equivalence classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignalCellId(pub u32);

impl fmt::Display for SignalCellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell{}", self.0)
    }
}

/// Identity of a combinational block, allocated monotonically by
/// [`crate::event_queue::EventQueue::get_id`]. Also used as the dedup key
/// for pending callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CombId(pub u32);

impl fmt::Display for CombId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "comb{}", self.0)
    }
}

/// Identity of a sequential (edge-triggered) block. Order is the
/// registration order, which callers rely on for determinism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeqId(pub u32);

impl fmt::Display for SeqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seq{}", self.0)
    }
}
