//! The "Elaborated Model" contract: what an upstream frontend must hand the
//! engine once a design tree has been flattened to signals, connections, and
//! behavioral blocks.
//!
//! Tree traversal, name mangling, and port instantiation all happen before
//! this boundary and are none of this crate's concern. What crosses the
//! boundary is captured here as plain data plus explicit registration
//! closures: every combinational block is built by a small builder that
//! collects its read set as data up front, so the engine never has to
//! rediscover dependencies by scanning a block's body at run time.

use crate::engine::EvalCtx;
use crate::ids::SignalId;

/// Whether a signal is a module port or an internal wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
    Wire,
}

/// A single named, fixed-width signal location.
#[derive(Debug, Clone)]
pub struct SignalDecl {
    pub id: SignalId,
    /// Hierarchical name, e.g. `"top.r0.out"`.
    pub name: String,
    pub nbits: usize,
    pub direction: Direction,
    pub parent_module: String,
}

/// An inclusive bit range `[lsb, msb]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitRange {
    pub lsb: usize,
    pub msb: usize,
}

impl BitRange {
    pub fn new(lsb: usize, msb: usize) -> Self {
        debug_assert!(lsb <= msb, "lsb must be <= msb");
        Self { lsb, msb }
    }

    pub fn width(&self) -> usize {
        self.msb - self.lsb + 1
    }
}

impl std::fmt::Display for BitRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.lsb == self.msb {
            write!(f, "[{}]", self.lsb)
        } else {
            write!(f, "[{}:{}]", self.msb, self.lsb)
        }
    }
}

/// A structural equality connection between two whole signals, or a
/// partial-width alias between two signals.
#[derive(Debug, Clone)]
pub enum Connection {
    Whole(SignalId, SignalId),
    Slice {
        dest: SignalId,
        dest_range: BitRange,
        src: SignalId,
        src_range: BitRange,
    },
}

/// A combinational block: a callable plus its declared read and write sets.
/// `run` is invoked with an [`EvalCtx`] giving read/write access to the bound
/// signal cells; the read set drives callback registration and is trusted
/// as emitted by elaboration — it is never inferred from the block's body.
pub struct CombBlockSpec {
    pub read_set: Vec<SignalId>,
    pub write_set: Vec<SignalId>,
    pub run: Box<dyn FnMut(&mut EvalCtx)>,
}

impl std::fmt::Debug for CombBlockSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombBlockSpec")
            .field("read_set", &self.read_set)
            .field("write_set", &self.write_set)
            .finish()
    }
}

/// An edge-triggered block: a callable plus the signals it writes on the
/// clock edge. Order within a module's registration list is preserved.
pub struct SeqBlockSpec {
    pub write_destinations: Vec<SignalId>,
    pub run: Box<dyn FnMut(&mut EvalCtx)>,
}

impl std::fmt::Debug for SeqBlockSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeqBlockSpec")
            .field("write_destinations", &self.write_destinations)
            .finish()
    }
}

/// The contract an elaborated model must satisfy to be simulated.
///
/// `comb_blocks`/`seq_blocks` consume `self` because their closures are
/// moved into the engine once, at registration time; there is no re-reading
/// of the model tree afterward.
pub trait ElaboratedModel {
    fn is_elaborated(&self) -> bool;

    fn signals(&self) -> &[SignalDecl];

    fn connections(&self) -> &[Connection];

    fn comb_blocks(&mut self) -> Vec<CombBlockSpec>;

    fn seq_blocks(&mut self) -> Vec<SeqBlockSpec>;

    /// The top-level `reset` signal (width 1).
    fn reset_signal(&self) -> SignalId;

    /// The top-level `clk` signal (width 1).
    fn clk_signal(&self) -> SignalId;
}

pub mod builder;
pub use builder::{ModelBuilder, StaticModel};
