//! Error kinds for the simulation core: one flat `thiserror` enum, each
//! variant carrying the context a caller needs to diagnose it. Nothing here
//! is recovered internally — every variant aborts the current `cycle()` and
//! surfaces to the caller.

use crate::ids::{CombId, SignalCellId};
use thiserror::Error;

/// Which phase of the two-phase cycle protocol an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PreTickSettle,
    Tick,
    Flop,
    PostTickSettle,
    Construction,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::PreTickSettle => "pre-tick settle",
            Phase::Tick => "tick",
            Phase::Flop => "flop",
            Phase::PostTickSettle => "post-tick settle",
            Phase::Construction => "construction",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("cycle() called before the model was elaborated")]
    NotElaborated,

    #[error(
        "net containing signal '{signal}' has inconsistent declared widths: {width_a} vs {width_b}"
    )]
    NetWidthMismatch {
        signal: String,
        width_a: usize,
        width_b: usize,
    },

    #[error(
        "cycle {cycle}, phase {phase}: write to signal '{signal}' ({cell}) has width {got}, expected {expected}"
    )]
    WidthError {
        cycle: u64,
        phase: Phase,
        signal: String,
        cell: SignalCellId,
        expected: usize,
        got: usize,
    },

    #[error(
        "cycle {cycle}, phase {phase}: write_next() on signal '{signal}' ({cell}), which has no shadow cell (it is never a sequential destination)"
    )]
    NotASequentialDestinationError {
        cycle: u64,
        phase: Phase,
        signal: String,
        cell: SignalCellId,
    },

    #[error(
        "cycle {cycle}: combinational logic failed to settle within {bound} iterations; last drained blocks: {last:?}"
    )]
    CombinationalLoop {
        cycle: u64,
        bound: usize,
        last: Vec<CombId>,
    },

    #[error("I/O error while attaching a collaborator hook: {0}")]
    Io(#[from] std::io::Error),

    #[error("no signal registered at path '{path}'")]
    UnknownSignalPath { path: String },
}

impl SimError {
    /// The cycle number at which this error occurred, if applicable.
    pub fn cycle(&self) -> Option<u64> {
        match self {
            SimError::WidthError { cycle, .. }
            | SimError::NotASequentialDestinationError { cycle, .. }
            | SimError::CombinationalLoop { cycle, .. } => Some(*cycle),
            _ => None,
        }
    }
}
