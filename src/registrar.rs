//! The Combinational and Sequential Registrars.
//!
//! Both walk the flat list of blocks the elaborated model hands over and
//! bind each block to the net-built [`SignalCell`]s — wiring each block to
//! the [`SignalCellId`]s it reads or writes rather than to the original
//! model tree, which is never consulted again after this point.

use crate::engine::EvalCtx;
use crate::event_queue::EventQueue;
use crate::ids::{CombId, SeqId, SignalCellId, SignalId};
use crate::model::{CombBlockSpec, SeqBlockSpec};
use crate::signal::SignalCell;
use crate::HashMap;

/// A registered combinational block: its id (the [`EventQueue`] dedup key)
/// and its closure. Indexed by `id.0` in [`crate::engine::CycleEngine`]'s
/// dispatch table — callers must register blocks in `CombId` allocation
/// order (see [`register_comb`]).
pub struct CombEntry {
    pub id: CombId,
    pub run: Box<dyn FnMut(&mut EvalCtx)>,
}

/// A registered sequential (edge-triggered) block. Order of the returned
/// `Vec` is the registration order, preserved from the model's declaration
/// order; `flop()` commits destinations in this same order each cycle.
pub struct SeqEntry {
    pub id: SeqId,
    pub run: Box<dyn FnMut(&mut EvalCtx)>,
}

/// Registers each combinational block: allocates its [`CombId`], registers a
/// callback on every cell in its read set, and enqueues it once immediately
/// so the model's initial state is settled before the first `cycle()`.
///
/// May be called more than once against the same `queue`/`cells` (the
/// [`crate::slice_bridge`] synthetic blocks are registered in a second call);
/// `CombId`s keep allocating monotonically across calls, so callers must
/// append the returned entries in call order to keep a single `Vec<CombEntry>`
/// indexable by `CombId`.
pub fn register_comb(
    blocks: Vec<CombBlockSpec>,
    cells: &mut [SignalCell],
    signal_to_cell: &HashMap<SignalId, SignalCellId>,
    queue: &mut EventQueue,
) -> Vec<CombEntry> {
    blocks
        .into_iter()
        .map(|block| {
            let id = queue.get_id();
            for sig in &block.read_set {
                let cell_id = signal_to_cell[sig];
                cells[cell_id.0 as usize].register_callback(id);
            }
            queue.enq(id);
            CombEntry { id, run: block.run }
        })
        .collect()
}

/// Registers each sequential block: allocates its [`SeqId`] and ensures every
/// write destination has a shadow cell.
pub fn register_seq(
    blocks: Vec<SeqBlockSpec>,
    cells: &mut [SignalCell],
    signal_to_cell: &HashMap<SignalId, SignalCellId>,
) -> Vec<SeqEntry> {
    blocks
        .into_iter()
        .enumerate()
        .map(|(i, block)| {
            for sig in &block.write_destinations {
                let cell_id = signal_to_cell[sig];
                cells[cell_id.0 as usize].ensure_shadow();
            }
            SeqEntry {
                id: SeqId(i as u32),
                run: block.run,
            }
        })
        .collect()
}
