//! [`SignalCell`]: the mutable value cell shared by every whole signal in a
//! net.
//!
//! Holds the current value, an optional shadow value for sequential
//! destinations, and the list of combinational callbacks to wake when the
//! current value changes. State lives in plain owned [`Bits`]; there is no
//! compiled code or shared memory region to manage.

use crate::bitvec::Bits;
use crate::error::{Phase, SimError};
use crate::event_queue::EventQueue;
use crate::ids::{CombId, SignalCellId};
use crate::register_queue::RegisterQueue;

/// The underlying mutable cell for one net. Every whole [`crate::model::SignalId`]
/// in the net is bound to the same `SignalCell` (by dense index, not pointer).
#[derive(Debug, Clone)]
pub struct SignalCell {
    /// A display name for error messages — the net's canonical (lexicographically
    /// smallest) hierarchical signal name.
    name: String,
    bits: Bits,
    shadow: Option<Bits>,
    callbacks: Vec<CombId>,
}

impl SignalCell {
    pub fn new(name: impl Into<String>, width: usize) -> Self {
        Self {
            name: name.into(),
            bits: Bits::zero(width),
            shadow: None,
            callbacks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.bits.width()
    }

    /// Allocate the shadow cell used by sequential destinations. Idempotent.
    pub fn ensure_shadow(&mut self) {
        if self.shadow.is_none() {
            self.shadow = Some(Bits::zero(self.bits.width()));
        }
    }

    pub fn has_shadow(&self) -> bool {
        self.shadow.is_some()
    }

    /// No side effects.
    pub fn read(&self) -> &Bits {
        &self.bits
    }

    /// Sets the current value. If it differs from the previous value in any
    /// bit, every registered callback is enqueued (deduplicated) before this
    /// returns. Equal values fire nothing.
    pub fn write(
        &mut self,
        id: SignalCellId,
        value: Bits,
        cycle: u64,
        phase: Phase,
        queue: &mut EventQueue,
    ) -> Result<(), SimError> {
        if value.width() != self.bits.width() {
            return Err(SimError::WidthError {
                cycle,
                phase,
                signal: self.name.clone(),
                cell: id,
                expected: self.bits.width(),
                got: value.width(),
            });
        }
        if value != self.bits {
            self.bits = value;
            for &cb in &self.callbacks {
                queue.enq(cb);
            }
        }
        Ok(())
    }

    /// Writes into the shadow cell, not `bits`, and records `id` on the
    /// register queue at most once this cycle.
    pub fn write_next(
        &mut self,
        id: SignalCellId,
        value: Bits,
        cycle: u64,
        phase: Phase,
        register_queue: &mut RegisterQueue,
    ) -> Result<(), SimError> {
        let width = self.bits.width();
        let Some(shadow) = self.shadow.as_mut() else {
            return Err(SimError::NotASequentialDestinationError {
                cycle,
                phase,
                signal: self.name.clone(),
                cell: id,
            });
        };
        if value.width() != width {
            return Err(SimError::WidthError {
                cycle,
                phase,
                signal: self.name.clone(),
                cell: id,
                expected: width,
                got: value.width(),
            });
        }
        *shadow = value;
        register_queue.mark(id);
        Ok(())
    }

    /// Copies `shadow` into `bits`, applying normal `write` semantics
    /// (enqueuing callbacks on change).
    pub fn flop(
        &mut self,
        id: SignalCellId,
        cycle: u64,
        queue: &mut EventQueue,
    ) -> Result<(), SimError> {
        let value = self
            .shadow
            .clone()
            .expect("flop() called on a cell with no shadow; register queue invariant violated");
        self.write(id, value, cycle, Phase::Flop, queue)
    }

    pub fn register_callback(&mut self, id: CombId) {
        self.callbacks.push(id);
    }

    pub fn callbacks(&self) -> &[CombId] {
        &self.callbacks
    }
}
