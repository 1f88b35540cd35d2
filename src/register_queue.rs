//! Per-cycle register queue: the set of shadow-bearing [`SignalCellId`]s
//! touched by `write_next` this cycle, each committed by `flop()` exactly
//! once.
//!
//! Implemented the same way as [`crate::event_queue::EventQueue`] — a vec
//! plus a `bit_set::BitSet` presence test — but popped in insertion order
//! from the end, rather than FIFO, since commit order within a cycle has
//! no observable effect and LIFO pop avoids shifting the vec.

use crate::ids::SignalCellId;
use bit_set::BitSet;

#[derive(Debug, Default)]
pub struct RegisterQueue {
    order: Vec<SignalCellId>,
    present: BitSet,
}

impl RegisterQueue {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            present: BitSet::new(),
        }
    }

    /// Records `id` at most once.
    pub fn mark(&mut self, id: SignalCellId) {
        let idx = id.0 as usize;
        if !self.present.contains(idx) {
            self.present.insert(idx);
            self.order.push(id);
        }
    }

    /// Pops in LIFO order (from the end), clearing the presence bit.
    pub fn pop(&mut self) -> Option<SignalCellId> {
        let id = self.order.pop()?;
        self.present.remove(id.0 as usize);
        Some(id)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_most_once_per_cycle() {
        let mut rq = RegisterQueue::new();
        rq.mark(SignalCellId(3));
        rq.mark(SignalCellId(3));
        rq.mark(SignalCellId(1));
        assert_eq!(rq.len(), 2);
    }

    #[test]
    fn pops_lifo() {
        let mut rq = RegisterQueue::new();
        rq.mark(SignalCellId(0));
        rq.mark(SignalCellId(1));
        assert_eq!(rq.pop(), Some(SignalCellId(1)));
        assert_eq!(rq.pop(), Some(SignalCellId(0)));
        assert_eq!(rq.pop(), None);
    }
}
