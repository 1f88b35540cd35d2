//! The Cycle Engine, the entry point tying the net builder, registrars, and
//! slice bridge together.
//!
//! `CycleEngine` owns the net-built cells, the event/register queues, and the
//! registered block tables, and drives the two-phase cycle protocol. It
//! interprets boxed closures directly rather than dispatching into compiled
//! machine code, since there is no HDL front end in scope here.

use crate::bitvec::Bits;
use crate::error::{Phase, SimError};
use crate::event_queue::EventQueue;
use crate::hooks::{Metrics, StatsCollector, VcdSink};
use crate::ids::{CombId, SignalCellId};
use crate::model::{BitRange, ElaboratedModel};
use crate::netbuild;
use crate::register_queue::RegisterQueue;
use crate::registrar::{self, CombEntry, SeqEntry};
use crate::signal::SignalCell;
use crate::slice_bridge;
use crate::HashMap;

/// Read/write handle passed to every combinational and sequential block
/// closure. Translates the elaboration-time [`crate::ids::SignalId`] the
/// closure was written against into the net-built [`SignalCellId`] the
/// engine actually stores.
///
/// Methods never return `Result`: a closure's signature is `FnMut(&mut
/// EvalCtx)`, so failures are recorded (first one wins) and surfaced by the
/// engine after the block returns, via [`EvalCtx::take_error`].
pub struct EvalCtx<'a> {
    cells: &'a mut [SignalCell],
    signal_to_cell: &'a HashMap<crate::ids::SignalId, SignalCellId>,
    queue: &'a mut EventQueue,
    register_queue: &'a mut RegisterQueue,
    cycle: u64,
    phase: Phase,
    error: Option<SimError>,
}

impl<'a> EvalCtx<'a> {
    fn new(
        cells: &'a mut [SignalCell],
        signal_to_cell: &'a HashMap<crate::ids::SignalId, SignalCellId>,
        queue: &'a mut EventQueue,
        register_queue: &'a mut RegisterQueue,
        cycle: u64,
        phase: Phase,
    ) -> Self {
        Self {
            cells,
            signal_to_cell,
            queue,
            register_queue,
            cycle,
            phase,
            error: None,
        }
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn cell_id(&self, sig: crate::ids::SignalId) -> SignalCellId {
        self.signal_to_cell[&sig]
    }

    /// Reads a signal's current whole value.
    pub fn read(&self, sig: crate::ids::SignalId) -> Bits {
        self.cells[self.cell_id(sig).0 as usize].read().clone()
    }

    /// Writes a signal's whole value immediately (combinational semantics).
    pub fn write(&mut self, sig: crate::ids::SignalId, value: Bits) {
        let id = self.cell_id(sig);
        let result = self.cells[id.0 as usize].write(id, value, self.cycle, self.phase, self.queue);
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    /// Writes a signal's shadow value (sequential semantics); committed by
    /// `flop()` at the end of the tick phase.
    pub fn write_next(&mut self, sig: crate::ids::SignalId, value: Bits) {
        let id = self.cell_id(sig);
        let result =
            self.cells[id.0 as usize].write_next(id, value, self.cycle, self.phase, self.register_queue);
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    /// Overwrites only `range` of `sig`'s whole value, leaving the remaining
    /// bits untouched. Used by [`crate::slice_bridge`].
    pub fn write_slice(&mut self, sig: crate::ids::SignalId, range: BitRange, value: Bits) {
        let id = self.cell_id(sig);
        let current = self.cells[id.0 as usize].read().clone();
        let updated = current.with_slice_written(range.lsb, range.msb, &value);
        self.write(sig, updated);
    }

    fn take_error(&mut self) -> Option<SimError> {
        self.error.take()
    }
}

/// Construction-time tuning, gating engine behavior through data rather than
/// alternate code paths.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// The combinational-loop iteration bound is `loop_bound_factor *
    /// max(1, |CombBlocks|)`.
    pub loop_bound_factor: usize,
    /// When true, the engine accumulates invocation counters readable via
    /// [`CycleEngine::metrics`] and forwards them to an attached
    /// [`StatsCollector`], if any.
    pub collect_metrics: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            loop_bound_factor: 10_000,
            collect_metrics: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct EngineMetrics {
    cycles: u64,
    comb_invocations: u64,
    seq_invocations: u64,
}

impl Metrics for EngineMetrics {
    fn cycles(&self) -> u64 {
        self.cycles
    }

    fn comb_invocations(&self) -> u64 {
        self.comb_invocations
    }

    fn seq_invocations(&self) -> u64 {
        self.seq_invocations
    }
}

pub struct CycleEngine {
    cells: Vec<SignalCell>,
    signal_to_cell: HashMap<crate::ids::SignalId, SignalCellId>,
    queue: EventQueue,
    register_queue: RegisterQueue,
    comb: Vec<CombEntry>,
    seq: Vec<SeqEntry>,
    reset_cell: SignalCellId,
    clk_cell: SignalCellId,
    cycle: u64,
    options: EngineOptions,
    metrics: Option<EngineMetrics>,
    vcd: Option<Box<dyn VcdSink>>,
    stats: Option<Box<dyn StatsCollector>>,
}

impl CycleEngine {
    /// Elaborates `model` into nets, registers every block, and wires slice
    /// connections. Returns [`SimError::NotElaborated`] if
    /// `model.is_elaborated()` is false.
    pub fn new(model: &mut dyn ElaboratedModel, options: EngineOptions) -> Result<Self, SimError> {
        if !model.is_elaborated() {
            return Err(SimError::NotElaborated);
        }

        let signals = model.signals().to_vec();
        let connections = model.connections().to_vec();
        let netbuild::NetBuildResult {
            mut cells,
            signal_to_cell,
            slices,
        } = netbuild::build(&signals, &connections)?;

        let mut queue = EventQueue::new();

        let mut comb = registrar::register_comb(model.comb_blocks(), &mut cells, &signal_to_cell, &mut queue);
        let synthetic = slice_bridge::build(&signals, &slices);
        comb.extend(registrar::register_comb(
            synthetic,
            &mut cells,
            &signal_to_cell,
            &mut queue,
        ));

        let seq = registrar::register_seq(model.seq_blocks(), &mut cells, &signal_to_cell);

        let reset_cell = signal_to_cell[&model.reset_signal()];
        let clk_cell = signal_to_cell[&model.clk_signal()];

        log::debug!(
            "elaborated {} signals into {} nets, {} combinational blocks, {} slice connections, {} sequential blocks",
            signals.len(),
            cells.len(),
            comb.len(),
            slices.len(),
            seq.len(),
        );

        Ok(Self {
            cells,
            signal_to_cell,
            queue,
            register_queue: RegisterQueue::new(),
            comb,
            seq,
            reset_cell,
            clk_cell,
            cycle: 0,
            metrics: options.collect_metrics.then(EngineMetrics::default),
            options,
            vcd: None,
            stats: None,
        })
    }

    pub fn attach_vcd(&mut self, sink: Box<dyn VcdSink>) {
        self.vcd = Some(sink);
    }

    pub fn attach_stats(&mut self, collector: Box<dyn StatsCollector>) {
        self.stats = Some(collector);
    }

    pub fn ncycles(&self) -> u64 {
        self.cycle
    }

    pub fn metrics(&self) -> Option<&dyn Metrics> {
        self.metrics.as_ref().map(|m| m as &dyn Metrics)
    }

    /// Reads a signal's current value directly, bypassing any block
    /// registration (used by `SimulationTool::peek`).
    pub fn peek(&self, cell: SignalCellId) -> &Bits {
        self.cells[cell.0 as usize].read()
    }

    /// Forces a signal's value and lets callers decide when to settle;
    /// `poke` does not implicitly call `eval_combinational`.
    pub fn poke(&mut self, cell: SignalCellId, value: Bits) -> Result<(), SimError> {
        self.cells[cell.0 as usize].write(cell, value, self.cycle, Phase::Construction, &mut self.queue)
    }

    pub fn cell_for(&self, sig: crate::ids::SignalId) -> Option<SignalCellId> {
        self.signal_to_cell.get(&sig).copied()
    }

    /// Drains the event queue until empty.
    pub fn eval_combinational(&mut self, phase: Phase) -> Result<(), SimError> {
        let bound = self.options.loop_bound_factor.max(1) * self.comb.len().max(1);
        let mut iterations = 0usize;
        let mut recent: Vec<CombId> = Vec::new();

        while let Some(id) = self.queue.deq() {
            iterations += 1;
            if iterations > bound {
                log::warn!(
                    "cycle {}: combinational settle exceeded {bound} iterations, aborting",
                    self.cycle
                );
                return Err(SimError::CombinationalLoop {
                    cycle: self.cycle,
                    bound,
                    last: recent,
                });
            }
            if recent.len() == 32 {
                recent.remove(0);
            }
            recent.push(id);

            let CycleEngine {
                cells,
                signal_to_cell,
                queue,
                register_queue,
                comb,
                cycle,
                metrics,
                ..
            } = self;
            let mut ctx = EvalCtx::new(cells, signal_to_cell, queue, register_queue, *cycle, phase);
            (comb[id.0 as usize].run)(&mut ctx);
            if let Some(m) = metrics {
                m.comb_invocations += 1;
            }
            if let Some(err) = ctx.take_error() {
                return Err(err);
            }
        }
        Ok(())
    }

    /// Executes the two-phase cycle protocol: pre-tick settle, tick every
    /// sequential block, flop the register queue, then post-tick settle.
    pub fn cycle(&mut self) -> Result<(), SimError> {
        log::trace!("cycle {}: pre-tick settle", self.cycle);
        self.eval_combinational(Phase::PreTickSettle)?;

        if let Some(vcd) = self.vcd.as_mut() {
            vcd.on_clock_edge(self.cycle);
        }

        for i in 0..self.seq.len() {
            let CycleEngine {
                cells,
                signal_to_cell,
                queue,
                register_queue,
                seq,
                cycle,
                metrics,
                ..
            } = self;
            let mut ctx = EvalCtx::new(cells, signal_to_cell, queue, register_queue, *cycle, Phase::Tick);
            (seq[i].run)(&mut ctx);
            if let Some(m) = metrics {
                m.seq_invocations += 1;
            }
            if let Some(err) = ctx.take_error() {
                return Err(err);
            }
        }

        while let Some(cell_id) = self.register_queue.pop() {
            self.cells[cell_id.0 as usize].flop(cell_id, self.cycle, &mut self.queue)?;
        }

        self.eval_combinational(Phase::PostTickSettle)?;

        self.cycle += 1;
        if let Some(m) = self.metrics.as_mut() {
            m.cycles += 1;
        }
        if let Some(stats) = self.stats.as_mut() {
            stats.on_cycle(self.cycle);
        }
        if let Some(vcd) = self.vcd.as_mut() {
            for cell in &self.cells {
                vcd.on_value(cell.name(), cell.read());
            }
        }
        Ok(())
    }

    /// Writes `reset` to 1, invokes `cycle()` twice, then writes `reset` to
    /// 0. Two cycles are needed to propagate reset through a two-stage
    /// pipeline.
    pub fn reset(&mut self) -> Result<(), SimError> {
        log::debug!("reset() at cycle {}", self.cycle);
        self.poke(self.reset_cell, Bits::from_u128(1, 1))?;
        self.cycle()?;
        self.cycle()?;
        self.poke(self.reset_cell, Bits::from_u128(1, 0))?;
        Ok(())
    }

    #[doc(hidden)]
    pub fn clk_cell(&self) -> SignalCellId {
        self.clk_cell
    }
}
