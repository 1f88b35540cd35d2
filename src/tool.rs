//! `SimulationTool`, the public entry point: a constructed, ready-to-run
//! handle that user code drives cycle by cycle. There is no separate timed
//! scheduler — construction and cycle-by-cycle driving are one type, since
//! this core has nothing to schedule beyond the clock.

use crate::bitvec::Bits;
use crate::builder::SimulationToolBuilder;
use crate::engine::CycleEngine;
use crate::error::{Phase, SimError};
use crate::hooks::Metrics;
use crate::ids::{SignalCellId, SignalId};
use crate::model::ElaboratedModel;
use crate::HashMap;

/// A pre-resolved signal reference: [`SimulationTool::resolve`] pays the
/// path-lookup cost once; `peek`/`poke` with a handle never hash a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalHandle(SignalCellId);

pub struct SimulationTool {
    engine: CycleEngine,
    paths: HashMap<String, SignalId>,
}

impl SimulationTool {
    pub(crate) fn new(engine: CycleEngine, paths: HashMap<String, SignalId>) -> Self {
        Self { engine, paths }
    }

    pub fn builder(model: &mut dyn ElaboratedModel) -> SimulationToolBuilder<'_> {
        SimulationToolBuilder::new(model)
    }

    /// Builds with default options and no collaborator hooks.
    pub fn new_default(model: &mut dyn ElaboratedModel) -> Result<Self, SimError> {
        SimulationToolBuilder::new(model).build()
    }

    pub fn ncycles(&self) -> u64 {
        self.engine.ncycles()
    }

    pub fn reset(&mut self) -> Result<(), SimError> {
        self.engine.reset()
    }

    pub fn cycle(&mut self) -> Result<(), SimError> {
        self.engine.cycle()
    }

    /// Manually drains the event queue; not part of the `cycle()` protocol,
    /// useful right after a `poke` to observe combinational effects without
    /// advancing the clock.
    pub fn eval_combinational(&mut self) -> Result<(), SimError> {
        self.engine.eval_combinational(Phase::PreTickSettle)
    }

    /// Resolves a hierarchical signal path into a reusable [`SignalHandle`].
    pub fn resolve(&self, path: &str) -> Option<SignalHandle> {
        let id = *self.paths.get(path)?;
        self.engine.cell_for(id).map(SignalHandle)
    }

    pub fn peek(&self, handle: SignalHandle) -> Bits {
        self.engine.peek(handle.0).clone()
    }

    pub fn peek_path(&self, path: &str) -> Result<Bits, SimError> {
        self.resolve(path)
            .map(|h| self.peek(h))
            .ok_or_else(|| SimError::UnknownSignalPath { path: path.to_string() })
    }

    pub fn poke(&mut self, handle: SignalHandle, value: Bits) -> Result<(), SimError> {
        self.engine.poke(handle.0, value)
    }

    pub fn poke_path(&mut self, path: &str, value: Bits) -> Result<(), SimError> {
        let handle = self
            .resolve(path)
            .ok_or_else(|| SimError::UnknownSignalPath { path: path.to_string() })?;
        self.poke(handle, value)
    }

    /// In-process invocation counters, if `collect_metrics` was enabled at
    /// build time.
    pub fn metrics(&self) -> Option<&dyn Metrics> {
        self.engine.metrics()
    }
}
