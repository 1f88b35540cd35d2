//! Fluent construction of a [`SimulationTool`]: configuration methods
//! chained onto `SimulationTool::builder(model)` followed by `.build()`.
//! Elaboration already happened by the time an [`ElaboratedModel`] reaches
//! this crate, so there is no parse/compile pipeline here to configure.

use crate::engine::{CycleEngine, EngineOptions};
use crate::error::SimError;
use crate::hooks::{StatsCollector, VcdWriter};
use crate::model::ElaboratedModel;
use crate::tool::SimulationTool;
use std::path::PathBuf;

pub struct SimulationToolBuilder<'m> {
    model: &'m mut dyn ElaboratedModel,
    options: EngineOptions,
    vcd_path: Option<PathBuf>,
    stats: Option<Box<dyn StatsCollector>>,
}

impl<'m> SimulationToolBuilder<'m> {
    pub fn new(model: &'m mut dyn ElaboratedModel) -> Self {
        Self {
            model,
            options: EngineOptions::default(),
            vcd_path: None,
            stats: None,
        }
    }

    /// Enable VCD dumping to the given path. One value-change line is
    /// emitted per changed signal at the end of every `cycle()`.
    pub fn vcd<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.vcd_path = Some(path.into());
        self
    }

    /// Attach a push-based per-cycle statistics collector.
    pub fn stats(mut self, collector: Box<dyn StatsCollector>) -> Self {
        self.stats = Some(collector);
        self
    }

    /// Enable in-process invocation counters, readable via
    /// [`SimulationTool::metrics`].
    pub fn collect_metrics(mut self, enable: bool) -> Self {
        self.options.collect_metrics = enable;
        self
    }

    /// Override the combinational-loop iteration bound factor (default
    /// `10_000`, multiplied by the registered combinational block count).
    pub fn loop_bound_factor(mut self, factor: usize) -> Self {
        self.options.loop_bound_factor = factor;
        self
    }

    pub fn build(self) -> Result<SimulationTool, SimError> {
        let paths = self
            .model
            .signals()
            .iter()
            .map(|s| (s.name.clone(), s.id))
            .collect();
        let signal_list: Vec<(String, usize)> = self
            .model
            .signals()
            .iter()
            .map(|s| (s.name.clone(), s.nbits))
            .collect();

        let mut engine = CycleEngine::new(self.model, self.options)?;

        if let Some(path) = self.vcd_path {
            let writer = VcdWriter::new(path, &signal_list)?;
            engine.attach_vcd(Box::new(writer));
        }
        if let Some(stats) = self.stats {
            engine.attach_stats(stats);
        }

        Ok(SimulationTool::new(engine, paths))
    }
}
