//! A cycle-accurate register-transfer-level simulation core.
//!
//! Consumes an already-elaborated hardware model (see [`model::ElaboratedModel`])
//! and simulates it: net discovery, event-driven combinational propagation,
//! and the two-phase clocked-cycle engine. Elaboration itself — parsing an
//! HDL, building a module tree, instantiating ports — is out of scope; this
//! crate starts where that work ends.
//!
//! The typical entry point is [`tool::SimulationTool`], built through
//! [`builder::SimulationToolBuilder`]:
//!
//! ```ignore
//! let mut model = ModelBuilder::new(); // or your own ElaboratedModel
//! // ... declare signals, connections, comb/seq blocks ...
//! let mut tool = SimulationTool::builder(&mut model).build()?;
//! tool.reset()?;
//! tool.cycle()?;
//! ```

mod bitvec;
mod builder;
mod engine;
mod error;
mod event_queue;
mod hooks;
mod ids;
mod model;
mod netbuild;
mod register_queue;
mod registrar;
mod signal;
mod slice_bridge;
mod tool;

pub(crate) use fxhash::FxHashMap as HashMap;

pub use bitvec::Bits;
pub use builder::SimulationToolBuilder;
pub use engine::{EngineOptions, EvalCtx};
pub use error::{Phase, SimError};
pub use hooks::{Metrics, StatsCollector, VcdSink, VcdWriter};
pub use ids::{CombId, SeqId, SignalCellId, SignalId};
pub use model::{
    BitRange, CombBlockSpec, Connection, Direction, ElaboratedModel, ModelBuilder, SeqBlockSpec,
    SignalDecl, StaticModel,
};
pub use tool::{SignalHandle, SimulationTool};
