//! A concrete, in-process [`ElaboratedModel`] and its fluent builder.
//!
//! Real deployments plug in their own elaborator (an HDL front-end, a
//! hardware-description DSL, etc.) and only need to implement
//! [`ElaboratedModel`]; nothing in the engine depends on this type. It
//! exists so the engine can be exercised and tested without one: there is
//! no HDL text to parse, so the builder takes post-elaboration data
//! directly — signals, connections, and behavioral blocks are added one
//! call at a time and `build()` hands back a model ready for the engine.

use super::{CombBlockSpec, Connection, Direction, ElaboratedModel, SeqBlockSpec, SignalDecl};
use crate::engine::EvalCtx;
use crate::ids::SignalId;

#[derive(Debug)]
pub struct StaticModel {
    signals: Vec<SignalDecl>,
    connections: Vec<Connection>,
    comb_blocks: Vec<CombBlockSpec>,
    seq_blocks: Vec<SeqBlockSpec>,
    reset_signal: SignalId,
    clk_signal: SignalId,
}

impl ElaboratedModel for StaticModel {
    fn is_elaborated(&self) -> bool {
        true
    }

    fn signals(&self) -> &[SignalDecl] {
        &self.signals
    }

    fn connections(&self) -> &[Connection] {
        &self.connections
    }

    fn comb_blocks(&mut self) -> Vec<CombBlockSpec> {
        std::mem::take(&mut self.comb_blocks)
    }

    fn seq_blocks(&mut self) -> Vec<SeqBlockSpec> {
        std::mem::take(&mut self.seq_blocks)
    }

    fn reset_signal(&self) -> SignalId {
        self.reset_signal
    }

    fn clk_signal(&self) -> SignalId {
        self.clk_signal
    }
}

/// Fluent builder for [`StaticModel`].
#[derive(Debug, Default)]
pub struct ModelBuilder {
    signals: Vec<SignalDecl>,
    connections: Vec<Connection>,
    comb_blocks: Vec<CombBlockSpec>,
    seq_blocks: Vec<SeqBlockSpec>,
    reset_signal: Option<SignalId>,
    clk_signal: Option<SignalId>,
    next_id: u32,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a signal and returns its id for use in `connect`/`comb`/`seq`.
    pub fn signal(
        &mut self,
        name: impl Into<String>,
        nbits: usize,
        direction: Direction,
        parent_module: impl Into<String>,
    ) -> SignalId {
        let id = SignalId(self.next_id);
        self.next_id += 1;
        self.signals.push(SignalDecl {
            id,
            name: name.into(),
            nbits,
            direction,
            parent_module: parent_module.into(),
        });
        id
    }

    /// Declares the top-level `reset` signal (width 1) and returns its id.
    pub fn reset_port(&mut self, parent_module: impl Into<String>) -> SignalId {
        let id = self.signal("reset", 1, Direction::Input, parent_module);
        self.reset_signal = Some(id);
        id
    }

    /// Declares the top-level `clk` signal (width 1) and returns its id.
    pub fn clk_port(&mut self, parent_module: impl Into<String>) -> SignalId {
        let id = self.signal("clk", 1, Direction::Input, parent_module);
        self.clk_signal = Some(id);
        id
    }

    pub fn connect(&mut self, a: SignalId, b: SignalId) -> &mut Self {
        self.connections.push(Connection::Whole(a, b));
        self
    }

    pub fn connect_slice(
        &mut self,
        dest: SignalId,
        dest_range: super::BitRange,
        src: SignalId,
        src_range: super::BitRange,
    ) -> &mut Self {
        self.connections.push(Connection::Slice {
            dest,
            dest_range,
            src,
            src_range,
        });
        self
    }

    pub fn comb(
        &mut self,
        read_set: Vec<SignalId>,
        write_set: Vec<SignalId>,
        run: impl FnMut(&mut EvalCtx) + 'static,
    ) -> &mut Self {
        self.comb_blocks.push(CombBlockSpec {
            read_set,
            write_set,
            run: Box::new(run),
        });
        self
    }

    pub fn seq(
        &mut self,
        write_destinations: Vec<SignalId>,
        run: impl FnMut(&mut EvalCtx) + 'static,
    ) -> &mut Self {
        self.seq_blocks.push(SeqBlockSpec {
            write_destinations,
            run: Box::new(run),
        });
        self
    }

    pub fn build(&mut self) -> StaticModel {
        StaticModel {
            signals: std::mem::take(&mut self.signals),
            connections: std::mem::take(&mut self.connections),
            comb_blocks: std::mem::take(&mut self.comb_blocks),
            seq_blocks: std::mem::take(&mut self.seq_blocks),
            reset_signal: self
                .reset_signal
                .expect("ModelBuilder::build called without a reset port"),
            clk_signal: self
                .clk_signal
                .expect("ModelBuilder::build called without a clk port"),
        }
    }
}
