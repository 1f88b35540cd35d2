//! Optional collaborator contracts: VCD waveform dumping, simulation
//! statistics, and engine metrics.
//!
//! None of these are part of the core simulation algorithm. The engine only
//! ever holds them behind `Option<Box<dyn Trait>>` fields set through
//! `SimulationToolBuilder` — optional, I/O-capable, attached by explicit
//! configuration rather than discovered at run time.

use crate::bitvec::Bits;
use num_bigint::BigUint;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Receives value-change notifications once per cycle. Hooks run
/// synchronously on the simulator thread and must not retain references
/// past the call.
pub trait VcdSink {
    fn on_clock_edge(&mut self, cycle: u64);
    fn on_value(&mut self, name: &str, value: &Bits);
}

/// Receives a notification at the end of every completed cycle. Distinct
/// from [`Metrics`]: a `StatsCollector` is push-based and may do I/O (e.g.
/// write a CSV row per cycle); `Metrics` is a pull-based read of in-process
/// counters.
pub trait StatsCollector {
    fn on_cycle(&mut self, cycle: u64);
}

/// In-process counters accumulated by the engine when
/// `EngineOptions::collect_metrics` is set.
pub trait Metrics {
    fn cycles(&self) -> u64;
    fn comb_invocations(&self) -> u64;
    fn seq_invocations(&self) -> u64;
}

/// A file-based, textual VCD writer: header, flat `$scope module top`
/// (the core has no module-tree concept below a net — see
/// [`crate::netbuild`] — so there is no deeper hierarchy to emit), then one
/// value-change line per cycle per changed signal.
///
/// Each signal gets a generated base-94 id, and a value is only written when
/// it differs from the last-written value for that signal.
pub struct VcdWriter {
    writer: BufWriter<File>,
    ids: HashMap<String, (String, usize)>,
    signal_order: Vec<String>,
    last_values: HashMap<String, BigUint>,
    timestamp: u64,
}

impl VcdWriter {
    pub fn new<P: AsRef<Path>>(path: P, signals: &[(String, usize)]) -> io::Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "$date")?;
        writeln!(writer, "  {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(writer, "$end")?;
        writeln!(writer, "$version")?;
        writeln!(writer, "  rtl-sim-core")?;
        writeln!(writer, "$end")?;
        writeln!(writer, "$timescale 1ns $end")?;
        writeln!(writer, "$scope module top $end")?;

        let mut ids = HashMap::default();
        let mut signal_order = Vec::with_capacity(signals.len());
        for (next_id_num, (name, width)) in signals.iter().enumerate() {
            let vcd_id = generate_vcd_id(next_id_num);
            writeln!(writer, "$var wire {} {} {} $end", width, vcd_id, name)?;
            ids.insert(name.clone(), (vcd_id, *width));
            signal_order.push(name.clone());
        }

        writeln!(writer, "$upscope $end")?;
        writeln!(writer, "$enddefinitions $end")?;
        writeln!(writer, "$dumpvars")?;
        writeln!(writer, "$end")?;

        Ok(Self {
            writer,
            ids,
            signal_order,
            last_values: HashMap::default(),
            timestamp: 0,
        })
    }

    /// Every signal currently tracked, in declaration order — used by
    /// callers that need to replay the dump against their own naming.
    pub fn tracked_signals(&self) -> &[String] {
        &self.signal_order
    }
}

fn generate_vcd_id(num: usize) -> String {
    let mut id = String::new();
    let mut n = num;
    loop {
        let ch = ((n % 94) + 33) as u8 as char;
        id.push(ch);
        if n < 94 {
            break;
        }
        n = (n / 94) - 1;
    }
    id.chars().rev().collect()
}

impl VcdSink for VcdWriter {
    fn on_clock_edge(&mut self, cycle: u64) {
        self.timestamp = cycle * 2;
        if let Err(e) = writeln!(self.writer, "#{}", self.timestamp) {
            log::warn!("VCD write failed at cycle {cycle}: {e}");
        }
    }

    fn on_value(&mut self, name: &str, value: &Bits) {
        let Some((vcd_id, width)) = self.ids.get(name) else {
            return;
        };
        let current = value.to_biguint();
        if self.last_values.get(name) == Some(&current) {
            return;
        }
        let line = if *width == 1 {
            format!("{}{}", current, vcd_id)
        } else {
            format!("b{} {}", current.to_str_radix(2), vcd_id)
        };
        if let Err(e) = writeln!(self.writer, "{line}") {
            log::warn!("VCD write failed for signal {name}: {e}");
        }
        self.last_values.insert(name.to_string(), current);
    }
}
