//! Property-based tests for invariants that should hold regardless of
//! model shape or signal width.

use proptest::prelude::*;
use rtl_sim_core::{Bits, Direction, ModelBuilder, SimulationTool};

fn passthrough_register(width: usize) -> (rtl_sim_core::StaticModel, &'static str, &'static str) {
    let mut b = ModelBuilder::new();
    b.reset_port("top");
    b.clk_port("top");
    let in_ = b.signal("in_", width, Direction::Input, "top");
    let out = b.signal("out", width, Direction::Output, "top");
    b.seq(vec![out], move |ctx| {
        let v = ctx.read(in_);
        ctx.write_next(out, v);
    });
    (b.build(), "in_", "out")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A register samples whatever was poked one cycle earlier, for any
    /// value that fits in the declared width.
    #[test]
    fn register_samples_arbitrary_values_one_cycle_late(value in 0u32..=0xFFFF) {
        let (mut model, in_path, out_path) = passthrough_register(16);
        let mut tool = SimulationTool::builder(&mut model).build().unwrap();

        tool.poke_path(in_path, Bits::from_u128(16, value as u128)).unwrap();
        prop_assert_eq!(tool.peek_path(out_path).unwrap().to_u128(), Some(0));

        tool.cycle().unwrap();
        prop_assert_eq!(tool.peek_path(out_path).unwrap().to_u128(), Some(value as u128));
    }

    /// Net identity: any two signals joined by `connect` read back the
    /// same value within one settle, for any width and any value that
    /// fits it.
    #[test]
    fn connected_signals_share_a_value_for_any_input(value in 0u32..=0xFF) {
        let mut b = ModelBuilder::new();
        b.reset_port("top");
        b.clk_port("top");
        let a = b.signal("a", 8, Direction::Wire, "top");
        let c = b.signal("c", 8, Direction::Wire, "top");
        b.connect(a, c);
        let mut model = b.build();
        let mut tool = SimulationTool::builder(&mut model).build().unwrap();

        tool.poke_path("a", Bits::from_u128(8, value as u128)).unwrap();
        prop_assert_eq!(
            tool.peek_path("c").unwrap().to_u128(),
            tool.peek_path("a").unwrap().to_u128()
        );
    }

    /// Cycle count matches the number of `cycle()` calls, for an
    /// arbitrary number of cycles.
    #[test]
    fn ncycles_matches_invocation_count(n in 0u32..50) {
        let (mut model, _, _) = passthrough_register(8);
        let mut tool = SimulationTool::builder(&mut model).build().unwrap();
        for _ in 0..n {
            tool.cycle().unwrap();
        }
        prop_assert_eq!(tool.ncycles(), n as u64);
    }
}
