//! A single edge-triggered register, `out.next := in_`, width 16.

use rtl_sim_core::{Bits, Direction, ModelBuilder, SimulationTool};

#[test]
fn register_samples_input_one_cycle_late() {
    let mut b = ModelBuilder::new();
    b.reset_port("top");
    b.clk_port("top");
    let in_ = b.signal("in_", 16, Direction::Input, "top");
    let out = b.signal("out", 16, Direction::Output, "top");
    b.seq(vec![out], move |ctx| {
        let v = ctx.read(in_);
        ctx.write_next(out, v);
    });
    let mut model = b.build();
    let mut tool = SimulationTool::builder(&mut model).build().unwrap();

    assert_eq!(tool.peek_path("out").unwrap().to_u128(), Some(0));

    tool.poke_path("in_", Bits::from_u128(16, 8)).unwrap();
    assert_eq!(tool.peek_path("out").unwrap().to_u128(), Some(0));

    tool.cycle().unwrap();
    assert_eq!(tool.peek_path("out").unwrap().to_u128(), Some(8));

    tool.poke_path("in_", Bits::from_u128(16, 9)).unwrap();
    assert_eq!(tool.peek_path("out").unwrap().to_u128(), Some(8));

    tool.poke_path("in_", Bits::from_u128(16, 10)).unwrap();
    tool.cycle().unwrap();
    assert_eq!(tool.peek_path("out").unwrap().to_u128(), Some(10));
}
