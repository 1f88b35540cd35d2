//! A three-stage register chain, `in_ -> r0 -> r1 -> r2 -> out`, width 16.

use rtl_sim_core::{Bits, Direction, ModelBuilder, SimulationTool};

#[test]
fn three_stage_chain_shifts_one_stage_per_cycle() {
    let mut b = ModelBuilder::new();
    b.reset_port("top");
    b.clk_port("top");
    let in_ = b.signal("in_", 16, Direction::Input, "top");
    let out = b.signal("out", 16, Direction::Output, "top");

    let r0_in = b.signal("r0.in_", 16, Direction::Wire, "top.r0");
    let r0_out = b.signal("r0.out", 16, Direction::Wire, "top.r0");
    let r1_in = b.signal("r1.in_", 16, Direction::Wire, "top.r1");
    let r1_out = b.signal("r1.out", 16, Direction::Wire, "top.r1");
    let r2_in = b.signal("r2.in_", 16, Direction::Wire, "top.r2");
    let r2_out = b.signal("r2.out", 16, Direction::Wire, "top.r2");

    b.connect(in_, r0_in);
    b.connect(r0_out, r1_in);
    b.connect(r1_out, r2_in);
    b.connect(r2_out, out);

    b.seq(vec![r0_out], move |ctx| {
        let v = ctx.read(r0_in);
        ctx.write_next(r0_out, v);
    });
    b.seq(vec![r1_out], move |ctx| {
        let v = ctx.read(r1_in);
        ctx.write_next(r1_out, v);
    });
    b.seq(vec![r2_out], move |ctx| {
        let v = ctx.read(r2_in);
        ctx.write_next(r2_out, v);
    });

    let mut model = b.build();
    let mut tool = SimulationTool::builder(&mut model).build().unwrap();

    tool.reset().unwrap();

    let mut out_samples = vec![tool.peek_path("out").unwrap().to_u128().unwrap()];
    let mut r0_samples = vec![tool.peek_path("r0.out").unwrap().to_u128().unwrap()];

    tool.poke_path("in_", Bits::from_u128(16, 8)).unwrap();
    tool.cycle().unwrap();
    out_samples.push(tool.peek_path("out").unwrap().to_u128().unwrap());
    r0_samples.push(tool.peek_path("r0.out").unwrap().to_u128().unwrap());

    tool.poke_path("in_", Bits::from_u128(16, 10)).unwrap();
    for _ in 0..3 {
        tool.cycle().unwrap();
        out_samples.push(tool.peek_path("out").unwrap().to_u128().unwrap());
        r0_samples.push(tool.peek_path("r0.out").unwrap().to_u128().unwrap());
    }

    assert_eq!(out_samples, vec![0, 0, 0, 8, 10]);
    assert_eq!(r0_samples, vec![0, 8, 10, 10, 10]);
}
