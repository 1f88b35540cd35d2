//! A whole signal `w[15:0]` with its upper half connected to a separate
//! 8-bit wire `u[7:0]`; writes propagate both ways, leaving the other half
//! of `w` untouched.

use rtl_sim_core::{Bits, BitRange, Direction, ModelBuilder, SimulationTool};

#[test]
fn slice_connection_propagates_both_directions() {
    let mut b = ModelBuilder::new();
    b.reset_port("top");
    b.clk_port("top");
    let w = b.signal("w", 16, Direction::Wire, "top");
    let u = b.signal("u", 8, Direction::Wire, "top");

    b.connect_slice(u, BitRange::new(0, 7), w, BitRange::new(8, 15));

    let mut model = b.build();
    let mut tool = SimulationTool::builder(&mut model).build().unwrap();

    tool.poke_path("w", Bits::from_u128(16, 0xAB00)).unwrap();
    tool.eval_combinational().unwrap();
    assert_eq!(tool.peek_path("u").unwrap().to_u128(), Some(0xAB));

    tool.poke_path("u", Bits::from_u128(8, 0x5C)).unwrap();
    tool.eval_combinational().unwrap();
    assert_eq!(tool.peek_path("w").unwrap().to_u128(), Some(0x5C00));
}
