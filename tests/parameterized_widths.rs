//! Register passthrough and width-mismatch checks, parameterized over
//! signal width.

use rtl_sim_core::{Bits, Direction, ModelBuilder, SimulationTool};
use test_case::test_case;

#[test_case(1, 1 ; "width 1")]
#[test_case(8, 0xAB ; "width 8")]
#[test_case(16, 0xBEEF ; "width 16")]
#[test_case(32, 0xDEAD_BEEF ; "width 32")]
#[test_case(200, 0x1 ; "width above the u128 inline fast path")]
fn register_passthrough_at_width(width: usize, value: u128) {
    let mut b = ModelBuilder::new();
    b.reset_port("top");
    b.clk_port("top");
    let in_ = b.signal("in_", width, Direction::Input, "top");
    let out = b.signal("out", width, Direction::Output, "top");
    b.seq(vec![out], move |ctx| {
        let v = ctx.read(in_);
        ctx.write_next(out, v);
    });
    let mut model = b.build();
    let mut tool = SimulationTool::builder(&mut model).build().unwrap();

    tool.poke_path("in_", Bits::from_u128(width, value)).unwrap();
    tool.cycle().unwrap();

    assert_eq!(tool.peek_path("out").unwrap(), Bits::from_u128(width, value));
}

#[test_case(8, 4 ; "narrower write than the declared width")]
#[test_case(8, 16 ; "wider write than the declared width")]
fn mismatched_width_write_is_fatal(declared: usize, attempted: usize) {
    let mut b = ModelBuilder::new();
    b.reset_port("top");
    b.clk_port("top");
    b.signal("in_", declared, Direction::Input, "top");
    let mut model = b.build();
    let mut tool = SimulationTool::builder(&mut model).build().unwrap();

    let err = tool
        .poke_path("in_", Bits::zero(attempted))
        .unwrap_err();
    assert!(matches!(err, rtl_sim_core::SimError::WidthError { .. }));
}
