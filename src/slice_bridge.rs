//! The Slice Bridge.
//!
//! Turns each partial-width [`crate::netbuild::SliceConnection`] into one or
//! two synthetic [`CombBlockSpec`]s: *forward* (source changes propagate into
//! the destination's bit range) and, unless the destination is a submodule
//! input bound to an external source, *backward*. These are fed back into
//! [`crate::registrar::register_comb`] exactly like any elaboration-authored
//! combinational block — the engine has no notion of "synthetic" blocks.

use crate::ids::SignalId;
use crate::model::{BitRange, CombBlockSpec, Direction, SignalDecl};
use crate::netbuild::SliceConnection;
use crate::HashMap;

fn forward_block(dest: SignalId, dest_range: BitRange, src: SignalId, src_range: BitRange) -> CombBlockSpec {
    CombBlockSpec {
        read_set: vec![src],
        write_set: vec![dest],
        run: Box::new(move |ctx| {
            let value = ctx.read(src).bit_slice(src_range.lsb, src_range.msb);
            ctx.write_slice(dest, dest_range, value);
        }),
    }
}

/// Builds the synthetic combinational blocks for every slice connection
/// recorded by the net builder.
///
/// Forward (source -> destination) is always registered. Backward is
/// skipped only when the destination is a submodule input — the
/// one-directional port convention; when both endpoints are plain wires,
/// both directions are registered, since neither is an input.
pub fn build(signals: &[SignalDecl], slices: &[SliceConnection]) -> Vec<CombBlockSpec> {
    let decl_by_id: HashMap<SignalId, &SignalDecl> = signals.iter().map(|s| (s.id, s)).collect();

    let mut blocks = Vec::with_capacity(slices.len() * 2);
    for slice in slices {
        blocks.push(forward_block(
            slice.dest,
            slice.dest_range,
            slice.src,
            slice.src_range,
        ));

        let dest_is_input = decl_by_id
            .get(&slice.dest)
            .map(|d| d.direction == Direction::Input)
            .unwrap_or(false);
        if !dest_is_input {
            blocks.push(forward_block(
                slice.src,
                slice.src_range,
                slice.dest,
                slice.dest_range,
            ));
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(id: u32, name: &str, direction: Direction) -> SignalDecl {
        SignalDecl {
            id: SignalId(id),
            name: name.to_string(),
            nbits: 16,
            direction,
            parent_module: "top".to_string(),
        }
    }

    #[test]
    fn input_destination_skips_backward_registration() {
        let signals = vec![sig(0, "src", Direction::Wire), sig(1, "dst", Direction::Input)];
        let slices = vec![SliceConnection {
            dest: SignalId(1),
            dest_range: BitRange::new(0, 7),
            src: SignalId(0),
            src_range: BitRange::new(8, 15),
        }];
        let blocks = build(&signals, &slices);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].read_set, vec![SignalId(0)]);
    }

    #[test]
    fn wire_to_wire_registers_both_directions() {
        let signals = vec![sig(0, "a", Direction::Wire), sig(1, "b", Direction::Wire)];
        let slices = vec![SliceConnection {
            dest: SignalId(1),
            dest_range: BitRange::new(0, 7),
            src: SignalId(0),
            src_range: BitRange::new(8, 15),
        }];
        let blocks = build(&signals, &slices);
        assert_eq!(blocks.len(), 2);
    }
}
