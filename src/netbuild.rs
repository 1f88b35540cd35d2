//! The Net Builder.
//!
//! Collapses the elaborated model's whole-signal connections into disjoint
//! nets via union-find with path compression and union by rank, and binds
//! one [`SignalCell`] per net. Slice connections are never unioned — they
//! are recorded separately for [`crate::slice_bridge`] to turn into
//! synthetic callbacks.
//!
//! This is the classical textbook union-find algorithm, keyed by the same
//! `fxhash`-backed `HashMap` (re-exported as `crate::HashMap`) used
//! throughout this crate for id bookkeeping.

use crate::error::SimError;
use crate::ids::{SignalCellId, SignalId};
use crate::model::{Connection, SignalDecl};
use crate::signal::SignalCell;
use crate::HashMap;

pub struct SliceConnection {
    pub dest: SignalId,
    pub dest_range: crate::model::BitRange,
    pub src: SignalId,
    pub src_range: crate::model::BitRange,
}

pub struct NetBuildResult {
    pub cells: Vec<SignalCell>,
    pub signal_to_cell: HashMap<SignalId, SignalCellId>,
    pub slices: Vec<SliceConnection>,
}

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// Builds nets from `signals`/`connections` and allocates one [`SignalCell`]
/// per net.
pub fn build(signals: &[SignalDecl], connections: &[Connection]) -> Result<NetBuildResult, SimError> {
    let index_of: HashMap<SignalId, usize> = signals
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id, i))
        .collect();

    let mut uf = UnionFind::new(signals.len());
    let mut slices = Vec::new();

    // Pass 1: union whole-signal connections; record slice connections separately.
    for conn in connections {
        match conn {
            Connection::Whole(a, b) => {
                uf.union(index_of[a], index_of[b]);
            }
            Connection::Slice {
                dest,
                dest_range,
                src,
                src_range,
            } => {
                slices.push(SliceConnection {
                    dest: *dest,
                    dest_range: *dest_range,
                    src: *src,
                    src_range: *src_range,
                });
            }
        }
    }

    // Pass 2: group signals by representative, allocate one cell per group.
    let mut groups: HashMap<usize, Vec<usize>> = HashMap::default();
    for i in 0..signals.len() {
        let root = uf.find(i);
        groups.entry(root).or_default().push(i);
    }

    let mut cells = Vec::with_capacity(groups.len());
    let mut signal_to_cell = HashMap::default();

    // Stable iteration order: by smallest member index, so two runs over the
    // same model produce identical cell numbering.
    let mut roots: Vec<usize> = groups.keys().copied().collect();
    roots.sort_by_key(|&r| groups[&r].iter().copied().min().unwrap_or(r));

    for root in roots {
        let members = &groups[&root];
        debug_assert!(!members.is_empty(), "union-find produced an empty net");

        let canonical = members
            .iter()
            .map(|&i| &signals[i])
            .min_by(|a, b| a.name.cmp(&b.name))
            .expect("non-empty net");

        let width = canonical.nbits;
        for &i in members {
            if signals[i].nbits != width {
                return Err(SimError::NetWidthMismatch {
                    signal: canonical.name.clone(),
                    width_a: width,
                    width_b: signals[i].nbits,
                });
            }
        }

        let cell_id = SignalCellId(cells.len() as u32);
        cells.push(SignalCell::new(canonical.name.clone(), width));
        for &i in members {
            signal_to_cell.insert(signals[i].id, cell_id);
        }
    }

    Ok(NetBuildResult {
        cells,
        signal_to_cell,
        slices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction;

    fn sig(id: u32, name: &str, nbits: usize) -> SignalDecl {
        SignalDecl {
            id: SignalId(id),
            name: name.to_string(),
            nbits,
            direction: Direction::Wire,
            parent_module: "top".to_string(),
        }
    }

    #[test]
    fn transitive_connections_share_one_cell() {
        let signals = vec![sig(0, "a", 8), sig(1, "b", 8), sig(2, "c", 8)];
        let connections = vec![
            Connection::Whole(SignalId(0), SignalId(1)),
            Connection::Whole(SignalId(1), SignalId(2)),
        ];
        let result = build(&signals, &connections).unwrap();
        assert_eq!(result.cells.len(), 1);
        assert_eq!(
            result.signal_to_cell[&SignalId(0)],
            result.signal_to_cell[&SignalId(2)]
        );
    }

    #[test]
    fn disjoint_signals_get_disjoint_nets() {
        let signals = vec![sig(0, "a", 8), sig(1, "b", 8)];
        let result = build(&signals, &[]).unwrap();
        assert_eq!(result.cells.len(), 2);
    }

    #[test]
    fn canonical_name_is_lexicographically_smallest() {
        let signals = vec![sig(0, "zzz", 8), sig(1, "aaa", 8)];
        let connections = vec![Connection::Whole(SignalId(0), SignalId(1))];
        let result = build(&signals, &connections).unwrap();
        let cell_id = result.signal_to_cell[&SignalId(0)];
        assert_eq!(result.cells[cell_id.0 as usize].name(), "aaa");
    }

    #[test]
    fn width_mismatch_is_fatal() {
        let signals = vec![sig(0, "a", 8), sig(1, "b", 16)];
        let connections = vec![Connection::Whole(SignalId(0), SignalId(1))];
        let err = build(&signals, &connections).unwrap_err();
        assert!(matches!(err, SimError::NetWidthMismatch { .. }));
    }

    #[test]
    fn slice_connections_are_not_unioned() {
        let signals = vec![sig(0, "w", 16), sig(1, "u", 8)];
        let connections = vec![Connection::Slice {
            dest: SignalId(1),
            dest_range: crate::model::BitRange::new(0, 7),
            src: SignalId(0),
            src_range: crate::model::BitRange::new(8, 15),
        }];
        let result = build(&signals, &connections).unwrap();
        assert_eq!(result.cells.len(), 2);
        assert_eq!(result.slices.len(), 1);
    }
}
