use std::cmp::Ordering;

use indexmap::IndexMap;
use tilenav_core::Coord;

/// Per-tile search state.
///
/// Nodes live in an `IndexMap` keyed by coordinate, so insertion order is
/// discovery order and the anchor is always at index 0.
#[derive(Debug, Clone)]
pub(crate) struct Node<C> {
    pub(crate) weight: f64,
    /// Best known cumulative cost to the anchor.
    pub(crate) distance: f64,
    /// Neighbour one step closer to the anchor. The anchor points to itself.
    pub(crate) next: C,
    /// Unit offset towards `next` (zero for the anchor).
    pub(crate) direction: C,
}

impl<C: Coord> Node<C> {
    pub(crate) fn anchor(at: C, weight: f64) -> Self {
        Self {
            weight,
            distance: 0.0,
            next: at,
            direction: C::ORIGIN,
        }
    }
}

pub(crate) type NodeMap<C> = IndexMap<C, Node<C>>;

/// Follow `next` pointers from `from` to the anchor, both inclusive.
/// Returns an empty path if `from` was never discovered.
pub(crate) fn trace<C: Coord>(nodes: &NodeMap<C>, from: C) -> Vec<C> {
    let mut path = Vec::new();
    let mut cur = from;
    while let Some(node) = nodes.get(&cur) {
        path.push(cur);
        if node.next == cur {
            break;
        }
        cur = node.next;
    }
    path
}

/// Drop the first and/or last element of a path.
pub(crate) fn trim_ends<C>(mut path: Vec<C>, include_start: bool, include_end: bool) -> Vec<C> {
    if !include_start && !path.is_empty() {
        path.remove(0);
    }
    if !include_end {
        path.pop();
    }
    path
}

/// Frontier entry, ordered so that `BinaryHeap` pops the smallest distance
/// first and, among equal distances, the entry pushed first.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrontierEntry {
    pub(crate) distance: f64,
    pub(crate) seq: u64,
    pub(crate) idx: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys: BinaryHeap is a max-heap.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;
    use tilenav_core::Point;

    #[test]
    fn frontier_pops_smallest_then_fifo() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry {
            distance: 2.0,
            seq: 0,
            idx: 0,
        });
        heap.push(FrontierEntry {
            distance: 1.0,
            seq: 1,
            idx: 1,
        });
        heap.push(FrontierEntry {
            distance: 1.0,
            seq: 2,
            idx: 2,
        });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|e| e.idx).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn trace_follows_next_pointers() {
        let a = Point::new(0, 0);
        let b = Point::new(1, 0);
        let c = Point::new(2, 0);
        let mut nodes = NodeMap::new();
        nodes.insert(a, Node::anchor(a, 1.0));
        nodes.insert(
            b,
            Node {
                weight: 1.0,
                distance: 1.0,
                next: a,
                direction: Point::new(-1, 0),
            },
        );
        nodes.insert(
            c,
            Node {
                weight: 1.0,
                distance: 2.0,
                next: b,
                direction: Point::new(-1, 0),
            },
        );
        assert_eq!(trace(&nodes, c), vec![c, b, a]);
        assert_eq!(trace(&nodes, a), vec![a]);
        assert!(trace(&nodes, Point::new(9, 9)).is_empty());
    }

    #[test]
    fn trim_ends_flags() {
        assert_eq!(trim_ends(vec![1, 2, 3], true, true), vec![1, 2, 3]);
        assert_eq!(trim_ends(vec![1, 2, 3], false, true), vec![2, 3]);
        assert_eq!(trim_ends(vec![1, 2, 3], true, false), vec![1, 2]);
        assert_eq!(trim_ends(vec![1], false, true), Vec::<i32>::new());
        assert_eq!(trim_ends(vec![1], true, false), Vec::<i32>::new());
    }
}
