//! Packing of operations into depth columns.
//!
//! Every operation occupies a contiguous vertical [`Span`] of the diagram. Two
//! operations may share a column only if their spans do not overlap, and an
//! operation may never be drawn to the left of an earlier one that it overlaps
//! with. Operations are placed greedily in order: each goes into the column
//! just after the last column holding something it overlaps with.

use tracing::{ debug, trace };

/// Closed range of absolute wire positions covered by an operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub lo: usize,
    pub hi: usize,
}

impl Span {
    /// Create a new span, swapping the endpoints if necessary.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b { Self { lo: a, hi: b } } else { Self { lo: b, hi: a } }
    }

    /// Return the smallest span covering every position in `positions`, or
    /// `None` if `positions` is empty.
    pub fn covering<I>(positions: I) -> Option<Self>
    where I: IntoIterator<Item = usize>
    {
        positions.into_iter()
            .fold(None, |acc: Option<Self>, k| {
                match acc {
                    None => Some(Self { lo: k, hi: k }),
                    Some(Self { lo, hi }) => Some(Self { lo: lo.min(k), hi: hi.max(k) }),
                }
            })
    }

    /// Return the number of wires covered.
    pub fn len(&self) -> usize { self.hi - self.lo + 1 }

    /// Return `true` if `k` lies inside `self`, endpoints included.
    pub fn contains(&self, k: usize) -> bool { self.lo <= k && k <= self.hi }

    /// Return `true` if `self` and `other` share at least one position.
    pub fn clashes(&self, other: &Self) -> bool {
        (self.lo <= other.lo && other.lo <= self.hi)
            || (other.lo <= self.lo && self.lo <= other.hi)
    }
}

/// Assignment of operations to depth columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layers {
    // operation indices in each column, in insertion order
    layers: Vec<Vec<usize>>,
    // column of each operation
    depth: Vec<usize>,
}

impl Layers {
    /// Place operations, given the span of each in circuit order.
    pub fn build(spans: &[Span]) -> Self {
        let mut layers: Vec<Vec<usize>> = Vec::new();
        let mut depth: Vec<usize> = Vec::with_capacity(spans.len());
        for (k, span) in spans.iter().enumerate() {
            let blocker =
                layers.iter().enumerate().rev()
                .find(|(_, layer)| {
                    layer.iter().any(|j| spans[*j].clashes(span))
                })
                .map(|(d, _)| d);
            let d = blocker.map(|d| d + 1).unwrap_or(0);
            trace!("operation {} over {:?} placed at depth {}", k, span, d);
            if d == layers.len() {
                layers.push(vec![k]);
            } else {
                layers[d].push(k);
            }
            depth.push(d);
        }
        debug!("{} operations packed into {} columns", spans.len(), layers.len());
        Self { layers, depth }
    }

    /// Return the number of columns.
    pub fn num_layers(&self) -> usize { self.layers.len() }

    /// Return the number of operations placed.
    pub fn num_ops(&self) -> usize { self.depth.len() }

    /// Return the column holding an operation.
    pub fn depth_of(&self, op: usize) -> Option<usize> {
        self.depth.get(op).copied()
    }

    /// Return the operations in a column.
    pub fn layer(&self, d: usize) -> Option<&[usize]> {
        self.layers.get(d).map(|layer| layer.as_slice())
    }

    /// Iterate over all columns from left to right.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.layers.iter().map(|layer| layer.as_slice())
    }

    /// Return the column of every operation, in circuit order.
    pub fn depths(&self) -> &[usize] { &self.depth }
}
