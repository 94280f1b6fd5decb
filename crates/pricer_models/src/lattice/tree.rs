//! Triangular node storage for recombining lattices.
//!
//! Level `t` holds `t + 1` nodes and node `j` at that level is reached after
//! `j` up moves. Levels are packed contiguously in one `Vec<f64>` of length
//! `(n+1)(n+2)/2`, so level `t` starts at offset `t(t+1)/2` and
//! levels `t` and `t + 1` are adjacent in memory.

use pricer_core::types::{ExerciseStyle, OptionRight};

/// Flat arena of lattice node values.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangularLattice {
    n_periods: usize,
    values: Vec<f64>,
}

#[inline]
fn level_offset(t: usize) -> usize {
    t * (t + 1) / 2
}

impl TriangularLattice {
    /// Zero-filled lattice with levels `0..=n_periods`.
    ///
    /// # Panics
    /// If the node count overflows `usize`. Models never get here: their
    /// period count is capped by `LatticeParameters`.
    pub fn zeros(n_periods: usize) -> Self {
        Self {
            n_periods,
            values: vec![0.0; level_offset(n_periods + 1)],
        }
    }

    /// Number of time steps (the last level index).
    #[inline]
    pub fn n_periods(&self) -> usize {
        self.n_periods
    }

    /// Total number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: a lattice has at least the root node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Node value after `j` up moves at step `t`, or `None` outside the triangle.
    #[inline]
    pub fn get(&self, t: usize, j: usize) -> Option<f64> {
        if t > self.n_periods || j > t {
            return None;
        }
        Some(self.values[level_offset(t) + j])
    }

    /// All nodes of level `t`, ordered by number of up moves.
    ///
    /// # Panics
    /// If `t > n_periods`.
    #[inline]
    pub fn level(&self, t: usize) -> &[f64] {
        let start = level_offset(t);
        &self.values[start..start + t + 1]
    }

    /// Mutable view of level `t`.
    #[inline]
    pub fn level_mut(&mut self, t: usize) -> &mut [f64] {
        let start = level_offset(t);
        &mut self.values[start..start + t + 1]
    }

    /// Level `t` mutably together with level `t + 1` read-only.
    ///
    /// # Panics
    /// If `t >= n_periods`.
    pub fn level_pair_mut(&mut self, t: usize) -> (&mut [f64], &[f64]) {
        let next_start = level_offset(t + 1);
        let (head, tail) = self.values.split_at_mut(next_start);
        (&mut head[level_offset(t)..], &tail[..t + 2])
    }

    /// Level `t - 1` read-only together with level `t` mutably.
    ///
    /// # Panics
    /// If `t == 0` or `t > n_periods`.
    pub fn previous_and_level_mut(&mut self, t: usize) -> (&[f64], &mut [f64]) {
        let start = level_offset(t);
        let (head, tail) = self.values.split_at_mut(start);
        (&head[level_offset(t - 1)..], &mut tail[..t + 1])
    }

    /// Value at the root node.
    #[inline]
    pub fn root(&self) -> f64 {
        self.values[0]
    }
}

/// Underlying prices at every node.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceLattice {
    pub(crate) nodes: TriangularLattice,
}

impl PriceLattice {
    /// Node storage.
    #[inline]
    pub fn nodes(&self) -> &TriangularLattice {
        &self.nodes
    }

    /// Number of time steps.
    #[inline]
    pub fn n_periods(&self) -> usize {
        self.nodes.n_periods()
    }

    /// Price after `j` up moves at step `t`.
    #[inline]
    pub fn get(&self, t: usize, j: usize) -> Option<f64> {
        self.nodes.get(t, j)
    }

    /// Prices at step `t`.
    #[inline]
    pub fn level(&self, t: usize) -> &[f64] {
        self.nodes.level(t)
    }

    /// Prices at expiry.
    #[inline]
    pub fn terminal(&self) -> &[f64] {
        self.nodes.level(self.nodes.n_periods())
    }
}

/// Option values at every node after backward induction.
#[derive(Clone, Debug, PartialEq)]
pub struct PayoffLattice {
    pub(crate) nodes: TriangularLattice,
    pub(crate) strike: f64,
    pub(crate) right: OptionRight,
    pub(crate) style: ExerciseStyle,
    pub(crate) early_exercise_nodes: usize,
}

impl PayoffLattice {
    /// Option value at the root node.
    #[inline]
    pub fn price(&self) -> f64 {
        self.nodes.root()
    }

    /// Node storage.
    #[inline]
    pub fn nodes(&self) -> &TriangularLattice {
        &self.nodes
    }

    /// Option value after `j` up moves at step `t`.
    #[inline]
    pub fn get(&self, t: usize, j: usize) -> Option<f64> {
        self.nodes.get(t, j)
    }

    /// Option values at step `t`.
    #[inline]
    pub fn level(&self, t: usize) -> &[f64] {
        self.nodes.level(t)
    }

    /// Strike used for the payoff.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Option right.
    #[inline]
    pub fn right(&self) -> OptionRight {
        self.right
    }

    /// Exercise style.
    #[inline]
    pub fn style(&self) -> ExerciseStyle {
        self.style
    }

    /// Interior nodes where immediate exercise beat continuation.
    ///
    /// Always zero for European options.
    #[inline]
    pub fn early_exercise_nodes(&self) -> usize {
        self.early_exercise_nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> TriangularLattice {
        let mut lattice = TriangularLattice::zeros(n);
        for t in 0..=n {
            for (j, v) in lattice.level_mut(t).iter_mut().enumerate() {
                *v = (10 * t + j) as f64;
            }
        }
        lattice
    }

    #[test]
    fn test_arena_size() {
        assert_eq!(TriangularLattice::zeros(0).len(), 1);
        assert_eq!(TriangularLattice::zeros(1).len(), 3);
        assert_eq!(TriangularLattice::zeros(10).len(), 66);
    }

    #[test]
    fn test_levels_are_disjoint() {
        let lattice = filled(4);
        assert_eq!(lattice.level(0), &[0.0]);
        assert_eq!(lattice.level(2), &[20.0, 21.0, 22.0]);
        assert_eq!(lattice.level(4), &[40.0, 41.0, 42.0, 43.0, 44.0]);
    }

    #[test]
    fn test_get_outside_triangle() {
        let lattice = filled(3);
        assert_eq!(lattice.get(2, 1), Some(21.0));
        assert_eq!(lattice.get(2, 3), None);
        assert_eq!(lattice.get(4, 0), None);
    }

    #[test]
    fn test_level_pair_mut() {
        let mut lattice = filled(3);
        let (current, next) = lattice.level_pair_mut(1);
        assert_eq!(current.len(), 2);
        assert_eq!(next, &[20.0, 21.0, 22.0]);
        current[0] = next[0] + next[1];
        assert_eq!(lattice.get(1, 0), Some(41.0));
    }
}
