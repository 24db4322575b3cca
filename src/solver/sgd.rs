//! Stochastic gradient descent learn rule with classical momentum
//!
//! Implements the update `v = momentum * v_prev - learning_rate * grad`,
//! `w = w + v`, with the velocity stored in the solver's previous-weight
//! snapshots. A momentum of zero degenerates to vanilla gradient descent:
//! `w = w - learning_rate * grad`.

use crate::solver::LearnRule;
use crate::tensor::{Tensor, TensorArena, TensorId};

/// Gradient descent with classical momentum.
///
/// # Fields
///
/// * `momentum` - Velocity retention factor in `[0.0, 1.0)`; 0 gives
///   vanilla SGD
///
/// # Example
///
/// ```ignore
/// let mut solver = Solver::new(&config, Sgd::new(0.9));
/// solver.train(&mut model, num_step, 0.01)?;
/// ```
pub struct Sgd {
    momentum: f32,
}

impl Sgd {
    /// Creates the rule with the given momentum.
    ///
    /// # Panics
    ///
    /// Panics if `momentum` is not in `[0.0, 1.0)`.
    pub fn new(momentum: f32) -> Self {
        assert!(
            (0.0..1.0).contains(&momentum),
            "momentum must be in range [0.0, 1.0)"
        );
        Self { momentum }
    }

    /// The configured momentum.
    pub fn momentum(&self) -> f32 {
        self.momentum
    }
}

impl LearnRule for Sgd {
    /// Updates each weight from its accumulated gradient.
    ///
    /// The velocity for weight `i` lives in `weight_prev[i]`; it is read,
    /// updated, and written back every step.
    ///
    /// # Panics
    ///
    /// Panics if `weights` and `weight_prev` differ in length or a snapshot's
    /// shape does not match its weight.
    fn learn(
        &mut self,
        arena: &TensorArena,
        weights: &[TensorId],
        weight_prev: &mut [Tensor],
        learning_rate: f32,
    ) {
        assert_eq!(
            weights.len(),
            weight_prev.len(),
            "weights and previous-weight snapshots must have the same length"
        );

        for (&id, prev) in weights.iter().zip(weight_prev.iter_mut()) {
            let mut w = arena.get_mut(id);
            assert_eq!(
                w.len(),
                prev.len(),
                "previous-weight snapshot must match its weight's size"
            );
            for i in 0..w.len() {
                let v = self.momentum * prev.data[i] - learning_rate * w.deriv[i];
                prev.data[i] = v;
                w.data[i] += v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sgd_new() {
        let rule = Sgd::new(0.9);
        assert_eq!(rule.momentum(), 0.9);
    }

    #[test]
    #[should_panic(expected = "momentum must be in range")]
    fn test_sgd_invalid_momentum() {
        let _ = Sgd::new(1.0);
    }

    #[test]
    fn test_sgd_vanilla_update() {
        let mut arena = TensorArena::new();
        let w = arena.alloc(&[3]);
        {
            let mut t = arena.get_mut(w);
            t.data.copy_from_slice(&[1.0, 2.0, 3.0]);
            t.deriv.copy_from_slice(&[0.1, 0.2, 0.3]);
        }
        let mut prev = vec![Tensor::new(&[3])];

        let mut rule = Sgd::new(0.0);
        rule.learn(&arena, &[w], &mut prev, 0.1);

        let t = arena.get(w);
        assert!((t.data[0] - 0.99).abs() < 1e-6);
        assert!((t.data[1] - 1.98).abs() < 1e-6);
        assert!((t.data[2] - 2.97).abs() < 1e-6);
    }

    #[test]
    fn test_sgd_momentum_accumulates_velocity() {
        let mut arena = TensorArena::new();
        let w = arena.alloc(&[1]);
        {
            let mut t = arena.get_mut(w);
            t.data[0] = 1.0;
            t.deriv[0] = 1.0;
        }
        let mut prev = vec![Tensor::new(&[1])];

        let mut rule = Sgd::new(0.5);

        // First step: v = -0.1, w = 0.9
        rule.learn(&arena, &[w], &mut prev, 0.1);
        assert!((arena.get(w).data[0] - 0.9).abs() < 1e-6);
        assert!((prev[0].data[0] + 0.1).abs() < 1e-6);

        // Second step with the same gradient: v = 0.5*(-0.1) - 0.1 = -0.15
        rule.learn(&arena, &[w], &mut prev, 0.1);
        assert!((arena.get(w).data[0] - 0.75).abs() < 1e-6);
        assert!((prev[0].data[0] + 0.15).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_sgd_mismatched_lists() {
        let mut arena = TensorArena::new();
        let w = arena.alloc(&[1]);
        let mut rule = Sgd::new(0.0);
        rule.learn(&arena, &[w], &mut [], 0.1);
    }
}
