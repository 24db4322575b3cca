//! Model contract consumed by the solver
//!
//! The solver is generic over anything that can run a training step, report
//! a test accuracy, expose its trainable tensors, and persist itself. The
//! model owns the layer graph and its tensor arena; the solver only holds
//! handles into it for the duration of a run.

use crate::tensor::{TensorArena, TensorId};
use std::io;

/// A trainable model driven by the solver.
///
/// Implementations own the full layer graph and the [`TensorArena`] its
/// tensors live in. The solver treats the model as opaque: `train_step` and
/// `test` are assumed deterministic given fixed internal state, and a failed
/// `save` is the only failure the solver recovers from (by aborting the run).
pub trait Model {
    /// Model name, used to build checkpoint file names.
    fn name(&self) -> &str;

    /// The arena holding every tensor of the model's graph.
    fn arena(&self) -> &TensorArena;

    /// Runs one training step (forward and backward over the whole graph)
    /// and returns the loss.
    fn train_step(&mut self) -> f32;

    /// Evaluates the model and returns its accuracy.
    fn test(&mut self) -> f32;

    /// Persists a checkpoint to `path`.
    fn save(&self, path: &str) -> io::Result<()>;

    /// Appends handles to the model's trainable tensors to `out`.
    fn get_weight(&self, out: &mut Vec<TensorId>);
}
