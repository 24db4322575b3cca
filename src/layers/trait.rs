//! Layer trait definition for computation-graph nodes
//!
//! This module defines the core Layer trait that all layer types must
//! implement, and the execution phase passed to every pass.

use crate::tensor::{TensorArena, TensorId};

/// Execution phase of a forward or backward pass.
///
/// Stochastic layers (dropout) behave differently during training and
/// inference; the phase is passed explicitly to every pass rather than
/// stored as layer state, so a single graph can serve both without
/// reconfiguration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Training: stochastic layers draw fresh masks, losses drive gradients.
    Train,
    /// Inference: every layer is deterministic pass-through where applicable.
    Inference,
}

/// Core trait for computation-graph layers.
///
/// A layer is a named node that owns its output tensors and holds handles to
/// input tensors owned upstream. All tensors live in a shared [`TensorArena`];
/// construction allocates the outputs there, sized from the inputs.
///
/// # Contract
///
/// - `forward` is a pure function of the current input `data` (plus private
///   entropy for stochastic layers) producing output `data`. It must not read
///   or write any `deriv` buffer.
/// - `backward` reads the output `deriv` (already populated by downstream
///   layers or a loss) and input `data`, and **adds into** the input `deriv`
///   and any internal tensor's `deriv`. It must never overwrite existing
///   gradient contributions: a tensor may feed several downstream consumers,
///   each of which accumulates its share.
/// - `clear_deriv` zeroes the gradient buffers of every tensor the layer
///   owns, in preparation for a fresh backward pass over the graph.
///
/// # Example
///
/// ```ignore
/// // One training step over a graph in topological order:
/// for layer in layers.iter() {
///     layer.clear_deriv(&arena);
/// }
/// for layer in layers.iter_mut() {
///     layer.forward(&arena, Phase::Train);
/// }
/// // ... loss writes into the last output's deriv ...
/// for layer in layers.iter().rev() {
///     layer.backward(&arena, Phase::Train);
/// }
/// ```
pub trait Layer {
    /// Layer name, used for diagnostics.
    fn name(&self) -> &str;

    /// Handles to the input tensors, owned upstream.
    fn inputs(&self) -> &[TensorId];

    /// Handles to the output tensors, owned by this layer.
    fn outputs(&self) -> &[TensorId];

    /// Forward pass: compute output `data` from input `data`.
    ///
    /// `phase` selects training or inference behavior for layers that are
    /// phase-sensitive; deterministic layers ignore it.
    fn forward(&mut self, arena: &TensorArena, phase: Phase);

    /// Backward pass: accumulate gradients into the input tensors' `deriv`
    /// (and any internal tensor's `deriv`) from the output tensors' `deriv`.
    fn backward(&self, arena: &TensorArena, phase: Phase);

    /// Zero the gradient buffers of every owned tensor.
    ///
    /// The default implementation clears the outputs; layers owning internal
    /// tensors (e.g. a dropout mask) extend it.
    fn clear_deriv(&self, arena: &TensorArena) {
        for &id in self.outputs() {
            arena.get_mut(id).clear_deriv();
        }
    }
}
