//! Dropout layer implementation for regularization
//!
//! This module provides a DropoutLayer that randomly drops (sets to zero) a
//! fraction of its input during training to prevent overfitting, scaling the
//! kept elements so the expected activation magnitude is preserved. During
//! inference the layer is an exact pass-through.

use crate::config::LayerParams;
use crate::layers::{Layer, Phase};
use crate::tensor::{TensorArena, TensorId};
use crate::utils::rng::SimpleRng;

/// Dropout layer for regularization.
///
/// Owns an output tensor and a mask tensor, both shaped like the single
/// input. During a training forward pass every element is independently kept
/// with probability `1 - drop_prob`; kept elements carry a mask value of
/// `1/(1 - drop_prob)` and dropped elements a mask value of 0, so that
/// `output = mask ⊙ input`. The probability boundaries are handled against
/// machine epsilon:
///
/// - `drop_prob < ε`: nothing to drop — output copies the input, mask is 1.
/// - `drop_prob > 1 - ε`: everything drops — output and mask are zeroed.
///
/// Outside the training phase the output is a copy of the input regardless
/// of `drop_prob`, and the mask keeps whatever state the last training pass
/// left in it.
///
/// The backward pass is the same for every forward branch:
///
/// ```text
/// input.deriv += mask.data ⊙ output.deriv
/// mask.deriv  += input.data ⊙ output.deriv
/// ```
///
/// The mask is not a learned parameter, but its gradient is accumulated all
/// the same so the layer honors the uniform backward contract; optimizers
/// are expected to ignore tensors that are not registered as weights.
///
/// # Example
///
/// ```
/// use gradnet::config::LayerParams;
/// use gradnet::layers::{DropoutLayer, Layer, Phase};
/// use gradnet::tensor::TensorArena;
/// use gradnet::utils::SimpleRng;
///
/// let mut arena = TensorArena::new();
/// let input = arena.alloc(&[8]);
/// arena.get_mut(input).fill(1.0);
///
/// let mut rng = SimpleRng::new(42);
/// let params = LayerParams::new().with("drop_prob", 0.5);
/// let mut layer = DropoutLayer::new("drop1", &[input], &params, &mut arena, &mut rng);
///
/// layer.forward(&arena, Phase::Inference);
/// let out = layer.outputs()[0];
/// assert_eq!(arena.get(out).data, arena.get(input).data);
/// ```
pub struct DropoutLayer {
    name: String,
    inputs: [TensorId; 1],
    outputs: [TensorId; 1],
    mask: TensorId,
    drop_prob: f32,
    rng: SimpleRng,
}

impl DropoutLayer {
    /// Creates a new dropout layer over one input tensor.
    ///
    /// Allocates the output and mask tensors in `arena`, both sized like the
    /// input. The drop probability is read from the `drop_prob` key of
    /// `params` and must lie in `[0.0, 1.0]`. The layer keeps a clone of
    /// `rng`, so two layers built from equally-seeded generators draw
    /// identical masks.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty, `inputs` does not hold exactly one handle,
    /// `params` has no `drop_prob` entry, or the probability is out of range.
    pub fn new(
        name: &str,
        inputs: &[TensorId],
        params: &LayerParams,
        arena: &mut TensorArena,
        rng: &mut SimpleRng,
    ) -> Self {
        assert!(!name.is_empty(), "dropout layer must have a name");
        assert_eq!(
            inputs.len(),
            1,
            "layer '{}' must have exactly 1 input",
            name
        );
        let drop_prob = params
            .get("drop_prob")
            .unwrap_or_else(|| panic!("layer '{}' missing drop_prob parameter", name));
        assert!(
            (0.0..=1.0).contains(&drop_prob),
            "layer '{}': drop_prob must be in range [0.0, 1.0]",
            name
        );

        let size = arena.get(inputs[0]).size().to_vec();
        let mask = arena.alloc(&size);
        let out = arena.alloc(&size);

        Self {
            name: name.to_string(),
            inputs: [inputs[0]],
            outputs: [out],
            mask,
            drop_prob,
            rng: rng.clone(),
        }
    }

    /// Handle to the internal mask tensor.
    pub fn mask(&self) -> TensorId {
        self.mask
    }

    /// The configured drop probability.
    pub fn drop_prob(&self) -> f32 {
        self.drop_prob
    }
}

impl Layer for DropoutLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &[TensorId] {
        &self.inputs
    }

    fn outputs(&self) -> &[TensorId] {
        &self.outputs
    }

    fn forward(&mut self, arena: &TensorArena, phase: Phase) {
        let input = arena.get(self.inputs[0]);
        let mut out = arena.get_mut(self.outputs[0]);

        if phase != Phase::Train {
            // Dropout only during the training phase; the mask keeps its
            // last drawn state.
            out.data.copy_from_slice(&input.data);
            return;
        }

        let mut mask = arena.get_mut(self.mask);
        if self.drop_prob < f32::EPSILON {
            // Nothing to drop: copy through, mask stays consistent for backward.
            out.data.copy_from_slice(&input.data);
            mask.fill(1.0);
        } else if self.drop_prob > 1.0 - f32::EPSILON {
            // Drop everything.
            out.zero();
            mask.zero();
        } else {
            let scale = 1.0 / (1.0 - self.drop_prob);
            for m in mask.data.iter_mut() {
                *m = if self.rng.next_f32() < self.drop_prob {
                    0.0
                } else {
                    scale
                };
            }
            for i in 0..out.len() {
                out.data[i] = mask.data[i] * input.data[i];
            }
        }
    }

    fn backward(&self, arena: &TensorArena, _phase: Phase) {
        let out = arena.get(self.outputs[0]);
        let mut input = arena.get_mut(self.inputs[0]);
        let mut mask = arena.get_mut(self.mask);

        // in_deriv   += mask * out_deriv
        // mask_deriv += in * out_deriv
        for i in 0..out.len() {
            let dv = out.deriv[i];
            input.deriv[i] += mask.data[i] * dv;
            mask.deriv[i] += input.data[i] * dv;
        }
    }

    fn clear_deriv(&self, arena: &TensorArena) {
        arena.get_mut(self.outputs[0]).clear_deriv();
        arena.get_mut(self.mask).clear_deriv();
    }
}
