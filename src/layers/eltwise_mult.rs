//! Element-wise multiplication layer (Hadamard product)
//!
//! A stateless two-input layer: the output is the element-wise product of the
//! inputs, and the backward pass applies the product rule symmetrically.

use crate::layers::{Layer, Phase};
use crate::tensor::{TensorArena, TensorId};

/// Element-wise multiplication of two equally-sized inputs.
///
/// Forward: `out[i] = in1[i] * in2[i]`. The layer has no state and no phase
/// sensitivity; training and inference behave identically.
///
/// Backward applies the product rule, accumulating into both inputs:
///
/// ```text
/// in1.deriv[i] += in2.data[i] * out.deriv[i]
/// in2.deriv[i] += in1.data[i] * out.deriv[i]
/// ```
///
/// # Example
///
/// ```
/// use gradnet::layers::{EltwiseMultLayer, Layer, Phase};
/// use gradnet::tensor::TensorArena;
///
/// let mut arena = TensorArena::new();
/// let a = arena.alloc(&[2]);
/// let b = arena.alloc(&[2]);
/// arena.get_mut(a).data.copy_from_slice(&[2.0, 3.0]);
/// arena.get_mut(b).data.copy_from_slice(&[5.0, 7.0]);
///
/// let mut layer = EltwiseMultLayer::new("mul", &[a, b], &mut arena);
/// layer.forward(&arena, Phase::Train);
/// assert_eq!(arena.get(layer.outputs()[0]).data, vec![10.0, 21.0]);
/// ```
pub struct EltwiseMultLayer {
    name: String,
    inputs: [TensorId; 2],
    outputs: [TensorId; 1],
}

impl EltwiseMultLayer {
    /// Creates a new element-wise multiplication layer over two inputs.
    ///
    /// Allocates the output tensor in `arena`, sized like the inputs.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty, `inputs` does not hold exactly two handles,
    /// or the two inputs differ in element count.
    pub fn new(name: &str, inputs: &[TensorId], arena: &mut TensorArena) -> Self {
        assert!(!name.is_empty(), "eltwise-mult layer must have a name");
        assert_eq!(
            inputs.len(),
            2,
            "layer '{}' must have exactly 2 inputs",
            name
        );
        assert_eq!(
            arena.get(inputs[0]).len(),
            arena.get(inputs[1]).len(),
            "layer '{}' inputs must have the same size",
            name
        );

        let size = arena.get(inputs[0]).size().to_vec();
        let out = arena.alloc(&size);

        Self {
            name: name.to_string(),
            inputs: [inputs[0], inputs[1]],
            outputs: [out],
        }
    }
}

impl Layer for EltwiseMultLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &[TensorId] {
        &self.inputs
    }

    fn outputs(&self) -> &[TensorId] {
        &self.outputs
    }

    fn forward(&mut self, arena: &TensorArena, _phase: Phase) {
        let in1 = arena.get(self.inputs[0]);
        let in2 = arena.get(self.inputs[1]);
        let mut out = arena.get_mut(self.outputs[0]);

        // out = in1 . in2 ("." = Hadamard product)
        for i in 0..out.len() {
            out.data[i] = in1.data[i] * in2.data[i];
        }
    }

    fn backward(&self, arena: &TensorArena, _phase: Phase) {
        let out = arena.get(self.outputs[0]);
        let mut in1 = arena.get_mut(self.inputs[0]);
        let mut in2 = arena.get_mut(self.inputs[1]);

        // in1_deriv += in2 * out_deriv
        // in2_deriv += in1 * out_deriv
        for i in 0..out.len() {
            let dv = out.deriv[i];
            in1.deriv[i] += in2.data[i] * dv;
            in2.deriv[i] += in1.data[i] * dv;
        }
    }
}
