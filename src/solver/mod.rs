//! Generic training loop and weight-update rules
//!
//! The solver drives a [`Model`] through a fixed number of training steps.
//! Each step runs the model's own forward/backward pass, applies a
//! polymorphic weight-update rule, and services four independent periodic
//! counters: print, test, save, and learning-rate decay. The counters each
//! keep their own increment/fire/reset state — they are deliberately not
//! coalesced into a single modulo test, because their cadences are
//! independent and the final-step exception applies only to some of them.

pub mod sgd;

pub use sgd::Sgd;

use crate::config::SolverConfig;
use crate::model::Model;
use crate::tensor::{Tensor, TensorArena, TensorId};
use std::error::Error;

/// Polymorphic weight-update rule applied once per training step.
///
/// The rule sees the model's trainable tensors (handles into the model's
/// arena, with gradients already populated by the step's backward pass) and
/// the solver's previous-value snapshots, which it may use as scratch state
/// across steps (e.g. momentum velocities).
pub trait LearnRule {
    /// Updates every weight in place from its accumulated gradient.
    ///
    /// `weights` and `weight_prev` are parallel lists: `weight_prev[i]` has
    /// the same shape as the tensor behind `weights[i]`.
    fn learn(
        &mut self,
        arena: &TensorArena,
        weights: &[TensorId],
        weight_prev: &mut [Tensor],
        learning_rate: f32,
    );
}

/// Generic training loop over a model.
///
/// Construction fixes the four cadences and the decay factor; a run fetches
/// the model's weights, allocates zero-filled previous-value snapshots of
/// matching shapes, steps the model `num_step` times, and clears both lists
/// on every exit path.
///
/// Periodic actions, per step (1-based step numbers in reports):
///
/// - **print** — step, learning rate, loss; fires on cadence or final step.
/// - **test** — step and `model.test()` accuracy; fires on cadence or final
///   step.
/// - **save** — checkpoint `<model-name>_<step>.model`; fires on cadence or
///   final step; a save error aborts the run.
/// - **lr decay** — multiplies the learning rate by the configured scale;
///   fires on cadence only. Decaying after the last step would have no
///   effect, so the final-step exception does not apply.
///
/// # Example
///
/// ```ignore
/// let config = load_solver_config("config/solver.json")?;
/// let mut solver = Solver::new(&config, Sgd::new(0.9));
/// solver.train(&mut model, 10_000, 0.01)?;
/// ```
pub struct Solver<R: LearnRule> {
    print_each: u32,
    test_each: u32,
    save_each: u32,
    lr_scale_each: u32,
    lr_scale: f32,
    rule: R,
    weight: Vec<TensorId>,
    weight_prev: Vec<Tensor>,
}

impl<R: LearnRule> Solver<R> {
    /// Creates a solver with the given cadences and learn rule.
    pub fn new(config: &SolverConfig, rule: R) -> Self {
        Self {
            print_each: config.print_each,
            test_each: config.test_each,
            save_each: config.save_each,
            lr_scale_each: config.lr_scale_each,
            lr_scale: config.lr_scale,
            rule,
            weight: Vec::new(),
            weight_prev: Vec::new(),
        }
    }

    /// Trains `model` for `num_step` steps starting from `learning_rate`.
    ///
    /// Returns an error only when a checkpoint save fails; the run is
    /// aborted at that point. With `num_step == 0` the weight snapshots are
    /// still set up and torn down and the call succeeds without invoking the
    /// model.
    pub fn train<M: Model>(
        &mut self,
        model: &mut M,
        num_step: u32,
        mut learning_rate: f32,
    ) -> Result<(), Box<dyn Error>> {
        // Get the model weights and keep track of the previous weight values.
        self.weight.clear();
        model.get_weight(&mut self.weight);
        self.weight_prev = self
            .weight
            .iter()
            .map(|&id| Tensor::new(model.arena().get(id).size()))
            .collect();

        let mut result = Ok(());
        let mut print = 0u32;
        let mut test = 0u32;
        let mut save = 0u32;
        let mut lr = 0u32;
        for step in 0..num_step {
            let loss = model.train_step();
            self.rule.learn(
                model.arena(),
                &self.weight,
                &mut self.weight_prev,
                learning_rate,
            );

            let final_step = step == num_step - 1;

            print += 1;
            if print >= self.print_each || final_step {
                println!(
                    "Step {}: lr = {}, loss = {}",
                    step + 1,
                    learning_rate,
                    loss
                );
                print = 0;
            }

            test += 1;
            if test >= self.test_each || final_step {
                println!("Step {}: accuracy = {}", step + 1, model.test());
                test = 0;
            }

            save += 1;
            if save >= self.save_each || final_step {
                let file_name = format!("{}_{}.model", model.name(), step + 1);
                if let Err(err) = model.save(&file_name) {
                    eprintln!("Step {}: failed to save '{}': {}", step + 1, file_name, err);
                    result = Err(err.into());
                    break;
                }
                save = 0;
            }

            lr += 1;
            if lr >= self.lr_scale_each {
                println!(
                    "Step {}: update learning rate from {} to {}, scale {}",
                    step + 1,
                    learning_rate,
                    learning_rate * self.lr_scale,
                    self.lr_scale
                );
                learning_rate *= self.lr_scale;
                lr = 0;
            }
        }

        // Clear the weight snapshots whether the run completed or aborted.
        self.weight.clear();
        self.weight_prev.clear();

        result
    }
}
