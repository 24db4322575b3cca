//! gradnet: a small computation-graph training engine
//!
//! This library provides the building blocks for training neural networks as
//! explicit computation graphs: tensors that carry a gradient buffer next to
//! their values, layer nodes that transform tensors forward and accumulate
//! gradients backward, and a generic solver loop that drives a model through
//! many training steps with periodic reporting, testing, and checkpointing.
//!
//! # Modules
//!
//! - `tensor`: Tensor buffers, handles, and the arena that owns them
//! - `layers`: Layer trait and implementations (Dropout, EltwiseMult)
//! - `model`: The model contract consumed by the solver
//! - `solver`: Generic training loop and learn rules (SGD)
//! - `config`: Solver and layer configuration structures
//! - `utils`: Shared utilities (RNG)

pub mod config;
pub mod layers;
pub mod model;
pub mod solver;
pub mod tensor;
pub mod utils;
