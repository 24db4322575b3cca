//! Shared utilities
//!
//! This module provides common utilities like random number generation
//! used across layers and training code.

pub mod rng;

pub use rng::SimpleRng;
