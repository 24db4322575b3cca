//! Layer abstractions for computation graphs
//!
//! This module provides the Layer trait and implementations for the layer
//! kinds used across graph-based models.

mod r#trait;
pub mod dropout;
pub mod eltwise_mult;

// Re-export the Layer trait and phase for convenience
pub use dropout::DropoutLayer;
pub use eltwise_mult::EltwiseMultLayer;
pub use r#trait::{Layer, Phase};
