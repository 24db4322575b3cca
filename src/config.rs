//! Configuration structures for training
//!
//! This module provides the solver cadence configuration, loadable from JSON
//! files, and the key-value hyperparameter lookup handed to layers at
//! construction.

use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fs;

/// Solver scheduling configuration.
///
/// The four cadences are independent: an operator can print frequently while
/// saving rarely. Each is the number of steps between firings of the
/// corresponding periodic action in the training loop.
///
/// # Example
///
/// ```json
/// {
///   "print_each": 10,
///   "test_each": 100,
///   "save_each": 1000,
///   "lr_scale_each": 5000,
///   "lr_scale": 0.5
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SolverConfig {
    /// Print the model stats every n steps
    pub print_each: u32,
    /// Test the model every n steps
    pub test_each: u32,
    /// Save the model every n steps
    pub save_each: u32,
    /// Scale the learning rate every n steps
    pub lr_scale_each: u32,
    /// Learning rate scale factor
    pub lr_scale: f32,
}

/// Loads a solver configuration from a JSON file.
///
/// Reads the file at `path` and deserializes its JSON contents into a
/// `SolverConfig`.
///
/// # Returns
///
/// `Ok(SolverConfig)` on success, or an error if the file cannot be read,
/// the JSON is invalid, or a value is out of range.
///
/// # Examples
///
/// ```no_run
/// use gradnet::config::load_solver_config;
///
/// let cfg = load_solver_config("config/solver.json").unwrap();
/// assert!(cfg.print_each >= 1);
/// ```
pub fn load_solver_config(path: &str) -> Result<SolverConfig, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let config: SolverConfig = serde_json::from_str(&contents)?;
    validate_solver_config(&config)?;
    Ok(config)
}

fn validate_solver_config(config: &SolverConfig) -> Result<(), Box<dyn Error>> {
    let cadences = [
        ("print_each", config.print_each),
        ("test_each", config.test_each),
        ("save_each", config.save_each),
        ("lr_scale_each", config.lr_scale_each),
    ];
    for (name, value) in cadences {
        if value == 0 {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("{} must be at least 1", name),
            )));
        }
    }

    if config.lr_scale <= 0.0 {
        return Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "lr_scale must be positive",
        )));
    }

    Ok(())
}

/// Named scalar hyperparameters for layer construction.
///
/// A layer reads the keys it needs at construction time (e.g. dropout reads
/// `drop_prob`); a missing required key is a construction-time contract
/// violation and panics in the layer constructor.
///
/// # Example
///
/// ```
/// use gradnet::config::LayerParams;
///
/// let params = LayerParams::new().with("drop_prob", 0.5);
/// assert_eq!(params.get("drop_prob"), Some(0.5));
/// assert_eq!(params.get("momentum"), None);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct LayerParams {
    values: HashMap<String, f32>,
}

impl LayerParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the parameter set with `key` set to `value`.
    pub fn with(mut self, key: &str, value: f32) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    /// Looks up a parameter by name.
    pub fn get(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }
}
