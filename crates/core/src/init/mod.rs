//! Starter-project scaffolding.
//!
//! Generates a ready-to-validate bundle configuration plus stub source
//! files from templates embedded in the binary.

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{InitError, InitResult};
pub use generator::{generate_starter, InitOptions};
