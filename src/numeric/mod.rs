//! Generic numerical primitives over survival callables.
//!
//! Both primitives only see a `Fn(f64) -> Result<f64, Error>` returning the
//! survival probability in canonical form, so they work for any distribution.

pub mod integration;
pub mod inversion;

pub use integration::{integrate, restricted_mean, IntegrationParameters};
pub use inversion::{invert, InversionParameters};
