//! Mixture and non-mixture cure survival distributions over an arbitrary base
//! distribution.

#[cfg(doctest)]
use doc_comment::doctest;


pub mod convention;
pub mod cure;
pub mod distribution;
pub mod error;
pub mod numeric;
pub mod sample;
mod utils;

pub use convention::{Convention, Tail};
pub use cure::{CureDistribution, CureModel, Mixture, NonMixture};
pub use distribution::{
    BaseDistribution, Exponential, FnDistribution, ParameterVectors, Parameters, Weibull,
};
pub use error::{Error, ErrorKind};
pub use numeric::{IntegrationParameters, InversionParameters};

#[cfg(doctest)]
doctest!("../README.md");
