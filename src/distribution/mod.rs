//! Base distributions for the uncured population.
//!
//! A base distribution is any pair of cumulative distribution and density
//! functions that accept a value, a [`Convention`] and an open bundle of named
//! [`Parameters`]. The cure transformations never look inside the bundle; they
//! forward it unchanged so any parameterisation works.

use crate::convention::Convention;
use crate::error::Error;
use ndarray::{Array1, ArrayBase, Data, Ix1};
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod exponential;
pub mod weibull;

pub use exponential::Exponential;
pub use weibull::Weibull;

pub trait BaseDistribution {
    /// The distribution function in the requested tail and scale.
    fn cdf(&self, x: f64, convention: Convention, parameters: &Parameters) -> Result<f64, Error>;

    /// The density. Only the log flag of `convention` applies.
    fn pdf(&self, x: f64, convention: Convention, parameters: &Parameters) -> Result<f64, Error>;
}

impl<'a, B> BaseDistribution for &'a B
where
    B: BaseDistribution + ?Sized,
{
    fn cdf(&self, x: f64, convention: Convention, parameters: &Parameters) -> Result<f64, Error> {
        (**self).cdf(x, convention, parameters)
    }

    fn pdf(&self, x: f64, convention: Convention, parameters: &Parameters) -> Result<f64, Error> {
        (**self).pdf(x, convention, parameters)
    }
}

/// A base distribution built from a caller-supplied pair of functions.
///
/// ```
/// use cure_models::{Convention, FnDistribution, Parameters, Tail};
/// use cure_models::distribution::BaseDistribution;
///
/// let uniform = FnDistribution::new(
///     |x: f64, c: Convention, _: &Parameters| {
///         let lower = x.min(1.);
///         let p = if c.tail == Tail::Lower { lower } else { 1. - lower };
///         if c.log { p.ln() } else { p }
///     },
///     |x: f64, c: Convention, _: &Parameters| {
///         let d: f64 = if x <= 1. { 1. } else { 0. };
///         if c.log { d.ln() } else { d }
///     },
/// );
///
/// let p = uniform.cdf(0.25, Convention::upper(), &Parameters::new()).unwrap();
/// assert_eq!(p, 0.75);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnDistribution<C, D> {
    cdf: C,
    pdf: D,
}

impl<C, D> FnDistribution<C, D>
where
    C: Fn(f64, Convention, &Parameters) -> f64,
    D: Fn(f64, Convention, &Parameters) -> f64,
{
    pub fn new(cdf: C, pdf: D) -> Self {
        FnDistribution { cdf, pdf }
    }
}

impl<C, D> BaseDistribution for FnDistribution<C, D>
where
    C: Fn(f64, Convention, &Parameters) -> f64,
    D: Fn(f64, Convention, &Parameters) -> f64,
{
    fn cdf(&self, x: f64, convention: Convention, parameters: &Parameters) -> Result<f64, Error> {
        Ok((self.cdf)(x, convention, parameters))
    }

    fn pdf(&self, x: f64, convention: Convention, parameters: &Parameters) -> Result<f64, Error> {
        Ok((self.pdf)(x, convention, parameters))
    }
}

/// Named scalar parameters of a base distribution for a single evaluation.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters(BTreeMap<String, f64>);

impl Parameters {
    pub fn new() -> Self {
        Parameters(BTreeMap::new())
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: f64) {
        self.0.insert(name.to_owned(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.get(name).unwrap_or(default)
    }

    pub fn require(&self, name: &str) -> Result<f64, Error> {
        self.get(name)
            .ok_or_else(|| Error::MissingParameter(name.to_owned()))
    }

    /// Returns `name` (or `default` when absent) if it is finite and strictly positive.
    pub fn positive_or(&self, name: &str, default: f64) -> Result<f64, Error> {
        positive(name, self.get_or(name, default))
    }

    pub fn require_positive(&self, name: &str) -> Result<f64, Error> {
        positive(name, self.require(name)?)
    }
}

fn positive(name: &str, value: f64) -> Result<f64, Error> {
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(Error::InvalidParameter(name.to_owned(), value))
    }
}

/// Named parameter vectors, recycled element-wise against the other arguments.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterVectors(BTreeMap<String, Array1<f64>>);

impl ParameterVectors {
    pub fn new() -> Self {
        ParameterVectors(BTreeMap::new())
    }

    pub fn with<S>(mut self, name: &str, values: &ArrayBase<S, Ix1>) -> Self
    where
        S: Data<Elem = f64>,
    {
        self.0.insert(name.to_owned(), values.to_owned());
        self
    }

    pub fn with_scalar(self, name: &str, value: f64) -> Self {
        self.with(name, &Array1::from(vec![value]))
    }

    pub fn lengths(&self) -> Vec<usize> {
        self.0.values().map(|values| values.len()).collect()
    }

    /// The parameters of element `index`, cycling through each shorter vector.
    ///
    /// Callers must only ask for indices below a recycled length that accounts
    /// for [`ParameterVectors::lengths`], so no vector is empty here.
    pub fn at(&self, index: usize) -> Parameters {
        Parameters(
            self.0
                .iter()
                .map(|(name, values)| (name.clone(), values[index % values.len()]))
                .collect(),
        )
    }
}

impl From<Parameters> for ParameterVectors {
    fn from(parameters: Parameters) -> Self {
        ParameterVectors(
            parameters
                .0
                .into_iter()
                .map(|(name, value)| (name, Array1::from(vec![value])))
                .collect(),
        )
    }
}
