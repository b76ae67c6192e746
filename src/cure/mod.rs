//! Cure model transformations of a base distribution.
//!
//! A [`CureModel`] supplies the survival and hazard of one family for a single
//! element, always in canonical form (upper tail, natural scale). The density and
//! cumulative hazard are derived from those two here, once, so every family obeys
//! `f = S * h` and `H = -ln S` by construction. [`CureDistribution`] adds the
//! vectorised surface: recycling of arguments against the cure fraction and the
//! base parameters, and the caller's [`Convention`] applied at the very end.

use crate::convention::Convention;
use crate::distribution::{ParameterVectors, Parameters};
use crate::error::Error;
use crate::numeric::{self, IntegrationParameters, InversionParameters};
use crate::utils::{check_cure_fraction, check_probability, recycled_len};
use ndarray::{Array1, ArrayBase, ArrayView1, Data, Ix1};

pub mod mixture;
pub mod non_mixture;

pub use mixture::Mixture;
pub use non_mixture::NonMixture;

pub trait CureModel {
    /// `S(t)` for cure fraction `theta`.
    fn survival(&self, t: f64, theta: f64, parameters: &Parameters) -> Result<f64, Error>;

    /// `h(t)` for cure fraction `theta`.
    fn hazard(&self, t: f64, theta: f64, parameters: &Parameters) -> Result<f64, Error>;

    fn density(&self, t: f64, theta: f64, parameters: &Parameters) -> Result<f64, Error> {
        Ok(self.survival(t, theta, parameters)? * self.hazard(t, theta, parameters)?)
    }

    fn cumulative_hazard(&self, t: f64, theta: f64, parameters: &Parameters) -> Result<f64, Error> {
        Ok(-self.survival(t, theta, parameters)?.ln())
    }

    /// The time at which the survival equals `level`.
    fn quantile(
        &self,
        level: f64,
        theta: f64,
        parameters: &Parameters,
        inversion: &InversionParameters,
    ) -> Result<f64, Error> {
        if check_cure_fraction(theta)? == 1. {
            return Err(Error::CertainCure("quantile"));
        }
        if in_cured_mass(check_probability(level)?, theta) {
            return Err(Error::RootNotBracketed(level, f64::INFINITY));
        }

        numeric::invert(|u| self.survival(u, theta, parameters), level, inversion)
    }

    fn restricted_mean(
        &self,
        t: f64,
        start: f64,
        theta: f64,
        parameters: &Parameters,
        integration: &IntegrationParameters,
    ) -> Result<f64, Error> {
        numeric::restricted_mean(
            |u| self.survival(u, theta, parameters),
            t,
            start,
            integration,
        )
    }

    fn mean(
        &self,
        theta: f64,
        parameters: &Parameters,
        integration: &IntegrationParameters,
    ) -> Result<f64, Error> {
        if check_cure_fraction(theta)? == 1. {
            return Ok(f64::INFINITY);
        }

        self.restricted_mean(f64::INFINITY, 0., theta, parameters, integration)
    }
}

/// Whether survival `level` lies at or below the plateau `theta` that every
/// family approaches as time grows, allowing for rounding in `1 - p`.
pub(crate) fn in_cured_mass(level: f64, theta: f64) -> bool {
    theta > 0. && level <= theta * (1. + 4. * f64::EPSILON)
}

/// A cure model together with its cure fractions and base parameters.
///
/// ```
/// use cure_models::{Convention, CureDistribution, Exponential, Mixture, ParameterVectors};
/// use ndarray::array;
///
/// let parameters = ParameterVectors::new().with_scalar("rate", 1.);
/// let cure = CureDistribution::new(Mixture::new(Exponential), &array![0.3], parameters).unwrap();
///
/// let survival = cure.cdf(&array![1.], Convention::upper()).unwrap();
/// assert!((survival[0] - 0.5575156).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct CureDistribution<M> {
    pub(crate) model: M,
    pub(crate) theta: Array1<f64>,
    pub(crate) parameters: ParameterVectors,
}

impl<M> CureDistribution<M>
where
    M: CureModel,
{
    pub fn new<S>(model: M, theta: &ArrayBase<S, Ix1>, parameters: ParameterVectors) -> Result<Self, Error>
    where
        S: Data<Elem = f64>,
    {
        for &fraction in theta.iter() {
            check_cure_fraction(fraction)?;
        }

        Ok(CureDistribution {
            model,
            theta: theta.to_owned(),
            parameters,
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn theta(&self) -> &Array1<f64> {
        &self.theta
    }

    pub fn parameters(&self) -> &ParameterVectors {
        &self.parameters
    }

    /// Lengths of the arguments every operation recycles against.
    pub(crate) fn own_lengths(&self) -> Vec<usize> {
        let mut lengths = vec![self.theta.len()];
        lengths.extend(self.parameters.lengths());
        lengths
    }

    /// Evaluates `kernel` once per recycled element of `inputs`, the cure
    /// fractions and the parameter vectors.
    pub(crate) fn recycle<G>(&self, inputs: &[ArrayView1<f64>], kernel: G) -> Result<Array1<f64>, Error>
    where
        G: Fn(&[f64], f64, &Parameters) -> Result<f64, Error>,
    {
        let mut lengths: Vec<usize> = inputs.iter().map(|input| input.len()).collect();
        lengths.extend(self.own_lengths());
        let n = recycled_len(&lengths);

        let mut arguments = vec![0.; inputs.len()];
        let mut values = Vec::with_capacity(n);
        for i in 0..n {
            for (argument, input) in arguments.iter_mut().zip(inputs) {
                *argument = input[i % input.len()];
            }
            let theta = self.theta[i % self.theta.len()];
            values.push(kernel(&arguments, theta, &self.parameters.at(i))?);
        }

        Ok(Array1::from(values))
    }

    pub fn density<S>(&self, x: &ArrayBase<S, Ix1>, convention: Convention) -> Result<Array1<f64>, Error>
    where
        S: Data<Elem = f64>,
    {
        self.recycle(&[x.view()], |args, theta, parameters| {
            Ok(convention.finalize(self.model.density(args[0], theta, parameters)?))
        })
    }

    /// The distribution function, or the survival function for the upper tail.
    pub fn cdf<S>(&self, x: &ArrayBase<S, Ix1>, convention: Convention) -> Result<Array1<f64>, Error>
    where
        S: Data<Elem = f64>,
    {
        self.recycle(&[x.view()], |args, theta, parameters| {
            Ok(convention.finalize_probability(self.model.survival(args[0], theta, parameters)?))
        })
    }

    pub fn hazard<S>(&self, x: &ArrayBase<S, Ix1>, convention: Convention) -> Result<Array1<f64>, Error>
    where
        S: Data<Elem = f64>,
    {
        self.recycle(&[x.view()], |args, theta, parameters| {
            Ok(convention.finalize(self.model.hazard(args[0], theta, parameters)?))
        })
    }

    pub fn cumulative_hazard<S>(
        &self,
        x: &ArrayBase<S, Ix1>,
        convention: Convention,
    ) -> Result<Array1<f64>, Error>
    where
        S: Data<Elem = f64>,
    {
        self.recycle(&[x.view()], |args, theta, parameters| {
            Ok(convention.finalize(self.model.cumulative_hazard(args[0], theta, parameters)?))
        })
    }

    /// Inverse of [`CureDistribution::cdf`]: `p` is read in `convention`.
    pub fn quantile<S>(
        &self,
        p: &ArrayBase<S, Ix1>,
        convention: Convention,
        inversion: &InversionParameters,
    ) -> Result<Array1<f64>, Error>
    where
        S: Data<Elem = f64>,
    {
        self.recycle(&[p.view()], |args, theta, parameters| {
            let level = convention.survival_level(args[0])?;
            self.model.quantile(level, theta, parameters, inversion)
        })
    }

    /// Restricted mean survival between each `start` and horizon `t`.
    pub fn restricted_mean<S, T>(
        &self,
        t: &ArrayBase<S, Ix1>,
        start: &ArrayBase<T, Ix1>,
        integration: &IntegrationParameters,
    ) -> Result<Array1<f64>, Error>
    where
        S: Data<Elem = f64>,
        T: Data<Elem = f64>,
    {
        self.recycle(&[t.view(), start.view()], |args, theta, parameters| {
            self.model
                .restricted_mean(args[0], args[1], theta, parameters, integration)
        })
    }

    pub fn mean(&self, integration: &IntegrationParameters) -> Result<Array1<f64>, Error> {
        self.recycle(&[], |_, theta, parameters| {
            self.model.mean(theta, parameters, integration)
        })
    }
}
