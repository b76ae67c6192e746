//! Random variates by inverse transform sampling.
//!
//! Each draw is a uniform `u` on the open unit interval read as a lower tail
//! probability, so the variate is the time at which the survival equals `1 - u`.
//! Draws landing in the cured mass (`1 - u <= theta`) never experience the event
//! and are returned as `+inf`. Every finite draw costs one numerical inversion.

use crate::cure::{in_cured_mass, CureDistribution, CureModel};
use crate::distribution::Parameters;
use crate::error::Error;
use crate::numeric::InversionParameters;
use crate::utils::{check_cure_fraction, recycled_len};
use log::debug;
use ndarray::Array1;
use rand::distr::Open01;
use rand::Rng;

fn draw<M, R>(
    model: &M,
    theta: f64,
    parameters: &Parameters,
    rng: &mut R,
    inversion: &InversionParameters,
) -> Result<f64, Error>
where
    M: CureModel,
    R: Rng + ?Sized,
{
    if check_cure_fraction(theta)? == 1. {
        return Err(Error::CertainCure("random variate"));
    }

    let uniform: f64 = rng.sample(Open01);
    let level = 1. - uniform;
    if in_cured_mass(level, theta) {
        debug!("uniform {} falls in cured mass {}", uniform, theta);
        return Ok(f64::INFINITY);
    }

    model.quantile(level, theta, parameters, inversion)
}

impl<M> CureDistribution<M>
where
    M: CureModel,
{
    /// Draw `n` variates, recycling the cure fractions and parameters over the draws.
    ///
    /// The method accepts any [`rand::Rng`] implementation, so callers can use
    /// deterministic generators such as [`rand::rngs::StdRng`] for reproducibility.
    ///
    /// ```
    /// use cure_models::{CureDistribution, Exponential, NonMixture, ParameterVectors};
    /// use ndarray::array;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let cure = CureDistribution::new(NonMixture::new(Exponential), &array![0.2], ParameterVectors::new())
    ///     .unwrap();
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let draws = cure.sample_n(5, &mut rng, &Default::default()).unwrap();
    /// assert_eq!(draws.len(), 5);
    /// assert!(draws.iter().all(|&t| t >= 0.));
    /// ```
    pub fn sample_n<R>(
        &self,
        n: usize,
        rng: &mut R,
        inversion: &InversionParameters,
    ) -> Result<Array1<f64>, Error>
    where
        R: Rng + ?Sized,
    {
        if recycled_len(&self.own_lengths()) == 0 {
            return Ok(Array1::zeros(0));
        }

        let mut draws = Vec::with_capacity(n);
        for i in 0..n {
            let theta = self.theta[i % self.theta.len()];
            draws.push(draw(&self.model, theta, &self.parameters.at(i), rng, inversion)?);
        }

        Ok(Array1::from(draws))
    }
}
