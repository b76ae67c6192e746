use super::CureModel;
use crate::convention::Convention;
use crate::distribution::{BaseDistribution, Parameters};
use crate::error::Error;
use crate::numeric::{self, IntegrationParameters};
use crate::utils::{check_cure_fraction, check_time};

/// Mixture cure model: `S(t) = theta + (1 - theta) S0(t)`.
///
/// A fraction `theta` of the population is cured and never experiences the
/// event; the rest follows the base distribution.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Mixture<B> {
    base: B,
}

impl<B> Mixture<B> {
    pub fn new(base: B) -> Self {
        Mixture { base }
    }
}

impl<B> CureModel for Mixture<B>
where
    B: BaseDistribution,
{
    fn survival(&self, t: f64, theta: f64, parameters: &Parameters) -> Result<f64, Error> {
        let t = check_time(t)?;
        let theta = check_cure_fraction(theta)?;

        let base_survival = self.base.cdf(t, Convention::CANONICAL, parameters)?;
        Ok(theta + (1. - theta) * base_survival)
    }

    fn hazard(&self, t: f64, theta: f64, parameters: &Parameters) -> Result<f64, Error> {
        let base_density = self.base.pdf(check_time(t)?, Convention::CANONICAL, parameters)?;
        let survival = self.survival(t, theta, parameters)?;

        Ok((1. - theta) * base_density / survival)
    }

    /// Infinite whenever part of the population is cured. Without a cured
    /// fraction the mixture is the base distribution, whose own survival is
    /// integrated.
    fn mean(
        &self,
        theta: f64,
        parameters: &Parameters,
        integration: &IntegrationParameters,
    ) -> Result<f64, Error> {
        if check_cure_fraction(theta)? > 0. {
            return Ok(f64::INFINITY);
        }

        numeric::restricted_mean(
            |u| self.base.cdf(u, Convention::CANONICAL, parameters),
            f64::INFINITY,
            0.,
            integration,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cure::CureDistribution;
    use crate::distribution::{Exponential, ParameterVectors, Weibull};
    use ndarray::array;

    const TOLERANCE: f64 = 1e-10;

    fn exponential(theta: f64, rate: f64) -> CureDistribution<Mixture<Exponential>> {
        CureDistribution::new(
            Mixture::new(Exponential),
            &array![theta],
            ParameterVectors::new().with_scalar("rate", rate),
        )
        .unwrap()
    }

    #[test]
    fn exponential_base_at_one() {
        let cure = exponential(0.3, 1.);
        let x = array![1.];

        let survival = cure.cdf(&x, Convention::upper()).unwrap();
        assert!((survival[0] - (0.3 + 0.7 * (-1f64).exp())).abs() < TOLERANCE);
        assert!((survival[0] - 0.5575156088).abs() < 1e-9);

        let hazard = cure.hazard(&x, Convention::default()).unwrap();
        assert!((hazard[0] - 0.4618984738).abs() < 1e-9);

        let density = cure.density(&x, Convention::default()).unwrap();
        assert!((density[0] - 0.7 * (-1f64).exp()).abs() < TOLERANCE);

        let cdf = cure.cdf(&x, Convention::lower()).unwrap();
        assert!((cdf[0] - 0.7 * (1. - (-1f64).exp())).abs() < TOLERANCE);
    }

    #[test]
    fn survival_levels_off_at_theta() {
        let survival = exponential(0.3, 1.)
            .cdf(&array![50., f64::INFINITY], Convention::upper())
            .unwrap();
        assert_diff_within_tolerance!(&survival, &array![0.3, 0.3], TOLERANCE);
    }

    #[test]
    fn zero_cure_fraction_is_the_base_distribution() {
        let parameters = Parameters::new().with("shape", 1.7).with("scale", 0.9);
        let cure = CureDistribution::new(
            Mixture::new(Weibull),
            &array![0.],
            ParameterVectors::from(parameters.clone()),
        )
        .unwrap();
        let x = array![0.2, 0.9, 1.5, 3.];

        let survival = cure.cdf(&x, Convention::upper()).unwrap();
        let density = cure.density(&x, Convention::default()).unwrap();
        let hazard = cure.hazard(&x, Convention::default()).unwrap();

        let base_survival = x.mapv(|t| Weibull.cdf(t, Convention::upper(), &parameters).unwrap());
        let base_density = x.mapv(|t| Weibull.pdf(t, Convention::default(), &parameters).unwrap());

        assert_diff_within_tolerance!(&survival, &base_survival, TOLERANCE);
        assert_diff_within_tolerance!(&density, &base_density, TOLERANCE);
        assert_diff_within_tolerance!(&hazard, &(&base_density / &base_survival), TOLERANCE);
    }

    #[test]
    fn mean_is_infinite_with_a_cured_fraction() {
        let mean = exponential(0.3, 1.).mean(&Default::default()).unwrap();
        assert_eq!(mean[0], f64::INFINITY);

        let mean = exponential(1e-12, 1.).mean(&Default::default()).unwrap();
        assert_eq!(mean[0], f64::INFINITY);
    }

    #[test]
    fn mean_without_cure_is_the_base_mean() {
        let mean = exponential(0., 2.).mean(&Default::default()).unwrap();
        assert!((mean[0] - 0.5).abs() < 1e-7);
    }

    #[test]
    fn base_mean_path_agrees_with_mixture_survival() {
        let cure = exponential(0., 0.25);
        let parameters = Parameters::new().with("rate", 0.25);

        let via_base = cure.model().mean(0., &parameters, &Default::default()).unwrap();
        let via_mixture = cure
            .model()
            .restricted_mean(f64::INFINITY, 0., 0., &parameters, &Default::default())
            .unwrap();
        assert!((via_base - via_mixture).abs() < 1e-9);
        assert!((via_base - 4.).abs() < 1e-6);
    }

    #[test]
    fn restricted_mean_with_left_truncation() {
        // conditional on surviving to start
        let cure = exponential(0.3, 1.);
        let (start, t) = (1., 3.);
        let actual = cure
            .restricted_mean(&array![t], &array![start], &Default::default())
            .unwrap();

        let survival = |u: f64| 0.3 + 0.7 * (-u).exp();
        let integral = 0.3 * (t - start) + 0.7 * ((-start).exp() - (-t).exp());
        assert!((actual[0] - integral / survival(start)).abs() < 1e-9);
    }
}
