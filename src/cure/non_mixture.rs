use super::CureModel;
use crate::convention::Convention;
use crate::distribution::{BaseDistribution, Parameters};
use crate::error::Error;
use crate::utils::{check_cure_fraction, check_time};

/// Bounded cumulative hazard cure model: `S(t) = theta^F0(t)`.
///
/// The cumulative hazard `-ln(theta) F0(t)` is bounded by `-ln(theta)`, so the
/// survival levels off at `theta` instead of reaching zero. The hazard uses the
/// base density directly, `h(t) = -ln(theta) f0(t)`. At `theta = 0` the
/// evaluation is literal: the hazard becomes `+inf * f0(t)` and the survival
/// drops to zero as soon as `F0(t) > 0`.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct NonMixture<B> {
    base: B,
}

impl<B> NonMixture<B> {
    pub fn new(base: B) -> Self {
        NonMixture { base }
    }
}

impl<B> CureModel for NonMixture<B>
where
    B: BaseDistribution,
{
    fn survival(&self, t: f64, theta: f64, parameters: &Parameters) -> Result<f64, Error> {
        let t = check_time(t)?;
        let theta = check_cure_fraction(theta)?;

        let base_cdf = self.base.cdf(t, Convention::LOWER, parameters)?;
        Ok(theta.powf(base_cdf))
    }

    fn hazard(&self, t: f64, theta: f64, parameters: &Parameters) -> Result<f64, Error> {
        let t = check_time(t)?;
        let theta = check_cure_fraction(theta)?;

        let base_density = self.base.pdf(t, Convention::CANONICAL, parameters)?;
        Ok(-theta.ln() * base_density)
    }
}
