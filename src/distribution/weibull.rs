use super::{BaseDistribution, Parameters};
use crate::convention::{Convention, Tail};
use crate::error::Error;

/// Weibull distribution with a required `shape` and a `scale` defaulting to 1.
///
/// The survival function is `exp(-(x / scale)^shape)`.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Weibull;

struct WeibullParameters {
    shape: f64,
    scale: f64,
}

impl WeibullParameters {
    fn from_parameters(parameters: &Parameters) -> Result<Self, Error> {
        Ok(WeibullParameters {
            shape: parameters.require_positive("shape")?,
            scale: parameters.positive_or("scale", 1.)?,
        })
    }

    fn cumulative_hazard(&self, x: f64) -> f64 {
        (x.max(0.) / self.scale).powf(self.shape)
    }

    fn log_hazard(&self, x: f64) -> f64 {
        let rho = self.shape;
        let lambda = self.scale;

        // 0 * ln(0) would be NaN at the origin when shape is one
        let power = if rho == 1. { 0. } else { (rho - 1.) * x.ln() };
        rho.ln() - (rho * lambda.ln()) + power
    }
}

impl BaseDistribution for Weibull {
    fn cdf(&self, x: f64, convention: Convention, parameters: &Parameters) -> Result<f64, Error> {
        let cumulative_hazard = WeibullParameters::from_parameters(parameters)?.cumulative_hazard(x);

        Ok(match (convention.tail, convention.log) {
            (Tail::Upper, false) => (-cumulative_hazard).exp(),
            (Tail::Upper, true) => -cumulative_hazard,
            (Tail::Lower, false) => -(-cumulative_hazard).exp_m1(),
            (Tail::Lower, true) => (-(-cumulative_hazard).exp_m1()).ln(),
        })
    }

    fn pdf(&self, x: f64, convention: Convention, parameters: &Parameters) -> Result<f64, Error> {
        let weibull = WeibullParameters::from_parameters(parameters)?;
        if x < 0. {
            return Ok(convention.finalize(0.));
        }

        // log f = log h - H
        let log_density = weibull.log_hazard(x) - weibull.cumulative_hazard(x);
        Ok(if convention.log {
            log_density
        } else {
            log_density.exp()
        })
    }
}
