use super::{BaseDistribution, Parameters};
use crate::convention::{Convention, Tail};
use crate::error::Error;

/// Exponential distribution parameterised by `rate` (default 1).
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Exponential;

impl BaseDistribution for Exponential {
    fn cdf(&self, x: f64, convention: Convention, parameters: &Parameters) -> Result<f64, Error> {
        let rate = parameters.positive_or("rate", 1.)?;
        let cumulative_hazard = rate * x.max(0.);

        Ok(match (convention.tail, convention.log) {
            (Tail::Upper, false) => (-cumulative_hazard).exp(),
            (Tail::Upper, true) => -cumulative_hazard,
            (Tail::Lower, false) => -(-cumulative_hazard).exp_m1(),
            (Tail::Lower, true) => (-(-cumulative_hazard).exp_m1()).ln(),
        })
    }

    fn pdf(&self, x: f64, convention: Convention, parameters: &Parameters) -> Result<f64, Error> {
        let rate = parameters.positive_or("rate", 1.)?;
        if x < 0. {
            return Ok(convention.finalize(0.));
        }

        let log_density = rate.ln() - rate * x;
        Ok(if convention.log {
            log_density
        } else {
            log_density.exp()
        })
    }
}
