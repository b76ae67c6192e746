use crate::error::Error;

/// Length of the result when arguments of the given lengths are recycled
/// against each other. Any empty argument produces an empty result.
pub fn recycled_len(lengths: &[usize]) -> usize {
    if lengths.iter().any(|&len| len == 0) {
        0
    } else {
        lengths.iter().copied().max().unwrap_or(0)
    }
}

pub fn check_time(t: f64) -> Result<f64, Error> {
    if t.is_nan() || t < 0. {
        Err(Error::InvalidTime(t))
    } else {
        Ok(t)
    }
}

pub fn check_cure_fraction(theta: f64) -> Result<f64, Error> {
    if (0.0..=1.0).contains(&theta) {
        Ok(theta)
    } else {
        Err(Error::CureFractionOutOfRange(theta))
    }
}

pub fn check_probability(p: f64) -> Result<f64, Error> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(Error::ProbabilityOutOfRange(p))
    }
}
