//! Tail direction and log scale conventions shared by every distributional function.
//!
//! Every quantity is first computed in canonical form: the upper tail (survival
//! probability) without logs. The caller's [`Convention`] is applied exactly once,
//! at the outermost return, by flipping the tail of probability-like values and
//! then taking the log. Internal calls always pass an explicit fixed convention
//! so a caller's flags never leak into a nested evaluation.

use crate::error::Error;
use num_traits::Float;
use serde_derive::{Deserialize, Serialize};

/// Which tail a probability refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tail {
    /// `P(T <= t)`
    Lower,
    /// `P(T > t)`
    Upper,
}

impl Default for Tail {
    fn default() -> Self {
        Tail::Lower
    }
}

/// The pair of tail direction and log scale flags.
///
/// The default is the lower tail on the natural scale.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convention {
    pub tail: Tail,
    pub log: bool,
}

impl Convention {
    /// Upper tail, natural scale: the form every internal computation uses.
    pub const CANONICAL: Convention = Convention {
        tail: Tail::Upper,
        log: false,
    };

    /// Lower tail, natural scale.
    pub const LOWER: Convention = Convention {
        tail: Tail::Lower,
        log: false,
    };

    pub fn lower() -> Self {
        Self::LOWER
    }

    pub fn upper() -> Self {
        Self::CANONICAL
    }

    pub fn with_log(self, log: bool) -> Self {
        Convention { log, ..self }
    }

    /// Converts a canonical survival probability to the requested tail, then scale.
    pub fn finalize_probability<F: Float>(self, survival: F) -> F {
        let value = match self.tail {
            Tail::Lower => F::one() - survival,
            Tail::Upper => survival,
        };
        self.finalize(value)
    }

    /// Applies only the scale. Densities, hazards and cumulative hazards have no tail.
    pub fn finalize<F: Float>(self, value: F) -> F {
        if self.log {
            value.ln()
        } else {
            value
        }
    }

    /// Interprets a probability given in this convention as a survival level.
    ///
    /// This is the inverse of [`Convention::finalize_probability`], used on the
    /// input side of quantile functions.
    pub fn survival_level(self, p: f64) -> Result<f64, Error> {
        let natural = if self.log { p.exp() } else { p };
        if !(0.0..=1.0).contains(&natural) {
            return Err(Error::ProbabilityOutOfRange(natural));
        }

        Ok(match self.tail {
            Tail::Lower => 1.0 - natural,
            Tail::Upper => natural,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn default_is_lower_natural() {
        let convention = Convention::default();
        assert_eq!(convention.tail, Tail::Lower);
        assert!(!convention.log);
    }

    #[test]
    fn finalize_flips_then_logs() {
        let survival = 0.25f64;
        assert!((Convention::lower().finalize_probability(survival) - 0.75).abs() < TOLERANCE);
        assert!((Convention::upper().finalize_probability(survival) - 0.25).abs() < TOLERANCE);

        let log_lower = Convention::lower().with_log(true).finalize_probability(survival);
        assert!((log_lower - 0.75f64.ln()).abs() < TOLERANCE);
    }

    #[test]
    fn log_of_zero_is_negative_infinity() {
        let value = Convention::upper().with_log(true).finalize_probability(0.0f64);
        assert_eq!(value, f64::NEG_INFINITY);
        assert_eq!(Convention::lower().with_log(true).finalize(0.0f64), f64::NEG_INFINITY);
    }

    #[test]
    fn survival_level_inverts_finalize() {
        for &survival in &[0.0, 0.1, 0.5, 0.9, 1.0] {
            for &convention in &[
                Convention::lower(),
                Convention::upper(),
                Convention::lower().with_log(true),
                Convention::upper().with_log(true),
            ] {
                let p = convention.finalize_probability(survival);
                let level = convention.survival_level(p).unwrap();
                assert!((level - survival).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn survival_level_rejects_out_of_range() {
        for &p in &[-0.1, 1.1, f64::NAN] {
            assert!(matches!(
                Convention::lower().survival_level(p),
                Err(Error::ProbabilityOutOfRange(_))
            ));
        }
        assert!(Convention::lower().with_log(true).survival_level(0.5).is_err());
    }
}
