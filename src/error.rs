use self::Error::*;
use std::fmt;

/// Broad classes of failure, used by callers that only care about the category.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An argument lies outside the domain of the operation.
    Domain,
    /// A root could not be bracketed or an integral did not converge.
    Convergence,
    /// The cure fraction makes the requested quantity infinite rather than unknown.
    DegenerateParameter,
    Other,
}

#[derive(Debug)]
pub enum Error {
    /// A probability argument outside of [0, 1], after undoing the log scale.
    ProbabilityOutOfRange(f64),
    /// A cure fraction outside of [0, 1].
    CureFractionOutOfRange(f64),
    /// A negative or NaN time argument.
    InvalidTime(f64),
    /// A restricted mean whose start lies beyond its horizon, as (start, horizon).
    InvalidInterval(f64, f64),
    /// Survival is zero at the start of a restricted mean, so conditioning on it is undefined.
    ZeroSurvivalAtStart(f64),
    /// A base distribution parameter that is present but unusable.
    InvalidParameter(String, f64),
    /// A base distribution parameter that is required but absent.
    MissingParameter(String),
    /// The survival callable never dropped to the target level, as (level, last upper bound).
    RootNotBracketed(f64, f64),
    /// The root finder stopped after the given number of iterations without converging.
    RootNotConverged(u64),
    /// Adaptive quadrature gave up, as (estimate, error estimate).
    IntegralNotConverged(f64, f64),
    /// The survival callable is still above tolerance at the far horizon, as (horizon, survival).
    NonDecayingSurvival(f64, f64),
    /// The integrand produced a NaN or infinite value at the given time.
    NonFiniteIntegrand(f64),
    /// The operation needs a finite root but the cure fraction is one.
    CertainCure(&'static str),
    Anyhow(anyhow::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProbabilityOutOfRange(_)
            | CureFractionOutOfRange(_)
            | InvalidTime(_)
            | InvalidInterval(_, _)
            | ZeroSurvivalAtStart(_)
            | InvalidParameter(_, _)
            | MissingParameter(_) => ErrorKind::Domain,
            RootNotBracketed(_, _)
            | RootNotConverged(_)
            | IntegralNotConverged(_, _)
            | NonDecayingSurvival(_, _)
            | NonFiniteIntegrand(_) => ErrorKind::Convergence,
            CertainCure(_) => ErrorKind::DegenerateParameter,
            Anyhow(_) => ErrorKind::Other,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Anyhow(e) => fmt::Display::fmt(e, f),
            ProbabilityOutOfRange(p) => write!(f, "probability {} must lie within [0, 1]", p),
            CureFractionOutOfRange(theta) => {
                write!(f, "cure fraction {} must lie within [0, 1]", theta)
            }
            InvalidTime(t) => write!(f, "time {} must be non-negative", t),
            InvalidInterval(start, t) => write!(
                f,
                "restricted mean start {} must not exceed its horizon {}",
                start, t
            ),
            ZeroSurvivalAtStart(start) => write!(
                f,
                "survival at start {} is zero; cannot condition on it",
                start
            ),
            InvalidParameter(name, value) => {
                write!(f, "parameter {} has invalid value {}", name, value)
            }
            MissingParameter(name) => write!(f, "parameter {} is required", name),
            RootNotBracketed(level, upper) => write!(
                f,
                "survival never reached {} before time {}; no finite root",
                level, upper
            ),
            RootNotConverged(iterations) => {
                write!(f, "root finding did not converge in {} iterations", iterations)
            }
            IntegralNotConverged(estimate, error) => write!(
                f,
                "integration did not converge (estimate {}, error estimate {})",
                estimate, error
            ),
            NonDecayingSurvival(horizon, survival) => write!(
                f,
                "survival is still {} at time {}; the integral over an infinite horizon diverges",
                survival, horizon
            ),
            NonFiniteIntegrand(t) => write!(f, "non-finite integrand at time {}", t),
            CertainCure(operation) => write!(
                f,
                "{} is infinite when the cure fraction is 1 and has no finite value",
                operation
            ),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<Error>() {
            Ok(inner) => inner,
            Err(e) => Anyhow(e),
        }
    }
}

impl std::error::Error for Error {}
