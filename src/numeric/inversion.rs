use crate::error::Error;
use crate::utils::check_probability;
use argmin::prelude::*;
use argmin::solver::brent::Brent;
use log::debug;
use serde_derive::{Deserialize, Serialize};

/// Settings of the quantile inversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InversionParameters {
    /// Left end of the search; the support of every survival callable starts here.
    pub lower: f64,
    /// First right end tried while bracketing.
    pub initial_upper: f64,
    /// How many times the right end may double before giving up.
    pub max_expansions: u32,
    pub tolerance: f64,
    pub max_iterations: u64,
    /// Attach argmin's terminal logger to every solve.
    pub verbose: bool,
}

impl Default for InversionParameters {
    fn default() -> Self {
        InversionParameters {
            lower: 0.,
            initial_upper: 1.,
            max_expansions: 64,
            tolerance: 1e-10,
            max_iterations: 200,
            verbose: false,
        }
    }
}

struct SurvivalRoot<S> {
    survival: S,
    level: f64,
}

impl<S> SurvivalRoot<S>
where
    S: Fn(f64) -> Result<f64, Error>,
{
    fn offset(&self, t: f64) -> Result<f64, Error> {
        Ok((self.survival)(t)? - self.level)
    }
}

impl<'r, S> ArgminOp for &'r SurvivalRoot<S>
where
    S: Fn(f64) -> Result<f64, Error>,
{
    type Param = f64;
    type Output = f64;
    type Hessian = ();
    type Jacobian = ();
    type Float = f64;

    fn apply(&self, t: &Self::Param) -> Result<Self::Output, anyhow::Error> {
        Ok(self.offset(*t)?)
    }
}

/// Finds the time at which a non-increasing survival callable equals `level`.
///
/// The search starts at [`InversionParameters::lower`] and doubles the right end
/// until the survival drops to `level` or below, then polishes the bracket with
/// Brent's method. A `level` that is never reached within the allowed expansions,
/// or that the survival only settles onto as it flattens, is reported as
/// [`Error::RootNotBracketed`]. A zero `level` is only reached in the limit and
/// inverts to `+inf`.
pub fn invert<S>(survival: S, level: f64, parameters: &InversionParameters) -> Result<f64, Error>
where
    S: Fn(f64) -> Result<f64, Error>,
{
    let level = check_probability(level)?;
    if level == 0. {
        return Ok(f64::INFINITY);
    }
    let problem = SurvivalRoot { survival, level };

    let mut lower = parameters.lower;
    if problem.offset(lower)? <= 0. {
        return Ok(lower);
    }

    let mut upper = if parameters.initial_upper > lower {
        parameters.initial_upper
    } else {
        lower + 1.
    };
    let mut expansions = 0;
    loop {
        let offset = problem.offset(upper)?;
        if offset == 0. {
            // still exactly on the level further out: an asymptote, not a crossing
            if problem.offset(2. * upper)? == 0. {
                return Err(Error::RootNotBracketed(level, upper));
            }
            return Ok(upper);
        }
        if offset < 0. {
            break;
        }
        if expansions == parameters.max_expansions {
            return Err(Error::RootNotBracketed(level, upper));
        }

        lower = upper;
        upper *= 2.;
        expansions += 1;
    }
    debug!(
        "bracketed survival level {} in [{}, {}] after {} expansions",
        level, lower, upper, expansions
    );

    let solver = Brent::new(lower, upper, parameters.tolerance);
    let mut executor = Executor::new(&problem, solver, lower).max_iters(parameters.max_iterations);
    if parameters.verbose {
        executor = executor.add_observer(ArgminSlogLogger::term(), ObserverMode::Always);
    }
    let res = executor.run()?;

    if matches!(res.state.termination_reason, TerminationReason::MaxItersReached) {
        return Err(Error::RootNotConverged(res.state.iter));
    }
    debug!(
        "survival level {} reached at {} after {} iterations",
        level, res.state.param, res.state.iter
    );

    Ok(res.state.param)
}
