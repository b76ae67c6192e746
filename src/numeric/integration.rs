use crate::error::Error;
use crate::utils::check_time;
use log::{debug, trace};
use serde_derive::{Deserialize, Serialize};

/// Gauss-Kronrod 15 point abscissas on [-1, 1], non-negative half, outermost first.
/// Odd indices are shared with the embedded 7 point Gauss rule.
const GK15_NODES: [f64; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144845693013,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.000000000000000000000000000000000,
];

const GK15_WEIGHTS: [f64; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];

/// Gauss 7 point weights for GK15_NODES[1], [3], [5] and the centre.
const G7_WEIGHTS: [f64; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];

/// Settings of the restricted mean quadrature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationParameters {
    pub relative_tolerance: f64,
    pub absolute_tolerance: f64,
    pub max_subdivisions: usize,
    /// Distance past `start` at which survival must have decayed for an infinite horizon.
    pub tail_horizon: f64,
    pub tail_tolerance: f64,
}

impl Default for IntegrationParameters {
    fn default() -> Self {
        IntegrationParameters {
            relative_tolerance: 1e-8,
            absolute_tolerance: 1e-10,
            max_subdivisions: 200,
            tail_horizon: 1e12,
            tail_tolerance: 1e-8,
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

fn gauss_kronrod<F>(integrand: &F, a: f64, b: f64) -> Result<Segment, Error>
where
    F: Fn(f64) -> Result<f64, Error>,
{
    let centre = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let f_centre = integrand(centre)?;
    let mut kronrod = GK15_WEIGHTS[7] * f_centre;
    let mut gauss = G7_WEIGHTS[3] * f_centre;

    for (i, (&node, &weight)) in GK15_NODES[..7].iter().zip(GK15_WEIGHTS.iter()).enumerate() {
        let offset = half * node;
        let pair = integrand(centre - offset)? + integrand(centre + offset)?;
        kronrod += weight * pair;
        if i % 2 == 1 {
            gauss += G7_WEIGHTS[i / 2] * pair;
        }
    }

    Ok(Segment {
        a,
        b,
        value: kronrod * half,
        error: ((kronrod - gauss) * half).abs(),
    })
}

/// Globally adaptive Gauss-Kronrod quadrature of `integrand` over [a, b].
pub fn integrate<F>(integrand: F, a: f64, b: f64, parameters: &IntegrationParameters) -> Result<f64, Error>
where
    F: Fn(f64) -> Result<f64, Error>,
{
    let mut segments = vec![gauss_kronrod(&integrand, a, b)?];

    loop {
        let value: f64 = segments.iter().map(|s| s.value).sum();
        let error: f64 = segments.iter().map(|s| s.error).sum();

        // a single panel can sample only the flat part of the integrand
        let split = segments.len() > 1;
        if split && error <= parameters.absolute_tolerance.max(parameters.relative_tolerance * value.abs()) {
            debug!(
                "integral over [{}, {}] = {} (error {}, {} segments)",
                a,
                b,
                value,
                error,
                segments.len()
            );
            return Ok(value);
        }
        if segments.len() >= parameters.max_subdivisions {
            return Err(Error::IntegralNotConverged(value, error));
        }

        let worst = segments
            .iter()
            .enumerate()
            .fold(0, |worst, (i, s)| if s.error > segments[worst].error { i } else { worst });
        let Segment { a: left, b: right, .. } = segments.swap_remove(worst);
        let mid = 0.5 * (left + right);
        if mid <= left || mid >= right {
            // the worst segment cannot be split any further in floating point
            return Err(Error::IntegralNotConverged(value, error));
        }
        trace!("bisecting [{}, {}]", left, right);

        segments.push(gauss_kronrod(&integrand, left, mid)?);
        segments.push(gauss_kronrod(&integrand, mid, right)?);
    }
}

fn finite(u: f64, value: f64) -> Result<f64, Error> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteIntegrand(u))
    }
}

/// Integral of `survival` from `start` to `t`, divided by the survival at `start`.
///
/// With `start = 0` and a survival callable equal to one at the origin this is the
/// restricted mean survival time `E[min(T, t)]`. A positive `start` conditions on
/// having survived to it. `t` may be infinite, in which case the survival must
/// decay before [`IntegrationParameters::tail_horizon`] or the integral is
/// reported as divergent.
pub fn restricted_mean<S>(
    survival: S,
    t: f64,
    start: f64,
    parameters: &IntegrationParameters,
) -> Result<f64, Error>
where
    S: Fn(f64) -> Result<f64, Error>,
{
    let t = check_time(t)?;
    let start = check_time(start)?;
    if start > t {
        return Err(Error::InvalidInterval(start, t));
    }
    if start == t {
        return Ok(0.);
    }

    let at_start = survival(start)?;
    if at_start <= 0. {
        return Err(Error::ZeroSurvivalAtStart(start));
    }

    if t.is_infinite() {
        let horizon = start + parameters.tail_horizon;
        let far = survival(horizon)?;
        if far > parameters.tail_tolerance {
            return Err(Error::NonDecayingSurvival(horizon, far));
        }
    }

    // u = start + x / (1 - x) maps [0, 1) onto [start, inf), so the nodes crowd
    // where the survival still changes however long the horizon is
    let span = t - start;
    let end = if span.is_infinite() { 1. } else { span / (1. + span) };
    let integral = integrate(
        |x: f64| {
            let complement = 1. - x;
            let u = start + x / complement;
            finite(u, survival(u)? / (complement * complement))
        },
        0.,
        end,
        parameters,
    )?;

    Ok(integral / at_start)
}
