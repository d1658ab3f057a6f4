//! Bracketed scalar root finding.
//!
//! Geometry solves in this crate reduce to finding the zero of a scalar
//! residual, e.g. `f(L) = Q - U(L)·A(L)·ΔT_lm`. The residual may be expensive
//! (each evaluation can re-discretize an exchanger) and is only assumed
//! continuous, so the search is plain bisection over a bracket.
//!
//! When the initial bracket does not straddle the root, the search does not
//! give up immediately: it extrapolates a root estimate from the secant
//! through the bracket endpoints and retries with the bracket reflected
//! around that estimate, once from each original endpoint. Only when every
//! attempted bracket fails to produce a sign change is the failure reported,
//! along with the brackets that were tried.

use thiserror::Error;

/// Root search configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Maximum bisection iterations per bracket.
    pub max_iters: usize,
    /// Stop when the bracket half-width falls below this.
    pub x_tol: f64,
    /// Stop when the residual magnitude falls below this.
    pub f_tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 50,
            x_tol: 1e-7,
            f_tol: 1e-7,
        }
    }
}

/// A successfully located root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub x: f64,
    pub residual: f64,
    pub iterations: usize,
}

/// One bracket that was tried and rejected for lack of a sign change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketAttempt {
    pub bracket: [f64; 2],
    pub values: [f64; 2],
}

/// Errors from a bracketed root search.
#[derive(Debug, Error)]
pub enum RootError<E>
where
    E: std::error::Error + 'static,
{
    /// A bracket endpoint was not a finite number.
    #[error("invalid bracket [{0}, {1}]")]
    InvalidBracket(f64, f64),

    /// The residual evaluated to a non-finite value.
    #[error("residual is not finite at x = {x}")]
    NonFiniteResidual { x: f64 },

    /// No attempted bracket straddled a root.
    #[error("no sign change across any attempted bracket: {attempts:?}")]
    NoSignChange { attempts: Vec<BracketAttempt> },

    /// The iteration cap was reached before the tolerances were met.
    #[error(
        "root search did not converge within {iters} iterations \
         (bracket [{bracket:?}], residual {residual:e})"
    )]
    MaxIters {
        bracket: [f64; 2],
        residual: f64,
        iters: usize,
    },

    /// The residual function itself failed.
    #[error("residual evaluation failed")]
    Objective(#[source] E),
}

/// Finds a zero of `f` within `bracket`, retrying with secant-extrapolated
/// brackets when the endpoints do not straddle a root.
///
/// # Errors
///
/// Returns a [`RootError`] if the bracket is invalid, the residual fails or
/// becomes non-finite, no attempted bracket contains a sign change, or the
/// iteration cap is reached.
pub fn solve_bracketed<F, E>(
    mut f: F,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Root, RootError<E>>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: std::error::Error + 'static,
{
    let (a, b) = ordered(bracket[0], bracket[1])?;
    let f_a = eval(&mut f, a)?;
    let f_b = eval(&mut f, b)?;

    if f_a.abs() <= config.f_tol {
        return Ok(Root {
            x: a,
            residual: f_a,
            iterations: 0,
        });
    }
    if f_b.abs() <= config.f_tol {
        return Ok(Root {
            x: b,
            residual: f_b,
            iterations: 0,
        });
    }

    if f_a * f_b < 0.0 {
        return bisect(&mut f, a, b, f_a, config);
    }

    let mut attempts = vec![BracketAttempt {
        bracket: [a, b],
        values: [f_a, f_b],
    }];

    // The endpoints agree in sign, so extrapolate where the secant through
    // them crosses zero and retry with the bracket reflected around that
    // estimate, anchored first at `a`, then at `b`.
    let secant = a - f_a * (b - a) / (f_b - f_a);
    let estimate = if secant.is_finite() {
        secant
    } else {
        0.5 * (a + b)
    };

    for candidate in [[a, 2.0 * estimate - a], [b, 2.0 * estimate - b]] {
        let (lo, hi) = ordered(candidate[0], candidate[1])?;
        let f_lo = eval(&mut f, lo)?;
        let f_hi = eval(&mut f, hi)?;

        if f_lo.abs() <= config.f_tol {
            return Ok(Root {
                x: lo,
                residual: f_lo,
                iterations: 0,
            });
        }
        if f_hi.abs() <= config.f_tol {
            return Ok(Root {
                x: hi,
                residual: f_hi,
                iterations: 0,
            });
        }

        if f_lo * f_hi < 0.0 {
            return bisect(&mut f, lo, hi, f_lo, config);
        }

        attempts.push(BracketAttempt {
            bracket: [lo, hi],
            values: [f_lo, f_hi],
        });
    }

    Err(RootError::NoSignChange { attempts })
}

fn ordered<E: std::error::Error>(a: f64, b: f64) -> Result<(f64, f64), RootError<E>> {
    if !a.is_finite() || !b.is_finite() {
        return Err(RootError::InvalidBracket(a, b));
    }
    Ok(if a <= b { (a, b) } else { (b, a) })
}

fn eval<F, E>(f: &mut F, x: f64) -> Result<f64, RootError<E>>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: std::error::Error + 'static,
{
    let value = f(x).map_err(RootError::Objective)?;
    if value.is_nan() {
        return Err(RootError::NonFiniteResidual { x });
    }
    Ok(value)
}

fn bisect<F, E>(
    f: &mut F,
    mut lo: f64,
    mut hi: f64,
    mut f_lo: f64,
    config: &Config,
) -> Result<Root, RootError<E>>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: std::error::Error + 'static,
{
    let mut residual = f_lo;
    for iteration in 1..=config.max_iters {
        let mid = 0.5 * (lo + hi);
        let f_mid = eval(f, mid)?;
        residual = f_mid;

        if f_mid.abs() <= config.f_tol || 0.5 * (hi - lo) <= config.x_tol {
            return Ok(Root {
                x: mid,
                residual: f_mid,
                iterations: iteration,
            });
        }

        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Err(RootError::MaxIters {
        bracket: [lo, hi],
        residual,
        iters: config.max_iters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("evaluation blew up")]
    struct TestError;

    fn ok(f: impl Fn(f64) -> f64) -> impl FnMut(f64) -> Result<f64, TestError> {
        move |x| Ok(f(x))
    }

    #[test]
    fn finds_a_simple_root() {
        let root = solve_bracketed(ok(|x| x * x - 4.0), [0.0, 10.0], &Config::default()).unwrap();
        assert_relative_eq!(root.x, 2.0, epsilon = 1e-6);
        assert!(root.iterations > 0);
    }

    #[test]
    fn handles_reversed_brackets() {
        let root = solve_bracketed(ok(|x| x - 1.5), [10.0, 0.0], &Config::default()).unwrap();
        assert_relative_eq!(root.x, 1.5, epsilon = 1e-6);
    }

    #[test]
    fn recovers_from_a_same_sign_bracket() {
        // f is negative across [0, 3]; the secant through the endpoints
        // points at x = 5, and the reflected bracket [0, 10] contains it.
        let root = solve_bracketed(ok(|x| x - 5.0), [0.0, 3.0], &Config::default()).unwrap();
        assert_relative_eq!(root.x, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn reports_every_attempted_bracket() {
        let err = solve_bracketed(ok(|x| x * x + 1.0), [0.0, 1.0], &Config::default()).unwrap_err();
        match err {
            RootError::NoSignChange { attempts } => {
                assert_eq!(attempts.len(), 3);
                assert_eq!(attempts[0].bracket, [0.0, 1.0]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn stops_at_the_iteration_cap() {
        let config = Config {
            max_iters: 2,
            x_tol: 0.0,
            f_tol: 0.0,
        };
        let err = solve_bracketed(ok(|x| x - 0.3), [0.0, 1.0], &config).unwrap_err();
        assert!(matches!(err, RootError::MaxIters { iters: 2, .. }));
    }

    #[test]
    fn propagates_objective_failures() {
        let err = solve_bracketed(
            |x: f64| if x > 5.0 { Err(TestError) } else { Ok(x - 1.0) },
            [0.0, 10.0],
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RootError::Objective(TestError)));
    }

    #[test]
    fn rejects_non_finite_brackets() {
        let err =
            solve_bracketed(ok(|x| x), [0.0, f64::INFINITY], &Config::default()).unwrap_err();
        assert!(matches!(err, RootError::InvalidBracket(..)));
    }
}
