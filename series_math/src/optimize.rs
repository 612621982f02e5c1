//! Scalar minimization
//!
//! Downhill bracketing followed by Brent's parabolic/golden-section search.
//! Used to maximize the Box-Cox log-likelihood over lambda.

use crate::{MathError, Result};

const GOLD: f64 = 1.618_034;
const GROW_LIMIT: f64 = 110.0;
const VERY_SMALL: f64 = 1e-21;
const BRACKET_MAX_ITER: usize = 1000;

const CGOLD: f64 = 0.381_966_0;
const MIN_TOL: f64 = 1.0e-11;
const TOL: f64 = 1.48e-8;
const BRENT_MAX_ITER: usize = 500;

/// Three points `a`, `b`, `c` with `f(b)` below both `f(a)` and `f(c)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Search downhill from `xa`, `xb` until a minimum is bracketed
pub fn bracket<F>(f: F, xa: f64, xb: f64) -> Result<Bracket>
where
    F: Fn(f64) -> f64,
{
    let (mut xa, mut xb) = (xa, xb);
    let mut fa = f(xa);
    let mut fb = f(xb);
    if fa < fb {
        std::mem::swap(&mut xa, &mut xb);
        std::mem::swap(&mut fa, &mut fb);
    }

    let mut xc = xb + GOLD * (xb - xa);
    let mut fc = f(xc);
    let mut iter = 0;

    while fc < fb {
        let tmp1 = (xb - xa) * (fb - fc);
        let tmp2 = (xb - xc) * (fb - fa);
        let val = tmp2 - tmp1;
        let denom = if val.abs() < VERY_SMALL {
            2.0 * VERY_SMALL
        } else {
            2.0 * val
        };
        let mut w = xb - ((xb - xc) * tmp2 - (xb - xa) * tmp1) / denom;
        let wlim = xb + GROW_LIMIT * (xc - xb);

        if iter > BRACKET_MAX_ITER {
            return Err(MathError::CalculationError(
                "Too many iterations while bracketing a minimum".to_string(),
            ));
        }
        iter += 1;

        let mut fw;
        if (w - xc) * (xb - w) > 0.0 {
            fw = f(w);
            if fw < fc {
                return Ok(Bracket { a: xb, b: w, c: xc });
            } else if fw > fb {
                return Ok(Bracket { a: xa, b: xb, c: w });
            }
            w = xc + GOLD * (xc - xb);
            fw = f(w);
        } else if (w - wlim) * (wlim - xc) >= 0.0 {
            w = wlim;
            fw = f(w);
        } else if (w - wlim) * (xc - w) > 0.0 {
            fw = f(w);
            if fw < fc {
                xb = xc;
                xc = w;
                w = xc + GOLD * (xc - xb);
                fb = fc;
                fc = fw;
                fw = f(w);
            }
        } else {
            w = xc + GOLD * (xc - xb);
            fw = f(w);
        }

        xa = xb;
        xb = xc;
        xc = w;
        fa = fb;
        fb = fc;
        fc = fw;
    }

    if !fb.is_finite() {
        return Err(MathError::CalculationError(
            "Objective is not finite around the starting points".to_string(),
        ));
    }

    Ok(Bracket { a: xa, b: xb, c: xc })
}

/// Minimize `f` with Brent's method inside `bracket`; returns `(x, f(x))`
pub fn brent<F>(f: F, bracket: Bracket) -> Result<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let (mut a, mut b) = if bracket.a < bracket.c {
        (bracket.a, bracket.c)
    } else {
        (bracket.c, bracket.a)
    };

    let mut x = bracket.b;
    let mut w = x;
    let mut v = x;
    let mut fx = f(x);
    let mut fw = fx;
    let mut fv = fx;
    let mut deltax: f64 = 0.0;
    let mut rat: f64 = 0.0;

    for _ in 0..BRENT_MAX_ITER {
        let tol1 = TOL * x.abs() + MIN_TOL;
        let tol2 = 2.0 * tol1;
        let xmid = 0.5 * (a + b);

        if (x - xmid).abs() < tol2 - 0.5 * (b - a) {
            return Ok((x, fx));
        }

        if deltax.abs() <= tol1 {
            deltax = if x >= xmid { a - x } else { b - x };
            rat = CGOLD * deltax;
        } else {
            // parabolic step through x, w, v
            let tmp1 = (x - w) * (fx - fv);
            let mut tmp2 = (x - v) * (fx - fw);
            let mut p = (x - v) * tmp2 - (x - w) * tmp1;
            tmp2 = 2.0 * (tmp2 - tmp1);
            if tmp2 > 0.0 {
                p = -p;
            }
            tmp2 = tmp2.abs();
            let dx_temp = deltax;
            deltax = rat;

            if p > tmp2 * (a - x) && p < tmp2 * (b - x) && p.abs() < (0.5 * tmp2 * dx_temp).abs() {
                rat = p / tmp2;
                let u = x + rat;
                if (u - a) < tol2 || (b - u) < tol2 {
                    rat = if xmid - x >= 0.0 { tol1 } else { -tol1 };
                }
            } else {
                deltax = if x >= xmid { a - x } else { b - x };
                rat = CGOLD * deltax;
            }
        }

        let u = if rat.abs() < tol1 {
            if rat >= 0.0 {
                x + tol1
            } else {
                x - tol1
            }
        } else {
            x + rat
        };
        let fu = f(u);

        if fu > fx {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                w = u;
                fv = fw;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        } else {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            w = x;
            x = u;
            fv = fw;
            fw = fx;
            fx = fu;
        }
    }

    Ok((x, fx))
}

/// Minimize `f` starting from the two points `xa`, `xb`
pub fn minimize_scalar<F>(f: F, xa: f64, xb: f64) -> Result<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let found = bracket(&f, xa, xb)?;
    brent(&f, found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_quadratic_minimum() {
        let (x, fx) = minimize_scalar(|x| (x - 0.7).powi(2) + 3.0, -2.0, 2.0).unwrap();
        assert_abs_diff_eq!(x, 0.7, epsilon = 1e-6);
        assert_abs_diff_eq!(fx, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_minimum_outside_starting_points() {
        let (x, _) = minimize_scalar(|x| (x - 9.5).powi(2), -2.0, 2.0).unwrap();
        assert_abs_diff_eq!(x, 9.5, epsilon = 1e-6);
    }

    #[test]
    fn test_bracket_contains_minimum() {
        let f = |x: f64| (x + 4.0).powi(2);
        let found = bracket(f, -2.0, 2.0).unwrap();
        let (lo, hi) = if found.a < found.c {
            (found.a, found.c)
        } else {
            (found.c, found.a)
        };
        assert!(lo < -4.0 && -4.0 < hi);
        assert!(f(found.b) <= f(found.a) && f(found.b) <= f(found.c));
    }
}
