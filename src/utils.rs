//! Real-root finders for the low-degree polynomials minimal solvers produce.
//!
//! Coefficients are passed in ascending order of degree, `c[k]` multiplying
//! `x^k`, matching the layout of the cubic built by the seven-point solver.

use std::f64::consts::PI;

use nalgebra::{Matrix3, Schur};

/// Solve a monic cubic equation: x^3 + c2*x^2 + c1*x + c0 = 0
///
/// Returns the number of real roots found (1 or 3) and stores them in `roots`.
/// A triple root is reported once.
pub fn solve_cubic_real(c2: f64, c1: f64, c0: f64, roots: &mut [f64; 3]) -> usize {
    let a = c1 - c2 * c2 / 3.0;
    let b = (2.0 * c2 * c2 * c2 - 9.0 * c2 * c1) / 27.0 + c0;
    let mut c = b * b / 4.0 + a * a * a / 27.0;

    let n_roots = if c > 0.0 {
        c = c.sqrt();
        let b_neg = -0.5 * b;
        roots[0] = (b_neg + c).cbrt() + (b_neg - c).cbrt() - c2 / 3.0;
        1
    } else if a == 0.0 {
        // c <= 0 with a == 0 forces b == 0.
        roots[0] = -c2 / 3.0;
        1
    } else {
        // Rounding can push the cosine argument just outside [-1, 1].
        c = (3.0 * b / (2.0 * a) * (-3.0 / a).sqrt()).clamp(-1.0, 1.0);
        let d = 2.0 * (-a / 3.0).sqrt();
        let acos_c = c.acos();
        roots[0] = d * (acos_c / 3.0).cos() - c2 / 3.0;
        roots[1] = d * (acos_c / 3.0 - 2.0 * PI / 3.0).cos() - c2 / 3.0;
        roots[2] = d * (acos_c / 3.0 - 4.0 * PI / 3.0).cos() - c2 / 3.0;
        3
    };

    // Single Newton iteration for refinement
    for root in roots.iter_mut().take(n_roots) {
        let x = *root;
        let x2 = x * x;
        let x3 = x * x2;
        let derivative = 3.0 * x2 + 2.0 * c2 * x + c1;
        if derivative != 0.0 {
            *root -= (x3 + c2 * x2 + c1 * x + c0) / derivative;
        }
    }

    n_roots
}

/// Real roots of `c[0] + c[1]*x + c[2]*x^2`, sorted ascending.
///
/// Degrades to the linear case when the quadratic coefficient vanishes
/// relative to the others. The zero polynomial and polynomials with
/// non-finite coefficients have no roots.
pub fn real_roots_quadratic(c: &[f64; 3]) -> Vec<f64> {
    if c.iter().any(|v| !v.is_finite()) {
        return Vec::new();
    }
    let scale = c.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return Vec::new();
    }
    let tol = f64::EPSILON * scale;

    let [c0, c1, c2] = *c;
    if c2.abs() <= tol {
        if c1.abs() <= tol {
            return Vec::new();
        }
        return vec![-c0 / c1];
    }

    let discriminant = c1 * c1 - 4.0 * c2 * c0;
    if discriminant < 0.0 {
        return Vec::new();
    }
    if discriminant == 0.0 {
        return vec![-c1 / (2.0 * c2)];
    }

    // Avoid cancellation between c1 and the square root.
    let q = -0.5 * (c1 + discriminant.sqrt().copysign(c1));
    let mut roots = vec![q / c2];
    if q != 0.0 {
        roots.push(c0 / q);
    }
    roots.sort_by(f64::total_cmp);
    roots
}

/// Real roots of `c[0] + c[1]*x + c[2]*x^2 + c[3]*x^3`, sorted ascending.
///
/// When the cubic coefficient vanishes relative to the others the polynomial
/// is solved as a quadratic (or linear) one instead. Otherwise the roots are
/// read off the eigenvalues of the companion matrix, polished with Newton
/// steps on the original polynomial, and kept only when the residual is at
/// rounding level. A double root found as a nearly real conjugate pair is
/// reported once.
pub fn real_roots_cubic(c: &[f64; 4]) -> Vec<f64> {
    if c.iter().any(|v| !v.is_finite()) {
        return Vec::new();
    }
    let scale = c.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return Vec::new();
    }
    if c[3].abs() <= f64::EPSILON * scale {
        return real_roots_quadratic(&[c[0], c[1], c[2]]);
    }

    // Work in y = 1/x when the constant term dominates, so that dividing by
    // the leading coefficient never inflates the monic coefficients.
    let reversed = c[3].abs() < c[0].abs();
    let (lead, m2, m1, m0) = if reversed {
        (c[0], c[1], c[2], c[3])
    } else {
        (c[3], c[2], c[1], c[0])
    };

    let mut roots: Vec<f64> = companion_real_eigenvalues(m2 / lead, m1 / lead, m0 / lead)
        .into_iter()
        .filter_map(|y| match reversed {
            // y = 0 would need c[3] = 0, which was handled above.
            true if y == 0.0 => None,
            true => Some(1.0 / y),
            false => Some(y),
        })
        .map(|x| newton_polish(c, x))
        .filter(|&x| x.is_finite() && is_root(c, x))
        .collect();
    roots.sort_by(f64::total_cmp);
    roots
}

/// Relative imaginary part up to which a companion eigenvalue is treated as
/// a perturbed real root. Repeated roots split by about `EPSILON^(1/k)`.
const IMAGINARY_TOLERANCE: f64 = 1e-5;
/// Largest accepted `|p(x)|` relative to `sum |c_k x^k|`.
const RESIDUAL_TOLERANCE: f64 = 1e3 * f64::EPSILON;
const NEWTON_ITERATIONS: usize = 8;
const SCHUR_MAX_ITERATIONS: usize = 100;

/// Real parts of the (nearly) real eigenvalues of the companion matrix of
/// the monic cubic `x^3 + m2*x^2 + m1*x + m0`.
fn companion_real_eigenvalues(m2: f64, m1: f64, m0: f64) -> Vec<f64> {
    #[rustfmt::skip]
    let companion = Matrix3::new(
        -m2, -m1, -m0,
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
    );

    match Schur::try_new(companion, f64::EPSILON, SCHUR_MAX_ITERATIONS) {
        Some(schur) => {
            let mut values: Vec<f64> = schur
                .complex_eigenvalues()
                .iter()
                .filter(|z| {
                    // Only the upper member of a conjugate pair is kept. A 2x2
                    // block whose discriminant rounded positive yields NaN here.
                    z.im == 0.0
                        || z.im.is_nan()
                        || (z.im > 0.0 && z.im <= IMAGINARY_TOLERANCE * z.re.abs().max(1.0))
                })
                .map(|z| z.re)
                .collect();
            values.dedup();
            values
        }
        None => {
            let mut buffer = [0.0; 3];
            let n_roots = solve_cubic_real(m2, m1, m0, &mut buffer);
            buffer[..n_roots].to_vec()
        }
    }
}

fn evaluate(c: &[f64; 4], x: f64) -> f64 {
    ((c[3] * x + c[2]) * x + c[1]) * x + c[0]
}

/// Newton iterations on `c`, stopping as soon as a step fails to shrink the
/// residual.
fn newton_polish(c: &[f64; 4], mut x: f64) -> f64 {
    let mut residual = evaluate(c, x).abs();
    for _ in 0..NEWTON_ITERATIONS {
        let derivative = (3.0 * c[3] * x + 2.0 * c[2]) * x + c[1];
        if residual == 0.0 || derivative == 0.0 {
            break;
        }
        let next = x - evaluate(c, x) / derivative;
        let next_residual = evaluate(c, next).abs();
        if next_residual.is_nan() || next_residual >= residual {
            break;
        }
        x = next;
        residual = next_residual;
    }
    x
}

fn is_root(c: &[f64; 4], x: f64) -> bool {
    let a = x.abs();
    let magnitude = ((c[3].abs() * a + c[2].abs()) * a + c[1].abs()) * a + c[0].abs();
    let residual = evaluate(c, x).abs();
    residual.is_finite() && residual <= RESIDUAL_TOLERANCE * magnitude
}
