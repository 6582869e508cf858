//! Closed-form polynomial root solvers.
//!
//! Every solver returns a fixed-size array of complex roots so that real,
//! repeated and complex-conjugate roots go through one code path and nothing
//! is allocated. Callers that only care about real solutions take the real
//! part of each root and filter the candidates themselves.
//!
//! A leading coefficient of zero makes the formulas singular. Instead of
//! dividing by zero the solvers return a sentinel array of NaN roots, which
//! [`is_sentinel`] detects.
//!
//! Ferrari's method loses digits when the quartic's coefficients span many
//! orders of magnitude, so quartic roots get at most four Newton steps on the
//! original polynomial before they are returned. The cubic stays purely
//! closed-form.

use num_complex::Complex;

/// Imaginary part (relative to the root's modulus) below which a resolvent
/// root counts as real.
const REAL_AXIS_EPS: f64 = 1e-7;

/// Depressed quartics whose linear term is this small relative to the others
/// are solved as biquadratics; the Newton steps restore the dropped term.
const BIQUADRATIC_EPS: f64 = 1e-12;

const POLISH_STEPS: usize = 4;

const NAN: Complex<f64> = Complex::new(f64::NAN, f64::NAN);
const ZERO: Complex<f64> = Complex::new(0.0, 0.0);

/// GSL sign convention: `-0.0` counts as positive.
fn sgn(num: f64) -> f64 {
    if num >= -0.0 {
        1.0
    } else {
        -1.0
    }
}

/// True when `roots` is the NaN sentinel returned for a singular polynomial.
pub fn is_sentinel(roots: &[Complex<f64>]) -> bool {
    roots.iter().all(|root| root.is_nan())
}

/// Solves `a*x^2 + b*x + c = 0`.
///
/// Uses the cancellation-free form `q = -(b + sgn(b)*sqrt(disc))/2`,
/// `x1 = q/a`, `x2 = c/q`. Roots are returned in increasing order when real.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> [Complex<f64>; 2] {
    if a == 0.0 || !a.is_finite() {
        return [NAN; 2];
    }

    let disc = b * b - 4.0 * a * c;

    if disc < 0.0 {
        // Complex conjugate pair
        let re = -b / (2.0 * a);
        let im = (-disc).sqrt() / (2.0 * a).abs();
        return [Complex::new(re, -im), Complex::new(re, im)];
    }

    let temp = -0.5 * (b + sgn(b) * disc.sqrt());
    if temp == 0.0 {
        // b == 0 and c == 0: double root at the origin
        return [ZERO; 2];
    }

    let r1 = temp / a;
    let r2 = c / temp;
    if r1 < r2 {
        [r1.into(), r2.into()]
    } else {
        [r2.into(), r1.into()]
    }
}

/// Solves `a*x^3 + b*x^2 + c*x + d = 0` with the general Cardano formula.
///
/// Coefficients may be complex. The cube root radicand is built from the sign
/// choice with the larger modulus so the two Cardano terms never cancel. When
/// that radicand vanishes the cubic has a triple root at `-b/(3a)`.
pub fn solve_cubic(
    a: impl Into<Complex<f64>>,
    b: impl Into<Complex<f64>>,
    c: impl Into<Complex<f64>>,
    d: impl Into<Complex<f64>>,
) -> [Complex<f64>; 3] {
    let (a, b, c, d) = (a.into(), b.into(), c.into(), d.into());
    if a == ZERO || !a.is_finite() {
        return [NAN; 3];
    }

    let delta0 = b * b - a * c * 3.0;
    let delta1 = b.powi(3) * 2.0 - a * b * c * 9.0 + a * a * d * 27.0;
    let disc = (delta1 * delta1 - delta0.powi(3) * 4.0).sqrt();

    let plus = (delta1 + disc) * 0.5;
    let minus = (delta1 - disc) * 0.5;
    let radicand = if plus.norm() >= minus.norm() { plus } else { minus };
    let cc = cbrt(radicand);

    let a3 = a * 3.0;
    if cc == ZERO {
        let root = -b / a3;
        return [root; 3];
    }

    let unity = Complex::new(-0.5, 0.75f64.sqrt());
    let mut rot = Complex::new(1.0, 0.0);
    let mut roots = [ZERO; 3];
    for root in roots.iter_mut() {
        let ck = rot * cc;
        *root = -(b + ck + delta0 / ck) / a3;
        rot = rot * unity;
    }
    roots
}

/// Solves `a*x^4 + b*x^3 + c*x^2 + d*x + e = 0` with Ferrari's method.
///
/// The quartic is depressed to `y^4 + p*y^2 + q*y + r = 0` and split into two
/// quadratics through a root `m` of the resolvent cubic
/// `8m^3 + 8p*m^2 + (2p^2 - 8r)*m - q^2 = 0`. A positive real resolvent root
/// always exists when `q != 0` and is preferred for accuracy. When `q` is
/// zero up to rounding the quartic is treated as biquadratic.
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> [Complex<f64>; 4] {
    if a == 0.0 || !a.is_finite() {
        return [NAN; 4];
    }

    let (b, c, d, e) = (b / a, c / a, d / a, e / a);
    let shift = b / 4.0;
    let b2 = b * b;
    let p = c - 3.0 * b2 / 8.0;
    let q = d - b * c / 2.0 + b2 * b / 8.0;
    let r = e - b * d / 4.0 + b2 * c / 16.0 - 3.0 * b2 * b2 / 256.0;

    // q carries the rounding of the terms it was built from
    let q_noise = (d.abs() + (b * c).abs() / 2.0 + (b2 * b).abs() / 8.0)
        .max(p.abs().powf(1.5) + r.abs().powf(0.75));
    let ys = if q.abs() <= BIQUADRATIC_EPS * q_noise {
        biquadratic(p, r)
    } else {
        match resolvent_root(p, q, r) {
            Some(m) => ferrari(p, q, m),
            None => biquadratic(p, r),
        }
    };

    let mut roots = ys.map(|y| y - shift);
    polish(&[1.0, b, c, d, e].map(Complex::from), &mut roots);
    roots
}

/// Real cube root for a radicand on the real axis, principal root otherwise.
fn cbrt(z: Complex<f64>) -> Complex<f64> {
    if z.im == 0.0 {
        Complex::new(z.re.cbrt(), 0.0)
    } else {
        z.cbrt()
    }
}

fn resolvent_root(p: f64, q: f64, r: f64) -> Option<Complex<f64>> {
    let roots = solve_cubic(8.0, 8.0 * p, 2.0 * p * p - 8.0 * r, -q * q);
    if is_sentinel(&roots) {
        return None;
    }

    let real_positive = roots
        .iter()
        .filter(|m| m.is_finite() && m.im.abs() <= REAL_AXIS_EPS * m.norm())
        .map(|m| m.re)
        .filter(|&m| m > 0.0)
        .fold(None, |best: Option<f64>, m| Some(best.map_or(m, |b| b.max(m))));

    if let Some(m) = real_positive {
        return Some(m.into());
    }

    // Rounding pushed the real root off the axis; any non-zero root works.
    roots
        .iter()
        .copied()
        .filter(|m| m.is_finite() && *m != ZERO)
        .fold(None, |best: Option<Complex<f64>>, m| match best {
            Some(b) if b.norm() >= m.norm() => Some(b),
            _ => Some(m),
        })
}

fn ferrari(p: f64, q: f64, m: Complex<f64>) -> [Complex<f64>; 4] {
    let t = (m * 2.0).sqrt();
    let base = m * 2.0 + 2.0 * p;
    let k = Complex::from(2.0 * q) / t;
    let u1 = (-(base + k)).sqrt();
    let u2 = (-(base - k)).sqrt();
    [
        (t + u1) * 0.5,
        (t - u1) * 0.5,
        (-t + u2) * 0.5,
        (-t - u2) * 0.5,
    ]
}

fn biquadratic(p: f64, r: f64) -> [Complex<f64>; 4] {
    let disc = Complex::from(p * p - 4.0 * r).sqrt();
    let z1 = (disc - p) * 0.5;
    let z2 = (-disc - p) * 0.5;
    let (y1, y2) = (z1.sqrt(), z2.sqrt());
    [y1, -y1, y2, -y2]
}

/// Value and derivative of the polynomial with `coeffs` (highest degree
/// first) at `x`.
fn horner(coeffs: &[Complex<f64>], x: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
    let mut value = ZERO;
    let mut slope = ZERO;
    for &coeff in coeffs {
        slope = slope * x + value;
        value = value * x + coeff;
    }
    (value, slope)
}

/// Newton steps on every finite root. A step is only kept when it shrinks the
/// residual, so a multiple root (zero slope) is left where it is.
fn polish<const N: usize>(coeffs: &[Complex<f64>], roots: &mut [Complex<f64>; N]) {
    for root in roots.iter_mut().filter(|root| root.is_finite()) {
        let (mut value, mut slope) = horner(coeffs, *root);
        for _ in 0..POLISH_STEPS {
            if value == ZERO {
                break;
            }
            let next = *root - value / slope;
            let (next_value, next_slope) = horner(coeffs, next);
            if !next_value.is_finite() || next_value.norm() >= value.norm() {
                break;
            }
            *root = next;
            value = next_value;
            slope = next_slope;
        }
    }
}
