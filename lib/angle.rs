//! Rotation angles written as exact rational multiples of π.
//!
//! Gate parameters arrive as plain floating-point numbers. When an angle is
//! close enough to *n*/*d* × π for a small denominator *d*, it is written using
//! Typst math notation (`pi / 4`, `(3 pi) / 4`, `-3 pi`, ...); otherwise it is
//! written as a decimal literal.

use std::{ f64::consts::PI, fmt };
use num_rational::Rational64 as R64;
use num_traits::Zero;

/// Largest denominator accepted for a rational multiple of π.
pub const MAX_DENOM: i64 = 1000;

/// Largest distance (in units of π) between an angle and its rational
/// approximation for the approximation to be used.
pub const TOLERANCE: f64 = 1e-9;

// bound on continued fraction terms; convergents of any f64 settle well
// before this
const MAX_TERMS: usize = 64;

// convert a rational number to a floating-point number.
pub(crate) fn r2f(a: R64) -> f64 { *a.numer() as f64 / *a.denom() as f64 }

/// Return the closest rational number to `x` with denominator at most
/// `max_denom`.
///
/// This walks the continued fraction expansion of `x` and, once the next
/// convergent would exceed the bound, compares the last convergent with the
/// best semiconvergent.
///
/// Returns `None` if `x` is not finite, if `max_denom < 1`, or if `|x|` is
/// too large for an `i64` numerator.
///
/// ```
/// # use num_rational::Rational64;
/// # use quill_draw::angle::best_rational;
/// assert_eq!(best_rational(0.75, 100), Some(Rational64::new(3, 4)));
/// assert_eq!(best_rational(std::f64::consts::PI, 10), Some(Rational64::new(22, 7)));
/// assert_eq!(best_rational(-2.5, 10), Some(Rational64::new(-5, 2)));
/// ```
pub fn best_rational(x: f64, max_denom: i64) -> Option<R64> {
    if !x.is_finite() || max_denom < 1 { return None; }
    let (mut p0, mut q0, mut p1, mut q1): (i64, i64, i64, i64) = (0, 1, 1, 0);
    let mut rem = x;
    for _ in 0..MAX_TERMS {
        let a = rem.floor();
        if a.abs() >= i64::MAX as f64 { break; }
        let a = a as i64;
        let Some(q2) = a.checked_mul(q1).and_then(|aq| aq.checked_add(q0))
            else { break; };
        if q2 > max_denom { break; }
        let Some(p2) = a.checked_mul(p1).and_then(|ap| ap.checked_add(p0))
            else { break; };
        (p0, q0, p1, q1) = (p1, q1, p2, q2);
        let frac = rem - rem.floor();
        if frac < f64::EPSILON { return Some(R64::new(p1, q1)); }
        rem = frac.recip();
    }
    // first term too large for an i64
    if q1 == 0 { return None; }
    let k = (max_denom - q0) / q1;
    let conv = R64::new(p1, q1);
    let Some(semi_numer) = k.checked_mul(p1).and_then(|kp| kp.checked_add(p0))
        else { return Some(conv); };
    if k == 0 { return Some(conv); }
    let semi = R64::new(semi_numer, q0 + k * q1);
    if (r2f(conv) - x).abs() <= (r2f(semi) - x).abs() {
        Some(conv)
    } else {
        Some(semi)
    }
}

/// A rotation angle, in radians.
///
/// The [`Display`][fmt::Display] implementation produces the Typst math form
/// of the angle:
/// ```
/// # use std::f64::consts::PI;
/// # use quill_draw::angle::Angle;
/// assert_eq!(Angle(0.0).to_string(),              "0"         );
/// assert_eq!(Angle(PI).to_string(),               "pi"        );
/// assert_eq!(Angle(-PI).to_string(),              "-pi"       );
/// assert_eq!(Angle(PI / 2.0).to_string(),         "pi / 2"    );
/// assert_eq!(Angle(3.0 * PI / 4.0).to_string(),   "(3 pi) / 4");
/// assert_eq!(Angle(-PI / 4.0).to_string(),        "-pi / 4"   );
/// assert_eq!(Angle(-3.0 * PI).to_string(),        "-3 pi"     );
/// assert_eq!(Angle(0.1).to_string(),              "0.1"       );
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Angle(pub f64);

impl From<f64> for Angle {
    fn from(f: f64) -> Self { Self(f) }
}

impl From<Angle> for f64 {
    fn from(ang: Angle) -> Self { ang.0 }
}

impl Angle {
    /// Return `r` such that `self` is `r × π`, if `r` has a denominator of at
    /// most [`MAX_DENOM`] and lies within [`TOLERANCE`] of the exact value.
    pub fn as_pi_fraction(self) -> Option<R64> {
        let x = self.0 / PI;
        best_rational(x, MAX_DENOM)
            .filter(|r| (r2f(*r) - x).abs() <= TOLERANCE)
    }

    /// Return `true` if `self` is exactly zero.
    pub fn is_zero(self) -> bool { self.0 == 0.0 }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() { return f.write_str("0"); }
        let Some(r) = self.as_pi_fraction() else {
            return write!(f, "{}", self.0);
        };
        if r.is_zero() { return f.write_str("0"); }
        let n = *r.numer();
        let d = *r.denom();
        match (n, d) {
            (1, 1) => f.write_str("pi"),
            (-1, 1) => f.write_str("-pi"),
            (1, d) => write!(f, "pi / {}", d),
            (-1, d) => write!(f, "-pi / {}", d),
            (n, 1) => write!(f, "{} pi", n),
            (n, d) => write!(f, "({} pi) / {}", n, d),
        }
    }
}

/// Shorthand for `Angle(theta).to_string()`.
pub fn as_fraction_of_pi(theta: f64) -> String { Angle(theta).to_string() }
