use crate::{MathError, MathResult, Rational, number_theory::gcd_unsigned};

/// Number of decimal places a non-integral float is rounded to before its
/// digits are counted. Suppresses binary representation noise such as
/// `0.1 + 0.2 = 0.30000000000000004`.
const ROUNDING_PLACES: i32 = 9;

/// `2^127`, the smallest float magnitude that no longer fits in an `i128`.
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// One component of a ratio that hasn't been normalized yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Term {
    Int(i128),
    Float(f64),
}

impl Term {
    /// Whether the term is a finite float with a nonzero fractional part.
    fn is_fractional(self) -> bool {
        match self {
            Term::Int(_) => false,
            Term::Float(x) => x.is_finite() && x.fract() != 0.0,
        }
    }

    fn scale(self, decimals: u32) -> MathResult<Self> {
        match self {
            Term::Int(x) => {
                let factor = 10_i128
                    .checked_pow(decimals)
                    .ok_or_else(|| MathError::overflow_conversion::<u32, i128>(decimals))?;
                x.checked_mul(factor)
                    .map(Term::Int)
                    .ok_or_else(|| MathError::overflow_mul(x, factor))
            },
            Term::Float(x) => Ok(Term::Float(x * 10_f64.powi(decimals as i32))),
        }
    }

    /// Convert to an integer. `None` if the term is a non-finite float.
    fn into_int(self) -> MathResult<Option<i128>> {
        match self {
            Term::Int(x) => Ok(Some(x)),
            Term::Float(x) if !x.is_finite() => Ok(None),
            Term::Float(x) if x.abs() >= I128_BOUND => {
                Err(MathError::overflow_conversion::<f64, i128>(x))
            },
            // Float elimination has already made the value integral; `trunc`
            // only discards a sign on negative zero.
            Term::Float(x) => Ok(Some(x.trunc() as i128)),
        }
    }
}

impl From<i128> for Term {
    fn from(x: i128) -> Self {
        Term::Int(x)
    }
}

impl From<f64> for Term {
    fn from(x: f64) -> Self {
        Term::Float(x)
    }
}

/// A numerator/denominator pair awaiting normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Pending {
    pub numerator: Term,
    pub denominator: Term,
}

impl Pending {
    pub fn new<N, D>(numerator: N, denominator: D) -> Self
    where
        N: Into<Term>,
        D: Into<Term>,
    {
        Self {
            numerator: numerator.into(),
            denominator: denominator.into(),
        }
    }

    /// Reduce the pair to its canonical form.
    ///
    /// Fractional floats are cleared first, denominator then numerator. Each
    /// pass computes its own power-of-ten factor and applies it to the other
    /// component as well, so when both are fractional the numerator ends up
    /// absorbing the denominator's factor and vice versa.
    pub fn normalize(mut self) -> MathResult<Rational> {
        if self.denominator.is_fractional() {
            let (cleared, decimals) = clear_fraction(self.denominator);
            self.denominator = cleared;
            self.numerator = self.numerator.scale(decimals)?;
        }

        if self.numerator.is_fractional() {
            let (cleared, decimals) = clear_fraction(self.numerator);
            self.numerator = cleared;
            self.denominator = self.denominator.scale(decimals)?;
        }

        match (self.numerator.into_int()?, self.denominator.into_int()?) {
            (Some(numerator), Some(denominator)) => canonicalize(numerator, denominator),
            _ => Ok(Rational::NAN),
        }
    }
}

/// Scale a fractional float up to an integer. Returns the integral value and
/// the number of decimal places it was shifted by.
fn clear_fraction(term: Term) -> (Term, u32) {
    let Term::Float(x) = term else {
        return (term, 0);
    };

    let decimals = decimal_places(round_to_places(x, ROUNDING_PLACES));
    let cleared = round_half_up(x * 10_f64.powi(decimals as i32));

    (Term::Float(cleared), decimals)
}

/// Reduce an integer pair by its gcd and move the sign onto the numerator.
/// A zero denominator yields NaN.
pub(crate) fn canonicalize(numerator: i128, denominator: i128) -> MathResult<Rational> {
    if denominator == 0 {
        return Ok(Rational::NAN);
    }

    let negative = (numerator < 0) != (denominator < 0);
    let numerator_abs = numerator.unsigned_abs();
    let denominator_abs = denominator.unsigned_abs();

    // Can't be zero, because the denominator isn't.
    let divisor = gcd_unsigned(numerator_abs, denominator_abs);
    let numerator_abs = numerator_abs / divisor;
    let denominator_abs = denominator_abs / divisor;

    let numerator = if negative {
        0_i128.checked_sub_unsigned(numerator_abs)
    } else {
        i128::try_from(numerator_abs).ok()
    }
    .ok_or_else(|| MathError::overflow_conversion::<u128, i128>(numerator_abs))?;

    let denominator = i128::try_from(denominator_abs)
        .map_err(|_| MathError::overflow_conversion::<u128, i128>(denominator_abs))?;

    Ok(Rational::from_canonical(numerator, denominator))
}

/// Round half toward positive infinity, the way `Math.round` does in
/// ECMAScript. Differs from [`f64::round`] on negative ties: `-2.5` rounds to
/// `-2`, not `-3`.
pub(crate) fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

fn round_to_places(x: f64, places: i32) -> f64 {
    let scalar = 10_f64.powi(places);
    round_half_up(x * scalar) / scalar
}

/// Number of digits after the decimal point in the shortest representation
/// of `x` that round-trips. Rust never renders an `f64` in exponent form, so
/// this also holds for tiny values such as `1e-7`.
fn decimal_places(x: f64) -> u32 {
    x.to_string()
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len() as u32)
}

// ----------------------------------- tests -----------------------------------
