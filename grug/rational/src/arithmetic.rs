use {
    crate::{
        MathError, MathResult, Operand, Rational, normalize::canonicalize,
        number_theory::gcd_unsigned,
    },
    std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A working copy of a fraction's parts, owned by a single operation. It may
/// be rescaled in place; it is only turned back into a [`Rational`] through
/// normalization.
#[derive(Clone, Copy)]
struct Parts {
    numerator: i128,
    denominator: i128,
}

impl Parts {
    fn rescale(&mut self, factor: i128) -> MathResult<()> {
        self.numerator = checked_mul(self.numerator, factor)?;
        self.denominator = checked_mul(self.denominator, factor)?;
        Ok(())
    }

    fn normalize(self) -> MathResult<Rational> {
        canonicalize(self.numerator, self.denominator)
    }
}

fn checked_mul(a: i128, b: i128) -> MathResult<i128> {
    a.checked_mul(b).ok_or_else(|| MathError::overflow_mul(a, b))
}

/// Bring both operands over a shared denominator and combine the numerators.
///
/// The product of the two denominators is tried first. If that overflows and
/// the denominators have a common factor, it is retried over their least
/// common multiple instead. Both routes reduce to the same result.
fn over_common_denominator<F>(lhs: Parts, rhs: Parts, combine: F) -> MathResult<Rational>
where
    F: Fn(i128, i128) -> MathResult<i128>,
{
    cross_multiply(lhs, rhs, rhs.denominator, lhs.denominator, &combine).or_else(|err| {
        // Both denominators are positive, so their gcd fits in `i128`.
        let divisor = gcd_unsigned(lhs.denominator.unsigned_abs(), rhs.denominator.unsigned_abs());
        if divisor == 1 {
            return Err(err);
        }

        let divisor = divisor as i128;
        cross_multiply(lhs, rhs, rhs.denominator / divisor, lhs.denominator / divisor, &combine)
    })
}

fn cross_multiply<F>(
    mut lhs: Parts,
    rhs: Parts,
    lhs_factor: i128,
    rhs_factor: i128,
    combine: F,
) -> MathResult<Rational>
where
    F: FnOnce(i128, i128) -> MathResult<i128>,
{
    lhs.rescale(lhs_factor)?;
    lhs.numerator = combine(lhs.numerator, checked_mul(rhs.numerator, rhs_factor)?)?;
    lhs.normalize()
}

/// Split both operands into parts, or return `None` if either is NaN.
fn parts_of(lhs: Rational, rhs: Rational) -> Option<(Parts, Parts)> {
    let (ln, ld) = lhs.parts()?;
    let (rn, rd) = rhs.parts()?;

    Some((
        Parts {
            numerator: ln,
            denominator: ld,
        },
        Parts {
            numerator: rn,
            denominator: rd,
        },
    ))
}

impl Rational {
    /// Add two fractions over the product of their denominators, then reduce.
    ///
    /// The right-hand side can be anything that converts into an [`Operand`]:
    /// another `Rational`, an integer, a float, or a fraction string.
    ///
    /// ```rust
    /// use grug_rational::Rational;
    ///
    /// let sum = Rational::new(1, 3).checked_add("1/2").unwrap();
    /// assert_eq!(sum, Rational::new(5, 6));
    /// ```
    pub fn checked_add<'a, R>(self, rhs: R) -> MathResult<Self>
    where
        R: Into<Operand<'a>>,
    {
        let rhs = rhs.into().into_rational()?;
        let Some((lhs, rhs)) = parts_of(self, rhs) else {
            return Ok(Self::NAN);
        };

        over_common_denominator(lhs, rhs, |a, b| {
            a.checked_add(b).ok_or_else(|| MathError::overflow_add(a, b))
        })
    }

    pub fn checked_sub<'a, R>(self, rhs: R) -> MathResult<Self>
    where
        R: Into<Operand<'a>>,
    {
        let rhs = rhs.into().into_rational()?;
        let Some((lhs, rhs)) = parts_of(self, rhs) else {
            return Ok(Self::NAN);
        };

        over_common_denominator(lhs, rhs, |a, b| {
            a.checked_sub(b).ok_or_else(|| MathError::overflow_sub(a, b))
        })
    }

    pub fn checked_mul<'a, R>(self, rhs: R) -> MathResult<Self>
    where
        R: Into<Operand<'a>>,
    {
        let rhs = rhs.into().into_rational()?;
        let Some((lhs, rhs)) = parts_of(self, rhs) else {
            return Ok(Self::NAN);
        };

        Parts {
            numerator: checked_mul(lhs.numerator, rhs.numerator)?,
            denominator: checked_mul(lhs.denominator, rhs.denominator)?,
        }
        .normalize()
    }

    /// Divide by cross-multiplying. Dividing by zero yields [`Rational::NAN`].
    pub fn checked_div<'a, R>(self, rhs: R) -> MathResult<Self>
    where
        R: Into<Operand<'a>>,
    {
        let rhs = rhs.into().into_rational()?;
        let Some((lhs, rhs)) = parts_of(self, rhs) else {
            return Ok(Self::NAN);
        };

        Parts {
            numerator: checked_mul(lhs.numerator, rhs.denominator)?,
            denominator: checked_mul(lhs.denominator, rhs.numerator)?,
        }
        .normalize()
    }

    pub fn checked_neg(self) -> MathResult<Self> {
        match self.parts() {
            Some((numerator, denominator)) => numerator
                .checked_neg()
                .map(|negated| Self::from_canonical(negated, denominator))
                .ok_or_else(|| {
                    MathError::overflow_conversion::<u128, i128>(numerator.unsigned_abs())
                }),
            None => Ok(Self::NAN),
        }
    }

    /// Compare canonical forms after converting the right-hand side.
    ///
    /// Because every `Rational` is reduced, two values are equal exactly when
    /// their numerators and denominators are. NaN equals NaN.
    ///
    /// ```rust
    /// use grug_rational::Rational;
    ///
    /// assert!(Rational::new(7, 8).equals("0,875").unwrap());
    /// assert!(Rational::new(3, 2).equals("1 1/2").unwrap());
    /// assert!(!Rational::new(1, 3).equals(0.33).unwrap());
    /// ```
    pub fn equals<'a, R>(&self, rhs: R) -> MathResult<bool>
    where
        R: Into<Operand<'a>>,
    {
        rhs.into().into_rational().map(|rhs| *self == rhs)
    }
}

macro_rules! impl_binary_op {
    ($op:ident, $method:ident, $checked:ident, $op_assign:ident, $method_assign:ident) => {
        impl $op for Rational {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self::Output {
                self.$checked(rhs).unwrap_or_else(|err| panic!("{err}"))
            }
        }

        impl $op_assign for Rational {
            fn $method_assign(&mut self, rhs: Self) {
                *self = $op::$method(*self, rhs);
            }
        }
    };
}

impl_binary_op!(Add, add, checked_add, AddAssign, add_assign);
impl_binary_op!(Sub, sub, checked_sub, SubAssign, sub_assign);
impl_binary_op!(Mul, mul, checked_mul, MulAssign, mul_assign);
impl_binary_op!(Div, div, checked_div, DivAssign, div_assign);

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.checked_neg().unwrap_or_else(|err| panic!("{err}"))
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        crate::{MathError, Rational},
        proptest::prelude::*,
        test_case::test_case,
    };

    fn r(numerator: i128, denominator: i128) -> Rational {
        Rational::new(numerator, denominator)
    }

    #[test_case(r(1, 3), r(1, 2) => "5/6"; "thirds and halves")]
    #[test_case(r(-1, 3), r(1, 2) => "1/6"; "negative left")]
    #[test_case(r(1, 4), r(3, 4) => "1"; "to whole")]
    #[test_case(r(5, 3), r(-5, 3) => "0"; "to zero")]
    #[test_case(r(1, 6), r(1, 6) => "1/3"; "reduces")]
    fn add_works(lhs: Rational, rhs: Rational) -> String {
        lhs.checked_add(rhs).unwrap().to_string()
    }

    #[test_case(r(1, 2), r(1, 3) => r(1, 6); "positive")]
    #[test_case(r(1, 3), r(1, 2) => r(-1, 6); "negative")]
    #[test_case(r(-1, 2), r(-1, 2) => Rational::ZERO; "self")]
    fn sub_works(lhs: Rational, rhs: Rational) -> Rational {
        lhs.checked_sub(rhs).unwrap()
    }

    #[test_case(r(2, 3), r(3, 4) => r(1, 2); "reduces")]
    #[test_case(r(-2, 3), r(3, -4) => r(1, 2); "signs cancel")]
    #[test_case(r(5, 7), Rational::ZERO => Rational::ZERO; "by zero")]
    fn mul_works(lhs: Rational, rhs: Rational) -> Rational {
        lhs.checked_mul(rhs).unwrap()
    }

    #[test_case(r(2, 3), r(4, 9) => r(3, 2); "reduces")]
    #[test_case(r(1, 2), r(-1, 4) => r(-2, 1); "negative divisor")]
    #[test_case(Rational::ZERO, r(3, 5) => Rational::ZERO; "zero dividend")]
    fn div_works(lhs: Rational, rhs: Rational) -> Rational {
        lhs.checked_div(rhs).unwrap()
    }

    #[test]
    fn operands_of_every_kind() {
        let third = r(1, 3);
        assert_eq!(third.checked_add(1).unwrap(), r(4, 3));
        assert_eq!(third.checked_add("1 1/2").unwrap(), r(11, 6));
        assert_eq!(third.checked_sub(0.5).unwrap(), r(-1, 6));
        assert_eq!(third.checked_mul(0.5).unwrap(), r(1, 6));
        assert_eq!(third.checked_mul(String::from("3")).unwrap(), Rational::ONE);
        assert_eq!(third.checked_div(2_u8).unwrap(), r(1, 6));
        assert_eq!(third.checked_div(&r(2, 3)).unwrap(), r(1, 2));
    }

    #[test]
    fn operands_are_not_mutated() {
        let lhs = r(1, 3);
        let rhs = r(1, 2);
        let _ = lhs + rhs;
        let _ = lhs / rhs;
        assert_eq!(lhs, r(1, 3));
        assert_eq!(rhs, r(1, 2));
    }

    #[test]
    fn division_by_zero_is_nan() {
        assert!(r(1, 2).checked_div(0).unwrap().is_nan());
        assert!(Rational::ZERO.checked_div(Rational::ZERO).unwrap().is_nan());
        assert_eq!((r(3, 4) / Rational::ZERO).to_string(), "NaN");
    }

    #[test]
    fn nan_propagates() {
        let nan = Rational::NAN;
        assert!(nan.checked_add(1).unwrap().is_nan());
        assert!(r(1, 2).checked_sub(nan).unwrap().is_nan());
        assert!(nan.checked_mul(Rational::ZERO).unwrap().is_nan());
        assert!(r(1, 2).checked_div(nan).unwrap().is_nan());
        assert!((-nan).is_nan());
    }

    #[test]
    fn parse_errors_propagate() {
        assert!(matches!(
            r(1, 2).checked_add("half"),
            Err(MathError::ParseNumber { .. })
        ));
        assert!(r(1, 2).equals("1 2 3").is_err());
    }

    #[test]
    fn overflow_is_reported() {
        let big = Rational::from(i128::MAX);
        assert!(matches!(
            big.checked_add(1),
            Err(MathError::OverflowAdd { .. })
        ));
        assert!(matches!(
            Rational::from(i128::MIN).checked_sub(1),
            Err(MathError::OverflowSub { .. })
        ));
        assert!(matches!(big.checked_mul(2), Err(MathError::OverflowMul { .. })));
        assert!(matches!(
            r(1, 2).checked_add(r(1, i128::MAX)),
            Err(MathError::OverflowMul { .. })
        ));
        assert!(matches!(
            Rational::from(i128::MIN).checked_neg(),
            Err(MathError::OverflowConversion { .. })
        ));
    }

    #[test]
    fn shared_factors_avoid_overflow() {
        let tiny = r(1, 1 << 64);
        assert_eq!(tiny.checked_add(tiny).unwrap(), r(1, 1 << 63));
        assert_eq!(r(3, 1 << 64).checked_sub(tiny).unwrap(), r(1, 1 << 63));
        assert_eq!(
            r(1, 3 << 64).checked_add(r(1, 5 << 64)).unwrap(),
            r(8, 15 << 64)
        );

        // Coprime denominators have no smaller common multiple to fall back to.
        assert!(matches!(
            r(1, 1 << 64).checked_add(r(1, (1 << 64) + 1)),
            Err(MathError::OverflowMul { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "multiplication overflow")]
    fn operator_panics_on_overflow() {
        let _ = Rational::from(i128::MAX) * Rational::from(2);
    }

    #[test]
    fn assign_operators() {
        let mut x = r(1, 2);
        x += r(1, 3);
        assert_eq!(x, r(5, 6));
        x -= r(1, 6);
        assert_eq!(x, r(2, 3));
        x *= r(3, 4);
        assert_eq!(x, r(1, 2));
        x /= r(1, 4);
        assert_eq!(x, r(2, 1));
        assert_eq!(-x, r(-2, 1));
    }

    #[test_case(r(2, 9), r(2, 9) => true; "same")]
    #[test_case(r(2, 9), r(4, 18) => true; "reduced forms")]
    #[test_case(r(1, 3), r(-1, 3) => false; "sign differs")]
    #[test_case(Rational::NAN, Rational::NAN => true; "nan sentinel")]
    #[test_case(Rational::NAN, Rational::ZERO => false; "nan and zero")]
    fn equals_works(lhs: Rational, rhs: Rational) -> bool {
        assert_eq!(lhs.equals(rhs).unwrap(), rhs.equals(lhs).unwrap());
        lhs.equals(rhs).unwrap()
    }

    proptest! {
        /// Adding then subtracting the same value is the identity.
        #[test]
        fn add_sub_roundtrip(
            a in -1_000_000_i128..1_000_000,
            b in 1_i128..1_000_000,
            c in -1_000_000_i128..1_000_000,
            d in 1_i128..1_000_000,
        ) {
            let x = r(a, b);
            let y = r(c, d);
            prop_assert_eq!((x + y) - y, x);
            prop_assert_eq!(x + y, y + x);
        }

        /// Multiplying then dividing by the same nonzero value is the identity.
        #[test]
        fn mul_div_roundtrip(
            a in -1_000_000_i128..1_000_000,
            b in 1_i128..1_000_000,
            c in 1_i128..1_000_000,
            d in 1_i128..1_000_000,
        ) {
            let x = r(a, b);
            let y = r(c, d);
            prop_assert_eq!((x * y) / y, x);
        }
    }
}
