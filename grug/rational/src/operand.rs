use {
    crate::{MathResult, Rational},
    std::{borrow::Cow, str::FromStr},
};

/// Any value that can stand in for a [`Rational`] as the right-hand side of
/// an arithmetic operation, or as the argument of [`Rational::equals`].
///
/// Conversion into a `Rational` is deferred to [`Operand::into_rational`], so
/// that operations can accept strings and floats and still report parse or
/// overflow errors through their own `MathResult`.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<'a> {
    Existing(Rational),
    Integer(i128),
    Decimal(f64),
    Text(Cow<'a, str>),
}

impl Operand<'_> {
    pub fn into_rational(self) -> MathResult<Rational> {
        match self {
            Operand::Existing(rational) => Ok(rational),
            Operand::Integer(integer) => Ok(Rational::from(integer)),
            Operand::Decimal(decimal) => Rational::checked_from_f64(decimal),
            Operand::Text(text) => Rational::from_str(&text),
        }
    }
}

impl From<Rational> for Operand<'_> {
    fn from(rational: Rational) -> Self {
        Operand::Existing(rational)
    }
}

impl From<&Rational> for Operand<'_> {
    fn from(rational: &Rational) -> Self {
        Operand::Existing(*rational)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for Operand<'_> {
                fn from(integer: $t) -> Self {
                    Operand::Integer(integer.into())
                }
            }
        )+
    };
}

impl_from_integer! { i8, i16, i32, i64, i128, u8, u16, u32, u64 }

impl From<f32> for Operand<'_> {
    fn from(decimal: f32) -> Self {
        Operand::Decimal(decimal.into())
    }
}

impl From<f64> for Operand<'_> {
    fn from(decimal: f64) -> Self {
        Operand::Decimal(decimal)
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(text: &'a str) -> Self {
        Operand::Text(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a String> for Operand<'a> {
    fn from(text: &'a String) -> Self {
        Operand::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Operand<'_> {
    fn from(text: String) -> Self {
        Operand::Text(Cow::Owned(text))
    }
}

// ----------------------------------- tests -----------------------------------
