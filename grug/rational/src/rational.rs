use {
    crate::{
        MathError, MathResult,
        normalize::{Pending, canonicalize},
    },
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{de, ser},
    std::{fmt, io, str::FromStr},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Repr {
    Ratio { numerator: i128, denominator: i128 },
    NaN,
}

/// An exact fraction of two signed 128-bit integers, always stored in lowest
/// terms with a positive denominator.
///
/// Operations that would leave a zero denominator, such as dividing by zero,
/// produce the [`Rational::NAN`] value instead of failing. Operations that
/// exceed the 128-bit range return [`MathError`] from their `checked_*`
/// variants, and panic from the operator traits.
///
/// ```rust
/// use {grug_rational::Rational, std::str::FromStr};
///
/// let a = Rational::new(1, 3);
/// let b = Rational::from_str("1/2").unwrap();
/// assert_eq!((a + b).to_string(), "5/6");
/// assert_eq!(Rational::new(10, -4).to_string(), "-2 1/2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational(Repr);

impl Rational {
    pub const NAN: Self = Self(Repr::NaN);
    pub const ONE: Self = Self::from_canonical(1, 1);
    pub const ZERO: Self = Self::from_canonical(0, 1);

    /// Caller must guarantee the pair is already reduced, with a positive
    /// denominator.
    pub(crate) const fn from_canonical(numerator: i128, denominator: i128) -> Self {
        Self(Repr::Ratio {
            numerator,
            denominator,
        })
    }

    /// Create a new [`Rational`] from an integer pair, reducing it to lowest
    /// terms.
    ///
    /// Panics if the reduced pair doesn't fit in `i128`, which only happens
    /// when one side is `i128::MIN`. Use [`Rational::checked_new`] to handle
    /// that case.
    pub fn new(numerator: i128, denominator: i128) -> Self {
        Self::checked_new(numerator, denominator).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn checked_new(numerator: i128, denominator: i128) -> MathResult<Self> {
        canonicalize(numerator, denominator)
    }

    /// Create a new [`Rational`] from a pair of possibly non-integral numbers.
    ///
    /// Each side is rounded to 9 decimal places and scaled by a power of ten
    /// until it is an integer, then the pair is reduced.
    ///
    /// ```rust
    /// use grug_rational::Rational;
    ///
    /// let half = Rational::checked_from_floats(1.5, 3.0).unwrap();
    /// assert_eq!(half, Rational::new(1, 2));
    /// ```
    pub fn checked_from_floats(numerator: f64, denominator: f64) -> MathResult<Self> {
        Pending::new(numerator, denominator).normalize()
    }

    pub fn checked_from_f64(value: f64) -> MathResult<Self> {
        Pending::new(value, 1_i128).normalize()
    }

    /// Numerator of the canonical form; zero for NaN.
    pub const fn numerator(&self) -> i128 {
        match self.0 {
            Repr::Ratio { numerator, .. } => numerator,
            Repr::NaN => 0,
        }
    }

    /// Denominator of the canonical form; zero for NaN, positive otherwise.
    pub const fn denominator(&self) -> i128 {
        match self.0 {
            Repr::Ratio { denominator, .. } => denominator,
            Repr::NaN => 0,
        }
    }

    /// The canonical `(numerator, denominator)` pair, or `None` for NaN.
    pub const fn parts(&self) -> Option<(i128, i128)> {
        match self.0 {
            Repr::Ratio {
                numerator,
                denominator,
            } => Some((numerator, denominator)),
            Repr::NaN => None,
        }
    }

    pub const fn is_nan(&self) -> bool {
        matches!(self.0, Repr::NaN)
    }

    pub const fn is_zero(&self) -> bool {
        matches!(self.0, Repr::Ratio { numerator: 0, .. })
    }

    pub const fn is_negative(&self) -> bool {
        self.numerator() < 0
    }

    pub fn to_f64(&self) -> f64 {
        match self.0 {
            Repr::Ratio {
                numerator,
                denominator,
            } => numerator as f64 / denominator as f64,
            Repr::NaN => f64::NAN,
        }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

// ------------------------------- conversions ---------------------------------

macro_rules! impl_from_integer {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for Rational {
                fn from(value: $t) -> Self {
                    Self::from_canonical(value.into(), 1)
                }
            }
        )+
    };
}

impl_from_integer! { i8, i16, i32, i64, i128, u8, u16, u32, u64 }

impl TryFrom<f64> for Rational {
    type Error = MathError;

    fn try_from(value: f64) -> MathResult<Self> {
        Self::checked_from_f64(value)
    }
}

impl TryFrom<f32> for Rational {
    type Error = MathError;

    fn try_from(value: f32) -> MathResult<Self> {
        Self::checked_from_f64(value.into())
    }
}

// ---------------------------------- serde ------------------------------------

impl ser::Serialize for Rational {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Rational {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(RationalVisitor)
    }
}

struct RationalVisitor;

impl de::Visitor<'_> for RationalVisitor {
    type Value = Rational;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string-encoded fraction")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Rational::from_str(v).map_err(E::custom)
    }
}

// ---------------------------------- borsh ------------------------------------

// Encoded as the canonical `(numerator, denominator)` pair, with NaN as
// `(0, 0)`. Non-canonical pairs are rejected on decoding, so every value has
// exactly one encoding.

impl BorshSerialize for Rational {
    fn serialize<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        BorshSerialize::serialize(&self.numerator(), writer)?;
        BorshSerialize::serialize(&self.denominator(), writer)
    }
}

impl BorshDeserialize for Rational {
    fn deserialize_reader<R>(reader: &mut R) -> io::Result<Self>
    where
        R: io::Read,
    {
        let numerator = i128::deserialize_reader(reader)?;
        let denominator = i128::deserialize_reader(reader)?;

        if numerator == 0 && denominator == 0 {
            return Ok(Self::NAN);
        }

        let rational = Self::checked_new(numerator, denominator)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        if rational.parts() != Some((numerator, denominator)) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("non-canonical fraction: {numerator}/{denominator}"),
            ));
        }

        Ok(rational)
    }
}

// ----------------------------------- tests -----------------------------------
