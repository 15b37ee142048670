use {
    crate::{
        MathError, MathResult, Rational,
        normalize::{Pending, Term},
    },
    std::str::FromStr,
};

/// The forms a fraction string can take.
#[derive(Debug, PartialEq)]
enum Shape<'a> {
    /// `"NaN"`, as rendered by `Display`.
    NaN,
    /// A number without a decimal separator, e.g. `"3"`, `"-12"` or `"1e2"`.
    Whole(&'a str),
    /// A decimal, e.g. `"0.25"`. A comma separator has already been replaced
    /// with a dot.
    Decimal(String),
    /// A simple fraction, e.g. `"7/8"` or `"1.5/2"`.
    Ratio {
        numerator: &'a str,
        denominator: &'a str,
    },
    /// A whole part followed by a fraction, e.g. `"1 2/3"` or `"-1 2/3"`.
    /// The sign of the whole part applies to the fraction as well.
    Mixed { whole: &'a str, fraction: &'a str },
}

fn classify(input: &str) -> MathResult<Shape<'_>> {
    let mut tokens = input.split_whitespace();
    let first = tokens.next();
    let second = tokens.next();

    if tokens.next().is_some() {
        return Err(MathError::parse_number::<Rational, _, _>(
            input,
            "expecting at most two whitespace-separated parts",
        ));
    }

    match (first, second) {
        (Some(whole), Some(fraction)) if is_integral(whole) && fraction.contains('/') => {
            if is_signed_fraction(fraction) {
                return Err(MathError::parse_number::<Rational, _, _>(
                    input,
                    "the fraction of a mixed number can't carry its own sign",
                ));
            }

            Ok(Shape::Mixed { whole, fraction })
        },
        (Some(_), Some(_)) => Err(MathError::parse_number::<Rational, _, _>(
            input,
            "expecting a whole number followed by a fraction",
        )),
        (Some("NaN"), None) => Ok(Shape::NaN),
        (Some(ratio), None) if ratio.contains('/') => {
            // Safe to unwrap because we just checked the string contains a slash.
            let (numerator, denominator) = ratio.split_once('/').unwrap();
            Ok(Shape::Ratio {
                numerator,
                denominator,
            })
        },
        (Some(decimal), None) if decimal.contains(['.', ',']) => {
            Ok(Shape::Decimal(with_dot_separator(decimal)))
        },
        (Some(whole), None) => Ok(Shape::Whole(whole)),
        (None, _) => Err(MathError::parse_number::<Rational, _, _>(
            input,
            "empty string",
        )),
    }
}

fn parse(input: &str) -> MathResult<Rational> {
    match classify(input)? {
        Shape::NaN => Ok(Rational::NAN),
        Shape::Whole(whole) => Pending::new(parse_term(whole)?, 1_i128).normalize(),
        Shape::Decimal(decimal) => decimal
            .parse::<f64>()
            .map_err(|err| MathError::parse_number::<Rational, _, _>(input, err))
            .and_then(Rational::checked_from_f64),
        Shape::Ratio {
            numerator,
            denominator,
        } => Pending::new(parse_term(numerator)?, parse_term(denominator)?).normalize(),
        Shape::Mixed { whole, fraction } => {
            let fraction = parse(fraction)?;
            let whole_part = parse(whole)?;
            if whole.starts_with('-') {
                whole_part.checked_sub(fraction)
            } else {
                whole_part.checked_add(fraction)
            }
        },
    }
}

/// Parse one side of a ratio. Integers are kept exact; anything else goes
/// through `f64` and is cleared of its fractional part during normalization.
fn parse_term(input: &str) -> MathResult<Term> {
    let input = with_dot_separator(input);

    if let Ok(integer) = input.parse::<i128>() {
        return Ok(Term::Int(integer));
    }

    match input.parse::<f64>() {
        Ok(decimal) if decimal.is_finite() => Ok(Term::Float(decimal)),
        Ok(_) => Err(MathError::parse_number::<Rational, _, _>(
            input,
            "not a finite number",
        )),
        Err(err) => Err(MathError::parse_number::<Rational, _, _>(input, err)),
    }
}

fn is_signed_fraction(fraction: &str) -> bool {
    fraction.split('/').any(|part| part.starts_with(['-', '+']))
}

fn is_integral(input: &str) -> bool {
    with_dot_separator(input)
        .parse::<f64>()
        .is_ok_and(|x| x.is_finite() && x.fract() == 0.0)
}

/// Accept a comma as decimal separator, as in `"0,875"`.
fn with_dot_separator(input: &str) -> String {
    input.replacen(',', ".", 1)
}

impl FromStr for Rational {
    type Err = MathError;

    /// Parse a fraction from one of the following forms:
    ///
    /// - whole number: `"3"`, `"-12"`
    /// - decimal, with either `.` or `,` as separator: `"0.25"`, `"0,875"`
    /// - simple fraction: `"7/8"`, `"-2/3"`, `"1.5/2"`
    /// - mixed number: `"1 2/3"`, `"-1 2/3"`
    /// - `"NaN"`
    ///
    /// Every output of `Display` parses back into the same value.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse(input).inspect_err(|err| {
            tracing::debug!(input, %err, "Failed to parse fraction");
        })
    }
}

impl Rational {
    /// Create a new [`Rational`] from a numerator and a denominator given as
    /// decimal strings, e.g. `("2", "9")` or `("0,5", "3")`.
    pub fn from_str_pair(numerator: &str, denominator: &str) -> MathResult<Self> {
        Pending::new(parse_term(numerator)?, parse_term(denominator)?).normalize()
    }
}

// ----------------------------------- tests -----------------------------------
