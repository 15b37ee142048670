use {
    crate::Rational,
    std::fmt::{self, Display, Write},
};

impl Display for Rational {
    /// Render as a mixed number: `"1 2/3"`, `"-2/3"`, `"2"`, `"0"`, or `"NaN"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((numerator, denominator)) = self.parts() else {
            return f.write_str("NaN");
        };

        if numerator == 0 {
            return f.write_char('0');
        }

        if numerator < 0 {
            f.write_char('-')?;
        }

        let numerator = numerator.unsigned_abs();
        let denominator = denominator.unsigned_abs();
        let whole = numerator / denominator;
        let remainder = numerator % denominator;

        match (whole, remainder) {
            (_, 0) => write!(f, "{whole}"),
            (0, _) => write!(f, "{remainder}/{denominator}"),
            _ => write!(f, "{whole} {remainder}/{denominator}"),
        }
    }
}

impl Rational {
    /// Render in TeX notation.
    ///
    /// With `mixed`, the whole part is extracted, e.g. `1\frac{2}{3}`.
    /// Otherwise the value is a single improper fraction, e.g. `\frac{5}{3}`,
    /// or a bare integer when the denominator is one.
    ///
    /// ```rust
    /// use grug_rational::Rational;
    ///
    /// assert_eq!(Rational::new(5, 3).to_tex(true), r"1\frac{2}{3}");
    /// assert_eq!(Rational::new(-5, 3).to_tex(false), r"-\frac{5}{3}");
    /// ```
    pub fn to_tex(&self, mixed: bool) -> String {
        let Some((numerator, denominator)) = self.parts() else {
            return "NaN".to_string();
        };

        let sign = if numerator < 0 { "-" } else { "" };
        let numerator = numerator.unsigned_abs();
        let denominator = denominator.unsigned_abs();

        if !mixed {
            return if denominator == 1 {
                format!("{sign}{numerator}")
            } else {
                format!("{sign}\\frac{{{numerator}}}{{{denominator}}}")
            };
        }

        let whole = numerator / denominator;
        let remainder = numerator % denominator;

        match (whole, remainder) {
            (0, 0) => "0".to_string(),
            (_, 0) => format!("{sign}{whole}"),
            (0, _) => format!("{sign}\\frac{{{remainder}}}{{{denominator}}}"),
            _ => format!("{sign}{whole}\\frac{{{remainder}}}{{{denominator}}}"),
        }
    }
}

// ----------------------------------- tests -----------------------------------
