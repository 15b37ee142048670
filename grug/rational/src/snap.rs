use {
    crate::{MathError, MathResult, Rational},
    serde::{Deserialize, Serialize},
};

/// Bounds of the search performed by [`Rational::snap_with`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SnapOptions {
    /// Largest numerator and denominator tried for the fractional part.
    pub max: u32,
    /// A candidate is accepted if it differs from the fractional part by
    /// strictly less than this.
    pub threshold: f64,
}

impl SnapOptions {
    pub const DEFAULT_MAX: u32 = 100;
    pub const DEFAULT_THRESHOLD: f64 = 0.0001;

    /// Replace an unset (zero) `max` or `threshold` with its default. A NaN
    /// threshold counts as unset.
    pub fn or_defaults(self) -> Self {
        let max = if self.max == 0 {
            Self::DEFAULT_MAX
        } else {
            self.max
        };

        let threshold = if self.threshold == 0.0 || self.threshold.is_nan() {
            Self::DEFAULT_THRESHOLD
        } else {
            self.threshold
        };

        Self { max, threshold }
    }
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            max: Self::DEFAULT_MAX,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl Rational {
    /// Approximate the value with the simplest nearby fraction, using the
    /// default [`SnapOptions`].
    ///
    /// ```rust
    /// use {grug_rational::Rational, std::str::FromStr};
    ///
    /// let rational = Rational::try_from(1.66668).unwrap();
    /// assert_eq!(rational.snap().unwrap(), Rational::from_str("1 2/3").unwrap());
    /// ```
    pub fn snap(self) -> MathResult<Self> {
        self.snap_with(SnapOptions::default())
    }

    /// Approximate the value with the simplest nearby fraction.
    ///
    /// The whole part is kept. The fractional part is replaced by the first
    /// `n/d` within `threshold` of it, trying `d = 1..=max` in order and, for
    /// each, `n = 0..=max`. So the smallest denominator wins, and then the
    /// smallest numerator. If nothing is close enough the value is returned
    /// unchanged.
    ///
    /// A zero `max` or `threshold` means "use the default"; see
    /// [`SnapOptions::or_defaults`].
    pub fn snap_with(self, options: SnapOptions) -> MathResult<Self> {
        let options = options.or_defaults();

        let Some((numerator, denominator)) = self.parts() else {
            return Ok(self);
        };

        // Division truncates toward zero, i.e. floor for positive values and
        // ceiling for negative ones. The remainder carries the numerator's sign.
        let whole = numerator / denominator;
        let fraction = (numerator % denominator).unsigned_abs() as f64 / denominator as f64;
        let sign = if numerator < 0 { -1 } else { 1 };

        for candidate_denominator in 1..=options.max {
            for candidate_numerator in 0..=options.max {
                let approximation = candidate_numerator as f64 / candidate_denominator as f64;

                if (approximation - fraction).abs() < options.threshold {
                    let snapped = snapped_value(
                        whole,
                        sign * i128::from(candidate_numerator),
                        i128::from(candidate_denominator),
                    )?;

                    tracing::trace!(
                        from = %self,
                        to = %snapped,
                        "Snapped fraction"
                    );

                    return Ok(snapped);
                }
            }
        }

        tracing::debug!(
            value = %self,
            max = options.max,
            threshold = options.threshold,
            "No fraction within threshold; keeping value"
        );

        Ok(self)
    }
}

/// `(whole * denominator + numerator) / denominator`, reduced.
fn snapped_value(whole: i128, numerator: i128, denominator: i128) -> MathResult<Rational> {
    let scaled = whole
        .checked_mul(denominator)
        .ok_or_else(|| MathError::overflow_mul(whole, denominator))?;
    let total = scaled
        .checked_add(numerator)
        .ok_or_else(|| MathError::overflow_add(scaled, numerator))?;

    Rational::checked_new(total, denominator)
}

// ----------------------------------- tests -----------------------------------
