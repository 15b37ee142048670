/// Greatest common divisor of the absolute values of `a` and `b`, computed
/// with Euclid's remainder algorithm.
///
/// The result is unsigned so that `gcd(i128::MIN, 0) = 2^127` is representable.
/// By convention `gcd(n, 0) = |n|` and `gcd(0, 0) = 0`.
///
/// ```rust
/// use grug_rational::gcd;
///
/// assert_eq!(gcd(12, -18), 6);
/// assert_eq!(gcd(7, 0), 7);
/// ```
pub fn gcd(a: i128, b: i128) -> u128 {
    gcd_unsigned(a.unsigned_abs(), b.unsigned_abs())
}

pub(crate) fn gcd_unsigned(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let c = a % b;
        a = b;
        b = c;
    }

    a
}

/// Decompose an integer into its prime factors, in ascending order, using
/// trial division. The sign is ignored.
///
/// Edge cases: `0` yields `[0]`, and `1` yields no factors at all.
///
/// ```rust
/// use grug_rational::prime_factors;
///
/// assert_eq!(prime_factors(360), vec![2, 2, 2, 3, 3, 5]);
/// assert_eq!(prime_factors(-13), vec![13]);
/// ```
pub fn prime_factors(n: i128) -> Vec<u128> {
    let mut num = n.unsigned_abs();
    let mut factors = Vec::new();
    let mut factor = 2_u128;

    // Written as a division so `factor * factor` can't overflow.
    while factor <= num / factor {
        if num % factor == 0 {
            factors.push(factor);
            num /= factor;
        } else {
            factor += 1;
        }
    }

    if num != 1 {
        factors.push(num);
    }

    factors
}

// ----------------------------------- tests -----------------------------------
