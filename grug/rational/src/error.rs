use std::any::type_name;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("failed to parse string `{input}` into {ty}: {reason}")]
    ParseNumber {
        ty: &'static str,
        input: String,
        reason: String,
    },

    #[error("addition overflow: {a} + {b} > {ty}::MAX")]
    OverflowAdd { ty: &'static str, a: String, b: String },

    #[error("subtraction overflow: {a} - {b} < {ty}::MIN")]
    OverflowSub { ty: &'static str, a: String, b: String },

    #[error("multiplication overflow: {a} * {b} > {ty}::MAX")]
    OverflowMul { ty: &'static str, a: String, b: String },

    #[error("conversion overflow: {source_type}({value}) > {target_type}::MAX")]
    OverflowConversion {
        source_type: &'static str,
        target_type: &'static str,
        value: String,
    },
}

impl MathError {
    pub fn parse_number<T, V, R>(input: V, reason: R) -> Self
    where
        V: ToString,
        R: ToString,
    {
        Self::ParseNumber {
            ty: type_name::<T>(),
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn overflow_add<T>(a: T, b: T) -> Self
    where
        T: ToString,
    {
        Self::OverflowAdd {
            ty: type_name::<T>(),
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn overflow_sub<T>(a: T, b: T) -> Self
    where
        T: ToString,
    {
        Self::OverflowSub {
            ty: type_name::<T>(),
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn overflow_mul<T>(a: T, b: T) -> Self
    where
        T: ToString,
    {
        Self::OverflowMul {
            ty: type_name::<T>(),
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn overflow_conversion<A, B>(value: A) -> Self
    where
        A: ToString,
    {
        Self::OverflowConversion {
            source_type: type_name::<A>(),
            target_type: type_name::<B>(),
            value: value.to_string(),
        }
    }
}

pub type MathResult<T> = core::result::Result<T, MathError>;

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use crate::{MathError, Rational};

    #[test]
    fn error_messages_name_the_types() {
        let err = MathError::overflow_mul(i128::MAX, 2);
        assert_eq!(
            err.to_string(),
            format!("multiplication overflow: {} * 2 > i128::MAX", i128::MAX)
        );

        let err = MathError::parse_number::<Rational, _, _>("1/x", "invalid denominator");
        assert!(matches!(err, MathError::ParseNumber { ref input, .. } if input == "1/x"));
        assert!(err.to_string().contains("grug_rational::rational::Rational"));

        let err = MathError::overflow_conversion::<f64, i128>(1e39);
        assert!(matches!(
            err,
            MathError::OverflowConversion {
                source_type: "f64",
                target_type: "i128",
                ..
            }
        ));
    }
}
