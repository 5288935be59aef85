//! Comma-separated numeric input.

/// Parses `"1, 2,3.5"` into `[1.0, 2.0, 3.5]`.
///
/// Tokens are trimmed before parsing. If any token fails to parse,
/// including an empty token from `"1,,2"` or an empty string, the whole
/// input yields an empty vector, which the test runners reject as a
/// shape error.
///
/// # Examples
///
/// ```
/// use u_ttest::parse::parse_numbers;
///
/// assert_eq!(parse_numbers(" 580, 590 ,600"), vec![580.0, 590.0, 600.0]);
/// assert!(parse_numbers("580, abc").is_empty());
/// ```
pub fn parse_numbers(text: &str) -> Vec<f64> {
    text.split(',')
        .map(|token| token.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_tokens() {
        assert_eq!(parse_numbers("1,2,3"), vec![1.0, 2.0, 3.0]);
        assert_eq!(parse_numbers("  -1.5 ,\t2e2 "), vec![-1.5, 200.0]);
        assert_eq!(parse_numbers("42"), vec![42.0]);
    }

    #[test]
    fn any_bad_token_empties() {
        assert!(parse_numbers("").is_empty());
        assert!(parse_numbers("1,,2").is_empty());
        assert!(parse_numbers("1,2,").is_empty());
        assert!(parse_numbers("1; 2").is_empty());
    }

    #[test]
    fn empty_input_is_a_shape_error() {
        use crate::error::TestError;
        use crate::ttest::{run_one_sample, TestConfig};

        let err = run_one_sample(&parse_numbers("x"), 0.0, TestConfig::default()).unwrap_err();
        assert!(matches!(err, TestError::ShapeMismatch(_)));
    }
}
