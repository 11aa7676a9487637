//! The summation pipeline.
//!
//! Resolve delimiters, split the numeric text, parse each token, reject
//! negatives, then sum everything up to [`MAX_ADDEND`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::delimiter::{self, Delimiters};
use crate::error::{CalcError, CalcResult};

/// Largest value that still counts toward the sum.
pub const MAX_ADDEND: i64 = 1000;

/// Result of evaluating an input string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Calculation {
    /// Sum of every number no larger than [`MAX_ADDEND`].
    pub sum: i64,
    /// Every parsed number, in input order.
    pub numbers: Vec<i64>,
    /// Numbers above [`MAX_ADDEND`] that were left out of the sum.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<i64>,
    /// Delimiter declared by a `//` header, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
}

/// Sum the numbers in `text`.
///
/// Shorthand for `evaluate(text)?.sum`.
pub fn add(text: &str) -> CalcResult<i64> {
    evaluate(text).map(|calc| calc.sum)
}

/// JSON Schema describing a serialized [`Calculation`].
pub fn report_schema() -> schemars::Schema {
    schemars::schema_for!(Calculation)
}

/// Evaluate `text` and report how the sum was reached.
///
/// # Errors
///
/// - [`CalcError::InvalidHeader`] if a `//` header is malformed.
/// - [`CalcError::MalformedToken`] if a token is not an integer literal,
///   including the empty token between two adjacent delimiters.
/// - [`CalcError::NegativeNumbers`] listing every negative value.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn evaluate(text: &str) -> CalcResult<Calculation> {
    if text.is_empty() {
        return Ok(Calculation::default());
    }

    let (delimiters, numbers_text) = delimiter::split_header(text)?;
    debug!(delimiters = %delimiters, "resolved delimiters");

    let delimiter = delimiters.custom().map(str::to_string);
    if numbers_text.is_empty() {
        return Ok(Calculation {
            delimiter,
            ..Calculation::default()
        });
    }

    let numbers = parse_numbers(&delimiters, numbers_text)?;
    validate(&numbers)?;

    let (kept, ignored): (Vec<i64>, Vec<i64>) =
        numbers.iter().partition(|&&n| n <= MAX_ADDEND);
    if !ignored.is_empty() {
        debug!(?ignored, "ignoring numbers above {MAX_ADDEND}");
    }

    Ok(Calculation {
        sum: kept.iter().sum(),
        numbers,
        ignored,
        delimiter,
    })
}

fn parse_numbers(delimiters: &Delimiters, text: &str) -> CalcResult<Vec<i64>> {
    delimiters
        .split(text)?
        .into_iter()
        .enumerate()
        .map(|(index, token)| {
            token
                .parse::<i64>()
                .map_err(|source| CalcError::MalformedToken {
                    token: token.to_string(),
                    index,
                    source,
                })
        })
        .collect()
}

fn validate(numbers: &[i64]) -> CalcResult<()> {
    let negatives: Vec<i64> = numbers.iter().copied().filter(|n| *n < 0).collect();
    if negatives.is_empty() {
        Ok(())
    } else {
        Err(CalcError::NegativeNumbers { values: negatives })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sums(cases: &[(&str, i64, &str)]) {
        for (input, expected, description) in cases {
            let actual = add(input)
                .unwrap_or_else(|e| panic!("{description}: {input:?} failed with {e}"));
            assert_eq!(actual, *expected, "failed for: {description}");
        }
    }

    fn negative_message(input: &str) -> String {
        match add(input) {
            Err(err @ CalcError::NegativeNumbers { .. }) => err.to_string(),
            other => panic!("expected negatives error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn empty_string_returns_zero() {
        assert_eq!(add("").unwrap(), 0);
    }

    #[test]
    fn single_and_multiple_numbers() {
        assert_sums(&[
            ("1", 1, "single number"),
            ("5", 5, "single digit"),
            ("42", 42, "double digit"),
            ("1,2", 3, "two numbers with comma"),
            ("3,4", 7, "different two numbers"),
            ("8,7", 15, "larger two numbers"),
            ("1,2,3", 6, "three numbers"),
            ("1,2,3,4", 10, "four numbers"),
            ("1,2,3,4,5", 15, "five numbers"),
        ]);
    }

    #[test]
    fn all_delimiter_types() {
        assert_sums(&[
            ("1\n2,3", 6, "mixed newline and comma"),
            ("1\n2\n3,4", 10, "multiple newlines with comma"),
            ("//;\n1;2", 3, "semicolon delimiter"),
            ("//*\n1*2*3", 6, "asterisk delimiter"),
            ("//|\n1|2|3|4", 10, "pipe delimiter"),
            ("//[***]\n1***2***3", 6, "triple asterisk delimiter"),
            ("//[abc]\n1abc2abc3abc4", 10, "text delimiter"),
            ("//[::]\n1::2::3::4::5", 15, "double colon delimiter"),
        ]);
    }

    #[test]
    fn custom_header_keeps_comma_and_newline() {
        assert_sums(&[
            ("//;\n1;2,3\n4", 10, "custom with defaults"),
            ("//[.+]\n1.+2", 3, "regex metacharacters are literal"),
        ]);
    }

    #[test]
    fn large_numbers_are_filtered() {
        assert_sums(&[
            ("2,1001", 2, "number over 1000 ignored"),
            ("1000,2", 1002, "exactly 1000 included"),
            ("1,2,1001,9999", 3, "multiple large numbers ignored"),
            ("1000", 1000, "exactly 1000 alone"),
            ("1001", 0, "exactly 1001 ignored"),
            ("0,5,0", 5, "zero values included"),
        ]);
    }

    #[test]
    fn negatives_are_rejected() {
        for (input, expected) in [
            ("-1", "-1"),
            ("1,-2", "-2"),
            ("1,-2,-3,4", "-2"),
            ("-5,-10", "-5"),
        ] {
            let message = negative_message(input);
            assert!(message.contains("negatives not allowed"), "{message}");
            assert!(message.contains(expected), "{message}");
        }
    }

    #[test]
    fn negative_error_lists_every_value_in_order() {
        let err = add("1,-2,-3,4").unwrap_err();
        assert_eq!(err.negatives(), Some(&[-2, -3][..]));
        assert_eq!(err.to_string(), "negatives not allowed: -2, -3");
    }

    #[test]
    fn negatives_checked_alongside_large_numbers() {
        let err = add("2000,-1").unwrap_err();
        assert_eq!(err.negatives(), Some(&[-1][..]));
    }

    #[test]
    fn bracket_and_bare_forms_give_same_sum() {
        assert_eq!(add("//;\n1;2").unwrap(), add("//[;]\n1;2").unwrap());
    }

    #[test]
    fn complex_scenario_integration() {
        assert_eq!(add("//[***]\n1***2***3***1001").unwrap(), 6);
        assert_eq!(add("1\n2,3\n4,5").unwrap(), 15);
    }

    #[test]
    fn repeated_calls_agree() {
        let input = "//[::]\n1::2\n1001,7";
        assert_eq!(evaluate(input).unwrap(), evaluate(input).unwrap());
    }

    #[test]
    fn explicit_plus_sign_is_accepted() {
        assert_eq!(add("+3,4").unwrap(), 7);
    }

    #[test]
    fn malformed_tokens_are_errors() {
        for (input, token, index) in [
            ("1,,2", "", 1),
            ("1,", "", 1),
            ("1,x", "x", 1),
            ("1.5", "1.5", 0),
            (" 1,2", " 1", 0),
            ("1,2 ", "2 ", 1),
            ("1\n\n2", "", 1),
        ] {
            match add(input) {
                Err(CalcError::MalformedToken {
                    token: t, index: i, ..
                }) => {
                    assert_eq!(t, token, "token for {input:?}");
                    assert_eq!(i, index, "index for {input:?}");
                }
                other => panic!("expected malformed token for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_token_reported_before_negatives() {
        assert!(matches!(
            add("-1,x"),
            Err(CalcError::MalformedToken { .. })
        ));
    }

    #[test]
    fn header_with_no_numbers_sums_to_zero() {
        let calc = evaluate("//;\n").unwrap();
        assert_eq!(calc.sum, 0);
        assert!(calc.numbers.is_empty());
        assert_eq!(calc.delimiter.as_deref(), Some(";"));
    }

    #[test]
    fn invalid_header_propagates() {
        assert!(matches!(
            add("//ab\n1ab2"),
            Err(CalcError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn evaluate_reports_ignored_and_delimiter() {
        let calc = evaluate("//[***]\n1***2***3***1001").unwrap();
        assert_eq!(calc.sum, 6);
        assert_eq!(calc.numbers, vec![1, 2, 3, 1001]);
        assert_eq!(calc.ignored, vec![1001]);
        assert_eq!(calc.delimiter.as_deref(), Some("***"));
    }

    #[test]
    fn calculation_serializes_without_empty_fields() {
        let calc = evaluate("1,2").unwrap();
        let json = serde_json::to_value(&calc).unwrap();
        assert_eq!(json["sum"], 3);
        assert_eq!(json["numbers"], serde_json::json!([1, 2]));
        assert!(json.get("ignored").is_none());
        assert!(json.get("delimiter").is_none());
    }

    #[test]
    fn report_schema_describes_every_field() {
        let schema = serde_json::to_value(report_schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for field in ["sum", "numbers", "ignored", "delimiter"] {
            assert!(properties.contains_key(field), "schema lacks {field}");
        }

        let mut required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        required.sort_unstable();
        assert_eq!(required, ["numbers", "sum"]);
    }
}
