//! Assertion helpers for headless scenarios.

use crate::document::HeadlessDocument;
use animora_core::{ElementId, Host};
use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{anychar, char, digit0, digit1, multispace1, one_of, satisfy},
    combinator::{map, map_res, opt, recognize},
    multi::many0,
    sequence::{pair, tuple},
    IResult,
};

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

fn first_match(
    target: &str,
    document: &HeadlessDocument,
) -> Result<ElementId, AssertionResult> {
    match document.try_select(target) {
        Ok(found) => found.first().copied().ok_or_else(|| {
            AssertionResult::failed("missing_element", format!("{target}: element not found"))
        }),
        Err(err) => Err(AssertionResult::failed("invalid_selector", err.to_string())),
    }
}

/// Check the first element matching `target` has `property` equal to `expected`.
///
/// With a tolerance, every number in the two values is compared within it
/// and the non-numeric text must match exactly.
pub fn evaluate_assert_style(
    target: &str,
    property: &str,
    expected: &str,
    tolerance: Option<f32>,
    document: &HeadlessDocument,
) -> AssertionResult {
    let element = match first_match(target, document) {
        Ok(element) => element,
        Err(failure) => return failure,
    };
    let Some(actual) = document.style_value(element, property) else {
        return AssertionResult::failed(
            "missing_style",
            format!("{target}: '{property}' is not set"),
        );
    };

    let equal = match tolerance {
        None => actual == expected,
        Some(tolerance) => approx_equal(&actual, expected, tolerance),
    };
    if equal {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "style_mismatch",
            format!("{target}: expected {property} '{expected}', got '{actual}'"),
        )
    }
}

pub fn evaluate_assert_marker(
    target: &str,
    marker: &str,
    present: bool,
    document: &HeadlessDocument,
) -> AssertionResult {
    let elements = match document.try_select(target) {
        Ok(elements) if !elements.is_empty() => elements,
        Ok(_) => {
            return AssertionResult::failed(
                "missing_element",
                format!("{target}: element not found"),
            )
        }
        Err(err) => return AssertionResult::failed("invalid_selector", err.to_string()),
    };
    let wrong = elements
        .iter()
        .filter(|&&e| document.has_marker(e, marker) != present)
        .count();
    if wrong == 0 {
        AssertionResult::Passed
    } else {
        let state = if present { "missing" } else { "unexpectedly set" };
        AssertionResult::failed(
            "marker_mismatch",
            format!("{target}: marker '{marker}' {state} on {wrong} element(s)"),
        )
    }
}

pub fn evaluate_assert_overlay(id: &str, present: bool, document: &HeadlessDocument) -> AssertionResult {
    if document.has_overlay(id) == present {
        AssertionResult::Passed
    } else if present {
        AssertionResult::failed("missing_overlay", format!("overlay '{id}' not found"))
    } else {
        AssertionResult::failed("unexpected_overlay", format!("overlay '{id}' still present"))
    }
}

pub fn evaluate_assert_idle(expected_idle: bool, active: usize) -> AssertionResult {
    match (expected_idle, active) {
        (true, 0) => AssertionResult::Passed,
        (false, n) if n > 0 => AssertionResult::Passed,
        (true, n) => AssertionResult::failed("not_idle", format!("{n} animation(s) still running")),
        (false, _) => AssertionResult::failed("idle", "no animation running".to_string()),
    }
}

enum Token<'a> {
    Number(f32),
    Text(&'a str),
    Space,
}

/// `[+-]digits[.digits][e[+-]digits]`; an `e` not followed by digits is
/// left for the unit (`2em`).
fn number(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize(tuple((
            opt(one_of("+-")),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        str::parse::<f32>,
    )(input)
}

/// Digits inside an identifier (`translate3d`) are text
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
    ))(input)
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        map(number, Token::Number),
        map(identifier, Token::Text),
        map(multispace1, |_| Token::Space),
        map(recognize(anychar), Token::Text),
    ))(input)
}

/// Split a CSS value into its numbers and the text between them
fn tokenize(value: &str) -> (Vec<f32>, String) {
    let Ok((_, tokens)) = many0(token)(value) else {
        return (Vec::new(), value.to_string());
    };

    let mut numbers = Vec::new();
    let mut text = String::new();
    for token in tokens {
        match token {
            Token::Number(n) => {
                numbers.push(n);
                text.push('#');
            }
            Token::Text(t) => text.push_str(t),
            Token::Space => {}
        }
    }
    (numbers, text)
}

fn approx_equal(actual: &str, expected: &str, tolerance: f32) -> bool {
    let (a_nums, a_text) = tokenize(actual);
    let (e_nums, e_text) = tokenize(expected);
    a_text == e_text
        && a_nums.len() == e_nums.len()
        && a_nums
            .iter()
            .zip(&e_nums)
            .all(|(a, e)| (a - e).abs() <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementSpec;
    use animora_core::{Overlay, StyleProperty};

    fn document() -> HeadlessDocument {
        let mut doc = HeadlessDocument::default();
        let el = doc.insert(ElementSpec::new("div").class("box"));
        doc.set_style(el, StyleProperty::Transform, "translate3d(87.5px,0px,0px) scale(1)");
        doc.set_marker(el, "vtrigger");
        doc.insert_overlay(Overlay::new("volt-grid"));
        doc
    }

    #[test]
    fn test_exact_and_default_style() {
        let doc = document();
        assert_eq!(
            evaluate_assert_style(".box", "opacity", "1", None, &doc),
            AssertionResult::Passed
        );
        assert!(matches!(
            evaluate_assert_style(".box", "opacity", "0.5", None, &doc),
            AssertionResult::Failed { ref code, .. } if code == "style_mismatch"
        ));
        assert!(matches!(
            evaluate_assert_style(".nope", "opacity", "1", None, &doc),
            AssertionResult::Failed { ref code, .. } if code == "missing_element"
        ));
    }

    #[test]
    fn test_tolerant_style() {
        let doc = document();
        assert_eq!(
            evaluate_assert_style(".box", "transform", "translate3d(87.4px, 0px, 0px) scale(1)", Some(0.2), &doc),
            AssertionResult::Passed
        );
        assert!(matches!(
            evaluate_assert_style(".box", "transform", "translate3d(80px,0px,0px) scale(1)", Some(0.2), &doc),
            AssertionResult::Failed { .. }
        ));
        assert!(matches!(
            evaluate_assert_style(".box", "transform", "translate(87.5px,0px,0px) scale(1)", Some(1.0), &doc),
            AssertionResult::Failed { .. }
        ));
    }

    #[test]
    fn test_tokenize_negative_and_exponent() {
        let (numbers, text) = tokenize("translate3d(-12px,1e2px,0px)");
        assert_eq!(numbers, vec![-12.0, 100.0, 0.0]);
        assert_eq!(text, "translate3d(#px,#px,#px)");
    }

    #[test]
    fn test_tokenize_units_starting_with_e() {
        assert_eq!(tokenize("2em"), (vec![2.0], "#em".to_string()));
        assert_eq!(tokenize("1.5ex 3e1px"), (vec![1.5, 30.0], "#ex#px".to_string()));
        assert!(approx_equal("2em", "2.001em", 0.01));
        assert!(approx_equal("2px", "2.001px", 0.01));
        assert!(!approx_equal("2em", "2.5em", 0.01));
        assert!(!approx_equal("2em", "2ex", 0.01));
    }

    #[test]
    fn test_tolerant_style_with_em_values() {
        let mut doc = HeadlessDocument::default();
        let el = doc.insert(ElementSpec::new("p").class("copy"));
        doc.set_style(el, StyleProperty::Transform, "translate3d(1.2em,0px,0px)");
        assert_eq!(
            evaluate_assert_style(".copy", "transform", "translate3d(1.25em,0px,0px)", Some(0.1), &doc),
            AssertionResult::Passed
        );
    }

    #[test]
    fn test_marker_overlay_idle() {
        let doc = document();
        assert_eq!(evaluate_assert_marker(".box", "vtrigger", true, &doc), AssertionResult::Passed);
        assert!(matches!(
            evaluate_assert_marker(".box", "vtrigger", false, &doc),
            AssertionResult::Failed { .. }
        ));
        assert_eq!(evaluate_assert_overlay("volt-grid", true, &doc), AssertionResult::Passed);
        assert_eq!(evaluate_assert_idle(true, 0), AssertionResult::Passed);
        assert!(matches!(evaluate_assert_idle(true, 2), AssertionResult::Failed { .. }));
        assert!(matches!(evaluate_assert_idle(false, 0), AssertionResult::Failed { .. }));
    }
}
