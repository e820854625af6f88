//! Parser for the surface syntax of first-order formulas
//!
//! Connectives from loosest to tightest binding: `<->`, `->` (both
//! right-associative), `|`, `&` (both left-associative), `!`, and the
//! quantifiers `forall v F` / `exists v F`. Identifier class is decided
//! lexically: variables and function symbols begin with a lowercase letter,
//! constants with an uppercase letter or a digit, relations with an
//! uppercase letter. `forall` and `exists` are reserved words. Whitespace is
//! insignificant between tokens.

use crate::fol::{Atom, Formula, Term, Variable};
use nom::character::complete::{alphanumeric1, char, multispace0};
use nom::error::{ErrorKind, ParseError as NomParseError};
use nom::IResult;
use thiserror::Error;

/// Error returned when a formula fails to parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at position {position}: expected {expected}")]
pub struct ParseError {
    /// Byte offset into the input at which parsing failed
    pub position: usize,
    /// What would have been accepted at that point
    pub expected: String,
}

/// Internal nom error: remembers the deepest failure point and a label for
/// what was expected there.
#[derive(Debug)]
struct Expectation<'a> {
    remaining: &'a str,
    expected: &'static str,
}

impl<'a> Expectation<'a> {
    fn err(remaining: &'a str, expected: &'static str) -> nom::Err<Self> {
        nom::Err::Error(Expectation {
            remaining,
            expected,
        })
    }
}

impl<'a> NomParseError<&'a str> for Expectation<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        let expected = match kind {
            ErrorKind::AlphaNumeric => "an identifier",
            ErrorKind::Char => "a delimiter",
            _ => "a formula",
        };
        Expectation {
            remaining: input,
            expected,
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        // Keep whichever attempt got further into the input
        if other.remaining.len() < self.remaining.len() {
            other
        } else {
            self
        }
    }
}

type PResult<'a, T> = IResult<&'a str, T, Expectation<'a>>;

/// `char` pinned to this parser's error type
fn sym<'a>(c: char) -> impl Fn(&'a str) -> PResult<'a, char> {
    char(c)
}

/// Parse a complete formula. The whole input must be consumed.
pub fn parse(input: &str) -> Result<Formula, ParseError> {
    let outcome = (|| {
        let (rest, parsed) = formula(input)?;
        let (rest, _) = multispace0(rest)?;
        if rest.is_empty() {
            Ok(parsed)
        } else {
            Err(Expectation::err(rest, "an operator or end of input"))
        }
    })();

    outcome.map_err(|err| match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => ParseError {
            position: input.len() - e.remaining.len(),
            expected: e.expected.to_string(),
        },
        // All parsers here work on complete input
        nom::Err::Incomplete(_) => ParseError {
            position: input.len(),
            expected: "more input".to_string(),
        },
    })
}

fn formula(input: &str) -> PResult<Formula> {
    iff_level(input)
}

/// `<->`, right-associative, loosest binding
fn iff_level(input: &str) -> PResult<Formula> {
    let (after_left, left) = implies_level(input)?;
    let (rest, _) = multispace0(after_left)?;
    if let Some(rest) = rest.strip_prefix("<->") {
        let (rest, right) = iff_level(rest)?;
        Ok((rest, Formula::iff(left, right)))
    } else {
        Ok((after_left, left))
    }
}

/// `->`, right-associative
fn implies_level(input: &str) -> PResult<Formula> {
    let (after_left, left) = or_level(input)?;
    let (rest, _) = multispace0(after_left)?;
    if let Some(rest) = rest.strip_prefix("->") {
        let (rest, right) = implies_level(rest)?;
        Ok((rest, Formula::implies(left, right)))
    } else {
        Ok((after_left, left))
    }
}

/// `|`, left-associative
fn or_level(input: &str) -> PResult<Formula> {
    let (mut input, mut left) = and_level(input)?;
    loop {
        let (rest, _) = multispace0(input)?;
        if let Some(rest) = rest.strip_prefix('|') {
            let (rest, right) = and_level(rest)?;
            left = Formula::or(left, right);
            input = rest;
        } else {
            return Ok((input, left));
        }
    }
}

/// `&`, left-associative
fn and_level(input: &str) -> PResult<Formula> {
    let (mut input, mut left) = operand(input)?;
    loop {
        let (rest, _) = multispace0(input)?;
        if let Some(rest) = rest.strip_prefix('&') {
            let (rest, right) = operand(rest)?;
            left = Formula::and(left, right);
            input = rest;
        } else {
            return Ok((input, left));
        }
    }
}

/// An operand of a binary connective: negation, quantification, a
/// parenthesized formula, or an atom.
fn operand(input: &str) -> PResult<Formula> {
    let (input, _) = multispace0(input)?;

    if let Ok((rest, _)) = sym('!')(input) {
        let (rest, inner) = operand(rest)?;
        return Ok((rest, Formula::not(inner)));
    }

    if let Ok((rest, _)) = sym('(')(input) {
        let (rest, inner) = formula(rest)?;
        let (rest, _) = multispace0(rest)?;
        match sym(')')(rest) {
            Ok((rest, _)) => return Ok((rest, inner)),
            Err(_) => return Err(Expectation::err(rest, "')' to close the subformula")),
        }
    }

    let (rest, name) =
        identifier(input).map_err(|_| Expectation::err(input, "a formula"))?;
    match name {
        "forall" | "exists" => quantified(name, rest),
        _ => relation(name, rest, input),
    }
}

/// `forall v F` / `exists v F`; the body binds as tightly as negation
fn quantified<'a>(keyword: &'a str, input: &'a str) -> PResult<'a, Formula> {
    let (input, _) = multispace0(input)?;
    let (rest, var_name) = identifier(input)
        .map_err(|_| Expectation::err(input, "a variable after the quantifier"))?;
    if !starts_lowercase(var_name) {
        return Err(Expectation::err(
            input,
            "a bound variable beginning with a lowercase letter",
        ));
    }
    let (rest, body) = operand(rest)?;
    let formula = if keyword == "forall" {
        Formula::forall(var_name, body)
    } else {
        Formula::exists(var_name, body)
    };
    Ok((rest, formula))
}

/// A relation: `Name` or `Name(t, ...)` with zero or more arguments
fn relation<'a>(name: &'a str, input: &'a str, name_start: &'a str) -> PResult<'a, Formula> {
    if !starts_uppercase(name) {
        return Err(Expectation::err(
            name_start,
            "a relation name beginning with an uppercase letter",
        ));
    }
    let (after_ws, _) = multispace0(input)?;
    if let Ok((rest, _)) = sym('(')(after_ws) {
        let (rest, args) = term_list(rest)?;
        Ok((rest, Formula::Atom(Atom::new(name, args))))
    } else {
        Ok((input, Formula::Atom(Atom::new(name, vec![]))))
    }
}

/// Comma-separated terms up to a closing parenthesis (possibly none)
fn term_list(input: &str) -> PResult<Vec<Term>> {
    let (rest, _) = multispace0(input)?;
    if let Ok((rest, _)) = sym(')')(rest) {
        return Ok((rest, vec![]));
    }

    let mut args = Vec::new();
    let mut input = input;
    loop {
        let (rest, arg) = term(input)?;
        args.push(arg);
        let (rest, _) = multispace0(rest)?;
        if let Ok((rest, _)) = sym(',')(rest) {
            input = rest;
        } else if let Ok((rest, _)) = sym(')')(rest) {
            return Ok((rest, args));
        } else {
            return Err(Expectation::err(rest, "',' or ')' in the argument list"));
        }
    }
}

/// A term: variable, constant, or function application with at least one
/// argument.
fn term(input: &str) -> PResult<Term> {
    let (input, _) = multispace0(input)?;
    let (rest, name) =
        identifier(input).map_err(|_| Expectation::err(input, "a term"))?;
    if name == "forall" || name == "exists" {
        return Err(Expectation::err(input, "a term ('forall' and 'exists' are reserved)"));
    }

    let (after_ws, _) = multispace0(rest)?;
    if let Ok((body, _)) = sym('(')(after_ws) {
        if !starts_lowercase(name) {
            return Err(Expectation::err(
                input,
                "a function name beginning with a lowercase letter",
            ));
        }
        let (body, args) = term_list(body)?;
        if args.is_empty() {
            return Err(Expectation::err(
                input,
                "at least one argument (a nullary function is a constant)",
            ));
        }
        Ok((body, Term::function(name, args)))
    } else if starts_lowercase(name) {
        Ok((rest, Term::Variable(Variable::new(name))))
    } else {
        Ok((rest, Term::constant(name)))
    }
}

fn identifier(input: &str) -> PResult<&str> {
    alphanumeric1(input)
}

fn starts_lowercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_lowercase)
}

fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
