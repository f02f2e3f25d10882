//! Field grammar: sequence → repeat → range.
//!
//! A field value is a comma-separated list of atoms. Each atom may carry a
//! step (`a/n`) and its base may be a range (`lo-hi`), a single number, a
//! wildcard or a special character. Month and weekday aliases are replaced
//! atom by atom before the grammar sees them.

use std::str::FromStr;

use crate::consts::{
    ALIAS_LEN, LIST_SEPARATOR, RANGE_SEPARATOR, STEP_SEPARATOR, WILDCARD, WILDCARD_ALT,
};
use crate::types::{Constraint, Field, FieldResult, FieldValue};

/// How an atom with more than one `/` is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StepPolicy {
    /// Reject the atom with a format error
    #[default]
    Strict,
    /// Use the first segment as the base and the last as the step
    FirstLast,
}

/// Broad category of a [`FieldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed list, range or step syntax
    Format,
    /// A value or range endpoint outside the field's bounds
    Constraint,
    /// A range whose start is not below its end
    Range,
    /// A step that is not a positive integer
    Step,
}

/// Error type for single-field parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Empty atom in a comma-separated list.
    #[error("Invalid list value format: {0}")]
    InvalidList(String),

    /// A `-` with nothing on either side, or more than one `-`.
    #[error("Invalid range format: {0}")]
    InvalidRangeFormat(String),

    /// More than one `/` under the strict step policy.
    #[error("Invalid repeat format: {0}")]
    InvalidRepeatFormat(String),

    /// Both `*` and `?` in one field value.
    #[error("Cannot mix '*' and '?' in one field value: {0}")]
    MixedWildcards(String),

    /// A single value outside the field's bounds, or not a value at all.
    #[error("Constraint error, got value {value} expected range {min}-{max}")]
    ValueOutOfRange { value: String, min: u8, max: u8 },

    /// A range endpoint outside the field's bounds, or not a number.
    #[error("Constraint error, got range {range} expected range {min}-{max}")]
    RangeOutOfBounds { range: String, min: u8, max: u8 },

    /// Range start is not strictly below range end.
    #[error("Invalid range: {low}-{high}")]
    InvalidRange { low: u8, high: u8 },

    /// Step is not a positive integer.
    #[error("Constraint error, cannot repeat at every {0} time")]
    InvalidStep(String),
}

impl FieldError {
    /// Returns the category of this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidList(_)
            | Self::InvalidRangeFormat(_)
            | Self::InvalidRepeatFormat(_)
            | Self::MixedWildcards(_) => ErrorKind::Format,
            Self::ValueOutOfRange { .. } | Self::RangeOutOfBounds { .. } => ErrorKind::Constraint,
            Self::InvalidRange { .. } => ErrorKind::Range,
            Self::InvalidStep(_) => ErrorKind::Step,
        }
    }
}

/// Parses one field value into its sorted, validated values.
pub(crate) fn parse_field(
    field: Field,
    value: &str,
    steps: StepPolicy,
) -> Result<FieldResult, FieldError> {
    FieldGrammar::new(field, steps).parse_sequence(value)
}

/// Output of the range parser, before validation against the constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(u8),
    /// Anything that did not read as a number: a special character or garbage
    Literal(String),
}

impl Token {
    fn scalar(text: &str) -> Self {
        parse_number(text).map_or_else(|| Self::Literal(text.to_owned()), Self::Number)
    }
}

struct FieldGrammar {
    field:      Field,
    constraint: &'static Constraint,
    steps:      StepPolicy,
}

impl FieldGrammar {
    fn new(field: Field, steps: StepPolicy) -> Self {
        Self {
            field,
            constraint: field.constraint(),
            steps,
        }
    }

    fn parse_sequence(&self, value: &str) -> Result<FieldResult, FieldError> {
        if value.contains(WILDCARD) && value.contains(WILDCARD_ALT) {
            return Err(FieldError::MixedWildcards(value.to_owned()));
        }

        let atoms: Vec<&str> = value.split(LIST_SEPARATOR).collect();
        if atoms.iter().any(|atom| atom.is_empty()) {
            return Err(FieldError::InvalidList(value.to_owned()));
        }

        let mut values = Vec::new();
        for atom in atoms {
            let normalized = self.normalize(atom);
            for token in self.parse_repeat(&normalized)? {
                values.push(self.validate(token)?);
            }
        }

        Ok(values.into_iter().collect())
    }

    /// Replaces aliases and wildcards in a single atom.
    fn normalize(&self, atom: &str) -> String {
        let resolved = if self.field.aliases().is_some() {
            substitute_aliases(self.field, atom)
        } else {
            atom.to_owned()
        };

        let full_range = format!(
            "{}{RANGE_SEPARATOR}{}",
            self.constraint.min, self.constraint.max
        );
        resolved.replace([WILDCARD, WILDCARD_ALT], &full_range)
    }

    fn parse_repeat(&self, atom: &str) -> Result<Vec<Token>, FieldError> {
        let parts: Vec<&str> = atom.split(STEP_SEPARATOR).collect();
        let (base, step) = match parts.as_slice() {
            [base] => return self.parse_range(base, 1),
            [base, step] => (*base, *step),
            [base, .., step] if self.steps == StepPolicy::FirstLast => (*base, *step),
            _ => return Err(FieldError::InvalidRepeatFormat(atom.to_owned())),
        };

        let step = parse_number::<usize>(step)
            .filter(|&n| n > 0)
            .ok_or_else(|| FieldError::InvalidStep(step.to_owned()))?;

        // `5/15` means every 15 from 5 through the end of the field
        match parse_number::<u8>(base) {
            Some(start) => {
                let range = format!("{start}{RANGE_SEPARATOR}{}", self.constraint.max);
                self.parse_range(&range, step)
            }
            None => self.parse_range(base, step),
        }
    }

    fn parse_range(&self, text: &str, step: usize) -> Result<Vec<Token>, FieldError> {
        let Some((low, high)) = text.split_once(RANGE_SEPARATOR) else {
            return Ok(vec![Token::scalar(text)]);
        };

        if high.contains(RANGE_SEPARATOR) {
            return Err(FieldError::InvalidRangeFormat(text.to_owned()));
        }

        match (low.is_empty(), high.is_empty()) {
            (true, true) => return Err(FieldError::InvalidRangeFormat(text.to_owned())),
            // `-5` and `5-` are read as a whole; they never pass validation
            (true, false) | (false, true) => return Ok(vec![Token::scalar(text)]),
            (false, false) => {}
        }

        let Constraint { min, max, .. } = *self.constraint;
        let Some((low, high)) = parse_number::<u8>(low)
            .zip(parse_number::<u8>(high))
            .filter(|&(low, high)| low >= min && high <= max)
        else {
            return Err(FieldError::RangeOutOfBounds {
                range: text.to_owned(),
                min,
                max,
            });
        };

        if low >= high {
            return Err(FieldError::InvalidRange { low, high });
        }

        Ok((low..=high).step_by(step).map(Token::Number).collect())
    }

    fn validate(&self, token: Token) -> Result<FieldValue, FieldError> {
        let Constraint { min, max, .. } = *self.constraint;
        match token {
            Token::Number(n) if self.constraint.contains(n) => {
                Ok(FieldValue::Number(self.field.fold(n)))
            }
            Token::Number(n) => Err(FieldError::ValueOutOfRange {
                value: n.to_string(),
                min,
                max,
            }),
            Token::Literal(text) => match single_char(&text) {
                Some(c) if self.constraint.allows_special(c) => Ok(FieldValue::Special(c)),
                _ => Err(FieldError::ValueOutOfRange {
                    value: text,
                    min,
                    max,
                }),
            },
        }
    }
}

/// Parses an unsigned decimal number made only of ASCII digits.
fn parse_number<T: FromStr>(text: &str) -> Option<T> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Replaces every 3-letter chunk of each alphabetic run that names an alias.
/// Unknown chunks and leftover letters are kept as they are.
fn substitute_aliases(field: Field, atom: &str) -> String {
    let mut out = String::with_capacity(atom.len());
    let mut rest = atom;

    while let Some(start) = rest.find(|c: char| c.is_ascii_alphabetic()) {
        out.push_str(&rest[..start]);
        let run = &rest[start..];
        let len = run
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(run.len());
        let (mut letters, tail) = run.split_at(len);

        while letters.len() >= ALIAS_LEN {
            let (chunk, more) = letters.split_at(ALIAS_LEN);
            match field.resolve_alias(chunk) {
                Some(value) => out.push_str(&value.to_string()),
                None => out.push_str(chunk),
            }
            letters = more;
        }
        out.push_str(letters);
        rest = tail;
    }

    out.push_str(rest);
    out
}
