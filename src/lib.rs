mod calendar;
mod consts;
mod grammar;
mod parser;
mod prelude;
mod types;

pub use calendar::days_in_month;
pub use consts::*;
pub use grammar::{ErrorKind, FieldError, StepPolicy};
pub use parser::CronParser;
pub use types::{Constraint, Field, FieldResult, FieldValue};

use crate::prelude::*;
use serde::ser::SerializeMap;
use std::str::FromStr;

/// A cron expression expanded into the concrete values of each field,
/// plus the command it runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedExpression {
    fields:  [FieldResult; FIELD_COUNT],
    command: String,
}

/// Error returned when an expression fails to parse, naming the failing field.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "Invalid {field} field \"{value}\": {source}")]
pub struct ParseError {
    field:  Field,
    value:  String,
    source: FieldError,
}

impl ParseError {
    pub(crate) fn new(field: Field, value: &str, source: FieldError) -> Self {
        Self {
            field,
            value: value.to_owned(),
            source,
        }
    }

    /// The field that failed
    pub const fn field(&self) -> Field {
        self.field
    }

    /// The raw field value that failed
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Category of the underlying error
    pub const fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    /// The underlying field error
    pub const fn field_error(&self) -> &FieldError {
        &self.source
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Parses an expression with the default [`CronParser`].
///
/// ```
/// let parsed = cron_fields::parse("*/15 0 1,15 * * backup.sh").unwrap();
/// assert_eq!(parsed.minute().to_string(), "0 15 30 45");
/// assert_eq!(parsed.day_of_month().to_string(), "1 15");
/// assert_eq!(parsed.command(), "backup.sh");
/// ```
///
/// # Errors
/// Returns `ParseError` if any field is malformed or out of bounds.
pub fn parse(expression: &str) -> Result<ParsedExpression, ParseError> {
    CronParser::default().parse(expression)
}

impl ParsedExpression {
    pub(crate) const fn from_parts(fields: [FieldResult; FIELD_COUNT], command: String) -> Self {
        Self { fields, command }
    }

    /// Returns the values of `field`
    pub fn field(&self, field: Field) -> &FieldResult {
        &self.fields[field.index()]
    }

    pub fn minute(&self) -> &FieldResult {
        self.field(Field::Minute)
    }

    pub fn hour(&self) -> &FieldResult {
        self.field(Field::Hour)
    }

    pub fn day_of_month(&self) -> &FieldResult {
        self.field(Field::DayOfMonth)
    }

    pub fn month(&self) -> &FieldResult {
        self.field(Field::Month)
    }

    pub fn day_of_week(&self) -> &FieldResult {
        self.field(Field::DayOfWeek)
    }

    /// The trailing command, verbatim
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Iterates over the fields in expression order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldResult)> {
        Field::ALL.into_iter().zip(self.fields.iter())
    }
}

impl FromStr for ParsedExpression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl serde::Serialize for ParsedExpression {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT + 1))?;
        for (field, values) in self.iter() {
            map.serialize_entry(field.name(), &values.to_string())?;
        }
        map.serialize_entry("command", &self.command)?;
        map.end()
    }
}
