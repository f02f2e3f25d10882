use crate::calendar::restrict_days_to_month;
use crate::consts::{DEFAULT_FIELD_VALUE, FIELD_COUNT};
use crate::grammar::{self, StepPolicy};
use crate::types::{Field, FieldResult};
use crate::{ParseError, ParsedExpression};

/// Cron expression parser with configurable defaults and step handling.
///
/// ```
/// use cron_fields::{CronParser, Field, StepPolicy};
///
/// let parser = CronParser::new()
///     .with_default(Field::Minute, "0")
///     .with_step_policy(StepPolicy::FirstLast);
///
/// // Four tokens: the minute takes its default, and the last token is both
/// // the day of week and the command
/// let parsed = parser.parse("9 * * 1").unwrap();
/// assert_eq!(parsed.minute().to_string(), "0");
/// assert_eq!(parsed.hour().to_string(), "9");
/// assert_eq!(parsed.day_of_week().to_string(), "1");
/// assert_eq!(parsed.command(), "1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronParser {
    defaults:    [String; FIELD_COUNT],
    step_policy: StepPolicy,
}

impl Default for CronParser {
    fn default() -> Self {
        Self {
            defaults:    std::array::from_fn(|_| DEFAULT_FIELD_VALUE.to_owned()),
            step_policy: StepPolicy::default(),
        }
    }
}

impl CronParser {
    /// Creates a parser with `*` defaults and the strict step policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value used when `field` is missing from an expression
    #[must_use]
    pub fn with_default(mut self, field: Field, value: impl Into<String>) -> Self {
        self.defaults[field.index()] = value.into();
        self
    }

    /// Sets how atoms with several `/` are treated
    #[must_use]
    pub fn with_step_policy(mut self, policy: StepPolicy) -> Self {
        self.step_policy = policy;
        self
    }

    /// Returns the default value of `field`
    pub fn default_for(&self, field: Field) -> &str {
        &self.defaults[field.index()]
    }

    /// Returns the configured step policy
    pub const fn step_policy(&self) -> StepPolicy {
        self.step_policy
    }

    /// Parses a full expression: up to five fields followed by a command.
    ///
    /// With more than five tokens the first five are the fields. With five or
    /// fewer, the tokens fill the trailing fields and the leading ones take
    /// their default. The command is always the last token, so an expression
    /// of five or fewer tokens reads its last token as both the day of week
    /// and the command.
    ///
    /// # Errors
    /// Returns `ParseError` naming the first field that fails to parse.
    pub fn parse(&self, expression: &str) -> Result<ParsedExpression, ParseError> {
        let tokens: Vec<&str> = expression.split_whitespace().collect();
        tracing::debug!(expression, tokens = tokens.len(), "Parsing cron expression");

        let missing = FIELD_COUNT.saturating_sub(tokens.len());
        let mut fields: [FieldResult; FIELD_COUNT] = Default::default();

        for field in Field::ALL {
            let value = field
                .index()
                .checked_sub(missing)
                .and_then(|i| tokens.get(i).copied())
                .unwrap_or_else(|| self.default_for(field));
            fields[field.index()] = self.parse_field(field, value)?;
        }

        let day_index = Field::DayOfMonth.index();
        let days = std::mem::take(&mut fields[day_index]);
        fields[day_index] = restrict_days_to_month(days, &fields[Field::Month.index()]);

        let command = tokens.last().copied().unwrap_or_default().to_owned();
        Ok(ParsedExpression::from_parts(fields, command))
    }

    /// Parses a single field value.
    ///
    /// # Errors
    /// Returns `ParseError` if the value is malformed or out of bounds.
    pub fn parse_field(&self, field: Field, value: &str) -> Result<FieldResult, ParseError> {
        match grammar::parse_field(field, value, self.step_policy) {
            Ok(result) => {
                tracing::trace!(%field, value, result = %result, "Parsed field");
                Ok(result)
            }
            Err(source) => {
                tracing::debug!(%field, value, error = %source, "Field failed to parse");
                Err(ParseError::new(field, value, source))
            }
        }
    }
}
