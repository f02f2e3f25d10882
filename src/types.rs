use crate::consts::{DAYS_IN_WEEK, FIELD_COUNT, LAST_DAY};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One of the five schedule fields, in expression order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl Field {
    /// All fields in the order they appear in an expression
    pub const ALL: [Self; FIELD_COUNT] = [
        Self::Minute,
        Self::Hour,
        Self::DayOfMonth,
        Self::Month,
        Self::DayOfWeek,
    ];

    /// Position of the field within an expression (0-based)
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Symbolic name, as used for labeled output
    pub const fn name(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day of month",
            Self::Month => "month",
            Self::DayOfWeek => "day of week",
        }
    }

    /// Bounds and special characters accepted by this field
    pub fn constraint(self) -> &'static Constraint {
        &CONSTRAINTS[self.index()]
    }

    /// Textual aliases this field understands, if any
    pub fn aliases(self) -> Option<&'static [(&'static str, u8)]> {
        match self {
            Self::Month => Some(&MONTH_ALIASES),
            Self::DayOfWeek => Some(&WEEKDAY_ALIASES),
            Self::Minute | Self::Hour | Self::DayOfMonth => None,
        }
    }

    /// Looks up a 3-letter alias, ignoring case
    pub fn resolve_alias(self, token: &str) -> Option<u8> {
        self.aliases()?
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(token))
            .map(|&(_, value)| value)
    }

    /// Maps an in-range value to its stored form. Day of week folds 7 onto 0.
    pub(crate) const fn fold(self, value: u8) -> u8 {
        match self {
            Self::DayOfWeek => value % DAYS_IN_WEEK,
            _ => value,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Legal numeric bounds (inclusive) and special characters of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub min:           u8,
    pub max:           u8,
    pub special_chars: &'static [char],
}

impl Constraint {
    /// Returns true if `value` lies within `min..=max`
    #[inline]
    pub const fn contains(&self, value: u8) -> bool {
        value >= self.min && value <= self.max
    }

    /// Returns true if `c` is one of the field's special characters
    pub fn allows_special(&self, c: char) -> bool {
        self.special_chars.contains(&c)
    }
}

static CONSTRAINTS: [Constraint; FIELD_COUNT] = [
    // minute
    Constraint {
        min:           0,
        max:           59,
        special_chars: &[],
    },
    // hour
    Constraint {
        min:           0,
        max:           23,
        special_chars: &[],
    },
    // day of month
    Constraint {
        min:           1,
        max:           31,
        special_chars: &[LAST_DAY],
    },
    // month
    Constraint {
        min:           1,
        max:           12,
        special_chars: &[],
    },
    // day of week (7 is accepted and folded onto Sunday)
    Constraint {
        min:           0,
        max:           7,
        special_chars: &[LAST_DAY],
    },
];

static MONTH_ALIASES: [(&str, u8); 12] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

static WEEKDAY_ALIASES: [(&str, u8); 7] = [
    ("sun", 0),
    ("mon", 1),
    ("tue", 2),
    ("wed", 3),
    ("thu", 4),
    ("fri", 5),
    ("sat", 6),
];

/// A single resolved field value: a number, or a special character such as `L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "FieldValueRepr", into = "FieldValueRepr")]
pub enum FieldValue {
    #[display(fmt = "{_0}")]
    Number(u8),
    #[display(fmt = "{_0}")]
    Special(char),
}

impl FieldValue {
    /// Returns the numeric value, if this is a number
    pub const fn number(self) -> Option<u8> {
        match self {
            Self::Number(n) => Some(n),
            Self::Special(_) => None,
        }
    }

    /// Returns true if this is the "last day" marker
    pub const fn is_last_day(self) -> bool {
        matches!(self, Self::Special(LAST_DAY))
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    /// Numbers ascending, then special characters in lexical order.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Number(_), Self::Special(_)) => Ordering::Less,
            (Self::Special(_), Self::Number(_)) => Ordering::Greater,
            (Self::Special(a), Self::Special(b)) => a.cmp(b),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum FieldValueRepr {
    Number(u8),
    Special(String),
}

impl TryFrom<FieldValueRepr> for FieldValue {
    type Error = String;

    fn try_from(repr: FieldValueRepr) -> Result<Self, Self::Error> {
        match repr {
            FieldValueRepr::Number(n) => Ok(Self::Number(n)),
            FieldValueRepr::Special(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_ascii_digit() => Ok(Self::Special(c)),
                    _ => Err(format!("Invalid special field value: {s:?}")),
                }
            }
        }
    }
}

impl From<FieldValue> for FieldValueRepr {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Number(n) => Self::Number(n),
            FieldValue::Special(c) => Self::Special(c.to_string()),
        }
    }
}

/// The sorted values of one field.
///
/// Always ordered by [`FieldValue`]'s ordering and free of duplicates;
/// displays as the space-joined list (`0 15 30 45`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deref, Into, Serialize, Deserialize)]
#[serde(from = "Vec<FieldValue>", into = "Vec<FieldValue>")]
pub struct FieldResult(Vec<FieldValue>);

impl FieldResult {
    /// Iterates over the numeric values, skipping special characters
    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().filter_map(|v| v.number())
    }

    /// Returns true if the field holds the given number
    pub fn contains_number(&self, value: u8) -> bool {
        self.0.contains(&FieldValue::Number(value))
    }
}

impl FromIterator<FieldValue> for FieldResult {
    fn from_iter<I: IntoIterator<Item = FieldValue>>(iter: I) -> Self {
        let mut values: Vec<FieldValue> = iter.into_iter().collect();
        values.sort();
        values.dedup();
        Self(values)
    }
}

impl From<Vec<FieldValue>> for FieldResult {
    fn from(values: Vec<FieldValue>) -> Self {
        values.into_iter().collect()
    }
}

impl fmt::Display for FieldResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_and_names() {
        let names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            ["minute", "hour", "day of month", "month", "day of week"]
        );
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
        assert_eq!(Field::DayOfMonth.to_string(), "day of month");
    }

    #[test]
    fn test_constraint_table() {
        struct TestCase {
            field:   Field,
            min:     u8,
            max:     u8,
            allow_l: bool,
        }

        let cases = [
            TestCase {
                field:   Field::Minute,
                min:     0,
                max:     59,
                allow_l: false,
            },
            TestCase {
                field:   Field::Hour,
                min:     0,
                max:     23,
                allow_l: false,
            },
            TestCase {
                field:   Field::DayOfMonth,
                min:     1,
                max:     31,
                allow_l: true,
            },
            TestCase {
                field:   Field::Month,
                min:     1,
                max:     12,
                allow_l: false,
            },
            TestCase {
                field:   Field::DayOfWeek,
                min:     0,
                max:     7,
                allow_l: true,
            },
        ];

        for case in &cases {
            let constraint = case.field.constraint();
            assert_eq!(constraint.min, case.min, "min of {}", case.field);
            assert_eq!(constraint.max, case.max, "max of {}", case.field);
            assert_eq!(
                constraint.allows_special('L'),
                case.allow_l,
                "'L' allowed in {}",
                case.field
            );
        }
    }

    #[test]
    fn test_constraint_contains() {
        let days = Field::DayOfMonth.constraint();
        assert!(!days.contains(0));
        assert!(days.contains(1));
        assert!(days.contains(31));
        assert!(!days.contains(32));
    }

    #[test]
    fn test_resolve_alias() {
        assert_eq!(Field::Month.resolve_alias("jan"), Some(1));
        assert_eq!(Field::Month.resolve_alias("DEC"), Some(12));
        assert_eq!(Field::Month.resolve_alias("Sep"), Some(9));
        assert_eq!(Field::DayOfWeek.resolve_alias("sun"), Some(0));
        assert_eq!(Field::DayOfWeek.resolve_alias("SAT"), Some(6));

        // Aliases are scoped to their field
        assert_eq!(Field::Month.resolve_alias("mon"), None);
        assert_eq!(Field::DayOfWeek.resolve_alias("jan"), None);
        assert_eq!(Field::Hour.resolve_alias("jan"), None);
        assert!(Field::Minute.aliases().is_none());
    }

    #[test]
    fn test_fold_day_of_week() {
        assert_eq!(Field::DayOfWeek.fold(7), 0);
        assert_eq!(Field::DayOfWeek.fold(6), 6);
        assert_eq!(Field::Minute.fold(7), 7);
    }

    #[test]
    fn test_value_ordering() {
        use FieldValue::{Number, Special};

        assert!(Number(2) < Number(10));
        assert!(Number(59) < Special('L'));
        assert!(Special('L') > Number(0));
        assert!(Special('A') < Special('L'));
        assert_eq!(Number(5).cmp(&Number(5)), Ordering::Equal);

        let mut values = vec![Special('L'), Number(10), Number(2), Special('A'), Number(1)];
        values.sort();
        assert_eq!(
            values,
            vec![Number(1), Number(2), Number(10), Special('A'), Special('L')]
        );
    }

    #[test]
    fn test_value_display() {
        assert_eq!(FieldValue::Number(15).to_string(), "15");
        assert_eq!(FieldValue::Special('L').to_string(), "L");
    }

    #[test]
    fn test_result_collect_sorts_and_dedups() {
        use FieldValue::{Number, Special};

        let result: FieldResult = vec![Special('L'), Number(15), Number(1), Number(15)]
            .into_iter()
            .collect();
        assert_eq!(result.to_string(), "1 15 L");
        assert_eq!(result.len(), 3);
        assert_eq!(result.numbers().collect::<Vec<_>>(), vec![1, 15]);
        assert!(result.contains_number(15));
        assert!(!result.contains_number(2));
    }

    #[test]
    fn test_empty_result_display() {
        assert_eq!(FieldResult::default().to_string(), "");
    }

    #[test]
    fn test_value_serde() {
        let json = serde_json::to_string(&FieldValue::Number(5)).unwrap();
        assert_eq!(json, "5");
        let json = serde_json::to_string(&FieldValue::Special('L')).unwrap();
        assert_eq!(json, r#""L""#);

        let parsed: FieldValue = serde_json::from_str("30").unwrap();
        assert_eq!(parsed, FieldValue::Number(30));
        let parsed: FieldValue = serde_json::from_str(r#""L""#).unwrap();
        assert_eq!(parsed, FieldValue::Special('L'));

        assert!(serde_json::from_str::<FieldValue>(r#""LL""#).is_err());
        assert!(serde_json::from_str::<FieldValue>(r#""""#).is_err());
    }

    #[test]
    fn test_result_serde_restores_order() {
        let parsed: FieldResult = serde_json::from_str(r#"["L", 15, 1]"#).unwrap();
        assert_eq!(parsed.to_string(), "1 15 L");

        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"[1,15,"L"]"#);
    }
}
