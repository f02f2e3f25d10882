use crate::consts::DAYS_IN_MONTH;
use crate::types::{FieldResult, FieldValue};

/// Number of days in `month` (1-12), with February fixed at 29.
pub const fn days_in_month(month: u8) -> Option<u8> {
    match month {
        1..=12 => Some(DAYS_IN_MONTH[month as usize]),
        _ => None,
    }
}

/// Drops day-of-month values that cannot occur in the selected month.
///
/// Only applies when `months` holds exactly one number; with several months
/// the day list is returned untouched. The "last day" marker is always kept.
pub(crate) fn restrict_days_to_month(days: FieldResult, months: &FieldResult) -> FieldResult {
    let [FieldValue::Number(month)] = months.as_slice() else {
        return days;
    };
    let Some(limit) = days_in_month(*month) else {
        return days;
    };

    let total = days.len();
    let kept: FieldResult = days
        .iter()
        .copied()
        .filter(|value| match value {
            FieldValue::Number(day) => *day <= limit,
            FieldValue::Special(_) => value.is_last_day(),
        })
        .collect();

    if kept.len() < total {
        tracing::debug!(
            month,
            limit,
            dropped = total - kept.len(),
            "Dropped day-of-month values beyond month length"
        );
    }

    kept
}
