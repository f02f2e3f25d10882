/// Number of schedule fields in an expression
pub const FIELD_COUNT: usize = 5;

/// Value used for a leading field that the expression leaves out
pub const DEFAULT_FIELD_VALUE: &str = "*";

/// Separates the atoms of a list (`1,15`)
pub const LIST_SEPARATOR: char = ',';
/// Separates the two ends of a range (`1-5`)
pub const RANGE_SEPARATOR: char = '-';
/// Introduces a repetition step (`*/15`)
pub const STEP_SEPARATOR: char = '/';

/// Wildcard for the whole legal range of a field
pub const WILDCARD: char = '*';
/// Alternate wildcard, accepted wherever `*` is
pub const WILDCARD_ALT: char = '?';

/// Special character meaning "last day"
pub const LAST_DAY: char = 'L';

/// Length of a month or weekday alias (`jan`, `mon`)
pub const ALIAS_LEN: usize = 3;

/// Days per week; day-of-week values are folded modulo this
pub const DAYS_IN_WEEK: u8 = 7;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February is fixed at 29 so that leap days are never dropped
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    29, // February (leap-safe)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];
