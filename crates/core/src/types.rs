/// All primary keys are SQLite `INTEGER PRIMARY KEY` rowids.
pub type DbId = i64;

/// Status ID type matching the `*_statuses` lookup tables.
pub type StatusId = i16;

/// Calendar day of an appointment, local wall-clock.
pub type Date = chrono::NaiveDate;

/// Wall-clock time of an appointment slot.
pub type Time = chrono::NaiveTime;
