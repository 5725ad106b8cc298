//! Completion strings matched by the completion filters

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Today's date in the local timezone.
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Text a completion pattern is searched in, e.g.
/// `"2013-02-16 Saturday February -44d"`.
///
/// Empty when the item is not completed. The day count compares calendar
/// dates only, so an item finished late yesterday is `-1d` this morning.
pub fn completion_string(completed: Option<NaiveDateTime>, today: NaiveDate) -> String {
    match completed {
        Some(when) => {
            let days_elapsed = today.signed_duration_since(when.date()).num_days();
            format!("{} -{}d", when.format("%Y-%m-%d %A %B"), days_elapsed)
        }
        None => String::new(),
    }
}
