use chrono::{Local, NaiveDate};

/// The current calendar date in the server's local timezone.
///
/// Check-ins, roll calls and complaints are all keyed by this date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
