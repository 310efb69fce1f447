/// Share of present days as a percentage rounded to two decimals.
///
/// A student with no records has `0.0`.
pub fn attendance_percentage(present_days: u64, total_days: u64) -> f64 {
    if total_days == 0 {
        return 0.0;
    }
    let pct = present_days as f64 / total_days as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
