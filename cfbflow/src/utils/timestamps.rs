//! Duration formatting for run summaries.

use std::time::Duration;

/// Formats an elapsed duration as `H:MM:SS.ffffff`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use cfbflow::utils::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_millis(61_500)), "0:01:01.500000");
/// ```
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    let micros = elapsed.subsec_micros();
    format!("{hours}:{minutes:02}:{seconds:02}.{micros:06}")
}
