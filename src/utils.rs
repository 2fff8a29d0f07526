use std::time::Duration;

/// Formats an elapsed request time as seconds with two decimals, e.g. `0.42s`.
pub fn format_elapsed(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}
