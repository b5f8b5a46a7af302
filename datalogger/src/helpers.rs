use std::time::Duration;

const MICROS_PER_SEC: u32 = 1_000_000;

/// Sampling period in microseconds requested from a sensor to get `frequency_hz` events per
/// second. Truncates towards zero.
pub(crate) fn sampling_period_us(frequency_hz: u32) -> u32 {
    MICROS_PER_SEC.checked_div(frequency_hz).unwrap_or(0)
}

/// Number of whole update intervals that fit in a cell.
pub(crate) fn steps_per_cell(cell_duration: Duration, update_interval: Duration) -> u64 {
    let interval = update_interval.as_nanos();
    if interval == 0 {
        return 0;
    }
    (cell_duration.as_nanos() / interval) as u64
}

/// Renders a frequency the way the metadata section of the payload expects it.
pub(crate) fn format_frequency(frequency_hz: Option<f64>) -> String {
    format!("{:?}", frequency_hz.unwrap_or(0.0))
}
