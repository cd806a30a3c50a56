//! Human-readable byte sizes for intake display and error messages.

#[cfg(test)]
#[path = "size_test.rs"]
mod size_test;

const UNIT_STEP: u64 = 1024;
const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count as `"<value> <unit>"`.
///
/// The unit is the largest power of 1024 not exceeding `bytes` (capped at
/// `GB`), and the value is rounded to two decimals, halves away from zero,
/// with trailing zeros dropped: `1536 -> "1.5 KB"`, `1152 -> "1.13 KB"`,
/// `0 -> "0 Bytes"`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let index = unit_index(bytes);
    let value = bytes as f64 / UNIT_STEP.pow(index as u32) as f64;
    format!("{} {}", trim_decimals(value), UNITS[index])
}

/// Integer `floor(log_1024(bytes))`, clamped to the last known unit.
fn unit_index(bytes: u64) -> usize {
    let mut index = 0;
    let mut remaining = bytes;
    while remaining >= UNIT_STEP && index < UNITS.len() - 1 {
        remaining /= UNIT_STEP;
        index += 1;
    }
    index
}

fn trim_decimals(value: f64) -> String {
    // `{:.2}` alone would send exact halves to the even digit.
    let rounded = (value * 100.0).round() / 100.0;
    let fixed = format!("{rounded:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_owned()
}
