const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const STEP: f64 = 1024.0;

/// Formats a byte count for display, e.g. `1536` → `"1.5 KB"`.
///
/// Values are rounded to two decimals and trailing zeros are dropped.
/// Anything past gigabytes is still expressed in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".into();
    }
    let mut exp = 0;
    while exp < UNITS.len() - 1 && bytes >= 1u64 << (10 * (exp + 1)) {
        exp += 1;
    }
    let value = (bytes as f64 / STEP.powi(exp as i32) * 100.0).round() / 100.0;
    format!("{} {}", value, UNITS[exp])
}

/// Formats a page count as "1 page" or "N pages".
pub fn page_label(count: u32) -> String {
    if count == 1 {
        "1 page".into()
    } else {
        format!("{} pages", count)
    }
}
