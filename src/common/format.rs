use colored::*;

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Size of a removed store, for log lines
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, SIZE_UNITS[unit])
    }
}

/// Wall time of a clear run. Runs are short, so milliseconds or seconds.
pub fn format_duration(secs: f64) -> String {
    if secs < 1.0 {
        format!("{}ms", (secs * 1000.0).round() as u64)
    } else {
        format!("{:.1}s", secs)
    }
}

pub fn format_categories(count: usize) -> String {
    match count {
        1 => "1 category".to_string(),
        n => format!("{} categories", n),
    }
}

/// One dimmed `key: value` row in a header block
pub fn print_kv(key: &str, value: &str) {
    println!("  {} {}", format!("{}:", key).dimmed(), value);
}
