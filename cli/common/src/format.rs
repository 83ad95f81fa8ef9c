//! Human-readable formatting for the plan summary.

/// Render a byte count in the largest binary unit it fills.
///
/// # Examples
///
/// ```
/// use ds_cli_common::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 bytes");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const SCALES: [(u64, &str); 4] = [
        (KB * KB * KB * KB, "TB"),
        (KB * KB * KB, "GB"),
        (KB * KB, "MB"),
        (KB, "KB"),
    ];

    for (scale, unit) in SCALES {
        if bytes >= scale {
            return format!("{:.2} {}", bytes as f64 / scale as f64, unit);
        }
    }
    format!("{bytes} bytes")
}

/// Insert thousands separators into a count.
///
/// # Examples
///
/// ```
/// use ds_cli_common::format_number;
///
/// assert_eq!(format_number(1234567), "1,234,567");
/// ```
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}
