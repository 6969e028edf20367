/// Marker appended to truncated category labels.
pub const ELLIPSIS: char = '…';

/// Formats a value-axis label as `{prefix}{grouped digits}`.
///
/// Decimal places follow the tick step so that every label of one axis has
/// the same precision: a step of `0.2` prints one decimal, `50` prints none.
#[must_use]
pub fn format_currency(value: f64, tick_step: Option<f64>, prefix: &str) -> String {
    let decimals = tick_step
        .filter(|step| step.is_finite() && *step > 0.0 && *step < 1.0)
        .map_or(0, |step| (-step.log10().floor()) as usize);

    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}{prefix}{grouped}.{fraction}"),
        None => format!("{sign}{prefix}{grouped}"),
    }
}

/// Caps `label` at `max_chars` characters, ellipsis included.
#[must_use]
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_owned();
    }
    let mut truncated: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push(ELLIPSIS);
    truncated
}
