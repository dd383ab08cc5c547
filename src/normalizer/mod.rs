//! Conversion between abbreviated counters ("1.2M", "523K") and exact integers.

/// Magnitude suffixes, most significant first.
const SUFFIXES: [(char, f64); 4] = [('T', 1e12), ('B', 1e9), ('M', 1e6), ('K', 1e3)];

/// Parse a human-readable count into an exact integer.
///
/// Suffixed values are scaled and rounded to the nearest integer, so
/// `"8.2M"` yields `8_200_000` even though `8.2 * 1e6` is slightly below it
/// in floating point. Unsuffixed values keep only their digits, which
/// handles thousands separators (`"1,234"`).
///
/// Never fails: anything that cannot be interpreted yields `0`.
pub fn parse_magnitude(text: &str) -> u64 {
    let normalized = text.trim().to_uppercase();
    if normalized.is_empty() {
        return 0;
    }

    for (suffix, factor) in SUFFIXES {
        for (pos, _) in normalized.match_indices(suffix) {
            if !ends_token(&normalized[pos + suffix.len_utf8()..]) {
                continue;
            }
            if let Some(run) = numeric_run_before(&normalized[..pos]) {
                return match parse_decimal(run) {
                    Some(value) => scale(value, factor),
                    None => 0,
                };
            }
        }
    }

    let digits: String = normalized.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Format a count with a two-decimal magnitude suffix for display.
pub fn format_magnitude(value: u64) -> String {
    // Display only; precision loss above 2^53 is irrelevant at two decimals.
    let v = value as f64;
    if value >= 1_000_000_000 {
        format!("{:.2}B", v / 1e9)
    } else if value >= 1_000_000 {
        format!("{:.2}M", v / 1e6)
    } else if value >= 1_000 {
        format!("{:.2}K", v / 1e3)
    } else {
        value.to_string()
    }
}

/// A suffix letter only counts when no letter follows it, so the `T` in
/// `"1,234 TOTAL"` or the `B` in `"12 BOOKMARKS"` is not a magnitude.
fn ends_token(rest: &str) -> bool {
    !rest.chars().next().is_some_and(|c| c.is_alphabetic())
}

/// The run of digits, dots and commas ending right before a suffix.
fn numeric_run_before(prefix: &str) -> Option<&str> {
    let prefix = prefix.trim_end();
    let start = prefix
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.' || *c == ',')
        .last()
        .map(|(i, _)| i)?;

    let run = &prefix[start..];
    run.chars().any(|c| c.is_ascii_digit()).then_some(run)
}

fn parse_decimal(run: &str) -> Option<f64> {
    let cleaned = match run.split_once(',') {
        // "1,5K": a single comma followed by one or two digits is a decimal mark
        Some((_, frac))
            if !run.contains('.')
                && !frac.contains(',')
                && (1..=2).contains(&frac.len()) =>
        {
            run.replace(',', ".")
        }
        _ => run.replace(',', ""),
    };
    cleaned.parse::<f64>().ok()
}

fn scale(value: f64, factor: f64) -> u64 {
    let scaled = (value * factor).round();
    if scaled.is_finite() && scaled >= 0.0 {
        // Saturates for absurdly large inputs.
        scaled as u64
    } else {
        0
    }
}
