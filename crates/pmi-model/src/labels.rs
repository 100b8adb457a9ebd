//! Label and metric name helpers for the exposition format.

/// Derive the info label name for a column: snake_case over alphanumeric
/// runs, camel-case boundaries split, everything else treated as a
/// separator.
///
/// `"Serial No."` becomes `"serial_no"`, `"IP Address"` becomes
/// `"ip_address"`.
pub fn info_label_name(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    let mut boundary = false;
    let mut prev_lower_or_digit = false;
    for ch in column.chars() {
        if ch.is_ascii_alphanumeric() {
            let upper = ch.is_ascii_uppercase();
            if !out.is_empty() && (boundary || (upper && prev_lower_or_digit)) {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            boundary = false;
            prev_lower_or_digit = !upper;
        } else {
            boundary = true;
            prev_lower_or_digit = false;
        }
    }
    out
}

/// True for `[a-zA-Z_][a-zA-Z0-9_]*`.
pub fn is_valid_label_name(label: &str) -> bool {
    let mut chars = label.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// True for `[a-zA-Z_:][a-zA-Z0-9_:]*`.
pub fn is_valid_metric_name(metric: &str) -> bool {
    let mut chars = metric.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == ':') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == ':')
}
