//! Reusable field validators
//!
//! These validators back the new-bill form gates

/// Inline message shown when a receipt has a forbidden extension
pub const BAD_FORMAT_MESSAGE: &str = "Seuls les fichiers jpg, jpeg et png sont acceptés";

/// Name used when a file selection carries no file
pub const MISSING_FILE_NAME: &str = "NULL.NULL";

/// Validator: field is required (not empty)
///
/// Whitespace counts as a value, only the empty string is rejected.
pub fn required() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| {
        if value.is_empty() {
            Err(format!("Le champ '{}' est requis", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: file extension must be in the accepted list (case-sensitive)
pub fn extension_in(
    accepted: Vec<String>,
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, file_name: &str| {
        let extension = file_extension(file_name);
        if accepted.iter().any(|a| a == extension) {
            Ok(())
        } else {
            Err(BAD_FORMAT_MESSAGE.to_string())
        }
    }
}

/// Text after the last `.`, or the whole name when there is none
pub fn file_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => &file_name[idx + 1..],
        None => file_name,
    }
}

/// Leading-integer parse: optional whitespace and sign, then digits
///
/// `"100.5"` gives 100, `"12abc"` gives 12, `"abc"` gives `None`.
///
/// Unlike a JavaScript `parseInt`, a digit run that does not fit in an
/// `i64` gives `None` rather than an approximate float.
pub fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(rest.len(), |(i, _)| i);
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Parse a non-negative amount, `None` when absent, unparseable or negative
pub fn parse_amount(raw: &str) -> Option<u32> {
    parse_int(raw).and_then(|v| u32::try_from(v).ok())
}

/// Parse a percentage, falling back to `default` when absent, unparseable,
/// zero or negative
pub fn parse_pct(raw: &str, default: u32) -> u32 {
    match parse_amount(raw) {
        Some(0) | None => default,
        Some(v) => v,
    }
}
