//! Small helpers shared by the query codec, networking, and presentation
//! layers: percent-encoding, JSON field extraction, timestamp formatting,
//! and character-bounded truncation.

use serde_json::Value;
use std::fmt::Write;

/// What: Percent-encode a string for use in a URL query component (RFC 3986).
///
/// Inputs:
/// - `input`: String to encode.
///
/// Output:
/// - Encoded string; unreserved characters (`A-Z a-z 0-9 - . _ ~`) pass
///   through, a space becomes `%20`, every other byte becomes `%XX`.
///
/// Details:
/// - Operates on raw bytes, so non-ASCII input is hex-escaped per byte.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => {
                out.push('%');
                let _ = write!(out, "{b:02X}");
            }
        }
    }
    out
}

/// What: Decode a percent-encoded query component back into a string.
///
/// Inputs:
/// - `input`: Possibly percent-encoded string (`+` is also accepted for space).
///
/// Output:
/// - Decoded string; malformed escapes are kept verbatim rather than dropped.
#[must_use]
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                // hex-decode from the byte slice: the escape may abut a
                // multi-byte character, so slicing the &str could split a
                // codepoint
                let pair = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                if let Some(v) = pair {
                    out.push(v);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// What: Extract a string field from a JSON object, defaulting to empty.
#[must_use]
pub fn s(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// What: Return the first non-null string among candidate keys.
///
/// Inputs:
/// - `v`: JSON object to read.
/// - `keys`: Candidate keys, tried in order.
///
/// Output:
/// - `Some(String)` for the first key holding a JSON string, else `None`.
#[must_use]
pub fn ss(v: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| v.get(k).and_then(Value::as_str).map(ToOwned::to_owned))
}

/// What: Extract an unsigned integer from the first matching key.
///
/// Details:
/// - Accepts JSON numbers and numeric strings; negative values map to `None`.
#[must_use]
pub fn u64_of(v: &Value, keys: &[&str]) -> Option<u64> {
    for k in keys {
        if let Some(val) = v.get(k) {
            if let Some(n) = val.as_u64() {
                return Some(n);
            }
            if let Some(st) = val.as_str()
                && let Ok(n) = st.parse::<u64>()
            {
                return Some(n);
            }
        }
    }
    None
}

/// What: Format an RFC 3339 / ISO 8601 timestamp string as `YYYY-MM-DD`.
///
/// Inputs:
/// - `raw`: Timestamp as reported by the backend, possibly empty.
///
/// Output:
/// - `Some("YYYY-MM-DD")` when parseable, `None` otherwise.
#[must_use]
pub fn iso_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.format("%Y-%m-%d").to_string());
    }
    // Some endpoints report bare dates already.
    chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// What: Truncate a string to at most `max` characters, appending `...` when
/// anything was cut.
///
/// Details:
/// - Counts `char`s, not bytes, so multi-byte text never splits mid-codepoint.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}
